//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    catalog::CatalogCommands, completions::CompletionsArgs, init::InitArgs, panel::PanelArgs,
    price::PriceArgs, spec::SpecCommands,
};

#[derive(Parser)]
#[command(name = "dpt")]
#[command(author, version, about = "Dust Panel Toolkit")]
#[command(
    long_about = "A toolkit for configuring electrical control panels for industrial dust-collection systems and pricing their bills of materials against a plain-text component catalog."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .dpt/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new DPT project
    Init(InitArgs),

    /// Inspect the component catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Load and validate the project specification
    #[command(subcommand)]
    Spec(SpecCommands),

    /// Build and price one subsystem's panel BOM
    Panel(PanelArgs),

    /// Build every enabled subsystem and print the grand total
    Price(PriceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Automatically detect based on context
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// JSON format (for programming)
    Json,
}

/// Subsystem selector for `dpt panel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SubsystemArg {
    Bagfilter,
    FanDamper,
    Transport,
    FreshAir,
    HopperHeater,
    Vibration,
    Installation,
}

impl From<SubsystemArg> for crate::engine::Subsystem {
    fn from(arg: SubsystemArg) -> Self {
        match arg {
            SubsystemArg::Bagfilter => crate::engine::Subsystem::Bagfilter,
            SubsystemArg::FanDamper => crate::engine::Subsystem::FanDamper,
            SubsystemArg::Transport => crate::engine::Subsystem::Transport,
            SubsystemArg::FreshAir => crate::engine::Subsystem::FreshAir,
            SubsystemArg::HopperHeater => crate::engine::Subsystem::HopperHeater,
            SubsystemArg::Vibration => crate::engine::Subsystem::Vibration,
            SubsystemArg::Installation => crate::engine::Subsystem::Installation,
        }
    }
}
