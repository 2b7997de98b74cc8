//! `dpt catalog` command - Catalog inspection

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::Result;

use crate::catalog::{CatalogCategory, CatalogEntry};
use crate::cli::commands::{load_catalog, resolve_project};
use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List catalog entries with filtering
    List(ListArgs),

    /// Show one entry's full YAML
    Show(ShowArgs),
}

/// Category filter for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryFilter {
    Contactor,
    Mpcb,
    Mccb,
    Bimetal,
    Drive,
    Instrument,
    WireCable,
    ElectricalPanel,
    General,
    All,
}

impl CategoryFilter {
    fn matches(&self, category: CatalogCategory) -> bool {
        match self {
            CategoryFilter::Contactor => category == CatalogCategory::Contactor,
            CategoryFilter::Mpcb => category == CatalogCategory::Mpcb,
            CategoryFilter::Mccb => category == CatalogCategory::Mccb,
            CategoryFilter::Bimetal => category == CatalogCategory::Bimetal,
            CategoryFilter::Drive => category == CatalogCategory::Drive,
            CategoryFilter::WireCable => category == CatalogCategory::WireCable,
            CategoryFilter::Instrument => category == CatalogCategory::Instrument,
            CategoryFilter::ElectricalPanel => category == CatalogCategory::ElectricalPanel,
            CategoryFilter::General => category == CatalogCategory::General,
            CategoryFilter::All => true,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryFilter,

    /// Filter by brand (case-insensitive substring)
    #[arg(long, short = 'b')]
    pub brand: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Catalog entry ID (CAT-..., partial match supported)
    pub id: String,
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::List(args) => list(args, global),
        CatalogCommands::Show(args) => show(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store = load_catalog(&project, global);

    let entries: Vec<&CatalogEntry> = store
        .entries()
        .iter()
        .filter(|e| args.category.matches(e.category()))
        .filter(|e| match &args.brand {
            Some(brand) => e.brand.to_lowercase().contains(&brand.to_lowercase()),
            None => true,
        })
        .collect();

    if args.count {
        println!("{}", entries.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Csv => {
            println!("id,category,brand,order_number,specification,price,currency,updated");
            for entry in &entries {
                let (price, currency, updated) = price_columns(entry);
                println!(
                    "{},{},{},{},{},{},{},{}",
                    entry.id,
                    entry.category(),
                    escape_csv(&entry.brand),
                    escape_csv(&entry.order_number),
                    escape_csv(&entry.specs.summary()),
                    price,
                    currency,
                    updated
                );
            }
        }
        _ => {
            println!(
                "{:<18} {:<16} {:<14} {:<16} {:<24} {:>10} {:<10}",
                style("ID").bold().dim(),
                style("CATEGORY").bold().dim(),
                style("BRAND").bold().dim(),
                style("ORDER NO").bold().dim(),
                style("SPEC").bold().dim(),
                style("PRICE").bold().dim(),
                style("UPDATED").bold().dim(),
            );
            println!("{}", "-".repeat(114));
            for entry in &entries {
                let (price, _, updated) = price_columns(entry);
                println!(
                    "{:<18} {:<16} {:<14} {:<16} {:<24} {:>10} {:<10}",
                    style(truncate_str(&entry.id.to_string(), 18)).cyan(),
                    entry.category().to_string(),
                    truncate_str(&entry.brand, 14),
                    truncate_str(&entry.order_number, 16),
                    truncate_str(&entry.specs.summary(), 24),
                    price,
                    updated,
                );
            }
            if !global.quiet {
                println!();
                println!("{} entr(ies) found.", style(entries.len()).cyan());
            }
        }
    }
    Ok(())
}

fn price_columns(entry: &CatalogEntry) -> (String, String, String) {
    match entry.best_price() {
        Some(p) => (
            format!("{:.2}", p.price),
            p.currency.clone(),
            p.effective_date.format("%Y-%m-%d").to_string(),
        ),
        None => ("-".to_string(), String::new(), "-".to_string()),
    }
}

fn show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;

    let path = loader::find_entity_file(&project.catalog_dir(), &args.id)
        .ok_or_else(|| miette::miette!("no catalog entry matching '{}'", args.id))?;
    let content = std::fs::read_to_string(&path)
        .map_err(|e| miette::miette!("cannot read {}: {}", path.display(), e))?;

    if !global.quiet {
        println!("{} {}", style("#").dim(), style(path.display()).dim());
    }
    print!("{}", content);
    Ok(())
}
