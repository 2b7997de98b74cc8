//! `dpt price` command - Price every enabled subsystem

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::{
    effective_format, load_catalog, load_spec, resolve_project, selector_config,
};
use crate::cli::render::render_panel;
use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::engine;

#[derive(clap::Args, Debug)]
pub struct PriceArgs {
    /// Specification file (default: <project>/spec.yaml)
    #[arg(long, short = 's')]
    pub spec: Option<PathBuf>,
}

pub fn run(args: PriceArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let config = Config::load(Some(&project));
    let spec = load_spec(&project, args.spec.as_ref())?;
    let catalog = load_catalog(&project, global);

    let builds = engine::build_all(&spec, &catalog, selector_config(&config));
    if builds.is_empty() {
        println!("{} no enabled subsystems in the specification", style("!").yellow());
        return Ok(());
    }

    let format = effective_format(global, &config);
    let mut grand_total = 0.0;
    let mut missing_rows = 0;
    for build in &builds {
        render_panel(
            &build.panel,
            build.subsystem.label(),
            &build.warnings,
            format,
            global.quiet,
        );
        println!();
        grand_total += build.panel.total();
        missing_rows += build.panel.rows().filter(|r| r.note.contains('❌')).count();
    }

    println!(
        "{} {} {}",
        style("Grand total:").bold(),
        style(format!("{:.2}", grand_total)).bold().cyan(),
        config.currency()
    );
    if missing_rows > 0 {
        println!(
            "{} {} row(s) missing catalog coverage (price 0)",
            style("!").yellow().bold(),
            missing_rows
        );
    }
    Ok(())
}
