//! `dpt panel` command - Build and price one subsystem's BOM

use miette::Result;
use std::path::PathBuf;

use crate::cli::args::SubsystemArg;
use crate::cli::commands::{
    effective_format, load_catalog, load_spec, resolve_project, selector_config,
};
use crate::cli::render::render_panel;
use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::engine;

#[derive(clap::Args, Debug)]
pub struct PanelArgs {
    /// Subsystem to build
    pub subsystem: SubsystemArg,

    /// Specification file (default: <project>/spec.yaml)
    #[arg(long, short = 's')]
    pub spec: Option<PathBuf>,
}

pub fn run(args: PanelArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let config = Config::load(Some(&project));
    let spec = load_spec(&project, args.spec.as_ref())?;
    let catalog = load_catalog(&project, global);

    let subsystem: engine::Subsystem = args.subsystem.into();
    let build = engine::build(subsystem, &spec, &catalog, selector_config(&config))
        .map_err(|e| miette::miette!("{}", e))?;

    render_panel(
        &build.panel,
        build.subsystem.label(),
        &build.warnings,
        effective_format(global, &config),
        global.quiet,
    );
    Ok(())
}
