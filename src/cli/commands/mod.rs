//! Command implementations

pub mod catalog;
pub mod completions;
pub mod init;
pub mod panel;
pub mod price;
pub mod spec;

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::catalog::CatalogStore;
use crate::core::{Config, Project};
use crate::engine::SelectorConfig;
use crate::spec::ProjectSpec;

/// Locate the project from --project or by upward search
pub(crate) fn resolve_project(global: &GlobalOpts) -> Result<Project> {
    let project = match &global.project {
        Some(path) => Project::open(path),
        None => Project::discover(),
    };
    project.map_err(|e| miette::miette!("{}", e))
}

/// Load the project specification from an explicit path or the default
pub(crate) fn load_spec(project: &Project, path: Option<&PathBuf>) -> Result<ProjectSpec> {
    let path = path.cloned().unwrap_or_else(|| project.spec_path());
    ProjectSpec::load(&path).map_err(|e| miette::miette!("{}", e))
}

/// Load the catalog, reporting skipped files in verbose mode
pub(crate) fn load_catalog(project: &Project, global: &GlobalOpts) -> CatalogStore {
    let store = CatalogStore::load(project);
    if global.verbose {
        for (path, reason) in store.skipped() {
            eprintln!(
                "{} skipped {}: {}",
                style("!").yellow().bold(),
                path.display(),
                reason
            );
        }
    }
    store
}

/// Selector parameters, honoring a configured safety-margin override
pub(crate) fn selector_config(config: &Config) -> SelectorConfig {
    let mut cfg = SelectorConfig::default();
    if let Some(margin) = config.safety_margin {
        cfg.safety_margin = margin;
    }
    cfg
}

/// Resolve the output format: an explicit --format wins, then the
/// configured default, then auto
pub(crate) fn effective_format(global: &GlobalOpts, config: &Config) -> crate::cli::OutputFormat {
    use crate::cli::OutputFormat;
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    match config.default_format.as_deref() {
        Some("tsv") => OutputFormat::Tsv,
        Some("csv") => OutputFormat::Csv,
        Some("md") => OutputFormat::Md,
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}
