//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents a DPT project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .dpt/)
    root: PathBuf,
}

/// Subdirectories holding catalog entry files, one per category
pub const CATALOG_DIRS: &[&str] = &[
    "catalog/contactors",
    "catalog/mpcbs",
    "catalog/mccbs",
    "catalog/bimetals",
    "catalog/drives",
    "catalog/instruments",
    "catalog/cables",
    "catalog/enclosures",
    "catalog/general",
];

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            let dpt_dir = current.join(".dpt");
            if dpt_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Open a project rooted at an explicit path (no upward search)
    pub fn open(root: &Path) -> Result<Self, ProjectError> {
        let root = root
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        if !root.join(".dpt").is_dir() {
            return Err(ProjectError::NotFound {
                searched_from: root,
            });
        }
        Ok(Self { root })
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let dpt_dir = root.join(".dpt");
        if dpt_dir.exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        Self::create_structure(&root)?;
        Ok(Self { root })
    }

    /// Force initialization even if .dpt/ exists
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::create_structure(&root)?;
        Ok(Self { root })
    }

    fn create_structure(root: &Path) -> Result<(), ProjectError> {
        let dpt_dir = root.join(".dpt");
        std::fs::create_dir_all(&dpt_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;

        let config_path = dpt_dir.join("config.yaml");
        if !config_path.exists() {
            std::fs::write(&config_path, Self::default_config())
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        for dir in CATALOG_DIRS {
            std::fs::create_dir_all(root.join(dir))
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        let spec_path = root.join("spec.yaml");
        if !spec_path.exists() {
            std::fs::write(&spec_path, crate::spec::SPEC_TEMPLATE)
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# DPT Project Configuration

# Currency shown on grand totals (default: EUR)
# currency: ""

# Default output format (auto, tsv, csv, md, json)
# default_format: auto

# Override the protective-device sizing margin (default: 1.25)
# safety_margin: 1.25
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .dpt configuration directory
    pub fn dpt_dir(&self) -> PathBuf {
        self.root.join(".dpt")
    }

    /// Get the catalog root directory
    pub fn catalog_dir(&self) -> PathBuf {
        self.root.join("catalog")
    }

    /// Get the default project specification path
    pub fn spec_path(&self) -> PathBuf {
        self.root.join("spec.yaml")
    }

    /// Iterate all catalog entry files, sorted by path for deterministic loads
    pub fn iter_catalog_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(self.catalog_dir())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "yaml"))
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a DPT project (searched from {searched_from:?}). Run 'dpt init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("DPT project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.dpt_dir().exists());
        assert!(project.dpt_dir().join("config.yaml").exists());
        assert!(project.root().join("catalog/mccbs").is_dir());
        assert!(project.root().join("catalog/enclosures").is_dir());
        assert!(project.spec_path().exists());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_discover_finds_dpt_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_dpt_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_iter_catalog_files_sorted() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        std::fs::write(project.root().join("catalog/mccbs/b.yaml"), "x: 1").unwrap();
        std::fs::write(project.root().join("catalog/mccbs/a.yaml"), "x: 1").unwrap();

        let files = project.iter_catalog_files();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.yaml"));
        assert!(files[1].ends_with("b.yaml"));
    }
}
