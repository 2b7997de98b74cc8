//! Entity loading utilities
//!
//! Generic helpers for loading YAML entities from the filesystem,
//! reducing boilerplate in the catalog store and command implementations.

use miette::{IntoDiagnostic, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Load all entities of type T from a directory (non-recursive)
///
/// Scans the directory for .yaml files and deserializes them.
/// Files that fail to parse are silently skipped.
pub fn load_all<T: DeserializeOwned + 'static>(dir: &Path) -> Result<Vec<T>> {
    let mut entities = Vec::new();

    if !dir.exists() {
        return Ok(entities);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .into_diagnostic()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |e| e == "yaml"))
        .collect();
    paths.sort();

    for path in paths {
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(entity) = serde_yml::from_str::<T>(&content) {
                entities.push(entity);
            }
        }
    }

    Ok(entities)
}

/// Load entities of type T from a set of files
///
/// Unparsable files are collected as (path, reason) pairs rather than
/// failing the whole load, so an incomplete catalog never stops a build.
pub fn load_files<T: DeserializeOwned + 'static>(paths: &[PathBuf]) -> (Vec<T>, Vec<(PathBuf, String)>) {
    let mut entities = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        match fs::read_to_string(path) {
            Ok(content) => match serde_yml::from_str::<T>(&content) {
                Ok(entity) => entities.push(entity),
                Err(e) => skipped.push((path.clone(), e.to_string())),
            },
            Err(e) => skipped.push((path.clone(), e.to_string())),
        }
    }

    (entities, skipped)
}

/// Find an entity file by ID (supports partial matching)
///
/// Searches for a file whose stem contains the given ID.
/// Returns the first match found in sorted order.
pub fn find_entity_file(dir: &Path, id: &str) -> Option<PathBuf> {
    if !dir.exists() {
        return None;
    }

    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().map_or(false, |e| e == "yaml"))
        .collect();
    paths.sort();

    paths.into_iter().find(|path| {
        let filename = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        filename.contains(id) || filename.starts_with(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_all_empty_dir() {
        let dir = tempdir().unwrap();
        let result: Result<Vec<serde_json::Value>> = load_all(dir.path());
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_load_all_nonexistent_dir() {
        let result: Result<Vec<serde_json::Value>> = load_all(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_load_files_reports_unparsable() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.yaml");
        let bad = dir.path().join("bad.yaml");
        fs::write(&good, "42").unwrap();
        fs::write(&bad, "{ not yaml").unwrap();

        let (loaded, skipped): (Vec<u32>, _) = load_files(&[good, bad.clone()]);
        assert_eq!(loaded, vec![42]);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, bad);
    }

    #[test]
    fn test_find_entity_file_nonexistent() {
        let result = find_entity_file(Path::new("/nonexistent/path"), "CAT-123");
        assert!(result.is_none());
    }

    #[test]
    fn test_find_entity_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("CAT-01J123456789ABCDEF.yaml");
        fs::write(&file_path, "id: CAT-01J123456789ABCDEF").unwrap();

        let result = find_entity_file(dir.path(), "CAT-01J123456789ABCDEF");
        assert!(result.is_some());
        assert_eq!(result.unwrap(), file_path);
    }
}
