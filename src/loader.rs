//! Finding and loading documents on disk

use anyhow::{bail, Context};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::document::{check, Dialect, Document};
use crate::schema::SchemaSet;
use crate::validate::{ValidationOptions, ValidationReport};

/// File extensions treated as JSON documents
pub const JSON_EXTENSIONS: [&str; 2] = ["json", "geojson"];

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| JSON_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Expand a file or directory into a sorted list of JSON files
pub fn gather_json_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        bail!("{} does not exist", root.display());
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_json(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    debug!("found {} JSON files under {}", files.len(), root.display());
    Ok(files)
}

pub fn load_document(path: &Path, dialect: Dialect) -> anyhow::Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Document::parse(&text, dialect).with_context(|| format!("failed to parse {}", path.display()))
}

/// Outcome of checking one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Set when the file could not be read or parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(flatten)]
    pub report: ValidationReport,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.failure.is_none() && self.report.is_valid()
    }
}

/// Read and validate one file. Read and parse failures end up in
/// [`FileReport::failure`] so a batch run can keep going.
pub fn check_file(
    path: &Path,
    dialect: Dialect,
    options: &ValidationOptions,
    schemas: Option<&SchemaSet>,
) -> FileReport {
    let outcome = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| check(&text, dialect, options, schemas).map_err(|e| e.to_string()));
    match outcome {
        Ok(report) => FileReport {
            path: path.to_path_buf(),
            failure: None,
            report,
        },
        Err(failure) => {
            warn!("{}: {}", path.display(), failure);
            FileReport {
                path: path.to_path_buf(),
                failure: Some(failure),
                report: ValidationReport::default(),
            }
        }
    }
}

/// Check every JSON file reachable from `roots`
pub fn check_paths(
    roots: &[PathBuf],
    dialect: Dialect,
    options: &ValidationOptions,
    schemas: Option<&SchemaSet>,
) -> anyhow::Result<Vec<FileReport>> {
    let mut reports = Vec::new();
    for root in roots {
        for file in gather_json_files(root)? {
            reports.push(check_file(&file, dialect, options, schemas));
        }
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_gather_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.json", "{}");
        write(tmp.path(), "nested/a.geojson", "{}");
        write(tmp.path(), "notes.txt", "x");
        let files = gather_json_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("b.json"));
        assert!(files[1].ends_with("nested/a.geojson"));
    }

    #[test]
    fn test_gather_single_file_and_missing() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "one.txt", "{}");
        assert_eq!(gather_json_files(&file).unwrap(), vec![file]);
        assert!(gather_json_files(&tmp.path().join("missing")).is_err());
    }

    #[test]
    fn test_check_paths_mixes_outcomes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "good.json", r#"{"type": "Point", "coordinates": [0, 0]}"#);
        write(tmp.path(), "short.json", r#"{"type": "Point", "coordinates": [0]}"#);
        write(tmp.path(), "broken.json", "{");

        let reports = check_paths(
            &[tmp.path().to_path_buf()],
            Dialect::GeoJson,
            &ValidationOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(reports.len(), 3);
        let by_name = |name: &str| reports.iter().find(|r| r.path.ends_with(name)).unwrap();
        assert!(by_name("good.json").is_valid());
        assert!(by_name("short.json").report.has_error("ARITY"));
        assert!(by_name("broken.json").failure.is_some());
    }

    #[test]
    fn test_load_document_context() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "bad.json", r#"{"type": "Circle"}"#);
        let err = load_document(&path, Dialect::MicroJson).unwrap_err();
        assert!(format!("{:#}", err).contains("Circle"));
    }
}
