//! Loading the list of published versions.
//!
//! Sources hand the generator an ascending, duplicate-free list. An empty
//! list is not an error here; the generator refuses it.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::domain::VersionTriple;
use crate::error::{GeneratorError, Result};

/// Something that can produce the versions to publish
pub trait VersionSource {
    fn load(&self) -> Result<Vec<VersionTriple>>;
}

/// Versions read from a manifest file.
///
/// One version per line, `1.2.3` or `1.2v3`. Blank lines and `#` comments
/// are ignored.
#[derive(Debug, Clone)]
pub struct FileVersionSource {
    path: PathBuf,
}

impl FileVersionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileVersionSource { path: path.into() }
    }
}

impl VersionSource for FileVersionSource {
    fn load(&self) -> Result<Vec<VersionTriple>> {
        debug!(path = %self.path.display(), "reading version manifest");
        let text = fs::read_to_string(&self.path)?;
        parse_manifest(&text)
    }
}

/// Versions supplied directly, e.g. by library callers
#[derive(Debug, Clone, Default)]
pub struct StaticVersionSource(pub Vec<VersionTriple>);

impl VersionSource for StaticVersionSource {
    fn load(&self) -> Result<Vec<VersionTriple>> {
        Ok(normalize(self.0.clone()))
    }
}

/// Parse manifest text into an ascending, de-duplicated version list
pub fn parse_manifest(text: &str) -> Result<Vec<VersionTriple>> {
    let mut versions = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let entry = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        }
        .trim();
        if entry.is_empty() {
            continue;
        }

        let version = VersionTriple::parse(entry).map_err(|e| match e {
            GeneratorError::Version(msg) => {
                GeneratorError::version(format!("line {}: {}", index + 1, msg))
            }
            other => other,
        })?;
        versions.push(version);
    }
    Ok(normalize(versions))
}

fn normalize(mut versions: Vec<VersionTriple>) -> Vec<VersionTriple> {
    versions.sort();
    let before = versions.len();
    versions.dedup();
    if versions.len() != before {
        warn!(
            duplicates = before - versions.len(),
            "ignoring duplicate versions"
        );
    }
    debug!(count = versions.len(), "loaded versions");
    versions
}
