//! Locating the repository and writing the generated document.

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{debug, info};

use crate::error::{GeneratorError, Result};

/// Work-tree root of the git repository containing `start`.
///
/// Falls back to `start` itself when it is not inside a work tree.
pub fn repository_root(start: &Path) -> Result<PathBuf> {
    match Repository::discover(start) {
        Ok(repo) => match repo.workdir() {
            Some(workdir) => {
                debug!(root = %workdir.display(), "using git work tree as repository root");
                Ok(workdir.to_path_buf())
            }
            None => {
                debug!("bare repository, using current directory as root");
                Ok(start.to_path_buf())
            }
        },
        Err(e) if e.code() == git2::ErrorCode::NotFound => {
            debug!(start = %start.display(), "not inside a git repository");
            Ok(start.to_path_buf())
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve a configured path against the repository root; absolute paths are kept.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Write the full document, replacing any previous content.
///
/// The parent directory must already exist.
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    fs::write(path, document)?;
    info!(path = %path.display(), bytes = document.len(), "wrote pipeline config");
    Ok(())
}

/// Succeeds only if `path` already holds exactly `document`.
pub fn check_document(path: &Path, document: &str) -> Result<()> {
    let current = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(GeneratorError::Stale(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    if current != document {
        return Err(GeneratorError::Stale(path.to_path_buf()));
    }
    debug!(path = %path.display(), "pipeline config is up to date");
    Ok(())
}
