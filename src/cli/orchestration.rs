//! Main generation workflow
//!
//! Loads configuration and versions, renders the document in memory, and
//! only then touches the output file. The binary maps its flags onto
//! [`GenerateArgs`] so the workflow can be driven without clap.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{self, Config};
use crate::error::Result;
use crate::generator::{Generator, PlannedJob};
use crate::output;
use crate::versions::{FileVersionSource, VersionSource};

/// What to do with the generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Overwrite the output file
    #[default]
    Write,
    /// Return the document without writing it
    Stdout,
    /// Fail if the output file differs from the generated document
    Check,
}

/// Arguments for the generate workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateArgs {
    /// Overrides `pipeline.output`
    pub output: Option<PathBuf>,

    /// Overrides `versions.file`
    pub versions: Option<PathBuf>,

    pub mode: OutputMode,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// Where the document was (or would be) written
    pub output_path: PathBuf,

    /// The rendered document
    pub document: String,

    /// Jobs in the document, with their floating tags
    pub plan: Vec<PlannedJob>,

    pub mode: OutputMode,
}

/// Configuration and repository root for a run started in `cwd`
pub fn load_context(config_path: Option<&Path>, cwd: &Path) -> Result<(Config, PathBuf)> {
    let root = output::repository_root(cwd)?;
    let config = config::load_config(config_path, &root)?;
    Ok((config, root))
}

/// Generate the pipeline document.
///
/// # Arguments
///
/// * `args` - Output mode and path overrides
/// * `config` - Loaded configuration
/// * `root` - Repository root relative paths are resolved against
pub fn run_generate(args: &GenerateArgs, config: &Config, root: &Path) -> Result<GenerateResult> {
    let generator = Generator::new(config.document_settings()?);

    let versions_path = output::resolve(
        root,
        args.versions
            .as_deref()
            .unwrap_or(config.versions.file.as_path()),
    );
    let versions = FileVersionSource::new(versions_path).load()?;
    info!(count = versions.len(), "loaded versions");

    let plan = generator.plan(&versions)?;
    let document = generator.render(&plan);

    let output_path = output::resolve(
        root,
        args.output
            .as_deref()
            .unwrap_or(config.pipeline.output.as_path()),
    );
    match args.mode {
        OutputMode::Write => output::write_document(&output_path, &document)?,
        OutputMode::Check => output::check_document(&output_path, &document)?,
        OutputMode::Stdout => {}
    }

    Ok(GenerateResult {
        output_path,
        document,
        plan,
        mode: args.mode,
    })
}
