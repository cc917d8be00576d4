use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::ImageRef;
use crate::error::{GeneratorError, Result};
use crate::generator::DocumentSettings;

/// Name of the configuration file looked up in the repository root and user config directory.
pub const CONFIG_FILE_NAME: &str = "ci-config-gen.toml";

/// Represents the complete configuration for ci-config-gen.
///
/// Contains the image being published, pipeline layout, where versions come from, and logging.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub versions: VersionsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_repository() -> String {
    "natescarlet/nuke".to_string()
}

fn default_build_arg_prefix() -> String {
    "NUKE".to_string()
}

/// Docker image all jobs publish to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ImageConfig {
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Prefix of the `{prefix}_MAJOR` style build arguments
    #[serde(default = "default_build_arg_prefix")]
    pub build_arg_prefix: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            repository: default_repository(),
            build_arg_prefix: default_build_arg_prefix(),
        }
    }
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_orb() -> String {
    "circleci/docker-publish@0.1.6".to_string()
}

fn default_workflow() -> String {
    "build and publish".to_string()
}

fn default_generated_by() -> String {
    "ci-config-gen".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(".circleci/config.yml")
}

/// Layout of the generated pipeline document.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Trunk branch jobs are restricted to and deploys happen from
    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_orb")]
    pub orb: String,

    #[serde(default = "default_workflow")]
    pub workflow: String,

    /// Tool named in the `# Code generated by ..., DO NOT EDIT.` banner
    #[serde(default = "default_generated_by")]
    pub generated_by: String,

    /// Output path, relative to the repository root
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            branch: default_branch(),
            orb: default_orb(),
            workflow: default_workflow(),
            generated_by: default_generated_by(),
            output: default_output(),
        }
    }
}

fn default_versions_file() -> PathBuf {
    PathBuf::from("versions.txt")
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionsConfig {
    /// Version manifest, relative to the repository root
    #[serde(default = "default_versions_file")]
    pub file: PathBuf,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        VersionsConfig {
            file: default_versions_file(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Checks values that would produce a broken document.
    pub fn validate(&self) -> Result<()> {
        ImageRef::new(self.image.repository.as_str())?;

        let required = [
            ("image.build_arg_prefix", self.image.build_arg_prefix.as_str()),
            ("pipeline.branch", self.pipeline.branch.as_str()),
            ("pipeline.orb", self.pipeline.orb.as_str()),
            ("pipeline.workflow", self.pipeline.workflow.as_str()),
            ("pipeline.generated_by", self.pipeline.generated_by.as_str()),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(GeneratorError::config(format!("{} must not be empty", key)));
            }
        }

        if self.pipeline.output.as_os_str().is_empty() {
            return Err(GeneratorError::config("pipeline.output must not be empty"));
        }
        if self.versions.file.as_os_str().is_empty() {
            return Err(GeneratorError::config("versions.file must not be empty"));
        }
        Ok(())
    }

    /// Values substituted into the generated document
    pub fn document_settings(&self) -> Result<DocumentSettings> {
        self.validate()?;
        Ok(DocumentSettings {
            image: ImageRef::new(self.image.repository.as_str())?,
            branch: self.pipeline.branch.clone(),
            orb: self.pipeline.orb.clone(),
            workflow: self.pipeline.workflow.clone(),
            build_arg_prefix: self.image.build_arg_prefix.clone(),
            generated_by: self.pipeline.generated_by.clone(),
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ci-config-gen.toml` in the repository root
/// 3. `ci-config-gen.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Repository root the generated files belong to
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    let local = repo_root.join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(CONFIG_FILE_NAME);
        if user.exists() {
            user
        } else {
            debug!("no configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
