use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for ci-config-gen operations
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("No versions to generate jobs for")]
    EmptyVersions,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{} is out of date, regenerate it", .0.display())]
    Stale(PathBuf),
}

/// Convenience type alias for Results in ci-config-gen
pub type Result<T> = std::result::Result<T, GeneratorError>;

impl GeneratorError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GeneratorError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GeneratorError::Version(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::config("empty branch");
        assert_eq!(err.to_string(), "Configuration error: empty branch");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GeneratorError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(matches!(err, GeneratorError::Io(_)));
    }

    #[test]
    fn test_empty_versions_message() {
        assert_eq!(
            GeneratorError::EmptyVersions.to_string(),
            "No versions to generate jobs for"
        );
    }

    #[test]
    fn test_stale_names_path() {
        let err = GeneratorError::Stale(PathBuf::from(".circleci/config.yml"));
        assert_eq!(
            err.to_string(),
            ".circleci/config.yml is out of date, regenerate it"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GeneratorError::config("x"), "Configuration error"),
            (GeneratorError::version("x"), "Version parsing error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: GeneratorError = toml_err.into();
        assert!(err.to_string().starts_with("Invalid TOML"));
    }
}
