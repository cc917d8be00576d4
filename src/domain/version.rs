use crate::error::{GeneratorError, Result};
use std::fmt;

/// A released (major, minor, patch) version.
///
/// Ordering is lexicographic over the three components, which is the order
/// the generator expects its input in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTriple {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        VersionTriple {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version written either as `1.2.3` or in image-tag form `1.2v3`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        let re = regex::Regex::new(r"^(\d+)\.(\d+)v(\d+)$")
            .map_err(|e| GeneratorError::version(format!("Invalid version pattern: {}", e)))?;
        if let Some(captures) = re.captures(text) {
            let component = |index: usize, name: &str| -> Result<u32> {
                captures[index].parse::<u32>().map_err(|_| {
                    GeneratorError::version(format!("Invalid {} version: {}", name, &captures[index]))
                })
            };
            return Ok(VersionTriple {
                major: component(1, "major")?,
                minor: component(2, "minor")?,
                patch: component(3, "patch")?,
            });
        }

        let parsed = semver::Version::parse(text).map_err(|e| {
            GeneratorError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z or X.YvZ ({})",
                text, e
            ))
        })?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(GeneratorError::version(format!(
                "Pre-release and build metadata are not published: '{}'",
                text
            )));
        }

        let narrow = |value: u64, name: &str| -> Result<u32> {
            u32::try_from(value)
                .map_err(|_| GeneratorError::version(format!("Invalid {} version: {}", name, value)))
        };
        Ok(VersionTriple {
            major: narrow(parsed.major, "major")?,
            minor: narrow(parsed.minor, "minor")?,
            patch: narrow(parsed.patch, "patch")?,
        })
    }

    /// The bare major tag, e.g. `1`.
    pub fn major_tag(&self) -> String {
        self.major.to_string()
    }

    /// The major.minor tag, e.g. `1.2`.
    pub fn minor_tag(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// The tag every build is published under, e.g. `1.2v3`.
    pub fn canonical_tag(&self) -> String {
        format!("{}.{}v{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
