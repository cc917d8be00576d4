use crate::domain::VersionTriple;
use crate::error::{GeneratorError, Result};
use std::fmt;

/// The floating tag that always follows the newest published version.
pub const LATEST_TAG: &str = "latest";

/// An ordered set of docker tags to be pointed at one version's build.
///
/// Insertion order is kept because it is the order the tags are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloatingTagSet {
    tags: Vec<String>,
}

impl FloatingTagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        FloatingTagSet { tags: Vec::new() }
    }

    /// Add a tag, ignoring it if already present
    pub fn insert(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FloatingTagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FloatingTagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Docker image repository all tags are namespaced under (e.g. "natescarlet/nuke")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
}

impl ImageRef {
    /// Create an image reference, rejecting names that cannot carry a tag
    pub fn new(repository: impl Into<String>) -> Result<Self> {
        let repository = repository.into();
        if repository.trim().is_empty() {
            return Err(GeneratorError::config("Image repository must not be empty"));
        }
        if repository.contains(char::is_whitespace) {
            return Err(GeneratorError::config(format!(
                "Image repository '{}' must not contain whitespace",
                repository
            )));
        }
        // A registry host may carry a port; only the image name itself can't hold a tag.
        let name = repository.rsplit('/').next().unwrap_or(&repository);
        if name.contains(':') {
            return Err(GeneratorError::config(format!(
                "Image repository '{}' must not include a tag",
                repository
            )));
        }
        Ok(ImageRef { repository })
    }

    /// Fully qualified reference for a tag, e.g. "natescarlet/nuke:1.2"
    pub fn tagged(&self, tag: &str) -> String {
        format!("{}:{}", self.repository, tag)
    }

    /// Render a tag set as docker build flags: `--tag image:a --tag image:b`
    pub fn tag_flags(&self, tags: &FloatingTagSet) -> String {
        tags.iter()
            .map(|tag| format!("--tag {}", self.tagged(tag)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repository)
    }
}

/// Pipeline job name for one version: `publish-{major}-{minor}-{patch}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobName(String);

impl JobName {
    pub fn for_version(version: &VersionTriple) -> Self {
        JobName(format!(
            "publish-{}-{}-{}",
            version.major, version.minor, version.patch
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_keeps_insertion_order() {
        let set: FloatingTagSet = ["latest", "2", "2.0"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["latest", "2", "2.0"]);
    }

    #[test]
    fn test_tag_set_ignores_duplicates() {
        let mut set = FloatingTagSet::new();
        set.insert("1");
        set.insert("1.0");
        set.insert("1");
        assert_eq!(set.len(), 2);
        assert!(set.contains("1.0"));
        assert!(!set.contains("latest"));
    }

    #[test]
    fn test_image_tag_flags() {
        let image = ImageRef::new("natescarlet/nuke").unwrap();
        let set: FloatingTagSet = ["1", "1.1"].into_iter().collect();
        assert_eq!(
            image.tag_flags(&set),
            "--tag natescarlet/nuke:1 --tag natescarlet/nuke:1.1"
        );
    }

    #[test]
    fn test_image_tag_flags_empty_set() {
        let image = ImageRef::new("natescarlet/nuke").unwrap();
        assert_eq!(image.tag_flags(&FloatingTagSet::new()), "");
    }

    #[test]
    fn test_image_rejects_invalid_repository() {
        assert!(ImageRef::new("").is_err());
        assert!(ImageRef::new("natescarlet/nuke:latest").is_err());
        assert!(ImageRef::new("nates carlet/nuke").is_err());
        assert!(ImageRef::new("localhost:5000/nuke:1.0").is_err());
    }

    #[test]
    fn test_image_accepts_registry_with_port() {
        let image = ImageRef::new("localhost:5000/nuke").unwrap();
        let set: FloatingTagSet = ["1.0"].into_iter().collect();
        assert_eq!(image.tag_flags(&set), "--tag localhost:5000/nuke:1.0");

        let image = ImageRef::new("registry.example.com:5000/team/app").unwrap();
        assert_eq!(image.tagged("latest"), "registry.example.com:5000/team/app:latest");
    }

    #[test]
    fn test_job_name() {
        let job = JobName::for_version(&VersionTriple::new(11, 3, 0));
        assert_eq!(job.as_str(), "publish-11-3-0");
        assert_eq!(job.to_string(), "publish-11-3-0");
    }
}
