//! Domain types - versions, tags and job names, independent of file I/O

pub mod tag;
pub mod version;

pub use tag::{FloatingTagSet, ImageRef, JobName, LATEST_TAG};
pub use version::VersionTriple;
