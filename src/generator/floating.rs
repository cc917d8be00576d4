//! Floating tag assignment.
//!
//! Tags are always decided for the *previous* version by comparing it with
//! the one that follows it. The newest version has no successor, so its tags
//! come from [`terminal_tags`] instead of [`rollover_tags`].

use crate::domain::{FloatingTagSet, VersionTriple, LATEST_TAG};

/// Tags the previous version keeps now that `current` follows it.
///
/// - no previous version: nothing
/// - major changed: `{major}` and `{major}.{minor}` of the previous version
/// - minor changed: `{major}.{minor}` of the previous version
/// - only patch changed: nothing
pub fn rollover_tags(last: Option<&VersionTriple>, current: &VersionTriple) -> FloatingTagSet {
    let mut tags = FloatingTagSet::new();
    match last {
        None => {}
        Some(last) if last.major != current.major => {
            tags.insert(last.major_tag());
            tags.insert(last.minor_tag());
        }
        Some(last) if last.minor != current.minor => {
            tags.insert(last.minor_tag());
        }
        Some(_) => {}
    }
    tags
}

/// Tags for the newest version overall: `latest`, `{major}`, `{major}.{minor}`.
pub fn terminal_tags(newest: &VersionTriple) -> FloatingTagSet {
    let mut tags = FloatingTagSet::new();
    tags.insert(LATEST_TAG);
    tags.insert(newest.major_tag());
    tags.insert(newest.minor_tag());
    tags
}

/// Floating tags for every version, in input order.
///
/// The cursor is threaded through the fold as an explicit `Option`; the
/// final element is assigned its terminal tags after the fold completes.
pub fn assign_floating_tags(versions: &[VersionTriple]) -> Vec<(VersionTriple, FloatingTagSet)> {
    let (mut assigned, newest) = versions.iter().fold(
        (Vec::with_capacity(versions.len()), None::<&VersionTriple>),
        |(mut assigned, last), current| {
            if let Some(last) = last {
                assigned.push((*last, rollover_tags(Some(last), current)));
            }
            (assigned, Some(current))
        },
    );
    if let Some(newest) = newest {
        assigned.push((*newest, terminal_tags(newest)));
    }
    assigned
}
