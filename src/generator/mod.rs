//! Pipeline document generation.
//!
//! The document is produced as an ordered list of text fragments: the static
//! header, one job per version interleaved with floating tag lines, then the
//! workflow listing every job in the same order.

pub mod floating;
pub mod template;

use tracing::debug;

use crate::domain::{FloatingTagSet, JobName, VersionTriple};
use crate::error::{GeneratorError, Result};

pub use floating::{assign_floating_tags, rollover_tags, terminal_tags};
pub use template::DocumentSettings;

/// One job of the generated pipeline with the floating tags it publishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedJob {
    pub version: VersionTriple,
    pub job: JobName,
    pub floating: FloatingTagSet,
}

/// Builds the pipeline document for a list of versions
#[derive(Debug, Clone)]
pub struct Generator {
    settings: DocumentSettings,
}

impl Generator {
    pub fn new(settings: DocumentSettings) -> Self {
        Generator { settings }
    }

    /// Jobs in input order, each with its floating tags.
    ///
    /// Versions must be ascending; an empty list is an error.
    pub fn plan(&self, versions: &[VersionTriple]) -> Result<Vec<PlannedJob>> {
        if versions.is_empty() {
            return Err(GeneratorError::EmptyVersions);
        }

        let plan: Vec<PlannedJob> = assign_floating_tags(versions)
            .into_iter()
            .map(|(version, floating)| {
                if !floating.is_empty() {
                    debug!(
                        version = %version,
                        tags = %floating.iter().collect::<Vec<_>>().join(","),
                        "assigning floating tags"
                    );
                }
                PlannedJob {
                    version,
                    job: JobName::for_version(&version),
                    floating,
                }
            })
            .collect();
        Ok(plan)
    }

    /// Document fragments in output order for a plan from [`Generator::plan`]
    pub fn fragments(&self, plan: &[PlannedJob]) -> Vec<String> {
        let settings = &self.settings;

        let mut fragments = Vec::with_capacity(plan.len() * 3 + 3);
        fragments.push(template::header(settings));
        fragments.push(template::JOBS_OPENER.to_string());
        for planned in plan {
            fragments.push(template::job(&planned.job, &planned.version, &settings.branch));
            if let Some(line) = template::extra_build_args(&settings.image, &planned.floating) {
                fragments.push(line);
            }
        }

        fragments.push(template::workflow_opener(&settings.workflow));
        fragments.extend(plan.iter().map(|planned| template::workflow_entry(&planned.job)));

        debug!(jobs = plan.len(), fragments = fragments.len(), "generated document");
        fragments
    }

    /// The complete document for a plan from [`Generator::plan`]
    pub fn render(&self, plan: &[PlannedJob]) -> String {
        self.fragments(plan).concat()
    }
}
