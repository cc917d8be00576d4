//! Fixed document text and the per-version fragments.
//!
//! Indentation is significant: a floating tag fragment is emitted right
//! after a job and becomes the `extra_build_args` of that job's `publish`
//! step.

use crate::domain::{FloatingTagSet, ImageRef, JobName, VersionTriple};

const HEADER_TEMPLATE: &str = "\
# Code generated by {generated_by}, DO NOT EDIT.
version: 2.1
orbs:
  docker-publish: {orb}
executors:
  docker: docker-publish/docker
commands:
  publish:
    parameters:
      major:
        type: integer
      minor:
        type: integer
      patch:
        type: integer
      extra_build_args:
        description: >
          Extra flags to pass to docker build. For examples, see
          https://docs.docker.com/engine/reference/commandline/build
        type: string
        default: ''
    steps:
      - checkout
      - setup_remote_docker
      - docker-publish/check
      - docker-publish/build:
          extra_build_args: >-
            <<#parameters.extra_build_args>><<parameters.extra_build_args>><</parameters.extra_build_args>>
            --build-arg {prefix}_MAJOR=<< parameters.major >>
            --build-arg {prefix}_MINOR=<< parameters.minor >>
            --build-arg {prefix}_PATCH=<< parameters.patch >>
          image: {image}
          tag: << parameters.major >>.<< parameters.minor >>v<< parameters.patch >>
      - when:
          condition:
            equal: [ {branch}, << pipeline.git.branch >> ]
          steps:
            - docker-publish/deploy:
                image: {image}
";

pub const JOBS_OPENER: &str = "jobs:\n";

/// Values substituted into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSettings {
    pub image: ImageRef,
    pub branch: String,
    pub orb: String,
    pub workflow: String,
    pub build_arg_prefix: String,
    /// Tool named in the generated-code banner
    pub generated_by: String,
}

/// Static header: orbs, executors and the shared `publish` command
pub fn header(settings: &DocumentSettings) -> String {
    substitute(
        HEADER_TEMPLATE,
        &[
            ("generated_by", settings.generated_by.as_str()),
            ("orb", settings.orb.as_str()),
            ("prefix", settings.build_arg_prefix.as_str()),
            ("image", settings.image.repository.as_str()),
            ("branch", settings.branch.as_str()),
        ],
    )
}

/// Replace `{key}` placeholders in one pass; substituted values are never rescanned.
fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let found = candidate.find('}').and_then(|end| {
            let key = &candidate[1..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });
        match found {
            Some((value, end)) => {
                out.push_str(value);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// One publish job, restricted to the trunk branch
pub fn job(job: &JobName, version: &VersionTriple, branch: &str) -> String {
    format!(
        "  {job}:
    filters:
      branches:
        only:
          - {branch}
    executor: docker
    steps:
      - publish:
          major: {major}
          minor: {minor}
          patch: {patch}
",
        job = job,
        branch = branch,
        major = version.major,
        minor = version.minor,
        patch = version.patch,
    )
}

/// `extra_build_args` line for a tag set, or `None` when there is nothing to tag
pub fn extra_build_args(image: &ImageRef, tags: &FloatingTagSet) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    Some(format!("          extra_build_args: {}\n", image.tag_flags(tags)))
}

pub fn workflow_opener(name: &str) -> String {
    format!("workflows:\n  version: 2\n  {}:\n    jobs:\n", name)
}

pub fn workflow_entry(job: &JobName) -> String {
    format!("      - {}\n", job)
}
