// tests/generator_test.rs
use ci_config_gen::config::Config;
use ci_config_gen::domain::VersionTriple;
use ci_config_gen::generator::{assign_floating_tags, Generator};
use ci_config_gen::versions::{parse_manifest, FileVersionSource, VersionSource};
use ci_config_gen::GeneratorError;
use proptest::prelude::*;

fn default_generator() -> Generator {
    Generator::new(Config::default().document_settings().unwrap())
}

fn render(generator: &Generator, versions: &[VersionTriple]) -> String {
    generator.render(&generator.plan(versions).unwrap())
}

#[test]
fn test_render_matches_golden_document() {
    let versions = FileVersionSource::new("tests/fixtures/versions.txt")
        .load()
        .unwrap();
    let document = render(&default_generator(), &versions);
    let expected = std::fs::read_to_string("tests/fixtures/expected_config.yml").unwrap();
    assert_eq!(document, expected);
}

#[test]
fn test_banner_can_name_previous_generator() {
    let mut config = Config::default();
    config.pipeline.generated_by = "./scripts/update_config.py".to_string();
    let generator = Generator::new(config.document_settings().unwrap());

    let versions = parse_manifest("1.0.0\n1.1.0\n1.1.1\n2.0.0\n").unwrap();
    let expected = std::fs::read_to_string("tests/fixtures/expected_config.yml")
        .unwrap()
        .replacen(
            "# Code generated by ci-config-gen,",
            "# Code generated by ./scripts/update_config.py,",
            1,
        );
    assert_eq!(render(&generator, &versions), expected);
}

#[test]
fn test_fragments_concatenate_to_document() {
    let versions = parse_manifest("1.0.0\n1.1.0\n1.1.1\n2.0.0\n").unwrap();
    let generator = default_generator();
    let plan = generator.plan(&versions).unwrap();
    assert_eq!(generator.fragments(&plan).concat(), generator.render(&plan));
}

#[test]
fn test_final_version_tags_follow_last_job() {
    let versions = parse_manifest("1.0.0\n1.0.1\n").unwrap();
    let document = render(&default_generator(), &versions);
    let expected_tail = "          patch: 1
          extra_build_args: --tag natescarlet/nuke:latest --tag natescarlet/nuke:1 --tag natescarlet/nuke:1.0
workflows:
";
    assert!(document.contains(expected_tail), "got:\n{}", document);
    // patch-only predecessor gets nothing
    assert_eq!(document.matches("extra_build_args: --tag").count(), 1);
}

#[test]
fn test_empty_versions_is_fatal() {
    let err = default_generator().plan(&[]).unwrap_err();
    assert!(matches!(err, GeneratorError::EmptyVersions));
}

fn ascending_versions() -> impl Strategy<Value = Vec<VersionTriple>> {
    prop::collection::vec((0u32..4, 0u32..4, 0u32..4), 1..20).prop_map(|raw| {
        let mut versions: Vec<VersionTriple> = raw
            .into_iter()
            .map(|(major, minor, patch)| VersionTriple::new(major, minor, patch))
            .collect();
        versions.sort();
        versions.dedup();
        versions
    })
}

proptest! {
    #[test]
    fn prop_one_job_per_version(versions in ascending_versions()) {
        let document = render(&default_generator(), &versions);
        let jobs = document.matches("    executor: docker\n").count();
        prop_assert_eq!(jobs, versions.len());
    }

    #[test]
    fn prop_tags_follow_rollover_rules(versions in ascending_versions()) {
        let assigned = assign_floating_tags(&versions);
        prop_assert_eq!(assigned.len(), versions.len());

        for (i, pair) in versions.windows(2).enumerate() {
            let (last, current) = (pair[0], pair[1]);
            let tags: Vec<String> = assigned[i].1.iter().map(str::to_string).collect();
            prop_assert_eq!(assigned[i].0, last);

            let expected: Vec<String> = if last.major != current.major {
                vec![last.major.to_string(), format!("{}.{}", last.major, last.minor)]
            } else if last.minor != current.minor {
                vec![format!("{}.{}", last.major, last.minor)]
            } else {
                vec![]
            };
            prop_assert_eq!(tags, expected);
        }
    }

    #[test]
    fn prop_newest_version_gets_terminal_tags(versions in ascending_versions()) {
        let assigned = assign_floating_tags(&versions);
        let (newest, tags) = assigned.last().unwrap();
        let newest = *newest;
        prop_assert_eq!(newest, *versions.last().unwrap());
        let tags: Vec<&str> = tags.iter().collect();
        let major = newest.major.to_string();
        let minor = format!("{}.{}", newest.major, newest.minor);
        prop_assert_eq!(tags, vec!["latest", major.as_str(), minor.as_str()]);
    }

    #[test]
    fn prop_workflow_lists_jobs_in_input_order(versions in ascending_versions()) {
        let document = render(&default_generator(), &versions);
        let workflow = &document[document.find("workflows:\n").unwrap()..];
        let listed: Vec<&str> = workflow
            .lines()
            .filter_map(|line| line.strip_prefix("      - "))
            .collect();
        let expected: Vec<String> = versions
            .iter()
            .map(|v| format!("publish-{}-{}-{}", v.major, v.minor, v.patch))
            .collect();
        prop_assert_eq!(listed, expected);
    }
}
