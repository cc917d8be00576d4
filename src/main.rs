use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ci_config_gen::cli::orchestration::{self, GenerateArgs, OutputMode};
use ci_config_gen::{logging, ui, GeneratorError};

#[derive(clap::Parser)]
#[command(
    name = "ci-config-gen",
    version,
    about = "Generate the CircleCI publish pipeline from the list of released versions"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Write the pipeline to this path instead of the configured one")]
    output: Option<PathBuf>,

    #[arg(long, help = "Read versions from this manifest instead of the configured one")]
    versions: Option<PathBuf>,

    #[arg(long, help = "Print the pipeline to stdout instead of writing it")]
    stdout: bool,

    #[arg(
        long,
        conflicts_with = "stdout",
        help = "Fail if the pipeline file is not up to date"
    )]
    check: bool,

    #[arg(long, help = "List each version with the tags it is published under")]
    list: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cwd = std::env::current_dir()?;
    let (config, root) = match orchestration::load_context(args.config.as_deref(), &cwd) {
        Ok(context) => context,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_logging(&config.logging.level, args.verbose) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let mode = if args.check {
        OutputMode::Check
    } else if args.stdout || args.list {
        OutputMode::Stdout
    } else {
        OutputMode::Write
    };
    let generate_args = GenerateArgs {
        output: args.output.clone(),
        versions: args.versions.clone(),
        mode,
    };

    let result = match orchestration::run_generate(&generate_args, &config, &root) {
        Ok(result) => result,
        Err(GeneratorError::Stale(path)) => {
            ui::display_error(&format!(
                "{} is out of date, run ci-config-gen to regenerate it",
                path.display()
            ));
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.list {
        let settings = config.document_settings()?;
        ui::display_plan(&settings.image, &result.plan);
        return Ok(());
    }

    match result.mode {
        OutputMode::Stdout => print!("{}", result.document),
        OutputMode::Check => ui::display_success(&format!(
            "{} is up to date",
            result.output_path.display()
        )),
        OutputMode::Write => ui::display_success(&format!(
            "Wrote {} jobs to {}",
            result.plan.len(),
            result.output_path.display()
        )),
    }

    Ok(())
}
