//! Terminal output for the command line.

use console::style;

use crate::domain::ImageRef;
use crate::generator::PlannedJob;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// One line per job: version, canonical tag, then any floating tags.
///
/// Plain text, so it can be asserted on and piped.
pub fn format_plan(image: &ImageRef, plan: &[PlannedJob]) -> String {
    let width = plan
        .iter()
        .map(|planned| planned.version.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for planned in plan {
        let mut line = format!(
            "{:<width$}  {}",
            planned.version.to_string(),
            image.tagged(&planned.version.canonical_tag()),
            width = width
        );
        if !planned.floating.is_empty() {
            line.push_str("  <- ");
            line.push_str(&planned.floating.iter().collect::<Vec<_>>().join(", "));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Print the version/tag listing under a bold heading.
pub fn display_plan(image: &ImageRef, plan: &[PlannedJob]) {
    println!(
        "{}",
        style(format!("Publishing {} versions of {}:", plan.len(), image)).bold()
    );
    print!("{}", format_plan(image, plan));
}
