//! Verify command implementation.

use esconf::{compare_documents, ConfigurationDocument, Flavor};

/// Validates each document and checks that the first two declare the same
/// rules. Prints every problem and returns how many were found.
pub fn run(documents: &[(Flavor, &ConfigurationDocument)]) -> usize {
    let mut problems = 0usize;

    for (flavor, doc) in documents {
        let issues = doc.validate();
        if issues.is_empty() {
            println!("\x1b[32mok\x1b[0m    {flavor}: {} rules", doc.rules().len());
        }
        for issue in &issues {
            println!("\x1b[31merror\x1b[0m {flavor}: {issue}");
        }
        problems += issues.len();
    }

    if let [(left_flavor, left), (right_flavor, right), ..] = documents {
        let mismatches = compare_documents(left, right);
        for m in &mismatches {
            println!("\x1b[31merror\x1b[0m {left_flavor}/{right_flavor}: {m}");
        }
        if mismatches.is_empty() {
            println!(
                "\x1b[32mok\x1b[0m    {left_flavor} and {right_flavor} declare the same rules"
            );
        }
        problems += mismatches.len();
    }

    if problems > 0 {
        tracing::error!("Found {} problem(s)", problems);
    }
    problems
}
