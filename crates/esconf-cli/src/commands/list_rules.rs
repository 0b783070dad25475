//! List rules command implementation.

use esconf::{configuration, Flavor, Severity};

/// Runs the list-rules command.
pub fn run(flavor: Flavor) {
    let rules = configuration(flavor).rules();

    println!("Rules ({flavor}):\n");
    println!("{:<45} {:<6} Options", "Rule", "Level");
    println!("{}", "-".repeat(80));

    for (id, setting) in rules.iter() {
        let level = match setting.severity() {
            Severity::Off => "\x1b[90moff\x1b[0m  ",
            Severity::Warn => "\x1b[33mwarn\x1b[0m ",
            Severity::Error => "\x1b[31merror\x1b[0m",
        };
        let options: Vec<String> = setting.options().iter().map(ToString::to_string).collect();
        println!("{id:<45} {level}  {}", options.join(" "));
    }

    let (off, warn, error) = rules.count_by_severity();
    println!(
        "\n{} rules: {error} error, {warn} warn, {off} off",
        rules.len()
    );
}
