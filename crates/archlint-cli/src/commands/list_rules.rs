//! List rules command implementation.

use archlint::rules::default_registry;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<24} Description", "ID");
    println!("{}", "-".repeat(80));

    for rule in default_registry().rules() {
        println!("{:<24} {}", rule.id(), rule.description());
    }

    println!("\nAll rules run unless a rule-set file or --rules selects some, e.g.:");
    println!("  archlint check architecture.yaml --rules ARCH-ACYCLIC,ARCH-ACL");
}
