//! Rules command implementation

use miette::{IntoDiagnostic, Result};

pub fn run_rules() -> Result<bool> {
    let registry = marklint_rules::builtin_registry().into_diagnostic()?;

    println!("Available rules:");
    for rule in registry.iter() {
        let description = rule.rule().description();
        if description.is_empty() {
            println!("  {}", rule.qualified_id());
        } else {
            println!("  {:<30} {}", rule.qualified_id(), description);
        }
    }
    Ok(false)
}
