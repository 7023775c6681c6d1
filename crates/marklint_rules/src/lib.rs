//! Built-in lint rules for marklint.
//!
//! Every rule here is registered under the [`NAMESPACE`] namespace.
//!
//! | Rule | Description |
//! |------|-------------|
//! | `no-gif-allowed` | Disallow images whose url ends in `.gif` |

mod no_gif_allowed;

use marklint_core::{LinterError, RuleRegistry};

pub use no_gif_allowed::NoGifAllowed;

/// Namespace of the built-in rules.
pub const NAMESPACE: &str = "marklint";

/// Registers every built-in rule into `registry`.
pub fn register_builtins(registry: &mut RuleRegistry) -> Result<(), LinterError> {
    registry.register(NAMESPACE, NoGifAllowed::NAME, NoGifAllowed)?;
    Ok(())
}

/// Returns a registry holding only the built-in rules.
pub fn builtin_registry() -> Result<RuleRegistry, LinterError> {
    let mut registry = RuleRegistry::new();
    register_builtins(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_registry() {
        let registry = builtin_registry().unwrap();
        let ids: Vec<_> = registry.iter().map(|r| r.qualified_id()).collect();
        assert_eq!(ids, vec!["marklint:no-gif-allowed"]);
    }

    #[test]
    fn test_register_builtins_twice_fails() {
        let mut registry = builtin_registry().unwrap();
        assert!(matches!(
            register_builtins(&mut registry),
            Err(LinterError::DuplicateRule(_))
        ));
    }
}
