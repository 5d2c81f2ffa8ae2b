//! Rule trait for defining architecture rules.

use crate::config::RuleOptions;
use crate::model::Architecture;
use crate::types::Finding;

/// A named unit of architecture analysis.
///
/// Rules read the model, decode their own options, and return findings.
/// They never mutate the model and never depend on another rule's output.
///
/// # Example
///
/// ```ignore
/// use archlint_core::{Architecture, Finding, Rule, RuleOptions, Severity};
///
/// pub struct RequireOwner;
///
/// impl Rule for RequireOwner {
///     fn id(&self) -> &'static str { "ARCH-OWNER" }
///
///     fn check(&self, model: &Architecture, _options: &RuleOptions) -> Vec<Finding> {
///         model
///             .containers()
///             .into_iter()
///             .filter(|r| r.container.owner.is_empty())
///             .map(|r| Finding::new(self.id(), Severity::Warn, r.path, "container has no owner"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule identifier (e.g., "ARCH-ACYCLIC").
    fn id(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Evaluates the rule against a model.
    ///
    /// # Arguments
    ///
    /// * `model` - The architecture, validated or not
    /// * `options` - This rule's configuration bag; empty means defaults
    ///
    /// # Returns
    ///
    /// Findings in the order the rule discovered them. Options that fail to
    /// decode produce a single configuration finding instead of an error.
    fn check(&self, model: &Architecture, options: &RuleOptions) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    struct TestRule;

    impl Rule for TestRule {
        fn id(&self) -> &'static str {
            "TEST-0001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, model: &Architecture, _options: &RuleOptions) -> Vec<Finding> {
            model
                .containers()
                .into_iter()
                .map(|r| Finding::new(self.id(), Severity::Info, r.path, "seen"))
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.id(), "TEST-0001");
        assert_eq!(rule.description(), "A test rule");
        assert!(rule
            .check(&Architecture::default(), &RuleOptions::new())
            .is_empty());
    }
}
