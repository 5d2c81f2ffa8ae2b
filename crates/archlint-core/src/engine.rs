//! Engine for orchestrating rule execution.

use tracing::{debug, info, warn};

use crate::config::{EngineOptions, RuleOptions};
use crate::model::Architecture;
use crate::registry::Registry;
use crate::rule::Rule;
use crate::types::{sort_findings, Finding};

/// Runs a [`Registry`] of rules over a model and collects ordered findings.
#[derive(Debug)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    /// Creates an engine over the given rule catalog.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Returns the rule catalog.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolves the rules to run for the given options, in registry order.
    ///
    /// A non-empty allow-list keeps only the listed rules; identifiers that
    /// are not registered are dropped. An empty allow-list selects every rule.
    #[must_use]
    pub fn selected_rules(&self, options: &EngineOptions) -> Vec<&dyn Rule> {
        if options.enabled_rules.is_empty() {
            return self.registry.rules().iter().map(|r| &**r).collect();
        }

        for id in &options.enabled_rules {
            if self.registry.find(id).is_none() {
                warn!("Unknown rule: {}", id);
            }
        }

        self.registry
            .rules()
            .iter()
            .filter(|r| options.enabled_rules.iter().any(|id| id == r.id()))
            .map(|r| &**r)
            .collect()
    }

    /// Runs the selected rules and returns their findings sorted by rule
    /// identifier, then path, then message.
    #[must_use]
    pub fn run(&self, model: &Architecture, options: &EngineOptions) -> Vec<Finding> {
        let rules = self.selected_rules(options);
        info!("Running {} rule(s)", rules.len());

        let defaults = RuleOptions::new();
        let mut findings = Vec::new();
        for rule in rules {
            let rule_options = options.rule_options(rule.id()).unwrap_or(&defaults);
            let rule_findings = rule.check(model, rule_options);
            debug!("{} produced {} finding(s)", rule.id(), rule_findings.len());
            findings.extend(rule_findings);
        }

        sort_findings(&mut findings);
        info!("Analysis complete: {} finding(s)", findings.len());
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use serde_json::json;

    /// Emits findings in deliberately unsorted order and echoes its options.
    struct Noisy(&'static str);

    impl Rule for Noisy {
        fn id(&self) -> &'static str {
            self.0
        }

        fn check(&self, _model: &Architecture, options: &RuleOptions) -> Vec<Finding> {
            let mut findings = vec![
                Finding::new(self.0, Severity::Warn, "z", "late"),
                Finding::new(self.0, Severity::Error, "a", "second"),
                Finding::new(self.0, Severity::Error, "a", "first"),
            ];
            if let Some(value) = options.get("echo") {
                findings.push(Finding::new(self.0, Severity::Info, "echo", value.to_string()));
            }
            findings
        }
    }

    fn engine() -> Engine {
        Engine::new(Registry::new().rule(Noisy("R-B")).rule(Noisy("R-A")))
    }

    #[test]
    fn runs_all_rules_when_allow_list_empty() {
        let findings = engine().run(&Architecture::default(), &EngineOptions::new());
        assert_eq!(findings.len(), 6);
        let order: Vec<_> = findings
            .iter()
            .map(|f| format!("{}:{}:{}", f.rule_id, f.path, f.message))
            .collect();
        assert_eq!(
            order,
            vec![
                "R-A:a:first",
                "R-A:a:second",
                "R-A:z:late",
                "R-B:a:first",
                "R-B:a:second",
                "R-B:z:late",
            ]
        );
    }

    #[test]
    fn allow_list_filters_and_drops_unknown() {
        let engine = engine();
        let options = EngineOptions::new().enable(["R-A", "R-MISSING"]);
        let selected: Vec<_> = engine
            .selected_rules(&options)
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(selected, vec!["R-A"]);
        let findings = engine.run(&Architecture::default(), &options);
        assert!(findings.iter().all(|f| f.rule_id == "R-A"));
    }

    #[test]
    fn selection_follows_registry_order() {
        let options = EngineOptions::new().enable(["R-A", "R-B"]);
        let engine = engine();
        let selected: Vec<_> = engine
            .selected_rules(&options)
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(selected, vec!["R-B", "R-A"]);
    }

    #[test]
    fn rules_receive_only_their_own_options() {
        let mut bag = RuleOptions::new();
        bag.insert("echo".into(), json!("hello"));
        let options = EngineOptions::new().configure("R-B", bag);
        let findings = engine().run(&Architecture::default(), &options);
        let echoes: Vec<_> = findings.iter().filter(|f| f.path == "echo").collect();
        assert_eq!(echoes.len(), 1);
        assert_eq!(echoes[0].rule_id, "R-B");
    }

    #[test]
    fn runs_are_deterministic() {
        let engine = engine();
        let options = EngineOptions::new();
        let first = engine.run(&Architecture::default(), &options);
        let second = engine.run(&Architecture::default(), &options);
        assert_eq!(first, second);
    }
}
