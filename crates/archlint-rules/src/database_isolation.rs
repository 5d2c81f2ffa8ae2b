//! Rule to keep databases passive.
//!
//! A database never initiates a relation, and by default every declared
//! database must be used by someone.
//!
//! # Configuration
//!
//! - `requireInbound`: Warn about databases nothing points at (default: true)

use std::collections::HashMap;

use archlint_core::{
    decode_options, options_finding, Architecture, ContainerType, Finding, Rule, RuleOptions,
    Severity,
};
use serde::Deserialize;

/// Rule identifier for the database isolation rule.
pub const ID: &str = "ARCH-DB-ISOLATION";

/// Configuration for database isolation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseIsolationConfig {
    /// Warn about databases without inbound relations.
    pub require_inbound: bool,
}

impl Default for DatabaseIsolationConfig {
    fn default() -> Self {
        Self {
            require_inbound: true,
        }
    }
}

/// Keeps databases as passive dependencies.
#[derive(Debug, Clone, Default)]
pub struct DatabaseIsolation;

impl DatabaseIsolation {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DatabaseIsolation {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Forbids databases from initiating relations"
    }

    fn check(&self, model: &Architecture, options: &RuleOptions) -> Vec<Finding> {
        let conf: DatabaseIsolationConfig = match decode_options(options) {
            Ok(conf) => conf,
            Err(e) => return vec![options_finding(ID, &e)],
        };

        let index = model.container_map();
        let is_database = |name: &str| {
            index
                .get(name)
                .is_some_and(|r| r.container.kind == ContainerType::Database)
        };

        let mut findings = Vec::new();
        let mut inbound: HashMap<&str, usize> = HashMap::new();
        for rel_ref in model.relations() {
            let rel = rel_ref.relation;
            if is_database(&rel.from) {
                findings.push(Finding::new(
                    ID,
                    Severity::Error,
                    rel_ref.path,
                    format!("database {} must not initiate relations", rel.from),
                ));
            }
            if is_database(&rel.to) {
                *inbound.entry(rel.to.as_str()).or_default() += 1;
            }
        }

        if conf.require_inbound {
            for container_ref in model.containers() {
                let container = container_ref.container;
                if container.kind != ContainerType::Database {
                    continue;
                }
                if inbound.get(container.name.as_str()).copied().unwrap_or(0) == 0 {
                    findings.push(Finding::new(
                        ID,
                        Severity::Warn,
                        container_ref.path,
                        format!("database {} has no inbound relations", container.name),
                    ));
                }
            }
        }

        findings
    }
}
