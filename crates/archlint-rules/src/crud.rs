//! Rule to restrict database access to designated accessors.
//!
//! # Rationale
//!
//! Databases should be reached only through containers whose job is data
//! access, and only over `db` relations. Containers marked as exclusive
//! accessors (repositories) must not do anything else.
//!
//! # Detected Patterns
//!
//! - A relation into a database whose kind is not `db`
//! - A relation into a database from a container without an authorized tag
//! - A relation out of an exclusive accessor that is not a `db` relation to a database
//!
//! # Configuration
//!
//! - `allowedTags`: Tags authorizing database access (default: crud, repo, relay)
//! - `exclusiveTags`: Tags restricting a container to database access only (default: repo)

use archlint_core::{
    decode_options, options_finding, Architecture, ContainerType, Finding, RelationKind, Rule,
    RuleOptions, Severity,
};
use serde::Deserialize;

/// Rule identifier for the CRUD isolation rule.
pub const ID: &str = "ARCH-CRUD";

/// Configuration for CRUD isolation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrudConfig {
    /// Tags authorizing a container to reach databases.
    pub allowed_tags: Vec<String>,
    /// Tags marking a container as exclusively a database accessor.
    pub exclusive_tags: Vec<String>,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            allowed_tags: vec!["crud".into(), "repo".into(), "relay".into()],
            exclusive_tags: vec!["repo".into()],
        }
    }
}

/// Restricts database access to tagged accessors.
#[derive(Debug, Clone, Default)]
pub struct CrudIsolation;

impl CrudIsolation {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CrudIsolation {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Restricts database access to tagged accessors over db relations"
    }

    fn check(&self, model: &Architecture, options: &RuleOptions) -> Vec<Finding> {
        let conf: CrudConfig = match decode_options(options) {
            Ok(conf) => conf,
            Err(e) => return vec![options_finding(ID, &e)],
        };

        let index = model.container_map();
        let mut findings = Vec::new();

        for rel_ref in model.relations() {
            let rel = rel_ref.relation;
            let (Some(from), Some(to)) = (index.get(rel.from.as_str()), index.get(rel.to.as_str()))
            else {
                continue;
            };
            if to.container.kind != ContainerType::Database {
                continue;
            }
            if rel.kind != RelationKind::Db {
                findings.push(Finding::new(
                    ID,
                    Severity::Error,
                    rel_ref.path.clone(),
                    format!(
                        "relation to database {} must use kind 'db'",
                        to.container.name
                    ),
                ));
            }
            if !from.container.has_any_tag(&conf.allowed_tags) {
                findings.push(Finding::new(
                    ID,
                    Severity::Error,
                    rel_ref.path.clone(),
                    format!(
                        "container {} must declare one of [{}] to access databases",
                        from.container.name,
                        conf.allowed_tags.join(", ")
                    ),
                ));
            }
        }

        let outgoing = model.outgoing();
        for container_ref in model.containers() {
            let container = container_ref.container;
            if !container.has_any_tag(&conf.exclusive_tags) {
                continue;
            }
            for rel_ref in outgoing.get(container.name.as_str()).into_iter().flatten() {
                let Some(to) = index.get(rel_ref.relation.to.as_str()) else {
                    continue;
                };
                if to.container.kind != ContainerType::Database
                    || rel_ref.relation.kind != RelationKind::Db
                {
                    findings.push(Finding::new(
                        ID,
                        Severity::Error,
                        rel_ref.path.clone(),
                        format!(
                            "container {} is restricted to database relations",
                            container.name
                        ),
                    ));
                }
            }
        }

        findings
    }
}
