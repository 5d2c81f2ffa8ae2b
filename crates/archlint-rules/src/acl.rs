//! Rule to require an anti-corruption layer in front of external systems.
//!
//! # Configuration
//!
//! - `allowedTags`: Tags authorizing calls to externals (default: acl)

use archlint_core::{
    decode_options, options_finding, Architecture, ContainerType, Finding, Rule, RuleOptions,
    Severity,
};
use serde::Deserialize;

/// Rule identifier for the ACL rule.
pub const ID: &str = "ARCH-ACL";

/// Configuration for the ACL rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AclConfig {
    /// Tags authorizing outbound calls to external systems.
    pub allowed_tags: Vec<String>,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            allowed_tags: vec!["acl".into()],
        }
    }
}

/// Requires callers of external systems to carry an ACL tag.
#[derive(Debug, Clone, Default)]
pub struct Acl;

impl Acl {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Acl {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires an ACL-tagged container in front of external systems"
    }

    fn check(&self, model: &Architecture, options: &RuleOptions) -> Vec<Finding> {
        let conf: AclConfig = match decode_options(options) {
            Ok(conf) => conf,
            Err(e) => return vec![options_finding(ID, &e)],
        };

        let index = model.container_map();
        model
            .relations()
            .into_iter()
            .filter_map(|rel_ref| {
                let from = index.get(rel_ref.relation.from.as_str())?;
                let to = index.get(rel_ref.relation.to.as_str())?;
                if to.container.kind != ContainerType::External
                    || from.container.has_any_tag(&conf.allowed_tags)
                {
                    return None;
                }
                Some(Finding::new(
                    ID,
                    Severity::Error,
                    rel_ref.path,
                    format!(
                        "container {} must declare one of [{}] to talk to external {}",
                        from.container.name,
                        conf.allowed_tags.join(", "),
                        to.container.name
                    ),
                ))
            })
            .collect()
    }
}
