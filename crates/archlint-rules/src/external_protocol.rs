//! Rule to constrain the protocols used to reach external systems.
//!
//! # Configuration
//!
//! - `allowedPrefixes`: Case-insensitive protocol prefixes; empty allows any
//!   protocol (default: `https://gateway.`, `kafka://`)
//! - `requireProtocol`: Whether a relation to an external must declare a
//!   protocol at all (default: true)

use archlint_core::{
    decode_options, options_finding, Architecture, ContainerType, Finding, Rule, RuleOptions,
    Severity,
};
use serde::Deserialize;

/// Rule identifier for the external protocol rule.
pub const ID: &str = "ARCH-EXTERNAL-PROTOCOL";

/// Configuration for external protocol checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalProtocolConfig {
    /// Accepted protocol prefixes, compared case-insensitively.
    pub allowed_prefixes: Vec<String>,
    /// Report relations to externals that declare no protocol.
    pub require_protocol: bool,
}

impl Default for ExternalProtocolConfig {
    fn default() -> Self {
        Self {
            allowed_prefixes: vec!["https://gateway.".into(), "kafka://".into()],
            require_protocol: true,
        }
    }
}

impl ExternalProtocolConfig {
    fn allows(&self, protocol: &str) -> bool {
        if self.allowed_prefixes.is_empty() {
            return true;
        }
        let protocol = protocol.to_lowercase();
        self.allowed_prefixes
            .iter()
            .any(|prefix| protocol.starts_with(&prefix.to_lowercase()))
    }
}

/// Requires relations to externals to use an approved protocol.
#[derive(Debug, Clone, Default)]
pub struct ExternalProtocol;

impl ExternalProtocol {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ExternalProtocol {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires approved protocols on relations to external systems"
    }

    fn check(&self, model: &Architecture, options: &RuleOptions) -> Vec<Finding> {
        let conf: ExternalProtocolConfig = match decode_options(options) {
            Ok(conf) => conf,
            Err(e) => return vec![options_finding(ID, &e)],
        };

        let index = model.container_map();
        let mut findings = Vec::new();
        for rel_ref in model.relations() {
            let rel = rel_ref.relation;
            let is_external = index
                .get(rel.to.as_str())
                .is_some_and(|to| to.container.kind == ContainerType::External);
            if !is_external {
                continue;
            }

            if rel.protocol.trim().is_empty() {
                if conf.require_protocol {
                    findings.push(Finding::new(
                        ID,
                        Severity::Error,
                        rel_ref.path,
                        format!(
                            "relation from {} to external {} must define protocol",
                            rel.from, rel.to
                        ),
                    ));
                }
                continue;
            }

            if !conf.allows(&rel.protocol) {
                findings.push(
                    Finding::new(
                        ID,
                        Severity::Error,
                        format!("{}.protocol", rel_ref.path),
                        format!(
                            "protocol {:?} for external {} is not allowed",
                            rel.protocol, rel.to
                        ),
                    )
                    .with_meta("allowedPrefixes", conf.allowed_prefixes.clone()),
                );
            }
        }
        findings
    }
}
