//! Structural validation of the architecture model.
//!
//! Runs independently of rule configuration and reports malformed input
//! (bad version, duplicate names, unknown types, dangling references) under
//! its own rule identifier so tooling can tell schema problems apart from
//! architectural violations.

use std::collections::HashMap;

use crate::model::Architecture;
use crate::types::{Finding, Severity};

/// Rule identifier attached to every structural validation finding.
pub const MODEL_RULE_ID: &str = "MODEL-0001";

/// The only schema version this crate understands.
pub const SUPPORTED_VERSION: i64 = 1;

/// Validates the model structure and returns findings in traversal order.
///
/// Never fails: every problem becomes an error-severity finding and
/// validation continues past it.
#[must_use]
pub fn validate(model: &Architecture) -> Vec<Finding> {
    let mut findings = Vec::new();
    let error = |path: String, message: String| {
        Finding::new(MODEL_RULE_ID, Severity::Error, path, message)
    };

    if model.version != SUPPORTED_VERSION {
        findings.push(error(
            "version".into(),
            format!(
                "unsupported version {} (only version {SUPPORTED_VERSION} is supported)",
                model.version
            ),
        ));
    }

    if model.boundaries.is_empty() {
        findings.push(error(
            "boundaries".into(),
            "at least one boundary is required".into(),
        ));
    }

    let containers = model.containers();
    let mut name_index: HashMap<&str, &str> = HashMap::new();
    for container_ref in &containers {
        let c = container_ref.container;
        if c.name.trim().is_empty() {
            findings.push(error(
                format!("{}.name", container_ref.path),
                "container name is required".into(),
            ));
        }
        if name_index.contains_key(c.name.as_str()) {
            findings.push(
                error(
                    format!("{}.name", container_ref.path),
                    format!("duplicate container name {:?}", c.name),
                )
                .with_meta("container", c.name.clone()),
            );
        } else if !c.name.is_empty() {
            name_index.insert(&c.name, &container_ref.path);
        }

        if !c.kind.is_known() {
            findings.push(error(
                format!("{}.type", container_ref.path),
                format!("invalid container type {:?}", c.kind.as_str()),
            ));
        }
    }

    for rel_ref in model.relations() {
        let rel = rel_ref.relation;
        if rel.from.is_empty() || rel.to.is_empty() {
            findings.push(error(
                rel_ref.path,
                "relation must define both from and to".into(),
            ));
            continue;
        }
        for (field, name) in [("from", &rel.from), ("to", &rel.to)] {
            if !name_index.contains_key(name.as_str()) {
                findings.push(error(
                    format!("{}.{field}", rel_ref.path),
                    format!("relation references unknown container {name:?}"),
                ));
            }
        }
        if !rel.kind.is_known() {
            findings.push(error(
                format!("{}.kind", rel_ref.path),
                format!("invalid relation kind {:?}", rel.kind.as_str()),
            ));
        }
    }

    tracing::debug!("Structural validation produced {} finding(s)", findings.len());
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Boundary, Container, ContainerType, Relation, RelationKind};

    fn service(name: &str) -> Container {
        Container {
            name: name.into(),
            kind: ContainerType::Service,
            ..Container::default()
        }
    }

    fn relation(from: &str, to: &str, kind: RelationKind) -> Relation {
        Relation {
            from: from.into(),
            to: to.into(),
            kind,
            ..Relation::default()
        }
    }

    fn single_boundary(containers: Vec<Container>, relations: Vec<Relation>) -> Architecture {
        Architecture {
            version: 1,
            boundaries: vec![Boundary {
                name: "core".into(),
                containers,
                relations,
                ..Boundary::default()
            }],
            ..Architecture::default()
        }
    }

    fn paths(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn valid_model_has_no_findings() {
        let arch = single_boundary(
            vec![service("a"), service("b")],
            vec![relation("a", "b", RelationKind::Sync)],
        );
        assert!(validate(&arch).is_empty());
    }

    #[test]
    fn bad_version_and_dangling_relation() {
        let mut arch = single_boundary(
            vec![service("svc")],
            vec![relation("svc", "unknown", RelationKind::Sync)],
        );
        arch.version = 99;
        let findings = validate(&arch);
        assert_eq!(
            paths(&findings),
            vec!["version", "boundaries[0].relations[0].to"]
        );
        assert!(findings[0].message.contains("unsupported version 99"));
        assert!(findings.iter().all(|f| f.rule_id == MODEL_RULE_ID));
        assert!(findings.iter().all(|f| f.severity == Severity::Error));
    }

    #[test]
    fn missing_boundaries_reported() {
        let arch = Architecture {
            version: 1,
            ..Architecture::default()
        };
        assert_eq!(paths(&validate(&arch)), vec!["boundaries"]);
    }

    #[test]
    fn duplicate_names_reported_after_first() {
        let mut arch = single_boundary(vec![service("a"), service("a")], vec![]);
        arch.externals.push(Container {
            name: "a".into(),
            kind: ContainerType::External,
            ..Container::default()
        });
        let findings = validate(&arch);
        assert_eq!(
            paths(&findings),
            vec!["boundaries[0].containers[1].name", "externals[0].name"]
        );
        assert_eq!(findings[0].meta["container"], "a");
    }

    #[test]
    fn blank_names_and_unknown_types_reported() {
        let arch = single_boundary(
            vec![
                Container::default(),
                Container {
                    name: "q".into(),
                    kind: ContainerType::Other("queue".into()),
                    ..Container::default()
                },
            ],
            vec![],
        );
        let findings = validate(&arch);
        assert_eq!(
            paths(&findings),
            vec![
                "boundaries[0].containers[0].name",
                "boundaries[0].containers[0].type",
                "boundaries[0].containers[1].type",
            ]
        );
        assert_eq!(findings[2].message, r#"invalid container type "queue""#);
    }

    #[test]
    fn relation_without_endpoints_skips_reference_checks() {
        let arch = single_boundary(
            vec![service("a")],
            vec![relation("", "a", RelationKind::Other("bogus".into()))],
        );
        let findings = validate(&arch);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "relation must define both from and to");
    }

    #[test]
    fn unresolved_references_do_not_stop_processing() {
        let arch = single_boundary(
            vec![service("a")],
            vec![
                relation("x", "y", RelationKind::Sync),
                relation("a", "a", RelationKind::Other("rpc".into())),
            ],
        );
        assert_eq!(
            paths(&validate(&arch)),
            vec![
                "boundaries[0].relations[0].from",
                "boundaries[0].relations[0].to",
                "boundaries[0].relations[1].kind",
            ]
        );
    }
}
