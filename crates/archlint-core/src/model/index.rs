//! Flattening and indexing over the boundary tree.
//!
//! Every rule is written against these primitives instead of walking the raw
//! tree. Refs borrow from the [`Architecture`] they were derived from and are
//! rebuilt on every call.

use std::collections::HashMap;

use super::{Architecture, Boundary, Container, Relation};

/// A container together with its position in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRef<'a> {
    /// The container itself.
    pub container: &'a Container,
    /// Index path, e.g. `boundaries[0].boundaries[1].containers[2]`.
    pub path: String,
    /// Immediately enclosing boundary and its path; `None` for top-level externals.
    pub boundary: Option<(&'a Boundary, String)>,
}

/// A relation together with its position in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRef<'a> {
    /// The relation itself.
    pub relation: &'a Relation,
    /// Index path, e.g. `boundaries[0].relations[3]`.
    pub path: String,
    /// Boundary that declares the relation.
    pub boundary: &'a Boundary,
    /// Path of the declaring boundary.
    pub boundary_path: String,
}

impl Architecture {
    /// Returns every container in deterministic pre-order.
    ///
    /// Boundaries are visited in declaration order, depth-first into nested
    /// boundaries (a boundary's own containers before its children's), and
    /// top-level externals come last.
    #[must_use]
    pub fn containers(&self) -> Vec<ContainerRef<'_>> {
        let mut refs = Vec::new();
        for (i, boundary) in self.boundaries.iter().enumerate() {
            gather_containers(&mut refs, boundary, format!("boundaries[{i}]"));
        }
        for (i, container) in self.externals.iter().enumerate() {
            refs.push(ContainerRef {
                container,
                path: format!("externals[{i}]"),
                boundary: None,
            });
        }
        refs
    }

    /// Indexes containers by name.
    ///
    /// Containers with an empty name are skipped. When a name is declared more
    /// than once the entry that comes later in [`Architecture::containers`]
    /// order wins; run the structural validator to detect duplicates.
    #[must_use]
    pub fn container_map(&self) -> HashMap<&str, ContainerRef<'_>> {
        self.containers()
            .into_iter()
            .filter(|r| !r.container.name.is_empty())
            .map(|r| {
                let container = r.container;
                (container.name.as_str(), r)
            })
            .collect()
    }

    /// Returns every relation in deterministic pre-order.
    ///
    /// Relations declared at a boundary are listed before those of its
    /// nested boundaries.
    #[must_use]
    pub fn relations(&self) -> Vec<RelationRef<'_>> {
        let mut refs = Vec::new();
        for (i, boundary) in self.boundaries.iter().enumerate() {
            gather_relations(&mut refs, boundary, format!("boundaries[{i}]"));
        }
        refs
    }

    /// Returns relations grouped by source container name, each group in
    /// [`Architecture::relations`] order.
    #[must_use]
    pub fn outgoing(&self) -> HashMap<&str, Vec<RelationRef<'_>>> {
        let mut index: HashMap<&str, Vec<RelationRef<'_>>> = HashMap::new();
        for rel in self.relations() {
            let relation = rel.relation;
            index.entry(relation.from.as_str()).or_default().push(rel);
        }
        index
    }
}

fn gather_containers<'a>(dst: &mut Vec<ContainerRef<'a>>, b: &'a Boundary, path: String) {
    for (i, container) in b.containers.iter().enumerate() {
        dst.push(ContainerRef {
            container,
            path: format!("{path}.containers[{i}]"),
            boundary: Some((b, path.clone())),
        });
    }
    for (i, nested) in b.boundaries.iter().enumerate() {
        gather_containers(dst, nested, format!("{path}.boundaries[{i}]"));
    }
}

fn gather_relations<'a>(dst: &mut Vec<RelationRef<'a>>, b: &'a Boundary, path: String) {
    for (i, relation) in b.relations.iter().enumerate() {
        dst.push(RelationRef {
            relation,
            path: format!("{path}.relations[{i}]"),
            boundary: b,
            boundary_path: path.clone(),
        });
    }
    for (i, nested) in b.boundaries.iter().enumerate() {
        gather_relations(dst, nested, format!("{path}.boundaries[{i}]"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContainerType, RelationKind};
    use std::collections::HashSet;

    fn container(name: &str, kind: ContainerType) -> Container {
        Container {
            name: name.to_string(),
            kind,
            ..Container::default()
        }
    }

    fn relation(from: &str, to: &str) -> Relation {
        Relation {
            from: from.to_string(),
            to: to.to_string(),
            kind: RelationKind::Sync,
            ..Relation::default()
        }
    }

    fn nested_architecture() -> Architecture {
        Architecture {
            version: 1,
            boundaries: vec![
                Boundary {
                    name: "outer".into(),
                    containers: vec![container("a", ContainerType::Service)],
                    boundaries: vec![
                        Boundary {
                            name: "inner-1".into(),
                            containers: vec![container("b", ContainerType::Service)],
                            relations: vec![relation("b", "a")],
                            ..Boundary::default()
                        },
                        Boundary {
                            name: "inner-2".into(),
                            containers: vec![
                                container("c", ContainerType::Service),
                                container("db", ContainerType::Database),
                            ],
                            relations: vec![relation("c", "db")],
                            ..Boundary::default()
                        },
                    ],
                    relations: vec![relation("a", "b")],
                    ..Boundary::default()
                },
                Boundary {
                    name: "second".into(),
                    containers: vec![container("d", ContainerType::Service)],
                    relations: vec![relation("d", "ext")],
                    ..Boundary::default()
                },
            ],
            externals: vec![container("ext", ContainerType::External)],
            ..Architecture::default()
        }
    }

    #[test]
    fn containers_are_pre_order_with_externals_last() {
        let arch = nested_architecture();
        let paths: Vec<_> = arch.containers().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "boundaries[0].containers[0]",
                "boundaries[0].boundaries[0].containers[0]",
                "boundaries[0].boundaries[1].containers[0]",
                "boundaries[0].boundaries[1].containers[1]",
                "boundaries[1].containers[0]",
                "externals[0]",
            ]
        );
    }

    #[test]
    fn containers_carry_enclosing_boundary() {
        let arch = nested_architecture();
        let refs = arch.containers();
        let (boundary, path) = refs[2].boundary.as_ref().unwrap();
        assert_eq!(boundary.name, "inner-2");
        assert_eq!(path, "boundaries[0].boundaries[1]");
        assert!(refs[5].boundary.is_none());
    }

    #[test]
    fn relations_list_own_before_nested() {
        let arch = nested_architecture();
        let paths: Vec<_> = arch.relations().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "boundaries[0].relations[0]",
                "boundaries[0].boundaries[0].relations[0]",
                "boundaries[0].boundaries[1].relations[0]",
                "boundaries[1].relations[0]",
            ]
        );
    }

    #[test]
    fn flattening_is_exhaustive_and_paths_unique() {
        let arch = nested_architecture();
        let containers = arch.containers();
        assert_eq!(containers.len(), 6);
        let unique: HashSet<_> = containers.iter().map(|r| r.path.clone()).collect();
        assert_eq!(unique.len(), containers.len());
        assert_eq!(arch.relations().len(), 4);
        assert_eq!(arch.containers(), containers);
    }

    #[test]
    fn container_map_last_write_wins() {
        let mut arch = nested_architecture();
        arch.boundaries[1]
            .containers
            .push(container("a", ContainerType::Database));
        let map = arch.container_map();
        assert_eq!(map["a"].path, "boundaries[1].containers[1]");
        assert_eq!(map["a"].container.kind, ContainerType::Database);
    }

    #[test]
    fn container_map_skips_empty_names() {
        let mut arch = nested_architecture();
        arch.externals.push(container("", ContainerType::External));
        assert!(!arch.container_map().contains_key(""));
    }

    #[test]
    fn outgoing_groups_by_source() {
        let arch = nested_architecture();
        let outgoing = arch.outgoing();
        assert_eq!(outgoing["a"].len(), 1);
        assert_eq!(outgoing["d"][0].relation.to, "ext");
        assert!(!outgoing.contains_key("ext"));
    }
}
