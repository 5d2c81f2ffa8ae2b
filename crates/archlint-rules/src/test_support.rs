//! Model builders shared by rule unit tests.

use archlint_core::{
    Architecture, Boundary, Container, ContainerType, Relation, RelationKind, RuleOptions,
};
use serde_json::Value;

pub fn container(name: &str, kind: ContainerType, tags: &[&str]) -> Container {
    Container {
        name: name.into(),
        kind,
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        ..Container::default()
    }
}

pub fn service(name: &str) -> Container {
    container(name, ContainerType::Service, &[])
}

pub fn tagged(name: &str, tags: &[&str]) -> Container {
    container(name, ContainerType::Service, tags)
}

pub fn database(name: &str) -> Container {
    container(name, ContainerType::Database, &[])
}

pub fn external(name: &str) -> Container {
    container(name, ContainerType::External, &[])
}

pub fn relation(from: &str, to: &str, kind: RelationKind) -> Relation {
    Relation {
        from: from.into(),
        to: to.into(),
        kind,
        ..Relation::default()
    }
}

pub fn with_protocol(mut rel: Relation, protocol: &str) -> Relation {
    rel.protocol = protocol.into();
    rel
}

pub fn boundary(name: &str, containers: Vec<Container>, relations: Vec<Relation>) -> Boundary {
    Boundary {
        name: name.into(),
        containers,
        relations,
        ..Boundary::default()
    }
}

/// A single-boundary architecture.
pub fn arch(containers: Vec<Container>, relations: Vec<Relation>) -> Architecture {
    Architecture {
        version: 1,
        boundaries: vec![boundary("core", containers, relations)],
        ..Architecture::default()
    }
}

pub fn bag(value: Value) -> RuleOptions {
    match value {
        Value::Object(map) => map,
        other => panic!("options must be an object, got {other}"),
    }
}
