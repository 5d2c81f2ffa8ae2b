//! # archlint-core
//!
//! Core framework for linting declarative architecture descriptions.
//!
//! This crate provides the foundational types for building architecture
//! rules. It includes:
//!
//! - [`Architecture`] and the rest of the graph model, with YAML loading and
//!   the flattening primitives every rule is built on
//! - [`validate`] for structural (schema-level) checks
//! - [`Rule`] trait and the [`Registry`] catalog
//! - [`Engine`] for running rules and ordering their findings
//! - [`Finding`] and [`Severity`] for representing results
//!
//! ## Example
//!
//! ```ignore
//! use archlint_core::{Architecture, Engine, EngineOptions, Registry};
//!
//! let model = Architecture::from_path("architecture.yaml".as_ref())?;
//! let engine = Engine::new(Registry::new().rule(MyRule));
//!
//! let mut findings = archlint_core::validate(&model);
//! findings.extend(engine.run(&model, &EngineOptions::default()));
//! archlint_core::report::write_text(std::io::stdout(), &findings)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod registry;
mod rule;
mod types;
mod validate;

pub mod model;
pub mod report;

pub use config::{
    decode_options, options_finding, ConfigError, EngineOptions, OptionsError, RuleEntry,
    RuleOptions, RuleSetFile,
};
pub use engine::Engine;
pub use model::{
    Architecture, Boundary, Container, ContainerRef, ContainerType, LoadError, Metadata,
    Relation, RelationKind, RelationRef,
};
pub use registry::Registry;
pub use rule::{Rule, RuleBox};
pub use types::{
    count_by_severity, has_findings_at, sort_findings, Finding, ParseSeverityError, Severity,
};
pub use validate::{validate, MODEL_RULE_ID, SUPPORTED_VERSION};
