//! # archlint
//!
//! Declarative architecture linter.
//!
//! This is the facade crate: it re-exports the core framework and the
//! built-in rules, and wires them together for the common case.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use archlint::{Architecture, EngineOptions};
//!
//! let model = Architecture::from_path("architecture.yaml".as_ref())?;
//! let findings = archlint::check(&model, &EngineOptions::default());
//! archlint::report::write_text(std::io::stdout(), &findings)?;
//! ```
//!
//! ## Selecting and configuring rules
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let options = EngineOptions::new()
//!     .enable(["ARCH-ACL"])
//!     .configure("ARCH-ACL", json!({"allowedTags": ["acl", "edge"]}).as_object().cloned().unwrap_or_default());
//! let findings = archlint::run_all(&model, &options);
//! ```

#![forbid(unsafe_code)]

pub use archlint_core::*;

/// Built-in rules and the default catalog.
pub mod rules {
    pub use archlint_rules::*;
}

/// Runs the selected built-in rules against `model`.
///
/// Structural validation is not included; see [`check`].
#[must_use]
pub fn run_all(model: &Architecture, options: &EngineOptions) -> Vec<Finding> {
    Engine::new(rules::default_registry()).run(model, options)
}

/// Validates `model` and then runs the selected built-in rules.
///
/// Validator findings come first, followed by rule findings in engine
/// order. Rules still run when the model has structural errors; they skip
/// references they cannot resolve.
#[must_use]
pub fn check(model: &Architecture, options: &EngineOptions) -> Vec<Finding> {
    let mut findings = validate(model);
    if !findings.is_empty() {
        tracing::debug!("Model has {} structural findings", findings.len());
    }
    findings.extend(run_all(model, options));
    findings
}
