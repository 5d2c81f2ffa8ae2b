//! # archlint-rules
//!
//! Built-in architecture rules for archlint.
//!
//! ## Available Rules
//!
//! | ID | Severity | Description |
//! |----|----------|-------------|
//! | `ARCH-ACYCLIC` | error | Forbids dependency cycles between containers |
//! | `ARCH-CRUD` | error | Restricts database access to tagged accessors over `db` relations |
//! | `ARCH-ACL` | error | Requires callers of external systems to carry an ACL tag |
//! | `ARCH-BOUNDARIES` | warn | Compares boundary cohesion against coupling |
//! | `ARCH-EXTERNAL-PROTOCOL` | error | Requires approved protocols towards externals |
//! | `ARCH-DB-ISOLATION` | error, warn | Forbids databases from initiating relations |
//!
//! ## Usage
//!
//! ```ignore
//! use archlint_core::{Engine, EngineOptions};
//! use archlint_rules::default_registry;
//!
//! let engine = Engine::new(default_registry());
//! let findings = engine.run(&model, &EngineOptions::default());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod acl;
mod acyclic;
mod boundaries;
mod crud;
mod database_isolation;
mod external_protocol;
mod presets;

#[cfg(test)]
mod test_support;

pub use acl::{Acl, AclConfig};
pub use acyclic::{Acyclic, AcyclicConfig};
pub use boundaries::{Boundaries, BoundariesConfig};
pub use crud::{CrudConfig, CrudIsolation};
pub use database_isolation::{DatabaseIsolation, DatabaseIsolationConfig};
pub use external_protocol::{ExternalProtocol, ExternalProtocolConfig};
pub use presets::{all_rules, default_registry};

/// Re-export core types for convenience.
pub use archlint_core::{Finding, Rule, Severity};
