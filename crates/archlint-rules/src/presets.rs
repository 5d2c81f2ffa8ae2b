//! Default rule catalog.

use crate::{Acl, Acyclic, Boundaries, CrudIsolation, DatabaseIsolation, ExternalProtocol};
use archlint_core::{Registry, RuleBox};

/// Returns every built-in rule in catalog order.
///
/// - `ARCH-ACYCLIC` - Forbids dependency cycles
/// - `ARCH-CRUD` - Restricts database access to tagged accessors
/// - `ARCH-ACL` - Requires an ACL in front of externals
/// - `ARCH-BOUNDARIES` - Boundary cohesion versus coupling
/// - `ARCH-EXTERNAL-PROTOCOL` - Approved protocols towards externals
/// - `ARCH-DB-ISOLATION` - Databases stay passive
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(Acyclic::new()),
        Box::new(CrudIsolation::new()),
        Box::new(Acl::new()),
        Box::new(Boundaries::new()),
        Box::new(ExternalProtocol::new()),
        Box::new(DatabaseIsolation::new()),
    ]
}

/// Returns a registry holding [`all_rules`].
#[must_use]
pub fn default_registry() -> Registry {
    all_rules().into_iter().fold(Registry::new(), Registry::rule_box)
}
