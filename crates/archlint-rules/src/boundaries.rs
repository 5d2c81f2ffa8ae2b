//! Rule to measure boundary cohesion against coupling.
//!
//! # Rationale
//!
//! A boundary whose containers talk more to the outside than to each other
//! is probably drawn in the wrong place. Each boundary owns its own
//! containers plus those of every nested boundary; a relation out of one of
//! them is internal when its destination is owned too, and cross otherwise.
//! Boundaries without cross relations are never reported.
//!
//! # Configuration
//!
//! - `minInternalToCrossRatio`: Minimum internal/cross ratio (default: 1.0)
//! - `maxCrossRelations`: Maximum cross relations per boundary; zero or
//!   negative disables the check (default: 0)

use std::collections::{HashMap, HashSet};

use archlint_core::{
    decode_options, options_finding, Architecture, Boundary, Finding, RelationRef, Rule,
    RuleOptions, Severity,
};
use serde::Deserialize;

/// Rule identifier for the boundaries rule.
pub const ID: &str = "ARCH-BOUNDARIES";

/// Configuration for boundary cohesion.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundariesConfig {
    /// Minimum acceptable internal/cross ratio.
    pub min_internal_to_cross_ratio: f64,
    /// Maximum cross relations; only enforced when positive.
    pub max_cross_relations: i64,
}

impl Default for BoundariesConfig {
    fn default() -> Self {
        Self {
            min_internal_to_cross_ratio: 1.0,
            max_cross_relations: 0,
        }
    }
}

/// Warns about weakly cohesive or overly coupled boundaries.
#[derive(Debug, Clone, Default)]
pub struct Boundaries;

impl Boundaries {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Boundaries {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Warns when a boundary is more coupled than cohesive"
    }

    fn check(&self, model: &Architecture, options: &RuleOptions) -> Vec<Finding> {
        let conf: BoundariesConfig = match decode_options(options) {
            Ok(conf) => conf,
            Err(e) => return vec![options_finding(ID, &e)],
        };

        let outgoing = model.outgoing();
        let mut metrics = Vec::new();
        for (i, boundary) in model.boundaries.iter().enumerate() {
            collect_metrics(&mut metrics, boundary, format!("boundaries[{i}]"), &outgoing);
        }

        let mut findings = Vec::new();
        for metric in metrics {
            if metric.cross == 0 {
                continue;
            }
            tracing::trace!(
                "Boundary {} internal={} cross={}",
                metric.path,
                metric.internal,
                metric.cross
            );
            let ratio = metric.ratio();

            if ratio < conf.min_internal_to_cross_ratio {
                findings.push(
                    Finding::new(
                        ID,
                        Severity::Warn,
                        metric.path.clone(),
                        format!(
                            "boundary {} cohesion/coupling ratio {:.2} below minimum {:.2}",
                            metric.name, ratio, conf.min_internal_to_cross_ratio
                        ),
                    )
                    .with_meta("internal", metric.internal)
                    .with_meta("cross", metric.cross)
                    .with_meta("ratio", ratio),
                );
            }

            if conf.max_cross_relations > 0
                && i64::try_from(metric.cross).map_or(true, |c| c > conf.max_cross_relations)
            {
                findings.push(
                    Finding::new(
                        ID,
                        Severity::Warn,
                        metric.path.clone(),
                        format!(
                            "boundary {} has {} cross-boundary relations (max {})",
                            metric.name, metric.cross, conf.max_cross_relations
                        ),
                    )
                    .with_meta("internal", metric.internal)
                    .with_meta("cross", metric.cross),
                );
            }
        }
        findings
    }
}

struct BoundaryMetric<'a> {
    name: &'a str,
    path: String,
    internal: u64,
    cross: u64,
}

impl BoundaryMetric<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn ratio(&self) -> f64 {
        if self.cross == 0 {
            return 0.0;
        }
        self.internal as f64 / self.cross as f64
    }
}

/// Pushes the metric for `boundary` followed by those of its descendants,
/// returning the names owned by `boundary` and its descendants.
fn collect_metrics<'a>(
    dst: &mut Vec<BoundaryMetric<'a>>,
    boundary: &'a Boundary,
    path: String,
    outgoing: &HashMap<&str, Vec<RelationRef<'_>>>,
) -> HashSet<&'a str> {
    let slot = dst.len();
    dst.push(BoundaryMetric {
        name: &boundary.name,
        path: path.clone(),
        internal: 0,
        cross: 0,
    });

    let mut owned: HashSet<&'a str> = boundary
        .containers
        .iter()
        .map(|c| c.name.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    for (i, nested) in boundary.boundaries.iter().enumerate() {
        owned.extend(collect_metrics(
            dst,
            nested,
            format!("{path}.boundaries[{i}]"),
            outgoing,
        ));
    }

    let (mut internal, mut cross) = (0, 0);
    for name in &owned {
        for rel_ref in outgoing.get(*name).into_iter().flatten() {
            if owned.contains(rel_ref.relation.to.as_str()) {
                internal += 1;
            } else {
                cross += 1;
            }
        }
    }
    dst[slot].internal = internal;
    dst[slot].cross = cross;
    owned
}
