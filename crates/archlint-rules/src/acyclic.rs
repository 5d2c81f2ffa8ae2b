//! Rule to forbid dependency cycles between containers.
//!
//! # Rationale
//!
//! Cyclic dependencies couple deployments and make failures cascade in both
//! directions. Every back-edge found by a depth-first search over the
//! relation graph is reported separately, so two relations closing the same
//! loop produce two findings.
//!
//! # Configuration
//!
//! - `allowedKinds`: Relation kinds treated as edges (default: sync, async, db)
//! - `ignoreContainers`: Container names dropped from the graph entirely

use std::collections::{HashMap, HashSet};

use archlint_core::{
    decode_options, options_finding, Architecture, Finding, RelationKind, Rule, RuleOptions,
    Severity,
};
use serde::Deserialize;

/// Rule identifier for the acyclic rule.
pub const ID: &str = "ARCH-ACYCLIC";

/// Configuration for cycle detection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcyclicConfig {
    /// Relation kinds to consider as edges. Empty considers every kind.
    pub allowed_kinds: Vec<RelationKind>,
    /// Container names to drop, both as source and destination.
    pub ignore_containers: Vec<String>,
}

impl Default for AcyclicConfig {
    fn default() -> Self {
        Self {
            allowed_kinds: vec![RelationKind::Sync, RelationKind::Async, RelationKind::Db],
            ignore_containers: Vec::new(),
        }
    }
}

/// Forbids dependency cycles.
#[derive(Debug, Clone, Default)]
pub struct Acyclic;

impl Acyclic {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Acyclic {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Forbids cyclic dependencies between containers"
    }

    fn check(&self, model: &Architecture, options: &RuleOptions) -> Vec<Finding> {
        let conf: AcyclicConfig = match decode_options(options) {
            Ok(conf) => conf,
            Err(e) => return vec![options_finding(ID, &e)],
        };

        let ignored: HashSet<&str> = conf.ignore_containers.iter().map(String::as_str).collect();
        let graph = Graph::build(model, &conf.allowed_kinds, &ignored);

        let mut finder = CycleFinder::new(&graph, &ignored);
        for &node in &graph.roots {
            if !finder.visited.contains(node) {
                finder.visit(node);
            }
        }
        finder.findings
    }
}

struct Edge<'a> {
    to: &'a str,
    path: String,
}

/// Adjacency list keyed by source name. `roots` holds every source in the
/// order it first appears among the relations.
struct Graph<'a> {
    edges: HashMap<&'a str, Vec<Edge<'a>>>,
    roots: Vec<&'a str>,
}

impl<'a> Graph<'a> {
    fn build(model: &'a Architecture, kinds: &[RelationKind], ignored: &HashSet<&str>) -> Self {
        let mut edges: HashMap<&'a str, Vec<Edge<'a>>> = HashMap::new();
        let mut roots = Vec::new();
        for rel_ref in model.relations() {
            let rel = rel_ref.relation;
            if ignored.contains(rel.from.as_str()) {
                continue;
            }
            if !kinds.is_empty() && !kinds.contains(&rel.kind) {
                continue;
            }
            let out = edges.entry(rel.from.as_str()).or_insert_with(|| {
                roots.push(rel.from.as_str());
                Vec::new()
            });
            out.push(Edge {
                to: rel.to.as_str(),
                path: rel_ref.path,
            });
        }
        Self { edges, roots }
    }
}

/// Depth-first search with an explicit stack. Each frame holds a node and
/// the index of the next outgoing edge to follow.
struct CycleFinder<'g, 'a> {
    graph: &'g Graph<'a>,
    ignored: &'g HashSet<&'g str>,
    visited: HashSet<&'a str>,
    stack: Vec<(&'a str, usize)>,
    stack_index: HashMap<&'a str, usize>,
    findings: Vec<Finding>,
}

impl<'g, 'a> CycleFinder<'g, 'a> {
    fn new(graph: &'g Graph<'a>, ignored: &'g HashSet<&'g str>) -> Self {
        Self {
            graph,
            ignored,
            visited: HashSet::new(),
            stack: Vec::new(),
            stack_index: HashMap::new(),
            findings: Vec::new(),
        }
    }

    fn enter(&mut self, node: &'a str) {
        self.visited.insert(node);
        self.stack_index.insert(node, self.stack.len());
        self.stack.push((node, 0));
    }

    fn visit(&mut self, root: &'a str) {
        let graph = self.graph;
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            let (node, next) = *frame;
            let edges = graph.edges.get(node).map_or(&[][..], Vec::as_slice);
            let Some(edge) = edges.get(next) else {
                self.stack.pop();
                self.stack_index.remove(node);
                continue;
            };
            frame.1 += 1;

            if self.ignored.contains(edge.to) {
                continue;
            }
            if let Some(&start) = self.stack_index.get(edge.to) {
                let mut cycle: Vec<&str> = self.stack[start..].iter().map(|&(n, _)| n).collect();
                cycle.push(edge.to);
                tracing::debug!("Cycle closed at {}: {:?}", edge.path, cycle);
                self.findings.push(
                    Finding::new(
                        ID,
                        Severity::Error,
                        edge.path.clone(),
                        format!("cycle detected: {}", cycle.join(" -> ")),
                    )
                    .with_meta("cycle", cycle),
                );
                continue;
            }
            if !self.visited.contains(edge.to) {
                self.enter(edge.to);
            }
        }
    }
}
