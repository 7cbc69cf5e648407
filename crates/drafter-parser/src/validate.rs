//! Structural validation of draft graphs.
//!
//! [`validate`] checks every graph invariant and either produces a
//! [`Graph`] or a [`ParseError`] carrying the complete defect list; it
//! never returns a partially valid graph and never stops at the first
//! error.
//!
//! Checks run in a fixed order: duplicate ids first (cheapest, most
//! foundational), then referential integrity (edge endpoints, cluster
//! members, cluster parents, direct membership), then the direction
//! value, and the cluster-forest acyclicity check last.

use indexmap::{IndexMap, IndexSet};

use drafter_core::{
    graph::{Cluster, Direction, Edge, Graph, Node},
    identifier::Id,
};
use log::debug;

use crate::{
    ast::DraftGraph,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Validate a draft graph, producing the immutable semantic graph.
///
/// # Errors
///
/// Returns a [`ParseError`] with one diagnostic per violated invariant.
pub fn validate(draft: &DraftGraph) -> Result<Graph, ParseError> {
    let mut collector = DiagnosticCollector::new();

    // Invariant 1: unique node ids, unique cluster ids, no cross-namespace
    // collision.
    let mut node_spans: IndexMap<Id, Span> = IndexMap::new();
    for node in &draft.nodes {
        let id = *node.id.inner();
        match node_spans.get(&id) {
            Some(first) => collector.emit(
                Diagnostic::error(format!("node `{id}` is declared multiple times"))
                    .with_code(ErrorCode::E200)
                    .with_label(node.id.span(), "duplicate declaration")
                    .with_secondary_label(*first, "first declared here")
                    .with_help("remove the duplicate or use a different id"),
            ),
            None => {
                node_spans.insert(id, node.id.span());
            }
        }
    }

    let mut cluster_spans: IndexMap<Id, Span> = IndexMap::new();
    for cluster in &draft.clusters {
        let id = *cluster.id.inner();
        match cluster_spans.get(&id) {
            Some(first) => collector.emit(
                Diagnostic::error(format!("cluster `{id}` is declared multiple times"))
                    .with_code(ErrorCode::E201)
                    .with_label(cluster.id.span(), "duplicate declaration")
                    .with_secondary_label(*first, "first declared here"),
            ),
            None => {
                cluster_spans.insert(id, cluster.id.span());
                if let Some(node_span) = node_spans.get(&id) {
                    collector.emit(
                        Diagnostic::error(format!(
                            "cluster id `{id}` collides with a node id"
                        ))
                        .with_code(ErrorCode::E202)
                        .with_label(cluster.id.span(), "declared as a cluster here")
                        .with_secondary_label(*node_span, "declared as a node here")
                        .with_help("node and cluster ids must not be identical"),
                    );
                }
            }
        }
    }

    // Invariant 2: edge endpoints resolve to declared nodes.
    for edge in &draft.edges {
        for (endpoint, role) in [(&edge.source, "source"), (&edge.target, "target")] {
            let id = *endpoint.inner();
            if !node_spans.contains_key(&id) {
                collector.emit(
                    Diagnostic::error(format!(
                        "connection {role} `{id}` is not declared in Components"
                    ))
                    .with_code(ErrorCode::E203)
                    .with_label(endpoint.span(), "undeclared node")
                    .with_help(format!("declare `{id}` in the Components section")),
                );
            }
        }
    }

    // Invariant 4: cluster members resolve to declared nodes.
    // Invariant 5: a node is a direct member of at most one cluster.
    let mut memberships: IndexMap<Id, (Id, Span)> = IndexMap::new();
    for cluster in &draft.clusters {
        let cluster_id = *cluster.id.inner();
        for member in &cluster.node_ids {
            let id = *member.inner();
            if !node_spans.contains_key(&id) {
                collector.emit(
                    Diagnostic::error(format!(
                        "cluster `{cluster_id}` lists undeclared node `{id}`"
                    ))
                    .with_code(ErrorCode::E204)
                    .with_label(member.span(), "undeclared node"),
                );
                continue;
            }
            match memberships.get(&id) {
                Some((other, first)) => {
                    let message = if *other == cluster_id {
                        format!("node `{id}` is listed twice in cluster `{cluster_id}`")
                    } else {
                        format!("node `{id}` is a direct member of more than one cluster")
                    };
                    collector.emit(
                        Diagnostic::error(message)
                            .with_code(ErrorCode::E206)
                            .with_label(member.span(), format!("listed again in `{cluster_id}`"))
                            .with_secondary_label(*first, format!("first listed in `{other}`"))
                            .with_help(
                                "a node's placement in the hierarchy must be unambiguous",
                            ),
                    );
                }
                None => {
                    memberships.insert(id, (cluster_id, member.span()));
                }
            }
        }
    }

    // Invariant 3 (reference half): cluster parents resolve to declared
    // clusters.
    for cluster in &draft.clusters {
        if let Some(parent) = &cluster.parent {
            let id = *parent.inner();
            if !cluster_spans.contains_key(&id) {
                collector.emit(
                    Diagnostic::error(format!(
                        "cluster `{}` names undeclared parent `{id}`",
                        cluster.id.inner()
                    ))
                    .with_code(ErrorCode::E205)
                    .with_label(parent.span(), "undeclared cluster"),
                );
            }
        }
    }

    // Invariant 6: direction is one of the enumerated values.
    let direction = match draft.direction.inner().parse::<Direction>() {
        Ok(direction) => direction,
        Err(err) => {
            collector.emit(
                Diagnostic::error(err.to_string())
                    .with_code(ErrorCode::E208)
                    .with_label(draft.direction.span(), "invalid direction"),
            );
            Direction::default()
        }
    };

    // Invariant 3 (forest half): the parent relation is acyclic. Runs
    // last; each walk is bounded by the total cluster count.
    check_cluster_forest(draft, &cluster_spans, &mut collector);

    // Validation emits only errors; the collector keeps the phases uniform.
    collector.finish()?;

    debug!(
        nodes = draft.nodes.len(),
        edges = draft.edges.len(),
        clusters = draft.clusters.len();
        "Draft graph validated"
    );

    Ok(Graph {
        name: draft.name.clone(),
        description: draft.description.clone(),
        direction,
        nodes: draft
            .nodes
            .iter()
            .map(|node| Node {
                id: *node.id.inner(),
                label: node.label.clone(),
                type_tag: node.type_tag.clone(),
                description: node.description.clone(),
            })
            .collect(),
        edges: draft
            .edges
            .iter()
            .map(|edge| Edge {
                source: *edge.source.inner(),
                target: *edge.target.inner(),
                label: edge.label.clone(),
            })
            .collect(),
        clusters: draft
            .clusters
            .iter()
            .map(|cluster| Cluster {
                id: *cluster.id.inner(),
                label: cluster.label.clone(),
                node_ids: cluster.node_ids.iter().map(|m| *m.inner()).collect(),
                parent: cluster.parent.as_ref().map(|p| *p.inner()),
            })
            .collect(),
    })
}

/// Walk each cluster's parent chain looking for cycles.
///
/// Every cluster participating in a cycle is reported once, as part of the
/// cycle that starts at the first declared participant. The diagnostic
/// names the full id sequence of the cycle.
fn check_cluster_forest(
    draft: &DraftGraph,
    cluster_spans: &IndexMap<Id, Span>,
    collector: &mut DiagnosticCollector,
) {
    let parents: IndexMap<Id, Id> = draft
        .clusters
        .iter()
        .filter_map(|cluster| {
            cluster
                .parent
                .as_ref()
                // Dangling parents were already reported as E205.
                .filter(|p| cluster_spans.contains_key(p.inner()))
                .map(|p| (*cluster.id.inner(), *p.inner()))
        })
        .collect();

    let mut reported: IndexSet<Id> = IndexSet::new();
    for cluster in &draft.clusters {
        let start = *cluster.id.inner();
        if reported.contains(&start) {
            continue;
        }

        let mut visited: IndexSet<Id> = IndexSet::new();
        let mut current = start;
        visited.insert(current);
        while let Some(parent) = parents.get(&current) {
            if *parent == start {
                // Closed a cycle back to the walk origin.
                let mut path: Vec<String> =
                    visited.iter().map(|id| format!("`{id}`")).collect();
                path.push(format!("`{start}`"));
                reported.extend(visited.iter().copied());
                collector.emit(
                    Diagnostic::error(format!(
                        "cluster parent relation forms a cycle: {}",
                        path.join(" -> ")
                    ))
                    .with_code(ErrorCode::E207)
                    .with_label(cluster.id.span(), "this cluster is its own ancestor")
                    .with_help("clusters must form a forest; break the parent chain"),
                );
                break;
            }
            if !visited.insert(*parent) {
                // Cycle exists further up the chain; it will be reported
                // from one of its own members.
                break;
            }
            current = *parent;
        }
    }
}
