//! Validated graph model for architecture diagrams.
//!
//! These types form the hand-off contract between the parsing pipeline and
//! downstream consumers (the renderer, and external generation/refinement
//! collaborators that exchange the graph in serialized form). A [`Graph`]
//! is only ever constructed by validation; nothing mutates it afterwards.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::Id;

/// Rendering direction of a diagram.
///
/// Matches the rank direction accepted by the target toolchain. The parser
/// defaults to [`Direction::TB`] when the input does not declare one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top to bottom (default).
    #[default]
    TB,
    /// Bottom to top.
    BT,
    /// Left to right.
    LR,
    /// Right to left.
    RL,
}

/// Error returned when parsing an unrecognized direction string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid direction `{0}`, expected one of TB, BT, LR, RL")]
pub struct InvalidDirection(pub String);

impl Direction {
    /// Returns the direction as its canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TB => "TB",
            Direction::BT => "BT",
            Direction::LR => "LR",
            Direction::RL => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Direction::TB),
            "BT" => Ok(Direction::BT),
            "LR" => Ok(Direction::LR),
            "RL" => Ok(Direction::RL),
            _ => Err(InvalidDirection(s.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the diagram.
///
/// The `type_tag` is kept as written in the source; resolution against the
/// [type registry](crate::registry) happens at render time so that an
/// unrecognized tag degrades to the generic construct instead of failing
/// the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier across the whole graph.
    pub id: Id,
    /// Display label.
    pub label: String,
    /// Type tag resolved against the type registry.
    pub type_tag: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A directed connection between two nodes.
///
/// Multiple edges between the same ordered pair are permitted, as are
/// self-loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id.
    pub source: Id,
    /// Target node id.
    pub target: Id,
    /// Optional edge label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A grouping of nodes, optionally nested under a parent cluster.
///
/// Clusters form a forest: the parent relation is acyclic and a cluster is
/// never its own ancestor. `node_ids` lists direct members only; a node in
/// a child cluster is transitively contained in every ancestor cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Unique identifier among clusters (must not collide with node ids).
    pub id: Id,
    /// Display label.
    pub label: String,
    /// Direct member node ids; may be empty for a pure grouping container.
    #[serde(default)]
    pub node_ids: Vec<Id>,
    /// Parent cluster id, if nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Id>,
}

/// A validated diagram graph.
///
/// All sequences preserve declaration order from the source; the renderer
/// relies on this for deterministic emission. Instances satisfy the full
/// invariant set checked by the validator: unique ids, closed references,
/// and an acyclic cluster forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Diagram title.
    pub name: String,
    /// Optional free-text description (ignored by rendering).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendering direction.
    #[serde(default)]
    pub direction: Direction,
    /// Nodes in declaration order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges in declaration order.
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Clusters in declaration order.
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

impl Graph {
    /// Looks up a node by id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Looks up a cluster by id.
    pub fn cluster(&self, id: Id) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id == id)
    }

    /// Returns the clusters that have no parent, in declaration order.
    pub fn root_clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|cluster| cluster.parent.is_none())
    }

    /// Returns the child clusters of `parent`, in declaration order.
    pub fn child_clusters(&self, parent: Id) -> impl Iterator<Item = &Cluster> {
        self.clusters
            .iter()
            .filter(move |cluster| cluster.parent == Some(parent))
    }
}

/// Entity counts of a rendered artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub nodes: usize,
    pub edges: usize,
    pub clusters: usize,
}

/// Ground-truth counts declared in an `Expected Results` section.
///
/// Axes are independent; an absent axis means the input declared no
/// expectation for it and reconciliation skips it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedCounts {
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub clusters: Option<usize>,
}

impl ExpectedCounts {
    /// Returns `true` when no axis carries an expectation.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_none() && self.edges.is_none() && self.clusters.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        Graph {
            name: "Web Stack".to_owned(),
            description: None,
            direction: Direction::LR,
            nodes: vec![
                Node {
                    id: Id::new("web"),
                    label: "Web Server".to_owned(),
                    type_tag: "nginx".to_owned(),
                    description: None,
                },
                Node {
                    id: Id::new("db"),
                    label: "Database".to_owned(),
                    type_tag: "postgresql".to_owned(),
                    description: Some("primary".to_owned()),
                },
            ],
            edges: vec![Edge {
                source: Id::new("web"),
                target: Id::new("db"),
                label: Some("queries".to_owned()),
            }],
            clusters: vec![
                Cluster {
                    id: Id::new("backend"),
                    label: "Backend".to_owned(),
                    node_ids: vec![Id::new("db")],
                    parent: None,
                },
                Cluster {
                    id: Id::new("storage"),
                    label: "Storage".to_owned(),
                    node_ids: vec![],
                    parent: Some(Id::new("backend")),
                },
            ],
        }
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("TB".parse::<Direction>().unwrap(), Direction::TB);
        assert_eq!("lr".parse::<Direction>().unwrap(), Direction::LR);
        assert_eq!(" bt ".parse::<Direction>().unwrap(), Direction::BT);
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_default() {
        assert_eq!(Direction::default(), Direction::TB);
    }

    #[test]
    fn test_graph_lookup() {
        let graph = sample_graph();
        assert!(graph.node(Id::new("web")).is_some());
        assert!(graph.node(Id::new("missing")).is_none());
        assert!(graph.cluster(Id::new("backend")).is_some());
    }

    #[test]
    fn test_cluster_hierarchy_accessors() {
        let graph = sample_graph();
        let roots: Vec<_> = graph.root_clusters().collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, Id::new("backend"));

        let children: Vec<_> = graph.child_clusters(Id::new("backend")).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, Id::new("storage"));
    }

    #[test]
    fn test_graph_serde_round_trip() {
        let graph = sample_graph();
        let json = serde_json::to_string(&graph).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_interchange_shape() {
        let graph = sample_graph();
        let value: serde_json::Value = serde_json::to_value(&graph).unwrap();

        assert_eq!(value["name"], "Web Stack");
        assert_eq!(value["direction"], "LR");
        assert_eq!(value["nodes"][0]["id"], "web");
        assert_eq!(value["edges"][0]["source"], "web");
        assert_eq!(value["clusters"][1]["parent"], "backend");
    }
}
