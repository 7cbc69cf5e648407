//! Deterministic renderer from validated graphs to diagrams-as-code.
//!
//! The renderer walks a validated [`Graph`] and emits Python `diagrams`
//! code. Emission order is canonical: it follows the graph's declaration
//! order for nodes and edges and a parent-before-children traversal for
//! clusters, so identical input always produces byte-identical output.
//! No ordering ever depends on hash map iteration.
//!
//! Unknown node types degrade to the registry's generic fallback
//! construct, each reported as a [`RenderWarning`]; producing an
//! imperfect artifact beats producing none.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexSet;
use log::{debug, warn};

use drafter_core::{
    graph::{Cluster, Counts, Graph, Node},
    identifier::Id,
    registry::{self, Lookup},
};

const INDENT: &str = "    ";
const GRAPH_ATTR: &str = r#"graph_attr = {"splines": "ortho", "nodesep": "0.8", "ranksep": "1.0"}"#;

/// Warning emitted when a node's type tag is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    /// The node whose type was substituted.
    pub node: Id,
    /// The unrecognized tag, as written.
    pub tag: String,
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown node type `{}` on `{}`, using generic construct",
            self.tag, self.node
        )
    }
}

/// Result of a render: the emitted code, the counts it emitted, and any
/// unknown-type warnings.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub code: String,
    pub counts: Counts,
    pub warnings: Vec<RenderWarning>,
}

/// Renders a validated graph to executable Python code.
pub struct Renderer<'a> {
    graph: &'a Graph,
    output_stem: &'a str,
    imports: BTreeMap<&'static str, BTreeSet<&'static str>>,
    warnings: Vec<RenderWarning>,
    emitted_nodes: usize,
    emitted_clusters: usize,
}

impl<'a> Renderer<'a> {
    /// Create a renderer for `graph`.
    ///
    /// `output_stem` becomes the `filename=` argument of the generated
    /// `Diagram` call (the toolchain appends the image extension).
    pub fn new(graph: &'a Graph, output_stem: &'a str) -> Self {
        Self {
            graph,
            output_stem,
            imports: BTreeMap::new(),
            warnings: Vec::new(),
            emitted_nodes: 0,
            emitted_clusters: 0,
        }
    }

    /// Emit the artifact.
    pub fn render(mut self) -> RenderOutput {
        let mut body: Vec<String> = Vec::new();

        // Direct cluster members are emitted inside their cluster scope;
        // everything else at top level, in declaration order.
        let clustered: IndexSet<Id> = self
            .graph
            .clusters
            .iter()
            .flat_map(|cluster| cluster.node_ids.iter().copied())
            .collect();

        for node in &self.graph.nodes {
            if !clustered.contains(&node.id) {
                let line = self.node_line(node, 1);
                body.push(line);
            }
        }

        let roots: Vec<&Cluster> = self.graph.root_clusters().collect();
        for cluster in roots {
            self.cluster_lines(cluster, 1, &mut body);
        }

        self.edge_lines(1, &mut body);

        let code = self.assemble(&body);
        let counts = Counts {
            nodes: self.emitted_nodes,
            edges: self.graph.edges.len(),
            clusters: self.emitted_clusters,
        };

        for warning in &self.warnings {
            warn!(node = warning.node.to_string(), tag = warning.tag; "{warning}");
        }
        debug!(
            nodes = counts.nodes,
            edges = counts.edges,
            clusters = counts.clusters;
            "Artifact rendered"
        );

        RenderOutput {
            code,
            counts,
            warnings: self.warnings,
        }
    }

    /// Resolve a node's rendering class, registering its import.
    ///
    /// Unknown tags substitute the generic fallback and record exactly one
    /// warning for the node.
    fn node_class(&mut self, node: &Node) -> &'static str {
        let construct = match registry::lookup(&node.type_tag) {
            Lookup::Known(kind) => kind.construct(),
            Lookup::Unknown => {
                self.warnings.push(RenderWarning {
                    node: node.id,
                    tag: node.type_tag.clone(),
                });
                registry::fallback()
            }
        };
        self.imports
            .entry(construct.module)
            .or_default()
            .insert(construct.class);
        construct.class
    }

    fn node_line(&mut self, node: &Node, indent: usize) -> String {
        let var = sanitize_var_name(&node.id.resolve());
        let class = self.node_class(node);
        self.emitted_nodes += 1;
        format!(
            "{}{var} = {class}(\"{}\")",
            INDENT.repeat(indent),
            escape(&node.label)
        )
    }

    /// Emit a cluster scope: direct member nodes first (graph declaration
    /// order), then child clusters, `pass` when the scope is empty.
    fn cluster_lines(&mut self, cluster: &Cluster, indent: usize, lines: &mut Vec<String>) {
        let prefix = INDENT.repeat(indent);
        lines.push(format!(
            "{prefix}with Cluster(\"{}\"):",
            escape(&cluster.label)
        ));
        self.emitted_clusters += 1;

        let members: Vec<&Node> = self
            .graph
            .nodes
            .iter()
            .filter(|node| cluster.node_ids.contains(&node.id))
            .collect();
        for node in &members {
            let line = self.node_line(node, indent + 1);
            lines.push(line);
        }

        let children: Vec<&Cluster> = self.graph.child_clusters(cluster.id).collect();
        for child in &children {
            self.cluster_lines(child, indent + 1, lines);
        }

        if members.is_empty() && children.is_empty() {
            lines.push(format!("{prefix}{INDENT}pass"));
        }
    }

    /// Emit all edges, in declaration order, after every node exists.
    fn edge_lines(&mut self, indent: usize, lines: &mut Vec<String>) {
        if self.graph.edges.is_empty() {
            return;
        }
        let prefix = INDENT.repeat(indent);
        lines.push(String::new());
        lines.push(format!("{prefix}# Connections"));
        for edge in &self.graph.edges {
            let src = sanitize_var_name(&edge.source.resolve());
            let tgt = sanitize_var_name(&edge.target.resolve());
            match &edge.label {
                Some(label) => lines.push(format!(
                    "{prefix}{src} >> Edge(label=\"{}\") >> {tgt}",
                    escape(label)
                )),
                None => lines.push(format!("{prefix}{src} >> {tgt}")),
            }
        }
    }

    fn import_lines(&self) -> String {
        let mut lines = vec!["from diagrams import Diagram, Cluster, Edge".to_owned()];
        for (module, classes) in &self.imports {
            let classes: Vec<&str> = classes.iter().copied().collect();
            lines.push(format!("from {module} import {}", classes.join(", ")));
        }
        lines.join("\n")
    }

    fn assemble(&self, body: &[String]) -> String {
        format!(
            "{imports}\n\n{GRAPH_ATTR}\n\nwith Diagram(\"{name}\", show=False, \
             filename=\"{stem}\", direction=\"{direction}\", graph_attr=graph_attr):\n{body}\n",
            imports = self.import_lines(),
            name = escape(&self.graph.name),
            stem = self.output_stem,
            direction = self.graph.direction.as_str(),
            body = body.join("\n"),
        )
    }
}

/// Turn a node id into a valid Python variable name.
fn sanitize_var_name(name: &str) -> String {
    let mut sanitized: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        sanitized = format!("n_{sanitized}");
    }
    if sanitized.is_empty() {
        sanitized = "node".to_owned();
    }
    sanitized
}

/// Escape a string for embedding in a double-quoted Python literal.
fn escape(text: &str) -> String {
    text.replace('"', "\\\"").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use drafter_core::graph::{Direction, Edge as GraphEdge};

    fn node(id: &str, label: &str, tag: &str) -> Node {
        Node {
            id: Id::new(id),
            label: label.to_owned(),
            type_tag: tag.to_owned(),
            description: None,
        }
    }

    fn edge(source: &str, target: &str, label: Option<&str>) -> GraphEdge {
        GraphEdge {
            source: Id::new(source),
            target: Id::new(target),
            label: label.map(str::to_owned),
        }
    }

    fn cluster(id: &str, label: &str, members: &[&str], parent: Option<&str>) -> Cluster {
        Cluster {
            id: Id::new(id),
            label: label.to_owned(),
            node_ids: members.iter().map(|m| Id::new(m)).collect(),
            parent: parent.map(Id::new),
        }
    }

    fn render(graph: &Graph) -> RenderOutput {
        Renderer::new(graph, "diagram").render()
    }

    #[test]
    fn test_minimal_graph_code_shape() {
        let graph = Graph {
            name: "Tiny".to_owned(),
            direction: Direction::LR,
            nodes: vec![node("web", "Web", "nginx")],
            ..Graph::default()
        };
        let output = render(&graph);

        assert!(
            output
                .code
                .starts_with("from diagrams import Diagram, Cluster, Edge\n")
        );
        assert!(
            output
                .code
                .contains("from diagrams.onprem.network import Nginx")
        );
        assert!(output.code.contains(
            "with Diagram(\"Tiny\", show=False, filename=\"diagram\", direction=\"LR\", \
             graph_attr=graph_attr):"
        ));
        assert!(output.code.contains("    web = Nginx(\"Web\")"));
        assert_eq!(output.counts.nodes, 1);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_nodes_declared_before_edges() {
        let graph = Graph {
            name: "Order".to_owned(),
            nodes: vec![node("a", "A", "ec2"), node("b", "B", "ec2")],
            edges: vec![edge("a", "b", Some("calls"))],
            ..Graph::default()
        };
        let output = render(&graph);

        let node_pos = output.code.find("a = EC2").unwrap();
        let edge_pos = output.code.find("a >> Edge").unwrap();
        assert!(node_pos < edge_pos);
        assert!(output.code.contains("a >> Edge(label=\"calls\") >> b"));
    }

    #[test]
    fn test_unlabeled_edge() {
        let graph = Graph {
            name: "Order".to_owned(),
            nodes: vec![node("a", "A", "ec2"), node("b", "B", "ec2")],
            edges: vec![edge("a", "b", None)],
            ..Graph::default()
        };
        assert!(render(&graph).code.contains("    a >> b"));
    }

    #[test]
    fn test_cluster_nesting_parent_before_child() {
        let graph = Graph {
            name: "Nested".to_owned(),
            nodes: vec![node("x", "X", "ec2"), node("y", "Y", "ec2")],
            clusters: vec![
                cluster("outer", "Outer", &["x"], None),
                cluster("inner", "Inner", &["y"], Some("outer")),
            ],
            ..Graph::default()
        };
        let output = render(&graph);

        let outer = output.code.find("with Cluster(\"Outer\"):").unwrap();
        let member = output.code.find("        x = EC2(\"X\")").unwrap();
        let inner = output.code.find("        with Cluster(\"Inner\"):").unwrap();
        let nested = output.code.find("            y = EC2(\"Y\")").unwrap();

        // Direct members come before nested child clusters.
        assert!(outer < member);
        assert!(member < inner);
        assert!(inner < nested);
        assert_eq!(output.counts.clusters, 2);
    }

    #[test]
    fn test_empty_cluster_emits_pass() {
        let graph = Graph {
            name: "Empty".to_owned(),
            clusters: vec![cluster("shell", "Shell", &[], None)],
            ..Graph::default()
        };
        let output = render(&graph);
        assert!(output.code.contains("    with Cluster(\"Shell\"):"));
        assert!(output.code.contains("        pass"));
    }

    #[test]
    fn test_unknown_type_falls_back_with_one_warning() {
        let graph = Graph {
            name: "Odd".to_owned(),
            nodes: vec![node("legacy", "Legacy Box", "mainframe")],
            ..Graph::default()
        };
        let output = render(&graph);

        assert!(output.code.contains("legacy = Server(\"Legacy Box\")"));
        assert!(
            output
                .code
                .contains("from diagrams.onprem.compute import Server")
        );
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].node, Id::new("legacy"));
        assert_eq!(output.warnings[0].tag, "mainframe");
    }

    #[test]
    fn test_imports_sorted_and_grouped() {
        let graph = Graph {
            name: "Imports".to_owned(),
            nodes: vec![
                node("s", "S", "s3"),
                node("l", "L", "lambda"),
                node("e", "E", "ec2"),
            ],
            ..Graph::default()
        };
        let code = render(&graph).code;

        let compute = code.find("from diagrams.aws.compute import EC2, Lambda").unwrap();
        let storage = code.find("from diagrams.aws.storage import S3").unwrap();
        assert!(compute < storage);
    }

    #[test]
    fn test_render_is_deterministic() {
        let graph = Graph {
            name: "Det".to_owned(),
            nodes: vec![
                node("a", "A", "ec2"),
                node("b", "B", "rds"),
                node("c", "C", "s3"),
            ],
            edges: vec![edge("a", "b", None), edge("b", "c", Some("writes"))],
            clusters: vec![
                cluster("g1", "Group 1", &["a"], None),
                cluster("g2", "Group 2", &["b", "c"], Some("g1")),
            ],
            ..Graph::default()
        };

        let first = render(&graph);
        let second = render(&graph);
        assert_eq!(first.code, second.code);
        assert_eq!(first.counts, second.counts);
    }

    #[test]
    fn test_counts_match_emission() {
        let graph = Graph {
            name: "Counts".to_owned(),
            nodes: vec![node("a", "A", "ec2"), node("b", "B", "ec2")],
            edges: vec![edge("a", "b", None), edge("a", "a", None)],
            clusters: vec![cluster("c", "C", &["b"], None)],
            ..Graph::default()
        };
        let output = render(&graph);

        assert_eq!(
            output.counts,
            Counts {
                nodes: 2,
                edges: 2,
                clusters: 1
            }
        );
    }

    #[test]
    fn test_sanitize_var_name() {
        assert_eq!(sanitize_var_name("Web Server"), "web_server");
        assert_eq!(sanitize_var_name("3tier"), "n_3tier");
        assert_eq!(sanitize_var_name("api-v2"), "api_v2");
        assert_eq!(sanitize_var_name(""), "node");
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn prop_sanitized_names_are_usable_variables(name in ".{0,40}") {
                let var = sanitize_var_name(&name);
                prop_assert!(!var.is_empty());
                prop_assert!(!var.chars().next().unwrap().is_ascii_digit());
                prop_assert!(var.chars().all(|c| c.is_alphanumeric() || c == '_'));
            }

            #[test]
            fn prop_escaped_labels_have_no_raw_newlines(label in "(?s).{0,40}") {
                prop_assert!(!escape(&label).contains('\n'));
            }
        }
    }

    #[test]
    fn test_label_escaping() {
        let graph = Graph {
            name: "Quote \"Me\"".to_owned(),
            nodes: vec![node("n", "Line\nBreak", "ec2")],
            ..Graph::default()
        };
        let code = render(&graph).code;

        assert!(code.contains("with Diagram(\"Quote \\\"Me\\\"\""));
        assert!(code.contains("n = EC2(\"Line\\nBreak\")"));
    }
}
