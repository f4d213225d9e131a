//! Scope-graph export for diagnostics.
//!
//! [`NetworkGraph`] is a plain node/edge list built by
//! [`ContractorNetwork::graph`](crate::ContractorNetwork::graph). It has no
//! effect on propagation. [`NetworkGraph::to_dot`] renders it as Graphviz
//! text; writing the text anywhere is left to the caller.

use std::fmt;

use indexmap::IndexMap;
use tubenet_contractor::Flavor;
use tubenet_core::{ContractorId, DomainId, DomainKind};

/// Graphviz layout engine hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GraphLayout {
    /// Hierarchical layout.
    Dot,
    /// Force-directed placement.
    #[default]
    Fdp,
    /// Spring model.
    Neato,
    /// Circular layout.
    Circo,
}

impl GraphLayout {
    /// Graphviz engine name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Fdp => "fdp",
            Self::Neato => "neato",
            Self::Circo => "circo",
        }
    }
}

impl fmt::Display for GraphLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a graph node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A domain of the given kind.
    Domain(DomainId, DomainKind),
    /// A contractor registration of the given flavor.
    Contractor(ContractorId, Flavor),
}

impl NodeKind {
    /// Graphviz node identifier, unique within a network.
    pub fn key(&self) -> String {
        match self {
            Self::Domain(id, _) => id.to_string(),
            Self::Contractor(id, _) => id.to_string(),
        }
    }

    fn group(&self) -> &'static str {
        match self {
            Self::Domain(_, kind) => kind.label(),
            Self::Contractor(_, Flavor::Static) => "static",
            Self::Contractor(_, Flavor::Dynamic(_)) => "dynamic",
        }
    }
}

/// A domain or contractor with its diagnostic label.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    /// What the node stands for.
    pub kind: NodeKind,
    /// Display label: the assigned name, or a default derived from the ID.
    pub label: String,
}

/// A scope edge: `domain` is at `position` in the scope of `contractor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    /// The contractor.
    pub contractor: ContractorId,
    /// The domain.
    pub domain: DomainId,
    /// Position of the domain in the contractor's scope.
    pub position: usize,
}

/// Node/edge snapshot of a network's scope graph.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkGraph {
    /// Layout hint used by [`to_dot`](Self::to_dot).
    pub layout: GraphLayout,
    /// Domains first, then contractors, each in creation order.
    pub nodes: Vec<GraphNode>,
    /// One edge per scope position.
    pub edges: Vec<GraphEdge>,
}

impl NetworkGraph {
    /// Nodes grouped by domain kind or contractor flavor, groups in order
    /// of first appearance.
    pub fn groups(&self) -> IndexMap<&'static str, Vec<&GraphNode>> {
        let mut groups: IndexMap<&'static str, Vec<&GraphNode>> = IndexMap::new();
        for node in &self.nodes {
            groups.entry(node.kind.group()).or_default().push(node);
        }
        groups
    }

    /// Render as an undirected Graphviz graph named `name`.
    ///
    /// Domains are drawn as boxes, contractors as ellipses; each group
    /// from [`groups`](Self::groups) becomes a cluster.
    pub fn to_dot(&self, name: &str) -> String {
        self.dot(name).to_string()
    }

    /// A [`Display`](fmt::Display) adapter producing the same text as
    /// [`to_dot`](Self::to_dot), for writing straight into a formatter.
    pub fn dot<'a>(&'a self, name: &'a str) -> Dot<'a> {
        Dot { graph: self, name }
    }
}

/// Graphviz rendering of a [`NetworkGraph`], returned by
/// [`NetworkGraph::dot`].
#[derive(Clone, Copy, Debug)]
pub struct Dot<'a> {
    graph: &'a NetworkGraph,
    name: &'a str,
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "graph {} {{", quote(self.name))?;
        writeln!(out, "  layout={};", self.graph.layout)?;
        writeln!(out, "  overlap=false;")?;
        for (i, (group, nodes)) in self.graph.groups().iter().enumerate() {
            writeln!(out, "  subgraph cluster_{i} {{")?;
            writeln!(out, "    label={};", quote(group))?;
            for node in nodes {
                let shape = match node.kind {
                    NodeKind::Domain(..) => "box",
                    NodeKind::Contractor(..) => "ellipse",
                };
                writeln!(
                    out,
                    "    {} [label={}, shape={shape}];",
                    node.kind.key(),
                    quote(&node.label)
                )?;
            }
            writeln!(out, "  }}")?;
        }
        for e in &self.graph.edges {
            writeln!(
                out,
                "  {} -- {} [label=\"{}\"];",
                e.contractor, e.domain, e.position
            )?;
        }
        writeln!(out, "}}")
    }
}

fn quote(s: &str) -> String {
    let mut q = String::with_capacity(s.len() + 2);
    q.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                q.push('\\');
                q.push(c);
            }
            '\n' => q.push_str("\\n"),
            c => q.push(c),
        }
    }
    q.push('"');
    q
}
