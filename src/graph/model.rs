use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::foundation::error::{GraphreelError, GraphreelResult};

/// Node identity.
pub type NodeId = String;

/// Dynamic attribute map attached to a graph, node or edge.
pub type Attrs = serde_json::Map<String, Value>;

/// A caller-owned graph annotated with visual attributes.
///
/// Nodes and edges keep insertion order; rendering iterates them in that order. In undirected
/// graphs `(n, m)` and `(m, n)` name the same edge, stored under the orientation it was first
/// added with.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct Graph {
    directed: bool,
    attrs: Attrs,
    nodes: IndexMap<NodeId, Attrs>,
    edges: IndexMap<(NodeId, NodeId), Attrs>,
}

impl Graph {
    /// Empty undirected graph.
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Empty directed graph.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Parse a node-link JSON document.
    pub fn from_json_str(s: &str) -> GraphreelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a node-link JSON file.
    pub fn from_path(path: &Path) -> GraphreelResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            GraphreelError::Other(anyhow::Error::new(e).context(format!(
                "read graph '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Whether edges are ordered pairs.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Graph-level attributes (canvas size and padding).
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Mutable graph-level attributes.
    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// Set a graph-level attribute.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Add `n` if missing and return its attributes.
    pub fn add_node(&mut self, n: impl Into<NodeId>) -> &mut Attrs {
        self.nodes.entry(n.into()).or_default()
    }

    /// Set one attribute on `n`, adding the node if missing.
    pub fn set_node_attr(
        &mut self,
        n: impl Into<NodeId>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.add_node(n).insert(key.into(), value.into());
    }

    /// Whether `n` is a node of this graph.
    pub fn has_node(&self, n: &str) -> bool {
        self.nodes.contains_key(n)
    }

    /// Attributes of `n`.
    pub fn node(&self, n: &str) -> Option<&Attrs> {
        self.nodes.get(n)
    }

    /// Mutable attributes of `n`.
    pub fn node_mut(&mut self, n: &str) -> Option<&mut Attrs> {
        self.nodes.get_mut(n)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &Attrs)> {
        self.nodes.iter()
    }

    /// Node identities in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Number of nodes.
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Add edge `(n, m)` (and any missing endpoint) and return its attributes.
    pub fn add_edge(&mut self, n: impl Into<NodeId>, m: impl Into<NodeId>) -> &mut Attrs {
        let n = n.into();
        let m = m.into();
        self.nodes.entry(n.clone()).or_default();
        self.nodes.entry(m.clone()).or_default();

        let key = match self.stored_key(&n, &m) {
            Some(index) => index,
            None => self.edges.insert_full((n, m), Attrs::new()).0,
        };
        &mut self.edges[key]
    }

    /// Set one attribute on edge `(n, m)`, adding the edge if missing.
    pub fn set_edge_attr(
        &mut self,
        n: impl Into<NodeId>,
        m: impl Into<NodeId>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.add_edge(n, m).insert(key.into(), value.into());
    }

    /// Whether `(n, m)` is an edge. Orientation only matters for directed graphs.
    pub fn has_edge(&self, n: &str, m: &str) -> bool {
        self.stored_key(n, m).is_some()
    }

    /// Attributes of edge `(n, m)`.
    pub fn edge(&self, n: &str, m: &str) -> Option<&Attrs> {
        self.stored_key(n, m).map(|i| &self.edges[i])
    }

    /// Mutable attributes of edge `(n, m)`.
    pub fn edge_mut(&mut self, n: &str, m: &str) -> Option<&mut Attrs> {
        self.stored_key(n, m).map(|i| &mut self.edges[i])
    }

    /// Edges in insertion order, with their stored orientation.
    pub fn edges(&self) -> impl Iterator<Item = ((&NodeId, &NodeId), &Attrs)> {
        self.edges.iter().map(|((n, m), attrs)| ((n, m), attrs))
    }

    /// Number of edges.
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    fn stored_key(&self, n: &str, m: &str) -> Option<usize> {
        let key = (n.to_string(), m.to_string());
        if let Some(index) = self.edges.get_index_of(&key) {
            return Some(index);
        }
        if self.directed {
            return None;
        }
        self.edges.get_index_of(&(key.1, key.0))
    }

    /// Structural union of `graphs` in order.
    ///
    /// Nodes and edges keep the order in which they are first seen; attribute maps are merged so
    /// that later graphs override earlier values key by key.
    pub fn compose_all(graphs: &[Graph]) -> GraphreelResult<Graph> {
        let Some(first) = graphs.first() else {
            return Err(GraphreelError::structural(
                "cannot compose an empty list of graphs",
            ));
        };
        if graphs.iter().any(|g| g.directed != first.directed) {
            return Err(GraphreelError::structural(
                "cannot compose directed and undirected graphs",
            ));
        }

        let mut out = Graph {
            directed: first.directed,
            ..Graph::default()
        };
        for g in graphs {
            merge_attrs(&mut out.attrs, &g.attrs);
            for (n, attrs) in g.nodes() {
                merge_attrs(out.add_node(n.clone()), attrs);
            }
            for ((n, m), attrs) in g.edges() {
                merge_attrs(out.add_edge(n.clone(), m.clone()), attrs);
            }
        }
        Ok(out)
    }
}

/// `dst.update(src)`: insert or overwrite every key of `src`.
pub(crate) fn merge_attrs(dst: &mut Attrs, src: &Attrs) {
    for (k, v) in src {
        dst.insert(k.clone(), v.clone());
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct GraphRepr {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    graph: Attrs,
    #[serde(default)]
    nodes: Vec<NodeRepr>,
    #[serde(default)]
    edges: Vec<EdgeRepr>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct NodeRepr {
    #[serde(deserialize_with = "node_id")]
    id: NodeId,
    #[serde(flatten)]
    attrs: Attrs,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct EdgeRepr {
    #[serde(deserialize_with = "node_id")]
    source: NodeId,
    #[serde(deserialize_with = "node_id")]
    target: NodeId,
    #[serde(flatten)]
    attrs: Attrs,
}

/// Node-link ids are strings or numbers; numbers are kept in their JSON spelling.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(serde_json::Number),
}

fn node_id<'de, D>(deserializer: D) -> Result<NodeId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match <IdRepr as serde::Deserialize>::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    })
}

impl TryFrom<GraphRepr> for Graph {
    type Error = GraphreelError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        let mut g = Graph {
            directed: repr.directed,
            attrs: repr.graph,
            ..Graph::default()
        };
        for node in repr.nodes {
            if g.has_node(&node.id) {
                return Err(GraphreelError::structural(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            g.nodes.insert(node.id, node.attrs);
        }
        for edge in repr.edges {
            if g.has_edge(&edge.source, &edge.target) {
                return Err(GraphreelError::structural(format!(
                    "duplicate edge ({}, {})",
                    edge.source, edge.target
                )));
            }
            *g.add_edge(edge.source, edge.target) = edge.attrs;
        }
        Ok(g)
    }
}

impl From<Graph> for GraphRepr {
    fn from(g: Graph) -> Self {
        Self {
            directed: g.directed,
            graph: g.attrs,
            nodes: g
                .nodes
                .into_iter()
                .map(|(id, attrs)| NodeRepr { id, attrs })
                .collect(),
            edges: g
                .edges
                .into_iter()
                .map(|((source, target), attrs)| EdgeRepr {
                    source,
                    target,
                    attrs,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
