//! Where annotation values come from.
//!
//! A [`ValueSource`] maps each node (or edge) of a graph to a value: read from one of its
//! attributes, looked up in a table, computed by a closure, or the natural logarithm of another
//! source shifted by a constant.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::{
    foundation::error::{GraphreelError, GraphreelResult},
    graph::model::{Graph, NodeId},
};

/// Maps a graph element identified by `K` to a value.
pub enum ValueSource<K> {
    /// The element's attribute of that name.
    Attribute(String),
    /// A lookup table keyed by element.
    Mapping(BTreeMap<K, Value>),
    /// A closure of the element.
    Function(Box<dyn Fn(&K) -> Value>),
    /// `ln(inner + shift)`.
    LogTransform {
        /// Source of the numeric argument.
        inner: Box<ValueSource<K>>,
        /// Added before taking the logarithm.
        shift: f64,
    },
}

/// Source of per-node values.
pub type NodeSource = ValueSource<NodeId>;
/// Source of per-edge values, keyed by `(source, target)`.
pub type EdgeSource = ValueSource<(NodeId, NodeId)>;

impl<K> ValueSource<K> {
    /// Read the attribute `key`.
    pub fn attribute(key: impl Into<String>) -> Self {
        Self::Attribute(key.into())
    }

    /// Look values up in `table`.
    pub fn mapping(table: impl IntoIterator<Item = (K, Value)>) -> Self
    where
        K: Ord,
    {
        Self::Mapping(table.into_iter().collect())
    }

    /// Compute values with `f`.
    pub fn function(f: impl Fn(&K) -> Value + 'static) -> Self {
        Self::Function(Box::new(f))
    }

    /// Wrap this source in `ln(value + shift)`.
    pub fn log(self, shift: f64) -> Self {
        Self::LogTransform {
            inner: Box::new(self),
            shift,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for ValueSource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(key) => f.debug_tuple("Attribute").field(key).finish(),
            Self::Mapping(table) => f.debug_tuple("Mapping").field(table).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::LogTransform { inner, shift } => f
                .debug_struct("LogTransform")
                .field("inner", inner)
                .field("shift", shift)
                .finish(),
        }
    }
}

/// Require a numeric value.
pub fn numeric(value: &Value) -> GraphreelResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| GraphreelError::invalid_type("value must be numeric"))
}

fn log_of(value: Value, shift: f64) -> GraphreelResult<Value> {
    let x = (numeric(&value)? + shift).ln();
    serde_json::Number::from_f64(x)
        .map(Value::Number)
        .ok_or_else(|| {
            GraphreelError::invalid_range(format!("logarithm of {value} + {shift} is not finite"))
        })
}

/// Value of node `n`.
pub fn resolve_node(graph: &Graph, n: &str, source: &NodeSource) -> GraphreelResult<Value> {
    match source {
        ValueSource::Attribute(key) => graph
            .node(n)
            .and_then(|attrs| attrs.get(key))
            .cloned()
            .ok_or_else(|| {
                GraphreelError::structural(format!("node '{n}' has no attribute '{key}'"))
            }),
        ValueSource::Mapping(table) => table
            .get(n)
            .cloned()
            .ok_or_else(|| GraphreelError::structural(format!("no value for node '{n}'"))),
        ValueSource::Function(f) => Ok(f(&n.to_string())),
        ValueSource::LogTransform { inner, shift } => {
            log_of(resolve_node(graph, n, inner)?, *shift)
        }
    }
}

/// Value of edge `(n, m)`. Lookup tables of undirected graphs match either orientation.
pub fn resolve_edge(
    graph: &Graph,
    n: &str,
    m: &str,
    source: &EdgeSource,
) -> GraphreelResult<Value> {
    match source {
        ValueSource::Attribute(key) => graph
            .edge(n, m)
            .and_then(|attrs| attrs.get(key))
            .cloned()
            .ok_or_else(|| {
                GraphreelError::structural(format!("edge ({n}, {m}) has no attribute '{key}'"))
            }),
        ValueSource::Mapping(table) => {
            let key = (n.to_string(), m.to_string());
            table
                .get(&key)
                .or_else(|| {
                    if graph.is_directed() {
                        None
                    } else {
                        table.get(&(key.1.clone(), key.0.clone()))
                    }
                })
                .cloned()
                .ok_or_else(|| GraphreelError::structural(format!("no value for edge ({n}, {m})")))
        }
        ValueSource::Function(f) => Ok(f(&(n.to_string(), m.to_string()))),
        ValueSource::LogTransform { inner, shift } => {
            log_of(resolve_edge(graph, n, m, inner)?, *shift)
        }
    }
}

/// Values of every node, in graph order.
pub fn node_values(graph: &Graph, source: &NodeSource) -> GraphreelResult<Vec<Value>> {
    graph
        .node_ids()
        .map(|n| resolve_node(graph, n, source))
        .collect()
}

/// Values of every edge, in graph order.
pub fn edge_values(graph: &Graph, source: &EdgeSource) -> GraphreelResult<Vec<Value>> {
    graph
        .edges()
        .map(|((n, m), _)| resolve_edge(graph, n, m, source))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/annotate/source.rs"]
mod tests;
