use crate::{
    foundation::error::GraphreelResult,
    graph::model::{Graph, merge_attrs},
};

/// Structural union of an animation's snapshots.
///
/// Snapshots whose node and edge counts all match the last snapshot are assumed to share one
/// structure and need no union. Otherwise every frame is rendered against a union graph holding
/// every node and edge seen in any snapshot, so that all frames emit the same primitives in the
/// same order.
#[derive(Clone, Copy, Debug)]
pub struct FrameUnionBuilder<'a> {
    recs: &'a [Graph],
}

impl<'a> FrameUnionBuilder<'a> {
    /// Builder over `recs`, in recording order.
    pub fn new(recs: &'a [Graph]) -> Self {
        Self { recs }
    }

    /// Whether some snapshot's node or edge count differs from the last snapshot's.
    pub fn needs_union(&self) -> bool {
        let Some(last) = self.recs.last() else {
            return false;
        };
        self.recs.iter().any(|g| {
            g.number_of_nodes() != last.number_of_nodes()
                || g.number_of_edges() != last.number_of_edges()
        })
    }

    /// The union graph, or `None` when the snapshots share one structure.
    ///
    /// Attributes come from the last snapshot containing each element.
    pub fn build(&self) -> GraphreelResult<Option<Graph>> {
        if !self.needs_union() {
            tracing::debug!(recs = self.recs.len(), "snapshots share one structure");
            return Ok(None);
        }
        let union = Graph::compose_all(self.recs)?;
        tracing::debug!(
            nodes = union.number_of_nodes(),
            edges = union.number_of_edges(),
            "built union graph"
        );
        Ok(Some(union))
    }

    /// Fold the attributes of `next` into `union`, key by key.
    pub fn fold(union: &mut Graph, next: &Graph) {
        for (n, attrs) in next.nodes() {
            merge_attrs(union.add_node(n.clone()), attrs);
        }
        for ((n, m), attrs) in next.edges() {
            merge_attrs(union.add_edge(n.clone(), m.clone()), attrs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/union.rs"]
mod tests;
