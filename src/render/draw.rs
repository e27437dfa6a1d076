use indexmap::IndexMap;

use crate::{
    foundation::core::Point,
    foundation::error::{GraphreelResult, RenderWarning},
    geometry::edge::EdgeGeometryBuilder,
    geometry::label::{extra_label_position, node_label_placement},
    graph::model::{Graph, NodeId},
    graph::renderable::{EdgeKey, EdgeStroke, NodeKey, RenderableGraph},
    render::trace::{Figure, Layout, Trace},
    style::kinds::LabelPos,
    style::theme::Theme,
};

/// Rendered figure plus the non-fatal conditions met while building it.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Backend input.
    pub figure: Figure,
    /// Skipped elements.
    pub warnings: Vec<RenderWarning>,
}

/// A node with every attribute resolved and validated.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedNode<'a> {
    pub(crate) id: &'a NodeId,
    pub(crate) pos: Point,
    pub(crate) key: NodeKey,
    pub(crate) label: Option<String>,
    pub(crate) extra: Option<String>,
}

impl<'a> ResolvedNode<'a> {
    pub(crate) fn resolve(g: &RenderableGraph<'a>, id: &'a NodeId) -> GraphreelResult<Self> {
        Ok(Self {
            id,
            pos: g.node_pos(id)?,
            key: g.node_key(id)?,
            label: g.node_label(id)?,
            extra: g.node_extra(id)?,
        })
    }
}

/// A drawable (non-loop) edge with every attribute resolved and validated.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedEdge<'a> {
    pub(crate) source: &'a NodeId,
    pub(crate) target: &'a NodeId,
    pub(crate) p0: Point,
    pub(crate) p1: Point,
    pub(crate) key: EdgeKey,
    pub(crate) label: Option<String>,
    pub(crate) has_reverse: bool,
}

impl<'a> ResolvedEdge<'a> {
    pub(crate) fn resolve(
        g: &RenderableGraph<'a>,
        source: &'a NodeId,
        target: &'a NodeId,
    ) -> GraphreelResult<Self> {
        Ok(Self {
            source,
            target,
            p0: g.node_pos(source)?,
            p1: g.node_pos(target)?,
            key: g.edge_key(source, target)?,
            label: g.edge_label(source, target)?,
            has_reverse: g.has_edge(target, source),
        })
    }
}

/// Build the static figure of `graph`.
///
/// Every attribute is validated before any geometry is computed, so the call either returns a
/// complete figure or fails without partial output. Self-loops are skipped with a warning.
#[tracing::instrument(
    skip(graph, theme),
    fields(nodes = graph.number_of_nodes(), edges = graph.number_of_edges())
)]
pub fn draw(graph: &Graph, theme: &Theme) -> GraphreelResult<Rendered> {
    let g = RenderableGraph::new(graph, theme);
    let canvas = g.canvas_key()?;
    let builder =
        EdgeGeometryBuilder::new(canvas.padded_width(), canvas.padded_height(), g.is_directed());
    let mut warnings = Vec::new();

    let nodes = g
        .nodes()
        .map(|n| ResolvedNode::resolve(&g, n))
        .collect::<GraphreelResult<Vec<_>>>()?;
    let mut edges = Vec::new();
    for (n, m) in g.edges() {
        if builder.accepts(n, m, &mut warnings) {
            edges.push(ResolvedEdge::resolve(&g, n, m)?);
        }
    }

    let mut node_traces: IndexMap<NodeKey, Trace> = IndexMap::new();
    let mut extra_traces: IndexMap<LabelPos, Trace> = IndexMap::new();
    for node in nodes {
        node_traces
            .entry(node.key)
            .or_insert_with(|| Trace::nodes(&node.key, &node_label_placement(&node.key)))
            .push_point(node.pos, node.label);
        if let Some(extra) = node.extra {
            let position = extra_label_position(node.key.labpos);
            extra_traces
                .entry(position)
                .or_insert_with(|| Trace::text(position))
                .push_point(node.pos, Some(extra));
        }
    }

    let mut edge_traces: IndexMap<EdgeStroke, Trace> = IndexMap::new();
    let mut edge_labels = Trace::text(LabelPos::CENTERED);
    for edge in edges {
        let geometry = builder.build(edge.p0, edge.p1, &edge.key, edge.has_reverse);
        let trace = edge_traces
            .entry(edge.key.stroke())
            .or_insert_with(|| Trace::edges(&edge.key.stroke()));
        for segment in geometry.segments() {
            trace.push_segment(segment);
        }
        edge_labels.push_point(geometry.label_anchor, edge.label);
    }

    let mut data: Vec<Trace> = edge_traces.into_values().collect();
    data.extend(node_traces.into_values());
    data.push(edge_labels);
    data.extend(extra_traces.into_values());
    data.push(Trace::bounds(&canvas));

    let mut layout = Layout::new(
        f64::from(canvas.padded_width()),
        f64::from(canvas.padded_height()),
    );
    if g.is_directed() {
        layout.fix_range();
    }
    layout.apply_axes(&canvas);

    tracing::debug!(traces = data.len(), warnings = warnings.len(), "figure built");
    Ok(Rendered {
        figure: Figure {
            data,
            layout,
            frames: Vec::new(),
        },
        warnings,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
