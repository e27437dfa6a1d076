use crate::{
    foundation::core::Color,
    foundation::error::{GraphreelResult, RenderWarning},
    geometry::edge::EdgeGeometryBuilder,
    geometry::label::node_label_placement,
    graph::model::Graph,
    graph::renderable::RenderableGraph,
    render::draw::{ResolvedEdge, ResolvedNode},
    render::trace::Trace,
    style::kinds::LabelPos,
    style::theme::Theme,
};

/// Traces of one animation step.
#[derive(Clone, Debug)]
pub struct FrameData {
    /// Edge traces, node traces, the edge label trace and the bounds trace, in that order.
    pub traces: Vec<Trace>,
    /// Number of node traces.
    pub node_traces: usize,
    /// Skipped elements.
    pub warnings: Vec<RenderWarning>,
}

/// Render `current` against the structure of `reference`.
///
/// Every node and non-loop edge of `reference` gets its own trace, in `reference` order. Elements
/// missing from `current` are drawn from `reference` fully transparent, with no border and no
/// label, so that all frames rendered against the same reference line up trace by trace.
/// Padding comes from `current`; `width × height` is the shared unpadded canvas size.
#[tracing::instrument(skip(current, reference, theme))]
pub fn render_frame(
    current: &Graph,
    reference: &Graph,
    width: u32,
    height: u32,
    theme: &Theme,
) -> GraphreelResult<FrameData> {
    let cur = RenderableGraph::new(current, theme);
    let refg = RenderableGraph::new(reference, theme);
    let mut canvas = cur.canvas_key()?;
    canvas.width = width;
    canvas.height = height;
    canvas.validate()?;
    let builder = EdgeGeometryBuilder::new(
        canvas.padded_width(),
        canvas.padded_height(),
        reference.is_directed(),
    );
    let mut warnings = Vec::new();

    let mut nodes = Vec::new();
    for n in refg.nodes() {
        nodes.push(if current.has_node(n) {
            ResolvedNode::resolve(&cur, n)?
        } else {
            let mut ghost = ResolvedNode::resolve(&refg, n)?;
            ghost.key.color = Color::TRANSPARENT;
            ghost.key.bcolor = Color::TRANSPARENT;
            ghost.key.bwidth = 0;
            ghost.label = None;
            ghost
        });
    }
    let mut edges = Vec::new();
    for (n, m) in refg.edges() {
        if !builder.accepts(n, m, &mut warnings) {
            continue;
        }
        edges.push(if current.has_edge(n, m) {
            ResolvedEdge::resolve(&cur, n, m)?
        } else {
            let mut ghost = ResolvedEdge::resolve(&refg, n, m)?;
            ghost.key.color = Color::TRANSPARENT;
            ghost.label = None;
            ghost
        });
    }

    let mut traces = Vec::with_capacity(edges.len() + nodes.len() + 2);
    let mut edge_labels = Trace::text(LabelPos::CENTERED);
    for edge in edges {
        let geometry = builder.build(edge.p0, edge.p1, &edge.key, edge.has_reverse);
        let mut trace = Trace::edges(&edge.key.stroke());
        for segment in geometry.segments() {
            trace.push_segment(segment);
        }
        edge_labels.push_point(geometry.label_anchor, edge.label);
        traces.push(trace);
    }

    let node_traces = nodes.len();
    for node in nodes {
        let mut trace = Trace::nodes(&node.key, &node_label_placement(&node.key));
        trace.push_point(node.pos, node.label);
        traces.push(trace);
    }
    traces.push(edge_labels);
    traces.push(Trace::bounds(&canvas));

    Ok(FrameData {
        traces,
        node_traces,
        warnings,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
