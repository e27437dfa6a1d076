use indexmap::IndexMap;

use crate::{
    foundation::error::{GraphreelResult, RenderWarning},
    geometry::edge::{EDGE_SCALE, EdgeGeometryBuilder},
    geometry::mapper::CoordinateMapper,
    graph::model::{Graph, NodeId},
    graph::renderable::RenderableGraph,
    render::draw::{ResolvedEdge, ResolvedNode},
    style::theme::Theme,
};

/// Border and fill of a node in one interaction state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NodeColorState {
    /// CSS border color.
    pub border: String,
    /// CSS fill color.
    pub background: String,
}

/// Node colors; highlighted and hovered nodes keep their look.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NodeColor {
    /// CSS border color.
    pub border: String,
    /// CSS fill color.
    pub background: String,
    /// Selected state.
    pub highlight: NodeColorState,
    /// Hovered state.
    pub hover: NodeColorState,
}

/// Option record of one interactive node.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    /// Node identity.
    pub id: NodeId,
    /// Border width.
    pub border_width: u32,
    /// Border width while selected.
    pub border_width_selected: u32,
    /// Colors.
    pub color: NodeColor,
    /// Always a single space; labels are shown as tooltips.
    pub label: String,
    /// Never bold labels on highlight.
    pub label_highlight_bold: bool,
    /// Whether the node takes part in the physics simulation.
    pub physics: bool,
    /// Backend shape name.
    pub shape: &'static str,
    /// Radius in pixels.
    pub size: u32,
    /// Tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Horizontal pixel position from the canvas center.
    pub x: i64,
    /// Vertical pixel position from the canvas center, growing downwards.
    pub y: i64,
}

/// Edge colors; highlighted and hovered edges keep their look.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EdgeColor {
    /// CSS color.
    pub color: String,
    /// Selected state.
    pub highlight: String,
    /// Hovered state.
    pub hover: String,
}

/// Stroke pattern: `false` for solid lines, else dash lengths in pixels.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Dashes {
    /// Solid line.
    Solid(bool),
    /// Dash and gap lengths.
    Pattern(Vec<u32>),
}

/// One arrowhead.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowEnd {
    /// Arrowhead scale.
    pub scale_factor: f64,
}

/// Arrowheads of a directed edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Arrows {
    /// Head at the target.
    pub to: ArrowEnd,
    /// Head at the source, set on merged anti-parallel pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ArrowEnd>,
}

/// Option record of one interactive edge.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEdge {
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// Colors.
    pub color: EdgeColor,
    /// Stroke pattern.
    pub dashes: Dashes,
    /// Never bold labels on highlight.
    pub label_highlight_bold: bool,
    /// Extra width while selected.
    pub selection_width: u32,
    /// Line width.
    pub width: u32,
    /// Tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Arrowheads, directed graphs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrows: Option<Arrows>,
}

/// Interactive network: option records for the network-visualization backend.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Network {
    /// Padded canvas width.
    pub width: u32,
    /// Padded canvas height.
    pub height: u32,
    /// Whether edges carry arrowheads.
    pub directed: bool,
    /// Nodes in graph order.
    pub nodes: Vec<NetworkNode>,
    /// Edges in graph order, anti-parallel pairs merged.
    pub edges: Vec<NetworkEdge>,
    /// Skipped elements.
    #[serde(skip)]
    pub warnings: Vec<RenderWarning>,
}

impl Network {
    /// Indented JSON.
    pub fn to_json_pretty(&self) -> GraphreelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn tooltip(label: Option<String>) -> Option<String> {
    label.filter(|l| !l.is_empty())
}

/// Build the interactive network of `graph`.
///
/// Node label placement, extra labels and edge label geometry do not apply here. In directed
/// graphs an anti-parallel pair becomes one double-headed edge: the first edge of the pair in
/// graph order is kept and the second is merged into it.
#[tracing::instrument(
    skip(graph, theme),
    fields(nodes = graph.number_of_nodes(), edges = graph.number_of_edges())
)]
pub fn interact(graph: &Graph, theme: &Theme, physics: bool) -> GraphreelResult<Network> {
    let g = RenderableGraph::new(graph, theme);
    let canvas = g.canvas_key()?;
    let directed = g.is_directed();
    let mapper = CoordinateMapper::for_canvas(&canvas);
    let builder = EdgeGeometryBuilder::new(canvas.padded_width(), canvas.padded_height(), directed);
    let mut warnings = Vec::new();

    let nodes = g
        .nodes()
        .map(|n| ResolvedNode::resolve(&g, n))
        .collect::<GraphreelResult<Vec<_>>>()?;
    let mut resolved = Vec::new();
    for (n, m) in g.edges() {
        if builder.accepts(n, m, &mut warnings) {
            resolved.push(ResolvedEdge::resolve(&g, n, m)?);
        }
    }

    let nodes = nodes
        .into_iter()
        .map(|node| {
            let pixel = mapper.to_pixel(node.pos);
            let border = node.key.bcolor.to_css();
            let background = node.key.color.to_css();
            let state = NodeColorState {
                border: border.clone(),
                background: background.clone(),
            };
            NetworkNode {
                id: node.id.clone(),
                border_width: node.key.bwidth,
                border_width_selected: 1,
                color: NodeColor {
                    border,
                    background,
                    highlight: state.clone(),
                    hover: state,
                },
                label: " ".to_string(),
                label_highlight_bold: false,
                physics,
                shape: node.key.style.network_shape(),
                size: node.key.size / 2,
                title: tooltip(node.label),
                x: pixel.x,
                y: pixel.y,
            }
        })
        .collect();

    let head = ArrowEnd {
        scale_factor: EDGE_SCALE,
    };
    let mut edges: Vec<NetworkEdge> = Vec::new();
    let mut emitted: IndexMap<(&NodeId, &NodeId), usize> = IndexMap::new();
    for edge in resolved {
        if directed && edge.has_reverse {
            if let Some(&i) = emitted.get(&(edge.target, edge.source)) {
                if let Some(arrows) = &mut edges[i].arrows {
                    arrows.from = Some(head);
                }
                continue;
            }
        }

        let color = edge.key.color.to_css();
        emitted.insert((edge.source, edge.target), edges.len());
        edges.push(NetworkEdge {
            from: edge.source.clone(),
            to: edge.target.clone(),
            color: EdgeColor {
                color: color.clone(),
                highlight: color.clone(),
                hover: color,
            },
            dashes: match edge.key.style.dash_pattern() {
                Some(pattern) => Dashes::Pattern(pattern.to_vec()),
                None => Dashes::Solid(false),
            },
            label_highlight_bold: false,
            selection_width: 0,
            width: edge.key.width,
            title: tooltip(edge.label),
            arrows: directed.then_some(Arrows {
                to: head,
                from: None,
            }),
        });
    }

    Ok(Network {
        width: canvas.padded_width(),
        height: canvas.padded_height(),
        directed,
        nodes,
        edges,
        warnings,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/interact.rs"]
mod tests;
