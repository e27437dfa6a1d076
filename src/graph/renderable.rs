use serde_json::Value;

use crate::{
    foundation::core::{Color, Point},
    foundation::error::{GraphreelError, GraphreelResult},
    graph::model::{Attrs, Graph, NodeId},
    style::kinds::{EdgeStyle, LabelPos, NodeStyle},
    style::theme::Theme,
};

/// Canvas size, padding and axis styling of one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct CanvasKey {
    /// Drawable width in pixels, `> 0`.
    pub width: u32,
    /// Drawable height in pixels, `> 0`.
    pub height: u32,
    /// Bottom padding.
    pub bottom: u32,
    /// Left padding.
    pub left: u32,
    /// Right padding.
    pub right: u32,
    /// Top padding.
    pub top: u32,
    /// Axis line width, `0` for none.
    pub awidth: u32,
    /// Axis line color.
    pub acolor: Color,
}

impl CanvasKey {
    /// Width including horizontal padding.
    pub fn padded_width(&self) -> u32 {
        self.width.saturating_add(self.left).saturating_add(self.right)
    }

    /// Height including vertical padding.
    pub fn padded_height(&self) -> u32 {
        self.height.saturating_add(self.bottom).saturating_add(self.top)
    }

    /// Fail unless both padded sizes fit in a `u32`.
    pub fn validate(&self) -> GraphreelResult<()> {
        let fits = |size: u32, a: u32, b: u32| {
            size.checked_add(a).and_then(|s| s.checked_add(b)).is_some()
        };
        if !fits(self.width, self.left, self.right) {
            return Err(GraphreelError::invalid_range(
                "graph width plus padding is too large",
            ));
        }
        if !fits(self.height, self.bottom, self.top) {
            return Err(GraphreelError::invalid_range(
                "graph height plus padding is too large",
            ));
        }
        Ok(())
    }
}

/// Resolved style of one node; nodes with equal keys share a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey {
    /// Marker diameter.
    pub size: u32,
    /// Marker shape.
    pub style: NodeStyle,
    /// Marker fill.
    pub color: Color,
    /// Border width.
    pub bwidth: u32,
    /// Border color.
    pub bcolor: Color,
    /// Label placement.
    pub labpos: LabelPos,
}

/// Resolved style and label geometry of one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeKey {
    /// Source marker diameter.
    pub n_size: u32,
    /// Target marker diameter.
    pub m_size: u32,
    /// Line width.
    pub width: u32,
    /// Stroke pattern.
    pub style: EdgeStyle,
    /// Line color.
    pub color: Color,
    /// Label on the other side of the edge.
    pub labflip: bool,
    /// Label distance in pixels.
    pub labdist: u32,
    /// Label fraction along the edge.
    pub labfrac: f64,
}

impl EdgeKey {
    /// The part of the key edges are grouped by.
    pub fn stroke(&self) -> EdgeStroke {
        EdgeStroke {
            width: self.width,
            style: self.style,
            color: self.color,
        }
    }
}

/// Line styling shared by all edges of one trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeStroke {
    /// Line width.
    pub width: u32,
    /// Stroke pattern.
    pub style: EdgeStyle,
    /// Line color.
    pub color: Color,
}

/// Read-only view of a [`Graph`] with typed, validated attribute getters.
///
/// Absent attributes fall back to the [`Theme`]; present attributes of the wrong type or outside
/// their domain fail with [`GraphreelError::InvalidType`] / [`GraphreelError::InvalidRange`].
#[derive(Clone, Copy, Debug)]
pub struct RenderableGraph<'a> {
    graph: &'a Graph,
    theme: &'a Theme,
}

impl<'a> RenderableGraph<'a> {
    /// Wrap `graph`, resolving defaults from `theme`.
    pub fn new(graph: &'a Graph, theme: &'a Theme) -> Self {
        Self { graph, theme }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// The defaults in effect.
    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    /// Node identities in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.graph.node_ids()
    }

    /// Edge endpoints in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&'a NodeId, &'a NodeId)> + 'a {
        self.graph.edges().map(|(ends, _)| ends)
    }

    /// Whether edges are ordered pairs.
    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    /// Whether `(n, m)` is an edge.
    pub fn has_edge(&self, n: &str, m: &str) -> bool {
        self.graph.has_edge(n, m)
    }

    /// Canvas width, `> 0`.
    pub fn canvas_width(&self) -> GraphreelResult<u32> {
        let width = read_int(self.graph.attrs(), "width", "graph width")?
            .map_or(Ok(self.theme.graph_width), |w| positive(w, "graph width"))?;
        Ok(width)
    }

    /// Canvas height, `> 0`.
    pub fn canvas_height(&self) -> GraphreelResult<u32> {
        read_int(self.graph.attrs(), "height", "graph height")?
            .map_or(Ok(self.theme.graph_height), |h| positive(h, "graph height"))
    }

    /// Full canvas key: size, padding and axis styling. Padded sizes must fit in a `u32`.
    pub fn canvas_key(&self) -> GraphreelResult<CanvasKey> {
        let attrs = self.graph.attrs();
        let t = self.theme;
        let padding = |key: &str, default: u32| -> GraphreelResult<u32> {
            let what = format!("graph {key}");
            read_int(attrs, key, &what)?.map_or(Ok(default), |v| non_negative(v, &what))
        };

        let canvas = CanvasKey {
            width: self.canvas_width()?,
            height: self.canvas_height()?,
            bottom: padding("bottom", t.graph_bottom)?,
            left: padding("left", t.graph_left)?,
            right: padding("right", t.graph_right)?,
            top: padding("top", t.graph_top)?,
            awidth: padding("awidth", t.graph_awidth)?,
            acolor: read_color(attrs, "acolor", "graph acolor", false)?
                .unwrap_or(t.graph_acolor),
        };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Normalized position of `n`; required, both components in `[0, 1]`.
    pub fn node_pos(&self, n: &str) -> GraphreelResult<Point> {
        let attrs = self.node_attrs(n)?;
        let Some(pos) = attrs.get("pos") else {
            return Err(GraphreelError::structural(format!(
                "node '{n}' must have a pos"
            )));
        };
        let Value::Array(items) = pos else {
            return Err(GraphreelError::invalid_type(
                "node pos must be a tuple or list",
            ));
        };
        let [x, y] = items.as_slice() else {
            return Err(GraphreelError::invalid_range(
                "node pos must have exactly two elements",
            ));
        };
        let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) else {
            return Err(GraphreelError::invalid_type(
                "both node pos elements must be numeric",
            ));
        };
        if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
            return Err(GraphreelError::invalid_range(
                "both node pos elements must be between 0 and 1",
            ));
        }
        Ok(Point::new(x, y))
    }

    /// Marker diameter of `n`, `> 0`.
    pub fn node_size(&self, n: &str) -> GraphreelResult<u32> {
        read_int(self.node_attrs(n)?, "size", "node size")?
            .map_or(Ok(self.theme.node_size), |s| positive(s, "node size"))
    }

    /// Resolved visual style of `n`.
    pub fn node_key(&self, n: &str) -> GraphreelResult<NodeKey> {
        let attrs = self.node_attrs(n)?;
        let t = self.theme;

        let size = self.node_size(n)?;
        let style = match read_str(attrs, "style", "node style")? {
            Some(s) => s.parse()?,
            None => t.node_style,
        };
        let color = read_color(attrs, "color", "node color", true)?.unwrap_or(t.node_color);
        let bwidth = read_int(attrs, "bwidth", "node bwidth")?
            .map_or(Ok(t.node_bwidth), |w| non_negative(w, "node bwidth"))?;
        let bcolor = read_color(attrs, "bcolor", "node bcolor", false)?.unwrap_or(t.node_bcolor);
        let labpos = match read_str(attrs, "labpos", "node labpos")? {
            Some(s) => s.parse()?,
            None => t.node_labpos,
        };

        Ok(NodeKey {
            size,
            style,
            color,
            bwidth,
            bcolor,
            labpos,
        })
    }

    /// Primary label of `n`.
    pub fn node_label(&self, n: &str) -> GraphreelResult<Option<String>> {
        read_text(self.node_attrs(n)?, "label", "node label")
    }

    /// Secondary label of `n`.
    pub fn node_extra(&self, n: &str) -> GraphreelResult<Option<String>> {
        read_text(self.node_attrs(n)?, "extra", "node extra")
    }

    /// Resolved style and label geometry of edge `(n, m)`.
    pub fn edge_key(&self, n: &str, m: &str) -> GraphreelResult<EdgeKey> {
        let attrs = self.edge_attrs(n, m)?;
        let t = self.theme;

        let n_size = self.node_size(n)?;
        let m_size = self.node_size(m)?;
        let width = read_int(attrs, "width", "edge width")?
            .map_or(Ok(t.edge_width), |w| positive(w, "edge width"))?;
        let style = match read_str(attrs, "style", "edge style")? {
            Some(s) => s.parse()?,
            None => t.edge_style,
        };
        let color = read_color(attrs, "color", "edge color", true)?.unwrap_or(t.edge_color);
        let labflip = match attrs.get("labflip") {
            None | Some(Value::Null) => t.edge_labflip,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(GraphreelError::invalid_type("edge labflip must be a boolean"));
            }
        };
        let labdist = read_int(attrs, "labdist", "edge labdist")?
            .map_or(Ok(t.edge_labdist), |d| non_negative(d, "edge labdist"))?;
        let labfrac = match attrs.get("labfrac") {
            None | Some(Value::Null) => t.edge_labfrac,
            Some(v) => {
                let f = v.as_f64().ok_or_else(|| {
                    GraphreelError::invalid_type("edge labfrac must be numeric")
                })?;
                if !(0.0..=1.0).contains(&f) {
                    return Err(GraphreelError::invalid_range(
                        "edge labfrac must be between 0 and 1",
                    ));
                }
                f
            }
        };

        Ok(EdgeKey {
            n_size,
            m_size,
            width,
            style,
            color,
            labflip,
            labdist,
            labfrac,
        })
    }

    /// Label of edge `(n, m)`.
    pub fn edge_label(&self, n: &str, m: &str) -> GraphreelResult<Option<String>> {
        read_text(self.edge_attrs(n, m)?, "label", "edge label")
    }

    fn node_attrs(&self, n: &str) -> GraphreelResult<&'a Attrs> {
        self.graph
            .node(n)
            .ok_or_else(|| GraphreelError::structural(format!("graph has no node '{n}'")))
    }

    fn edge_attrs(&self, n: &str, m: &str) -> GraphreelResult<&'a Attrs> {
        self.graph
            .edge(n, m)
            .ok_or_else(|| GraphreelError::structural(format!("graph has no edge ({n}, {m})")))
    }
}

fn read_int(attrs: &Attrs, key: &str, what: &str) -> GraphreelResult<Option<i64>> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(num)) if num.is_i64() || num.is_u64() => num
            .as_i64()
            .map(Some)
            .ok_or_else(|| GraphreelError::invalid_range(format!("{what} is too large"))),
        Some(_) => Err(GraphreelError::invalid_type(format!(
            "{what} must be an integer"
        ))),
    }
}

fn read_str<'v>(attrs: &'v Attrs, key: &str, what: &str) -> GraphreelResult<Option<&'v str>> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(GraphreelError::invalid_type(format!("{what} must be a string"))),
    }
}

fn read_text(attrs: &Attrs, key: &str, what: &str) -> GraphreelResult<Option<String>> {
    Ok(read_str(attrs, key, what)?.map(str::to_string))
}

fn read_color(
    attrs: &Attrs,
    key: &str,
    what: &str,
    allow_alpha: bool,
) -> GraphreelResult<Option<Color>> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_color(v, what, allow_alpha).map(Some),
    }
}

/// Validate a JSON `[r, g, b]` (or `[r, g, b, a]` when allowed) color value.
pub(crate) fn parse_color(value: &Value, what: &str, allow_alpha: bool) -> GraphreelResult<Color> {
    let Value::Array(items) = value else {
        return Err(GraphreelError::invalid_type(format!(
            "{what} must be a tuple or list"
        )));
    };
    match (items.len(), allow_alpha) {
        (3, _) | (4, true) => {}
        (_, true) => {
            return Err(GraphreelError::invalid_range(format!(
                "{what} must have three or four elements"
            )));
        }
        (_, false) => {
            return Err(GraphreelError::invalid_range(format!(
                "{what} must have exactly three elements"
            )));
        }
    }

    let mut channels = [0u8; 3];
    for (slot, item) in channels.iter_mut().zip(items) {
        let c = match item {
            Value::Number(num) if num.is_i64() || num.is_u64() => num.as_i64(),
            _ => None,
        }
        .ok_or_else(|| {
            GraphreelError::invalid_type(format!(
                "the first three {what} elements must be integers"
            ))
        })?;
        *slot = u8::try_from(c).map_err(|_| {
            GraphreelError::invalid_range(format!(
                "the first three {what} elements must be between 0 and 255"
            ))
        })?;
    }
    let [r, g, b] = channels;

    let Some(alpha) = items.get(3) else {
        return Ok(Color::rgb(r, g, b));
    };
    let a = alpha.as_f64().ok_or_else(|| {
        GraphreelError::invalid_type(format!("the fourth {what} element must be numeric"))
    })?;
    if !(0.0..=1.0).contains(&a) {
        return Err(GraphreelError::invalid_range(format!(
            "the fourth {what} element must be between 0 and 1"
        )));
    }
    Ok(Color::rgba(r, g, b, a))
}

fn positive(v: i64, what: &str) -> GraphreelResult<u32> {
    if v <= 0 {
        return Err(GraphreelError::invalid_range(format!("{what} must be positive")));
    }
    u32::try_from(v).map_err(|_| GraphreelError::invalid_range(format!("{what} is too large")))
}

fn non_negative(v: i64, what: &str) -> GraphreelResult<u32> {
    if v < 0 {
        return Err(GraphreelError::invalid_range(format!(
            "{what} must be non-negative"
        )));
    }
    u32::try_from(v).map_err(|_| GraphreelError::invalid_range(format!("{what} is too large")))
}

#[cfg(test)]
#[path = "../../tests/unit/graph/renderable.rs"]
mod tests;
