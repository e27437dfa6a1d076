//! Annotators: write visual attributes derived from data onto a graph.
//!
//! Every annotator computes all of its values before touching the graph, so a failing call leaves
//! the graph unchanged. Rendering never calls these; they only prepare attributes for it.

use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexSet;
use serde_json::{Value, json};

use crate::{
    annotate::source::{EdgeSource, NodeSource, edge_values, node_values, numeric},
    foundation::core::Color,
    foundation::error::{GraphreelError, GraphreelResult},
    foundation::math::{Hsv, hsv_to_rgb, is_close, rgb_to_hsv},
    graph::model::{Graph, NodeId},
    graph::renderable::parse_color,
};

/// Node predicate.
pub type NodeFilter<'a> = &'a dyn Fn(&str) -> bool;
/// Edge predicate.
pub type EdgeFilter<'a> = &'a dyn Fn(&str, &str) -> bool;

/// Optional explicit range of the mapped values; open ends use the observed minimum/maximum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Must not exceed any value.
    pub lower: Option<f64>,
    /// Must not be exceeded by any value.
    pub upper: Option<f64>,
}

impl Bounds {
    /// Explicit range `[lower, upper]`.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

/// Set `key` to `value` on every node accepted by `filter`.
pub fn set_nodes(
    graph: &mut Graph,
    key: &str,
    value: impl Into<Value>,
    filter: Option<NodeFilter<'_>>,
) {
    let value = value.into();
    let ids = selected_nodes(graph, filter);
    for n in ids {
        graph.set_node_attr(n, key, value.clone());
    }
}

/// Set `key` to `value` on every edge accepted by `filter`.
pub fn set_edges(
    graph: &mut Graph,
    key: &str,
    value: impl Into<Value>,
    filter: Option<EdgeFilter<'_>>,
) {
    let value = value.into();
    let ids = selected_edges(graph, filter);
    for (n, m) in ids {
        graph.set_edge_attr(n, m, key, value.clone());
    }
}

/// Remove `key` from every node accepted by `filter`.
pub fn unset_nodes(graph: &mut Graph, key: &str, filter: Option<NodeFilter<'_>>) {
    for n in selected_nodes(graph, filter) {
        if let Some(attrs) = graph.node_mut(&n) {
            attrs.remove(key);
        }
    }
}

/// Remove `key` from every edge accepted by `filter`.
pub fn unset_edges(graph: &mut Graph, key: &str, filter: Option<EdgeFilter<'_>>) {
    for (n, m) in selected_edges(graph, filter) {
        if let Some(attrs) = graph.edge_mut(&n, &m) {
            attrs.remove(key);
        }
    }
}

fn selected_nodes(graph: &Graph, filter: Option<NodeFilter<'_>>) -> Vec<NodeId> {
    graph
        .node_ids()
        .filter(|n| filter.is_none_or(|f| f(n)))
        .cloned()
        .collect()
}

fn selected_edges(graph: &Graph, filter: Option<EdgeFilter<'_>>) -> Vec<(NodeId, NodeId)> {
    graph
        .edges()
        .map(|(ends, _)| ends)
        .filter(|(n, m)| filter.is_none_or(|f| f(n, m)))
        .map(|(n, m)| (n.clone(), m.clone()))
        .collect()
}

fn node_ids(graph: &Graph) -> Vec<NodeId> {
    selected_nodes(graph, None)
}

fn edge_ids(graph: &Graph) -> Vec<(NodeId, NodeId)> {
    selected_edges(graph, None)
}

/// Label each node with its value, or with its identity when `source` is `None`.
///
/// Floats are rounded to `ndigits` decimals.
pub fn label_nodes(
    graph: &mut Graph,
    source: Option<&NodeSource>,
    ndigits: usize,
) -> GraphreelResult<()> {
    let ids = node_ids(graph);
    let labels = match source {
        None => ids.clone(),
        Some(source) => node_values(graph, source)?
            .iter()
            .map(|v| stringify(v, ndigits))
            .collect(),
    };
    for (n, label) in ids.into_iter().zip(labels) {
        graph.set_node_attr(n, "label", label);
    }
    Ok(())
}

/// Label each edge with its value, or with `(source, target)` when `source` is `None`.
pub fn label_edges(
    graph: &mut Graph,
    source: Option<&EdgeSource>,
    ndigits: usize,
) -> GraphreelResult<()> {
    let ids = edge_ids(graph);
    let labels: Vec<String> = match source {
        None => ids.iter().map(|(n, m)| format!("({n}, {m})")).collect(),
        Some(source) => edge_values(graph, source)?
            .iter()
            .map(|v| stringify(v, ndigits))
            .collect(),
    };
    for ((n, m), label) in ids.into_iter().zip(labels) {
        graph.set_edge_attr(n, m, "label", label);
    }
    Ok(())
}

fn stringify(value: &Value, ndigits: usize) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(num) if num.is_f64() => {
            let x = num.as_f64().unwrap_or_default();
            let rounded: f64 = format!("{x:.ndigits$}").parse().unwrap_or(x);
            if rounded.fract() == 0.0 && rounded.abs() < 1e16 {
                format!("{rounded:.1}")
            } else {
                rounded.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Color each node's border as a darker shade of its fill; `dark` in `[0, 1]` is the fraction of
/// brightness removed. Nodes without a fill are treated as white.
pub fn color_borders(graph: &mut Graph, dark: f64) -> GraphreelResult<()> {
    let f = 1.0 - fraction(dark, "dark")?;
    let mut borders = Vec::new();
    for (n, attrs) in graph.nodes() {
        let hsv = match attrs.get("color") {
            None | Some(Value::Null) => Hsv {
                h: 0.0,
                s: 0.0,
                v: 1.0,
            },
            Some(v) => rgb_to_hsv(parse_color(v, "color", false)?.channels()),
        };
        let border = hsv_to_rgb(Hsv {
            v: f * hsv.v,
            ..hsv
        });
        borders.push((n.clone(), rgb_value(border)));
    }
    for (n, border) in borders {
        graph.set_node_attr(n, "bcolor", border);
    }
    Ok(())
}

/// Give each group of nodes with equal values its own hue, evenly spaced in sorted value order;
/// without a source every node is its own group. Colors have full saturation and value
/// `1 - dark`.
pub fn color_nodes(
    graph: &mut Graph,
    source: Option<&NodeSource>,
    dark: f64,
) -> GraphreelResult<()> {
    let v = 1.0 - fraction(dark, "dark")?;
    let ids = node_ids(graph);
    let groups = match source {
        None => (0..ids.len()).map(|i| vec![i]).collect(),
        Some(source) => sorted_groups(&node_values(graph, source)?)?,
    };
    for (color, group) in hue_ramp(groups.len(), v).into_iter().zip(groups) {
        for i in group {
            graph.set_node_attr(ids[i].clone(), "color", color.clone());
        }
    }
    Ok(())
}

/// Edge counterpart of [`color_nodes`].
pub fn color_edges(
    graph: &mut Graph,
    source: Option<&EdgeSource>,
    dark: f64,
) -> GraphreelResult<()> {
    let v = 1.0 - fraction(dark, "dark")?;
    let ids = edge_ids(graph);
    let groups = match source {
        None => (0..ids.len()).map(|i| vec![i]).collect(),
        Some(source) => sorted_groups(&edge_values(graph, source)?)?,
    };
    for (color, group) in hue_ramp(groups.len(), v).into_iter().zip(groups) {
        for i in group {
            let (n, m) = ids[i].clone();
            graph.set_edge_attr(n, m, "color", color.clone());
        }
    }
    Ok(())
}

/// Give each community its own hue, evenly spaced in community order, at full saturation and
/// value `1 - dark`. Nodes outside every community keep their color; a node listed in several
/// communities takes the last one's color.
pub fn color_community_nodes<C, N>(
    graph: &mut Graph,
    communities: &[C],
    dark: f64,
) -> GraphreelResult<()>
where
    C: AsRef<[N]>,
    N: AsRef<str>,
{
    let v = 1.0 - fraction(dark, "dark")?;
    for (n, color) in community_colors(graph, communities, v)? {
        graph.set_node_attr(n, "color", color);
    }
    Ok(())
}

/// Color edges inside a community with its hue (as in [`color_community_nodes`]) and edges
/// between communities black with opacity `alpha`. Every edge endpoint must belong to a
/// community.
pub fn color_community_edges<C, N>(
    graph: &mut Graph,
    communities: &[C],
    dark: f64,
    alpha: f64,
) -> GraphreelResult<()>
where
    C: AsRef<[N]>,
    N: AsRef<str>,
{
    let v = 1.0 - fraction(dark, "dark")?;
    let alpha = fraction(alpha, "alpha")?;
    let colors: HashMap<NodeId, Value> =
        community_colors(graph, communities, v)?.into_iter().collect();

    let mut updates = Vec::with_capacity(graph.number_of_edges());
    for ((n, m), _) in graph.edges() {
        let (Some(cn), Some(cm)) = (colors.get(n), colors.get(m)) else {
            return Err(GraphreelError::structural(format!(
                "edge ({n}, {m}) has an endpoint outside every community"
            )));
        };
        let color = if cn == cm {
            cn.clone()
        } else {
            rgba_value([0, 0, 0], alpha)
        };
        updates.push((n.clone(), m.clone(), color));
    }
    for (n, m, color) in updates {
        graph.set_edge_attr(n, m, "color", color);
    }
    Ok(())
}

fn community_colors<C, N>(
    graph: &Graph,
    communities: &[C],
    v: f64,
) -> GraphreelResult<Vec<(NodeId, Value)>>
where
    C: AsRef<[N]>,
    N: AsRef<str>,
{
    let mut colors = Vec::new();
    for (color, community) in hue_ramp(communities.len(), v).into_iter().zip(communities) {
        for n in community.as_ref() {
            let n = n.as_ref();
            if !graph.has_node(n) {
                return Err(GraphreelError::structural(format!(
                    "community member '{n}' is not a node"
                )));
            }
            colors.push((n.to_string(), color.clone()));
        }
    }
    Ok(colors)
}

fn hue_ramp(len: usize, v: f64) -> Vec<Value> {
    let step = 1.0 / len.max(1) as f64;
    let mut h = 0.0;
    let mut colors = Vec::with_capacity(len);
    for _ in 0..len {
        colors.push(rgb_value(hsv_to_rgb(Hsv { h, s: 1.0, v })));
        h += step;
    }
    colors
}

/// Indices of equal values, grouped and ordered by value.
fn sorted_groups(values: &[Value]) -> GraphreelResult<Vec<Vec<usize>>> {
    let mut groups: Vec<(&Value, Vec<usize>)> = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match groups.iter_mut().find(|(v, _)| same_value(v, value)) {
            Some((_, members)) => members.push(i),
            None => groups.push((value, vec![i])),
        }
    }

    let mut failed = None;
    groups.sort_by(|(a, _), (b, _)| {
        compare_values(a, b).unwrap_or_else(|err| {
            failed.get_or_insert(err);
            Ordering::Equal
        })
    });
    if let Some(err) = failed {
        return Err(err);
    }
    Ok(groups.into_iter().map(|(_, members)| members).collect())
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> GraphreelResult<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(x
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&y.as_f64().unwrap_or_default())),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        _ => Err(GraphreelError::invalid_type(
            "grouped values must be all numbers, all strings or all booleans",
        )),
    }
}

/// Map node values onto marker sizes from 5 to 50 pixels.
pub fn scale_nodes_size(
    graph: &mut Graph,
    source: &NodeSource,
    bounds: Bounds,
) -> GraphreelResult<()> {
    let ids = node_ids(graph);
    let scaled = scaled(&node_values(graph, source)?, bounds)?;
    for (n, sc) in ids.into_iter().zip(scaled) {
        graph.set_node_attr(n, "size", 5 + (sc * 45.0).round_ties_even() as i64);
    }
    Ok(())
}

/// Map edge values onto line widths from 1 to 10 pixels.
pub fn scale_edges_width(
    graph: &mut Graph,
    source: &EdgeSource,
    bounds: Bounds,
) -> GraphreelResult<()> {
    let ids = edge_ids(graph);
    let scaled = scaled(&edge_values(graph, source)?, bounds)?;
    for ((n, m), sc) in ids.into_iter().zip(scaled) {
        graph.set_edge_attr(n, m, "width", 1 + (sc * 9.0).round_ties_even() as i64);
    }
    Ok(())
}

/// Map node values onto fills from white to black, or from white to the fully saturated hue of
/// `color`.
pub fn scale_nodes_dark(
    graph: &mut Graph,
    source: &NodeSource,
    bounds: Bounds,
    color: Option<Color>,
) -> GraphreelResult<()> {
    let ids = node_ids(graph);
    let scaled = scaled(&node_values(graph, source)?, bounds)?;
    let hue = color.map(|c| rgb_to_hsv(c.channels()).h);
    for (n, sc) in ids.into_iter().zip(scaled) {
        let fill = match hue {
            None => {
                let c = 255 - (sc * 255.0).round_ties_even() as u8;
                [c, c, c]
            }
            Some(h) => hsv_to_rgb(Hsv { h, s: sc, v: 1.0 }),
        };
        graph.set_node_attr(n, "color", rgb_value(fill));
    }
    Ok(())
}

/// Map edge values onto opacity, in black or in the fully saturated hue of `color`.
pub fn scale_edges_alpha(
    graph: &mut Graph,
    source: &EdgeSource,
    bounds: Bounds,
    color: Option<Color>,
) -> GraphreelResult<()> {
    let ids = edge_ids(graph);
    let scaled = scaled(&edge_values(graph, source)?, bounds)?;
    let base = match color {
        None => [0, 0, 0],
        Some(c) => hsv_to_rgb(Hsv {
            h: rgb_to_hsv(c.channels()).h,
            s: 1.0,
            v: 1.0,
        }),
    };
    for ((n, m), sc) in ids.into_iter().zip(scaled) {
        graph.set_edge_attr(n, m, "color", rgba_value(base, sc));
    }
    Ok(())
}

/// Diverging fill around `middle` (default: the mean): blue below, red above, fading to white
/// at the middle. `classic` sweeps the hue blue → green → red at full saturation instead.
pub fn heat_nodes(
    graph: &mut Graph,
    source: &NodeSource,
    bounds: Bounds,
    middle: Option<f64>,
    classic: bool,
) -> GraphreelResult<()> {
    let ids = node_ids(graph);
    let heat = heat(&node_values(graph, source)?, bounds, middle)?;
    for (n, h) in ids.into_iter().zip(heat) {
        let fill = match h {
            None => [255, 255, 255],
            Some(HeatLevel { side, depth }) if classic => hsv_to_rgb(Hsv {
                h: side.classic(depth),
                s: 1.0,
                v: 1.0,
            }),
            Some(HeatLevel { side, depth }) => hsv_to_rgb(Hsv {
                h: side.base(),
                s: depth,
                v: 1.0,
            }),
        };
        graph.set_node_attr(n, "color", rgb_value(fill));
    }
    Ok(())
}

/// Edge counterpart of [`heat_nodes`], expressing depth as opacity.
pub fn heat_edges(
    graph: &mut Graph,
    source: &EdgeSource,
    bounds: Bounds,
    middle: Option<f64>,
    classic: bool,
) -> GraphreelResult<()> {
    let ids = edge_ids(graph);
    let heat = heat(&edge_values(graph, source)?, bounds, middle)?;
    for ((n, m), h) in ids.into_iter().zip(heat) {
        let color = match h {
            None => rgba_value([255, 255, 255], 0.0),
            Some(HeatLevel { side, depth }) if classic => rgba_value(
                hsv_to_rgb(Hsv {
                    h: side.classic(depth),
                    s: 1.0,
                    v: 1.0,
                }),
                1.0,
            ),
            Some(HeatLevel { side, depth }) => rgba_value(
                hsv_to_rgb(Hsv {
                    h: side.base(),
                    s: 1.0,
                    v: 1.0,
                }),
                depth,
            ),
        };
        graph.set_edge_attr(n, m, "color", color);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum HeatSide {
    Cold,
    Hot,
}

impl HeatSide {
    fn base(self) -> f64 {
        match self {
            Self::Cold => 2.0 / 3.0,
            Self::Hot => 0.0,
        }
    }

    fn classic(self, depth: f64) -> f64 {
        match self {
            Self::Cold => 2.0 / 3.0 - (1.0 - depth) / 3.0,
            Self::Hot => 1.0 / 3.0 - depth / 3.0,
        }
    }
}

/// Side of the middle and distance from it, `0` at the middle and `1` at the bound.
#[derive(Clone, Copy, Debug, PartialEq)]
struct HeatLevel {
    side: HeatSide,
    depth: f64,
}

/// `None` everywhere when the bounds collapse.
fn heat(
    values: &[Value],
    bounds: Bounds,
    middle: Option<f64>,
) -> GraphreelResult<Vec<Option<HeatLevel>>> {
    let (values, lower, upper) = bounded(values, bounds)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }
    let middle = match middle {
        None => values.iter().sum::<f64>() / values.len() as f64,
        Some(m) if m < lower || m > upper => {
            return Err(GraphreelError::invalid_range(
                "middle must be between lower and upper",
            ));
        }
        Some(m) => m,
    };
    if is_close(lower, upper) {
        return Ok(vec![None; values.len()]);
    }

    Ok(values
        .into_iter()
        .map(|value| {
            Some(if value < middle {
                HeatLevel {
                    side: HeatSide::Cold,
                    depth: 1.0 - (value - lower) / (middle - lower),
                }
            } else {
                let span = upper - middle;
                HeatLevel {
                    side: HeatSide::Hot,
                    depth: if span > 0.0 { (value - middle) / span } else { 0.0 },
                }
            })
        })
        .collect())
}

/// Values rescaled onto `[0, 1]`; every value is `0.5` when the bounds collapse.
fn scaled(values: &[Value], bounds: Bounds) -> GraphreelResult<Vec<f64>> {
    let (values, lower, upper) = bounded(values, bounds)?;
    Ok(values
        .into_iter()
        .map(|value| {
            if is_close(lower, upper) {
                0.5
            } else {
                (value - lower) / (upper - lower)
            }
        })
        .collect())
}

fn bounded(values: &[Value], bounds: Bounds) -> GraphreelResult<(Vec<f64>, f64, f64)> {
    let values = values.iter().map(numeric).collect::<GraphreelResult<Vec<_>>>()?;
    let lower = match bounds.lower {
        None => values.iter().copied().fold(f64::INFINITY, f64::min),
        Some(lower) if values.iter().any(|&v| v < lower) => {
            return Err(GraphreelError::invalid_range("lower must be below all values"));
        }
        Some(lower) => lower,
    };
    let upper = match bounds.upper {
        None => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Some(upper) if values.iter().any(|&v| v > upper) => {
            return Err(GraphreelError::invalid_range("upper must be above all values"));
        }
        Some(upper) => upper,
    };
    Ok((values, lower, upper))
}

/// Stack a snapshot sequence into one directed graph.
///
/// Every distinct node (first-seen order, index `j` of `k`) gets one copy per snapshot `i` it
/// appears in, named `i * k + j`. Copies keep the snapshot's attributes plus `id` (the original
/// node), label `"<label> (<i + 1>)"`, and fill and border colors faded towards white for early
/// snapshots: step `i` of `s` keeps a fraction `(i + 1) / s` of saturation and darkness.
/// Consecutive copies of each node in `subjects` are joined by black tracking edges whose
/// opacity is the mean of the two fractions.
pub fn stack_and_track<N: AsRef<str>>(graphs: &[Graph], subjects: &[N]) -> GraphreelResult<Graph> {
    if graphs.is_empty() {
        return Err(GraphreelError::structural("cannot stack an empty list of graphs"));
    }
    let union: IndexSet<&NodeId> = graphs.iter().flat_map(Graph::node_ids).collect();
    let step = 1.0 / graphs.len() as f64;
    let k = union.len();

    let mut out = Graph::directed();
    for (j, &n) in union.iter().enumerate() {
        let tracked = subjects.iter().any(|s| s.as_ref() == n);
        let mut prev: Option<(NodeId, f64)> = None;
        let mut frac = step;
        for (i, g) in graphs.iter().enumerate() {
            if let Some(attrs) = g.node(n) {
                let curr = (i * k + j).to_string();
                let mut copy = attrs.clone();
                copy.insert("id".to_string(), Value::String(n.clone()));
                let label = match copy.get("label") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(label)) => Some(format!("{label} ({})", i + 1)),
                    Some(_) => {
                        return Err(GraphreelError::invalid_type("node label must be a string"));
                    }
                };
                if let Some(label) = label {
                    copy.insert("label".to_string(), Value::String(label));
                }
                let color = faded(copy.get("color"), Color::WHITE, frac, "node color")?;
                let bcolor = faded(copy.get("bcolor"), Color::BLACK, frac, "node bcolor")?;
                copy.insert("color".to_string(), color);
                copy.insert("bcolor".to_string(), bcolor);
                *out.add_node(curr.clone()) = copy;

                if let Some((p, orig)) = prev.take().filter(|_| tracked) {
                    let color = rgba_value([0, 0, 0], (orig + frac) / 2.0);
                    out.set_edge_attr(p, curr.clone(), "color", color);
                }
                prev = Some((curr, frac));
            }
            frac += step;
        }
    }
    tracing::debug!(
        nodes = out.number_of_nodes(),
        edges = out.number_of_edges(),
        "stacked snapshots"
    );
    Ok(out)
}

fn faded(value: Option<&Value>, default: Color, frac: f64, what: &str) -> GraphreelResult<Value> {
    let color = match value {
        None | Some(Value::Null) => default,
        Some(v) => parse_color(v, what, false)?,
    };
    let hsv = rgb_to_hsv(color.channels());
    Ok(rgb_value(hsv_to_rgb(Hsv {
        h: hsv.h,
        s: frac * hsv.s,
        v: 1.0 - frac * (1.0 - hsv.v),
    })))
}

fn fraction(value: f64, what: &str) -> GraphreelResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GraphreelError::invalid_range(format!(
            "{what} must be between 0 and 1"
        )));
    }
    Ok(value)
}

fn rgb_value([r, g, b]: [u8; 3]) -> Value {
    json!([r, g, b])
}

fn rgba_value([r, g, b]: [u8; 3], a: f64) -> Value {
    json!([r, g, b, a])
}

#[cfg(test)]
#[path = "../../tests/unit/annotate/mappers.rs"]
mod tests;
