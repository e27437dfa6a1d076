//! Serializable drawing records handed to the plotting backend.
//!
//! A [`Figure`] is a list of [`Trace`]s plus a [`Layout`], optionally with animation [`Frame`]s.
//! Every record serializes to the backend's JSON shape; absent optional fields are omitted.

use crate::{
    foundation::core::{Color, Point},
    foundation::error::GraphreelResult,
    foundation::math::Fnv1a64,
    geometry::contrast::TextColor,
    geometry::edge::Segment,
    geometry::label::NodeLabelPlacement,
    graph::renderable::{CanvasKey, EdgeStroke, NodeKey},
    style::kinds::{EdgeStyle, LabelPos, NodeStyle},
};

/// Which visual parts of a trace are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TraceMode {
    /// Markers only.
    #[serde(rename = "markers")]
    Markers,
    /// Markers with always-visible text.
    #[serde(rename = "markers+text")]
    MarkersText,
    /// Polylines.
    #[serde(rename = "lines")]
    Lines,
    /// Text only.
    #[serde(rename = "text")]
    Text,
}

/// What a trace shows on hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverInfo {
    /// The entry's text.
    Text,
    /// Nothing.
    None,
}

/// Marker border.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MarkerLine {
    /// Border width in pixels.
    pub width: u32,
    /// CSS color.
    pub color: String,
}

/// Marker styling of a node or bounds trace.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Marker {
    /// Diameter in pixels.
    pub size: u32,
    /// Shape.
    pub symbol: NodeStyle,
    /// CSS fill color.
    pub color: String,
    /// Border.
    pub line: MarkerLine,
}

/// Line styling of an edge trace.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Line {
    /// Width in pixels.
    pub width: u32,
    /// Dash pattern name.
    pub dash: EdgeStyle,
    /// CSS color.
    pub color: String,
}

/// Text styling.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextFont {
    /// CSS color.
    pub color: String,
}

/// One homogeneous batch of drawing instructions.
///
/// `x`/`y` hold normalized coordinates; `null` entries break polylines between edge segments.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Trace {
    /// Horizontal coordinates.
    pub x: Vec<Option<f64>>,
    /// Vertical coordinates.
    pub y: Vec<Option<f64>>,
    /// Per-entry text, absent on line and bounds traces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<Option<String>>>,
    /// Hover behavior.
    pub hoverinfo: HoverInfo,
    /// Drawn parts.
    pub mode: TraceMode,
    /// Marker styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    /// Line styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    /// Text position relative to each entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<LabelPos>,
    /// Text styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<TextFont>,
}

impl Trace {
    /// Empty node trace for nodes drawn with `key`.
    pub fn nodes(key: &NodeKey, placement: &NodeLabelPlacement) -> Self {
        let (mode, hoverinfo) = if placement.visible {
            (TraceMode::MarkersText, HoverInfo::None)
        } else {
            (TraceMode::Markers, HoverInfo::Text)
        };
        Self {
            x: Vec::new(),
            y: Vec::new(),
            text: Some(Vec::new()),
            hoverinfo,
            mode,
            marker: Some(Marker {
                size: key.size,
                symbol: key.style,
                color: key.color.to_css(),
                line: MarkerLine {
                    width: key.bwidth,
                    color: key.bcolor.to_css(),
                },
            }),
            line: None,
            textposition: Some(placement.position),
            textfont: Some(TextFont {
                color: placement.text_color.to_color().to_css(),
            }),
        }
    }

    /// Empty edge trace for edges drawn with `stroke`.
    pub fn edges(stroke: &EdgeStroke) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            text: None,
            hoverinfo: HoverInfo::None,
            mode: TraceMode::Lines,
            marker: None,
            line: Some(Line {
                width: stroke.width,
                dash: stroke.style,
                color: stroke.color.to_css(),
            }),
            textposition: None,
            textfont: None,
        }
    }

    /// Empty black text trace placed at `position`.
    pub fn text(position: LabelPos) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            text: Some(Vec::new()),
            hoverinfo: HoverInfo::None,
            mode: TraceMode::Text,
            marker: None,
            line: None,
            textposition: Some(position),
            textfont: Some(TextFont {
                color: TextColor::Black.to_color().to_css(),
            }),
        }
    }

    /// Four invisible markers just outside the padded canvas, pinning the plotted range.
    pub fn bounds(canvas: &CanvasKey) -> Self {
        let w = f64::from(canvas.padded_width());
        let h = f64::from(canvas.padded_height());
        let clear = Color::TRANSPARENT.to_css();
        Self {
            x: [
                0.5,
                -f64::from(canvas.left) / w,
                1.0 + f64::from(canvas.right) / w,
                0.5,
            ]
            .map(Some)
            .to_vec(),
            y: [
                -f64::from(canvas.bottom) / h,
                0.5,
                0.5,
                1.0 + f64::from(canvas.top) / h,
            ]
            .map(Some)
            .to_vec(),
            text: None,
            hoverinfo: HoverInfo::None,
            mode: TraceMode::Markers,
            marker: Some(Marker {
                size: 0,
                symbol: NodeStyle::Circle,
                color: clear.clone(),
                line: MarkerLine {
                    width: 0,
                    color: clear,
                },
            }),
            line: None,
            textposition: None,
            textfont: None,
        }
    }

    /// Append a labelled point.
    pub fn push_point(&mut self, p: Point, text: Option<String>) {
        self.x.push(Some(p.x));
        self.y.push(Some(p.y));
        if let Some(texts) = &mut self.text {
            texts.push(text);
        }
    }

    /// Append a segment followed by a polyline break.
    pub fn push_segment(&mut self, segment: &Segment) {
        self.x
            .extend([Some(segment.start.x), Some(segment.end.x), None]);
        self.y
            .extend([Some(segment.start.y), Some(segment.end.y), None]);
    }

    /// Number of points, including polyline breaks.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the trace holds no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Page margins in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Margin {
    /// Bottom.
    pub b: u32,
    /// Left.
    pub l: u32,
    /// Right.
    pub r: u32,
    /// Top.
    pub t: u32,
}

/// Axis styling. Grid, zero line and tick labels are always hidden.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Axis {
    /// Grid lines.
    pub showgrid: bool,
    /// Zero line.
    pub zeroline: bool,
    /// Tick labels.
    pub showticklabels: bool,
    /// Disable zooming and panning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixedrange: Option<bool>,
    /// Draw the axis line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,
    /// Axis line width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linewidth: Option<u32>,
    /// Axis line CSS color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
    /// Repeat the axis line on the opposite side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<bool>,
}

impl Axis {
    /// Bare axis: no grid, zero line or tick labels.
    pub fn hidden() -> Self {
        Self {
            showgrid: false,
            zeroline: false,
            showticklabels: false,
            fixedrange: None,
            showline: None,
            linewidth: None,
            linecolor: None,
            mirror: None,
        }
    }

    /// Draw a mirrored axis line of `width` pixels in `color`.
    pub fn with_line(mut self, width: u32, color: Color) -> Self {
        self.showline = Some(true);
        self.linewidth = Some(width);
        self.linecolor = Some(color.to_css());
        self.mirror = Some(true);
        self
    }
}

/// Button of a transport menu.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Button {
    /// Backend method arguments.
    pub args: serde_json::Value,
    /// Caption.
    pub label: String,
    /// Backend method.
    pub method: String,
}

/// Play/pause menu.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct UpdateMenu {
    /// Buttons in display order.
    pub buttons: Vec<Button>,
    /// Highlight the active button.
    pub showactive: bool,
    /// Menu kind.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Slider readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CurrentValue {
    /// Show the current value.
    pub visible: bool,
}

/// Frame slider.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Slider {
    /// Readout.
    pub currentvalue: CurrentValue,
    /// One step per frame.
    pub steps: Vec<Button>,
}

/// Page layout of a figure.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layout {
    /// Always `false`.
    pub showlegend: bool,
    /// Figure width in pixels.
    pub width: f64,
    /// Figure height in pixels.
    pub height: f64,
    /// Page margins.
    pub margin: Margin,
    /// Horizontal axis.
    pub xaxis: Axis,
    /// Vertical axis.
    pub yaxis: Axis,
    /// Transport controls of an animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updatemenus: Option<Vec<UpdateMenu>>,
    /// Frame slider of an animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sliders: Option<Vec<Slider>>,
}

impl Layout {
    /// Margin-less layout of `width × height` pixels with hidden axes.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            showlegend: false,
            width,
            height,
            margin: Margin::default(),
            xaxis: Axis::hidden(),
            yaxis: Axis::hidden(),
            updatemenus: None,
            sliders: None,
        }
    }

    /// Pin both axes, as directed graphs are drawn.
    pub fn fix_range(&mut self) {
        self.xaxis.fixedrange = Some(true);
        self.yaxis.fixedrange = Some(true);
    }

    /// Apply the canvas axis styling, drawing lines only when `awidth > 0`.
    pub fn apply_axes(&mut self, canvas: &CanvasKey) {
        if canvas.awidth > 0 {
            self.xaxis = self.xaxis.clone().with_line(canvas.awidth, canvas.acolor);
            self.yaxis = self.yaxis.clone().with_line(canvas.awidth, canvas.acolor);
        }
    }
}

/// One named time step of an animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    /// Frame index.
    pub name: usize,
    /// Traces of this step.
    pub data: Vec<Trace>,
}

/// Complete backend input.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Figure {
    /// Traces, drawn in order.
    pub data: Vec<Trace>,
    /// Page layout.
    pub layout: Layout,
    /// Animation frames, omitted for static figures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
}

impl Figure {
    /// Compact JSON.
    pub fn to_json(&self) -> GraphreelResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    pub fn to_json_pretty(&self) -> GraphreelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Stable 64-bit digest of the compact JSON form.
    pub fn fingerprint(&self) -> GraphreelResult<u64> {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(self.to_json()?.as_bytes());
        Ok(h.finish())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/trace.rs"]
mod tests;
