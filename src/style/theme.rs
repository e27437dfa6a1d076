use std::path::Path;

use crate::{
    foundation::core::Color,
    foundation::error::{GraphreelError, GraphreelResult},
    style::kinds::{EdgeStyle, LabelPos, NodeStyle},
};

/// Immutable style defaults applied whenever a graph, node or edge omits an attribute.
///
/// A theme is passed explicitly into every render entry point; there is no global state.
/// Missing keys in a JSON theme fall back to [`Theme::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Canvas width in pixels.
    pub graph_width: u32,
    /// Canvas height in pixels.
    pub graph_height: u32,
    /// Padding below the canvas.
    pub graph_bottom: u32,
    /// Padding left of the canvas.
    pub graph_left: u32,
    /// Padding right of the canvas.
    pub graph_right: u32,
    /// Padding above the canvas.
    pub graph_top: u32,
    /// Axis line width; `0` hides the axis lines.
    pub graph_awidth: u32,
    /// Axis line color.
    pub graph_acolor: Color,

    /// Marker diameter in pixels.
    pub node_size: u32,
    /// Marker shape.
    pub node_style: NodeStyle,
    /// Marker fill.
    pub node_color: Color,
    /// Marker border width.
    pub node_bwidth: u32,
    /// Marker border color.
    pub node_bcolor: Color,
    /// Label placement.
    pub node_labpos: LabelPos,

    /// Line width in pixels.
    pub edge_width: u32,
    /// Stroke pattern.
    pub edge_style: EdgeStyle,
    /// Line color.
    pub edge_color: Color,
    /// Put the label on the other side of the edge.
    pub edge_labflip: bool,
    /// Label distance from the edge in pixels.
    pub edge_labdist: u32,
    /// Label position along the edge, `0` at the source and `1` at the target.
    pub edge_labfrac: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            graph_width: 800,
            graph_height: 450,
            graph_bottom: 0,
            graph_left: 0,
            graph_right: 0,
            graph_top: 0,
            graph_awidth: 0,
            graph_acolor: Color::BLACK,

            node_size: 20,
            node_style: NodeStyle::Circle,
            node_color: Color::WHITE,
            node_bwidth: 1,
            node_bcolor: Color::BLACK,
            node_labpos: LabelPos::CENTERED,

            edge_width: 1,
            edge_style: EdgeStyle::Solid,
            edge_color: Color::BLACK,
            edge_labflip: false,
            edge_labdist: 10,
            edge_labfrac: 0.5,
        }
    }
}

impl Theme {
    /// Parse and validate a JSON theme.
    pub fn from_json_str(s: &str) -> GraphreelResult<Self> {
        let theme: Self = serde_json::from_str(s)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Read, parse and validate a JSON theme file.
    pub fn from_path(path: &Path) -> GraphreelResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            GraphreelError::Other(anyhow::Error::new(e).context(format!(
                "read theme '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Apply the same domain rules as per-element attributes.
    pub fn validate(&self) -> GraphreelResult<()> {
        if self.graph_width == 0 {
            return Err(GraphreelError::invalid_range("graph width must be positive"));
        }
        if self.graph_height == 0 {
            return Err(GraphreelError::invalid_range("graph height must be positive"));
        }
        if self.node_size == 0 {
            return Err(GraphreelError::invalid_range("node size must be positive"));
        }
        if self.node_bcolor.a.is_some() {
            return Err(GraphreelError::invalid_range(
                "node bcolor must have exactly three elements",
            ));
        }
        if self.edge_width == 0 {
            return Err(GraphreelError::invalid_range("edge width must be positive"));
        }
        if !(0.0..=1.0).contains(&self.edge_labfrac) {
            return Err(GraphreelError::invalid_range(
                "edge labfrac must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/theme.rs"]
mod tests;
