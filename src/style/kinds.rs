use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{GraphreelError, GraphreelResult};

/// Node marker shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStyle {
    /// Filled circle.
    Circle,
    /// Five-pointed star.
    Star,
    /// Axis-aligned square.
    Square,
    /// Square rotated by 45 degrees.
    Diamond,
    /// Upward-pointing triangle.
    TriangleUp,
    /// Downward-pointing triangle.
    TriangleDown,
}

impl NodeStyle {
    /// Every style, in documentation order.
    pub const ALL: [Self; 6] = [
        Self::Circle,
        Self::Star,
        Self::Square,
        Self::Diamond,
        Self::TriangleUp,
        Self::TriangleDown,
    ];

    /// Marker symbol name for the static trace contract.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Star => "star",
            Self::Square => "square",
            Self::Diamond => "diamond",
            Self::TriangleUp => "triangle-up",
            Self::TriangleDown => "triangle-down",
        }
    }

    /// Shape name for the interactive backend.
    pub fn network_shape(self) -> &'static str {
        match self {
            Self::Circle => "dot",
            Self::Star => "star",
            Self::Square => "square",
            Self::Diamond => "diamond",
            Self::TriangleUp => "triangle",
            Self::TriangleDown => "triangleDown",
        }
    }
}

impl FromStr for NodeStyle {
    type Err = GraphreelError;

    fn from_str(s: &str) -> GraphreelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| {
                GraphreelError::invalid_range(format!(
                    "node style must be one of the following: {}",
                    quoted(Self::ALL.map(Self::as_str))
                ))
            })
    }
}

/// Edge stroke pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Continuous line.
    Solid,
    /// Long dashes.
    Dash,
    /// Dots.
    Dot,
    /// Alternating dashes and dots.
    Dashdot,
}

impl EdgeStyle {
    /// Every style, in documentation order.
    pub const ALL: [Self; 4] = [Self::Solid, Self::Dash, Self::Dot, Self::Dashdot];

    /// Dash name for the static trace contract.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dash => "dash",
            Self::Dot => "dot",
            Self::Dashdot => "dashdot",
        }
    }

    /// Dash pattern in pixels for the interactive backend, `None` for solid lines.
    pub fn dash_pattern(self) -> Option<&'static [u32]> {
        match self {
            Self::Solid => None,
            Self::Dash => Some(&[10, 8]),
            Self::Dot => Some(&[3, 3]),
            Self::Dashdot => Some(&[10, 3, 2, 3]),
        }
    }
}

impl FromStr for EdgeStyle {
    type Err = GraphreelError;

    fn from_str(s: &str) -> GraphreelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| {
                GraphreelError::invalid_range(format!(
                    "edge style must be one of the following: {}",
                    quoted(Self::ALL.map(Self::as_str))
                ))
            })
    }
}

/// Vertical label position relative to the node marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VPos {
    /// Below the marker.
    Bottom,
    /// Level with the marker.
    Middle,
    /// Above the marker.
    Top,
}

/// Horizontal label position relative to the node marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HPos {
    /// Left of the marker.
    Left,
    /// Centered on the marker.
    Center,
    /// Right of the marker.
    Right,
}

impl VPos {
    const ALL: [Self; 3] = [Self::Bottom, Self::Middle, Self::Top];

    fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Middle => "middle",
            Self::Top => "top",
        }
    }
}

impl HPos {
    const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Node label placement: tooltip only, or always visible at a fixed position.
///
/// Written as `"hover"` or `"<vpos> <hpos>"`, e.g. `"top right"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LabelPos {
    /// Label text is attached as tooltip metadata only.
    Hover,
    /// Label text is drawn next to the marker.
    Fixed {
        /// Vertical position.
        v: VPos,
        /// Horizontal position.
        h: HPos,
    },
}

impl LabelPos {
    /// `"middle center"`, the only placement where text sits on top of the marker fill.
    pub const CENTERED: Self = Self::Fixed {
        v: VPos::Middle,
        h: HPos::Center,
    };

    /// Whether the label is tooltip-only.
    pub fn is_hover(self) -> bool {
        matches!(self, Self::Hover)
    }
}

impl fmt::Display for LabelPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hover => f.write_str("hover"),
            Self::Fixed { v, h } => write!(f, "{} {}", v.as_str(), h.as_str()),
        }
    }
}

impl FromStr for LabelPos {
    type Err = GraphreelError;

    fn from_str(s: &str) -> GraphreelResult<Self> {
        if s == "hover" {
            return Ok(Self::Hover);
        }

        let words: Vec<&str> = s.split(' ').collect();
        let [v, h] = words.as_slice() else {
            return Err(GraphreelError::invalid_range(
                "node labpos must be \"hover\" or a vertical position and an horizontal position separated by a space",
            ));
        };
        let v = VPos::ALL
            .into_iter()
            .find(|p| p.as_str() == *v)
            .ok_or_else(|| {
                GraphreelError::invalid_range(format!(
                    "node vertical position must be one of the following: {}",
                    quoted(VPos::ALL.map(VPos::as_str))
                ))
            })?;
        let h = HPos::ALL
            .into_iter()
            .find(|p| p.as_str() == *h)
            .ok_or_else(|| {
                GraphreelError::invalid_range(format!(
                    "node horizontal position must be one of the following: {}",
                    quoted(HPos::ALL.map(HPos::as_str))
                ))
            })?;
        Ok(Self::Fixed { v, h })
    }
}

impl TryFrom<String> for LabelPos {
    type Error = GraphreelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LabelPos> for String {
    fn from(pos: LabelPos) -> Self {
        pos.to_string()
    }
}

fn quoted<const N: usize>(names: [&str; N]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/style/kinds.rs"]
mod tests;
