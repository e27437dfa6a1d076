use crate::{
    foundation::core::Point,
    geometry::contrast::{TextColor, text_color_for},
    geometry::mapper::CoordinateMapper,
    graph::renderable::NodeKey,
    style::kinds::{HPos, LabelPos, VPos},
};

/// How a node's primary label is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeLabelPlacement {
    /// Always-visible text; `false` means tooltip-only.
    pub visible: bool,
    /// Text position relative to the marker.
    pub position: LabelPos,
    /// Text color.
    pub text_color: TextColor,
}

/// Label placement for a node drawn with `key`.
///
/// Text only sits on the marker fill at `"middle center"`, so that is the only placement whose
/// color depends on the fill.
pub fn node_label_placement(key: &NodeKey) -> NodeLabelPlacement {
    let text_color = if key.labpos == LabelPos::CENTERED {
        text_color_for(key.color)
    } else {
        TextColor::Black
    };

    match key.labpos {
        LabelPos::Hover => NodeLabelPlacement {
            visible: false,
            position: LabelPos::CENTERED,
            text_color,
        },
        pos @ LabelPos::Fixed { .. } => NodeLabelPlacement {
            visible: true,
            position: pos,
            text_color,
        },
    }
}

/// Position of a node's secondary label: vertically opposite the primary one.
pub fn extra_label_position(labpos: LabelPos) -> LabelPos {
    match labpos {
        LabelPos::Hover => LabelPos::Fixed {
            v: VPos::Top,
            h: HPos::Center,
        },
        LabelPos::Fixed { v, h } => LabelPos::Fixed {
            v: match v {
                VPos::Top => VPos::Bottom,
                VPos::Bottom | VPos::Middle => VPos::Top,
            },
            h,
        },
    }
}

/// Anchor of an edge label: the point at `labfrac` along `p0 → p1`, pushed `labdist` pixels
/// along the edge normal (to the other side when `labflip`).
pub fn edge_label_anchor(
    mapper: &CoordinateMapper,
    p0: Point,
    p1: Point,
    labflip: bool,
    labdist: u32,
    labfrac: f64,
) -> Point {
    let mut normal = mapper.perpendicular(p0, p1);
    if labflip {
        normal = -normal;
    }
    let shift = mapper.scale(normal, f64::from(labdist));
    Point::new(
        p0.x + labfrac * (p1.x - p0.x) + shift.x,
        p0.y + labfrac * (p1.y - p0.y) + shift.y,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/label.rs"]
mod tests;
