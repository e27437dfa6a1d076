//! Graphreel turns annotated graphs into 2D diagram traces and animated frame sequences.
//!
//! A [`Graph`] carries visual attributes on its nodes and edges (positions in the unit square,
//! colors, sizes, label placement). The crate resolves them against a [`Theme`] and emits:
//!
//! - [`draw`]: a static [`Figure`] of batched traces, with edge arrowheads and label anchors
//!   computed in pixel-consistent geometry
//! - [`interact`]: option records for an interactive network view
//! - [`Animation`]: one frame per recorded snapshot, aligned trace by trace over the union of all
//!   snapshots, plus transport controls
//!
//! The [`annotate`] module derives those attributes from data.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod geometry;
mod graph;
mod render;
mod style;

pub mod annotate;

pub use crate::foundation::core::{Color, Pixel, Point, Size, Vec2};
pub use crate::foundation::error::{GraphreelError, GraphreelResult, RenderWarning, WarningKind};

pub use crate::graph::model::{Attrs, Graph, NodeId};
pub use crate::graph::renderable::{CanvasKey, EdgeKey, EdgeStroke, NodeKey, RenderableGraph};
pub use crate::style::kinds::{EdgeStyle, HPos, LabelPos, NodeStyle, VPos};
pub use crate::style::theme::Theme;

pub use crate::geometry::contrast::{
    CONTRAST_THRESHOLD, TextColor, linearize, relative_luminance, text_color_for,
};
pub use crate::geometry::edge::{
    EDGE_ANGLE, EDGE_SCALE, EDGE_SIZE, EDGE_SPACE, EdgeGeometry, EdgeGeometryBuilder, Segment,
};
pub use crate::geometry::label::{
    NodeLabelPlacement, edge_label_anchor, extra_label_position, node_label_placement,
};
pub use crate::geometry::mapper::{
    CoordinateMapper, SURFACE_INSET, SURFACE_SCALE, rotate, scale, surface,
};

pub use crate::render::draw::{Rendered, draw};
pub use crate::render::frame::{FrameData, render_frame};
pub use crate::render::interact::{
    ArrowEnd, Arrows, Dashes, EdgeColor, Network, NetworkEdge, NetworkNode, NodeColor,
    NodeColorState, interact,
};
pub use crate::render::trace::{
    Axis, Button, CurrentValue, Figure, Frame, HoverInfo, Layout, Line, Margin, Marker,
    MarkerLine, Slider, TextFont, Trace, TraceMode, UpdateMenu,
};

pub use crate::animation::player::Animation;
pub use crate::animation::union::FrameUnionBuilder;
