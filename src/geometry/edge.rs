//! Edge line segments, anti-parallel offsets and arrowhead glyphs.
//!
//! All geometry is computed in normalized coordinates; the builder's [`CoordinateMapper`] carries
//! the aspect ratio that keeps pixel lengths and angles correct on a non-square surface.

use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::RenderWarning,
    geometry::label::edge_label_anchor,
    geometry::mapper::CoordinateMapper,
    graph::renderable::EdgeKey,
};

/// Arrowhead scale factor handed to the interactive backend.
pub const EDGE_SCALE: f64 = 0.4;
/// Pixel gap between the two lines of an anti-parallel pair.
pub const EDGE_SPACE: u32 = 5;
/// Maximum arrowhead barb length in pixels.
pub const EDGE_SIZE: f64 = 10.0;
/// Barb angle off the incoming direction, in radians.
pub const EDGE_ANGLE: f64 = 0.3;

/// Straight segment between two normalized points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

/// Drawing primitives for one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
    /// Main line, already shifted by `offset`.
    pub line: Segment,
    /// Perpendicular shift applied to both endpoints; zero unless the edge has a reverse twin.
    pub offset: Vec2,
    /// Arrowhead barbs, empty for undirected graphs.
    pub arrowhead: Vec<Segment>,
    /// Where the edge label is drawn.
    pub label_anchor: Point,
}

impl EdgeGeometry {
    /// Main line followed by the arrowhead barbs.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        std::iter::once(&self.line).chain(self.arrowhead.iter())
    }
}

/// Builds [`EdgeGeometry`] for the edges of one graph on one surface.
#[derive(Clone, Copy, Debug)]
pub struct EdgeGeometryBuilder {
    mapper: CoordinateMapper,
    directed: bool,
}

impl EdgeGeometryBuilder {
    /// Builder for a `width × height` (padded) canvas.
    pub fn new(width: u32, height: u32, directed: bool) -> Self {
        Self {
            mapper: CoordinateMapper::for_surface(width, height),
            directed,
        }
    }

    /// The mapper whose surface the geometry is measured on.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Whether `(n, m)` can be drawn; self-loops are skipped with a warning.
    pub fn accepts(&self, n: &str, m: &str, warnings: &mut Vec<RenderWarning>) -> bool {
        if n == m {
            warnings.push(RenderWarning::self_loop(n));
            return false;
        }
        true
    }

    /// Geometry of the edge from `p0` to `p1`.
    ///
    /// `has_reverse` tells whether the opposite edge also exists; it only matters for directed
    /// graphs, where the pair is drawn as two parallel lines sharing one barb each.
    pub fn build(&self, p0: Point, p1: Point, key: &EdgeKey, has_reverse: bool) -> EdgeGeometry {
        let twin = self.directed && has_reverse;

        let offset = if twin {
            let space = EDGE_SPACE
                .min(key.n_size.saturating_sub(2))
                .min(key.m_size.saturating_sub(2));
            self.mapper
                .scale(self.mapper.perpendicular(p0, p1), f64::from(space) / 2.0)
        } else {
            Vec2::ZERO
        };
        let (p0, p1) = (p0 + offset, p1 + offset);

        let label_anchor =
            edge_label_anchor(&self.mapper, p0, p1, key.labflip, key.labdist, key.labfrac);

        let arrowhead = if self.directed {
            self.arrowhead(p0, p1, key.m_size, twin)
        } else {
            Vec::new()
        };

        EdgeGeometry {
            line: Segment { start: p0, end: p1 },
            offset,
            arrowhead,
            label_anchor,
        }
    }

    fn arrowhead(&self, p0: Point, p1: Point, m_size: u32, twin: bool) -> Vec<Segment> {
        let back = p0 - p1;
        let radius = f64::from(m_size) / 2.0;
        let tip = p1 + self.mapper.scale(back, radius);
        let barb = self.mapper.scale(back, radius.min(EDGE_SIZE).max(1.0));

        let mut angles = vec![-EDGE_ANGLE];
        if !twin {
            angles.push(EDGE_ANGLE);
        }
        angles
            .into_iter()
            .map(|angle| Segment {
                start: tip,
                end: tip + self.mapper.rotate(barb, angle),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/edge.rs"]
mod tests;
