//! Normalized-to-pixel mapping and the aspect-corrected vector primitives every directional
//! offset is built from.
//!
//! Normalized positions live in `[0, 1]²` with `y` growing upwards. The rendering surface loses
//! part of the canvas to its own chrome, so the usable extent of a `W × H` canvas is
//! `(0.9·W − 24) × (0.9·H − 24)`; both renderers use the same extent so they agree visually.

use crate::{
    foundation::core::{Pixel, Point, Size, Vec2},
    graph::renderable::CanvasKey,
};

/// Fraction of the canvas the rendering surface draws into.
pub const SURFACE_SCALE: f64 = 0.9;
/// Pixels the rendering surface insets its plot area by.
pub const SURFACE_INSET: f64 = 24.0;

/// Squared pixel magnitude below which a vector is treated as zero.
const NEAR_ZERO: f64 = 1e-12;

/// Usable drawing extent of a `width × height` canvas.
pub fn surface(width: u32, height: u32) -> Size {
    Size::new(
        SURFACE_SCALE * f64::from(width) - SURFACE_INSET,
        SURFACE_SCALE * f64::from(height) - SURFACE_INSET,
    )
}

/// Rescale the normalized vector `v` so that its pixel length on a `width × height` surface is
/// `size`.
///
/// Vectors with (near) zero pixel length are returned unchanged.
pub fn scale(v: Vec2, width: f64, height: f64, size: f64) -> Vec2 {
    let d2 = (v.x * width).powi(2) + (v.y * height).powi(2);
    if d2 <= NEAR_ZERO {
        return v;
    }
    let s = (size * size / d2).sqrt();
    Vec2::new(s * v.x, s * v.y)
}

/// Rotate the normalized vector `v` by `angle` radians in pixel space and convert it back to
/// normalized units.
pub fn rotate(v: Vec2, width: f64, height: f64, angle: f64) -> Vec2 {
    let dx = v.x * width;
    let dy = v.y * height;
    let (sin, cos) = angle.sin_cos();
    let rx = dx * cos - dy * sin;
    let ry = dx * sin + dy * cos;
    Vec2::new(rx / width, ry / height)
}

/// Maps normalized positions onto one canvas and carries its aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    surface: Size,
    offset: Vec2,
}

impl CoordinateMapper {
    /// Mapper for the interactive surface: unpadded drawable size, shifted by the padding.
    pub fn for_canvas(canvas: &CanvasKey) -> Self {
        let dx = u64::from(canvas.left) + u64::from(canvas.right);
        let dy = u64::from(canvas.bottom) + u64::from(canvas.top);
        Self {
            surface: surface(canvas.width, canvas.height),
            offset: Vec2::new(
                f64::from(canvas.left) - (dx / 2) as f64,
                f64::from(canvas.top) - (dy / 2) as f64,
            ),
        }
    }

    /// Mapper over a full `width × height` surface with no padding shift.
    pub fn for_surface(width: u32, height: u32) -> Self {
        Self {
            surface: surface(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Usable drawing extent in pixels.
    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Width over height of the usable extent.
    pub fn aspect_ratio(&self) -> f64 {
        self.surface.width / self.surface.height
    }

    /// Pixel position of a normalized point, centered on the canvas with `y` growing downwards.
    ///
    /// Coordinates round half to even.
    pub fn to_pixel(&self, p: Point) -> Pixel {
        let x = ((p.x - 0.5) * self.surface.width).round_ties_even() + self.offset.x;
        let y = ((0.5 - p.y) * self.surface.height).round_ties_even() + self.offset.y;
        Pixel {
            x: x as i64,
            y: y as i64,
        }
    }

    /// Aspect-corrected perpendicular of the segment `p0 → p1`.
    pub fn perpendicular(&self, p0: Point, p1: Point) -> Vec2 {
        let ratio = self.aspect_ratio();
        Vec2::new((p0.y - p1.y) / ratio, (p1.x - p0.x) * ratio)
    }

    /// [`scale`] on this mapper's surface.
    pub fn scale(&self, v: Vec2, size: f64) -> Vec2 {
        scale(v, self.surface.width, self.surface.height, size)
    }

    /// [`rotate`] on this mapper's surface.
    pub fn rotate(&self, v: Vec2, angle: f64) -> Vec2 {
        rotate(v, self.surface.width, self.surface.height, angle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mapper.rs"]
mod tests;
