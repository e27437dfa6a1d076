use super::*;
use crate::{
    foundation::core::{Color, Pixel},
    graph::renderable::CanvasKey,
    style::kinds::EdgeStyle,
};

fn key(n_size: u32, m_size: u32) -> EdgeKey {
    EdgeKey {
        n_size,
        m_size,
        width: 1,
        style: EdgeStyle::Solid,
        color: Color::BLACK,
        labflip: false,
        labdist: 10,
        labfrac: 0.5,
    }
}

fn pixel_len(b: &EdgeGeometryBuilder, v: Vec2) -> f64 {
    let s = b.mapper().surface();
    ((v.x * s.width).powi(2) + (v.y * s.height).powi(2)).sqrt()
}

#[test]
fn undirected_edge_maps_to_expected_pixels() {
    let b = EdgeGeometryBuilder::new(800, 450, false);
    let g = b.build(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &key(20, 20), false);
    assert_eq!(g.offset, Vec2::ZERO);
    assert!(g.arrowhead.is_empty());

    let canvas = CanvasKey {
        width: 800,
        height: 450,
        bottom: 0,
        left: 0,
        right: 0,
        top: 0,
        awidth: 0,
        acolor: Color::BLACK,
    };
    let m = CoordinateMapper::for_canvas(&canvas);
    assert_eq!(m.to_pixel(g.line.start), Pixel { x: -348, y: 190 });
    assert_eq!(m.to_pixel(g.line.end), Pixel { x: 348, y: -190 });
}

#[test]
fn undirected_reverse_is_ignored() {
    let b = EdgeGeometryBuilder::new(800, 450, false);
    let g = b.build(Point::new(0.2, 0.2), Point::new(0.8, 0.4), &key(20, 20), true);
    assert_eq!(g.offset, Vec2::ZERO);
}

#[test]
fn anti_parallel_offsets_mirror_each_other() {
    let b = EdgeGeometryBuilder::new(800, 450, true);
    let a = Point::new(0.1, 0.3);
    let c = Point::new(0.7, 0.8);
    let forward = b.build(a, c, &key(20, 30), true);
    let backward = b.build(c, a, &key(30, 20), true);

    assert_ne!(forward.offset, Vec2::ZERO);
    assert_eq!(forward.offset, -backward.offset);
    assert!((pixel_len(&b, forward.offset) - 2.5).abs() < 1e-9);
}

#[test]
fn offset_shrinks_with_small_markers() {
    let b = EdgeGeometryBuilder::new(800, 450, true);
    let a = Point::new(0.1, 0.3);
    let c = Point::new(0.7, 0.8);
    let g = b.build(a, c, &key(4, 20), true);
    assert!((pixel_len(&b, g.offset) - 1.0).abs() < 1e-9);

    let g = b.build(a, c, &key(1, 20), true);
    assert!(pixel_len(&b, g.offset) < 1e-9);
}

#[test]
fn arrowhead_is_a_full_v_without_reverse() {
    let b = EdgeGeometryBuilder::new(800, 450, true);
    let p0 = Point::new(0.2, 0.3);
    let p1 = Point::new(0.6, 0.7);
    let g = b.build(p0, p1, &key(20, 20), false);
    assert_eq!(g.arrowhead.len(), 2);
    assert_eq!(g.segments().count(), 3);

    let [left, right] = [g.arrowhead[0], g.arrowhead[1]];
    assert_eq!(left.start, right.start);

    // Tip sits on the target marker's rim.
    assert!((pixel_len(&b, left.start - p1) - 10.0).abs() < 1e-9);

    // Both barbs are equally long and equally far from the incoming direction.
    let s = b.mapper().surface();
    let px = |v: Vec2| Vec2::new(v.x * s.width, v.y * s.height);
    let back = px(p0 - p1).normalize();
    let l = px(left.end - left.start);
    let r = px(right.end - right.start);
    assert!((l.length() - r.length()).abs() < 1e-9);
    assert!((l.length() - 10.0).abs() < 1e-9);
    assert!((back.dot(l) - back.dot(r)).abs() < 1e-9);
    assert!((back.cross(l) + back.cross(r)).abs() < 1e-9);
}

#[test]
fn arrowhead_has_one_barb_with_reverse() {
    let b = EdgeGeometryBuilder::new(800, 450, true);
    let g = b.build(Point::new(0.2, 0.3), Point::new(0.6, 0.7), &key(20, 20), true);
    assert_eq!(g.arrowhead.len(), 1);
}

#[test]
fn barb_length_is_capped_by_radius() {
    let b = EdgeGeometryBuilder::new(800, 450, true);
    let g = b.build(Point::new(0.2, 0.3), Point::new(0.6, 0.7), &key(20, 6), false);
    let barb = g.arrowhead[0].end - g.arrowhead[0].start;
    assert!((pixel_len(&b, barb) - 3.0).abs() < 1e-9);
}

#[test]
fn coincident_nodes_degrade_without_nan() {
    let b = EdgeGeometryBuilder::new(800, 450, true);
    let p = Point::new(0.5, 0.5);
    let g = b.build(p, p, &key(20, 20), true);
    for s in g.segments() {
        assert!(s.start.x.is_finite() && s.start.y.is_finite());
        assert!(s.end.x.is_finite() && s.end.y.is_finite());
    }
    assert!(g.label_anchor.x.is_finite() && g.label_anchor.y.is_finite());
}

#[test]
fn self_loops_are_rejected_with_a_warning() {
    let b = EdgeGeometryBuilder::new(800, 450, true);
    let mut warnings = Vec::new();
    assert!(b.accepts("a", "b", &mut warnings));
    assert!(warnings.is_empty());
    assert!(!b.accepts("a", "a", &mut warnings));
    assert_eq!(warnings.len(), 1);
}
