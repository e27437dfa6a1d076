use super::*;
use crate::{foundation::core::Color, style::kinds::NodeStyle};

fn key(color: Color, labpos: LabelPos) -> NodeKey {
    NodeKey {
        size: 20,
        style: NodeStyle::Circle,
        color,
        bwidth: 1,
        bcolor: Color::BLACK,
        labpos,
    }
}

#[test]
fn centered_labels_pick_contrasting_text() {
    let p = node_label_placement(&key(Color::rgb(0, 0, 0), LabelPos::CENTERED));
    assert!(p.visible);
    assert_eq!(p.text_color, TextColor::White);

    let p = node_label_placement(&key(Color::WHITE, LabelPos::CENTERED));
    assert_eq!(p.text_color, TextColor::Black);
}

#[test]
fn offset_labels_stay_black() {
    let top = LabelPos::Fixed {
        v: VPos::Top,
        h: HPos::Left,
    };
    let p = node_label_placement(&key(Color::rgb(0, 0, 0), top));
    assert_eq!(p.text_color, TextColor::Black);
    assert_eq!(p.position, top);
}

#[test]
fn hover_labels_are_tooltip_only() {
    let p = node_label_placement(&key(Color::WHITE, LabelPos::Hover));
    assert!(!p.visible);
    assert_eq!(p.position, LabelPos::CENTERED);
}

#[test]
fn extra_labels_mirror_vertically() {
    let fixed = |v, h| LabelPos::Fixed { v, h };
    assert_eq!(
        extra_label_position(fixed(VPos::Bottom, HPos::Right)),
        fixed(VPos::Top, HPos::Right)
    );
    assert_eq!(
        extra_label_position(fixed(VPos::Top, HPos::Left)),
        fixed(VPos::Bottom, HPos::Left)
    );
    assert_eq!(
        extra_label_position(LabelPos::CENTERED),
        fixed(VPos::Top, HPos::Center)
    );
    assert_eq!(
        extra_label_position(LabelPos::Hover),
        fixed(VPos::Top, HPos::Center)
    );
}

#[test]
fn edge_label_sits_on_the_normal() {
    let m = CoordinateMapper::for_surface(800, 450);
    let s = m.surface();
    let p0 = Point::new(0.0, 0.5);
    let p1 = Point::new(1.0, 0.5);

    // Horizontal edge: normal points up, 10 px above the midpoint.
    let a = edge_label_anchor(&m, p0, p1, false, 10, 0.5);
    assert!((a.x - 0.5).abs() < 1e-12);
    assert!(((a.y - 0.5) * s.height - 10.0).abs() < 1e-9);

    let b = edge_label_anchor(&m, p0, p1, true, 10, 0.5);
    assert!(((b.y - 0.5) * s.height + 10.0).abs() < 1e-9);

    let c = edge_label_anchor(&m, p0, p1, false, 0, 0.25);
    assert_eq!(c, Point::new(0.25, 0.5));
}
