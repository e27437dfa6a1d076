use super::*;
use crate::foundation::core::Color;

fn chain(n: usize) -> Graph {
    let mut g = Graph::undirected();
    for i in 0..n {
        g.set_node_attr(format!("n{i}"), "pos", json!([i as f64 / 10.0, 0.5]));
    }
    g
}

fn transparent_node_traces(frame: &Frame) -> usize {
    let clear = Color::TRANSPARENT.to_css();
    frame
        .data
        .iter()
        .filter(|t| t.marker.as_ref().is_some_and(|m| m.color == clear && m.size > 0))
        .count()
}

#[test]
fn fewer_than_two_recs_is_structural() {
    assert!(matches!(
        Animation::new().play(),
        Err(GraphreelError::Structural(_))
    ));
    let mut anim = Animation::new();
    anim.rec(&chain(2));
    assert_eq!(anim.len(), 1);
    assert!(matches!(anim.play(), Err(GraphreelError::Structural(_))));
}

#[test]
fn zero_sizes_are_rejected() {
    assert!(matches!(
        Animation::with_size(Some(0), None),
        Err(GraphreelError::InvalidRange(_))
    ));
    assert!(matches!(
        Animation::with_size(None, Some(0)),
        Err(GraphreelError::InvalidRange(_))
    ));
}

#[test]
fn growing_graphs_keep_frame_cardinality() {
    let mut anim = Animation::new();
    for n in [5, 5, 7] {
        anim.rec(&chain(n));
    }
    let out = anim.play().unwrap();
    let frames = &out.figure.frames;
    assert_eq!(frames.len(), 3);
    for frame in frames {
        // 7 nodes, edge labels, bounds
        assert_eq!(frame.data.len(), 9);
    }
    assert_eq!(transparent_node_traces(&frames[0]), 2);
    assert_eq!(transparent_node_traces(&frames[1]), 2);
    assert_eq!(transparent_node_traces(&frames[2]), 0);
}

#[test]
fn recording_copies_the_graph() {
    let mut g = chain(2);
    let mut anim = Animation::new();
    anim.rec(&g);
    g.set_node_attr("n0", "pos", json!([0.9, 0.9]));
    anim.rec(&g);

    let out = anim.play().unwrap();
    let first = &out.figure.frames[0].data[0];
    assert_eq!(first.x, vec![Some(0.0)]);
    let second = &out.figure.frames[1].data[0];
    assert_eq!(second.x, vec![Some(0.9)]);
}

#[test]
fn layout_carries_transport_controls() {
    let mut anim = Animation::new();
    anim.rec(&chain(2));
    anim.rec(&chain(2));
    let out = anim.play().unwrap();

    assert_eq!(out.figure.data, out.figure.frames[0].data);
    let json = serde_json::to_value(&out.figure).unwrap();
    let layout = &json["layout"];
    assert_eq!(layout["width"], 1.05 * 800.0 + 72.0);
    assert_eq!(layout["height"], 526.0);
    assert_eq!(layout["updatemenus"][0]["type"], "buttons");
    assert_eq!(layout["updatemenus"][0]["buttons"][0]["label"], "Play");
    assert_eq!(
        layout["updatemenus"][0]["buttons"][1]["args"],
        json!([[null], {"frame": {"redraw": false}, "mode": "immediate"}])
    );
    assert_eq!(layout["sliders"][0]["currentvalue"]["visible"], false);
    assert_eq!(
        layout["sliders"][0]["steps"][1]["args"],
        json!([[1], {"frame": {"redraw": false}, "mode": "immediate"}])
    );
    assert_eq!(json["frames"][1]["name"], 1);
}

#[test]
fn inconsistent_sizes_fall_back_to_the_theme() {
    let mut a = chain(2);
    a.set_attr("width", 500);
    let mut b = chain(2);
    b.set_attr("width", 600);
    b.set_attr("height", 300);
    let mut c = chain(2);
    c.set_attr("height", 300);

    let mut anim = Animation::new();
    anim.rec(&a);
    anim.rec(&b);
    anim.rec(&c);
    let out = anim.play().unwrap();
    // widths disagree: theme default; heights: a has 450, others 300
    assert_eq!(out.figure.layout.width, 1.05 * 800.0 + 72.0);
    assert_eq!(out.figure.layout.height, 450.0 + 76.0);

    let mut anim = Animation::with_size(Some(400), Some(200)).unwrap();
    anim.rec(&a);
    anim.rec(&b);
    let out = anim.play().unwrap();
    assert_eq!(out.figure.layout.width, 1.05 * 400.0 + 72.0);
    assert_eq!(out.figure.layout.height, 276.0);
}

#[test]
fn agreeing_sizes_follow_the_last_snapshot() {
    let mut a = chain(2);
    a.set_attr("width", 500);
    let mut anim = Animation::new();
    anim.rec(&a);
    anim.rec(&a);
    let out = anim.play().unwrap();
    assert_eq!(out.figure.layout.width, 1.05 * 500.0 + 72.0);
}

#[test]
fn mismatched_self_loops_break_cardinality() {
    let mut b = chain(2);
    b.add_edge("n0", "n0");
    let mut c = chain(2);
    c.add_edge("n0", "n1");

    let mut anim = Animation::new();
    anim.rec(&b);
    anim.rec(&c);
    // Same counts, so no union; the self-loop frame has one trace less.
    assert!(matches!(anim.play(), Err(GraphreelError::Structural(_))));
}
