use super::*;
use serde_json::json;

fn graph_with_node(attrs: serde_json::Value) -> Graph {
    let mut g = Graph::undirected();
    let node = g.add_node("n");
    node.insert("pos".to_string(), json!([0.5, 0.5]));
    if let serde_json::Value::Object(map) = attrs {
        node.extend(map);
    }
    g
}

fn node_key_err(attrs: serde_json::Value) -> GraphreelError {
    let g = graph_with_node(attrs);
    let theme = Theme::default();
    RenderableGraph::new(&g, &theme).node_key("n").unwrap_err()
}

#[test]
fn defaults_apply_when_attributes_are_absent() {
    let g = graph_with_node(json!({}));
    let theme = Theme::default();
    let r = RenderableGraph::new(&g, &theme);

    let key = r.node_key("n").unwrap();
    assert_eq!(key.size, 20);
    assert_eq!(key.style, NodeStyle::Circle);
    assert_eq!(key.color, Color::WHITE);
    assert_eq!(key.bwidth, 1);
    assert_eq!(key.labpos, LabelPos::CENTERED);

    let canvas = r.canvas_key().unwrap();
    assert_eq!((canvas.width, canvas.height), (800, 450));
    assert_eq!(canvas.padded_width(), 800);
}

#[test]
fn pos_errors_follow_the_taxonomy() {
    let theme = Theme::default();

    let mut g = Graph::undirected();
    g.add_node("n");
    let r = RenderableGraph::new(&g, &theme);
    assert!(matches!(r.node_pos("n"), Err(GraphreelError::Structural(_))));

    for (pos, expect_type) in [
        (json!("0.5"), true),
        (json!([0.5]), false),
        (json!([0.5, "a"]), true),
        (json!([0.5, 1.5]), false),
        (json!([-0.1, 0.5]), false),
    ] {
        let mut g = Graph::undirected();
        g.set_node_attr("n", "pos", pos.clone());
        let r = RenderableGraph::new(&g, &theme);
        let err = r.node_pos("n").unwrap_err();
        if expect_type {
            assert!(matches!(err, GraphreelError::InvalidType(_)), "{pos}");
        } else {
            assert!(matches!(err, GraphreelError::InvalidRange(_)), "{pos}");
        }
    }
}

#[test]
fn integer_pos_components_are_accepted() {
    let mut g = Graph::undirected();
    g.set_node_attr("n", "pos", json!([0, 1]));
    let theme = Theme::default();
    let p = RenderableGraph::new(&g, &theme).node_pos("n").unwrap();
    assert_eq!(p, Point::new(0.0, 1.0));
}

#[test]
fn node_attribute_type_errors() {
    assert!(matches!(node_key_err(json!({"size": 1.5})), GraphreelError::InvalidType(_)));
    assert!(matches!(node_key_err(json!({"style": 3})), GraphreelError::InvalidType(_)));
    assert!(matches!(node_key_err(json!({"color": "red"})), GraphreelError::InvalidType(_)));
    assert!(matches!(node_key_err(json!({"color": [1, 2, 3.5]})), GraphreelError::InvalidType(_)));
    assert!(matches!(node_key_err(json!({"bwidth": "1"})), GraphreelError::InvalidType(_)));
    assert!(matches!(node_key_err(json!({"labpos": 1})), GraphreelError::InvalidType(_)));
}

#[test]
fn node_attribute_range_errors() {
    assert!(matches!(node_key_err(json!({"size": 0})), GraphreelError::InvalidRange(_)));
    assert!(matches!(node_key_err(json!({"style": "blob"})), GraphreelError::InvalidRange(_)));
    assert!(matches!(node_key_err(json!({"color": [1, 2]})), GraphreelError::InvalidRange(_)));
    assert!(matches!(node_key_err(json!({"color": [1, 2, 256]})), GraphreelError::InvalidRange(_)));
    assert!(matches!(node_key_err(json!({"bcolor": [1, 2, 3, 0.5]})), GraphreelError::InvalidRange(_)));
    assert!(matches!(node_key_err(json!({"bwidth": -1})), GraphreelError::InvalidRange(_)));
    assert!(matches!(node_key_err(json!({"labpos": "top"})), GraphreelError::InvalidRange(_)));
}

#[test]
fn node_color_may_carry_alpha() {
    let g = graph_with_node(json!({"color": [10, 20, 30, 0.5]}));
    let theme = Theme::default();
    let key = RenderableGraph::new(&g, &theme).node_key("n").unwrap();
    assert_eq!(key.color, Color::rgba(10, 20, 30, 0.5));
}

#[test]
fn edge_attributes_validate() {
    let theme = Theme::default();
    let edge = |attrs: serde_json::Value| {
        let mut g = Graph::directed();
        g.set_node_attr("a", "size", 12);
        let e = g.add_edge("a", "b");
        if let serde_json::Value::Object(map) = attrs {
            e.extend(map);
        }
        g
    };

    let g = edge(json!({"color": [0, 0, 0, 0.25], "labflip": true, "labfrac": 1}));
    let key = RenderableGraph::new(&g, &theme).edge_key("a", "b").unwrap();
    assert_eq!((key.n_size, key.m_size), (12, 20));
    assert_eq!(key.color, Color::rgba(0, 0, 0, 0.25));
    assert!(key.labflip);
    assert_eq!(key.labfrac, 1.0);

    for (attrs, is_type) in [
        (json!({"width": 0}), false),
        (json!({"width": 1.0}), true),
        (json!({"style": "wavy"}), false),
        (json!({"color": [0, 0, 0, "x"]}), true),
        (json!({"color": [0, 0, 0, 1.5]}), false),
        (json!({"labflip": 1}), true),
        (json!({"labdist": -2}), false),
        (json!({"labfrac": "half"}), true),
        (json!({"labfrac": 1.01}), false),
    ] {
        let g = edge(attrs.clone());
        let err = RenderableGraph::new(&g, &theme).edge_key("a", "b").unwrap_err();
        if is_type {
            assert!(matches!(err, GraphreelError::InvalidType(_)), "{attrs}");
        } else {
            assert!(matches!(err, GraphreelError::InvalidRange(_)), "{attrs}");
        }
    }
}

#[test]
fn canvas_attributes_validate() {
    let theme = Theme::default();
    for (key, value, is_type) in [
        ("width", json!(1.5), true),
        ("width", json!(0), false),
        ("height", json!("450"), true),
        ("height", json!(-3), false),
        ("left", json!(-1), false),
        ("top", json!(2.5), true),
    ] {
        let mut g = Graph::undirected();
        g.set_attr(key, value);
        let err = RenderableGraph::new(&g, &theme).canvas_key().unwrap_err();
        if is_type {
            assert!(matches!(err, GraphreelError::InvalidType(_)), "{key}");
        } else {
            assert!(matches!(err, GraphreelError::InvalidRange(_)), "{key}");
        }
    }

    let mut g = Graph::undirected();
    g.set_attr("left", 10);
    g.set_attr("right", 30);
    g.set_attr("top", 5);
    let canvas = RenderableGraph::new(&g, &theme).canvas_key().unwrap();
    assert_eq!(canvas.padded_width(), 840);
    assert_eq!(canvas.padded_height(), 455);
}

#[test]
fn oversized_padded_canvas_is_rejected() {
    let theme = Theme::default();
    let mut g = Graph::undirected();
    g.set_attr("width", 4_000_000_000u64);
    g.set_attr("left", 1_000_000_000u64);
    let err = RenderableGraph::new(&g, &theme).canvas_key().unwrap_err();
    assert!(matches!(err, GraphreelError::InvalidRange(_)));

    let mut g = Graph::undirected();
    g.set_attr("top", 4_000_000_000u64);
    g.set_attr("bottom", 1_000_000_000u64);
    let err = RenderableGraph::new(&g, &theme).canvas_key().unwrap_err();
    assert!(matches!(err, GraphreelError::InvalidRange(_)));

    let mut g = Graph::undirected();
    g.set_attr("width", u64::from(u32::MAX) - 2);
    g.set_attr("left", 1);
    g.set_attr("right", 1);
    let canvas = RenderableGraph::new(&g, &theme).canvas_key().unwrap();
    assert_eq!(canvas.padded_width(), u32::MAX - 1);
}

#[test]
fn labels_must_be_strings() {
    let g = graph_with_node(json!({"label": "Medici", "extra": 3}));
    let theme = Theme::default();
    let r = RenderableGraph::new(&g, &theme);
    assert_eq!(r.node_label("n").unwrap().as_deref(), Some("Medici"));
    assert!(matches!(r.node_extra("n"), Err(GraphreelError::InvalidType(_))));
}
