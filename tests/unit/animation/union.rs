use super::*;
use serde_json::json;

fn chain(n: usize) -> Graph {
    let mut g = Graph::undirected();
    for i in 0..n {
        g.set_node_attr(format!("n{i}"), "pos", json!([i as f64 / 10.0, 0.5]));
        if i > 0 {
            g.add_edge(format!("n{}", i - 1), format!("n{i}"));
        }
    }
    g
}

#[test]
fn equal_counts_need_no_union() {
    let recs = [chain(3), chain(3)];
    let b = FrameUnionBuilder::new(&recs);
    assert!(!b.needs_union());
    assert!(b.build().unwrap().is_none());
}

#[test]
fn differing_counts_build_the_union() {
    let recs = [chain(5), chain(5), chain(7)];
    let b = FrameUnionBuilder::new(&recs);
    assert!(b.needs_union());
    let union = b.build().unwrap().unwrap();
    assert_eq!(union.number_of_nodes(), 7);
    assert_eq!(union.number_of_edges(), 6);
}

#[test]
fn edge_count_alone_triggers_the_union() {
    let mut sparse = Graph::undirected();
    for n in ["n0", "n1", "n2"] {
        sparse.add_node(n);
    }
    let recs = [sparse, chain(3)];
    assert!(FrameUnionBuilder::new(&recs).needs_union());
}

#[test]
fn union_attributes_follow_the_latest_snapshot() {
    let mut early = chain(2);
    early.set_node_attr("n0", "color", json!([1, 1, 1]));
    let mut late = chain(1);
    late.set_node_attr("n0", "color", json!([2, 2, 2]));
    let recs = [early, late];

    let union = FrameUnionBuilder::new(&recs).build().unwrap().unwrap();
    assert_eq!(union.node("n0").unwrap()["color"], json!([2, 2, 2]));
    assert!(union.has_node("n1"));
}

#[test]
fn fold_updates_without_dropping_keys() {
    let mut union = chain(2);
    union.set_node_attr("n0", "label", "keep");
    let mut next = chain(1);
    next.set_node_attr("n0", "pos", json!([0.9, 0.9]));

    FrameUnionBuilder::fold(&mut union, &next);
    let n0 = union.node("n0").unwrap();
    assert_eq!(n0["pos"], json!([0.9, 0.9]));
    assert_eq!(n0["label"], "keep");
    assert_eq!(union.number_of_nodes(), 2);
}
