use super::*;
use serde_json::json;

fn graph() -> Graph {
    let mut g = Graph::undirected();
    g.set_node_attr("a", "weight", 3);
    g.set_node_attr("b", "weight", "heavy");
    g.set_edge_attr("a", "b", "cost", 1.5);
    g
}

#[test]
fn attributes_are_read_by_name() {
    let g = graph();
    let src = NodeSource::attribute("weight");
    assert_eq!(resolve_node(&g, "a", &src).unwrap(), json!(3));
    assert!(matches!(
        resolve_node(&g, "c", &src),
        Err(GraphreelError::Structural(_))
    ));

    let src = EdgeSource::attribute("cost");
    assert_eq!(resolve_edge(&g, "b", "a", &src).unwrap(), json!(1.5));
}

#[test]
fn mappings_and_functions_dispatch() {
    let g = graph();
    let table = NodeSource::mapping([("a".to_string(), json!(1)), ("b".to_string(), json!(2))]);
    assert_eq!(node_values(&g, &table).unwrap(), vec![json!(1), json!(2)]);

    let f = NodeSource::function(|n| json!(n.len()));
    assert_eq!(resolve_node(&g, "a", &f).unwrap(), json!(1));

    let edges = EdgeSource::mapping([(("b".to_string(), "a".to_string()), json!(7))]);
    assert_eq!(edge_values(&g, &edges).unwrap(), vec![json!(7)]);

    let missing = NodeSource::mapping([("a".to_string(), json!(1))]);
    assert!(matches!(
        node_values(&g, &missing),
        Err(GraphreelError::Structural(_))
    ));
}

#[test]
fn directed_mappings_respect_orientation() {
    let mut g = Graph::directed();
    g.add_edge("a", "b");
    let edges = EdgeSource::mapping([(("b".to_string(), "a".to_string()), json!(7))]);
    assert!(resolve_edge(&g, "a", "b", &edges).is_err());
}

#[test]
fn log_transforms_nest() {
    let g = graph();
    let src = NodeSource::attribute("weight").log(1.0);
    let v = resolve_node(&g, "a", &src).unwrap().as_f64().unwrap();
    assert!((v - 4f64.ln()).abs() < 1e-12);

    let twice = NodeSource::attribute("weight").log(1.0).log(0.0);
    let v = resolve_node(&g, "a", &twice).unwrap().as_f64().unwrap();
    assert!((v - 4f64.ln().ln()).abs() < 1e-12);
}

#[test]
fn log_requires_finite_numeric_input() {
    let g = graph();
    let src = NodeSource::attribute("weight").log(0.0);
    assert!(matches!(
        resolve_node(&g, "b", &src),
        Err(GraphreelError::InvalidType(_))
    ));

    let zero = NodeSource::function(|_| json!(0)).log(0.0);
    assert!(matches!(
        resolve_node(&g, "a", &zero),
        Err(GraphreelError::InvalidRange(_))
    ));
}

#[test]
fn functions_debug_opaquely() {
    let src = NodeSource::function(|_| json!(null)).log(2.0);
    let s = format!("{src:?}");
    assert!(s.contains("Function(..)"));
    assert!(s.contains("shift: 2.0"));
}
