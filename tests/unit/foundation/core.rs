use super::*;

#[test]
fn css_notation_follows_alpha() {
    assert_eq!(Color::rgb(1, 2, 3).to_css(), "rgb(1, 2, 3)");
    assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
    assert_eq!(Color::TRANSPARENT.to_css(), "rgba(255, 255, 255, 0)");
}

#[test]
fn json_array_forms_deserialize() {
    let c: Color = serde_json::from_str("[10, 20, 30]").unwrap();
    assert_eq!(c, Color::rgb(10, 20, 30));

    let c: Color = serde_json::from_str("[10, 20, 30, 0.25]").unwrap();
    assert_eq!(c, Color::rgba(10, 20, 30, 0.25));

    assert!(serde_json::from_str::<Color>("[10, 20]").is_err());
    assert!(serde_json::from_str::<Color>("[10, 20, 300]").is_err());
    assert!(serde_json::from_str::<Color>("[10, 20, 30, 2.0]").is_err());
}

#[test]
fn serializes_back_to_arrays() {
    assert_eq!(
        serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap(),
        "[1,2,3]"
    );
    assert_eq!(
        serde_json::to_string(&Color::rgba(1, 2, 3, 0.5)).unwrap(),
        "[1,2,3,0.5]"
    );
}

#[test]
fn alpha_participates_in_equality() {
    assert_ne!(Color::rgb(255, 255, 255), Color::TRANSPARENT);
    assert_eq!(Color::WHITE.with_alpha(0.0), Color::TRANSPARENT);
}
