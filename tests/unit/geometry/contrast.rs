use super::*;

#[test]
fn extremes() {
    assert_eq!(text_color_for(Color::rgb(0, 0, 0)), TextColor::White);
    assert_eq!(text_color_for(Color::rgb(255, 255, 255)), TextColor::Black);
}

#[test]
fn mid_grey_follows_luminance_not_channel_midpoint() {
    // L(128) ≈ 0.2159, (L + 0.05)² ≈ 0.0707
    let l = relative_luminance(Color::rgb(128, 128, 128));
    assert!((l - 0.2159).abs() < 1e-3);
    assert_eq!(text_color_for(Color::rgb(128, 128, 128)), TextColor::Black);

    // Below the 127.5 midpoint, still light enough for black text.
    assert_eq!(text_color_for(Color::rgb(120, 120, 120)), TextColor::Black);
    assert_eq!(text_color_for(Color::rgb(110, 110, 110)), TextColor::White);
}

#[test]
fn channel_weights_matter() {
    assert_eq!(text_color_for(Color::rgb(0, 0, 255)), TextColor::White);
    assert_eq!(text_color_for(Color::rgb(255, 0, 0)), TextColor::Black);
    assert_eq!(text_color_for(Color::rgb(0, 255, 0)), TextColor::Black);
}

#[test]
fn linear_segment_below_knee() {
    assert_eq!(linearize(0), 0.0);
    assert!((linearize(10) - (10.0 / 255.0) / 12.92).abs() < 1e-15);
    assert!((linearize(255) - 1.0).abs() < 1e-12);
}

#[test]
fn alpha_is_ignored_and_results_are_deterministic() {
    let c = Color::rgba(30, 60, 90, 0.0);
    let first = text_color_for(c);
    for _ in 0..8 {
        assert_eq!(text_color_for(c), first);
    }
    assert_eq!(first, text_color_for(Color::rgb(30, 60, 90)));
}
