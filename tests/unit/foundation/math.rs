use super::*;

#[test]
fn fnv_hash_is_incremental() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"graphreel");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"graph");
    b.write_bytes(b"reel");
    assert_eq!(a.finish(), b.finish());
    assert_eq!(Fnv1a64::new_default().finish(), 0xcbf2_9ce4_8422_2325);
}

#[test]
fn hsv_primaries() {
    let red = rgb_to_hsv([255, 0, 0]);
    assert_eq!(red, Hsv { h: 0.0, s: 1.0, v: 1.0 });

    let grey = rgb_to_hsv([51, 51, 51]);
    assert_eq!(grey.s, 0.0);
    assert_eq!(grey.h, 0.0);

    assert_eq!(hsv_to_rgb(Hsv { h: 1.0 / 3.0, s: 1.0, v: 1.0 }), [0, 255, 0]);
    assert_eq!(hsv_to_rgb(Hsv { h: 2.0 / 3.0, s: 1.0, v: 1.0 }), [0, 0, 255]);
    assert_eq!(hsv_to_rgb(Hsv { h: 0.0, s: 0.0, v: 0.5 }), [128, 128, 128]);
}

#[test]
fn hsv_roundtrip_spot_check() {
    for c in [[12u8, 200, 90], [255, 128, 0], [3, 4, 250], [90, 90, 91]] {
        assert_eq!(hsv_to_rgb(rgb_to_hsv(c)), c);
    }
}

#[test]
fn closeness_is_relative() {
    assert!(is_close(1.0, 1.0 + 1e-12));
    assert!(!is_close(1.0, 1.001));
    assert!(is_close(0.0, 0.0));
}
