use super::*;

#[test]
fn parses_six_digit_hex() {
    let c = Rgba8::from_hex("#161716").unwrap();
    assert_eq!(c, Rgba8::rgb(0x16, 0x17, 0x16));
    assert_eq!(c.a, 255);
}

#[test]
fn parses_eight_digit_hex_and_bare_hex() {
    assert_eq!(
        Rgba8::from_hex("32342980").unwrap(),
        Rgba8::rgba(0x32, 0x34, 0x29, 0x80)
    );
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#gggggg").is_err());
    assert!(Rgba8::from_hex("").is_err());
}

#[test]
fn rejects_non_ascii_without_panicking() {
    // Multi-byte characters can land a byte-length check on a non-char
    // boundary; this must be an Err, not a slice panic.
    assert!(Rgba8::from_hex("#aaa\u{20ac}").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
    assert!(serde_json::from_str::<Rgba8>("\"#aaa\u{20ac}\"").is_err());
}

#[test]
fn display_roundtrips_through_from_str() {
    for c in [Rgba8::rgb(1, 2, 3), Rgba8::rgba(9, 8, 7, 100)] {
        let shown = c.to_string();
        assert_eq!(shown.parse::<Rgba8>().unwrap(), c);
    }
    assert_eq!(Rgba8::rgb(0x32, 0x34, 0x29).to_string(), "#323429");
}

#[test]
fn serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgba8::rgb(0x16, 0x17, 0x16)).unwrap();
    assert_eq!(json, "\"#161716\"");
    let back: Rgba8 = serde_json::from_str("\"#323429\"").unwrap();
    assert_eq!(back, Rgba8::rgb(0x32, 0x34, 0x29));
}
