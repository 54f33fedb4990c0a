use super::*;

#[test]
fn parses_with_and_without_hash() {
    assert_eq!(parse_hex("#ff6b81").unwrap(), Rgb { r: 255, g: 107, b: 129 });
    assert_eq!(parse_hex("34d399").unwrap(), Rgb { r: 52, g: 211, b: 153 });
}

#[test]
fn rejects_malformed_hex() {
    assert!(parse_hex("#fff").is_err());
    assert!(parse_hex("#gggggg").is_err());
    assert!(parse_hex("").is_err());
    assert!(parse_hex("#ff6b811").is_err());
}

#[test]
fn format_round_trips() {
    let rgb = parse_hex("#A78BFA").unwrap();
    assert_eq!(format_hex(rgb), "#a78bfa");
}

#[test]
fn average_is_componentwise_mean() {
    let avg = average_colors(["#000000", "#ffffff"]);
    assert_eq!(avg, Rgb { r: 128, g: 128, b: 128 });
}

#[test]
fn average_skips_unparsable_entries() {
    let avg = average_colors(["#102030", "oops", "#304050"]);
    assert_eq!(avg, Rgb { r: 0x20, g: 0x30, b: 0x40 });
}

#[test]
fn average_of_nothing_is_white() {
    assert_eq!(average_colors([]), Rgb { r: 255, g: 255, b: 255 });
    assert_eq!(average_colors(["nope"]), Rgb { r: 255, g: 255, b: 255 });
}

#[test]
fn premultiply_scales_color_by_alpha() {
    assert_eq!(premultiply_rgba8(255, 255, 255, 255), [255, 255, 255, 255]);
    assert_eq!(premultiply_rgba8(255, 0, 255, 0), [0, 0, 0, 0]);
    // (255*128+127)/255 = 128
    assert_eq!(premultiply_rgba8(255, 0, 0, 128), [128, 0, 0, 128]);
}

#[test]
fn unpremultiply_inverts_opaque_and_zero() {
    assert_eq!(unpremultiply_rgba8([64, 128, 192, 255]), [64, 128, 192, 255]);
    assert_eq!(unpremultiply_rgba8([0, 0, 0, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply_rgba8([128, 0, 0, 128]), [255, 0, 0, 128]);
}
