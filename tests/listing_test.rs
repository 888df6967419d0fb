use bastool::{decode_image, encode_source};

fn round_trip(source: &str) -> String {
    let image = encode_source(source, false).unwrap();
    decode_image(&image, true).unwrap()
}

#[test]
fn test_statement_round_trip() {
    assert_eq!(round_trip("10 print \"HI\""), "10 print\"HI\"\n");
    assert_eq!(round_trip("10 A=5"), "10 a=5\n");
    assert_eq!(round_trip("20 goto 10"), "20 goto 10\n");
}

#[test]
fn test_spacing_heuristic() {
    // A space appears only between two identifier-class characters.
    assert_eq!(round_trip("10 print x"), "10 print x\n");
    assert_eq!(round_trip("10 for i=1 to 10"), "10 for i=1 to 10\n");
    assert_eq!(round_trip("10 print (x)"), "10 print(x)\n");
}

#[test]
fn test_decimal_round_trip() {
    // The fraction token renders right behind the integer, looking
    // like one numeral again.
    assert_eq!(round_trip("10 x=3.14"), "10 x=3.14\n");
    assert_eq!(round_trip("10 x=0.5"), "10 x=0.5\n");
}

#[test]
fn test_hex_round_trip() {
    assert_eq!(round_trip("10 x=$FF"), "10 x=$ff\n");
}

#[test]
fn test_remark_round_trip() {
    assert_eq!(round_trip("10 ' note"), "10 '\"note\"\n");
}

#[test]
fn test_shifted_round_trip() {
    assert_eq!(round_trip("10 y=sin(x)"), "10 y=sin(x)\n");
    assert_eq!(round_trip("10 gosub 500"), "10 gosub 500\n");
}

#[test]
fn test_without_line_numbers() {
    let image = encode_source("10 print \"HI\"", false).unwrap();
    assert_eq!(decode_image(&image, false).unwrap(), "print\"HI\"\n");
}

#[test]
fn test_library_lines_list_as_zero() {
    let image = encode_source("10 print", true).unwrap();
    assert_eq!(decode_image(&image, true).unwrap(), "0 print\n");
}

#[test]
fn test_re_encode_is_stable() {
    let source = "10 for i=1 to 10\n20 print i, i*2\n30 next\n40 x$=\"DONE\"\n50 print x$";
    let image = encode_source(source, false).unwrap();
    let listing = decode_image(&image, true).unwrap();
    let image2 = encode_source(&listing, false).unwrap();
    assert_eq!(image, image2);
}

#[test]
fn test_filler_id_renders_escape() {
    // 0xA1 is the first padding slot of the unary block.
    let mut image = vec![0x01];
    image.resize(256, 0);
    image.extend_from_slice(&[5, 10, 0, 0xA1, 0xC0, 0x00]);
    assert_eq!(decode_image(&image, true).unwrap(), "10 [a1]\n");
}

#[test]
fn test_unassigned_id_renders_escape() {
    // 0xF0 falls in the gap between the major and minor blocks.
    let mut image = vec![0x01];
    image.resize(256, 0);
    image.extend_from_slice(&[5, 10, 0, 0xF0, 0xC0, 0x00]);
    assert_eq!(decode_image(&image, true).unwrap(), "10 [f0]\n");
}

#[test]
fn test_empty_image_fails() {
    assert!(decode_image(&[], true).is_err());
}

#[test]
fn test_truncated_image_fails() {
    let image = encode_source("10 print \"HI\"", false).unwrap();
    for cut in 1..4 {
        let err = decode_image(&image[..image.len() - cut], true).unwrap_err();
        assert_eq!(err.code(), 40);
    }
}

#[test]
fn test_missing_terminator_fails() {
    // A line record that runs past the end of the image.
    let mut image = vec![0x01];
    image.resize(256, 0);
    image.extend_from_slice(&[9, 10, 0, 0xC6]);
    assert!(decode_image(&image, true).is_err());
}
