use bastool::encode_source;

// The identifier region opens with its page count and the runtime's
// five preloaded scratch variables (A O P X Y, 7 bytes each), so the
// first user identifier lands at offset 36 and code starts at 256.
const CODE: usize = 256;

#[test]
fn test_line_record() {
    let image = encode_source("10 A=5", false).unwrap();
    // A is the first scratch record, pointer 2.
    assert_eq!(
        &image[CODE..CODE + 8],
        &[8, 10, 0, 0x00, 0x02, 0x30, 0x45, 0xC0]
    );
    assert_eq!(image[CODE + 8], 0x00);
    assert_eq!(image.len(), CODE + 9);
}

#[test]
fn test_identifier_region() {
    let image = encode_source("10 A=5", false).unwrap();
    assert_eq!(image[0], 1);
    assert_eq!(image[1], 7); // record length of scratch variable A
    assert_eq!(image[6], 0x00); // plain type
    assert_eq!(image[7], b'A' | 0x80);
}

#[test]
fn test_auto_numbering() {
    let image = encode_source("print\nprint", false).unwrap();
    assert_eq!(&image[CODE..CODE + 5], &[5, 100, 0, 0xC6, 0xC0]);
    assert_eq!(&image[CODE + 5..CODE + 10], &[5, 110, 0, 0xC6, 0xC0]);
}

#[test]
fn test_explicit_number_resets_counter() {
    let image = encode_source("50 print\nprint", false).unwrap();
    assert_eq!(image[CODE + 1], 50);
    assert_eq!(image[CODE + 6], 60);
}

#[test]
fn test_library_directive() {
    let source = "#library\n20 print\nprint\n#nolibrary\nprint";
    let image = encode_source(source, false).unwrap();
    // Lines added in library mode get line number 0, explicit numbers
    // included; #nolibrary resumes numbering at 1000.
    assert_eq!(&image[CODE + 1..CODE + 3], &[0, 0]);
    assert_eq!(&image[CODE + 6..CODE + 8], &[0, 0]);
    let n = u16::from(image[CODE + 11]) + u16::from(image[CODE + 12]) * 256;
    assert_eq!(n, 1000);
}

#[test]
fn test_make_library() {
    let image = encode_source("10 print\n20 print", true).unwrap();
    assert_eq!(&image[CODE + 1..CODE + 3], &[0, 0]);
    assert_eq!(&image[CODE + 6..CODE + 8], &[0, 0]);
}

#[test]
fn test_define() {
    let image = encode_source("#define SIZE 32\nprint SIZE", false).unwrap();
    assert_eq!(&image[CODE..CODE + 6], &[6, 100, 0, 0xC6, 0x60, 0xC0]);
}

#[test]
fn test_define_whole_words_only() {
    let image = encode_source("#define N 7\nprint NN", false).unwrap();
    // NN is an identifier, not two substitutions.
    assert_eq!(image[CODE + 4], 0x00);
    assert_ne!(image[CODE + 4..CODE + 6], [0x47, 0x47]);
}

#[test]
fn test_bad_directive() {
    assert!(encode_source("#frobnicate", false).is_err());
    assert!(encode_source("#define LONESOME", false).is_err());
}

#[test]
fn test_blank_lines_skipped() {
    let image = encode_source("\n   \n// note\nprint", false).unwrap();
    assert_eq!(&image[CODE..CODE + 5], &[5, 100, 0, 0xC6, 0xC0]);
    assert_eq!(image.len(), CODE + 6);
}

#[test]
fn test_empty_source() {
    let image = encode_source("", false).unwrap();
    assert_eq!(image.len(), 257);
    assert_eq!(image[256], 0x00);
}

#[test]
fn test_error_carries_line_number() {
    let err = encode_source("10 print\n20 \"oops", false).unwrap_err();
    assert_eq!(err.line_number(), Some(20));
}
