//! # BASIC Tool
//!
//! Converts between BASIC source text and the compact tokenized
//! binary image loaded by the NeoBASIC runtime.
//!
//! Two directions: [`encode_source`] turns source text into a program
//! image, [`decode_image`] renders an image back as a listing. The
//! token table is built once per thread and shared read-only by both.

pub mod lang;
pub mod mach;

use lang::Error;

/// Tokenizes a whole source text into a binary program image.
///
/// With `as_library` the line-number field of every record is forced
/// to zero, marking the output as an unnumbered merge-only module.
pub fn encode_source(source: &str, as_library: bool) -> Result<Vec<u8>, Error> {
    let mut program = mach::Program::new();
    for line in source.lines() {
        program.load_str(line)?;
    }
    if as_library {
        program.make_library();
    }
    Ok(program.render())
}

/// Renders a binary program image back to source text, optionally
/// prefixing each line with its line number.
pub fn decode_image(image: &[u8], line_numbers: bool) -> Result<String, Error> {
    mach::list(image, line_numbers)
}
