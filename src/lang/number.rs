use super::Error;
use crate::error;

/// Packs an unsigned integer as base-64 digit bytes, most significant
/// first. Every digit byte is `0x40 | digit`, so the whole run lies in
/// `0x40..0x80` and is self-delimiting in a token stream.
pub fn encode_uint(n: u32) -> Vec<u8> {
    let mut bytes = vec![];
    let mut n = n;
    loop {
        bytes.push(0x40 | (n & 0x3F) as u8);
        n >>= 6;
        if n == 0 {
            break;
        }
    }
    bytes.reverse();
    bytes
}

/// Accumulates consecutive base-64 digit bytes from the front of
/// `bytes`. Returns the value and the number of bytes consumed.
pub fn decode_uint(bytes: &[u8]) -> Result<(u32, usize), Error> {
    let mut v: u32 = 0;
    let mut len = 0;
    for &b in bytes {
        if !(0x40..0x80).contains(&b) {
            break;
        }
        v = v
            .checked_mul(64)
            .and_then(|v| v.checked_add(u32::from(b - 0x40)))
            .ok_or_else(|| error!(Overflow))?;
        len += 1;
    }
    Ok((v, len))
}

/// Packs a decimal digit string as BCD nibble pairs behind a length
/// byte. Nibble 15 pads an odd digit count.
pub fn encode_fraction(digits: &str) -> Result<Vec<u8>, Error> {
    let mut nibbles: Vec<u8> = vec![];
    for ch in digits.chars() {
        match ch.to_digit(10) {
            Some(d) => nibbles.push(d as u8),
            None => return Err(error!(SyntaxError; "BAD FRACTION")),
        }
    }
    if nibbles.len() % 2 != 0 {
        nibbles.push(0xF);
    }
    if nibbles.len() / 2 > 255 {
        return Err(error!(Overflow; "FRACTION TOO LONG"));
    }
    let mut bytes = vec![(nibbles.len() / 2) as u8];
    for pair in nibbles.chunks(2) {
        bytes.push(pair[0] * 16 + pair[1]);
    }
    Ok(bytes)
}

/// Unpacks BCD nibble pairs back to a digit string. A nibble of 15
/// contributes no character.
pub fn decode_fraction(bytes: &[u8]) -> String {
    let mut digits = String::new();
    for &b in bytes {
        for nibble in &[b >> 4, b & 0xF] {
            if *nibble != 0xF {
                digits.push(char::from(b'0' + nibble));
            }
        }
    }
    digits
}
