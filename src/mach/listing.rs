use crate::error;
use crate::lang::{
    number, Error, Token, TOKEN_DEC, TOKEN_DOLLAR, TOKEN_END, TOKEN_SH1, TOKEN_SH2, TOKEN_STR,
};

/// Renders a binary program image back to source text, one line per
/// record. Every read is bounds checked; a corrupt or truncated image
/// fails with a decode error instead of fabricating data.
pub fn list(image: &[u8], line_numbers: bool) -> Result<String, Error> {
    Lister {
        bin: image,
        line_numbers,
    }
    .list()
}

/// Character class driving the spacing heuristic: two adjacent
/// fragments get a separating space only when the last emitted
/// character and the next fragment's first character are both
/// identifier-class.
#[derive(Debug, PartialEq, Clone, Copy)]
enum CharClass {
    Ident,
    Other,
}

impl CharClass {
    fn of(ch: char) -> CharClass {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            CharClass::Ident
        } else {
            CharClass::Other
        }
    }
}

struct LineText {
    text: String,
    last: Option<CharClass>,
}

impl LineText {
    fn new() -> LineText {
        LineText {
            text: String::new(),
            last: None,
        }
    }

    fn push(&mut self, fragment: &str) {
        if let (Some(CharClass::Ident), Some(first)) = (self.last, fragment.chars().next()) {
            if CharClass::of(first) == CharClass::Ident {
                self.text.push(' ');
            }
        }
        if let Some(last) = fragment.chars().last() {
            self.last = Some(CharClass::of(last));
        }
        self.text.push_str(fragment);
    }
}

struct Lister<'a> {
    bin: &'a [u8],
    line_numbers: bool,
}

impl<'a> Lister<'a> {
    fn at(&self, i: usize) -> Result<u8, Error> {
        match self.bin.get(i) {
            Some(b) => Ok(*b),
            None => Err(error!(TruncatedImage)),
        }
    }

    fn list(&self) -> Result<String, Error> {
        let mut listing = String::new();
        // The identifier region spans the page count named by its
        // first byte; code records start right after it.
        let mut pos = usize::from(self.at(0)?) << 8;
        while self.at(pos)? != 0 {
            listing.push_str(&self.line(pos)?);
            listing.push('\n');
            pos += usize::from(self.at(pos)?);
        }
        Ok(listing)
    }

    fn line(&self, start: usize) -> Result<String, Error> {
        let mut out = LineText::new();
        if self.line_numbers {
            let number = u16::from(self.at(start + 1)?) + u16::from(self.at(start + 2)?) * 256;
            out.push(&format!("{} ", number));
        }
        let mut p = start + 3;
        while self.at(p)? != TOKEN_END as u8 {
            p = self.element(p, &mut out)?;
        }
        Ok(out.text)
    }

    fn element(&self, p: usize, out: &mut LineText) -> Result<usize, Error> {
        let n = self.at(p)?;
        // Bytes below 0x20 are the high byte of an identifier pointer.
        if n < 0x20 {
            let mut va = (usize::from(n) << 8) + usize::from(self.at(p + 1)?) + 5;
            let mut name = String::new();
            loop {
                let b = self.at(va)?;
                name.push(char::from(b & 0x7F));
                if b & 0x80 != 0 {
                    break;
                }
                va += 1;
            }
            out.push(&name.to_ascii_lowercase());
            return Ok(p + 2);
        }
        if n == TOKEN_STR as u8 {
            let len = usize::from(self.at(p + 1)?);
            let mut s = String::from("\"");
            for i in 0..len {
                s.push(char::from(self.at(p + 2 + i)?));
            }
            s.push('"');
            out.push(&s);
            return Ok(p + 2 + len);
        }
        if n == TOKEN_DEC as u8 {
            let len = usize::from(self.at(p + 1)?);
            if len > 0 {
                self.at(p + 1 + len)?;
            }
            let digits = number::decode_fraction(&self.bin[p + 2..p + 2 + len]);
            out.push(&format!(".{}", digits));
            return Ok(p + 2 + len);
        }
        if (0x40..0x80).contains(&n) {
            let (v, len) = number::decode_uint(&self.bin[p..])?;
            out.push(&v.to_string());
            return Ok(p + len);
        }
        if n == TOKEN_DOLLAR as u8 {
            let (v, len) = number::decode_uint(&self.bin[p + 1..])?;
            out.push(&format!("${:x}", v));
            return Ok(p + 1 + len);
        }
        // Keywords and operators; shift escapes extend the id range of
        // the following byte.
        let mut p = p + 1;
        let mut id = u16::from(n);
        if n == TOKEN_SH1 as u8 {
            id = 0x100 + u16::from(self.at(p)?);
            p += 1;
        } else if n == TOKEN_SH2 as u8 {
            id = 0x200 + u16::from(self.at(p)?);
            p += 1;
        }
        match Token::from_id(id) {
            Some(ref token) if !token.is_filler() => out.push(token.name()),
            // Unassigned or filler slot; render a diagnostic escape
            // rather than dropping the byte.
            _ => out.push(&format!("[{:02x}]", id & 0xFF)),
        }
        Ok(p)
    }
}
