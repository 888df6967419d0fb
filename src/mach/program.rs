use crate::error;
use crate::lang::{lex, Error, IdentifierStore, TOKEN_END};
use std::collections::HashMap;

/// Scratch variables the runtime expects at fixed slots in the
/// identifier table of every image.
const SCRATCH_IDENTIFIERS: [&str; 5] = ["A", "O", "P", "X", "Y"];

/// Assembles tokenized source lines into one binary program image.
///
/// Owns the identifier store for the whole program and keeps the
/// auto-increment line number. Lines grow monotonically until
/// `render` produces the immutable image.
pub struct Program {
    next_line: u16,
    line_step: u16,
    code: Vec<u8>,
    store: IdentifierStore,
    defines: HashMap<String, String>,
    library_mode: bool,
}

impl Program {
    pub fn new() -> Program {
        let mut store = IdentifierStore::new();
        for name in &SCRATCH_IDENTIFIERS {
            // A fresh store accepts these unconditionally.
            store.add(name).unwrap();
        }
        Program {
            next_line: 100,
            line_step: 10,
            code: vec![],
            store,
            defines: HashMap::new(),
            library_mode: false,
        }
    }

    /// Feeds one raw source line: `#` directives, `#define`
    /// substitution, an optional leading line number, then
    /// tokenization.
    pub fn load_str(&mut self, line: &str) -> Result<(), Error> {
        let s = line.trim();
        if let Some(directive) = s.strip_prefix('#') {
            return self.command(directive);
        }
        let s = self.substitute(s);
        let s = s.trim();
        let len = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or_else(|| s.len());
        if len > 0 {
            let number = s[..len].parse::<u16>().map_err(|_| error!(Overflow))?;
            self.add_line(Some(number), &s[len..])
        } else {
            self.add_line(None, s)
        }
    }

    /// Adds one line. An explicit number becomes the current number;
    /// the running counter continues from it. Lines with no effective
    /// text produce no record.
    pub fn add_line(&mut self, number: Option<u16>, text: &str) -> Result<(), Error> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        if let Some(number) = number {
            self.next_line = number;
        }
        let line_number = if self.library_mode { 0 } else { self.next_line };
        let tokens = lex(text, &mut self.store)
            .map_err(|e| e.in_line_number(Some(line_number)))?;
        if tokens.is_empty() {
            return Ok(());
        }
        let length = tokens.len() + 4;
        if length > 255 {
            return Err(error!(LineBufferOverflow, Some(line_number)));
        }
        self.code.push(length as u8);
        self.code.push((line_number & 0xFF) as u8);
        self.code.push((line_number >> 8) as u8);
        self.code.extend(tokens);
        self.code.push(TOKEN_END as u8);
        self.next_line = self.next_line.wrapping_add(self.line_step);
        Ok(())
    }

    fn command(&mut self, s: &str) -> Result<(), Error> {
        if let Some(rest) = s.strip_prefix("define") {
            return match rest.trim().split_once(' ') {
                Some((name, text)) => {
                    self.defines
                        .insert(name.to_string(), text.trim().to_string());
                    Ok(())
                }
                None => Err(error!(BadDirective; "EXPECTED NAME AND TEXT")),
            };
        }
        match s {
            "library" => {
                self.library_mode = true;
                Ok(())
            }
            "nolibrary" => {
                self.library_mode = false;
                self.next_line = 1000;
                Ok(())
            }
            _ => Err(error!(BadDirective)),
        }
    }

    /// Whole-word `#define` substitution. Words are letter-leading
    /// runs of letters, digits, `.` and `_`, the same shape the lexer
    /// accepts for identifiers.
    fn substitute(&self, s: &str) -> String {
        if self.defines.is_empty() {
            return s.to_string();
        }
        let mut out = String::new();
        let mut rest = s;
        while let Some(ch) = rest.chars().next() {
            if ch.is_ascii_alphabetic() {
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
                    .unwrap_or_else(|| rest.len());
                let word = &rest[..len];
                match self.defines.get(word) {
                    Some(text) => out.push_str(text),
                    None => out.push_str(word),
                }
                rest = &rest[len..];
            } else {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
        out
    }

    /// Post-hoc rewrite that zeroes the line-number field of every
    /// record already added.
    pub fn make_library(&mut self) {
        let mut p = 0;
        while p < self.code.len() {
            self.code[p + 1] = 0;
            self.code[p + 2] = 0;
            p += usize::from(self.code[p]);
        }
    }

    /// The finished image: identifier region, line records, then a
    /// single terminator byte.
    pub fn render(&self) -> Vec<u8> {
        let mut image = self.store.render();
        image.extend_from_slice(&self.code);
        image.push(0x00);
        image
    }
}

impl Default for Program {
    fn default() -> Program {
        Program::new()
    }
}
