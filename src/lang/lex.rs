use super::number;
use super::token::*;
use super::{Column, Error, IdentifierStore};
use crate::error;

/// Tokenizes one source line into its token byte stream. The caller
/// appends the line terminator token. Identifiers are created in
/// `store` on first use.
pub fn lex(s: &str, store: &mut IdentifierStore) -> Result<Vec<u8>, Error> {
    Lexer {
        full: s,
        code: vec![],
        store,
    }
    .scan()
}

struct Lexer<'a> {
    full: &'a str,
    code: Vec<u8>,
    store: &'a mut IdentifierStore,
}

impl<'a> Lexer<'a> {
    fn scan(mut self) -> Result<Vec<u8>, Error> {
        let mut s = self.full.trim();
        while !s.is_empty() && !s.starts_with("//") {
            s = self.element(s)?.trim_start();
        }
        Ok(self.code)
    }

    fn column(&self, s: &str) -> Column {
        let start = self.full.len() - s.len();
        start..start + 1
    }

    fn element(&mut self, s: &'a str) -> Result<&'a str, Error> {
        let ch = match s.chars().next() {
            Some(ch) => ch,
            None => return Ok(s),
        };
        if ch.is_ascii_digit() {
            return self.number(s);
        }
        if ch == '$' {
            return self.hexadecimal(s);
        }
        if ch == '"' {
            return self.string(s);
        }
        if ch == '\'' {
            return self.remark(s);
        }
        if ch.is_ascii_alphabetic() {
            return self.word(s);
        }
        self.punctuation(s)
    }

    fn number(&mut self, s: &'a str) -> Result<&'a str, Error> {
        let len = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or_else(|| s.len());
        let n = s[..len]
            .parse::<u32>()
            .map_err(|_| error!(Overflow, ..&self.column(s)))?;
        self.code.extend(number::encode_uint(n));
        let rest = s[len..].trim_start();
        // A dot followed by digits becomes a separate decimal-fraction
        // token right behind the integer; there is no float token.
        if let Some(frac) = rest.strip_prefix('.') {
            let flen = frac
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or_else(|| frac.len());
            if flen > 0 {
                self.code.push(TOKEN_DEC as u8);
                let packed = number::encode_fraction(&frac[..flen])
                    .map_err(|e| e.in_column(&self.column(rest)))?;
                self.code.extend(packed);
                return Ok(&frac[flen..]);
            }
        }
        Ok(rest)
    }

    fn hexadecimal(&mut self, s: &'a str) -> Result<&'a str, Error> {
        let t = &s[1..];
        let len = t
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or_else(|| t.len());
        if len == 0 {
            return Err(error!(SyntaxError, ..&self.column(s); "EXPECTED HEX DIGITS"));
        }
        let n = u32::from_str_radix(&t[..len], 16)
            .map_err(|_| error!(Overflow, ..&self.column(s)))?;
        self.code.push(TOKEN_DOLLAR as u8);
        self.code.extend(number::encode_uint(n));
        Ok(&t[len..])
    }

    fn string(&mut self, s: &'a str) -> Result<&'a str, Error> {
        let t = &s[1..];
        let end = t
            .find('"')
            .ok_or_else(|| error!(SyntaxError, ..&self.column(s); "UNTERMINATED STRING"))?;
        self.push_string(&t[..end], s)?;
        Ok(&t[end + 1..])
    }

    fn remark(&mut self, s: &'a str) -> Result<&'a str, Error> {
        self.code.push(TOKEN_REMARK as u8);
        let text = s[1..].trim().replace('"', "");
        if !text.is_empty() {
            self.push_string(&text, s)?;
        }
        Ok("")
    }

    fn push_string(&mut self, text: &str, s: &str) -> Result<(), Error> {
        if text.len() > 255 {
            return Err(error!(StringTooLong, ..&self.column(s)));
        }
        self.code.push(TOKEN_STR as u8);
        self.code.push(text.len() as u8);
        self.code.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn word(&mut self, s: &'a str) -> Result<&'a str, Error> {
        let mut len = s
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or_else(|| s.len());
        if s[len..].starts_with('$') {
            len += 1;
        }
        if s[len..].starts_with('(') {
            len += 1;
        }
        let name = &s[..len];
        match Token::from_name(name) {
            Some(token) => self.keyword(&token, s)?,
            None => {
                let pointer = match self.store.get(name) {
                    Some(pointer) => pointer,
                    None => self
                        .store
                        .add(name)
                        .map_err(|e| e.in_column(&self.column(s)))?,
                };
                self.code.push((pointer >> 8) as u8);
                self.code.push((pointer & 0xFF) as u8);
            }
        }
        Ok(&s[len..])
    }

    fn keyword(&mut self, token: &Token, s: &str) -> Result<(), Error> {
        let id = token.id();
        match id >> 8 {
            0 => {}
            1 => self.code.push(TOKEN_SH1 as u8),
            2 => self.code.push(TOKEN_SH2 as u8),
            _ => return Err(error!(InternalError, ..&self.column(s))),
        }
        self.code.push((id & 0xFF) as u8);
        Ok(())
    }

    fn punctuation(&mut self, s: &'a str) -> Result<&'a str, Error> {
        // Two-character tokens match ahead of one-character tokens.
        if s.len() >= 2 && s.is_char_boundary(2) {
            if let Some(token) = Token::from_name(&s[..2]) {
                self.keyword(&token, s)?;
                return Ok(&s[2..]);
            }
        }
        let ch_len = match s.chars().next() {
            Some(ch) => ch.len_utf8(),
            None => return Ok(s),
        };
        match Token::from_name(&s[..ch_len]) {
            Some(token) => {
                self.keyword(&token, s)?;
                Ok(&s[ch_len..])
            }
            None => Err(error!(SyntaxError, ..&self.column(s); "UNEXPECTED CHARACTER")),
        }
    }
}
