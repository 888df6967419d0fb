use super::Error;
use crate::error;
use std::collections::HashMap;

/// Identifier pointers embed the record offset in 13 bits; the high
/// byte of a pointer must stay below 0x20 in a token stream.
const POINTER_LIMIT: usize = 0x1FFF;

/// Growable symbol table for variable, array and string names.
///
/// Records are laid out consecutively:
/// `[length][default value: 4 zero bytes][control][name bytes]`
/// with the high bit of the last name byte set as terminator. The
/// pointer handed out for a record is its offset plus one. The region
/// starts with a page count byte and renders padded to a whole number
/// of 256-byte pages.
#[derive(Debug)]
pub struct IdentifierStore {
    store: Vec<u8>,
    identifiers: HashMap<String, u16>,
}

impl IdentifierStore {
    pub fn new() -> IdentifierStore {
        IdentifierStore {
            store: vec![0x01],
            identifiers: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.identifiers.get(&name.to_ascii_uppercase()).copied()
    }

    /// Appends a record for `name` and returns its pointer. Type flags
    /// come from the name's trailing `$`, `$(` or `(`. Calling this
    /// with a name already present is an encoder bug and panics; use
    /// `get` first.
    pub fn add(&mut self, name: &str) -> Result<u16, Error> {
        let name = name.to_ascii_uppercase();
        assert!(
            !self.identifiers.contains_key(&name),
            "duplicate identifier {}",
            name
        );
        if name.is_empty() || !name.is_ascii() || name.len() + 6 > 255 {
            return Err(error!(SyntaxError; "BAD IDENTIFIER"));
        }
        let before = self.store.len();
        if before + 1 > POINTER_LIMIT {
            return Err(error!(Overflow; "IDENTIFIER SPACE FULL"));
        }
        let pointer = (before + 1) as u16;
        let is_string = name.ends_with('$') || name.ends_with("$(");
        let is_array = name.ends_with('(');
        self.store.push((name.len() + 6) as u8);
        self.store.extend_from_slice(&[0, 0, 0, 0]);
        let mut control = if is_string { 0x80 } else { 0x00 };
        if is_array {
            control |= 0x10;
        }
        self.store.push(control);
        self.store.extend_from_slice(name.as_bytes());
        if let Some(last) = self.store.last_mut() {
            *last |= 0x80;
        }
        let after = self.store.len();
        // Wire compatibility requires this exact bit test even though
        // pages are 256 bytes wide.
        if before & 0x80 == 0 && after & 0x80 != 0 {
            self.store[0] += 1;
        }
        self.identifiers.insert(name, pointer);
        Ok(pointer)
    }

    /// The full padded binary region. Pads with zeros out to the page
    /// count, never truncates.
    pub fn render(&self) -> Vec<u8> {
        let mut render = self.store.clone();
        let size = usize::from(self.store[0]) * 256;
        if render.len() < size {
            render.resize(size, 0);
        }
        render
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get() {
        let mut store = IdentifierStore::new();
        let p = store.add("count").unwrap();
        assert_eq!(p, 2); // record at offset 1
        assert_eq!(store.get("COUNT"), Some(2));
        assert_eq!(store.get("Count"), Some(2));
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn test_record_layout() {
        let mut store = IdentifierStore::new();
        let p = store.add("ab$").unwrap();
        let region = store.render();
        assert_eq!(region.len(), 256);
        let record = usize::from(p) - 1;
        assert_eq!(region[record], 9); // 6 + name length
        assert_eq!(&region[record + 1..record + 5], &[0, 0, 0, 0]);
        assert_eq!(region[record + 5], 0x80); // string flag
        assert_eq!(&region[record + 6..record + 8], b"AB");
        assert_eq!(region[record + 8], b'$' | 0x80);
    }

    #[test]
    fn test_type_flags() {
        let mut store = IdentifierStore::new();
        let flags = |store: &IdentifierStore, p: u16| store.render()[usize::from(p) - 1 + 5];
        let p = store.add("n").unwrap();
        assert_eq!(flags(&store, p), 0x00);
        let p = store.add("a$").unwrap();
        assert_eq!(flags(&store, p), 0x80);
        let p = store.add("m(").unwrap();
        assert_eq!(flags(&store, p), 0x10);
        let p = store.add("s$(").unwrap();
        assert_eq!(flags(&store, p), 0x90);
    }

    #[test]
    fn test_render_round_trip() {
        let mut store = IdentifierStore::new();
        let p = store.add("score").unwrap();
        let region = store.render();
        let mut pos = usize::from(p) - 1 + 6;
        let mut name = String::new();
        loop {
            name.push(char::from(region[pos] & 0x7F));
            if region[pos] & 0x80 != 0 {
                break;
            }
            pos += 1;
        }
        assert_eq!(name, "SCORE");
    }

    #[test]
    fn test_page_bump() {
        let mut store = IdentifierStore::new();
        assert_eq!(store.render().len(), 256);
        // Each record is 6 + 9 = 15 bytes; the ninth crosses offset 0x80.
        for i in 0..10 {
            store.add(&format!("longname{}", i)).unwrap();
        }
        assert_eq!(store.render()[0], 2);
        assert_eq!(store.render().len(), 512);
    }

    #[test]
    #[should_panic(expected = "duplicate identifier")]
    fn test_duplicate() {
        let mut store = IdentifierStore::new();
        store.add("a").unwrap();
        store.add("A").unwrap();
    }
}
