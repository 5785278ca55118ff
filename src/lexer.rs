use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Start of a field assignment, e.g. “author =”.
static FIELD_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s*=\s*").expect("field pattern is valid"));

/// Separators skipped between two fields
const SEPARATORS: &[u8] = b" \t\n\r,";

/// Characters terminating a bare (undelimited) field value
const BARE_TERMINATORS: &[u8] = b",}\n";

/// One field read from an entry body, e.g. name “year” with data “1997”.
/// The name is lowercased and the data is trimmed, but otherwise left verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) name: String,
    pub(crate) data: String,
}

/// Find the curly brace balancing an already consumed `{`.
///
/// `start` is the index right after the opening brace. Returns the index where the
/// enclosed data ends and the index where scanning continues. Nested groups of any
/// depth are tracked by one counter. If the source ends before the group is closed,
/// the data runs to the end of `src` except for its final character.
pub(crate) fn match_brace(src: &str, start: usize) -> (usize, usize) {
    let bytes = src.as_bytes();
    let mut depth = 1usize;
    let mut pos = start;
    while pos < bytes.len() && depth > 0 {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }
    if depth == 0 {
        return (pos - 1, pos);
    }
    let end = src[start..]
        .char_indices()
        .last()
        .map_or(start, |(offset, _)| start + offset);
    (end, pos)
}

/// Iterator over the fields of one entry body, i.e. the text between the comma
/// following the entry ID and the brace closing the entry.
///
/// Lexing never fails. Text that does not start a `name = value` assignment is
/// swallowed one character at a time until the next assignment is found, so a
/// small syntax slip in a hand-maintained file costs at most the broken field.
pub(crate) struct FieldLexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> FieldLexer<'s> {
    pub(crate) fn new(src: &'s str) -> FieldLexer<'s> {
        FieldLexer { src, pos: 0 }
    }

    fn skip_separators(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && SEPARATORS.contains(&bytes[self.pos]) {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) {
        self.pos = match self.src[self.pos..].find('\n') {
            Some(offset) => self.pos + offset,
            None => self.src.len(),
        };
    }

    /// Reads the value starting at `self.pos` and moves past it.
    fn read_data(&mut self) -> &'s str {
        let src = self.src;
        match src.as_bytes()[self.pos] {
            b'{' => {
                let start = self.pos + 1;
                let (end, next) = match_brace(src, start);
                self.pos = next;
                &src[start..end]
            }
            b'"' => {
                let start = self.pos + 1;
                match src[start..].find('"') {
                    Some(offset) => {
                        self.pos = start + offset + 1;
                        &src[start..start + offset]
                    }
                    None => {
                        self.pos = src.len();
                        &src[start..]
                    }
                }
            }
            _ => {
                let start = self.pos;
                let end = src.as_bytes()[start..]
                    .iter()
                    .position(|b| BARE_TERMINATORS.contains(b))
                    .map_or(src.len(), |offset| start + offset);
                self.pos = end;
                &src[start..end]
            }
        }
    }
}

impl<'s> Iterator for FieldLexer<'s> {
    type Item = Field;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_separators();
            let src = self.src;
            let rest = src.get(self.pos..).filter(|r| !r.is_empty())?;

            if rest.starts_with('%') {
                self.skip_comment();
                continue;
            }

            let (name, assignment_len) = match FIELD_START.captures(rest) {
                Some(caps) => (caps[1].to_lowercase(), caps[0].len()),
                None => {
                    let chr = rest.chars().next()?;
                    trace!("swallowing unexpected character {:?} at offset {}", chr, self.pos);
                    self.pos += chr.len_utf8();
                    continue;
                }
            };
            self.pos += assignment_len;
            if self.pos >= self.src.len() {
                trace!("field '{}' has no data", name);
                return None;
            }

            let data = self.read_data().trim().to_string();
            return Some(Field { name, data });
        }
    }
}
