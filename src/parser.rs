use std::convert::Infallible;
use std::fs;
use std::path;
use std::str;

use once_cell::sync::Lazy;
use regex::{CaptureMatches, Regex};
use tracing::{debug, info};

use crate::errors::{Error, Result};
use crate::lexer::{self, FieldLexer};
use crate::types::BibEntry;

/// Start of an entry up to the comma after its ID, e.g. “@article{kapu2023,”.
static ENTRY_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+)\{\s*([^,\s]+)\s*,").expect("entry pattern is valid"));

/// Parser parsing a `.bib` file allowing iteration over `BibEntry` instances
pub struct Parser {
    pub(crate) src: String,
}

impl Parser {
    /// Use a file at some filepath as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Parser> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| Error::ReadBibliography {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Parser { src })
    }

    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Parser {
        Parser { src: data }
    }

    /// Iterate over the entries in the order their `@type{id,` markers appear.
    pub fn iter(&self) -> BibEntries<'_> {
        BibEntries {
            src: &self.src,
            matches: ENTRY_START.captures_iter(&self.src),
        }
    }
}

impl str::FromStr for Parser {
    type Err = Infallible;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Parser::from_string(data.to_string()))
    }
}

/// Read and parse a whole `.bib` file at once.
pub fn parse_bib<P: AsRef<path::Path>>(path: P) -> Result<Vec<BibEntry>> {
    let path = path.as_ref();
    let parser = Parser::from_file(path)?;
    let entries: Vec<BibEntry> = parser.iter().collect();
    info!("parsed {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// A stateful iterator yielding one BibEntry instance after another.
///
/// Text between entries is ignored. Every marker found starts an entry, and
/// its body extends to the brace balancing the entry's opening brace (or to the
/// end of the source if there is none).
pub struct BibEntries<'i> {
    src: &'i str,
    matches: CaptureMatches<'static, 'i>,
}

impl<'i> Iterator for BibEntries<'i> {
    type Item = BibEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.matches.next()?;
        let start = caps.get(0)?.end();
        let (end, _) = lexer::match_brace(self.src, start);

        let mut entry = BibEntry::new();
        entry.kind.push_str(&caps[1].to_lowercase());
        entry.id.push_str(caps[2].trim());
        for field in FieldLexer::new(&self.src[start..end]) {
            entry.fields.insert(field.name, field.data);
        }
        debug!(
            "read entry {} of type {} with {} fields",
            entry.id,
            entry.kind,
            entry.fields.len()
        );
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::str::FromStr;

    #[test]
    fn test_tolkien() -> std::result::Result<(), Box<dyn error::Error>> {
        let p = Parser::from_str("@book{tolkien1937, author = {J. R. R. Tolkien}}")?;
        let mut count = 0;
        for entry in p.iter() {
            assert_eq!(entry.kind, "book");
            assert_eq!(entry.id, "tolkien1937");
            assert_eq!(entry.get("author"), Some("J. R. R. Tolkien"));
            count += 1;
        }
        assert_eq!(count, 1);
        Ok(())
    }

    #[test]
    fn test_taocp() -> std::result::Result<(), Box<dyn error::Error>> {
        let src = r#"@Book{DBLP:books/lib/Knuth97,
  author    = {Donald Ervin Knuth},
  title     = {The art of computer programming, Volume {I:} Fundamental Algorithms,
               3rd Edition},
  publisher = {Addison-Wesley},
  year      = {1997},
  url       = {https://www.worldcat.org/oclc/312910844},
  isbn      = {0201896834},
  timestamp = {Fri, 17 Jul 2020 16:12:39 +0200},
  biburl    = {https://dblp.org/rec/books/lib/Knuth97.bib},
  bibsource = {{dblp computer science bibliography}, https://dblp.org}
}"#;
        let p = Parser::from_str(src)?;
        let mut iter = p.iter();
        let entry = iter.next().ok_or("no entry")?;
        assert_eq!(entry.kind, "book");
        assert_eq!(entry.id, "DBLP:books/lib/Knuth97");
        assert_eq!(entry.field("year"), "1997");
        assert_eq!(
            entry.field("bibsource"),
            "{dblp computer science bibliography}, https://dblp.org"
        );
        assert!(iter.next().is_none());
        Ok(())
    }

    #[test]
    fn test_deeply_nested_braces() {
        let p = Parser::from_string("@article{deep, title = {On {the {{Nested}} Case}}, year = {2020}}".into());
        let entries: Vec<BibEntry> = p.iter().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field("title"), "On {the {{Nested}} Case}");
        assert_eq!(entries[0].field("year"), "2020");
    }

    #[test]
    fn test_source_order_and_stray_text() {
        let src = "This file is shared with the CV.\n\
                   @MISC{b, year = 2023}\n\
                   stray } text\n\
                   @article{ a ,\n  year = {2020},\n}\n\
                   @misc{b, note = {again}}\n";
        let ids: Vec<String> = Parser::from_string(src.into()).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
        let kinds: Vec<String> = Parser::from_string(src.into()).iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["misc", "article", "misc"]);
    }

    #[test]
    fn test_entry_without_fields() {
        let entries: Vec<BibEntry> = Parser::from_string("@misc{lonely,}".into()).iter().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "lonely");
        assert!(entries[0].fields.is_empty());
    }

    #[test]
    fn test_last_duplicate_field_wins() {
        let entries: Vec<BibEntry> =
            Parser::from_string("@misc{dup, note = {first}, NOTE = {second}}".into()).iter().collect();
        assert_eq!(entries[0].field("note"), "second");
        assert_eq!(entries[0].fields.len(), 1);
    }

    #[test]
    fn test_comment_inside_entry() {
        let src = "@article{c,\n  title = {T},\n  % doi = {10.1/hidden},\n  journal = {J}\n}";
        let entries: Vec<BibEntry> = Parser::from_string(src.into()).iter().collect();
        assert_eq!(entries[0].get("doi"), None);
        assert_eq!(entries[0].field("journal"), "J");
    }

    #[test]
    fn test_missing_file() {
        let err = Parser::from_file("does/not/exist.bib").err();
        assert!(matches!(err, Some(Error::ReadBibliography { .. })));
    }
}
