use std::collections::BTreeMap;

/// One entry in a `.bib` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BibEntry {
    /// entry type, lowercased, e.g. “article”
    pub kind: String,
    /// citation key, e.g. “kapu2023forecasting”
    pub id: String,
    /// map of lowercased field names to their raw data, e.g. “year” mapped to “2023”
    pub fields: BTreeMap<String, String>,
}

impl BibEntry {
    /// Generate a new, empty instance of BibEntry. Can also be called through the `Default` implementation.
    pub fn new() -> BibEntry {
        BibEntry {
            kind: String::new(),
            id: String::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Raw data of a field, if the entry has it.
    pub fn get(&self, field_name: &str) -> Option<&str> {
        self.fields.get(field_name).map(String::as_str)
    }

    /// Raw data of a field, or the empty string.
    pub fn field(&self, field_name: &str) -> &str {
        self.get(field_name).unwrap_or("")
    }

    /// Whether the entry is typed `@article`.
    pub fn is_article(&self) -> bool {
        self.kind == "article"
    }

    /// The tags of the comma-separated `keywords` field, trimmed.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.field("keywords").split(',').map(str::trim)
    }

    /// `eprinttype` lowercased, so “arXiv” and “arxiv” compare equal.
    pub fn eprint_type(&self) -> String {
        self.field("eprinttype").to_lowercase()
    }
}

impl Default for BibEntry {
    fn default() -> Self {
        Self::new()
    }
}
