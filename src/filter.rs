use std::fmt;

use crate::dates::entry_year;
use crate::types::BibEntry;

/// Keyword tags a `.bib` entry may carry to be listed on a page,
/// the same tags the CV passes to `\printbibliography[keyword=…]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// journal articles and preprints
    Publication,
    /// R packages
    Software,
    /// papers presented at conferences
    Presentation,
    /// poster presentations
    Poster,
    /// workshops and conferences attended
    Participation,
}

impl Category {
    /// The keyword used in the `.bib` file
    pub fn tag(self) -> &'static str {
        match self {
            Self::Publication => "pub",
            Self::Software => "software",
            Self::Presentation => "present",
            Self::Poster => "poster",
            Self::Participation => "part",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Entries listing `keyword` among their `keywords`, in source order.
pub fn filter_by_keyword<'e>(entries: &'e [BibEntry], keyword: &str) -> Vec<&'e BibEntry> {
    entries
        .iter()
        .filter(|e| e.keywords().any(|k| k == keyword))
        .collect()
}

/// Entries of a category, in source order.
pub fn in_category(entries: &[BibEntry], category: Category) -> Vec<&BibEntry> {
    filter_by_keyword(entries, category.tag())
}

/// Sort newest first. Years compare as strings, so entries without a year go last
/// and entries of the same year keep their relative order.
pub fn sort_by_year_desc(entries: &mut [&BibEntry]) {
    entries.sort_by(|a, b| entry_year(b).cmp(entry_year(a)));
}

/// Entries of a category, newest first.
pub fn in_category_by_year(entries: &[BibEntry], category: Category) -> Vec<&BibEntry> {
    let mut selected = in_category(entries, category);
    sort_by_year_desc(&mut selected);
    selected
}
