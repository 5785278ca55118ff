//! Renderers turning parsed entries into the Markdown/HTML fragments of the site.
//!
//! Every renderer is a pure function of the entries and a [`RenderContext`].
//! Missing optional fields drop the corresponding fragment, they never fail.

pub mod conferences;
pub mod counts;
pub mod detail;
pub mod publications;
pub mod software;

use crate::assets::{self, AssetStore};
use crate::latex::clean_latex;
use crate::types::BibEntry;

/// What the renderers need to know besides the entries themselves.
pub struct RenderContext<'a> {
    /// author name highlighted in author lists
    pub bold_name: &'a str,
    /// site-relative directory holding attached files
    pub asset_dir: &'a str,
    pub assets: &'a dyn AssetStore,
}

impl<'a> RenderContext<'a> {
    /// Site-relative link to the entry's attached file, if it exists.
    pub(crate) fn attachment(&self, entry: &BibEntry) -> Option<String> {
        let file = entry.field("file");
        if file.is_empty() || !self.assets.exists(file) {
            return None;
        }
        Some(assets::resolve_file_path(self.asset_dir, file))
    }
}

/// `clean_latex` of a field, empty if the entry lacks it.
pub(crate) fn cleaned(entry: &BibEntry, field_name: &str) -> String {
    clean_latex(entry.field(field_name))
}

/// `clean_latex` of the title, “Untitled” if the entry lacks one.
pub(crate) fn title_or_untitled(entry: &BibEntry) -> String {
    clean_latex(entry.get("title").unwrap_or("Untitled"))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;

    use super::RenderContext;
    use crate::assets::AssetStore;
    use crate::parser::Parser;
    use crate::types::BibEntry;

    /// Assets known by their relative paths
    #[derive(Default)]
    pub(crate) struct FakeAssets(pub(crate) HashSet<String>);

    impl AssetStore for FakeAssets {
        fn exists(&self, rel_path: &str) -> bool {
            self.0.contains(rel_path)
        }
    }

    impl FakeAssets {
        pub(crate) fn with(paths: &[&str]) -> FakeAssets {
            FakeAssets(paths.iter().map(|p| p.to_string()).collect())
        }

        pub(crate) fn context(&self) -> RenderContext<'_> {
            RenderContext {
                bold_name: "Shrikrishna Bhat Kapu",
                asset_dir: "CV",
                assets: self,
            }
        }
    }

    pub(crate) fn parse(src: &str) -> Vec<BibEntry> {
        Parser::from_string(src.to_string()).iter().collect()
    }
}
