use crate::dates::entry_year;
use crate::filter::{in_category_by_year, Category};
use crate::latex::bold_author;
use crate::render::{cleaned, title_or_untitled, RenderContext};
use crate::types::BibEntry;

/// Site-relative URL of an entry's detail page
pub fn detail_url(entry: &BibEntry) -> String {
    format!("publications/{}/", entry.id)
}

/// The publications page: journal articles, then preprints (every other entry type),
/// each a numbered list in CV bibliography style and newest first.
pub fn render_publications(entries: &[BibEntry], ctx: &RenderContext<'_>) -> String {
    let (articles, preprints): (Vec<&BibEntry>, Vec<&BibEntry>) =
        in_category_by_year(entries, Category::Publication)
            .into_iter()
            .partition(|e| e.is_article());

    let mut lines: Vec<String> = Vec::new();
    for (heading, section) in [("Journal Articles", articles), ("Preprints", preprints)] {
        if section.is_empty() {
            continue;
        }
        lines.push(format!("## {}\n", heading));
        for (i, entry) in section.iter().enumerate() {
            lines.push(format!("{}. {}\n", i + 1, citation(entry, ctx)));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// One compact citation whose title links to the entry's detail page.
fn citation(entry: &BibEntry, ctx: &RenderContext<'_>) -> String {
    let author = bold_author(&cleaned(entry, "author"), ctx.bold_name);
    let journal = cleaned(entry, "journal");
    let note = cleaned(entry, "note");
    let doi = entry.field("doi");
    let eprint = entry.field("eprint");

    let mut parts = vec![
        format!("{} ({}).", author, entry_year(entry)),
        format!("\u{201c}[{}]({}).\u{201d}", title_or_untitled(entry), detail_url(entry)),
    ];

    if !journal.is_empty() {
        let mut jcite = format!("*{}*", journal);
        let volume = entry.field("volume");
        if !volume.is_empty() {
            jcite.push_str(&format!(", {}", volume));
        }
        let number = cleaned(entry, "number");
        if !number.is_empty() {
            jcite.push_str(&format!("({})", number));
        }
        let pages = cleaned(entry, "pages");
        if !pages.is_empty() {
            jcite.push_str(&format!(", {}", pages));
        }
        jcite.push('.');
        parts.push(jcite);
    } else if !note.is_empty() {
        parts.push(format!("*{}.*", note));
    }

    if !doi.is_empty() {
        parts.push(format!("DOI: [{}](https://doi.org/{}).", doi, doi));
    }
    if !eprint.is_empty() && entry.eprint_type() == "researchsquare" {
        parts.push(format!(
            "ResearchSquare: [{}](https://www.researchsquare.com/article/{}).",
            eprint, eprint
        ));
    }

    parts.join(" ")
}
