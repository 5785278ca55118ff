use crate::dates::{entry_year, format_date};
use crate::render::{cleaned, title_or_untitled, RenderContext};
use crate::types::BibEntry;

/// Badge shown above the metadata card
fn type_label(entry: &BibEntry) -> &'static str {
    if entry.is_article() {
        "JOURNAL ARTICLES"
    } else {
        "PREPRINTS"
    }
}

fn link_badge(href: &str, class: &str, label: &str) -> String {
    format!(
        r#"<a href="{}" class="pub-link-badge {}" target="_blank" rel="noopener">{}</a>"#,
        href, class, label
    )
}

fn meta_row(lines: &mut Vec<String>, label: &str, value: &str) {
    lines.push(r#"<div class="pub-meta-row">"#.to_string());
    lines.push(format!(r#"<div class="pub-meta-label">{}</div>"#, label));
    lines.push(format!(r#"<div class="pub-meta-value">{}</div>"#, value));
    lines.push("</div>".to_string());
}

/// Journal, volume, issue and pages as HTML, or the note if there is no journal.
fn publication_details(entry: &BibEntry) -> String {
    let journal = cleaned(entry, "journal");
    if journal.is_empty() {
        return cleaned(entry, "note");
    }
    let mut details = format!("<em>{}</em>", journal);
    let volume = entry.field("volume");
    if !volume.is_empty() {
        details.push_str(&format!(", <strong>{}</strong>", volume));
    }
    let number = cleaned(entry, "number");
    if !number.is_empty() {
        details.push_str(&format!("({})", number));
    }
    let pages = cleaned(entry, "pages");
    if !pages.is_empty() {
        details.push_str(&format!(", {}", pages));
    }
    details
}

fn link_badges(entry: &BibEntry, ctx: &RenderContext<'_>) -> Vec<String> {
    let doi = entry.field("doi");
    let eprint = entry.field("eprint");
    let eprint_type = entry.eprint_type();

    let mut badges = Vec::new();
    if !doi.is_empty() {
        badges.push(link_badge(&format!("https://doi.org/{}", doi), "pub-link-doi", "DOI"));
    }
    if let Some(resolved) = ctx.attachment(entry) {
        badges.push(link_badge(&format!("../../{}", resolved), "pub-link-pdf", "PDF"));
    }
    if !eprint.is_empty() {
        match eprint_type.as_str() {
            "researchsquare" => badges.push(link_badge(
                &format!("https://www.researchsquare.com/article/{}", eprint),
                "pub-link-preprint",
                "ResearchSquare",
            )),
            "arxiv" => badges.push(link_badge(
                &format!("https://arxiv.org/abs/{}", eprint),
                "pub-link-preprint",
                "arXiv",
            )),
            _ => {}
        }
    }
    badges
}

/// The `index.qmd` of one publication: front matter, type badge, a metadata card
/// (authors, date, publication details, links) and the abstract.
///
/// The card's HTML is not indented since Pandoc reads indented lines as code.
pub fn render_detail_page(entry: &BibEntry, ctx: &RenderContext<'_>) -> String {
    let title = title_or_untitled(entry);
    let date = entry.field("date");
    let published = if date.is_empty() {
        entry_year(entry).to_string()
    } else {
        format_date(date)
    };
    let details = publication_details(entry);
    let links = link_badges(entry, ctx).join("\n");
    let abstract_text = cleaned(entry, "abstract");

    let mut lines = vec![
        "---".to_string(),
        format!("title: \"{}\"", title.replace('"', "\\\"")),
        "toc: false".to_string(),
        "---".to_string(),
        String::new(),
        format!(r#"<span class="pub-type-badge">{}</span>"#, type_label(entry)),
        String::new(),
        r#"<div class="pub-meta-card">"#.to_string(),
    ];
    meta_row(&mut lines, "AUTHORS", &cleaned(entry, "author"));
    meta_row(&mut lines, "PUBLISHED", &published);
    if !details.is_empty() {
        meta_row(&mut lines, "PUBLICATION DETAILS", &details);
    }
    if !links.is_empty() {
        meta_row(&mut lines, "LINKS", &links);
    }
    lines.push("</div>".to_string());
    lines.push(String::new());

    if !abstract_text.is_empty() {
        lines.push(abstract_text);
        lines.push(String::new());
    }
    lines.join("\n")
}
