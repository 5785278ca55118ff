use crate::filter::{in_category, Category};
use crate::types::BibEntry;

/// Number of entries per kind of research output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResearchCounts {
    pub articles: usize,
    pub preprints: usize,
    pub software: usize,
    pub presentations: usize,
    pub posters: usize,
}

impl ResearchCounts {
    pub fn tally(entries: &[BibEntry]) -> ResearchCounts {
        let publications = in_category(entries, Category::Publication);
        let articles = publications.iter().filter(|e| e.is_article()).count();
        ResearchCounts {
            articles,
            preprints: publications.len() - articles,
            software: in_category(entries, Category::Software).len(),
            presentations: in_category(entries, Category::Presentation).len(),
            posters: in_category(entries, Category::Poster).len(),
        }
    }
}

/// A Markdown table counting the research output.
pub fn render_research_counts(entries: &[BibEntry]) -> String {
    let counts = ResearchCounts::tally(entries);
    [
        "| Type | Count |".to_string(),
        "|---|---|".to_string(),
        format!("| Peer-reviewed journal articles | {} |", counts.articles),
        format!("| Preprints | {} |", counts.preprints),
        format!("| R packages (CRAN / GitHub) | {} |", counts.software),
        format!("| Conference papers presented | {} |", counts.presentations),
        format!("| Poster presentations | {} |", counts.posters),
    ]
    .join("\n")
}
