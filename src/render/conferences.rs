use crate::dates::format_date;
use crate::filter::{in_category_by_year, Category};
use crate::render::{cleaned, RenderContext};
use crate::types::BibEntry;

/// Notes repeating what the section heading already says
const REDUNDANT_NOTES: [&str; 2] = ["participation", "paper presented"];

/// The conferences page: timelines of papers presented, posters and attended
/// events, each newest first. Empty sections are left out.
pub fn render_conferences(entries: &[BibEntry], ctx: &RenderContext<'_>) -> String {
    let sections = [
        (Category::Presentation, "Papers Presented", ":::\n\n---\n"),
        (Category::Poster, "Posters Presented", ":::\n\n---\n"),
        (Category::Participation, "Workshops & Conferences Attended", ":::\n"),
    ];

    let mut lines: Vec<String> = Vec::new();
    for (category, heading, closing) in sections {
        let selected = in_category_by_year(entries, category);
        if selected.is_empty() {
            continue;
        }
        lines.push(format!("## {}\n", heading));
        lines.push("::: {.timeline}\n".to_string());
        lines.extend(selected.into_iter().map(|e| timeline_item(e, ctx)));
        lines.push(closing.to_string());
    }
    lines.join("\n")
}

/// Date and place on the left, title and details on the right.
fn timeline_item(entry: &BibEntry, ctx: &RenderContext<'_>) -> String {
    let title = cleaned(entry, "title");
    let booktitle = cleaned(entry, "booktitle");
    let howpublished = cleaned(entry, "howpublished");
    let address = cleaned(entry, "address");
    let note = cleaned(entry, "note");
    let abstract_text = cleaned(entry, "abstract");

    let mut lines = vec![
        "::: {.timeline-item}".to_string(),
        "::: {.timeline-left}".to_string(),
        format!("[{}]{{.tl-date}}\\", format_date(entry.field("date"))),
    ];
    if !address.is_empty() {
        lines.push(format!("[{}]{{.tl-place}}", address));
    }
    lines.push(":::".to_string());
    lines.push("::: {.timeline-center}".to_string());
    lines.push(":::".to_string());
    lines.push("::: {.timeline-right}".to_string());
    lines.push(format!("### {}", title));

    if !booktitle.is_empty() && booktitle != title {
        lines.push(format!("*{}*", booktitle));
    } else if !howpublished.is_empty() {
        lines.push(format!("*{}*", howpublished));
    }
    if !note.is_empty() && !REDUNDANT_NOTES.contains(&note.to_lowercase().as_str()) {
        lines.push(format!("\n*{}*", note));
    }
    if !abstract_text.is_empty() {
        lines.push(format!("\n{}", abstract_text));
    }
    if let Some(resolved) = ctx.attachment(entry) {
        lines.push(format!("\n[📄 Certificate]({}){{.tl-cert}}", resolved));
    }
    lines.push(":::".to_string());
    lines.push("\n:::\n".to_string());
    lines.join("\n")
}

/// Short numbered lists of presented papers and posters for the publications page.
pub fn render_conference_list(entries: &[BibEntry]) -> String {
    let sections = [
        (Category::Presentation, "Conference Papers Presented", Some("paper presented")),
        (Category::Poster, "Poster Presentations", None),
    ];

    let mut lines: Vec<String> = Vec::new();
    for (category, heading, hidden_note) in sections {
        let selected = in_category_by_year(entries, category);
        if selected.is_empty() {
            continue;
        }
        lines.push(format!("## {}\n", heading));
        for (i, e) in selected.iter().enumerate() {
            let note = cleaned(e, "note");
            let note_str = if note.is_empty() || Some(note.to_lowercase().as_str()) == hidden_note {
                String::new()
            } else {
                format!(" *({})*", note)
            };
            lines.push(format!(
                "{}. **{}**\\\n   *{}*, {}. {}.{}\n",
                i + 1,
                cleaned(e, "title"),
                cleaned(e, "booktitle"),
                cleaned(e, "address"),
                format_date(e.field("date")),
                note_str
            ));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{parse, FakeAssets};

    const BIB: &str = r#"
@inproceedings{talk2023,
  title = {Forecasting Rainfall},
  booktitle = {International Conference on Statistics},
  address = {Mangalore, India},
  date = {2023-12-14/2023-12-16},
  note = {Paper presented},
  file = {certificates/talk2023.pdf},
  keywords = {present}
}
@misc{poster2022,
  title = {Poster on Trends},
  howpublished = {Student Poster Competition},
  date = {2022-05-03},
  note = {Best poster award},
  keywords = {poster}
}
@misc{ws2021,
  title = {R Workshop},
  booktitle = {R Workshop},
  date = {2021-01},
  note = {Participation},
  keywords = {part}
}
@inproceedings{talk2024,
  title = {Newer Talk},
  booktitle = {Conference},
  address = {Online},
  date = {2024-02-05},
  note = {Virtual paper presentation},
  keywords = {present}
}
"#;

    #[test]
    fn test_timeline_sections() {
        let assets = FakeAssets::with(&["certificates/talk2023.pdf"]);
        let out = render_conferences(&parse(BIB), &assets.context());

        let papers = out.find("## Papers Presented\n").unwrap();
        let posters = out.find("## Posters Presented\n").unwrap();
        let attended = out.find("## Workshops & Conferences Attended\n").unwrap();
        assert!(papers < posters && posters < attended);
        assert!(out.find("### Newer Talk").unwrap() < out.find("### Forecasting Rainfall").unwrap());
        assert!(out.ends_with("\n:::\n\n:::\n"));
    }

    #[test]
    fn test_timeline_item() {
        let assets = FakeAssets::with(&["certificates/talk2023.pdf"]);
        let entries = parse(BIB);
        let item = timeline_item(&entries[0], &assets.context());
        let expected = [
            "::: {.timeline-item}",
            "::: {.timeline-left}",
            "[14–16 December 2023]{.tl-date}\\",
            "[Mangalore, India]{.tl-place}",
            ":::",
            "::: {.timeline-center}",
            ":::",
            "::: {.timeline-right}",
            "### Forecasting Rainfall",
            "*International Conference on Statistics*",
            "\n[📄 Certificate](CV/certificates/talk2023.pdf){.tl-cert}",
            ":::",
            "\n:::\n",
        ]
        .join("\n");
        assert_eq!(item, expected);
    }

    #[test]
    fn test_timeline_item_fallbacks() {
        let assets = FakeAssets::default();
        let entries = parse(BIB);
        let poster = timeline_item(&entries[1], &assets.context());
        assert!(poster.contains("### Poster on Trends\n*Student Poster Competition*\n\n*Best poster award*"));
        assert!(!poster.contains("tl-place"));
        let workshop = timeline_item(&entries[2], &assets.context());
        assert!(!workshop.contains("*R Workshop*"));
        assert!(!workshop.contains("Participation"));
        assert!(workshop.contains("[January 2021]{.tl-date}"));
    }

    #[test]
    fn test_missing_certificate_not_linked() {
        let assets = FakeAssets::default();
        let item = timeline_item(&parse(BIB)[0], &assets.context());
        assert!(!item.contains("Certificate"));
    }

    #[test]
    fn test_conference_list() {
        let out = render_conference_list(&parse(BIB));
        let expected = [
            "## Conference Papers Presented\n",
            "1. **Newer Talk**\\\n   *Conference*, Online. 5 February 2024. *(Virtual paper presentation)*\n",
            "2. **Forecasting Rainfall**\\\n   *International Conference on Statistics*, Mangalore, India. 14–16 December 2023.\n",
            "",
            "## Poster Presentations\n",
            "1. **Poster on Trends**\\\n   **, . 3 May 2022. *(Best poster award)*\n",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }
}
