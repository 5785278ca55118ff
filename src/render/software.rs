use once_cell::sync::Lazy;
use regex::Regex;

use crate::filter::{in_category_by_year, Category};
use crate::latex::bold_author;
use crate::render::{cleaned, title_or_untitled, RenderContext};
use crate::types::BibEntry;

/// pkgdown sites are served from “https://user.github.io/repo”
static PKGDOWN_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://([^.]+)\.github\.io/([^/]+)").expect("pkgdown pattern is valid"));

/// The software page, one block per package, newest first.
pub fn render_software(entries: &[BibEntry], ctx: &RenderContext<'_>) -> String {
    in_category_by_year(entries, Category::Software)
        .into_iter()
        .map(|e| package_block(e, ctx))
        .collect::<Vec<String>>()
        .join("\n")
}

/// “user/repo” of the GitHub repository behind a pkgdown URL
fn github_repo(url: &str) -> Option<String> {
    PKGDOWN_URL
        .captures(url)
        .map(|caps| format!("{}/{}", &caps[1], &caps[2]))
}

/// Splits “pkg: A Description” into name and description.
fn split_title(title: &str) -> (&str, &str) {
    match title.split_once(':') {
        Some((name, desc)) => (name.trim(), desc.trim()),
        None => (title, ""),
    }
}

fn card(heading: &str, body: &str) -> String {
    format!("::: {{.card}}\n\n### {}\n\n{}\n\n:::", heading, body)
}

fn package_block(entry: &BibEntry, ctx: &RenderContext<'_>) -> String {
    let title = title_or_untitled(entry);
    let (name, desc) = split_title(&title);
    let author = bold_author(&cleaned(entry, "author"), ctx.bold_name);
    let note = cleaned(entry, "note");
    let abstract_text = cleaned(entry, "abstract");
    let doi = entry.field("doi");
    let url = entry.field("url");
    let eprint = entry.field("eprint");
    let eprint_type = entry.eprint_type();
    let on_cran = eprint_type == "cran" && !eprint.is_empty();
    let on_github = eprint_type == "github" && !eprint.is_empty();

    let mut lines: Vec<String> = Vec::new();

    match github_repo(url) {
        Some(repo) => {
            let logo = format!(
                "https://raw.githubusercontent.com/{}/main/man/figures/logo.png",
                repo
            );
            lines.push(r#"<div class="pkg-header">"#.to_string());
            lines.push(format!(
                r#"<img src="{}" alt="{} logo" class="pkg-logo" onerror="this.style.display='none'">"#,
                logo, name
            ));
            lines.push(r#"<div class="pkg-header-text">"#.to_string());
            lines.push(format!("<h2>{}</h2>", name));
            if !desc.is_empty() {
                lines.push(format!("\n**{}**\n", desc));
            }
            lines.push("</div>".to_string());
            lines.push("</div>\n".to_string());
        }
        None => {
            lines.push(format!("## {}\n", name));
            if !desc.is_empty() {
                lines.push(format!("**{}**\n", desc));
            }
        }
    }

    if on_cran {
        let cran = format!("https://cran.r-project.org/package={}", eprint);
        lines.push(r#"<div class="pkg-downloads">"#.to_string());
        lines.push("<strong>Downloads</strong><br>".to_string());
        lines.push(format!(
            r#"<a href="{cran}"><img src="https://cranlogs.r-pkg.org/badges/{pkg}" alt="monthly downloads"></a> <a href="{cran}"><img src="https://cranlogs.r-pkg.org/badges/grand-total/{pkg}" alt="total downloads"></a>"#,
            cran = cran,
            pkg = eprint
        ));
        lines.push("</div>\n".to_string());
    }

    let mut cards = Vec::new();
    if on_cran {
        let body = if note.is_empty() { "Available on CRAN" } else { note.as_str() };
        cards.push(card(
            &format!("[📦 CRAN](https://cran.r-project.org/package={})", eprint),
            body,
        ));
    }
    if on_github {
        cards.push(card(
            &format!("[🐙 GitHub](https://github.com/{})", eprint),
            "Source code repository",
        ));
    }
    if !url.is_empty() {
        cards.push(card(
            &format!("[📖 Documentation]({})", url),
            "Package website & vignettes",
        ));
    }
    if !cards.is_empty() {
        lines.push("::: {.card-grid-2}\n".to_string());
        lines.push(cards.join("\n\n"));
        lines.push("\n:::\n".to_string());
    }

    if doi.is_empty() {
        lines.push(format!("**Authors:** {}\n", author));
    } else {
        lines.push(format!("**Authors:** {}\\", author));
        lines.push(format!("**DOI:** [{}](https://doi.org/{})\n", doi, doi));
    }

    if !abstract_text.is_empty() {
        lines.push(format!("### Description\n\n{}\n", abstract_text));
    }

    if on_cran {
        lines.push(format!(
            "### Installation\n\n```r\ninstall.packages(\"{}\")\n```\n",
            eprint
        ));
    } else if on_github {
        lines.push(format!(
            "### Installation\n\n```r\n# Install from GitHub\n# install.packages(\"devtools\")\ndevtools::install_github(\"{}\")\n```\n",
            eprint
        ));
    }

    lines.push("---\n".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{parse, FakeAssets};

    #[test]
    fn test_github_repo() {
        assert_eq!(
            github_repo("https://skapu.github.io/tsforecast/articles/intro.html"),
            Some("skapu/tsforecast".to_string())
        );
        assert_eq!(github_repo("https://cran.r-project.org/package=x"), None);
        assert_eq!(github_repo(""), None);
    }

    #[test]
    fn test_split_title() {
        assert_eq!(split_title("pkg: A Tool: For Things"), ("pkg", "A Tool: For Things"));
        assert_eq!(split_title("pkg"), ("pkg", ""));
    }

    #[test]
    fn test_cran_package() {
        let assets = FakeAssets::default();
        let entries = parse(
            r#"@software{tsf,
  author = {Shrikrishna Bhat Kapu},
  title = {tsforecast: Forecasting {Time} Series},
  url = {https://skapu.github.io/tsforecast},
  eprint = {tsforecast},
  eprinttype = {CRAN},
  doi = {10.32614/CRAN.package.tsforecast},
  abstract = {Tools for forecasting.},
  year = {2024},
  keywords = {software}
}"#,
        );
        let out = render_software(&entries, &assets.context());
        assert!(out.starts_with("<div class=\"pkg-header\">\n<img src=\"https://raw.githubusercontent.com/skapu/tsforecast/main/man/figures/logo.png\" alt=\"tsforecast logo\""));
        assert!(out.contains("<h2>tsforecast</h2>\n\n**Forecasting Time Series**\n"));
        assert!(out.contains("<img src=\"https://cranlogs.r-pkg.org/badges/grand-total/tsforecast\""));
        assert!(out.contains("### [📦 CRAN](https://cran.r-project.org/package=tsforecast)\n\nAvailable on CRAN"));
        assert!(out.contains("### [📖 Documentation](https://skapu.github.io/tsforecast)"));
        assert!(out.contains("**Authors:** **Shrikrishna Bhat Kapu**\\\n**DOI:** [10.32614/CRAN.package.tsforecast]"));
        assert!(out.contains("### Description\n\nTools for forecasting.\n"));
        assert!(out.contains("install.packages(\"tsforecast\")"));
        assert!(out.ends_with("---\n"));
    }

    #[test]
    fn test_github_only_package() {
        let assets = FakeAssets::default();
        let entries = parse(
            "@software{gh, author = {A. Smith}, title = {ghpkg}, eprint = {asmith/ghpkg}, eprinttype = {github}, keywords = {software}}",
        );
        let out = render_software(&entries, &assets.context());
        assert!(out.starts_with("## ghpkg\n"));
        assert!(out.contains("### [🐙 GitHub](https://github.com/asmith/ghpkg)"));
        assert!(out.contains("devtools::install_github(\"asmith/ghpkg\")"));
        assert!(out.contains("**Authors:** A. Smith\n"));
        assert!(!out.contains("pkg-downloads"));
    }

    #[test]
    fn test_newest_package_first() {
        let assets = FakeAssets::default();
        let entries = parse(
            "@software{old, title = {old}, year = {2020}, keywords = {software}}\n\
             @software{new, title = {new}, year = {2023}, keywords = {software}}",
        );
        let out = render_software(&entries, &assets.context());
        assert!(out.find("## new").unwrap() < out.find("## old").unwrap());
    }
}
