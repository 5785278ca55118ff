use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::assets::{AssetStore, DirAssets};
use crate::errors::{Error, Result};
use crate::filter::{in_category, Category};
use crate::parser::parse_bib;
use crate::render::conferences::{render_conference_list, render_conferences};
use crate::render::counts::render_research_counts;
use crate::render::detail::render_detail_page;
use crate::render::publications::render_publications;
use crate::render::software::render_software;
use crate::render::RenderContext;
use crate::types::BibEntry;

/// Generated include partials are not meant to satisfy markdownlint
const MARKDOWNLINT_DISABLE: &str = "<!-- markdownlint-disable -->\n\n";

/// Where the generator reads from and writes to. Relative paths are
/// resolved against `project_dir`.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub project_dir: PathBuf,
    /// the bibliography shared with the LaTeX CV
    pub bib_file: PathBuf,
    /// directory of the partials pulled in with `{{< include >}}`
    pub includes_dir: PathBuf,
    /// directory receiving one `<key>/index.qmd` per publication
    pub publications_dir: PathBuf,
    /// directory the `file` fields are relative to, also used in links
    pub asset_dir: String,
    /// author highlighted in every author list
    pub bold_name: String,
}

impl SiteConfig {
    pub fn new<P: AsRef<Path>>(project_dir: P) -> SiteConfig {
        SiteConfig {
            project_dir: project_dir.as_ref().to_path_buf(),
            bib_file: PathBuf::from("reference.bib"),
            includes_dir: PathBuf::from("_includes"),
            publications_dir: PathBuf::from("publications"),
            asset_dir: "CVShrikrishnaBhat".to_string(),
            bold_name: "Shrikrishna Bhat Kapu".to_string(),
        }
    }

    pub fn bib_path(&self) -> PathBuf {
        self.project_dir.join(&self.bib_file)
    }

    pub fn asset_root(&self) -> PathBuf {
        self.project_dir.join(&self.asset_dir)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// One generated file, its path relative to the project directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

/// Receives the generated files.
pub trait OutputSink {
    fn write(&mut self, artifact: &Artifact) -> Result<()>;
}

/// Writes artifacts below a directory, creating subdirectories as needed.
#[derive(Clone, Debug)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new<P: AsRef<Path>>(root: P) -> DirSink {
        DirSink {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        let path = self.root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &artifact.contents).map_err(|source| Error::WriteArtifact {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}", artifact.path.display());
        Ok(())
    }
}

/// Render every page fragment of the site. The same entries always give the same
/// artifacts in the same order.
pub fn render_site(entries: &[BibEntry], config: &SiteConfig, assets: &dyn AssetStore) -> Vec<Artifact> {
    let ctx = RenderContext {
        bold_name: &config.bold_name,
        asset_dir: &config.asset_dir,
        assets,
    };

    let includes = [
        ("publications_content.md", render_publications(entries, &ctx)),
        ("software_content.md", render_software(entries, &ctx)),
        ("conferences_content.md", render_conferences(entries, &ctx)),
        ("research_counts.md", render_research_counts(entries)),
        ("pub_conference_list.md", render_conference_list(entries)),
    ];

    let mut artifacts: Vec<Artifact> = includes
        .into_iter()
        .map(|(name, content)| Artifact {
            path: config.includes_dir.join(name),
            contents: format!("{}{}", MARKDOWNLINT_DISABLE, content),
        })
        .collect();

    artifacts.extend(in_category(entries, Category::Publication).into_iter().map(|entry| Artifact {
        path: config.publications_dir.join(&entry.id).join("index.qmd"),
        contents: render_detail_page(entry, &ctx),
    }));
    artifacts
}

/// Parse the bibliography and regenerate every artifact into the project directory.
/// Returns the paths written, relative to the project directory.
pub fn generate(config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let entries = parse_bib(config.bib_path())?;
    let assets = DirAssets::new(config.asset_root());
    let mut sink = DirSink::new(&config.project_dir);
    write_site(&entries, config, &assets, &mut sink)
}

/// Render the site for already parsed entries and hand every artifact to `sink`.
pub fn write_site(
    entries: &[BibEntry],
    config: &SiteConfig,
    assets: &dyn AssetStore,
    sink: &mut dyn OutputSink,
) -> Result<Vec<PathBuf>> {
    let artifacts = render_site(entries, config, assets);
    let detail_pages = artifacts
        .iter()
        .filter(|a| a.path.starts_with(&config.publications_dir))
        .count();
    for artifact in &artifacts {
        sink.write(artifact)?;
    }
    info!("generated {} publication detail pages", detail_pages);
    Ok(artifacts.into_iter().map(|a| a.path).collect())
}
