use std::error;
use std::path::PathBuf;

use bibsite::SiteConfig;

use clap::Parser as CLIParser;
use tracing_subscriber::EnvFilter;

/// Generate the website's publication, software and conference pages from the CV's `.bib` file
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Website project directory
    #[clap(short, long, default_value = ".")]
    project_dir: PathBuf,

    /// Bibliography, relative to the project directory
    #[clap(short, long)]
    bib: Option<PathBuf>,

    /// Author name to highlight in author lists
    #[clap(long)]
    bold_name: Option<String>,

    /// Log every parsed entry
    #[clap(short, long)]
    verbose: bool,

    /// Print the parsed entries as JSON instead of generating pages
    #[cfg(feature = "serde_json")]
    #[clap(long)]
    json: bool,

    /// With --json, return only entries with this ID
    #[cfg(feature = "serde_json")]
    #[clap(short, long)]
    query_id: Option<String>,
}

impl Settings {
    fn site_config(&self) -> SiteConfig {
        let mut config = SiteConfig::new(&self.project_dir);
        if let Some(bib) = &self.bib {
            config.bib_file = bib.clone();
        }
        if let Some(name) = &self.bold_name {
            config.bold_name = name.clone();
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(feature = "serde_json")]
fn print_json(s: &Settings, config: &SiteConfig) -> Result<(), Box<dyn error::Error>> {
    use bibsite::BibEntry;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Entries {
        data: Vec<BibEntry>,
    }

    let data = bibsite::parse_bib(config.bib_path())?
        .into_iter()
        .filter(|entry| match &s.query_id {
            Some(query) => query == &entry.id,
            None => true,
        })
        .collect();

    println!("{}", serde_json::to_string(&Entries { data })?);

    Ok(())
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let settings = Settings::parse();
    init_logging(settings.verbose);
    let config = settings.site_config();

    #[cfg(feature = "serde_json")]
    {
        if settings.json {
            return print_json(&settings, &config);
        }
    }

    let written = bibsite::generate(&config)?;
    tracing::info!("done, {} files regenerated", written.len());

    Ok(())
}
