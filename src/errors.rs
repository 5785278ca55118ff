use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors which abort the generation. Malformed `.bib` syntax is not among them,
/// the parser tolerates it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read bibliography '{}': {source}", path.display())]
    ReadBibliography { path: PathBuf, source: io::Error },

    #[error("cannot create directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", path.display())]
    WriteArtifact { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
