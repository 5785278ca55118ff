use std::path::{Path, PathBuf};

/// Answers whether a file referenced by an entry's `file` field is available.
pub trait AssetStore {
    /// `rel_path` is relative to the asset root, as written in the `.bib` file.
    fn exists(&self, rel_path: &str) -> bool;
}

/// Assets stored below a directory on disk
#[derive(Clone, Debug)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new<P: AsRef<Path>>(root: P) -> DirAssets {
        DirAssets {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl AssetStore for DirAssets {
    fn exists(&self, rel_path: &str) -> bool {
        !rel_path.is_empty() && self.root.join(rel_path).is_file()
    }
}

/// Site-relative link to an attached file, e.g. “CV/certificates/talk.pdf”
/// for `asset_dir` “CV”.
pub fn resolve_file_path(asset_dir: &str, rel_path: &str) -> String {
    format!("{}/{}", asset_dir, rel_path)
}
