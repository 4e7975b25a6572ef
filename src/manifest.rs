use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{EclipsifyError, Result};
use crate::template::{locate, SearchPath};

/// File name of the manifest looked up on the search path.
pub const MANIFEST_FILE: &str = "files.toml";

/// The ordered list of files a generated project consists of.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileManifest {
    #[serde(default, rename = "file")]
    pub files: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    /// Logical output name, e.g. `.cproject`.
    pub name: String,
    /// Template file searched for on the search path.
    pub template: String,
    /// Output path relative to the output directory. Defaults to `name`.
    pub target: Option<PathBuf>,
    /// A missing template for an optional entry is skipped instead of failing.
    #[serde(default)]
    pub optional: bool,
}

impl ManifestEntry {
    pub fn target(&self) -> PathBuf {
        self.target
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.name))
    }
}

impl FileManifest {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let manifest: FileManifest =
            toml::from_str(content).map_err(|e| EclipsifyError::ManifestParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load the manifest from the first directory on the search path that has one.
    pub fn load(search_path: &SearchPath) -> Result<Self> {
        let dir = locate(search_path, MANIFEST_FILE).ok_or_else(|| {
            EclipsifyError::ManifestNotFound {
                file: MANIFEST_FILE.to_string(),
                searched: search_path.dirs().to_vec(),
            }
        })?;
        let path = dir.join(MANIFEST_FILE);
        debug!(path = %path.display(), "loading manifest");

        let content = std::fs::read_to_string(&path).map_err(|e| EclipsifyError::Io {
            context: format!("reading manifest {}", path.display()),
            source: e,
        })?;
        Self::parse(&content, &path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.files.iter()
    }

    /// Targets must stay inside the output directory, and template names
    /// inside whichever search directory they are looked up in.
    fn validate(&self) -> Result<()> {
        for entry in &self.files {
            if let Some(reason) = relative_path_problem(Path::new(&entry.template)) {
                return Err(EclipsifyError::InvalidTemplate {
                    name: entry.name.clone(),
                    template: entry.template.clone(),
                    reason: reason.to_string(),
                });
            }

            let target = entry.target();
            if let Some(reason) = relative_path_problem(&target) {
                return Err(EclipsifyError::InvalidTarget {
                    name: entry.name.clone(),
                    target,
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn relative_path_problem(path: &Path) -> Option<&'static str> {
    if path.as_os_str().is_empty() {
        return Some("path is empty");
    }
    path.components().find_map(|component| match component {
        Component::Normal(_) | Component::CurDir => None,
        Component::ParentDir => Some("'..' is not allowed"),
        Component::RootDir | Component::Prefix(_) => Some("must be a relative path"),
    })
}

impl<'a> IntoIterator for &'a FileManifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
