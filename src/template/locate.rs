use std::path::{Path, PathBuf};

use tracing::trace;

use super::search_path::SearchPath;
use crate::error::{EclipsifyError, Result};

/// Find the first directory on the search path that contains `name` as a file.
///
/// Directories that do not exist simply don't match. Earlier entries always
/// win, regardless of what later entries contain.
pub fn locate<'a>(search_path: &'a SearchPath, name: &str) -> Option<&'a Path> {
    search_path.iter().find(|dir| {
        let hit = dir.join(name).is_file();
        trace!(dir = %dir.display(), name, hit, "checking template directory");
        hit
    })
}

/// Like [`locate`], but turns a miss into [`EclipsifyError::MissingTemplate`]
/// naming the logical output file and every searched directory.
pub fn locate_or_err(
    search_path: &SearchPath,
    logical_name: &str,
    template: &str,
) -> Result<PathBuf> {
    locate(search_path, template)
        .map(|dir| dir.join(template))
        .ok_or_else(|| EclipsifyError::MissingTemplate {
            name: logical_name.to_string(),
            template: template.to_string(),
            searched: search_path.dirs().to_vec(),
        })
}

/// Every directory containing `name`, in precedence order. The first one is
/// what [`locate`] returns; the rest are shadowed.
pub fn shadowed<'a>(search_path: &'a SearchPath, name: &str) -> Vec<&'a Path> {
    search_path
        .iter()
        .filter(|dir| dir.join(name).is_file())
        .collect()
}
