//! Layer file discovery.
//!
//! Each [`SearchPath`] expands to zero or more directories, kept in
//! priority-ascending order. `{dir}/{file_name}` is then read from each one;
//! missing files are skipped, any other I/O failure is an error.

use std::path::{Path, PathBuf};

use crate::error::ListfigError;
use crate::types::{Boundary, SearchMode, SearchPath};

/// Expand one search path into concrete directories.
///
/// `Platform` and `Home` yield nothing when the platform has no such
/// directory. `Ancestors` starts at `start`, or the working directory if `None`.
pub fn expand_search_path(sp: &SearchPath, app_name: &str, start: Option<&Path>) -> Vec<PathBuf> {
    match sp {
        SearchPath::Platform => directories::ProjectDirs::from("", "", app_name)
            .map(|proj| proj.config_dir().to_path_buf())
            .into_iter()
            .collect(),
        SearchPath::Home(subdir) => directories::UserDirs::new()
            .map(|user| user.home_dir().join(subdir))
            .into_iter()
            .collect(),
        SearchPath::Cwd => std::env::current_dir().ok().into_iter().collect(),
        SearchPath::Path(p) => vec![p.clone()],
        SearchPath::Ancestors(boundary) => {
            let start = match start {
                Some(dir) => dir.to_path_buf(),
                None => match std::env::current_dir() {
                    Ok(cwd) => cwd,
                    Err(_) => return vec![],
                },
            };
            ancestors(&start, boundary)
        }
    }
}

/// Directories from `start` upward to the boundary, shallowest first.
fn ancestors(start: &Path, boundary: &Boundary) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for dir in start.ancestors() {
        dirs.push(dir.to_path_buf());
        if let Boundary::Marker(name) = boundary
            && dir.join(name).exists()
        {
            break;
        }
    }
    dirs.reverse();
    dirs
}

/// Expand all search paths, preserving their order.
pub fn expand_search_paths(
    search_paths: &[SearchPath],
    app_name: &str,
    start: Option<&Path>,
) -> Vec<PathBuf> {
    search_paths
        .iter()
        .flat_map(|sp| expand_search_path(sp, app_name, start))
        .collect()
}

/// Read `path`, treating a missing file as `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>, ListfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ListfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read every layer file found under `dirs`, in decode order.
///
/// In [`FirstMatch`](SearchMode::FirstMatch) mode the directories are
/// checked from the highest-priority end and at most one file is returned.
pub fn load_layer_files(
    dirs: &[PathBuf],
    file_name: &str,
    mode: SearchMode,
) -> Result<Vec<(PathBuf, String)>, ListfigError> {
    let mut layers = Vec::new();
    match mode {
        SearchMode::Layered => {
            for dir in dirs {
                let path = dir.join(file_name);
                if let Some(content) = read_optional(&path)? {
                    log::debug!("found layer {}", path.display());
                    layers.push((path, content));
                }
            }
        }
        SearchMode::FirstMatch => {
            for dir in dirs.iter().rev() {
                let path = dir.join(file_name);
                if let Some(content) = read_optional(&path)? {
                    log::debug!("using first match {}", path.display());
                    layers.push((path, content));
                    break;
                }
            }
        }
    }
    Ok(layers)
}

/// Resolve the file `persist` writes to. It must name exactly one directory.
pub fn resolve_persist_path(
    persist: &SearchPath,
    file_name: &str,
    app_name: &str,
) -> Result<PathBuf, ListfigError> {
    if matches!(persist, SearchPath::Ancestors(_)) {
        return Err(ListfigError::AncestorsNotAllowedAsPersistPath);
    }
    expand_search_path(persist, app_name, None)
        .into_iter()
        .next()
        .map(|dir| dir.join(file_name))
        .ok_or(ListfigError::NoPersistPath)
}
