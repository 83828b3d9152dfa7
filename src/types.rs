//! Discovery vocabulary: where layer files live and which of them are used.
//!
//! Layers are decoded strictly in order, and order changes the result: a later
//! `{append = true}` extends what earlier layers built, a later plain array
//! replaces it. Search paths are therefore listed **lowest priority first**,
//! which is also the decode order.
//!
//! # Common patterns
//!
//! **System defaults, user additions.** The user file can extend rather than
//! restate the system list by opening with `{append = true}`:
//!
//! ```ignore
//! .search_paths(vec![SearchPath::Path("/etc/myapp".into()), SearchPath::Platform])
//! ```
//!
//! **Nearest project config only.**
//!
//! ```ignore
//! .search_paths(vec![SearchPath::Ancestors(Boundary::Marker(".git"))])
//! .search_mode(SearchMode::FirstMatch)
//! ```

use std::path::PathBuf;

/// Where to search for layer files.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
    /// Every directory from the boundary down to the current working
    /// directory, shallowest first.
    Ancestors(Boundary),
}

/// How far [`SearchPath::Ancestors`] walks up from the working directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Walk to the filesystem root.
    Root,
    /// Stop (inclusive) at the first directory containing this entry.
    Marker(&'static str),
}

/// Which of the discovered files become layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Every file found is a layer, decoded in search-path order.
    #[default]
    Layered,
    /// Only the highest-priority file found is used.
    FirstMatch,
}
