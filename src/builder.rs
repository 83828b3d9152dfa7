use std::path::{Path, PathBuf};

use crate::error::ListfigError;
use crate::file;
use crate::list::LayeredList;
use crate::persist;
use crate::resolve::{self, ResolveInput};
use crate::types::{SearchMode, SearchPath};

/// Entry point for loading a layered list field.
pub struct Listfig;

impl Listfig {
    pub fn builder() -> ListfigBuilder {
        ListfigBuilder::new()
    }
}

/// Builder for discovering layer files and decoding one field from them.
///
/// - **Discovery**: [`search_paths()`](Self::search_paths) lists where to look,
///   lowest priority (first decoded) first.
/// - **Resolution**: [`search_mode()`](Self::search_mode) decodes every file
///   found or only the highest-priority one.
/// - **Persistence**: [`persist_path()`](Self::persist_path) names where
///   [`persist()`](Self::persist) writes.
#[derive(Debug, Clone, Default)]
pub struct ListfigBuilder {
    app_name: Option<String>,
    file_name: Option<String>,
    field: Option<String>,
    search_paths: Option<Vec<SearchPath>>,
    search_mode: SearchMode,
    persist_path: Option<SearchPath>,
    extra_layers: Vec<(PathBuf, String)>,
    ancestors_start: Option<PathBuf>,
}

impl ListfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.toml"`
    /// - `search_paths` → `[SearchPath::Platform]`
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the layer file name (default: `"{app_name}.toml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Dotted key of the list field inside each layer, e.g. `"env"`.
    pub fn field(mut self, key: &str) -> Self {
        self.field = Some(key.to_string());
        self
    }

    /// Replace the default search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry is
    /// decoded last and has the final say.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path without replacing the defaults.
    /// If no paths have been set yet, starts from the default `[Platform]`.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(|| vec![SearchPath::Platform])
            .push(path);
        self
    }

    /// Set the search mode (default: [`SearchMode::Layered`]).
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Add an in-memory layer, decoded after every discovered file.
    ///
    /// `source` names the layer in error messages. Calls stack in order.
    pub fn layer(mut self, source: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.extra_layers.push((source.into(), content.into()));
        self
    }

    /// Set the file [`persist()`](Self::persist) writes to. Must resolve to a
    /// single directory, so [`SearchPath::Ancestors`] is rejected.
    pub fn persist_path(mut self, path: SearchPath) -> Self {
        self.persist_path = Some(path);
        self
    }

    /// Start [`SearchPath::Ancestors`] walks here instead of the working directory.
    pub fn ancestors_from(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ancestors_start = Some(dir.into());
        self
    }

    fn effective_app_name(&self) -> Result<&str, ListfigError> {
        self.app_name
            .as_deref()
            .ok_or(ListfigError::AppNameRequired)
    }

    fn effective_file_name(&self) -> Result<String, ListfigError> {
        if let Some(name) = &self.file_name {
            return Ok(name.clone());
        }
        let app = self.effective_app_name()?;
        Ok(format!("{app}.toml"))
    }

    fn effective_field(&self) -> Result<&str, ListfigError> {
        self.field.as_deref().ok_or(ListfigError::FieldRequired)
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        match &self.search_paths {
            Some(paths) => paths.clone(),
            None => vec![SearchPath::Platform],
        }
    }

    /// Discover layer files and pair them with the in-memory layers.
    fn collect_layers(&self) -> Result<Vec<(PathBuf, String)>, ListfigError> {
        let search_paths = self.effective_search_paths();
        let mut layers = if search_paths.is_empty() {
            Vec::new()
        } else {
            // Platform lookups need the app name; explicit paths only need a file name.
            let app_name = self.app_name.as_deref().unwrap_or_default();
            let file_name = self.effective_file_name()?;
            let dirs = file::expand_search_paths(
                &search_paths,
                app_name,
                self.ancestors_start.as_deref(),
            );
            file::load_layer_files(&dirs, &file_name, self.search_mode)?
        };
        layers.extend(self.extra_layers.iter().cloned());
        Ok(layers)
    }

    /// Load the field from every layer into a fresh list.
    pub fn load(&self) -> Result<LayeredList, ListfigError> {
        let mut list = LayeredList::default();
        self.load_into(&mut list)?;
        Ok(list)
    }

    /// Load the field from every layer on top of `state`.
    pub fn load_into(&self, state: &mut LayeredList) -> Result<(), ListfigError> {
        let key = self.effective_field()?.to_string();
        let layers = self.collect_layers()?;
        log::debug!("loading '{key}' from {} layer(s)", layers.len());
        resolve::resolve_into(state, ResolveInput { layers, key })
    }

    /// Resolve the file [`persist()`](Self::persist) would write.
    pub fn persist_file(&self) -> Result<PathBuf, ListfigError> {
        let scope = self
            .persist_path
            .as_ref()
            .ok_or(ListfigError::NoPersistPath)?;
        let app_name = match scope {
            SearchPath::Platform => self.effective_app_name()?,
            _ => self.app_name.as_deref().unwrap_or_default(),
        };
        file::resolve_persist_path(scope, &self.effective_file_name()?, app_name)
    }

    /// Write `list` in canonical form to the persist path. Returns the file written.
    pub fn persist(&self, list: &LayeredList) -> Result<PathBuf, ListfigError> {
        let key = self.effective_field()?;
        let path = self.persist_file()?;
        persist::persist_list(&path, key, list)?;
        Ok(path)
    }

    /// Write `list` to an explicit file instead of the persist path.
    pub fn persist_to(&self, path: &Path, list: &LayeredList) -> Result<(), ListfigError> {
        persist::persist_list(path, self.effective_field()?, list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::strings;
    use crate::types::Boundary;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn path_of(dir: &TempDir) -> SearchPath {
        SearchPath::Path(dir.path().to_path_buf())
    }

    #[test]
    fn field_is_required() {
        let result = Listfig::builder().app_name("app").search_paths(vec![]).load();
        assert!(matches!(result, Err(ListfigError::FieldRequired)));
    }

    #[test]
    fn file_name_needs_app_name() {
        let dir = TempDir::new().unwrap();
        let result = Listfig::builder()
            .field("env")
            .search_paths(vec![path_of(&dir)])
            .load();
        assert!(matches!(result, Err(ListfigError::AppNameRequired)));
    }

    #[test]
    fn explicit_file_name_without_app_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "layers.toml", "env = [\"a\"]\n");
        let list = Listfig::builder()
            .file_name("layers.toml")
            .field("env")
            .search_paths(vec![path_of(&dir)])
            .load()
            .unwrap();
        assert_eq!(list.values(), strings(&["a"]));
    }

    #[test]
    fn system_then_user_append() {
        let system = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        write(system.path(), "app.toml", "env = [\"PATH=/usr/bin\"]\n");
        write(
            user.path(),
            "app.toml",
            "env = [{append = true}, \"EDITOR=vi\"]\n",
        );

        let list = Listfig::builder()
            .app_name("app")
            .field("env")
            .search_paths(vec![path_of(&system), path_of(&user)])
            .load()
            .unwrap();
        assert_eq!(list.values(), strings(&["PATH=/usr/bin", "EDITOR=vi"]));
        assert_eq!(list.append(), Some(true));
    }

    #[test]
    fn first_match_uses_only_highest_priority() {
        let system = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        write(system.path(), "app.toml", "env = [\"sys\"]\n");
        write(user.path(), "app.toml", "env = [{append = true}, \"usr\"]\n");

        let list = Listfig::builder()
            .app_name("app")
            .field("env")
            .search_paths(vec![path_of(&system), path_of(&user)])
            .search_mode(SearchMode::FirstMatch)
            .load()
            .unwrap();
        assert_eq!(list.values(), strings(&["usr"]));
    }

    #[test]
    fn extra_layers_decode_after_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.toml", "env = [{append = true}, \"file\"]\n");

        let list = Listfig::builder()
            .app_name("app")
            .field("env")
            .search_paths(vec![path_of(&dir)])
            .layer("<override>", "env = [\"mem\"]")
            .load()
            .unwrap();
        assert_eq!(list.values(), strings(&["file", "mem"]));
    }

    #[test]
    fn ancestors_layer_from_root_to_leaf() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        let leaf = root.path().join("pkg");
        fs::create_dir(&leaf).unwrap();
        write(root.path(), "app.toml", "env = [\"root\"]\n");
        write(&leaf, "app.toml", "env = [\"leaf\", {append = true}]\n");

        let list = Listfig::builder()
            .app_name("app")
            .field("env")
            .search_paths(vec![SearchPath::Ancestors(Boundary::Marker(".git"))])
            .ancestors_from(&leaf)
            .load()
            .unwrap();
        assert_eq!(list.values(), strings(&["root", "leaf"]));
    }

    #[test]
    fn load_into_keeps_sticky_flag() {
        let mut list = Listfig::builder()
            .field("env")
            .search_paths(vec![])
            .layer("a", "env = [{append = true}, \"a\"]")
            .load()
            .unwrap();
        Listfig::builder()
            .field("env")
            .search_paths(vec![])
            .layer("b", "env = [\"b\"]")
            .load_into(&mut list)
            .unwrap();
        assert_eq!(list.values(), strings(&["a", "b"]));
    }

    #[test]
    fn decode_error_reports_layer() {
        let err = Listfig::builder()
            .field("env")
            .search_paths(vec![])
            .layer("inline.toml", "env = [\"1\", {foo = true}]")
            .load()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("inline.toml"), "{msg}");
        assert!(msg.contains("\"foo\""), "{msg}");
    }

    #[test]
    fn add_search_path_layers_after_platform() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.toml", "env = [\"local\"]\n");

        let builder = Listfig::builder()
            .app_name("listfig-test-no-such-app")
            .field("env")
            .add_search_path(path_of(&dir));
        assert_eq!(
            builder.effective_search_paths(),
            vec![SearchPath::Platform, path_of(&dir)]
        );
        assert_eq!(builder.load().unwrap().values(), strings(&["local"]));
    }

    #[test]
    fn persist_to_writes_explicit_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested").join("app.toml");
        let builder = Listfig::builder().app_name("app").field("env");

        let list = LayeredList::new(strings(&["x", "y"]), Some(true));
        builder.persist_to(&file, &list).unwrap();

        let reloaded = builder
            .search_paths(vec![SearchPath::Path(dir.path().join("nested"))])
            .load()
            .unwrap();
        assert_eq!(reloaded, list);
    }

    #[test]
    fn persist_requires_path() {
        let result = Listfig::builder()
            .app_name("app")
            .field("env")
            .persist(&LayeredList::default());
        assert!(matches!(result, Err(ListfigError::NoPersistPath)));
    }

    #[test]
    fn persist_rejects_ancestors() {
        let result = Listfig::builder()
            .app_name("app")
            .field("env")
            .persist_path(SearchPath::Ancestors(Boundary::Root))
            .persist(&LayeredList::default());
        assert!(matches!(
            result,
            Err(ListfigError::AncestorsNotAllowedAsPersistPath)
        ));
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let builder = Listfig::builder()
            .app_name("app")
            .field("build.env")
            .search_paths(vec![path_of(&dir)])
            .persist_path(path_of(&dir));

        let list = LayeredList::new(strings(&["A=1", "B=2"]), Some(false));
        let written = builder.persist(&list).unwrap();
        assert_eq!(written, dir.path().join("app.toml"));

        assert_eq!(builder.load().unwrap(), list);
    }
}
