//! Persistence: write a list's canonical form into a TOML file.
//!
//! Uses `toml_edit` so comments and formatting elsewhere in the document
//! survive. The written array reloads to the same values and append flag.

use std::path::Path;

use toml_edit::{Array, DocumentMut, InlineTable};

use crate::attributes::APPEND_KEY;
use crate::error::ListfigError;
use crate::file::read_optional;
use crate::list::LayeredList;

/// Pure function: set `key` to the encoded `list` inside a TOML document.
///
/// `content` of `None` starts from an empty document. Intermediate tables are
/// created as needed. `path` is only used in error messages.
pub fn set_in_document(
    path: &Path,
    content: Option<&str>,
    key: &str,
    list: &LayeredList,
) -> Result<String, ListfigError> {
    let mut doc: DocumentMut =
        content
            .unwrap_or_default()
            .parse()
            .map_err(|e| ListfigError::Edit {
                path: path.to_path_buf(),
                source: e,
            })?;

    let (parents, leaf) = match key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, key),
    };

    let mut current: &mut toml_edit::Item = doc.as_item_mut();
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        if current.get(segment).is_none() {
            // A standard table nested in an inline one is never rendered.
            current[segment] = if current.is_inline_table() {
                toml_edit::value(InlineTable::new())
            } else {
                toml_edit::table()
            };
        }
        current = &mut current[segment];
        if !current.is_table_like() {
            return Err(ListfigError::KeyConflict {
                key: key.into(),
                segment: segment.into(),
            });
        }
    }
    current[leaf] = toml_edit::value(to_edit_array(list));

    Ok(doc.to_string())
}

/// I/O wrapper: reads `file_path` (if it exists), sets the list, writes back.
/// Creates parent directories if needed.
pub fn persist_list(file_path: &Path, key: &str, list: &LayeredList) -> Result<(), ListfigError> {
    let content = read_optional(file_path)?;
    let new_content = set_in_document(file_path, content.as_deref(), key, list)?;

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ListfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(file_path, &new_content).map_err(|e| ListfigError::Io {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    log::debug!(
        "wrote '{key}' ({} value(s)) to {}",
        list.len(),
        file_path.display()
    );
    Ok(())
}

/// The `toml_edit` rendering of [`LayeredList::encode`].
fn to_edit_array(list: &LayeredList) -> Array {
    let mut array: Array = list.iter().map(String::as_str).collect();
    if let Some(append) = list.append() {
        let mut directive = InlineTable::new();
        directive.insert(APPEND_KEY, append.into());
        array.push(directive);
    }
    array.fmt();
    array
}
