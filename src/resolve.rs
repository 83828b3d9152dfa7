//! Sequential layer resolution: decode one field from every layer, in order.
//!
//! Operates on pre-loaded text (`ResolveInput`) with no I/O, so the whole
//! pipeline is testable with synthetic layers. Steps, per layer:
//!
//! 1. Parse the text into a `toml::Table`
//! 2. Locate the field by dotted key; layers without it are skipped
//! 3. Decode the raw value into the shared [`LayeredList`]
//!
//! Unlike a key-by-key deep merge, the layers are never combined as tables
//! first: the list's sticky append flag depends on seeing each layer's array
//! separately and in order.

use std::path::PathBuf;

use toml::{Table, Value};

use crate::error::ListfigError;
use crate::list::LayeredList;

/// All pre-loaded data needed to resolve a field. No I/O happens here.
pub struct ResolveInput {
    /// Layer contents in decode order: first = lowest priority.
    pub layers: Vec<(PathBuf, String)>,
    /// Dotted key of the field, e.g. `"env"` or `"build.env"`.
    pub key: String,
}

/// Resolve the field from every layer, starting from an empty list.
pub fn resolve(input: ResolveInput) -> Result<LayeredList, ListfigError> {
    let mut list = LayeredList::default();
    resolve_into(&mut list, input)?;
    Ok(list)
}

/// Resolve the field on top of an existing state.
///
/// On error, `state` keeps whatever the layers before the failing one built.
/// Callers should discard it rather than continue loading.
pub fn resolve_into(state: &mut LayeredList, input: ResolveInput) -> Result<(), ListfigError> {
    for (path, content) in &input.layers {
        let table: Table = toml::from_str(content).map_err(|e| ListfigError::Parse {
            path: path.clone(),
            source: e,
        })?;

        let Some(raw) = table_get(&table, &input.key) else {
            log::trace!("{} does not set '{}'", path.display(), input.key);
            continue;
        };

        state.decode(raw).map_err(|e| ListfigError::Layer {
            key: input.key.clone(),
            path: path.clone(),
            source: Box::new(e),
        })?;
        log::debug!(
            "decoded '{}' from {}: {} value(s), append = {:?}",
            input.key,
            path.display(),
            state.len(),
            state.append()
        );
    }
    Ok(())
}

/// Fold already-parsed raw values into `state`, in order.
pub fn decode_layers<'a>(
    state: &mut LayeredList,
    layers: impl IntoIterator<Item = &'a Value>,
) -> Result<(), ListfigError> {
    for raw in layers {
        state.decode(raw)?;
    }
    Ok(())
}

/// Navigate a `toml::Table` by dotted key path (e.g. `"build.env"`).
///
/// An intermediate segment that is missing or not a table means the key is absent.
pub fn table_get<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let mut current = table;
    if let Some(path) = path {
        for segment in path.split('.') {
            current = current.get(segment)?.as_table()?;
        }
    }
    current.get(leaf)
}
