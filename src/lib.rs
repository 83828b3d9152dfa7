//! Layered string-list configuration fields with sticky append directives.
//!
//! Some settings are lists that several config files want to contribute to: a
//! system file lists base environment variables, a user file adds a few more,
//! a project file adds its own. A plain "later file wins" merge forces every
//! file to restate the whole list. Listfig instead lets each layer say, inline,
//! whether it replaces or extends what came before:
//!
//! ```toml
//! # /etc/myapp/myapp.toml
//! env = ["PATH=/usr/bin", "LANG=C"]
//!
//! # ~/.config/myapp/myapp.toml
//! env = [{append = true}, "EDITOR=vi"]
//! ```
//!
//! Loading both yields `["PATH=/usr/bin", "LANG=C", "EDITOR=vi"]`.
//!
//! ```ignore
//! let env = Listfig::builder()
//!     .app_name("myapp")
//!     .field("env")
//!     .search_paths(vec![SearchPath::Path("/etc/myapp".into()), SearchPath::Platform])
//!     .load()?;
//! ```
//!
//! # Merge rules
//!
//! A layer's array mixes plain strings with an optional directive table.
//! The strings keep their order wherever the directive sits.
//!
//! - Without any `append` directive seen so far, a layer **replaces** the list.
//! - `{append = true}` makes this layer, and every later one, **append**.
//! - `{append = false}` switches back to replace, again for every later layer.
//!
//! The flag is sticky: it belongs to the field, not to the file that set it.
//! Reordering layers therefore changes the result. Only strings and directive
//! tables are accepted as items, and `append` is the only directive key;
//! anything else is an error, see [`ListfigError`].
//!
//! # Round-tripping
//!
//! [`LayeredList::encode`] and the `Serialize` impl always produce the
//! canonical form: the strings, then `{append = ...}` last if the flag was ever
//! set. Decoding that form into an empty list gives back the same state.
//! [`ListfigBuilder::persist`] writes it into a file with `toml_edit`,
//! keeping the rest of the document intact.
//!
//! # Using the field type directly
//!
//! `LayeredList` implements `Deserialize`, so it can sit in any serde config
//! struct; each deserialization starts from an empty list. When a host
//! deserializer drives several layers itself, [`LayeredList::seed`] decodes
//! each one into the same state.

pub mod error;
pub mod persist;
pub mod resolve;
pub mod types;

mod attributes;
mod builder;
mod file;
mod list;
mod merge;

#[cfg(test)]
mod fixtures;

pub use attributes::{APPEND_KEY, ListAttributes};
pub use builder::{Listfig, ListfigBuilder};
pub use error::ListfigError;
pub use list::{LayerSeed, LayeredList};
pub use merge::MergePolicy;
pub use types::{Boundary, SearchMode, SearchPath};
