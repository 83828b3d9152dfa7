//! The layered list field: an ordered string list assembled across layers.
//!
//! Each layer contributes a TOML array mixing plain strings with at most one
//! directive table:
//!
//! ```toml
//! env = ["a", "b", {append = true}, "c"]
//! ```
//!
//! Decoding a layer collects its strings in order and applies any directive
//! first, then folds the strings into the accumulated state using the merge
//! policy in effect *after* the directive. A directive therefore has the same
//! effect wherever it sits in the array.
//!
//! Encoding always emits the canonical form: all strings, followed by a single
//! trailing directive only if the flag was ever set.

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use toml::Value;

use crate::attributes::ListAttributes;
use crate::error::ListfigError;

/// Persistent state of one layered list field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredList {
    values: Vec<String>,
    attributes: ListAttributes,
}

impl LayeredList {
    pub fn new(values: Vec<String>, append: Option<bool>) -> Self {
        Self {
            values,
            attributes: ListAttributes { append },
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn attributes(&self) -> &ListAttributes {
        &self.attributes
    }

    /// The sticky append flag; `None` if no layer has set it.
    pub fn append(&self) -> Option<bool> {
        self.attributes.append
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Decode one layer's raw value into this state.
    ///
    /// `raw` must be an array whose items are strings or directive tables.
    /// The whole layer is classified before anything is written, so an error
    /// leaves `self` as it was before the call.
    pub fn decode(&mut self, raw: &Value) -> Result<(), ListfigError> {
        let Value::Array(items) = raw else {
            return Err(ListfigError::TypeMismatch {
                context: "layered list".into(),
                expected: "an array",
                found: raw.to_string(),
            });
        };

        let mut loaded = Vec::with_capacity(items.len());
        let mut attributes = self.attributes;
        for item in items {
            match item {
                Value::String(s) => loaded.push(s.clone()),
                Value::Table(directive) => attributes.apply_directive(directive)?,
                other => {
                    return Err(ListfigError::UnsupportedItem {
                        kind: other.type_str(),
                        item: other.to_string(),
                    });
                }
            }
        }

        if attributes != self.attributes {
            log::trace!("layered list attributes now {attributes:?}");
        }
        self.attributes = attributes;

        let accumulated = std::mem::take(&mut self.values);
        self.values = self.attributes.policy().merge(accumulated, loaded);
        Ok(())
    }

    /// Canonical raw form: the strings in order, then `{append = ...}` if set.
    pub fn encode(&self) -> Value {
        let mut items: Vec<Value> = self.values.iter().cloned().map(Value::String).collect();
        if let Some(directive) = self.attributes.to_directive() {
            items.push(Value::Table(directive));
        }
        Value::Array(items)
    }

    /// A [`DeserializeSeed`] that decodes one layer into this existing state.
    ///
    /// Use this when a host deserializer drives the layers itself; plain
    /// [`Deserialize`] always starts from an empty list.
    pub fn seed(&mut self) -> LayerSeed<'_> {
        LayerSeed { list: self }
    }
}

impl<'a> IntoIterator for &'a LayeredList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for LayeredList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Decodes a single layer into a borrowed [`LayeredList`].
pub struct LayerSeed<'a> {
    list: &'a mut LayeredList,
}

impl<'de> DeserializeSeed<'de> for LayerSeed<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        self.list.decode(&raw).map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for LayeredList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut list = LayeredList::default();
        list.seed().deserialize(deserializer)?;
        Ok(list)
    }
}

/// Serializes [`LayeredList::encode`].
///
/// With no values and the flag set, the array holds only the directive table,
/// and `toml::to_string` renders it as an array of tables (`[[key]]` with
/// `append = ...`). That form decodes to the same state; use
/// [`persist`](crate::persist) for the inline `key = [{append = ...}]` form.
impl Serialize for LayeredList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.encode().serialize(serializer)
    }
}
