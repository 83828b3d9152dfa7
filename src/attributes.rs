//! Directive objects: the inline `{append = ...}` tables embedded in a list.
//!
//! A directive carries merge-control metadata rather than list values. The set
//! of recognized keys is closed; anything other than `append` is rejected so a
//! typo such as `{apend = true}` fails loudly instead of silently replacing.

use toml::{Table, Value};

use crate::error::ListfigError;
use crate::merge::MergePolicy;

/// Key of the only recognized directive.
pub const APPEND_KEY: &str = "append";

/// Merge-control attributes attached to a [`LayeredList`](crate::LayeredList).
///
/// Attributes are sticky: once a layer sets them, they stay in effect for
/// every later layer until another layer sets them again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListAttributes {
    /// `None` until some layer configures it explicitly.
    pub append: Option<bool>,
}

impl ListAttributes {
    /// Apply one directive table on top of the current attributes.
    ///
    /// Keys are applied in table order, so a later key overrides an earlier
    /// one. An empty table changes nothing.
    pub fn apply_directive(&mut self, directive: &Table) -> Result<(), ListfigError> {
        for (key, value) in directive {
            match key.as_str() {
                APPEND_KEY => {
                    let Value::Boolean(append) = value else {
                        return Err(ListfigError::TypeMismatch {
                            context: format!("directive key '{key}'"),
                            expected: "a boolean",
                            found: value.to_string(),
                        });
                    };
                    self.append = Some(*append);
                }
                _ => {
                    return Err(ListfigError::UnsupportedKey {
                        key: key.clone(),
                        directive: Value::Table(directive.clone()).to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The directive table that reproduces these attributes, if any were set.
    pub fn to_directive(&self) -> Option<Table> {
        let append = self.append?;
        let mut directive = Table::new();
        directive.insert(APPEND_KEY.to_string(), Value::Boolean(append));
        Some(directive)
    }

    /// Unset and explicit `false` both replace.
    pub fn policy(&self) -> MergePolicy {
        match self.append {
            Some(true) => MergePolicy::Append,
            Some(false) | None => MergePolicy::Replace,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.append.is_none()
    }
}
