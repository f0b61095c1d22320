//! # Key Selectors
//!
//! A key selector is either a field name or a function from an item to a
//! key. It is resolved once, at the start of a grouping call, into a
//! [`ResolvedKey`] that is then applied to every item.

use crate::primitives::MAX_FIELD_NAME_LENGTH;
use crate::{Fields, GroupError, Value};
use std::fmt;
use std::sync::Arc;

/// Function form of a key selector.
pub type KeyFn<T> = dyn Fn(&T) -> Value + Send + Sync;

/// Selects the group key of an item.
pub enum KeySelector<T> {
    /// Read this field off each item.
    Field(String),
    /// Compute the key from the item.
    Function(Arc<KeyFn<T>>),
}

impl<T> KeySelector<T> {
    /// Select by field name.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Select by a key function.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Check that the selector can be resolved.
    ///
    /// Field names must be non-blank and at most `MAX_FIELD_NAME_LENGTH`
    /// bytes. Functions are always valid.
    pub fn validate(&self) -> Result<(), GroupError> {
        match self {
            Self::Field(name) => validate_field_name(name),
            Self::Function(_) => Ok(()),
        }
    }

    /// Resolve into the uniform form applied to every item.
    pub fn resolve(&self) -> Result<ResolvedKey<'_, T>, GroupError> {
        self.validate()?;
        Ok(match self {
            Self::Field(name) => ResolvedKey::Field(name),
            Self::Function(f) => ResolvedKey::Function(f.as_ref()),
        })
    }
}

fn validate_field_name(name: &str) -> Result<(), GroupError> {
    if name.trim().is_empty() {
        return Err(GroupError::InvalidArgument(
            "key selector field name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_FIELD_NAME_LENGTH {
        return Err(GroupError::InvalidArgument(format!(
            "key selector field name length {} exceeds maximum {} bytes",
            name.len(),
            MAX_FIELD_NAME_LENGTH
        )));
    }
    Ok(())
}

impl<T> Clone for KeySelector<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name.clone()),
            Self::Function(f) => Self::Function(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for KeySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl<T> From<&str> for KeySelector<T> {
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

impl<T> From<String> for KeySelector<T> {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

// =============================================================================
// RESOLVED KEY
// =============================================================================

/// A validated key selector, constant for the duration of one grouping call.
pub enum ResolvedKey<'a, T> {
    Field(&'a str),
    Function(&'a KeyFn<T>),
}

impl<T> ResolvedKey<'_, T> {
    /// Compute the group key with a caller-supplied field reader.
    ///
    /// Lets items without a [`Fields`] impl use field selectors too.
    pub fn key_with<R>(&self, item: &T, read_field: R) -> Value
    where
        R: FnOnce(&T, &str) -> Option<Value>,
    {
        match self {
            Self::Field(name) => read_field(item, name).unwrap_or(Value::Null),
            Self::Function(f) => f(item),
        }
    }
}

impl<T: Fields> ResolvedKey<'_, T> {
    /// Compute the group key of an item. Absent fields key as `Null`.
    pub fn key_of(&self, item: &T) -> Value {
        self.key_with(item, |item, name| item.field(name))
    }
}
