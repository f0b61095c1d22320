//! # Core Type Definitions
//!
//! This module contains the data model the grouping engine works on:
//! - Field values (`Value`, `ValueKind`)
//! - Records (`Record`) and the `Fields` access trait
//! - Error types (`GroupError`)
//!
//! ## Ordering
//!
//! `Value` is NOT `Ord`. Two values of the same kind compare by their
//! natural order; values of different kinds are incomparable and
//! `Value::try_cmp` reports them as `GroupError::KeyComparison`. Only keys
//! are ever compared, so a record may hold fields of any JSON type.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

// =============================================================================
// VALUE KIND
// =============================================================================

/// Discriminant of a [`Value`], used to report incomparable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
    List,
    Object,
}

impl ValueKind {
    /// Lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Object => "object",
        }
    }

    /// Integers and floats order against each other.
    const fn is_number(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// Exclusive upper bound (2^63) of floats that fit in an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A dynamically typed field value; any JSON value converts into one.
///
/// Integral JSON numbers inside the `i64` range become `Int`; every other
/// number is a `Float`. Floats are equal and hashed by bit pattern, which
/// agrees with the `f64::total_cmp` order used to sort them.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Build a number, keeping integral values as `Int`.
    #[must_use]
    pub fn number(n: f64) -> Self {
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < I64_BOUND {
            Self::Int(n as i64)
        } else {
            Self::Float(n)
        }
    }

    /// Compare two values by their natural order.
    ///
    /// - numbers numerically (an `Int` and a `Float` included),
    ///   text lexicographically, `false < true`
    /// - lists element-wise, then by length
    /// - `Null` equals `Null`
    ///
    /// Returns `GroupError::KeyComparison` for values of different kinds,
    /// for a mismatch reached inside two lists, and for objects, which
    /// have no order.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, GroupError> {
        match (self, other) {
            (Self::Null, Self::Null) => Ok(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Ok(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Ok(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Ok(a.total_cmp(b)),
            // An Int never equals a Float; ties after rounding put the Int first.
            (Self::Int(a), Self::Float(b)) => Ok((*a as f64).total_cmp(b).then(Ordering::Less)),
            (Self::Float(a), Self::Int(b)) => {
                Ok(a.total_cmp(&(*b as f64)).then(Ordering::Greater))
            }
            (Self::Text(a), Self::Text(b)) => Ok(a.cmp(b)),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.try_cmp(y)? {
                        Ordering::Equal => {}
                        decided => return Ok(decided),
                    }
                }
                Ok(a.len().cmp(&b.len()))
            }
            _ => Err(GroupError::KeyComparison {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }

    /// Whether two values may be ordered against each other at all.
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        let (a, b) = (self.kind(), other.kind());
        a == b || (a.is_number() && b.is_number())
    }

    /// Get the text content, if this is a `Text` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an `Int` value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(x) => x.to_bits().hash(state),
            Self::Text(s) => s.hash(state),
            Self::List(items) => items.hash(state),
            Self::Object(fields) => fields.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Self::Float(n as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = GroupError;

    fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Self::Int(i)),
                (None, Some(x)) => Ok(Self::number(x)),
                (None, None) => Err(GroupError::InvalidArgument(format!(
                    "number {n} cannot be represented"
                ))),
            },
            serde_json::Value::String(s) => Ok(Self::Text(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(name, raw)| {
                    Self::try_from(raw)
                        .map(|value| (name.clone(), value))
                        .map_err(|e| e.in_context(&format!("field '{name}'")))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self::Object),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(&json).map_err(serde::de::Error::custom)
    }
}

/// Short name of a JSON value's type, for error messages.
#[must_use]
pub fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// =============================================================================
// FIELD ACCESS
// =============================================================================

/// Anything whose fields can be read by name.
///
/// A field-name key selector reads its key through this trait. `None`
/// means the field is absent; the grouping engine keys such items by
/// `Value::Null`.
pub trait Fields {
    fn field(&self, name: &str) -> Option<Value>;
}

// =============================================================================
// RECORD
// =============================================================================

/// An arbitrary caller-supplied record: field name to value.
///
/// Fields are kept in a `BTreeMap` so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Borrow a field's value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Fields for Record {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

impl TryFrom<&serde_json::Value> for Record {
    type Error = GroupError;

    fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(map) = json else {
            return Err(GroupError::InvalidArgument(format!(
                "expected an object, found {}",
                json_kind(json)
            )));
        };

        let mut record = Self::new();
        for (name, raw) in map {
            let value =
                Value::try_from(raw).map_err(|e| e.in_context(&format!("field '{name}'")))?;
            record.insert(name.clone(), value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(&json).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while grouping.
///
/// - No silent coercion of mixed key types
/// - The core never panics; all errors are returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// Input is not a collection of records, or the key selector cannot
    /// be resolved.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two group keys have kinds that cannot be ordered against each other.
    #[error("Group keys are not mutually comparable: {left} vs {right}")]
    KeyComparison { left: ValueKind, right: ValueKind },
}

impl GroupError {
    /// Prefix an `InvalidArgument` message with where it happened.
    #[must_use]
    pub fn in_context(self, context: &str) -> Self {
        match self {
            Self::InvalidArgument(msg) => Self::InvalidArgument(format!("{context}: {msg}")),
            other => other,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
