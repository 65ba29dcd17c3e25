//! Transformation specifications
//!
//! A [`Specification`] is an ordered list of [`Entry`] values. Each entry is
//! either a bare property name, copied from the model under the same key, or a
//! keyed [`ValueSpec`] that is interpreted by the transmogrifier.
//!
//! Specifications can be built in code with [`SpecificationBuilder`] or read
//! from a declarative JSON/YAML/TOML document:
//!
//! ```
//! use presenter_core::Specification;
//! use serde_json::json;
//!
//! let spec = Specification::from_json(json!([
//!     "id",
//!     "name",
//!     {"fullname": "{{firstname}} {{lastname}}", "tags": [2, 4]}
//! ])).unwrap();
//!
//! let keys: Vec<&str> = spec.iter().map(|entry| entry.key()).collect();
//! assert_eq!(keys, vec!["id", "name", "fullname", "tags"]);
//! ```
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use crate::model::Model;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A callable spec value: receives the model, produces the output verbatim
pub type CallableFn = dyn Fn(&dyn Model) -> anyhow::Result<Value> + Send + Sync;

/// How a single keyed entry is turned into output
#[derive(Clone)]
pub enum ValueSpec {
    /// Invoked with the model; its result is used as-is
    Callable(Arc<CallableFn>),
    /// Nested specification, resolved recursively into an object
    Spec(Specification),
    /// String with `{{property}}` placeholders
    Template(String),
    /// Passed through unchanged
    Literal(Value),
    /// A value with no interpretation; rejected at transform time
    Opaque(OpaqueValue),
}

impl ValueSpec {
    /// Wrap an infallible callable
    pub fn callable<F>(callable: F) -> Self
    where
        F: Fn(&dyn Model) -> Value + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(move |model: &dyn Model| -> anyhow::Result<Value> {
            Ok(callable(model))
        }))
    }

    /// Wrap a callable that may fail
    pub fn try_callable<F>(callable: F) -> Self
    where
        F: Fn(&dyn Model) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(callable))
    }

    /// Template string
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    /// Literal value
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Arbitrary value without a presentation meaning
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(OpaqueValue::new(value))
    }

    /// Interpret a declarative JSON value
    ///
    /// Strings become templates and objects become nested specifications.
    /// Non-empty arrays made only of property names and field objects become
    /// nested specifications; every other value is a literal.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(template) => Self::Template(template),
            Value::Object(fields) => Self::Spec(Specification::from_fields(fields)),
            Value::Array(items) if is_specification_array(&items) => {
                let mut spec = Specification::new();
                for item in items {
                    spec.push_positional(item);
                }
                Self::Spec(spec)
            }
            other => Self::Literal(other),
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Callable(_) => "callable",
            Self::Spec(_) => "specification",
            Self::Template(_) => "template",
            Self::Literal(_) => "literal",
            Self::Opaque(_) => "opaque",
        }
    }
}

impl fmt::Debug for ValueSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Spec(spec) => f.debug_tuple("Spec").field(spec).finish(),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Opaque(opaque) => f.debug_tuple("Opaque").field(opaque).finish(),
        }
    }
}

impl From<&str> for ValueSpec {
    fn from(template: &str) -> Self {
        Self::Template(template.to_string())
    }
}

impl From<String> for ValueSpec {
    fn from(template: String) -> Self {
        Self::Template(template)
    }
}

impl From<Specification> for ValueSpec {
    fn from(spec: Specification) -> Self {
        Self::Spec(spec)
    }
}

/// Type-erased value carried by [`ValueSpec::Opaque`]
#[derive(Clone)]
pub struct OpaqueValue {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueValue<{}>", self.type_name)
    }
}

/// One entry of a specification
#[derive(Debug, Clone)]
pub enum Entry {
    /// Copy the named property under the same key
    Property(String),
    /// Store the resolved value spec under the key
    Field(String, ValueSpec),
}

impl Entry {
    /// Output key produced by this entry
    pub fn key(&self) -> &str {
        match self {
            Self::Property(name) => name,
            Self::Field(key, _) => key,
        }
    }
}

/// Ordered set of transformation entries
#[derive(Debug, Clone, Default)]
pub struct Specification {
    entries: Vec<Entry>,
}

impl Specification {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent builder
    pub fn builder() -> SpecificationBuilder {
        SpecificationBuilder::new()
    }

    /// Specification made only of positional property names
    pub fn properties<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| Entry::Property(name.into()))
                .collect(),
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a declarative specification
    ///
    /// Arrays list property names (strings, or numbers and booleans read by
    /// their JSON text) and groups of keyed fields (objects); objects list
    /// keyed fields. Anything else is rejected.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Self::from_array(items),
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            other => Err(Error::invalid_specification(format!(
                "expected an array or an object, {} given",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a declarative specification from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(json)?)
    }

    fn from_array(items: Vec<Value>) -> Result<Self> {
        let mut spec = Self::new();
        for (position, item) in items.into_iter().enumerate() {
            if positional(&item) == Positional::Invalid {
                return Err(Error::invalid_specification(format!(
                    "item {} must be a property name or an object of fields, {} given",
                    position,
                    json_kind(&item)
                )));
            }
            spec.push_positional(item);
        }
        Ok(spec)
    }

    /// Append one item of an array specification; invalid items are the caller's concern
    fn push_positional(&mut self, item: Value) {
        match item {
            Value::String(name) => self.push(Entry::Property(name)),
            Value::Object(fields) => {
                for (key, value) in fields {
                    self.push(Entry::Field(key, ValueSpec::from_json(value)));
                }
            }
            scalar => self.push(Entry::Property(scalar.to_string())),
        }
    }

    fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            entries: fields
                .into_iter()
                .map(|(key, value)| Entry::Field(key, ValueSpec::from_json(value)))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Specification {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for Specification {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Specification {
    fn from(names: [&str; N]) -> Self {
        Self::properties(names)
    }
}

impl From<Vec<&str>> for Specification {
    fn from(names: Vec<&str>) -> Self {
        Self::properties(names)
    }
}

impl<'de> Deserialize<'de> for Specification {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Specification::from_json(value).map_err(serde::de::Error::custom)
    }
}

/// Builder for creating specifications
#[derive(Debug, Default)]
pub struct SpecificationBuilder {
    entries: Vec<Entry>,
}

impl SpecificationBuilder {
    /// Create a new specification builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a model property under its own name
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.entries.push(Entry::Property(name.into()));
        self
    }

    /// Add a keyed entry
    pub fn field(mut self, key: impl Into<String>, value: impl Into<ValueSpec>) -> Self {
        self.entries.push(Entry::Field(key.into(), value.into()));
        self
    }

    /// Add a keyed template entry
    pub fn template(self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.field(key, ValueSpec::template(template))
    }

    /// Add a keyed literal entry
    pub fn literal(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field(key, ValueSpec::literal(value))
    }

    /// Add a keyed callable entry
    pub fn callable<F>(self, key: impl Into<String>, callable: F) -> Self
    where
        F: Fn(&dyn Model) -> Value + Send + Sync + 'static,
    {
        self.field(key, ValueSpec::callable(callable))
    }

    /// Add a keyed nested specification
    pub fn nested(self, key: impl Into<String>, spec: Specification) -> Self {
        self.field(key, ValueSpec::Spec(spec))
    }

    /// Build the specification
    pub fn build(self) -> Specification {
        Specification {
            entries: self.entries,
        }
    }
}

fn is_specification_array(items: &[Value]) -> bool {
    !items.is_empty()
        && items
            .iter()
            .all(|item| matches!(positional(item), Positional::Name | Positional::Fields))
}

/// How an item of an array specification is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Positional {
    /// Property name
    Name,
    /// Object of keyed fields
    Fields,
    /// Number or boolean, read as a property named by its JSON text
    Scalar,
    /// Null or nested array
    Invalid,
}

fn positional(item: &Value) -> Positional {
    match item {
        Value::String(_) => Positional::Name,
        Value::Object(_) => Positional::Fields,
        Value::Number(_) | Value::Bool(_) => Positional::Scalar,
        Value::Null | Value::Array(_) => Positional::Invalid,
    }
}

/// Kind of a JSON value, for diagnostics
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
