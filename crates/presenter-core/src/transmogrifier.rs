//! Recursive interpretation of specifications against a model
//!
//! The transmogrifier walks a [`Specification`] entry by entry and builds an
//! ordered JSON object:
//!
//! - positional entries resolve the property of the same name
//! - callables receive the model and their result is used verbatim
//! - nested specifications recurse
//! - templates get their placeholders substituted
//! - literals pass through
//!
//! Opaque values have no interpretation and abort the transformation with
//! [`Error::UnsupportedSpecValue`].
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use crate::model::Model;
use crate::pattern::GetterPattern;
use crate::resolver::resolve;
use crate::spec::{Entry, Specification, ValueSpec};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fmt;
use tracing::trace;

/// Output path of the entry being resolved, rendered as `$.a.b` (see [`join_path`])
#[derive(Clone, Copy)]
struct KeyPath<'a> {
    key: &'a str,
    parent: Option<&'a KeyPath<'a>>,
}

const ROOT: KeyPath<'static> = KeyPath {
    key: "$",
    parent: None,
};

impl<'a> KeyPath<'a> {
    fn child(&'a self, key: &'a str) -> KeyPath<'a> {
        KeyPath {
            key,
            parent: Some(self),
        }
    }
}

impl fmt::Display for KeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) => {
                write!(f, "{}", parent)?;
                write_segment(f, self.key)
            }
            None => f.write_str(self.key),
        }
    }
}

/// Append `key` to a `$`-rooted output path
///
/// Plain keys are joined with a dot. Keys that are empty or contain `.`,
/// `[`, `]` or `"` are bracket-quoted as JSON strings, e.g. `$["a.b"]`.
pub fn join_path(parent: &str, key: &str) -> String {
    let mut path = parent.to_string();
    // Writing into a String cannot fail
    let _ = write_segment(&mut path, key);
    path
}

fn write_segment<W: fmt::Write>(out: &mut W, key: &str) -> fmt::Result {
    if key.is_empty() || key.contains(['.', '[', ']', '"']) {
        write!(out, "[{}]", Value::from(key))
    } else {
        write!(out, ".{}", key)
    }
}

/// Interprets value specs with a fixed placeholder pattern
#[derive(Debug, Clone, Copy)]
pub struct Transmogrifier<'p> {
    pattern: &'p GetterPattern,
}

impl<'p> Transmogrifier<'p> {
    pub fn new(pattern: &'p GetterPattern) -> Self {
        Self { pattern }
    }

    /// Resolve a whole specification into an ordered object
    pub fn transmogrify(&self, model: &dyn Model, spec: &Specification) -> Result<Value> {
        self.resolve_spec(model, spec, &ROOT)
    }

    /// Resolve a single value spec
    pub fn transmogrify_value(&self, model: &dyn Model, value: &ValueSpec) -> Result<Value> {
        self.resolve_value(model, value, &ROOT)
    }

    /// Substitute every placeholder of `template`
    pub fn render(&self, model: &dyn Model, template: &str) -> String {
        self.pattern
            .replace_all(template, |name| display_value(&resolve(model, name)))
    }

    fn resolve_spec(
        &self,
        model: &dyn Model,
        spec: &Specification,
        path: &KeyPath<'_>,
    ) -> Result<Value> {
        let mut data = Map::with_capacity(spec.len());

        for entry in spec {
            match entry {
                Entry::Property(name) => {
                    let value = resolve(model, name);
                    trace!(path = %path.child(name), "resolved property");
                    data.insert(name.clone(), value);
                }
                Entry::Field(key, value) => {
                    let child = path.child(key);
                    let resolved = self.resolve_value(model, value, &child)?;
                    trace!(path = %child, kind = value.kind(), "resolved field");
                    data.insert(key.clone(), resolved);
                }
            }
        }

        Ok(Value::Object(data))
    }

    fn resolve_value(
        &self,
        model: &dyn Model,
        value: &ValueSpec,
        path: &KeyPath<'_>,
    ) -> Result<Value> {
        match value {
            ValueSpec::Callable(callable) => callable(model).map_err(|source| Error::Callable {
                key: path.to_string(),
                source,
            }),
            ValueSpec::Spec(spec) => self.resolve_spec(model, spec, path),
            ValueSpec::Template(template) => Ok(Value::String(self.render(model, template))),
            ValueSpec::Literal(literal) => Ok(literal.clone()),
            ValueSpec::Opaque(opaque) => Err(Error::UnsupportedSpecValue {
                key: path.to_string(),
                type_name: opaque.type_name(),
            }),
        }
    }
}

/// Text substituted for a resolved placeholder
///
/// Strings are inserted verbatim, null becomes empty, everything else uses
/// its compact JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
