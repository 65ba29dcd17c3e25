//! Generic property resolution against a [`Model`]
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use crate::model::Model;
use serde_json::Value;

/// Fetch a property from any model, trying in order:
///
/// 1. a method call (`model.name()`)
/// 2. a property read (`model.name`), unless unset or null
/// 3. an indexed read (`model["name"]`), unless absent or null
///
/// When nothing matches, the property name itself is returned unchanged so
/// that unresolved template placeholders degrade to their literal text.
/// Resolution never fails.
pub fn resolve(model: &dyn Model, name: &str) -> Value {
    lookup(model, name).unwrap_or_else(|| Value::String(name.to_string()))
}

/// Same resolution order as [`resolve`], without the name fallback
pub fn lookup(model: &dyn Model, name: &str) -> Option<Value> {
    if let Some(value) = model.call(name) {
        return Some(value);
    }

    model
        .property(name)
        .filter(|value| !value.is_null())
        .or_else(|| model.index(name).filter(|value| !value.is_null()))
}
