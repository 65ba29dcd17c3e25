//! Model capability trait and the stock model implementations
//!
//! A presenter never knows the concrete shape of the data it presents. Instead
//! it probes the model through three optional capabilities:
//!
//! - a zero-argument method callable by name ([`Model::call`])
//! - a readable named property ([`Model::property`])
//! - key-based indexing ([`Model::index`])
//!
//! Every capability defaults to "not supported", so a model type only
//! implements what it actually exposes. JSON documents and string-keyed maps
//! implement [`Model::index`]; [`Serialized`] turns any `Serialize` type into
//! a property-exposing model; [`Adapter`] is an explicit per-type registry for
//! types that should expose computed methods.
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// Capability set a value must expose to be presented
pub trait Model {
    /// Invoke a zero-argument method named `name`
    fn call(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Read the property named `name`
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Look up the entry stored under `key`
    fn index(&self, _key: &str) -> Option<Value> {
        None
    }
}

impl<T: Model + ?Sized> Model for &T {
    fn call(&self, name: &str) -> Option<Value> {
        (**self).call(name)
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn index(&self, key: &str) -> Option<Value> {
        (**self).index(key)
    }
}

impl<T: Model + ?Sized> Model for Box<T> {
    fn call(&self, name: &str) -> Option<Value> {
        (**self).call(name)
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn index(&self, key: &str) -> Option<Value> {
        (**self).index(key)
    }
}

impl<T: Model + ?Sized> Model for Rc<T> {
    fn call(&self, name: &str) -> Option<Value> {
        (**self).call(name)
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn index(&self, key: &str) -> Option<Value> {
        (**self).index(key)
    }
}

impl<T: Model + ?Sized> Model for Arc<T> {
    fn call(&self, name: &str) -> Option<Value> {
        (**self).call(name)
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn index(&self, key: &str) -> Option<Value> {
        (**self).index(key)
    }
}

/// JSON documents are indexable: objects by key, arrays by numeric position
impl Model for Value {
    fn index(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.get(key).cloned(),
            Value::Array(items) => array_position(key)
                .and_then(|position| items.get(position))
                .cloned(),
            _ => None,
        }
    }
}

/// Position named by a canonical decimal key; `"+1"` and `"01"` name no element
fn array_position(key: &str) -> Option<usize> {
    if key.starts_with('+') || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    key.parse().ok()
}

impl Model for Map<String, Value> {
    fn index(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl<V: Serialize, S: BuildHasher> Model for HashMap<String, V, S> {
    fn index(&self, key: &str) -> Option<Value> {
        self.get(key).and_then(|value| serde_json::to_value(value).ok())
    }
}

impl<V: Serialize> Model for BTreeMap<String, V> {
    fn index(&self, key: &str) -> Option<Value> {
        self.get(key).and_then(|value| serde_json::to_value(value).ok())
    }
}

/// A model backed by the serde representation of a value
///
/// Struct fields become readable properties. The value is serialized once,
/// when the wrapper is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized {
    fields: Value,
}

impl Serialized {
    /// Serialize `value` and expose its fields as properties
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self {
            fields: serde_json::to_value(value)?,
        })
    }

    /// The serialized representation
    pub fn as_value(&self) -> &Value {
        &self.fields
    }
}

impl Model for Serialized {
    fn property(&self, name: &str) -> Option<Value> {
        match &self.fields {
            Value::Object(map) => map.get(name).cloned(),
            _ => None,
        }
    }
}

type MethodFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;
type PropertyFn<T> = Arc<dyn Fn(&T) -> Option<Value> + Send + Sync>;
type IndexFn<T> = Arc<dyn Fn(&T, &str) -> Option<Value> + Send + Sync>;

/// Explicit capability registry for a concrete model type
///
/// ```
/// use presenter_core::{Adapter, resolve};
/// use serde_json::json;
///
/// struct Agent { first: String, last: String }
///
/// let adapter = Adapter::<Agent>::new()
///     .property("first", |a| Some(json!(a.first)))
///     .method("fullname", |a| json!(format!("{} {}", a.first, a.last)));
///
/// let agent = Agent { first: "James".into(), last: "Bond".into() };
/// assert_eq!(resolve(&adapter.bind(&agent), "fullname"), json!("James Bond"));
/// ```
pub struct Adapter<T> {
    methods: HashMap<String, MethodFn<T>>,
    properties: HashMap<String, PropertyFn<T>>,
    index: Option<IndexFn<T>>,
}

impl<T> Adapter<T> {
    /// Create an adapter that exposes nothing
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
            properties: HashMap::new(),
            index: None,
        }
    }

    /// Register a zero-argument method
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Register a readable property; `None` means the property is unset
    pub fn property<F>(mut self, name: impl Into<String>, property: F) -> Self
    where
        F: Fn(&T) -> Option<Value> + Send + Sync + 'static,
    {
        self.properties.insert(name.into(), Arc::new(property));
        self
    }

    /// Register the keyed index lookup
    pub fn index<F>(mut self, index: F) -> Self
    where
        F: Fn(&T, &str) -> Option<Value> + Send + Sync + 'static,
    {
        self.index = Some(Arc::new(index));
        self
    }

    /// Attach the adapter to a value, producing a [`Model`]
    pub fn bind<'a>(&'a self, target: &'a T) -> Bound<'a, T> {
        Bound {
            adapter: self,
            target,
        }
    }
}

impl<T> Default for Adapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Adapter<T> {
    fn clone(&self) -> Self {
        Self {
            methods: self.methods.clone(),
            properties: self.properties.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> fmt::Debug for Adapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        let mut properties: Vec<&String> = self.properties.keys().collect();
        properties.sort();

        f.debug_struct("Adapter")
            .field("methods", &methods)
            .field("properties", &properties)
            .field("index", &self.index.is_some())
            .finish()
    }
}

/// A value viewed through an [`Adapter`]
pub struct Bound<'a, T> {
    adapter: &'a Adapter<T>,
    target: &'a T,
}

impl<T> Model for Bound<'_, T> {
    fn call(&self, name: &str) -> Option<Value> {
        self.adapter
            .methods
            .get(name)
            .map(|method| method(self.target))
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.adapter
            .properties
            .get(name)
            .and_then(|property| property(self.target))
    }

    fn index(&self, key: &str) -> Option<Value> {
        self.adapter
            .index
            .as_ref()
            .and_then(|index| index(self.target, key))
    }
}
