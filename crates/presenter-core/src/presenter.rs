//! Public presenter façade and transformer normalization
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use crate::config::PresenterConfig;
use crate::model::Model;
use crate::pattern::GetterPattern;
use crate::spec::{json_kind, Specification, ValueSpec};
use crate::transmogrifier::Transmogrifier;
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug_span;

/// Produces the specification to apply to a given model
///
/// Implemented for every `Fn(&dyn Model) -> Specification` closure; implement
/// it on a type to get a reusable, named transformer.
pub trait Transform: Send + Sync {
    fn specification(&self, model: &dyn Model) -> Result<Specification>;
}

impl<F> Transform for F
where
    F: Fn(&dyn Model) -> Specification + Send + Sync,
{
    fn specification(&self, model: &dyn Model) -> Result<Specification> {
        Ok(self(model))
    }
}

struct Fixed(Specification);

impl Transform for Fixed {
    fn specification(&self, _model: &dyn Model) -> Result<Specification> {
        Ok(self.0.clone())
    }
}

struct Fallible<F>(F);

impl<F> Transform for Fallible<F>
where
    F: Fn(&dyn Model) -> Result<Specification> + Send + Sync,
{
    fn specification(&self, model: &dyn Model) -> Result<Specification> {
        (self.0)(model)
    }
}

/// A transformer normalized to a single callable shape
#[derive(Clone)]
pub struct Transformer {
    inner: Arc<dyn Transform>,
}

impl Transformer {
    /// Wrap any [`Transform`] implementation
    pub fn new<T: Transform + 'static>(transform: T) -> Self {
        Self {
            inner: Arc::new(transform),
        }
    }

    /// Transformer computed from the model by a closure
    pub fn from_fn<F>(transform: F) -> Self
    where
        F: Fn(&dyn Model) -> Specification + Send + Sync + 'static,
    {
        Self::new(transform)
    }

    /// Transformer computed from the model by a closure that may fail
    pub fn try_from_fn<F>(transform: F) -> Self
    where
        F: Fn(&dyn Model) -> Result<Specification> + Send + Sync + 'static,
    {
        Self::new(Fallible(transform))
    }

    /// Constant transformer; the model is ignored
    pub fn fixed(spec: Specification) -> Self {
        Self::new(Fixed(spec))
    }

    /// Specification to apply to `model`
    pub fn specification(&self, model: &dyn Model) -> Result<Specification> {
        self.inner.specification(model)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transformer(..)")
    }
}

impl From<Specification> for Transformer {
    fn from(spec: Specification) -> Self {
        Self::fixed(spec)
    }
}

/// Declarative transformer: an array or an object
impl TryFrom<Value> for Transformer {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            container @ (Value::Array(_) | Value::Object(_)) => {
                Ok(Self::fixed(Specification::from_json(container)?))
            }
            other => Err(Error::InvalidTransformer {
                found: json_kind(&other).to_string(),
            }),
        }
    }
}

impl TryFrom<ValueSpec> for Transformer {
    type Error = Error;

    fn try_from(value: ValueSpec) -> Result<Self> {
        match value {
            ValueSpec::Spec(spec) => Ok(Self::fixed(spec)),
            ValueSpec::Callable(callable) => Ok(Self::try_from_fn(move |model: &dyn Model| {
                let value = callable(model).map_err(|source| Error::Callable {
                    key: "$".to_string(),
                    source,
                })?;
                Specification::from_json(value)
            })),
            ValueSpec::Literal(value) => Self::try_from(value),
            ValueSpec::Template(_) => Err(Error::InvalidTransformer {
                found: "string".to_string(),
            }),
            ValueSpec::Opaque(opaque) => Err(Error::InvalidTransformer {
                found: opaque.type_name().to_string(),
            }),
        }
    }
}

/// Transforms models into view data
///
/// ```
/// use presenter_core::{Presenter, Specification};
/// use serde_json::json;
///
/// let presenter = Presenter::new(
///     Specification::builder()
///         .property("id")
///         .template("fullname", "{{firstname}} {{lastname}}")
///         .build(),
/// ).unwrap();
///
/// let model = json!({"id": 7, "firstname": "James", "lastname": "Bond"});
/// assert_eq!(
///     presenter.transform(&model).unwrap(),
///     json!({"id": 7, "fullname": "James Bond"})
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Presenter {
    transformer: Transformer,
    getter_pattern: GetterPattern,
}

impl Presenter {
    /// Create a presenter using the default `{{name}}` placeholder syntax
    pub fn new<T>(transformer: T) -> Result<Self>
    where
        T: TryInto<Transformer>,
        Error: From<T::Error>,
    {
        Self::with_pattern(transformer, GetterPattern::default())
    }

    /// Create a presenter with a custom placeholder syntax
    pub fn with_pattern<T>(transformer: T, getter_pattern: GetterPattern) -> Result<Self>
    where
        T: TryInto<Transformer>,
        Error: From<T::Error>,
    {
        Ok(Self {
            transformer: transformer.try_into()?,
            getter_pattern,
        })
    }

    /// Create a presenter from a closure computing the specification
    pub fn from_fn<F>(transform: F) -> Self
    where
        F: Fn(&dyn Model) -> Specification + Send + Sync + 'static,
    {
        Self {
            transformer: Transformer::from_fn(transform),
            getter_pattern: GetterPattern::default(),
        }
    }

    /// Create a presenter whose placeholder syntax comes from configuration
    pub fn from_config<T>(transformer: T, config: &PresenterConfig) -> Result<Self>
    where
        T: TryInto<Transformer>,
        Error: From<T::Error>,
    {
        Self::with_pattern(transformer, config.getter_pattern()?)
    }

    pub fn getter_pattern(&self) -> &GetterPattern {
        &self.getter_pattern
    }

    /// Transform a model into view data
    pub fn transform(&self, model: &dyn Model) -> Result<Value> {
        let spec = self.transformer.specification(model)?;

        let span = debug_span!("presenter.transform", entries = spec.len());
        let _guard = span.enter();

        Transmogrifier::new(&self.getter_pattern).transmogrify(model, &spec)
    }

    /// Transform every model in order, stopping at the first failure
    pub fn transform_all<I>(&self, models: I) -> Result<Vec<Value>>
    where
        I: IntoIterator,
        I::Item: Model,
    {
        models
            .into_iter()
            .map(|model| self.transform(&model))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_presenter_is_send_sync() {
        assert_send_sync::<Presenter>();
        assert_send_sync::<Transformer>();
        assert_send_sync::<Specification>();
    }

    #[test]
    fn test_fixed_transformer_ignores_model() {
        let transformer = Transformer::fixed(Specification::from(["id"]));
        let spec = transformer.specification(&json!({"other": 1})).unwrap();
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn test_value_transformer_must_be_container() {
        assert!(Transformer::try_from(json!(["id"])).is_ok());
        assert!(Transformer::try_from(json!({"id": "{{id}}"})).is_ok());

        for invalid in [json!("foo"), json!(3), json!(null), json!(false)] {
            let err = Transformer::try_from(invalid).unwrap_err();
            assert!(matches!(err, Error::InvalidTransformer { .. }));
        }
    }

    #[test]
    fn test_scalar_positional_items_resolve_by_name() {
        let presenter = Presenter::new(json!(["id", 3])).unwrap();
        let view = presenter.transform(&json!({"id": 1, "3": "three"})).unwrap();
        assert_eq!(view, json!({"id": 1, "3": "three"}));

        let view = presenter.transform(&json!({"id": 2})).unwrap();
        assert_eq!(view, json!({"id": 2, "3": "3"}));
    }

    #[test]
    fn test_value_spec_transformer() {
        assert!(Transformer::try_from(ValueSpec::from(Specification::new())).is_ok());
        assert!(matches!(
            Transformer::try_from(ValueSpec::template("foo")).unwrap_err(),
            Error::InvalidTransformer { .. }
        ));
        assert!(matches!(
            Transformer::try_from(ValueSpec::opaque(5u8)).unwrap_err(),
            Error::InvalidTransformer { found } if found == "u8"
        ));
    }

    #[test]
    fn test_callable_value_spec_transformer_parses_result() {
        let transformer = Transformer::try_from(ValueSpec::callable(|_| json!(["id"]))).unwrap();
        let spec = transformer.specification(&json!({})).unwrap();
        assert_eq!(spec.entries()[0].key(), "id");

        let broken = Transformer::try_from(ValueSpec::callable(|_| json!(12))).unwrap();
        assert!(matches!(
            broken.specification(&json!({})).unwrap_err(),
            Error::InvalidSpecification { .. }
        ));
    }

    #[test]
    fn test_transform_all() {
        let presenter = Presenter::new(Specification::from(["id"])).unwrap();
        let out = presenter
            .transform_all(vec![json!({"id": 1}), json!({"id": 2})])
            .unwrap();
        assert_eq!(out, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_from_config_uses_pattern() {
        let config = PresenterConfig {
            getter_pattern: Some(r"%(\w+)%".to_string()),
        };
        let presenter = Presenter::from_config(json!({"title": "%name%"}), &config).unwrap();
        assert_eq!(
            presenter.transform(&json!({"name": "Moneypenny"})).unwrap(),
            json!({"title": "Moneypenny"})
        );
    }
}
