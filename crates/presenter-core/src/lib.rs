//! Presenter Core - presentation layer for arbitrary data models
//!
//! This crate transforms any model (a JSON document, a map, a struct exposed
//! through serde or an explicit adapter) into plain, ordered view data
//! according to a **transformer**.
//!
//! # Main Components
//!
//! - **Model**: capability trait probed for methods, properties and indexes
//! - **Property resolution**: method, then property, then index, then the
//!   property name itself
//! - **Specification**: ordered entries of property names and keyed value
//!   specs (callables, nested specifications, templates, literals)
//! - **Transmogrifier**: recursive interpreter producing the view data
//! - **Presenter**: façade normalizing the transformer and driving the rest
//!
//! # Example
//!
//! ```
//! use presenter_core::{Presenter, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let presenter = Presenter::new(json!([
//!         "id",
//!         {"fullname": "{{firstname}} {{lastname}}"}
//!     ]))?;
//!
//!     let view = presenter.transform(&json!({
//!         "id": 1,
//!         "firstname": "James",
//!         "lastname": "Bond"
//!     }))?;
//!
//!     assert_eq!(view, json!({"id": 1, "fullname": "James Bond"}));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod pattern;
pub mod presenter;
pub mod resolver;
pub mod spec;
pub mod transmogrifier;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use config::PresenterConfig;
pub use error::{Error, Result};
pub use model::{Adapter, Bound, Model, Serialized};
pub use pattern::{GetterPattern, DEFAULT_GETTER_PATTERN};
pub use presenter::{Presenter, Transform, Transformer};
pub use resolver::{lookup, resolve};
pub use spec::{CallableFn, Entry, OpaqueValue, Specification, SpecificationBuilder, ValueSpec};
pub use transmogrifier::{join_path, Transmogrifier};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::invalid_specification("Test error");
        assert!(err.to_string().contains("Test error"));
    }
}
