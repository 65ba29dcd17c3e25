//! Error types for the presenter core library
//!
//! Construction failures (invalid transformer, invalid getter pattern) and
//! transformation failures (unsupported spec values, failing callables) are
//! all reported through the single [`Error`] enum defined here.
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use std::convert::Infallible;
use thiserror::Error;

/// Main error type for presenter operations
#[derive(Error, Debug)]
pub enum Error {
    /// The transformer is neither callable nor a container
    #[error("Transformer must be a specification (array or object) or a callable, {found} given")]
    InvalidTransformer {
        /// Kind of the rejected value
        found: String,
    },

    /// A specification entry has no defined interpretation
    #[error("Spec value at '{key}' must be callable, a specification, a string or a literal; {type_name} given")]
    UnsupportedSpecValue {
        /// `$`-rooted output path of the offending entry
        key: String,
        /// Rust type name of the offending value
        type_name: &'static str,
    },

    /// A user-supplied callable failed
    #[error("Callable at '{key}' failed: {source}")]
    Callable {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// The getter pattern cannot be used for placeholder matching
    #[error("Invalid getter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A declarative document cannot be read as a specification
    #[error("Invalid specification: {message}")]
    InvalidSpecification { message: String },

    /// JSON parsing errors for declarative input
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid specification error
    pub fn invalid_specification(message: impl Into<String>) -> Self {
        Self::InvalidSpecification {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

// Lets `Presenter::new` accept a ready-made `Transformer` through `TryInto`.
impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
