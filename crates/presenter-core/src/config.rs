//! Presenter configuration
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use crate::pattern::GetterPattern;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Settings used to build a [`Presenter`](crate::Presenter)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Placeholder regex with one capture group; `{{name}}` when unset
    pub getter_pattern: Option<String>,
}

impl PresenterConfig {
    /// Compile the configured getter pattern
    pub fn getter_pattern(&self) -> Result<GetterPattern> {
        match &self.getter_pattern {
            Some(pattern) => GetterPattern::new(pattern),
            None => Ok(GetterPattern::default()),
        }
    }

    /// Merge with another config (other takes precedence)
    pub fn merge(&mut self, other: PresenterConfig) {
        if other.getter_pattern.is_some() {
            self.getter_pattern = other.getter_pattern;
        }
    }
}
