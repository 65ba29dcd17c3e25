//! Placeholder syntax for template strings
//!
//! Copyright (c) 2025 Charcoal Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// Default placeholder syntax: `{{name}}`
pub const DEFAULT_GETTER_PATTERN: &str = r"\{\{(\w*?)\}\}";

static DEFAULT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Compiled placeholder pattern
///
/// The first capture group holds the property name to resolve. Matching is
/// non-overlapping, left to right.
#[derive(Clone)]
pub struct GetterPattern {
    regex: Regex,
}

impl GetterPattern {
    /// Compile a getter pattern; it must contain at least one capture group
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        if regex.captures_len() < 2 {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: "pattern needs a capture group for the property name".to_string(),
            });
        }

        Ok(Self { regex })
    }

    /// The pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Replace every placeholder with the text produced by `replacement`
    pub(crate) fn replace_all<F>(&self, template: &str, mut replacement: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        self.regex
            .replace_all(template, |caps: &Captures<'_>| {
                let name = caps.get(1).map_or("", |m| m.as_str());
                replacement(name)
            })
            .into_owned()
    }

    /// Property names referenced by `template`, in order of appearance
    pub fn placeholders<'t>(&self, template: &'t str) -> Vec<&'t str> {
        self.regex
            .captures_iter(template)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}

impl Default for GetterPattern {
    fn default() -> Self {
        let regex = DEFAULT_REGEX
            .get_or_init(|| {
                Regex::new(DEFAULT_GETTER_PATTERN).expect("default getter pattern is valid")
            })
            .clone();
        Self { regex }
    }
}

impl fmt::Debug for GetterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GetterPattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for GetterPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl std::str::FromStr for GetterPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern_placeholders() {
        let pattern = GetterPattern::default();
        assert_eq!(
            pattern.placeholders("{{firstname}} {{lastname}}"),
            vec!["firstname", "lastname"]
        );
        assert_eq!(pattern.as_str(), DEFAULT_GETTER_PATTERN);
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = GetterPattern::new(r":(\w*?):").unwrap();
        assert_eq!(
            pattern.placeholders(":firstname: :lastname:"),
            vec!["firstname", "lastname"]
        );
    }

    #[test]
    fn test_replace_all_leaves_other_text() {
        let pattern = GetterPattern::default();
        let out = pattern.replace_all("Hello {{name}}!", |name| name.to_uppercase());
        assert_eq!(out, "Hello NAME!");
    }

    #[test]
    fn test_pattern_without_group_is_rejected() {
        let err = GetterPattern::new(r"\{\{\w+\}\}").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_malformed_pattern_is_rejected() {
        let err = GetterPattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_from_str() {
        let pattern: GetterPattern = r"%(\w+)%".parse().unwrap();
        assert_eq!(pattern.placeholders("%a% %b%"), vec!["a", "b"]);
    }
}
