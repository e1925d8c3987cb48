//! # Command Options
//!
//! Typed access to the named, loosely typed options carried by an
//! interaction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single option value as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl OptionValue {
    fn kind(&self) -> &'static str {
        match self {
            OptionValue::Boolean(_) => "boolean",
            OptionValue::Integer(_) => "integer",
            OptionValue::String(_) => "string",
        }
    }
}

/// Failure to read a typed option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("missing option: {0}")]
    Missing(String),

    #[error("option {name}: expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Conversion from an `OptionValue` into a concrete type.
pub trait FromOptionValue: Sized {
    const KIND: &'static str;

    fn from_option_value(value: &OptionValue) -> Option<Self>;
}

impl FromOptionValue for String {
    const KIND: &'static str = "string";

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromOptionValue for i64 {
    const KIND: &'static str = "integer";

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromOptionValue for bool {
    const KIND: &'static str = "boolean";

    fn from_option_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// The options of one command invocation, by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandOptions(BTreeMap<String, OptionValue>);

impl CommandOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Typed value of option `name`.
    pub fn get<T: FromOptionValue>(&self, name: &str) -> Result<T, OptionError> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| OptionError::Missing(name.to_string()))?;
        T::from_option_value(value).ok_or_else(|| OptionError::TypeMismatch {
            name: name.to_string(),
            expected: T::KIND,
            found: value.kind(),
        })
    }

    /// Typed value of option `name`, or `default` when it is absent or of
    /// another type.
    pub fn get_or<T: FromOptionValue>(&self, name: &str, default: T) -> T {
        self.get(name).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CommandOptions {
        CommandOptions::new()
            .with("code", OptionValue::String("CEAAAAICAYBQYHA".into()))
            .with("count", OptionValue::Integer(3))
            .with("ephemeral", OptionValue::Boolean(true))
    }

    #[test]
    fn typed_get() {
        let opts = options();
        assert_eq!(opts.get::<String>("code").expect("code"), "CEAAAAICAYBQYHA");
        assert_eq!(opts.get::<i64>("count").expect("count"), 3);
        assert!(opts.get::<bool>("ephemeral").expect("flag"));
    }

    #[test]
    fn missing_and_mismatch_are_distinct() {
        let opts = options();
        assert_eq!(
            opts.get::<String>("language"),
            Err(OptionError::Missing("language".into()))
        );
        assert_eq!(
            opts.get::<String>("count"),
            Err(OptionError::TypeMismatch {
                name: "count".into(),
                expected: "string",
                found: "integer",
            })
        );
    }

    #[test]
    fn errors_display_the_option_name() {
        let opts = options();
        let missing = opts.get::<String>("language").expect_err("missing");
        assert_eq!(missing.to_string(), "missing option: language");
        let mismatch = opts.get::<bool>("code").expect_err("mismatch");
        assert_eq!(
            mismatch.to_string(),
            "option code: expected boolean, found string"
        );
    }

    #[test]
    fn get_or_falls_back() {
        let opts = options();
        assert_eq!(opts.get_or("language", "en_us".to_string()), "en_us");
        assert_eq!(opts.get_or("count", "x".to_string()), "x");
    }

    #[test]
    fn deserializes_json_object() {
        let opts: CommandOptions =
            serde_json::from_str(r#"{"code": "ABC", "count": 2, "flag": false}"#).expect("parse");
        assert_eq!(opts.get::<i64>("count").expect("count"), 2);
        assert!(!opts.get::<bool>("flag").expect("flag"));
    }
}
