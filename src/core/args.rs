//! Generic `key=value` build arguments.
//!
//! Arguments are given on the command line in the style `libtype=static
//! compiler=clang`. Lookups take a default, and boolean-like values are
//! evaluated with [`eval_bool`].

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Errors produced while reading build arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("malformed argument `{0}`: expected KEY=VALUE")]
    Malformed(String),

    #[error("invalid boolean value `{value}` for `{key}`")]
    InvalidBool { key: String, value: String },
}

/// Evaluate a boolean-like string.
///
/// Returns `None` when the value is not recognized.
pub fn eval_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// A set of named build arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildArgs {
    values: BTreeMap<String, String>,
}

impl BuildArgs {
    /// Create an empty argument set.
    pub fn new() -> Self {
        BuildArgs::default()
    }

    /// Parse `KEY=VALUE` strings. Later occurrences of a key win.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = BuildArgs::new();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg
                .split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| ArgError::Malformed(arg.to_string()))?;
            parsed.set(key, value);
        }
        Ok(parsed)
    }

    /// Fill in defaults for keys that are not already present.
    pub fn with_defaults<I>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in defaults {
            self.values.entry(key).or_insert(value);
        }
        self
    }

    /// Set an argument, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up an argument.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up an argument with a default.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Look up a boolean-like argument with a default.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, ArgError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => eval_bool(value).ok_or_else(|| ArgError::InvalidBool {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Check whether an argument was given.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over all arguments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
