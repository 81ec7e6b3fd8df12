//! Typed build options derived from the raw arguments.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::core::args::ArgError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Sanitizers enabled by `sanitizer=1`.
pub const SANITIZERS: &[&str] = &["address", "undefined", "leak", "alignment", "return"];

/// Invalid build configuration. These are usage errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid libtype `{0}`: expected one of: shared, static")]
    InvalidLibType(String),

    #[error(transparent)]
    Arg(#[from] ArgError),
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::InvalidLibType(value) => {
                Diagnostic::error(format!("invalid libtype `{}`", value))
                    .with_context("libtype must be one of: shared, static")
                    .with_suggestion(suggestions::LIBTYPE)
            }
            ConfigError::Arg(err @ ArgError::InvalidBool { .. }) => {
                Diagnostic::error(err.to_string()).with_suggestion(suggestions::BOOL)
            }
            ConfigError::Arg(err @ ArgError::Malformed(_)) => {
                Diagnostic::error(err.to_string()).with_suggestion(suggestions::KEY_VALUE)
            }
        }
    }
}

/// How libraries are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibType {
    #[default]
    Shared,
    Static,
}

impl LibType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibType::Shared => "shared",
            LibType::Static => "static",
        }
    }
}

impl FromStr for LibType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(LibType::Shared),
            "static" => Ok(LibType::Static),
            other => Err(ConfigError::InvalidLibType(other.to_string())),
        }
    }
}

impl fmt::Display for LibType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization mode. `debug` wins over `optforsize`, which wins over the
/// default speed optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptLevel {
    Debug,
    Size,
    #[default]
    Speed,
}

impl OptLevel {
    /// Select the mode from the `debug` and `optforsize` switches.
    pub fn select(debug: bool, optforsize: bool) -> Self {
        if debug {
            OptLevel::Debug
        } else if optforsize {
            OptLevel::Size
        } else {
            OptLevel::Speed
        }
    }

    /// The `-O` flag for this mode.
    pub fn flag(&self) -> &'static str {
        match self {
            OptLevel::Debug => "-O0",
            OptLevel::Size => "-Os",
            OptLevel::Speed => "-O2",
        }
    }

    /// Whether link time optimization applies.
    pub fn is_optimizing(&self) -> bool {
        !matches!(self, OptLevel::Debug)
    }
}

/// The combined `-fsanitize=` flag.
pub fn sanitize_flag() -> String {
    format!("-fsanitize={}", SANITIZERS.join(","))
}
