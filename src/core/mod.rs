//! Core data types: build arguments, typed options and flag sets.

pub mod args;
pub mod flags;
pub mod options;

pub use args::{ArgError, BuildArgs};
pub use flags::{FlagKind, FlagSet};
pub use options::{ConfigError, LibType, OptLevel};
