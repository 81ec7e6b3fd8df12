//! cxxenv - Build-environment configuration for C++ projects
//!
//! This crate configures compiler and linker flags, discovers sources,
//! keeps a registry of libraries built in the same run and derives version
//! and install information. It drives no compiler itself; build
//! descriptions query the configured [`BuildEnv`] instead.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for cxxenv unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording command runner and project
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::builder::{init_env, BuildEnv, HostEnv, LibConfig, SourceQuery, Toolchain};
pub use crate::core::{BuildArgs, FlagKind, FlagSet, LibType};
pub use crate::util::context::GlobalContext;
