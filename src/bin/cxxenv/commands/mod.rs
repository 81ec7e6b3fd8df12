//! Command implementations

pub mod completions;
pub mod configure;
pub mod flags;
pub mod install;
pub mod sources;
pub mod toolchain;
pub mod version;
