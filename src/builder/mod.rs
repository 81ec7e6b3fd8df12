//! Build environment configuration.
//!
//! This module sets up the environment per-library build descriptions work
//! in: toolchain and flags, source discovery, the library registry and the
//! `pkg-config` cache.

pub mod environment;
pub mod init;
pub mod pkg_config;
pub mod registry;
pub mod sources;
pub mod toolchain;

pub use environment::{BuildEnv, RootEnv};
pub use init::{init_env, HostEnv};
pub use pkg_config::PkgConfigCache;
pub use registry::{LibConfig, LibRecord, LibraryRegistry, RegistryError};
pub use sources::{gather_sources, SourceError, SourceQuery};
pub use toolchain::{CompilerFamily, Toolchain, ToolchainFlavor};
