//! Library registry.
//!
//! When a library's build description is done it registers the produced
//! artifact together with the flags consumers need. Later descriptions link
//! against it by name without repeating those flags.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::FlagSet;

/// Registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("library `{0}` is already registered")]
    AlreadyRegistered(String),

    #[error("unknown library `{0}`")]
    UnknownLibrary(String),
}

/// Auxiliary per-library configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibConfig {
    /// `pkg-config` packages consumers of the library also need
    pub packages: Vec<String>,
    /// Library version, if known
    pub version: Option<String>,
}

impl LibConfig {
    /// Config requiring the given packages.
    pub fn with_packages<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LibConfig {
            packages: packages.into_iter().map(Into::into).collect(),
            version: None,
        }
    }
}

/// A registered library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibRecord {
    pub name: String,
    /// The built library file
    pub artifact: PathBuf,
    /// Flags consumers need, as supplied at registration
    pub flags: FlagSet,
    pub config: LibConfig,
}

impl LibRecord {
    /// Directory containing the artifact.
    pub fn artifact_dir(&self) -> &Path {
        self.artifact.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Name to library mapping shared by every derived environment.
#[derive(Debug, Clone, Default)]
pub struct LibraryRegistry {
    libs: BTreeMap<String, LibRecord>,
}

impl LibraryRegistry {
    pub fn new() -> Self {
        LibraryRegistry::default()
    }

    /// Record a library. Each name can only be registered once.
    pub fn register(&mut self, record: LibRecord) -> Result<(), RegistryError> {
        if self.libs.contains_key(&record.name) {
            return Err(RegistryError::AlreadyRegistered(record.name));
        }
        tracing::debug!(
            "registered library `{}` ({})",
            record.name,
            record.artifact.display()
        );
        self.libs.insert(record.name.clone(), record);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.libs.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&LibRecord> {
        self.libs.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.libs.keys().map(String::as_str)
    }
}
