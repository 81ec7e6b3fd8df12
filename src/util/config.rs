//! Configuration file support for cxxenv.
//!
//! Two configuration file locations are consulted:
//! - Global: `<config dir>/cxxenv/config.toml` - User-wide defaults
//! - Project: `.cxxenv/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and `key=value`
//! arguments on the command line take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// cxxenv configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project settings
    pub project: ProjectConfig,

    /// Defaults for build arguments
    pub build: BuildConfig,

    /// External tool overrides
    pub tools: ToolsConfig,
}

/// Project identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name, defaults to the project directory name
    pub name: Option<String>,
}

/// Defaults for every recognized build argument.
///
/// Each field mirrors the `key=value` argument of the same name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    pub compiler: Option<String>,
    pub libtype: Option<String>,
    pub use_rpath: Option<bool>,
    pub use_system_pkgs: Option<bool>,
    pub buildroot: Option<String>,
    pub instroot: Option<String>,
    pub sanitizer: Option<bool>,
    pub debug: Option<bool>,
    pub optforsize: Option<bool>,
    pub release: Option<bool>,
    pub docs: Option<bool>,

    /// C++ language standard passed as `-std=`
    pub cxx_std: Option<String>,
}

/// External tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToolsConfig {
    /// Package-config query program (default `pkg-config`)
    pub pkg_config: Option<String>,
}

impl BuildConfig {
    /// Defaults as `(key, value)` argument pairs.
    pub fn as_args(&self) -> Vec<(String, String)> {
        let mut args = Vec::new();

        let strings = [
            ("compiler", &self.compiler),
            ("libtype", &self.libtype),
            ("buildroot", &self.buildroot),
            ("instroot", &self.instroot),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                args.push((key.to_string(), value.clone()));
            }
        }

        let bools = [
            ("use-rpath", self.use_rpath),
            ("use-system-pkgs", self.use_system_pkgs),
            ("sanitizer", self.sanitizer),
            ("debug", self.debug),
            ("optforsize", self.optforsize),
            ("release", self.release),
            ("docs", self.docs),
        ];
        for (key, value) in bools {
            if let Some(value) = value {
                let value = if value { "1" } else { "0" };
                args.push((key.to_string(), value.to_string()));
            }
        }

        args
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        fn take<T>(slot: &mut Option<T>, other: Option<T>) {
            if other.is_some() {
                *slot = other;
            }
        }

        take(&mut self.project.name, other.project.name);

        let b = other.build;
        take(&mut self.build.compiler, b.compiler);
        take(&mut self.build.libtype, b.libtype);
        take(&mut self.build.use_rpath, b.use_rpath);
        take(&mut self.build.use_system_pkgs, b.use_system_pkgs);
        take(&mut self.build.buildroot, b.buildroot);
        take(&mut self.build.instroot, b.instroot);
        take(&mut self.build.sanitizer, b.sanitizer);
        take(&mut self.build.debug, b.debug);
        take(&mut self.build.optforsize, b.optforsize);
        take(&mut self.build.release, b.release);
        take(&mut self.build.docs, b.docs);
        take(&mut self.build.cxx_std, b.cxx_std);

        take(&mut self.tools.pkg_config, other.tools.pkg_config);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cxxenv/config.toml)
/// 2. Global config (<config dir>/cxxenv/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config path (`<config dir>/cxxenv/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "cxxenv", "cxxenv").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the project config path (`.cxxenv/config.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".cxxenv").join("config.toml")
}
