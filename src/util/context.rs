//! Global context for cxxenv operations.
//!
//! Provides centralized access to the project root, configuration files and
//! the process environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::HostEnv;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Root of the C++ project being configured
    project_root: PathBuf,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a context rooted at the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_root(cwd))
    }

    /// Create a context for an explicit project root.
    pub fn with_root(project_root: impl Into<PathBuf>) -> Self {
        GlobalContext {
            project_root: project_root.into(),
            color: true,
        }
    }

    /// Set whether to use colors.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Check if colors are enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Root of the project.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve a user-supplied path against the project root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    /// Path of the project-level config file.
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.project_root)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        let global = global_config_path();
        load_config(global.as_deref(), &self.project_config_path())
    }

    /// Project name: configured name, else the root directory's name.
    pub fn project_name(&self, config: &Config) -> String {
        config.project.name.clone().unwrap_or_else(|| {
            self.project_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "project".to_string())
        })
    }

    /// Snapshot of the environment variables the initializer consumes.
    pub fn host_env(&self) -> HostEnv {
        HostEnv::from_process()
    }
}
