//! Memoized `pkg-config` queries.
//!
//! Looking up the flags of a package spawns a process. The answer can't
//! change during one run, so each package is queried once and the tokens are
//! kept for the rest of the run.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::util::process::{CommandRunner, ProcessBuilder};

/// Default name of the query tool.
pub const DEFAULT_PROGRAM: &str = "pkg-config";

/// Cache of compile/link flags per package.
#[derive(Debug, Clone)]
pub struct PkgConfigCache {
    program: String,
    flags: HashMap<String, Vec<String>>,
}

impl Default for PkgConfigCache {
    fn default() -> Self {
        PkgConfigCache::new(DEFAULT_PROGRAM)
    }
}

impl PkgConfigCache {
    pub fn new(program: impl Into<String>) -> Self {
        PkgConfigCache {
            program: program.into(),
            flags: HashMap::new(),
        }
    }

    /// The query tool in use.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check whether all `packages` are installed.
    ///
    /// Only the exit status counts; nothing is cached.
    pub fn exists<S: AsRef<str>>(&self, runner: &dyn CommandRunner, packages: &[S]) -> Result<bool> {
        let cmd = ProcessBuilder::new(&self.program)
            .arg("--exists")
            .args(packages.iter().map(AsRef::as_ref));
        let output = runner.run(&cmd)?;
        Ok(output.success())
    }

    /// Flags of a single package, querying the tool on first use.
    pub fn flags(&mut self, runner: &dyn CommandRunner, package: &str) -> Result<&[String]> {
        if !self.flags.contains_key(package) {
            let cmd = ProcessBuilder::new(&self.program).args(["--cflags", "--libs", package]);
            let output = runner
                .run_checked(&cmd)
                .with_context(|| format!("failed to query flags of package `{}`", package))?;

            let tokens: Vec<String> = output
                .stdout_lossy()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            tracing::debug!("pkg-config flags for `{}`: {:?}", package, tokens);
            self.flags.insert(package.to_string(), tokens);
        } else {
            tracing::trace!("pkg-config cache hit for `{}`", package);
        }

        Ok(self
            .flags
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Whether a package's flags are cached.
    pub fn is_cached(&self, package: &str) -> bool {
        self.flags.contains_key(package)
    }
}
