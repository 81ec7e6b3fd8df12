//! The build environment handed to per-library build descriptions.
//!
//! A [`BuildEnv`] is created once by [`init_env`](super::init_env) and then
//! derived for each library. Derived environments own their flags, but share
//! a [`RootEnv`]: the library registry and the `pkg-config` cache live there,
//! so a library registered through one environment is visible to all others.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;

use crate::builder::pkg_config::PkgConfigCache;
use crate::builder::registry::{LibConfig, LibRecord, LibraryRegistry, RegistryError};
use crate::builder::sources::{gather_sources, SourceError, SourceQuery};
use crate::builder::toolchain::Toolchain;
use crate::core::{BuildArgs, FlagKind, FlagSet, LibType, OptLevel};
use crate::util::process::CommandRunner;

/// Variable holding the runtime library search path of test binaries.
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// State shared by every environment derived from one initialization.
pub struct RootEnv {
    registry: RefCell<LibraryRegistry>,
    pkg_config: RefCell<PkgConfigCache>,
    runner: Box<dyn CommandRunner>,
}

impl fmt::Debug for RootEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootEnv")
            .field("registry", &self.registry)
            .field("pkg_config", &self.pkg_config)
            .finish_non_exhaustive()
    }
}

impl RootEnv {
    pub fn new(runner: Box<dyn CommandRunner>, pkg_config: PkgConfigCache) -> Rc<Self> {
        Rc::new(RootEnv {
            registry: RefCell::new(LibraryRegistry::new()),
            pkg_config: RefCell::new(pkg_config),
            runner,
        })
    }

    /// Runner for external tools.
    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Names of all registered libraries.
    pub fn registered_libs(&self) -> Vec<String> {
        self.registry.borrow().names().map(str::to_string).collect()
    }
}

/// A configured build environment.
#[derive(Debug, Clone, Serialize)]
pub struct BuildEnv {
    /// Project name, used for install paths
    pub project: String,
    pub toolchain: Toolchain,
    pub flags: FlagSet,
    pub libtype: LibType,
    pub opt_level: OptLevel,
    pub sanitize: bool,
    pub release: bool,
    pub use_rpath: bool,
    /// Fall back to `pkg-config` for libraries not built here
    pub use_system_pkgs: bool,
    pub build_docs: bool,
    /// Directory the build descriptions live in
    pub source_dir: PathBuf,
    /// Variant directory for build outputs
    pub build_dir: PathBuf,
    /// Install prefix
    pub instroot: PathBuf,
    /// `lib` or `lib64`
    pub libdir: String,
    /// Extra objects and static archives to link
    pub inputs: Vec<PathBuf>,
    /// Environment for running built binaries (tests)
    pub run_env: BTreeMap<String, String>,
    /// All arguments, including unrecognized ones
    pub args: BuildArgs,

    #[serde(skip)]
    pub(crate) root: Rc<RootEnv>,
}

impl BuildEnv {
    /// Copy of this environment sharing the same root state.
    ///
    /// Flags changed on the copy don't affect this environment, library
    /// registrations do.
    pub fn derive(&self) -> BuildEnv {
        self.clone()
    }

    pub fn root(&self) -> &RootEnv {
        &self.root
    }

    /// Whether two environments share their root state.
    pub fn shares_root(&self, other: &BuildEnv) -> bool {
        Rc::ptr_eq(&self.root, &other.root)
    }

    /// Install location for libraries.
    pub fn lib_install_dir(&self) -> PathBuf {
        self.instroot.join(&self.libdir)
    }

    /// Find sources below the environment's source directory.
    pub fn gather_sources(&self, query: &SourceQuery) -> Result<Vec<PathBuf>, SourceError> {
        gather_sources(&self.source_dir, query)
    }

    /// Record a built library so other descriptions can link against it.
    pub fn register_lib(
        &self,
        name: &str,
        artifact: impl Into<PathBuf>,
        flags: FlagSet,
        config: LibConfig,
    ) -> Result<(), RegistryError> {
        self.root.registry.borrow_mut().register(LibRecord {
            name: name.to_string(),
            artifact: artifact.into(),
            flags,
            config,
        })
    }

    pub fn has_lib(&self, name: &str) -> bool {
        self.root.registry.borrow().contains(name)
    }

    /// Flags of a registered library, exactly as registered.
    pub fn lib_flags(&self, name: &str) -> Result<FlagSet, RegistryError> {
        self.lib_record(name).map(|record| record.flags)
    }

    fn lib_record(&self, name: &str) -> Result<LibRecord, RegistryError> {
        self.root
            .registry
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownLibrary(name.to_string()))
    }

    /// Set up this environment to compile and link against library `name`.
    ///
    /// Libraries not registered here are looked up with `pkg-config` when
    /// system packages are allowed.
    pub fn configure_for_lib(&mut self, name: &str) -> Result<()> {
        let record = match self.lib_record(name) {
            Ok(record) => record,
            Err(err) => {
                if self.use_system_pkgs {
                    tracing::debug!("`{}` is not built here, asking pkg-config", name);
                    return self.configure_for_pkg(&[name]);
                }
                return Err(err.into());
            }
        };

        self.flags.merge(&record.flags);

        match self.libtype {
            LibType::Static => {
                if !self.inputs.contains(&record.artifact) {
                    self.inputs.push(record.artifact.clone());
                }
            }
            LibType::Shared => {
                let dir = record.artifact_dir().to_string_lossy().into_owned();
                self.flags.append_unique(FlagKind::LibPath, [dir]);
                self.flags.append_unique(FlagKind::Libs, [name]);
            }
        }

        if !record.config.packages.is_empty() {
            self.configure_for_pkg(&record.config.packages)?;
        }

        Ok(())
    }

    /// Make library `name` loadable by binaries run from this environment.
    pub fn configure_run_for_lib(&mut self, name: &str) -> Result<(), RegistryError> {
        let record = self.lib_record(name)?;
        let dir = record.artifact_dir().to_string_lossy().into_owned();

        let value = match self.run_env.get(LIBRARY_PATH_VAR) {
            Some(current) if current.split(':').next() == Some(dir.as_str()) => current.clone(),
            Some(current) if !current.is_empty() => format!("{}:{}", dir, current),
            _ => dir,
        };
        self.run_env.insert(LIBRARY_PATH_VAR.to_string(), value);
        Ok(())
    }

    /// Check whether all `packages` are installed on the system.
    pub fn pkg_exists<S: AsRef<str>>(&self, packages: &[S]) -> Result<bool> {
        self.root
            .pkg_config
            .borrow()
            .exists(self.root.runner(), packages)
    }

    /// Merge the compile and link flags of system packages.
    pub fn configure_for_pkg<S: AsRef<str>>(&mut self, packages: &[S]) -> Result<()> {
        for package in packages {
            let tokens = self
                .root
                .pkg_config
                .borrow_mut()
                .flags(self.root.runner(), package.as_ref())?
                .to_vec();
            self.flags
                .merge(&FlagSet::parse_tokens(&tokens, FlagKind::CcFlags));
        }
        Ok(())
    }
}
