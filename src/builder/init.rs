//! Environment initialization.
//!
//! Turns `key=value` arguments, configuration file defaults and a handful of
//! environment variables into a ready [`BuildEnv`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::builder::environment::{BuildEnv, RootEnv};
use crate::builder::pkg_config::{PkgConfigCache, DEFAULT_PROGRAM};
use crate::builder::toolchain::{
    detect_libdir, detect_native_family, select_toolchain, warning_flags, CompilerFamily,
};
use crate::core::options::sanitize_flag;
use crate::core::{BuildArgs, ConfigError, FlagKind, FlagSet, LibType, OptLevel};
use crate::util::config::Config;
use crate::util::process::CommandRunner;

/// Environment variable naming a cross-compilation tool prefix.
pub const CROSS_PREFIX_VAR: &str = "CXXENV_CROSS_PREFIX";

pub const DEFAULT_BUILDROOT: &str = "build";
pub const DEFAULT_INSTROOT: &str = "/usr/local";
pub const DEFAULT_CXX_STD: &str = "c++17";

/// The environment variables initialization consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnv {
    pub cross_prefix: Option<String>,
    pub cxxflags: Option<String>,
    pub cflags: Option<String>,
    pub ldflags: Option<String>,
    pub term: Option<String>,
    pub path: Option<String>,
    pub home: Option<String>,
    pub asan_options: Option<String>,
    pub pkg_config: Option<String>,
}

impl HostEnv {
    /// Read the variables from the current process.
    pub fn from_process() -> Self {
        let var = |key: &str| std::env::var(key).ok();
        HostEnv {
            cross_prefix: var(CROSS_PREFIX_VAR),
            cxxflags: var("CXXFLAGS"),
            cflags: var("CFLAGS"),
            ldflags: var("LDFLAGS"),
            term: var("TERM"),
            path: var("PATH"),
            home: var("HOME"),
            asan_options: var("ASAN_OPTIONS"),
            pkg_config: var("PKG_CONFIG"),
        }
    }
}

fn bool_arg(args: &BuildArgs, key: &str, default: bool) -> Result<bool, ConfigError> {
    Ok(args.get_bool(key, default)?)
}

/// Compile and link flags every build gets.
fn baseline_flags(
    family: CompilerFamily,
    cxx_std: &str,
    opt_level: OptLevel,
    release: bool,
    sanitize: bool,
) -> FlagSet {
    let mut flags = FlagSet::new();

    flags.append(FlagKind::CxxFlags, [format!("-std={}", cxx_std)]);
    flags.append(FlagKind::LinkFlags, ["-Wl,--as-needed"]);
    flags.append(FlagKind::CcFlags, warning_flags(family));

    flags.append(FlagKind::CcFlags, [opt_level.flag()]);
    if opt_level.is_optimizing() {
        flags.append(FlagKind::CcFlags, ["-flto"]);
        flags.append(FlagKind::LinkFlags, ["-flto"]);
    }
    if !release || opt_level == OptLevel::Debug {
        flags.append(FlagKind::CcFlags, ["-g"]);
    }
    if release {
        flags.append(FlagKind::CppDefines, ["NDEBUG"]);
    }

    if sanitize {
        let flag = sanitize_flag();
        flags.append(FlagKind::CcFlags, [flag.clone()]);
        flags.append(FlagKind::LinkFlags, [flag]);
    }

    flags
}

/// Build the initial environment.
///
/// `args` take precedence over the `[build]` defaults of `config`. The
/// compiler is asked for its library search directories, a failure to run it
/// is fatal.
pub fn init_env(
    project: &str,
    source_dir: &Path,
    args: &BuildArgs,
    config: &Config,
    host: &HostEnv,
    runner: Box<dyn CommandRunner>,
) -> Result<BuildEnv> {
    let args = args.clone().with_defaults(config.build.as_args());

    let libtype: LibType = args.get_or("libtype", LibType::default().as_str()).parse()?;
    let use_rpath = bool_arg(&args, "use-rpath", false)?;
    let use_system_pkgs = bool_arg(&args, "use-system-pkgs", false)?;
    let sanitize = bool_arg(&args, "sanitizer", false)?;
    let debug = bool_arg(&args, "debug", false)?;
    let optforsize = bool_arg(&args, "optforsize", false)?;
    let release = bool_arg(&args, "release", false)?;
    let build_docs = bool_arg(&args, "docs", true)?;

    let mut toolchain = select_toolchain(host.cross_prefix.as_deref(), args.get("compiler"));
    detect_native_family(runner.as_ref(), &mut toolchain);
    let libdir = detect_libdir(runner.as_ref(), &toolchain.cxx)?;

    tracing::info!(
        "using {} toolchain: {} / {}",
        toolchain.family,
        toolchain.cc.display(),
        toolchain.cxx.display()
    );

    let opt_level = OptLevel::select(debug, optforsize);
    let cxx_std = config.build.cxx_std.as_deref().unwrap_or(DEFAULT_CXX_STD);
    let mut flags = baseline_flags(toolchain.family, cxx_std, opt_level, release, sanitize);

    if let Some(cxxflags) = &host.cxxflags {
        flags.merge_flags(cxxflags, FlagKind::CxxFlags);
    }
    if let Some(cflags) = &host.cflags {
        flags.merge_flags(cflags, FlagKind::CFlags);
    }
    if let Some(ldflags) = &host.ldflags {
        flags.merge_flags(ldflags, FlagKind::LinkFlags);
    }

    let instroot = source_dir.join(args.get_or("instroot", DEFAULT_INSTROOT));
    if use_rpath && libtype == LibType::Shared {
        let rpath = instroot.join(libdir);
        flags.append(FlagKind::LinkFlags, [format!("-Wl,-rpath,{}", rpath.display())]);
    }

    let buildroot = args.get_or("buildroot", DEFAULT_BUILDROOT);
    let build_dir = match toolchain.flavor.dir_suffix() {
        Some(suffix) => source_dir.join(format!("{}.{}", buildroot, suffix)),
        None => source_dir.join(buildroot),
    };

    let mut run_env = BTreeMap::new();
    let passthrough = [
        ("PATH", &host.path),
        ("HOME", &host.home),
        ("TERM", &host.term),
    ];
    for (key, value) in passthrough {
        if let Some(value) = value {
            run_env.insert(key.to_string(), value.clone());
        }
    }
    if sanitize {
        if let Some(options) = &host.asan_options {
            run_env.insert("ASAN_OPTIONS".to_string(), options.clone());
        }
    }

    let pkg_program = host
        .pkg_config
        .clone()
        .or_else(|| config.tools.pkg_config.clone())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    tracing::debug!(
        "build dir {}, libtype {}, libdir {}",
        build_dir.display(),
        libtype,
        libdir
    );

    Ok(BuildEnv {
        project: project.to_string(),
        toolchain,
        flags,
        libtype,
        opt_level,
        sanitize,
        release,
        use_rpath,
        use_system_pkgs,
        build_docs,
        source_dir: source_dir.to_path_buf(),
        build_dir,
        instroot,
        libdir: libdir.to_string(),
        inputs: Vec::new(),
        run_env,
        args,
        root: RootEnv::new(runner, PkgConfigCache::new(pkg_program)),
    })
}
