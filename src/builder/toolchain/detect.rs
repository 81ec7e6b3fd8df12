//! Toolchain detection functions.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::util::process::{CommandRunner, ProcessBuilder};

use super::{CompilerFamily, Toolchain, ToolchainFlavor};

static LIBRARIES_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^libraries: =(.*)$").unwrap());

static LIB64_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/lib64(/|:|$)").unwrap());

/// Choose the toolchain.
///
/// A cross prefix wins over an explicitly named compiler, which wins over
/// the native default.
pub fn select_toolchain(cross_prefix: Option<&str>, compiler: Option<&str>) -> Toolchain {
    if let Some(prefix) = cross_prefix.filter(|p| !p.is_empty()) {
        tracing::debug!("using cross toolchain with prefix `{}`", prefix);
        return Toolchain::cross(prefix);
    }

    if let Some(name) = compiler.filter(|c| !c.is_empty()) {
        tracing::debug!("using alternate compiler `{}`", name);
        return Toolchain::alternate(name);
    }

    Toolchain::native()
}

/// Refine the family of the native toolchain from `--version` output.
///
/// `c++` may be either GCC or Clang; the name alone does not tell.
pub fn detect_native_family(runner: &dyn CommandRunner, toolchain: &mut Toolchain) {
    if toolchain.flavor != ToolchainFlavor::Native {
        return;
    }

    let cmd = ProcessBuilder::new(&toolchain.cxx).arg("--version");
    match runner.run(&cmd) {
        Ok(output) if output.success() => {
            if output.stdout_lossy().to_lowercase().contains("clang") {
                toolchain.family = CompilerFamily::Clang;
            }
        }
        Ok(output) => {
            tracing::debug!(
                "`{}` exited with {:?}, assuming gcc",
                cmd.display_command(),
                output.code
            );
        }
        Err(e) => {
            tracing::debug!("failed to run `{}`: {:#}, assuming gcc", cmd.display_command(), e);
        }
    }
}

/// Library directory name used by the compiler's default search path.
pub fn parse_libdir(search_dirs: &str) -> &'static str {
    let libraries = LIBRARIES_LINE
        .captures(search_dirs)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or("");

    if LIB64_COMPONENT.is_match(libraries) {
        "lib64"
    } else {
        "lib"
    }
}

/// Ask the compiler whether libraries live in `lib` or `lib64`.
pub fn detect_libdir(runner: &dyn CommandRunner, cxx: &Path) -> Result<&'static str> {
    let cmd = ProcessBuilder::new(cxx).arg("-print-search-dirs");
    let output = runner
        .run_checked(&cmd)
        .with_context(|| format!("failed to query search dirs of `{}`", cxx.display()))?;

    let libdir = parse_libdir(&output.stdout_lossy());
    tracing::debug!("library dir suffix for `{}`: {}", cxx.display(), libdir);
    Ok(libdir)
}
