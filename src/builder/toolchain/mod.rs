//! Toolchain selection for GCC-style C/C++ compilers.
//!
//! Selection priority:
//! 1. Cross-compilation prefix (`CXXENV_CROSS_PREFIX`)
//! 2. Alternate compiler named by the `compiler=` argument
//! 3. The system default (`cc`/`c++`)

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

mod detect;
mod gcc;

pub use detect::{detect_libdir, detect_native_family, parse_libdir, select_toolchain};
pub use gcc::{derive_cc, family_from_name, infer_cxx, is_cxx_name, warning_flags};

/// The compiler family of a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
}

impl CompilerFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the toolchain was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum ToolchainFlavor {
    /// Host default compiler
    Native,
    /// Cross compiler with the given tool prefix
    Cross(String),
    /// Alternate compiler selected by name
    Alternate(String),
}

impl ToolchainFlavor {
    /// Suffix distinguishing build directories of non-default toolchains.
    pub fn dir_suffix(&self) -> Option<String> {
        match self {
            ToolchainFlavor::Native => None,
            ToolchainFlavor::Cross(prefix) => Some(sanitize_component(prefix)),
            ToolchainFlavor::Alternate(name) => Some(sanitize_component(name)),
        }
    }
}

/// Compiler names and prefixes may be paths; keep them usable as a directory name.
fn sanitize_component(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.chars()
        .map(|c| if c.is_ascii_alphanumeric() || "+-_.".contains(c) { c } else { '_' })
        .collect()
}

/// Tools making up a toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolchain {
    pub cc: PathBuf,
    pub cxx: PathBuf,
    /// Linker driver (the C++ compiler for C++ projects)
    pub ld: PathBuf,
    pub ar: PathBuf,
    pub strip: PathBuf,
    pub family: CompilerFamily,
    pub flavor: ToolchainFlavor,
}

impl Toolchain {
    /// GCC toolchain prefixed for cross compilation, e.g. `aarch64-linux-gnu`.
    pub fn cross(prefix: &str) -> Self {
        Toolchain {
            cc: PathBuf::from(format!("{}-gcc", prefix)),
            cxx: PathBuf::from(format!("{}-g++", prefix)),
            ld: PathBuf::from(format!("{}-g++", prefix)),
            ar: PathBuf::from(format!("{}-ar", prefix)),
            strip: PathBuf::from(format!("{}-strip", prefix)),
            family: CompilerFamily::Gcc,
            flavor: ToolchainFlavor::Cross(prefix.to_string()),
        }
    }

    /// Toolchain for a compiler given by name.
    ///
    /// A name like `g++` or `clang++-15` is taken as the C++ compiler, anything else as
    /// the C compiler.
    pub fn alternate(name: &str) -> Self {
        let (cc, cxx) = match name {
            "gcc" => (PathBuf::from("gcc"), PathBuf::from("g++")),
            "clang" => (PathBuf::from("clang"), PathBuf::from("clang++")),
            _ if is_cxx_name(name) => (derive_cc(name.as_ref()), PathBuf::from(name)),
            _ => (PathBuf::from(name), infer_cxx(name.as_ref())),
        };

        Toolchain {
            ld: cxx.clone(),
            cc,
            cxx,
            ar: PathBuf::from("ar"),
            strip: PathBuf::from("strip"),
            family: family_from_name(name),
            flavor: ToolchainFlavor::Alternate(name.to_string()),
        }
    }

    /// The host's default compiler.
    pub fn native() -> Self {
        Toolchain {
            cc: PathBuf::from("cc"),
            cxx: PathBuf::from("c++"),
            ld: PathBuf::from("c++"),
            ar: PathBuf::from("ar"),
            strip: PathBuf::from("strip"),
            family: CompilerFamily::Gcc,
            flavor: ToolchainFlavor::Native,
        }
    }
}
