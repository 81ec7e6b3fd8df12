//! GCC/Clang naming conventions and warning sets.

use std::path::{Path, PathBuf};

use super::CompilerFamily;

/// Warnings understood by both GCC and Clang.
const COMMON_WARNINGS: &[&str] = &[
    "all",
    "extra",
    "no-unused-parameter",
    "shadow",
    "format=2",
    "double-promotion",
    "null-dereference",
];

/// Warnings only GCC knows about.
const GCC_WARNINGS: &[&str] = &["duplicated-cond", "duplicated-branches", "logical-op"];

/// Split a trailing version suffix: `gcc-13` -> (`gcc`, `-13`).
fn split_version(name: &str) -> (&str, &str) {
    if let Some(idx) = name.rfind('-') {
        let suffix = &name[idx + 1..];
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return (&name[..idx], &name[idx..]);
        }
    }
    (name, "")
}

/// Whether a compiler name refers to a C++ driver (`g++`, `clang++-15`, `c++`).
pub fn is_cxx_name(name: &str) -> bool {
    split_version(name).0.ends_with("++")
}

/// Infer C++ compiler path from C compiler path.
///
/// Handles common patterns:
/// - gcc, x86_64-linux-gnu-gcc, gcc-13 -> g++, x86_64-linux-gnu-g++, g++-13
/// - clang, clang-15 -> clang++, clang++-15
/// - cc, /usr/bin/cc -> c++, /usr/bin/c++
pub fn infer_cxx(cc: &Path) -> PathBuf {
    let cc_str = cc.to_string_lossy();
    let (base, version) = split_version(&cc_str);

    let cxx = if let Some(stem) = base.strip_suffix("gcc") {
        format!("{}g++", stem)
    } else if base.ends_with("clang") {
        format!("{}++", base)
    } else if base == "cc" || base.ends_with("/cc") || base.ends_with("-cc") {
        // Only a complete "cc" basename, not "mycc"
        format!("{}++", &base[..base.len() - 1])
    } else {
        format!("{}++", base)
    };

    PathBuf::from(format!("{}{}", cxx, version))
}

/// Derive the C compiler from a C++ compiler name.
pub fn derive_cc(cxx: &Path) -> PathBuf {
    let cxx_str = cxx.to_string_lossy();
    let (base, version) = split_version(&cxx_str);

    let cc = if let Some(stem) = base.strip_suffix("clang++") {
        format!("{}clang", stem)
    } else if let Some(stem) = base.strip_suffix("g++") {
        format!("{}gcc", stem)
    } else if let Some(stem) = base.strip_suffix("c++") {
        format!("{}cc", stem)
    } else if let Some(stem) = base.strip_suffix("++") {
        stem.to_string()
    } else {
        base.to_string()
    };

    PathBuf::from(format!("{}{}", cc, version))
}

/// Compiler family from the compiler's name.
pub fn family_from_name(name: &str) -> CompilerFamily {
    let base = name.rsplit('/').next().unwrap_or(name).to_lowercase();
    if base.contains("clang") {
        CompilerFamily::Clang
    } else {
        CompilerFamily::Gcc
    }
}

/// Warning flags for a compiler family.
pub fn warning_flags(family: CompilerFamily) -> Vec<String> {
    let mut warnings: Vec<&str> = COMMON_WARNINGS.to_vec();
    if family == CompilerFamily::Gcc {
        warnings.extend_from_slice(GCC_WARNINGS);
    }
    warnings.iter().map(|w| format!("-W{}", w)).collect()
}
