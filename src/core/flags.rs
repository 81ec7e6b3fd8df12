//! Compiler and linker flag sets.
//!
//! A [`FlagSet`] keeps flags sorted into the categories a C++ build cares
//! about. Flag strings coming from the environment (`CXXFLAGS`), from
//! `pkg-config` or from users are classified by [`FlagSet::parse`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flag categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagKind {
    /// Include search paths (`-I`)
    CppPath,
    /// Preprocessor defines (`-D`)
    CppDefines,
    /// Flags for both C and C++ compilation
    CcFlags,
    /// C-only compile flags
    CFlags,
    /// C++-only compile flags
    CxxFlags,
    /// Linker flags
    LinkFlags,
    /// Library search paths (`-L`)
    LibPath,
    /// Libraries to link (`-l`)
    Libs,
}

impl FlagKind {
    /// Conventional variable name for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::CppPath => "CPPPATH",
            FlagKind::CppDefines => "CPPDEFINES",
            FlagKind::CcFlags => "CCFLAGS",
            FlagKind::CFlags => "CFLAGS",
            FlagKind::CxxFlags => "CXXFLAGS",
            FlagKind::LinkFlags => "LINKFLAGS",
            FlagKind::LibPath => "LIBPATH",
            FlagKind::Libs => "LIBS",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags that take their argument as the following token.
const PAIRED_COMPILE_FLAGS: &[&str] = &["-isystem", "-include", "-iquote", "-idirafter", "-imacros"];

/// Flags that must reach both the compiler and the linker.
fn is_compile_and_link_flag(flag: &str) -> bool {
    flag == "-pthread"
        || flag == "-fopenmp"
        || flag.starts_with("-fsanitize=")
        || flag == "-flto"
        || flag.starts_with("-flto=")
        || flag == "--coverage"
}

/// Value of a flag given either attached (`-Idir`) or as the next token.
fn take_value<I: Iterator<Item = String>>(token: &str, prefix: &str, rest: &mut I) -> Option<String> {
    if token == prefix {
        rest.next()
    } else {
        token.strip_prefix(prefix).map(str::to_string)
    }
}

/// Named lists of compiler and linker flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    pub cpppath: Vec<String>,
    pub cppdefines: Vec<String>,
    pub ccflags: Vec<String>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub linkflags: Vec<String>,
    pub libpath: Vec<String>,
    pub libs: Vec<String>,
}

impl FlagSet {
    /// Create an empty flag set.
    pub fn new() -> Self {
        FlagSet::default()
    }

    /// Parse a whitespace separated flag string.
    ///
    /// Flags without a dedicated category land in `fallback`.
    pub fn parse(flags: &str, fallback: FlagKind) -> Self {
        Self::parse_tokens(flags.split_whitespace(), fallback)
    }

    /// Classify already tokenized flags.
    pub fn parse_tokens<I, S>(tokens: I, fallback: FlagKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = FlagSet::new();
        let mut tokens = tokens.into_iter().map(|t| t.as_ref().to_string());

        while let Some(token) = tokens.next() {
            if token.starts_with("-I") {
                if let Some(dir) = take_value(&token, "-I", &mut tokens) {
                    set.cpppath.push(dir);
                }
            } else if token.starts_with("-D") {
                if let Some(define) = take_value(&token, "-D", &mut tokens) {
                    set.cppdefines.push(define);
                }
            } else if token.starts_with("-L") {
                if let Some(dir) = take_value(&token, "-L", &mut tokens) {
                    set.libpath.push(dir);
                }
            } else if token.starts_with("-l") {
                if let Some(lib) = take_value(&token, "-l", &mut tokens) {
                    set.libs.push(lib);
                }
            } else if token.starts_with("-Wl,") || token == "-rdynamic" || token == "-shared" {
                set.linkflags.push(token);
            } else if PAIRED_COMPILE_FLAGS.contains(&token.as_str()) {
                let value = tokens.next();
                set.ccflags.push(token);
                set.ccflags.extend(value);
            } else if is_compile_and_link_flag(&token) {
                set.ccflags.push(token.clone());
                set.linkflags.push(token);
            } else if token.starts_with("-std=c++") || token.starts_with("-std=gnu++") {
                set.cxxflags.push(token);
            } else if token.starts_with("-std=") {
                set.cflags.push(token);
            } else if !token.starts_with('-')
                && (token.ends_with(".a") || token.ends_with(".so") || token.contains(".so."))
            {
                set.libs.push(token);
            } else {
                set.list_mut(fallback).push(token);
            }
        }

        set
    }

    /// Access a category.
    pub fn list(&self, kind: FlagKind) -> &[String] {
        match kind {
            FlagKind::CppPath => &self.cpppath,
            FlagKind::CppDefines => &self.cppdefines,
            FlagKind::CcFlags => &self.ccflags,
            FlagKind::CFlags => &self.cflags,
            FlagKind::CxxFlags => &self.cxxflags,
            FlagKind::LinkFlags => &self.linkflags,
            FlagKind::LibPath => &self.libpath,
            FlagKind::Libs => &self.libs,
        }
    }

    /// Mutable access to a category.
    pub fn list_mut(&mut self, kind: FlagKind) -> &mut Vec<String> {
        match kind {
            FlagKind::CppPath => &mut self.cpppath,
            FlagKind::CppDefines => &mut self.cppdefines,
            FlagKind::CcFlags => &mut self.ccflags,
            FlagKind::CFlags => &mut self.cflags,
            FlagKind::CxxFlags => &mut self.cxxflags,
            FlagKind::LinkFlags => &mut self.linkflags,
            FlagKind::LibPath => &mut self.libpath,
            FlagKind::Libs => &mut self.libs,
        }
    }

    /// Append flags to a category.
    pub fn append<I, S>(&mut self, kind: FlagKind, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_mut(kind).extend(flags.into_iter().map(Into::into));
    }

    /// Append flags to a category, skipping ones already present.
    pub fn append_unique<I, S>(&mut self, kind: FlagKind, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.list_mut(kind);
        for flag in flags {
            let flag = flag.into();
            if !list.contains(&flag) {
                list.push(flag);
            }
        }
    }

    /// Merge every category of `other` into this set, skipping duplicates.
    ///
    /// Paired compile flags (`-isystem dir`) are kept together and always
    /// appended.
    pub fn merge(&mut self, other: &FlagSet) {
        for kind in Self::KINDS {
            let incoming = other.list(kind);
            let list = self.list_mut(kind);
            let mut i = 0;
            while i < incoming.len() {
                let flag = &incoming[i];
                if PAIRED_COMPILE_FLAGS.contains(&flag.as_str()) {
                    list.extend(incoming[i..].iter().take(2).cloned());
                    i += 2;
                    continue;
                }
                if !list.contains(flag) {
                    list.push(flag.clone());
                }
                i += 1;
            }
        }
    }

    /// Parse a flag string and merge the result into this set.
    pub fn merge_flags(&mut self, flags: &str, fallback: FlagKind) {
        let parsed = FlagSet::parse(flags, fallback);
        self.merge(&parsed);
    }

    /// All categories in a stable order.
    pub const KINDS: [FlagKind; 8] = [
        FlagKind::CppPath,
        FlagKind::CppDefines,
        FlagKind::CcFlags,
        FlagKind::CFlags,
        FlagKind::CxxFlags,
        FlagKind::LinkFlags,
        FlagKind::LibPath,
        FlagKind::Libs,
    ];

    /// Check whether every category is empty.
    pub fn is_empty(&self) -> bool {
        Self::KINDS.iter().all(|kind| self.list(*kind).is_empty())
    }

    /// Command line arguments for compiling a C++ translation unit.
    ///
    /// Language flags follow the shared `ccflags`, so a later `-O` or
    /// `-Wno-*` from the language list wins.
    pub fn cxx_compile_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.ccflags.clone();
        args.extend(self.cxxflags.iter().cloned());
        args.extend(self.cppdefines.iter().map(|d| format!("-D{}", d)));
        args.extend(self.cpppath.iter().map(|p| format!("-I{}", p)));
        args
    }

    /// Command line arguments for compiling a C translation unit.
    pub fn c_compile_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.ccflags.clone();
        args.extend(self.cflags.iter().cloned());
        args.extend(self.cppdefines.iter().map(|d| format!("-D{}", d)));
        args.extend(self.cpppath.iter().map(|p| format!("-I{}", p)));
        args
    }

    /// Command line arguments for linking.
    pub fn link_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.linkflags.clone();
        args.extend(self.libpath.iter().map(|p| format!("-L{}", p)));
        args.extend(self.libs.iter().map(|l| {
            if l.contains('/') || l.ends_with(".a") || l.contains(".so") {
                l.clone()
            } else {
                format!("-l{}", l)
            }
        }));
        args
    }
}
