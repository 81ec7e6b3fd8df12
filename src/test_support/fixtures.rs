//! Test fixtures for common test scenarios.

use std::path::Path;

use tempfile::TempDir;

use crate::builder::HostEnv;

/// `-print-search-dirs` output of a compiler using `lib64`.
pub const SEARCH_DIRS_LIB64: &str = "install: /usr/lib/gcc/x86_64-redhat-linux/13/\n\
libraries: =/usr/lib/gcc/x86_64-redhat-linux/13/:/lib/../lib64/:/usr/lib/\n";

/// `-print-search-dirs` output of a compiler using plain `lib`.
pub const SEARCH_DIRS_LIB: &str = "install: /usr/lib/gcc/x86_64-linux-gnu/12/\n\
libraries: =/usr/lib/gcc/x86_64-linux-gnu/12/:/lib/x86_64-linux-gnu/:/usr/lib/\n";

/// Write `files` (relative path, content) below `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

/// A small C++ library layout: sources, a conditionally included source and
/// headers in nested directories.
pub fn cxx_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_tree(
        tmp.path(),
        &[
            ("src/Init.cxx", "// init\n"),
            ("src/net/Socket.cxx", "// socket\n"),
            ("src/net/IPAddress.cxx", "// ip\n"),
            ("src/fs/File.cxx", "// file\n"),
            ("src/fs/_linux_only.cxx", "// conditional\n"),
            ("src/README.md", "docs\n"),
            ("include/Init.hxx", "#pragma once\n"),
            ("include/net/Socket.hxx", "#pragma once\n"),
            ("include/proc/pidfd.h", "#pragma once\n"),
            ("include/proc/_private.hxx", "#pragma once\n"),
            ("include/notes.txt", "notes\n"),
        ],
    );
    tmp
}

/// Host environment without any overrides.
pub fn empty_host() -> HostEnv {
    HostEnv::default()
}
