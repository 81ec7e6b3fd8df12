//! CLI integration tests for cxxenv.
//!
//! Commands that need a compiler run against a fake `c++` placed first in
//! `PATH`, so the tests don't depend on the host toolchain.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_CXX: &str = r#"#!/bin/sh
case "$1" in
    -print-search-dirs)
        echo "install: /usr/lib/gcc/x86_64-linux-gnu/12/"
        echo "libraries: =/usr/lib/gcc/x86_64-linux-gnu/12/:/lib/../lib64/:/usr/lib/"
        ;;
    --version)
        echo "c++ (GCC) 12.2.0"
        ;;
esac
"#;

/// A project tree with a fake compiler and an isolated home directory.
struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let files = [
            ("src/Init.cxx", "// init\n"),
            ("src/net/Socket.cxx", "// socket\n"),
            ("src/net/IPAddress.cxx", "// ip\n"),
            ("src/fs/_linux_only.cxx", "// conditional\n"),
            ("include/Init.hxx", "#pragma once\n"),
            ("include/net/Socket.hxx", "#pragma once\n"),
            ("include/notes.txt", "notes\n"),
            ("data/libcosmos.pc.in", "Name: libcosmos\nVersion: @VERSION@\n"),
            (".cxxenv/config.toml", "[project]\nname = \"cosmos\"\n"),
        ];
        for (rel, content) in files {
            let path = tmp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        let bin = tmp.path().join("fakebin");
        fs::create_dir_all(&bin).unwrap();
        write_executable(&bin.join("c++"), FAKE_CXX);

        Project { tmp }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn cxxenv(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.root().join("fakebin").display(),
            std::env::var("PATH").unwrap_or_default()
        );

        let mut cmd = Command::cargo_bin("cxxenv").unwrap();
        cmd.current_dir(self.root())
            .env("PATH", path)
            .env("HOME", self.root().join("home"))
            .env("XDG_CONFIG_HOME", self.root().join("home/.config"))
            .env_remove("CXXENV_CROSS_PREFIX")
            .env_remove("CXXFLAGS")
            .env_remove("CFLAGS")
            .env_remove("LDFLAGS")
            .env_remove("PKG_CONFIG")
            .arg("--no-color");
        cmd
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, contents: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

// ============================================================================
// cxxenv sources
// ============================================================================

#[test]
fn test_sources_sorted_and_filtered() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["sources", ".cxx", "--dir", "src"])
        .assert()
        .success()
        .stdout("Init.cxx\nnet/IPAddress.cxx\nnet/Socket.cxx\n");
}

#[test]
fn test_sources_no_recurse() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["sources", ".cxx", "--dir", "src", "--no-recurse"])
        .assert()
        .success()
        .stdout("Init.cxx\n");
}

#[test]
fn test_sources_nothing_found() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["sources", ".rs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no sources matching"));
}

// ============================================================================
// cxxenv configure / flags
// ============================================================================

#[cfg(unix)]
#[test]
fn test_configure_summary() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["configure", "libtype=static"])
        .assert()
        .success()
        .stdout(predicate::str::contains("libtype:    static"))
        .stdout(predicate::str::contains("(lib64)"));
}

#[cfg(unix)]
#[test]
fn test_configure_json() {
    let project = Project::new();

    let output = project
        .cxxenv()
        .args(["configure", "--json", "sanitizer=1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["libtype"], "shared");
    assert_eq!(json["libdir"], "lib64");
    assert_eq!(json["sanitize"], true);
}

#[test]
fn test_invalid_libtype_is_usage_error() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["configure", "libtype=dynamic"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid libtype `dynamic`"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_malformed_argument_is_usage_error() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["flags", "debug"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("malformed argument `debug`"));
}

#[test]
fn test_invalid_bool_is_usage_error() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["configure", "release=perhaps"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("perhaps"));
}

#[cfg(unix)]
#[test]
fn test_flags_compile_only() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["flags", "--compile", "debug=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-std=c++17"))
        .stdout(predicate::str::contains("-O0"))
        .stdout(predicate::str::contains("--as-needed").not());
}

#[cfg(unix)]
#[test]
fn test_flags_link_with_rpath() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["flags", "--link", "use-rpath=1", "instroot=/opt/cosmos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-Wl,-rpath,/opt/cosmos/lib64"))
        .stdout(predicate::str::contains("-std=c++17").not());
}

// ============================================================================
// cxxenv version
// ============================================================================

#[test]
fn test_version_from_tag_file() {
    let project = Project::new();
    fs::write(project.root().join("version.tag"), "v0.2.5\n").unwrap();

    project
        .cxxenv()
        .args(["version", "--lib", "cosmos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version:  0.2.5"))
        .stdout(predicate::str::contains("libcosmos.so.0.2.5"))
        .stdout(predicate::str::contains("soname:   libcosmos.so.2"));
}

#[test]
fn test_version_soname_override() {
    let project = Project::new();
    fs::write(project.root().join("version.tag"), "v0.2.5\n").unwrap();

    project
        .cxxenv()
        .args(["version", "--lib", "cosmos", "cosmos-soname=9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-Wl,-soname,libcosmos.so.9"));
}

#[test]
fn test_version_write_tag_file() {
    let project = Project::new();
    fs::write(project.root().join("custom.tag"), "v1.4.0").unwrap();

    project
        .cxxenv()
        .args(["version", "--tag-file", "custom.tag"])
        .args(["--write-tag-file", "out/version.tag"])
        .assert()
        .success();

    let written = fs::read_to_string(project.root().join("out/version.tag")).unwrap();
    assert_eq!(written, "v1.4.0");
}

#[test]
fn test_version_without_information() {
    let project = Project::new();

    project
        .cxxenv()
        .arg("version")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no version information"));
}

// ============================================================================
// cxxenv install
// ============================================================================

#[cfg(unix)]
#[test]
fn test_install_dry_run() {
    let project = Project::new();
    fs::write(project.root().join("version.tag"), "v0.2.5").unwrap();
    let stage = project.root().join("stage");

    project
        .cxxenv()
        .args(["install", "--include", "include", "--dry-run"])
        .args(["--pc-template", "data/libcosmos.pc.in"])
        .arg(format!("instroot={}", stage.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("include/cosmos-0.2.5/net/Socket.hxx"))
        .stdout(predicate::str::contains("lib64/pkgconfig/libcosmos.pc"))
        .stdout(predicate::str::contains("notes.txt").not());

    assert!(!stage.exists());
}

#[cfg(unix)]
#[test]
fn test_install_copies_files() {
    let project = Project::new();
    fs::write(project.root().join("version.tag"), "v0.2.5").unwrap();
    let stage = project.root().join("stage");

    project
        .cxxenv()
        .args(["install", "--include", "include", "--pc-template", "data/libcosmos.pc.in"])
        .arg(format!("instroot={}", stage.display()))
        .assert()
        .success();

    assert!(stage.join("include/cosmos-0.2.5/Init.hxx").is_file());
    assert!(stage.join("include/cosmos-0.2.5/net/Socket.hxx").is_file());
    let pc = fs::read_to_string(stage.join("lib64/pkgconfig/libcosmos.pc")).unwrap();
    assert!(pc.contains("Version: 0.2.5"));
}

#[cfg(unix)]
#[test]
fn test_install_resolves_paths_against_project() {
    let project = Project::new();
    fs::write(project.root().join("version.tag"), "v0.2.5").unwrap();
    fs::create_dir_all(project.root().join("build/cosmos")).unwrap();
    fs::write(project.root().join("build/cosmos/config.hxx"), "#pragma once\n").unwrap();
    let stage = project.root().join("stage");

    project
        .cxxenv()
        .args(["install", "--include", "include"])
        .args(["--generated", "build/cosmos/config.hxx"])
        .args(["--pc-template", "data/libcosmos.pc.in"])
        .arg(format!("instroot={}", stage.display()))
        .assert()
        .success();

    assert!(stage.join("include/cosmos-0.2.5/config.hxx").is_file());
    assert!(stage.join("lib64/pkgconfig/libcosmos.pc").is_file());
}

#[cfg(unix)]
#[test]
fn test_install_empty_include_dir() {
    let project = Project::new();
    fs::write(project.root().join("version.tag"), "v0.2.5").unwrap();
    fs::create_dir_all(project.root().join("empty")).unwrap();

    project
        .cxxenv()
        .args(["install", "--include", "empty", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to install"));
}

// ============================================================================
// cxxenv completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let project = Project::new();

    project
        .cxxenv()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cxxenv"));
}
