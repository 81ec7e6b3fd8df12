//! Project version and SONAME information.
//!
//! In a git checkout the version comes from the most recent tag. Release
//! tarballs carry no git metadata, they ship a tag file with the same
//! content instead.

use std::path::{Path, PathBuf};

use anyhow::Result;
use git2::{DescribeFormatOptions, DescribeOptions, Repository};
use serde::Serialize;
use thiserror::Error;

use crate::core::BuildArgs;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs;

/// Tag file name used when no path is given.
pub const DEFAULT_TAG_FILE: &str = "version.tag";

/// Errors while determining version information.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("no version information: {} is not a git checkout and {} does not exist", root.display(), tag_file.display())]
    NoVersionInfo { root: PathBuf, tag_file: PathBuf },

    #[error("tag `{0}` does not contain a version number")]
    NoVersionNumber(String),

    #[error("version `{0}` has no SONAME field")]
    NoSonameField(String),

    #[error("failed to read tag file {}", path.display())]
    TagFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to describe git repository")]
    Git(#[from] git2::Error),
}

impl VersionError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            VersionError::NoVersionInfo { .. } => diag.with_suggestion(suggestions::NO_VERSION),
            _ => diag,
        }
    }
}

/// Default tag file location for a project.
pub fn default_tag_file(project_root: &Path) -> PathBuf {
    project_root.join(DEFAULT_TAG_FILE)
}

/// The project's current version tag.
///
/// Git checkouts are described by their most recent tag, anything else must
/// have a tag file (`<root>/version.tag` unless `tag_file` is given).
pub fn current_tag(project_root: &Path, tag_file: Option<&Path>) -> Result<String, VersionError> {
    if project_root.join(".git").exists() {
        let repo = Repository::open(project_root)?;
        let mut opts = DescribeOptions::new();
        opts.describe_tags();
        let describe = repo.describe(&opts)?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        let tag = describe.format(Some(&format))?;
        tracing::debug!("git tag of {}: {}", project_root.display(), tag);
        return Ok(tag);
    }

    let tag_file = tag_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_tag_file(project_root));

    match std::fs::read_to_string(&tag_file) {
        Ok(contents) => Ok(contents.trim().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VersionError::NoVersionInfo {
            root: project_root.to_path_buf(),
            tag_file,
        }),
        Err(source) => Err(VersionError::TagFile {
            path: tag_file,
            source,
        }),
    }
}

/// Store `tag` so builds without git metadata find it.
pub fn write_tag_file(path: &Path, tag: &str) -> Result<()> {
    fs::write_string(path, tag)?;
    tracing::info!("wrote tag `{}` to {}", tag, path.display());
    Ok(())
}

/// The part of a tag starting at its first digit: `v0.2.5` -> `0.2.5`.
pub fn numeric_version(tag: &str) -> Result<&str, VersionError> {
    tag.find(|c: char| c.is_ascii_digit())
        .map(|idx| &tag[idx..])
        .ok_or_else(|| VersionError::NoVersionNumber(tag.to_string()))
}

/// Version and SONAME of a shared library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibVersionInfo {
    /// Library base name without `lib` prefix
    pub base: String,
    pub version: String,
    /// ABI version embedded in the SONAME
    pub soname_version: String,
    /// File name of the built library, `lib<base>.so.<version>`
    pub file_name: String,
    /// `lib<base>.so.<soname_version>`
    pub soname: String,
}

impl LibVersionInfo {
    /// Linker flag recording the SONAME.
    pub fn soname_flag(&self) -> String {
        format!("-Wl,-soname,{}", self.soname)
    }
}

/// Version information for library `libbase` from a version tag.
///
/// The SONAME version is the second field of the version (`0.2.5` -> `2`),
/// unless a `<libbase>-soname` argument overrides it.
pub fn lib_version_info(
    tag: &str,
    libbase: &str,
    args: &BuildArgs,
) -> Result<LibVersionInfo, VersionError> {
    let version = numeric_version(tag)?;

    let soname_version = match args.get(&format!("{}-soname", libbase)) {
        Some(soname) => soname.to_string(),
        None => version
            .split('.')
            .nth(1)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .ok_or_else(|| VersionError::NoSonameField(version.to_string()))?,
    };

    Ok(LibVersionInfo {
        base: libbase.to_string(),
        version: version.to_string(),
        file_name: format!("lib{}.so.{}", libbase, version),
        soname: format!("lib{}.so.{}", libbase, soname_version),
        soname_version,
    })
}
