//! Header and `pkg-config` descriptor installation.
//!
//! Installation is planned first and applied second, so `--dry-run` can show
//! exactly what would be copied where.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use crate::builder::BuildEnv;
use crate::util::fs;

/// Extensions of installable headers.
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "tcc"];

/// Placeholder replaced by the version in `.pc` templates.
pub const VERSION_TOKEN: &str = "@VERSION@";

/// A single file to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallEntry {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Ordered list of files to install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub entries: Vec<InstallEntry>,
}

impl InstallPlan {
    pub fn new() -> Self {
        InstallPlan::default()
    }

    pub fn push(&mut self, source: impl Into<PathBuf>, dest: impl Into<PathBuf>) {
        self.entries.push(InstallEntry {
            source: source.into(),
            dest: dest.into(),
        });
    }

    /// Append all entries of `other`.
    pub fn extend(&mut self, other: InstallPlan) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstallEntry> {
        self.entries.iter()
    }

    /// Copy every entry, creating destination directories as needed.
    ///
    /// With `dry_run` nothing is touched.
    pub fn apply(&self, dry_run: bool) -> Result<()> {
        for entry in &self.entries {
            if dry_run {
                tracing::info!(
                    "would install {} -> {}",
                    entry.source.display(),
                    entry.dest.display()
                );
                continue;
            }
            fs::copy_file(&entry.source, &entry.dest)?;
            tracing::info!("installed {}", entry.dest.display());
        }
        Ok(())
    }
}

fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext))
}

/// Versioned header directory, `<instroot>/include/<project>-<version>`.
pub fn header_dest_dir(instroot: &Path, project: &str, version: &str) -> PathBuf {
    instroot.join("include").join(format!("{}-{}", project, version))
}

/// Plan installing every header below `include_dir` into `dest`.
///
/// The directory structure below `include_dir` is kept. `generated` headers
/// (e.g. config headers written into the build dir) go to the top of `dest`.
pub fn header_install_plan(
    include_dir: &Path,
    dest: &Path,
    generated: &[PathBuf],
) -> Result<InstallPlan> {
    if !include_dir.is_dir() {
        bail!("include directory {} does not exist", include_dir.display());
    }

    let mut headers = Vec::new();
    for entry in WalkDir::new(include_dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("failed to walk {}", include_dir.display()))?;
        if entry.file_type().is_file() && is_header(entry.path()) {
            headers.push(entry.into_path());
        }
    }

    let mut plan = InstallPlan::new();
    for header in headers {
        let rel = fs::relative_path(include_dir, &header);
        plan.push(header, dest.join(rel));
    }

    for header in generated {
        let Some(name) = header.file_name() else {
            bail!("generated header {} has no file name", header.display());
        };
        plan.push(header.clone(), dest.join(name));
    }

    Ok(plan)
}

/// Substitute the version into a `.pc` template.
pub fn render_pkg_config(template: &str, version: &str) -> String {
    template.replace(VERSION_TOKEN, version)
}

/// Render a `.pc` template into `build_dir` and plan installing it into
/// `pc_dir`.
///
/// A trailing `.in` is dropped from the template's file name.
pub fn pkg_config_install(
    template: &Path,
    version: &str,
    build_dir: &Path,
    pc_dir: &Path,
) -> Result<InstallPlan> {
    let contents = fs::read_to_string(template)?;

    let Some(file_name) = template.file_name().and_then(|n| n.to_str()) else {
        bail!("invalid pkg-config template path {}", template.display());
    };
    let name = file_name.strip_suffix(".in").unwrap_or(file_name);

    let rendered = build_dir.join(name);
    fs::write_string(&rendered, &render_pkg_config(&contents, version))?;
    tracing::debug!("rendered {}", rendered.display());

    let mut plan = InstallPlan::new();
    plan.push(rendered, pc_dir.join(name));
    Ok(plan)
}

/// What `cxxenv install` should install.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Public header directory
    pub include_dir: PathBuf,
    /// Generated headers to install alongside
    pub generated: Vec<PathBuf>,
    /// Optional `.pc` template
    pub pc_template: Option<PathBuf>,
    /// Project version, without any tag prefix
    pub version: String,
}

/// Plan the complete installation for an environment.
pub fn install_plan(env: &BuildEnv, opts: &InstallOptions) -> Result<InstallPlan> {
    let dest = header_dest_dir(&env.instroot, &env.project, &opts.version);
    let mut plan = header_install_plan(&opts.include_dir, &dest, &opts.generated)?;

    if let Some(template) = &opts.pc_template {
        let pc_dir = env.lib_install_dir().join("pkgconfig");
        plan.extend(pkg_config_install(template, &opts.version, &env.build_dir, &pc_dir)?);
    }

    Ok(plan)
}
