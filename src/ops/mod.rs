//! High-level operations.
//!
//! This module contains the implementation of cxxenv commands that go beyond
//! configuring a single environment.

pub mod configure;
pub mod install;
pub mod version;

pub use configure::{configure, configure_with, format_summary, parse_args};
pub use install::{
    header_dest_dir, header_install_plan, install_plan, pkg_config_install, render_pkg_config,
    InstallEntry, InstallOptions, InstallPlan,
};
pub use version::{
    current_tag, default_tag_file, lib_version_info, numeric_version, write_tag_file,
    LibVersionInfo, VersionError,
};
