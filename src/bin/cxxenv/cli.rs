//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// cxxenv - Build-environment configuration for C++ projects
#[derive(Parser)]
#[command(name = "cxxenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the build environment and print a summary
    Configure(ConfigureArgs),

    /// Show compile/link flags
    Flags(FlagsArgs),

    /// List source files
    Sources(SourcesArgs),

    /// Show version and SONAME information
    Version(VersionArgs),

    /// Install headers and the pkg-config descriptor
    Install(InstallArgs),

    /// Show the resolved toolchain
    Toolchain(ToolchainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Build arguments, e.g. `libtype=static compiler=clang`
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,

    /// Print the environment as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Build arguments
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,

    /// Merge the flags of a pkg-config package
    #[arg(long = "pkg", value_name = "NAME")]
    pub packages: Vec<String>,

    /// Show compile flags only
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,
}

#[derive(Args)]
pub struct SourcesArgs {
    /// File name suffixes to look for, e.g. `.cxx`
    #[arg(required = true, value_name = "SUFFIX")]
    pub suffixes: Vec<String>,

    /// Subdirectory of the project to search
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Don't descend into subdirectories
    #[arg(long)]
    pub no_recurse: bool,
}

#[derive(Args)]
pub struct VersionArgs {
    /// Also show SONAME information for this library base name
    #[arg(long, value_name = "BASE")]
    pub lib: Option<String>,

    /// Tag file used outside of git checkouts
    #[arg(long, value_name = "FILE")]
    pub tag_file: Option<PathBuf>,

    /// Write the current tag to FILE
    #[arg(long, value_name = "FILE")]
    pub write_tag_file: Option<PathBuf>,

    /// Build arguments, e.g. `<base>-soname=3`
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Public header directory
    #[arg(long, value_name = "DIR")]
    pub include: PathBuf,

    /// Generated header to install as well
    #[arg(long, value_name = "FILE")]
    pub generated: Vec<PathBuf>,

    /// pkg-config template containing `@VERSION@`
    #[arg(long, value_name = "FILE")]
    pub pc_template: Option<PathBuf>,

    /// Tag file used outside of git checkouts
    #[arg(long, value_name = "FILE")]
    pub tag_file: Option<PathBuf>,

    /// Show what would be installed without copying
    #[arg(long)]
    pub dry_run: bool,

    /// Build arguments, e.g. `instroot=/opt/cosmos`
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// Build arguments, e.g. `compiler=clang`
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
