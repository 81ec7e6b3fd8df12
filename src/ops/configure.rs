//! Implementation of `cxxenv configure`.

use std::fmt::Write as _;

use anyhow::Result;

use crate::builder::{init_env, BuildEnv};
use crate::core::{BuildArgs, ConfigError};
use crate::util::process::{CommandRunner, SystemRunner};
use crate::util::GlobalContext;

/// Parse command line `KEY=VALUE` arguments.
pub fn parse_args(args: &[String]) -> Result<BuildArgs, ConfigError> {
    Ok(BuildArgs::parse(args)?)
}

/// Configure the project in `ctx` using the real toolchain.
pub fn configure(ctx: &GlobalContext, args: &[String]) -> Result<BuildEnv> {
    configure_with(ctx, args, Box::new(SystemRunner))
}

/// Configure the project in `ctx`, running external tools through `runner`.
pub fn configure_with(
    ctx: &GlobalContext,
    args: &[String],
    runner: Box<dyn CommandRunner>,
) -> Result<BuildEnv> {
    let args = parse_args(args)?;
    let config = ctx.load_config();
    let project = ctx.project_name(&config);

    init_env(
        &project,
        ctx.project_root(),
        &args,
        &config,
        &ctx.host_env(),
        runner,
    )
}

/// Human readable summary of a configured environment.
pub fn format_summary(env: &BuildEnv) -> String {
    let mut out = String::new();
    let tc = &env.toolchain;

    let _ = writeln!(out, "project:    {}", env.project);
    let _ = writeln!(out, "toolchain:  {} ({} / {})", tc.family, tc.cc.display(), tc.cxx.display());
    let _ = writeln!(out, "libtype:    {}", env.libtype);
    let _ = writeln!(out, "build dir:  {}", env.build_dir.display());
    let _ = writeln!(out, "install:    {} ({})", env.instroot.display(), env.libdir);
    let _ = writeln!(out, "cxxflags:   {}", env.flags.cxx_compile_args().join(" "));
    let _ = writeln!(out, "linkflags:  {}", env.flags.link_args().join(" "));

    let mut options = Vec::new();
    if env.sanitize {
        options.push("sanitizer");
    }
    if env.release {
        options.push("release");
    }
    if env.use_rpath {
        options.push("rpath");
    }
    if env.use_system_pkgs {
        options.push("system-pkgs");
    }
    if env.build_docs {
        options.push("docs");
    }
    if !options.is_empty() {
        let _ = writeln!(out, "options:    {}", options.join(", "));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockExecutor, MockProcessOutput, SEARCH_DIRS_LIB64};
    use tempfile::TempDir;

    fn mock() -> MockExecutor {
        let exec = MockExecutor::new();
        exec.expect("c++ -print-search-dirs", MockProcessOutput::success(SEARCH_DIRS_LIB64));
        exec
    }

    #[test]
    fn test_malformed_argument() {
        let err = parse_args(&["libtype".to_string()]).unwrap_err();
        assert!(err.to_diagnostic().format(false).contains("KEY=VALUE"));
    }

    #[test]
    fn test_configure_reads_project_config() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_root(tmp.path());
        std::fs::create_dir_all(tmp.path().join(".cxxenv")).unwrap();
        std::fs::write(
            ctx.project_config_path(),
            "[project]\nname = \"cosmos\"\n\n[build]\nlibtype = \"static\"\n",
        )
        .unwrap();

        let env = configure_with(&ctx, &["release=1".to_string()], Box::new(mock())).unwrap();
        assert_eq!(env.project, "cosmos");
        assert_eq!(env.libtype.as_str(), "static");
        assert!(env.release);

        let summary = format_summary(&env);
        assert!(summary.contains("project:    cosmos"));
        assert!(summary.contains("libtype:    static"));
        assert!(summary.contains("(lib64)"));
        assert!(summary.contains("release"));
    }

    #[test]
    fn test_env_serializes_without_root() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_root(tmp.path());
        let env = configure_with(&ctx, &[], Box::new(mock())).unwrap();

        let json: serde_json::Value = serde_json::to_value(&env).unwrap();
        assert_eq!(json["libtype"], "shared");
        assert_eq!(json["libdir"], "lib64");
        assert!(json.get("root").is_none());
    }
}
