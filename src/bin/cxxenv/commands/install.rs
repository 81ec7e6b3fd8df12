//! `cxxenv install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use cxxenv::ops::{configure, current_tag, install_plan, numeric_version, InstallOptions};
use cxxenv::GlobalContext;

pub fn execute(args: InstallArgs, ctx: &GlobalContext) -> Result<()> {
    let env = configure(ctx, &args.args)?;
    let tag = current_tag(ctx.project_root(), args.tag_file.as_deref())?;

    let opts = InstallOptions {
        include_dir: ctx.resolve_path(&args.include),
        generated: args.generated.iter().map(|p| ctx.resolve_path(p)).collect(),
        pc_template: args.pc_template.as_deref().map(|p| ctx.resolve_path(p)),
        version: numeric_version(&tag)?.to_string(),
    };

    let plan = install_plan(&env, &opts)?;
    if plan.is_empty() {
        println!("nothing to install");
        return Ok(());
    }

    if args.dry_run {
        for entry in plan.iter() {
            println!("{} -> {}", entry.source.display(), entry.dest.display());
        }
    }
    plan.apply(args.dry_run)?;

    if !args.dry_run {
        println!("Installed {} files", plan.len());
    }

    Ok(())
}
