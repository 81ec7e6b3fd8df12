//! `cxxenv version` command

use anyhow::Result;

use crate::cli::VersionArgs;
use cxxenv::ops::{current_tag, lib_version_info, numeric_version, parse_args, write_tag_file};
use cxxenv::GlobalContext;

pub fn execute(args: VersionArgs, ctx: &GlobalContext) -> Result<()> {
    let build_args = parse_args(&args.args)?;
    let tag = current_tag(ctx.project_root(), args.tag_file.as_deref())?;

    println!("tag:      {}", tag);
    println!("version:  {}", numeric_version(&tag)?);

    if let Some(lib) = &args.lib {
        let info = lib_version_info(&tag, lib, &build_args)?;
        println!("library:  {}", info.file_name);
        println!("soname:   {}", info.soname);
        println!("ldflag:   {}", info.soname_flag());
    }

    if let Some(path) = &args.write_tag_file {
        write_tag_file(path, &tag)?;
    }

    Ok(())
}
