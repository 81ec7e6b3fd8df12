//! `cxxenv toolchain` command

use std::path::Path;

use anyhow::Result;

use crate::cli::ToolchainArgs;
use cxxenv::ops::configure;
use cxxenv::util::process::find_executable;
use cxxenv::GlobalContext;

fn show_tool(label: &str, tool: &Path) {
    match find_executable(&tool.to_string_lossy()) {
        Some(found) => println!("  {:<7} {}", label, found.display()),
        None => println!("  {:<7} {} (not found)", label, tool.display()),
    }
}

pub fn execute(args: ToolchainArgs, ctx: &GlobalContext) -> Result<()> {
    let env = configure(ctx, &args.args)?;
    let tc = &env.toolchain;

    println!("Toolchain:");
    println!();
    show_tool("CC:", &tc.cc);
    show_tool("CXX:", &tc.cxx);
    show_tool("LD:", &tc.ld);
    show_tool("AR:", &tc.ar);
    show_tool("STRIP:", &tc.strip);
    println!();
    println!("  Family: {}", tc.family);
    match tc.flavor.dir_suffix() {
        Some(suffix) => println!("  Flavor: {}", suffix),
        None => println!("  Flavor: native"),
    }
    println!("  Libdir: {}", env.libdir);

    Ok(())
}
