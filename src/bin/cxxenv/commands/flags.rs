//! `cxxenv flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use cxxenv::ops::configure;
use cxxenv::GlobalContext;

pub fn execute(args: FlagsArgs, ctx: &GlobalContext) -> Result<()> {
    let mut env = configure(ctx, &args.args)?;

    if !args.packages.is_empty() {
        env.configure_for_pkg(&args.packages)?;
    }

    if !args.link {
        println!("{}", env.flags.cxx_compile_args().join(" "));
    }

    if !args.compile {
        let mut link = env.flags.link_args();
        link.extend(env.inputs.iter().map(|p| p.display().to_string()));
        println!("{}", link.join(" "));
    }

    Ok(())
}
