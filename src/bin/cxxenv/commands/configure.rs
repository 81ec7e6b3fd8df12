//! `cxxenv configure` command

use anyhow::Result;

use crate::cli::ConfigureArgs;
use cxxenv::ops::{configure, format_summary};
use cxxenv::GlobalContext;

pub fn execute(args: ConfigureArgs, ctx: &GlobalContext) -> Result<()> {
    let env = configure(ctx, &args.args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&env)?);
    } else {
        print!("{}", format_summary(&env));
    }

    Ok(())
}
