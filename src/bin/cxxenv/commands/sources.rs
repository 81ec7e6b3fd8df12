//! `cxxenv sources` command

use anyhow::Result;

use crate::cli::SourcesArgs;
use cxxenv::builder::gather_sources;
use cxxenv::{GlobalContext, SourceQuery};

pub fn execute(args: SourcesArgs, ctx: &GlobalContext) -> Result<()> {
    let mut query = SourceQuery::new(args.suffixes);
    if let Some(dir) = args.dir {
        query = query.in_subdir(dir);
    }
    if args.no_recurse {
        query = query.non_recursive();
    }

    for source in gather_sources(ctx.project_root(), &query)? {
        println!("{}", source.display());
    }

    Ok(())
}
