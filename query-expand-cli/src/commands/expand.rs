use clap::Args;
use color_eyre::Result;

use query_expand::BraceExpander;
use tracing::debug;

/// Expand brace patterns
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Patterns to expand, e.g. 'item-{a,b{1,2}}'
    #[arg(required = true)]
    pub patterns: Vec<String>,
}

pub fn execute(args: ExpandArgs) -> Result<()> {
    for pattern in &args.patterns {
        let expanded = BraceExpander::expand(pattern);
        debug!(pattern = %pattern, count = expanded.len(), "expanded pattern");

        for value in expanded {
            println!("{}", value);
        }
    }

    Ok(())
}
