use crate::output;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use query_expand::{ParamsParser, Query};

/// Print the queries generated by a params document
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Path to the params YAML file
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    pub format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// One `name=value` line per query
    Plain,
    /// JSON array of `{"name", "value"}` objects
    Json,
}

pub fn execute(args: ParamsArgs) -> Result<()> {
    let config = match ParamsParser::parse_file(&args.file) {
        Ok(config) => config,
        Err(e) => {
            output::parse_error(&e);
            std::process::exit(1);
        }
    };

    println!("{}", render(&config.queries(), args.format)?);

    Ok(())
}

fn render(queries: &[Query], format: Format) -> Result<String> {
    match format {
        Format::Plain => Ok(queries
            .iter()
            .map(|query| query.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => {
            serde_json::to_string_pretty(queries).wrap_err("failed to serialize queries")
        }
    }
}
