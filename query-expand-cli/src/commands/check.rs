use crate::output;

use std::path::PathBuf;

use clap::Args;
use color_eyre::Result;

use query_expand::{BraceExpander, ParamsConfig, ParamsParser, QueryValue};

/// Validate a params document
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the params YAML file
    pub file: PathBuf,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let path = &args.file;

    if !path.exists() {
        color_eyre::eyre::bail!("Params file not found: {}", path.display());
    }

    output::status("Checking", &format!("{}", path.display()));

    let config = match ParamsParser::parse_file(path) {
        Ok(config) => config,
        Err(e) => {
            output::parse_error(&e);
            std::process::exit(1);
        }
    };

    output::check("YAML syntax valid");

    if config.is_empty() {
        output::warning("no params defined");
    }

    let mut total = 0;
    for param in &config.params {
        let count = param.expand().len();
        total += count;
        output::check(&format!("{}: {} value(s)", param.name(), count));
    }

    for warning in pattern_warnings(&config) {
        output::warning(&warning);
    }

    println!();
    output::success(&format!(
        "{} param(s), {} queries",
        config.params.len(),
        total
    ));

    Ok(())
}

/// Warn about expanded params whose pattern has nothing to expand
fn pattern_warnings(config: &ParamsConfig) -> Vec<String> {
    config
        .params
        .iter()
        .filter_map(|param| match param.value() {
            QueryValue::Pattern(pattern) if !BraceExpander::has_groups(pattern) => Some(format!(
                "{}: 'expand: true' but '{}' has no {{a,b}} group",
                param.name(),
                pattern
            )),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use query_expand::QueryConfig;

    #[test]
    fn test_pattern_without_group_is_warned() {
        let config = ParamsConfig::new(vec![
            QueryConfig::pattern("region", "{us,eu}"),
            QueryConfig::pattern("page", "1"),
            QueryConfig::single("plain", "{a}"),
            QueryConfig::pattern("literal", r"\{a,b\}"),
        ]);

        assert_eq!(
            pattern_warnings(&config),
            vec![
                "page: 'expand: true' but '1' has no {a,b} group".to_string(),
                r"literal: 'expand: true' but '\{a,b\}' has no {a,b} group".to_string(),
            ]
        );
    }
}
