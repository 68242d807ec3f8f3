// Params document parser
// Parses YAML params documents into validated query configs

use crate::params::error::{ParseError, ParseErrorKind, ParseResult};
use crate::params::models::{ParamsConfig, QueryConfig, RawQueryConfig};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

/// Document shape before entries are validated
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParamsConfig {
    #[serde(default)]
    params: Vec<RawQueryConfig>,
}

/// Parser for YAML params documents
pub struct ParamsParser;

impl ParamsParser {
    /// Parse params from YAML string
    pub fn parse(content: &str) -> ParseResult<ParamsConfig> {
        if content.trim().is_empty() {
            return Ok(ParamsConfig::default());
        }

        let raw: RawParamsConfig =
            serde_yaml::from_str(content).map_err(|e| ParseError::from_yaml_error(&e, content))?;

        // Entries are validated here rather than in serde so a failing entry
        // can be reported at its own line
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut params = Vec::with_capacity(raw.params.len());
        for entry in raw.params {
            let counter = seen.entry(entry.name.clone()).or_insert(0);
            let occurrence = *counter;
            *counter += 1;

            let config = QueryConfig::try_from(entry).map_err(|e| {
                let (line, column) =
                    find_param_line(content, e.param(), occurrence).unwrap_or((0, 0));
                ParseError::from_config_error(&e, line, column, content)
            })?;
            params.push(config);
        }

        debug!(params = params.len(), "parsed params document");
        Ok(ParamsConfig::new(params))
    }

    /// Parse params from file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParamsConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ParseError::new(
                format!("failed to read file {}: {}", path.display(), e),
                0,
                0,
            )
            .with_kind(ParseErrorKind::IoError)
        })?;

        Self::parse(&content)
    }
}

/// Find the `name: <name>` line of the n-th param with that name
///
/// Returns a 1-indexed line and the column of the `name` key. Flow-style
/// entries (`{name: a}`) are not located.
fn find_param_line(source: &str, name: &str, occurrence: usize) -> Option<(usize, usize)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let column = line.find("name:")?;
            if !matches!(line[..column].trim(), "" | "-") {
                return None;
            }
            let value = line[column + "name:".len()..]
                .split(" #")
                .next()
                .unwrap_or("")
                .trim()
                .trim_matches(|c: char| c == '"' || c == '\'');
            (value == name).then_some((i + 1, column + 1))
        })
        .nth(occurrence)
}
