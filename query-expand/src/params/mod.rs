// Params module
// Turns param entries (single value, value list or brace pattern) into query entries

pub mod error;
pub mod models;
pub mod parser;

pub use error::{ConfigError, ParseError, ParseErrorKind, ParseResult};
pub use models::{ParamsConfig, Query, QueryConfig, QueryValue, RawQueryConfig};
pub use parser::ParamsParser;

/// Generate the query entries for one param
///
/// Without `expand`, `values` takes precedence over `value` and both are used
/// verbatim. With `expand`, `value` is brace-expanded and `values` is ignored.
///
/// ```
/// use query_expand::generate;
///
/// let queries = generate("k", Some("{a,b}".to_string()), None, true).unwrap();
/// let values: Vec<&str> = queries.iter().map(|q| q.value()).collect();
/// assert_eq!(values, vec!["a", "b"]);
/// ```
pub fn generate(
    name: &str,
    value: Option<String>,
    values: Option<Vec<String>>,
    expand: bool,
) -> Result<Vec<Query>, ConfigError> {
    QueryConfig::new(name, value, values, expand).map(|config| config.expand())
}
