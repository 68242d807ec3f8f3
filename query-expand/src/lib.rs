// Query Expand Library
// Brace expansion of parameter patterns and name/value query generation

pub mod brace;
pub mod params;

pub use brace::{unescape, BraceExpander};

pub use params::{
    generate, ConfigError, ParamsConfig, ParamsParser, ParseError, ParseErrorKind, ParseResult,
    Query, QueryConfig, QueryValue,
};
