// Params error types
// Config errors for invalid entries, located parse errors for params documents

use std::fmt;

use thiserror::Error;

/// Internal serde type names and how users should read them
const TYPE_DESCRIPTIONS: [(&str, &str); 3] = [
    (
        "struct RawQueryConfig",
        "a param mapping with 'name' and 'value'/'values'",
    ),
    ("struct RawParamsConfig", "a mapping with a 'params' list"),
    ("struct ParamsConfig", "a mapping with a 'params' list"),
];

/// Errors raised when a param entry has no usable value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("value or values must be specified to 'params' (param '{0}')")]
    MissingValue(String),

    #[error("value must be specified to 'params' when expand is true (param '{0}')")]
    MissingPattern(String),
}

impl ConfigError {
    /// Name of the param the error was raised for
    pub fn param(&self) -> &str {
        match self {
            ConfigError::MissingValue(name) | ConfigError::MissingPattern(name) => name,
        }
    }
}

/// Detailed parse error with location and context
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Surrounding context (a few lines around the error)
    pub context: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
    /// The kind of error
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// YAML syntax error
    YamlSyntax,
    /// Invalid schema (wrong types, missing fields)
    InvalidSchema,
    /// Unknown field
    UnknownField,
    /// Param entry without a usable value
    InvalidValue,
    /// IO error (file not found, etc.)
    IoError,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            context: String::new(),
            suggestion: None,
            kind: ParseErrorKind::InvalidSchema,
        }
    }

    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Create context from source content
    pub fn with_source_context(mut self, source: &str, context_lines: usize) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let start = self.line.saturating_sub(context_lines + 1);
        let end = (self.line + context_lines).min(lines.len());

        let mut context = String::new();
        for (i, line) in lines.iter().enumerate().take(end).skip(start) {
            let line_num = i + 1;
            let marker = if line_num == self.line { ">" } else { " " };
            context.push_str(&format!("{} {:4} | {}\n", marker, line_num, line));

            if line_num == self.line && self.column > 0 {
                let indicator = " ".repeat(self.column.saturating_sub(1)) + "^";
                context.push_str(&format!("       | {}\n", indicator));
            }
        }

        self.context = context;
        self
    }

    /// Create from serde_yaml error
    pub fn from_yaml_error(err: &serde_yaml::Error, source: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let raw = err.to_string();
        let message = format_yaml_error_message(&raw);
        let suggestion = suggest_yaml_fix(&raw, source, line);

        ParseError::new(message, line, column)
            .with_kind(classify(&raw))
            .with_source_context(source, 2)
            .with_suggestion_opt(suggestion)
    }

    /// Create from a config error raised for the param at `line`
    ///
    /// A `line` of 0 means the entry could not be located in the source.
    pub fn from_config_error(err: &ConfigError, line: usize, column: usize, source: &str) -> Self {
        let message = err.to_string();
        let suggestion = suggest_yaml_fix(&message, source, line);

        let error = ParseError::new(message, line, column)
            .with_kind(ParseErrorKind::InvalidValue)
            .with_suggestion_opt(suggestion);

        if line > 0 {
            error.with_source_context(source, 2)
        } else {
            error
        }
    }

    fn with_suggestion_opt(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;
        writeln!(f, "  --> line {}:{}", self.line, self.column)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            write!(f, "{}", self.context)?;
        }

        if let Some(suggestion) = &self.suggestion {
            writeln!(f)?;
            writeln!(f, "help: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

fn classify(msg: &str) -> ParseErrorKind {
    if msg.contains("unknown field") {
        ParseErrorKind::UnknownField
    } else if msg.contains("must be specified") {
        ParseErrorKind::InvalidValue
    } else if msg.contains("missing field") || msg.contains("invalid type") {
        ParseErrorKind::InvalidSchema
    } else {
        ParseErrorKind::YamlSyntax
    }
}

/// Drop the trailing " at line X column Y" that serde_yaml appends
fn strip_location(msg: &str) -> &str {
    match msg.rfind(" at line ") {
        Some(idx) => &msg[..idx],
        None => msg,
    }
}

/// Format serde_yaml error message into something more readable
fn format_yaml_error_message(msg: &str) -> String {
    let described = describe_types(strip_location(msg));
    let msg = described.as_str();

    if msg.contains("missing field") {
        if let Some(field) = extract_field_name(msg, "missing field `", "`") {
            return format!("missing required field '{}'", field);
        }
    }

    if msg.contains("unknown field") {
        if let Some(field) = extract_field_name(msg, "unknown field `", "`") {
            if let Some(expected) = extract_expected_fields(msg) {
                return format!(
                    "unknown field '{}', expected one of: {}",
                    field,
                    expected.join(", ")
                );
            }
            return format!("unknown field '{}'", field);
        }
    }

    if msg.contains("invalid type") {
        return format_invalid_type_error(msg);
    }

    msg.to_string()
}

fn describe_types(msg: &str) -> String {
    TYPE_DESCRIPTIONS
        .iter()
        .fold(msg.to_string(), |msg, (internal, description)| {
            msg.replace(internal, description)
        })
}

fn extract_field_name(msg: &str, prefix: &str, suffix: &str) -> Option<String> {
    let start = msg.find(prefix)? + prefix.len();
    let end = msg[start..].find(suffix)? + start;
    Some(msg[start..end].to_string())
}

fn extract_expected_fields(msg: &str) -> Option<Vec<String>> {
    let marker = if msg.contains("expected one of ") {
        "expected one of "
    } else {
        "expected "
    };
    let start = msg.find(marker)? + marker.len();
    let fields: Vec<String> = msg[start..]
        .replace(" or ", ", ")
        .split(", ")
        .map(|s| s.trim_matches('`').to_string())
        .collect();
    Some(fields)
}

fn format_invalid_type_error(msg: &str) -> String {
    if let Some(found) = extract_field_name(msg, "invalid type: ", ",") {
        if let Some(idx) = msg.find(", expected ") {
            let expected = &msg[idx + ", expected ".len()..];
            return format!("expected {}, but found {}", expected, found);
        }
    }
    msg.to_string()
}

/// Suggest fixes for common params mistakes
fn suggest_yaml_fix(msg: &str, source: &str, line: usize) -> Option<String> {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = lines.get(line.saturating_sub(1)).unwrap_or(&"");

    if msg.contains("missing field `name`") {
        return Some("every param needs a 'name:' key".to_string());
    }

    if msg.contains("value or values must be specified") {
        return Some("add 'value:' or 'values:' to the param".to_string());
    }

    if msg.contains("when expand is true") {
        return Some(
            "set 'value:' to the pattern to expand; 'values:' is ignored with 'expand: true'"
                .to_string(),
        );
    }

    if source.trim_start().starts_with("- ") {
        return Some("wrap the list of params in a top-level 'params:' key".to_string());
    }

    if let Some(field) = extract_field_name(msg, "unknown field `", "`") {
        let typo_suggestions = [
            ("vaule", "value"),
            ("valeu", "value"),
            ("val", "value"),
            ("valuse", "values"),
            ("vaules", "values"),
            ("expanded", "expand"),
            ("expansion", "expand"),
            ("key", "name"),
            ("param", "params"),
        ];

        let lower = field.to_lowercase();
        for (typo, correct) in typo_suggestions {
            if lower == typo {
                return Some(format!("did you mean '{}'?", correct));
            }
        }
    }

    if error_line.starts_with('\t') {
        return Some(
            "YAML prefers spaces over tabs for indentation. Replace tabs with spaces.".to_string(),
        );
    }

    None
}
