// Params models
// Query entries, validated param configs and their serialized shape

use crate::brace::BraceExpander;
use crate::params::error::ConfigError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A single name/value entry
///
/// All entries produced from one config share the same name allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query {
    name: Arc<str>,
    value: String,
}

impl Query {
    pub fn new(name: impl Into<Arc<str>>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Split into an owned `(name, value)` pair
    pub fn into_pair(self) -> (String, String) {
        (self.name.to_string(), self.value)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Where the values of a param come from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryValue {
    /// One value, used verbatim
    Single(String),
    /// Several values, each used verbatim
    List(Vec<String>),
    /// Brace pattern, one entry per expanded string
    Pattern(String),
}

impl QueryValue {
    /// Pick the value source from raw config fields
    ///
    /// Without `expand`, a list wins over a single value. With `expand`, only
    /// the single value is used and any list is ignored.
    pub fn resolve(
        name: &str,
        value: Option<String>,
        values: Option<Vec<String>>,
        expand: bool,
    ) -> Result<Self, ConfigError> {
        match (expand, value, values) {
            (false, _, Some(values)) => Ok(QueryValue::List(values)),
            (false, Some(value), None) => Ok(QueryValue::Single(value)),
            (false, None, None) => Err(ConfigError::MissingValue(name.to_string())),
            (true, Some(pattern), _) => Ok(QueryValue::Pattern(pattern)),
            (true, None, _) => Err(ConfigError::MissingPattern(name.to_string())),
        }
    }

    /// Concrete values in output order
    pub fn values(&self) -> Vec<String> {
        match self {
            QueryValue::Single(value) => vec![value.clone()],
            QueryValue::List(values) => values.clone(),
            QueryValue::Pattern(pattern) => BraceExpander::expand(pattern),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, QueryValue::Pattern(_))
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Single(value) => write!(f, "value={}", value),
            QueryValue::List(values) => write!(f, "values=[{}]", values.join(", ")),
            QueryValue::Pattern(pattern) => write!(f, "expand={}", pattern),
        }
    }
}

/// A validated param entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQueryConfig", into = "RawQueryConfig")]
pub struct QueryConfig {
    name: Arc<str>,
    value: QueryValue,
}

impl QueryConfig {
    /// Build a config from raw fields, failing when no value is usable
    pub fn new(
        name: impl Into<String>,
        value: Option<String>,
        values: Option<Vec<String>>,
        expand: bool,
    ) -> Result<Self, ConfigError> {
        let name: String = name.into();
        let value = QueryValue::resolve(&name, value, values, expand)?;
        Ok(Self {
            name: Arc::from(name),
            value,
        })
    }

    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(name, QueryValue::Single(value.into()))
    }

    pub fn list<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_value(
            name,
            QueryValue::List(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn pattern(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::with_value(name, QueryValue::Pattern(pattern.into()))
    }

    fn with_value(name: impl Into<String>, value: QueryValue) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &QueryValue {
        &self.value
    }

    pub fn is_expand(&self) -> bool {
        self.value.is_pattern()
    }

    /// Produce the ordered query entries for this param
    pub fn expand(&self) -> Vec<Query> {
        let queries: Vec<Query> = self
            .value
            .values()
            .into_iter()
            .map(|value| Query {
                name: Arc::clone(&self.name),
                value,
            })
            .collect();

        debug!(name = %self.name, count = queries.len(), "generated queries");
        queries
    }
}

impl fmt::Display for QueryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryConfig[{}, {}]", self.name, self.value)
    }
}

/// Serialized shape of a param entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawQueryConfig {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_scalar_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub expand: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Accept numbers and booleans where a string value is expected
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    value.map(scalar_to_string).transpose()
}

fn deserialize_scalar_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Option::<Vec<serde_yaml::Value>>::deserialize(deserializer)?;
    values
        .map(|values| values.into_iter().map(scalar_to_string).collect())
        .transpose()
}

fn scalar_to_string<E: serde::de::Error>(value: serde_yaml::Value) -> Result<String, E> {
    match value {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Err(E::custom("invalid type: null, expected a scalar value")),
        serde_yaml::Value::Sequence(_) => {
            Err(E::custom("invalid type: sequence, expected a scalar value"))
        }
        serde_yaml::Value::Mapping(_) => {
            Err(E::custom("invalid type: map, expected a scalar value"))
        }
        serde_yaml::Value::Tagged(_) => {
            Err(E::custom("invalid type: tagged value, expected a scalar value"))
        }
    }
}

impl TryFrom<RawQueryConfig> for QueryConfig {
    type Error = ConfigError;

    fn try_from(raw: RawQueryConfig) -> Result<Self, Self::Error> {
        QueryConfig::new(raw.name, raw.value, raw.values, raw.expand)
    }
}

impl From<QueryConfig> for RawQueryConfig {
    fn from(config: QueryConfig) -> Self {
        let name = config.name.to_string();
        match config.value {
            QueryValue::Single(value) => RawQueryConfig {
                name,
                value: Some(value),
                values: None,
                expand: false,
            },
            QueryValue::List(values) => RawQueryConfig {
                name,
                value: None,
                values: Some(values),
                expand: false,
            },
            QueryValue::Pattern(pattern) => RawQueryConfig {
                name,
                value: Some(pattern),
                values: None,
                expand: true,
            },
        }
    }
}

/// A params document: every param entry in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsConfig {
    #[serde(default)]
    pub params: Vec<QueryConfig>,
}

impl ParamsConfig {
    pub fn new(params: Vec<QueryConfig>) -> Self {
        Self { params }
    }

    /// All query entries, param by param
    pub fn queries(&self) -> Vec<Query> {
        self.params.iter().flat_map(QueryConfig::expand).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(queries: &[Query]) -> Vec<(&str, &str)> {
        queries.iter().map(|q| (q.name(), q.value())).collect()
    }

    #[test]
    fn test_resolve_precedence() {
        let list = QueryValue::resolve(
            "k",
            Some("v".to_string()),
            Some(vec!["x".to_string()]),
            false,
        );
        assert_eq!(list, Ok(QueryValue::List(vec!["x".to_string()])));

        let single = QueryValue::resolve("k", Some("v".to_string()), None, false);
        assert_eq!(single, Ok(QueryValue::Single("v".to_string())));

        let pattern = QueryValue::resolve(
            "k",
            Some("{a,b}".to_string()),
            Some(vec!["x".to_string()]),
            true,
        );
        assert_eq!(pattern, Ok(QueryValue::Pattern("{a,b}".to_string())));
    }

    #[test]
    fn test_resolve_missing_values() {
        assert_eq!(
            QueryValue::resolve("k", None, None, false),
            Err(ConfigError::MissingValue("k".to_string()))
        );
        assert_eq!(
            QueryValue::resolve("k", None, Some(vec!["x".to_string()]), true),
            Err(ConfigError::MissingPattern("k".to_string()))
        );
    }

    #[test]
    fn test_single_value_is_verbatim() {
        let config = QueryConfig::single("q", r"{a,b}\,c");
        assert_eq!(pairs(&config.expand()), vec![("q", r"{a,b}\,c")]);
        assert!(!config.is_expand());
    }

    #[test]
    fn test_list_values_keep_order() {
        let config = QueryConfig::list("id", ["3", "1", "2"]);
        assert_eq!(
            pairs(&config.expand()),
            vec![("id", "3"), ("id", "1"), ("id", "2")]
        );
    }

    #[test]
    fn test_pattern_is_expanded() {
        let config = QueryConfig::pattern("region", "{us,eu}-{east,west}");
        assert!(config.is_expand());
        assert_eq!(
            pairs(&config.expand()),
            vec![
                ("region", "us-east"),
                ("region", "us-west"),
                ("region", "eu-east"),
                ("region", "eu-west"),
            ]
        );
    }

    #[test]
    fn test_queries_share_name() {
        let queries = QueryConfig::list("k", ["a", "b"]).expand();
        assert!(Arc::ptr_eq(&queries[0].name, &queries[1].name));
    }

    #[test]
    fn test_display() {
        assert_eq!(Query::new("k", "v").to_string(), "k=v");
        assert_eq!(
            QueryConfig::single("k", "v").to_string(),
            "QueryConfig[k, value=v]"
        );
        assert_eq!(
            QueryConfig::list("k", ["a", "b"]).to_string(),
            "QueryConfig[k, values=[a, b]]"
        );
        assert_eq!(
            QueryConfig::pattern("k", "{a,b}").to_string(),
            "QueryConfig[k, expand={a,b}]"
        );
    }

    #[test]
    fn test_into_pair() {
        assert_eq!(
            Query::new("k", "v").into_pair(),
            ("k".to_string(), "v".to_string())
        );
    }

    #[test]
    fn test_deserialize_entry() {
        let yaml = "name: region\nvalue: \"{a,b}\"\nexpand: true\n";
        let config: QueryConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config, QueryConfig::pattern("region", "{a,b}"));
    }

    #[test]
    fn test_deserialize_rejects_missing_value() {
        let err = serde_yaml::from_str::<QueryConfig>("name: region\n").unwrap_err();
        assert!(err.to_string().contains("value or values must be specified"));
    }

    #[test]
    fn test_deserialize_non_string_scalars() {
        let yaml = "name: id\nvalues: [1, 2.5, true]\n";
        let config: QueryConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config, QueryConfig::list("id", ["1", "2.5", "true"]));

        let config: QueryConfig = serde_yaml::from_str("name: page\nvalue: 10\n").unwrap();
        assert_eq!(config, QueryConfig::single("page", "10"));
    }

    #[test]
    fn test_deserialize_rejects_nested_value() {
        let err = serde_yaml::from_str::<QueryConfig>("name: a\nvalue: [x]\n").unwrap_err();
        assert!(err.to_string().contains("expected a scalar value"));
    }

    #[test]
    fn test_serialize_shape() {
        let yaml = serde_yaml::to_string(&QueryConfig::pattern("k", "{a,b}")).unwrap();
        assert!(yaml.contains("expand: true"));
        assert!(!yaml.contains("values"));

        let yaml = serde_yaml::to_string(&QueryConfig::list("k", ["a"])).unwrap();
        assert!(yaml.contains("values:"));
        assert!(!yaml.contains("expand"));
    }

    #[test]
    fn test_params_queries_are_flattened_in_order() {
        let params = ParamsConfig::new(vec![
            QueryConfig::pattern("a", "{1,2}"),
            QueryConfig::single("b", "x"),
        ]);
        assert_eq!(
            pairs(&params.queries()),
            vec![("a", "1"), ("a", "2"), ("b", "x")]
        );
        assert!(ParamsConfig::default().queries().is_empty());
    }
}
