//! Open-ended front-matter values

use indexmap::IndexMap;
use serde::Serialize;

/// A front-matter value that has no dedicated field on [`super::Page`]
///
/// Serializes untagged, so templates see plain strings, numbers, lists
/// and objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Get the string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a property of a map value
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            },
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(seq) => {
                Value::List(seq.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Value::Map(
                map.into_iter()
                    .filter_map(|(k, v)| Some((yaml_key(k)?, Value::from(v))))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Mapping keys are usually strings, but YAML allows scalars too
fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_nested() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            r#"
author:
  name: Jane
  links: [a, b]
draft: true
weight: 3
"#,
        )
        .unwrap();

        let value = Value::from(yaml);
        let author = value.get("author").unwrap();
        assert_eq!(author.get("name").and_then(Value::as_str), Some("Jane"));
        assert_eq!(
            author.get("links"),
            Some(&Value::List(vec![Value::from("a"), Value::from("b")]))
        );
        assert_eq!(value.get("draft"), Some(&Value::Bool(true)));
        assert_eq!(value.get("weight"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_serializes_untagged() {
        let mut map = IndexMap::new();
        map.insert("title".to_string(), Value::from("Hello"));
        map.insert("tags".to_string(), Value::List(vec![Value::from("go")]));
        let json = serde_json::to_value(Value::Map(map)).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Hello", "tags": ["go"]}));
    }
}
