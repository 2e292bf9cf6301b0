//! YAML, JSON and Markdown front matter loaders.
//!
//! A document may hold a list of mappings (one record each) or a single
//! mapping (one record). An empty document holds no records.

use std::path::Path;

use mdlist_model::{Record, Value};
use tracing::warn;

use crate::error::{IngestError, Result};

/// Field that receives the body text of a Markdown file.
pub const CONTENT_FIELD: &str = "content";

pub fn read_yaml(path: &Path) -> Result<Vec<Record>> {
    let text = read_text(path)?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&text).map_err(|source| IngestError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    into_records(path, yaml_to_value(document))
}

pub fn read_json(path: &Path) -> Result<Vec<Record>> {
    let text = read_text(path)?;
    let document: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    into_records(path, json_to_value(document))
}

/// One record from the YAML front matter of a Markdown file.
///
/// The body after the closing fence is stored under [`CONTENT_FIELD`] unless
/// the front matter already sets that field.
pub fn read_markdown(path: &Path) -> Result<Vec<Record>> {
    let text = read_text(path)?;
    let (front, body) = split_front_matter(&text).ok_or_else(|| IngestError::MissingFrontMatter {
        path: path.to_path_buf(),
    })?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(front).map_err(|source| IngestError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    let mut record = match yaml_to_value(document) {
        Value::Map(entries) => entries,
        Value::Missing => Record::new(),
        other => {
            return Err(IngestError::Shape {
                path: path.to_path_buf(),
                message: format!("front matter is a {}, expected a mapping", other.type_name()),
            });
        }
    };
    let body = body.trim();
    if !body.is_empty() && !record.contains_key(CONTENT_FIELD) {
        record.insert(CONTENT_FIELD.to_string(), Value::Text(body.to_string()));
    }
    Ok(vec![record])
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Split `---` fenced front matter from the body. The closing fence may
/// also be `...`.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end_matches(['\r', '\n']);
        if fence == "---" || fence == "..." {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn into_records(path: &Path, document: Value) -> Result<Vec<Record>> {
    match document {
        Value::Missing => Ok(Vec::new()),
        Value::Map(entries) => Ok(vec![entries]),
        Value::List(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Map(entries) => Ok(entries),
                other => Err(IngestError::Shape {
                    path: path.to_path_buf(),
                    message: format!("item {idx} is a {}, expected a mapping", other.type_name()),
                }),
            })
            .collect(),
        other => Err(IngestError::Shape {
            path: path.to_path_buf(),
            message: format!("document is a {}, expected a mapping or a list", other.type_name()),
        }),
    }
}

/// Convert a YAML value. Non-scalar mapping keys are dropped with a warning.
pub fn yaml_to_value(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Missing,
        serde_yaml::Value::Bool(value) => Value::Bool(value),
        serde_yaml::Value::Number(number) => match number.as_i64() {
            Some(value) => Value::Int(value),
            None => number.as_f64().map_or(Value::Missing, Value::Float),
        },
        serde_yaml::Value::String(text) => Value::Text(text),
        serde_yaml::Value::Sequence(items) => {
            Value::List(items.into_iter().map(yaml_to_value).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Map(
            mapping
                .into_iter()
                .filter_map(|(key, value)| {
                    let key = match key {
                        serde_yaml::Value::String(key) => key,
                        serde_yaml::Value::Number(number) => number.to_string(),
                        serde_yaml::Value::Bool(flag) => flag.to_string(),
                        other => {
                            warn!(key = ?other, "skipping non-scalar mapping key");
                            return None;
                        }
                    };
                    Some((key, yaml_to_value(value)))
                })
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

pub fn json_to_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Missing,
        serde_json::Value::Bool(value) => Value::Bool(value),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(value) => Value::Int(value),
            None => number.as_f64().map_or(Value::Missing, Value::Float),
        },
        serde_json::Value::String(text) => Value::Text(text),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, json_to_value(value)))
                .collect(),
        ),
    }
}
