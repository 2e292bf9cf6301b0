use mdlist_model::{Record, Value};

/// Drop missing values from a record before it reaches a template.
///
/// Nested maps are cleaned recursively. Lists are left as they are, so a
/// missing element inside a list survives.
pub fn clean_record(record: Record) -> Record {
    record
        .into_iter()
        .filter_map(|(key, value)| clean_value(value).map(|value| (key, value)))
        .collect()
}

fn clean_value(value: Value) -> Option<Value> {
    match value {
        Value::Map(entries) => Some(Value::Map(clean_record(entries))),
        value if value.is_missing() => None,
        value => Some(value),
    }
}
