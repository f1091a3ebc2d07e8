//! Query string formatting.
//!
//! Produces `?a=1&b=x` with form-urlencoded escaping, or an empty string for
//! no parameters. Strings are written verbatim, numbers and booleans via
//! their display form, `null` entries are skipped, arrays repeat the key and
//! nested objects are written as JSON text. Keys keep the order they were
//! inserted in.

use serde_json::{Map, Value};
use url::form_urlencoded;

pub fn format(params: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    append(&mut serializer, key, item);
                }
            }
            _ => append(&mut serializer, key, value),
        }
    }

    let query = serializer.finish();
    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}

fn append(serializer: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            serializer.append_pair(key, s);
        }
        other => {
            serializer.append_pair(key, &other.to_string());
        }
    }
}
