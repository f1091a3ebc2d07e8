//! Key-case conversion for params and bodies.

use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToSnakeCase};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// How object keys are rewritten before a request is dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConversionMode {
    /// Keys are left as they are.
    #[default]
    Default,
    /// `user_id` becomes `userId`.
    CamelCase,
    /// `userId` becomes `user_id`.
    SnakeCase,
}

impl ConversionMode {
    /// Rewrites every object key in `value`, descending into nested objects
    /// and arrays. Non-key data is never touched.
    pub fn convert(self, value: &Value) -> Value {
        match (self, value) {
            (ConversionMode::Default, _) => value.clone(),
            (_, Value::Object(map)) => Value::Object(self.convert_map(map)),
            (_, Value::Array(items)) => Value::Array(items.iter().map(|v| self.convert(v)).collect()),
            _ => value.clone(),
        }
    }

    /// Rewrites the keys of one object.
    ///
    /// A key that is already in the target case keeps its name. A key whose
    /// converted name is taken by another entry stays as it was, so no
    /// entry is ever dropped.
    pub fn convert_map(self, map: &Map<String, Value>) -> Map<String, Value> {
        let renamed: Vec<(&String, String)> = map.keys().map(|key| (key, self.convert_key(key))).collect();
        let mut taken: HashSet<String> = renamed
            .iter()
            .filter(|(key, name)| *key == name)
            .map(|(_, name)| name.clone())
            .collect();

        let mut converted = Map::new();
        for ((key, name), value) in renamed.into_iter().zip(map.values()) {
            let name = if key == &name || taken.insert(name.clone()) {
                name
            } else {
                debug!(key = %key, collides_with = %name, "key left unconverted");
                key.clone()
            };
            converted.insert(name, self.convert(value));
        }
        converted
    }

    /// Leading underscores are kept; only the rest of the key is converted.
    fn convert_key(self, key: &str) -> String {
        let rest = key.trim_start_matches('_');
        let prefix = &key[..key.len() - rest.len()];
        match self {
            ConversionMode::Default => key.to_string(),
            ConversionMode::CamelCase => format!("{prefix}{}", rest.to_lower_camel_case()),
            ConversionMode::SnakeCase => format!("{prefix}{}", rest.to_snake_case()),
        }
    }
}
