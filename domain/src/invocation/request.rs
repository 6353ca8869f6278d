//! Invocation request: the caller-supplied argument map

use crate::capability::ArgValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named argument values for a single call. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationRequest {
    args: BTreeMap<String, ArgValue>,
}

impl InvocationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        self.args.insert(key.into(), value.into());
    }

    /// Build from a JSON object, skipping `null` and non-scalar members.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let args = object
            .iter()
            .filter_map(|(k, v)| ArgValue::from_json(v).map(|v| (k.clone(), v)))
            .collect();
        Self { args }
    }

    /// Raw lookup, including empty strings
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.args.get(key)
    }

    /// Lookup that treats an empty string as absent
    pub fn value(&self, key: &str) -> Option<&ArgValue> {
        self.args.get(key).filter(|v| !v.is_blank())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Fill in configured defaults; values already present win.
    pub fn merged_with_defaults(mut self, defaults: &BTreeMap<String, ArgValue>) -> Self {
        for (key, value) in defaults {
            self.args
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for InvocationRequest {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            args: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
