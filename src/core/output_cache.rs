// src/core/output_cache.rs

//! Outputs captured by silent runs.

use crate::models::ParamMap;
use log::debug;
use serde_json::json;
use std::collections::HashMap;

const HASH_TRUNCATE_LENGTH: usize = 16; // 16 bytes = 32 hex characters

/// Hex digest of `data`, truncated to `HASH_TRUNCATE_LENGTH` bytes.
fn short_hash(data: &[u8]) -> String {
    let hash = blake3::hash(data);
    hex::encode(hash.as_bytes().get(..HASH_TRUNCATE_LENGTH).unwrap_or_default())
}

/// The key prefix shared by every cached run of `command`.
pub fn command_prefix(command: &str) -> String {
    short_hash(command.as_bytes())
}

/// Builds the cache key of one run.
///
/// The key is the command prefix followed by a hash of the JSON document
/// `{command, arguments, options}`. Both maps are ordered, so the key does not
/// depend on insertion order.
pub fn generate_key(command: &str, arguments: &ParamMap, options: &ParamMap) -> String {
    let payload = json!({
        "command": command,
        "arguments": arguments,
        "options": options,
    });
    let serialized = payload.to_string();
    format!("{}{}", command_prefix(command), short_hash(serialized.as_bytes()))
}

/// Captured output of silent runs, keyed by [`generate_key`].
#[derive(Debug, Default)]
pub struct OutputCache {
    entries: HashMap<String, String>,
}

impl OutputCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `output` under `key`, replacing any previous output.
    pub fn store(&mut self, key: String, output: String) {
        debug!("Caching {} bytes of output under '{}'", output.len(), key);
        self.entries.insert(key, output);
    }

    /// The output stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` has an output.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached outputs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry, or only those of `command` when given.
    pub fn clear(&mut self, command: Option<&str>) {
        match command {
            None => {
                debug!("Clearing the whole output cache ({} entries)", self.entries.len());
                self.entries.clear();
            }
            Some(command) => {
                let prefix = command_prefix(command);
                self.entries.retain(|key, _| !key.starts_with(&prefix));
                debug!("Cleared cached output of '{}'", command);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Setup ---
    fn params(pairs: &[(&str, serde_json::Value)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_key_shape_and_prefix() {
        let key = generate_key("greet", &ParamMap::new(), &ParamMap::new());
        assert_eq!(key.len(), 64);
        assert!(key.starts_with(&command_prefix("greet")));
        assert_eq!(command_prefix("greet").len(), 32);
    }

    #[test]
    fn test_key_ignores_insertion_order() {
        let mut a = ParamMap::new();
        a.insert("b".into(), json!(2));
        a.insert("a".into(), json!(1));
        let b = params(&[("a", json!(1)), ("b", json!(2))]);
        assert_eq!(
            generate_key("x", &a, &ParamMap::new()),
            generate_key("x", &b, &ParamMap::new())
        );
    }

    #[test]
    fn test_key_distinguishes_arguments_from_options() {
        let p = params(&[("name", json!("Ada"))]);
        assert_ne!(
            generate_key("greet", &p, &ParamMap::new()),
            generate_key("greet", &ParamMap::new(), &p)
        );
    }

    #[test]
    fn test_clear_by_command() {
        let mut cache = OutputCache::new();
        let empty = ParamMap::new();
        cache.store(generate_key("greet", &empty, &empty), "hi".into());
        cache.store(generate_key("deploy", &empty, &empty), "ok".into());

        cache.clear(Some("greet"));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&generate_key("deploy", &empty, &empty)));

        cache.clear(None);
        assert!(cache.is_empty());
    }
}
