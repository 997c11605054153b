// src/core/registry.rs

//! Registered commands and the memoized name/alias resolver.

use crate::core::console::Console;
use crate::core::invocation::Action;
use crate::models::{CommandDefinition, ParamMap, ParsedValues, Value};
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A registered command.
pub struct CommandEntry {
    /// Registration key, usually the command's type name.
    pub identity: String,
    /// Name from the definition.
    pub name: String,
    /// Alias from the definition, empty for none.
    pub alias: String,
    /// The definition captured at registration.
    pub definition: CommandDefinition,
    parsed: Rc<RefCell<ParsedValues>>,
    action: Action,
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("identity", &self.identity)
            .field("name", &self.name)
            .field("alias", &self.alias)
            .finish_non_exhaustive()
    }
}

impl CommandEntry {
    pub(crate) fn new(
        identity: impl Into<String>,
        definition: CommandDefinition,
        parsed: Rc<RefCell<ParsedValues>>,
        action: Action,
    ) -> Self {
        Self {
            identity: identity.into(),
            name: definition.name.clone(),
            alias: definition.alias.clone(),
            definition,
            parsed,
            action,
        }
    }

    /// Replaces the values this command was last parsed with.
    pub fn set_parsed(&self, values: ParsedValues) {
        *self.parsed.borrow_mut() = values;
    }

    /// The values this command was last parsed with, or its defaults.
    pub fn parsed(&self) -> ParsedValues {
        self.parsed.borrow().clone()
    }

    /// Runs the bound action.
    ///
    /// # Errors
    /// Propagates handler errors and `ConsoleError::ReentrantCall`.
    pub fn invoke(
        &self,
        console: &Console,
        arguments: ParamMap,
        options: ParamMap,
        suppress: bool,
    ) -> anyhow::Result<Value> {
        (self.action)(console, arguments, options, suppress)
    }
}

/// Commands in registration order plus a memo of resolved keys.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: Vec<CommandEntry>,
    resolved: RefCell<HashMap<String, Option<usize>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. An entry with the same identity is replaced in place and
    /// the resolver cache is reset.
    pub(crate) fn insert(&mut self, entry: CommandEntry) {
        if let Some(slot) = self.entries.iter_mut().find(|e| e.identity == entry.identity) {
            debug!("Replacing command '{}'", entry.identity);
            *slot = entry;
            self.reset_cache();
        } else {
            debug!("Registered command '{}' as '{}'", entry.identity, entry.name);
            self.entries.push(entry);
        }
    }

    /// Finds the entry for `key`, trying identities, then names, then aliases.
    ///
    /// Hits and misses are both memoized; the empty key never resolves and is
    /// never memoized.
    pub(crate) fn resolve(&self, key: &str) -> Option<&CommandEntry> {
        if key.is_empty() {
            return None;
        }

        let cached = self.resolved.borrow().get(key).copied();
        let index = match cached {
            Some(index) => {
                debug!("Resolver cache hit for '{}'", key);
                index
            }
            None => {
                let index = self.lookup(key);
                self.resolved.borrow_mut().insert(key.to_string(), index);
                index
            }
        };
        index.and_then(|i| self.entries.get(i))
    }

    fn lookup(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.identity == key)
            .or_else(|| self.entries.iter().position(|e| e.name == key))
            .or_else(|| {
                self.entries
                    .iter()
                    .position(|e| !e.alias.is_empty() && e.alias == key)
            })
    }

    pub(crate) fn exists(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    pub(crate) fn reset_cache(&self) {
        self.resolved.borrow_mut().clear();
    }

    #[cfg(test)]
    fn cached_keys(&self) -> usize {
        self.resolved.borrow().len()
    }

    pub(crate) fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub(crate) fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- Setup ---
    fn entry(identity: &str, name: &str, alias: &str) -> CommandEntry {
        let definition = CommandDefinition::new(name).alias(alias);
        let tag = identity.to_string();
        CommandEntry::new(
            identity,
            definition,
            Rc::new(RefCell::new(ParsedValues::default())),
            Box::new(move |_: &Console, _: ParamMap, _: ParamMap, _: bool| Ok(json!(tag))),
        )
    }

    #[test]
    fn test_resolution_order() {
        let mut registry = Registry::new();
        registry.insert(entry("app::Greet", "greet", "g"));
        registry.insert(entry("app::G", "g", ""));

        assert_eq!(registry.resolve("app::Greet").unwrap().name, "greet");
        assert_eq!(registry.resolve("greet").unwrap().identity, "app::Greet");
        // A declared name beats an earlier alias.
        assert_eq!(registry.resolve("g").unwrap().identity, "app::G");
        assert!(registry.resolve("nope").is_none());
    }

    #[test]
    fn test_empty_key_is_never_cached() {
        let mut registry = Registry::new();
        registry.insert(entry("app::Blank", "blank", ""));
        assert!(registry.resolve("").is_none());
        assert_eq!(registry.cached_keys(), 0);
    }

    #[test]
    fn test_negative_results_are_cached_until_reset() {
        let mut registry = Registry::new();
        assert!(registry.resolve("late").is_none());

        registry.insert(entry("app::Late", "late", ""));
        // Stale miss is kept until the cache is reset.
        assert!(registry.resolve("late").is_none());

        registry.reset_cache();
        assert!(registry.resolve("late").is_some());
    }

    #[test]
    fn test_reregistering_identity_replaces_in_place() {
        let mut registry = Registry::new();
        registry.insert(entry("app::A", "first", ""));
        registry.insert(entry("app::B", "other", ""));
        assert!(registry.resolve("first").is_some());

        registry.insert(entry("app::A", "renamed", ""));
        assert_eq!(registry.entries().len(), 2);
        assert_eq!(registry.names(), vec!["renamed", "other"]);
        assert!(registry.resolve("first").is_none());
        assert!(registry.resolve("renamed").is_some());
    }
}
