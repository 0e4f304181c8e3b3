//! Case-insensitive handler registry

use std::collections::HashMap;

/// Name → handler map with alias support
///
/// Keys are folded to lowercase at insert and lookup, so `Ping`, `ping`
/// and `PING` all resolve to the same entry. Aliases clone the stored
/// value, which for `Arc`-wrapped handlers means they share one instance.
pub struct HandlerRegistry<V> {
    entries: HashMap<String, V>,
}

impl<V: Clone> HandlerRegistry<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, value: V) {
        self.entries.insert(name.to_lowercase(), value);
    }

    /// Register under a primary name and any number of aliases
    pub fn insert_with_aliases(&mut self, name: &str, aliases: &[&str], value: V) {
        for alias in aliases {
            self.entries.insert(alias.to_lowercase(), value.clone());
        }
        self.insert(name, value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&name.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for HandlerRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
