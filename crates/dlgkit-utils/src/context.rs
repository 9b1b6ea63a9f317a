#![forbid(unsafe_code)]

//! Explicit context passing down a presentation tree.
//!
//! A [`ContextMap`] is a typed key/value bag a parent hands to its
//! descendants by parameter, in place of ambient lookup: the producer
//! `provide`s a value under a shared literal key, and a nested consumer
//! `consume`s it by the same key and type. A wrong key or a mismatched type
//! yields `None` rather than a fault.

use ahash::AHashMap;
use std::any::Any;

/// Typed key/value context handed down a presentation tree.
#[derive(Default)]
pub struct ContextMap {
    values: AHashMap<&'static str, Box<dyn Any>>,
}

impl std::fmt::Debug for ContextMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMap")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ContextMap {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide `value` under `key`, replacing any previous value.
    pub fn provide<T: 'static>(&mut self, key: &'static str, value: T) {
        self.values.insert(key, Box::new(value));
    }

    /// Consume the value under `key`, if present and of type `T`.
    pub fn consume<T: 'static>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref::<T>()
    }

    /// Whether a value is provided under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove the value under `key`.
    pub fn revoke(&mut self, key: &str) {
        self.values.remove(key);
    }
}
