// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process key-value store.

use super::KeyValueStore;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value store kept in memory.
///
/// An unavailable store fails every operation, standing in for device
/// storage that cannot be reached.
pub struct MemoryStore {
    entries: Option<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Some(Mutex::new(HashMap::new())),
        }
    }

    /// Create a store whose every operation returns a storage error.
    pub fn unavailable() -> Self {
        Self { entries: None }
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T> {
        let entries = self
            .entries
            .as_ref()
            .ok_or_else(|| AppError::Storage("Storage not available (offline mode)".to_string()))?;
        let mut guard = entries
            .lock()
            .map_err(|_| AppError::Storage("Storage lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}
