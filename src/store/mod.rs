// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local key-value persistence and the session token stored in it.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Key holding the access token.
pub const TOKEN_KEY: &str = "token";

/// Device-local key-value storage.
///
/// Every operation may fail with [`AppError::Storage`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Holder of the single opaque access token.
///
/// Absence of a value means the user is logged out.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    /// Read the stored token.
    pub async fn get(&self) -> Result<Option<String>> {
        Ok(self
            .inner
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    /// Replace the stored token.
    pub async fn set(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(AppError::Storage("refusing to store an empty token".to_string()));
        }
        self.inner.set(TOKEN_KEY, token).await
    }

    /// Remove the stored token.
    pub async fn clear(&self) -> Result<()> {
        self.inner.remove(TOKEN_KEY).await
    }

    /// Read the token, treating a storage failure as logged out.
    pub async fn get_or_logged_out(&self) -> Option<String> {
        match self.get().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Session storage unavailable, treating as logged out");
                None
            }
        }
    }
}
