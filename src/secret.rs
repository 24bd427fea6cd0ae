//! Secret-backed parameter resolution.
//!
//! Grep rules normally carry plain strings, but any parameter may instead point
//! at one key of a named secret. A [`SecretLoader`] turns such a reference into
//! the concrete value at directive build time.
//!
//! # Examples
//!
//! ```rust
//! use grep_directive::secret::{MapSecretLoader, SecretLoader, SecretRef};
//!
//! let mut loader = MapSecretLoader::new();
//! loader.insert("patterns", "status", "/^5\\d\\d$/");
//!
//! let value = loader.load(&SecretRef::new("patterns", "status"))?;
//! assert_eq!(value, "/^5\\d\\d$/");
//! # Ok::<(), grep_directive::GrepError>(())
//! ```

use crate::error::{GrepError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Reference to one key of a named secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretRef {
    pub name: String,
    pub key: String,
}

impl SecretRef {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Resolves secret references into their values.
///
/// Implementations may block (for example on a secret store lookup); the
/// directive builder waits for each call before converting the next rule.
pub trait SecretLoader {
    fn load(&self, secret: &SecretRef) -> Result<String>;
}

impl<L: SecretLoader + ?Sized> SecretLoader for &L {
    fn load(&self, secret: &SecretRef) -> Result<String> {
        (**self).load(secret)
    }
}

impl<L: SecretLoader + ?Sized> SecretLoader for Box<L> {
    fn load(&self, secret: &SecretRef) -> Result<String> {
        (**self).load(secret)
    }
}

impl<L: SecretLoader + ?Sized> SecretLoader for Arc<L> {
    fn load(&self, secret: &SecretRef) -> Result<String> {
        (**self).load(secret)
    }
}

/// In-memory secret store keyed by secret name, then by key.
#[derive(Debug, Clone, Default)]
pub struct MapSecretLoader {
    secrets: HashMap<String, HashMap<String, String>>,
}

impl MapSecretLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `secret`/`key`, replacing any previous value.
    pub fn insert(
        &mut self,
        secret: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.secrets
            .entry(secret.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn with_secret(
        mut self,
        secret: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(secret, key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.secrets.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretLoader for MapSecretLoader {
    fn load(&self, secret: &SecretRef) -> Result<String> {
        if secret.name.is_empty() || secret.key.is_empty() {
            return Err(GrepError::InvalidSecret(format!(
                "name and key must be non-empty (name: '{}', key: '{}')",
                secret.name, secret.key
            )));
        }

        let entries = self
            .secrets
            .get(&secret.name)
            .ok_or_else(|| GrepError::SecretNotFound(secret.name.clone()))?;

        entries
            .get(&secret.key)
            .cloned()
            .ok_or_else(|| GrepError::SecretKeyNotFound {
                secret: secret.name.clone(),
                key: secret.key.clone(),
            })
    }
}

/// Loader for configurations that must not reference secrets.
///
/// Every lookup fails; plain parameters never reach a loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecretLoader;

impl SecretLoader for NoSecretLoader {
    fn load(&self, secret: &SecretRef) -> Result<String> {
        Err(GrepError::SecretNotFound(secret.name.clone()))
    }
}
