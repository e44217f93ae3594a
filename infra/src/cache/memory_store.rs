//! Process-local credential store

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use sk_core::{CredentialStore, StoreError};

/// Expired entries are swept on write once the map holds this many keys
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory credential store for development and single-instance setups
///
/// Every operation takes one short mutex section, which makes the compare
/// operations atomic. Expired entries read as absent and are dropped lazily.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    key_prefix: Option<String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: Option<String>) -> Self {
        Self {
            key_prefix: prefix,
            ..Self::default()
        }
    }

    fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|e| e.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        before - entries.len()
    }

    /// Value of a live entry, evicting it if it has expired
    fn live_value(entries: &mut HashMap<String, Entry>, key: &str) -> Option<String> {
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}

fn entry(value: &str, ttl_seconds: u64) -> Entry {
    Entry {
        value: value.to_string(),
        expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        let key = self.make_key(key);
        let mut entries = self.entries.lock();
        if entries.len() >= SWEEP_THRESHOLD {
            let now = Instant::now();
            entries.retain(|_, e| e.is_live(now));
        }
        entries.insert(key, entry(value, ttl_seconds));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let key = self.make_key(key);
        Ok(Self::live_value(&mut self.entries.lock(), &key))
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let key = self.make_key(key);
        let mut entries = self.entries.lock();
        let was_live = Self::live_value(&mut entries, &key).is_some();
        entries.remove(&key);
        Ok(was_live)
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        new: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError> {
        let key = self.make_key(key);
        let mut entries = self.entries.lock();
        match Self::live_value(&mut entries, &key) {
            Some(current) if current == expected => {
                entries.insert(key, entry(new, ttl_seconds));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let key = self.make_key(key);
        let mut entries = self.entries.lock();
        match Self::live_value(&mut entries, &key) {
            Some(current) if current == expected => {
                entries.remove(&key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
