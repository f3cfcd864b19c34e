use async_trait::async_trait;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{ObjectPath, ObjectStore};
use crate::common::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Keeps uploaded objects in memory; URLs point at `memory://`.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    failing: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent upload fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.lock().get(path).cloned()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StoredObject>> {
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn upload(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("uploads disabled".into()));
        }

        let mut objects = self.lock();
        if objects.contains_key(path.as_str()) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }

        objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.map(str::to_string),
            },
        );

        Ok(format!("memory://{}", path))
    }
}
