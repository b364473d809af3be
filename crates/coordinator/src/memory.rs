use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{BoxFuture, Coordinator, CoordinatorError};

/// Coordinator that keeps entries in a process-local map.
///
/// Useful for single-node setups and for tests; `set_unavailable(true)`
/// makes every put fail.
#[derive(Debug, Default)]
pub struct InMemoryCoordinator {
    entries: Mutex<BTreeMap<String, String>>,
    puts: Mutex<Vec<String>>,
    unavailable: AtomicBool,
}

impl InMemoryCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Current value stored at `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Snapshot of all entries.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of successful puts made against `key`.
    pub fn put_count(&self, key: &str) -> usize {
        self.puts.lock().unwrap().iter().filter(|k| *k == key).count()
    }
}

impl Coordinator for InMemoryCoordinator {
    fn put<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> BoxFuture<'a, Result<(), CoordinatorError>> {
        Box::pin(async move {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(CoordinatorError::Unavailable(
                    "in-memory coordinator marked unavailable".into(),
                ));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            self.puts.lock().unwrap().push(key.to_string());
            Ok(())
        })
    }
}
