//! Serialized access to the `DOSSIER_*` variables for config tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

const OVERRIDE_KEYS: [&str; 4] = [
    "DOSSIER_API_URL",
    "DOSSIER_DATA_DIR",
    "DOSSIER_LOG_LEVEL",
    "DOSSIER_CONNECT_TIMEOUT_SECS",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the env lock with every override variable cleared. Previous values
/// come back on drop, before the lock is released.
pub(super) struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    pub(super) fn clean() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = OVERRIDE_KEYS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_KEYS {
            // SAFETY: every config test that touches these variables holds
            // ENV_LOCK through a ScopedEnv.
            unsafe { std::env::remove_var(key) };
        }
        Self { saved, _lock: lock }
    }

    pub(super) fn with(self, key: &'static str, value: &str) -> Self {
        assert!(OVERRIDE_KEYS.contains(&key), "{key} is not a config override");
        // SAFETY: ENV_LOCK is held by `self`.
        unsafe { std::env::set_var(key, value) };
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            // SAFETY: ENV_LOCK is still held; `_lock` drops after this body.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
