use std::mem;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::loader::{load_settings, LoadedSettings, SettingsLoadError};
use crate::settings::{EntityCatalog, Settings};

static SETTINGS_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_settings_lock_poison_once(operation: &'static str) {
    if SETTINGS_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "settings lock poisoned; recovered inner value");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Replaced,
    Unchanged,
}

#[derive(Debug)]
struct Published {
    settings: Arc<Settings>,
    digest_sha256_hex: Option<String>,
}

/// Shared access to the current settings snapshot. Readers get an `Arc` and
/// keep using it even if a reload swaps in a new one meanwhile.
#[derive(Clone, Debug)]
pub struct SettingsHandle {
    current: Arc<RwLock<Published>>,
}

impl Default for SettingsHandle {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SettingsHandle {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: Arc::new(RwLock::new(Published {
                settings: Arc::new(settings),
                digest_sha256_hex: None,
            })),
        }
    }

    pub fn from_loaded(loaded: LoadedSettings) -> Self {
        Self {
            current: Arc::new(RwLock::new(Published {
                settings: Arc::new(loaded.settings),
                digest_sha256_hex: Some(loaded.digest_sha256_hex),
            })),
        }
    }

    pub fn snapshot(&self) -> Arc<Settings> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard.settings),
            Err(poisoned) => {
                warn_settings_lock_poison_once("read");
                Arc::clone(&poisoned.into_inner().settings)
            }
        }
    }

    pub fn digest_sha256_hex(&self) -> Option<String> {
        match self.current.read() {
            Ok(guard) => guard.digest_sha256_hex.clone(),
            Err(poisoned) => {
                warn_settings_lock_poison_once("read");
                poisoned.into_inner().digest_sha256_hex.clone()
            }
        }
    }

    pub fn publish(&self, settings: Settings) {
        let previous = self.swap(Published {
            settings: Arc::new(settings),
            digest_sha256_hex: None,
        });
        drop(previous);
    }

    /// Leaves the current snapshot in place when loading fails.
    pub fn reload_from_path(
        &self,
        path: &Path,
        catalog: &EntityCatalog,
    ) -> Result<ReloadOutcome, SettingsLoadError> {
        let loaded = load_settings(path, catalog)?;
        if self.digest_sha256_hex().as_deref() == Some(loaded.digest_sha256_hex.as_str()) {
            info!(path = %path.display(), "settings_reload_unchanged");
            return Ok(ReloadOutcome::Unchanged);
        }
        let previous = self.swap(Published {
            settings: Arc::new(loaded.settings),
            digest_sha256_hex: Some(loaded.digest_sha256_hex),
        });
        drop(previous);
        info!(path = %path.display(), "settings_reloaded");
        Ok(ReloadOutcome::Replaced)
    }

    /// The replaced snapshot is dropped after the write lock is released.
    fn swap(&self, next: Published) -> Published {
        match self.current.write() {
            Ok(mut guard) => mem::replace(&mut *guard, next),
            Err(poisoned) => {
                warn_settings_lock_poison_once("write");
                let mut guard = poisoned.into_inner();
                mem::replace(&mut *guard, next)
            }
        }
    }
}
