#![forbid(unsafe_code)]

//! Dark-mode flag.
//!
//! The flag is persisted as `"true"`/`"false"` under a single key. The
//! controller keeps the visible theme and the stored value in agreement
//! after load and after every toggle.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Store unavailable on load | Treated as light mode, logged at `warn` |
//! | Write fails on toggle | Theme still switches, `persisted == false`, logged at `warn` |

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::FxResult;

// ─────────────────────────────────────────────────────────────────────────────
// Storage
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store cannot be reached (private browsing, quota, no window).
    Unavailable(String),
    /// The store answered but its state is unusable.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string key-value store holding the theme flag.
pub trait ThemeStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory store for tests and hosts without persistent storage.
pub struct MemoryThemeStore {
    data: RwLock<HashMap<String, String>>,
    available: bool,
}

impl MemoryThemeStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: RwLock::default(),
            available: true,
        }
    }

    /// A store that fails every operation.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            data: RwLock::default(),
            available: false,
        }
    }

    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.data.write() {
            guard.insert(key.to_owned(), value.to_owned());
        }
        store
    }

    fn check(&self) -> StorageResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("memory store disabled".into()))
        }
    }
}

impl Default for MemoryThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn name(&self) -> &str {
        "MemoryThemeStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check()?;
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check()?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl fmt::Debug for MemoryThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryThemeStore")
            .field("entries", &count)
            .field("available", &self.available)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub dark_class: String,
    pub dark_icon: String,
    pub light_icon: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "darkMode".into(),
            dark_class: "dark-mode".into(),
            dark_icon: "fa-sun".into(),
            light_icon: "fa-moon".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Stored representation.
    pub fn as_flag(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }

    /// Only the exact string `"true"` means dark.
    pub fn from_flag(flag: Option<&str>) -> Self {
        if flag == Some("true") {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

/// What the host should apply after a load or toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeApply {
    pub mode: ThemeMode,
    /// Class on the root element.
    pub class: String,
    pub class_on: bool,
    /// Icon class for the toggle button.
    pub icon: String,
    /// Whether the flag reached the store.
    pub persisted: bool,
}

/// Owns the theme flag and its store.
pub struct ThemeController<S> {
    store: S,
    config: ThemeConfig,
    mode: ThemeMode,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Read the stored flag, then apply and persist it.
    pub fn load(store: S, config: ThemeConfig) -> (Self, ThemeApply) {
        let mut controller = Self {
            mode: ThemeMode::from_flag(None),
            store,
            config,
        };
        let mode = controller.read_stored().unwrap_or_else(|e| {
            tracing::warn!(
                unit = "theme",
                store = controller.store.name(),
                error = %e,
                "theme flag unreadable"
            );
            ThemeMode::from_flag(None)
        });
        let apply = controller.set_mode(mode);
        (controller, apply)
    }

    /// The mode the store holds; an absent flag reads as light.
    pub fn read_stored(&self) -> FxResult<ThemeMode> {
        let flag = self.store.get(&self.config.storage_key)?;
        Ok(ThemeMode::from_flag(flag.as_deref()))
    }

    /// Write the current mode to the store.
    pub fn persist(&self) -> FxResult<()> {
        self.store.set(&self.config.storage_key, self.mode.as_flag())?;
        Ok(())
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn toggle(&mut self) -> ThemeApply {
        self.set_mode(self.mode.flipped())
    }

    pub fn set_mode(&mut self, mode: ThemeMode) -> ThemeApply {
        self.mode = mode;
        let persisted = match self.persist() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    unit = "theme",
                    store = self.store.name(),
                    error = %e,
                    "theme flag not persisted"
                );
                false
            }
        };
        tracing::debug!(unit = "theme", dark = mode.is_dark(), persisted, "theme applied");
        ThemeApply {
            mode,
            class: self.config.dark_class.clone(),
            class_on: mode.is_dark(),
            icon: if mode.is_dark() {
                self.config.dark_icon.clone()
            } else {
                self.config.light_icon.clone()
            },
            persisted,
        }
    }
}

impl ThemeApply {
    /// Toggle for the root element's theme class.
    pub fn class_toggle(&self) -> (&str, bool) {
        (&self.class, self.class_on)
    }
}

impl<S> fmt::Debug for ThemeController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("mode", &self.mode)
            .field("key", &self.config.storage_key)
            .finish()
    }
}
