#![forbid(unsafe_code)]

use folio_fx::theme::{StorageError, StorageResult, ThemeStore};
use web_sys::Storage;

/// `window.localStorage` as a [`ThemeStore`].
///
/// The storage object is looked up on every call; a denied or disabled store
/// reads as [`StorageError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> StorageResult<Storage> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

impl ThemeStore for LocalStorageStore {
    fn name(&self) -> &str {
        "localStorage"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}
