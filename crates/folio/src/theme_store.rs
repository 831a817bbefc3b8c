#![forbid(unsafe_code)]

//! Active theme, seeded from storage and written back on every change.

use folio_runtime::SharedStorage;
use folio_theme::Theme;

/// Storage key holding the persisted theme name.
pub const THEME_KEY: &str = "theme";

pub struct ThemeStore {
    current: Theme,
    storage: SharedStorage,
}

impl ThemeStore {
    /// Read the persisted theme. Missing or unknown values fall back to
    /// [`Theme::Light`].
    pub fn load(storage: SharedStorage) -> Self {
        let stored = storage.borrow().get(THEME_KEY);
        let current = match stored {
            Ok(Some(raw)) => Theme::from_persisted(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown persisted theme, using light");
                Theme::Light
            }),
            Ok(None) => Theme::Light,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted theme");
                Theme::Light
            }
        };
        tracing::debug!(theme = %current, "theme loaded");
        Self { current, storage }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Advance to the next theme and persist it.
    pub fn cycle(&mut self) -> Theme {
        self.current = self.current.next();
        self.persist();
        tracing::debug!(theme = %self.current, "theme cycled");
        self.current
    }

    fn persist(&self) {
        let result = self
            .storage
            .borrow_mut()
            .set(THEME_KEY, self.current.as_str().to_owned());
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to persist theme");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_runtime::{FileStorage, MemoryStorage, shared};
    use proptest::prelude::*;
    use tracing_test::traced_test;

    fn persisted(storage: &SharedStorage) -> Option<String> {
        storage.borrow().get(THEME_KEY).unwrap()
    }

    #[test]
    fn defaults_to_light_without_storage_entry() {
        let store = ThemeStore::load(shared(MemoryStorage::new()));
        assert_eq!(store.get(), Theme::Light);
    }

    #[test]
    fn restores_persisted_theme() {
        let storage = shared(MemoryStorage::with_entries([(THEME_KEY, "ocean")]));
        assert_eq!(ThemeStore::load(storage).get(), Theme::Ocean);
    }

    #[traced_test]
    #[test]
    fn unknown_value_heals_to_light() {
        let storage = shared(MemoryStorage::with_entries([(THEME_KEY, "neon")]));
        let mut store = ThemeStore::load(storage.clone());
        assert_eq!(store.get(), Theme::Light);
        assert!(logs_contain("unknown persisted theme"));

        store.cycle();
        assert_eq!(persisted(&storage).as_deref(), Some("dark"));
    }

    #[test]
    fn survives_reopen_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = shared(FileStorage::open_dir(dir.path()).unwrap());
            let mut store = ThemeStore::load(storage);
            store.cycle();
            store.cycle();
        }
        let storage = shared(FileStorage::open_dir(dir.path()).unwrap());
        assert_eq!(ThemeStore::load(storage).get(), Theme::Ocean);
    }

    proptest! {
        #[test]
        fn cycles_track_count_mod_three(cycles in 0usize..64) {
            let storage = shared(MemoryStorage::new());
            let mut store = ThemeStore::load(storage.clone());
            for n in 1..=cycles {
                let theme = store.cycle();
                prop_assert_eq!(theme, Theme::ALL[n % 3]);
                prop_assert_eq!(store.get(), theme);
                let on_disk = persisted(&storage);
                prop_assert_eq!(on_disk.as_deref(), Some(theme.as_str()));
            }
            prop_assert_eq!(store.get(), Theme::ALL[cycles % 3]);
        }
    }
}
