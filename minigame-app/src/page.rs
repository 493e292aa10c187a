//! Page effects: `localStorage`, `<html lang>` and `body.darkmode`.

use js_sys::Function;
use minigame_core::{
    EffectError, KeyValueStore, Language, LanguageEffect, MemoryStore, StoreError,
    StoredPreferences, Theme, ThemeEffect,
};
use wasm_bindgen::JsValue;
use web_sys::{Document, Storage, Window};

use crate::error::js_message;

/// Class on `<body>` that switches the page to the dark theme.
pub const DARK_MODE_CLASS: &str = "darkmode";

/// Preference store over `window.localStorage`.
///
/// Private browsing can deny storage; values are then kept in memory for the
/// lifetime of the page.
#[derive(Debug)]
pub struct LocalStorageStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl LocalStorageStore {
    /// Open the window's local storage.
    #[must_use]
    pub fn open(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, preferences will not persist");
        }
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage
                .set_item(key, value)
                .map_err(|e| StoreError::Backend(js_message(&e))),
            None => self.fallback.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage
                .remove_item(key)
                .map_err(|e| StoreError::Backend(js_message(&e))),
            None => self.fallback.remove(key),
        }
    }
}

/// Effects applied to the hosting page.
///
/// Preferences persist through [`LocalStorageStore`]. Relabeling the rest of
/// the page is left to the optional `on_language` callback, which receives
/// the new language code.
#[derive(Debug)]
pub struct PageEffects {
    prefs: StoredPreferences<LocalStorageStore>,
    document: Document,
    on_language: Option<Function>,
}

impl PageEffects {
    /// Load preferences and bring the page in line with them.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be updated.
    pub fn new(
        window: &Window,
        document: Document,
        default_language: Language,
        on_language: Option<Function>,
    ) -> Result<Self, EffectError> {
        let prefs = StoredPreferences::load(LocalStorageStore::open(window), default_language);
        let effects = Self {
            prefs,
            document,
            on_language,
        };
        effects.apply_language(effects.prefs.language())?;
        effects.apply_theme(effects.prefs.theme())?;
        Ok(effects)
    }

    /// Language declared on `<html lang>`, if it is one the game knows.
    #[must_use]
    pub fn document_language(document: &Document) -> Option<Language> {
        document
            .document_element()
            .and_then(|root| root.get_attribute("lang"))
            .and_then(|lang| lang.parse().ok())
    }

    fn apply_language(&self, language: Language) -> Result<(), EffectError> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| EffectError::Language("document has no root element".to_string()))?;
        root.set_attribute("lang", language.code())
            .map_err(|e| EffectError::Language(js_message(&e)))
    }

    fn apply_theme(&self, theme: Theme) -> Result<(), EffectError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| EffectError::Theme("document has no body".to_string()))?;
        body.class_list()
            .toggle_with_force(DARK_MODE_CLASS, theme == Theme::Dark)
            .map(|_| ())
            .map_err(|e| EffectError::Theme(js_message(&e)))
    }
}

impl LanguageEffect for PageEffects {
    fn language(&self) -> Language {
        self.prefs.language()
    }

    fn set_language(&mut self, language: Language) -> Result<(), EffectError> {
        self.apply_language(language)?;
        self.prefs.set_language(language)?;
        if let Some(callback) = &self.on_language {
            callback
                .call1(&JsValue::NULL, &JsValue::from_str(language.code()))
                .map_err(|e| EffectError::Language(js_message(&e)))?;
        }
        Ok(())
    }
}

impl ThemeEffect for PageEffects {
    fn theme(&self) -> Theme {
        self.prefs.theme()
    }

    fn toggle_theme(&mut self) -> Result<Theme, EffectError> {
        let next = self.prefs.theme().toggled();
        self.apply_theme(next)?;
        self.prefs.toggle_theme()
    }

    fn is_theme_unlocked(&self) -> bool {
        self.prefs.is_theme_unlocked()
    }

    fn unlock_theme(&mut self) -> Result<bool, EffectError> {
        self.prefs.unlock_theme()
    }
}

/// Whether the primary pointer can hover. Touch-only devices match
/// `(hover: none)`.
#[must_use]
pub fn hover_capable(window: &Window) -> bool {
    !window
        .match_media("(hover: none)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}
