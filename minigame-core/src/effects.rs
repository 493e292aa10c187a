//! Page effects the execution engine triggers.
//!
//! The game only switches language and theme through these traits; relabeling
//! the page and restyling it belong to the implementor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{KeyValueStore, StoreError, LANGUAGE_KEY, THEME_KEY, THEME_UNLOCKED_KEY};
use crate::zone::Language;

/// Page color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme (`body.darkmode`).
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Failures raised by effect implementations.
#[derive(Debug, Error)]
pub enum EffectError {
    /// The language could not be applied.
    #[error("Language switch failed: {0}")]
    Language(String),
    /// The theme could not be applied.
    #[error("Theme switch failed: {0}")]
    Theme(String),
    /// Persisting the preference failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Language switching.
pub trait LanguageEffect {
    /// Currently active language.
    fn language(&self) -> Language;

    /// Activate a language.
    ///
    /// # Errors
    ///
    /// Returns an error if the page could not be switched.
    fn set_language(&mut self, language: Language) -> Result<(), EffectError>;
}

/// Theme switching with a one-way unlock latch for the page's theme button.
pub trait ThemeEffect {
    /// Currently active theme.
    fn theme(&self) -> Theme;

    /// Flip the theme and return the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the page could not be restyled.
    fn toggle_theme(&mut self) -> Result<Theme, EffectError>;

    /// Whether the theme button has been unlocked.
    fn is_theme_unlocked(&self) -> bool;

    /// Trip the latch. Returns `true` if it was not set before.
    ///
    /// # Errors
    ///
    /// Returns an error if the latch could not be persisted.
    fn unlock_theme(&mut self) -> Result<bool, EffectError>;
}

/// Everything the execution engine calls out to.
pub trait Effects: LanguageEffect + ThemeEffect {}

impl<T: LanguageEffect + ThemeEffect> Effects for T {}

/// Effects that only record preferences in a [`KeyValueStore`].
///
/// Useful on its own for native hosts and tests, and as the persistence half
/// of a page implementation.
#[derive(Debug, Clone)]
pub struct StoredPreferences<S> {
    store: S,
    language: Language,
    theme: Theme,
    unlocked: bool,
}

impl<S: KeyValueStore> StoredPreferences<S> {
    /// Load preferences, falling back to `default_language` and the light
    /// theme for missing or unreadable values.
    #[must_use]
    pub fn load(store: S, default_language: Language) -> Self {
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default_language);
        let theme = store
            .get(THEME_KEY)
            .as_deref()
            .and_then(Theme::from_stored)
            .unwrap_or_default();
        let unlocked = store.get(THEME_UNLOCKED_KEY).as_deref() == Some("true");
        Self {
            store,
            language,
            theme,
            unlocked,
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> LanguageEffect for StoredPreferences<S> {
    fn language(&self) -> Language {
        self.language
    }

    fn set_language(&mut self, language: Language) -> Result<(), EffectError> {
        self.store.set(LANGUAGE_KEY, language.code())?;
        self.language = language;
        tracing::info!(language = %language, "language changed");
        Ok(())
    }
}

impl<S: KeyValueStore> ThemeEffect for StoredPreferences<S> {
    fn theme(&self) -> Theme {
        self.theme
    }

    fn toggle_theme(&mut self) -> Result<Theme, EffectError> {
        let next = self.theme.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        tracing::info!(theme = next.as_str(), "theme changed");
        Ok(next)
    }

    fn is_theme_unlocked(&self) -> bool {
        self.unlocked
    }

    fn unlock_theme(&mut self) -> Result<bool, EffectError> {
        if self.unlocked {
            return Ok(false);
        }
        self.store.set(THEME_UNLOCKED_KEY, "true")?;
        self.unlocked = true;
        tracing::info!("theme switcher unlocked");
        Ok(true)
    }
}
