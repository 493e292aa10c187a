//! Localized strings shown by the mini-game.

use serde::Serialize;

use crate::model::View;
use crate::zone::Language;

/// Every string the game writes, for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Messages {
    /// Run button.
    pub run: &'static str,
    /// Incomplete zone, code view.
    pub incomplete: &'static str,
    /// Incomplete zone, visual view.
    pub incomplete_visual: &'static str,
    /// Language switched.
    pub language_changed: &'static str,
    /// Theme switched.
    pub theme_changed: &'static str,
    /// Heading of the demo area.
    pub demo_text: &'static str,
    /// Option order swapped.
    pub options_rotated: &'static str,
    /// Mode button while the code view is shown.
    pub show_visual: &'static str,
    /// Mode button while the visual view is shown.
    pub show_code: &'static str,
    /// Acknowledgement for combinations without an effect.
    pub executed: &'static str,
    /// Effect failed.
    pub execution_error: &'static str,
}

/// English strings.
pub const EN: Messages = Messages {
    run: "Run",
    incomplete: "Function is incomplete",
    incomplete_visual: "Function incomplete",
    language_changed: "Language changed!",
    theme_changed: "Theme changed!",
    demo_text: "Hello World!",
    options_rotated: "Options order swapped!",
    show_visual: "Show Visual",
    show_code: "Show Code",
    executed: "Function Executed",
    execution_error: "Error executing function",
};

/// Hungarian strings.
pub const HU: Messages = Messages {
    run: "Futtatás",
    incomplete: "A függvény hiányos",
    incomplete_visual: "Funkció hiányos",
    language_changed: "Nyelv megváltoztatva!",
    theme_changed: "Téma megváltoztatva!",
    demo_text: "Szia Világ!",
    options_rotated: "Opciók sorrendeje felcserélve!",
    show_visual: "Vizuális Mód",
    show_code: "Kód Mód",
    executed: "Funkció végrehajtva",
    execution_error: "Hiba a függvény futtatásakor",
};

/// Strings for a language.
#[must_use]
pub const fn messages(language: Language) -> &'static Messages {
    match language {
        Language::En => &EN,
        Language::Hu => &HU,
    }
}

impl Messages {
    /// Incomplete-zone message for a view.
    #[must_use]
    pub const fn incomplete_for(&self, view: View) -> &'static str {
        match view {
            View::Code => self.incomplete,
            View::Visual => self.incomplete_visual,
        }
    }

    /// Mode button label while `view` is shown.
    #[must_use]
    pub const fn mode_toggle_for(&self, view: View) -> &'static str {
        match view {
            View::Code => self.show_visual,
            View::Visual => self.show_code,
        }
    }
}

/// Labels the page applies after a language change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiLabels {
    /// Language the labels are in.
    pub language: Language,
    /// Run buttons.
    pub run: &'static str,
    /// Demo heading.
    pub demo_text: &'static str,
    /// Mode toggle button.
    pub mode_toggle: &'static str,
}

/// Labels for `language` while `view` is shown.
#[must_use]
pub const fn ui_labels(language: Language, view: View) -> UiLabels {
    let messages = messages(language);
    UiLabels {
        language,
        run: messages.run,
        demo_text: messages.demo_text,
        mode_toggle: messages.mode_toggle_for(view),
    }
}
