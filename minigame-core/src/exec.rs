//! # Execution Engine
//!
//! Runs a zone's configured function:
//!
//! | Options   | Toggle          | Rotate                   |
//! |-----------|-----------------|--------------------------|
//! | languages | switch language | swap order               |
//! | themes    | switch theme    | flip rotation, set order |
//! | neutral   | acknowledge     | acknowledge              |
//!
//! A zone missing either piece is incomplete. Effect failures are downgraded
//! to a generic error message.

use serde::Serialize;

use crate::effects::{EffectError, Effects, Theme};
use crate::messages::messages;
use crate::model::View;
use crate::zone::{Language, Operation, OptionSet, Pair, ZoneContent};

/// Semantic color of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Effect applied.
    Success,
    /// Incomplete zone or failed effect.
    Error,
    /// Acknowledgement without effect.
    Neutral,
}

impl Tone {
    /// CSS color for the console text; neutral inherits.
    #[must_use]
    pub const fn css_color(self) -> &'static str {
        match self {
            Self::Success => "#50fa7b",
            Self::Error => "#ff5555",
            Self::Neutral => "",
        }
    }
}

/// The effect a successful run applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// The page language switched.
    LanguageChanged {
        /// Language now active.
        language: Language,
    },
    /// The page theme switched.
    ThemeChanged {
        /// Theme now active.
        theme: Theme,
        /// Whether this run tripped the theme-button latch.
        unlocked: bool,
    },
    /// The pair's display order swapped.
    OptionsRotated {
        /// Face labels in their new order.
        order: [&'static str; 2],
        /// Rotated flag after the run.
        rotated: bool,
    },
}

/// Outcome of running a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// An effect was applied.
    Success {
        /// Console text.
        message: String,
        /// Applied effect.
        effect: Effect,
    },
    /// Options or operation missing.
    Incomplete {
        /// Console text.
        message: String,
    },
    /// Valid but inert combination.
    Executed {
        /// Console text.
        message: String,
    },
    /// An effect failed.
    ExecutionError {
        /// Console text.
        message: String,
    },
}

impl ExecutionResult {
    /// Console text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. }
            | Self::Incomplete { message }
            | Self::Executed { message }
            | Self::ExecutionError { message } => message,
        }
    }

    /// Console color.
    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Self::Success { .. } => Tone::Success,
            Self::Incomplete { .. } | Self::ExecutionError { .. } => Tone::Error,
            Self::Executed { .. } => Tone::Neutral,
        }
    }

    /// Whether an effect was applied.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Run the function configured in `zone`, as seen in `view`.
///
/// Rotation rewrites the zone's option order in place; toggles call out to
/// `effects`.
pub fn execute<E: Effects + ?Sized>(
    view: View,
    zone: &mut ZoneContent,
    effects: &mut E,
) -> ExecutionResult {
    let language = effects.language();
    let (Some(options), Some(operation)) = (zone.options, zone.operation) else {
        return ExecutionResult::Incomplete {
            message: messages(language).incomplete_for(view).to_string(),
        };
    };

    match run(zone, options, operation, language, effects) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(%err, ?options, ?operation, "execution failed");
            ExecutionResult::ExecutionError {
                message: messages(language).execution_error.to_string(),
            }
        }
    }
}

fn run<E: Effects + ?Sized>(
    zone: &mut ZoneContent,
    options: OptionSet,
    operation: Operation,
    language: Language,
    effects: &mut E,
) -> Result<ExecutionResult, EffectError> {
    let result = match (options, operation) {
        (OptionSet::Language(_), Operation::Toggle) => {
            effects.set_language(language.other())?;
            let now = effects.language();
            ExecutionResult::Success {
                message: messages(now).language_changed.to_string(),
                effect: Effect::LanguageChanged { language: now },
            }
        }
        (OptionSet::Language(pair), Operation::Rotate) => {
            let rotated = OptionSet::Language(pair.swapped());
            zone.options = Some(rotated);
            zone.rotated = !zone.rotated;
            rotated_result(rotated, zone.rotated, language)
        }
        (OptionSet::Theme(_), Operation::Rotate) => {
            let order = if zone.rotated {
                Pair::THEMES
            } else {
                Pair::THEMES.swapped()
            };
            let rotated = OptionSet::Theme(order);
            zone.options = Some(rotated);
            zone.rotated = !zone.rotated;
            rotated_result(rotated, zone.rotated, language)
        }
        (OptionSet::Theme(_), Operation::Toggle) => {
            let theme = effects.toggle_theme()?;
            let unlocked = if effects.is_theme_unlocked() {
                false
            } else {
                effects.unlock_theme()?
            };
            ExecutionResult::Success {
                message: messages(language).theme_changed.to_string(),
                effect: Effect::ThemeChanged { theme, unlocked },
            }
        }
        (OptionSet::Neutral, _) => ExecutionResult::Executed {
            message: messages(language).executed.to_string(),
        },
    };
    Ok(result)
}

fn rotated_result(options: OptionSet, rotated: bool, language: Language) -> ExecutionResult {
    ExecutionResult::Success {
        message: messages(language).options_rotated.to_string(),
        effect: Effect::OptionsRotated {
            order: options.labels().unwrap_or_default(),
            rotated,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{LanguageEffect, StoredPreferences, ThemeEffect};
    use crate::store::MemoryStore;

    fn prefs() -> StoredPreferences<MemoryStore> {
        StoredPreferences::load(MemoryStore::new(), Language::En)
    }

    /// Effects whose every call fails.
    struct Broken;

    impl LanguageEffect for Broken {
        fn language(&self) -> Language {
            Language::En
        }

        fn set_language(&mut self, _language: Language) -> Result<(), EffectError> {
            Err(EffectError::Language("page not ready".to_string()))
        }
    }

    impl ThemeEffect for Broken {
        fn theme(&self) -> Theme {
            Theme::Light
        }

        fn toggle_theme(&mut self) -> Result<Theme, EffectError> {
            Err(EffectError::Theme("no body".to_string()))
        }

        fn is_theme_unlocked(&self) -> bool {
            false
        }

        fn unlock_theme(&mut self) -> Result<bool, EffectError> {
            Ok(true)
        }
    }

    #[test]
    fn missing_options_is_incomplete_for_every_operation() {
        for operation in [None, Some(Operation::Toggle), Some(Operation::Rotate)] {
            let mut zone = ZoneContent::new(None, operation);
            let result = execute(View::Code, &mut zone, &mut prefs());
            assert_eq!(
                result,
                ExecutionResult::Incomplete {
                    message: "Function is incomplete".to_string()
                }
            );
            assert_eq!(result.tone(), Tone::Error);
        }
    }

    #[test]
    fn incomplete_wording_depends_on_view() {
        let mut zone = ZoneContent::new(Some(OptionSet::languages()), None);
        let result = execute(View::Visual, &mut zone, &mut prefs());
        assert_eq!(result.message(), "Function incomplete");
    }

    #[test]
    fn language_toggle_switches_to_other_language() {
        let mut effects = prefs();
        let mut zone = ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle));

        let result = execute(View::Code, &mut zone, &mut effects);

        assert_eq!(effects.language(), Language::Hu);
        assert_eq!(
            result,
            ExecutionResult::Success {
                message: "Nyelv megváltoztatva!".to_string(),
                effect: Effect::LanguageChanged {
                    language: Language::Hu
                },
            }
        );
    }

    #[test]
    fn language_rotate_swaps_order() {
        let mut zone = ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Rotate));
        let result = execute(View::Visual, &mut zone, &mut prefs());

        assert_eq!(zone.options, Some(OptionSet::languages().swapped()));
        assert!(zone.rotated);
        assert_eq!(result.message(), "Options order swapped!");
    }

    #[test]
    fn theme_rotate_alternates_order() {
        let mut effects = prefs();
        let mut zone = ZoneContent::new(Some(OptionSet::themes()), Some(Operation::Rotate));
        let sun = "\u{2600}\u{fe0f}";
        let moon = "\u{1f319}";

        let mut orders = Vec::new();
        for _ in 0..3 {
            match execute(View::Code, &mut zone, &mut effects) {
                ExecutionResult::Success {
                    effect: Effect::OptionsRotated { order, rotated },
                    ..
                } => {
                    assert_eq!(rotated, zone.rotated);
                    orders.push(order);
                }
                other => panic!("expected rotation, got {other:?}"),
            }
        }

        assert_eq!(orders, vec![[moon, sun], [sun, moon], [moon, sun]]);
        assert!(zone.rotated);
    }

    #[test]
    fn theme_toggle_unlocks_switcher_once() {
        let mut effects = prefs();
        let mut zone = ZoneContent::new(Some(OptionSet::themes()), Some(Operation::Toggle));

        let first = execute(View::Code, &mut zone, &mut effects);
        let second = execute(View::Code, &mut zone, &mut effects);

        assert_eq!(
            first,
            ExecutionResult::Success {
                message: "Theme changed!".to_string(),
                effect: Effect::ThemeChanged {
                    theme: Theme::Dark,
                    unlocked: true
                },
            }
        );
        assert!(matches!(
            second,
            ExecutionResult::Success {
                effect: Effect::ThemeChanged {
                    theme: Theme::Light,
                    unlocked: false
                },
                ..
            }
        ));
        assert!(effects.is_theme_unlocked());
    }

    #[test]
    fn neutral_options_are_acknowledged_without_effect() {
        let mut effects = prefs();
        for operation in [Operation::Toggle, Operation::Rotate] {
            let mut zone = ZoneContent::new(Some(OptionSet::Neutral), Some(operation));
            let result = execute(View::Visual, &mut zone, &mut effects);
            assert_eq!(result.message(), "Function Executed");
            assert_eq!(result.tone(), Tone::Neutral);
            assert_eq!(zone.options, Some(OptionSet::Neutral));
        }
        assert_eq!(effects.language(), Language::En);
        assert_eq!(effects.theme(), Theme::Light);
    }

    #[test]
    fn failing_effects_are_downgraded() {
        let mut zone = ZoneContent::new(Some(OptionSet::themes()), Some(Operation::Toggle));
        let result = execute(View::Code, &mut zone, &mut Broken);
        assert_eq!(
            result,
            ExecutionResult::ExecutionError {
                message: "Error executing function".to_string()
            }
        );

        let mut zone = ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle));
        assert!(matches!(
            execute(View::Code, &mut zone, &mut Broken),
            ExecutionResult::ExecutionError { .. }
        ));
    }
}
