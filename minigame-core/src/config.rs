//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::zone::{Language, Operation, OptionSet, ZoneContent, ZoneId};
use crate::{GameError, GameResult};

/// Code-view content of each zone when the game is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialLayout {
    /// Left zone.
    #[serde(default)]
    pub left: ZoneContent,
    /// Middle zone.
    #[serde(default)]
    pub middle: ZoneContent,
    /// Right zone.
    #[serde(default)]
    pub right: ZoneContent,
}

impl InitialLayout {
    /// Zones in display order.
    #[must_use]
    pub const fn to_array(self) -> [ZoneContent; 3] {
        [self.left, self.middle, self.right]
    }
}

impl Default for InitialLayout {
    /// Language toggle on the left, an empty middle, theme rotation on the
    /// right.
    fn default() -> Self {
        Self {
            left: ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle)),
            middle: ZoneContent::empty(),
            right: ZoneContent::new(Some(OptionSet::themes()), Some(Operation::Rotate)),
        }
    }
}

/// Settings a [`MiniGame`](crate::MiniGame) is created from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting code-view layout.
    pub layout: InitialLayout,
    /// Whether the primary pointer can hover. Touch-only devices get a drag
    /// ghost.
    pub hover_capable: bool,
    /// Language assumed when none is stored.
    pub language: Language,
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the layout is invalid.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the layout is expressible in the code view.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidValue`] if a zone holds the neutral option
    /// set.
    pub fn validate(&self) -> GameResult<()> {
        for (id, zone) in ZoneId::ALL.into_iter().zip(self.layout.to_array()) {
            if zone.options.is_some_and(OptionSet::is_neutral) {
                return Err(GameError::InvalidValue(format!(
                    "zone {id}: the neutral option set cannot start in the code view"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = GameConfig::from_json("{}").expect("parses");
        assert_eq!(config, GameConfig::default());
        assert!(!config.hover_capable);
        assert_eq!(config.language, Language::En);
        assert_eq!(
            config.layout.right.options,
            Some(OptionSet::themes())
        );
    }

    #[test]
    fn partial_layout_keeps_other_zones_empty() {
        let json = r#"{
            "hover_capable": true,
            "language": "hu",
            "layout": { "middle": { "operation": "rotate" } }
        }"#;
        let config = GameConfig::from_json(json).expect("parses");
        assert!(config.hover_capable);
        assert_eq!(config.language, Language::Hu);
        assert_eq!(config.layout.left, ZoneContent::empty());
        assert_eq!(config.layout.middle.operation, Some(Operation::Rotate));
    }

    #[test]
    fn neutral_layout_is_rejected() {
        let mut config = GameConfig::default();
        config.layout.middle.options = Some(OptionSet::Neutral);
        assert!(matches!(config.validate(), Err(GameError::InvalidValue(_))));

        let json = serde_json::to_string(&config).expect("serializes");
        assert!(GameConfig::from_json(&json).is_err());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(GameError::Serialization(_))
        ));
    }
}
