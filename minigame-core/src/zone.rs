//! Zone contents - the building blocks of the mini-game board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GameError;

/// One of the three independent configuration slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneId {
    /// Leftmost zone.
    Left,
    /// Middle zone.
    Middle,
    /// Rightmost zone.
    Right,
}

impl ZoneId {
    /// All zones in display order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Middle, Self::Right];

    /// Position of the zone in display order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }

    /// Name used in `data-zone` attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            "right" => Ok(Self::Right),
            other => Err(GameError::ZoneNotFound(other.to_string())),
        }
    }
}

/// Page language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Hungarian.
    Hu,
}

impl Language {
    /// Lowercase language code (`en`, `hu`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hu => "hu",
        }
    }

    /// Uppercase label shown on the flag pieces (`EN`, `HU`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Hu => "HU",
        }
    }

    /// The other language of the pair.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::En => Self::Hu,
            Self::Hu => Self::En,
        }
    }

    /// Match an uppercase piece label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "EN" => Some(Self::En),
            "HU" => Some(Self::Hu),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "hu" => Ok(Self::Hu),
            other => Err(GameError::InvalidValue(format!("unknown language '{other}'"))),
        }
    }
}

/// Symbols of the theme pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSymbol {
    /// Light theme.
    Sun,
    /// Dark theme.
    Moon,
}

impl ThemeSymbol {
    /// Emoji glyph used in the code encoding.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "\u{2600}\u{fe0f}",
            Self::Moon => "\u{1f319}",
        }
    }

    /// Match a glyph; the variation selector on the sun is optional.
    #[must_use]
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        match glyph {
            "\u{2600}\u{fe0f}" | "\u{2600}" => Some(Self::Sun),
            "\u{1f319}" => Some(Self::Moon),
            _ => None,
        }
    }
}

/// An ordered pair of mutually exclusive options. `front` is the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair<T> {
    /// Selected / front element.
    pub front: T,
    /// The other element.
    pub back: T,
}

impl<T: Copy> Pair<T> {
    /// Create a pair.
    #[must_use]
    pub const fn new(front: T, back: T) -> Self {
        Self { front, back }
    }

    /// The pair with its two elements swapped.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            front: self.back,
            back: self.front,
        }
    }

    /// Elements in display order.
    #[must_use]
    pub const fn to_array(self) -> [T; 2] {
        [self.front, self.back]
    }
}

impl Pair<Language> {
    /// `['EN','HU']`.
    pub const LANGUAGES: Self = Self::new(Language::En, Language::Hu);
}

impl Pair<ThemeSymbol> {
    /// `['☀️','🌙']`.
    pub const THEMES: Self = Self::new(ThemeSymbol::Sun, ThemeSymbol::Moon);
}

/// The installed pair of mutually exclusive choices in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "pair", rename_all = "lowercase")]
pub enum OptionSet {
    /// Language pair (flags donut).
    Language(Pair<Language>),
    /// Theme pair (sun/moon donut).
    Theme(Pair<ThemeSymbol>),
    /// Placeholder donut of the visual view; has no code form.
    Neutral,
}

impl OptionSet {
    /// Language pair in default order.
    #[must_use]
    pub const fn languages() -> Self {
        Self::Language(Pair::LANGUAGES)
    }

    /// Theme pair in default order.
    #[must_use]
    pub const fn themes() -> Self {
        Self::Theme(Pair::THEMES)
    }

    /// The same option set with its display order swapped.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::Language(pair) => Self::Language(pair.swapped()),
            Self::Theme(pair) => Self::Theme(pair.swapped()),
            Self::Neutral => Self::Neutral,
        }
    }

    /// Face labels in display order, `None` for the neutral kind.
    #[must_use]
    pub fn labels(self) -> Option<[&'static str; 2]> {
        match self {
            Self::Language(pair) => Some(pair.to_array().map(Language::label)),
            Self::Theme(pair) => Some(pair.to_array().map(ThemeSymbol::glyph)),
            Self::Neutral => None,
        }
    }

    /// Whether this is the visual-only placeholder kind.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }
}

/// The behavior attached to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Switch to the other option.
    Toggle,
    /// Swap the display order of the options.
    Rotate,
}

/// The two kinds of content a zone can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Option set slot (declaration tile / donut).
    Options,
    /// Operation slot (call tile / inner circle).
    Operation,
}

impl PieceKind {
    /// Value of the `data-type` attribute on code placeholders.
    #[must_use]
    pub const fn data_type(self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::Operation => "functionality",
        }
    }
}

impl FromStr for PieceKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "options" => Ok(Self::Options),
            "functionality" | "operation" => Ok(Self::Operation),
            other => Err(GameError::InvalidValue(format!("unknown piece kind '{other}'"))),
        }
    }
}

/// Movable content of one kind, as carried by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Piece {
    /// An option set together with its rotation state.
    Options {
        /// The option set.
        set: OptionSet,
        /// Whether the front element is swapped from its default.
        rotated: bool,
    },
    /// An operation.
    Operation {
        /// The operation.
        operation: Operation,
    },
}

impl Piece {
    /// Kind of slot this piece occupies.
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        match self {
            Self::Options { .. } => PieceKind::Options,
            Self::Operation { .. } => PieceKind::Operation,
        }
    }
}

/// Content of a single zone in one encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneContent {
    /// Installed option set.
    pub options: Option<OptionSet>,
    /// Attached operation.
    pub operation: Option<Operation>,
    /// Whether the pair's front element is swapped from its default.
    #[serde(default)]
    pub rotated: bool,
}

impl ZoneContent {
    /// Create zone content without rotation.
    #[must_use]
    pub const fn new(options: Option<OptionSet>, operation: Option<Operation>) -> Self {
        Self {
            options,
            operation,
            rotated: false,
        }
    }

    /// Content with neither piece installed.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(None, None)
    }

    /// Whether both an option set and an operation are installed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.options.is_some() && self.operation.is_some()
    }

    /// Whether the zone holds content of the given kind.
    #[must_use]
    pub const fn has(&self, kind: PieceKind) -> bool {
        match kind {
            PieceKind::Options => self.options.is_some(),
            PieceKind::Operation => self.operation.is_some(),
        }
    }

    /// Copy out the piece of the given kind.
    #[must_use]
    pub fn piece(&self, kind: PieceKind) -> Option<Piece> {
        match kind {
            PieceKind::Options => self.options.map(|set| Piece::Options {
                set,
                rotated: self.rotated,
            }),
            PieceKind::Operation => self.operation.map(|operation| Piece::Operation { operation }),
        }
    }

    /// Remove and return the piece of the given kind.
    pub fn take_piece(&mut self, kind: PieceKind) -> Option<Piece> {
        let piece = self.piece(kind);
        match kind {
            PieceKind::Options => {
                self.options = None;
                self.rotated = false;
            }
            PieceKind::Operation => self.operation = None,
        }
        piece
    }

    /// Install a piece, replacing whatever occupied its slot.
    pub fn put_piece(&mut self, piece: Piece) {
        match piece {
            Piece::Options { set, rotated } => {
                self.options = Some(set);
                self.rotated = rotated;
            }
            Piece::Operation { operation } => self.operation = Some(operation),
        }
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: ZonePatch) {
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(operation) = patch.operation {
            self.operation = operation;
        }
        if let Some(rotated) = patch.rotated {
            self.rotated = rotated;
        }
    }
}

/// Partial update for [`ZoneContent`]. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePatch {
    /// New option set (`Some(None)` clears it).
    #[serde(default)]
    pub options: Option<Option<OptionSet>>,
    /// New operation (`Some(None)` clears it).
    #[serde(default)]
    pub operation: Option<Option<Operation>>,
    /// New rotated flag.
    #[serde(default)]
    pub rotated: Option<bool>,
}

impl ZonePatch {
    /// Set the option set.
    #[must_use]
    pub fn with_options(mut self, options: Option<OptionSet>) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Option<Operation>) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Set the rotated flag.
    #[must_use]
    pub fn with_rotated(mut self, rotated: bool) -> Self {
        self.rotated = Some(rotated);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_id_parses_data_attribute_names() {
        for id in ZoneId::ALL {
            assert_eq!(id.as_str().parse::<ZoneId>().ok(), Some(id));
        }
        assert!("center".parse::<ZoneId>().is_err());
    }

    #[test]
    fn take_piece_clears_rotation_with_options() {
        let mut zone = ZoneContent {
            options: Some(OptionSet::themes().swapped()),
            operation: Some(Operation::Rotate),
            rotated: true,
        };

        let piece = zone.take_piece(PieceKind::Options);
        assert_eq!(
            piece,
            Some(Piece::Options {
                set: OptionSet::themes().swapped(),
                rotated: true
            })
        );
        assert_eq!(zone.options, None);
        assert!(!zone.rotated);
        assert_eq!(zone.operation, Some(Operation::Rotate));
    }

    #[test]
    fn put_piece_replaces_only_its_own_slot() {
        let mut zone = ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle));
        zone.put_piece(Piece::Operation {
            operation: Operation::Rotate,
        });
        assert_eq!(zone.options, Some(OptionSet::languages()));
        assert_eq!(zone.operation, Some(Operation::Rotate));
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut zone = ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle));
        zone.apply(ZonePatch::default().with_operation(None));
        assert_eq!(zone.options, Some(OptionSet::languages()));
        assert_eq!(zone.operation, None);
    }

    #[test]
    fn labels_follow_display_order() {
        let set = OptionSet::Language(Pair::new(Language::Hu, Language::En));
        assert_eq!(set.labels(), Some(["HU", "EN"]));
        assert_eq!(OptionSet::Neutral.labels(), None);
    }
}
