//! Graphical encoding of zone content (the visual view).
//!
//! An option set is drawn as a donut whose two faces show the pair in display
//! order; an operation is drawn as an inner circle. A zone without an
//! operation shows the non-draggable `empty-inner` outline.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::zone::{Operation, OptionSet, Piece, PieceKind, ZoneContent};
use crate::GameError;

/// Donut kinds, named after their `data-type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonutKind {
    /// Language flags.
    Flags,
    /// Sun and moon.
    Emojis,
    /// Placeholder donut without a code form.
    Mode,
}

impl DonutKind {
    /// Value of the `data-type` attribute.
    #[must_use]
    pub const fn data_type(self) -> &'static str {
        match self {
            Self::Flags => "flags",
            Self::Emojis => "emojis",
            Self::Mode => "mode",
        }
    }

    /// Donut kind that draws the given option set.
    #[must_use]
    pub const fn for_options(options: OptionSet) -> Self {
        match options {
            OptionSet::Language(_) => Self::Flags,
            OptionSet::Theme(_) => Self::Emojis,
            OptionSet::Neutral => Self::Mode,
        }
    }
}

/// Inner circle kinds, named after their element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InnerKind {
    /// Toggle operation.
    Switch,
    /// Rotate operation.
    Rotator,
    /// Outline shown when no operation is attached; not draggable.
    EmptyInner,
}

impl InnerKind {
    /// Element id of the inner circle.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Rotator => "rotator",
            Self::EmptyInner => "empty-inner",
        }
    }

    /// Inner circle that draws the given operation.
    #[must_use]
    pub const fn for_operation(operation: Option<Operation>) -> Self {
        match operation {
            Some(Operation::Toggle) => Self::Switch,
            Some(Operation::Rotate) => Self::Rotator,
            None => Self::EmptyInner,
        }
    }

    /// Operation drawn by this inner circle.
    #[must_use]
    pub const fn operation(self) -> Option<Operation> {
        match self {
            Self::Switch => Some(Operation::Toggle),
            Self::Rotator => Some(Operation::Rotate),
            Self::EmptyInner => None,
        }
    }

    /// Whether the piece can be picked up.
    #[must_use]
    pub const fn is_draggable(self) -> bool {
        !matches!(self, Self::EmptyInner)
    }
}

/// A donut piece with its faces in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Donut {
    /// Kind tag.
    pub kind: DonutKind,
    /// Top and bottom face labels; the mode donut has none.
    pub faces: Option<[&'static str; 2]>,
}

impl Donut {
    /// Draw an option set.
    #[must_use]
    pub fn for_options(options: OptionSet) -> Self {
        Self {
            kind: DonutKind::for_options(options),
            faces: options.labels(),
        }
    }
}

/// Everything drawn inside one zone's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualSlot {
    /// Donut, if an option set is installed.
    pub donut: Option<Donut>,
    /// Inner circle; `EmptyInner` when no operation is attached.
    pub inner: InnerKind,
    /// Whether the donut's faces are swapped from their default order.
    pub rotated: bool,
}

/// Render a zone's content as slot pieces.
#[must_use]
pub fn render(zone: &ZoneContent) -> VisualSlot {
    VisualSlot {
        donut: zone.options.map(Donut::for_options),
        inner: InnerKind::for_operation(zone.operation),
        rotated: zone.rotated,
    }
}

/// Items of the read-only source tray. Dropping one installs a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryItem {
    /// Flags donut.
    FlagsDonut,
    /// Sun/moon donut.
    EmojisDonut,
    /// Placeholder donut.
    ModeDonut,
    /// Toggle inner circle.
    Switch,
    /// Rotate inner circle.
    Rotator,
}

impl InventoryItem {
    /// Every item on the tray.
    pub const ALL: [Self; 5] = [
        Self::FlagsDonut,
        Self::EmojisDonut,
        Self::ModeDonut,
        Self::Switch,
        Self::Rotator,
    ];

    /// Slot kind the item fills.
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            Self::FlagsDonut | Self::EmojisDonut | Self::ModeDonut => PieceKind::Options,
            Self::Switch | Self::Rotator => PieceKind::Operation,
        }
    }

    /// A fresh copy of the item's content, in default order.
    #[must_use]
    pub const fn piece(self) -> Piece {
        let set = match self {
            Self::FlagsDonut => OptionSet::languages(),
            Self::EmojisDonut => OptionSet::themes(),
            Self::ModeDonut => OptionSet::Neutral,
            Self::Switch => {
                return Piece::Operation {
                    operation: Operation::Toggle,
                }
            }
            Self::Rotator => {
                return Piece::Operation {
                    operation: Operation::Rotate,
                }
            }
        };
        Piece::Options {
            set,
            rotated: false,
        }
    }

    /// Identifier used on the tray element (`data-type` for donuts, `id` for
    /// inner circles).
    #[must_use]
    pub const fn dom_key(self) -> &'static str {
        match self {
            Self::FlagsDonut => DonutKind::Flags.data_type(),
            Self::EmojisDonut => DonutKind::Emojis.data_type(),
            Self::ModeDonut => DonutKind::Mode.data_type(),
            Self::Switch => InnerKind::Switch.element_id(),
            Self::Rotator => InnerKind::Rotator.element_id(),
        }
    }
}

impl FromStr for InventoryItem {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item| item.dom_key() == s.trim())
            .ok_or_else(|| GameError::InvalidValue(format!("unknown inventory item '{s}'")))
    }
}
