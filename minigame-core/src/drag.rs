//! # Drag and Drop
//!
//! One swap/move protocol for code tiles and visual pieces.
//!
//! ```text
//! begin_drag ──► session ──► attempt_drop ──► swap / copy ──► (cleared)
//!                   │
//!                   └──────► cancel ─────────────────────────► (cleared)
//! ```
//!
//! At most one session exists. A second `begin_drag` while one is live is
//! rejected and the first session stays in place.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{View, ZoneModel};
use crate::visual::InventoryItem;
use crate::zone::{PieceKind, ZoneId};

/// Unique identifier for a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new unique session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input device driving a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Native drag events; the platform reports the drop target.
    Mouse,
    /// Touch events; the drop target is found by hit-testing.
    Touch,
}

/// Where the dragged piece comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "lowercase")]
pub enum DragOrigin {
    /// A zone's slot of the given kind. Dropping moves the piece.
    Zone {
        /// Source zone.
        zone: ZoneId,
        /// Slot kind.
        kind: PieceKind,
    },
    /// The read-only tray. Dropping installs a copy.
    Inventory {
        /// Tray item.
        item: InventoryItem,
    },
}

impl DragOrigin {
    /// Kind of the dragged piece.
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            Self::Zone { kind, .. } => kind,
            Self::Inventory { item } => item.kind(),
        }
    }

    /// Source zone, if the piece is dragged out of one.
    #[must_use]
    pub const fn zone(self) -> Option<ZoneId> {
        match self {
            Self::Zone { zone, .. } => Some(zone),
            Self::Inventory { .. } => None,
        }
    }
}

/// Where a piece can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum DropTarget {
    /// A code-view placeholder; accepts only tiles of its own kind.
    Placeholder {
        /// Target zone.
        zone: ZoneId,
        /// Placeholder kind.
        kind: PieceKind,
    },
    /// A visual-view slot; the piece lands in the sub-slot of its kind.
    Slot {
        /// Target zone.
        zone: ZoneId,
    },
}

impl DropTarget {
    /// View the target belongs to.
    #[must_use]
    pub const fn view(self) -> View {
        match self {
            Self::Placeholder { .. } => View::Code,
            Self::Slot { .. } => View::Visual,
        }
    }

    /// Target zone.
    #[must_use]
    pub const fn zone(self) -> ZoneId {
        match self {
            Self::Placeholder { zone, .. } | Self::Slot { zone } => zone,
        }
    }
}

/// An in-progress drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    /// Session identifier.
    pub id: SessionId,
    /// View the gesture started in.
    pub view: View,
    /// Source of the dragged piece.
    pub origin: DragOrigin,
    /// Input device.
    pub input: InputKind,
}

impl DragSession {
    /// Kind of the dragged piece.
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.origin.kind()
    }
}

/// What happened to the piece that occupied the target before the drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Displaced {
    /// The target's slot was empty.
    Nothing,
    /// Moved to the zone the dragged piece came from.
    MovedTo(ZoneId),
    /// Thrown away; the dragged piece was an inventory copy.
    Discarded,
}

/// Result of a successful drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropOutcome {
    /// The consumed session.
    pub session: DragSession,
    /// Zone that received the piece.
    pub target: ZoneId,
    /// Fate of the previous occupant.
    pub displaced: Displaced,
}

/// Reasons a drag is not started or a drop is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragError {
    /// Another session is live.
    #[error("drag session {0} is already active")]
    SessionActive(SessionId),
    /// The origin slot holds nothing that can be picked up.
    #[error("zone {zone} has no {kind:?} piece to drag")]
    NothingToDrag {
        /// Source zone.
        zone: ZoneId,
        /// Requested kind.
        kind: PieceKind,
    },
    /// The tray only exists in the visual view.
    #[error("the inventory is not available in the {0:?} view")]
    InventoryUnavailable(View),
    /// Drop without a live session.
    #[error("no active drag session")]
    NoSession,
    /// Dropped back onto its own slot.
    #[error("drop target is the drag source")]
    SameTarget,
    /// Tile and placeholder kinds differ.
    #[error("cannot drop a {dragged:?} piece on a {target:?} slot")]
    KindMismatch {
        /// Dragged kind.
        dragged: PieceKind,
        /// Target kind.
        target: PieceKind,
    },
    /// Target belongs to the other view.
    #[error("drag started in the {session:?} view cannot drop into the {target:?} view")]
    ViewMismatch {
        /// Session view.
        session: View,
        /// Target view.
        target: View,
    },
}

/// Owner of the single drag session.
#[derive(Debug, Clone, Default)]
pub struct DragDropEngine {
    session: Option<DragSession>,
}

impl DragDropEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a session is live.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start a drag.
    ///
    /// # Errors
    ///
    /// Returns an error if a session is already live, if the origin zone has
    /// nothing of that kind, or if the inventory is used from the code view.
    pub fn begin_drag(
        &mut self,
        model: &ZoneModel,
        view: View,
        origin: DragOrigin,
        input: InputKind,
    ) -> Result<DragSession, DragError> {
        if let Some(active) = &self.session {
            return Err(DragError::SessionActive(active.id));
        }

        match origin {
            DragOrigin::Zone { zone, kind } => {
                if !model.zone(view, zone).has(kind) {
                    return Err(DragError::NothingToDrag { zone, kind });
                }
            }
            DragOrigin::Inventory { .. } => {
                if view != View::Visual {
                    return Err(DragError::InventoryUnavailable(view));
                }
            }
        }

        let session = DragSession {
            id: SessionId::new(),
            view,
            origin,
            input,
        };
        tracing::debug!(session = %session.id, ?origin, ?input, "drag started");
        self.session = Some(session);
        Ok(session)
    }

    /// Drop the dragged piece on a target. The session is cleared whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the model untouched, if no session is live,
    /// if the target is the source, or if view or kind do not match.
    pub fn attempt_drop(
        &mut self,
        model: &mut ZoneModel,
        target: DropTarget,
    ) -> Result<DropOutcome, DragError> {
        let session = self.session.take().ok_or(DragError::NoSession)?;
        let kind = session.kind();

        if target.view() != session.view {
            return Err(DragError::ViewMismatch {
                session: session.view,
                target: target.view(),
            });
        }
        if let DropTarget::Placeholder {
            kind: target_kind, ..
        } = target
        {
            if target_kind != kind {
                return Err(DragError::KindMismatch {
                    dragged: kind,
                    target: target_kind,
                });
            }
        }

        let target_zone = target.zone();
        let displaced = match session.origin {
            DragOrigin::Zone { zone: source, .. } => {
                if source == target_zone {
                    return Err(DragError::SameTarget);
                }
                swap(model, session.view, source, target_zone, kind)
            }
            DragOrigin::Inventory { item } => {
                let zone = model.zone_mut(session.view, target_zone);
                let displaced = match zone.take_piece(kind) {
                    Some(_) => Displaced::Discarded,
                    None => Displaced::Nothing,
                };
                zone.put_piece(item.piece());
                displaced
            }
        };

        tracing::debug!(
            session = %session.id,
            target = %target_zone,
            ?displaced,
            "piece dropped"
        );
        Ok(DropOutcome {
            session,
            target: target_zone,
            displaced,
        })
    }

    /// Abandon the live session without touching the model.
    pub fn cancel(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            tracing::debug!(session = %session.id, "drag cancelled");
        }
        session
    }
}

/// Exchange the pieces of `kind` between two distinct zones.
fn swap(
    model: &mut ZoneModel,
    view: View,
    source: ZoneId,
    target: ZoneId,
    kind: PieceKind,
) -> Displaced {
    let Ok((from, to)) = model.pair_mut(view, source, target) else {
        return Displaced::Nothing;
    };
    let moved = from.take_piece(kind);
    let previous = to.take_piece(kind);

    if let Some(piece) = moved {
        to.put_piece(piece);
    }
    match previous {
        Some(piece) => {
            from.put_piece(piece);
            Displaced::MovedTo(source)
        }
        None => Displaced::Nothing,
    }
}
