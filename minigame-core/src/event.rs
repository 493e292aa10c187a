//! Input events for drag gestures.
//!
//! Native drag events name their drop target directly. Touch events carry
//! only coordinates, so the host supplies a [`HitTest`] that resolves a point
//! to the drop target under it.

use serde::{Deserialize, Serialize};

use crate::drag::{DragError, DragOrigin, DragSession, DropOutcome, DropTarget};
use crate::ghost::GhostSource;

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Touch started (finger down).
    Start,
    /// Touch moved (finger dragging).
    Move,
    /// Touch ended (finger up).
    End,
    /// Touch cancelled by the platform.
    Cancel,
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position in viewport coordinates.
    pub x: f32,
    /// Y position in viewport coordinates.
    pub y: f32,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// What a gesture picks up, with the appearance the ghost should copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragStart {
    /// Piece being picked up.
    pub origin: DragOrigin,
    /// Appearance of the touched element, if a ghost may be shown.
    pub ghost: Option<GhostSource>,
}

impl DragStart {
    /// Pick up `origin` without ghost information.
    #[must_use]
    pub const fn new(origin: DragOrigin) -> Self {
        Self {
            origin,
            ghost: None,
        }
    }

    /// Attach the ghost appearance.
    #[must_use]
    pub fn with_ghost(mut self, ghost: GhostSource) -> Self {
        self.ghost = Some(ghost);
        self
    }
}

/// A touch event with one or more touch points.
///
/// For `End` and `Cancel`, `touches` holds the changed touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// Touch points.
    pub touches: Vec<TouchPoint>,
    /// Piece under the finger, for `Start`.
    pub start: Option<DragStart>,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self {
            phase,
            touches,
            start: None,
        }
    }

    /// A touch start on a draggable piece.
    #[must_use]
    pub fn start(touch: TouchPoint, start: DragStart) -> Self {
        Self {
            phase: TouchPhase::Start,
            touches: vec![touch],
            start: Some(start),
        }
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Check if this is a multi-touch event.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.touches.len() > 1
    }
}

/// Native (mouse) drag-and-drop events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum DragEvent {
    /// `dragstart` on a draggable piece.
    Start(DragStart),
    /// `drag` sample with pointer coordinates.
    Drag {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// `dragover` on a drop target.
    Over(DropTarget),
    /// `dragleave` from a drop target.
    Leave(DropTarget),
    /// `drop` on a drop target.
    Drop(DropTarget),
    /// `dragend` on the source.
    End,
}

/// All gesture input the game can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Raw touch event.
    Touch(TouchEvent),
    /// Native drag event.
    Drag(DragEvent),
}

/// Resolves viewport coordinates to the drop target under them.
pub trait HitTest {
    /// Topmost valid drop target at `(x, y)`, if any.
    fn drop_target_at(&self, x: f32, y: f32) -> Option<DropTarget>;
}

impl<F> HitTest for F
where
    F: Fn(f32, f32) -> Option<DropTarget>,
{
    fn drop_target_at(&self, x: f32, y: f32) -> Option<DropTarget> {
        self(x, y)
    }
}

/// A hit-tester that never finds a target.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl HitTest for NoTargets {
    fn drop_target_at(&self, _x: f32, _y: f32) -> Option<DropTarget> {
        None
    }
}

/// What a gesture event did to the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum GestureOutcome {
    /// A drag session started.
    Started(DragSession),
    /// The pointer moved; the highlighted placeholder, if any.
    Moved(Option<DropTarget>),
    /// A piece was dropped.
    Dropped(DropOutcome),
    /// The session ended without a drop.
    Cancelled,
    /// A drag could not start or a drop was refused.
    Rejected(DragError),
    /// The event did not concern any session.
    Ignored,
}

impl GestureOutcome {
    /// Whether the zone model may have changed.
    #[must_use]
    pub const fn changed_model(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneId;

    #[test]
    fn closures_are_hit_testers() {
        let hit = |x: f32, _y: f32| (x > 100.0).then_some(DropTarget::Slot { zone: ZoneId::Right });
        assert_eq!(hit.drop_target_at(10.0, 0.0), None);
        assert_eq!(
            hit.drop_target_at(150.0, 0.0),
            Some(DropTarget::Slot { zone: ZoneId::Right })
        );
        assert_eq!(NoTargets.drop_target_at(150.0, 0.0), None);
    }

    #[test]
    fn primary_touch_is_first_point() {
        let event = TouchEvent::new(
            TouchPhase::Move,
            vec![TouchPoint::new(7, 1.0, 2.0), TouchPoint::new(8, 3.0, 4.0)],
        );
        assert_eq!(event.primary_touch().map(|t| t.id), Some(7));
        assert!(event.is_multi_touch());
    }

    #[test]
    fn drag_events_use_tagged_json() {
        let json = r#"{"type":"drop","data":{"target":"slot","zone":"middle"}}"#;
        let event: DragEvent = serde_json::from_str(json).expect("parses");
        assert_eq!(event, DragEvent::Drop(DropTarget::Slot { zone: ZoneId::Middle }));
    }
}
