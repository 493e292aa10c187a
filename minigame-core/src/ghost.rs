//! Pointer-following drag proxy.
//!
//! Devices without hover capability show no cursor while dragging, so a
//! translucent copy of the dragged tile follows the finger. Devices with a
//! hover-capable pointer never get a ghost.

use serde::{Deserialize, Serialize};

/// What the ghost copies from the dragged element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostSource {
    /// Text or piece label shown in the ghost.
    pub label: String,
    /// Width of the source element in pixels.
    pub width: f32,
    /// Height of the source element in pixels.
    pub height: f32,
}

/// A visible ghost, centered on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    /// Copied appearance.
    pub source: GhostSource,
    /// Pointer X in viewport coordinates.
    pub x: f32,
    /// Pointer Y in viewport coordinates.
    pub y: f32,
}

/// Creates, moves and removes the single ghost.
#[derive(Debug, Clone, Default)]
pub struct GhostService {
    hover_capable: bool,
    ghost: Option<Ghost>,
}

impl GhostService {
    /// Create the service for a device with or without hover capability.
    #[must_use]
    pub const fn new(hover_capable: bool) -> Self {
        Self {
            hover_capable,
            ghost: None,
        }
    }

    /// Whether ghosts are shown on this device.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.hover_capable
    }

    /// Show a ghost for `source`, replacing any previous one.
    ///
    /// Returns `false` on hover-capable devices, where nothing is shown.
    pub fn create(&mut self, source: GhostSource) -> bool {
        if self.hover_capable {
            return false;
        }
        self.ghost = Some(Ghost {
            source,
            x: 0.0,
            y: 0.0,
        });
        true
    }

    /// Move the ghost to raw pointer coordinates.
    pub fn update_position(&mut self, x: f32, y: f32) {
        if let Some(ghost) = &mut self.ghost {
            ghost.x = x;
            ghost.y = y;
        }
    }

    /// Move the ghost from a native `drag` event sample.
    ///
    /// Browsers report `(0, 0)` on the last `drag` event before `dragend`;
    /// that sample is skipped so the ghost does not jump to the corner.
    #[allow(clippy::float_cmp)]
    pub fn track_drag_sample(&mut self, x: f32, y: f32) {
        if x != 0.0 || y != 0.0 {
            self.update_position(x, y);
        }
    }

    /// Remove the ghost. Safe to call when none is shown.
    pub fn remove(&mut self) -> bool {
        self.ghost.take().is_some()
    }

    /// The ghost currently shown.
    #[must_use]
    pub const fn current(&self) -> Option<&Ghost> {
        self.ghost.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> GhostSource {
        GhostSource {
            label: "toggle(options);".to_string(),
            width: 120.0,
            height: 32.0,
        }
    }

    #[test]
    fn hover_devices_never_get_a_ghost() {
        let mut ghosts = GhostService::new(true);
        assert!(!ghosts.create(source()));
        ghosts.update_position(10.0, 10.0);
        assert!(ghosts.current().is_none());
    }

    #[test]
    fn ghost_tracks_pointer_and_skips_zero_sample() {
        let mut ghosts = GhostService::new(false);
        assert!(ghosts.create(source()));

        ghosts.update_position(40.0, 50.0);
        ghosts.track_drag_sample(0.0, 0.0);
        let ghost = ghosts.current().expect("ghost shown");
        assert!((ghost.x - 40.0).abs() < f32::EPSILON);
        assert!((ghost.y - 50.0).abs() < f32::EPSILON);

        ghosts.track_drag_sample(60.0, 0.0);
        let ghost = ghosts.current().expect("ghost shown");
        assert!((ghost.x - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut ghosts = GhostService::new(false);
        ghosts.create(source());
        assert!(ghosts.remove());
        assert!(!ghosts.remove());
        assert!(ghosts.current().is_none());
    }
}
