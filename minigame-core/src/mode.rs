//! Mode controller: which view is shown, and syncing at the switch.

use serde::Serialize;

use crate::messages::messages;
use crate::model::{View, ZoneModel};
use crate::sync::{sync_code_to_visual, sync_visual_to_code, SyncReport};
use crate::zone::Language;

/// Result of a mode switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSwitch {
    /// View that was left.
    pub from: View,
    /// View now shown.
    pub to: View,
    /// Translation of the view that was left.
    pub report: SyncReport,
}

/// Two-state controller, starting in the code view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeController {
    view: View,
}

impl ModeController {
    /// Create a controller showing `view`.
    #[must_use]
    pub const fn new(view: View) -> Self {
        Self { view }
    }

    /// The view currently shown.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Translate the current view into the other one, then switch to it.
    pub fn toggle(&mut self, model: &mut ZoneModel) -> ModeSwitch {
        let from = self.view;
        let report = match from {
            View::Code => sync_code_to_visual(model),
            View::Visual => sync_visual_to_code(model),
        };
        self.view = from.other();
        tracing::debug!(?from, to = ?self.view, lossy = report.lossy_zones.len(), "mode switched");
        ModeSwitch {
            from,
            to: self.view,
            report,
        }
    }

    /// Toggle button label for the current view.
    #[must_use]
    pub const fn label(&self, language: Language) -> &'static str {
        messages(language).mode_toggle_for(self.view)
    }
}
