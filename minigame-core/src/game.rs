//! Mini-game state.
//!
//! One [`MiniGame`] owns everything: the zone model, the shown view, the
//! drag session, the ghost, the per-zone consoles and the page effects. Host
//! shims feed it input events and render what it reports.

use serde::Serialize;

use crate::code::{self, CodeText};
use crate::config::GameConfig;
use crate::drag::{DragDropEngine, DragError, DragSession, DropOutcome, DropTarget, InputKind};
use crate::effects::{Effects, Theme};
use crate::event::{
    DragEvent, DragStart, GestureOutcome, HitTest, InputEvent, TouchEvent, TouchPhase,
};
use crate::exec::{self, ExecutionResult, Tone};
use crate::ghost::{Ghost, GhostService};
use crate::messages::{ui_labels, UiLabels};
use crate::mode::{ModeController, ModeSwitch};
use crate::model::{View, ZoneModel};
use crate::sync::sync_code_to_visual;
use crate::visual::{self, VisualSlot};
use crate::zone::{ZoneContent, ZoneId, ZonePatch};
use crate::GameResult;

/// Text written to a zone's console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleLine {
    /// Message.
    pub text: String,
    /// Semantic color.
    pub tone: Tone,
}

impl ConsoleLine {
    /// CSS color for the text; empty to inherit.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.tone.css_color()
    }
}

impl From<&ExecutionResult> for ConsoleLine {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            text: result.message().to_string(),
            tone: result.tone(),
        }
    }
}

/// Visibility of the game and of the page controls it hides while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chrome {
    /// Game overlay.
    pub game_visible: bool,
    /// Page language toggle.
    pub language_toggle_visible: bool,
    /// Page theme toggle; only offered once unlocked.
    pub theme_toggle_visible: bool,
}

/// Both projections of one zone, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneView {
    /// Zone.
    pub zone: ZoneId,
    /// Code tiles.
    pub code: CodeText,
    /// Rotation of the code-view options tile.
    pub code_rotated: bool,
    /// Donut and inner circle.
    pub visual: VisualSlot,
    /// Console of the code view.
    pub code_console: Option<ConsoleLine>,
    /// Console of the visual view.
    pub visual_console: Option<ConsoleLine>,
}

/// Everything a host needs to draw the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Whether the game is shown.
    pub open: bool,
    /// View on screen.
    pub view: View,
    /// Localized labels.
    pub labels: UiLabels,
    /// Zones in display order.
    pub zones: Vec<ZoneView>,
    /// Live drag session.
    pub session: Option<DragSession>,
    /// Highlighted placeholder.
    pub highlight: Option<DropTarget>,
    /// Visible ghost.
    pub ghost: Option<Ghost>,
    /// Active theme.
    pub theme: Theme,
    /// Whether the page theme toggle is unlocked.
    pub theme_unlocked: bool,
}

#[derive(Debug, Clone, Default)]
struct Consoles {
    code: [Option<ConsoleLine>; 3],
    visual: [Option<ConsoleLine>; 3],
}

impl Consoles {
    fn get(&self, view: View, id: ZoneId) -> Option<&ConsoleLine> {
        match view {
            View::Code => self.code[id.index()].as_ref(),
            View::Visual => self.visual[id.index()].as_ref(),
        }
    }

    fn set(&mut self, view: View, id: ZoneId, line: ConsoleLine) {
        let slot = match view {
            View::Code => &mut self.code[id.index()],
            View::Visual => &mut self.visual[id.index()],
        };
        *slot = Some(line);
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The mini-game.
#[derive(Debug)]
pub struct MiniGame<E> {
    model: ZoneModel,
    mode: ModeController,
    drag: DragDropEngine,
    ghost: GhostService,
    consoles: Consoles,
    highlight: Option<DropTarget>,
    open: bool,
    effects: E,
}

impl<E: Effects> MiniGame<E> {
    /// Create a closed game in the code view. The visual view is derived
    /// from the configured layout right away.
    #[must_use]
    pub fn new(config: &GameConfig, effects: E) -> Self {
        let mut model = ZoneModel::new(config.layout.to_array());
        sync_code_to_visual(&mut model);
        Self {
            model,
            mode: ModeController::default(),
            drag: DragDropEngine::new(),
            ghost: GhostService::new(config.hover_capable),
            consoles: Consoles::default(),
            highlight: None,
            open: false,
            effects,
        }
    }

    /// Show the game.
    pub fn open(&mut self) -> Chrome {
        self.open = true;
        tracing::info!(view = ?self.mode.view(), "mini-game opened");
        self.chrome()
    }

    /// Hide the game, dropping transient state. Zones and view are kept.
    pub fn close(&mut self) -> Chrome {
        self.cancel_drag();
        self.ghost.remove();
        self.consoles.clear();
        self.open = false;
        tracing::info!("mini-game closed");
        self.chrome()
    }

    /// Whether the game is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Visibility of the game and the page toggles.
    #[must_use]
    pub fn chrome(&self) -> Chrome {
        Chrome {
            game_visible: self.open,
            language_toggle_visible: !self.open,
            theme_toggle_visible: !self.open && self.effects.is_theme_unlocked(),
        }
    }

    /// View on screen.
    #[must_use]
    pub const fn view(&self) -> View {
        self.mode.view()
    }

    /// Switch views, cancelling any drag first.
    pub fn toggle_mode(&mut self) -> ModeSwitch {
        self.cancel_drag();
        self.mode.toggle(&mut self.model)
    }

    /// Both encodings.
    #[must_use]
    pub const fn model(&self) -> &ZoneModel {
        &self.model
    }

    /// Zone content in the view on screen.
    #[must_use]
    pub fn zone(&self, id: ZoneId) -> &ZoneContent {
        self.model.zone(self.mode.view(), id)
    }

    /// Zone content in a given view.
    #[must_use]
    pub fn zone_in(&self, view: View, id: ZoneId) -> &ZoneContent {
        self.model.zone(view, id)
    }

    /// Patch a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch is not valid for `view`.
    pub fn set_zone(&mut self, view: View, id: ZoneId, patch: ZonePatch) -> GameResult<()> {
        self.model.set_zone(view, id, patch)
    }

    /// Start dragging in the view on screen. Shows a ghost when the device
    /// calls for one and `start` describes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the drag cannot start; see
    /// [`DragDropEngine::begin_drag`].
    pub fn begin_drag(
        &mut self,
        start: DragStart,
        input: InputKind,
    ) -> Result<DragSession, DragError> {
        let session = self
            .drag
            .begin_drag(&self.model, self.mode.view(), start.origin, input)?;
        if let Some(source) = start.ghost {
            self.ghost.create(source);
        }
        Ok(session)
    }

    /// Drop the dragged piece. The session, ghost and highlight are cleared
    /// whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the drop is refused; the model is then untouched.
    pub fn attempt_drop(&mut self, target: DropTarget) -> Result<DropOutcome, DragError> {
        self.highlight = None;
        self.ghost.remove();
        let result = self.drag.attempt_drop(&mut self.model, target);
        if let Err(err) = &result {
            tracing::debug!(%err, ?target, "drop rejected");
        }
        result
    }

    /// Abandon the drag, if any, and clear the ghost and highlight.
    pub fn cancel_drag(&mut self) -> Option<DragSession> {
        self.highlight = None;
        self.ghost.remove();
        self.drag.cancel()
    }

    /// Live drag session.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// Placeholder currently highlighted.
    #[must_use]
    pub const fn highlight(&self) -> Option<DropTarget> {
        self.highlight
    }

    /// Visible ghost.
    #[must_use]
    pub const fn ghost(&self) -> Option<&Ghost> {
        self.ghost.current()
    }

    /// Route an input event.
    pub fn handle<H: HitTest + ?Sized>(&mut self, event: &InputEvent, hit: &H) -> GestureOutcome {
        match event {
            InputEvent::Touch(touch) => self.handle_touch(touch, hit),
            InputEvent::Drag(drag) => self.handle_drag(drag),
        }
    }

    /// Drive a touch gesture. Release points are resolved through `hit`;
    /// releasing over nothing cancels.
    pub fn handle_touch<H: HitTest + ?Sized>(
        &mut self,
        event: &TouchEvent,
        hit: &H,
    ) -> GestureOutcome {
        let Some(point) = event.primary_touch().copied() else {
            return GestureOutcome::Ignored;
        };

        if event.phase == TouchPhase::Start {
            let Some(start) = event.start.clone() else {
                return GestureOutcome::Ignored;
            };
            return match self.begin_drag(start, InputKind::Touch) {
                Ok(session) => {
                    self.ghost.update_position(point.x, point.y);
                    GestureOutcome::Started(session)
                }
                Err(err) => GestureOutcome::Rejected(err),
            };
        }

        if !self.is_dragging_with(InputKind::Touch) {
            return GestureOutcome::Ignored;
        }

        match event.phase {
            TouchPhase::Move => {
                self.ghost.update_position(point.x, point.y);
                self.highlight = hit
                    .drop_target_at(point.x, point.y)
                    .filter(|target| matches!(target, DropTarget::Placeholder { .. }));
                GestureOutcome::Moved(self.highlight)
            }
            TouchPhase::End => match hit.drop_target_at(point.x, point.y) {
                Some(target) => self.drop_outcome(target),
                None => {
                    self.cancel_drag();
                    GestureOutcome::Cancelled
                }
            },
            TouchPhase::Start | TouchPhase::Cancel => {
                self.cancel_drag();
                GestureOutcome::Cancelled
            }
        }
    }

    /// Drive a native drag gesture.
    pub fn handle_drag(&mut self, event: &DragEvent) -> GestureOutcome {
        match event {
            DragEvent::Start(start) => match self.begin_drag(start.clone(), InputKind::Mouse) {
                Ok(session) => GestureOutcome::Started(session),
                Err(err) => GestureOutcome::Rejected(err),
            },
            DragEvent::Drop(target) => self.drop_outcome(*target),
            DragEvent::End => {
                if self.is_dragging_with(InputKind::Mouse) {
                    self.cancel_drag();
                    GestureOutcome::Cancelled
                } else {
                    self.ghost.remove();
                    GestureOutcome::Ignored
                }
            }
            _ if !self.is_dragging_with(InputKind::Mouse) => GestureOutcome::Ignored,
            DragEvent::Drag { x, y } => {
                self.ghost.track_drag_sample(*x, *y);
                GestureOutcome::Moved(self.highlight)
            }
            DragEvent::Over(target) => {
                if matches!(target, DropTarget::Placeholder { .. }) {
                    self.highlight = Some(*target);
                }
                GestureOutcome::Moved(self.highlight)
            }
            DragEvent::Leave(target) => {
                if self.highlight == Some(*target) {
                    self.highlight = None;
                }
                GestureOutcome::Moved(self.highlight)
            }
        }
    }

    /// Run a zone of the view on screen and write the result to its console.
    pub fn execute(&mut self, id: ZoneId) -> ExecutionResult {
        let view = self.mode.view();
        let result = exec::execute(view, self.model.zone_mut(view, id), &mut self.effects);
        tracing::debug!(zone = %id, ?view, tone = ?result.tone(), "zone executed");
        self.consoles.set(view, id, ConsoleLine::from(&result));
        result
    }

    /// Console line of a zone.
    #[must_use]
    pub fn console(&self, view: View, id: ZoneId) -> Option<&ConsoleLine> {
        self.consoles.get(view, id)
    }

    /// Both projections of a zone.
    #[must_use]
    pub fn render_zone(&self, id: ZoneId) -> ZoneView {
        ZoneView {
            zone: id,
            code: code::render(self.model.zone(View::Code, id)),
            code_rotated: self.model.zone(View::Code, id).rotated,
            visual: visual::render(self.model.zone(View::Visual, id)),
            code_console: self.consoles.get(View::Code, id).cloned(),
            visual_console: self.consoles.get(View::Visual, id).cloned(),
        }
    }

    /// Labels in the active language.
    #[must_use]
    pub fn labels(&self) -> UiLabels {
        ui_labels(self.effects.language(), self.mode.view())
    }

    /// Full drawable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            open: self.open,
            view: self.mode.view(),
            labels: self.labels(),
            zones: ZoneId::ALL.into_iter().map(|id| self.render_zone(id)).collect(),
            session: self.drag.session().copied(),
            highlight: self.highlight,
            ghost: self.ghost.current().cloned(),
            theme: self.effects.theme(),
            theme_unlocked: self.effects.is_theme_unlocked(),
        }
    }

    /// The page effects.
    #[must_use]
    pub const fn effects(&self) -> &E {
        &self.effects
    }

    /// Mutable page effects.
    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    fn is_dragging_with(&self, input: InputKind) -> bool {
        self.drag.session().is_some_and(|session| session.input == input)
    }

    fn drop_outcome(&mut self, target: DropTarget) -> GestureOutcome {
        match self.attempt_drop(target) {
            Ok(outcome) => GestureOutcome::Dropped(outcome),
            Err(err) => GestureOutcome::Rejected(err),
        }
    }
}
