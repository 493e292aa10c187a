//! # Mini-game WASM Application
//!
//! Binds [`minigame_core::MiniGame`] to a page that carries the game markup:
//! the overlay, both view containers, the inventory tray and the page
//! language and theme toggles.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web minigame-app
//! ```
//!
//! Then wire the page events in JavaScript:
//! ```javascript
//! import init, { MiniGameApp } from './pkg/minigame_app.js';
//!
//! await init();
//! const game = new MiniGameApp(null, (lang) => relabelPage(lang));
//!
//! openButton.onclick = () => game.open();
//! document.addEventListener('dragstart', (e) => game.dragStart(e));
//! document.addEventListener('dragover', (e) => game.dragOver(e));
//! document.addEventListener('drop', (e) => game.drop(e));
//! document.addEventListener('dragend', () => game.dragEnd());
//! document.addEventListener('touchstart', (e) => game.touchStart(e));
//! document.addEventListener('touchmove', (e) => game.touchMove(e), { passive: false });
//! document.addEventListener('touchend', (e) => game.touchEnd(e));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dom;
pub mod error;
pub mod page;
pub mod render;

use minigame_core::{
    DragEvent, DragStart, GameConfig, GestureOutcome, MiniGame, TouchEvent, TouchPhase,
    TouchPoint, View, ZoneId,
};
use wasm_bindgen::prelude::*;
use web_sys::{Element, TouchList, Window};

use crate::dom::DomHitTest;
use crate::error::AppError;
use crate::page::PageEffects;
use crate::render::{DomRenderer, Redraw};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("Mini-game WASM initialized");
}

/// The mini-game bound to the current page.
#[wasm_bindgen]
pub struct MiniGameApp {
    game: MiniGame<PageEffects>,
    renderer: DomRenderer,
    hit: DomHitTest,
}

#[wasm_bindgen]
impl MiniGameApp {
    /// Bind to the page.
    ///
    /// `config_json` optionally overrides the starting layout. `on_language`
    /// is called with the new language code whenever the game switches the
    /// page language.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the page lacks the
    /// game markup.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        on_language: Option<js_sys::Function>,
    ) -> Result<MiniGameApp, JsValue> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| AppError::MissingElement("document".to_string()))?;

        let mut config = match config_json.as_deref() {
            Some(json) => GameConfig::from_json(json).map_err(AppError::from)?,
            None => GameConfig::default(),
        };
        config.hover_capable = page::hover_capable(&window);
        if let Some(language) = PageEffects::document_language(&document) {
            config.language = language;
        }

        let effects = PageEffects::new(&window, document.clone(), config.language, on_language)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let app = Self {
            game: MiniGame::new(&config, effects),
            renderer: DomRenderer::new(document.clone()),
            hit: DomHitTest::new(document),
        };
        tracing::info!(hover_capable = config.hover_capable, "mini-game bound to page");
        app.render()?;
        Ok(app)
    }

    /// Show the game.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn open(&mut self) -> Result<(), JsValue> {
        self.game.open();
        self.render()
    }

    /// Hide the game.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn close(&mut self) -> Result<(), JsValue> {
        self.game.close();
        self.render()
    }

    /// Switch between the code and visual views.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = toggleMode)]
    pub fn toggle_mode(&mut self) -> Result<(), JsValue> {
        let switch = self.game.toggle_mode();
        if !switch.report.lossy_zones.is_empty() {
            tracing::debug!(zones = ?switch.report.lossy_zones, "view switch dropped content");
        }
        self.render()
    }

    /// Run a zone of the view on screen. Returns the result as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `zone` is not a zone name or drawing fails.
    pub fn execute(&mut self, zone: &str) -> Result<String, JsValue> {
        let id: ZoneId = zone.parse().map_err(AppError::from)?;
        let result = self.game.execute(id);
        self.render()?;
        serde_json::to_string(&result).map_err(|e| AppError::from(e).into())
    }

    /// `dragstart`: pick up the piece under the pointer.
    ///
    /// # Errors
    ///
    /// Returns an error if the data transfer or drawing fails.
    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, event: &web_sys::DragEvent) -> Result<(), JsValue> {
        let Some((piece, info)) = dom::event_element(event.target())
            .as_ref()
            .and_then(dom::piece_info)
        else {
            return Ok(());
        };
        let Some(origin) = info.origin() else {
            event.prevent_default();
            return Ok(());
        };

        if let Some(transfer) = event.data_transfer() {
            transfer.set_data("text/plain", info.data_type.as_deref().unwrap_or_default())?;
            transfer.set_effect_allowed("move");
        }
        let start = DragStart::new(origin).with_ghost(dom::ghost_source(&piece));
        let outcome = self.game.handle_drag(&DragEvent::Start(start));
        self.settle(&outcome)
    }

    /// `drag`: follow the pointer.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn drag(&mut self, event: &web_sys::DragEvent) -> Result<(), JsValue> {
        let (x, y) = client_point(event.client_x(), event.client_y());
        let outcome = self.game.handle_drag(&DragEvent::Drag { x, y });
        self.settle(&outcome)
    }

    /// `dragover`: accept drops on game targets and highlight placeholders.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&mut self, event: &web_sys::DragEvent) -> Result<(), JsValue> {
        let Some(target) = drop_target(event.target()) else {
            return Ok(());
        };
        event.prevent_default();
        let outcome = self.game.handle_drag(&DragEvent::Over(target));
        self.settle(&outcome)
    }

    /// `dragleave`: drop the highlight.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = dragLeave)]
    pub fn drag_leave(&mut self, event: &web_sys::DragEvent) -> Result<(), JsValue> {
        let Some(target) = drop_target(event.target()) else {
            return Ok(());
        };
        let outcome = self.game.handle_drag(&DragEvent::Leave(target));
        self.settle(&outcome)
    }

    /// `drop`: place the dragged piece.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = drop)]
    pub fn drop_piece(&mut self, event: &web_sys::DragEvent) -> Result<(), JsValue> {
        let Some(target) = drop_target(event.target()) else {
            return Ok(());
        };
        event.prevent_default();
        let outcome = self.game.handle_drag(&DragEvent::Drop(target));
        self.settle(&outcome)
    }

    /// `dragend`: end a drag that was not dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self) -> Result<(), JsValue> {
        let outcome = self.game.handle_drag(&DragEvent::End);
        self.settle(&outcome)
    }

    /// `touchstart`: pick up the touched piece.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, event: &web_sys::TouchEvent) -> Result<(), JsValue> {
        let Some(touch) = first_touch(&event.touches()) else {
            return Ok(());
        };
        let Some((piece, info)) = dom::event_element(event.target())
            .as_ref()
            .and_then(dom::piece_info)
        else {
            return Ok(());
        };
        let Some(origin) = info.origin() else {
            return Ok(());
        };

        let start = DragStart::new(origin).with_ghost(dom::ghost_source(&piece));
        let outcome = self
            .game
            .handle_touch(&TouchEvent::start(touch, start), &self.hit);
        self.settle(&outcome)
    }

    /// `touchmove`: move the ghost and highlight the placeholder below.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, event: &web_sys::TouchEvent) -> Result<(), JsValue> {
        if self.game.session().is_none() {
            return Ok(());
        }
        event.prevent_default();
        let touches = touch_points(&event.touches());
        let outcome = self
            .game
            .handle_touch(&TouchEvent::new(TouchPhase::Move, touches), &self.hit);
        self.settle(&outcome)
    }

    /// `touchend`: drop on whatever lies under the lifted finger.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self, event: &web_sys::TouchEvent) -> Result<(), JsValue> {
        let touches = touch_points(&event.changed_touches());
        let outcome = self
            .game
            .handle_touch(&TouchEvent::new(TouchPhase::End, touches), &self.hit);
        self.settle(&outcome)
    }

    /// `touchcancel`: abandon the drag.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    #[wasm_bindgen(js_name = touchCancel)]
    pub fn touch_cancel(&mut self, event: &web_sys::TouchEvent) -> Result<(), JsValue> {
        let touches = touch_points(&event.changed_touches());
        let outcome = self
            .game
            .handle_touch(&TouchEvent::new(TouchPhase::Cancel, touches), &self.hit);
        self.settle(&outcome)
    }

    /// Redraw the whole game.
    ///
    /// # Errors
    ///
    /// Returns an error if the page lacks the game markup.
    pub fn render(&self) -> Result<(), JsValue> {
        self.renderer
            .draw(&self.game.snapshot(), self.game.chrome())
            .map_err(JsValue::from)
    }

    /// Drawable state as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.snapshot()).map_err(|e| AppError::from(e).into())
    }

    /// Whether the game is shown.
    #[wasm_bindgen(js_name = isOpen)]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.game.is_open()
    }

    /// View on screen: `"code"` or `"visual"`.
    #[must_use]
    pub fn view(&self) -> String {
        match self.game.view() {
            View::Code => "code",
            View::Visual => "visual",
        }
        .to_string()
    }
}

impl MiniGameApp {
    fn settle(&self, outcome: &GestureOutcome) -> Result<(), JsValue> {
        if let GestureOutcome::Rejected(err) = outcome {
            tracing::debug!(%err, "gesture rejected");
        }
        match Redraw::after(outcome) {
            Redraw::Nothing => Ok(()),
            Redraw::Gesture => self
                .renderer
                .draw_gesture(&self.game.snapshot())
                .map_err(JsValue::from),
            Redraw::Full => self.render(),
        }
    }
}

fn window() -> Result<Window, AppError> {
    web_sys::window().ok_or_else(|| AppError::MissingElement("window".to_string()))
}

fn drop_target(target: Option<web_sys::EventTarget>) -> Option<minigame_core::DropTarget> {
    let element: Element = dom::event_element(target)?;
    dom::target_info(&element)?.target()
}

#[allow(clippy::cast_precision_loss)]
fn client_point(x: i32, y: i32) -> (f32, f32) {
    (x as f32, y as f32)
}

fn touch_point(touch: &web_sys::Touch) -> TouchPoint {
    let (x, y) = client_point(touch.client_x(), touch.client_y());
    TouchPoint::new(u32::try_from(touch.identifier()).unwrap_or_default(), x, y)
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|touch| touch_point(&touch))
        .collect()
}

fn first_touch(list: &TouchList) -> Option<TouchPoint> {
    list.get(0).map(|touch| touch_point(&touch))
}
