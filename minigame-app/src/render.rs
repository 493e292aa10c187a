//! Draws a [`GameSnapshot`] into the page.

use minigame_core::{
    Chrome, ConsoleLine, Donut, DropTarget, GameSnapshot, GestureOutcome, Ghost, PieceKind,
    UiLabels, View, VisualSlot, ZoneId, ZoneView,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{
    self, GAME_ID, GHOST_ID, HIDDEN_CLASS, HIGHLIGHT_CLASS, LANG_TOGGLE_ID, MODE_TOGGLE_ID,
    THEME_TOGGLE_ID,
};
use crate::error::AppError;

type RenderResult = Result<(), AppError>;

/// How much of the page an input outcome invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing changed.
    Nothing,
    /// Highlights and ghost only; a gesture is still in flight.
    Gesture,
    /// Everything, pieces updated in place.
    Full,
}

impl Redraw {
    /// Redraw needed after `outcome`.
    #[must_use]
    pub const fn after(outcome: &GestureOutcome) -> Self {
        match outcome {
            GestureOutcome::Ignored => Self::Nothing,
            GestureOutcome::Started(_) | GestureOutcome::Moved(_) => Self::Gesture,
            GestureOutcome::Dropped(_)
            | GestureOutcome::Cancelled
            | GestureOutcome::Rejected(_) => Self::Full,
        }
    }
}

/// Writes game state into the page DOM.
#[derive(Debug, Clone)]
pub struct DomRenderer {
    document: Document,
}

impl DomRenderer {
    /// Render into `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// Draw everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the page lacks a required element or a DOM call
    /// throws.
    pub fn draw(&self, snapshot: &GameSnapshot, chrome: Chrome) -> RenderResult {
        self.draw_chrome(chrome)?;
        self.draw_view(snapshot.view, &snapshot.labels)?;
        for zone in &snapshot.zones {
            self.draw_code_zone(zone, snapshot.highlight)?;
            self.draw_visual_zone(zone)?;
        }
        self.draw_ghost(snapshot.ghost.as_ref())
    }

    /// Show or hide the overlay and the page toggles.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay is missing.
    pub fn draw_chrome(&self, chrome: Chrome) -> RenderResult {
        set_class(&self.by_id(GAME_ID)?, HIDDEN_CLASS, !chrome.game_visible)?;
        if let Some(lang) = self.html_by_id(LANG_TOGGLE_ID) {
            let display = if chrome.language_toggle_visible { "" } else { "none" };
            lang.style()
                .set_property("display", display)
                .map_err(|e| AppError::dom(&e))?;
        }
        if let Some(theme) = self.document.get_element_by_id(THEME_TOGGLE_ID) {
            set_class(&theme, HIDDEN_CLASS, !chrome.theme_toggle_visible)?;
        }
        Ok(())
    }

    fn draw_view(&self, view: View, labels: &UiLabels) -> RenderResult {
        for candidate in [View::Code, View::Visual] {
            let container = self.html_by_id(candidate.container_id()).ok_or_else(|| {
                AppError::MissingElement(candidate.container_id().to_string())
            })?;
            let shown = candidate == view;
            set_class(&container, HIDDEN_CLASS, !shown)?;
            container
                .style()
                .set_property("display", if shown { "flex" } else { "none" })
                .map_err(|e| AppError::dom(&e))?;
        }

        if let Some(button) = self.document.get_element_by_id(MODE_TOGGLE_ID) {
            button.set_text_content(Some(labels.mode_toggle));
        }
        self.set_all_text(".executeBtn", labels.run)?;
        self.set_all_text("h1.demo-text", labels.demo_text)
    }

    fn draw_code_zone(&self, zone: &ZoneView, highlight: Option<DropTarget>) -> RenderResult {
        let root = self.query(&dom::zone_selector(
            View::Code.container_id(),
            "game-zone",
            zone.zone,
        ))?;
        let tiles = [
            (PieceKind::Options, zone.code.declaration.as_str()),
            (PieceKind::Operation, zone.code.call.as_str()),
        ];
        for (kind, text) in tiles {
            let tile = query_in(&root, &tile_selector(kind))?;
            tile.set_text_content(Some(text));
            set_draggable(&tile, !text.is_empty())?;
            if kind == PieceKind::Options {
                tile.set_attribute("data-rotated", bool_attr(zone.code_rotated))
                    .map_err(|e| AppError::dom(&e))?;
            }
        }
        draw_highlight(&root, zone.zone, highlight)?;
        draw_console(&root, zone.code_console.as_ref())
    }

    /// Draw only what a gesture in progress changes: placeholder highlights
    /// and the ghost. Piece elements are left alone so the element under the
    /// pointer keeps receiving the gesture's events.
    ///
    /// # Errors
    ///
    /// Returns an error if the page lacks a code tile or a DOM call throws.
    pub fn draw_gesture(&self, snapshot: &GameSnapshot) -> RenderResult {
        for zone in ZoneId::ALL {
            let root = self.query(&dom::zone_selector(
                View::Code.container_id(),
                "game-zone",
                zone,
            ))?;
            draw_highlight(&root, zone, snapshot.highlight)?;
        }
        self.draw_ghost(snapshot.ghost.as_ref())
    }

    fn draw_visual_zone(&self, zone: &ZoneView) -> RenderResult {
        let root = self.query(&dom::zone_selector(
            View::Visual.container_id(),
            "visual-zone",
            zone.zone,
        ))?;
        let slot = query_in(&root, ".slot")?;
        self.draw_donut(&slot, zone.visual.donut, zone.visual.rotated)?;
        self.draw_inner(&slot, &zone.visual)?;
        draw_console(&root, zone.visual_console.as_ref())
    }

    /// Update the slot's donut in place; it is only created or removed when
    /// the slot gains or loses its option set.
    fn draw_donut(&self, slot: &Element, donut: Option<Donut>, rotated: bool) -> RenderResult {
        let existing = find_in(slot, ".donut")?;
        let Some(donut) = donut else {
            if let Some(element) = existing {
                element.remove();
            }
            return Ok(());
        };

        let element = match existing {
            Some(element) => element,
            None => {
                let element = self.element("div", "donut")?;
                slot.prepend_with_node_1(&element)
                    .map_err(|e| AppError::dom(&e))?;
                element
            }
        };
        element
            .set_attribute("data-type", donut.kind.data_type())
            .map_err(|e| AppError::dom(&e))?;
        set_draggable(&element, true)?;
        set_class(&element, "rotated", rotated)?;

        let faces = donut.faces.map_or([None, None], |[top, bottom]| [Some(top), Some(bottom)]);
        for (class, face) in ["top-piece", "bottom-piece"].into_iter().zip(faces) {
            let half = find_in(&element, &format!(".{class}"))?;
            match (half, face) {
                (Some(half), Some(face)) => half.set_text_content(Some(face)),
                (Some(half), None) => half.remove(),
                (None, Some(face)) => {
                    let half = self.element("div", class)?;
                    half.set_text_content(Some(face));
                    element.append_child(&half).map_err(|e| AppError::dom(&e))?;
                }
                (None, None) => {}
            }
        }
        Ok(())
    }

    fn draw_inner(&self, slot: &Element, visual: &VisualSlot) -> RenderResult {
        let inner = match find_in(slot, ".inner-circle")? {
            Some(inner) => inner,
            None => {
                let inner = self.element("div", "inner-circle")?;
                slot.append_child(&inner).map_err(|e| AppError::dom(&e))?;
                inner
            }
        };
        inner
            .set_attribute("data-type", visual.inner.element_id())
            .map_err(|e| AppError::dom(&e))?;
        set_draggable(&inner, visual.inner.is_draggable())
    }

    fn draw_ghost(&self, ghost: Option<&Ghost>) -> RenderResult {
        let existing = self.document.get_element_by_id(GHOST_ID);
        let Some(ghost) = ghost else {
            if let Some(element) = existing {
                element.remove();
            }
            return Ok(());
        };

        let element = match existing {
            Some(element) => element,
            None => {
                let element = self.element("div", "drag-ghost")?;
                element.set_id(GHOST_ID);
                let body = self
                    .document
                    .body()
                    .ok_or_else(|| AppError::MissingElement("body".to_string()))?;
                body.append_child(&element).map_err(|e| AppError::dom(&e))?;
                element
            }
        };
        element.set_text_content(Some(&ghost.source.label));
        element
            .set_attribute("style", &ghost_style(ghost))
            .map_err(|e| AppError::dom(&e))
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element, AppError> {
        let element = self
            .document
            .create_element(tag)
            .map_err(|e| AppError::dom(&e))?;
        element.set_class_name(class);
        Ok(element)
    }

    fn by_id(&self, id: &str) -> Result<Element, AppError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| AppError::MissingElement(id.to_string()))
    }

    fn html_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn query(&self, selector: &str) -> Result<Element, AppError> {
        self.document
            .query_selector(selector)
            .map_err(|e| AppError::dom(&e))?
            .ok_or_else(|| AppError::MissingElement(selector.to_string()))
    }

    fn set_all_text(&self, selector: &str, text: &str) -> RenderResult {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| AppError::dom(&e))?;
        for index in 0..nodes.length() {
            if let Some(node) = nodes.item(index) {
                node.set_text_content(Some(text));
            }
        }
        Ok(())
    }
}

fn find_in(root: &Element, selector: &str) -> Result<Option<Element>, AppError> {
    root.query_selector(selector).map_err(|e| AppError::dom(&e))
}

fn query_in(root: &Element, selector: &str) -> Result<Element, AppError> {
    find_in(root, selector)?.ok_or_else(|| AppError::MissingElement(selector.to_string()))
}

fn tile_selector(kind: PieceKind) -> String {
    format!(".placeholder[data-type=\"{}\"]", kind.data_type())
}

fn draw_highlight(root: &Element, zone: ZoneId, highlight: Option<DropTarget>) -> RenderResult {
    for kind in [PieceKind::Options, PieceKind::Operation] {
        let tile = query_in(root, &tile_selector(kind))?;
        let highlighted = highlight == Some(DropTarget::Placeholder { zone, kind });
        set_class(&tile, HIGHLIGHT_CLASS, highlighted)?;
    }
    Ok(())
}

fn set_class(element: &Element, class: &str, on: bool) -> RenderResult {
    element
        .class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(|e| AppError::dom(&e))
}

fn set_draggable(element: &Element, draggable: bool) -> RenderResult {
    let result = if draggable {
        element.set_attribute("draggable", "true")
    } else {
        element.remove_attribute("draggable")
    };
    result.map_err(|e| AppError::dom(&e))
}

fn draw_console(root: &Element, line: Option<&ConsoleLine>) -> RenderResult {
    let console = query_in(root, ".resultConsole")?;
    console.set_text_content(Some(line.map_or("", |line| line.text.as_str())));
    let color = line.map_or("", ConsoleLine::color);
    console
        .set_attribute("style", &format!("color: {color}"))
        .map_err(|e| AppError::dom(&e))
}

const fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Inline style centering the ghost on the pointer.
#[must_use]
pub fn ghost_style(ghost: &Ghost) -> String {
    let left = ghost.x - ghost.source.width / 2.0;
    let top = ghost.y - ghost.source.height / 2.0;
    format!(
        "position: fixed; left: {left}px; top: {top}px; width: {}px; height: {}px; \
         opacity: 0.7; pointer-events: none; z-index: 10000;",
        ghost.source.width, ghost.source.height
    )
}
