//! Page structure: selectors, and resolving elements to game pieces.
//!
//! ```text
//! #code-mode-container  .game-zone[data-zone]   .placeholder[data-type]
//! #visual-mode-container .visual-zone[data-zone] .slot > .donut / .inner-circle
//! #donuts                                        .donut / .inner-circle (tray)
//! ```

use minigame_core::{
    DragOrigin, DropTarget, GhostSource, HitTest, InventoryItem, PieceKind, ZoneId,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement};

/// Game overlay.
pub const GAME_ID: &str = "miniGame";
/// Page language toggle.
pub const LANG_TOGGLE_ID: &str = "langToggle";
/// Page theme toggle.
pub const THEME_TOGGLE_ID: &str = "themeToggle";
/// Mode toggle button.
pub const MODE_TOGGLE_ID: &str = "miniGameModeToggle";
/// Inventory tray.
pub const INVENTORY_ID: &str = "donuts";
/// Ghost element, created on demand.
pub const GHOST_ID: &str = "drag-ghost";

/// Class hiding an element.
pub const HIDDEN_CLASS: &str = "hidden";
/// Class marking the placeholder under the pointer.
pub const HIGHLIGHT_CLASS: &str = "highlight";

const PIECE_SELECTOR: &str = ".placeholder, .donut, .inner-circle";

/// Role of an element in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Code tile.
    Placeholder,
    /// Option donut.
    Donut,
    /// Operation circle.
    Inner,
    /// Visual drop slot.
    Slot,
}

/// Attributes read off a piece and its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    /// Role of the element.
    pub role: Role,
    /// `data-type`, or the element id for tray circles.
    pub data_type: Option<String>,
    /// `data-zone` of the enclosing zone.
    pub zone: Option<String>,
    /// Whether the element sits on the tray.
    pub in_inventory: bool,
}

impl ElementInfo {
    /// The piece a drag on this element picks up.
    #[must_use]
    pub fn origin(&self) -> Option<DragOrigin> {
        let data_type = self.data_type.as_deref();
        if self.in_inventory {
            let item = data_type?.parse::<InventoryItem>().ok()?;
            return Some(DragOrigin::Inventory { item });
        }

        let zone = self.zone_id()?;
        let kind = match self.role {
            Role::Placeholder => data_type?.parse().ok()?,
            Role::Donut => PieceKind::Options,
            Role::Inner if data_type == Some("empty-inner") => return None,
            Role::Inner => PieceKind::Operation,
            Role::Slot => return None,
        };
        Some(DragOrigin::Zone { zone, kind })
    }

    /// The drop target this element belongs to.
    #[must_use]
    pub fn target(&self) -> Option<DropTarget> {
        if self.in_inventory {
            return None;
        }
        let zone = self.zone_id()?;
        match self.role {
            Role::Placeholder => Some(DropTarget::Placeholder {
                zone,
                kind: self.data_type.as_deref()?.parse().ok()?,
            }),
            Role::Slot => Some(DropTarget::Slot { zone }),
            Role::Donut | Role::Inner => None,
        }
    }

    fn zone_id(&self) -> Option<ZoneId> {
        self.zone.as_deref()?.parse().ok()
    }
}

/// The element an event was dispatched to.
#[must_use]
pub fn event_element(target: Option<EventTarget>) -> Option<Element> {
    target?.dyn_into::<Element>().ok()
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

fn zone_of(element: &Element) -> Option<String> {
    closest(element, "[data-zone]").and_then(|zone| zone.get_attribute("data-zone"))
}

/// Describe the piece at or above `element`.
#[must_use]
pub fn piece_info(element: &Element) -> Option<(Element, ElementInfo)> {
    let piece = closest(element, PIECE_SELECTOR)?;
    let classes = piece.class_list();
    let role = if classes.contains("placeholder") {
        Role::Placeholder
    } else if classes.contains("donut") {
        Role::Donut
    } else {
        Role::Inner
    };
    let data_type = piece
        .get_attribute("data-type")
        .filter(|value| !value.is_empty())
        .or_else(|| Some(piece.id()).filter(|id| !id.is_empty()));
    let info = ElementInfo {
        role,
        data_type,
        zone: zone_of(&piece),
        in_inventory: closest(&piece, &format!("#{INVENTORY_ID}")).is_some(),
    };
    Some((piece, info))
}

/// Describe the drop target at or above `element`.
#[must_use]
pub fn target_info(element: &Element) -> Option<ElementInfo> {
    if let Some(placeholder) = closest(element, ".placeholder") {
        return Some(ElementInfo {
            role: Role::Placeholder,
            data_type: placeholder.get_attribute("data-type"),
            zone: zone_of(&placeholder),
            in_inventory: false,
        });
    }
    let slot = closest(element, ".slot")?;
    Some(ElementInfo {
        role: Role::Slot,
        data_type: None,
        zone: zone_of(&slot),
        in_inventory: closest(&slot, &format!("#{INVENTORY_ID}")).is_some(),
    })
}

/// Appearance of a piece for the drag ghost.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ghost_source(piece: &Element) -> GhostSource {
    let (width, height) = piece
        .dyn_ref::<HtmlElement>()
        .map_or((0, 0), |html| (html.offset_width(), html.offset_height()));
    GhostSource {
        label: piece.text_content().unwrap_or_default().trim().to_string(),
        width: width as f32,
        height: height as f32,
    }
}

/// Hit-testing through `document.elementFromPoint`.
#[derive(Debug, Clone)]
pub struct DomHitTest {
    document: Document,
}

impl DomHitTest {
    /// Hit-test in `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl HitTest for DomHitTest {
    fn drop_target_at(&self, x: f32, y: f32) -> Option<DropTarget> {
        let element = self.document.element_from_point(x, y)?;
        // The ghost is pointer-transparent, so the element below is real.
        target_info(&element)?.target()
    }
}

/// Selector for one zone's container in a view.
#[must_use]
pub fn zone_selector(container_id: &str, zone_class: &str, zone: ZoneId) -> String {
    format!("#{container_id} .{zone_class}[data-zone=\"{zone}\"]")
}
