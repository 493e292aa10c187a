//! Translation between the code and the visual encodings.
//!
//! Each direction renders the view being left into its own encoding and
//! reads it back through the other one:
//!
//! ```text
//! code  ──render──► tiles ──marker tokens──► donut / inner ──► visual
//! visual ──render──► donut / inner ──kind tags──► tiles ──parse──► code
//! ```
//!
//! The placeholder (`mode`) donut has no code form and becomes an empty
//! declaration. Syncing back produces a zone without options, so that
//! direction is lossy.

use serde::Serialize;

use crate::code::{self, CodeText};
use crate::model::{View, ZoneModel};
use crate::visual::{self, DonutKind, InnerKind, VisualSlot};
use crate::zone::{OptionSet, ZoneContent, ZoneId};

/// Summary of one sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// View that was read.
    pub from: View,
    /// View that was written.
    pub to: View,
    /// Zones whose content could not be fully represented in the target.
    pub lossy_zones: Vec<ZoneId>,
}

/// Rebuild every visual slot from the code tiles.
pub fn sync_code_to_visual(model: &mut ZoneModel) -> SyncReport {
    for id in ZoneId::ALL {
        let zone = *model.zone(View::Code, id);
        let text = code::render(&zone);
        model.replace_zone(View::Visual, id, classify(&text, zone.rotated));
    }
    tracing::debug!("synced code view to visual view");
    SyncReport {
        from: View::Code,
        to: View::Visual,
        lossy_zones: Vec::new(),
    }
}

/// Rebuild every code tile from the visual pieces.
pub fn sync_visual_to_code(model: &mut ZoneModel) -> SyncReport {
    let mut lossy_zones = Vec::new();
    for id in ZoneId::ALL {
        let zone = *model.zone(View::Visual, id);
        let slot = visual::render(&zone);
        let text = code_text(&slot);

        let mut content = code::parse(&text);
        if content.options.is_some() {
            content.rotated = zone.rotated;
        }
        if content != zone {
            lossy_zones.push(id);
            tracing::debug!(zone = %id, ?zone, ?content, "visual content degraded in code form");
        }
        model.replace_zone(View::Code, id, content);
    }
    tracing::debug!("synced visual view to code view");
    SyncReport {
        from: View::Visual,
        to: View::Code,
        lossy_zones,
    }
}

/// Build visual content from code tiles by their marker tokens.
fn classify(text: &CodeText, rotated: bool) -> ZoneContent {
    let options = match donut_kind(&text.declaration) {
        Some(DonutKind::Mode) => Some(OptionSet::Neutral),
        Some(DonutKind::Flags | DonutKind::Emojis) => code::parse_declaration(&text.declaration),
        None => None,
    };
    let operation = inner_kind(&text.call).and_then(InnerKind::operation);

    ZoneContent {
        options,
        operation,
        rotated: rotated && options.is_some(),
    }
}

/// Donut for a declaration: language markers, then theme markers; an empty
/// declaration gets the placeholder donut. Anything else gets no donut.
fn donut_kind(declaration: &str) -> Option<DonutKind> {
    if code::declares_languages(declaration) {
        Some(DonutKind::Flags)
    } else if code::declares_themes(declaration) {
        Some(DonutKind::Emojis)
    } else if declaration.is_empty() {
        Some(DonutKind::Mode)
    } else {
        None
    }
}

fn inner_kind(call: &str) -> Option<InnerKind> {
    if call.contains("toggle") || call.contains("Toggle") {
        Some(InnerKind::Switch)
    } else if call.contains("rotate") {
        Some(InnerKind::Rotator)
    } else if call.is_empty() {
        Some(InnerKind::EmptyInner)
    } else {
        None
    }
}

/// Canonical tiles for a slot, read from the pieces' kind tags.
fn code_text(slot: &VisualSlot) -> CodeText {
    let declaration = match slot.donut {
        Some(donut) => match (donut.kind, donut.faces) {
            (DonutKind::Flags | DonutKind::Emojis, Some([front, back])) => {
                format!("{}['{front}','{back}'];", code::DECLARATION_PREFIX)
            }
            _ => String::new(),
        },
        None => String::new(),
    };
    let call = code::render_call(slot.inner.operation(), !declaration.is_empty());
    CodeText { declaration, call }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::{Operation, ZonePatch};

    fn model_with(content: ZoneContent) -> ZoneModel {
        ZoneModel::new([content, ZoneContent::empty(), ZoneContent::empty()])
    }

    #[test]
    fn empty_code_zone_becomes_placeholder_donut_and_outline() {
        let mut model = ZoneModel::default();
        sync_code_to_visual(&mut model);

        let zone = model.zone(View::Visual, ZoneId::Middle);
        assert_eq!(zone.options, Some(OptionSet::Neutral));
        assert_eq!(zone.operation, None);
        assert_eq!(visual::render(zone).inner, InnerKind::EmptyInner);
    }

    #[test]
    fn sync_replaces_prior_visual_contents() {
        let mut model = model_with(ZoneContent::new(
            Some(OptionSet::languages()),
            Some(Operation::Toggle),
        ));
        model
            .set_zone(
                View::Visual,
                ZoneId::Left,
                ZonePatch::default().with_operation(Some(Operation::Rotate)),
            )
            .expect("patch applies");

        sync_code_to_visual(&mut model);
        assert_eq!(
            model.zone(View::Visual, ZoneId::Left).operation,
            Some(Operation::Toggle)
        );
    }

    #[test]
    fn placeholder_donut_degrades_to_empty_declaration() {
        let mut model = ZoneModel::default();
        model.replace_zone(
            View::Visual,
            ZoneId::Right,
            ZoneContent::new(Some(OptionSet::Neutral), Some(Operation::Toggle)),
        );

        let report = sync_visual_to_code(&mut model);

        let zone = model.zone(View::Code, ZoneId::Right);
        assert_eq!(zone.options, None);
        assert_eq!(zone.operation, Some(Operation::Toggle));
        assert_eq!(code::render(zone).call, "langToggle();");
        assert!(report.lossy_zones.contains(&ZoneId::Right));
    }

    #[test]
    fn unrotated_zones_are_not_reported_lossy() {
        let mut model = model_with(ZoneContent::new(
            Some(OptionSet::themes()),
            Some(Operation::Rotate),
        ));
        sync_code_to_visual(&mut model);
        let report = sync_visual_to_code(&mut model);
        assert!(!report.lossy_zones.contains(&ZoneId::Left));
    }
}
