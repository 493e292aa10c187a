//! Code/visual translation and execution properties.
//!
//! Covers:
//! - Code → visual → code reproduces every real option/operation pairing
//! - The placeholder donut collapsing to an empty declaration
//! - Swap and kind-mismatch behavior of the drag engine
//! - Execution results for incomplete, language and theme zones

use minigame_core::{
    code, execute, sync_code_to_visual, sync_visual_to_code, DragDropEngine, DragError,
    DragOrigin, DropTarget, Effect, ExecutionResult, InputKind, Language, LanguageEffect,
    MemoryStore, Operation, OptionSet, PieceKind, StoredPreferences, View, ZoneContent, ZoneId,
    ZoneModel,
};

fn prefs() -> StoredPreferences<MemoryStore> {
    StoredPreferences::load(MemoryStore::new(), Language::En)
}

fn rotated(options: OptionSet, operation: Operation) -> ZoneContent {
    ZoneContent {
        options: Some(options.swapped()),
        operation: Some(operation),
        rotated: true,
    }
}

/// Every zone content with a real option pair and an operation, in both
/// orders.
fn configured_zones() -> Vec<ZoneContent> {
    let mut zones = Vec::new();
    for options in [OptionSet::languages(), OptionSet::themes()] {
        for operation in [Operation::Toggle, Operation::Rotate] {
            zones.push(ZoneContent::new(Some(options), Some(operation)));
            zones.push(rotated(options, operation));
        }
    }
    zones
}

// ============================================================================
// Round-trip Tests
// ============================================================================

#[test]
fn test_code_round_trip_reproduces_configured_zones() {
    for content in configured_zones() {
        let mut model = ZoneModel::new([content, content, content]);
        let before = code::render(&content);

        sync_code_to_visual(&mut model);
        let report = sync_visual_to_code(&mut model);

        for id in ZoneId::ALL {
            assert_eq!(model.zone(View::Code, id), &content, "zone {id} of {content:?}");
            assert_eq!(code::render(model.zone(View::Code, id)), before);
        }
        assert!(report.lossy_zones.is_empty(), "{content:?} reported lossy");
    }
}

#[test]
fn test_visual_faces_follow_code_order() {
    let content = rotated(OptionSet::themes(), Operation::Rotate);
    let mut model = ZoneModel::new([content, ZoneContent::empty(), ZoneContent::empty()]);
    sync_code_to_visual(&mut model);

    let slot = minigame_core::visual::render(model.zone(View::Visual, ZoneId::Left));
    let donut = slot.donut.expect("donut installed");
    assert_eq!(donut.faces, Some(["\u{1f319}", "\u{2600}\u{fe0f}"]));
    assert!(slot.rotated);
}

#[test]
fn test_placeholder_donut_collapses_to_empty_declaration() {
    let mut model = ZoneModel::default();
    sync_code_to_visual(&mut model);
    assert_eq!(
        model.zone(View::Visual, ZoneId::Middle).options,
        Some(OptionSet::Neutral)
    );

    let report = sync_visual_to_code(&mut model);

    assert_eq!(model.zone(View::Code, ZoneId::Middle).options, None);
    assert_eq!(code::render(model.zone(View::Code, ZoneId::Middle)).declaration, "");
    assert_eq!(report.lossy_zones, ZoneId::ALL.to_vec());
}

#[test]
fn test_argumentless_calls_survive_round_trip() {
    let content = ZoneContent::new(None, Some(Operation::Toggle));
    let mut model = ZoneModel::new([content, ZoneContent::empty(), ZoneContent::empty()]);
    assert_eq!(code::render(&content).call, "langToggle();");

    sync_code_to_visual(&mut model);
    sync_visual_to_code(&mut model);

    assert_eq!(model.zone(View::Code, ZoneId::Left), &content);
}

// ============================================================================
// Drag Properties
// ============================================================================

#[test]
fn test_swapping_two_zones_leaves_third_untouched() {
    let lang_toggle = ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle));
    let theme_rotate = ZoneContent::new(Some(OptionSet::themes()), Some(Operation::Rotate));
    let mut model = ZoneModel::new([lang_toggle, ZoneContent::empty(), theme_rotate]);
    let mut engine = DragDropEngine::new();

    for kind in [PieceKind::Options, PieceKind::Operation] {
        engine
            .begin_drag(
                &model,
                View::Code,
                DragOrigin::Zone {
                    zone: ZoneId::Left,
                    kind,
                },
                InputKind::Mouse,
            )
            .expect("drag starts");
        engine
            .attempt_drop(
                &mut model,
                DropTarget::Placeholder {
                    zone: ZoneId::Right,
                    kind,
                },
            )
            .expect("drop succeeds");
    }

    assert_eq!(model.zone(View::Code, ZoneId::Left), &theme_rotate);
    assert_eq!(model.zone(View::Code, ZoneId::Right), &lang_toggle);
    assert_eq!(model.zone(View::Code, ZoneId::Middle), &ZoneContent::empty());
}

#[test]
fn test_kind_mismatch_never_changes_either_side() {
    let mut model = ZoneModel::new([
        ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle)),
        ZoneContent::empty(),
        ZoneContent::new(Some(OptionSet::themes()), Some(Operation::Rotate)),
    ]);
    sync_code_to_visual(&mut model);
    let before = model.clone();
    let mut engine = DragDropEngine::new();

    for (dragged, target) in [
        (PieceKind::Options, PieceKind::Operation),
        (PieceKind::Operation, PieceKind::Options),
    ] {
        engine
            .begin_drag(
                &model,
                View::Code,
                DragOrigin::Zone {
                    zone: ZoneId::Left,
                    kind: dragged,
                },
                InputKind::Touch,
            )
            .expect("drag starts");
        let result = engine.attempt_drop(
            &mut model,
            DropTarget::Placeholder {
                zone: ZoneId::Right,
                kind: target,
            },
        );
        assert_eq!(result, Err(DragError::KindMismatch { dragged, target }));
        assert_eq!(model, before);
        assert!(!engine.is_dragging());
    }
}

// ============================================================================
// Execution Properties
// ============================================================================

#[test]
fn test_missing_options_is_always_incomplete() {
    let mut effects = prefs();
    for view in [View::Code, View::Visual] {
        for operation in [None, Some(Operation::Toggle), Some(Operation::Rotate)] {
            let mut zone = ZoneContent::new(None, operation);
            let result = execute(view, &mut zone, &mut effects);
            assert!(matches!(result, ExecutionResult::Incomplete { .. }));
        }
    }
    assert_eq!(effects.language(), Language::En);
}

#[test]
fn test_language_toggle_from_english_reports_hungarian() {
    let mut effects = prefs();
    let mut zone = ZoneContent::new(Some(OptionSet::languages()), Some(Operation::Toggle));

    let result = execute(View::Visual, &mut zone, &mut effects);

    assert_eq!(effects.language(), Language::Hu);
    match result {
        ExecutionResult::Success {
            effect: Effect::LanguageChanged { language },
            message,
        } => {
            assert_eq!(language, Language::Hu);
            assert_eq!(message, "Nyelv megváltoztatva!");
        }
        other => panic!("Expected language change, got {other:?}"),
    }
}

#[test]
fn test_theme_rotation_alternates_across_three_runs() {
    let mut effects = prefs();
    let mut zone = ZoneContent::new(Some(OptionSet::themes()), Some(Operation::Rotate));
    let expected = [
        (["\u{1f319}", "\u{2600}\u{fe0f}"], true),
        (["\u{2600}\u{fe0f}", "\u{1f319}"], false),
        (["\u{1f319}", "\u{2600}\u{fe0f}"], true),
    ];

    for (order, flag) in expected {
        execute(View::Code, &mut zone, &mut effects);
        assert_eq!(zone.options.and_then(OptionSet::labels), Some(order));
        assert_eq!(zone.rotated, flag);
    }
}
