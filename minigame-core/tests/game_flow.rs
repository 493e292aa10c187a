//! Mini-game Integration Tests
//!
//! Drives a whole game the way the page does:
//! - Open, drag, switch views, run zones, close
//! - Touch gestures resolved by hit-testing
//! - Preferences persisted through the file-backed store

use minigame_core::{
    DragEvent, DragOrigin, DragStart, DropTarget, GameConfig, GestureOutcome, GhostSource,
    InputKind, InventoryItem, JsonFileStore, KeyValueStore, Language, LanguageEffect, MemoryStore,
    MiniGame, NoTargets, Operation, OptionSet, PieceKind, StoredPreferences, Theme, ThemeEffect,
    TouchEvent, TouchPhase, TouchPoint, View, ZoneId,
};
use tempfile::TempDir;

fn touch_game() -> MiniGame<StoredPreferences<MemoryStore>> {
    let config = GameConfig::from_json(r#"{"hover_capable": false}"#).expect("valid config");
    MiniGame::new(&config, StoredPreferences::load(MemoryStore::new(), Language::En))
}

fn ghost() -> GhostSource {
    GhostSource {
        label: "const options = ['EN','HU'];".to_string(),
        width: 180.0,
        height: 28.0,
    }
}

fn pick(zone: ZoneId, kind: PieceKind) -> DragStart {
    DragStart::new(DragOrigin::Zone { zone, kind }).with_ghost(ghost())
}

fn touch(phase: TouchPhase, x: f32, y: f32) -> TouchEvent {
    TouchEvent::new(phase, vec![TouchPoint::new(0, x, y)])
}

// ============================================================================
// Session Tests
// ============================================================================

#[test]
fn test_second_drag_is_rejected_while_first_is_live() {
    let mut game = touch_game();
    game.open();

    let first = game
        .begin_drag(pick(ZoneId::Left, PieceKind::Options), InputKind::Touch)
        .expect("first drag starts");
    let second = game.handle_drag(&DragEvent::Start(pick(ZoneId::Right, PieceKind::Operation)));

    assert!(matches!(second, GestureOutcome::Rejected(_)));
    assert_eq!(game.session().map(|s| s.id), Some(first.id));
}

#[test]
fn test_cancelled_drag_leaves_model_and_clears_ghost() {
    let mut game = touch_game();
    game.open();
    let before = game.model().clone();

    game.handle_touch(
        &TouchEvent::start(TouchPoint::new(0, 20.0, 20.0), pick(ZoneId::Right, PieceKind::Options)),
        &NoTargets,
    );
    assert!(game.ghost().is_some());

    let outcome = game.handle_touch(&touch(TouchPhase::Cancel, 20.0, 20.0), &NoTargets);

    assert_eq!(outcome, GestureOutcome::Cancelled);
    assert_eq!(game.model(), &before);
    assert!(game.ghost().is_none());
    assert!(game.session().is_none());
}

#[test]
fn test_touch_events_without_session_are_ignored() {
    let mut game = touch_game();
    assert_eq!(
        game.handle_touch(&touch(TouchPhase::Move, 5.0, 5.0), &NoTargets),
        GestureOutcome::Ignored
    );
    assert_eq!(
        game.handle_touch(&touch(TouchPhase::End, 5.0, 5.0), &NoTargets),
        GestureOutcome::Ignored
    );
}

#[test]
fn test_native_dragend_without_drop_cancels() {
    let mut game = touch_game();
    game.open();
    let before = game.model().clone();

    let started = game.handle_drag(&DragEvent::Start(pick(ZoneId::Left, PieceKind::Options)));
    assert!(matches!(started, GestureOutcome::Started(_)));
    assert!(game.ghost().is_some());

    let ended = game.handle_drag(&DragEvent::End);

    assert_eq!(ended, GestureOutcome::Cancelled);
    assert_eq!(game.model(), &before);
    assert_eq!(game.ghost(), None);
    assert!(game.session().is_none());
}

// ============================================================================
// Visual View Tests
// ============================================================================

#[test]
fn test_inventory_piece_replaces_operation_and_syncs_to_code() {
    let mut game = touch_game();
    game.open();
    game.toggle_mode();
    assert_eq!(game.view(), View::Visual);

    let slot_of = |x: f32, _y: f32| {
        let zone = if x < 100.0 {
            ZoneId::Left
        } else if x < 200.0 {
            ZoneId::Middle
        } else {
            ZoneId::Right
        };
        Some(DropTarget::Slot { zone })
    };

    let started = game.handle_touch(
        &TouchEvent::start(
            TouchPoint::new(0, 150.0, 400.0),
            DragStart::new(DragOrigin::Inventory {
                item: InventoryItem::Rotator,
            }),
        ),
        &slot_of,
    );
    assert!(matches!(started, GestureOutcome::Started(_)));

    // Slots are never highlighted.
    assert_eq!(
        game.handle_touch(&touch(TouchPhase::Move, 50.0, 10.0), &slot_of),
        GestureOutcome::Moved(None)
    );
    let dropped = game.handle_touch(&touch(TouchPhase::End, 50.0, 10.0), &slot_of);
    assert!(dropped.changed_model());
    assert_eq!(game.zone(ZoneId::Left).operation, Some(Operation::Rotate));

    game.toggle_mode();
    assert_eq!(game.view(), View::Code);
    assert_eq!(game.render_zone(ZoneId::Left).code.call, "rotate(options);");
}

#[test]
fn test_running_rotation_in_visual_view_swaps_faces() {
    let mut game = touch_game();
    game.toggle_mode();

    let result = game.execute(ZoneId::Right);

    assert!(result.is_success());
    let slot = game.render_zone(ZoneId::Right).visual;
    assert!(slot.rotated);
    assert_eq!(
        slot.donut.and_then(|donut| donut.faces),
        Some(["\u{1f319}", "\u{2600}\u{fe0f}"])
    );
    assert_eq!(
        game.console(View::Visual, ZoneId::Right).map(|line| line.text.as_str()),
        Some("Options order swapped!")
    );
}

#[test]
fn test_donut_swap_between_slots_carries_rotation() {
    let mut game = touch_game();
    game.toggle_mode();
    assert!(game.execute(ZoneId::Right).is_success());
    let rotated_themes = game.zone(ZoneId::Right).options;
    assert!(game.zone(ZoneId::Right).rotated);

    game.begin_drag(
        DragStart::new(DragOrigin::Zone {
            zone: ZoneId::Right,
            kind: PieceKind::Options,
        }),
        InputKind::Mouse,
    )
    .expect("drag starts");
    let dropped = game.handle_drag(&DragEvent::Drop(DropTarget::Slot { zone: ZoneId::Left }));
    assert!(dropped.changed_model());

    let left = game.zone(ZoneId::Left);
    assert_eq!(left.options, rotated_themes);
    assert!(left.rotated);
    assert_eq!(left.operation, Some(Operation::Toggle));

    let right = game.zone(ZoneId::Right);
    assert_eq!(right.options, Some(OptionSet::languages()));
    assert!(!right.rotated);
    assert_eq!(right.operation, Some(Operation::Rotate));
    assert_eq!(game.zone(ZoneId::Middle).options, Some(OptionSet::Neutral));
}

#[test]
fn test_placeholder_donut_is_acknowledged() {
    let mut game = touch_game();
    game.toggle_mode();
    game.begin_drag(
        DragStart::new(DragOrigin::Inventory {
            item: InventoryItem::Switch,
        }),
        InputKind::Mouse,
    )
    .expect("drag starts");
    game.attempt_drop(DropTarget::Slot {
        zone: ZoneId::Middle,
    })
    .expect("drop succeeds");

    let result = game.execute(ZoneId::Middle);
    assert_eq!(result.message(), "Function Executed");
    assert_eq!(game.zone(ZoneId::Middle).options, Some(OptionSet::Neutral));
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_close_resets_transient_state_only() {
    let mut game = touch_game();
    game.open();
    game.execute(ZoneId::Middle);
    game.handle_drag(&DragEvent::Start(pick(ZoneId::Left, PieceKind::Operation)));

    let chrome = game.close();

    assert!(chrome.language_toggle_visible);
    assert!(game.session().is_none());
    assert!(game.ghost().is_none());
    assert!(game.console(View::Code, ZoneId::Middle).is_none());
    assert_eq!(game.zone(ZoneId::Left).operation, Some(Operation::Toggle));
}

#[test]
fn test_preferences_persist_through_file_store() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("preferences.json");

    {
        let store = JsonFileStore::open(&path).expect("open store");
        let prefs = StoredPreferences::load(store, Language::En);
        let mut game = MiniGame::new(&GameConfig::default(), prefs);
        game.open();
        game.execute(ZoneId::Left);

        game.set_zone(
            View::Code,
            ZoneId::Middle,
            minigame_core::ZonePatch::default()
                .with_options(Some(OptionSet::themes()))
                .with_operation(Some(Operation::Toggle)),
        )
        .expect("patch applies");
        assert_eq!(game.execute(ZoneId::Middle).message(), "Téma megváltoztatva!");
        assert!(game.close().theme_toggle_visible);
    }

    let store = JsonFileStore::open(&path).expect("reopen store");
    assert_eq!(store.get("darkModeUnlocked").as_deref(), Some("true"));
    let prefs = StoredPreferences::load(store, Language::En);
    assert_eq!(prefs.language(), Language::Hu);
    assert_eq!(prefs.theme(), Theme::Dark);
    assert!(prefs.is_theme_unlocked());
}
