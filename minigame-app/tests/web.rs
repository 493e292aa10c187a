//! Browser tests, run with `wasm-pack test --headless --firefox minigame-app`.

#![cfg(target_arch = "wasm32")]

use minigame_app::dom::{ElementInfo, Role};
use minigame_app::render::{ghost_style, DomRenderer};
use minigame_core::{
    DragOrigin, DragStart, GameConfig, Ghost, GhostSource, InputKind, InventoryItem, Language,
    MemoryStore, MiniGame, PieceKind, StoredPreferences, ZoneId,
};
use wasm_bindgen_test::*;
use web_sys::Document;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn tray_switch_is_an_inventory_origin() {
    let info = ElementInfo {
        role: Role::Inner,
        data_type: Some("switch".to_string()),
        zone: None,
        in_inventory: true,
    };
    assert_eq!(
        info.origin(),
        Some(DragOrigin::Inventory {
            item: InventoryItem::Switch
        })
    );
}

#[wasm_bindgen_test]
fn ghost_style_keeps_pointer_events_off() {
    let ghost = Ghost {
        source: GhostSource {
            label: "toggle(options);".to_string(),
            width: 40.0,
            height: 40.0,
        },
        x: 20.0,
        y: 20.0,
    };
    let style = ghost_style(&ghost);
    assert!(style.contains("left: 0px"));
    assert!(style.contains("pointer-events: none"));
}

fn mount() -> Document {
    let zones = ["left", "middle", "right"];
    let code: String = zones
        .iter()
        .map(|zone| {
            format!(
                "<div class=\"game-zone\" data-zone=\"{zone}\">\
                 <div class=\"placeholder\" data-type=\"options\"></div>\
                 <div class=\"placeholder\" data-type=\"functionality\"></div>\
                 <div class=\"resultConsole\"></div></div>"
            )
        })
        .collect();
    let visual: String = zones
        .iter()
        .map(|zone| {
            format!(
                "<div class=\"visual-zone\" data-zone=\"{zone}\">\
                 <div class=\"slot\"></div><div class=\"resultConsole\"></div></div>"
            )
        })
        .collect();

    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(&format!(
        "<div id=\"miniGame\" class=\"hidden\">\
         <div id=\"code-mode-container\">{code}</div>\
         <div id=\"visual-mode-container\">{visual}</div></div>"
    ));
    document
}

#[wasm_bindgen_test]
fn redraws_update_pieces_without_replacing_them() {
    let document = mount();
    let renderer = DomRenderer::new(document.clone());
    let prefs = StoredPreferences::load(MemoryStore::new(), Language::En);
    let mut game = MiniGame::new(&GameConfig::default(), prefs);
    game.open();
    game.toggle_mode();
    renderer.draw(&game.snapshot(), game.chrome()).unwrap();

    let donut = document
        .query_selector("#visual-mode-container .visual-zone[data-zone=\"right\"] .donut")
        .unwrap()
        .expect("donut drawn");

    game.begin_drag(
        DragStart::new(DragOrigin::Zone {
            zone: ZoneId::Right,
            kind: PieceKind::Options,
        }),
        InputKind::Touch,
    )
    .unwrap();
    renderer.draw_gesture(&game.snapshot()).unwrap();
    assert!(donut.is_connected());

    game.cancel_drag();
    game.execute(ZoneId::Right);
    renderer.draw(&game.snapshot(), game.chrome()).unwrap();

    assert!(donut.is_connected());
    assert!(donut.class_list().contains("rotated"));
    let top = donut.query_selector(".top-piece").unwrap().expect("top face");
    assert_eq!(top.text_content().as_deref(), Some("\u{1f319}"));
}
