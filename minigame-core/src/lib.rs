//! # Mini-game Core
//!
//! State machine behind the option-toggle mini-game: three zones, each
//! holding an option pair and an operation, shown either as code tiles or as
//! donut pieces. Platform-free; compiles to WASM.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  MiniGame                   │
//! ├─────────────────────────────────────────────┤
//! │  Mode Controller ──► Sync Engine            │
//! │                          │                  │
//! │  Drag/Drop Engine ──► Zone Model ◄── Exec   │
//! │  Ghost Service           │            │     │
//! │                   code / visual    Effects  │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod config;
pub mod drag;
pub mod effects;
pub mod error;
pub mod event;
pub mod exec;
pub mod game;
pub mod ghost;
pub mod messages;
pub mod mode;
pub mod model;
pub mod store;
pub mod sync;
pub mod visual;
pub mod zone;

pub use code::CodeText;
pub use config::{GameConfig, InitialLayout};
pub use drag::{
    Displaced, DragDropEngine, DragError, DragOrigin, DragSession, DropOutcome, DropTarget,
    InputKind, SessionId,
};
pub use effects::{EffectError, Effects, LanguageEffect, StoredPreferences, Theme, ThemeEffect};
pub use error::{GameError, GameResult};
pub use event::{
    DragEvent, DragStart, GestureOutcome, HitTest, InputEvent, NoTargets, TouchEvent, TouchPhase,
    TouchPoint,
};
pub use exec::{execute, Effect, ExecutionResult, Tone};
pub use game::{Chrome, ConsoleLine, GameSnapshot, MiniGame, ZoneView};
pub use ghost::{Ghost, GhostService, GhostSource};
pub use messages::{messages, ui_labels, Messages, UiLabels};
pub use mode::{ModeController, ModeSwitch};
pub use model::{View, ZoneModel};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use sync::{sync_code_to_visual, sync_visual_to_code, SyncReport};
pub use visual::{Donut, DonutKind, InnerKind, InventoryItem, VisualSlot};
pub use zone::{
    Language, Operation, OptionSet, Pair, Piece, PieceKind, ThemeSymbol, ZoneContent, ZoneId,
    ZonePatch,
};

/// Mini-game core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
