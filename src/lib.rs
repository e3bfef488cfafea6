//! Core legal-play rules for riichi mahjong: tiles, tile multisets, meld
//! shapes, meld acquisition (including the kuikae restriction) and the
//! per-seat turn state machine.
//!
//! This crate deliberately stops at rule bookkeeping. Hand evaluation,
//! scoring and any notion of strategy live elsewhere.

pub mod fuuro;
mod macros;
pub mod mentsu;
pub mod state;
pub mod tile;
pub mod tile_set;

pub use fuuro::{Ankan, Chi, Daiminkan, Fuuro, Kakan, Pon};
pub use mentsu::Mentsu;
pub use state::{Player, ReachState};
pub use tile::{Tile, TileKind};
pub use tile_set::TileSet;
