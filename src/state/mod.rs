pub mod player;

pub use player::{KYOTAKU_POINT, Player, ReachState};
