//! Secret-identity game engine.
//!
//! This module provides:
//! - Opaque player and role tokens
//! - The role dealer (pool shuffle, draw without replacement)
//! - The game state machine gating join/leave/start/end

pub mod dealer;
pub mod entities;
pub mod state_machine;

pub use dealer::RoleDealer;
pub use entities::{Assignment, Board, Player, RoleToken};
pub use state_machine::{Game, GameError, MIN_PLAYERS, Phase};
