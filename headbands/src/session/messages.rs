//! Session actor message types.

use crate::game::{Board, GameError, Phase, Player, RoleToken};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;

/// Messages that can be sent to a SessionActor
#[derive(Debug)]
pub enum SessionMessage {
    /// Add a player to the roster
    Join {
        player: Player,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Remove a player from the roster
    Leave {
        player: Player,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Deal roles and return every player's board
    Start {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Reset roster and assignment
    End {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Current roster
    GetPlayers {
        response: oneshot::Sender<Vec<Player>>,
    },

    /// A player's own role
    GetRole {
        player: Player,
        response: oneshot::Sender<Result<RoleToken, GameError>>,
    },

    /// A player's board
    GetBoard {
        player: Player,
        response: oneshot::Sender<Result<Board, GameError>>,
    },

    /// Summary of the session
    GetState {
        response: oneshot::Sender<SessionStateResponse>,
    },

    /// Stop the actor
    Close {
        response: oneshot::Sender<SessionResponse>,
    },
}

/// Response from session operations
#[derive(Debug, Clone, PartialEq)]
pub enum SessionResponse {
    /// Player added; roster after the join
    Joined { players: Vec<Player> },

    /// Player was already in the roster
    AlreadyJoined { players: Vec<Player> },

    /// Player removed; roster after the leave
    Left { players: Vec<Player> },

    /// Leave requested by a player who never joined
    NotInRoster,

    /// Roles dealt, one board per player in roster order
    Started { boards: Vec<(Player, Board)> },

    /// Game reset
    Ended,

    /// Actor shutting down
    Closed,

    /// Operation refused by the game
    Rejected(GameError),
}

/// Session state response
#[derive(Debug, Clone, Serialize)]
pub struct SessionStateResponse {
    /// Session name
    pub name: String,

    /// Current lifecycle phase
    pub phase: Phase,

    /// Players in join order
    pub players: Vec<Player>,

    /// Number of roles in the pool
    pub pool_size: usize,
}

/// Errors talking to a session actor
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is closed")]
    Closed,
}

impl SessionResponse {
    /// Check if response is success
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            SessionResponse::NotInRoster | SessionResponse::Rejected(_)
        )
    }

    /// Get error message if response is error
    pub fn error_message(&self) -> Option<String> {
        match self {
            SessionResponse::NotInRoster => Some("Not in the game".to_string()),
            SessionResponse::Rejected(err) => Some(err.to_string()),
            _ => None,
        }
    }
}
