//! Game state machine: roster, role pool, assignment, and lifecycle.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::dealer::RoleDealer;
use super::entities::{Assignment, Board, Player, RoleToken};

/// Fewest players a game can be started with.
pub const MIN_PLAYERS: usize = 2;

/// Errors that can occur during game operations
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("need 2+ players, have {players}")]
    InsufficientPlayers { players: usize },
    #[error("not enough roles for {players} players, pool has {roles}")]
    InsufficientRoles { players: usize, roles: usize },
    #[error("{0} has no assigned role")]
    PlayerNotAssigned(Player),
    #[error("game already in progress")]
    GameInProgress,
}

/// Lifecycle phase of a game.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Phase {
    /// Players may join and leave. Initial phase, and the phase after `end`.
    #[default]
    Joining,
    /// Roles have been dealt.
    Started,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Joining => "joining",
            Self::Started => "started",
        };
        write!(f, "{repr}")
    }
}

/// A secret-identity game.
///
/// The role pool is fixed at construction and never mutated; every deal
/// shuffles a copy of it. Operations are synchronous and in-memory, so
/// callers sharing a game between tasks must serialize access (see
/// [`crate::session`]).
#[derive(Debug)]
pub struct Game {
    role_pool: Vec<RoleToken>,
    roster: Vec<Player>,
    /// Only populated by a successful start. Entries for players removed
    /// after start are kept until the next deal overwrites or `end` clears them.
    assignment: Assignment,
    phase: Phase,
    dealer: RoleDealer,
}

impl Game {
    #[must_use]
    pub fn new(role_pool: Vec<RoleToken>) -> Self {
        Self::with_dealer(role_pool, RoleDealer::new())
    }

    #[must_use]
    pub fn with_dealer(role_pool: Vec<RoleToken>, dealer: RoleDealer) -> Self {
        Self {
            role_pool,
            roster: Vec::new(),
            assignment: Assignment::new(),
            phase: Phase::Joining,
            dealer,
        }
    }

    /// Add a player to the roster. Adding a player that is already in the
    /// roster changes nothing. Always succeeds.
    pub fn add_player(&mut self, player: Player) -> bool {
        if !self.roster.contains(&player) {
            debug!("adding {player} to roster");
            self.roster.push(player);
        }
        true
    }

    /// Remove a player from the roster, returning whether they were in it.
    ///
    /// Any role already dealt to the player stays in the assignment.
    pub fn remove_player(&mut self, player: &Player) -> bool {
        match self.roster.iter().position(|p| p == player) {
            Some(idx) => {
                debug!("removing {player} from roster");
                self.roster.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Phase-guarded add. Returns whether the player was newly added.
    pub fn join(&mut self, player: Player) -> Result<bool, GameError> {
        if self.is_started() {
            return Err(GameError::GameInProgress);
        }
        let is_new = !self.roster.contains(&player);
        self.add_player(player);
        Ok(is_new)
    }

    /// Phase-guarded remove.
    pub fn leave(&mut self, player: &Player) -> Result<bool, GameError> {
        if self.is_started() {
            return Err(GameError::GameInProgress);
        }
        Ok(self.remove_player(player))
    }

    /// Snapshot of the roster in join order.
    #[must_use]
    pub fn get_players(&self) -> Vec<Player> {
        self.roster.clone()
    }

    /// Deal roles to everyone in the roster.
    ///
    /// The randomness comes from shuffling the pool; `roster[i]` receives
    /// the `i`th drawn role. Nothing is touched when the pool is too small.
    pub fn assign_roles(&mut self) -> Result<(), GameError> {
        let players = self.roster.len();
        let roles = self.role_pool.len();
        if players > roles {
            return Err(GameError::InsufficientRoles { players, roles });
        }

        let drawn = self.dealer.draw(&self.role_pool, players);
        for (player, role) in self.roster.iter().zip(drawn) {
            self.assignment.insert(player.clone(), role);
        }
        Ok(())
    }

    pub fn get_role(&self, player: &Player) -> Result<&RoleToken, GameError> {
        self.assignment
            .get(player)
            .ok_or_else(|| GameError::PlayerNotAssigned(player.clone()))
    }

    /// Everyone's role except `player`'s own.
    pub fn get_board(&self, player: &Player) -> Result<Board, GameError> {
        if !self.assignment.contains(player) {
            return Err(GameError::PlayerNotAssigned(player.clone()));
        }
        Ok(self.assignment.without(player))
    }

    /// Start (or restart) the game, dealing a fresh set of roles.
    pub fn start(&mut self) -> Result<(), GameError> {
        let players = self.roster.len();
        if players < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers { players });
        }
        self.assign_roles()?;
        self.phase = Phase::Started;
        info!("dealt {players} roles from a pool of {}", self.role_pool.len());
        Ok(())
    }

    /// Start the game and collect every player's board from the same deal.
    pub fn deal(&mut self) -> Result<Vec<(Player, Board)>, GameError> {
        self.start()?;
        self.roster
            .iter()
            .map(|player| Ok((player.clone(), self.get_board(player)?)))
            .collect()
    }

    /// Clear the roster and assignment. Safe to call at any time.
    pub fn end(&mut self) {
        self.roster.clear();
        self.assignment.clear();
        self.phase = Phase::Joining;
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase == Phase::Started
    }

    #[must_use]
    pub fn role_pool(&self) -> &[RoleToken] {
        &self.role_pool
    }

    #[must_use]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }
}
