//! # Headbands
//!
//! Coordinator for a secret-identity party game: players join a roster,
//! someone starts the game, every player is dealt a role from a shared
//! pool, and each player gets to see everyone's role except their own.
//!
//! ## Core Modules
//!
//! - [`game`]: Player/role tokens, the role dealer, and the game state machine
//! - [`session`]: Async actor that owns a game and serializes access to it
//!
//! ## Example
//!
//! ```
//! use headbands::{Game, Player, RoleToken};
//!
//! let mut game = Game::new(vec![RoleToken::new("A"), RoleToken::new("B")]);
//! game.add_player(Player::new("p1"));
//! game.add_player(Player::new("p2"));
//! game.start().unwrap();
//!
//! let board = game.get_board(&Player::new("p1")).unwrap();
//! assert_eq!(board.len(), 1);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{Assignment, Board, Game, GameError, MIN_PLAYERS, Phase, Player, RoleDealer, RoleToken};

/// Actor wrapper giving one game a message-driven, serialized interface.
pub mod session;
pub use session::{SessionActor, SessionConfig, SessionHandle, SessionResponse};
