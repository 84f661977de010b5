//! Session module: one game owned by an async actor.
//!
//! A [`SessionActor`] runs in its own Tokio task with an mpsc inbox and
//! handles one message at a time, so join/leave/start/end never
//! interleave. Callers hold a cloneable [`SessionHandle`] instead of
//! sharing the game directly.
//!
//! ## Example
//!
//! ```
//! use headbands::game::{Game, Player, RoleToken};
//! use headbands::session::{SessionActor, SessionConfig, SessionResponse};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let game = Game::new(vec![RoleToken::new("Ada"), RoleToken::new("Grace")]);
//! let handle = SessionActor::spawn(SessionConfig::default(), game);
//!
//! handle.join(Player::new("alice")).await.unwrap();
//! handle.join(Player::new("bob")).await.unwrap();
//! let response = handle.start().await.unwrap();
//! assert!(matches!(response, SessionResponse::Started { .. }));
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{SessionActor, SessionHandle};
pub use config::SessionConfig;
pub use messages::{SessionError, SessionMessage, SessionResponse, SessionStateResponse};
