//! Session actor owning a single game.

use super::{
    config::SessionConfig,
    messages::{SessionError, SessionMessage, SessionResponse, SessionStateResponse},
};
use crate::game::{Board, Game, GameError, Player, RoleToken};
use tokio::sync::{mpsc, oneshot};

/// Session actor handle for sending messages
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    /// Create a new session handle
    pub fn new(sender: mpsc::Sender<SessionMessage>) -> Self {
        Self { sender }
    }

    /// Send a message to the session
    pub async fn send(&self, message: SessionMessage) -> Result<(), SessionError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> Result<T, SessionError> {
        let (response, receiver) = oneshot::channel();
        self.send(build(response)).await?;
        receiver.await.map_err(|_| SessionError::Closed)
    }

    pub async fn join(&self, player: Player) -> Result<SessionResponse, SessionError> {
        self.request(|response| SessionMessage::Join { player, response })
            .await
    }

    pub async fn leave(&self, player: Player) -> Result<SessionResponse, SessionError> {
        self.request(|response| SessionMessage::Leave { player, response })
            .await
    }

    pub async fn start(&self) -> Result<SessionResponse, SessionError> {
        self.request(|response| SessionMessage::Start { response })
            .await
    }

    pub async fn end(&self) -> Result<SessionResponse, SessionError> {
        self.request(|response| SessionMessage::End { response })
            .await
    }

    pub async fn players(&self) -> Result<Vec<Player>, SessionError> {
        self.request(|response| SessionMessage::GetPlayers { response })
            .await
    }

    pub async fn role(
        &self,
        player: Player,
    ) -> Result<Result<RoleToken, GameError>, SessionError> {
        self.request(|response| SessionMessage::GetRole { player, response })
            .await
    }

    pub async fn board(&self, player: Player) -> Result<Result<Board, GameError>, SessionError> {
        self.request(|response| SessionMessage::GetBoard { player, response })
            .await
    }

    pub async fn state(&self) -> Result<SessionStateResponse, SessionError> {
        self.request(|response| SessionMessage::GetState { response })
            .await
    }

    pub async fn close(&self) -> Result<SessionResponse, SessionError> {
        self.request(|response| SessionMessage::Close { response })
            .await
    }
}

/// Session actor serializing every operation on one game
pub struct SessionActor {
    /// Session configuration
    config: SessionConfig,

    /// Game state
    game: Game,

    /// Message inbox
    inbox: mpsc::Receiver<SessionMessage>,

    /// Is session closed
    is_closed: bool,
}

impl SessionActor {
    /// Create a new session actor
    ///
    /// # Arguments
    ///
    /// * `config` - Session configuration
    /// * `game` - Game the actor takes ownership of
    ///
    /// # Returns
    ///
    /// * `(SessionActor, SessionHandle)` - Actor and handle for sending messages
    pub fn new(config: SessionConfig, game: Game) -> (Self, SessionHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));

        let actor = Self {
            config,
            game,
            inbox,
            is_closed: false,
        };

        (actor, SessionHandle::new(sender))
    }

    /// Spawn the actor on the current runtime and return its handle
    pub fn spawn(config: SessionConfig, game: Game) -> SessionHandle {
        let (actor, handle) = Self::new(config, game);
        tokio::spawn(actor.run());
        handle
    }

    /// Run the session actor event loop
    ///
    /// Exits on `Close` or once every handle has been dropped.
    pub async fn run(mut self) {
        log::info!(
            "Session '{}' starting with {} roles",
            self.config.name,
            self.game.role_pool().len()
        );

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!("Session '{}' closed", self.config.name);
    }

    /// Handle a session message
    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Join { player, response } => {
                let _ = response.send(self.handle_join(player));
            }

            SessionMessage::Leave { player, response } => {
                let _ = response.send(self.handle_leave(&player));
            }

            SessionMessage::Start { response } => {
                let _ = response.send(self.handle_start());
            }

            SessionMessage::End { response } => {
                self.game.end();
                log::info!("Session '{}': game ended", self.config.name);
                let _ = response.send(SessionResponse::Ended);
            }

            SessionMessage::GetPlayers { response } => {
                let _ = response.send(self.game.get_players());
            }

            SessionMessage::GetRole { player, response } => {
                let _ = response.send(self.game.get_role(&player).cloned());
            }

            SessionMessage::GetBoard { player, response } => {
                let _ = response.send(self.game.get_board(&player));
            }

            SessionMessage::GetState { response } => {
                let _ = response.send(self.get_state());
            }

            SessionMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(SessionResponse::Closed);
            }
        }
    }

    /// Handle join request
    fn handle_join(&mut self, player: Player) -> SessionResponse {
        let joined = if self.config.lock_roster_after_start {
            match self.game.join(player.clone()) {
                Ok(is_new) => is_new,
                Err(e) => {
                    log::debug!("Session '{}': {} cannot join: {}", self.config.name, player, e);
                    return SessionResponse::Rejected(e);
                }
            }
        } else {
            let is_new = !self.game.get_players().contains(&player);
            self.game.add_player(player.clone());
            is_new
        };

        let players = self.game.get_players();
        if joined {
            log::info!("Session '{}': {} joined", self.config.name, player);
            SessionResponse::Joined { players }
        } else {
            SessionResponse::AlreadyJoined { players }
        }
    }

    /// Handle leave request
    fn handle_leave(&mut self, player: &Player) -> SessionResponse {
        let removed = if self.config.lock_roster_after_start {
            match self.game.leave(player) {
                Ok(removed) => removed,
                Err(e) => return SessionResponse::Rejected(e),
            }
        } else {
            self.game.remove_player(player)
        };

        if removed {
            log::info!("Session '{}': {} left", self.config.name, player);
            SessionResponse::Left {
                players: self.game.get_players(),
            }
        } else {
            SessionResponse::NotInRoster
        }
    }

    /// Handle start request
    fn handle_start(&mut self) -> SessionResponse {
        match self.game.deal() {
            Ok(boards) => {
                log::info!(
                    "Session '{}': game started with {} players",
                    self.config.name,
                    boards.len()
                );
                SessionResponse::Started { boards }
            }
            Err(e) => {
                log::warn!("Session '{}': start refused: {}", self.config.name, e);
                SessionResponse::Rejected(e)
            }
        }
    }

    fn get_state(&self) -> SessionStateResponse {
        SessionStateResponse {
            name: self.config.name.clone(),
            phase: self.game.phase(),
            players: self.game.get_players(),
            pool_size: self.game.role_pool().len(),
        }
    }
}
