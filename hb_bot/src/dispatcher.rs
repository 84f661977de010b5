//! Routes chat commands to the game session and replies through a messenger.

use crate::{
    commands::{Command, ParseError, help_text, parse_command},
    logging::{log_command, log_delivery_failure},
    messenger::{DeliveryError, Messenger},
};
use headbands::{
    Board, GameError, Player,
    session::{SessionError, SessionHandle, SessionResponse},
};
use thiserror::Error;

/// Errors handling a chat line
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Chat-facing front end of one game session.
pub struct Dispatcher<M> {
    session: SessionHandle,
    messenger: M,
    channel: String,
    prefix: String,
}

impl<M: Messenger> Dispatcher<M> {
    pub fn new(
        session: SessionHandle,
        messenger: M,
        channel: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            session,
            messenger,
            channel: channel.into(),
            prefix: prefix.into(),
        }
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Handle one line of chat from `author`.
    ///
    /// Lines without the command prefix are ignored. Game errors are
    /// reported back to the author; only session or delivery failures
    /// are returned as errors.
    pub async fn handle_line(&self, author: &Player, text: &str) -> Result<(), DispatchError> {
        match parse_command(text, &self.prefix) {
            None => Ok(()),
            Some(Ok(command)) => self.handle_command(author, command).await,
            Some(Err(err)) => self.handle_parse_error(author, err).await,
        }
    }

    pub async fn handle_command(
        &self,
        author: &Player,
        command: Command,
    ) -> Result<(), DispatchError> {
        match command {
            Command::Help => self.reply(author, &help_text(&self.prefix)).await,
            Command::Join => self.handle_join(author).await,
            Command::Leave => self.handle_leave(author).await,
            Command::Start => self.handle_start(author).await,
            Command::End => self.handle_end(author).await,
        }
    }

    async fn handle_parse_error(
        &self,
        author: &Player,
        err: ParseError,
    ) -> Result<(), DispatchError> {
        tracing::debug!(author = %author, "ignoring bad command: {}", err);
        self.reply(author, &err.to_string()).await
    }

    async fn handle_join(&self, author: &Player) -> Result<(), DispatchError> {
        let message = match self.session.join(author.clone()).await? {
            SessionResponse::Joined { players } => {
                log_command(&self.channel, author.id(), "join", "player joined");
                format!(
                    "{author} has joined. Current players are: {}",
                    roster(&players)
                )
            }
            SessionResponse::AlreadyJoined { players } => format!(
                "{author} has already joined. Current players are: {}",
                roster(&players)
            ),
            SessionResponse::Rejected(GameError::GameInProgress) => {
                format!("The game has already started. {author} cannot join until it ends.")
            }
            other => unexpected("join", &other),
        };
        self.reply(author, &message).await
    }

    async fn handle_leave(&self, author: &Player) -> Result<(), DispatchError> {
        let message = match self.session.leave(author.clone()).await? {
            SessionResponse::Left { players } => {
                log_command(&self.channel, author.id(), "leave", "player left");
                format!(
                    "{author} has left. Current players are: {}",
                    roster(&players)
                )
            }
            SessionResponse::NotInRoster => "Unable to leave.".to_string(),
            SessionResponse::Rejected(GameError::GameInProgress) => {
                format!("The game has already started. {author} cannot leave until it ends.")
            }
            other => unexpected("leave", &other),
        };
        self.reply(author, &message).await
    }

    async fn handle_start(&self, author: &Player) -> Result<(), DispatchError> {
        let boards = match self.session.start().await? {
            SessionResponse::Started { boards } => boards,
            SessionResponse::Rejected(err) => {
                log_command(&self.channel, author.id(), "start", &err.to_string());
                return self
                    .reply(author, &format!("Cannot start: {err}. Canceling game start."))
                    .await;
            }
            other => return self.reply(author, &unexpected("start", &other)).await,
        };

        // The deal is already committed; a refused DM stops the fan-out
        // but leaves the game running.
        for (player, board) in &boards {
            match self.messenger.direct(player, &render_board(board)).await {
                Ok(()) => tracing::debug!(recipient = %player, "board delivered"),
                Err(DeliveryError::Forbidden(_)) => {
                    log_delivery_failure(player.id(), "direct messages refused");
                    return self
                        .send(&format!(
                            "Unable to send DM to {player}! Canceling game start."
                        ))
                        .await;
                }
                Err(err) => return Err(err.into()),
            }
        }

        log_command(&self.channel, author.id(), "start", "game started");
        self.reply(author, "Game has been started! Check your DMs.")
            .await
    }

    async fn handle_end(&self, author: &Player) -> Result<(), DispatchError> {
        self.session.end().await?;
        log_command(&self.channel, author.id(), "end", "game ended");
        self.send("The game has been ended, and the players have been reset.")
            .await
    }

    async fn reply(&self, to: &Player, text: &str) -> Result<(), DispatchError> {
        Ok(self.messenger.reply(&self.channel, to, text).await?)
    }

    async fn send(&self, text: &str) -> Result<(), DispatchError> {
        Ok(self.messenger.send(&self.channel, text).await?)
    }
}

/// `[alice, bob]`
pub fn roster(players: &[Player]) -> String {
    let names: Vec<&str> = players.iter().map(Player::id).collect();
    format!("[{}]", names.join(", "))
}

/// One line per other player, in deal order.
pub fn render_board(board: &Board) -> String {
    board
        .iter()
        .map(|(player, role)| format!("player {player} has role {role}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unexpected(command: &str, response: &SessionResponse) -> String {
    tracing::error!(command = command, "unexpected session response: {:?}", response);
    response
        .error_message()
        .unwrap_or_else(|| "Something went wrong.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use headbands::{Assignment, RoleToken};

    #[test]
    fn test_roster_format() {
        assert_eq!(roster(&[]), "[]");
        assert_eq!(
            roster(&[Player::new("alice"), Player::new("bob")]),
            "[alice, bob]"
        );
    }

    #[test]
    fn test_render_board() {
        let board: Assignment = [
            (Player::new("bob"), RoleToken::new("Ada Lovelace")),
            (Player::new("carol"), RoleToken::new("Alan Turing")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            render_board(&board),
            "player bob has role Ada Lovelace\nplayer carol has role Alan Turing"
        );
    }
}
