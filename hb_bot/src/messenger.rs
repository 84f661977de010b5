//! Message delivery boundary between the bot and a chat platform.

use async_trait::async_trait;
use headbands::Player;
use std::collections::HashSet;
use thiserror::Error;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::Mutex,
};

/// Errors delivering a message
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The recipient does not accept direct messages
    #[error("{0} does not accept direct messages")]
    Forbidden(Player),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound side of a chat platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post a message in a channel
    async fn send(&self, channel: &str, text: &str) -> Result<(), DeliveryError>;

    /// Reply to a user in a channel
    async fn reply(&self, channel: &str, to: &Player, text: &str) -> Result<(), DeliveryError>;

    /// Send a private message to a user
    async fn direct(&self, to: &Player, text: &str) -> Result<(), DeliveryError>;
}

/// Writes chat traffic as plain lines to an async writer (stdout by default).
pub struct ConsoleMessenger<W> {
    out: Mutex<W>,
    dm_blocklist: HashSet<Player>,
}

impl ConsoleMessenger<tokio::io::Stdout> {
    pub fn stdout(dm_blocklist: impl IntoIterator<Item = Player>) -> Self {
        Self::new(tokio::io::stdout(), dm_blocklist)
    }
}

impl<W> ConsoleMessenger<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(out: W, dm_blocklist: impl IntoIterator<Item = Player>) -> Self {
        Self {
            out: Mutex::new(out),
            dm_blocklist: dm_blocklist.into_iter().collect(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    async fn write_line(&self, header: &str, text: &str) -> Result<(), DeliveryError> {
        let mut out = self.out.lock().await;
        for line in text.lines() {
            out.write_all(format!("{header} {line}\n").as_bytes())
                .await?;
        }
        out.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<W> Messenger for ConsoleMessenger<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, channel: &str, text: &str) -> Result<(), DeliveryError> {
        self.write_line(&format!("[#{channel}]"), text).await
    }

    async fn reply(&self, channel: &str, to: &Player, text: &str) -> Result<(), DeliveryError> {
        self.write_line(&format!("[#{channel}] @{to}"), text).await
    }

    async fn direct(&self, to: &Player, text: &str) -> Result<(), DeliveryError> {
        if self.dm_blocklist.contains(to) {
            return Err(DeliveryError::Forbidden(to.clone()));
        }
        self.write_line(&format!("[dm -> {to}]"), text).await
    }
}
