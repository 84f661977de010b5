//! Integration tests for the chat command surface.
//!
//! Drives a real session actor through the dispatcher and records every
//! message the bot tries to send.

use async_trait::async_trait;
use hb_bot::{
    dispatcher::Dispatcher,
    messenger::{DeliveryError, Messenger},
};
use headbands::{Game, Player, RoleDealer, RoleToken, SessionActor, SessionConfig};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Sent {
    Channel(String),
    Reply(Player, String),
    Direct(Player, String),
}

/// Messenger that records traffic and refuses DMs to blocked users
#[derive(Default)]
struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    blocked: HashSet<Player>,
}

impl RecordingMessenger {
    fn blocking(players: &[&str]) -> Self {
        Self {
            blocked: players.iter().copied().map(Player::new).collect(),
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn last(&self) -> Sent {
        self.sent().last().cloned().expect("nothing was sent")
    }

    fn directs(&self) -> Vec<(Player, String)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Direct(p, text) => Some((p, text)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, _channel: &str, text: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(Sent::Channel(text.to_string()));
        Ok(())
    }

    async fn reply(&self, _channel: &str, to: &Player, text: &str) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Reply(to.clone(), text.to_string()));
        Ok(())
    }

    async fn direct(&self, to: &Player, text: &str) -> Result<(), DeliveryError> {
        if self.blocked.contains(to) {
            return Err(DeliveryError::Forbidden(to.clone()));
        }
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Direct(to.clone(), text.to_string()));
        Ok(())
    }
}

fn dispatcher(roles: &[&str], messenger: RecordingMessenger) -> Dispatcher<RecordingMessenger> {
    let game = Game::with_dealer(
        roles.iter().copied().map(RoleToken::new).collect(),
        RoleDealer::seeded(3),
    );
    let session = SessionActor::spawn(SessionConfig::default(), game);
    Dispatcher::new(session, messenger, "general", "!")
}

async fn say(dispatcher: &Dispatcher<RecordingMessenger>, who: &str, text: &str) {
    dispatcher
        .handle_line(&Player::new(who), text)
        .await
        .expect("dispatch failed");
}

fn reply(to: &str, text: &str) -> Sent {
    Sent::Reply(Player::new(to), text.to_string())
}

#[tokio::test]
async fn test_join_and_leave_replies() {
    let bot = dispatcher(&["A", "B", "C"], RecordingMessenger::default());

    say(&bot, "alice", "!join").await;
    assert_eq!(
        bot.messenger().last(),
        reply("alice", "alice has joined. Current players are: [alice]")
    );

    say(&bot, "bob", "!join").await;
    assert_eq!(
        bot.messenger().last(),
        reply("bob", "bob has joined. Current players are: [alice, bob]")
    );

    say(&bot, "alice", "!join").await;
    assert_eq!(
        bot.messenger().last(),
        reply("alice", "alice has already joined. Current players are: [alice, bob]")
    );

    say(&bot, "alice", "!leave").await;
    assert_eq!(
        bot.messenger().last(),
        reply("alice", "alice has left. Current players are: [bob]")
    );

    say(&bot, "carol", "!leave").await;
    assert_eq!(bot.messenger().last(), reply("carol", "Unable to leave."));
}

#[tokio::test]
async fn test_plain_chat_is_ignored() {
    let bot = dispatcher(&["A", "B"], RecordingMessenger::default());

    say(&bot, "alice", "is it my turn?").await;

    assert!(bot.messenger().sent().is_empty());
}

#[tokio::test]
async fn test_unknown_command_gets_hint() {
    let bot = dispatcher(&["A", "B"], RecordingMessenger::default());

    say(&bot, "alice", "!deal").await;

    let Sent::Reply(to, text) = bot.messenger().last() else {
        panic!("expected a reply");
    };
    assert_eq!(to, Player::new("alice"));
    assert!(text.contains("'deal'"));
}

#[tokio::test]
async fn test_help_lists_commands() {
    let bot = dispatcher(&["A", "B"], RecordingMessenger::default());

    say(&bot, "alice", "!help").await;

    let Sent::Reply(_, text) = bot.messenger().last() else {
        panic!("expected a reply");
    };
    for command in ["!join", "!leave", "!start", "!end"] {
        assert!(text.contains(command), "help should mention {command}");
    }
}

#[tokio::test]
async fn test_start_with_one_player() {
    let bot = dispatcher(&["A", "B"], RecordingMessenger::default());
    say(&bot, "alice", "!join").await;

    say(&bot, "alice", "!start").await;

    assert_eq!(
        bot.messenger().last(),
        reply(
            "alice",
            "Cannot start: need 2+ players, have 1. Canceling game start."
        )
    );
    assert!(bot.messenger().directs().is_empty());
}

#[tokio::test]
async fn test_start_with_too_few_roles() {
    let bot = dispatcher(&["A", "B"], RecordingMessenger::default());
    for who in ["alice", "bob", "carol"] {
        say(&bot, who, "!join").await;
    }

    say(&bot, "carol", "!start").await;

    assert_eq!(
        bot.messenger().last(),
        reply(
            "carol",
            "Cannot start: not enough roles for 3 players, pool has 2. Canceling game start."
        )
    );
}

#[tokio::test]
async fn test_start_sends_boards() {
    let bot = dispatcher(&["A", "B", "C", "D"], RecordingMessenger::default());
    for who in ["alice", "bob", "carol"] {
        say(&bot, who, "!join").await;
    }

    say(&bot, "bob", "!start").await;

    let directs = bot.messenger().directs();
    let recipients: Vec<_> = directs.iter().map(|(p, _)| p.id()).collect();
    assert_eq!(recipients, vec!["alice", "bob", "carol"]);

    for (player, text) in &directs {
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(
            lines.iter().all(|l| !l.starts_with(&format!("player {player} "))),
            "{player} must not see their own role"
        );
    }

    // Everyone except alice sees the same role for alice
    let alice_lines: HashSet<_> = directs
        .iter()
        .flat_map(|(_, text)| text.lines())
        .filter(|l| l.starts_with("player alice "))
        .collect();
    assert_eq!(alice_lines.len(), 1);

    assert_eq!(
        bot.messenger().last(),
        reply("bob", "Game has been started! Check your DMs.")
    );
}

#[tokio::test]
async fn test_refused_dm_stops_fan_out() {
    let bot = dispatcher(&["A", "B", "C"], RecordingMessenger::blocking(&["bob"]));
    for who in ["alice", "bob", "carol"] {
        say(&bot, who, "!join").await;
    }

    say(&bot, "alice", "!start").await;

    let directs = bot.messenger().directs();
    assert_eq!(directs.len(), 1);
    assert_eq!(directs[0].0, Player::new("alice"));
    assert_eq!(
        bot.messenger().last(),
        Sent::Channel("Unable to send DM to bob! Canceling game start.".to_string())
    );

    // The deal stays committed
    say(&bot, "dave", "!join").await;
    assert_eq!(
        bot.messenger().last(),
        reply(
            "dave",
            "The game has already started. dave cannot join until it ends."
        )
    );
}

#[tokio::test]
async fn test_end_resets_roster() {
    let bot = dispatcher(&["A", "B"], RecordingMessenger::default());
    for who in ["alice", "bob"] {
        say(&bot, who, "!join").await;
    }
    say(&bot, "alice", "!start").await;

    say(&bot, "bob", "!leave").await;
    assert_eq!(
        bot.messenger().last(),
        reply(
            "bob",
            "The game has already started. bob cannot leave until it ends."
        )
    );

    say(&bot, "alice", "!end").await;
    assert_eq!(
        bot.messenger().last(),
        Sent::Channel("The game has been ended, and the players have been reset.".to_string())
    );

    say(&bot, "carol", "!join").await;
    assert_eq!(
        bot.messenger().last(),
        reply("carol", "carol has joined. Current players are: [carol]")
    );
}
