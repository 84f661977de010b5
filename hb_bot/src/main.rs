//! Secret-identity party game bot with a console transport.
//!
//! Reads chat lines from stdin as `<user>: <message>` and prints channel
//! replies and direct messages to stdout.

use std::path::PathBuf;

use anyhow::Error;
use ctrlc::set_handler;
use hb_bot::{
    config::{BotConfig, Overrides},
    dispatcher::Dispatcher,
    logging,
    messenger::ConsoleMessenger,
};
use headbands::{Game, Player, SessionActor};
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

const HELP: &str = "\
Run a secret-identity party game bot on the console

USAGE:
  hb_bot [OPTIONS]

OPTIONS:
  --roles-file PATH        File with one role per line  [default: env HB_ROLES_FILE]
  --prefix     PREFIX      Command prefix               [default: env HB_COMMAND_PREFIX or !]
  --channel    NAME        Channel name                 [default: env HB_CHANNEL or general]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  HB_ROLE_POOL             Comma-separated roles (used when no roles file is given)
  HB_LOCK_ROSTER           Reject join/leave while a game runs  [default: true]
  HB_DM_BLOCKLIST          Comma-separated users that refuse direct messages
  RUST_LOG                 Log filter  [default: info]

INPUT:
  One chat line per stdin line, formatted as `<user>: <message>`.
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        roles_file: pargs.opt_value_from_str::<_, PathBuf>("--roles-file")?,
        command_prefix: pargs.opt_value_from_str("--prefix")?,
        channel: pargs.opt_value_from_str("--channel")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = BotConfig::from_env(overrides)?;
    config.validate()?;
    info!(
        "Starting bot in #{} with {} roles",
        config.channel,
        config.role_pool.len()
    );

    let game = Game::new(config.role_pool.clone());
    let session = SessionActor::spawn(config.session.clone(), game);
    let messenger = ConsoleMessenger::stdout(config.dm_blocklist.clone());
    let dispatcher = Dispatcher::new(
        session.clone(),
        messenger,
        config.channel.clone(),
        config.command_prefix.clone(),
    );

    info!("Game initialized. Type `<user>: {}help` to begin.", config.command_prefix);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some((author, text)) = split_chat_line(&line) else {
            if !line.trim().is_empty() {
                warn!("Ignoring line without an author: {line}");
            }
            continue;
        };

        if let Err(e) = dispatcher.handle_line(&author, text).await {
            error!("Failed to handle command from {author}: {e}");
        }
    }

    info!("Input closed, shutting down...");
    let _ = session.close().await;

    Ok(())
}

/// Split `alice: !join` into the author and the message.
fn split_chat_line(line: &str) -> Option<(Player, &str)> {
    let (author, text) = line.split_once(':')?;
    let author = author.trim();
    if author.is_empty() {
        return None;
    }
    Some((Player::new(author), text.trim()))
}
