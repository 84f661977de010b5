//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the RUST_LOG env var. Records emitted
/// through the `log` facade by the game library are forwarded as well.
///
/// # Example
///
/// ```no_run
/// use hb_bot::logging;
///
/// logging::init();
/// tracing::info!("Bot starting");
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so they don't interleave with console chat output
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a chat command with structured data
///
/// # Arguments
///
/// * `channel` - Channel the command arrived in
/// * `author` - User who sent it
/// * `command` - Command name
/// * `outcome` - Short description of the result
pub fn log_command(channel: &str, author: &str, command: &str, outcome: &str) {
    tracing::info!(
        channel = channel,
        author = author,
        command = command,
        "{}",
        outcome
    );
}

/// Log a failed direct message
pub fn log_delivery_failure(recipient: &str, reason: &str) {
    tracing::warn!(
        recipient = recipient,
        reason = reason,
        "DELIVERY: direct message refused"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_command() {
        // Just ensure it doesn't panic
        log_command("general", "alice", "join", "alice joined");
    }

    #[test]
    fn test_log_delivery_failure() {
        log_delivery_failure("bob", "DMs disabled");
    }
}
