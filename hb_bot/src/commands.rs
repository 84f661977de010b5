use std::fmt;

/// Rules shown by the help command.
pub const HELP_TEXT: &str = "\
- Join the game using {p}join.
- To leave, use {p}leave.
- Once everyone's ready, anyone can start the game with {p}start.
- The game master can end the game with {p}end.
- Each player takes turns trying to determine their role by asking yes or no questions to the other players.
- If it is not your turn, you must answer and can only do so with \"yes\" or \"no\". You cannot lie.
- The winner is whomever has the most fun.
**Important notes**
- You will need to allow DMs from the bot so it can tell you everyone else's role.
- After the game starts, no new players can join without resetting the game.
- Role assignments cannot change once the game has started.
- All role information should be kept private until revealed through gameplay with the exception of jokes that are *very* funny.";

/// Render the help text for a command prefix.
pub fn help_text(prefix: &str) -> String {
    HELP_TEXT.replace("{p}", prefix)
}

/// Chat commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Join,
    Leave,
    Start,
    End,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Help => "help",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Start => "start",
            Self::End => "end",
        };
        write!(f, "{repr}")
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Prefix followed by nothing.
    EmptyCommand,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "Missing command. Use 'help' to see available commands"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Use 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a chat line into a Command.
///
/// # Arguments
///
/// * `input` - The raw chat line
/// * `prefix` - Prefix that marks a command (e.g. `!`)
///
/// # Returns
///
/// * `None` - The line is ordinary chat, not addressed to the bot
/// * `Some(Ok(Command))` - Successfully parsed command
/// * `Some(Err(ParseError))` - Prefixed but not understood
///
/// # Examples
///
/// ```
/// use hb_bot::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("!join", "!"), Some(Ok(Command::Join)));
/// assert_eq!(parse_command("  !START ", "!"), Some(Ok(Command::Start)));
/// assert_eq!(parse_command("hello there", "!"), None);
/// ```
pub fn parse_command(input: &str, prefix: &str) -> Option<Result<Command, ParseError>> {
    let rest = input.trim().strip_prefix(prefix)?;

    // Extra words after the command are ignored
    let Some(name) = rest.split_ascii_whitespace().next() else {
        return Some(Err(ParseError::EmptyCommand));
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "help" => Ok(Command::Help),
        "join" => Ok(Command::Join),
        "leave" => Ok(Command::Leave),
        "start" => Ok(Command::Start),
        "end" => Ok(Command::End),
        _ => Err(ParseError::UnrecognizedCommand(name.to_string())),
    };
    Some(command)
}
