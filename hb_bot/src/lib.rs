//! Chat front end for the headbands game.
//!
//! This crate provides:
//! - Command parsing for the `join`/`leave`/`start`/`end`/`help` surface
//! - A [`messenger::Messenger`] trait for channel replies and direct messages
//! - The [`dispatcher::Dispatcher`] wiring commands to a game session
//! - Configuration and logging setup for the `hb_bot` binary

pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod logging;
pub mod messenger;
