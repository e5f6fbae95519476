//! State machine for a territory-capture quiz: players claim grid cells by
//! answering questions, a cell held by someone else needs a streak of correct
//! answers to flip, and a wrong answer locks the player out for a while.
//!
//! Transport and rendering live outside this crate; they drive a
//! [`session::GameSession`] through [`commands::Command`]s and receive
//! feedback through a [`notify::Notifier`].

pub mod clock;
pub mod colors;
pub mod commands;
pub mod config;
pub mod error;
pub mod grid;
pub mod notify;
pub mod player;
pub mod questions;
pub mod session;
pub mod types;
