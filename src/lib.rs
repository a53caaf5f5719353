//! Simulation core for a snake game with power-ups, coin-triggered bonus
//! rounds, and a persistent high-score table.
//!
//! The library knows nothing about terminals, pixels, or audio.  A front end
//! drives a [`GameSession`] by feeding it [`Command`]s and calling
//! [`GameSession::tick()`] at the rate given by the returned [`Pacing`], then
//! draws whatever the [`Snapshot`] describes.
pub mod consts;
pub mod game;
pub mod highscores;

pub use crate::game::{
    Cell, Command, Direction, GameEvent, GameOverReason, GameSession, Pacing, Phase, PowerUpKind,
    Snapshot,
};
pub use crate::highscores::{ScoreRecord, ScoreStore};
