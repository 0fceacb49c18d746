//! Flappy Bird on the classic 360x640 board, drawn in the terminal.
//!
//! The game logic ([`game`]) knows nothing about terminals: it advances in
//! fixed ticks and is drawn by [`render`] into a half-block pixel buffer.

pub mod app;
pub mod assets;
pub mod audio;
pub mod cli;
pub mod config;
pub mod font;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;

pub use config::Config;
pub use game::{Game, Phase, Press, TickReport};
