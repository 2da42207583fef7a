//! A terminal maze game built around a perfect-maze generator and box collision.
//!
//! The game logic is split into pure components that know nothing about the terminal:
//!
//! - [`maze`] carves a perfect maze by randomized depth-first backtracking and derives the wall
//!   geometry the player collides with.
//! - [`collision`] resolves player moves against that geometry and detects the goal.
//! - [`session`] holds the menu/playing state machine, the player, and the score.
//!
//! The [`App`] drives a session from a Ratatui terminal front end.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod cli;
pub mod collision;
pub mod config;
mod events;
pub mod geometry;
pub mod maze;
pub mod session;
mod types;
mod ui;

pub use app::App;
