//! # Connect Four
//!
//! Two players take turns dropping pieces into a 6 × 7 grid; the first to
//! line up four horizontally, vertically or diagonally wins. The game can be
//! played at a console prompt, in a terminal UI, or in a browser through a
//! small HTTP server sharing one game between all visitors.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, state machine
//! - [`session`] — The single game shared by the HTTP server
//! - [`console`] — Prompt-and-print game loop
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`server`] — HTTP front end: page, form posts, static files
//! - [`input`] — Parsing column numbers typed or posted by players
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod input;
pub mod server;
pub mod session;
pub mod ui;
