//! # Connect Four Engine
//!
//! A two-player Connect Four engine. Callers register two players, drop chips
//! into columns, check for a win and pass the turn. The board shape defaults to
//! 6 rows, 7 columns and four in a row, and can be changed through
//! configuration.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, seats, per-match engine
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
