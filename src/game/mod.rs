//! Core Connect Four game logic: the board with gravity and win detection,
//! player seats, and the per-match engine driving turns.

mod board;
mod player;
mod state;

pub use board::{Board, BoardConfig, Cell, COLS, MAX_DIMENSION, ROWS, WIN_LENGTH};
pub use player::Seat;
pub use state::GameEngine;
