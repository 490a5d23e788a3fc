use tracing::debug;

use super::{Board, BoardConfig, Seat};
use crate::error::{ConfigError, GameError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Roster<P> {
    player1: P,
    player2: P,
    current: Seat,
}

impl<P> Roster<P> {
    fn current_player(&self) -> &P {
        match self.current {
            Seat::Player1 => &self.player1,
            Seat::Player2 => &self.player2,
        }
    }
}

/// One match: the board, the two players, whose turn it is, and how many
/// chips have been placed.
///
/// `P` is whatever the caller uses to identify a player; the engine only ever
/// compares identities for equality. Each match owns its own engine, so
/// separate matches never share state.
///
/// Turns follow a place / check / advance protocol:
///
/// ```
/// use connect_four_engine::game::GameEngine;
///
/// let mut engine = GameEngine::new();
/// engine.register_players("alice", "bob").unwrap();
///
/// engine.place_chip(3).unwrap();
/// if !engine.check_win().unwrap() {
///     engine.set_next_player().unwrap();
/// }
/// assert_eq!(engine.current_player(), Ok(&"bob"));
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine<P> {
    board: Board,
    roster: Option<Roster<P>>,
    round_count: usize,
}

impl<P: Eq> GameEngine<P> {
    /// Create an engine for the classic 6x7 board with no players yet
    pub fn new() -> Self {
        GameEngine {
            board: Board::new(),
            roster: None,
            round_count: 0,
        }
    }

    /// Create an engine with a custom board shape
    pub fn with_config(config: BoardConfig) -> Result<Self, ConfigError> {
        Ok(GameEngine {
            board: Board::with_config(config)?,
            roster: None,
            round_count: 0,
        })
    }

    /// Start a fresh match between two players. `player1` moves first.
    ///
    /// Any game in progress is discarded, unless the identities are equal, in
    /// which case nothing changes and [`GameError::DuplicatePlayer`] is returned.
    pub fn register_players(&mut self, player1: P, player2: P) -> Result<(), GameError> {
        if player1 == player2 {
            return Err(GameError::DuplicatePlayer);
        }

        self.board = self.board.cleared();
        self.round_count = 0;
        self.roster = Some(Roster {
            player1,
            player2,
            current: Seat::Player1,
        });
        debug!("players registered, new match started");
        Ok(())
    }

    /// Clear the board for a rematch between the same players. Player 1 starts.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let roster = self.roster.as_mut().ok_or(GameError::NotInitialized)?;
        roster.current = Seat::Player1;
        self.board = self.board.cleared();
        self.round_count = 0;
        debug!("board reset");
        Ok(())
    }

    /// Drop a chip for the current player into `column`, returning the row it
    /// landed in.
    ///
    /// Does not advance the turn; call [`check_win`](Self::check_win) and then
    /// [`set_next_player`](Self::set_next_player). On error the board and the
    /// round count are unchanged.
    pub fn place_chip(&mut self, column: usize) -> Result<usize, GameError> {
        let seat = self.current_seat()?;
        let row = self.board.drop_piece(column, seat.to_cell())?;
        self.round_count += 1;
        debug!(
            seat = seat.name(),
            row,
            column,
            round = self.round_count,
            "chip placed"
        );
        Ok(row)
    }

    /// Hand the turn to the other player.
    pub fn set_next_player(&mut self) -> Result<(), GameError> {
        let roster = self.roster.as_mut().ok_or(GameError::NotInitialized)?;
        roster.current = roster.current.other();
        debug!(seat = roster.current.name(), "turn passed");
        Ok(())
    }

    /// Whether the board holds a winning run anywhere.
    ///
    /// Call after [`place_chip`](Self::place_chip) and before
    /// [`set_next_player`](Self::set_next_player): the winner is then the
    /// current player.
    pub fn check_win(&self) -> Result<bool, GameError> {
        if self.roster.is_none() {
            return Err(GameError::NotInitialized);
        }
        Ok(self.board.has_winning_run())
    }

    pub fn current_player(&self) -> Result<&P, GameError> {
        self.roster
            .as_ref()
            .map(Roster::current_player)
            .ok_or(GameError::NotInitialized)
    }

    pub fn current_seat(&self) -> Result<Seat, GameError> {
        self.roster
            .as_ref()
            .map(|r| r.current)
            .ok_or(GameError::NotInitialized)
    }

    /// The registered players, in seat order
    pub fn players(&self) -> Result<(&P, &P), GameError> {
        self.roster
            .as_ref()
            .map(|r| (&r.player1, &r.player2))
            .ok_or(GameError::NotInitialized)
    }

    /// Which seat `player` occupies, if they are registered in this match
    pub fn seat_of(&self, player: &P) -> Option<Seat> {
        let roster = self.roster.as_ref()?;
        if *player == roster.player1 {
            Some(Seat::Player1)
        } else if *player == roster.player2 {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.roster.is_some()
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> BoardConfig {
        self.board.config()
    }

    /// Number of chips placed since the match started
    pub fn round_count(&self) -> usize {
        self.round_count
    }

    /// No column can take another chip; without a win this is a draw
    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }
}

impl<P: Eq> Default for GameEngine<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, COLS, ROWS};

    fn started() -> GameEngine<&'static str> {
        let mut engine = GameEngine::new();
        engine.register_players("alice", "bob").unwrap();
        engine
    }

    /// Place for the current player and pass the turn, as a front-end would.
    fn play(engine: &mut GameEngine<&'static str>, column: usize) -> bool {
        engine.place_chip(column).unwrap();
        let won = engine.check_win().unwrap();
        if !won {
            engine.set_next_player().unwrap();
        }
        won
    }

    #[test]
    fn test_register_players() {
        let engine = started();
        assert_eq!(engine.current_player(), Ok(&"alice"));
        assert_eq!(engine.current_seat(), Ok(Seat::Player1));
        assert_eq!(engine.players(), Ok((&"alice", &"bob")));
        assert_eq!(engine.round_count(), 0);
        assert_eq!(engine.board().count_chips(), 0);
    }

    #[test]
    fn test_operations_before_registration_are_rejected() {
        let mut engine: GameEngine<u64> = GameEngine::new();
        assert!(!engine.is_initialized());
        assert_eq!(engine.place_chip(0), Err(GameError::NotInitialized));
        assert_eq!(engine.set_next_player(), Err(GameError::NotInitialized));
        assert_eq!(engine.check_win(), Err(GameError::NotInitialized));
        assert_eq!(engine.current_player(), Err(GameError::NotInitialized));
        assert_eq!(engine.reset(), Err(GameError::NotInitialized));
        assert_eq!(engine.round_count(), 0);
        assert_eq!(engine.board().count_chips(), 0);
    }

    #[test]
    fn test_place_chip_does_not_advance_turn() {
        let mut engine = started();
        assert_eq!(engine.place_chip(3), Ok(ROWS - 1));
        assert_eq!(engine.current_player(), Ok(&"alice"));
        assert_eq!(engine.board().get(ROWS - 1, 3), Cell::Player1);
        assert_eq!(engine.round_count(), 1);
    }

    #[test]
    fn test_set_next_player_alternates() {
        let mut engine = started();
        engine.set_next_player().unwrap();
        assert_eq!(engine.current_player(), Ok(&"bob"));
        engine.place_chip(2).unwrap();
        assert_eq!(engine.board().get(ROWS - 1, 2), Cell::Player2);
        engine.set_next_player().unwrap();
        assert_eq!(engine.current_player(), Ok(&"alice"));
    }

    #[test]
    fn test_vertical_win_needs_four_stacked() {
        let mut engine = started();
        let others = [0, 1, 0];

        for &other in &others {
            assert!(!play(&mut engine, 3), "alice should not have won yet");
            assert!(!play(&mut engine, other), "bob should not have won");
        }
        assert!(play(&mut engine, 3));
        assert_eq!(engine.current_player(), Ok(&"alice"));
        assert_eq!(engine.round_count(), 7);
    }

    #[test]
    fn test_horizontal_win_attributed_to_current_player() {
        let mut engine = started();
        for col in 0..3 {
            assert!(!play(&mut engine, col)); // alice, bottom row
            assert!(!play(&mut engine, col)); // bob, row above
        }
        assert!(play(&mut engine, 3));
        assert_eq!(engine.current_seat(), Ok(Seat::Player1));
    }

    #[test]
    fn test_check_win_is_repeatable() {
        let mut engine = started();
        for _ in 0..4 {
            engine.place_chip(5).unwrap();
        }
        let board = engine.board().clone();
        for _ in 0..3 {
            assert_eq!(engine.check_win(), Ok(true));
        }
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.round_count(), 4);
    }

    #[test]
    fn test_full_column_is_rejected_without_changes() {
        let mut engine = started();
        for _ in 0..ROWS {
            engine.place_chip(6).unwrap();
            engine.set_next_player().unwrap();
        }
        let board = engine.board().clone();

        assert_eq!(engine.place_chip(6), Err(GameError::ColumnFull { column: 6 }));
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.round_count(), ROWS);
    }

    #[test]
    fn test_invalid_column_is_rejected_without_changes() {
        let mut engine = started();
        engine.place_chip(0).unwrap();

        assert_eq!(
            engine.place_chip(COLS),
            Err(GameError::InvalidColumn {
                column: COLS,
                columns: COLS
            })
        );
        assert_eq!(engine.round_count(), 1);
        assert_eq!(engine.board().count_chips(), 1);
    }

    #[test]
    fn test_duplicate_registration_keeps_previous_game() {
        let mut engine = started();
        engine.place_chip(4).unwrap();
        engine.set_next_player().unwrap();

        assert_eq!(
            engine.register_players("carol", "carol"),
            Err(GameError::DuplicatePlayer)
        );
        assert_eq!(engine.players(), Ok((&"alice", &"bob")));
        assert_eq!(engine.current_player(), Ok(&"bob"));
        assert_eq!(engine.round_count(), 1);
        assert_eq!(engine.board().get(ROWS - 1, 4), Cell::Player1);
    }

    #[test]
    fn test_duplicate_registration_on_fresh_engine() {
        let mut engine: GameEngine<u64> = GameEngine::new();
        assert_eq!(engine.register_players(7, 7), Err(GameError::DuplicatePlayer));
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_register_players_resets_previous_game() {
        let mut engine = started();
        play(&mut engine, 1);
        play(&mut engine, 2);

        engine.register_players("carol", "dave").unwrap();
        assert_eq!(engine.current_player(), Ok(&"carol"));
        assert_eq!(engine.round_count(), 0);
        assert_eq!(engine.board().count_chips(), 0);
    }

    #[test]
    fn test_reset_keeps_players() {
        let mut engine = started();
        play(&mut engine, 1);
        engine.reset().unwrap();
        assert_eq!(engine.players(), Ok((&"alice", &"bob")));
        assert_eq!(engine.current_player(), Ok(&"alice"));
        assert_eq!(engine.round_count(), 0);
        assert_eq!(engine.board().count_chips(), 0);
    }

    #[test]
    fn test_seat_of() {
        let engine = started();
        assert_eq!(engine.seat_of(&"alice"), Some(Seat::Player1));
        assert_eq!(engine.seat_of(&"bob"), Some(Seat::Player2));
        assert_eq!(engine.seat_of(&"mallory"), None);
    }

    #[test]
    fn test_matches_are_independent() {
        let mut first = started();
        let mut second = started();
        first.place_chip(0).unwrap();
        second.place_chip(6).unwrap();
        second.place_chip(6).unwrap();

        assert_eq!(first.round_count(), 1);
        assert_eq!(second.round_count(), 2);
        assert_eq!(first.board().column_height(6), 0);
        assert_eq!(second.board().column_height(0), 0);
    }

    #[test]
    fn test_board_full_without_win_is_draw() {
        // Column order that fills the classic board with no four in a row
        let mut engine = started();
        let order = [
            5, 4, 5, 0, 6, 2, 4, 5, 5, 0, 4, 1, 1, 0, 4, 5, 6, 5, 3, 1, 1, 2, 2, 6, 2, 6, 6, 3, 6,
            2, 0, 3, 0, 3, 3, 4, 3, 1, 4, 2, 1, 0,
        ];
        for &col in &order {
            assert!(!play(&mut engine, col), "unexpected win at column {col}");
        }
        assert!(engine.is_board_full());
        assert_eq!(engine.round_count(), ROWS * COLS);
    }

    #[test]
    fn test_custom_config() {
        let config = BoardConfig {
            rows: 3,
            cols: 3,
            win_length: 3,
        };
        let mut engine: GameEngine<u8> = GameEngine::with_config(config).unwrap();
        engine.register_players(1, 2).unwrap();
        assert_eq!(engine.config(), config);
        for _ in 0..3 {
            engine.place_chip(1).unwrap();
        }
        assert_eq!(engine.check_win(), Ok(true));
        assert_eq!(engine.place_chip(1), Err(GameError::ColumnFull { column: 1 }));
        assert_eq!(
            engine.place_chip(3),
            Err(GameError::InvalidColumn {
                column: 3,
                columns: 3
            })
        );
    }

    #[test]
    fn test_with_config_rejects_unplayable_shapes() {
        let zero_win = BoardConfig {
            win_length: 0,
            ..BoardConfig::default()
        };
        assert!(GameEngine::<u8>::with_config(zero_win).is_err());

        let huge = BoardConfig {
            rows: usize::MAX / 2,
            cols: 3,
            win_length: 4,
        };
        assert!(GameEngine::<u8>::with_config(huge).is_err());
    }
}
