use super::board::Cell;

/// A registration slot in a match. The first registered identity sits in
/// `Player1` and moves first; chips on the board record the seat, not the
/// caller's identity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    /// The seat that moves after this one
    pub fn other(self) -> Seat {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }

    /// The chip this seat leaves on the board
    pub fn to_cell(self) -> Cell {
        match self {
            Seat::Player1 => Cell::Player1,
            Seat::Player2 => Cell::Player2,
        }
    }

    /// Label used in log events
    pub fn name(self) -> &'static str {
        match self {
            Seat::Player1 => "player1",
            Seat::Player2 => "player2",
        }
    }
}
