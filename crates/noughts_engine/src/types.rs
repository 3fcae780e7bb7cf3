//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Single-character symbol for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELL_COUNT],
        }
    }

    /// Builds a board from squares in row-major order.
    pub fn from_squares(squares: [Square; CELL_COUNT]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Overwrites a square without any legality check.
    ///
    /// Callers validate `pos` first; see [`crate::apply_move`].
    pub(crate) fn set(&mut self, pos: usize, square: Square) {
        self.squares[pos] = square;
    }

    /// Checks if a square is empty. Out-of-range positions are not empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Indices of the empty cells in increasing order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(pos, _)| pos)
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|square| **square == Square::Occupied(player))
            .count()
    }

    /// X moves first, so X holds as many squares as O or exactly one more.
    pub fn is_consistent(&self) -> bool {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        x == o || x == o + 1
    }

    /// The mark whose turn it would be if play started from an empty board.
    pub fn implied_to_move(&self) -> Player {
        if self.count(Player::X) > self.count(Player::O) {
            Player::O
        } else {
            Player::X
        }
    }

    /// Compact row-major notation, `.` for empty cells (e.g. `XX.OO....`).
    pub fn notation(&self) -> String {
        self.squares
            .iter()
            .map(|square| square.player().map_or('.', Player::symbol))
            .collect()
    }

    /// Formats the board as a human-readable grid, numbering empty cells 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => char::from(b'1' + pos as u8),
                    Square::Occupied(player) => player.symbol(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// The text does not describe exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// A cell character is not `X`, `O`, `.`, `-` or `_`.
    #[display("Unexpected cell character {:?}", _0)]
    BadCell(#[error(not(source))] char),
    /// The mark counts cannot come from alternating play starting with X.
    #[display("Mark counts are inconsistent (X: {}, O: {})", x, o)]
    Inconsistent {
        /// Number of X marks.
        x: usize,
        /// Number of O marks.
        o: usize,
    },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses row-major notation. `/` and whitespace separate rows and are ignored.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if cells.len() != CELL_COUNT {
            return Err(BoardParseError::WrongLength(cells.len()));
        }

        let mut board = Board::new();
        for (pos, c) in cells.into_iter().enumerate() {
            let square = match c {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '-' | '_' => Square::Empty,
                other => return Err(BoardParseError::BadCell(other)),
            };
            board.set(pos, square);
        }

        if !board.is_consistent() {
            return Err(BoardParseError::Inconsistent {
                x: board.count(Player::X),
                o: board.count(Player::O),
            });
        }
        Ok(board)
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(player) => write!(f, "Player {} wins", player),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_cells().count(), 9);
        assert!(board.is_consistent());
        assert_eq!(board.implied_to_move(), Player::X);
    }

    #[test]
    fn test_parse_notation() {
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(board.get(0), Some(Square::Occupied(Player::X)));
        assert_eq!(board.get(3), Some(Square::Occupied(Player::O)));
        assert_eq!(board.get(2), Some(Square::Empty));
        assert_eq!(board.notation(), "XX.OO....");
        assert_eq!(board.implied_to_move(), Player::X);
    }

    #[test]
    fn test_parse_with_row_separators() {
        let board: Board = "x.o / .x. / ..o".parse().unwrap();
        assert_eq!(board.notation(), "X.O.X...O");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XX".parse::<Board>(),
            Err(BoardParseError::WrongLength(2))
        );
        assert_eq!(
            "XX.OO...Z".parse::<Board>(),
            Err(BoardParseError::BadCell('Z'))
        );
        assert_eq!(
            "OO.......".parse::<Board>(),
            Err(BoardParseError::Inconsistent { x: 0, o: 2 })
        );
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board: Board = "X...O....".parse().unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_player_parses_case_insensitively() {
        assert_eq!("o".parse::<Player>().unwrap(), Player::O);
        assert_eq!(Player::X.to_string(), "X");
        assert_eq!(Player::X.opponent(), Player::O);
    }
}
