//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating and changing a board
//! according to tic-tac-toe rules. Rules are separated from board storage so
//! the session and the search share one definition of a win.

pub mod draw;
pub mod placement;
pub mod win;

pub use draw::{is_draw, is_full};
pub use placement::apply_move;
pub use win::{WINNING_LINES, check_winner, has_won};
