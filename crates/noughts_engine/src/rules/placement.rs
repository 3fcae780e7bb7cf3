//! Move application.

use crate::action::MoveError;
use crate::types::{Board, Player, Square};
use tracing::{debug, instrument};

/// Places `player`'s mark at `index`.
///
/// Whose turn it is is not checked here; [`crate::GameSession`] owns turn order.
///
/// # Errors
///
/// Returns [`MoveError::OutOfRange`] for an index outside 0-8 and
/// [`MoveError::Occupied`] for a taken cell. The board is unchanged on error.
#[instrument(skip(board), fields(board = %board.notation()))]
pub fn apply_move(board: &mut Board, index: usize, player: Player) -> Result<(), MoveError> {
    match board.get(index) {
        None => Err(MoveError::OutOfRange(index)),
        Some(Square::Occupied(_)) => Err(MoveError::Occupied(index)),
        Some(Square::Empty) => {
            board.set(index, Square::Occupied(player));
            debug!(index, %player, "Mark placed");
            Ok(())
        }
    }
}
