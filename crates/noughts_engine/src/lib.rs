//! Noughts engine - pure tic-tac-toe game logic.
//!
//! The engine owns a canonical [`Board`] and never looks at presentation
//! state. It is split in two layers:
//!
//! - **Board / game state**: [`Board`], the [`rules`] predicates, the
//!   [`GameSession`] state machine and the session-wide [`ScoreTally`].
//! - **Search**: an exhaustive minimax [`Searcher`] that picks a provably
//!   optimal move for the side to play.
//!
//! # Example
//!
//! ```
//! use noughts_engine::{best_move, GameSession, GameStatus, Player};
//!
//! let mut session = GameSession::new();
//! session.apply_move(0).unwrap();
//!
//! let reply = best_move(session.board(), session.to_move());
//! assert_eq!(reply.index, 4);
//! assert_eq!(session.apply_move(reply.index).unwrap(), GameStatus::InProgress);
//! assert_eq!(session.to_move(), Player::X);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod position;
pub mod rules;
mod score;
mod search;
mod session;
mod types;

pub use action::{Move, MoveError};
pub use position::Position;
pub use rules::{WINNING_LINES, apply_move, check_winner, has_won, is_draw, is_full};
pub use score::ScoreTally;
pub use search::{DRAW_SCORE, Scoring, SearchResult, Searcher, WIN_SCORE, best_move};
pub use session::GameSession;
pub use types::{Board, BoardParseError, GameStatus, Player, Square};

/// Alias for clarity where the symbol, not the participant, is meant.
pub type Mark = Player;
