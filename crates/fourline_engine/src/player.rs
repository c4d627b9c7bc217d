use log::debug;
use rand::seq::SliceRandom;
use thiserror::Error;

use fourline_core::{Board, Mark, PlaceError, Position};

use crate::search::search_best_move;

/// Default search depth: deep enough to spot two-move tactics on the 9x9
/// board while keeping move times interactive.
pub const DEFAULT_DEPTH_LIMIT: u32 = 3;

/// Failure to produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The board has no empty cell left. Callers should check `is_full()`
    /// before asking for a move.
    #[error("no legal moves remain on the board")]
    NoLegalMoves,

    #[error(transparent)]
    Place(#[from] PlaceError),
}

/// A source of moves for one side.
///
/// Implementations apply their chosen move to the board themselves and
/// return where they played; the driver must not re-apply it.
pub trait Player {
    fn mark(&self) -> Mark;

    fn make_move(&mut self, board: &mut Board) -> Result<Position, MoveError>;
}

/// Search-backed player.
pub struct AiPlayer {
    mark: Mark,
    depth_limit: u32,
}

impl AiPlayer {
    pub fn new(mark: Mark, depth_limit: u32) -> Self {
        Self {
            mark,
            // Depth 0 would answer from the heuristic alone without looking
            // at a single reply; always search at least one ply.
            depth_limit: depth_limit.max(1),
        }
    }
}

impl Player for AiPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn make_move(&mut self, board: &mut Board) -> Result<Position, MoveError> {
        let pos = match search_best_move(board, self.mark, self.depth_limit) {
            Some(pos) => pos,
            // The search only comes back empty when no legal move exists;
            // fall back to a random legal move so a degenerate caller still
            // gets an answer when there is one.
            None => {
                debug!("search returned no move, falling back to random choice");
                board
                    .legal_moves()
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .ok_or(MoveError::NoLegalMoves)?
            }
        };
        board.place(pos, self.mark)?;
        Ok(pos)
    }
}
