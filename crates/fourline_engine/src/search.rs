use log::debug;

use fourline_core::{Board, Mark, Position};

use crate::evaluation::evaluate_board;

/// Base score of a decided position. The remaining search depth is added on
/// top (`1000 + depth` for a win, `-1000 - depth` for a loss), which biases
/// the search toward lines that decide the game with depth budget to spare.
const WIN_SCORE: i32 = 1000;

/// Finds the strongest move for `mark` with a depth-limited alpha-beta
/// search.
///
/// Candidate moves are explored center-first; each is tried on a cloned
/// board and scored by [`Search::minimax`] with the opponent to move.
/// Returns `None` only when the board has no legal move left, which callers
/// are expected to rule out beforehand.
pub fn search_best_move(board: &Board, mark: Mark, depth_limit: u32) -> Option<Position> {
    let search = Search {
        me: mark,
        opponent: mark.opponent(),
    };

    let mut candidates = board.legal_moves();
    order_moves(&mut candidates, board.size());
    debug!(
        "searching {} candidate moves for {} at depth {}",
        candidates.len(),
        mark.as_char(),
        depth_limit
    );

    let mut best_move = None;
    let mut best_score = i32::MIN;
    let mut alpha = i32::MIN;
    let beta = i32::MAX;

    for pos in candidates {
        let mut child = board.clone();
        if child.place(pos, mark).is_err() {
            continue;
        }

        let score = search.minimax(&child, depth_limit.saturating_sub(1), false, alpha, beta);
        if score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
        // The bound tracks the provisional best rather than a fresh
        // per-branch alpha. Looser than textbook alpha-beta, but it only
        // affects how much gets pruned, never which move comes back.
        alpha = alpha.max(best_score);
    }

    if let Some(pos) = best_move {
        debug!(
            "best move for {}: ({}, {}) scoring {}",
            mark.as_char(),
            pos.row,
            pos.col,
            best_score
        );
    }
    best_move
}

/// One search query: the symbol pair is fixed for the whole call tree, all
/// other state lives on the stack.
struct Search {
    me: Mark,
    opponent: Mark,
}

impl Search {
    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// Terminal checks run in a fixed order: my win, opponent win, full
    /// board, then depth cutoff into the heuristic.
    fn minimax(
        &self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        if board.has_win(self.me) {
            return WIN_SCORE + depth as i32;
        }
        if board.has_win(self.opponent) {
            return -WIN_SCORE - depth as i32;
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate_board(board, self.me);
        }

        let mut moves = board.legal_moves();
        order_moves(&mut moves, board.size());

        if maximizing {
            let mut best = i32::MIN;
            for pos in moves {
                let mut child = board.clone();
                if child.place(pos, self.me).is_err() {
                    continue;
                }
                best = best.max(self.minimax(&child, depth - 1, false, alpha, beta));
                alpha = alpha.max(best);
                if beta <= alpha {
                    break; // beta cut-off
                }
            }
            best
        } else {
            let mut worst = i32::MAX;
            for pos in moves {
                let mut child = board.clone();
                if child.place(pos, self.opponent).is_err() {
                    continue;
                }
                worst = worst.min(self.minimax(&child, depth - 1, true, alpha, beta));
                beta = beta.min(worst);
                if beta <= alpha {
                    break; // alpha cut-off
                }
            }
            worst
        }
    }
}

/// Center-first ordering: central squares touch the most potential lines, so
/// trying them first tightens the alpha-beta window sooner. The sort is
/// stable, leaving row-major enumeration as the tie-break.
fn order_moves(moves: &mut [Position], size: usize) {
    let center = Position::new(size / 2, size / 2);
    moves.sort_by_key(|pos| pos.manhattan_distance(center));
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourline_core::Cell;

    fn place_all(board: &mut Board, mark: Mark, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            board.place(Position::new(row, col), mark).unwrap();
        }
    }

    #[test]
    fn ordering_puts_central_moves_first_with_row_major_ties() {
        let board = Board::standard();
        let mut moves = board.legal_moves();
        order_moves(&mut moves, board.size());

        assert_eq!(moves[0], Position::new(4, 4));
        // All distance-1 cells precede any distance-2 cell, in row-major
        // order among themselves.
        assert_eq!(moves[1], Position::new(3, 4));
        assert_eq!(moves[2], Position::new(4, 3));
        assert_eq!(moves[3], Position::new(4, 5));
        assert_eq!(moves[4], Position::new(5, 4));
    }

    #[test]
    fn takes_an_immediate_win() {
        let mut board = Board::standard();
        place_all(&mut board, Mark::Cross, &[(4, 2), (4, 3), (4, 4)]);
        place_all(&mut board, Mark::Nought, &[(1, 1), (2, 1), (6, 7)]);

        for depth_limit in 1..=2 {
            let best = search_best_move(&board, Mark::Cross, depth_limit).unwrap();
            let mut after = board.clone();
            after.place(best, Mark::Cross).unwrap();
            assert!(
                after.has_win(Mark::Cross),
                "depth {depth_limit} picked non-winning move {best:?}"
            );
        }
    }

    #[test]
    fn prefers_winning_over_blocking() {
        let mut board = Board::standard();
        // Both sides have an open-ended three; the mover should finish its
        // own line instead of blocking.
        place_all(&mut board, Mark::Cross, &[(2, 2), (2, 3), (2, 4)]);
        place_all(&mut board, Mark::Nought, &[(6, 2), (6, 3), (6, 4)]);

        let best = search_best_move(&board, Mark::Cross, 2).unwrap();
        let mut after = board.clone();
        after.place(best, Mark::Cross).unwrap();
        assert!(after.has_win(Mark::Cross));
    }

    #[test]
    fn blocks_an_opponent_threat() {
        let mut board = Board::standard();
        // The wall closes one end of the run, so (0, 3) is the only block.
        place_all(&mut board, Mark::Nought, &[(0, 0), (0, 1), (0, 2)]);
        place_all(&mut board, Mark::Cross, &[(7, 7), (8, 8)]);

        let best = search_best_move(&board, Mark::Cross, 2).unwrap();
        assert_eq!(best, Position::new(0, 3));
    }

    #[test]
    fn pruning_preserves_minimax_scores() {
        let mut board = Board::new(4, 3);
        place_all(&mut board, Mark::Cross, &[(1, 1), (0, 1)]);
        place_all(&mut board, Mark::Nought, &[(2, 2), (0, 2)]);

        let search = Search {
            me: Mark::Cross,
            opponent: Mark::Nought,
        };

        for pos in board.legal_moves() {
            let mut child = board.clone();
            child.place(pos, Mark::Cross).unwrap();
            let pruned = search.minimax(&child, 3, false, i32::MIN, i32::MAX);
            let exhaustive = exhaustive_minimax(&search, &child, 3, false);
            assert_eq!(pruned, exhaustive, "scores diverge after move {pos:?}");
        }
    }

    // Reference minimax without pruning, for the equivalence check above.
    fn exhaustive_minimax(search: &Search, board: &Board, depth: u32, maximizing: bool) -> i32 {
        if board.has_win(search.me) {
            return WIN_SCORE + depth as i32;
        }
        if board.has_win(search.opponent) {
            return -WIN_SCORE - depth as i32;
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate_board(board, search.me);
        }

        let scores = board.legal_moves().into_iter().map(|pos| {
            let mut child = board.clone();
            let mark = if maximizing { search.me } else { search.opponent };
            child.place(pos, mark).unwrap();
            exhaustive_minimax(search, &child, depth - 1, !maximizing)
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    #[test]
    fn opening_move_is_central() {
        let board = Board::standard();
        let best = search_best_move(&board, Mark::Cross, 2).unwrap();
        assert!(
            (3..=5).contains(&best.row) && (3..=5).contains(&best.col),
            "opening move {best:?} is outside the center region"
        );
    }

    #[test]
    fn returns_none_on_full_board() {
        let mut board = Board::new(3, 3);
        place_all(&mut board, Mark::Cross, &[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)]);
        place_all(&mut board, Mark::Nought, &[(0, 1), (1, 1), (1, 2), (2, 0)]);
        assert!(board.is_full());
        assert_eq!(search_best_move(&board, Mark::Cross, 3), None);
    }

    #[test]
    fn search_leaves_the_input_board_untouched() {
        let mut board = Board::standard();
        place_all(&mut board, Mark::Cross, &[(4, 4)]);
        let snapshot = board.clone();
        let _ = search_best_move(&board, Mark::Nought, 2);
        assert_eq!(board, snapshot);
        assert_eq!(board.get(Position::new(4, 4)), Cell::Taken(Mark::Cross));
    }
}
