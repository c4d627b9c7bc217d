use fourline_core::{Board, Cell, Mark, Position};

// Window scores. A window is one run of exactly `win_length` cells along a
// line orientation; windows containing both symbols can never complete and
// score nothing.
const NEAR_WIN: i32 = 50; // one empty cell away from completing the line
const DEVELOPING: i32 = 10; // two cells short, still open
const EARLY: i32 = 1; // a lone mark with room to grow
const OPPONENT_NEAR_WIN: i32 = -40; // must-block threat
const OPPONENT_DEVELOPING: i32 = -8; // opponent building a line

// Completing a line (+50) deliberately outweighs blocking one (-40), so with
// a win and a block both on the table the engine goes for the win.

/// Bonus per mark inside the central 3x3 block. Central cells sit on the most
/// potential winning lines.
const CENTER_BONUS: i32 = 3;

/// Scores a non-terminal board from `mark`'s perspective.
///
/// Positive favors `mark`, negative favors the opponent. Terminal positions
/// are scored by the search itself, not here.
pub fn evaluate_board(board: &Board, mark: Mark) -> i32 {
    evaluate_lines(board, mark) + center_control(board, mark)
}

/// Sums window scores over every run of `win_length` cells in all four line
/// orientations.
fn evaluate_lines(board: &Board, mark: Mark) -> i32 {
    let n = board.size();
    let k = board.win_length();
    let mut score = 0;

    // Rows
    for row in 0..n {
        for col in 0..=(n - k) {
            score += window_score(board, mark, (0..k).map(|i| Position::new(row, col + i)));
        }
    }

    // Columns
    for row in 0..=(n - k) {
        for col in 0..n {
            score += window_score(board, mark, (0..k).map(|i| Position::new(row + i, col)));
        }
    }

    // Diagonals, down-right
    for row in 0..=(n - k) {
        for col in 0..=(n - k) {
            score += window_score(board, mark, (0..k).map(|i| Position::new(row + i, col + i)));
        }
    }

    // Diagonals, down-left
    for row in 0..=(n - k) {
        for col in (k - 1)..n {
            score += window_score(board, mark, (0..k).map(|i| Position::new(row + i, col - i)));
        }
    }

    score
}

fn window_score(
    board: &Board,
    mark: Mark,
    window: impl Iterator<Item = Position>,
) -> i32 {
    let mut own = 0;
    let mut theirs = 0;
    let mut empty = 0;
    for pos in window {
        match board.get(pos) {
            Cell::Taken(m) if m == mark => own += 1,
            Cell::Taken(_) => theirs += 1,
            Cell::Empty => empty += 1,
        }
    }
    score_counts(own, theirs, empty, board.win_length())
}

/// Classifies a window by its occupancy counts.
fn score_counts(own: usize, theirs: usize, empty: usize, win_length: usize) -> i32 {
    // Both symbols present: dead line.
    if own > 0 && theirs > 0 {
        return 0;
    }

    let mut score = 0;

    if own + 1 == win_length && empty == 1 {
        score += NEAR_WIN;
    } else if own + 2 == win_length && empty == 2 {
        score += DEVELOPING;
    } else if own == 1 && empty + 1 == win_length {
        score += EARLY;
    }

    if theirs + 1 == win_length && empty == 1 {
        score += OPPONENT_NEAR_WIN;
    } else if theirs + 2 == win_length && empty == 2 {
        score += OPPONENT_DEVELOPING;
    }

    score
}

/// Positional bonus for the 3x3 block centered on the board's middle cell:
/// +3 per own mark, -3 per opponent mark.
fn center_control(board: &Board, mark: Mark) -> i32 {
    let center = board.size() / 2;
    let lo = center.saturating_sub(1);
    let hi = (center + 1).min(board.size() - 1);

    let mut score = 0;
    for row in lo..=hi {
        for col in lo..=hi {
            match board.get(Position::new(row, col)) {
                Cell::Taken(m) if m == mark => score += CENTER_BONUS,
                Cell::Taken(_) => score -= CENTER_BONUS,
                Cell::Empty => {}
            }
        }
    }
    score
}
