//! Console presentation for the game.
//!
//! Everything here is glue over the read-only board contract: rendering,
//! input prompting and the turn-alternation driver. The engine never depends
//! on any of it.

use std::io::{self, Write};
use std::process;
use std::thread;
use std::time::Duration;

use log::info;

use fourline_core::{Board, Cell, Mark, PlaceError, Position, BOARD_SIZE, WIN_LENGTH};
use fourline_engine::{AiPlayer, MoveError, Player, DEFAULT_DEPTH_LIMIT};

/// Pause before the computer replies, so its move doesn't land instantly.
const THINK_DELAY: Duration = Duration::from_millis(500);

/// Runs interactive games until the player declines a rematch.
pub fn run() {
    show_welcome();
    loop {
        play_round();
        if !prompt_yes_no("\nPlay again? (y/n): ") {
            break;
        }
    }
}

fn play_round() {
    let mut board = Board::standard();
    let mut human = HumanPlayer::new(Mark::Cross);
    let mut computer = AiPlayer::new(Mark::Nought, DEFAULT_DEPTH_LIMIT);
    // Human opens.
    let mut human_turn = true;

    loop {
        clear_screen();
        let mover: &mut dyn Player = if human_turn { &mut human } else { &mut computer };
        let mark = mover.mark();
        println!("Player's turn: {}", mark.as_char());
        render(&board);

        if !human_turn {
            println!("Computer is thinking...");
            thread::sleep(THINK_DELAY);
        }

        let pos = match mover.make_move(&mut board) {
            Ok(pos) => pos,
            Err(MoveError::NoLegalMoves) => {
                // The draw check below normally fires first; reaching this
                // means the round is over anyway.
                println!("It's a draw!");
                return;
            }
            Err(err) => {
                eprintln!("move failed: {err}");
                return;
            }
        };
        info!("{} played ({}, {})", mark.as_char(), pos.row, pos.col);

        if !human_turn {
            println!("Computer placed at: {},{}", pos.row + 1, pos.col + 1);
        }

        if board.has_win(mark) {
            clear_screen();
            render(&board);
            if human_turn {
                println!("Congratulations! You won!");
            } else {
                println!("The computer won! Better luck next time.");
            }
            return;
        }

        if board.is_full() {
            clear_screen();
            render(&board);
            println!("It's a draw!");
            return;
        }

        human_turn = !human_turn;
    }
}

/// Human-driven seat: prompts on stdin until a legal move has been placed.
pub struct HumanPlayer {
    mark: Mark,
}

impl HumanPlayer {
    pub fn new(mark: Mark) -> Self {
        Self { mark }
    }
}

impl Player for HumanPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn make_move(&mut self, board: &mut Board) -> Result<Position, MoveError> {
        let size = board.size();
        loop {
            let line = prompt(&format!("Enter your move (row,col) [1-{size},1-{size}]: "));

            let Some((row, col)) = parse_move(&line) else {
                println!("Invalid input. Enter as 'row,col' (e.g., '3,4').");
                continue;
            };
            if !(1..=size).contains(&row) || !(1..=size).contains(&col) {
                println!("Invalid position. Row and column must be between 1 and {size}.");
                continue;
            }

            let pos = Position::new(row - 1, col - 1);
            match board.place(pos, self.mark) {
                Ok(()) => return Ok(pos),
                Err(PlaceError::OccupiedCell { .. }) => {
                    println!("Position already taken. Try again.");
                }
                Err(PlaceError::InvalidCoordinate { .. }) => {
                    println!("Invalid position. Row and column must be between 1 and {size}.");
                }
            }
        }
    }
}

/// Parses a 1-indexed "row,col" pair. Range checking happens at the caller,
/// which knows the board size.
fn parse_move(input: &str) -> Option<(usize, usize)> {
    let (row, col) = input.trim().split_once(',')?;
    Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}

/// Draws the board with 1-indexed headers. The most recent move is shown in
/// brackets.
pub fn render(board: &Board) {
    let n = board.size();

    print!("   ");
    for col in 0..n {
        print!("{:^3}", col + 1);
    }
    println!();

    for row in 0..n {
        print!("{:>2} ", row + 1);
        for col in 0..n {
            let pos = Position::new(row, col);
            let glyph = match board.get(pos) {
                Cell::Empty => '.',
                Cell::Taken(mark) => mark.as_char(),
            };
            if board.last_move() == Some(pos) {
                print!("[{glyph}]");
            } else {
                print!(" {glyph} ");
            }
        }
        println!();
    }
}

fn show_welcome() {
    clear_screen();
    let rule = "=".repeat(50);
    println!("{rule}");
    println!(
        "{BOARD_SIZE}x{BOARD_SIZE} Tic-Tac-Toe with Heuristic Alpha-Beta Search"
    );
    println!("{rule}");
    println!("You are 'X', and the computer is 'O'.");
    println!(
        "Get {WIN_LENGTH} in a row (horizontally, vertically, or diagonally) to win!"
    );
    println!("Enter moves as 'row,column' (e.g., '3,4').");
    println!("Both row and column should be between 1 and {BOARD_SIZE}.");
    println!("{rule}");
    prompt("Press Enter to start the game...");
}

fn prompt_yes_no(message: &str) -> bool {
    prompt(message).trim().eq_ignore_ascii_case("y")
}

/// Prints a prompt and reads one line. Exits cleanly on end of input, since
/// the retry loops above would otherwise spin forever.
fn prompt(message: &str) -> String {
    print!("{message}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => {
            println!();
            process::exit(0);
        }
        Ok(_) => line,
    }
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_coordinates() {
        assert_eq!(parse_move("3,4"), Some((3, 4)));
        assert_eq!(parse_move(" 9 , 1 \n"), Some((9, 1)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_move(""), None);
        assert_eq!(parse_move("34"), None);
        assert_eq!(parse_move("a,b"), None);
        assert_eq!(parse_move("3,4,5"), None);
        assert_eq!(parse_move("-1,4"), None);
    }
}
