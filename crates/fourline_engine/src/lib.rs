pub mod evaluation;
pub mod player;
pub mod search;

pub use evaluation::evaluate_board;
pub use player::{AiPlayer, MoveError, Player, DEFAULT_DEPTH_LIMIT};
pub use search::search_best_move;
