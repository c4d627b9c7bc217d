// Core game logic modules
pub mod board;
pub mod error;
pub mod mark;
pub mod position;

// Re-export main types for convenience
pub use board::{Board, BOARD_SIZE, WIN_LENGTH};
pub use error::PlaceError;
pub use mark::{Cell, Mark};
pub use position::Position;
