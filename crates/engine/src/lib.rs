pub mod bitboard;
pub mod error;
pub mod perft;
pub mod position;
pub mod types;
pub mod zobrist;

pub use error::{EngineError, EngineResult};
pub use perft::*;
pub use position::{Position, STARTING_FEN};
pub use types::*;
