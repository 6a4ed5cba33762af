//! Material-only chess player: evaluation, alpha-beta minimax and iterative
//! deepening over any [`Rules`] implementation.

pub mod config;
pub mod driver;
pub mod error;
pub mod evaluation;
pub mod rules;
pub mod search;
pub mod types;

pub use config::*;
pub use driver::*;
pub use error::*;
pub use evaluation::*;
pub use rules::*;
pub use search::*;
pub use types::*;
