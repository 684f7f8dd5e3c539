pub mod arena;
pub mod engine;
pub mod error;
pub mod logic;

pub use error::ChessError;
