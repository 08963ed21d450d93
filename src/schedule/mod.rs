pub mod kickoff;
pub mod models;

pub use models::{Game, GameSource};
