pub mod store;

pub use store::{FileScoreStore, ScoreStore};
