pub mod explanations;
pub mod matcher;
pub mod preferences;
pub mod providers;
pub mod random;
pub mod recommendations;
pub mod tokenizer;

pub use matcher::select_top_games;
pub use providers::{ChatPrompt, FriendliClient, TextGenerator};
pub use random::{FixedSource, RandomSource, RngSource};
