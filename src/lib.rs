// Library interface for codebreaker
// This allows integration tests to access internal modules

pub mod cli;
pub mod code;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod input;
pub mod logging;
pub mod selftest;

// Re-export commonly used items for easier testing
pub use code::{Difficulty, SecretCode};
pub use error::Error;
pub use feedback::{Feedback, Scored, format_feedback, get_feedback};
pub use game_state::{Command, Game, GameInterface, Outcome, play};
pub use input::InputSource;
pub use selftest::run_self_tests;
