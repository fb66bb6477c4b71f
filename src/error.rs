use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

/// Process exit code for an error surfaced during play.
pub const EXIT_RUNTIME_ERROR: u8 = 1;
/// Process exit code when the self-test battery reports a failure.
pub const EXIT_SELF_TEST_FAILED: u8 = 2;
