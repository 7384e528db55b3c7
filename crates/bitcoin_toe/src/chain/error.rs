//! Chain call error types.

use derive_more::{Display, Error};

/// What went wrong with a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ChainErrorKind {
    /// No wallet account is connected.
    #[display("no wallet account connected")]
    NotConnected,

    /// The wallet refused to sign or submit.
    #[display("wallet rejected transaction: {}", _0)]
    Rejected(String),

    /// The bridge could not be reached or failed.
    #[display("network failure: {}", _0)]
    Network(String),

    /// The transaction executed and aborted.
    #[display("contract reverted: {}", _0)]
    Reverted(String),

    /// The bridge answered with something unreadable.
    #[display("malformed response: {}", _0)]
    MalformedResponse(String),
}

/// Chain call error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Chain error: {} at {}:{}", kind, file, line)]
pub struct ChainError {
    /// Error category.
    pub kind: ChainErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ChainError {
    /// Creates a new chain error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ChainErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ChainError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::new(ChainErrorKind::MalformedResponse(err.to_string()))
        } else {
            Self::new(ChainErrorKind::Network(err.to_string()))
        }
    }
}
