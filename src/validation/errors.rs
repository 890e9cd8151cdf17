//! Score validation error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::entities::FinalizeError;

/// Rule failures for a single typed set score
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ScoreError {
    #[error("7-7 is impossible, a set at 6-6 is decided by a tie-break")]
    TieBreakRequired,
    #[error("no side can win more than 7 games in a set")]
    TooManyGames,
    #[error("a set can't end level")]
    LevelSet,
    #[error("set not finished")]
    UnfinishedSet,
    #[error("invalid set score")]
    InvalidScore,
    #[error("super tie-break winner needs at least 10 points")]
    SuperTieBreakTooFew,
    #[error("super tie-break must be won by at least 2 points")]
    SuperTieBreakMargin,
}

/// A rule failure tied to the set it occurred in
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
#[error("set {set_number}: {error}")]
pub struct SetError {
    /// 1-based set number as shown on the entry form.
    pub set_number: u8,
    pub error: ScoreError,
}

/// Submission-level failures for direct score entry
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SubmissionError {
    #[error("set {0} is required")]
    MissingSet(u8),
    #[error("sets are split 1-1, a deciding set is required")]
    MissingDecider,
    #[error("the match was decided in two sets, a third set can't be entered")]
    UnexpectedDecider,
    #[error("a winner must be named for a walkover or retirement")]
    MissingWinner,
    #[error("submitted score breaks the rules in {} set(s)", .0.len())]
    InvalidScores(Vec<SetError>),
    #[error(transparent)]
    Finalize(#[from] FinalizeError),
}

/// Result type for submission validation
pub type SubmissionResult<T> = Result<T, SubmissionError>;
