//! Direct score entry and validation.
//!
//! The validator accepts a fully typed final score, or a walkover /
//! retirement declaration, and checks it against the same padel rules
//! the live engine enforces. It is stateless and pure: the same
//! submission always produces the same verdict, and no match history
//! is involved.

pub mod errors;
pub mod submission;

pub use errors::{ScoreError, SetError, SubmissionError, SubmissionResult};
pub use submission::{ScoreSubmission, SubmissionKind, validate_set, validate_submission};
