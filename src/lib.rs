//! # Padel Scoring
//!
//! A padel match scoring engine implemented as a type-safe finite state machine (FSM).
//!
//! This library converts a stream of point events, or a manually typed final
//! score, into a validated, immutable [`MatchResult`]. It reproduces the
//! scoring rules of competitive padel: golden-point games, six-game sets with
//! a tie-break at six all, and a ten-point super tie-break in place of a
//! third set outside knockout rounds.
//!
//! ## Architecture
//!
//! A live match moves through four phases, each a distinct state type:
//!
//! - **NormalPlay**: regular games scored 0/15/30/40 with golden point
//! - **TieBreakPlay**: the 7-point tie-break played at six games all
//! - **SuperTieBreakPlay**: the 10-point super tie-break deciding the match
//! - **MatchOver**: terminal state holding the match winner
//!
//! Operations consume the current state and return the next one, with
//! `enum_dispatch` providing zero-cost trait dispatch across phases. Every
//! accepted point records a snapshot first, so the most recent point can
//! always be rolled back exactly, including a point that ended the match.
//!
//! ## Core Modules
//!
//! - [`scoring`]: live FSM, domain entities, and match finalization
//! - [`validation`]: direct-entry score validation
//!
//! ## Example
//!
//! ```
//! use padel_scoring::{MatchSettings, MatchState, RoundKind, Side};
//! use uuid::Uuid;
//!
//! let settings = MatchSettings::new(RoundKind::Other, Uuid::new_v4(), Uuid::new_v4());
//! let mut state = MatchState::from(settings);
//! state = state.add_point(Side::A);
//! assert!(!state.is_finished());
//! ```

/// Live scoring state machine, entities, and finalization.
pub mod scoring;
pub use scoring::{
    constants,
    entities::{
        self, FinalizeError, MatchResult, MatchSettings, PointDisplay, RoundKind, ScoreEvent,
        SetKind, SetScore, Side, TeamId,
    },
    state_machine::{Match, MatchState, Phase, ScoreReadout},
    states,
};

/// Direct score entry and validation.
pub mod validation;
pub use validation::{
    errors::{ScoreError, SetError, SubmissionError},
    submission::{ScoreSubmission, SubmissionKind, validate_set, validate_submission},
};
