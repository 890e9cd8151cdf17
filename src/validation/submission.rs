//! Typed direct-entry score submissions.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::scoring::constants::{GAMES_PER_SET, SUPER_TIE_BREAK_TARGET, TIE_BREAK_SET_GAMES, WIN_MARGIN};
use crate::scoring::entities::{MatchResult, RoundKind, SetKind, SetScore, Side};

use super::errors::{ScoreError, SetError, SubmissionError, SubmissionResult};

/// How a directly entered result came about
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SubmissionKind {
    /// Match played to natural completion
    Played,
    /// Awarded without play, one side absent
    Walkover,
    /// Ended early through injury or withdrawal
    Retirement,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Played => "played",
            Self::Walkover => "walkover",
            Self::Retirement => "retirement",
        };
        write!(f, "{repr}")
    }
}

/// A final score as typed by an organizer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScoreSubmission {
    pub kind: SubmissionKind,
    /// Required for walkover and retirement submissions.
    pub winner: Option<Side>,
    pub set1: Option<(u8, u8)>,
    pub set2: Option<(u8, u8)>,
    pub set3: Option<(u8, u8)>,
    pub notes: Option<String>,
}

impl ScoreSubmission {
    /// A match played to completion with the given set scores.
    #[must_use]
    pub fn played(set1: (u8, u8), set2: (u8, u8), set3: Option<(u8, u8)>) -> Self {
        Self {
            kind: SubmissionKind::Played,
            winner: None,
            set1: Some(set1),
            set2: Some(set2),
            set3,
            notes: None,
        }
    }

    /// A walkover for `winner`.
    #[must_use]
    pub fn walkover(winner: Side) -> Self {
        Self {
            kind: SubmissionKind::Walkover,
            winner: Some(winner),
            set1: None,
            set2: None,
            set3: None,
            notes: None,
        }
    }

    /// A retirement win for `winner`.
    #[must_use]
    pub fn retirement(winner: Side) -> Self {
        Self {
            kind: SubmissionKind::Retirement,
            winner: Some(winner),
            set1: None,
            set2: None,
            set3: None,
            notes: None,
        }
    }

    /// Attach partial set scores as context for a walkover or
    /// retirement.
    #[must_use]
    pub fn with_partial_sets(
        mut self,
        set1: Option<(u8, u8)>,
        set2: Option<(u8, u8)>,
        set3: Option<(u8, u8)>,
    ) -> Self {
        self.set1 = set1;
        self.set2 = set2;
        self.set3 = set3;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Checks a single typed set score against padel rules.
///
/// Pure and stateless: the same games pair always yields the same
/// verdict.
pub fn validate_set(games: (u8, u8), kind: SetKind) -> Result<(), ScoreError> {
    match kind {
        SetKind::Normal => validate_normal_set(games),
        SetKind::SuperTieBreak => validate_super_tie_break(games),
    }
}

fn validate_normal_set((games_1, games_2): (u8, u8)) -> Result<(), ScoreError> {
    if games_1 == TIE_BREAK_SET_GAMES && games_2 == TIE_BREAK_SET_GAMES {
        return Err(ScoreError::TieBreakRequired);
    }
    if games_1 > TIE_BREAK_SET_GAMES || games_2 > TIE_BREAK_SET_GAMES {
        return Err(ScoreError::TooManyGames);
    }
    if games_1 == games_2 {
        return Err(ScoreError::LevelSet);
    }
    if games_1 < GAMES_PER_SET && games_2 < GAMES_PER_SET {
        return Err(ScoreError::UnfinishedSet);
    }
    let (winner, loser) = if games_1 > games_2 {
        (games_1, games_2)
    } else {
        (games_2, games_1)
    };
    // The only ways a set ends: 6-0 through 6-4, 7-5, or 7-6 after the
    // tie-break.
    match (winner, loser) {
        (6, 0..=4) => Ok(()),
        // 6-5 has to continue to 7-5 or six games all
        (6, 5) => Err(ScoreError::UnfinishedSet),
        (7, 5 | 6) => Ok(()),
        _ => Err(ScoreError::InvalidScore),
    }
}

fn validate_super_tie_break((points_1, points_2): (u8, u8)) -> Result<(), ScoreError> {
    let (winner, loser) = if points_1 > points_2 {
        (points_1, points_2)
    } else {
        (points_2, points_1)
    };
    if winner < SUPER_TIE_BREAK_TARGET {
        return Err(ScoreError::SuperTieBreakTooFew);
    }
    if winner - loser < WIN_MARGIN {
        return Err(ScoreError::SuperTieBreakMargin);
    }
    Ok(())
}

/// Validates a full direct-entry submission and produces the match
/// result.
///
/// All per-set rule failures are collected and returned together so an
/// organizer can fix the whole form in one pass. Walkover and
/// retirement submissions skip numeric validation entirely; their
/// partial scores are carried as context only.
pub fn validate_submission(
    submission: &ScoreSubmission,
    round_kind: RoundKind,
) -> SubmissionResult<MatchResult> {
    match submission.kind {
        SubmissionKind::Played => validate_played(submission, round_kind),
        SubmissionKind::Walkover | SubmissionKind::Retirement => declare_override(submission),
    }
}

fn declare_override(submission: &ScoreSubmission) -> SubmissionResult<MatchResult> {
    let winner = submission.winner.ok_or(SubmissionError::MissingWinner)?;
    info!("recording {} win for side {winner}", submission.kind);
    let result = match submission.kind {
        SubmissionKind::Walkover => MatchResult::walkover(winner, submission.notes.clone()),
        _ => MatchResult::retirement(winner, submission.notes.clone()),
    };
    Ok(result.with_partial_sets(submission.set1, submission.set2, submission.set3))
}

fn validate_played(
    submission: &ScoreSubmission,
    round_kind: RoundKind,
) -> SubmissionResult<MatchResult> {
    let set1 = submission.set1.ok_or(SubmissionError::MissingSet(1))?;
    let set2 = submission.set2.ok_or(SubmissionError::MissingSet(2))?;

    let mut errors = Vec::new();
    for (set_number, games) in [(1, set1), (2, set2)] {
        if let Err(error) = validate_set(games, SetKind::Normal) {
            errors.push(SetError { set_number, error });
        }
    }

    let decider_kind = round_kind.decider_kind();
    if !errors.is_empty() {
        // Sets 1-2 are already broken, so the real decider format is
        // unknowable; still check a typed third set so the organizer
        // gets every problem at once.
        if let Some(games) = submission.set3 {
            if let Err(error) = validate_set(games, decider_kind) {
                errors.push(SetError {
                    set_number: 3,
                    error,
                });
            }
        }
        return Err(SubmissionError::InvalidScores(errors));
    }

    let first = set_winner(set1);
    let second = set_winner(set2);
    let mut sets = vec![
        SetScore::entered(set1, SetKind::Normal, first),
        SetScore::entered(set2, SetKind::Normal, second),
    ];

    if first == second {
        if submission.set3.is_some() {
            return Err(SubmissionError::UnexpectedDecider);
        }
    } else {
        let games = submission.set3.ok_or(SubmissionError::MissingDecider)?;
        if let Err(error) = validate_set(games, decider_kind) {
            return Err(SubmissionError::InvalidScores(vec![SetError {
                set_number: 3,
                error,
            }]));
        }
        sets.push(SetScore::entered(games, decider_kind, set_winner(games)));
    }

    Ok(MatchResult::from_completed_sets(&sets)?)
}

// Validated set scores are never level.
fn set_winner((games_a, games_b): (u8, u8)) -> Side {
    if games_a > games_b { Side::A } else { Side::B }
}
