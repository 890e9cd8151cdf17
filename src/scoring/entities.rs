//! Domain entities shared by the live engine and the validator.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::constants::{MAX_SETS, SETS_TO_WIN};

/// Type alias for the ids the bracket uses to identify the two
/// competing pairs.
pub type TeamId = Uuid;

/// One of the two competing sides in a match.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::A => "A",
            Self::B => "B",
        };
        write!(f, "{repr}")
    }
}

/// How the bracket round resolves a one set all split.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundKind {
    /// Knockout rounds played out with a full third set.
    KnockoutThirdSet,
    /// Every other round: a super tie-break decides the match.
    Other,
}

impl RoundKind {
    /// Format of the deciding set when the first two sets split 1-1.
    #[must_use]
    pub const fn decider_kind(self) -> SetKind {
        match self {
            Self::KnockoutThirdSet => SetKind::Normal,
            Self::Other => SetKind::SuperTieBreak,
        }
    }
}

/// Format of a single set.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SetKind {
    /// First to 6 games with a two-game lead, tie-break at 6-6.
    #[default]
    Normal,
    /// First to 10 points with a two-point lead; no games are played.
    SuperTieBreak,
}

/// Score of one set.
///
/// A super tie-break set stores the raw point counts in the games
/// fields and never carries a tie-break pair.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetScore {
    pub games_a: u8,
    pub games_b: u8,
    /// Point counts of the tie-break when the set reached 6-6.
    pub tie_break: Option<(u8, u8)>,
    pub kind: SetKind,
    pub winner: Option<Side>,
}

impl SetScore {
    /// A set as typed in direct entry; tie-break point counts are not
    /// collected on the form.
    #[must_use]
    pub fn entered(games: (u8, u8), kind: SetKind, winner: Side) -> Self {
        Self {
            games_a: games.0,
            games_b: games.1,
            tie_break: None,
            kind,
            winner: Some(winner),
        }
    }

    /// Complete sets always have a winner.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn games(&self, side: Side) -> u8 {
        match side {
            Side::A => self.games_a,
            Side::B => self.games_b,
        }
    }

    #[must_use]
    pub fn games_pair(&self) -> (u8, u8) {
        (self.games_a, self.games_b)
    }

    pub(crate) fn add_game(&mut self, side: Side) {
        match side {
            Side::A => self.games_a += 1,
            Side::B => self.games_b += 1,
        }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self.tie_break {
            Some((a, b)) => format!("{}-{} ({a}-{b})", self.games_a, self.games_b),
            None => format!("{}-{}", self.games_a, self.games_b),
        };
        write!(f, "{repr}")
    }
}

/// Game-score label shown for one side.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PointDisplay {
    Zero,
    Fifteen,
    Thirty,
    Forty,
    /// Both sides at 40: sudden death, the next point takes the game.
    GoldenPoint,
    /// Raw running count inside a tie-break or super tie-break.
    Points(u8),
}

impl PointDisplay {
    /// Label for a running point count within a normal game.
    #[must_use]
    pub fn from_game_points(points: u8) -> Self {
        match points {
            0 => Self::Zero,
            1 => Self::Fifteen,
            2 => Self::Thirty,
            _ => Self::Forty,
        }
    }
}

impl fmt::Display for PointDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Zero => "0".to_string(),
            Self::Fifteen => "15".to_string(),
            Self::Thirty => "30".to_string(),
            Self::Forty => "40".to_string(),
            Self::GoldenPoint => "golden point".to_string(),
            Self::Points(points) => points.to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Events that occur while a match is being scored.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ScoreEvent {
    GameWon(Side),
    TieBreakStarted,
    SuperTieBreakStarted,
    SetWon { side: Side, games: (u8, u8) },
    MatchWon(Side),
    PointUndone,
    MatchReset,
}

impl fmt::Display for ScoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::GameWon(side) => format!("game to side {side}"),
            Self::TieBreakStarted => "six games all, tie-break".to_string(),
            Self::SuperTieBreakStarted => {
                "one set all, super tie-break decides the match".to_string()
            }
            Self::SetWon { side, games } => {
                format!("set to side {side}, {}-{}", games.0, games.1)
            }
            Self::MatchWon(side) => format!("match to side {side}"),
            Self::PointUndone => "last point undone".to_string(),
            Self::MatchReset => "match reset".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Immutable per-match context supplied by the bracket before any
/// scoring begins.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchSettings {
    pub round_kind: RoundKind,
    pub side_a: TeamId,
    pub side_b: TeamId,
}

impl MatchSettings {
    #[must_use]
    pub const fn new(round_kind: RoundKind, side_a: TeamId, side_b: TeamId) -> Self {
        Self {
            round_kind,
            side_a,
            side_b,
        }
    }

    /// The id registered for `side`.
    #[must_use]
    pub const fn team_id(&self, side: Side) -> TeamId {
        match side {
            Side::A => self.side_a,
            Side::B => self.side_b,
        }
    }
}

/// Failures producing a final result from a list of sets
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum FinalizeError {
    #[error("a match result needs 2 or 3 sets, got {0}")]
    WrongSetCount(usize),
    #[error("set {0} has no winner")]
    IncompleteSet(usize),
    #[error("no side won 2 sets ({wins_a}-{wins_b})")]
    Undecided { wins_a: usize, wins_b: usize },
}

/// The immutable outcome of a completed match, handed to whatever
/// persists results and advances the bracket.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchResult {
    pub set1: Option<(u8, u8)>,
    pub set2: Option<(u8, u8)>,
    pub set3: Option<(u8, u8)>,
    pub winner: Side,
    pub is_walkover: bool,
    pub is_retirement: bool,
    pub notes: Option<String>,
}

impl MatchResult {
    /// Builds the result for a match played to natural completion.
    ///
    /// Works identically whether the sets came from the live engine or
    /// from direct entry: it only requires that every set is complete
    /// and that one side holds two set wins.
    pub fn from_completed_sets(sets: &[SetScore]) -> Result<Self, FinalizeError> {
        if !(SETS_TO_WIN..=MAX_SETS).contains(&sets.len()) {
            return Err(FinalizeError::WrongSetCount(sets.len()));
        }
        let mut wins_a = 0;
        let mut wins_b = 0;
        for (i, set) in sets.iter().enumerate() {
            match set.winner {
                Some(Side::A) => wins_a += 1,
                Some(Side::B) => wins_b += 1,
                None => return Err(FinalizeError::IncompleteSet(i + 1)),
            }
        }
        let winner = if wins_a >= SETS_TO_WIN {
            Side::A
        } else if wins_b >= SETS_TO_WIN {
            Side::B
        } else {
            return Err(FinalizeError::Undecided { wins_a, wins_b });
        };
        info!("match finalized, side {winner} wins in {} sets", sets.len());
        Ok(Self {
            set1: sets.first().map(SetScore::games_pair),
            set2: sets.get(1).map(SetScore::games_pair),
            set3: sets.get(2).map(SetScore::games_pair),
            winner,
            is_walkover: false,
            is_retirement: false,
            notes: None,
        })
    }

    /// A match awarded without play, one side absent.
    #[must_use]
    pub fn walkover(winner: Side, notes: Option<String>) -> Self {
        Self {
            set1: None,
            set2: None,
            set3: None,
            winner,
            is_walkover: true,
            is_retirement: false,
            notes,
        }
    }

    /// A match ended early through injury or withdrawal.
    #[must_use]
    pub fn retirement(winner: Side, notes: Option<String>) -> Self {
        Self {
            set1: None,
            set2: None,
            set3: None,
            winner,
            is_walkover: false,
            is_retirement: true,
            notes,
        }
    }

    /// Attaches partial set scores as informational context on a
    /// walkover or retirement result. The scores are not validated.
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
}
