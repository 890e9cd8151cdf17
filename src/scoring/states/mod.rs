//! Live match phase definitions for the scoring FSM.
//!
//! Each state represents one phase of a padel match.

use crate::scoring::entities::Side;

/// Regular game play scored 0/15/30/40 with golden point at 40-40
#[derive(Clone, Copy, Debug)]
pub struct NormalPlay {}

/// The 7-point tie-break played at six games all
#[derive(Clone, Copy, Debug)]
pub struct TieBreakPlay {}

/// The 10-point super tie-break replacing a third set
#[derive(Clone, Copy, Debug)]
pub struct SuperTieBreakPlay {}

/// Terminal state - the match is decided
#[derive(Clone, Copy, Debug)]
pub struct MatchOver {
    pub winner: Side,
}
