//! Live scoring state machine.
//!
//! The FSM pairs shared match data with a phase-specific state type.
//! Applying a point consumes the current state and returns the next
//! one; a snapshot of the prior state is recorded before every
//! accepted point so the engine can roll a single point back exactly,
//! including one that decided the match.

use std::collections::VecDeque;

use enum_dispatch::enum_dispatch;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::constants::{
    GAMES_PER_SET, GOLDEN_POINT_FLOOR, MAX_SETS, POINTS_PER_GAME, SETS_TO_WIN,
    SUPER_TIE_BREAK_TARGET, TIE_BREAK_SET_GAMES, TIE_BREAK_TARGET, WIN_MARGIN,
};
use super::entities::{
    MatchResult, MatchSettings, PointDisplay, RoundKind, ScoreEvent, SetKind, SetScore, Side,
};
use super::states::{MatchOver, NormalPlay, SuperTieBreakPlay, TieBreakPlay};

/// Plain phase tag used for introspection and snapshots.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Phase {
    Normal,
    TieBreak,
    SuperTieBreak,
    Finished(Side),
}

/// Deep copy of the scoring state, captured immediately before a point
/// is applied.
#[derive(Clone, Debug)]
pub(super) struct Snapshot {
    sets: [SetScore; MAX_SETS],
    current_set: usize,
    points_a: u8,
    points_b: u8,
    phase: Phase,
}

/// Mutable match data shared across all live phases.
#[derive(Clone, Debug)]
pub struct MatchData {
    pub(super) settings: MatchSettings,
    pub(super) sets: [SetScore; MAX_SETS],
    pub(super) current_set: usize,
    pub(super) points_a: u8,
    pub(super) points_b: u8,
    /// Stack of pre-point snapshots; exactly one push per accepted
    /// point, popped on undo, discarded on reset.
    pub(super) history: Vec<Snapshot>,
    /// Queue of score events that give more insight as to what kind
    /// of score changes occur due to applied points.
    pub(super) events: VecDeque<ScoreEvent>,
}

impl MatchData {
    fn new(settings: MatchSettings) -> Self {
        Self {
            settings,
            sets: [SetScore::default(); MAX_SETS],
            current_set: 0,
            points_a: 0,
            points_b: 0,
            history: Vec::new(),
            events: VecDeque::new(),
        }
    }

    fn points(&self, side: Side) -> u8 {
        match side {
            Side::A => self.points_a,
            Side::B => self.points_b,
        }
    }

    fn bump_point(&mut self, side: Side) {
        match side {
            Side::A => self.points_a += 1,
            Side::B => self.points_b += 1,
        }
    }

    fn reset_points(&mut self) {
        self.points_a = 0;
        self.points_b = 0;
    }

    fn push_snapshot(&mut self, phase: Phase) {
        self.history.push(Snapshot {
            sets: self.sets,
            current_set: self.current_set,
            points_a: self.points_a,
            points_b: self.points_b,
            phase,
        });
    }

    fn restore(&mut self, snapshot: Snapshot) -> Phase {
        self.sets = snapshot.sets;
        self.current_set = snapshot.current_set;
        self.points_a = snapshot.points_a;
        self.points_b = snapshot.points_b;
        snapshot.phase
    }

    fn current_set_mut(&mut self) -> &mut SetScore {
        &mut self.sets[self.current_set]
    }

    fn sets_won(&self) -> (usize, usize) {
        let mut wins_a = 0;
        let mut wins_b = 0;
        for set in &self.sets {
            match set.winner {
                Some(Side::A) => wins_a += 1,
                Some(Side::B) => wins_b += 1,
                None => {}
            }
        }
        (wins_a, wins_b)
    }

    /// Records the current set's winner and works out what comes next:
    /// the match is over at two set wins, a 1-1 split opens the decider
    /// in the round's format, anything else opens a normal set.
    fn complete_current_set(&mut self, winner: Side) -> SetOutcome {
        self.sets[self.current_set].winner = Some(winner);
        let games = self.sets[self.current_set].games_pair();
        let set_number = self.current_set + 1;
        self.reset_points();
        self.events.push_back(ScoreEvent::SetWon {
            side: winner,
            games,
        });
        info!(
            "set {set_number} to side {winner}: {}-{}",
            games.0, games.1
        );
        let (wins_a, wins_b) = self.sets_won();
        if wins_a >= SETS_TO_WIN || wins_b >= SETS_TO_WIN {
            let match_winner = if wins_a > wins_b { Side::A } else { Side::B };
            self.events.push_back(ScoreEvent::MatchWon(match_winner));
            info!("match to side {match_winner}");
            return SetOutcome::MatchWon(match_winner);
        }
        self.current_set += 1;
        if wins_a == 1 && wins_b == 1 && self.settings.round_kind == RoundKind::Other {
            self.sets[self.current_set].kind = SetKind::SuperTieBreak;
            self.events.push_back(ScoreEvent::SuperTieBreakStarted);
            info!("one set all, super tie-break");
            SetOutcome::SuperTieBreakDecider
        } else {
            SetOutcome::NextSetNormal
        }
    }
}

enum SetOutcome {
    MatchWon(Side),
    NextSetNormal,
    SuperTieBreakDecider,
}

/// Per-phase presentation of the running point score.
pub trait PointPresentation {
    fn point_display(&self, data: &MatchData, side: Side) -> PointDisplay;
}

impl PointPresentation for NormalPlay {
    fn point_display(&self, data: &MatchData, side: Side) -> PointDisplay {
        // 40-40 is shown as a single golden point label for both sides,
        // never as deuce/advantage.
        if data.points_a >= GOLDEN_POINT_FLOOR && data.points_b >= GOLDEN_POINT_FLOOR {
            return PointDisplay::GoldenPoint;
        }
        PointDisplay::from_game_points(data.points(side))
    }
}

impl PointPresentation for TieBreakPlay {
    fn point_display(&self, data: &MatchData, side: Side) -> PointDisplay {
        PointDisplay::Points(data.points(side))
    }
}

impl PointPresentation for SuperTieBreakPlay {
    fn point_display(&self, data: &MatchData, side: Side) -> PointDisplay {
        PointDisplay::Points(data.points(side))
    }
}

impl PointPresentation for MatchOver {
    fn point_display(&self, data: &MatchData, side: Side) -> PointDisplay {
        PointDisplay::from_game_points(data.points(side))
    }
}

/// Read-only access to the running score, independent of phase.
#[enum_dispatch]
pub trait ScoreReadout {
    /// Game-score label for one side.
    fn point_display(&self, side: Side) -> PointDisplay;

    /// All three set slots, completed or not.
    fn set_scores(&self) -> &[SetScore; MAX_SETS];

    /// Drain queued score events.
    fn drain_events(&mut self) -> VecDeque<ScoreEvent>;

    /// Number of points that can currently be undone.
    fn history_len(&self) -> usize;

    /// The immutable per-match settings.
    fn settings(&self) -> &MatchSettings;
}

/// A live padel match in phase `T`, pairing shared data with the
/// phase-specific state.
#[derive(Clone, Debug)]
pub struct Match<T> {
    pub(super) data: MatchData,
    pub(super) state: T,
}

impl<T: PointPresentation> ScoreReadout for Match<T> {
    fn point_display(&self, side: Side) -> PointDisplay {
        self.state.point_display(&self.data, side)
    }

    fn set_scores(&self) -> &[SetScore; MAX_SETS] {
        &self.data.sets
    }

    fn drain_events(&mut self) -> VecDeque<ScoreEvent> {
        std::mem::take(&mut self.data.events)
    }

    fn history_len(&self) -> usize {
        self.data.history.len()
    }

    fn settings(&self) -> &MatchSettings {
        &self.data.settings
    }
}

impl<T> Match<T> {
    /// Finishes the current set for `winner` and moves to whatever the
    /// shared completion handling decides comes next.
    fn conclude_set(self, winner: Side) -> MatchState {
        let mut data = self.data;
        match data.complete_current_set(winner) {
            SetOutcome::MatchWon(match_winner) => MatchState::Finished(Match {
                data,
                state: MatchOver {
                    winner: match_winner,
                },
            }),
            SetOutcome::NextSetNormal => MatchState::Normal(Match {
                data,
                state: NormalPlay {},
            }),
            SetOutcome::SuperTieBreakDecider => MatchState::SuperTieBreak(Match {
                data,
                state: SuperTieBreakPlay {},
            }),
        }
    }
}

// Entering the tie-break at six games all. Points were already reset
// when the twelfth game was recorded.
impl From<Match<NormalPlay>> for Match<TieBreakPlay> {
    fn from(value: Match<NormalPlay>) -> Self {
        Self {
            data: value.data,
            state: TieBreakPlay {},
        }
    }
}

impl Match<NormalPlay> {
    fn apply_point(mut self, side: Side) -> MatchState {
        self.data.push_snapshot(Phase::Normal);
        // Three-way branch: golden point (both sides already at 40)
        // decides the game outright; otherwise the game is won at 4+
        // points while the other side is short of 40.
        let golden = self.data.points_a >= GOLDEN_POINT_FLOOR
            && self.data.points_b >= GOLDEN_POINT_FLOOR;
        self.data.bump_point(side);
        let game_won = golden
            || (self.data.points(side) >= POINTS_PER_GAME
                && self.data.points(side.opponent()) < GOLDEN_POINT_FLOOR);
        if !game_won {
            return MatchState::Normal(self);
        }
        self.win_game(side)
    }

    fn win_game(mut self, side: Side) -> MatchState {
        self.data.reset_points();
        let set_number = self.data.current_set + 1;
        let set = self.data.current_set_mut();
        set.add_game(side);
        let (games_a, games_b) = set.games_pair();
        let games_won = set.games(side);
        let games_lost = set.games(side.opponent());
        debug!("game to side {side}, set {set_number} now {games_a}-{games_b}");
        self.data.events.push_back(ScoreEvent::GameWon(side));
        if games_won >= GAMES_PER_SET && games_won - games_lost >= WIN_MARGIN {
            self.conclude_set(side)
        } else if games_won == GAMES_PER_SET && games_lost == GAMES_PER_SET {
            self.data.events.push_back(ScoreEvent::TieBreakStarted);
            info!("set {set_number} at six games all, tie-break");
            MatchState::TieBreak(self.into())
        } else {
            MatchState::Normal(self)
        }
    }
}

impl Match<TieBreakPlay> {
    fn apply_point(mut self, side: Side) -> MatchState {
        self.data.push_snapshot(Phase::TieBreak);
        self.data.bump_point(side);
        let scored = self.data.points(side);
        let other = self.data.points(side.opponent());
        if scored >= TIE_BREAK_TARGET && scored - other >= WIN_MARGIN {
            let points = (self.data.points_a, self.data.points_b);
            let set = self.data.current_set_mut();
            set.tie_break = Some(points);
            // The tie-break winner takes the set seven games to six.
            match side {
                Side::A => {
                    set.games_a = TIE_BREAK_SET_GAMES;
                    set.games_b = GAMES_PER_SET;
                }
                Side::B => {
                    set.games_b = TIE_BREAK_SET_GAMES;
                    set.games_a = GAMES_PER_SET;
                }
            }
            self.conclude_set(side)
        } else {
            MatchState::TieBreak(self)
        }
    }
}

impl Match<SuperTieBreakPlay> {
    fn apply_point(mut self, side: Side) -> MatchState {
        self.data.push_snapshot(Phase::SuperTieBreak);
        self.data.bump_point(side);
        let scored = self.data.points(side);
        let other = self.data.points(side.opponent());
        if scored >= SUPER_TIE_BREAK_TARGET && scored - other >= WIN_MARGIN {
            // The raw point counts stand in for games on the decider.
            let (points_a, points_b) = (self.data.points_a, self.data.points_b);
            let set = self.data.current_set_mut();
            set.games_a = points_a;
            set.games_b = points_b;
            self.conclude_set(side)
        } else {
            MatchState::SuperTieBreak(self)
        }
    }
}

/// A live padel match, dispatching operations to the current phase.
///
/// All transitions consume the state and return the next one:
///
/// ```
/// use padel_scoring::{MatchSettings, MatchState, RoundKind, ScoreReadout, Side};
/// use uuid::Uuid;
///
/// let settings = MatchSettings::new(RoundKind::Other, Uuid::new_v4(), Uuid::new_v4());
/// let mut state = MatchState::from(settings);
/// for _ in 0..4 {
///     state = state.add_point(Side::A);
/// }
/// assert_eq!(state.set_scores()[0].games_a, 1);
/// ```
#[enum_dispatch(ScoreReadout)]
#[derive(Clone, Debug)]
pub enum MatchState {
    Normal(Match<NormalPlay>),
    TieBreak(Match<TieBreakPlay>),
    SuperTieBreak(Match<SuperTieBreakPlay>),
    Finished(Match<MatchOver>),
}

impl MatchState {
    /// Fresh match with the given settings.
    #[must_use]
    pub fn new(settings: MatchSettings) -> Self {
        Self::Normal(Match {
            data: MatchData::new(settings),
            state: NormalPlay {},
        })
    }

    /// Applies one point to `side`.
    ///
    /// A snapshot of the prior state is recorded first so the point
    /// can be undone. Calling this after the match is decided is a
    /// no-op by contract; callers should check
    /// [`MatchState::is_finished`] to avoid wasted events, but safety
    /// does not depend on it.
    #[must_use]
    pub fn add_point(self, side: Side) -> Self {
        match self {
            Self::Normal(state) => state.apply_point(side),
            Self::TieBreak(state) => state.apply_point(side),
            Self::SuperTieBreak(state) => state.apply_point(side),
            finished @ Self::Finished(_) => finished,
        }
    }

    /// Rolls back the most recently applied point, restoring every
    /// field including phase and winner. Undoing a match-ending point
    /// un-finishes the match. No-op when nothing has been scored.
    #[must_use]
    pub fn undo_last_point(self) -> Self {
        let current = self.phase();
        let mut data = self.into_data();
        match data.history.pop() {
            Some(snapshot) => {
                let phase = data.restore(snapshot);
                data.events.push_back(ScoreEvent::PointUndone);
                debug!("last point undone");
                Self::assemble(data, phase)
            }
            None => Self::assemble(data, current),
        }
    }

    /// Discards all state, history included, and starts over with the
    /// same settings.
    #[must_use]
    pub fn reset(self) -> Self {
        let mut data = MatchData::new(self.into_data().settings);
        data.events.push_back(ScoreEvent::MatchReset);
        info!("match reset");
        Self::Normal(Match {
            data,
            state: NormalPlay {},
        })
    }

    /// Current phase tag.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Normal(_) => Phase::Normal,
            Self::TieBreak(_) => Phase::TieBreak,
            Self::SuperTieBreak(_) => Phase::SuperTieBreak,
            Self::Finished(state) => Phase::Finished(state.state.winner),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::Finished(state) => Some(state.state.winner),
            _ => None,
        }
    }

    /// The final result, available once the match is decided.
    #[must_use]
    pub fn completed_result(&self) -> Option<MatchResult> {
        match self {
            Self::Finished(state) => {
                let completed: Vec<SetScore> = state
                    .data
                    .sets
                    .iter()
                    .copied()
                    .filter(SetScore::is_complete)
                    .collect();
                MatchResult::from_completed_sets(&completed).ok()
            }
            _ => None,
        }
    }

    fn into_data(self) -> MatchData {
        match self {
            Self::Normal(state) => state.data,
            Self::TieBreak(state) => state.data,
            Self::SuperTieBreak(state) => state.data,
            Self::Finished(state) => state.data,
        }
    }

    fn assemble(data: MatchData, phase: Phase) -> Self {
        match phase {
            Phase::Normal => Self::Normal(Match {
                data,
                state: NormalPlay {},
            }),
            Phase::TieBreak => Self::TieBreak(Match {
                data,
                state: TieBreakPlay {},
            }),
            Phase::SuperTieBreak => Self::SuperTieBreak(Match {
                data,
                state: SuperTieBreakPlay {},
            }),
            Phase::Finished(winner) => Self::Finished(Match {
                data,
                state: MatchOver { winner },
            }),
        }
    }
}

impl From<MatchSettings> for MatchState {
    fn from(value: MatchSettings) -> Self {
        Self::new(value)
    }
}
