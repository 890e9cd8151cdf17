//! Full end-to-end live scoring integration tests.
//!
//! Drives complete padel matches point by point through the FSM,
//! checking phase transitions, set bookkeeping, undo, and the final
//! result shape.

use padel_scoring::{
    MatchSettings, MatchState, Phase, PointDisplay, RoundKind, ScoreEvent, ScoreReadout, SetKind,
    Side,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

fn settings(round_kind: RoundKind) -> MatchSettings {
    MatchSettings::new(round_kind, Uuid::new_v4(), Uuid::new_v4())
}

/// Feed `count` consecutive points to `side`.
fn feed(mut state: MatchState, side: Side, count: usize) -> MatchState {
    for _ in 0..count {
        state = state.add_point(side);
    }
    state
}

/// Win one golden-point game for `side` from 0-0 (4 straight points).
fn win_game(state: MatchState, side: Side) -> MatchState {
    feed(state, side, 4)
}

/// Win a whole normal set for `side` with 6 straight games.
fn win_set(mut state: MatchState, side: Side) -> MatchState {
    for _ in 0..6 {
        state = win_game(state, side);
    }
    state
}

/// Everything about the state that a scoreboard could observe.
fn observe(state: &MatchState) -> (Phase, [padel_scoring::SetScore; 3], PointDisplay, PointDisplay) {
    (
        state.phase(),
        *state.set_scores(),
        state.point_display(Side::A),
        state.point_display(Side::B),
    )
}

// ============================================================================
// Games and Point Display
// ============================================================================

#[test]
fn test_four_straight_points_win_a_game() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = feed(state, Side::A, 4);

    assert_eq!(state.phase(), Phase::Normal);
    assert_eq!(state.set_scores()[0].games_pair(), (1, 0));
    assert_eq!(state.point_display(Side::A), PointDisplay::Zero);
    assert_eq!(state.point_display(Side::B), PointDisplay::Zero);
}

#[test]
fn test_point_display_progression() {
    let mut state = MatchState::from(settings(RoundKind::Other));

    state = state.add_point(Side::A);
    assert_eq!(state.point_display(Side::A), PointDisplay::Fifteen);
    state = state.add_point(Side::A);
    assert_eq!(state.point_display(Side::A), PointDisplay::Thirty);
    state = state.add_point(Side::A);
    assert_eq!(state.point_display(Side::A), PointDisplay::Forty);
    assert_eq!(state.point_display(Side::B), PointDisplay::Zero);
}

#[test]
fn test_forty_all_is_a_single_golden_point_label() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = feed(state, Side::A, 3);
    state = feed(state, Side::B, 3);

    // No deuce/advantage: both sides show the same sudden death label.
    assert_eq!(state.point_display(Side::A), PointDisplay::GoldenPoint);
    assert_eq!(state.point_display(Side::B), PointDisplay::GoldenPoint);
}

#[test]
fn test_golden_point_decides_the_game_outright() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = feed(state, Side::A, 3);
    state = feed(state, Side::B, 3);
    state = state.add_point(Side::B);

    assert_eq!(state.set_scores()[0].games_pair(), (0, 1));
    assert_eq!(state.point_display(Side::A), PointDisplay::Zero);
    assert_eq!(state.point_display(Side::B), PointDisplay::Zero);
}

// ============================================================================
// Sets and Tie-Break
// ============================================================================

#[test]
fn test_six_love_takes_the_set() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_set(state, Side::A);

    let first = state.set_scores()[0];
    assert_eq!(first.games_pair(), (6, 0));
    assert_eq!(first.winner, Some(Side::A));
    assert_eq!(state.phase(), Phase::Normal);
    assert!(!state.is_finished());
}

#[test]
fn test_six_all_enters_tie_break_and_seven_points_take_it() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    for _ in 0..6 {
        state = win_game(state, Side::A);
        state = win_game(state, Side::B);
    }

    assert_eq!(state.phase(), Phase::TieBreak);
    assert_eq!(state.point_display(Side::A), PointDisplay::Points(0));

    state = feed(state, Side::A, 7);
    let first = state.set_scores()[0];
    assert_eq!(first.games_pair(), (7, 6));
    assert_eq!(first.tie_break, Some((7, 0)));
    assert_eq!(first.winner, Some(Side::A));
    assert_eq!(state.phase(), Phase::Normal);
    assert_eq!(state.set_scores()[1].games_pair(), (0, 0));
}

#[test]
fn test_tie_break_needs_a_two_point_lead() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    for _ in 0..6 {
        state = win_game(state, Side::A);
        state = win_game(state, Side::B);
    }

    // 6-6 in the tie-break, then 7-6: still going.
    for _ in 0..6 {
        state = state.add_point(Side::A);
        state = state.add_point(Side::B);
    }
    state = state.add_point(Side::A);
    assert_eq!(state.phase(), Phase::TieBreak);
    assert_eq!(state.point_display(Side::A), PointDisplay::Points(7));

    // 8-6 ends it.
    state = state.add_point(Side::A);
    assert_eq!(state.set_scores()[0].tie_break, Some((8, 6)));
    assert_eq!(state.set_scores()[0].games_pair(), (7, 6));
}

// ============================================================================
// Deciding Set and Match Completion
// ============================================================================

#[test]
fn test_straight_sets_finish_the_match() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_set(state, Side::A);
    state = win_set(state, Side::A);

    assert!(state.is_finished());
    assert_eq!(state.winner(), Some(Side::A));
    assert_eq!(state.phase(), Phase::Finished(Side::A));

    let result = state.completed_result().unwrap();
    assert_eq!(result.set1, Some((6, 0)));
    assert_eq!(result.set2, Some((6, 0)));
    assert_eq!(result.set3, None);
    assert_eq!(result.winner, Side::A);
    assert!(!result.is_walkover);
    assert!(!result.is_retirement);
}

#[test]
fn test_one_set_all_starts_super_tie_break_outside_knockouts() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_set(state, Side::A);
    state = win_set(state, Side::B);

    assert_eq!(state.phase(), Phase::SuperTieBreak);
    assert_eq!(state.set_scores()[2].kind, SetKind::SuperTieBreak);

    state = feed(state, Side::A, 10);
    assert!(state.is_finished());
    let result = state.completed_result().unwrap();
    assert_eq!(result.set3, Some((10, 0)));
    assert_eq!(result.winner, Side::A);
}

#[test]
fn test_super_tie_break_needs_a_two_point_lead() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_set(state, Side::A);
    state = win_set(state, Side::B);

    for _ in 0..9 {
        state = state.add_point(Side::A);
        state = state.add_point(Side::B);
    }
    state = state.add_point(Side::A);
    // 10-9 is not enough.
    assert!(!state.is_finished());
    assert_eq!(state.phase(), Phase::SuperTieBreak);

    state = state.add_point(Side::A);
    assert!(state.is_finished());
    assert_eq!(state.completed_result().unwrap().set3, Some((11, 9)));
}

#[test]
fn test_knockout_rounds_play_a_full_third_set() {
    let mut state = MatchState::from(settings(RoundKind::KnockoutThirdSet));
    state = win_set(state, Side::A);
    state = win_set(state, Side::B);

    assert_eq!(state.phase(), Phase::Normal);
    assert_eq!(state.set_scores()[2].kind, SetKind::Normal);

    state = win_set(state, Side::B);
    assert!(state.is_finished());
    let result = state.completed_result().unwrap();
    assert_eq!(result.set3, Some((0, 6)));
    assert_eq!(result.winner, Side::B);
}

#[test]
fn test_points_after_the_match_are_ignored() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_set(state, Side::A);
    state = win_set(state, Side::A);

    let before = observe(&state);
    let history = state.history_len();
    let result = state.completed_result();

    state = state.add_point(Side::B);
    assert_eq!(observe(&state), before);
    assert_eq!(state.history_len(), history);
    assert_eq!(state.completed_result(), result);
}

// ============================================================================
// Undo and Reset
// ============================================================================

#[test]
fn test_undo_on_a_fresh_match_is_a_noop() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = state.undo_last_point();

    assert_eq!(state.phase(), Phase::Normal);
    assert_eq!(state.history_len(), 0);
    assert_eq!(state.set_scores()[0].games_pair(), (0, 0));
}

#[test]
fn test_undo_restores_the_exact_prior_state() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = feed(state, Side::A, 2);
    state = state.add_point(Side::B);

    let before = observe(&state);
    let history = state.history_len();

    state = state.add_point(Side::B);
    state = state.undo_last_point();

    assert_eq!(observe(&state), before);
    assert_eq!(state.history_len(), history);
}

#[test]
fn test_undo_reverses_a_match_ending_point() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_set(state, Side::A);
    for _ in 0..5 {
        state = win_game(state, Side::A);
    }
    state = feed(state, Side::A, 3);

    let before = observe(&state);
    state = state.add_point(Side::A);
    assert!(state.is_finished());

    state = state.undo_last_point();
    assert!(!state.is_finished());
    assert_eq!(state.winner(), None);
    assert_eq!(observe(&state), before);
    assert_eq!(state.point_display(Side::A), PointDisplay::Forty);
}

#[test]
fn test_undo_steps_back_across_a_phase_boundary() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    for _ in 0..6 {
        state = win_game(state, Side::A);
        state = win_game(state, Side::B);
    }
    assert_eq!(state.phase(), Phase::TieBreak);

    // Undo the game that made it 6-6.
    state = state.undo_last_point();
    assert_eq!(state.phase(), Phase::Normal);
    assert_eq!(state.set_scores()[0].games_pair(), (6, 5));
    assert_eq!(state.point_display(Side::B), PointDisplay::Forty);
}

#[test]
fn test_reset_discards_score_and_history_but_keeps_settings() {
    let match_settings = settings(RoundKind::KnockoutThirdSet);
    let mut state = MatchState::from(match_settings);
    state = win_set(state, Side::B);
    state = feed(state, Side::A, 7);

    state = state.reset();
    assert_eq!(state.phase(), Phase::Normal);
    assert_eq!(state.history_len(), 0);
    assert_eq!(state.set_scores()[0].games_pair(), (0, 0));
    assert_eq!(state.settings(), &match_settings);
}

// ============================================================================
// Events and Determinism
// ============================================================================

#[test]
fn test_score_events_for_a_scripted_match() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_game(state, Side::A);

    let events: Vec<ScoreEvent> = state.drain_events().into();
    assert_eq!(events, vec![ScoreEvent::GameWon(Side::A)]);

    state = win_set(state, Side::A);
    state = win_set(state, Side::A);
    let events: Vec<ScoreEvent> = state.drain_events().into();
    assert!(events.contains(&ScoreEvent::SetWon {
        side: Side::A,
        games: (6, 0)
    }));
    assert_eq!(events.last(), Some(&ScoreEvent::MatchWon(Side::A)));
}

#[test]
fn test_drained_events_do_not_repeat() {
    let mut state = MatchState::from(settings(RoundKind::Other));
    state = win_game(state, Side::B);

    assert_eq!(state.drain_events().len(), 1);
    assert!(state.drain_events().is_empty());
}

#[test]
fn test_identical_point_streams_give_identical_matches() {
    let mut rng = StdRng::seed_from_u64(7);
    let stream: Vec<Side> = (0..500)
        .map(|_| if rng.random_bool(0.5) { Side::A } else { Side::B })
        .collect();
    let match_settings = settings(RoundKind::Other);

    let mut first = MatchState::from(match_settings);
    let mut second = MatchState::from(match_settings);
    for side in &stream {
        first = first.add_point(*side);
        second = second.add_point(*side);
    }

    assert_eq!(observe(&first), observe(&second));
    assert_eq!(first.completed_result(), second.completed_result());
}
