use criterion::{Criterion, criterion_group, criterion_main};
use padel_scoring::{
    MatchSettings, MatchState, RoundKind, ScoreSubmission, Side, validate_submission,
};
use uuid::Uuid;

/// Point stream for a straight-sets match (12 games of 4 points).
fn straight_sets_stream() -> Vec<Side> {
    vec![Side::A; 48]
}

/// Point stream that goes the distance: a tie-break first set, a
/// second set for the other side, and a full super tie-break.
fn full_distance_stream() -> Vec<Side> {
    let mut stream = Vec::new();
    // Alternating games to 6-6.
    for _ in 0..6 {
        stream.extend([Side::A; 4]);
        stream.extend([Side::B; 4]);
    }
    // Tie-break to 8-6.
    for _ in 0..6 {
        stream.push(Side::A);
        stream.push(Side::B);
    }
    stream.extend([Side::A; 2]);
    // Second set to side B.
    stream.extend([Side::B; 24]);
    // Super tie-break that drags to 11-9.
    for _ in 0..9 {
        stream.push(Side::A);
        stream.push(Side::B);
    }
    stream.extend([Side::A; 2]);
    stream
}

fn run_match(stream: &[Side]) -> MatchState {
    let settings = MatchSettings::new(RoundKind::Other, Uuid::nil(), Uuid::nil());
    let mut state = MatchState::from(settings);
    for side in stream {
        state = state.add_point(*side);
    }
    state
}

fn bench_straight_sets_match(c: &mut Criterion) {
    let stream = straight_sets_stream();
    c.bench_function("live_straight_sets", |b| {
        b.iter(|| run_match(&stream).completed_result())
    });
}

fn bench_full_distance_match(c: &mut Criterion) {
    let stream = full_distance_stream();
    c.bench_function("live_full_distance", |b| {
        b.iter(|| run_match(&stream).completed_result())
    });
}

fn bench_undo_heavy_match(c: &mut Criterion) {
    let stream = straight_sets_stream();
    c.bench_function("live_undo_every_point", |b| {
        b.iter(|| {
            let settings = MatchSettings::new(RoundKind::Other, Uuid::nil(), Uuid::nil());
            let mut state = MatchState::from(settings);
            for side in &stream {
                state = state.add_point(*side).undo_last_point().add_point(*side);
            }
            state
        })
    });
}

fn bench_validate_submission(c: &mut Criterion) {
    let submission = ScoreSubmission::played((6, 4), (4, 6), Some((10, 8)));
    c.bench_function("validate_full_submission", |b| {
        b.iter(|| validate_submission(&submission, RoundKind::Other))
    });
}

criterion_group!(
    benches,
    bench_straight_sets_match,
    bench_full_distance_match,
    bench_undo_heavy_match,
    bench_validate_submission
);
criterion_main!(benches);
