//! Benchmarks for running complete matches.
//!
//! Both sides are driven by the random policy; the player side goes
//! through `Match::deploy` like any external controller would.

#![allow(missing_docs)]

use std::hint::black_box;

use arena_clash::ai::{OpponentPolicy, PolicyView, RandomOpponent};
use arena_clash::core::{GameRng, RngStream, Team};
use arena_clash::game::{Match, MatchBuilder};
use criterion::{criterion_group, criterion_main, Criterion};

/// Decision interval of the scripted player, in simulated milliseconds.
const PLAYER_STEP_MS: u64 = 500;

/// Play one match to completion and return its length.
fn run_match(seed: u64) -> u64 {
    let mut game = MatchBuilder::new().seed(seed).build();
    let bot = RandomOpponent::from_config(game.config());
    let mut rng = GameRng::new(seed).stream(RngStream::Bot);

    while !game.phase().is_over() {
        let play = {
            let view = PolicyView {
                elixir: game.elixir(Team::Player),
                hand: &game.deck(Team::Player).hand,
                store: game.store(),
            };
            bot.decide(&view, Team::Player, &mut rng)
        };
        if let Some(play) = play {
            let _ = game.deploy(Team::Player, play.slot, play.position.x, play.position.y);
        }
        game.advance(PLAYER_STEP_MS);
    }
    game.now_ms()
}

fn bench_single_match(c: &mut Criterion) {
    c.bench_function("single_match", |b| {
        b.iter(|| black_box(run_match(black_box(42))));
    });
}

fn bench_match_batch(c: &mut Criterion) {
    c.bench_function("10_matches_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                black_box(run_match(black_box(seed)));
            }
        });
    });
}

fn bench_quiet_minute(c: &mut Criterion) {
    // Clock, elixir and scheduler overhead with nothing on the field
    c.bench_function("quiet_minute", |b| {
        b.iter(|| {
            let mut game = MatchBuilder::new()
                .seed(black_box(7))
                .policy(arena_clash::ai::PassiveOpponent)
                .build();
            game.advance(black_box(60_000));
            black_box(game.snapshot())
        });
    });
}

criterion_group!(benches, bench_single_match, bench_match_batch, bench_quiet_minute);
criterion_main!(benches);
