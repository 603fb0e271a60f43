//! Benchmarks for full seeded games and the move resolver.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ludo_engine::core::{Board, GameConfig, TeamId};
use ludo_engine::dice::DiceRoll;
use ludo_engine::game::Game;
use ludo_engine::players::{FirstLegal, MaxProgress, RandomLegal};
use ludo_engine::rules::{legal_moves, resolve_move};

fn config(seed: u64) -> GameConfig {
    GameConfig::default().with_seed(seed).with_max_turns(100_000)
}

fn bench_single_game(c: &mut Criterion) {
    c.bench_function("game_4p_first_legal", |b| {
        b.iter(|| {
            let mut game = Game::new(&TeamId::ALL, config(black_box(42))).unwrap();
            black_box(game.run_to_completion(&mut FirstLegal).unwrap())
        });
    });

    c.bench_function("game_4p_max_progress", |b| {
        b.iter(|| {
            let mut game = Game::new(&TeamId::ALL, config(black_box(42))).unwrap();
            black_box(game.run_to_completion(&mut MaxProgress).unwrap())
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    c.bench_function("10_games_2p_random", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let teams = [TeamId::ALL[0], TeamId::ALL[2]];
                let mut game = Game::new(&teams, config(seed)).unwrap();
                black_box(game.run_to_completion(&mut RandomLegal::new(seed)).unwrap());
            }
        });
    });
}

fn bench_resolve(c: &mut Criterion) {
    let board = Board::from_positions(
        &TeamId::ALL,
        [[10, 0, 30, 50], [51, 51, 3, 0], [17, 28, 0, 0], [4, 14, 40, 0]],
    )
    .unwrap();
    let team = TeamId::ALL[0];

    c.bench_function("resolve_all_rolls", |b| {
        b.iter(|| {
            for face in 1..=6 {
                let roll = DiceRoll::new(face).unwrap();
                for piece in legal_moves(black_box(&board), team, roll) {
                    black_box(resolve_move(&board, team, roll, piece).unwrap());
                }
            }
        });
    });
}

criterion_group!(benches, bench_single_game, bench_game_batch, bench_resolve);
criterion_main!(benches);
