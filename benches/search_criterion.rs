use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use neural_chess::game_state::game_state::GameState;
use neural_chess::search::board_scoring::{BoardScorer, StandardScorer};
use neural_chess::search::minimax::{search_best_move, SearchConfig};

const POSITIONS: &[(&str, &str)] = &[
    (
        "opening",
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    ),
    (
        "middlegame",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ),
    ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for (name, fen) in POSITIONS {
        let mut game = GameState::from_fen(fen).expect("benchmark FEN should parse");
        group.bench_function(*name, |b| b.iter(|| black_box(StandardScorer.score(&mut game))));
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(10);

    for (name, fen) in POSITIONS {
        let game = GameState::from_fen(fen).expect("benchmark FEN should parse");
        for quiescence in [false, true] {
            let config = SearchConfig {
                depth: 3,
                quiescence,
                ..SearchConfig::default()
            };
            let label = format!("{name}_d3{}", if quiescence { "_q" } else { "" });
            let mut bench_game = game.clone();

            group.bench_with_input(BenchmarkId::from_parameter(label), &config, |b, config| {
                b.iter(|| {
                    let result = search_best_move(black_box(&mut bench_game), &StandardScorer, *config)
                        .expect("benchmark position has legal moves");
                    black_box(result.best_move)
                });
            });
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_evaluation, bench_search);
criterion_main!(search_benches);
