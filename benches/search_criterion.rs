use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use elemental_chess::game_state::chess_types::*;
use elemental_chess::search::board_scoring::MaterialPstScorer;
use elemental_chess::search::minimax::{minimax_search, SearchConfig};

fn bench_minimax(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let game = GameState::new_elemental();
    let scorer = MaterialPstScorer;

    for depth in 1..=3u8 {
        for pruning in [true, false] {
            // Unpruned depth 3 on the elemental start takes too long to sample.
            if !pruning && depth == 3 {
                continue;
            }
            let config = SearchConfig { depth, pruning };
            let label = if pruning { "alpha_beta" } else { "plain" };

            group.bench_with_input(
                BenchmarkId::new(label, depth),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result =
                            minimax_search(black_box(&game), Color::Light, &scorer, *config)
                                .expect("search benchmark run should succeed");
                        black_box(result.best_move)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_minimax);
criterion_main!(search_benches);
