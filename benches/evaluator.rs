use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_rs::cards::{parse_cards, Card};
use holdem_rs::evaluator::{evaluate, evaluate_cards, evaluate_five};
use holdem_rs::hand::{Board, HoleCards};
use holdem_rs::policy::RandomPolicy;
use holdem_rs::table::{SeatSpec, Table, TableConfig};

fn five(text: &str) -> [Card; 5] {
    let cards = parse_cards(text).expect("fixture parses");
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn bench_evaluate_five(c: &mut Criterion) {
    let hi = five("Ah Kd 7s 5c 2d");
    let sf = five("As Ks Qs Js Ts");

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight_flush", "royal"), &sf, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let seven = parse_cards("As Ah Ks Qs Js Ts 9s").expect("fixture parses");
    c.bench_function("evaluate_cards/7", |b| b.iter(|| evaluate_cards(black_box(&seven))));

    let hole: HoleCards = "Ac Kc".parse().expect("fixture parses");
    let board: Board = "Qc Jc 2d 7h 9s".parse().expect("fixture parses");
    c.bench_function("evaluate/holdem", |b| b.iter(|| evaluate(black_box(&hole), black_box(&board))));
}

fn bench_play_hand(c: &mut Criterion) {
    c.bench_function("table/play_hand_6max", |b| {
        b.iter(|| {
            let roster = (0..6).map(|i| SeatSpec::new(format!("R{i}"), 1000, RandomPolicy::new(Some(i)))).collect();
            let mut table = Table::new(TableConfig::default().with_seed(11), roster);
            black_box(table.play_hand())
        })
    });
}

criterion_group!(benches, bench_evaluate_five, bench_evaluate_seven, bench_play_hand);
criterion_main!(benches);
