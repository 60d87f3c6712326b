#[macro_use]
extern crate criterion;

use criterion::Criterion;
use holdem_odds::core::{BitSetRanker, Card, Deck, FlatDeck, HandRanker};
use rand::{SeedableRng, rngs::StdRng};

fn sample_cards(n: usize) -> Vec<Card> {
    let mut rng = StdRng::seed_from_u64(420);
    let d: FlatDeck = Deck::default().into();
    d.sample(&mut rng, n).unwrap()
}

fn rank_one(c: &mut Criterion) {
    let cards = sample_cards(5);
    c.bench_function("Rank one 5 card hand", move |b| {
        b.iter(|| BitSetRanker.rank(&cards))
    });
}

fn rank_best_seven(c: &mut Criterion) {
    let cards = sample_cards(7);
    c.bench_function("Rank best 5card hand from 7", move |b| {
        b.iter(|| BitSetRanker.rank(&cards))
    });
}

criterion_group!(benches, rank_one, rank_best_seven);
criterion_main!(benches);
