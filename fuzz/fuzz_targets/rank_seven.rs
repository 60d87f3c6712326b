#![no_main]
use std::str;

use holdem_odds::core::{BitSetRanker, HandRanker, cards_from_str};
use libfuzzer_sys::fuzz_target;

// The best-of-seven rank must equal the best rank over every five card subset.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = str::from_utf8(data) else {
        return;
    };
    let Ok(cards) = cards_from_str(s) else {
        return;
    };
    if cards.len() != 7 {
        return;
    }

    let r_seven = BitSetRanker.rank(&cards).unwrap();
    let mut r_five_max = None;
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            let five: Vec<_> = cards
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip_a && *i != skip_b)
                .map(|(_, c)| *c)
                .collect();
            let r = BitSetRanker.rank(&five).unwrap();
            r_five_max = r_five_max.max(Some(r));
        }
    }
    assert_eq!(Some(r_seven), r_five_max);
});
