#![no_main]
use std::str;

use holdem_odds::core::{Card, cards_from_str};
use libfuzzer_sys::fuzz_target;

// Anything that parses prints back to the same identifiers.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = str::from_utf8(data) else {
        return;
    };
    if let Ok(cards) = cards_from_str(s) {
        let printed: String = cards.iter().map(Card::to_string).collect();
        assert_eq!(cards, cards_from_str(&printed).unwrap());
    }
});
