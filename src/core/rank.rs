use super::{Card, CardBitSet, Hand, HandViolation, PokerError, Value};

/// All the different possible hand ranks.
/// For each hand rank the u32 corresponds to
/// the strength of the hand in comparison to others
/// of the same rank.
///
/// Ranks are totally ordered and a bigger rank is a stronger hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Rank {
    /// The lowest rank.
    /// No matches
    HighCard(u32),
    /// One Card matches another.
    OnePair(u32),
    /// Two different pair of matching cards.
    TwoPair(u32),
    /// Three of the same value.
    ThreeOfAKind(u32),
    /// Five cards in a sequence
    Straight(u32),
    /// Five cards of the same suit
    Flush(u32),
    /// Three of one value and two of another value
    FullHouse(u32),
    /// Four of the same value.
    FourOfAKind(u32),
    /// Five cards in a sequence all of the same suit.
    StraightFlush(u32),
}

/// Value bit masks of every straight, weakest first.
/// The index into this table is the strength carried by
/// `Rank::Straight` and `Rank::StraightFlush`.
pub const STRAIGHTS: [u32; 10] = {
    let mut straights = [0u32; 10];
    // Wheel. The ace plays low.
    straights[0] = 1 << (Value::Ace as u32) | 0b1111;
    let mut i = 1;
    while i < 10 {
        straights[i] = 0b11111 << (i - 1);
        i += 1;
    }
    straights
};

/// Index into `STRAIGHTS` of the best straight in `value_set`.
fn rank_straight(value_set: u32) -> Option<u32> {
    STRAIGHTS
        .iter()
        .rposition(|s| value_set & s == *s)
        .map(|i| i as u32)
}

/// Drop the lowest set bits until at most `n` remain.
fn keep_highest(mut value_set: u32, n: u32) -> u32 {
    while value_set.count_ones() > n {
        value_set &= value_set - 1;
    }
    value_set
}

/// Can this turn into a hand rank?
///
/// Given five to seven cards the rank is the best five card hand
/// that can be made from them. Nothing is checked here beyond a debug
/// assertion on the card count; use [`BitSetRanker`] to rank untrusted
/// input.
pub trait Rankable {
    fn rank(&self) -> Rank;
}

impl Rankable for CardBitSet {
    /// Rank this set. It doesn't do any caching so it's left up to the user
    /// to understand that duplicate work will be done if this is called
    /// more than once.
    fn rank(&self) -> Rank {
        debug_assert!(
            (5..=7).contains(&self.count()),
            "can only rank five to seven cards, got {}",
            self.count()
        );
        let mut value_set: u32 = 0;
        let mut suit_value_sets = [0u32; 4];
        let mut value_counts = [0u8; 13];

        for card in self.iter() {
            let v = card.value as u32;
            value_set |= 1 << v;
            suit_value_sets[card.suit as usize] |= 1 << v;
            value_counts[v as usize] += 1;
        }

        let mut pairs: u32 = 0;
        let mut trips: u32 = 0;
        let mut quads: u32 = 0;
        for (v, count) in value_counts.iter().enumerate() {
            match *count {
                2 => pairs |= 1 << v,
                3 => trips |= 1 << v,
                4 => quads |= 1 << v,
                _ => {}
            }
        }

        // With at most seven cards only one suit can hold five.
        let flush = suit_value_sets.iter().copied().find(|s| s.count_ones() >= 5);

        if let Some(rank) = flush.and_then(rank_straight) {
            return Rank::StraightFlush(rank);
        }

        if quads != 0 {
            let major_rank = keep_highest(quads, 1);
            let minor_rank = keep_highest(value_set ^ major_rank, 1);
            return Rank::FourOfAKind(major_rank << 13 | minor_rank);
        }

        if trips != 0 {
            let major_rank = keep_highest(trips, 1);
            // A second set of trips plays as the pair.
            let minor_rank = keep_highest((trips ^ major_rank) | pairs, 1);
            if minor_rank != 0 {
                return Rank::FullHouse(major_rank << 13 | minor_rank);
            }
        }

        if let Some(flush_set) = flush {
            return Rank::Flush(keep_highest(flush_set, 5));
        }

        if let Some(rank) = rank_straight(value_set) {
            return Rank::Straight(rank);
        }

        if trips != 0 {
            let major_rank = keep_highest(trips, 1);
            let minor_rank = keep_highest(value_set ^ major_rank, 2);
            return Rank::ThreeOfAKind(major_rank << 13 | minor_rank);
        }

        match pairs.count_ones() {
            0 => Rank::HighCard(keep_highest(value_set, 5)),
            1 => Rank::OnePair(pairs << 13 | keep_highest(value_set ^ pairs, 3)),
            _ => {
                // Three pairs can happen with seven cards. The lowest one
                // competes with the singletons for the kicker.
                let major_rank = keep_highest(pairs, 2);
                let minor_rank = keep_highest(value_set ^ major_rank, 1);
                Rank::TwoPair(major_rank << 13 | minor_rank)
            }
        }
    }
}

impl Rankable for Hand {
    fn rank(&self) -> Rank {
        CardBitSet::from(*self).rank()
    }
}

/// Something that can rank five to seven cards.
///
/// The equity simulator is handed one of these instead of reaching for a
/// global evaluator, so any ranking scheme that keeps the `Rank` ordering
/// can be plugged in.
pub trait HandRanker {
    /// Rank the best five card hand in `cards`.
    ///
    /// Fails when there are fewer than 5 or more than 7 cards, or when a
    /// card is repeated.
    fn rank(&self, cards: &[Card]) -> Result<Rank, PokerError>;
}

impl<T: HandRanker + ?Sized> HandRanker for &T {
    fn rank(&self, cards: &[Card]) -> Result<Rank, PokerError> {
        (**self).rank(cards)
    }
}

/// The default `HandRanker`, backed by [`Rankable`] on a `CardBitSet`.
///
/// ```
/// use holdem_odds::core::{cards_from_str, BitSetRanker, HandRanker, Rank};
///
/// let cards = cards_from_str("AsKsQsJsTs2c7d").unwrap();
/// assert_eq!(Rank::StraightFlush(9), BitSetRanker.rank(&cards).unwrap());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitSetRanker;

impl HandRanker for BitSetRanker {
    fn rank(&self, cards: &[Card]) -> Result<Rank, PokerError> {
        if cards.len() < 5 {
            return Err(HandViolation::TooFewCards(cards.len()).into());
        }
        if cards.len() > 7 {
            return Err(HandViolation::TooManyCards(cards.len()).into());
        }

        let mut set = CardBitSet::new();
        for card in cards {
            if !set.insert(*card) {
                return Err(HandViolation::DuplicateCard(*card).into());
            }
        }
        Ok(set.rank())
    }
}
