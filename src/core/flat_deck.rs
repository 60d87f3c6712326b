use std::ops::{Index, RangeFull};

use rand::Rng;
use rand::seq::IndexedRandom;

use super::{Card, CardBitSet, Deck, PokerError};

/// `FlatDeck` is a deck of cards that allows easy
/// indexing into the cards. It does not provide
/// contains methods.
///
/// This is the pool that opponent hands are drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDeck {
    /// Card storage.
    cards: Vec<Card>,
}

impl FlatDeck {
    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Pick `n` distinct cards uniformly at random.
    ///
    /// Every card of the deck is a candidate on every call; the deck is not
    /// changed.
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use holdem_odds::core::{Deck, FlatDeck};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let deck: FlatDeck = Deck::default().into();
    /// let hole = deck.sample(&mut rng, 2).unwrap();
    ///
    /// assert_eq!(2, hole.len());
    /// assert_ne!(hole[0], hole[1]);
    /// ```
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<Card>, PokerError> {
        if self.cards.len() < n {
            return Err(PokerError::InsufficientCards {
                requested: n,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.choose_multiple(rng, n).copied().collect())
    }
}

impl Index<usize> for FlatDeck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl Index<RangeFull> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for FlatDeck {
    fn from(value: Vec<Card>) -> Self {
        Self { cards: value }
    }
}

impl From<CardBitSet> for FlatDeck {
    fn from(value: CardBitSet) -> Self {
        // Bit set iteration is ascending so the same input
        // cards always result in the same starting flat deck
        Self {
            cards: value.into_iter().collect(),
        }
    }
}

/// Allow creating a flat deck from a Deck
impl From<Deck> for FlatDeck {
    fn from(value: Deck) -> Self {
        Self {
            cards: value.into_iter().collect(),
        }
    }
}
