use rand::Rng;

use super::{Card, CardBitSet, CardBitSetIter, FlatDeck, PokerError, StateViolation};

/// Deck struct that can tell quickly if a card is in the deck
///
/// `Deck::default()` is the full 52 card deck. Simulations work on what
/// is left of it once the known cards are taken out, see
/// [`Deck::remaining`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck(CardBitSet);

impl Deck {
    /// Create a new empty deck
    ///
    /// ```
    /// use holdem_odds::core::Deck;
    ///
    /// let deck = Deck::new();
    ///
    /// assert!(deck.is_empty());
    /// assert_eq!(0, deck.len());
    /// ```
    pub const fn new() -> Self {
        Self(CardBitSet::new())
    }

    /// The full deck minus every known card.
    ///
    /// Fails if a card is known twice, since no two places on the table
    /// can hold the same card.
    ///
    /// ```
    /// use holdem_odds::core::{Card, Deck};
    ///
    /// let known: Vec<Card> = ["As", "Ks", "Qs"]
    ///     .iter()
    ///     .map(|s| s.parse().unwrap())
    ///     .collect();
    /// let deck = Deck::remaining(&known).unwrap();
    ///
    /// assert_eq!(49, deck.len());
    /// assert!(!deck.contains(&known[0]));
    /// ```
    pub fn remaining(known: &[Card]) -> Result<Self, PokerError> {
        let mut seen = CardBitSet::new();
        for card in known {
            if !seen.insert(*card) {
                return Err(StateViolation::DuplicateCard(*card).into());
            }
        }
        Ok(Self(!seen))
    }

    /// Draw `n` distinct cards uniformly at random from this deck.
    ///
    /// The deck itself is left untouched.
    pub fn sample_without_replacement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> Result<Vec<Card>, PokerError> {
        FlatDeck::from(*self).sample(rng, n)
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.0.count()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> CardBitSetIter {
        self.0.iter()
    }
}

impl Default for Deck {
    /// Create the default 52 card deck
    ///
    /// ```
    /// use holdem_odds::core::Deck;
    ///
    /// assert_eq!(52, Deck::default().len());
    /// ```
    fn default() -> Self {
        Self(CardBitSet::default())
    }
}

impl From<CardBitSet> for Deck {
    fn from(value: CardBitSet) -> Self {
        Self(value)
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = CardBitSetIter;
    /// Consume this deck and create a new iterator.
    fn into_iter(self) -> CardBitSetIter {
        self.0.into_iter()
    }
}
