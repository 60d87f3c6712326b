use std::fmt::Debug;
use std::ops::{BitOr, BitOrAssign, Not};

use super::Card;
#[cfg(feature = "serde")]
use serde::ser::SerializeSeq;

/// A set of cards stored as one bit per card in a `u64`.
///
/// Bit `u8::from(card)` is set when the card is present. Only the low 52
/// bits are ever used. Iteration walks the cards in ascending index order,
/// which makes anything built from a set deterministic.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    cards: u64,
}

const FIFTY_TWO_ONES: u64 = (1 << 52) - 1;

const fn bit(card: Card) -> u64 {
    1 << ((card.value as u8) * 4 + card.suit as u8)
}

impl CardBitSet {
    /// Create a new empty set.
    ///
    /// ```
    /// use holdem_odds::core::CardBitSet;
    ///
    /// assert!(CardBitSet::new().is_empty());
    /// ```
    pub const fn new() -> Self {
        Self { cards: 0 }
    }

    /// Insert a card, returning `true` if it wasn't already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = !self.contains(card);
        self.cards |= bit(card);
        fresh
    }

    /// Remove a card, returning `true` if it was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let present = self.contains(card);
        self.cards &= !bit(card);
        present
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards & bit(card) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    pub fn iter(&self) -> CardBitSetIter {
        CardBitSetIter(self.cards)
    }
}

impl Default for CardBitSet {
    /// A set holding all 52 cards.
    ///
    /// ```
    /// use holdem_odds::core::CardBitSet;
    ///
    /// assert_eq!(52, CardBitSet::default().count());
    /// ```
    fn default() -> Self {
        Self {
            cards: FIFTY_TWO_ONES,
        }
    }
}

impl Debug for CardBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards | rhs.cards,
        }
    }
}

impl BitOrAssign for CardBitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.cards |= rhs.cards;
    }
}

impl BitOrAssign<Card> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Card) {
        self.cards |= bit(rhs);
    }
}

impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            // Only the first 52 bits are cards.
            cards: !self.cards & FIFTY_TWO_ONES,
        }
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = Self::new();
        for card in iter {
            set |= card;
        }
        set
    }
}

/// Iterator over the cards of a `CardBitSet`, lowest index first.
pub struct CardBitSetIter(u64);

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardBitSetIter(self.cards)
    }
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros();
        // Clear the lowest set bit.
        self.0 &= self.0 - 1;
        Card::try_from(idx as u8).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CardBitSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.count()))?;
        for card in self.iter() {
            seq.serialize_element(&card)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CardBitSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let cards = <Vec<Card> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(cards.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::{Suit, Value};

    #[test]
    fn test_empty() {
        let cards = CardBitSet::new();
        assert!(cards.is_empty());
        assert_eq!(0, cards.count());
        assert_eq!(None, cards.iter().next());
    }

    #[test]
    fn test_insert_all() {
        let mut all_cards = CardBitSet::new();
        for idx in 0..52u8 {
            let card = Card::try_from(idx).unwrap();
            assert!(all_cards.insert(card));
            assert!(!all_cards.insert(card));
        }
        assert_eq!(all_cards, CardBitSet::default());
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut cards = CardBitSet::default();
        let card = Card::new(Value::Six, Suit::Club);
        assert!(cards.remove(card));
        assert!(!cards.contains(card));
        assert!(!cards.remove(card));
        assert_eq!(51, cards.count());
    }

    #[test]
    fn test_iter_is_ascending_and_unique() {
        let cards = CardBitSet::default();
        let seen: Vec<u8> = cards.iter().map(u8::from).collect();
        assert_eq!((0..52).collect::<Vec<u8>>(), seen);
        let unique: HashSet<Card> = cards.iter().collect();
        assert_eq!(52, unique.len());
    }

    #[test]
    fn test_not_is_complement() {
        let mut known = CardBitSet::new();
        known.insert(Card::new(Value::Ace, Suit::Spade));
        known.insert(Card::new(Value::King, Suit::Spade));

        let rest = !known;
        assert_eq!(50, rest.count());
        assert!(rest.iter().all(|c| !known.contains(c)));
        assert_eq!(CardBitSet::default(), rest | known);
    }

    #[test]
    fn test_formatting_cards() {
        let cards: CardBitSet = [
            Card::new(Value::Ace, Suit::Club),
            Card::new(Value::King, Suit::Diamond),
            Card::new(Value::Three, Suit::Heart),
        ]
        .into_iter()
        .collect();

        assert_eq!("{Card(3h), Card(Kd), Card(Ac)}", format!("{:?}", cards));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_identifiers() {
        let cards: CardBitSet = [
            Card::new(Value::Ace, Suit::Spade),
            Card::new(Value::Two, Suit::Club),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&cards).unwrap();
        assert_eq!("[\"2c\",\"As\"]", json);
        assert_eq!(cards, serde_json::from_str::<CardBitSet>(&json).unwrap());
    }
}
