//! This is the core module. It exports the non-holdem
//! related code: cards, decks, hands, and hand ranking.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// The error type shared by the whole crate.
mod error;
pub use self::error::{HandViolation, PokerError, StateViolation};

/// A set of cards packed into one integer.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Code related to cards in hands.
mod hand;
/// Everything in there should be public.
pub use self::hand::*;

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Flattened deck
mod flat_deck;
/// Export the sampling pool.
pub use self::flat_deck::FlatDeck;

/// 5 to 7 Card hand ranking code.
mod rank;
/// Export the traits and the results.
pub use self::rank::{BitSetRanker, HandRanker, Rank, Rankable, STRAIGHTS};
