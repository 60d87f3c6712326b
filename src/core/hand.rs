use super::{Card, CardBitSet, CardBitSetIter, PokerError, Suit, Value};

/// The cards a player can make a hand from: hole cards plus whatever
/// board cards are out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hand(CardBitSet);

impl Hand {
    /// Create a new empty hand
    ///
    /// ```
    /// use holdem_odds::core::Hand;
    ///
    /// let hand = Hand::new();
    ///
    /// assert!(hand.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self(CardBitSet::new())
    }

    pub fn new_with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self(cards.into_iter().collect())
    }

    /// Build a hand from concatenated card identifiers.
    ///
    /// ```
    /// use holdem_odds::core::Hand;
    ///
    /// let hand = Hand::new_from_str("AdKd").unwrap();
    /// assert_eq!(2, hand.count());
    /// assert!(Hand::new_from_str("AdAd").is_err());
    /// ```
    pub fn new_from_str(hand_string: &str) -> Result<Self, PokerError> {
        Ok(Self::new_with_cards(cards_from_str(hand_string)?))
    }

    /// Given a card, is it in the current hand?
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    pub fn insert(&mut self, c: Card) -> bool {
        self.0.insert(c)
    }

    pub fn remove(&mut self, c: &Card) -> bool {
        self.0.remove(*c)
    }

    pub fn count(&self) -> usize {
        self.0.count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> CardBitSetIter {
        self.0.iter()
    }
}

impl Default for Hand {
    /// An empty hand, unlike `CardBitSet::default()` which is full.
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

impl From<Hand> for CardBitSet {
    fn from(val: Hand) -> Self {
        val.0
    }
}

/// Parse concatenated two character card identifiers, keeping their
/// order. Whitespace between cards is skipped.
///
/// ```
/// use holdem_odds::core::cards_from_str;
///
/// let board = cards_from_str("Qs Js Ts").unwrap();
/// assert_eq!("Qs", board[0].to_string());
/// assert_eq!(3, board.len());
/// ```
pub fn cards_from_str(cards_string: &str) -> Result<Vec<Card>, PokerError> {
    let mut chars = cards_string.chars().filter(|c| !c.is_whitespace());
    let mut seen = CardBitSet::new();
    let mut cards = Vec::new();

    // Keep looping until we run out of characters
    while let Some(vc) = chars.next() {
        let v = Value::from_char(vc).ok_or(PokerError::UnexpectedValueChar)?;
        let s = chars
            .next()
            .ok_or(PokerError::TooFewChars)
            .and_then(|sc| Suit::from_char(sc).ok_or(PokerError::UnexpectedSuitChar))?;

        let c = Card::new(v, s);
        if !seen.insert(c) {
            return Err(PokerError::DuplicateCardInHand(c));
        }
        cards.push(c);
    }

    Ok(cards)
}
