use std::fmt;

use crate::core::{Card, PokerError, StateViolation};

/// Where the board is in a hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// The street a board of `board_cards` cards has reached. Boards still
    /// being dealt count as the last complete street.
    pub fn from_board_len(board_cards: usize) -> Self {
        match board_cards {
            0..=2 => Street::PreFlop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }
}

/// How far along picking the cards is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionStage {
    Empty,
    /// One hole card picked.
    ChoosingHoleCards,
    HoleCardsChosen,
    /// Between one and four board cards picked.
    BoardPartial(usize),
    BoardFull,
}

/// The cards a player has picked so far, hole cards first and then the
/// board one card at a time.
///
/// This is front end state. Once [`CardSelection::ready`] returns the
/// hole and board they can be handed to the equity simulator.
///
/// ```
/// use holdem_odds::holdem::{CardSelection, SelectionStage};
///
/// let mut selection = CardSelection::new();
/// for id in ["As", "Ks", "Qs", "Js"] {
///     selection.select(id.parse().unwrap()).unwrap();
/// }
/// assert_eq!(SelectionStage::BoardPartial(2), selection.stage());
/// assert!(selection.ready().is_none());
///
/// selection.select("Ts".parse().unwrap()).unwrap();
/// assert!(selection.is_ready());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSelection {
    hole: Vec<Card>,
    board: Vec<Card>,
}

impl CardSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next card. Hole cards fill first, then the board.
    pub fn select(&mut self, card: Card) -> Result<SelectionStage, PokerError> {
        if self.hole.contains(&card) || self.board.contains(&card) {
            return Err(StateViolation::DuplicateCard(card).into());
        }

        if self.hole.len() < 2 {
            self.hole.push(card);
        } else if self.board.len() < 5 {
            self.board.push(card);
        } else {
            return Err(StateViolation::BoardFull.into());
        }
        Ok(self.stage())
    }

    /// Take back the most recently picked card.
    pub fn undo(&mut self) -> Option<Card> {
        self.board.pop().or_else(|| self.hole.pop())
    }

    pub fn clear(&mut self) {
        self.hole.clear();
        self.board.clear();
    }

    pub fn hole(&self) -> &[Card] {
        &self.hole
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn stage(&self) -> SelectionStage {
        match (self.hole.len(), self.board.len()) {
            (0, _) => SelectionStage::Empty,
            (1, _) => SelectionStage::ChoosingHoleCards,
            (_, 0) => SelectionStage::HoleCardsChosen,
            (_, 5) => SelectionStage::BoardFull,
            (_, n) => SelectionStage::BoardPartial(n),
        }
    }

    pub fn street(&self) -> Street {
        Street::from_board_len(self.board.len())
    }

    /// The hole and board cards once there's enough to simulate: two hole
    /// cards and at least the flop.
    pub fn ready(&self) -> Option<(&[Card], &[Card])> {
        self.is_ready().then(|| (&self.hole[..], &self.board[..]))
    }

    pub fn is_ready(&self) -> bool {
        self.hole.len() == 2 && self.board.len() >= 3
    }
}

fn write_cards(f: &mut fmt::Formatter<'_>, cards: &[Card]) -> fmt::Result {
    let shown: Vec<String> = cards.iter().map(Card::to_symbol_string).collect();
    write!(f, "{}", shown.join(" "))
}

impl fmt::Display for CardSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your Hand: ")?;
        write_cards(f, &self.hole)?;
        write!(f, "\nCommunity Cards: ")?;
        write_cards(f, &self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cards_from_str;

    fn select_all(selection: &mut CardSelection, cards: &str) {
        for card in cards_from_str(cards).unwrap() {
            selection.select(card).unwrap();
        }
    }

    #[test]
    fn test_stages_in_order() {
        let mut selection = CardSelection::new();
        assert_eq!(SelectionStage::Empty, selection.stage());

        let expected = [
            SelectionStage::ChoosingHoleCards,
            SelectionStage::HoleCardsChosen,
            SelectionStage::BoardPartial(1),
            SelectionStage::BoardPartial(2),
            SelectionStage::BoardPartial(3),
            SelectionStage::BoardPartial(4),
            SelectionStage::BoardFull,
        ];
        let cards = cards_from_str("AsKsQsJsTs9s8s").unwrap();
        for (card, stage) in cards.into_iter().zip(expected) {
            assert_eq!(Ok(stage), selection.select(card));
        }
        assert_eq!(Street::River, selection.street());
    }

    #[test]
    fn test_full_board_rejects_more() {
        let mut selection = CardSelection::new();
        select_all(&mut selection, "AsKsQsJsTs9s8s");
        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::BoardFull)),
            selection.select("2c".parse().unwrap())
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut selection = CardSelection::new();
        select_all(&mut selection, "AsKs");
        let again = "As".parse().unwrap();
        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::DuplicateCard(again))),
            selection.select(again)
        );
        assert_eq!(SelectionStage::HoleCardsChosen, selection.stage());
    }

    #[test]
    fn test_ready_needs_flop() {
        let mut selection = CardSelection::new();
        select_all(&mut selection, "AsKsQsJs");
        assert!(selection.ready().is_none());
        assert_eq!(Street::PreFlop, selection.street());

        select_all(&mut selection, "Ts");
        let (hole, board) = selection.ready().unwrap();
        assert_eq!(cards_from_str("AsKs").unwrap(), hole);
        assert_eq!(cards_from_str("QsJsTs").unwrap(), board);
        assert_eq!(Street::Flop, selection.street());
    }

    #[test]
    fn test_undo_board_then_hole() {
        let mut selection = CardSelection::new();
        select_all(&mut selection, "AsKsQs");

        assert_eq!(Some("Qs".parse().unwrap()), selection.undo());
        assert_eq!(Some("Ks".parse().unwrap()), selection.undo());
        assert_eq!(SelectionStage::ChoosingHoleCards, selection.stage());
        assert_eq!(Some("As".parse().unwrap()), selection.undo());
        assert_eq!(None, selection.undo());
        assert_eq!(SelectionStage::Empty, selection.stage());
    }

    #[test]
    fn test_undo_makes_card_available_again() {
        let mut selection = CardSelection::new();
        select_all(&mut selection, "AsKsQsJsTs");
        assert!(selection.is_ready());

        let last = selection.undo().unwrap();
        assert!(!selection.is_ready());
        assert!(selection.select(last).is_ok());
        assert!(selection.is_ready());
    }

    #[test]
    fn test_clear() {
        let mut selection = CardSelection::new();
        select_all(&mut selection, "AsKsQsJsTs");
        selection.clear();
        assert_eq!(CardSelection::new(), selection);
        assert_eq!(SelectionStage::Empty, selection.stage());
    }

    #[test]
    fn test_display() {
        let mut selection = CardSelection::new();
        select_all(&mut selection, "AsKhQd");
        assert_eq!(
            "Your Hand: A♠ K♥\nCommunity Cards: Q♦",
            selection.to_string()
        );
    }
}
