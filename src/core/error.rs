use thiserror::Error;

use super::Card;

/// Ways a set of known cards, a board, or a trial count can be
/// unusable for a simulation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateViolation {
    #[error("exactly 2 hole cards are required, got {0}")]
    WrongHoleCardCount(usize),
    #[error("at least 3 board cards are required, got {0}")]
    InsufficientBoard(usize),
    #[error("a board has at most 5 cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("at least one trial is required")]
    ZeroTrials,
    #[error("card {0} is known more than once")]
    DuplicateCard(Card),
    #[error("{counted} outcomes were counted for {trials} trials")]
    CountMismatch { counted: u64, trials: u64 },
    #[error("the board already has 5 cards")]
    BoardFull,
}

/// Ways a set of cards can't be ranked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandViolation {
    #[error("at least 5 cards are needed to rank a hand, got {0}")]
    TooFewCards(usize),
    #[error("at most 7 cards can be ranked, got {0}")]
    TooManyCards(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// This is the core error type for the library. It uses `thiserror` to
/// provide readable error messages.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PokerError {
    #[error("Invalid state: {0}")]
    InvalidState(StateViolation),
    #[error("Can't sample {requested} cards from a pool of {available}")]
    InsufficientCards { requested: usize, available: usize },
    #[error("Invalid hand: {0}")]
    InvalidHand(HandViolation),
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card already added to hand {0}")]
    DuplicateCardInHand(Card),
    #[error("{0} is not the index of a card in a 52 card deck")]
    InvalidCardIndex(u8),
    #[error("Simulation cancelled after {completed} trials")]
    Cancelled { completed: u64 },
}

impl From<StateViolation> for PokerError {
    fn from(value: StateViolation) -> Self {
        Self::InvalidState(value)
    }
}

impl From<HandViolation> for PokerError {
    fn from(value: HandViolation) -> Self {
        Self::InvalidHand(value)
    }
}
