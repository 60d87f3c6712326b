//! Holdem Odds estimates how often a Texas Hold'em hand wins, ties, or
//! loses against one random opponent hand, once the flop is out.
//!
//! The estimate is a monte carlo simulation: the opponent's two hole
//! cards are drawn from the cards nobody has seen, both hands are ranked
//! against the shared board, and the outcomes are tallied.
//!
//! ```
//! use holdem_odds::holdem::{EquityCalculator, EquityConfig, OddsRequest};
//!
//! let calculator = EquityCalculator::with_config(EquityConfig::default().seed(42));
//! let request = OddsRequest::from_identifiers(&["Ah", "Ad"], &["As", "7c", "2d"]).unwrap();
//! let odds = calculator.calculate(&request).unwrap();
//!
//! assert!(odds.win_rate > 0.9);
//! println!("{odds}");
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
