//! Everything specific to heads up Texas Hold'em odds.

/// Trial outcomes and the rates they add up to.
mod outcome;
pub use self::outcome::{EquityResult, OutcomeCounts, TrialOutcome};

/// The monte carlo equity simulator.
mod equity;
pub use self::equity::EquitySimulator;

/// Request, config, and the calculator that ties them together.
mod calculator;
pub use self::calculator::{DEFAULT_TRIALS, EquityCalculator, EquityConfig, OddsRequest};

/// Picking hole and board cards one at a time.
mod selection;
pub use self::selection::{CardSelection, SelectionStage, Street};
