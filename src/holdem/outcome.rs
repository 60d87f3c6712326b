use std::fmt;
use std::ops::{Add, AddAssign};

use crate::core::{PokerError, Rank, StateViolation};

/// How one simulated showdown went for the player being evaluated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrialOutcome {
    Win,
    Tie,
    Loss,
}

impl TrialOutcome {
    /// Compare the hero's rank against the villain's. Bigger ranks win.
    pub fn from_ranks(hero: Rank, villain: Rank) -> Self {
        match hero.cmp(&villain) {
            std::cmp::Ordering::Greater => TrialOutcome::Win,
            std::cmp::Ordering::Less => TrialOutcome::Loss,
            std::cmp::Ordering::Equal => TrialOutcome::Tie,
        }
    }
}

/// Tally of trial outcomes.
///
/// Counts from independent workers are combined with `+` (or
/// [`OutcomeCounts::merge`]) once every worker is done.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    pub win: u64,
    pub tie: u64,
    pub loss: u64,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: TrialOutcome) {
        match outcome {
            TrialOutcome::Win => self.win += 1,
            TrialOutcome::Tie => self.tie += 1,
            TrialOutcome::Loss => self.loss += 1,
        }
    }

    /// How many trials these counts cover.
    pub fn total(&self) -> u64 {
        self.win + self.tie + self.loss
    }

    pub fn merge(self, other: Self) -> Self {
        self + other
    }
}

impl Add for OutcomeCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            win: self.win + rhs.win,
            tie: self.tie + rhs.tie,
            loss: self.loss + rhs.loss,
        }
    }
}

impl AddAssign for OutcomeCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl FromIterator<TrialOutcome> for OutcomeCounts {
    fn from_iter<T: IntoIterator<Item = TrialOutcome>>(iter: T) -> Self {
        let mut counts = Self::default();
        for outcome in iter {
            counts.record(outcome);
        }
        counts
    }
}

/// The win, tie, and loss rates of a simulation.
///
/// Each rate is in `[0, 1]` and together they sum to one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityResult {
    pub win_rate: f64,
    pub tie_rate: f64,
    pub loss_rate: f64,
}

impl EquityResult {
    /// Normalize the counts of a `trials` long simulation into rates.
    ///
    /// ```
    /// use holdem_odds::holdem::{EquityResult, OutcomeCounts};
    ///
    /// let counts = OutcomeCounts { win: 3, tie: 1, loss: 0 };
    /// let result = EquityResult::aggregate(counts, 4).unwrap();
    ///
    /// assert_eq!(0.75, result.win_rate);
    /// assert_eq!(0.25, result.tie_rate);
    /// assert!(EquityResult::aggregate(counts, 5).is_err());
    /// ```
    pub fn aggregate(counts: OutcomeCounts, trials: u64) -> Result<Self, PokerError> {
        if trials == 0 {
            return Err(StateViolation::ZeroTrials.into());
        }
        if counts.total() != trials {
            return Err(StateViolation::CountMismatch {
                counted: counts.total(),
                trials,
            }
            .into());
        }

        let trials = trials as f64;
        Ok(Self {
            win_rate: counts.win as f64 / trials,
            tie_rate: counts.tie as f64 / trials,
            loss_rate: counts.loss as f64 / trials,
        })
    }

    /// Wins plus half of the ties, the share of the pot expected on average.
    pub fn equity(&self) -> f64 {
        self.win_rate + self.tie_rate / 2.0
    }
}

impl fmt::Display for EquityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Winning odds: {:.2}%", self.win_rate * 100.0)?;
        writeln!(f, "Tie odds: {:.2}%", self.tie_rate * 100.0)?;
        write!(f, "Losing odds: {:.2}%", self.loss_rate * 100.0)
    }
}
