use rand::{SeedableRng, rng, rngs::StdRng};
use tracing::event;

use crate::core::{BitSetRanker, Card, HandRanker, PokerError};

use super::{EquityResult, EquitySimulator};

/// How many trials a request runs when the caller doesn't say.
pub const DEFAULT_TRIALS: usize = 1000;

/// Settings for an [`EquityCalculator`].
///
/// ```
/// use holdem_odds::holdem::EquityConfig;
///
/// let config = EquityConfig::default().trials(5000).seed(42);
/// assert_eq!(5000, config.trials);
/// assert_eq!(Some(42), config.seed);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquityConfig {
    /// Trials used by requests that don't carry their own count.
    pub trials: usize,
    /// With a seed every request is replayed from the same `StdRng`
    /// state. Without one the thread rng is used.
    pub seed: Option<u64>,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl EquityConfig {
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One odds calculation: the player's hole cards, the board so far, and
/// how many trials to run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsRequest {
    pub hole: Vec<Card>,
    pub board: Vec<Card>,
    /// `None` defers to the calculator's configured trial count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trials: Option<usize>,
}

impl OddsRequest {
    pub fn new(hole: Vec<Card>, board: Vec<Card>) -> Self {
        Self {
            hole,
            board,
            trials: None,
        }
    }

    /// Build a request from two character card identifiers like `"As"`.
    ///
    /// ```
    /// use holdem_odds::holdem::OddsRequest;
    ///
    /// let request = OddsRequest::from_identifiers(&["As", "Ks"], &["Qs", "Js", "Ts"]).unwrap();
    /// assert_eq!(2, request.hole.len());
    /// assert!(OddsRequest::from_identifiers(&["A"], &[]).is_err());
    /// ```
    pub fn from_identifiers(hole: &[&str], board: &[&str]) -> Result<Self, PokerError> {
        let parse = |ids: &[&str]| -> Result<Vec<Card>, PokerError> {
            ids.iter().map(|id| id.parse()).collect()
        };
        Ok(Self::new(parse(hole)?, parse(board)?))
    }

    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }
}

/// Turns [`OddsRequest`]s into [`EquityResult`]s.
///
/// ```
/// use holdem_odds::holdem::{EquityCalculator, EquityConfig, OddsRequest};
///
/// let calculator = EquityCalculator::with_config(EquityConfig::default().seed(7));
/// let request = OddsRequest::from_identifiers(&["2c", "7d"], &["As", "Ks", "Qs", "Js", "Ts"]).unwrap();
/// let result = calculator.calculate(&request).unwrap();
///
/// assert_eq!(1.0, result.tie_rate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquityCalculator<H = BitSetRanker> {
    simulator: EquitySimulator<H>,
    config: EquityConfig,
}

impl EquityCalculator<BitSetRanker> {
    pub fn with_config(config: EquityConfig) -> Self {
        Self::new(BitSetRanker, config)
    }
}

impl<H: HandRanker> EquityCalculator<H> {
    pub fn new(ranker: H, config: EquityConfig) -> Self {
        Self {
            simulator: EquitySimulator::new(ranker),
            config,
        }
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    pub fn calculate(&self, request: &OddsRequest) -> Result<EquityResult, PokerError> {
        let trials = request.trials.unwrap_or(self.config.trials);
        let counts = match self.config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.simulator
                    .estimate(&request.hole, &request.board, trials, &mut rng)?
            }
            None => {
                let mut rng = rng();
                self.simulator
                    .estimate(&request.hole, &request.board, trials, &mut rng)?
            }
        };

        let result = EquityResult::aggregate(counts, trials as u64)?;
        event!(
            tracing::Level::INFO,
            win_rate = result.win_rate,
            tie_rate = result.tie_rate,
            loss_rate = result.loss_rate,
            "Calculated odds"
        );
        Ok(result)
    }
}
