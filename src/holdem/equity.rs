use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use tracing::{event, trace_span};

use crate::core::{Card, Deck, FlatDeck, HandRanker, PokerError, Rank, StateViolation};

use super::{OutcomeCounts, TrialOutcome};

/// Monte carlo estimate of how a two card hand does against one random
/// opponent hand on a given board.
///
/// The ranker is injected so that any `HandRanker` can score the
/// showdowns. Randomness comes from the caller, which keeps seeded runs
/// reproducible.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_odds::core::{cards_from_str, BitSetRanker};
/// use holdem_odds::holdem::EquitySimulator;
///
/// let hole = cards_from_str("AsKs").unwrap();
/// let board = cards_from_str("QsJsTs").unwrap();
/// let mut rng = StdRng::seed_from_u64(420);
///
/// let counts = EquitySimulator::new(BitSetRanker)
///     .estimate(&hole, &board, 100, &mut rng)
///     .unwrap();
/// assert_eq!(100, counts.win);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquitySimulator<H> {
    ranker: H,
}

/// Everything a run needs that doesn't change from trial to trial.
struct PreparedTrials<'a> {
    board: &'a [Card],
    pool: FlatDeck,
    hero_rank: Rank,
}

impl<H: HandRanker> EquitySimulator<H> {
    pub fn new(ranker: H) -> Self {
        Self { ranker }
    }

    pub fn ranker(&self) -> &H {
        &self.ranker
    }

    /// Run exactly `trials` simulated showdowns and count the outcomes.
    ///
    /// `hole` must be two cards, `board` three to five cards, the two
    /// disjoint, and `trials` at least one. Any violation is reported
    /// before a single card is drawn.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        hole: &[Card],
        board: &[Card],
        trials: usize,
        rng: &mut R,
    ) -> Result<OutcomeCounts, PokerError> {
        self.run(hole, board, trials, rng, None)
    }

    /// Same as [`EquitySimulator::estimate`] but checks `cancel` between
    /// trials. Once it's set the run stops with `PokerError::Cancelled`.
    pub fn estimate_with_cancel<R: Rng + ?Sized>(
        &self,
        hole: &[Card],
        board: &[Card],
        trials: usize,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<OutcomeCounts, PokerError> {
        self.run(hole, board, trials, rng, Some(cancel))
    }

    /// Play a single trial: deal the opponent two cards and compare.
    pub fn simulate_one<R: Rng + ?Sized>(
        &self,
        hole: &[Card],
        board: &[Card],
        rng: &mut R,
    ) -> Result<TrialOutcome, PokerError> {
        let prepared = self.prepare(hole, board, 1)?;
        self.trial(&prepared, rng)
    }

    fn run<R: Rng + ?Sized>(
        &self,
        hole: &[Card],
        board: &[Card],
        trials: usize,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<OutcomeCounts, PokerError> {
        let prepared = self.prepare(hole, board, trials)?;
        let span = trace_span!("equity_simulation", trials);
        let _enter = span.enter();

        event!(
            tracing::Level::DEBUG,
            hole = ?hole,
            board = ?board,
            hero_rank = ?prepared.hero_rank,
            remaining = prepared.pool.len(),
            "Starting equity simulation"
        );

        let counts = self.run_prepared(&prepared, trials, rng, cancel)?;

        event!(
            tracing::Level::DEBUG,
            win = counts.win,
            tie = counts.tie,
            loss = counts.loss,
            "Finished equity simulation"
        );
        Ok(counts)
    }

    /// The trial loop over inputs that have already been checked.
    fn run_prepared<R: Rng + ?Sized>(
        &self,
        prepared: &PreparedTrials<'_>,
        trials: usize,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<OutcomeCounts, PokerError> {
        let mut counts = OutcomeCounts::default();
        for _ in 0..trials {
            if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
                event!(
                    tracing::Level::WARN,
                    completed = counts.total(),
                    "Equity simulation cancelled"
                );
                return Err(PokerError::Cancelled {
                    completed: counts.total(),
                });
            }
            counts.record(self.trial(prepared, rng)?);
        }
        Ok(counts)
    }

    /// Check the inputs and compute the parts shared by every trial.
    ///
    /// The hero's rank only depends on the hole and board cards so it's
    /// ranked once here rather than once per trial.
    fn prepare<'a>(
        &self,
        hole: &[Card],
        board: &'a [Card],
        trials: usize,
    ) -> Result<PreparedTrials<'a>, PokerError> {
        if hole.len() != 2 {
            return Err(StateViolation::WrongHoleCardCount(hole.len()).into());
        }
        if board.len() < 3 {
            return Err(StateViolation::InsufficientBoard(board.len()).into());
        }
        if board.len() > 5 {
            return Err(StateViolation::TooManyBoardCards(board.len()).into());
        }
        if trials == 0 {
            return Err(StateViolation::ZeroTrials.into());
        }

        let known: Vec<Card> = hole.iter().chain(board).copied().collect();
        // This also rejects hole and board cards that overlap.
        let pool: FlatDeck = Deck::remaining(&known)?.into();
        let hero_rank = self.ranker.rank(&known)?;

        Ok(PreparedTrials {
            board,
            pool,
            hero_rank,
        })
    }

    fn trial<R: Rng + ?Sized>(
        &self,
        prepared: &PreparedTrials<'_>,
        rng: &mut R,
    ) -> Result<TrialOutcome, PokerError> {
        let mut villain = prepared.pool.sample(rng, 2)?;
        villain.extend_from_slice(prepared.board);
        let villain_rank = self.ranker.rank(&villain)?;

        let outcome = TrialOutcome::from_ranks(prepared.hero_rank, villain_rank);
        event!(
            tracing::Level::TRACE,
            villain = ?&villain[..2],
            ?villain_rank,
            ?outcome,
            "Trial finished"
        );
        Ok(outcome)
    }
}

#[cfg(feature = "rayon")]
impl<H: HandRanker + Sync> EquitySimulator<H> {
    /// Spread `trials` over `workers` rayon tasks.
    ///
    /// Worker `i` draws from its own `StdRng` seeded with `seed + i` and
    /// keeps local counts; the counts are summed once every worker has
    /// finished. For a fixed `seed` and `workers` the result is
    /// reproducible.
    pub fn estimate_parallel(
        &self,
        hole: &[Card],
        board: &[Card],
        trials: usize,
        seed: u64,
        workers: usize,
    ) -> Result<OutcomeCounts, PokerError> {
        use rand::{SeedableRng, rngs::StdRng};
        use rayon::prelude::*;

        // Checked and ranked once, then shared by every worker.
        let prepared = self.prepare(hole, board, trials)?;

        let workers = workers.clamp(1, trials);
        let per_worker = trials / workers;
        let extra = trials % workers;

        event!(
            tracing::Level::DEBUG,
            trials,
            workers,
            seed,
            "Starting parallel equity simulation"
        );

        (0..workers)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                let n = per_worker + usize::from(i < extra);
                self.run_prepared(&prepared, n, &mut rng, None)
            })
            .try_reduce(OutcomeCounts::default, |a, b| Ok(a.merge(b)))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::{BitSetRanker, cards_from_str};

    fn simulator() -> EquitySimulator<BitSetRanker> {
        EquitySimulator::new(BitSetRanker)
    }

    fn cards(s: &str) -> Vec<Card> {
        cards_from_str(s).unwrap()
    }

    #[test_log::test]
    fn test_made_royal_flush_always_wins() {
        let mut rng = StdRng::seed_from_u64(420);
        for trials in [1, 10, 1000] {
            let counts = simulator()
                .estimate(&cards("AsKs"), &cards("QsJsTs"), trials, &mut rng)
                .unwrap();
            assert_eq!(
                OutcomeCounts {
                    win: trials as u64,
                    tie: 0,
                    loss: 0
                },
                counts
            );
        }
    }

    #[test_log::test]
    fn test_royal_flush_board_always_ties() {
        let mut rng = StdRng::seed_from_u64(42);
        let counts = simulator()
            .estimate(&cards("2c7d"), &cards("AsKsQsJsTs"), 500, &mut rng)
            .unwrap();
        assert_eq!(500, counts.tie);
        assert_eq!(0, counts.win);
        assert_eq!(0, counts.loss);
    }

    #[test]
    fn test_two_board_cards_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::InsufficientBoard(2))),
            simulator().estimate(&cards("AsKs"), &cards("QsJs"), 100, &mut rng)
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        let sim = simulator();

        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::WrongHoleCardCount(1))),
            sim.estimate(&cards("As"), &cards("QsJsTs"), 100, &mut rng)
        );
        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::WrongHoleCardCount(3))),
            sim.estimate(&cards("AsKsKd"), &cards("QsJsTs"), 100, &mut rng)
        );
        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::TooManyBoardCards(6))),
            sim.estimate(&cards("AsKs"), &cards("QsJsTs9s8s7s"), 100, &mut rng)
        );
        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::ZeroTrials)),
            sim.estimate(&cards("AsKs"), &cards("QsJsTs"), 0, &mut rng)
        );

        let overlap = cards("QsJsTs");
        assert_eq!(
            Err(PokerError::InvalidState(StateViolation::DuplicateCard(
                overlap[0]
            ))),
            sim.estimate(&cards("AsQs"), &overlap, 100, &mut rng)
        );
    }

    #[test]
    fn test_counts_cover_every_trial() {
        let mut rng = StdRng::seed_from_u64(7);
        for trials in [1, 2, 17, 1000] {
            let counts = simulator()
                .estimate(&cards("9h9d"), &cards("2c7sKd4h"), trials, &mut rng)
                .unwrap();
            assert_eq!(trials as u64, counts.total());
        }
    }

    #[test]
    fn test_same_seed_same_counts() {
        let hole = cards("AhQd");
        let board = cards("Qs7c2h");

        let mut rng_one = StdRng::seed_from_u64(420);
        let mut rng_two = StdRng::seed_from_u64(420);
        let first = simulator().estimate(&hole, &board, 2000, &mut rng_one);
        let second = simulator().estimate(&hole, &board, 2000, &mut rng_two);

        assert_eq!(first, second);
    }

    #[test]
    fn test_strong_hand_mostly_wins() {
        let mut rng = StdRng::seed_from_u64(99);
        // Top set on a dry board.
        let counts = simulator()
            .estimate(&cards("AhAd"), &cards("As7c2d"), 2000, &mut rng)
            .unwrap();
        assert!(counts.win > counts.loss * 10);
    }

    #[test]
    fn test_simulate_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let sim = simulator();
        for _ in 0..50 {
            assert_eq!(
                Ok(TrialOutcome::Tie),
                sim.simulate_one(&cards("2c7d"), &cards("AsKsQsJsTs"), &mut rng)
            );
        }
        assert!(sim.simulate_one(&cards("2c"), &cards("AsKsQs"), &mut rng).is_err());
    }

    #[test]
    fn test_cancelled_before_first_trial() {
        let mut rng = StdRng::seed_from_u64(5);
        let cancel = AtomicBool::new(true);
        assert_eq!(
            Err(PokerError::Cancelled { completed: 0 }),
            simulator().estimate_with_cancel(
                &cards("AsKs"),
                &cards("QsJsTs"),
                100,
                &mut rng,
                &cancel
            )
        );
    }

    #[test]
    fn test_not_cancelled_runs_everything() {
        let mut rng = StdRng::seed_from_u64(5);
        let cancel = AtomicBool::new(false);
        let counts = simulator()
            .estimate_with_cancel(&cards("AsKs"), &cards("QsJsTs"), 100, &mut rng, &cancel)
            .unwrap();
        assert_eq!(100, counts.win);
    }

    #[test]
    fn test_injected_ranker_is_used() {
        /// Ranks every hand the same, so every trial is a tie.
        struct FlatRanker;

        impl HandRanker for FlatRanker {
            fn rank(&self, _cards: &[Card]) -> Result<Rank, PokerError> {
                Ok(Rank::HighCard(0))
            }
        }

        let mut rng = StdRng::seed_from_u64(5);
        let counts = EquitySimulator::new(FlatRanker)
            .estimate(&cards("AsKs"), &cards("QsJsTs"), 50, &mut rng)
            .unwrap();
        assert_eq!(50, counts.tie);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_matches_trial_count_and_seed() {
        let hole = cards("AhQd");
        let board = cards("Qs7c2h");
        let sim = simulator();

        let first = sim.estimate_parallel(&hole, &board, 1001, 420, 4).unwrap();
        let second = sim.estimate_parallel(&hole, &board, 1001, 420, 4).unwrap();
        assert_eq!(1001, first.total());
        assert_eq!(first, second);

        // More workers than trials still runs every trial exactly once.
        assert_eq!(3, sim.estimate_parallel(&hole, &board, 3, 1, 8).unwrap().total());
        assert!(sim.estimate_parallel(&hole, &board, 0, 1, 8).is_err());
    }

    /// Counts how many times it's asked to rank a hand.
    #[derive(Default)]
    struct CountingRanker {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl HandRanker for CountingRanker {
        fn rank(&self, cards: &[Card]) -> Result<Rank, PokerError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            BitSetRanker.rank(cards)
        }
    }

    #[test]
    fn test_hero_is_ranked_once() {
        let mut rng = StdRng::seed_from_u64(9);
        let sim = EquitySimulator::new(CountingRanker::default());
        sim.estimate(&cards("AhQd"), &cards("Qs7c2h"), 200, &mut rng)
            .unwrap();
        // One rank per opponent hand plus the hero's.
        assert_eq!(201, sim.ranker().calls.load(Ordering::Relaxed));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_workers_share_hero_rank() {
        let sim = EquitySimulator::new(CountingRanker::default());
        let counts = sim
            .estimate_parallel(&cards("AhQd"), &cards("Qs7c2h"), 200, 420, 4)
            .unwrap();
        assert_eq!(200, counts.total());
        assert_eq!(201, sim.ranker().calls.load(Ordering::Relaxed));
    }
}
