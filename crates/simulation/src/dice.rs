use crate::error::SimulationError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const MIN_SUM: u8 = 2;
pub const MAX_SUM: u8 = 12;

/// Tallies of the three outcomes the experiment tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCounts {
    pub sum_7: u64,
    pub sum_2: u64,
    pub sum_greater_10: u64,
    pub trials: u64,
}

/// Probabilities of the tracked outcomes, either estimated or exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub p_sum_7: f64,
    pub p_sum_2: f64,
    pub p_sum_greater_10: f64,
}

impl RollCounts {
    pub fn probabilities(&self) -> OutcomeProbabilities {
        let total = self.trials as f64;
        OutcomeProbabilities {
            p_sum_7: self.sum_7 as f64 / total,
            p_sum_2: self.sum_2 as f64 / total,
            p_sum_greater_10: self.sum_greater_10 as f64 / total,
        }
    }
}

/// Counts for every sum from 2 to 12.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumDistribution {
    counts: [u64; 11],
    trials: u64,
}

impl SumDistribution {
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Number of rolls that produced `sum`; 0 outside 2..=12.
    pub fn count(&self, sum: u8) -> u64 {
        if (MIN_SUM..=MAX_SUM).contains(&sum) {
            self.counts[(sum - MIN_SUM) as usize]
        } else {
            0
        }
    }

    /// Observed share of rolls that produced `sum`.
    pub fn frequency(&self, sum: u8) -> f64 {
        self.count(sum) as f64 / self.trials as f64
    }

    pub fn theoretical(&self, sum: u8) -> f64 {
        theoretical_sum_probability(sum)
    }

    /// `(sum, count, frequency, theoretical)` for every possible sum.
    pub fn rows(&self) -> impl Iterator<Item = (u8, u64, f64, f64)> + '_ {
        (MIN_SUM..=MAX_SUM).map(|s| (s, self.count(s), self.frequency(s), self.theoretical(s)))
    }
}

/// Exact probability that two fair dice sum to `sum`: `(6 - |7 - sum|) / 36`.
pub fn theoretical_sum_probability(sum: u8) -> f64 {
    if !(MIN_SUM..=MAX_SUM).contains(&sum) {
        return 0.0;
    }
    (6 - (7 - sum as i32).abs()) as f64 / 36.0
}

/// P(7) = 6/36, P(2) = 1/36, P(>10) = 3/36.
pub fn theoretical_outcomes() -> OutcomeProbabilities {
    OutcomeProbabilities {
        p_sum_7: 6.0 / 36.0,
        p_sum_2: 1.0 / 36.0,
        p_sum_greater_10: 3.0 / 36.0,
    }
}

/// A pair of fair six-sided dice driven by a seedable generator.
#[derive(Debug, Clone)]
pub struct DiceSimulation {
    rng: StdRng,
}

impl DiceSimulation {
    /// Seeded when `seed` is given, entropy-backed otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn roll_pair(&mut self) -> (u8, u8) {
        (self.rng.gen_range(1..=6), self.rng.gen_range(1..=6))
    }

    fn roll_sum(&mut self) -> u8 {
        let (a, b) = self.roll_pair();
        a + b
    }

    pub fn simulate(&mut self, trials: u64) -> Result<RollCounts, SimulationError> {
        if trials == 0 {
            return Err(SimulationError::NoTrials);
        }

        let mut counts = RollCounts {
            sum_7: 0,
            sum_2: 0,
            sum_greater_10: 0,
            trials,
        };
        for _ in 0..trials {
            let sum = self.roll_sum();
            match sum {
                7 => counts.sum_7 += 1,
                2 => counts.sum_2 += 1,
                _ => {}
            }
            if sum > 10 {
                counts.sum_greater_10 += 1;
            }
        }

        tracing::debug!(trials, sum_7 = counts.sum_7, "Dice simulation finished");
        Ok(counts)
    }

    pub fn distribution(&mut self, trials: u64) -> Result<SumDistribution, SimulationError> {
        if trials == 0 {
            return Err(SimulationError::NoTrials);
        }

        let mut counts = [0u64; 11];
        for _ in 0..trials {
            counts[(self.roll_sum() - MIN_SUM) as usize] += 1;
        }
        Ok(SumDistribution { counts, trials })
    }
}

/// Estimate of P(sum = 7) at one trial count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergencePoint {
    pub trials: u64,
    pub estimate: f64,
    pub abs_error: f64,
}

/// Runs a fresh simulation of `trials` rolls and measures its P(7) error.
pub fn convergence_point(trials: u64, seed: Option<u64>) -> Result<ConvergencePoint, SimulationError> {
    let estimate = DiceSimulation::new(seed).simulate(trials)?.probabilities().p_sum_7;
    Ok(ConvergencePoint {
        trials,
        estimate,
        abs_error: (estimate - theoretical_outcomes().p_sum_7).abs(),
    })
}

/// One independent [`convergence_point`] per entry of `trial_counts`.
pub fn convergence_study(
    trial_counts: &[u64],
    seed: Option<u64>,
) -> Result<Vec<ConvergencePoint>, SimulationError> {
    trial_counts
        .iter()
        .map(|&trials| convergence_point(trials, seed))
        .collect()
}
