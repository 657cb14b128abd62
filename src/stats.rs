//! Sample mean, population standard deviation and z-scores.

use std::fmt;

/// Summary of a sample distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (squared deviations divided by `R`, not `R - 1`).
    pub std_dev: f64,
}

impl SampleStats {
    /// Returns `None` for an empty sample.
    pub fn from_counts(samples: &[u64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let r = samples.len() as f64;
        let mean = samples.iter().map(|&c| c as f64).sum::<f64>() / r;
        let variance = samples
            .iter()
            .map(|&c| {
                let d = c as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / r;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

/// Standardized deviation of an observation from a null distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZScore {
    /// `(observed - mean) / std_dev` with a non-zero standard deviation.
    Finite(f64),
    /// The null distribution has zero spread (or no samples), so the ratio is undefined.
    Indeterminate {
        /// `observed - mean` (`observed` itself when there are no samples).
        deviation: f64,
    },
}

impl ZScore {
    /// IEEE view of the score: `NaN` for `0/0`, `±inf` for a non-zero deviation over zero spread.
    pub fn value(self) -> f64 {
        match self {
            ZScore::Finite(z) => z,
            ZScore::Indeterminate { deviation } if deviation == 0.0 => f64::NAN,
            ZScore::Indeterminate { deviation } => deviation.signum() * f64::INFINITY,
        }
    }

    /// Returns the finite score, if any.
    pub fn finite(self) -> Option<f64> {
        match self {
            ZScore::Finite(z) => Some(z),
            ZScore::Indeterminate { .. } => None,
        }
    }

    /// Returns `true` when the score could not be defined.
    pub fn is_indeterminate(self) -> bool {
        matches!(self, ZScore::Indeterminate { .. })
    }
}

impl fmt::Display for ZScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZScore::Finite(z) => write!(f, "{z:.2}"),
            ZScore::Indeterminate { deviation } => write!(
                f,
                "undefined (zero variance; observed - mean = {deviation:.2})"
            ),
        }
    }
}

/// Computes the z-score of `observed` against `samples`.
pub fn z_score(observed: u64, samples: &[u64]) -> ZScore {
    let observed = observed as f64;
    match SampleStats::from_counts(samples) {
        Some(stats) if stats.std_dev > 0.0 => ZScore::Finite((observed - stats.mean) / stats.std_dev),
        Some(stats) => ZScore::Indeterminate {
            deviation: observed - stats.mean,
        },
        None => ZScore::Indeterminate {
            deviation: observed,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
