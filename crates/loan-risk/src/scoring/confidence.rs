use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the optional confidence attached to a score.
///
/// Scores themselves never depend on this value.
pub trait ConfidenceSource: Send + Sync {
    fn sample(&self) -> Option<f64>;
}

/// Produces no confidence, matching the deterministic simulation output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConfidence;

impl ConfidenceSource for NoConfidence {
    fn sample(&self) -> Option<f64> {
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedConfidence(f64);

impl FixedConfidence {
    pub fn new(value: f64) -> Self {
        Self(clamp_unit(value))
    }
}

impl ConfidenceSource for FixedConfidence {
    fn sample(&self) -> Option<f64> {
        Some(self.0)
    }
}

/// Uniform draw from `[low, high]`, rounded to two decimals.
pub struct UniformConfidence {
    low: f64,
    high: f64,
    rng: Option<Mutex<StdRng>>,
}

impl UniformConfidence {
    pub const DEFAULT_LOW: f64 = 0.7;
    pub const DEFAULT_HIGH: f64 = 0.9;

    pub fn new(low: f64, high: f64) -> Self {
        let (low, high) = ordered_unit_range(low, high);
        Self {
            low,
            high,
            rng: None,
        }
    }

    /// Reproducible draws for tests and replays.
    pub fn seeded(low: f64, high: f64, seed: u64) -> Self {
        let (low, high) = ordered_unit_range(low, high);
        Self {
            low,
            high,
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl Default for UniformConfidence {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOW, Self::DEFAULT_HIGH)
    }
}

impl fmt::Debug for UniformConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformConfidence")
            .field("low", &self.low)
            .field("high", &self.high)
            .field("seeded", &self.rng.is_some())
            .finish()
    }
}

impl ConfidenceSource for UniformConfidence {
    fn sample(&self) -> Option<f64> {
        let draw = match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                rng.gen_range(self.low..=self.high)
            }
            None => rand::thread_rng().gen_range(self.low..=self.high),
        };
        Some(round_hundredths(draw).clamp(self.low, self.high))
    }
}

/// Configured confidence behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidencePolicy {
    None,
    Fixed(f64),
    Random,
}

impl ConfidencePolicy {
    pub fn source(self) -> Arc<dyn ConfidenceSource> {
        match self {
            ConfidencePolicy::None => Arc::new(NoConfidence),
            ConfidencePolicy::Fixed(value) => Arc::new(FixedConfidence::new(value)),
            ConfidencePolicy::Random => Arc::new(UniformConfidence::default()),
        }
    }
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self::Random
    }
}

impl FromStr for ConfidencePolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "random" | "uniform" => Ok(Self::Random),
            "none" | "off" => Ok(Self::None),
            other => match other.parse::<f64>() {
                Ok(value) if (0.0..=1.0).contains(&value) => Ok(Self::Fixed(value)),
                _ => Err(format!(
                    "confidence must be random, none, or a decimal in [0, 1], got '{raw}'"
                )),
            },
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn ordered_unit_range(low: f64, high: f64) -> (f64, f64) {
    let (low, high) = (clamp_unit(low), clamp_unit(high));
    if low <= high {
        (low, high)
    } else {
        (high, low)
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
