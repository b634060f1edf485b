//! Random source contract for the story engine.
//!
//! The engine never reaches for ambient randomness. A single [`StoryRng`] is
//! threaded explicitly through every trigger, advance, and choice call, and
//! every probabilistic decision is derived from its uniform `[0, 1)` draws.
//! Given the same seed, the same save, and the same processing order, the
//! sequence of draws (and therefore every outcome) is reproducible.
//!
//! Out-of-range inputs (negative probabilities, empty pick lists) are
//! programmer errors in template data and fail immediately with [`RngError`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Contract violations raised by the random source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RngError {
    /// A probability outside `[0, 1]` (or NaN) was requested.
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// An integer range with `min > max` was requested.
    #[error("empty integer range {min}..={max}")]
    EmptyRange {
        /// Lower bound (inclusive).
        min: i64,
        /// Upper bound (inclusive).
        max: i64,
    },

    /// A pick was requested from an empty list.
    #[error("cannot pick from an empty list")]
    EmptyChoice,

    /// A weighted pick contained a negative or non-finite weight.
    #[error("invalid weight {0}")]
    InvalidWeight(f64),

    /// A weighted pick's weights summed to zero.
    #[error("weighted pick has zero total weight")]
    ZeroTotalWeight,
}

/// A uniform random source.
///
/// Implementors supply only [`next_f64`](StoryRng::next_f64); the contract
/// operations (`chance`, `next_int`, `pick`, `pick_weighted`) are defined on
/// `dyn StoryRng` in terms of it, so every implementation consumes draws
/// identically.
pub trait StoryRng {
    /// Draw a uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl<'a> dyn StoryRng + 'a {
    /// Draw a uniform value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.next_f64()
    }

    /// Return `true` with probability `p`. Always consumes one draw.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::InvalidProbability`] if `p` is outside `[0, 1]`.
    pub fn chance(&mut self, p: f64) -> Result<bool, RngError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(RngError::InvalidProbability(p));
        }
        Ok(self.next_f64() < p)
    }

    /// Uniform integer in `min..=max`. Consumes one draw.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::EmptyRange`] if `min > max`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn next_int(&mut self, min: i64, max: i64) -> Result<i64, RngError> {
        if min > max {
            return Err(RngError::EmptyRange { min, max });
        }
        let span = max.abs_diff(min).saturating_add(1);
        let offset = (self.next_f64() * span as f64).floor() as u64;
        // Clamp guards the float edge where the product rounds up to `span`.
        let offset = offset.min(span.saturating_sub(1));
        Ok(min.saturating_add_unsigned(offset))
    }

    /// Uniform pick from a non-empty slice. Consumes one draw.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::EmptyChoice`] if `items` is empty.
    pub fn pick<'i, T>(&mut self, items: &'i [T]) -> Result<&'i T, RngError> {
        let index = self.index(items.len())?;
        items.get(index).ok_or(RngError::EmptyChoice)
    }

    /// Weighted pick; each item is chosen proportionally to its weight.
    /// Consumes one draw.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::EmptyChoice`] for an empty list,
    /// [`RngError::InvalidWeight`] for a negative or non-finite weight, and
    /// [`RngError::ZeroTotalWeight`] if all weights are zero.
    pub fn pick_weighted<'i, T>(&mut self, items: &'i [(T, f64)]) -> Result<&'i T, RngError> {
        if items.is_empty() {
            return Err(RngError::EmptyChoice);
        }
        let mut total = 0.0_f64;
        for (_, weight) in items {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(RngError::InvalidWeight(*weight));
            }
            total += weight;
        }
        if total <= 0.0 {
            return Err(RngError::ZeroTotalWeight);
        }

        let target = self.next_f64() * total;
        let mut cumulative = 0.0_f64;
        let mut last_positive = None;
        for (item, weight) in items {
            if *weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            last_positive = Some(item);
            if target < cumulative {
                return Ok(item);
            }
        }
        last_positive.ok_or(RngError::ZeroTotalWeight)
    }

    /// Uniform index in `0..len`. Consumes one draw.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn index(&mut self, len: usize) -> Result<usize, RngError> {
        if len == 0 {
            return Err(RngError::EmptyChoice);
        }
        let raw = (self.next_f64() * len as f64).floor() as usize;
        Ok(raw.min(len.saturating_sub(1)))
    }
}

// ---------------------------------------------------------------------------
// SeededRng
// ---------------------------------------------------------------------------

/// Portable seeded random source backed by `ChaCha8`.
///
/// `ChaCha8` output is stable across platforms and crate versions, which is
/// what save replay requires.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Create a random source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an independent substream of `seed`.
    ///
    /// Draws on one stream never shift the draws of another, so unrelated
    /// consumers (world drift, player policy) can share a seed without
    /// perturbing narrative replay.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(seed);
        inner.set_stream(stream);
        Self { inner }
    }
}

impl StoryRng for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

// ---------------------------------------------------------------------------
// SequenceRng
// ---------------------------------------------------------------------------

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Useful for forcing exact branches: a trigger roll of `0.0` always
/// succeeds, `0.99` always fails. Values are clamped into `[0, 1)`; an empty
/// list always yields `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Create a sequence source from the given draws.
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl StoryRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let slot = self.cursor.checked_rem(self.draws.len()).unwrap_or(0);
        self.cursor = self.cursor.saturating_add(1);
        let value = self.draws.get(slot).copied().unwrap_or(0.0);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
