/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Random delay model.
//!
//! Both simulated costs of a task are uniform draws from a closed range of
//! seconds:
//!
//! | Delay | Default range | Drawn by |
//! |---|---|---|
//! | network latency | `[0.0, 0.2]` s | scheduler, at assignment time |
//! | processing time | `[0.1, 0.5]` s | dispatcher, just before spawning |
//!
//! All randomness flows through [`SimRng`] so a fixed seed reproduces a run
//! exactly.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use thiserror::Error;

/// Random source used for every delay draw.
pub type SimRng = Pcg64;

/// Build the simulation RNG: seeded when `seed` is given, entropy-seeded
/// otherwise.
pub fn sim_rng(seed: Option<u64>) -> SimRng {
    match seed {
        Some(s) => Pcg64::seed_from_u64(s),
        None => Pcg64::from_entropy(),
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DelayError {
    #[error("delay bound {0} is not a finite number")]
    NotFinite(f64),

    #[error("delay bound {0} is negative")]
    Negative(f64),

    #[error("delay range is inverted: min {min}s > max {max}s")]
    Inverted { min: f64, max: f64 },

    #[error("time scale {0} must be finite and non-negative")]
    InvalidScale(f64),

    #[error("delay bound {0}s is too large to represent as a duration")]
    TooLarge(f64),
}

// ── DelayRange ────────────────────────────────────────────────────────────────

/// Closed interval `[min, max]` of seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    min: f64,
    max: f64,
}

impl DelayRange {
    pub const DEFAULT_PROCESSING: DelayRange = DelayRange { min: 0.1, max: 0.5 };
    pub const DEFAULT_LATENCY: DelayRange = DelayRange { min: 0.0, max: 0.2 };

    pub fn new(min: f64, max: f64) -> Result<Self, DelayError> {
        for bound in [min, max] {
            check_bound(bound)?;
        }
        if min > max {
            return Err(DelayError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min_secs(&self) -> f64 {
        self.min
    }

    pub fn max_secs(&self) -> f64 {
        self.max
    }

    /// Uniform draw from the range.  A degenerate range always yields `min`
    /// and consumes no randomness.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return Duration::from_secs_f64(self.min);
        }
        Duration::from_secs_f64(rng.gen_range(self.min..=self.max))
    }

    /// Both bounds multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self, DelayError> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(DelayError::InvalidScale(factor));
        }
        // The products can overflow to infinity or past Duration::MAX
        Self::new(self.min * factor, self.max * factor)
    }
}

/// Every bound must convert to a `Duration` so `sample` cannot panic.
fn check_bound(bound: f64) -> Result<(), DelayError> {
    if !bound.is_finite() {
        return Err(DelayError::NotFinite(bound));
    }
    if bound < 0.0 {
        return Err(DelayError::Negative(bound));
    }
    if Duration::try_from_secs_f64(bound).is_err() {
        return Err(DelayError::TooLarge(bound));
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
