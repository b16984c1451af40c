//! Shared random number generator
//!
//! Every generation step takes the generator lock for exactly one draw.
//! Multi-step algorithms such as [`RandomSource::shuffle`] re-acquire the
//! lock per step so concurrent callers interleave instead of serializing.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::{Builder, Uuid};

use crate::error::{Result, StdlibError};

static GLOBAL: Lazy<Arc<RandomSource>> = Lazy::new(|| Arc::new(RandomSource::from_entropy()));

/// A seedable generator guarded by a mutex.
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RandomSource")
    }
}

impl RandomSource {
    /// The process-wide generator.
    pub fn global() -> Arc<RandomSource> {
        Arc::clone(&GLOBAL)
    }

    /// A generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// A deterministic generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Reseed in place; subsequent draws are reproducible.
    pub fn seed(&self, seed: u64) {
        *self.rng.lock() = StdRng::seed_from_u64(seed);
        tracing::debug!(seed, "random generator reseeded");
    }

    /// Reseed from the current time in nanoseconds.
    pub fn seed_from_time(&self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        self.seed(nanos);
    }

    /// Uniform double in `[0, 1)`.
    pub fn next_f64(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }

    /// Uniform double in `[min, max)`.
    pub fn range_f64(&self, min: f64, max: f64) -> Result<f64> {
        if min.is_nan() || max.is_nan() || min >= max {
            return Err(StdlibError::InvalidArgument(
                "RANDOM_RANGE: min must be less than max".to_string(),
            ));
        }
        Ok(min + self.next_f64() * (max - min))
    }

    /// Uniform integer in `[min, max)`.
    pub fn int_range(&self, min: i64, max: i64) -> Result<i64> {
        if min >= max {
            return Err(StdlibError::InvalidArgument(
                "RANDOM_INT: min must be less than max".to_string(),
            ));
        }
        Ok(self.rng.lock().gen_range(min..max))
    }

    /// Fair coin flip.
    pub fn bool(&self) -> bool {
        self.next_f64() >= 0.5
    }

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    pub fn index(&self, n: usize) -> Result<usize> {
        if n == 0 {
            return Err(StdlibError::EmptyContainer {
                operation: "choose",
            });
        }
        Ok(self.rng.lock().gen_range(0..n))
    }

    /// Fisher-Yates shuffle in place, locking once per swap.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.lock().gen_range(0..=i);
            items.swap(i, j);
        }
    }

    /// A string of `len` characters drawn uniformly from `charset`.
    pub fn random_string(&self, len: usize, charset: &str) -> Result<String> {
        if len == 0 {
            return Ok(String::new());
        }
        let chars: Vec<char> = charset.chars().collect();
        if chars.is_empty() {
            return Err(StdlibError::InvalidArgument(
                "RANDOM_STRING: empty charset".to_string(),
            ));
        }
        let mut out = String::with_capacity(len);
        for _ in 0..len {
            let pick = self.rng.lock().gen_range(0..chars.len());
            out.push(chars[pick]);
        }
        Ok(out)
    }

    /// A version 4 UUID built from this generator's bytes.
    pub fn uuid(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.lock().fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}
