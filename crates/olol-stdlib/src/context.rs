//! Call context and standard library configuration

use std::sync::Arc;

use crate::random::RandomSource;

/// Default chunk size of the buffered decorators.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Configuration for standard library calls.
#[derive(Debug, Clone)]
pub struct StdlibConfig {
    /// Initial refill size / flush threshold of new buffered decorators
    pub default_buffer_size: usize,

    /// When set, contexts get a private generator seeded with this value
    pub seed: Option<u64>,
}

impl Default for StdlibConfig {
    fn default() -> Self {
        Self {
            default_buffer_size: DEFAULT_BUFFER_SIZE,
            seed: None,
        }
    }
}

impl StdlibConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default buffer size. Zero is replaced by the default.
    pub fn with_default_buffer_size(mut self, size: usize) -> Self {
        self.default_buffer_size = if size == 0 { DEFAULT_BUFFER_SIZE } else { size };
        self
    }

    /// Seed a private generator for every context built from this config.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// State passed to every native function and method.
///
/// Carries the configuration and the random generator handle; cloning is
/// cheap and clones share the generator.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Active configuration
    pub config: StdlibConfig,

    random: Arc<RandomSource>,
}

impl Default for CallContext {
    fn default() -> Self {
        Self::with_config(StdlibConfig::default())
    }
}

impl CallContext {
    /// Create a context using the process-wide generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from a configuration.
    pub fn with_config(config: StdlibConfig) -> Self {
        let random = match config.seed {
            Some(seed) => Arc::new(RandomSource::from_seed(seed)),
            None => RandomSource::global(),
        };
        Self { config, random }
    }

    /// Replace the generator handle.
    pub fn with_random(mut self, random: Arc<RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// The generator handle
    pub fn random(&self) -> &RandomSource {
        &self.random
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = CallContext::new();
        assert_eq!(ctx.config.default_buffer_size, 1024);
        assert!(ctx.config.seed.is_none());
    }

    #[test]
    fn test_zero_buffer_size_falls_back() {
        let config = StdlibConfig::new().with_default_buffer_size(0);
        assert_eq!(config.default_buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_seeded_contexts_agree() {
        let a = CallContext::with_config(StdlibConfig::new().with_seed(7));
        let b = CallContext::with_config(StdlibConfig::new().with_seed(7));
        assert_eq!(a.random().next_f64(), b.random().next_f64());
    }

    #[test]
    fn test_clones_share_generator() {
        let a = CallContext::with_config(StdlibConfig::new().with_seed(3));
        let b = a.clone();
        let reference = CallContext::with_config(StdlibConfig::new().with_seed(3));

        let first = a.random().next_f64();
        let second = b.random().next_f64();
        assert_eq!(first, reference.random().next_f64());
        assert_eq!(second, reference.random().next_f64());
    }
}
