//! Benchmark utilities for tickbars.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickbars_lib::{MalformedInputError, RawTick, TickStore};

/// Shape of a synthetic tick stream.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticConfig {
    /// Number of ticks to generate.
    pub ticks: usize,
    /// Milliseconds between consecutive ticks.
    pub spacing_ms: i64,
    /// Every n-th tick carries no price. Zero disables.
    pub missing_price_every: usize,
    /// Seed for the price walk.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            ticks: 100_000,
            spacing_ms: 250,
            missing_price_every: 50,
            seed: 0x5eed,
        }
    }
}

/// Generates raw tick records following a deterministic random walk.
pub fn synthetic_records(config: SyntheticConfig) -> Vec<RawTick> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut price = 100.0_f64;

    (0..config.ticks)
        .map(|i| {
            price = (price + rng.random_range(-0.1..=0.1)).max(1.0);
            let timestamp = i as i64 * config.spacing_ms;
            let side = if rng.random_bool(0.5) { "true" } else { "false" };
            let missing = config.missing_price_every > 0 && i % config.missing_price_every == 0;
            let price_text = if missing { String::new() } else { format!("{price:.2}") };

            RawTick::new(timestamp.to_string(), price_text, side)
        })
        .collect()
}

/// Builds a tick store from a synthetic stream.
///
/// # Errors
///
/// Returns an error if a generated record is malformed.
pub fn synthetic_store(config: SyntheticConfig) -> Result<TickStore, MalformedInputError> {
    TickStore::build(synthetic_records(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_store() {
        let config = SyntheticConfig {
            ticks: 1_000,
            ..SyntheticConfig::default()
        };
        let store = synthetic_store(config).unwrap();
        let stats = store.stats();

        assert_eq!(stats.tick_count, 1_000);
        assert_eq!(stats.missing_price_count, 20);
        assert_eq!(stats.undefined_side_count, 0);
        assert_eq!(synthetic_records(config), synthetic_records(config));

        let reseeded = SyntheticConfig { seed: 7, ..config };
        assert_ne!(synthetic_records(config), synthetic_records(reseeded));
    }
}
