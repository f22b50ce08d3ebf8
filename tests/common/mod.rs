//! Shared test helpers for integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Once;

/// One-time tracing initialization.
static TRACING_INIT: Once = Once::new();

/// Route `tracing` output through the test harness; set `RUST_LOG` to see
/// generation progress (e.g. `RUST_LOG=primeforge=debug`).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Deterministic CSPRNG so generation tests are reproducible; vary the seed
/// per test to keep their random streams independent.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
