use std::sync::Arc;

use crate::{
    catalog::Catalog,
    services::{random::RngSource, TextGenerator},
};

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub generator: Arc<dyn TextGenerator>,
    /// When set, every request ranks with a generator seeded from this value
    pub rng_seed: Option<u64>,
}

impl AppState {
    pub fn new(catalog: Catalog, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            catalog,
            generator,
            rng_seed: None,
        }
    }

    pub fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Fresh random source for one request
    pub fn random_source(&self) -> RngSource {
        match self.rng_seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        }
    }
}
