//! Identifier generation for node instances.
//!
//! Generated ids have the form `<type>-<token>` where the token is the
//! generator seed followed by a per-type counter in hex. A fixed-width seed
//! drawn from a random UUID keeps ids from separate runs apart in practice;
//! uniqueness is only guaranteed within one generator.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use uuid::Uuid;

use crate::{Error, Result};

const SEED_LEN: usize = 8;

/// Mints unique `<type>-<token>` ids, one counter per type name.
pub struct IdGenerator {
    seed: String,
    counters: Mutex<HashMap<String, u64>>,
}

impl IdGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        let mut seed = Uuid::new_v4().simple().to_string();
        seed.truncate(SEED_LEN);
        Self {
            seed,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a generator with an explicit seed (for testing or replay).
    ///
    /// The seed must be non-empty ASCII alphanumeric so that the token never
    /// contains the `-` separator.
    pub fn with_seed(seed: &str) -> Result<Self> {
        if seed.is_empty() || !seed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidSeed(seed.to_string()));
        }
        Ok(Self {
            seed: seed.to_string(),
            counters: Mutex::new(HashMap::new()),
        })
    }

    /// The process-wide generator shared by factories that do not bring their own.
    pub fn global() -> Arc<IdGenerator> {
        static GLOBAL: OnceLock<Arc<IdGenerator>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(IdGenerator::new())))
    }

    /// Returns this generator's seed.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Mints the next id for `type_name`, advancing that type's counter.
    pub fn next_id(&self, type_name: &str) -> Result<String> {
        if type_name.is_empty() {
            return Err(Error::InvalidTypeName(type_name.to_string()));
        }
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let counter = counters.entry(type_name.to_string()).or_insert(0);
        *counter += 1;
        Ok(format!("{type_name}-{}{:x}", self.seed, *counter))
    }

    /// Number of ids minted so far for `type_name`.
    #[must_use]
    pub fn issued(&self, type_name: &str) -> u64 {
        self.counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .copied()
            .unwrap_or(0)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
