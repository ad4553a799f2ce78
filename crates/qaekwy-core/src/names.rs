//! Constraint-name generators.
//!
//! The modeller asks its generator for a name whenever a constraint is added
//! without one. Injecting the generator keeps serialized output reproducible.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of fresh constraint names.
pub trait NameGenerator: Send {
    fn next_name(&mut self) -> String;
}

/// Deterministic `<prefix><n>` names starting at 0.
#[derive(Debug, Clone)]
pub struct SequentialNames {
    prefix: String,
    next: u64,
}

impl SequentialNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialNames {
    fn default() -> Self {
        Self::new("c")
    }
}

impl NameGenerator for SequentialNames {
    fn next_name(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

/// Random 16-character alphanumeric names.
#[derive(Debug, Clone)]
pub struct RandomNames {
    rng: StdRng,
}

impl RandomNames {
    pub const LENGTH: usize = 16;

    /// Seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNames {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator for RandomNames {
    fn next_name(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect()
    }
}
