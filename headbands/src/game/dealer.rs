//! Role dealing: shuffle a copy of the pool and draw without replacement.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::entities::RoleToken;

/// Random source used to deal roles.
///
/// `StdRng` rather than `ThreadRng` so a `Game` stays `Send` and can be
/// moved into a session task.
#[derive(Debug)]
pub struct RoleDealer {
    rng: StdRng,
}

impl RoleDealer {
    /// Create a dealer seeded from the OS entropy source
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a dealer that produces the same draws for the same seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw `count` roles from the pool
    ///
    /// # Arguments
    ///
    /// * `pool` - Role pool, left untouched
    /// * `count` - Number of roles to draw, must not exceed `pool.len()`
    ///
    /// # Returns
    ///
    /// * `Vec<RoleToken>` - The first `count` entries of a uniformly shuffled copy
    pub fn draw(&mut self, pool: &[RoleToken], count: usize) -> Vec<RoleToken> {
        let mut shuffled = pool.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled.truncate(count);
        shuffled
    }
}

impl Default for RoleDealer {
    fn default() -> Self {
        Self::new()
    }
}
