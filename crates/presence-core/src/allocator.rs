//! Identity allocation.
//!
//! Hands out a unique name and a cyclic color to each new connection:
//! - Names come from a fixed pool, chosen uniformly at random among the
//!   labels not currently in use.
//! - Once every pool label is taken, a random label gets the smallest
//!   numeric suffix that is still free (`Fox1`, `Fox2`, ...).
//! - Colors walk the palette with a process-wide counter and are never
//!   reclaimed.
//!
//! Allocation never fails and never blocks.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::identity::{Identity, DEFAULT_NAMES, DEFAULT_PALETTE};

/// Assigns collision-free names and palette colors.
///
/// The set of names handed out and not yet released is tracked here;
/// the caller is responsible for calling [`IdentityAllocator::release_name`]
/// when a connection goes away.
#[derive(Debug)]
pub struct IdentityAllocator {
    /// Base pool of labels.
    names: Vec<String>,

    /// Cursor color palette.
    palette: Vec<String>,

    /// Names currently assigned to a live connection.
    used_names: HashSet<String>,

    /// Number of colors handed out so far; never rewound.
    color_counter: u64,

    rng: StdRng,
}

impl IdentityAllocator {
    /// Allocator over the default pools, seeded from the OS.
    pub fn new() -> Self {
        Self::build(default_names(), default_palette(), StdRng::from_os_rng())
    }

    /// Allocator over the default pools with a reproducible random source.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(default_names(), default_palette(), StdRng::seed_from_u64(seed))
    }

    /// Allocator over custom pools, seeded from the OS.
    ///
    /// An empty pool is replaced by the corresponding default so that
    /// allocation can always succeed.
    pub fn with_pools<N, P>(names: N, palette: P) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::build(
            names.into_iter().map(Into::into).collect(),
            palette.into_iter().map(Into::into).collect(),
            StdRng::from_os_rng(),
        )
    }

    /// Replace the random source with a seeded one.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn build(mut names: Vec<String>, mut palette: Vec<String>, rng: StdRng) -> Self {
        // Duplicate labels would skew the uniform draw.
        let mut seen = HashSet::new();
        names.retain(|n| seen.insert(n.clone()));

        if names.is_empty() {
            names = default_names();
        }
        if palette.is_empty() {
            palette = default_palette();
        }

        IdentityAllocator {
            names,
            palette,
            used_names: HashSet::new(),
            color_counter: 0,
            rng,
        }
    }

    /// Allocate a full identity: a fresh name plus the next color.
    pub fn allocate(&mut self) -> Identity {
        let name = self.allocate_name();
        let color = self.allocate_color();
        Identity { name, color }
    }

    /// Return a name that is not currently in use and mark it as used.
    pub fn allocate_name(&mut self) -> String {
        let free: Vec<usize> = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, n)| !self.used_names.contains(n.as_str()))
            .map(|(i, _)| i)
            .collect();

        let name = if free.is_empty() {
            self.suffixed_name()
        } else {
            let pick = free[self.rng.random_range(0..free.len())];
            self.names[pick].clone()
        };

        self.used_names.insert(name.clone());
        name
    }

    /// Every base label is taken: pick one at random and append the
    /// smallest positive integer that yields an unused name.
    fn suffixed_name(&mut self) -> String {
        let idx = self.rng.random_range(0..self.names.len());
        let label = &self.names[idx];

        let mut n: u64 = 1;
        loop {
            let candidate = format!("{label}{n}");
            if !self.used_names.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Make `name` available again. No-op if it is not in use.
    pub fn release_name(&mut self, name: &str) {
        self.used_names.remove(name);
    }

    /// Next palette color. Colors are not reclaimed on release.
    pub fn allocate_color(&mut self) -> String {
        let idx = (self.color_counter % self.palette.len() as u64) as usize;
        self.color_counter += 1;
        self.palette[idx].clone()
    }

    pub fn is_in_use(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// Number of names currently handed out.
    pub fn in_use_count(&self) -> usize {
        self.used_names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

fn default_names() -> Vec<String> {
    DEFAULT_NAMES.iter().map(|n| n.to_string()).collect()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}
