//! Construction parameters and their validation.

use core::fmt;

/// Largest table length; capacity requests above it are clamped.
pub const MAXIMUM_CAPACITY: usize = 1 << 30;
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Initial sizing for a `PrimitiveHashMap`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub initial_capacity: usize,
    pub load_factor: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl MapConfig {
    pub fn new(initial_capacity: usize, load_factor: f32) -> Self {
        Self {
            initial_capacity,
            load_factor,
        }
    }

    /// Rejects a load factor that is NaN, infinite, zero or negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_load_factor(self.load_factor)
    }

    /// Capacity after clamping to `MAXIMUM_CAPACITY`.
    pub fn clamped_capacity(&self) -> usize {
        self.initial_capacity.min(MAXIMUM_CAPACITY)
    }
}

pub(crate) fn validate_load_factor(load_factor: f32) -> Result<(), ConfigError> {
    if load_factor.is_finite() && load_factor > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLoadFactor(load_factor))
    }
}

/// Smallest power of two `>= cap`, at least 1 and at most `MAXIMUM_CAPACITY`.
pub(crate) fn table_size_for(cap: usize) -> usize {
    if cap >= MAXIMUM_CAPACITY {
        MAXIMUM_CAPACITY
    } else {
        cap.max(1).next_power_of_two()
    }
}

/// `capacity * load_factor`, pinned to `usize::MAX` once capacity saturates.
pub(crate) fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    let ft = capacity as f64 * load_factor as f64;
    if capacity < MAXIMUM_CAPACITY && ft < MAXIMUM_CAPACITY as f64 {
        ft as usize
    } else {
        usize::MAX
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    InvalidLoadFactor(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLoadFactor(lf) => write!(f, "invalid load factor: {}", lf),
        }
    }
}

impl std::error::Error for ConfigError {}
