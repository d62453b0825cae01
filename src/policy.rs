//! Capacity and load-factor rules.

use crate::{Error, Result};
use ordered_float::NotNan;

pub const DEFAULT_INITIAL_CAPACITY: usize = 1 << 4;

pub const MAXIMUM_CAPACITY: usize = 1 << 30;

pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// A validated bucket count together with the load factor and the entry count at which the table
/// grows.
///
/// The capacity is always a power of two no larger than [`MAXIMUM_CAPACITY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Policy {
    capacity: usize,
    load_factor: NotNan<f32>,
    threshold: usize,
    maximum: usize,
}

impl Policy {
    /// Validates the construction parameters.
    ///
    /// Capacities above [`MAXIMUM_CAPACITY`] are clamped rather than rejected.
    ///
    /// ```
    /// # use chainmap::{Error, Policy};
    /// let policy = Policy::new(100, 0.5).unwrap();
    /// assert_eq!(policy.capacity(), 128);
    /// assert_eq!(policy.threshold(), 64);
    ///
    /// assert_eq!(Policy::new(-1, 0.5), Err(Error::NegativeCapacity(-1)));
    /// assert_eq!(Policy::new(16, -0.5), Err(Error::InvalidLoadFactor(-0.5)));
    /// ```
    pub fn new(initial_capacity: isize, load_factor: f32) -> Result<Self> {
        if initial_capacity < 0 {
            return Err(Error::NegativeCapacity(initial_capacity));
        }

        let load_factor = NotNan::new(load_factor)
            .ok()
            .filter(|lf| lf.into_inner() > 0.0)
            .ok_or(Error::InvalidLoadFactor(load_factor))?;

        Ok(Self::build(initial_capacity as usize, load_factor))
    }

    /// The infallible form of [`Policy::new`] with the default load factor.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::build(initial_capacity, default_load_factor())
    }

    fn build(initial_capacity: usize, load_factor: NotNan<f32>) -> Self {
        let capacity = initial_capacity
            .min(MAXIMUM_CAPACITY)
            .max(1)
            .next_power_of_two();

        Self {
            capacity,
            load_factor,
            threshold: threshold_for(capacity, load_factor),
            maximum: MAXIMUM_CAPACITY,
        }
    }

    /// Lowers the growth ceiling below [`MAXIMUM_CAPACITY`], shrinking the capacity to fit.
    #[cfg(test)]
    pub(crate) fn capped_at(self, maximum: usize) -> Self {
        debug_assert!(maximum.is_power_of_two() && maximum <= MAXIMUM_CAPACITY);

        let capacity = self.capacity.min(maximum);
        Self {
            capacity,
            threshold: threshold_for(capacity, self.load_factor),
            maximum,
            ..self
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn load_factor(&self) -> f32 {
        self.load_factor.into_inner()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn is_growth_due(&self, len: usize) -> bool {
        len >= self.threshold
    }

    /// The policy for a table of twice the capacity, or `None` once the capacity has reached
    /// [`MAXIMUM_CAPACITY`].
    ///
    /// ```
    /// # use chainmap::{Policy, MAXIMUM_CAPACITY};
    /// let grown = Policy::default().grown().unwrap();
    /// assert_eq!((grown.capacity(), grown.threshold()), (32, 24));
    ///
    /// assert!(Policy::with_capacity(MAXIMUM_CAPACITY).grown().is_none());
    /// ```
    pub fn grown(&self) -> Option<Self> {
        if self.capacity >= self.maximum {
            return None;
        }

        let capacity = self.capacity << 1;

        Some(Self {
            capacity,
            threshold: threshold_for(capacity, self.load_factor),
            ..*self
        })
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }
}

fn default_load_factor() -> NotNan<f32> {
    NotNan::new(DEFAULT_LOAD_FACTOR).unwrap_or_else(|_| unreachable!())
}

// `as` saturates, so an infinite load factor yields a threshold that is never reached.
fn threshold_for(capacity: usize, load_factor: NotNan<f32>) -> usize {
    (capacity as f64 * f64::from(load_factor.into_inner())) as usize
}
