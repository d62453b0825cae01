//! A hash table built from a power-of-two bucket array and singly-linked
//! collision chains.
//!
//! ```
//! use chainmap::ChainMap;
//!
//! let mut map = ChainMap::new();
//! assert_eq!(map.put(Some("a"), "Hall").unwrap(), None);
//! assert_eq!(map.put(Some("b"), "Hslls").unwrap(), None);
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("a"), Some(&"Hall"));
//!
//! assert_eq!(map.remove("a"), Some("Hall"));
//! assert!(!map.contains_key("a"));
//! assert_eq!(map.len(), 1);
//! ```
//!
//! Keys are hashed through their own [`Hash`](core::hash::Hash) impl, fed to a hasher built by
//! the table's [`BuildHasher`](core::hash::BuildHasher) (by default [`ahash::RandomState`]).
//! Each stored node remembers the slot it was placed in, so growing the table relinks every node
//! into a freshly allocated bucket array.

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod chain;
pub mod index;
mod map;
pub mod policy;
#[cfg(feature = "serde")]
mod ser;
#[cfg(test)]
mod testing;
pub mod view;

pub use crate::map::ChainMap;
pub use crate::policy::{Policy, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, MAXIMUM_CAPACITY};
pub use crate::view::{Entry, Iter, IterMut, Keys};

#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The requested initial capacity was below zero.
    ///
    /// ```
    /// # use chainmap::{ChainMap, Error};
    /// let err = ChainMap::<u8, u8>::with_capacity_and_load_factor(-1, 0.75).unwrap_err();
    /// assert_eq!(err, Error::NegativeCapacity(-1));
    /// ```
    NegativeCapacity(isize),
    /// The load factor was zero, negative or NaN.
    InvalidLoadFactor(f32),
    /// `put` was handed an absent key.
    NullKey,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NegativeCapacity(n) => write!(f, "illegal initial capacity: {}", n),
            Self::InvalidLoadFactor(lf) => write!(f, "illegal load factor: {}", lf),
            Self::NullKey => write!(f, "null key passed to put"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T, E = Error> = core::result::Result<T, E>;
