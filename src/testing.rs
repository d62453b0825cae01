//! Hashers for steering keys into chosen slots.

use core::hash::{BuildHasher, Hasher};

/// Every key gets the same hash, so a whole table collapses into one chain.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Constant(pub(crate) u64);

pub(crate) struct ConstantHasher(u64);

impl BuildHasher for Constant {
    type Hasher = ConstantHasher;

    fn build_hasher(&self) -> ConstantHasher {
        ConstantHasher(self.0)
    }
}

impl Hasher for ConstantHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, _: &[u8]) {}
}

/// Integers hash to themselves (sign-extended), so `-5` lands in slot 5.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Identity;

#[derive(Default)]
pub(crate) struct IdentityHasher(u64);

impl BuildHasher for Identity {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> IdentityHasher {
        IdentityHasher::default()
    }
}

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(b);
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }

    fn write_i32(&mut self, n: i32) {
        self.0 = i64::from(n) as u64;
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_i64(&mut self, n: i64) {
        self.0 = n as u64;
    }
}
