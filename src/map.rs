use crate::chain::{Node, Nodes, NodesMut, Slots};
use crate::index::{hash_of, index_for, keys_match};
use crate::policy::Policy;
use crate::{Error, Result};
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter::FromIterator;
use core::mem;

/// A hash table whose buckets hold singly-linked chains of entries.
///
/// Lookups hash the key, pick the slot `|hash| mod capacity` and walk that slot's chain. Fresh
/// entries are linked in at the head of their chain. Once the number of entries reaches the
/// [threshold](Policy::threshold) the bucket array doubles and every entry is relinked.
pub struct ChainMap<K, V, S = ahash::RandomState> {
    policy: Policy,
    slots: Slots<K, V>,
    len: usize,
    hash_builder: S,
}

impl<K, V> ChainMap<K, V, ahash::RandomState> {
    /// An empty table with 16 slots and a load factor of 0.75.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// An empty table with room for at least `initial_capacity` slots, rounded up to a power of
    /// two and clamped to [`MAXIMUM_CAPACITY`](crate::MAXIMUM_CAPACITY).
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::with_policy_and_hasher(Policy::with_capacity(initial_capacity), Default::default())
    }

    /// ```
    /// # use chainmap::{ChainMap, Error};
    /// let map = ChainMap::<&str, u8>::with_capacity_and_load_factor(3, 0.5).unwrap();
    /// assert_eq!((map.capacity(), map.threshold()), (4, 2));
    ///
    /// assert!(matches!(
    ///     ChainMap::<&str, u8>::with_capacity_and_load_factor(3, f32::NAN),
    ///     Err(Error::InvalidLoadFactor(_)),
    /// ));
    /// ```
    pub fn with_capacity_and_load_factor(initial_capacity: isize, load_factor: f32) -> Result<Self> {
        let policy = Policy::new(initial_capacity, load_factor)?;
        Ok(Self::with_policy_and_hasher(policy, Default::default()))
    }
}

impl<K, V, S> ChainMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_policy_and_hasher(Policy::default(), hash_builder)
    }

    pub fn with_policy_and_hasher(policy: Policy, hash_builder: S) -> Self {
        Self {
            policy,
            slots: Slots::with_capacity(policy.capacity()),
            len: 0,
            hash_builder,
        }
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of slots in the bucket array.
    pub fn capacity(&self) -> usize {
        self.policy.capacity()
    }

    /// The entry count at which the next insertion grows the table.
    pub fn threshold(&self) -> usize {
        self.policy.threshold()
    }

    pub fn load_factor(&self) -> f32 {
        self.policy.load_factor()
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Drops every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }

    pub(crate) fn nodes(&self) -> Nodes<'_, K, V> {
        self.slots.nodes()
    }

    pub(crate) fn nodes_mut(&mut self) -> NodesMut<'_, K, V> {
        self.slots.nodes_mut()
    }
}

impl<K, V, S> ChainMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn slot_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        index_for(hash_of(&self.hash_builder, key), self.slots.capacity())
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key);
        self.slots
            .find(slot, |node| node.index == slot && keys_match(node.key.borrow(), key))
    }

    /// ```
    /// # use chainmap::ChainMap;
    /// let mut map = ChainMap::new();
    /// map.insert(String::from("Bodleian Library"), "Oxford");
    /// assert_eq!(map.get("Bodleian Library"), Some(&"Oxford"));
    /// assert_eq!(map.get("Athenæum"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|node| &node.value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|node| (&node.key, &node.value))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key);
        self.slots
            .find_mut(slot, |node| node.index == slot && keys_match(node.key.borrow(), key))
            .map(|node| &mut node.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// [`get`](Self::get) for a key that may be absent. An absent key is never present.
    pub fn get_nullable<Q>(&self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        key.and_then(|key| self.get(key))
    }

    pub fn contains_key_nullable<Q>(&self, key: Option<&Q>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_nullable(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// Fails with [`Error::NullKey`] if `key` is `None`.
    ///
    /// ```
    /// # use chainmap::{ChainMap, Error};
    /// let mut map = ChainMap::new();
    /// assert_eq!(map.put(Some('ξ'), 1), Ok(None));
    /// assert_eq!(map.put(Some('ξ'), 2), Ok(Some(1)));
    /// assert_eq!(map.put(None, 3), Err(Error::NullKey));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: Option<K>, value: V) -> Result<Option<V>> {
        let key = key.ok_or(Error::NullKey)?;
        Ok(self.insert(key, value))
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// A key seen for the first time becomes the head of its slot's chain, and may grow the
    /// table.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let slot = self.slot_of(&key);

        if let Some(node) = self
            .slots
            .find_mut(slot, |node| node.index == slot && keys_match(&node.key, &key))
        {
            return Some(mem::replace(&mut node.value, value));
        }

        self.slots.push_front(slot, Node::new(key, value, slot));
        self.len += 1;

        if self.policy.is_growth_due(self.len) {
            self.grow();
        }

        None
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key);
        let node = self
            .slots
            .unlink(slot, |node| node.index == slot && keys_match(node.key.borrow(), key))?;
        self.len -= 1;

        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    /// Copies every entry of `other` into this table. Where both hold a key, `other`'s value wins.
    pub fn put_all<S2>(&mut self, other: &ChainMap<K, V, S2>)
    where
        K: Clone,
        V: Clone,
    {
        for (key, value) in other.iter() {
            self.insert(key.clone(), value.clone());
        }
    }

    // Every new slot is worked out before anything moves. Hashing runs user code that may panic,
    // and a panic there must leave the old chains intact.
    fn grow(&mut self) {
        let grown = match self.policy.grown() {
            Some(grown) => grown,
            None => {
                log::trace!(
                    "table at maximum capacity {}, holding {} entries",
                    self.policy.capacity(),
                    self.len
                );
                return;
            }
        };

        let capacity = grown.capacity();
        let hash_builder = &self.hash_builder;
        let plan: Vec<usize> = self
            .slots
            .nodes()
            .map(|node| index_for(hash_of(hash_builder, &node.key), capacity))
            .collect();

        self.slots = self.slots.rehoused(capacity, &plan);

        log::debug!(
            "grew table from {} to {} slots at {} entries",
            self.policy.capacity(),
            capacity,
            self.len
        );

        self.policy = grown;
    }
}

impl<K, V, S: Default> Default for ChainMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for ChainMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy,
            slots: self.slots.clone(),
            len: self.len,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, S> core::fmt::Debug for ChainMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two tables are equal when they hold the same entries, whatever their capacities.
impl<K, V, S> PartialEq for ChainMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for ChainMap<K, V, S> {}

impl<K, Q, V, S> core::ops::Index<&Q> for ChainMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no entry found for key"),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainMap<K, V, S> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for ChainMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for ChainMap<K, V, S> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}
