use alloc::boxed::Box;
use core::iter::FusedIterator;

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// The slot this node was last placed in. Only valid for the current capacity.
    pub(crate) index: usize,
    pub(crate) next: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, index: usize) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            index,
            next: None,
        })
    }
}

/// The bucket array. Each slot owns the head of its chain and each node owns its successor.
pub(crate) struct Slots<K, V> {
    heads: Box<[Link<K, V>]>,
}

impl<K, V> Slots<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heads: (0..capacity).map(|_| None).collect(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn find(
        &self,
        slot: usize,
        mut hit: impl FnMut(&Node<K, V>) -> bool,
    ) -> Option<&Node<K, V>> {
        let mut cur = self.heads[slot].as_deref();
        while let Some(node) = cur {
            if hit(node) {
                return Some(node);
            }
            cur = node.next.as_deref();
        }
        None
    }

    pub(crate) fn find_mut(
        &mut self,
        slot: usize,
        mut hit: impl FnMut(&Node<K, V>) -> bool,
    ) -> Option<&mut Node<K, V>> {
        let mut cur = self.heads[slot].as_deref_mut();
        while let Some(node) = cur {
            if hit(node) {
                return Some(node);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    /// Links `node` in as the new head of its chain.
    pub(crate) fn push_front(&mut self, slot: usize, mut node: Box<Node<K, V>>) {
        node.next = self.heads[slot].take();
        self.heads[slot] = Some(node);
    }

    /// Detaches the first node of the chain at `slot` accepted by `hit`, splicing its successor
    /// into the link that pointed at it.
    pub(crate) fn unlink(
        &mut self,
        slot: usize,
        mut hit: impl FnMut(&Node<K, V>) -> bool,
    ) -> Option<Box<Node<K, V>>> {
        let mut link = &mut self.heads[slot];
        while link.as_deref().map_or(false, |node| !hit(node)) {
            link = &mut link.as_mut()?.next;
        }

        let mut node = link.take()?;
        *link = node.next.take();
        Some(node)
    }

    /// Moves every node into a new bucket array of `capacity` slots.
    ///
    /// `plan` holds the destination slot of each node in [`Slots::nodes`] order. Nothing in here
    /// can fail, so a table is never left half moved.
    pub(crate) fn rehoused(&mut self, capacity: usize, plan: &[usize]) -> Self {
        let mut fresh = Self::with_capacity(capacity);
        let mut moved = 0;

        for head in self.heads.iter_mut() {
            let mut link = head.take();
            while let Some(mut node) = link {
                link = node.next.take();
                node.index = plan[moved];
                fresh.push_front(node.index, node);
                moved += 1;
            }
        }

        debug_assert_eq!(moved, plan.len());
        fresh
    }

    pub(crate) fn clear(&mut self) {
        for head in self.heads.iter_mut() {
            let mut link = head.take();
            while let Some(mut node) = link {
                link = node.next.take();
            }
        }
    }

    pub(crate) fn nodes(&self) -> Nodes<'_, K, V> {
        Nodes {
            heads: self.heads.iter(),
            current: None,
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> NodesMut<'_, K, V> {
        NodesMut {
            heads: self.heads.iter_mut(),
            current: None,
        }
    }
}

impl<K: Clone, V: Clone> Clone for Slots<K, V> {
    // Chains are copied in order, so the clone has the same layout as the original.
    fn clone(&self) -> Self {
        let mut fresh = Self::with_capacity(self.capacity());

        for (head, copy) in self.heads.iter().zip(fresh.heads.iter_mut()) {
            let mut tail = copy;
            let mut cur = head.as_deref();
            while let Some(node) = cur {
                let node_copy =
                    tail.insert(Node::new(node.key.clone(), node.value.clone(), node.index));
                tail = &mut node_copy.next;
                cur = node.next.as_deref();
            }
        }

        fresh
    }
}

// Chains are torn down one node at a time so a long chain cannot overflow the stack.
impl<K, V> Drop for Slots<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Every node of every chain, slot by slot and head to tail.
pub(crate) struct Nodes<'a, K, V> {
    heads: core::slice::Iter<'a, Link<K, V>>,
    current: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Clone for Nodes<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            heads: self.heads.clone(),
            current: self.current,
        }
    }
}

impl<'a, K, V> Iterator for Nodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current.take() {
                self.current = node.next.as_deref();
                return Some(node);
            }
            self.current = self.heads.next()?.as_deref();
        }
    }
}

impl<K, V> FusedIterator for Nodes<'_, K, V> {}

pub(crate) struct NodesMut<'a, K, V> {
    heads: core::slice::IterMut<'a, Link<K, V>>,
    current: Option<&'a mut Node<K, V>>,
}

impl<'a, K, V> Iterator for NodesMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current.take() {
                let Node {
                    key, value, next, ..
                } = node;
                self.current = next.as_deref_mut();
                return Some((&*key, value));
            }
            self.current = self.heads.next()?.as_deref_mut();
        }
    }
}

impl<K, V> FusedIterator for NodesMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn filled(layout: &[(usize, u32)]) -> Slots<u32, u32> {
        let mut slots = Slots::with_capacity(4);
        for &(slot, key) in layout {
            slots.push_front(slot, Node::new(key, key * 10, slot));
        }
        slots
    }

    fn keys(slots: &Slots<u32, u32>) -> Vec<u32> {
        slots.nodes().map(|node| node.key).collect()
    }

    #[test]
    fn push_front_is_newest_first() {
        let slots = filled(&[(1, 1), (1, 2), (1, 3), (3, 4)]);
        assert_eq!(keys(&slots), [3, 2, 1, 4]);
    }

    #[test]
    fn nodes_visit_whole_chains() {
        let slots = filled(&[(0, 1), (0, 2), (2, 3), (2, 4), (2, 5)]);
        assert_eq!(slots.nodes().count(), 5);
        assert_eq!(keys(&slots), [2, 1, 5, 4, 3]);
    }

    #[test]
    fn nodes_of_empty_slots() {
        let slots: Slots<u32, u32> = Slots::with_capacity(8);
        assert_eq!(slots.nodes().next().map(|node| node.key), None);
    }

    #[test]
    fn find_walks_past_head() {
        let mut slots = filled(&[(2, 1), (2, 2), (2, 3)]);
        assert_eq!(slots.find(2, |node| node.key == 1).map(|node| node.value), Some(10));
        assert!(slots.find(1, |node| node.key == 1).is_none());

        slots.find_mut(2, |node| node.key == 2).unwrap().value = 99;
        assert_eq!(slots.find(2, |node| node.key == 2).map(|node| node.value), Some(99));
    }

    macro_rules! test_unlink {
        ( $name:ident ; $key:expr => $rest:expr ) => {
            #[test]
            fn $name() {
                let mut slots = filled(&[(0, 1), (0, 2), (0, 3)]);
                let node = slots.unlink(0, |node| node.key == $key).unwrap();
                assert_eq!((node.key, node.value), ($key, $key * 10));
                assert!(node.next.is_none());
                assert_eq!(keys(&slots), $rest);
            }
        };
    }

    test_unlink! { unlink_head; 3 => [2, 1] }
    test_unlink! { unlink_middle; 2 => [3, 1] }
    test_unlink! { unlink_tail; 1 => [3, 2] }

    #[test]
    fn unlink_missing() {
        let mut slots = filled(&[(0, 1), (0, 2)]);
        assert!(slots.unlink(0, |node| node.key == 7).is_none());
        assert!(slots.unlink(3, |_| true).is_none());
        assert_eq!(keys(&slots), [2, 1]);
    }

    #[test]
    fn rehoused_follows_plan() {
        let mut slots = filled(&[(0, 1), (0, 2), (1, 3)]);
        // nodes() order is 2, 1, 3
        let fresh = slots.rehoused(8, &[5, 5, 7]);
        assert_eq!(fresh.capacity(), 8);
        assert!(keys(&slots).is_empty());
        assert_eq!(keys(&fresh), [1, 2, 3]);
        assert!(fresh.nodes().all(|node| {
            node.index == if node.key == 3 { 7 } else { 5 }
        }));
    }

    #[test]
    fn clone_keeps_layout() {
        let slots = filled(&[(0, 1), (0, 2), (3, 3)]);
        let copy = slots.clone();
        assert_eq!(keys(&copy), keys(&slots));
        assert_eq!(copy.find(3, |node| node.key == 3).map(|node| node.index), Some(3));
    }

    #[test]
    fn nodes_mut_reaches_every_value() {
        let mut slots = filled(&[(0, 1), (0, 2), (2, 3)]);
        for (_, value) in slots.nodes_mut() {
            *value += 1;
        }
        let values: Vec<u32> = slots.nodes().map(|node| node.value).collect();
        assert_eq!(values, [21, 11, 31]);
    }

    #[test]
    fn long_chain_drops() {
        let mut slots = Slots::with_capacity(1);
        for key in 0..200_000_u32 {
            slots.push_front(0, Node::new(key, (), 0));
        }
        drop(slots);
    }
}
