//! Iterators over a `PrimitiveHashMap`.
//!
//! Shared iteration walks the table in bucket order, following each bucket's
//! `next` links. Mutable and owning iteration go through the node arena and
//! yield entries in arena order instead.

use crate::key::PrimitiveKey;
use crate::node::{Node, NodeKey};
use crate::primitive_hash_map::PrimitiveHashMap;
use core::iter::FusedIterator;
use slotmap::basic;

/// Entries in table order.
pub struct Iter<'a, K, V> {
    map: &'a PrimitiveHashMap<K, V>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, K: PrimitiveKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        let n = self.next?;
        self.next = map.successor(n);
        self.remaining -= 1;
        let node = &map.nodes[n];
        Some((node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: PrimitiveKey, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K: PrimitiveKey, V> FusedIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<K: PrimitiveKey, V> Iterator for Keys<'_, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: PrimitiveKey, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K: PrimitiveKey, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K: PrimitiveKey, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: PrimitiveKey, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K: PrimitiveKey, V> FusedIterator for Values<'_, K, V> {}

/// Entries with mutable values, in arena order.
pub struct IterMut<'a, K, V> {
    inner: basic::IterMut<'a, NodeKey, Node<K, V>>,
}

impl<'a, K: Copy, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, n)| (n.key, &mut n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Copy, V> ExactSizeIterator for IterMut<'_, K, V> {}

pub struct ValuesMut<'a, K, V>(IterMut<'a, K, V>);

impl<'a, K: Copy, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Copy, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// Owning iterator returned by `into_iter`.
pub struct IntoIter<K, V> {
    inner: basic::IntoIter<NodeKey, Node<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next().map(|(_, n)| (n.key, n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// Removes entries as it yields them. The table is reset when the drain is
/// created, so dropping it early still leaves the map empty.
pub struct Drain<'a, K, V> {
    inner: basic::Drain<'a, NodeKey, Node<K, V>>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next().map(|(_, n)| (n.key, n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: PrimitiveKey, V> PrimitiveHashMap<K, V> {
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            next: self.first_node(),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.nodes.iter_mut(),
        }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }

    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.mod_count.bump();
        self.table.fill(Default::default());
        Drain {
            inner: self.nodes.drain(),
        }
    }
}

impl<K: PrimitiveKey, V> IntoIterator for PrimitiveHashMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.nodes.into_iter(),
        }
    }
}

impl<'a, K: PrimitiveKey, V> IntoIterator for &'a PrimitiveHashMap<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K: PrimitiveKey, V> IntoIterator for &'a mut PrimitiveHashMap<K, V> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
