//! Fail-fast traversal that tolerates removal of the current entry.
//!
//! A `Cursor` holds no borrow of the map, so the map can be mutated between
//! steps. Every step compares the map's generation with the one the cursor
//! recorded; a mismatch means some other code changed the structure, and
//! the step fails instead of following links that may no longer exist.
//! A cursor only works with the map that created it.

use crate::key::PrimitiveKey;
use crate::node::{MapId, NodeKey};
use crate::primitive_hash_map::PrimitiveHashMap;
use core::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CursorError {
    /// The map was structurally modified outside this cursor.
    ConcurrentModification,
    /// `remove` called before `next` or twice for the same entry.
    NoCurrentEntry,
    /// The cursor was created by a different map.
    WrongMap,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::ConcurrentModification => {
                write!(f, "map was structurally modified during traversal")
            }
            CursorError::NoCurrentEntry => write!(f, "cursor has no current entry"),
            CursorError::WrongMap => write!(f, "cursor used with a different map"),
        }
    }
}

impl std::error::Error for CursorError {}

/// Position in table order, detached from the map it walks.
#[derive(Clone, Debug)]
pub struct Cursor {
    owner: MapId,
    expected: u64,
    next: Option<NodeKey>,
    current: Option<NodeKey>,
}

impl Cursor {
    /// Whether another entry remains. Does not check for modification.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    fn check<K, V>(&self, map: &PrimitiveHashMap<K, V>) -> Result<(), CursorError> {
        if map.id != self.owner {
            return Err(CursorError::WrongMap);
        }
        map.mod_count.check(self.expected)
    }

    /// Advances to the next entry.
    pub fn next<'a, K: PrimitiveKey, V>(
        &mut self,
        map: &'a PrimitiveHashMap<K, V>,
    ) -> Result<Option<(K, &'a V)>, CursorError> {
        self.check(map)?;
        let Some(n) = self.next else {
            self.current = None;
            return Ok(None);
        };
        let node = map.nodes.get(n).ok_or(CursorError::ConcurrentModification)?;
        self.next = map.successor(n);
        self.current = Some(n);
        Ok(Some((node.key, &node.value)))
    }

    /// Removes the entry last returned by `next`. The traversal continues
    /// with the entry that would have followed it.
    pub fn remove<K: PrimitiveKey, V>(
        &mut self,
        map: &mut PrimitiveHashMap<K, V>,
    ) -> Result<(K, V), CursorError> {
        self.check(map)?;
        let n = self.current.take().ok_or(CursorError::NoCurrentEntry)?;
        let key = map
            .nodes
            .get(n)
            .map(|node| node.key)
            .ok_or(CursorError::ConcurrentModification)?;
        let removed = map
            .remove_node(&key, |_| true, false)
            .ok_or(CursorError::ConcurrentModification)?;
        self.expected = map.mod_count.get();
        log::trace!("cursor removed {:?}", removed.0);
        Ok(removed)
    }
}

impl<K: PrimitiveKey, V> PrimitiveHashMap<K, V> {
    /// Starts a fail-fast traversal at the first entry in table order.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            owner: self.id,
            expected: self.mod_count.get(),
            next: self.first_node(),
            current: None,
        }
    }
}
