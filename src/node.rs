//! Arena-allocated entries, bucket heads and public handles.

use crate::key::PrimitiveKey;
use crate::primitive_hash_map::PrimitiveHashMap;
use core::sync::atomic::{AtomicU64, Ordering};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational index of an entry in the node arena.
    pub(crate) struct NodeKey;
}

pub(crate) type Arena<K, V> = SlotMap<NodeKey, Node<K, V>>;

/// One map entry. Chain entries only use `next`; tree entries also use the
/// red-black links and `prev`, and stay reachable through `next` so the
/// bucket can be walked in insertion-derived order.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) hash: u32,
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) next: Option<NodeKey>,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) left: Option<NodeKey>,
    pub(crate) right: Option<NodeKey>,
    pub(crate) red: bool,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(hash: u32, key: K, value: V, next: Option<NodeKey>) -> Self {
        Self {
            hash,
            key,
            value,
            next,
            prev: None,
            parent: None,
            left: None,
            right: None,
            red: false,
        }
    }

    pub(crate) fn clear_tree_links(&mut self) {
        self.prev = None;
        self.parent = None;
        self.left = None;
        self.right = None;
        self.red = false;
    }
}

/// One table slot. The payload is the first entry in `next` order; for a
/// tree bucket that is normally the root, restored by `move_root_to_front`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Bucket {
    #[default]
    Empty,
    Chain(NodeKey),
    Tree { first: NodeKey, len: usize },
}

impl Bucket {
    pub(crate) fn first(&self) -> Option<NodeKey> {
        match *self {
            Bucket::Empty => None,
            Bucket::Chain(first) | Bucket::Tree { first, .. } => Some(first),
        }
    }

    pub(crate) fn kind(&self) -> BucketKind {
        match self {
            Bucket::Empty => BucketKind::Empty,
            Bucket::Chain(_) => BucketKind::Chain,
            Bucket::Tree { .. } => BucketKind::Tree,
        }
    }
}

/// Representation of one bucket, exposed for inspection.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BucketKind {
    Empty,
    Chain,
    Tree,
}

/// Identity of one map instance. Arena keys from two maps can be equal, so
/// handles and cursors carry the id of the map that issued them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct MapId(u64);

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(0);

impl MapId {
    pub(crate) fn fresh() -> Self {
        MapId(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable reference to a live entry. Resolves to `None` once the entry is
/// removed, even if its arena slot is reused, and against any map other
/// than the one that issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    owner: MapId,
    node: NodeKey,
}

impl Handle {
    pub(crate) fn new(owner: MapId, node: NodeKey) -> Self {
        Handle { owner, node }
    }

    pub(crate) fn owner(&self) -> MapId {
        self.owner
    }

    pub(crate) fn raw_handle(&self) -> NodeKey {
        self.node
    }

    pub fn key<K, V>(&self, map: &PrimitiveHashMap<K, V>) -> Option<K>
    where
        K: PrimitiveKey,
    {
        map.handle_key(*self)
    }

    pub fn value<'a, K, V>(&self, map: &'a PrimitiveHashMap<K, V>) -> Option<&'a V>
    where
        K: PrimitiveKey,
    {
        map.handle_value(*self)
    }

    pub fn value_mut<'a, K, V>(&self, map: &'a mut PrimitiveHashMap<K, V>) -> Option<&'a mut V>
    where
        K: PrimitiveKey,
    {
        map.handle_value_mut(*self)
    }
}
