//! primitive-hashmap: a hash map keyed by primitive values, whose
//! collision chains are promoted to red-black trees when they grow long.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one generic table for every primitive key width instead of a
//!   hand-copied map per primitive. Keys implement [`PrimitiveKey`], which
//!   supplies a 32-bit base hash and a total order.
//! - Layers:
//!   - `node`: entries live in a `slotmap` arena. Every link (`next`,
//!     `prev`, `parent`, `left`, `right`) is an `Option<NodeKey>`, so
//!     rotations are index swaps and no entry is aliased mutably.
//!   - `tree`: red-black operations over one bucket's nodes (insert,
//!     delete with successor swap, treeify, untreeify, split on resize).
//!   - `PrimitiveHashMap<K, V>`: the table of `Bucket`s plus sizing,
//!     the compute family, bulk operations and bucket introspection.
//!
//! Buckets
//! - `Bucket::Empty`, `Bucket::Chain(first)` or `Bucket::Tree { first, len }`.
//!   Bucket kind is matched exhaustively; there is no runtime type test.
//! - A chain becomes a tree when it reaches 8 entries and the table has at
//!   least 64 buckets. Smaller tables are grown instead.
//! - A tree reverts to a chain when removal leaves 6 or fewer live nodes,
//!   or when a resize split leaves a half that small.
//! - Tree nodes stay linked through `next`/`prev` in bucket order, and the
//!   bucket's `first` is kept equal to the tree root after every insert and
//!   movable removal.
//!
//! Hashing
//! - The base hash is spread with `h ^ (h >> 16)` and masked with
//!   `capacity - 1`. The spread hash is stored per node, so resizing never
//!   rehashes a key.
//! - Within a tree, nodes are ordered by stored hash and then by
//!   `PrimitiveKey::key_cmp`. Primitive keys are totally ordered, so no
//!   identity tie-break exists.
//!
//! Sizing
//! - The table is allocated lazily. Capacity is 0 or a power of two no
//!   larger than [`MAXIMUM_CAPACITY`]; at the maximum the resize threshold
//!   is pinned to `usize::MAX` and further growth is ignored.
//!
//! Modification tracking
//! - Each map carries a generation counter bumped on every structural
//!   change. Borrowing iterators cannot observe changes at all. A
//!   [`Cursor`] holds no borrow and reports
//!   [`CursorError::ConcurrentModification`] when the generation moved;
//!   removal through the cursor itself refreshes its snapshot.
//!
//! Notes and non-goals
//! - Not synchronized; `Send`/`Sync` follow `K` and `V` like any owned
//!   collection, and sharing requires external locking.
//! - Persisted state (feature `serde`) stores capacity, load factor, len
//!   and entries; loading validates them and rebuilds with ordinary inserts.

pub mod config;
pub mod cursor;
pub mod iter;
pub mod key;
mod mod_count;
mod node;
mod primitive_hash_map;
mod primitive_hash_map_proptest;
#[cfg(feature = "serde")]
mod serde;
mod tree;

// Public surface
pub use config::{
    ConfigError, MapConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, MAXIMUM_CAPACITY,
};
pub use cursor::{Cursor, CursorError};
pub use iter::{Drain, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use key::PrimitiveKey;
pub use node::{BucketKind, Handle};
pub use primitive_hash_map::PrimitiveHashMap;
pub use tree::{MIN_TREEIFY_CAPACITY, TREEIFY_THRESHOLD, UNTREEIFY_THRESHOLD};

pub type BooleanHashMap<V> = PrimitiveHashMap<bool, V>;
pub type ByteHashMap<V> = PrimitiveHashMap<i8, V>;
pub type ShortHashMap<V> = PrimitiveHashMap<i16, V>;
pub type CharHashMap<V> = PrimitiveHashMap<char, V>;
pub type IntHashMap<V> = PrimitiveHashMap<i32, V>;
pub type LongHashMap<V> = PrimitiveHashMap<i64, V>;
pub type FloatHashMap<V> = PrimitiveHashMap<f32, V>;
pub type DoubleHashMap<V> = PrimitiveHashMap<f64, V>;
