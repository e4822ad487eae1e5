//! PrimitiveHashMap: chained hash table whose long collision chains are
//! promoted to red-black trees.

use crate::config::{
    table_size_for, threshold_for, ConfigError, MapConfig,
    DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, MAXIMUM_CAPACITY,
};
use crate::key::PrimitiveKey;
use crate::mod_count::ModCount;
use crate::node::{Arena, Bucket, BucketKind, Handle, MapId, Node, NodeKey};
use crate::tree::{self, MIN_TREEIFY_CAPACITY, TREEIFY_THRESHOLD};
use core::fmt;
use core::mem;
use slotmap::SlotMap;

/// Spreads the high 16 bits of the base hash into the low 16 bits so that
/// power-of-two masks see them.
#[inline]
pub(crate) fn spread<K: PrimitiveKey>(key: &K) -> u32 {
    let h = key.hash_code();
    h ^ (h >> 16)
}

/// Outcome of `put_val`.
enum Put<V> {
    Inserted(NodeKey),
    Replaced(NodeKey, V),
    /// Key present and `only_if_absent` set; carries the rejected value.
    Kept(NodeKey, V),
}

impl<V> Put<V> {
    fn node(&self) -> NodeKey {
        match *self {
            Put::Inserted(n) | Put::Replaced(n, _) | Put::Kept(n, _) => n,
        }
    }
}

/// Hash map keyed by a primitive. Not synchronized; see the crate docs.
pub struct PrimitiveHashMap<K, V> {
    pub(crate) table: Vec<Bucket>,
    pub(crate) nodes: Arena<K, V>,
    // Before the first allocation this holds the initial table length.
    threshold: usize,
    load_factor: f32,
    pub(crate) mod_count: ModCount,
    pub(crate) id: MapId,
}

impl<K: PrimitiveKey, V> PrimitiveHashMap<K, V> {
    /// Empty map with the default capacity (16) and load factor (0.75).
    /// Allocates nothing until the first insert.
    pub fn new() -> Self {
        Self {
            table: Vec::new(),
            nodes: SlotMap::with_key(),
            threshold: 0,
            load_factor: DEFAULT_LOAD_FACTOR,
            mod_count: ModCount::new(),
            id: MapId::fresh(),
        }
    }

    /// Empty map whose first table holds at least `capacity` buckets
    /// (clamped to `MAXIMUM_CAPACITY`).
    pub fn with_capacity(capacity: usize) -> Self {
        let mut map = Self::new();
        map.threshold = table_size_for(capacity.min(MAXIMUM_CAPACITY));
        map
    }

    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f32,
    ) -> Result<Self, ConfigError> {
        Self::with_config(MapConfig::new(capacity, load_factor))
    }

    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut map = Self::with_capacity(config.clamped_capacity());
        map.load_factor = config.load_factor;
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current table length; 0 before the first insert.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Structural-modification counter.
    pub fn generation(&self) -> u64 {
        self.mod_count.get()
    }

    #[inline]
    fn index_for(&self, hash: u32) -> usize {
        (self.table.len() - 1) & hash as usize
    }

    pub(crate) fn find_node(&self, key: &K) -> Option<NodeKey> {
        if self.table.is_empty() {
            return None;
        }
        let hash = spread(key);
        match self.table[self.index_for(hash)] {
            Bucket::Empty => None,
            Bucket::Chain(first) => {
                let mut cursor = Some(first);
                while let Some(n) = cursor {
                    let node = &self.nodes[n];
                    if node.hash == hash && node.key.key_eq(key) {
                        return Some(n);
                    }
                    cursor = node.next;
                }
                None
            }
            Bucket::Tree { first, .. } => {
                tree::find(&self.nodes, tree::root(&self.nodes, first), hash, key)
            }
        }
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.find_node(&key).map(|n| &self.nodes[n].value)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let n = self.find_node(&key)?;
        Some(&mut self.nodes[n].value)
    }

    pub fn get_key_value(&self, key: K) -> Option<(K, &V)> {
        self.find_node(&key).map(|n| {
            let node = &self.nodes[n];
            (node.key, &node.value)
        })
    }

    /// The stored value, or `default` when the key is absent.
    pub fn get_or<'a>(&'a self, key: K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.find_node(&key).is_some()
    }

    /// Linear scan over every entry.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.nodes.values().any(|n| n.value == *value)
    }

    /// Handle of the entry for `key`, if present.
    pub fn find(&self, key: K) -> Option<Handle> {
        self.find_node(&key).map(|n| Handle::new(self.id, n))
    }

    /// Inserts or replaces; returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.put_val(key, value, false) {
            Put::Replaced(_, old) => Some(old),
            Put::Inserted(_) | Put::Kept(..) => None,
        }
    }

    /// Inserts only when the key is absent. Returns the existing value
    /// otherwise; `value` is dropped in that case.
    pub fn put_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        match self.put_val(key, value, true) {
            Put::Kept(n, _) => Some(&self.nodes[n].value),
            _ => None,
        }
    }

    fn put_val(&mut self, key: K, value: V, only_if_absent: bool) -> Put<V> {
        let hash = spread(&key);
        if self.table.is_empty() {
            self.resize();
        }
        let index = self.index_for(hash);
        let bucket = self.table[index];
        let inserted = match bucket {
            Bucket::Empty => {
                let n = self.nodes.insert(Node::new(hash, key, value, None));
                self.table[index] = Bucket::Chain(n);
                n
            }
            Bucket::Chain(first) => {
                let mut tail = first;
                let mut bin_count = 0usize;
                loop {
                    let node = &self.nodes[tail];
                    if node.hash == hash && node.key.key_eq(&key) {
                        return self.overwrite(tail, value, only_if_absent);
                    }
                    match node.next {
                        Some(next) => {
                            tail = next;
                            bin_count += 1;
                        }
                        None => break,
                    }
                }
                let n = self.nodes.insert(Node::new(hash, key, value, None));
                self.nodes[tail].next = Some(n);
                // bin_count + 1 nodes were present before the append.
                if bin_count + 1 >= TREEIFY_THRESHOLD {
                    self.treeify_bin(hash);
                }
                n
            }
            Bucket::Tree { first, len } => {
                let root = tree::root(&self.nodes, first);
                if let Some(p) = tree::find(&self.nodes, root, hash, &key) {
                    return self.overwrite(p, value, only_if_absent);
                }
                tree::insert(
                    &mut self.nodes,
                    &mut self.table,
                    index,
                    first,
                    len,
                    hash,
                    key,
                    value,
                )
            }
        };
        self.mod_count.bump();
        if self.nodes.len() > self.threshold {
            self.resize();
        }
        Put::Inserted(inserted)
    }

    fn overwrite(&mut self, n: NodeKey, value: V, only_if_absent: bool) -> Put<V> {
        if only_if_absent {
            Put::Kept(n, value)
        } else {
            let old = mem::replace(&mut self.nodes[n].value, value);
            Put::Replaced(n, old)
        }
    }

    /// Allocates the first table or doubles the current one, splitting each
    /// bucket into a low half (same index) and a high half
    /// (`index + old capacity`) while preserving relative order.
    fn resize(&mut self) {
        let old_cap = self.table.len();
        let old_thr = self.threshold;
        let (new_cap, new_thr) = if old_cap > 0 {
            if old_cap >= MAXIMUM_CAPACITY {
                self.threshold = usize::MAX;
                log::debug!("capacity saturated at {}", old_cap);
                return;
            }
            let new_cap = old_cap << 1;
            let new_thr = if new_cap < MAXIMUM_CAPACITY && old_cap >= DEFAULT_INITIAL_CAPACITY {
                old_thr.saturating_mul(2)
            } else {
                threshold_for(new_cap, self.load_factor)
            };
            (new_cap, new_thr)
        } else if old_thr > 0 {
            (old_thr, threshold_for(old_thr, self.load_factor))
        } else {
            (
                DEFAULT_INITIAL_CAPACITY,
                threshold_for(DEFAULT_INITIAL_CAPACITY, self.load_factor),
            )
        };
        self.threshold = new_thr;

        let old_table = mem::replace(&mut self.table, vec![Bucket::Empty; new_cap]);
        for (j, bucket) in old_table.into_iter().enumerate() {
            match bucket {
                Bucket::Empty => {}
                Bucket::Chain(first) if self.nodes[first].next.is_none() => {
                    let index = (new_cap - 1) & self.nodes[first].hash as usize;
                    self.table[index] = Bucket::Chain(first);
                }
                Bucket::Chain(first) => {
                    split_chain(&mut self.nodes, &mut self.table, first, j, old_cap);
                }
                Bucket::Tree { first, .. } => {
                    tree::split(&mut self.nodes, &mut self.table, first, j, old_cap);
                }
            }
        }
        log::trace!(
            "resized table {} -> {} buckets, threshold {}",
            old_cap,
            new_cap,
            self.threshold
        );
    }

    /// Converts the chain holding `hash` to a tree, or grows the table
    /// instead while it is smaller than `MIN_TREEIFY_CAPACITY`.
    fn treeify_bin(&mut self, hash: u32) {
        if self.table.len() < MIN_TREEIFY_CAPACITY {
            self.resize();
            return;
        }
        let index = self.index_for(hash);
        let Bucket::Chain(first) = self.table[index] else {
            return;
        };
        let mut len = 0;
        let mut cursor = Some(first);
        while let Some(n) = cursor {
            len += 1;
            cursor = self.nodes[n].next;
        }
        self.table[index] = Bucket::Tree { first, len };
        let root = tree::treeify(&mut self.nodes, first);
        tree::move_root_to_front(&mut self.nodes, &mut self.table, root);
        log::trace!("treeified bucket {} with {} nodes", index, len);
    }

    /// Unlinks the entry for `key` when `matches` accepts its value.
    ///
    /// `movable` is cleared for removals driven by an in-progress traversal:
    /// tree buckets then keep their shape and list order.
    pub(crate) fn remove_node<F>(&mut self, key: &K, matches: F, movable: bool) -> Option<(K, V)>
    where
        F: FnOnce(&V) -> bool,
    {
        if self.table.is_empty() {
            return None;
        }
        let hash = spread(key);
        let index = self.index_for(hash);
        let bucket = self.table[index];
        let target = match bucket {
            Bucket::Empty => return None,
            Bucket::Chain(first) => {
                let mut pred: Option<NodeKey> = None;
                let mut cursor = Some(first);
                let mut found = None;
                while let Some(n) = cursor {
                    let node = &self.nodes[n];
                    if node.hash == hash && node.key.key_eq(key) {
                        found = Some((n, pred));
                        break;
                    }
                    pred = Some(n);
                    cursor = node.next;
                }
                let (n, pred) = found?;
                if !matches(&self.nodes[n].value) {
                    return None;
                }
                let next = self.nodes[n].next;
                match pred {
                    None => {
                        self.table[index] = next.map_or(Bucket::Empty, Bucket::Chain);
                    }
                    Some(p) => self.nodes[p].next = next,
                }
                n
            }
            Bucket::Tree { first, .. } => {
                let root = tree::root(&self.nodes, first);
                let n = tree::find(&self.nodes, root, hash, key)?;
                if !matches(&self.nodes[n].value) {
                    return None;
                }
                tree::remove(&mut self.nodes, &mut self.table, index, n, movable);
                n
            }
        };
        self.mod_count.bump();
        self.nodes.remove(target).map(|node| (node.key, node.value))
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: K) -> Option<(K, V)> {
        self.remove_node(&key, |_| true, true)
    }

    /// Removes the entry only when its value equals `value`.
    pub fn remove_if_eq(&mut self, key: K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.remove_node(&key, |v| v == value, true).is_some()
    }

    /// Replaces the value of an existing entry; never inserts.
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        self.get_mut(key).map(|slot| mem::replace(slot, value))
    }

    /// Replaces the value only when it currently equals `old`.
    pub fn replace_if_eq(&mut self, key: K, old: &V, new: V) -> bool
    where
        V: PartialEq,
    {
        match self.get_mut(key) {
            Some(slot) if *slot == *old => {
                *slot = new;
                true
            }
            _ => false,
        }
    }

    /// Runs `f` on the value for `key` in place.
    pub fn update<R, F>(&mut self, key: K, f: F) -> Option<R>
    where
        F: FnOnce(&mut V) -> R,
    {
        self.get_mut(key).map(f)
    }

    /// Returns the value for `key`, computing and inserting it first when
    /// absent. A `None` from `f` leaves the map unchanged.
    pub fn compute_if_absent<F>(&mut self, key: K, f: F) -> Option<&mut V>
    where
        F: FnOnce(K) -> Option<V>,
    {
        let n = match self.find_node(&key) {
            Some(n) => n,
            None => {
                let value = f(key)?;
                self.put_val(key, value, true).node()
            }
        };
        Some(&mut self.nodes[n].value)
    }

    /// Recomputes the value of a present key; `None` removes the entry.
    pub fn compute_if_present<F>(&mut self, key: K, f: F) -> Option<&mut V>
    where
        F: FnOnce(K, &V) -> Option<V>,
    {
        let n = self.find_node(&key)?;
        self.apply_remapping(key, n, |v| f(key, v))
    }

    /// Computes a new value from the current one (if any). `None` removes an
    /// existing entry or leaves an absent key absent.
    pub fn compute<F>(&mut self, key: K, f: F) -> Option<&mut V>
    where
        F: FnOnce(K, Option<&V>) -> Option<V>,
    {
        match self.find_node(&key) {
            Some(n) => self.apply_remapping(key, n, |v| f(key, Some(v))),
            None => {
                let value = f(key, None)?;
                let n = self.put_val(key, value, false).node();
                Some(&mut self.nodes[n].value)
            }
        }
    }

    /// Inserts `value` when absent, otherwise combines it with the current
    /// value through `f`; `None` from `f` removes the entry.
    pub fn merge<F>(&mut self, key: K, value: V, f: F) -> Option<&mut V>
    where
        F: FnOnce(&V, V) -> Option<V>,
    {
        match self.find_node(&key) {
            Some(n) => self.apply_remapping(key, n, |old| f(old, value)),
            None => {
                let n = self.put_val(key, value, false).node();
                Some(&mut self.nodes[n].value)
            }
        }
    }

    fn apply_remapping<F>(&mut self, key: K, n: NodeKey, f: F) -> Option<&mut V>
    where
        F: FnOnce(&V) -> Option<V>,
    {
        match f(&self.nodes[n].value) {
            Some(v) => {
                let slot = &mut self.nodes[n].value;
                *slot = v;
                Some(slot)
            }
            None => {
                self.remove_node(&key, |_| true, true);
                None
            }
        }
    }

    /// Visits every entry in table order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(K, &V),
    {
        let mut cursor = self.first_node();
        while let Some(n) = cursor {
            let node = &self.nodes[n];
            f(node.key, &node.value);
            cursor = self.successor(n);
        }
    }

    /// Replaces every value with `f(key, value)`, in table order.
    pub fn replace_all<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &V) -> V,
    {
        let mut cursor = self.first_node();
        while let Some(n) = cursor {
            let node = &mut self.nodes[n];
            let value = f(node.key, &node.value);
            node.value = value;
            cursor = self.successor(n);
        }
    }

    /// Keeps only the entries for which `f` returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        let mut cursor = self.first_node();
        while let Some(n) = cursor {
            cursor = self.successor(n);
            let node = &mut self.nodes[n];
            if !f(node.key, &mut node.value) {
                let key = node.key;
                self.remove_node(&key, |_| true, false);
            }
        }
    }

    /// Removes every entry; the table keeps its capacity.
    pub fn clear(&mut self) {
        self.mod_count.bump();
        self.nodes.clear();
        self.table.fill(Bucket::Empty);
    }

    /// Grows ahead of a bulk insert of `additional` entries.
    fn presize(&mut self, additional: usize) {
        if additional == 0 {
            return;
        }
        if self.table.is_empty() {
            let ft = additional as f64 / self.load_factor as f64 + 1.0;
            let t = if ft < MAXIMUM_CAPACITY as f64 {
                ft as usize
            } else {
                MAXIMUM_CAPACITY
            };
            if t > self.threshold {
                self.threshold = table_size_for(t);
            }
        } else {
            while additional > self.threshold && self.table.len() < MAXIMUM_CAPACITY {
                self.resize();
            }
        }
    }

    /// Bucket that `key` maps to, or `None` before the table exists.
    pub fn bucket_index(&self, key: K) -> Option<usize> {
        if self.table.is_empty() {
            None
        } else {
            Some(self.index_for(spread(&key)))
        }
    }

    /// Representation of bucket `index`; out of range reads as `Empty`.
    pub fn bucket_kind(&self, index: usize) -> BucketKind {
        self.table.get(index).map_or(BucketKind::Empty, Bucket::kind)
    }

    /// First entry of bucket `index`.
    pub fn bucket_head(&self, index: usize) -> Option<Handle> {
        self.table.get(index)?.first().map(|n| Handle::new(self.id, n))
    }

    /// First entry in table order.
    pub fn first_entry(&self) -> Option<Handle> {
        self.first_node().map(|n| Handle::new(self.id, n))
    }

    /// Entry following `handle` in table order, crossing bucket boundaries.
    /// `None` at the end or when the handle is stale.
    pub fn next_entry(&self, handle: Handle) -> Option<Handle> {
        let n = self.resolve(handle)?;
        self.successor(n).map(|next| Handle::new(self.id, next))
    }

    pub(crate) fn first_node(&self) -> Option<NodeKey> {
        self.first_from(0)
    }

    fn first_from(&self, index: usize) -> Option<NodeKey> {
        self.table.get(index..)?.iter().find_map(Bucket::first)
    }

    pub(crate) fn successor(&self, n: NodeKey) -> Option<NodeKey> {
        let node = &self.nodes[n];
        node.next
            .or_else(|| self.first_from(self.index_for(node.hash) + 1))
    }

    /// Arena key behind `h`, when `h` was issued by this map and its entry
    /// is still live.
    fn resolve(&self, h: Handle) -> Option<NodeKey> {
        let n = h.raw_handle();
        (h.owner() == self.id && self.nodes.contains_key(n)).then_some(n)
    }

    pub(crate) fn handle_key(&self, h: Handle) -> Option<K> {
        self.resolve(h).map(|n| self.nodes[n].key)
    }

    pub(crate) fn handle_value(&self, h: Handle) -> Option<&V> {
        self.resolve(h).map(|n| &self.nodes[n].value)
    }

    pub(crate) fn handle_value_mut(&mut self, h: Handle) -> Option<&mut V> {
        let n = self.resolve(h)?;
        Some(&mut self.nodes[n].value)
    }

    /// Full structural audit used by tests.
    #[cfg(test)]
    pub(crate) fn check_structure(&self) -> Result<(), String> {
        let cap = self.table.len();
        if cap != 0 && (!cap.is_power_of_two() || cap > MAXIMUM_CAPACITY) {
            return Err(format!("capacity {} is not a valid power of two", cap));
        }
        let mut reachable = 0usize;
        for (index, bucket) in self.table.iter().enumerate() {
            let mut count = 0usize;
            let mut cursor = bucket.first();
            while let Some(n) = cursor {
                let node = self.nodes.get(n).ok_or("dangling node in bucket")?;
                if (cap - 1) & node.hash as usize != index {
                    return Err(format!("node {:?} in wrong bucket {}", node.key, index));
                }
                if matches!(bucket, Bucket::Chain(_))
                    && (node.parent.is_some() || node.left.is_some() || node.right.is_some())
                {
                    return Err(format!("chain node {:?} has tree links", node.key));
                }
                count += 1;
                cursor = node.next;
            }
            match *bucket {
                Bucket::Tree { first, len } => {
                    if len != count {
                        return Err(format!("bucket {} len {} but {} nodes", index, len, count));
                    }
                    if !tree::check_invariants(&self.nodes, tree::root(&self.nodes, first)) {
                        return Err(format!("bucket {} violates red-black invariants", index));
                    }
                }
                Bucket::Chain(_) if count == 0 => {
                    return Err(format!("chain bucket {} is empty", index));
                }
                _ => {}
            }
            reachable += count;
        }
        if reachable != self.nodes.len() {
            return Err(format!(
                "{} reachable entries but len is {}",
                reachable,
                self.nodes.len()
            ));
        }
        Ok(())
    }
}

/// Splits a multi-node chain from old bucket `index` into `index` and
/// `index + bit` of the new table, preserving order.
fn split_chain<K, V>(
    nodes: &mut Arena<K, V>,
    new_table: &mut [Bucket],
    first: NodeKey,
    index: usize,
    bit: usize,
) {
    let (mut lo_head, mut lo_tail): (Option<NodeKey>, Option<NodeKey>) = (None, None);
    let (mut hi_head, mut hi_tail): (Option<NodeKey>, Option<NodeKey>) = (None, None);
    let mut cursor = Some(first);
    while let Some(e) = cursor {
        cursor = nodes[e].next;
        nodes[e].next = None;
        let (head, tail) = if nodes[e].hash as usize & bit == 0 {
            (&mut lo_head, &mut lo_tail)
        } else {
            (&mut hi_head, &mut hi_tail)
        };
        match *tail {
            None => *head = Some(e),
            Some(t) => nodes[t].next = Some(e),
        }
        *tail = Some(e);
    }
    if let Some(lo) = lo_head {
        new_table[index] = Bucket::Chain(lo);
    }
    if let Some(hi) = hi_head {
        new_table[index + bit] = Bucket::Chain(hi);
    }
}

// A clone is a distinct map: handles and cursors of the source do not
// resolve against it.
impl<K: Clone, V: Clone> Clone for PrimitiveHashMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            nodes: self.nodes.clone(),
            threshold: self.threshold,
            load_factor: self.load_factor,
            mod_count: self.mod_count.clone(),
            id: MapId::fresh(),
        }
    }
}

impl<K: PrimitiveKey, V> Default for PrimitiveHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PrimitiveKey, V: fmt::Debug> fmt::Debug for PrimitiveHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PrimitiveKey, V: PartialEq> PartialEq for PrimitiveHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| *v == *ov))
    }
}

impl<K: PrimitiveKey, V: Eq> Eq for PrimitiveHashMap<K, V> {}

impl<K: PrimitiveKey, V> Extend<(K, V)> for PrimitiveHashMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.presize(iter.size_hint().0);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: PrimitiveKey, V> FromIterator<(K, V)> for PrimitiveHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
