//! Red-black tree buckets over the node arena.
//!
//! A tree bucket keeps two views of the same nodes: the red-black links
//! (`parent`/`left`/`right`) ordered by `(hash, key)` for search, and the
//! `prev`/`next` list for traversal and for splitting during resize. Every
//! function here keeps both views consistent. The table slot points at the
//! first list node, which `move_root_to_front` keeps equal to the root.

use crate::key::PrimitiveKey;
use crate::node::{Arena, Bucket, Node, NodeKey};
use core::cmp::Ordering;

/// Chain length at which a bucket is converted to a tree.
pub const TREEIFY_THRESHOLD: usize = 8;
/// Live count at or below which a tree bucket reverts to a chain.
pub const UNTREEIFY_THRESHOLD: usize = 6;
/// Smaller tables are grown instead of treeified.
pub const MIN_TREEIFY_CAPACITY: usize = 64;

#[inline]
fn is_red<K, V>(nodes: &Arena<K, V>, x: Option<NodeKey>) -> bool {
    x.map_or(false, |x| nodes[x].red)
}

#[inline]
fn probe_cmp<K: PrimitiveKey, V>(nodes: &Arena<K, V>, hash: u32, key: &K, p: NodeKey) -> Ordering {
    let n = &nodes[p];
    hash.cmp(&n.hash).then_with(|| key.key_cmp(&n.key))
}

#[inline]
fn node_cmp<K: PrimitiveKey, V>(nodes: &Arena<K, V>, a: NodeKey, b: NodeKey) -> Ordering {
    let n = &nodes[a];
    probe_cmp(nodes, n.hash, &n.key, b)
}

pub(crate) fn root<K, V>(nodes: &Arena<K, V>, mut r: NodeKey) -> NodeKey {
    while let Some(p) = nodes[r].parent {
        r = p;
    }
    r
}

pub(crate) fn find<K: PrimitiveKey, V>(
    nodes: &Arena<K, V>,
    root: NodeKey,
    hash: u32,
    key: &K,
) -> Option<NodeKey> {
    let mut p = Some(root);
    while let Some(n) = p {
        p = match probe_cmp(nodes, hash, key, n) {
            Ordering::Less => nodes[n].left,
            Ordering::Greater => nodes[n].right,
            Ordering::Equal => return Some(n),
        };
    }
    None
}

fn rotate_left<K, V>(nodes: &mut Arena<K, V>, mut root: NodeKey, p: NodeKey) -> NodeKey {
    let Some(r) = nodes[p].right else {
        return root;
    };
    let rl = nodes[r].left;
    nodes[p].right = rl;
    if let Some(rl) = rl {
        nodes[rl].parent = Some(p);
    }
    let pp = nodes[p].parent;
    nodes[r].parent = pp;
    match pp {
        None => {
            root = r;
            nodes[r].red = false;
        }
        Some(pp) if nodes[pp].left == Some(p) => nodes[pp].left = Some(r),
        Some(pp) => nodes[pp].right = Some(r),
    }
    nodes[r].left = Some(p);
    nodes[p].parent = Some(r);
    root
}

fn rotate_right<K, V>(nodes: &mut Arena<K, V>, mut root: NodeKey, p: NodeKey) -> NodeKey {
    let Some(l) = nodes[p].left else {
        return root;
    };
    let lr = nodes[l].right;
    nodes[p].left = lr;
    if let Some(lr) = lr {
        nodes[lr].parent = Some(p);
    }
    let pp = nodes[p].parent;
    nodes[l].parent = pp;
    match pp {
        None => {
            root = l;
            nodes[l].red = false;
        }
        Some(pp) if nodes[pp].right == Some(p) => nodes[pp].right = Some(l),
        Some(pp) => nodes[pp].left = Some(l),
    }
    nodes[l].right = Some(p);
    nodes[p].parent = Some(l);
    root
}

/// Insertion fixup for a freshly linked `x`; returns the new root.
fn balance_insertion<K, V>(nodes: &mut Arena<K, V>, mut root: NodeKey, mut x: NodeKey) -> NodeKey {
    nodes[x].red = true;
    loop {
        let Some(xp) = nodes[x].parent else {
            nodes[x].red = false;
            return x;
        };
        if !nodes[xp].red {
            return root;
        }
        let Some(xpp) = nodes[xp].parent else {
            return root;
        };
        if nodes[xpp].left == Some(xp) {
            let uncle = nodes[xpp].right.filter(|&u| nodes[u].red);
            if let Some(u) = uncle {
                nodes[u].red = false;
                nodes[xp].red = false;
                nodes[xpp].red = true;
                x = xpp;
                continue;
            }
            let mut xp_o = Some(xp);
            let mut xpp_o = Some(xpp);
            if nodes[xp].right == Some(x) {
                x = xp;
                root = rotate_left(nodes, root, x);
                xp_o = nodes[x].parent;
                xpp_o = xp_o.and_then(|p| nodes[p].parent);
            }
            if let Some(xp) = xp_o {
                nodes[xp].red = false;
                if let Some(xpp) = xpp_o {
                    nodes[xpp].red = true;
                    root = rotate_right(nodes, root, xpp);
                }
            }
        } else {
            let uncle = nodes[xpp].left.filter(|&u| nodes[u].red);
            if let Some(u) = uncle {
                nodes[u].red = false;
                nodes[xp].red = false;
                nodes[xpp].red = true;
                x = xpp;
                continue;
            }
            let mut xp_o = Some(xp);
            let mut xpp_o = Some(xpp);
            if nodes[xp].left == Some(x) {
                x = xp;
                root = rotate_right(nodes, root, x);
                xp_o = nodes[x].parent;
                xpp_o = xp_o.and_then(|p| nodes[p].parent);
            }
            if let Some(xp) = xp_o {
                nodes[xp].red = false;
                if let Some(xpp) = xpp_o {
                    nodes[xpp].red = true;
                    root = rotate_left(nodes, root, xpp);
                }
            }
        }
    }
}

/// Deletion fixup walking up from the structural replacement `x`.
fn balance_deletion<K, V>(nodes: &mut Arena<K, V>, mut root: NodeKey, x: NodeKey) -> NodeKey {
    let mut x = Some(x);
    loop {
        let Some(xk) = x else {
            return root;
        };
        if xk == root {
            return root;
        }
        let Some(xp) = nodes[xk].parent else {
            nodes[xk].red = false;
            return xk;
        };
        if nodes[xk].red {
            nodes[xk].red = false;
            return root;
        }
        let mut xp_o = Some(xp);
        if nodes[xp].left == Some(xk) {
            let mut sib = nodes[xp].right;
            if let Some(s) = sib.filter(|&s| nodes[s].red) {
                nodes[s].red = false;
                nodes[xp].red = true;
                root = rotate_left(nodes, root, xp);
                xp_o = nodes[xk].parent;
                sib = xp_o.and_then(|p| nodes[p].right);
            }
            let Some(s) = sib else {
                x = xp_o;
                continue;
            };
            let (sl, sr) = (nodes[s].left, nodes[s].right);
            if !is_red(nodes, sr) && !is_red(nodes, sl) {
                nodes[s].red = true;
                x = xp_o;
                continue;
            }
            let mut sib = Some(s);
            if !is_red(nodes, sr) {
                if let Some(sl) = sl {
                    nodes[sl].red = false;
                }
                nodes[s].red = true;
                root = rotate_right(nodes, root, s);
                xp_o = nodes[xk].parent;
                sib = xp_o.and_then(|p| nodes[p].right);
            }
            if let Some(s) = sib {
                let parent_red = is_red(nodes, xp_o);
                nodes[s].red = parent_red;
                if let Some(sr) = nodes[s].right {
                    nodes[sr].red = false;
                }
            }
            if let Some(xp) = xp_o {
                nodes[xp].red = false;
                root = rotate_left(nodes, root, xp);
            }
            x = Some(root);
        } else {
            let mut sib = nodes[xp].left;
            if let Some(s) = sib.filter(|&s| nodes[s].red) {
                nodes[s].red = false;
                nodes[xp].red = true;
                root = rotate_right(nodes, root, xp);
                xp_o = nodes[xk].parent;
                sib = xp_o.and_then(|p| nodes[p].left);
            }
            let Some(s) = sib else {
                x = xp_o;
                continue;
            };
            let (sl, sr) = (nodes[s].left, nodes[s].right);
            if !is_red(nodes, sl) && !is_red(nodes, sr) {
                nodes[s].red = true;
                x = xp_o;
                continue;
            }
            let mut sib = Some(s);
            if !is_red(nodes, sl) {
                if let Some(sr) = sr {
                    nodes[sr].red = false;
                }
                nodes[s].red = true;
                root = rotate_left(nodes, root, s);
                xp_o = nodes[xk].parent;
                sib = xp_o.and_then(|p| nodes[p].left);
            }
            if let Some(s) = sib {
                let parent_red = is_red(nodes, xp_o);
                nodes[s].red = parent_red;
                if let Some(sl) = nodes[s].left {
                    nodes[sl].red = false;
                }
            }
            if let Some(xp) = xp_o {
                nodes[xp].red = false;
                root = rotate_right(nodes, root, xp);
            }
            x = Some(root);
        }
    }
}

/// Makes `root` the first list node of its tree bucket.
pub(crate) fn move_root_to_front<K: PrimitiveKey, V>(
    nodes: &mut Arena<K, V>,
    table: &mut [Bucket],
    root: NodeKey,
) {
    if table.is_empty() {
        return;
    }
    let index = (table.len() - 1) & nodes[root].hash as usize;
    let Bucket::Tree { first, len } = table[index] else {
        return;
    };
    if root != first {
        table[index] = Bucket::Tree { first: root, len };
        let rp = nodes[root].prev;
        let rn = nodes[root].next;
        if let Some(rn) = rn {
            nodes[rn].prev = rp;
        }
        if let Some(rp) = rp {
            nodes[rp].next = rn;
        }
        nodes[first].prev = Some(root);
        nodes[root].next = Some(first);
        nodes[root].prev = None;
    }
    debug_assert!(check_invariants(nodes, root), "red-black invariants violated");
}

/// Builds a tree from the list starting at `first`, filling in `prev` links
/// along the way. Returns the root; the list order is left untouched.
pub(crate) fn treeify<K: PrimitiveKey, V>(nodes: &mut Arena<K, V>, first: NodeKey) -> NodeKey {
    let mut root: Option<NodeKey> = None;
    let mut prev: Option<NodeKey> = None;
    let mut cursor = Some(first);
    while let Some(x) = cursor {
        cursor = nodes[x].next;
        {
            let n = &mut nodes[x];
            n.prev = prev;
            n.left = None;
            n.right = None;
        }
        prev = Some(x);
        let Some(r) = root else {
            nodes[x].parent = None;
            nodes[x].red = false;
            root = Some(x);
            continue;
        };
        let (hash, key) = (nodes[x].hash, nodes[x].key);
        let mut p = r;
        loop {
            let dir = probe_cmp(nodes, hash, &key, p);
            let child = if dir != Ordering::Greater {
                nodes[p].left
            } else {
                nodes[p].right
            };
            match child {
                Some(c) => p = c,
                None => {
                    nodes[x].parent = Some(p);
                    if dir != Ordering::Greater {
                        nodes[p].left = Some(x);
                    } else {
                        nodes[p].right = Some(x);
                    }
                    root = Some(balance_insertion(nodes, r, x));
                    break;
                }
            }
        }
    }
    root.unwrap_or(first)
}

/// Drops the tree links of every node in the list starting at `first`.
pub(crate) fn untreeify<K, V>(nodes: &mut Arena<K, V>, first: NodeKey) {
    let mut cursor = Some(first);
    while let Some(x) = cursor {
        let n = &mut nodes[x];
        n.clear_tree_links();
        cursor = n.next;
    }
}

/// Links a new node for a key known to be absent from the tree bucket at
/// `index`. The node is placed in the list right after its tree parent.
#[allow(clippy::too_many_arguments)]
pub(crate) fn insert<K: PrimitiveKey, V>(
    nodes: &mut Arena<K, V>,
    table: &mut [Bucket],
    index: usize,
    first: NodeKey,
    len: usize,
    hash: u32,
    key: K,
    value: V,
) -> NodeKey {
    let root = root(nodes, first);
    let mut p = root;
    loop {
        let dir = probe_cmp(nodes, hash, &key, p);
        debug_assert_ne!(dir, Ordering::Equal, "key already present in tree bucket");
        let child = if dir != Ordering::Greater {
            nodes[p].left
        } else {
            nodes[p].right
        };
        if let Some(c) = child {
            p = c;
            continue;
        }
        let xpn = nodes[p].next;
        let x = nodes.insert(Node::new(hash, key, value, xpn));
        if dir != Ordering::Greater {
            nodes[p].left = Some(x);
        } else {
            nodes[p].right = Some(x);
        }
        nodes[p].next = Some(x);
        nodes[x].parent = Some(p);
        nodes[x].prev = Some(p);
        if let Some(n) = xpn {
            nodes[n].prev = Some(x);
        }
        table[index] = Bucket::Tree {
            first,
            len: len + 1,
        };
        let root = balance_insertion(nodes, root, x);
        move_root_to_front(nodes, table, root);
        return x;
    }
}

/// Unlinks `p` from the tree bucket at `index`, from both the list and the
/// tree. The node stays in the arena for the caller to take.
///
/// With `movable` unset the root is not moved and the bucket is never
/// converted back to a chain, so list order seen by an in-progress
/// traversal is preserved.
pub(crate) fn remove<K: PrimitiveKey, V>(
    nodes: &mut Arena<K, V>,
    table: &mut [Bucket],
    index: usize,
    p: NodeKey,
    movable: bool,
) {
    let Bucket::Tree { first, len } = table[index] else {
        return;
    };
    let succ = nodes[p].next;
    let pred = nodes[p].prev;
    let first = match pred {
        None => succ,
        Some(pd) => {
            nodes[pd].next = succ;
            Some(first)
        }
    };
    if let Some(s) = succ {
        nodes[s].prev = pred;
    }
    let Some(first) = first else {
        table[index] = Bucket::Empty;
        return;
    };
    let len = len.saturating_sub(1);
    table[index] = Bucket::Tree { first, len };
    if movable && len <= UNTREEIFY_THRESHOLD {
        untreeify(nodes, first);
        table[index] = Bucket::Chain(first);
        log::trace!("untreeified bucket {} at {} nodes", index, len);
        return;
    }

    let mut root = root(nodes, first);
    let (pl, pr) = (nodes[p].left, nodes[p].right);
    let replacement = match (pl, pr) {
        (Some(pl), Some(pr)) => {
            // Swap tree positions (not payloads) with the in-order successor.
            let mut s = pr;
            while let Some(sl) = nodes[s].left {
                s = sl;
            }
            let s_red = nodes[s].red;
            nodes[s].red = nodes[p].red;
            nodes[p].red = s_red;
            let sr = nodes[s].right;
            let pp = nodes[p].parent;
            if s == pr {
                nodes[p].parent = Some(s);
                nodes[s].right = Some(p);
            } else {
                let sp = nodes[s].parent;
                nodes[p].parent = sp;
                if let Some(sp) = sp {
                    if nodes[sp].left == Some(s) {
                        nodes[sp].left = Some(p);
                    } else {
                        nodes[sp].right = Some(p);
                    }
                }
                nodes[s].right = Some(pr);
                nodes[pr].parent = Some(s);
            }
            nodes[p].left = None;
            nodes[p].right = sr;
            if let Some(sr) = sr {
                nodes[sr].parent = Some(p);
            }
            nodes[s].left = Some(pl);
            nodes[pl].parent = Some(s);
            nodes[s].parent = pp;
            match pp {
                None => root = s,
                Some(pp) if nodes[pp].left == Some(p) => nodes[pp].left = Some(s),
                Some(pp) => nodes[pp].right = Some(s),
            }
            sr.unwrap_or(p)
        }
        (Some(pl), None) => pl,
        (None, Some(pr)) => pr,
        (None, None) => p,
    };
    if replacement != p {
        let pp = nodes[p].parent;
        nodes[replacement].parent = pp;
        match pp {
            None => {
                root = replacement;
                nodes[replacement].red = false;
            }
            Some(pp) if nodes[pp].left == Some(p) => nodes[pp].left = Some(replacement),
            Some(pp) => nodes[pp].right = Some(replacement),
        }
        let n = &mut nodes[p];
        n.left = None;
        n.right = None;
        n.parent = None;
    }

    let r = if nodes[p].red {
        root
    } else {
        balance_deletion(nodes, root, replacement)
    };

    if replacement == p {
        if let Some(pp) = nodes[p].parent.take() {
            if nodes[pp].left == Some(p) {
                nodes[pp].left = None;
            } else if nodes[pp].right == Some(p) {
                nodes[pp].right = None;
            }
        }
    }
    if movable {
        move_root_to_front(nodes, table, r);
    }
}

/// Splits the tree bucket `first` from an old table into `index` and
/// `index + bit` of `new_table`, untreeifying halves that end up small.
pub(crate) fn split<K: PrimitiveKey, V>(
    nodes: &mut Arena<K, V>,
    new_table: &mut [Bucket],
    first: NodeKey,
    index: usize,
    bit: usize,
) {
    let (mut lo_head, mut lo_tail) = (None, None);
    let (mut hi_head, mut hi_tail) = (None, None);
    let (mut lc, mut hc) = (0usize, 0usize);
    let mut cursor = Some(first);
    while let Some(e) = cursor {
        cursor = nodes[e].next;
        nodes[e].next = None;
        if nodes[e].hash as usize & bit == 0 {
            nodes[e].prev = lo_tail;
            match lo_tail {
                None => lo_head = Some(e),
                Some(t) => nodes[t].next = Some(e),
            }
            lo_tail = Some(e);
            lc += 1;
        } else {
            nodes[e].prev = hi_tail;
            match hi_tail {
                None => hi_head = Some(e),
                Some(t) => nodes[t].next = Some(e),
            }
            hi_tail = Some(e);
            hc += 1;
        }
    }
    log::trace!(
        "split tree bucket {} into {} low and {} high nodes",
        index,
        lc,
        hc
    );
    place_split_half(nodes, new_table, lo_head, lc, index, hi_head.is_some());
    place_split_half(nodes, new_table, hi_head, hc, index + bit, lo_head.is_some());
}

fn place_split_half<K: PrimitiveKey, V>(
    nodes: &mut Arena<K, V>,
    new_table: &mut [Bucket],
    head: Option<NodeKey>,
    count: usize,
    index: usize,
    other_half_present: bool,
) {
    let Some(head) = head else {
        return;
    };
    if count <= UNTREEIFY_THRESHOLD {
        untreeify(nodes, head);
        new_table[index] = Bucket::Chain(head);
    } else {
        new_table[index] = Bucket::Tree { first: head, len: count };
        // An unsplit bucket keeps its existing, still valid tree.
        if other_half_present {
            let root = treeify(nodes, head);
            move_root_to_front(nodes, new_table, root);
        }
    }
}

/// Full structural check of the tree rooted at `root`: black root, no
/// red-red edges, equal black height, `(hash, key)` search order, and
/// consistent parent and list links.
pub(crate) fn check_invariants<K: PrimitiveKey, V>(nodes: &Arena<K, V>, root: NodeKey) -> bool {
    if nodes[root].parent.is_some() || nodes[root].red {
        return false;
    }
    check_subtree(nodes, root, None, None).is_some()
}

fn check_subtree<K: PrimitiveKey, V>(
    nodes: &Arena<K, V>,
    t: NodeKey,
    lower: Option<NodeKey>,
    upper: Option<NodeKey>,
) -> Option<usize> {
    let n = nodes.get(t)?;
    if let Some(b) = n.prev {
        if nodes.get(b)?.next != Some(t) {
            return None;
        }
    }
    if let Some(nx) = n.next {
        if nodes.get(nx)?.prev != Some(t) {
            return None;
        }
    }
    if let Some(lo) = lower {
        if node_cmp(nodes, t, lo) != Ordering::Greater {
            return None;
        }
    }
    if let Some(hi) = upper {
        if node_cmp(nodes, t, hi) != Ordering::Less {
            return None;
        }
    }
    let mut heights = [0usize; 2];
    for (slot, child) in [n.left, n.right].into_iter().enumerate() {
        heights[slot] = match child {
            None => 1,
            Some(c) => {
                let cn = nodes.get(c)?;
                if cn.parent != Some(t) || (n.red && cn.red) {
                    return None;
                }
                let (lo, hi) = if slot == 0 {
                    (lower, Some(t))
                } else {
                    (Some(t), upper)
                };
                check_subtree(nodes, c, lo, hi)?
            }
        };
    }
    if heights[0] != heights[1] {
        return None;
    }
    Some(heights[0] + usize::from(!n.red))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn chain(nodes: &mut Arena<i32, i32>, keys: &[i32], hash: u32) -> NodeKey {
        let mut next = None;
        for &k in keys.iter().rev() {
            next = Some(nodes.insert(Node::new(hash, k, k * 10, next)));
        }
        next.expect("non-empty chain")
    }

    fn list_keys(nodes: &Arena<i32, i32>, first: NodeKey) -> Vec<i32> {
        let mut out = Vec::new();
        let mut cursor = Some(first);
        while let Some(x) = cursor {
            out.push(nodes[x].key);
            cursor = nodes[x].next;
        }
        out
    }

    /// Invariant: treeify keeps list order and yields a valid red-black tree.
    #[test]
    fn treeify_preserves_list_order() {
        let mut nodes: Arena<i32, i32> = SlotMap::with_key();
        let keys: Vec<i32> = (0..12).rev().collect();
        let first = chain(&mut nodes, &keys, 0);
        let root = treeify(&mut nodes, first);
        assert!(check_invariants(&nodes, root));
        assert_eq!(list_keys(&nodes, first), keys);
        for k in &keys {
            let hit = find(&nodes, root, 0, k).expect("key in tree");
            assert_eq!(nodes[hit].value, k * 10);
        }
        assert!(find(&nodes, root, 0, &100).is_none());
        assert!(find(&nodes, root, 1, &3).is_none());
    }

    /// Invariant: the table slot ends up pointing at the root, and every node
    /// stays reachable through `next`.
    #[test]
    fn move_root_to_front_relinks_list() {
        let mut nodes: Arena<i32, i32> = SlotMap::with_key();
        let first = chain(&mut nodes, &[0, 1, 2, 3, 4, 5, 6, 7, 8], 0);
        let root = treeify(&mut nodes, first);
        assert_ne!(root, first);
        let mut table = vec![Bucket::Tree { first, len: 9 }];
        move_root_to_front(&mut nodes, &mut table, root);
        assert_eq!(table[0], Bucket::Tree { first: root, len: 9 });
        let mut seen = list_keys(&nodes, root);
        seen.sort();
        assert_eq!(seen, (0..9).collect::<Vec<_>>());
        assert!(nodes[root].prev.is_none());
    }

    /// Invariant: removals keep the tree valid until the count reaches the
    /// untreeify threshold, at which point the bucket becomes a chain.
    #[test]
    fn remove_rebalances_then_untreeifies() {
        let mut nodes: Arena<i32, i32> = SlotMap::with_key();
        let keys: Vec<i32> = (0..16).collect();
        let first = chain(&mut nodes, &keys, 0);
        let root = treeify(&mut nodes, first);
        let mut table = vec![Bucket::Tree { first, len: 16 }];
        move_root_to_front(&mut nodes, &mut table, root);

        for k in [7, 0, 15, 3, 11, 8, 1, 12, 5, 9] {
            let first = table[0].first().expect("bucket not empty");
            let r = super::root(&nodes, first);
            let p = find(&nodes, r, 0, &k).expect("present");
            remove(&mut nodes, &mut table, 0, p, true);
            nodes.remove(p);
            match table[0] {
                Bucket::Tree { first, len } => {
                    assert!(len > UNTREEIFY_THRESHOLD);
                    assert!(check_invariants(&nodes, first), "root must be first");
                }
                Bucket::Chain(first) => {
                    let left = list_keys(&nodes, first);
                    assert!(left.len() <= UNTREEIFY_THRESHOLD);
                    for x in left {
                        let n = find_in_list(&nodes, first, x);
                        assert!(nodes[n].parent.is_none() && nodes[n].left.is_none());
                    }
                }
                Bucket::Empty => panic!("bucket unexpectedly empty"),
            }
        }
        assert!(matches!(table[0], Bucket::Chain(_)));
    }

    fn find_in_list(nodes: &Arena<i32, i32>, first: NodeKey, key: i32) -> NodeKey {
        let mut cursor = Some(first);
        while let Some(x) = cursor {
            if nodes[x].key == key {
                return x;
            }
            cursor = nodes[x].next;
        }
        panic!("key {} not in list", key)
    }

    /// Invariant: non-movable removal never converts the bucket and keeps
    /// the remaining list order intact.
    #[test]
    fn non_movable_remove_keeps_tree_and_order() {
        let mut nodes: Arena<i32, i32> = SlotMap::with_key();
        let keys: Vec<i32> = (0..10).collect();
        let first = chain(&mut nodes, &keys, 0);
        let root = treeify(&mut nodes, first);
        let mut table = vec![Bucket::Tree { first, len: 10 }];
        move_root_to_front(&mut nodes, &mut table, root);
        let before = list_keys(&nodes, table[0].first().unwrap());

        for k in [before[0], before[4], before[5], before[9]] {
            let first = table[0].first().unwrap();
            let p = find(&nodes, super::root(&nodes, first), 0, &k).unwrap();
            remove(&mut nodes, &mut table, 0, p, false);
            nodes.remove(p);
        }
        let Bucket::Tree { first, len } = table[0] else {
            panic!("bucket must stay a tree");
        };
        assert_eq!(len, 6);
        let expected: Vec<i32> = before
            .iter()
            .copied()
            .filter(|k| ![before[0], before[4], before[5], before[9]].contains(k))
            .collect();
        assert_eq!(list_keys(&nodes, first), expected);
        assert!(check_invariants(&nodes, super::root(&nodes, first)));
    }

    /// Invariant: split distributes by the new hash bit, preserves relative
    /// order, and untreeifies small halves.
    #[test]
    fn split_distributes_by_bit() {
        let mut nodes: Arena<i32, i32> = SlotMap::with_key();
        let mut next = None;
        // hashes alternate between bucket 0 and bucket 64 of a 128 table.
        for k in (0..20).rev() {
            let hash = if k % 4 == 0 { 64 } else { 0 };
            next = Some(nodes.insert(Node::new(hash, k, k, next)));
        }
        let first = next.unwrap();
        let root = treeify(&mut nodes, first);
        let mut old = vec![Bucket::Empty; 64];
        old[0] = Bucket::Tree { first, len: 20 };
        move_root_to_front(&mut nodes, &mut old, root);
        let order = list_keys(&nodes, old[0].first().unwrap());

        let mut new_table = vec![Bucket::Empty; 128];
        split(&mut nodes, &mut new_table, old[0].first().unwrap(), 0, 64);

        let Bucket::Tree { first: lo, len: lo_len } = new_table[0] else {
            panic!("low half must stay a tree");
        };
        assert_eq!(lo_len, 15);
        assert!(check_invariants(&nodes, lo));
        let lo_keys: Vec<i32> = order.iter().copied().filter(|k| k % 4 != 0).collect();
        let mut got = list_keys(&nodes, lo);
        let mut want = lo_keys.clone();
        got.sort();
        want.sort();
        assert_eq!(got, want);

        let Bucket::Chain(hi) = new_table[64] else {
            panic!("high half has five nodes and must be a chain");
        };
        let hi_keys: Vec<i32> = order.iter().copied().filter(|k| k % 4 == 0).collect();
        assert_eq!(list_keys(&nodes, hi), hi_keys);
    }
}
