//! Order-statistics skip list
//!
//! Arena-backed: nodes live in a slab, links are slot indices, and freed
//! slots are recycled. Every forward link carries a span (level-0 hops to
//! its target), which is what makes rank recomputation O(log n).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::order::RankOrder;

/// Highest tower a node can reach.
const MAX_LEVEL: usize = 32;

/// Chance of promoting a node one more level: 1 in 4.
const PROMOTE_NUM: u32 = 1;
const PROMOTE_DEN: u32 = 4;

/// Fixed seed for level generation. The structure is reproducible across
/// runs for identical operation sequences.
const LEVEL_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Arena slot meaning "no node".
const NIL: usize = usize::MAX;

/// Opaque handle to a live node in one `RankList`.
///
/// Valid only for the list that issued it, and only until the node it names
/// is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy)]
struct Link {
    to: usize,
    /// Level-0 hops from the owning node to `to`.
    span: usize,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    /// Level-0 predecessor; NIL when first in order.
    prev: usize,
    links: Vec<Link>,
}

/// Rank-ordered container with O(log n) rank lookup and O(1) neighbor
/// navigation from a handle.
#[derive(Debug)]
pub struct RankList<T: RankOrder> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    /// Forward links out of the virtual head, one per active level.
    head: Vec<Link>,
    len: usize,
    rng: StdRng,
}

impl<T: RankOrder> RankList<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: Vec::new(),
            len: 0,
            rng: StdRng::seed_from_u64(LEVEL_SEED),
        }
    }

    /// Current element count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value`, or replace the live value it compares `order_eq` to.
    ///
    /// Returns the 0-based rank the value landed at and its handle. On
    /// replacement the existing node keeps its handle and its rank.
    pub fn insert_or_update(&mut self, value: T) -> (usize, NodeId) {
        let mut update = [NIL; MAX_LEVEL];
        let mut rank = [0usize; MAX_LEVEL];

        let mut x = NIL;
        let mut acc = 0usize;
        for level in (0..self.head.len()).rev() {
            loop {
                let link = self.fwd(x, level);
                if link.to == NIL || !self.node(link.to).value.precedes(&value) {
                    break;
                }
                acc += link.span;
                x = link.to;
            }
            update[level] = x;
            rank[level] = acc;
        }

        // Replace in place when an order-equal node is already live.
        let candidate = if self.head.is_empty() {
            NIL
        } else {
            self.fwd(x, 0).to
        };
        if candidate != NIL && self.node(candidate).value.order_eq(&value) {
            self.node_mut(candidate).value = value;
            return (acc, NodeId(candidate));
        }

        let levels = self.random_level();
        for _ in self.head.len()..levels {
            // Fresh levels start as a single head link spanning the whole
            // pre-insert list; update/rank stay NIL/0 for them.
            self.head.push(Link {
                to: NIL,
                span: self.len,
            });
        }

        let new_rank = acc;
        let mut links = Vec::with_capacity(levels);
        for level in 0..levels {
            let up = self.fwd(update[level], level);
            links.push(Link {
                to: up.to,
                span: up.span - (new_rank - rank[level]),
            });
        }
        let id = self.alloc(Node {
            value,
            prev: update[0],
            links,
        });
        for level in 0..levels {
            let link = self.fwd_mut(update[level], level);
            link.to = id;
            link.span = new_rank - rank[level] + 1;
        }
        for level in levels..self.head.len() {
            self.fwd_mut(update[level], level).span += 1;
        }

        let next = self.node(id).links[0].to;
        if next != NIL {
            self.node_mut(next).prev = id;
        }
        self.len += 1;
        (new_rank, NodeId(id))
    }

    /// Remove the live value that compares `order_eq` to `value`.
    ///
    /// Returns the removed value, or `None` when nothing matches. The
    /// removed node's handle becomes invalid.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        if self.head.is_empty() {
            return None;
        }
        let mut update = [NIL; MAX_LEVEL];
        let mut x = NIL;
        for level in (0..self.head.len()).rev() {
            loop {
                let link = self.fwd(x, level);
                if link.to == NIL || !self.node(link.to).value.precedes(value) {
                    break;
                }
                x = link.to;
            }
            update[level] = x;
        }

        let target = self.fwd(x, 0).to;
        if target == NIL || !self.node(target).value.order_eq(value) {
            return None;
        }

        for level in 0..self.head.len() {
            if self.fwd(update[level], level).to == target {
                let unlinked = self.node(target).links[level];
                let link = self.fwd_mut(update[level], level);
                link.to = unlinked.to;
                link.span += unlinked.span - 1;
            } else {
                self.fwd_mut(update[level], level).span -= 1;
            }
        }

        let next = self.node(target).links[0].to;
        let prev = self.node(target).prev;
        if next != NIL {
            self.node_mut(next).prev = prev;
        }
        while self.head.last().is_some_and(|link| link.to == NIL) {
            self.head.pop();
        }
        self.len -= 1;
        self.free.push(target);
        self.nodes[target].take().map(|node| node.value)
    }

    /// Recompute the 0-based rank of a handle's node.
    ///
    /// O(log n) span walk, plus a bounded level-0 scan across any run of
    /// order-equal nodes. Returns `None` for a handle this list does not
    /// currently hold.
    pub fn rank_of(&self, id: NodeId) -> Option<usize> {
        let value = &self.nodes.get(id.0)?.as_ref()?.value;
        let mut x = NIL;
        let mut acc = 0usize;
        for level in (0..self.head.len()).rev() {
            loop {
                let link = self.fwd(x, level);
                if link.to == NIL || !self.node(link.to).value.precedes(value) {
                    break;
                }
                acc += link.span;
                x = link.to;
            }
        }
        let mut candidate = if self.head.is_empty() {
            NIL
        } else {
            self.fwd(x, 0).to
        };
        while candidate != NIL {
            if candidate == id.0 {
                return Some(acc);
            }
            if !self.node(candidate).value.order_eq(value) {
                return None;
            }
            acc += 1;
            candidate = self.node(candidate).links[0].to;
        }
        None
    }

    /// Value held by a handle's node.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0)?.as_ref().map(|node| &node.value)
    }

    /// Handle of the node ranked immediately before `id`, if any.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id.0)?.as_ref()?;
        (node.prev != NIL).then_some(NodeId(node.prev))
    }

    /// Handle of the node ranked immediately after `id`, if any.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id.0)?.as_ref()?;
        let next = node.links[0].to;
        (next != NIL).then_some(NodeId(next))
    }

    /// Values in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        RankIter {
            list: self,
            cursor: self.head.first().map_or(NIL, |link| link.to),
        }
    }

    fn node(&self, id: usize) -> &Node<T> {
        self.nodes[id].as_ref().expect("live node")
    }

    fn node_mut(&mut self, id: usize) -> &mut Node<T> {
        self.nodes[id].as_mut().expect("live node")
    }

    fn fwd(&self, from: usize, level: usize) -> Link {
        if from == NIL {
            self.head[level]
        } else {
            self.node(from).links[level]
        }
    }

    fn fwd_mut(&mut self, from: usize, level: usize) -> &mut Link {
        if from == NIL {
            &mut self.head[level]
        } else {
            &mut self.node_mut(from).links[level]
        }
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < MAX_LEVEL && self.rng.gen_ratio(PROMOTE_NUM, PROMOTE_DEN) {
            level += 1;
        }
        level
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }
}

impl<T: RankOrder> Default for RankList<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct RankIter<'a, T: RankOrder> {
    list: &'a RankList<T>,
    cursor: usize,
}

impl<'a, T: RankOrder> Iterator for RankIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = self.list.node(self.cursor);
        self.cursor = node.links[0].to;
        Some(&node.value)
    }
}
