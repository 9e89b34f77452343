//! LRU Tracker Module
//!
//! Recency ordering for cache eviction, kept as a doubly linked list whose
//! nodes live in a slab and link to each other by index.

// == Node ==
#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Every key is addressed by the slot index returned from
/// [`LruTracker::push_front`]; slots are recycled through a free list, so
/// touch, remove and evict are all O(1).
#[derive(Debug)]
pub struct LruTracker<K> {
    nodes: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Adds a key as most recently used and returns its slot.
    pub fn push_front(&mut self, key: K) -> usize {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.link_front(slot);
        self.len += 1;
        slot
    }

    // == Touch ==
    /// Marks the key in `slot` as most recently used.
    pub fn touch(&mut self, slot: usize) {
        if self.head == Some(slot) || self.node(slot).is_none() {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    // == Remove ==
    /// Removes the key in `slot`, returning it. Vacant slots yield None.
    pub fn remove(&mut self, slot: usize) -> Option<K> {
        self.node(slot)?;
        self.unlink(slot);
        let node = self.nodes.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.tail.and_then(|slot| self.node(slot)).map(|n| &n.key)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tracker: self,
            cursor: self.head,
        }
    }

    fn node(&self, slot: usize) -> Option<&Node<K>> {
        self.nodes.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<K>> {
        self.nodes.get_mut(slot).and_then(Option::as_mut)
    }

    fn unlink(&mut self, slot: usize) {
        let Some((prev, next)) = self.node(slot).map(|n| (n.prev, n.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(slot) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(slot) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }
}

// == Iterator ==
/// Borrowing iterator over tracked keys, most recent first.
pub struct Iter<'a, K> {
    tracker: &'a LruTracker<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tracker.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
