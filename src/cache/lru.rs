//! Recency List Module
//!
//! Arena-backed doubly-linked list that keeps entries in access order.
//!
//! Slots live in a `Vec` and link to each other by index, so the index map
//! can hold a plain `NodeId` instead of a pointer. Vacated slots are chained
//! into a free list and reused by later inserts.

/// Link value meaning "no neighbour".
const NIL: usize = usize::MAX;

// == Node Handle ==
/// Stable handle to a slot in a [`RecencyList`].
///
/// A handle stays valid until its entry is removed; after that the slot may
/// be reused for a different entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    /// `None` while the slot sits on the free list
    value: Option<T>,
    prev: usize,
    /// Next node toward the back, or next free slot when vacant
    next: usize,
}

// == Recency List ==
/// Orders values by recency of use.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// All operations are O(1) except iteration.
#[derive(Debug)]
pub struct RecencyList<T> {
    nodes: Vec<Node<T>>,
    head: usize,
    tail: usize,
    free_head: usize,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: NIL,
            tail: NIL,
            free_head: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a value as the most recently used and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let idx = self.alloc(value);
        self.link_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Marks the node as most recently used.
    ///
    /// Stale handles are ignored.
    pub fn move_to_front(&mut self, id: NodeId) {
        if !self.is_live(id.0) || self.head == id.0 {
            return;
        }
        self.unlink(id.0);
        self.link_front(id.0);
    }

    // == Remove ==
    /// Unlinks the node and hands back its value.
    ///
    /// Returns None for a stale handle.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_live(id.0) {
            return None;
        }
        self.unlink(id.0);

        let node = &mut self.nodes[id.0];
        let value = node.value.take();
        node.next = self.free_head;
        self.free_head = id.0;
        self.len -= 1;
        value
    }

    // == Pop Back ==
    /// Removes and returns the least recently used value.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(NodeId(self.tail))
    }

    // == Peek Ends ==
    /// Returns the least recently used value without removing it.
    pub fn back(&self) -> Option<&T> {
        self.value_at(self.tail)
    }

    /// Returns the most recently used value.
    pub fn front(&self) -> Option<&T> {
        self.value_at(self.head)
    }

    // == Access ==
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.value_at(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|node| node.value.as_mut())
    }

    // == Length ==
    /// Returns the number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every value and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free_head = NIL;
        self.len = 0;
    }

    // == Iterate ==
    /// Walks values from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Internal Helpers ==
    fn alloc(&mut self, value: T) -> usize {
        let node = Node {
            value: Some(value),
            prev: NIL,
            next: NIL,
        };
        if self.free_head == NIL {
            self.nodes.push(node);
            self.nodes.len() - 1
        } else {
            let idx = self.free_head;
            self.free_head = self.nodes[idx].next;
            self.nodes[idx] = node;
            idx
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        self.nodes
            .get(idx)
            .map_or(false, |node| node.value.is_some())
    }

    fn value_at(&self, idx: usize) -> Option<&T> {
        self.nodes.get(idx).and_then(|node| node.value.as_ref())
    }

    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }
}

// == Iterator ==
/// Iterator over a [`RecencyList`], front to back.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor)?;
        self.cursor = node.next;
        node.value.as_ref()
    }
}
