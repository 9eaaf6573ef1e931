//! LRU Store Module
//!
//! Byte-bounded least-recently-used store with O(1) get, add and eviction.
//!
//! Entries live in an arena of nodes linked by index into a doubly-linked
//! recency list (head = most recent, tail = least recent). A `HashMap` maps
//! each key to its arena slot. Freed slots are recycled through a free list.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

/// Null link in the recency list.
const NIL: usize = usize::MAX;

// == Value Trait ==
/// A value that reports how many bytes it occupies in the store.
pub trait Value {
    /// Size of the value in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Value for String {
    fn len(&self) -> usize {
        String::len(self)
    }
}

impl Value for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Callback invoked with every entry removed by [`LruStore::delete_oldest`].
pub type OnEvicted<V> = Box<dyn FnMut(&str, &V) + Send>;

// == Node ==
struct Node<V> {
    key: String,
    /// `None` only while the slot sits on the free list.
    value: Option<V>,
    prev: usize,
    next: usize,
}

// == LRU Store ==
/// Least-recently-used store bounded by the total byte size of its entries.
///
/// An entry accounts for `key.len() + value.len()` bytes. A capacity of `0`
/// means the store is unbounded. Not safe for concurrent access on its own;
/// see [`GuardedCache`](crate::cache::GuardedCache).
pub struct LruStore<V> {
    /// Maximum bytes held, 0 = unbounded
    capacity_bytes: usize,
    /// Sum of key and value sizes over live entries
    used_bytes: usize,
    /// Key -> arena slot
    index: HashMap<String, usize>,
    /// Arena of list nodes
    nodes: Vec<Node<V>>,
    head: usize,
    tail: usize,
    /// Recycled arena slots
    free: Vec<usize>,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V> fmt::Debug for LruStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruStore")
            .field("capacity_bytes", &self.capacity_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.index.len())
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}

impl<V: Value> LruStore<V> {
    // == Constructors ==
    /// Creates an empty store holding at most `capacity_bytes` (0 = unbounded).
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            used_bytes: 0,
            index: HashMap::new(),
            nodes: Vec::new(),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
            on_evicted: None,
        }
    }

    /// Creates an empty store that calls `on_evicted` for every evicted entry.
    ///
    /// The callback runs synchronously while the store is being mutated and
    /// must not call back into whatever owns the store.
    pub fn with_on_evicted<F>(capacity_bytes: usize, on_evicted: F) -> Self
    where
        F: FnMut(&str, &V) + Send + 'static,
    {
        let mut store = Self::new(capacity_bytes);
        store.on_evicted = Some(Box::new(on_evicted));
        store
    }

    // == Get ==
    /// Looks up `key`, promoting it to most recently used on a hit.
    ///
    /// A miss leaves the store untouched.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].value.as_ref()
    }

    // == Add ==
    /// Inserts or replaces `key`, promotes it, then evicts from the tail
    /// until the store fits its capacity again.
    ///
    /// An entry added to an empty store is kept even when it alone exceeds
    /// the capacity.
    pub fn add(&mut self, key: &str, value: V) {
        let was_empty = self.is_empty();

        if let Some(&idx) = self.index.get(key) {
            self.move_to_front(idx);
            let node = &mut self.nodes[idx];
            let old_len = node.value.as_ref().map_or(0, Value::len);
            self.used_bytes = self.used_bytes - old_len + value.len();
            node.value = Some(value);
        } else {
            self.used_bytes += key.len() + value.len();
            let idx = self.alloc(key.to_string(), value);
            self.index.insert(key.to_string(), idx);
            self.push_front(idx);
        }

        while self.capacity_bytes != 0 && self.used_bytes > self.capacity_bytes {
            if was_empty && self.len() == 1 {
                break;
            }
            if self.delete_oldest().is_none() {
                break;
            }
        }
    }

    // == Delete Oldest ==
    /// Removes the least recently used entry and hands it to the eviction
    /// callback. Returns `None` when the store is empty.
    pub fn delete_oldest(&mut self) -> Option<(String, V)> {
        if self.tail == NIL {
            return None;
        }

        let idx = self.tail;
        // Taken before any relinking so a vacant tail leaves the store untouched
        let value = self.nodes[idx].value.take()?;
        self.unlink(idx);
        let key = std::mem::take(&mut self.nodes[idx].key);
        self.free.push(idx);
        self.index.remove(&key);
        self.used_bytes -= key.len() + value.len();

        trace!(key = %key, used_bytes = self.used_bytes, "evicted entry");
        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(&key, &value);
        }

        Some((key, value))
    }

    // == Accessors ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Bytes currently accounted to live entries.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    /// Returns true if `key` is present, without promoting it.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the next eviction candidate without promoting it.
    pub fn peek_oldest(&self) -> Option<&str> {
        (self.tail != NIL).then(|| self.nodes[self.tail].key.as_str())
    }

    /// Iterates keys from most to least recently used without promoting any.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            if cursor == NIL {
                return None;
            }
            let node = &self.nodes[cursor];
            cursor = node.next;
            Some(node.key.as_str())
        })
    }

    // == List Plumbing ==
    fn alloc(&mut self, key: String, value: V) -> usize {
        let node = Node {
            key,
            value: Some(value),
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
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

    fn push_front(&mut self, idx: usize) {
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

    fn move_to_front(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }
}
