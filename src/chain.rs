use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

/// A key-value pair stored in a bucket's chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    key: String,
    value: V,
}

impl<V> Entry<V> {
    /// Creates an entry.
    pub fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value mutably.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Consumes the entry, returning the owned key and value.
    pub fn into_pair(self) -> (String, V) {
        (self.key, self.value)
    }
}

/// The collision list held by each bucket of a
/// [`HashTable`](crate::HashTable).
///
/// A chain keeps its entries in insertion order. It does not check for
/// duplicate keys; the table guarantees that a key appears in at most one
/// chain, at most once.
///
/// Collecting entries into a chain keeps their iteration order, as if each
/// had been appended in turn.
pub trait Chain<V>: Default + FromIterator<Entry<V>> {
    /// Iterator over the chain's entries in order.
    type Iter<'a>: Iterator<Item = &'a Entry<V>>
    where
        Self: 'a,
        V: 'a;

    /// Appends `entry` at the tail.
    fn append(&mut self, entry: Entry<V>);

    /// Returns the first entry matching `eq`.
    fn find(&self, eq: impl Fn(&Entry<V>) -> bool) -> Option<&Entry<V>> {
        self.iter().find(|entry| eq(entry))
    }

    /// Returns the first entry matching `eq`, mutably.
    fn find_mut(&mut self, eq: impl Fn(&Entry<V>) -> bool) -> Option<&mut Entry<V>>;

    /// Unlinks and returns the first entry matching `eq`. The order of the
    /// remaining entries is preserved.
    fn remove(&mut self, eq: impl Fn(&Entry<V>) -> bool) -> Option<Entry<V>>;

    /// Returns an iterator over the entries in order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Consumes the chain, returning its entries in order.
    fn into_entries(self) -> Vec<Entry<V>>;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the chain holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A chain stored as a contiguous vector. This is the default chain type.
#[derive(Clone)]
pub struct VecChain<V> {
    entries: Vec<Entry<V>>,
}

impl<V> Default for VecChain<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> FromIterator<Entry<V>> for VecChain<V> {
    fn from_iter<I: IntoIterator<Item = Entry<V>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<V: Debug> Debug for VecChain<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<V> Chain<V> for VecChain<V> {
    type Iter<'a>
        = core::slice::Iter<'a, Entry<V>>
    where
        V: 'a;

    #[inline]
    fn append(&mut self, entry: Entry<V>) {
        self.entries.push(entry);
    }

    fn find_mut(&mut self, eq: impl Fn(&Entry<V>) -> bool) -> Option<&mut Entry<V>> {
        self.entries.iter_mut().find(|entry| eq(entry))
    }

    fn remove(&mut self, eq: impl Fn(&Entry<V>) -> bool) -> Option<Entry<V>> {
        let position = self.entries.iter().position(eq)?;
        Some(self.entries.remove(position))
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.entries.iter()
    }

    fn into_entries(self) -> Vec<Entry<V>> {
        self.entries
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

struct Node<V> {
    entry: Entry<V>,
    next: Option<Box<Node<V>>>,
}

/// A chain stored as a singly-linked list of boxed nodes.
pub struct LinkedChain<V> {
    head: Option<Box<Node<V>>>,
    len: usize,
}

impl<V> Default for LinkedChain<V> {
    fn default() -> Self {
        Self { head: None, len: 0 }
    }
}

impl<V: Debug> Debug for LinkedChain<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: Clone> Clone for LinkedChain<V> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<V> FromIterator<Entry<V>> for LinkedChain<V> {
    fn from_iter<I: IntoIterator<Item = Entry<V>>>(iter: I) -> Self {
        let mut chain = Self::default();
        let mut tail = &mut chain.head;
        for entry in iter {
            tail = &mut tail.insert(Box::new(Node { entry, next: None })).next;
            chain.len += 1;
        }
        chain
    }
}

// Unlink iteratively; the default recursive drop can overflow the stack on
// long chains.
impl<V> Drop for LinkedChain<V> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl<V> Chain<V> for LinkedChain<V> {
    type Iter<'a>
        = LinkedIter<'a, V>
    where
        V: 'a;

    // Walks to the tail. Bulk builds go through `FromIterator` instead.
    fn append(&mut self, entry: Entry<V>) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(Node { entry, next: None }));
        self.len += 1;
    }

    fn find_mut(&mut self, eq: impl Fn(&Entry<V>) -> bool) -> Option<&mut Entry<V>> {
        let mut next = self.head.as_deref_mut();
        while let Some(node) = next {
            if eq(&node.entry) {
                return Some(&mut node.entry);
            }
            next = node.next.as_deref_mut();
        }
        None
    }

    fn remove(&mut self, eq: impl Fn(&Entry<V>) -> bool) -> Option<Entry<V>> {
        let mut rest = self.head.take();
        let mut tail = &mut self.head;
        let mut removed = None;

        // Relink every node except the first match.
        while let Some(mut node) = rest {
            rest = node.next.take();
            if removed.is_none() && eq(&node.entry) {
                removed = Some(node.entry);
            } else {
                tail = &mut tail.insert(node).next;
            }
        }

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn iter(&self) -> Self::Iter<'_> {
        LinkedIter {
            next: self.head.as_deref(),
        }
    }

    fn into_entries(mut self) -> Vec<Entry<V>> {
        let mut entries = Vec::with_capacity(self.len);
        let mut next = self.head.take();
        while let Some(node) = next {
            let Node { entry, next: rest } = *node;
            entries.push(entry);
            next = rest;
        }
        self.len = 0;
        entries
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

/// Iterator over the entries of a [`LinkedChain`].
pub struct LinkedIter<'a, V> {
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for LinkedIter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.entry)
    }
}
