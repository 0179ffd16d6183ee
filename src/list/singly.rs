// src/list/singly.rs
//! Singly linked list.

use super::slab::{NodeSlab, RawSlots};
use std::fmt;
use std::iter::FusedIterator;

struct Node<T> {
    value: T,
    next: Option<usize>,
}

/// A singly linked list with O(1) push at both ends and O(1) pop at the
/// front.
///
/// `pop_back`, `insert_at`, and `erase_at` walk from the head, costing
/// O(index).
///
/// Node storage keeps its high-water mark: removing values leaves their
/// slots vacant for reuse. [`clear`](Self::clear) releases all of it and
/// [`shrink_to_fit`](Self::shrink_to_fit) releases the vacant slots at the
/// end.
///
/// # Examples
///
/// ```
/// use seqbuf::SinglyLinkedList;
///
/// let mut list = SinglyLinkedList::new();
/// list.push_back(2);
/// list.push_back(3);
/// list.push_front(1);
/// list.insert_at(3, 4);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
/// assert_eq!(list.pop_front(), 1);
/// ```
pub struct SinglyLinkedList<T> {
    nodes: NodeSlab<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> SinglyLinkedList<T> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            nodes: NodeSlab::new(),
            head: None,
            tail: None,
        }
    }

    /// Number of values in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of node slots held, including vacant ones awaiting reuse.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns `true` if the list holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepends `value`.
    pub fn push_front(&mut self, value: T) {
        let id = self.nodes.insert(Node {
            value,
            next: self.head,
        });
        self.head = Some(id.index());
        if self.tail.is_none() {
            self.tail = self.head;
        }
    }

    /// Appends `value`.
    pub fn push_back(&mut self, value: T) {
        let index = self.nodes.insert(Node { value, next: None }).index();
        match self.tail {
            Some(tail) => self.nodes.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    /// Removes and returns the first value.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn pop_front(&mut self) -> T {
        let Some(head) = self.head else {
            panic!("pop_front on empty SinglyLinkedList");
        };
        let node = self.nodes.take(head);
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        node.value
    }

    /// Removes and returns the last value. O(len).
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn pop_back(&mut self) -> T {
        let Some(tail) = self.tail else {
            panic!("pop_back on empty SinglyLinkedList");
        };
        if self.head == Some(tail) {
            self.head = None;
            self.tail = None;
            return self.nodes.take(tail).value;
        }
        let before = self.index_at(self.len() - 2);
        self.nodes.node_mut(before).next = None;
        self.tail = Some(before);
        self.nodes.take(tail).value
    }

    /// First value, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|i| &self.nodes.node(i).value)
    }

    /// First value mutably, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|i| &mut self.nodes.node_mut(i).value)
    }

    /// Last value, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|i| &self.nodes.node(i).value)
    }

    /// Last value mutably, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|i| &mut self.nodes.node_mut(i).value)
    }

    /// Inserts `value` so that it ends up at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len(),
            "insert_at index {} out of bounds (len {})",
            index,
            self.len()
        );
        if index == 0 {
            self.push_front(value);
            return;
        }
        if index == self.len() {
            self.push_back(value);
            return;
        }
        let before = self.index_at(index - 1);
        let next = self.nodes.node(before).next;
        let inserted = self.nodes.insert(Node { value, next }).index();
        self.nodes.node_mut(before).next = Some(inserted);
    }

    /// Removes and returns the value at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase_at(&mut self, index: usize) -> T {
        assert!(
            index < self.len(),
            "erase_at index {} out of bounds (len {})",
            index,
            self.len()
        );
        if index == 0 {
            return self.pop_front();
        }
        let before = self.index_at(index - 1);
        let Some(target) = self.nodes.node(before).next else {
            panic!("erase_at walked past the tail");
        };
        let node = self.nodes.take(target);
        self.nodes.node_mut(before).next = node.next;
        if node.next.is_none() {
            self.tail = Some(before);
        }
        node.value
    }

    /// Drops every value and releases the node storage.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Releases vacant node slots past the last occupied one.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Iterates over the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.len(),
        }
    }

    /// Iterates mutably over the values from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let remaining = self.len();
        let next = self.head;
        IterMut {
            slots: self.nodes.raw_slots(),
            next,
            remaining,
        }
    }

    /// Slot index of position `index`, walking from the head.
    fn index_at(&self, index: usize) -> usize {
        let mut cursor = self.head;
        for _ in 0..index {
            cursor = cursor.and_then(|i| self.nodes.node(i).next);
        }
        match cursor {
            Some(i) => i,
            None => panic!("position {} past the end of the list", index),
        }
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

/// Borrowing iterator over a [`SinglyLinkedList`].
pub struct Iter<'a, T> {
    nodes: &'a NodeSlab<Node<T>>,
    next: Option<usize>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.nodes.node(self.next?);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a [`SinglyLinkedList`].
pub struct IterMut<'a, T> {
    slots: RawSlots<'a, Node<T>>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let index = self.next?;
        // SAFETY: the list is acyclic, so each slot is visited once.
        let node = unsafe { self.slots.node_mut(index) };
        self.next = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`SinglyLinkedList`].
pub struct IntoIter<T> {
    list: SinglyLinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.list.is_empty() {
            None
        } else {
            Some(self.list.pop_front())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SinglyLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
