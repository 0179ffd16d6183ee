// src/list/doubly.rs
//! Doubly linked list with stable node handles.

use super::slab::{NodeId, NodeSlab, RawSlots};
use std::fmt;
use std::iter::FusedIterator;

struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly linked list with O(1) operations at both ends and at any node
/// the caller holds a [`NodeId`] for.
///
/// Positional `insert_at` and `erase_at` walk from whichever end is nearer.
///
/// Node storage keeps its high-water mark: removing values leaves their
/// slots vacant for reuse. [`clear`](Self::clear) releases all of it and
/// [`shrink_to_fit`](Self::shrink_to_fit) releases the vacant slots at the
/// end.
///
/// # Examples
///
/// ```
/// use seqbuf::DoublyLinkedList;
///
/// let mut list = DoublyLinkedList::new();
/// list.push_back(1);
/// let three = list.push_back(3);
/// list.insert_before(three, 2);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
///
/// assert_eq!(list.remove(three), Some(3));
/// assert_eq!(list.get(three), None);
/// ```
pub struct DoublyLinkedList<T> {
    nodes: NodeSlab<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> DoublyLinkedList<T> {
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

    /// Prepends `value` and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        self.link(None, self.head, value)
    }

    /// Appends `value` and returns its handle.
    pub fn push_back(&mut self, value: T) -> NodeId {
        self.link(self.tail, None, value)
    }

    /// Removes and returns the first value.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn pop_front(&mut self) -> T {
        let Some(head) = self.head else {
            panic!("pop_front on empty DoublyLinkedList");
        };
        self.unlink(head)
    }

    /// Removes and returns the last value.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn pop_back(&mut self) -> T {
        let Some(tail) = self.tail else {
            panic!("pop_back on empty DoublyLinkedList");
        };
        self.unlink(tail)
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

    /// Handle of the first node.
    pub fn head(&self) -> Option<NodeId> {
        self.head.map(|i| self.nodes.id_of(i))
    }

    /// Handle of the last node.
    pub fn tail(&self) -> Option<NodeId> {
        self.tail.map(|i| self.nodes.id_of(i))
    }

    /// Whether `id` names a node still in this list.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Value of the node `id`, or `None` for a stale handle.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    /// Mutable value of the node `id`, or `None` for a stale handle.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.value)
    }

    /// Handle of the node after `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let next = self.nodes.get(id)?.next?;
        Some(self.nodes.id_of(next))
    }

    /// Handle of the node before `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let prev = self.nodes.get(id)?.prev?;
        Some(self.nodes.id_of(prev))
    }

    /// Unlinks the node `id` in O(1) and returns its value.
    ///
    /// Returns `None` if the handle is stale.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.nodes.contains(id) {
            return None;
        }
        Some(self.unlink(id.index()))
    }

    /// Inserts `value` just before the node `id`.
    ///
    /// Returns `None`, dropping `value`, if the handle is stale.
    pub fn insert_before(&mut self, id: NodeId, value: T) -> Option<NodeId> {
        let prev = self.nodes.get(id)?.prev;
        Some(self.link(prev, Some(id.index()), value))
    }

    /// Inserts `value` just after the node `id`.
    ///
    /// Returns `None`, dropping `value`, if the handle is stale.
    pub fn insert_after(&mut self, id: NodeId, value: T) -> Option<NodeId> {
        let next = self.nodes.get(id)?.next;
        Some(self.link(Some(id.index()), next, value))
    }

    /// Inserts `value` so that it ends up at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, value: T) -> NodeId {
        assert!(
            index <= self.len(),
            "insert_at index {} out of bounds (len {})",
            index,
            self.len()
        );
        if index == self.len() {
            return self.push_back(value);
        }
        let at = self.index_at(index);
        let prev = self.nodes.node(at).prev;
        self.link(prev, Some(at), value)
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
        let at = self.index_at(index);
        self.unlink(at)
    }

    /// Drops every value and releases the node storage. Handles issued
    /// before the call go stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Releases vacant node slots past the last occupied one.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Iterates over the values; reversible with `.rev()`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Iterates mutably over the values; reversible with `.rev()`.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back, remaining) = (self.head, self.tail, self.len());
        IterMut {
            slots: self.nodes.raw_slots(),
            front,
            back,
            remaining,
        }
    }

    fn link(&mut self, prev: Option<usize>, next: Option<usize>, value: T) -> NodeId {
        let id = self.nodes.insert(Node { value, prev, next });
        let index = id.index();
        match prev {
            Some(p) => self.nodes.node_mut(p).next = Some(index),
            None => self.head = Some(index),
        }
        match next {
            Some(n) => self.nodes.node_mut(n).prev = Some(index),
            None => self.tail = Some(index),
        }
        id
    }

    fn unlink(&mut self, index: usize) -> T {
        let node = self.nodes.take(index);
        match node.prev {
            Some(p) => self.nodes.node_mut(p).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes.node_mut(n).prev = node.prev,
            None => self.tail = node.prev,
        }
        node.value
    }

    /// Slot index of position `index`, walking from the nearer end.
    fn index_at(&self, index: usize) -> usize {
        let len = self.len();
        let cursor = if index < len / 2 {
            (0..index).fold(self.head, |at, _| at.and_then(|i| self.nodes.node(i).next))
        } else {
            (index..len - 1).fold(self.tail, |at, _| at.and_then(|i| self.nodes.node(i).prev))
        };
        match cursor {
            Some(i) => i,
            None => panic!("position {} past the end of the list", index),
        }
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DoublyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DoublyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DoublyLinkedList<T> {}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

/// Borrowing iterator over a [`DoublyLinkedList`].
pub struct Iter<'a, T> {
    nodes: &'a NodeSlab<Node<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a [`DoublyLinkedList`].
pub struct IterMut<'a, T> {
    slots: RawSlots<'a, Node<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        // SAFETY: `remaining` stops the two cursors before they cross, so
        // each slot is handed out once.
        let node = unsafe { self.slots.node_mut(index) };
        self.front = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        // SAFETY: as in `next`.
        let node = unsafe { self.slots.node_mut(index) };
        self.back = node.prev;
        self.remaining -= 1;
        Some(&mut node.value)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`DoublyLinkedList`].
pub struct IntoIter<T> {
    list: DoublyLinkedList<T>,
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

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.list.is_empty() {
            None
        } else {
            Some(self.list.pop_back())
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for DoublyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DoublyLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn values(list: &DoublyLinkedList<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_ends() {
        let mut list = DoublyLinkedList::new();
        assert!(list.is_empty());
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));

        assert_eq!(list.pop_front(), 1);
        assert_eq!(list.front(), Some(&2));

        assert_eq!(list.pop_back(), 3);
        assert_eq!(list.len(), 1);
        assert_eq!(list.head(), list.tail());
        assert_eq!(list.front(), Some(&2));

        list.push_front(0);
        assert_eq!(values(&list), vec![0, 2]);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
    }

    #[test]
    fn test_erase_at_sequence() {
        let mut list: DoublyLinkedList<i32> = (0..10).collect();
        assert_eq!(list.erase_at(0), 0);
        assert_eq!(list.len(), 9);
        assert_eq!(list.front(), Some(&1));

        assert_eq!(list.erase_at(8), 9);
        assert_eq!(list.len(), 8);
        assert_eq!(list.back(), Some(&8));

        assert_eq!(list.erase_at(2), 3);
        assert_eq!(list.len(), 7);
        assert_eq!(values(&list), vec![1, 2, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_insert_at_from_either_end() {
        let mut list: DoublyLinkedList<i32> = (0..6).collect();
        list.insert_at(1, 10);
        list.insert_at(5, 50);
        list.insert_at(0, -1);
        list.insert_at(list.len(), 99);
        assert_eq!(values(&list), vec![-1, 0, 10, 1, 2, 3, 50, 4, 5, 99]);
        assert_eq!(list.iter().rev().next(), Some(&99));
    }

    #[test]
    fn test_handle_navigation() {
        let mut list = DoublyLinkedList::new();
        let a = list.push_back('a');
        let c = list.push_back('c');
        let b = list.insert_after(a, 'b').unwrap();
        let z = list.insert_before(a, 'z').unwrap();

        assert_eq!(list.head(), Some(z));
        assert_eq!(list.next(a), Some(b));
        assert_eq!(list.prev(c), Some(b));
        assert_eq!(list.prev(z), None);
        assert_eq!(list.next(c), None);

        *list.get_mut(b).unwrap() = 'B';
        assert_eq!(list.iter().collect::<String>(), "zaBc");
    }

    #[test]
    fn test_remove_by_handle() {
        let mut list = DoublyLinkedList::new();
        let first = list.push_back(1);
        let middle = list.push_back(2);
        let last = list.push_back(3);

        assert_eq!(list.remove(middle), Some(2));
        assert_eq!(list.next(first), Some(last));
        assert_eq!(list.prev(last), Some(first));

        assert_eq!(list.remove(first), Some(1));
        assert_eq!(list.head(), Some(last));
        assert_eq!(list.remove(last), Some(3));
        assert!(list.is_empty());
        assert_eq!(list.tail(), None);
    }

    #[test]
    fn test_stale_handles() {
        let mut list = DoublyLinkedList::new();
        let gone = list.push_back(1);
        list.remove(gone);
        let reused = list.push_back(2);

        assert!(!list.contains(gone));
        assert_eq!(list.get(gone), None);
        assert_eq!(list.remove(gone), None);
        assert_eq!(list.insert_after(gone, 5), None);
        assert_eq!(list.next(gone), None);
        assert_eq!(values(&list), vec![2]);

        list.clear();
        assert_eq!(list.get(reused), None);
        let fresh = list.push_back(3);
        assert_ne!(fresh, reused);
    }

    #[test]
    fn test_double_ended_iteration() {
        let mut list: DoublyLinkedList<i32> = (1..=5).collect();
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.rev().copied().collect::<Vec<_>>(), vec![4, 3, 2]);

        let mut iter = list.iter_mut();
        *iter.next().unwrap() = 10;
        *iter.next_back().unwrap() = 50;
        for value in iter {
            *value *= 100;
        }
        assert_eq!(values(&list), vec![10, 200, 300, 400, 50]);

        let owned: Vec<i32> = list.into_iter().rev().collect();
        assert_eq!(owned, vec![50, 400, 300, 200, 10]);
    }

    #[test]
    fn test_clone_and_eq() {
        let a: DoublyLinkedList<String> = ["p", "q"].iter().map(|s| s.to_string()).collect();
        let mut b = a.clone();
        assert_eq!(a, b);
        b.pop_front();
        assert_ne!(a, b);
        assert_eq!(format!("{:?}", a), r#"["p", "q"]"#);
    }

    #[test]
    fn test_values_dropped_once() {
        let marker = Rc::new(());
        {
            let mut list = DoublyLinkedList::new();
            let id = list.push_back(Rc::clone(&marker));
            list.push_back(Rc::clone(&marker));
            list.push_front(Rc::clone(&marker));
            drop(list.remove(id));
            assert_eq!(Rc::strong_count(&marker), 3);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_node_storage_released() {
        let mut list = DoublyLinkedList::new();
        let ids: Vec<NodeId> = (0..1000).map(|i| list.push_back(i)).collect();
        for _ in 0..990 {
            list.pop_back();
        }
        assert_eq!(list.capacity(), 1000);
        list.shrink_to_fit();
        assert_eq!(list.capacity(), 10);
        assert_eq!(list.get(ids[9]), Some(&9));
        assert_eq!(list.get(ids[10]), None);

        list.clear();
        assert_eq!(list.capacity(), 0);
        assert_eq!(list.get(ids[0]), None);
    }

    #[test]
    #[should_panic(expected = "pop_back on empty DoublyLinkedList")]
    fn test_pop_back_empty_panics() {
        let mut list: DoublyLinkedList<u8> = DoublyLinkedList::new();
        list.pop_back();
    }

    #[test]
    #[should_panic(expected = "erase_at index 3 out of bounds (len 3)")]
    fn test_erase_at_out_of_bounds_panics() {
        let mut list: DoublyLinkedList<u8> = (0..3).collect();
        list.erase_at(3);
    }
}
