// src/list/slab.rs
//! Generational node storage shared by the linked lists.
//!
//! Nodes live in indexed slots; links between nodes are slot indices, so a
//! list can never double-free or follow a dangling pointer. Vacated slots go
//! on a free list and are reused by the next insertion.
//!
//! Every insertion stamps its slot with a fresh generation taken from a
//! counter that only ever increases (it survives [`NodeSlab::clear`]), so a
//! [`NodeId`] kept after its node was removed can never match a later node.

use std::marker::PhantomData;

/// Handle to a node of a [`DoublyLinkedList`](crate::DoublyLinkedList).
///
/// A handle stays valid until its node is removed or the list is cleared;
/// after that, lookups through it return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

impl NodeId {
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

struct Entry<N> {
    generation: u64,
    node: N,
}

pub(crate) struct NodeSlab<N> {
    /// All slots, occupied or vacant
    slots: Vec<Option<Entry<N>>>,
    /// Indices of vacant slots available for reuse
    free_list: Vec<usize>,
    /// Number of occupied slots
    live: usize,
    next_generation: u64,
}

impl<N> NodeSlab<N> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            next_generation: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Slots held, occupied or vacant.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Stores `node` and returns its handle.
    pub(crate) fn insert(&mut self, node: N) -> NodeId {
        let generation = self.next_generation;
        self.next_generation += 1;
        let entry = Some(Entry { generation, node });

        let index = if let Some(reuse) = self.free_list.pop() {
            self.slots[reuse] = entry;
            reuse
        } else {
            self.slots.push(entry);
            self.slots.len() - 1
        };
        self.live += 1;
        NodeId { index, generation }
    }

    /// Whether `id` still names a stored node.
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&N> {
        match self.slots.get(id.index) {
            Some(Some(entry)) if entry.generation == id.generation => Some(&entry.node),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        match self.slots.get_mut(id.index) {
            Some(Some(entry)) if entry.generation == id.generation => Some(&mut entry.node),
            _ => None,
        }
    }

    /// Handle for the node currently stored at `index`.
    pub(crate) fn id_of(&self, index: usize) -> NodeId {
        NodeId {
            index,
            generation: self.entry(index).generation,
        }
    }

    /// The node at `index`, which the owning list knows to be occupied.
    #[inline]
    pub(crate) fn node(&self, index: usize) -> &N {
        &self.entry(index).node
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: usize) -> &mut N {
        match self.slots.get_mut(index) {
            Some(Some(entry)) => &mut entry.node,
            _ => panic!("linked list points at vacant slot {}", index),
        }
    }

    /// Removes and returns the node at an occupied `index`.
    pub(crate) fn take(&mut self, index: usize) -> N {
        let Some(entry) = self.slots.get_mut(index).and_then(Option::take) else {
            panic!("linked list points at vacant slot {}", index);
        };
        self.free_list.push(index);
        self.live -= 1;
        entry.node
    }

    /// Drops every node and releases the slot storage.
    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
        self.free_list = Vec::new();
        self.live = 0;
    }

    /// Releases the vacant slots past the last occupied one.
    ///
    /// Occupied slots never move, so handles stay valid. Vacant slots below
    /// the last occupied one stay on the free list.
    pub(crate) fn shrink_to_fit(&mut self) {
        while let Some(None) = self.slots.last() {
            self.slots.pop();
        }
        let end = self.slots.len();
        self.free_list.retain(|&index| index < end);
        self.slots.shrink_to_fit();
        self.free_list.shrink_to_fit();
    }

    /// Raw access for mutable iterators that visit each slot at most once.
    pub(crate) fn raw_slots(&mut self) -> RawSlots<'_, N> {
        RawSlots {
            base: self.slots.as_mut_ptr(),
            len: self.slots.len(),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn entry(&self, index: usize) -> &Entry<N> {
        match self.slots.get(index) {
            Some(Some(entry)) => entry,
            _ => panic!("linked list points at vacant slot {}", index),
        }
    }
}

impl<N> Default for NodeSlab<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable slot access detached from the slab borrow, for `IterMut`.
pub(crate) struct RawSlots<'a, N> {
    base: *mut Option<Entry<N>>,
    len: usize,
    _marker: PhantomData<&'a mut N>,
}

impl<'a, N> RawSlots<'a, N> {
    /// # Safety
    ///
    /// `index` is occupied and no other reference to that node obtained
    /// through this value is alive.
    pub(crate) unsafe fn node_mut(&self, index: usize) -> &'a mut N {
        assert!(index < self.len, "slot {} out of range", index);
        match unsafe { &mut *self.base.add(index) } {
            Some(entry) => &mut entry.node,
            None => panic!("linked list points at vacant slot {}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut slab = NodeSlab::new();
        let a = slab.insert("a");
        let b = slab.insert("b");
        assert_eq!(slab.len(), 2);
        assert_eq!(slab.get(a), Some(&"a"));
        assert_eq!(slab.take(a.index), "a");
        assert_eq!(slab.get(a), None);
        assert_eq!(slab.get(b), Some(&"b"));
        assert_eq!(slab.len(), 1);
    }

    #[test]
    fn test_reused_slot_rejects_stale_id() {
        let mut slab = NodeSlab::new();
        let old = slab.insert(1);
        slab.take(old.index);
        let new = slab.insert(2);
        assert_eq!(new.index, old.index);
        assert!(!slab.contains(old));
        assert_eq!(slab.get(new), Some(&2));
    }

    #[test]
    fn test_clear_keeps_generations_moving() {
        let mut slab = NodeSlab::new();
        let before = slab.insert(1);
        slab.clear();
        let after = slab.insert(2);
        assert_eq!(before.index, after.index);
        assert_ne!(before, after);
        assert_eq!(slab.get(before), None);
    }

    #[test]
    fn test_clear_releases_slots() {
        let mut slab = NodeSlab::new();
        let ids: Vec<NodeId> = (0..1000).map(|i| slab.insert(i)).collect();
        for id in &ids[1..] {
            slab.take(id.index);
        }
        assert_eq!(slab.capacity(), 1000);
        slab.clear();
        assert_eq!(slab.capacity(), 0);
        assert_eq!(slab.slots.capacity(), 0);
        assert_eq!(slab.free_list.capacity(), 0);
    }

    #[test]
    fn test_shrink_to_fit_trims_tail() {
        let mut slab = NodeSlab::new();
        let ids: Vec<NodeId> = (0..100).map(|i| slab.insert(i)).collect();
        for id in ids[10..].iter().chain(&ids[2..5]) {
            slab.take(id.index);
        }
        slab.shrink_to_fit();
        assert_eq!(slab.capacity(), 10);
        assert_eq!(slab.free_list.len(), 3);
        assert!(slab.free_list.iter().all(|&index| index < 10));
        assert_eq!(slab.get(ids[9]), Some(&9));
        assert_eq!(slab.get(ids[50]), None);

        // Vacant interior slots are reused before the storage grows again.
        for i in 0..3 {
            let id = slab.insert(i);
            assert!(id.index < 10);
        }
        assert_eq!(slab.insert(7).index, 10);
    }

    #[test]
    #[should_panic(expected = "vacant slot")]
    fn test_take_vacant_panics() {
        let mut slab: NodeSlab<u8> = NodeSlab::new();
        slab.take(0);
    }
}
