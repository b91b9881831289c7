//! Generational node storage.
//!
//! Slots are addressed by index. A vacated slot is threaded onto a free chain
//! and its generation is bumped, so a `NodeRef` captured before the removal no
//! longer resolves.

use allocator_api2::alloc::Allocator;
use allocator_api2::vec::Vec;
use core::mem;
use crate::Node;
use crate::NodeRef;

pub(crate) struct Slab<T, A: Allocator> {
  entries: Vec<Entry<T>, A>,
  free: Option<usize>,
  len: usize,
}

enum Entry<T> {
  Occupied { generation: u32, node: Node<T> },
  Vacant { generation: u32, next_free: Option<usize> },
}

impl<T, A: Allocator> Slab<T, A> {
  #[inline(always)]
  pub(crate) fn new_in(allocator: A) -> Self {
    Self { entries: Vec::new_in(allocator), free: None, len: 0, }
  }

  #[inline(always)]
  pub(crate) fn with_capacity_in(capacity: usize, allocator: A) -> Self {
    Self { entries: Vec::with_capacity_in(capacity, allocator), free: None, len: 0, }
  }

  #[inline(always)]
  pub(crate) fn len(&self) -> usize {
    self.len
  }

  #[inline(always)]
  pub(crate) fn allocator(&self) -> &A {
    self.entries.allocator()
  }

  pub(crate) fn insert(&mut self, node: Node<T>) -> NodeRef {
    self.len = self.len + 1;

    let Some(index) = self.free else {
      let index = self.entries.len();
      self.entries.push(Entry::Occupied { generation: 0, node });
      return NodeRef { index, generation: 0 };
    };

    let entry = &mut self.entries[index];

    let generation =
      match *entry {
        Entry::Vacant { generation, next_free } => {
          self.free = next_free;
          generation
        }
        Entry::Occupied { .. } =>
          unreachable!("slist: occupied slot {} on the free chain", index),
      };

    *entry = Entry::Occupied { generation, node };

    NodeRef { index, generation }
  }

  pub(crate) fn remove(&mut self, index: usize) -> Node<T> {
    let entry = &mut self.entries[index];

    let generation =
      match *entry {
        Entry::Occupied { generation, .. } => generation,
        Entry::Vacant { .. } =>
          unreachable!("slist: removing vacant slot {}", index),
      };

    let vacant = Entry::Vacant { generation: generation.wrapping_add(1), next_free: self.free };

    let Entry::Occupied { node, .. } = mem::replace(entry, vacant) else {
      unreachable!()
    };

    self.free = Some(index);
    self.len = self.len - 1;

    node
  }

  /// Resolves a handle, failing if its slot was vacated or reused.

  #[inline(always)]
  pub(crate) fn resolve(&self, handle: NodeRef) -> Option<usize> {
    match self.entries.get(handle.index)? {
      Entry::Occupied { generation, .. } if *generation == handle.generation => Some(handle.index),
      _ => None,
    }
  }

  /// The current handle for a live slot.

  #[inline(always)]
  pub(crate) fn handle(&self, index: usize) -> NodeRef {
    match self.entries[index] {
      Entry::Occupied { generation, .. } => NodeRef { index, generation },
      Entry::Vacant { .. } =>
        unreachable!("slist: handle requested for vacant slot {}", index),
    }
  }

  // Only indices reachable from the head are passed here. Those slots are
  // occupied for as long as they stay linked.

  #[inline(always)]
  pub(crate) fn node(&self, index: usize) -> &Node<T> {
    match &self.entries[index] {
      Entry::Occupied { node, .. } => node,
      Entry::Vacant { .. } =>
        unreachable!("slist: vacant slot {} linked into the chain", index),
    }
  }

  #[inline(always)]
  pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<T> {
    match &mut self.entries[index] {
      Entry::Occupied { node, .. } => node,
      Entry::Vacant { .. } =>
        unreachable!("slist: vacant slot {} linked into the chain", index),
    }
  }
}
