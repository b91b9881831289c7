#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use core::fmt;
use log::debug;
use log::info;
use log::warn;
use slab::Slab;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

mod slab;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A singly linked list whose nodes live in an arena backed by the allocator
/// `A`.
///
/// Nodes are owned by the list. Callers observe them through [`NodeRef`]
/// handles, which stay valid until the node they point at is deleted.

pub struct List<T, A: Allocator = Global> {
  slab: Slab<T, A>,
  head: Option<usize>,
  tail: Option<usize>,
}

/// A single element of the chain.
///
/// A node obtained from [`List::spawn_node`] is detached. It becomes part of a
/// list through [`List::from_node`] or [`List::link_after`]; its link field is
/// never exposed.

pub struct Node<T> {
  data: T,
  next: Option<usize>,
}

/// A non-owning handle to a node of a [`List`].
///
/// Handles are cheap to copy and may be held across mutations. Once the node
/// is deleted, every handle to it is rejected with [`Error::DanglingNode`].

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeRef {
  index: usize,
  generation: u32,
}

/// The errors reported by [`List`] operations.
///
/// A failed operation leaves the list unchanged.

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
  /// The operation needs at least one node, but the list is empty.
  #[error("the list is empty")]
  EmptyList,

  /// No node holds the requested value.
  #[error("value not found")]
  ValueNotFound,

  /// The handle refers to a node that is no longer part of the list.
  #[error("dangling node reference")]
  DanglingNode,

  /// The output sink passed to [`List::print`] failed.
  #[error("failed to write to the output sink")]
  Write(#[from] fmt::Error),
}

/// A forward traversal over the values of a list, starting at some node.
///
/// Created by [`List::iter`] and [`List::traverse`].

pub struct Traverse<'a, T, A: Allocator = Global> {
  slab: &'a Slab<T, A>,
  next: Option<usize>,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Node                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<T> Node<T> {
  #[inline(always)]
  pub(crate) fn new(data: T) -> Self {
    Self { data, next: None, }
  }

  /// The value held by the node.

  #[inline(always)]
  pub fn data(&self) -> &T {
    &self.data
  }

  /// Consumes the node, returning its value.

  #[inline(always)]
  pub fn into_data(self) -> T {
    self.data
  }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Node").field(&self.data).finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<T> List<T, Global> {
  /// Creates a list holding a single node with the given value.

  pub fn new(value: T) -> Self {
    Self::new_in(value, Global)
  }

  /// Creates a list holding a single node with the given value, with room
  /// for `capacity` nodes before the arena grows.

  pub fn with_capacity(value: T, capacity: usize) -> Self {
    Self::with_capacity_in(value, capacity, Global)
  }

  /// Creates a list whose head is the given node.

  pub fn from_node(node: Node<T>) -> Self {
    Self::from_node_in(node, Global)
  }
}

impl<T, A: Allocator> List<T, A> {
  /// Like [`new`](List::new), but the nodes are stored in memory obtained from
  /// `allocator`.

  pub fn new_in(value: T, allocator: A) -> Self {
    Self::from_node_in(Node::new(value), allocator)
  }

  /// Like [`with_capacity`](List::with_capacity), but the nodes are stored in
  /// memory obtained from `allocator`.

  pub fn with_capacity_in(value: T, capacity: usize, allocator: A) -> Self {
    let mut slab = Slab::with_capacity_in(capacity, allocator);
    let head = slab.insert(Node::new(value));
    Self { slab, head: Some(head.index), tail: None, }
  }

  /// Like [`from_node`](List::from_node), but the nodes are stored in memory
  /// obtained from `allocator`.

  pub fn from_node_in(node: Node<T>, allocator: A) -> Self {
    let mut slab = Slab::new_in(allocator);
    let head = slab.insert(Node::new(node.data));
    Self { slab, head: Some(head.index), tail: None, }
  }

  /// Creates a detached node. The list is not modified.

  pub fn spawn_node(&self, value: T) -> Node<T> {
    let _ = self;
    Node::new(value)
  }

  /// The first node, or `None` if the list is empty.

  pub fn head(&self) -> Option<NodeRef> {
    self.head.map(|i| self.slab.handle(i))
  }

  /// The number of nodes in the list.

  pub fn len(&self) -> usize {
    self.slab.len()
  }

  /// Returns `true` if the list holds no nodes.

  pub fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  /// A reference to the allocator backing the node arena.

  pub fn allocator(&self) -> &A {
    self.slab.allocator()
  }

  /// The value held by the node, or `None` if the handle is dangling.

  pub fn get(&self, node: NodeRef) -> Option<&T> {
    let i = self.slab.resolve(node)?;
    Some(&self.slab.node(i).data)
  }

  /// A mutable reference to the value held by the node, or `None` if the
  /// handle is dangling.

  pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
    let i = self.slab.resolve(node)?;
    Some(&mut self.slab.node_mut(i).data)
  }

  /// The node following `node`, or `None` if `node` is the last one.
  ///
  /// # Errors
  ///
  /// [`Error::DanglingNode`] if the handle does not refer to a live node.

  pub fn next_of(&self, node: NodeRef) -> Result<Option<NodeRef>, Error> {
    let i = self.resolve(node)?;
    Ok(self.slab.node(i).next.map(|j| self.slab.handle(j)))
  }

  /// Traverses the list from the head.

  pub fn iter(&self) -> Traverse<'_, T, A> {
    Traverse { slab: &self.slab, next: self.head }
  }

  /// Traverses the list from `start` to the end.
  ///
  /// # Errors
  ///
  /// [`Error::DanglingNode`] if the handle does not refer to a live node.

  pub fn traverse(&self, start: NodeRef) -> Result<Traverse<'_, T, A>, Error> {
    let i = self.resolve(start)?;
    Ok(Traverse { slab: &self.slab, next: Some(i) })
  }

  /// The last node.
  ///
  /// The first call walks the chain from the head. The result is cached and
  /// kept current by every later mutation.
  ///
  /// # Errors
  ///
  /// [`Error::EmptyList`] if the list has no nodes.

  pub fn get_tail(&mut self) -> Result<NodeRef, Error> {
    let Some(head) = self.head else {
      return Err(Error::EmptyList);
    };

    let tail =
      match self.tail {
        Some(i) => i,
        None => {
          let i = self.scan_tail(head);
          self.tail = Some(i);
          i
        }
      };

    Ok(self.slab.handle(tail))
  }

  fn scan_tail(&self, head: usize) -> usize {
    let mut i = head;
    let mut n = 1;

    while let Some(j) = self.slab.node(i).next {
      i = j;
      n = n + 1;
    }

    debug!("resolved tail after visiting {} nodes", n);

    i
  }

  #[inline(always)]
  fn resolve(&self, node: NodeRef) -> Result<usize, Error> {
    self.slab.resolve(node).ok_or(Error::DanglingNode)
  }
}

impl<T: fmt::Debug, A: Allocator> List<T, A> {
  /// Inserts a value before the current head and returns the new head.

  pub fn push_front(&mut self, value: T) -> NodeRef {
    info!("pushing {:?}", value);

    let was_empty = self.head.is_none();
    let node = self.slab.insert(Node { data: value, next: self.head });

    self.head = Some(node.index);

    if was_empty {
      self.tail = Some(node.index);
    }

    node
  }

  /// Inserts a value after the last node and returns the new tail.
  ///
  /// # Errors
  ///
  /// [`Error::EmptyList`] if the list has no nodes.

  pub fn append(&mut self, value: T) -> Result<NodeRef, Error> {
    let tail = self.get_tail()?.index;

    info!("pushing {:?} at the end of the list", value);

    let node = self.slab.insert(Node::new(value));

    self.slab.node_mut(tail).next = Some(node.index);
    self.tail = Some(node.index);

    Ok(node)
  }

  /// Inserts a value directly after `anchor` and returns the new node.
  ///
  /// # Errors
  ///
  /// [`Error::DanglingNode`] if `anchor` does not refer to a live node.

  pub fn insert_after(&mut self, anchor: NodeRef, value: T) -> Result<NodeRef, Error> {
    self.link_after(anchor, Node::new(value))
  }

  /// Splices a detached node directly after `anchor` and returns a handle to
  /// it.
  ///
  /// # Errors
  ///
  /// [`Error::DanglingNode`] if `anchor` does not refer to a live node.

  pub fn link_after(&mut self, anchor: NodeRef, node: Node<T>) -> Result<NodeRef, Error> {
    let at = self.resolve(anchor)?;
    let next = self.slab.node(at).next;

    info!("pushing {:?} next to {:?}", node.data, self.slab.node(at).data);

    let node = self.slab.insert(Node { data: node.data, next });

    self.slab.node_mut(at).next = Some(node.index);

    if self.tail == Some(at) {
      self.tail = Some(node.index);
    }

    Ok(node)
  }

  /// Writes one line per node, from `start` to the end, and returns the
  /// number of nodes visited.
  ///
  /// # Errors
  ///
  /// [`Error::DanglingNode`] if `start` does not refer to a live node, or
  /// [`Error::Write`] if `out` fails.

  pub fn print<W>(&self, start: NodeRef, out: &mut W) -> Result<usize, Error>
  where
    W: fmt::Write + ?Sized,
    T: fmt::Display,
  {
    let mut n = 0;

    for data in self.traverse(start)? {
      writeln!(out, "Value of this node is {}", data)?;
      n = n + 1;
    }

    Ok(n)
  }
}

impl<T: fmt::Debug + PartialEq, A: Allocator> List<T, A> {
  /// Removes the first node, in head-to-tail order, whose value equals
  /// `value`, and returns the value it held.
  ///
  /// # Errors
  ///
  /// [`Error::EmptyList`] if the list has no nodes, or
  /// [`Error::ValueNotFound`] if no node matches. The list is unchanged in
  /// either case.

  pub fn delete(&mut self, value: &T) -> Result<T, Error> {
    let Some(head) = self.head else {
      return Err(Error::EmptyList);
    };

    if self.slab.node(head).data == *value {
      let node = self.slab.remove(head);

      self.head = node.next;

      if self.head.is_none() {
        self.tail = None;
      }

      info!("deleting {:?}", value);

      return Ok(node.data);
    }

    let mut previous = head;

    let found =
      loop {
        let Some(i) = self.slab.node(previous).next else {
          warn!("error while deleting, value not found: {:?}", value);
          return Err(Error::ValueNotFound);
        };

        if self.slab.node(i).data == *value {
          break i;
        }

        previous = i;
      };

    let node = self.slab.remove(found);

    self.slab.node_mut(previous).next = node.next;

    if node.next.is_none() {
      self.tail = Some(previous);
    }

    info!("deleting {:?}", value);

    Ok(node.data)
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
  type Item = &'a T;
  type IntoIter = Traverse<'a, T, A>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Traverse                                                                   //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T, A: Allocator> Iterator for Traverse<'a, T, A> {
  type Item = &'a T;

  #[inline(always)]
  fn next(&mut self) -> Option<Self::Item> {
    let node = self.slab.node(self.next?);
    self.next = node.next;
    Some(&node.data)
  }
}

impl<'a, T, A: Allocator> core::iter::FusedIterator for Traverse<'a, T, A> { }

impl<'a, T, A: Allocator> fmt::Debug for Traverse<'a, T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Traverse").field(&self.next).finish()
  }
}
