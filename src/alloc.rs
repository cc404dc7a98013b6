// Copyright (C) 2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::mem::take;

use crate::Error;
use crate::Result;


/// A source of backing blocks for ring buffers.
///
/// An allocator hands out exclusive ownership of a contiguous block of
/// octets. The ring buffer never calls back into the allocator after
/// construction; whether and when a block is released is a matter of
/// the block type (e.g., dropping a `Box<[u8]>` frees it, whereas a
/// block borrowed from an [`Arena`] lives as long as the arena's
/// region).
pub trait BlockAllocator {
  /// The type of block handed out.
  type Block: AsRef<[u8]> + AsMut<[u8]>;

  /// Allocate a block of at least `len` octets.
  fn allocate(&mut self, len: usize) -> Result<Self::Block>;
}


/// An allocator drawing zero initialized blocks from the global heap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Heap;

impl BlockAllocator for Heap {
  type Block = Box<[u8]>;

  #[inline]
  fn allocate(&mut self, len: usize) -> Result<Self::Block> {
    Ok(vec![0; len].into_boxed_slice())
  }
}


/// An allocator carving blocks out of a single caller owned region.
///
/// Blocks are handed out front to back and are never returned to the
/// arena. They stay valid for as long as the underlying region is
/// borrowed.
#[derive(Debug)]
pub struct Arena<'r> {
  /// The part of the region not yet handed out.
  free: &'r mut [u8],
}

impl<'r> Arena<'r> {
  /// Create an `Arena` managing the provided region.
  pub fn new(region: &'r mut [u8]) -> Self {
    Self { free: region }
  }

  /// Retrieve the number of octets still available for allocation.
  #[inline]
  pub fn remaining(&self) -> usize {
    self.free.len()
  }
}

impl<'r> BlockAllocator for Arena<'r> {
  type Block = &'r mut [u8];

  fn allocate(&mut self, len: usize) -> Result<Self::Block> {
    let available = self.free.len();
    if len > available {
      return Err(Error::BlockUnavailable {
        requested: len,
        available,
      })
    }

    let free = take(&mut self.free);
    let (block, rest) = free.split_at_mut(len);
    self.free = rest;
    Ok(block)
  }
}


#[cfg(test)]
mod tests {
  use super::*;


  /// Check that the heap allocator hands out blocks of the requested
  /// size.
  #[test]
  fn heap_allocation() {
    let block = Heap.allocate(17).unwrap();
    assert_eq!(block.len(), 17);
    assert!(block.iter().all(|b| *b == 0));
  }

  /// Make sure that an `Arena` hands out disjoint blocks and refuses
  /// requests it cannot satisfy.
  #[test]
  fn arena_carving() {
    let mut region = [0u8; 10];
    let mut arena = Arena::new(&mut region);

    let first = arena.allocate(4).unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(arena.remaining(), 6);

    let second = arena.allocate(6).unwrap();
    assert_eq!(second.len(), 6);
    assert_eq!(arena.remaining(), 0);

    first.fill(1);
    second.fill(2);

    let err = arena.allocate(1).unwrap_err();
    assert_eq!(
      err,
      Error::BlockUnavailable {
        requested: 1,
        available: 0,
      }
    );

    let empty = arena.allocate(0).unwrap();
    assert!(empty.is_empty());
    assert_eq!(region, [1, 1, 1, 1, 2, 2, 2, 2, 2, 2]);
  }
}
