// Copyright (C) 2021-2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::iter::DoubleEndedIterator;
use std::iter::FusedIterator;


/// An iterator over the unread octets of a `RingBuf`.
///
/// Octets are yielded in stream order, i.e., the octet that a read
/// would return first comes first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingIter<'b> {
  /// The ring buffer's backing block.
  block: &'b [u8],
  /// The (not yet wrapped) offset of the next octet to yield in
  /// forward direction.
  next: usize,
  /// The (not yet wrapped) offset one past the next octet to yield in
  /// backward direction.
  next_back: usize,
}

impl<'b> RingIter<'b> {
  /// Create a new `RingIter` over `size` octets of `block`, starting
  /// at offset `start`.
  pub(crate) fn new(block: &'b [u8], start: usize, size: usize) -> Self {
    debug_assert!(size <= block.len(), "size: {size}, len: {}", block.len());

    Self {
      block,
      next: start,
      next_back: start + size,
    }
  }

  #[inline]
  fn get(&self, offset: usize) -> u8 {
    let idx = offset % self.block.len();
    #[cfg(debug_assertions)]
    let octet = *self.block.get(idx).unwrap();
    #[cfg(not(debug_assertions))]
    // SAFETY: The index is within the bounds of the underlying slice.
    let octet = unsafe { *self.block.get_unchecked(idx) };

    octet
  }
}

impl Iterator for RingIter<'_> {
  type Item = u8;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.next < self.next_back {
      let octet = self.get(self.next);
      self.next += 1;
      Some(octet)
    } else {
      None
    }
  }

  /// Return the bounds on the remaining length of the iterator.
  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.next_back - self.next;
    (len, Some(len))
  }
}

impl DoubleEndedIterator for RingIter<'_> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    if self.next < self.next_back {
      debug_assert!(self.next_back > 0);
      self.next_back -= 1;
      Some(self.get(self.next_back))
    } else {
      None
    }
  }
}

impl ExactSizeIterator for RingIter<'_> {}

impl FusedIterator for RingIter<'_> {}
