// Copyright (C) 2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::result;

use thiserror::Error;


/// A result type using our [`Error`] by default.
pub type Result<T, E = Error> = result::Result<T, E>;


/// The conditions under which a ring buffer operation can fail.
///
/// A failed operation never modifies the buffer.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
  /// A write asked for more octets than there is free space.
  #[error("cannot write {requested} octets: only {available} octets of free space")]
  OutOfCapacity {
    /// The number of octets that were to be written.
    requested: usize,
    /// The free space at the time of the request.
    available: usize,
  },
  /// A read or skip asked for more octets than are stored.
  #[error("cannot consume {requested} octets: only {available} octets stored")]
  InsufficientData {
    /// The number of octets that were to be consumed.
    requested: usize,
    /// The number of octets stored at the time of the request.
    available: usize,
  },
  /// A raw peek was given an offset beyond the end of the block.
  #[error("offset {offset} is outside of block with capacity {capacity}")]
  InvalidOffset {
    /// The offending offset.
    offset: usize,
    /// The capacity of the buffer.
    capacity: usize,
  },
  /// A raw peek asked for more octets than the block holds in total.
  #[error("cannot peek {count} octets from block with capacity {capacity}")]
  PeekOverrun {
    /// The number of octets that were to be copied.
    count: usize,
    /// The capacity of the buffer.
    capacity: usize,
  },
  /// An allocator could not hand out a block of the requested size.
  #[error("cannot allocate block of {requested} octets: only {available} octets left")]
  BlockUnavailable {
    /// The requested block size.
    requested: usize,
    /// The number of octets the allocator had left.
    available: usize,
  },
}
