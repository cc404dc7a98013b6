// Copyright (C) 2021-2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use crate::BlockAllocator;
use crate::Diagnostics;
use crate::Error;
use crate::Result;
use crate::RingIter;
use crate::Silent;


/// Wrap an offset that is at most one lap past the block's end back
/// into the block.
#[inline]
fn wrap(offset: usize, capacity: usize) -> usize {
  debug_assert!(
    offset < 2 * capacity || capacity == 0,
    "offset: {offset}, capacity: {capacity}"
  );

  if offset >= capacity {
    offset - capacity
  } else {
    offset
  }
}


/// A fixed-capacity ring buffer for octet streams.
///
/// The buffer owns a contiguous block of octets, handed to it at
/// construction, and never grows beyond it. Producers append octets
/// via [`write`][RingBuf::write], consumers remove them from the front
/// via [`read`][RingBuf::read] or [`skip`][RingBuf::skip]. Data is never
/// shifted around; instead, the read and write indexes wrap around at
/// the end of the block, splitting every copy into at most two runs.
///
/// Whether the buffer is full or empty is determined solely by the
/// number of octets stored, as the read and write index coincide in
/// both cases.
///
/// Failed operations leave the buffer untouched and are reported to a
/// [`Diagnostics`] sink, which by default is [`Silent`].
///
/// The buffer performs no synchronization of any kind. Concurrent use
/// from multiple threads requires external locking.
#[derive(Clone, Debug)]
pub struct RingBuf<S = Box<[u8]>, D = Silent> {
  /// The backing block.
  ///
  /// Only the first `capacity` octets of it are in use.
  block: S,
  /// The number of octets the buffer can hold.
  capacity: usize,
  /// The number of unread octets stored.
  size: usize,
  /// The offset at which the next written octet will land.
  write_idx: usize,
  /// The offset of the next octet to read.
  read_idx: usize,
  /// The sink receiving reports about failed operations.
  diag: D,
}

impl RingBuf {
  /// Create a new `RingBuf` backed by a zero initialized heap block of
  /// `capacity` octets.
  ///
  /// The block is released when the buffer is dropped. A capacity of
  /// zero is accepted, but renders every non-empty write a failure.
  pub fn new(capacity: usize) -> Self {
    Self::from_block(vec![0; capacity].into_boxed_slice())
  }
}

impl<S> RingBuf<S>
where
  S: AsRef<[u8]> + AsMut<[u8]>,
{
  /// Create a new `RingBuf` taking ownership of the provided block.
  ///
  /// The buffer's capacity is the length of the block. Any data
  /// contained in the block is not considered stored.
  pub fn from_block(block: S) -> Self {
    let capacity = block.as_ref().len();
    Self::from_parts(block, capacity)
  }

  #[inline]
  fn from_parts(block: S, capacity: usize) -> Self {
    debug_assert!(block.as_ref().len() >= capacity);

    Self {
      block,
      capacity,
      size: 0,
      write_idx: 0,
      read_idx: 0,
      diag: Silent,
    }
  }

  /// Create a new `RingBuf` with a block of at least `capacity` octets
  /// obtained from the provided allocator.
  ///
  /// The buffer's capacity is `capacity`, even if the allocator hands
  /// out a larger block; surplus octets are left unused. A block that
  /// is too small is rejected with [`Error::BlockUnavailable`].
  ///
  /// The allocator is not involved in the buffer's operation beyond
  /// this point.
  pub fn with_allocator<A>(allocator: &mut A, capacity: usize) -> Result<Self>
  where
    A: BlockAllocator<Block = S>,
  {
    let block = allocator.allocate(capacity)?;
    let available = block.as_ref().len();
    if available < capacity {
      return Err(Error::BlockUnavailable {
        requested: capacity,
        available,
      })
    }

    Ok(Self::from_parts(block, capacity))
  }
}

impl<S, D> RingBuf<S, D>
where
  S: AsRef<[u8]> + AsMut<[u8]>,
  D: Diagnostics,
{
  /// Replace the buffer's diagnostics sink.
  pub fn with_diagnostics<E>(self, diag: E) -> RingBuf<S, E>
  where
    E: Diagnostics,
  {
    let Self {
      block,
      capacity,
      size,
      write_idx,
      read_idx,
      diag: _,
    } = self;

    RingBuf {
      block,
      capacity,
      size,
      write_idx,
      read_idx,
      diag,
    }
  }

  /// Retrieve the buffer's diagnostics sink.
  #[inline]
  pub fn diagnostics(&self) -> &D {
    &self.diag
  }

  /// Convert the `RingBuf` into its backing block.
  ///
  /// The block is returned in its entirety, including any octets
  /// beyond the buffer's capacity.
  pub fn into_block(self) -> S {
    self.block
  }

  /// Retrieve the total number of octets the buffer can hold.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// Retrieve the part of the block in use.
  #[inline]
  fn octets(&self) -> &[u8] {
    &self.block.as_ref()[..self.capacity]
  }

  #[inline]
  fn octets_mut(&mut self) -> &mut [u8] {
    &mut self.block.as_mut()[..self.capacity]
  }

  /// Retrieve the number of unread octets stored.
  #[inline]
  pub fn read_available(&self) -> usize {
    self.size
  }

  /// Retrieve the number of octets that can be written before the
  /// buffer is full.
  #[inline]
  pub fn write_available(&self) -> usize {
    self.capacity() - self.size
  }

  /// Check whether the buffer stores no unread octets.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.size == 0
  }

  /// Check whether the buffer has no free space left.
  #[inline]
  pub fn is_full(&self) -> bool {
    self.size == self.capacity()
  }

  /// Retrieve the block offset of the next octet to read.
  #[inline]
  pub fn read_index(&self) -> usize {
    self.read_idx
  }

  /// Retrieve the block offset at which the next written octet will
  /// land.
  #[inline]
  pub fn write_index(&self) -> usize {
    self.write_idx
  }

  /// Discard all stored octets and move both indexes back to the start
  /// of the block.
  ///
  /// The block itself is left untouched.
  #[inline]
  pub fn reset(&mut self) {
    self.size = 0;
    self.write_idx = 0;
    self.read_idx = 0;
  }

  #[cold]
  fn fail<T>(&self, error: Error) -> Result<T> {
    let () = self.diag.report(&error);
    Err(error)
  }

  /// Append all of `data` to the end of the stream.
  ///
  /// The write is all or nothing: if `data` does not fit into the free
  /// space, [`Error::OutOfCapacity`] is returned and nothing is
  /// written.
  pub fn write(&mut self, data: &[u8]) -> Result<()> {
    let count = data.len();
    let available = self.write_available();
    if count > available {
      return self.fail(Error::OutOfCapacity {
        requested: count,
        available,
      })
    }

    if count == 0 {
      return Ok(())
    }

    let capacity = self.capacity();
    let write_idx = self.write_idx;
    let first = count.min(capacity - write_idx);
    let (head, tail) = data.split_at(first);

    let block = self.octets_mut();
    block[write_idx..write_idx + first].copy_from_slice(head);
    block[..tail.len()].copy_from_slice(tail);

    self.write_idx = wrap(write_idx + count, capacity);
    self.size += count;
    Ok(())
  }

  /// Discard `count` octets from the front of the stream.
  ///
  /// [`Error::InsufficientData`] is returned if fewer than `count`
  /// octets are stored.
  pub fn skip(&mut self, count: usize) -> Result<()> {
    let available = self.size;
    if count > available {
      return self.fail(Error::InsufficientData {
        requested: count,
        available,
      })
    }

    self.read_idx = wrap(self.read_idx + count, self.capacity());
    self.size -= count;
    Ok(())
  }

  /// Copy `target.len()` octets starting at block offset `at` into
  /// `target`, wrapping around at the end of the block.
  ///
  /// On success the length of the second run, i.e., the number of
  /// octets copied from the start of the block after wrapping around,
  /// is returned. It is zero if no wrap around occurred.
  ///
  /// This is a raw operation: it does not consider the octets actually
  /// stored and leaves the buffer's state untouched. Copying beyond the
  /// stored region yields whatever the block happens to contain at the
  /// respective offsets, be it stale data from earlier writes or the
  /// block's initial contents. Use [`peek`][RingBuf::peek] to only
  /// inspect stored octets.
  ///
  /// [`Error::InvalidOffset`] is returned if `at` lies beyond the
  /// block's end and [`Error::PeekOverrun`] if more octets are
  /// requested than the block holds.
  pub fn peek_raw(&self, at: usize, target: &mut [u8]) -> Result<usize> {
    let capacity = self.capacity();
    if at > capacity {
      return self.fail(Error::InvalidOffset {
        offset: at,
        capacity,
      })
    }

    let count = target.len();
    if count > capacity {
      return self.fail(Error::PeekOverrun { count, capacity })
    }

    let first = count.min(capacity - at);
    let second = count - first;
    let (head, tail) = target.split_at_mut(first);

    let block = self.octets();
    head.copy_from_slice(&block[at..at + first]);
    tail.copy_from_slice(&block[..second]);
    Ok(second)
  }

  /// Copy the first `target.len()` stored octets into `target` without
  /// consuming them.
  ///
  /// [`Error::InsufficientData`] is returned if fewer octets are
  /// stored.
  pub fn peek(&self, target: &mut [u8]) -> Result<()> {
    let count = target.len();
    let available = self.size;
    if count > available {
      return self.fail(Error::InsufficientData {
        requested: count,
        available,
      })
    }

    let _second = self.peek_raw(self.read_idx, target)?;
    Ok(())
  }

  /// Remove the first `output.len()` octets from the stream, copying
  /// them into `output`.
  ///
  /// [`Error::InsufficientData`] is returned if fewer octets are
  /// stored, in which case `output` is left untouched.
  pub fn read(&mut self, output: &mut [u8]) -> Result<()> {
    let count = output.len();
    let available = self.size;
    if count > available {
      return self.fail(Error::InsufficientData {
        requested: count,
        available,
      })
    }

    let second = self.peek_raw(self.read_idx, output)?;
    self.size -= count;
    self.read_idx = if second > 0 {
      second
    } else {
      wrap(self.read_idx + count, self.capacity())
    };
    Ok(())
  }

  /// Remove the first `count` octets from the stream, returning them.
  ///
  /// [`Error::InsufficientData`] is returned if fewer octets are
  /// stored.
  pub fn read_to_vec(&mut self, count: usize) -> Result<Vec<u8>> {
    let available = self.size;
    if count > available {
      return self.fail(Error::InsufficientData {
        requested: count,
        available,
      })
    }

    let mut output = vec![0; count];
    let () = self.read(&mut output)?;
    Ok(output)
  }

  /// Retrieve an iterator over the stored octets.
  ///
  /// The iterator traverses the octets in the order in which reads
  /// would return them, without consuming anything.
  #[inline]
  pub fn iter(&self) -> RingIter<'_> {
    RingIter::new(self.octets(), self.read_idx, self.size)
  }
}

impl<'b, S, D> IntoIterator for &'b RingBuf<S, D>
where
  S: AsRef<[u8]> + AsMut<[u8]>,
  D: Diagnostics,
{
  type Item = u8;
  type IntoIter = RingIter<'b>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::cell::RefCell;


  /// Check that offsets wrap around correctly.
  #[test]
  fn offset_wrapping() {
    assert_eq!(wrap(0, 8), 0);
    assert_eq!(wrap(7, 8), 7);
    assert_eq!(wrap(8, 8), 0);
    assert_eq!(wrap(15, 8), 7);
    assert_eq!(wrap(0, 0), 0);
  }

  /// Make sure that writes spanning the end of the block are split
  /// into two runs at the right place.
  #[test]
  fn write_runs() {
    let mut buf = RingBuf::new(8);
    let () = buf.write(&[1, 2, 3, 4, 5, 6]).unwrap();
    let () = buf.skip(4).unwrap();
    let () = buf.write(&[7, 8, 9, 10, 11]).unwrap();

    assert_eq!(buf.write_index(), 3);
    assert_eq!(buf.read_index(), 4);
    assert_eq!(&*buf.into_block(), &[9, 10, 11, 4, 5, 6, 7, 8]);
  }

  /// Check that a peek at the very end of the block wraps around
  /// entirely.
  #[test]
  fn peek_raw_at_block_end() {
    let mut buf = RingBuf::new(4);
    let () = buf.write(&[1, 2, 3]).unwrap();

    let mut target = [0; 2];
    let second = buf.peek_raw(4, &mut target).unwrap();
    assert_eq!(second, 2);
    assert_eq!(target, [1, 2]);
  }

  /// Make sure that failures are reported to the diagnostics sink and
  /// successes are not.
  #[test]
  fn failure_reporting() {
    let reports = RefCell::new(Vec::new());
    let mut buf = RingBuf::new(2).with_diagnostics(|error: &Error| {
      reports.borrow_mut().push(*error);
    });

    let () = buf.write(&[1, 2]).unwrap();
    let _err = buf.write(&[3]).unwrap_err();
    let _err = buf.skip(3).unwrap_err();
    let _err = buf.peek_raw(3, &mut []).unwrap_err();
    let _err = buf.peek_raw(0, &mut [0; 3]).unwrap_err();
    let () = buf.read(&mut [0; 2]).unwrap();
    drop(buf);

    assert_eq!(
      reports.into_inner(),
      vec![
        Error::OutOfCapacity {
          requested: 1,
          available: 0,
        },
        Error::InsufficientData {
          requested: 3,
          available: 2,
        },
        Error::InvalidOffset {
          offset: 3,
          capacity: 2,
        },
        Error::PeekOverrun {
          count: 3,
          capacity: 2,
        },
      ]
    );
  }

  /// Check that a zero capacity buffer is usable, if pointless.
  #[test]
  fn zero_capacity() {
    let mut buf = RingBuf::new(0);
    assert!(buf.is_empty());
    assert!(buf.is_full());

    let () = buf.write(&[]).unwrap();
    let () = buf.skip(0).unwrap();
    let () = buf.read(&mut []).unwrap();
    assert_eq!(buf.peek_raw(0, &mut []).unwrap(), 0);
    assert_eq!(
      buf.write(&[1]).unwrap_err(),
      Error::OutOfCapacity {
        requested: 1,
        available: 0,
      }
    );
    assert_eq!(buf.read_index(), 0);
    assert_eq!(buf.write_index(), 0);
  }
}
