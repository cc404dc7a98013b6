// Copyright (C) 2020-2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! A fixed-capacity ring buffer for octet streams.
//!
//! A [`RingBuf`] owns a single block of octets for its entire lifetime
//! and never grows beyond it. It is meant as a building block beneath
//! streaming protocols, where steady state operation should not
//! allocate.
//!
//! ```
//! use octbuf::RingBuf;
//!
//! let mut buf = RingBuf::new(1024);
//! let () = buf.write(b"hello\0").unwrap();
//!
//! let mut out = [0; 6];
//! let () = buf.read(&mut out).unwrap();
//! assert_eq!(&out, b"hello\0");
//! assert_eq!(buf.read_available(), 0);
//! assert_eq!(buf.write_available(), 1024);
//! ```
//!
//! Backing blocks may also be obtained from a [`BlockAllocator`], for
//! example an [`Arena`] carving them out of a region owned elsewhere:
//! ```
//! use octbuf::Arena;
//! use octbuf::RingBuf;
//!
//! let mut region = [0; 64];
//! let mut arena = Arena::new(&mut region);
//! let mut rx = RingBuf::with_allocator(&mut arena, 48).unwrap();
//! let mut tx = RingBuf::with_allocator(&mut arena, 16).unwrap();
//!
//! let () = rx.write(b"frame").unwrap();
//! let () = tx.write(&rx.read_to_vec(5).unwrap()).unwrap();
//! assert_eq!(tx.iter().collect::<Vec<_>>(), b"frame");
//! ```

mod alloc;
mod diag;
mod error;
mod iter;
mod ring;

pub use crate::alloc::Arena;
pub use crate::alloc::BlockAllocator;
pub use crate::alloc::Heap;
#[cfg(feature = "log")]
pub use crate::diag::LogSink;
pub use crate::diag::Diagnostics;
pub use crate::diag::Silent;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::iter::RingIter;
pub use crate::ring::RingBuf;
