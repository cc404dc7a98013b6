// Copyright (C) 2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use crate::Error;


/// A sink for reports about misuse of a ring buffer.
///
/// A ring buffer invokes [`report`][Diagnostics::report] once for every
/// operation that fails, after the outcome has been decided. Reports
/// are purely informational: they cannot influence the buffer's state
/// or the value returned to the caller.
///
/// Reporting happens through a shared reference, as even non-mutating
/// operations such as peeks may fail. Sinks wishing to record reports
/// have to resort to interior mutability.
pub trait Diagnostics {
  /// Report a failed operation.
  #[inline]
  fn report(&self, _error: &Error) {}
}

/// A sink swallowing all reports.
///
/// This is the default for ring buffers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Silent;

impl Diagnostics for Silent {}

impl<F> Diagnostics for F
where
  F: Fn(&Error),
{
  #[inline]
  fn report(&self, error: &Error) {
    self(error)
  }
}


/// A sink forwarding reports to the [`log`] facade at warning level.
#[cfg(feature = "log")]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LogSink;

#[cfg(feature = "log")]
impl Diagnostics for LogSink {
  fn report(&self, error: &Error) {
    log::warn!(target: "octbuf", "{error}");
  }
}
