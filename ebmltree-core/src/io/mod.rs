// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input plumbing: the [`ByteSource`] trait describing what the parser needs
//! from its input, adapters for the standard kinds of input, and
//! [`SourceStream`], the positioned reader everything above this module
//! consumes.

use std::io;

mod source_stream;

pub use source_stream::{SourceStream, SourceStreamOptions};

/// A byte stream the parser can read from and, when the underlying object
/// supports it, reposition.
///
/// `ByteSource` extends [`std::io::Read`] and [`std::io::Seek`] with two
/// runtime queries. Requiring `Seek` of every implementor keeps the trait
/// object uniform; inputs that cannot actually seek (pipes, sockets) say so
/// through [`ByteSource::is_seekable`], fail any `seek` call, and are served
/// by the parser's forward-only code paths instead.
pub trait ByteSource: io::Read + io::Seek {
    /// Whether `seek` can be relied on. A [`SourceStream`] asks once, when it
    /// adopts the source, and disables position tracking for the lifetime of
    /// the stream if the answer is no.
    fn is_seekable(&self) -> bool;

    /// The total size of the stream in bytes, where the source knows it.
    fn byte_len(&self) -> Option<u64>;
}

impl ByteSource for std::fs::File {
    fn is_seekable(&self) -> bool {
        // An open `File` may really be a FIFO or a device node, which accept
        // seek calls without honoring them. Element positions recorded by the
        // stream are only trustworthy on a regular file.
        self.metadata().map_or(false, |m| m.is_file())
    }

    fn byte_len(&self) -> Option<u64> {
        match self.metadata() {
            Ok(m) if m.is_file() => Some(m.len()),
            _ => None,
        }
    }
}

impl<T: AsRef<[u8]>> ByteSource for io::Cursor<T> {
    fn is_seekable(&self) -> bool {
        // Memory repositions for free.
        true
    }

    fn byte_len(&self) -> Option<u64> {
        Some(self.get_ref().as_ref().len() as u64)
    }
}

/// Treats any [`std::io::Read`] implementor as a [`ByteSource`] that never
/// seeks.
///
/// This is the adapter for feeding a pipe, socket, or other forward-only
/// input to the parser. Everything position-dependent is disabled
/// downstream: the stream reports no positions, and callers are expected to
/// stay on the eager reading paths.
pub struct ReadOnlySource<R: io::Read> {
    inner: R,
}

impl<R: io::Read> ReadOnlySource<R> {
    /// Wraps `inner`, taking ownership of it.
    pub fn new(inner: R) -> Self {
        ReadOnlySource { inner }
    }

    /// Releases the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteSource for ReadOnlySource<R> {
    fn is_seekable(&self) -> bool {
        false
    }

    fn byte_len(&self) -> Option<u64> {
        None
    }
}

impl<R: io::Read> io::Read for ReadOnlySource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: io::Read> io::Seek for ReadOnlySource<R> {
    fn seek(&mut self, _: io::SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "read-only source"))
    }
}
