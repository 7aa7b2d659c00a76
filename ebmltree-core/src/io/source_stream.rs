// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::{Read, Seek, SeekFrom};

use crate::errors::{seek_error, Result, SeekErrorKind};

use super::ByteSource;

/// `SourceStreamOptions` specifies the buffering behaviour of a
/// `SourceStream`.
pub struct SourceStreamOptions {
    /// The length of the scratch buffer used to skip bytes on sources that
    /// cannot seek.
    pub discard_buf_len: usize,
}

impl Default for SourceStreamOptions {
    fn default() -> Self {
        SourceStreamOptions { discard_buf_len: 8 * 1024 }
    }
}

/// `SourceStream` is the positioned reader the parser operates on.
///
/// By using type erasure and dynamic dispatch, `SourceStream` wraps and hides
/// the inner reader from the consumer, allowing any [`ByteSource`] to be used
/// generically, selectable at runtime.
///
/// The stream tracks the absolute number of bytes consumed so that element
/// and data offsets can be recorded and, on seekable sources, returned to
/// later. A single byte of lookahead backs [`SourceStream::is_eof`], which
/// must also work on pipes and other unseekable inputs.
pub struct SourceStream {
    /// The source reader.
    inner: Box<dyn ByteSource>,
    /// Whether the inner source reported itself seekable at construction.
    seekable: bool,
    /// Absolute position of the next unconsumed byte.
    pos: u64,
    /// Lookahead byte fetched by `is_eof` but not yet consumed.
    peeked: Option<u8>,
    /// Scratch buffer for read-and-discard skips.
    discard: Box<[u8]>,
}

impl SourceStream {
    pub fn new(mut inner: Box<dyn ByteSource>, options: SourceStreamOptions) -> SourceStream {
        let seekable = inner.is_seekable();

        // Adopted handles may already be advanced. Recorded positions must
        // agree with the offsets the inner source seeks by, so start counting
        // from the handle's current offset when it can be queried.
        let pos = if seekable { inner.stream_position().unwrap_or(0) } else { 0 };

        SourceStream {
            inner,
            seekable,
            pos,
            peeked: None,
            discard: vec![0u8; options.discard_buf_len.max(1)].into_boxed_slice(),
        }
    }

    /// Consumes and returns the next byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        if let Some(byte) = self.peeked.take() {
            self.pos += 1;
            return Ok(byte);
        }

        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        self.pos += 1;
        Ok(buf[0])
    }

    /// Fills `buf` completely, failing if the stream ends first.
    pub fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }

        let mut start = 0;
        if let Some(byte) = self.peeked.take() {
            buf[0] = byte;
            self.pos += 1;
            start = 1;
        }

        self.inner.read_exact(&mut buf[start..])?;
        self.pos += (buf.len() - start) as u64;
        Ok(())
    }

    /// Reads exactly `len` bytes into a freshly allocated boxed slice.
    pub fn read_boxed_slice_exact(&mut self, len: usize) -> Result<Box<[u8]>> {
        let mut buf = vec![0u8; len];
        self.read_buf_exact(&mut buf)?;
        Ok(buf.into_boxed_slice())
    }

    /// Advances the stream by `count` bytes.
    ///
    /// Seekable sources are repositioned directly; unseekable sources read
    /// into the scratch buffer and discard.
    pub fn ignore_bytes(&mut self, mut count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }

        if self.seekable {
            let target = self.pos + count;
            return self.seek(target);
        }

        if self.peeked.take().is_some() {
            self.pos += 1;
            count -= 1;
        }

        while count > 0 {
            let len = count.min(self.discard.len() as u64) as usize;
            self.inner.read_exact(&mut self.discard[..len])?;
            self.pos += len as u64;
            count -= len as u64;
        }
        Ok(())
    }

    /// Returns whether the stream is exhausted.
    ///
    /// Probing may fetch (and hold) one byte of lookahead; the logical
    /// position is unaffected.
    pub fn is_eof(&mut self) -> Result<bool> {
        if self.peeked.is_some() {
            return Ok(false);
        }

        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(true),
                Ok(_) => {
                    self.peeked = Some(buf[0]);
                    return Ok(false);
                }
                Err(ref err) if err.kind() == std::io::ErrorKind::Interrupted => (),
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Gets the absolute position of the stream, or `None` when the source is
    /// unseekable and saved positions would be unusable.
    pub fn pos(&self) -> Option<u64> {
        if self.seekable {
            Some(self.pos)
        }
        else {
            None
        }
    }

    /// Seeks to the given absolute position.
    ///
    /// The landing offset reported by the source is verified against the
    /// requested position; a mismatch fails with
    /// [`SeekErrorKind::Inconsistent`].
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        if !self.seekable {
            return seek_error(SeekErrorKind::Unseekable);
        }

        self.peeked = None;

        let landed = self.inner.seek(SeekFrom::Start(pos))?;
        if landed != pos {
            log::warn!("seek to {} landed at {}", pos, landed);
            return seek_error(SeekErrorKind::Inconsistent);
        }

        self.pos = pos;
        Ok(())
    }

    /// Returns if the underlying source is seekable.
    pub fn is_seekable(&self) -> bool {
        self.seekable
    }

    /// Returns the length in bytes of the underlying source, if available.
    pub fn byte_len(&self) -> Option<u64> {
        self.inner.byte_len()
    }
}
