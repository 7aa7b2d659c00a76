// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cell::RefCell;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

use ebmltree_core::errors::{lifecycle_error, Result};
use ebmltree_core::io::{ByteSource, SourceStream};

use crate::element::Element;

/// `EbmlReader` owns the byte source and hands out top-level elements.
///
/// The reader holds the only strong reference to its [`SourceStream`];
/// elements reference it weakly. Closing the reader therefore closes the
/// underlying source immediately, and any element operation that would still
/// need it fails with a lifecycle error.
pub struct EbmlReader {
    source: Option<Rc<RefCell<SourceStream>>>,
}

impl EbmlReader {
    /// Creates a reader over any [`ByteSource`]. The source is used in
    /// place, not duplicated.
    pub fn new(source: Box<dyn ByteSource>) -> EbmlReader {
        let stream = SourceStream::new(source, Default::default());
        EbmlReader { source: Some(Rc::new(RefCell::new(stream))) }
    }

    /// Opens the file at `path` as a seekable source of raw bytes.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<EbmlReader> {
        let file = File::open(path)?;
        Ok(EbmlReader::new(Box::new(file)))
    }

    /// Creates a reader over an in-memory buffer. Buffers are always
    /// seekable.
    pub fn from_buffer(buf: Vec<u8>) -> EbmlReader {
        EbmlReader::new(Box::new(Cursor::new(buf)))
    }

    /// Returns whether the reader still owns its source.
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Returns whether the underlying source is seekable. A closed reader is
    /// not.
    pub fn is_seekable(&self) -> bool {
        match &self.source {
            Some(source) => source.borrow().is_seekable(),
            None => false,
        }
    }

    /// Closes the underlying source. Elements read from this reader remain
    /// usable except for operations that would touch the stream again.
    pub fn close(&mut self) {
        self.source = None;
    }

    /// Reads the next top-level element at the current stream position.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. With `eager_binary`,
    /// binary payloads are materialized at read time instead of being left
    /// to [`Element::get_value`]; unseekable sources must request this.
    pub fn read_element(&mut self, eager_binary: bool) -> Result<Option<Element>> {
        match &self.source {
            Some(source) => Element::read_from(source, eager_binary),
            None => lifecycle_error("ebml: reader has been closed"),
        }
    }
}
