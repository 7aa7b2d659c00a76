// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `element` module implements the parsed element and its lazy child
//! iteration.
//!
//! An [`Element`] is one `(ID, size, content)` triple read from the stream.
//! Scalar content is decoded at read time; master content is realized
//! incrementally through [`Element::next_child`], which charges every child
//! against the byte budget the master declared.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ebmltree_core::errors::{
    decode_error, end_of_stream_error, lifecycle_error, seek_error, Result, SeekErrorKind,
};
use ebmltree_core::io::SourceStream;

use crate::ebml;
use crate::schema::{self, SchemaEntry, ValueType};

/// The decoded content of an element.
#[derive(Debug)]
pub enum Value {
    /// No decoded content: unknown or `Skip` typed elements, and binary
    /// elements that were not materialized.
    None,
    /// An unsigned integer.
    Uint(u64),
    /// A signed integer.
    Sint(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A binary buffer.
    Binary(Box<[u8]>),
    /// The ID of another element, with its registry entry when known.
    EbmlId { id: String, entry: Option<&'static SchemaEntry> },
    /// The children materialized so far for a master element.
    Children(Vec<Element>),
}

/// One parsed element.
///
/// Elements reference their reader's stream weakly: once the reader is
/// closed, operations that would touch the stream fail with a lifecycle
/// error instead of keeping the source alive.
#[derive(Debug)]
pub struct Element {
    source: Weak<RefCell<SourceStream>>,
    id: String,
    entry: Option<&'static SchemaEntry>,
    size_len: usize,
    content_len: u64,
    depth: u32,
    elem_pos: Option<u64>,
    data_pos: Option<u64>,
    value: Value,
    /// Content bytes not yet consumed by children. `None` until the first
    /// child is read.
    remaining: Option<u64>,
    /// Bytes consumed by previously read children, relative to `data_pos`.
    pos_offset: u64,
    all_children_read: bool,
    child_cursor: usize,
}

impl Element {
    /// Reads one element header from the current stream position, decoding
    /// scalar content inline. Master content is left untouched.
    ///
    /// Returns `Ok(None)` when the stream is already exhausted.
    pub(crate) fn read_from(
        source: &Rc<RefCell<SourceStream>>,
        eager_binary: bool,
    ) -> Result<Option<Element>> {
        let mut stream = source.borrow_mut();

        if stream.is_eof()? {
            return Ok(None);
        }

        let elem_pos = stream.pos();
        let id = ebml::read_id(&mut stream)?;
        let entry = schema::lookup(&id);
        let (size_len, content_len) = ebml::read_size(&mut stream)?;
        let data_pos = stream.pos();

        let value = match entry.map(|e| e.value_type) {
            Some(ValueType::Master) => Value::Children(Vec::new()),
            Some(ValueType::Uint) => Value::Uint(ebml::read_uint(&mut stream, content_len)?),
            Some(ValueType::Sint) => Value::Sint(ebml::read_sint(&mut stream, content_len)?),
            Some(ValueType::Float) => Value::Float(ebml::read_float(&mut stream, content_len)?),
            Some(ValueType::Str) => Value::Str(ebml::read_string(&mut stream, content_len)?),
            Some(ValueType::EbmlId) => {
                let (id, entry) = ebml::read_ebml_id(&mut stream, content_len)?;
                Value::EbmlId { id, entry }
            }
            Some(ValueType::Binary) if eager_binary => {
                Value::Binary(stream.read_boxed_slice_exact(content_len as usize)?)
            }
            Some(ValueType::Binary) | Some(ValueType::Skip) => {
                stream.ignore_bytes(content_len)?;
                Value::None
            }
            None => {
                log::debug!("skipping unknown element {} ({} content bytes)", id, content_len);
                stream.ignore_bytes(content_len)?;
                Value::None
            }
        };

        if let Some(entry) = entry {
            log::debug!("read element {} ({} content bytes)", entry.name, content_len);
        }

        drop(stream);

        Ok(Some(Element {
            source: Rc::downgrade(source),
            id,
            entry,
            size_len,
            content_len,
            depth: 0,
            elem_pos,
            data_pos,
            value,
            remaining: None,
            pos_offset: 0,
            all_children_read: false,
            child_cursor: 0,
        }))
    }

    /// The element ID as it appeared in the stream, in lowercase hex.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The element name, when the ID is known to the schema.
    pub fn name(&self) -> Option<&'static str> {
        self.entry.map(|e| e.name)
    }

    /// The element's value type, when the ID is known to the schema.
    pub fn value_type(&self) -> Option<ValueType> {
        self.entry.map(|e| e.value_type)
    }

    /// The registry entry for the element's ID, when known.
    pub fn schema_entry(&self) -> Option<&'static SchemaEntry> {
        self.entry
    }

    /// The number of bytes the ID occupied in the stream.
    pub fn id_len(&self) -> usize {
        self.id.len() / 2
    }

    /// The number of bytes the size field occupied in the stream.
    pub fn size_len(&self) -> usize {
        self.size_len
    }

    /// The declared number of content bytes.
    pub fn content_len(&self) -> u64 {
        self.content_len
    }

    /// The total on-disk footprint of the element: ID, size field, and
    /// content.
    pub fn full_len(&self) -> u64 {
        (self.id_len() + self.size_len) as u64 + self.content_len
    }

    /// Zero for elements read at the top level; children sit one below their
    /// parent.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The stream offset of the first header byte, when the source tracks
    /// positions.
    pub fn elem_pos(&self) -> Option<u64> {
        self.elem_pos
    }

    /// The stream offset of the first content byte, when the source tracks
    /// positions.
    pub fn data_pos(&self) -> Option<u64> {
        self.data_pos
    }

    /// The decoded content.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns whether this element is a master (a container of further
    /// elements).
    pub fn is_master(&self) -> bool {
        matches!(self.value_type(), Some(ValueType::Master))
    }

    /// The children materialized so far. Empty for non-masters and for
    /// masters that have not been iterated.
    pub fn children(&self) -> &[Element] {
        match &self.value {
            Value::Children(children) => children,
            _ => &[],
        }
    }

    /// The element name when known, otherwise its hex ID.
    fn label(&self) -> &str {
        self.name().unwrap_or(&self.id)
    }

    /// Reads or replays the next child of this master element.
    ///
    /// While the master's content has not been fully consumed, each call
    /// reads one child from the stream, charges it against the declared
    /// content length, and appends it to the child vector. Once every child
    /// has been read, iteration switches to replaying the stored vector;
    /// reaching its end yields `None` once and then restarts from the first
    /// child, so repeated scans need no explicit rewind.
    ///
    /// On seekable sources the stream is repositioned before every read, so
    /// interleaved traversals of *other* subtrees cannot corrupt this one.
    /// Unseekable sources rely on children being consumed contiguously.
    pub fn next_child(&mut self, eager_binary: bool) -> Result<Option<&mut Element>> {
        if !self.is_master() {
            return lifecycle_error("ebml: next_child on a non-container element");
        }

        if self.all_children_read {
            let index = self.child_cursor;
            let children = match &mut self.value {
                Value::Children(children) => children,
                _ => return lifecycle_error("ebml: next_child on a non-container element"),
            };

            if index >= children.len() {
                self.child_cursor = 0;
                return Ok(None);
            }

            self.child_cursor += 1;
            return Ok(children.get_mut(index));
        }

        let remaining = self.remaining.unwrap_or(self.content_len);
        if remaining == 0 {
            self.all_children_read = true;
            self.child_cursor = 0;
            return Ok(None);
        }

        let source = match self.source.upgrade() {
            Some(source) => source,
            None => return lifecycle_error("ebml: reader has been closed"),
        };

        {
            let mut stream = source.borrow_mut();
            if stream.is_seekable() {
                if let Some(data_pos) = self.data_pos {
                    stream.seek(data_pos + self.pos_offset)?;
                }
            }
        }

        let mut child = match Element::read_from(&source, eager_binary)? {
            Some(child) => child,
            // The master promised more content than the stream holds.
            None => return end_of_stream_error(),
        };

        let child_len = child.full_len();
        if child_len > remaining {
            log::warn!(
                "child {} overruns container {} by {} bytes",
                child.label(),
                self.label(),
                child_len - remaining
            );
            return decode_error("ebml: child element overruns its container");
        }

        self.remaining = Some(remaining - child_len);
        self.pos_offset += child_len;
        child.depth = self.depth + 1;

        match &mut self.value {
            Value::Children(children) => {
                children.push(child);
                Ok(children.last_mut())
            }
            _ => lifecycle_error("ebml: next_child on a non-container element"),
        }
    }

    /// Materializes every remaining child of this master, and with `recurse`
    /// the entire subtree.
    ///
    /// Recursion is depth-first: a master child is fully populated before
    /// its next sibling is read, which keeps unseekable sources consuming
    /// contiguous bytes. Non-masters are left untouched.
    pub fn populate_children(&mut self, recurse: bool, eager_binary: bool) -> Result<()> {
        if !self.is_master() {
            return Ok(());
        }

        while let Some(child) = self.next_child(eager_binary)? {
            if recurse && child.is_master() {
                child.populate_children(true, eager_binary)?;
            }
        }
        Ok(())
    }

    /// All materialized children carrying the given schema name.
    ///
    /// Only children already in the child vector are considered; on a master
    /// that has not been populated this returns nothing rather than forcing
    /// reads on a possibly unseekable stream.
    pub fn children_by_name(&self, name: &str) -> Vec<&Element> {
        self.children().iter().filter(|child| child.name() == Some(name)).collect()
    }

    /// Fetches the payload of a binary element.
    ///
    /// A payload already held (from an eager read or a previous `keep`) is
    /// returned directly. Otherwise the payload is re-read through the saved
    /// content position, which requires a live reader and a seekable source;
    /// `keep` stores the bytes on the element for later calls.
    pub fn get_value(&mut self, keep: bool) -> Result<Box<[u8]>> {
        if let Value::Binary(data) = &self.value {
            return Ok(data.clone());
        }

        if self.value_type() != Some(ValueType::Binary) {
            return lifecycle_error("ebml: get_value on a non-binary element");
        }

        let data_pos = match self.data_pos {
            Some(data_pos) => data_pos,
            None => return seek_error(SeekErrorKind::Unseekable),
        };

        let source = match self.source.upgrade() {
            Some(source) => source,
            None => return lifecycle_error("ebml: reader has been closed"),
        };

        let mut stream = source.borrow_mut();
        stream.seek(data_pos)?;
        let data = stream.read_boxed_slice_exact(self.content_len as usize)?;
        drop(stream);

        if keep {
            self.value = Value::Binary(data.clone());
        }

        Ok(data)
    }

    /// Advances the stream past this element's content.
    ///
    /// Only legal while the stream still sits at the first content byte,
    /// i.e. immediately after the element was read and before anything else
    /// moved the source. On sources without position tracking the
    /// precondition cannot be checked and the content is discarded by
    /// reading.
    pub fn skip(&mut self) -> Result<()> {
        let source = match self.source.upgrade() {
            Some(source) => source,
            None => return lifecycle_error("ebml: reader has been closed"),
        };

        let mut stream = source.borrow_mut();

        if let (Some(pos), Some(data_pos)) = (stream.pos(), self.data_pos) {
            if pos != data_pos {
                return lifecycle_error("ebml: source has moved past the element header");
            }
        }

        stream.ignore_bytes(self.content_len)?;
        drop(stream);

        self.remaining = Some(0);
        self.all_children_read = true;
        Ok(())
    }
}
