// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lazy element-tree parsing for EBML streams, with the Matroska document
//! type as the built-in schema.
//!
//! An [`EbmlReader`] wraps a byte source (file, open handle, or in-memory
//! buffer) and reads one top-level [`Element`] at a time. Scalar values are
//! decoded inline; the children of a master element are materialized on
//! demand through [`Element::next_child`] or all at once through
//! [`Element::populate_children`], always bounded by the content length the
//! master declared. Binary payloads can be left in the stream and fetched
//! later through their saved positions, which keeps large files cheap to
//! walk.
//!
//! ```no_run
//! use ebmltree::EbmlReader;
//!
//! # fn main() -> ebmltree::Result<()> {
//! let mut reader = EbmlReader::open("recording.mkv")?;
//!
//! if let Some(mut head) = reader.read_element(false)? {
//!     head.populate_children(false, false)?;
//!     for doc_type in head.children_by_name("DocType") {
//!         println!("document type: {:?}", doc_type.value());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A reader and the elements hanging off it form a single-threaded unit;
//! parse independent streams with independent readers.

pub use ebmltree_core as core;

mod ebml;
mod element;
mod reader;
pub mod schema;

pub use ebmltree_core::errors::{Error, Result};
pub use ebmltree_core::io::{ByteSource, ReadOnlySource, SourceStream, SourceStreamOptions};

pub use element::{Element, Value};
pub use reader::EbmlReader;
