// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error and result types shared by the EbmlTree crates.
//!
//! Every fallible operation in the reader stack returns [`Result`]. The
//! [`Error`] variants keep the failure classes apart so callers can react to
//! a truncated stream differently from malformed data, and to both
//! differently from a misused reader. Nothing here attempts recovery: after
//! any error other than [`Error::EndOfStream`] the stream position is
//! unspecified and the reader should be discarded.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::result;

/// The ways a seek can go wrong.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SeekErrorKind {
    /// The source has no usable seek capability.
    Unseekable,
    /// The seek completed but the source settled at an offset other than the
    /// one requested.
    Inconsistent,
}

impl fmt::Display for SeekErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeekErrorKind::Unseekable => f.write_str("the source cannot seek"),
            SeekErrorKind::Inconsistent => f.write_str("the source settled at the wrong offset"),
        }
    }
}

/// Everything that can go wrong while reading an EBML stream.
#[derive(Debug)]
pub enum Error {
    /// The underlying source failed while being read or repositioned.
    IoError(io::Error),
    /// The source ran out of bytes in the middle of a structural read.
    /// Running out *between* top-level elements is not an error; reading an
    /// element there yields `None` instead.
    EndOfStream,
    /// The bytes read do not form valid EBML.
    DecodeError(&'static str),
    /// A reposition was needed but could not be carried out faithfully.
    SeekError(SeekErrorKind),
    /// The stream declared a construct this parser deliberately does not
    /// handle.
    Unsupported(&'static str),
    /// An operation arrived outside its legal window, e.g. through a reader
    /// that has already been closed.
    LifecycleError(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IoError(err) => write!(f, "source i/o failed: {}", err),
            Error::EndOfStream => f.write_str("stream ended inside a structural read"),
            Error::DecodeError(msg) => write!(f, "{}", msg),
            Error::SeekError(kind) => write!(f, "{}", kind),
            Error::Unsupported(what) => write!(f, "not supported: {}", what),
            Error::LifecycleError(msg) => write!(f, "{}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::EndOfStream,
            _ => Error::IoError(err),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Shorthand for failing with a [`Error::DecodeError`].
pub fn decode_error<T>(msg: &'static str) -> Result<T> {
    Err(Error::DecodeError(msg))
}

/// Shorthand for failing with a [`Error::SeekError`] of the given kind.
pub fn seek_error<T>(kind: SeekErrorKind) -> Result<T> {
    Err(Error::SeekError(kind))
}

/// Shorthand for failing with [`Error::Unsupported`].
pub fn unsupported_error<T>(what: &'static str) -> Result<T> {
    Err(Error::Unsupported(what))
}

/// Shorthand for failing with a [`Error::LifecycleError`].
pub fn lifecycle_error<T>(msg: &'static str) -> Result<T> {
    Err(Error::LifecycleError(msg))
}

/// Shorthand for failing with [`Error::EndOfStream`].
pub fn end_of_stream_error<T>() -> Result<T> {
    Err(Error::EndOfStream)
}
