// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoders for the EBML primitives described by RFC 8794: variable-length
//! integers in both their ID and data-size forms, big-endian integers of
//! 0 to 8 bytes, binary32/binary64 floats, and UTF-8 strings.

use ebmltree_core::errors::{decode_error, unsupported_error, Result};
use ebmltree_core::io::SourceStream;

use crate::schema::{self, SchemaEntry};

pub(crate) fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Reads a variable size integer in its ID form according to RFC 8794 (4).
///
/// The marker bit is part of an element ID, so the result is the exact byte
/// sequence that appeared in the stream, reported as lowercase hex.
pub(crate) fn read_id(stream: &mut SourceStream) -> Result<String> {
    let first = stream.read_byte()?;
    if first == 0x00 {
        return decode_error("ebml: invalid element id");
    }

    let mut bytes = vec![first];
    for _ in 0..first.leading_zeros() {
        bytes.push(stream.read_byte()?);
    }

    Ok(hex_string(&bytes))
}

/// Reads a variable size integer in its data-size form according to
/// RFC 8794 (4): the marker bit is cleared and the remaining bits form a
/// big-endian unsigned integer.
///
/// Returns the total number of bytes consumed along with the value.
pub(crate) fn read_size(stream: &mut SourceStream) -> Result<(usize, u64)> {
    let first = stream.read_byte()?;
    if first == 0x00 {
        return decode_error("ebml: invalid data size");
    }

    let width = first.leading_zeros();
    let len = width as usize + 1;

    // Clear the VINT_MARKER bit.
    let mut value = u64::from(first) ^ (1 << (7 - width));

    for _ in 0..width {
        value = (value << 8) | u64::from(stream.read_byte()?);
    }

    // An all-ones payload declares an element of unknown size.
    if value == (1 << (7 * len as u32)) - 1 {
        return unsupported_error("ebml: unknown-size data size");
    }

    Ok((len, value))
}

/// Reads a big-endian unsigned integer of 0 to 8 bytes.
pub(crate) fn read_uint(stream: &mut SourceStream, len: u64) -> Result<u64> {
    if len > 8 {
        return decode_error("ebml: unsigned integer wider than 8 bytes");
    }

    let mut value = 0u64;
    for _ in 0..len {
        value = (value << 8) | u64::from(stream.read_byte()?);
    }
    Ok(value)
}

/// Reads a big-endian two's-complement signed integer of 0 to 8 bytes.
pub(crate) fn read_sint(stream: &mut SourceStream, len: u64) -> Result<i64> {
    if len > 8 {
        return decode_error("ebml: signed integer wider than 8 bytes");
    }
    if len == 0 {
        return Ok(0);
    }

    let value = read_uint(stream, len)?;

    // Shift the magnitude to the top of the word and arithmetic-shift it back
    // down to extend the sign bit.
    let shift = 64 - 8 * len as u32;
    Ok((value.wrapping_shl(shift) as i64).wrapping_shr(shift))
}

/// Reads an IEEE 754 float of 4 (binary32) or 8 (binary64) bytes. Any other
/// width is malformed.
pub(crate) fn read_float(stream: &mut SourceStream, len: u64) -> Result<f64> {
    match len {
        4 => {
            let mut buf = [0u8; 4];
            stream.read_buf_exact(&mut buf)?;
            Ok(f64::from(f32::from_be_bytes(buf)))
        }
        8 => {
            let mut buf = [0u8; 8];
            stream.read_buf_exact(&mut buf)?;
            Ok(f64::from_be_bytes(buf))
        }
        _ => decode_error("ebml: invalid float length"),
    }
}

/// Reads `len` bytes and decodes them as UTF-8. Malformed sequences are
/// surfaced as errors, never replaced.
pub(crate) fn read_string(stream: &mut SourceStream, len: u64) -> Result<String> {
    let data = stream.read_boxed_slice_exact(len as usize)?;
    match String::from_utf8(data.into_vec()) {
        Ok(string) => Ok(string),
        Err(_) => decode_error("ebml: string is not valid utf-8"),
    }
}

/// Reads `len` bytes holding the ID of another element and resolves it
/// through the schema registry.
pub(crate) fn read_ebml_id(
    stream: &mut SourceStream,
    len: u64,
) -> Result<(String, Option<&'static SchemaEntry>)> {
    let data = stream.read_boxed_slice_exact(len as usize)?;
    let id = hex_string(&data);
    let entry = schema::lookup(&id);
    Ok((id, entry))
}
