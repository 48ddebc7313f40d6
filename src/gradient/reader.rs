// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sequential reader over a hex payload.

use crate::error::ParseError;

/// Cursor over a validated hex string, consumed field by field.
#[derive(Debug)]
pub(crate) struct HexReader<'a> {
    payload: &'a str,
    pos: usize,
}

impl<'a> HexReader<'a> {
    /// Creates a reader, rejecting any non-hex character up front.
    pub(crate) fn new(payload: &'a str) -> Result<Self, ParseError> {
        if !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidHex(payload.to_string()));
        }
        Ok(Self { payload, pos: 0 })
    }

    /// Number of hex characters not yet consumed.
    pub(crate) const fn remaining(&self) -> usize {
        self.payload.len() - self.pos
    }

    /// Takes the next `len` hex characters.
    pub(crate) fn take(&mut self, field: &'static str, len: usize) -> Result<&'a str, ParseError> {
        let available = self.remaining();
        if available < len {
            return Err(ParseError::Truncated {
                field,
                needed: len,
                available,
            });
        }
        let chunk = &self.payload[self.pos..self.pos + len];
        self.pos += len;
        Ok(chunk)
    }

    /// Skips `len` hex characters.
    pub(crate) fn skip(&mut self, field: &'static str, len: usize) -> Result<(), ParseError> {
        self.take(field, len).map(|_| ())
    }

    /// Reads one byte.
    pub(crate) fn byte(&mut self, field: &'static str) -> Result<u8, ParseError> {
        let chunk = self.take(field, 2)?;
        u8::from_str_radix(chunk, 16).map_err(|_| ParseError::InvalidHex(chunk.to_string()))
    }

    /// Reads a little-endian 16-bit value.
    pub(crate) fn u16_le(&mut self, field: &'static str) -> Result<u16, ParseError> {
        let low = self.byte(field)?;
        let high = self.byte(field)?;
        Ok(u16::from_le_bytes([low, high]))
    }
}
