// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-width big-endian helpers shared by the attribute codecs.

use crate::Span;
use byteorder::{NetworkEndian, WriteBytesExt};
use nom::{
    error::ParseError,
    number::complete::{be_u16, be_u32},
    IResult,
};
use std::io::Write;

/// Read the whole buffer as a list of big-endian `u16` values.
///
/// A trailing partial chunk is never dropped: it fails with the error raised
/// by the integer parser at the offset of that chunk.
pub fn be_u16_list<'a, E: ParseError<Span<'a>>>(buf: Span<'a>) -> IResult<Span<'a>, Vec<u16>, E> {
    let mut buf = buf;
    let mut ret = Vec::with_capacity(buf.len() / 2);
    while !buf.is_empty() {
        let (tmp, value) = be_u16(buf)?;
        ret.push(value);
        buf = tmp;
    }
    Ok((buf, ret))
}

/// Read the whole buffer as a list of big-endian `u32` values, see
/// [`be_u16_list`].
pub fn be_u32_list<'a, E: ParseError<Span<'a>>>(buf: Span<'a>) -> IResult<Span<'a>, Vec<u32>, E> {
    let mut buf = buf;
    let mut ret = Vec::with_capacity(buf.len() / 4);
    while !buf.is_empty() {
        let (tmp, value) = be_u32(buf)?;
        ret.push(value);
        buf = tmp;
    }
    Ok((buf, ret))
}

#[inline]
pub fn write_be_u16_list<W: Write>(writer: &mut W, values: &[u16]) -> Result<(), std::io::Error> {
    for value in values {
        writer.write_u16::<NetworkEndian>(*value)?;
    }
    Ok(())
}

#[inline]
pub fn write_be_u32_list<W: Write>(writer: &mut W, values: &[u32]) -> Result<(), std::io::Error> {
    for value in values {
        writer.write_u32::<NetworkEndian>(*value)?;
    }
    Ok(())
}

/// Lower-case hex rendering of raw octets, without any prefix
#[inline]
pub fn hex_string(value: &[u8]) -> String {
    hex::encode(value)
}
