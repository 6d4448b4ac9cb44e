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

//! Serializer for the Link-State TLVs and the path attributes carrying them

pub mod link_state;
pub mod path_attribute;

use crate::wire::deserializer::TLV_HEADER_LEN;
use byteorder::{NetworkEndian, WriteBytesExt};
use std::io::Write;

/// Write a TLV header.
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |              Type             |             Length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `value_length` doesn't include the length of the "Type" and "Length"
/// fields.
#[inline]
pub fn write_tlv_header<T: Write>(
    writer: &mut T,
    tlv_type: u16,
    value_length: u16,
) -> Result<(), std::io::Error> {
    writer.write_u16::<NetworkEndian>(tlv_type)?;
    writer.write_u16::<NetworkEndian>(value_length)?;
    Ok(())
}

/// Length of a TLV once written with its header
#[inline]
pub const fn tlv_len(value_length: usize) -> usize {
    TLV_HEADER_LEN + value_length
}
