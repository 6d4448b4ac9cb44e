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

//! Serializer for BGP Path Attributes

use crate::{
    config::CodecFlags,
    path_attribute::*,
    wire::{
        deserializer::path_attribute::{
            EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK, OPTIONAL_PATH_ATTRIBUTE_MASK,
            PARTIAL_PATH_ATTRIBUTE_MASK, TRANSITIVE_PATH_ATTRIBUTE_MASK,
        },
        serializer::link_state::LinkStateTlvWritingError,
    },
};
use attrgauze_parse_utils::{WritablePdu, WritablePduWithOneInput};
use byteorder::{NetworkEndian, WriteBytesExt};
use std::io::Write;

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum PathAttributeWritingError {
    StdIoError(String),
    AsPathError(AsPathWritingError),
    LinkStateError(LinkStateTlvWritingError),
    /// Value doesn't fit in the two octets extended Attribute Length
    ValueTooLong(usize),
}

impl From<std::io::Error> for PathAttributeWritingError {
    fn from(err: std::io::Error) -> Self {
        PathAttributeWritingError::StdIoError(err.to_string())
    }
}

impl From<AsPathWritingError> for PathAttributeWritingError {
    fn from(err: AsPathWritingError) -> Self {
        PathAttributeWritingError::AsPathError(err)
    }
}

impl From<LinkStateTlvWritingError> for PathAttributeWritingError {
    fn from(err: LinkStateTlvWritingError) -> Self {
        PathAttributeWritingError::LinkStateError(err)
    }
}

impl WritablePduWithOneInput<&CodecFlags, PathAttributeWritingError> for PathAttribute {
    /// 1-octet flags + 1-octet type code + 1-octet length
    const BASE_LENGTH: usize = 3;

    fn len(&self, flags: &CodecFlags) -> usize {
        let value_len = self.value().len(flags);
        let extended = self.extended_length() || value_len > u8::MAX as usize;
        Self::BASE_LENGTH + usize::from(extended) + value_len
    }

    fn write<T: Write>(
        &self,
        writer: &mut T,
        flags: &CodecFlags,
    ) -> Result<(), PathAttributeWritingError> {
        let mut value_buf = Vec::with_capacity(self.value().len(flags));
        self.value().write(&mut value_buf, flags)?;
        let extended = self.extended_length() || value_buf.len() > u8::MAX as usize;
        let len = u16::try_from(value_buf.len())
            .map_err(|_| PathAttributeWritingError::ValueTooLong(value_buf.len()))?;

        let mut attributes = 0x00u8;
        if self.optional() {
            attributes |= OPTIONAL_PATH_ATTRIBUTE_MASK;
        }
        if self.transitive() {
            attributes |= TRANSITIVE_PATH_ATTRIBUTE_MASK;
        }
        if self.partial() {
            attributes |= PARTIAL_PATH_ATTRIBUTE_MASK;
        }
        if extended {
            attributes |= EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK;
        }
        writer.write_u8(attributes)?;
        writer.write_u8(self.value().code())?;
        if extended {
            writer.write_u16::<NetworkEndian>(len)?;
        } else {
            writer.write_u8(len as u8)?;
        }
        writer.write_all(&value_buf)?;
        Ok(())
    }
}

/// Writes only the attribute value, without the attribute header
impl WritablePduWithOneInput<&CodecFlags, PathAttributeWritingError> for PathAttributeValue {
    const BASE_LENGTH: usize = 0;

    fn len(&self, flags: &CodecFlags) -> usize {
        let value_len = match self {
            Self::AsPath(value) => value.len(flags.asn4()),
            Self::As4Path(value) => value.len(),
            Self::LinkState(value) => value.len(),
            Self::Unknown { value, .. } => value.len(),
        };
        Self::BASE_LENGTH + value_len
    }

    fn write<T: Write>(
        &self,
        writer: &mut T,
        flags: &CodecFlags,
    ) -> Result<(), PathAttributeWritingError> {
        match self {
            Self::AsPath(value) => value.write(writer, flags.asn4())?,
            Self::As4Path(value) => value.write(writer)?,
            Self::LinkState(value) => value.write(writer)?,
            Self::Unknown { value, .. } => writer.write_all(value)?,
        }
        Ok(())
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum AsPathWritingError {
    StdIoError(String),
    /// A segment can hold at most 255 AS numbers
    TooManyAsNumbers(usize),
    /// AS number that can't be written in two octets
    As2NumberOverflow(u32),
}

impl From<std::io::Error> for AsPathWritingError {
    fn from(err: std::io::Error) -> Self {
        AsPathWritingError::StdIoError(err.to_string())
    }
}

impl WritablePduWithOneInput<bool, AsPathWritingError> for AsPathSegment {
    // one octet length + one more for segment type
    const BASE_LENGTH: usize = 2;

    fn len(&self, asn4: bool) -> usize {
        let as_len = if asn4 { 4 } else { 2 };
        Self::BASE_LENGTH + (self.as_numbers().len() * as_len)
    }

    fn write<T: Write>(&self, writer: &mut T, asn4: bool) -> Result<(), AsPathWritingError> {
        let count = u8::try_from(self.as_numbers().len())
            .map_err(|_| AsPathWritingError::TooManyAsNumbers(self.as_numbers().len()))?;
        if !asn4 {
            if let Some(as_num) = self.as_numbers().iter().find(|x| **x > u16::MAX as u32) {
                return Err(AsPathWritingError::As2NumberOverflow(*as_num));
            }
        }
        writer.write_u8(self.segment_type().into())?;
        writer.write_u8(count)?;
        for as_num in self.as_numbers() {
            if asn4 {
                writer.write_u32::<NetworkEndian>(*as_num)?;
            } else {
                writer.write_u16::<NetworkEndian>(*as_num as u16)?;
            }
        }
        Ok(())
    }
}

/// `asn4` selects between two and four octets AS numbers
impl WritablePduWithOneInput<bool, AsPathWritingError> for AsPath {
    const BASE_LENGTH: usize = 0;

    fn len(&self, asn4: bool) -> usize {
        Self::BASE_LENGTH
            + self
                .segments()
                .iter()
                .map(|segment| segment.len(asn4))
                .sum::<usize>()
    }

    fn write<T: Write>(&self, writer: &mut T, asn4: bool) -> Result<(), AsPathWritingError> {
        for segment in self.segments() {
            segment.write(writer, asn4)?;
        }
        Ok(())
    }
}

impl WritablePdu<AsPathWritingError> for As4Path {
    const BASE_LENGTH: usize = 0;

    fn len(&self) -> usize {
        Self::BASE_LENGTH
            + self
                .segments()
                .iter()
                .map(|segment| segment.len(true))
                .sum::<usize>()
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), AsPathWritingError> {
        for segment in self.segments() {
            segment.write(writer, true)?;
        }
        Ok(())
    }
}
