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

//! Deserializer for BGP Path Attributes

use crate::{
    config::CodecFlags,
    iana::{PathAttributeType, UpdateMessageErrorSubCode},
    link_state::BgpLsAttribute,
    path_attribute::*,
    registry::TlvRegistry,
    wire::deserializer::link_state::{
        LinkStateTlvParsingError, LocatedLinkStateTlvParsingError,
    },
};
use attrgauze_parse_utils::{
    located_error, parse_into_located, parse_into_located_one_input,
    parse_till_empty_with_one_input, ErrorKindSerdeDeref, ReadablePdu, ReadablePduWithOneInput,
    ReadablePduWithTwoInputs, Span,
};
use nom::{
    error::ErrorKind,
    number::complete::{be_u16, be_u32, be_u8},
    IResult, InputTake,
};
use serde::{Deserialize, Serialize};

pub(crate) const OPTIONAL_PATH_ATTRIBUTE_MASK: u8 = 0x80;
pub(crate) const TRANSITIVE_PATH_ATTRIBUTE_MASK: u8 = 0x40;
pub(crate) const PARTIAL_PATH_ATTRIBUTE_MASK: u8 = 0x20;
pub(crate) const EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK: u8 = 0x10;

/// Segment type and segment length octets
const AS_PATH_SEGMENT_HEADER_LEN: usize = 2;

#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum PathAttributeParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(ErrorKind),
    AsPathError(AsPathParsingError),
    LinkStateError(LinkStateTlvParsingError),
    /// Attribute Length is larger than the octets left in the buffer
    InvalidAttributeLength { declared: usize, found: usize },
    InvalidPathAttribute(InvalidPathAttribute, PathAttributeValue),
}

impl PathAttributeParsingError {
    pub const fn sub_code(&self) -> UpdateMessageErrorSubCode {
        match self {
            Self::NomError(_) | Self::InvalidAttributeLength { .. } => {
                UpdateMessageErrorSubCode::AttributeLengthError
            }
            Self::AsPathError(err) => err.sub_code(),
            Self::LinkStateError(err) => err.sub_code(),
            Self::InvalidPathAttribute(..) => UpdateMessageErrorSubCode::AttributeFlagsError,
        }
    }
}

located_error! {
    LocatedPathAttributeParsingError(PathAttributeParsingError) {
        nom => NomError,
        located => [
            AsPathError(LocatedAsPathParsingError),
            LinkStateError(LocatedLinkStateTlvParsingError),
        ],
    }
}

impl<'a> ReadablePduWithOneInput<'a, &CodecFlags, LocatedPathAttributeParsingError<'a>>
    for PathAttribute
{
    fn from_wire(
        buf: Span<'a>,
        flags: &CodecFlags,
    ) -> IResult<Span<'a>, Self, LocatedPathAttributeParsingError<'a>> {
        let input = buf;
        let (buf, attributes) = be_u8(buf)?;
        let (buf, code) = be_u8(buf)?;
        let optional = attributes & OPTIONAL_PATH_ATTRIBUTE_MASK == OPTIONAL_PATH_ATTRIBUTE_MASK;
        let transitive =
            attributes & TRANSITIVE_PATH_ATTRIBUTE_MASK == TRANSITIVE_PATH_ATTRIBUTE_MASK;
        let partial = attributes & PARTIAL_PATH_ATTRIBUTE_MASK == PARTIAL_PATH_ATTRIBUTE_MASK;
        let extended_length =
            attributes & EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK == EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK;
        let (buf, length) = if extended_length {
            let (buf, length) = be_u16(buf)?;
            (buf, length as usize)
        } else {
            let (buf, length) = be_u8(buf)?;
            (buf, length as usize)
        };
        if buf.len() < length {
            return Err(nom::Err::Error(LocatedPathAttributeParsingError::new(
                buf,
                PathAttributeParsingError::InvalidAttributeLength {
                    declared: length,
                    found: buf.len(),
                },
            )));
        }
        let (remainder, value_buf) = buf.take_split(length);
        let (_, value) = PathAttributeValue::from_wire(value_buf, code, flags)?;
        match PathAttribute::from(optional, transitive, partial, extended_length, value) {
            Ok(attribute) => Ok((remainder, attribute)),
            Err((value, err)) => Err(nom::Err::Error(LocatedPathAttributeParsingError::new(
                input,
                PathAttributeParsingError::InvalidPathAttribute(err, value),
            ))),
        }
    }
}

/// Reads a complete attribute value of the attribute type `code`, without the
/// attribute header.
impl<'a> ReadablePduWithTwoInputs<'a, u8, &CodecFlags, LocatedPathAttributeParsingError<'a>>
    for PathAttributeValue
{
    fn from_wire(
        buf: Span<'a>,
        code: u8,
        flags: &CodecFlags,
    ) -> IResult<Span<'a>, Self, LocatedPathAttributeParsingError<'a>> {
        match PathAttributeType::try_from(code) {
            Ok(PathAttributeType::AsPath) => {
                let (buf, value) = parse_into_located_one_input::<
                    bool,
                    LocatedAsPathParsingError<'a>,
                    LocatedPathAttributeParsingError<'a>,
                    AsPath,
                >(buf, flags.asn4())?;
                Ok((buf, PathAttributeValue::AsPath(value)))
            }
            Ok(PathAttributeType::As4Path) => {
                let (buf, value) = parse_into_located::<
                    LocatedAsPathParsingError<'a>,
                    LocatedPathAttributeParsingError<'a>,
                    As4Path,
                >(buf)?;
                Ok((buf, PathAttributeValue::As4Path(value)))
            }
            Ok(PathAttributeType::BgpLs) => {
                let (buf, value) = parse_into_located_one_input::<
                    &TlvRegistry,
                    LocatedLinkStateTlvParsingError<'a>,
                    LocatedPathAttributeParsingError<'a>,
                    BgpLsAttribute,
                >(buf, TlvRegistry::link_state())?;
                Ok((buf, PathAttributeValue::LinkState(value)))
            }
            Err(_) => {
                let (remainder, value) = buf.take_split(buf.len());
                Ok((
                    remainder,
                    PathAttributeValue::Unknown {
                        code,
                        value: value.fragment().to_vec(),
                    },
                ))
            }
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum AsPathParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(ErrorKind),
    /// Less than the two octets of segment type and length are left
    TruncatedSegmentHeader { found: usize },
    /// Segment length promises more AS numbers than left in the buffer
    InvalidAsPathLength { expecting: usize, found: usize },
    UndefinedAsPathSegmentType(UndefinedAsPathSegmentType),
}

impl AsPathParsingError {
    pub const fn sub_code(&self) -> UpdateMessageErrorSubCode {
        match self {
            Self::UndefinedAsPathSegmentType(_) => UpdateMessageErrorSubCode::MalformedAsPath,
            Self::NomError(_)
            | Self::TruncatedSegmentHeader { .. }
            | Self::InvalidAsPathLength { .. } => UpdateMessageErrorSubCode::AttributeLengthError,
        }
    }
}

located_error! {
    LocatedAsPathParsingError(AsPathParsingError) {
        nom => NomError,
        external => [UndefinedAsPathSegmentType(UndefinedAsPathSegmentType)],
    }
}

/// `asn4` selects between two and four octets AS numbers
impl<'a> ReadablePduWithOneInput<'a, bool, LocatedAsPathParsingError<'a>> for AsPath {
    fn from_wire(
        buf: Span<'a>,
        asn4: bool,
    ) -> IResult<Span<'a>, Self, LocatedAsPathParsingError<'a>> {
        let (buf, segments) = parse_till_empty_with_one_input(buf, asn4)?;
        Ok((buf, Self::new(segments)))
    }
}

/// `AS4_PATH` always carries four octets AS numbers
impl<'a> ReadablePdu<'a, LocatedAsPathParsingError<'a>> for As4Path {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, LocatedAsPathParsingError<'a>> {
        let (buf, segments) = parse_till_empty_with_one_input(buf, true)?;
        Ok((buf, Self::new(segments)))
    }
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedAsPathParsingError<'a>> for AsPathSegment {
    fn from_wire(
        buf: Span<'a>,
        asn4: bool,
    ) -> IResult<Span<'a>, Self, LocatedAsPathParsingError<'a>> {
        if buf.len() < AS_PATH_SEGMENT_HEADER_LEN {
            return Err(nom::Err::Error(LocatedAsPathParsingError::new(
                buf,
                AsPathParsingError::TruncatedSegmentHeader { found: buf.len() },
            )));
        }
        let (buf, segment_type) =
            nom::combinator::map_res(be_u8, AsPathSegmentType::try_from)(buf)?;
        let (buf, count) = be_u8(buf)?;
        let count = count as usize;
        let expecting = if asn4 { count * 4 } else { count * 2 };
        if buf.len() < expecting {
            return Err(nom::Err::Error(LocatedAsPathParsingError::new(
                buf,
                AsPathParsingError::InvalidAsPathLength {
                    expecting,
                    found: buf.len(),
                },
            )));
        }
        let (buf, as_numbers) = if asn4 {
            nom::multi::count(be_u32, count)(buf)?
        } else {
            nom::multi::count(nom::combinator::map(be_u16, u32::from), count)(buf)?
        };
        Ok((buf, AsPathSegment::new(segment_type, as_numbers)))
    }
}
