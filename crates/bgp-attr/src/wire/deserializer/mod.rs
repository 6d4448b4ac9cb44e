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

//! Deserializer for the Link-State TLVs and the path attributes carrying them

pub mod link_state;
pub mod path_attribute;

use crate::iana::UpdateMessageErrorSubCode;
use attrgauze_parse_utils::{located_error, ErrorKindSerdeDeref, ReadablePdu, Span};
use nom::{
    error::ErrorKind,
    number::complete::be_u16,
    IResult, InputTake,
};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Type and Length octets preceding every TLV value
pub const TLV_HEADER_LEN: usize = 4;

#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum TlvParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(ErrorKind),
    /// Less than the four octets of Type and Length are left in the buffer
    TruncatedHeader { found: usize },
    /// The Length field promises more octets than left in the buffer
    TruncatedValue { declared: u16, found: usize },
}

impl TlvParsingError {
    pub const fn sub_code(&self) -> UpdateMessageErrorSubCode {
        UpdateMessageErrorSubCode::AttributeLengthError
    }
}

located_error! {
    LocatedTlvParsingError(TlvParsingError) {
        nom => NomError,
    }
}

/// A TLV envelope sliced out of its container. `value` always holds exactly
/// `length` octets.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Tlv<'a> {
    code: u16,
    length: u16,
    value: Span<'a>,
}

impl<'a> Tlv<'a> {
    pub const fn code(&self) -> u16 {
        self.code
    }

    pub const fn length(&self) -> u16 {
        self.length
    }

    pub const fn value(&self) -> Span<'a> {
        self.value
    }
}

impl<'a> ReadablePdu<'a, LocatedTlvParsingError<'a>> for Tlv<'a> {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, LocatedTlvParsingError<'a>> {
        if buf.len() < TLV_HEADER_LEN {
            return Err(nom::Err::Error(LocatedTlvParsingError::new(
                buf,
                TlvParsingError::TruncatedHeader { found: buf.len() },
            )));
        }
        let (span, code) = be_u16(buf)?;
        let (span, length) = be_u16(span)?;
        if span.len() < length as usize {
            return Err(nom::Err::Error(LocatedTlvParsingError::new(
                span,
                TlvParsingError::TruncatedValue {
                    declared: length,
                    found: span.len(),
                },
            )));
        }
        let (remainder, value) = span.take_split(length as usize);
        Ok((
            remainder,
            Tlv {
                code,
                length,
                value,
            },
        ))
    }
}

/// Lazily walks a buffer of back to back TLVs.
///
/// The iterator stops for good after yielding the first error, a container
/// that can't be fully split into TLVs is malformed as a whole. Cloning the
/// iterator restarts from the clone's current position.
#[derive(Clone, Debug)]
pub struct TlvIter<'a> {
    buf: Span<'a>,
    failed: bool,
}

impl<'a> TlvIter<'a> {
    pub const fn new(buf: Span<'a>) -> Self {
        Self { buf, failed: false }
    }

    /// Octets not consumed yet
    pub const fn remaining(&self) -> Span<'a> {
        self.buf
    }
}

impl<'a> Iterator for TlvIter<'a> {
    type Item = Result<Tlv<'a>, LocatedTlvParsingError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.buf.is_empty() {
            return None;
        }
        match Tlv::from_wire(self.buf) {
            Ok((remainder, tlv)) => {
                self.buf = remainder;
                Some(Ok(tlv))
            }
            Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
                self.failed = true;
                Some(Err(err))
            }
            Err(nom::Err::Incomplete(_)) => {
                self.failed = true;
                Some(Err(LocatedTlvParsingError::new(
                    self.buf,
                    TlvParsingError::NomError(ErrorKind::Complete),
                )))
            }
        }
    }
}

impl FusedIterator for TlvIter<'_> {}
