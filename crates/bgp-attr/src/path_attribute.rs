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

//! Contains the definitions of the [`PathAttribute`] values handled by this
//! crate: `AS_PATH`, `AS4_PATH` and the BGP Link-State attribute.

use crate::{iana::PathAttributeType, link_state::BgpLsAttribute};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum_macros::{Display, FromRepr};

/// General properties to check the validity of a given path attribute value
pub trait PathAttributeValueProperties {
    /// Check the validity of the `optional` bit in the [`PathAttribute`]:
    ///  - `Some(true)` optional must be set to `true`.
    ///  - `Some(false)` optional must be set to `false`.
    ///  - `None` optional can be set to either `true` or `false`.
    fn can_be_optional() -> Option<bool>;

    /// Check the validity of the `transitive` bit in the [`PathAttribute`]:
    ///  - `Some(true)` transitive must be set to `true`.
    ///  - `Some(false)` transitive must be set to `false`.
    ///  - `None` transitive can be set to either `true` or `false`.
    fn can_be_transitive() -> Option<bool>;

    /// Check the validity of the `partial` bit in the [`PathAttribute`]:
    ///  - `Some(true)` partial must be set to `true`.
    ///  - `Some(false)` partial must be set to `false`.
    ///  - `None` partial can be set to either `true` or `false`.
    fn can_be_partial() -> Option<bool>;
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum InvalidPathAttribute {
    InvalidOptionalFlagValue(bool),
    InvalidTransitiveFlagValue(bool),
    InvalidPartialFlagValue(bool),
}

/// Path Attribute
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attr. Flags  |Attr. Type Code| Path value (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct PathAttribute {
    /// Optional bit defines whether the attribute is optional (if set to
    /// `true`) or well-known (if set to `false`).
    optional: bool,

    /// Transitive bit defines whether an optional attribute is transitive (if
    /// set to `true`) or non-transitive (if set to `false`). For well-known
    /// attributes, the Transitive bit MUST be set to `true`.
    transitive: bool,
    partial: bool,
    extended_length: bool,
    value: PathAttributeValue,
}

impl PathAttribute {
    pub fn from(
        optional: bool,
        transitive: bool,
        partial: bool,
        extended_length: bool,
        value: PathAttributeValue,
    ) -> Result<PathAttribute, (PathAttributeValue, InvalidPathAttribute)> {
        if value
            .can_be_optional()
            .map(|x| x != optional)
            .unwrap_or(false)
        {
            return Err((
                value,
                InvalidPathAttribute::InvalidOptionalFlagValue(optional),
            ));
        }
        if value
            .can_be_transitive()
            .map(|x| x != transitive)
            .unwrap_or(false)
        {
            return Err((
                value,
                InvalidPathAttribute::InvalidTransitiveFlagValue(transitive),
            ));
        }
        if value
            .can_be_partial()
            .map(|x| x != partial)
            .unwrap_or(false)
        {
            return Err((
                value,
                InvalidPathAttribute::InvalidPartialFlagValue(partial),
            ));
        }

        Ok(PathAttribute {
            optional,
            transitive,
            partial,
            extended_length,
            value,
        })
    }

    /// Wrap a value with the flags its attribute type mandates. Attributes of
    /// unknown type are marked optional transitive.
    pub fn with_default_flags(value: PathAttributeValue) -> PathAttribute {
        let optional = value.can_be_optional().unwrap_or(true);
        let transitive = value.can_be_transitive().unwrap_or(true);
        PathAttribute {
            optional,
            transitive,
            partial: false,
            extended_length: false,
            value,
        }
    }

    pub const fn value(&self) -> &PathAttributeValue {
        &self.value
    }

    pub fn into_value(self) -> PathAttributeValue {
        self.value
    }

    pub const fn optional(&self) -> bool {
        self.optional
    }

    /// Partial bit defines whether the information contained in the optional
    /// transitive attribute is partial (if set to `true`) or complete (if
    /// set to `false`).
    ///
    /// For well-known attributes and for optional non-transitive attributes,
    /// the Partial bit MUST be set to `false`.
    pub const fn partial(&self) -> bool {
        self.partial
    }

    pub const fn transitive(&self) -> bool {
        self.transitive
    }

    /// Extended Length bit defines whether the Attribute Length is one octet
    /// (if set to `false`) or two octets (if set to `true`). The writer sets
    /// it regardless when the value doesn't fit in one octet.
    pub const fn extended_length(&self) -> bool {
        self.extended_length
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum PathAttributeValue {
    AsPath(AsPath),
    As4Path(As4Path),
    LinkState(BgpLsAttribute),
    /// Attribute type without a semantic decoder, kept as raw octets
    Unknown { code: u8, value: Vec<u8> },
}

impl PathAttributeValue {
    pub const fn code(&self) -> u8 {
        match self {
            Self::AsPath(_) => PathAttributeType::AsPath as u8,
            Self::As4Path(_) => PathAttributeType::As4Path as u8,
            Self::LinkState(_) => PathAttributeType::BgpLs as u8,
            Self::Unknown { code, .. } => *code,
        }
    }

    /// Name attached to the decoded value at the session boundary. Unknown
    /// attributes are named by their numeric code.
    pub fn display_name(&self) -> Cow<'static, str> {
        match self {
            Self::AsPath(_) => Cow::Borrowed("as_path"),
            Self::As4Path(_) => Cow::Borrowed("as4_path"),
            Self::LinkState(_) => Cow::Borrowed("link_state"),
            Self::Unknown { code, .. } => Cow::Owned(code.to_string()),
        }
    }

    pub fn can_be_optional(&self) -> Option<bool> {
        match self {
            Self::AsPath(_) => AsPath::can_be_optional(),
            Self::As4Path(_) => As4Path::can_be_optional(),
            Self::LinkState(_) => BgpLsAttribute::can_be_optional(),
            Self::Unknown { .. } => None,
        }
    }

    pub fn can_be_transitive(&self) -> Option<bool> {
        match self {
            Self::AsPath(_) => AsPath::can_be_transitive(),
            Self::As4Path(_) => As4Path::can_be_transitive(),
            Self::LinkState(_) => BgpLsAttribute::can_be_transitive(),
            Self::Unknown { .. } => None,
        }
    }

    pub fn can_be_partial(&self) -> Option<bool> {
        match self {
            Self::AsPath(_) => AsPath::can_be_partial(),
            Self::As4Path(_) => As4Path::can_be_partial(),
            Self::LinkState(_) => BgpLsAttribute::can_be_partial(),
            Self::Unknown { .. } => None,
        }
    }
}

/// `AS_PATH` is a well-known mandatory attribute that is composed
/// of a sequence of AS path segments.
///
/// The width of the AS numbers on the wire (two or four octets) is not part
/// of the value, it is decided by the negotiated capabilities of the session
/// when reading or writing.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct AsPath {
    segments: Vec<AsPathSegment>,
}

impl AsPath {
    pub const fn new(segments: Vec<AsPathSegment>) -> Self {
        Self { segments }
    }

    pub const fn segments(&self) -> &Vec<AsPathSegment> {
        &self.segments
    }
}

impl PathAttributeValueProperties for AsPath {
    fn can_be_optional() -> Option<bool> {
        Some(false)
    }

    fn can_be_transitive() -> Option<bool> {
        Some(true)
    }

    fn can_be_partial() -> Option<bool> {
        Some(false)
    }
}

/// `AS4_PATH` carries the full four-octet AS path alongside a two-octet
/// `AS_PATH` when talking to a NEW BGP speaker through an OLD one, see
/// [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793).
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct As4Path {
    segments: Vec<AsPathSegment>,
}

impl As4Path {
    pub const fn new(segments: Vec<AsPathSegment>) -> Self {
        Self { segments }
    }

    pub const fn segments(&self) -> &Vec<AsPathSegment> {
        &self.segments
    }
}

impl PathAttributeValueProperties for As4Path {
    fn can_be_optional() -> Option<bool> {
        Some(true)
    }

    fn can_be_transitive() -> Option<bool> {
        Some(true)
    }

    fn can_be_partial() -> Option<bool> {
        None
    }
}

/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  segment type | segment length|  AS numbers (2 or 4 octets)  ~
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct AsPathSegment {
    segment_type: AsPathSegmentType,
    as_numbers: Vec<u32>,
}

impl AsPathSegment {
    pub const fn new(segment_type: AsPathSegmentType, as_numbers: Vec<u32>) -> Self {
        Self {
            segment_type,
            as_numbers,
        }
    }

    pub const fn segment_type(&self) -> AsPathSegmentType {
        self.segment_type
    }

    pub const fn as_numbers(&self) -> &Vec<u32> {
        &self.as_numbers
    }
}

/// ```text
/// AS_SET: unordered set of ASes a route in the UPDATE message has traversed
/// AS_SEQUENCE: ordered set of ASes a route in the UPDATE message has traversed
/// AS_CONFED_SEQUENCE: ordered set of Member Autonomous Systems in the local
///                     confederation that the UPDATE message has traversed
/// AS_CONFED_SET: unordered set of Member Autonomous Systems in the local
///                confederation that the UPDATE message has traversed
/// ```
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum AsPathSegmentType {
    AsSet = 1,
    AsSequence = 2,
    /// [RFC5065](https://datatracker.ietf.org/doc/html/rfc5065)
    AsConfedSequence = 3,
    /// [RFC5065](https://datatracker.ietf.org/doc/html/rfc5065)
    AsConfedSet = 4,
}

impl From<AsPathSegmentType> for u8 {
    fn from(value: AsPathSegmentType) -> Self {
        value as u8
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct UndefinedAsPathSegmentType(pub u8);

impl TryFrom<u8> for AsPathSegmentType {
    type Error = UndefinedAsPathSegmentType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedAsPathSegmentType(value)),
        }
    }
}
