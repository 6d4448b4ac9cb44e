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

//! BGP Link-State attribute TLVs as defined in
//! [RFC7752](https://datatracker.ietf.org/doc/html/rfc7752), the Flexible
//! Algorithm Definition TLVs of
//! [RFC9351](https://datatracker.ietf.org/doc/html/rfc9351) and the
//! Application-Specific Link Attributes of
//! [RFC9294](https://datatracker.ietf.org/doc/html/rfc9294).

use crate::{iana::LinkStateTlvType, path_attribute::PathAttributeValueProperties};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The BGP-LS attribute (path attribute type 29) is an ordered list of
/// Link-State TLVs.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct BgpLsAttribute {
    tlvs: Vec<LinkStateTlv>,
}

impl BgpLsAttribute {
    pub const fn new(tlvs: Vec<LinkStateTlv>) -> Self {
        Self { tlvs }
    }

    pub const fn tlvs(&self) -> &Vec<LinkStateTlv> {
        &self.tlvs
    }
}

impl PathAttributeValueProperties for BgpLsAttribute {
    fn can_be_optional() -> Option<bool> {
        Some(true)
    }

    fn can_be_transitive() -> Option<bool> {
        Some(false)
    }

    fn can_be_partial() -> Option<bool> {
        Some(false)
    }
}

/// Decoded Link-State TLV. Every TLV is carried on the wire as:
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |              Type             |             Length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// //                      Value (variable)                      //
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum LinkStateTlv {
    /// Multi-Topology Identifiers, each value still carries the four reserved
    /// bits in front of the 12-bit MT-ID.
    ///
    /// ```text
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |R R R R|  Multi-Topology ID 1  |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// //             ...             //
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// ```
    MultiTopologyIdentifier(Vec<u16>),

    /// Flexible Algorithm Definition
    ///
    /// ```text
    ///  0                   1                   2                   3
    ///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |   Flex-Algo   |  Metric-Type  |   Calc-Type   |    Priority   |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |                      Sub-TLVs (variable)                      |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// ```
    ///
    /// `flex_algo` is expected in the 128-255 range, but it's not enforced.
    FlexAlgoDefinition {
        flex_algo: u8,
        metric_type: u8,
        calc_type: u8,
        priority: u8,
        sub_tlvs: Vec<LinkStateTlv>,
    },

    /// Extended Admin Groups, one 4-octet group per entry
    FlexAlgoExcludeAdminGroup(Vec<u32>),
    FlexAlgoIncludeAnyAdminGroup(Vec<u32>),
    FlexAlgoIncludeAllAdminGroup(Vec<u32>),

    /// Only the M-flag (most significant bit) is defined, the rest is
    /// reserved.
    FlexAlgoDefinitionFlags {
        m_flag: bool,
    },

    /// Shared Risk Link Group values
    FlexAlgoExcludeSrlg(Vec<u32>),

    TeDefaultMetric(u32),

    /// Application-Specific Link Attributes
    ///
    /// ```text
    ///  0                   1                   2                   3
    ///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |  SABM Length  | UDABM Length  |            Reserved           |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |            Standard Application Identifier Bit Mask           |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |         User-Defined Application Identifier Bit Mask          |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// |                  Link Attribute sub-TLVs                      |
    /// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    /// ```
    ///
    /// The mask lengths are implied by the masks, an empty mask is written
    /// with a zero length.
    ApplicationSpecificLinkAttributes {
        sabm: Vec<u8>,
        udabm: Vec<u8>,
        sub_tlvs: Vec<LinkStateTlv>,
    },

    /// TLV without a registered decoder
    Unknown { code: u16, value: Vec<u8> },
}

impl LinkStateTlv {
    pub const fn code(&self) -> u16 {
        match self {
            Self::MultiTopologyIdentifier(_) => LinkStateTlvType::MultiTopologyIdentifier as u16,
            Self::FlexAlgoDefinition { .. } => LinkStateTlvType::FlexAlgoDefinition as u16,
            Self::FlexAlgoExcludeAdminGroup(_) => {
                LinkStateTlvType::FlexAlgoExcludeAdminGroup as u16
            }
            Self::FlexAlgoIncludeAnyAdminGroup(_) => {
                LinkStateTlvType::FlexAlgoIncludeAnyAdminGroup as u16
            }
            Self::FlexAlgoIncludeAllAdminGroup(_) => {
                LinkStateTlvType::FlexAlgoIncludeAllAdminGroup as u16
            }
            Self::FlexAlgoDefinitionFlags { .. } => {
                LinkStateTlvType::FlexAlgoDefinitionFlags as u16
            }
            Self::FlexAlgoExcludeSrlg(_) => LinkStateTlvType::FlexAlgoExcludeSrlg as u16,
            Self::TeDefaultMetric(_) => LinkStateTlvType::TeDefaultMetric as u16,
            Self::ApplicationSpecificLinkAttributes { .. } => {
                LinkStateTlvType::ApplicationSpecificLinkAttributes as u16
            }
            Self::Unknown { code, .. } => *code,
        }
    }

    /// Type of the TLV if it's one of the known ones
    pub fn tlv_type(&self) -> Option<LinkStateTlvType> {
        match self {
            Self::Unknown { .. } => None,
            _ => LinkStateTlvType::try_from(self.code()).ok(),
        }
    }

    /// Name tagging the decoded value on export. Unknown TLVs are named by
    /// their numeric code.
    pub fn display_name(&self) -> Cow<'static, str> {
        match self.tlv_type() {
            Some(tlv_type) => Cow::Borrowed(tlv_type.display_name()),
            None => Cow::Owned(self.code().to_string()),
        }
    }
}
