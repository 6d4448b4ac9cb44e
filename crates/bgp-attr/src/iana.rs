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

//! Code points used by the attribute codecs, as registered by IANA.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

/// BGP Path Attributes handled by this crate, as defined by IANA [BGP Path Attributes](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-2)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum PathAttributeType {
    /// [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271)
    AsPath = 2,

    /// [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793)
    As4Path = 17,

    /// [RFC7752](https://datatracker.ietf.org/doc/html/rfc7752)
    BgpLs = 29,
}

impl From<PathAttributeType> for u8 {
    fn from(value: PathAttributeType) -> Self {
        value as u8
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct UndefinedPathAttributeType(pub u8);

impl TryFrom<u8> for PathAttributeType {
    type Error = UndefinedPathAttributeType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedPathAttributeType(value)),
        }
    }
}

/// BGP-LS Node, Link and Prefix attribute TLVs with a semantic decoder in
/// this crate. See IANA [BGP-LS NLRI and Attribute TLVs](https://www.iana.org/assignments/bgp-ls-parameters/bgp-ls-parameters.xhtml#node-descriptor-link-descriptor-prefix-descriptor-attribute-tlv)
#[repr(u16)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum LinkStateTlvType {
    /// [RFC7752](https://datatracker.ietf.org/doc/html/rfc7752#section-3.2.1.5)
    MultiTopologyIdentifier = 263,

    /// [RFC9351](https://datatracker.ietf.org/doc/html/rfc9351#section-3.1)
    FlexAlgoDefinition = 1039,

    /// [RFC9351](https://datatracker.ietf.org/doc/html/rfc9351#section-3.2)
    FlexAlgoExcludeAdminGroup = 1040,

    /// [RFC9351](https://datatracker.ietf.org/doc/html/rfc9351#section-3.2)
    FlexAlgoIncludeAnyAdminGroup = 1041,

    /// [RFC9351](https://datatracker.ietf.org/doc/html/rfc9351#section-3.2)
    FlexAlgoIncludeAllAdminGroup = 1042,

    /// [RFC9351](https://datatracker.ietf.org/doc/html/rfc9351#section-3.3)
    FlexAlgoDefinitionFlags = 1043,

    /// [RFC9351](https://datatracker.ietf.org/doc/html/rfc9351#section-3.4)
    FlexAlgoExcludeSrlg = 1044,

    /// [RFC7752](https://datatracker.ietf.org/doc/html/rfc7752#section-3.3.2.3)
    TeDefaultMetric = 1092,

    /// [RFC9294](https://datatracker.ietf.org/doc/html/rfc9294#section-3)
    ApplicationSpecificLinkAttributes = 1122,
}

impl LinkStateTlvType {
    /// Stable name used when projecting decoded values for export
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::MultiTopologyIdentifier => "mt_id",
            Self::FlexAlgoDefinition => "flex_algo_defn",
            Self::FlexAlgoExcludeAdminGroup => "flex_algo_excl_admin_group",
            Self::FlexAlgoIncludeAnyAdminGroup => "flex_algo_incl_any_admin_group",
            Self::FlexAlgoIncludeAllAdminGroup => "flex_algo_incl_all_admin_group",
            Self::FlexAlgoDefinitionFlags => "flex_algo_defn_flags",
            Self::FlexAlgoExcludeSrlg => "flex_algo_excl_srlg",
            Self::TeDefaultMetric => "te_metric",
            Self::ApplicationSpecificLinkAttributes => "ASLA",
        }
    }
}

impl From<LinkStateTlvType> for u16 {
    fn from(value: LinkStateTlvType) -> Self {
        value as u16
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct UndefinedLinkStateTlvType(pub u16);

impl TryFrom<u16> for LinkStateTlvType {
    type Error = UndefinedLinkStateTlvType;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedLinkStateTlvType(value)),
        }
    }
}

/// UPDATE Message Error sub-codes as defined by IANA [UPDATE Message Error subcodes](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-7)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum UpdateMessageErrorSubCode {
    /// [RFC Errata 4493](https://www.rfc-editor.org/errata_search.php?eid=4493)
    Unspecific = 0,
    MalformedAttributeList = 1,
    UnrecognizedWellKnownAttribute = 2,
    MissingWellKnownAttribute = 3,
    AttributeFlagsError = 4,
    AttributeLengthError = 5,
    InvalidOriginAttribute = 6,
    InvalidNextHopAttribute = 8,
    OptionalAttributeError = 9,
    InvalidNetworkField = 10,
    MalformedAsPath = 11,
}

impl From<UpdateMessageErrorSubCode> for u8 {
    fn from(value: UpdateMessageErrorSubCode) -> Self {
        value as u8
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct UndefinedUpdateMessageErrorSubCode(pub u8);

impl TryFrom<u8> for UpdateMessageErrorSubCode {
    type Error = UndefinedUpdateMessageErrorSubCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedUpdateMessageErrorSubCode(value)),
        }
    }
}
