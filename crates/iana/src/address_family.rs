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

//! Handling [AddressFamily] (AFI) and [SubsequentAddressFamily] (SAFI).
//! Also introduces a new `enum` [AddressType] to make sure we can only
//! construct valid AFI/SAFI combinations
//!
//! ```rust
//! use attrgauze_iana::address_family::*;
//!
//! let ipv4_lu = AddressType::Ipv4NlriMplsLabels;
//! let bgp_ls = AddressType::from_afi_safi(AddressFamily::BgpLs, SubsequentAddressFamily::BgpLs);
//! let invalid =
//!     AddressType::from_afi_safi(AddressFamily::L2vpn, SubsequentAddressFamily::FlowSpecFilter);
//!
//! assert_eq!(ipv4_lu.address_family(), AddressFamily::IPv4);
//! assert_eq!(
//!     ipv4_lu.subsequent_address_family(),
//!     SubsequentAddressFamily::NlriMplsLabels
//! );
//! assert_eq!(bgp_ls, Ok(AddressType::BgpLs));
//! assert_eq!(
//!     invalid,
//!     Err(InvalidAddressType::new(
//!         AddressFamily::L2vpn,
//!         SubsequentAddressFamily::FlowSpecFilter
//!     ))
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, FromRepr};

/// Address families identifiers (AFI) registered at IANA [Address Family Number](https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xhtml)
/// that can carry BGP routes handled by this workspace.
///
/// ```rust
/// use attrgauze_iana::address_family::{AddressFamily, UndefinedAddressFamily};
///
/// let afi = AddressFamily::IPv6;
/// println!("IPv6 AFI is: {}", afi);
///
/// let undefined = AddressFamily::try_from(65000);
/// assert_eq!(undefined, Err(UndefinedAddressFamily(65000)));
/// ```
#[repr(u16)]
#[derive(FromRepr, Display, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum AddressFamily {
    IPv4 = 1,
    IPv6 = 2,

    /// [RFC4761](https://datatracker.ietf.org/doc/html/RFC4761)
    /// [RFC6074](https://datatracker.ietf.org/doc/html/RFC6074) AFI for L2VPN information
    L2vpn = 25,

    /// [RFC7752](https://datatracker.ietf.org/doc/html/RFC7752) BGP-LS
    BgpLs = 16388,
}

/// Error type used in `[TryFrom] for [AddressFamily].
/// The value carried is the undefined value being parsed
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedAddressFamily(pub u16);

impl From<AddressFamily> for u16 {
    fn from(afi: AddressFamily) -> Self {
        afi as u16
    }
}

impl TryFrom<u16> for AddressFamily {
    type Error = UndefinedAddressFamily;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedAddressFamily(value)),
        }
    }
}

/// Subsequent Address families identifiers (SAFI) registered at IANA [Subsequent Address Family Identifiers (SAFI) Parameters](https://www.iana.org/assignments/safi-namespace/safi-namespace.xhtml)
///
/// ```rust
/// use attrgauze_iana::address_family::{
///     SubsequentAddressFamily, UndefinedSubsequentAddressFamily,
/// };
///
/// let safi = SubsequentAddressFamily::Unicast;
/// println!("Unicast SAFI is: {}", safi);
///
/// let undefined = SubsequentAddressFamily::try_from(0);
/// assert_eq!(undefined, Err(UndefinedSubsequentAddressFamily(0)));
/// ```
#[repr(u8)]
#[derive(FromRepr, Display, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum SubsequentAddressFamily {
    /// Network Layer Reachability Information used for unicast forwarding
    /// [RFC4760](https://datatracker.ietf.org/doc/html/RFC4760)
    Unicast = 1,

    /// Network Layer Reachability Information (NLRI) with MPLS Labels
    /// [RFC8277](https://datatracker.ietf.org/doc/html/RFC8277)
    NlriMplsLabels = 4,

    /// BGP EVPNs [RFC7432](https://datatracker.ietf.org/doc/html/RFC7432)
    BgpEvpn = 70,

    /// BGP-LS [RFC7752](https://datatracker.ietf.org/doc/html/RFC7752)
    BgpLs = 71,

    /// SR TE Policy SAFI
    /// [draft-previdi-idr-segment-routing-te-policy](https://datatracker.ietf.org/doc/html/draft-previdi-idr-segment-routing-te-policy)
    SrTePolicy = 73,

    /// MPLS-labeled VPN address
    /// [RFC4364](https://datatracker.ietf.org/doc/html/RFC4364)
    /// [RFC8277](https://datatracker.ietf.org/doc/html/RFC8277)
    MplsVpn = 128,

    /// Dissemination of Flow Specification rules
    /// [RFC8955](https://datatracker.ietf.org/doc/html/RFC8955)
    FlowSpecFilter = 133,
}

/// Error type used in `[TryFrom] for [SubsequentAddressFamily].
/// The value carried is the undefined value being parsed
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedSubsequentAddressFamily(pub u8);

impl From<SubsequentAddressFamily> for u8 {
    fn from(safi: SubsequentAddressFamily) -> Self {
        safi as u8
    }
}

impl TryFrom<u8> for SubsequentAddressFamily {
    type Error = UndefinedSubsequentAddressFamily;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedSubsequentAddressFamily(value)),
        }
    }
}

/// Since not all [AddressFamily] and [SubsequentAddressFamily] are valid
/// combinations, this enum defines a set of valid combination to ensure only
/// valid AFI/SAFI are used at compile time.
///
/// Each address type has a short configuration name, e.g. `ipv4_lu` for IPv4
/// labeled unicast, see [AddressType::name].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum AddressType {
    Ipv4Unicast,
    Ipv4NlriMplsLabels,
    Ipv4MplsLabeledVpn,
    Ipv4FlowSpec,
    Ipv4SrTePolicy,
    Ipv6Unicast,
    Ipv6NlriMplsLabels,
    Ipv6MplsLabeledVpn,
    Ipv6FlowSpec,
    Ipv6SrTePolicy,
    L2VpnBgpEvpn,
    BgpLs,
}

/// Error type used in `[TryFrom] for [AddressType].
/// The value carried is the undefined value being parsed
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct InvalidAddressType {
    address_family: AddressFamily,
    subsequent_address_family: SubsequentAddressFamily,
}

impl InvalidAddressType {
    pub const fn new(
        address_family: AddressFamily,
        subsequent_address_family: SubsequentAddressFamily,
    ) -> Self {
        Self {
            address_family,
            subsequent_address_family,
        }
    }

    pub const fn address_family(&self) -> AddressFamily {
        self.address_family
    }

    pub const fn subsequent_address_family(&self) -> SubsequentAddressFamily {
        self.subsequent_address_family
    }
}

/// Error returned when parsing an [AddressType] from an unknown name
#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[error("unknown address family name `{0}`")]
pub struct UndefinedAddressTypeName(pub String);

impl AddressType {
    pub const fn address_family(&self) -> AddressFamily {
        match self {
            Self::Ipv4Unicast => AddressFamily::IPv4,
            Self::Ipv4NlriMplsLabels => AddressFamily::IPv4,
            Self::Ipv4MplsLabeledVpn => AddressFamily::IPv4,
            Self::Ipv4FlowSpec => AddressFamily::IPv4,
            Self::Ipv4SrTePolicy => AddressFamily::IPv4,

            Self::Ipv6Unicast => AddressFamily::IPv6,
            Self::Ipv6NlriMplsLabels => AddressFamily::IPv6,
            Self::Ipv6MplsLabeledVpn => AddressFamily::IPv6,
            Self::Ipv6FlowSpec => AddressFamily::IPv6,
            Self::Ipv6SrTePolicy => AddressFamily::IPv6,

            Self::L2VpnBgpEvpn => AddressFamily::L2vpn,
            Self::BgpLs => AddressFamily::BgpLs,
        }
    }

    pub const fn subsequent_address_family(&self) -> SubsequentAddressFamily {
        match self {
            Self::Ipv4Unicast => SubsequentAddressFamily::Unicast,
            Self::Ipv4NlriMplsLabels => SubsequentAddressFamily::NlriMplsLabels,
            Self::Ipv4MplsLabeledVpn => SubsequentAddressFamily::MplsVpn,
            Self::Ipv4FlowSpec => SubsequentAddressFamily::FlowSpecFilter,
            Self::Ipv4SrTePolicy => SubsequentAddressFamily::SrTePolicy,

            Self::Ipv6Unicast => SubsequentAddressFamily::Unicast,
            Self::Ipv6NlriMplsLabels => SubsequentAddressFamily::NlriMplsLabels,
            Self::Ipv6MplsLabeledVpn => SubsequentAddressFamily::MplsVpn,
            Self::Ipv6FlowSpec => SubsequentAddressFamily::FlowSpecFilter,
            Self::Ipv6SrTePolicy => SubsequentAddressFamily::SrTePolicy,

            Self::L2VpnBgpEvpn => SubsequentAddressFamily::BgpEvpn,
            Self::BgpLs => SubsequentAddressFamily::BgpLs,
        }
    }

    pub const fn from_afi_safi(
        afi: AddressFamily,
        safi: SubsequentAddressFamily,
    ) -> Result<Self, InvalidAddressType> {
        match (afi, safi) {
            (AddressFamily::IPv4, SubsequentAddressFamily::Unicast) => Ok(Self::Ipv4Unicast),
            (AddressFamily::IPv4, SubsequentAddressFamily::NlriMplsLabels) => {
                Ok(Self::Ipv4NlriMplsLabels)
            }
            (AddressFamily::IPv4, SubsequentAddressFamily::MplsVpn) => Ok(Self::Ipv4MplsLabeledVpn),
            (AddressFamily::IPv4, SubsequentAddressFamily::FlowSpecFilter) => Ok(Self::Ipv4FlowSpec),
            (AddressFamily::IPv4, SubsequentAddressFamily::SrTePolicy) => Ok(Self::Ipv4SrTePolicy),

            (AddressFamily::IPv6, SubsequentAddressFamily::Unicast) => Ok(Self::Ipv6Unicast),
            (AddressFamily::IPv6, SubsequentAddressFamily::NlriMplsLabels) => {
                Ok(Self::Ipv6NlriMplsLabels)
            }
            (AddressFamily::IPv6, SubsequentAddressFamily::MplsVpn) => Ok(Self::Ipv6MplsLabeledVpn),
            (AddressFamily::IPv6, SubsequentAddressFamily::FlowSpecFilter) => Ok(Self::Ipv6FlowSpec),
            (AddressFamily::IPv6, SubsequentAddressFamily::SrTePolicy) => Ok(Self::Ipv6SrTePolicy),

            (AddressFamily::L2vpn, SubsequentAddressFamily::BgpEvpn) => Ok(Self::L2VpnBgpEvpn),
            (AddressFamily::BgpLs, SubsequentAddressFamily::BgpLs) => Ok(Self::BgpLs),
            _ => Err(InvalidAddressType::new(afi, safi)),
        }
    }

    /// Numeric `(AFI, SAFI)` pair as carried on the wire
    pub const fn afi_safi(&self) -> (u16, u8) {
        (
            self.address_family() as u16,
            self.subsequent_address_family() as u8,
        )
    }

    /// Short name used in configuration files
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ipv4Unicast => "ipv4",
            Self::Ipv4NlriMplsLabels => "ipv4_lu",
            Self::Ipv4MplsLabeledVpn => "vpnv4",
            Self::Ipv4FlowSpec => "flowspec",
            Self::Ipv4SrTePolicy => "ipv4_srte",
            Self::Ipv6Unicast => "ipv6",
            Self::Ipv6NlriMplsLabels => "ipv6_lu",
            Self::Ipv6MplsLabeledVpn => "vpnv6",
            Self::Ipv6FlowSpec => "ipv6_flowspec",
            Self::Ipv6SrTePolicy => "ipv6_srte",
            Self::L2VpnBgpEvpn => "evpn",
            Self::BgpLs => "bgpls",
        }
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddressType {
    type Err = UndefinedAddressTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipv4" => Ok(Self::Ipv4Unicast),
            "ipv4_lu" => Ok(Self::Ipv4NlriMplsLabels),
            "vpnv4" => Ok(Self::Ipv4MplsLabeledVpn),
            "flowspec" | "ipv4_flowspec" => Ok(Self::Ipv4FlowSpec),
            "ipv4_srte" => Ok(Self::Ipv4SrTePolicy),
            "ipv6" => Ok(Self::Ipv6Unicast),
            "ipv6_lu" => Ok(Self::Ipv6NlriMplsLabels),
            "vpnv6" => Ok(Self::Ipv6MplsLabeledVpn),
            "ipv6_flowspec" => Ok(Self::Ipv6FlowSpec),
            "ipv6_srte" => Ok(Self::Ipv6SrTePolicy),
            "evpn" => Ok(Self::L2VpnBgpEvpn),
            "bgpls" => Ok(Self::BgpLs),
            _ => Err(UndefinedAddressTypeName(s.to_string())),
        }
    }
}
