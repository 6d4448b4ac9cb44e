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

//! BGP ADD-PATH address families as defined by
//! [RFC7911](https://datatracker.ietf.org/doc/html/rfc7911) and the compact
//! string form used to configure them.
//!
//! A configuration entry is written as `<address family>_<mode>`, the last
//! underscore separates the mode from the address family name.
//!
//! ```rust
//! use attrgauze_iana::{
//!     add_path::{AddPathAddressFamily, AddPathMode},
//!     address_family::AddressType,
//! };
//! use std::str::FromStr;
//!
//! let entry = AddPathAddressFamily::from_str("ipv4_lu_both").unwrap();
//! assert_eq!(entry.address_type(), AddressType::Ipv4NlriMplsLabels);
//! assert_eq!(entry.mode(), AddPathMode::Both);
//! assert_eq!(entry.capability_value(), ((1, 4), 3));
//! ```

use crate::address_family::{AddressType, UndefinedAddressTypeName};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString, FromRepr};

/// Send/Receive field of the ADD-PATH capability
#[repr(u8)]
#[derive(
    Display,
    EnumString,
    FromRepr,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum AddPathMode {
    Receive = 1,
    Send = 2,
    Both = 3,
}

impl From<AddPathMode> for u8 {
    fn from(value: AddPathMode) -> Self {
        value as u8
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedAddPathMode(pub u8);

impl TryFrom<u8> for AddPathMode {
    type Error = UndefinedAddPathMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedAddPathMode(value)),
        }
    }
}

#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AddPathConfigError {
    #[error("ADD-PATH entry `{0}` is not in the `<address family>_<mode>` form")]
    MissingMode(String),

    #[error("ADD-PATH entry has an unknown mode `{0}`")]
    UndefinedMode(String),

    #[error(transparent)]
    UndefinedAddressType(#[from] UndefinedAddressTypeName),
}

/// One address family advertised in the ADD-PATH capability
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct AddPathAddressFamily {
    address_type: AddressType,
    mode: AddPathMode,
}

impl AddPathAddressFamily {
    pub const fn new(address_type: AddressType, mode: AddPathMode) -> Self {
        Self { address_type, mode }
    }

    pub const fn address_type(&self) -> AddressType {
        self.address_type
    }

    pub const fn mode(&self) -> AddPathMode {
        self.mode
    }

    /// The numeric `((AFI, SAFI), Send/Receive)` triple carried in the
    /// capability
    pub const fn capability_value(&self) -> ((u16, u8), u8) {
        (self.address_type.afi_safi(), self.mode as u8)
    }
}

impl std::fmt::Display for AddPathAddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.address_type, self.mode)
    }
}

impl FromStr for AddPathAddressFamily {
    type Err = AddPathConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address_type, mode) = s
            .rsplit_once('_')
            .ok_or_else(|| AddPathConfigError::MissingMode(s.to_string()))?;
        let mode = AddPathMode::from_str(mode)
            .map_err(|_| AddPathConfigError::UndefinedMode(mode.to_string()))?;
        let address_type = AddressType::from_str(address_type)?;
        Ok(Self::new(address_type, mode))
    }
}

impl TryFrom<String> for AddPathAddressFamily {
    type Error = AddPathConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<AddPathAddressFamily> for String {
    fn from(value: AddPathAddressFamily) -> Self {
        value.to_string()
    }
}

/// Convert a list of configured ADD-PATH families into the numeric values
/// advertised in the capability, preserving the configured order.
pub fn add_path_capability_values(families: &[AddPathAddressFamily]) -> Vec<((u16, u8), u8)> {
    families
        .iter()
        .map(AddPathAddressFamily::capability_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ipv4_receive", AddressType::Ipv4Unicast, AddPathMode::Receive)]
    #[case("ipv4_send", AddressType::Ipv4Unicast, AddPathMode::Send)]
    #[case("ipv4_both", AddressType::Ipv4Unicast, AddPathMode::Both)]
    #[case("ipv4_lu_both", AddressType::Ipv4NlriMplsLabels, AddPathMode::Both)]
    #[case("ipv6_lu_receive", AddressType::Ipv6NlriMplsLabels, AddPathMode::Receive)]
    #[case("ipv4_srte_send", AddressType::Ipv4SrTePolicy, AddPathMode::Send)]
    #[case("ipv6_flowspec_both", AddressType::Ipv6FlowSpec, AddPathMode::Both)]
    #[case("vpnv4_send", AddressType::Ipv4MplsLabeledVpn, AddPathMode::Send)]
    fn test_parse_entry(
        #[case] entry: &str,
        #[case] address_type: AddressType,
        #[case] mode: AddPathMode,
    ) {
        let parsed = AddPathAddressFamily::from_str(entry);
        assert_eq!(parsed, Ok(AddPathAddressFamily::new(address_type, mode)));
        assert_eq!(parsed.unwrap().to_string(), entry);
    }

    #[test]
    fn test_parse_entry_errors() {
        assert_eq!(
            AddPathAddressFamily::from_str("ipv4"),
            Err(AddPathConfigError::MissingMode("ipv4".to_string()))
        );
        assert_eq!(
            AddPathAddressFamily::from_str("ipv4_lu"),
            Err(AddPathConfigError::UndefinedMode("lu".to_string()))
        );
        assert_eq!(
            AddPathAddressFamily::from_str("ipv5_both"),
            Err(AddPathConfigError::UndefinedAddressType(
                UndefinedAddressTypeName("ipv5".to_string())
            ))
        );
    }

    #[test]
    fn test_capability_values() {
        let families = [
            AddPathAddressFamily::new(AddressType::Ipv4Unicast, AddPathMode::Both),
            AddPathAddressFamily::new(AddressType::Ipv6Unicast, AddPathMode::Both),
            AddPathAddressFamily::new(AddressType::Ipv4NlriMplsLabels, AddPathMode::Receive),
            AddPathAddressFamily::new(AddressType::Ipv6NlriMplsLabels, AddPathMode::Receive),
            AddPathAddressFamily::new(AddressType::Ipv4MplsLabeledVpn, AddPathMode::Send),
            AddPathAddressFamily::new(AddressType::Ipv6MplsLabeledVpn, AddPathMode::Send),
            AddPathAddressFamily::new(AddressType::L2VpnBgpEvpn, AddPathMode::Both),
            AddPathAddressFamily::new(AddressType::BgpLs, AddPathMode::Receive),
            AddPathAddressFamily::new(AddressType::Ipv4FlowSpec, AddPathMode::Send),
            AddPathAddressFamily::new(AddressType::Ipv4SrTePolicy, AddPathMode::Both),
        ];
        let expected = vec![
            ((1, 1), 3),
            ((2, 1), 3),
            ((1, 4), 1),
            ((2, 4), 1),
            ((1, 128), 2),
            ((2, 128), 2),
            ((25, 70), 3),
            ((16388, 71), 1),
            ((1, 133), 2),
            ((1, 73), 3),
        ];
        assert_eq!(add_path_capability_values(&families), expected);
        assert!(add_path_capability_values(&[]).is_empty());
    }

    #[test]
    fn test_mode_values() {
        assert_eq!(u8::from(AddPathMode::Receive), 1);
        assert_eq!(u8::from(AddPathMode::Send), 2);
        assert_eq!(u8::from(AddPathMode::Both), 3);
        assert_eq!(AddPathMode::try_from(4), Err(UndefinedAddPathMode(4)));
    }

    #[test]
    fn test_serde_yaml() {
        let yaml = "- ipv4_lu_both\n- bgpls_receive\n";
        let parsed: Vec<AddPathAddressFamily> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            vec![
                AddPathAddressFamily::new(AddressType::Ipv4NlriMplsLabels, AddPathMode::Both),
                AddPathAddressFamily::new(AddressType::BgpLs, AddPathMode::Receive),
            ]
        );
        let serialized = serde_yaml::to_string(&parsed).unwrap();
        assert_eq!(serialized, yaml);
        assert!(serde_yaml::from_str::<Vec<AddPathAddressFamily>>("- ipv4_sometimes\n").is_err());
    }
}
