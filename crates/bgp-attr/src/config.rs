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

//! Settings negotiated with, or configured for, a BGP peer that change how
//! attributes are read and written.

use attrgauze_iana::add_path::{add_path_capability_values, AddPathAddressFamily};
use serde::{Deserialize, Serialize};

pub(crate) const fn default_asn4() -> bool {
    true
}

/// Capabilities negotiated on the session that the attribute codecs depend
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecFlags {
    /// Four-octet AS numbers as defined by
    /// [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793)
    #[serde(default = "default_asn4")]
    asn4: bool,
}

impl CodecFlags {
    pub const fn new(asn4: bool) -> Self {
        Self { asn4 }
    }

    pub const fn asn4(&self) -> bool {
        self.asn4
    }

    pub fn set_asn4(&mut self, value: bool) {
        self.asn4 = value
    }
}

impl Default for CodecFlags {
    fn default() -> Self {
        Self::new(default_asn4())
    }
}

/// Per peer codec configuration.
///
/// ```yaml
/// asn4: false
/// add_path:
///   - ipv4_lu_both
///   - bgpls_receive
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCodecConfig {
    #[serde(default = "default_asn4")]
    pub asn4: bool,

    #[serde(default)]
    pub add_path: Vec<AddPathAddressFamily>,
}

impl AttributeCodecConfig {
    pub const fn codec_flags(&self) -> CodecFlags {
        CodecFlags::new(self.asn4)
    }

    /// `((AFI, SAFI), Send/Receive)` triples to advertise in the ADD-PATH
    /// capability
    pub fn add_path_capability_values(&self) -> Vec<((u16, u8), u8)> {
        add_path_capability_values(&self.add_path)
    }
}

impl Default for AttributeCodecConfig {
    fn default() -> Self {
        Self {
            asn4: default_asn4(),
            add_path: vec![],
        }
    }
}
