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

//! Mapping from a Link-State TLV code to the function decoding its value.
//!
//! The process-wide registry returned by [`TlvRegistry::link_state`] is built
//! exactly once by a single registration routine, and is read-only afterwards,
//! so it can be shared by any number of concurrent decoders. Codes without a
//! decoder are not an error: they decode to [`LinkStateTlv::Unknown`] carrying
//! the raw octets.
//!
//! A registration is keyed by [`LinkStateTlvType`], which fixes both the code
//! and the display name tagging the decoded value. A decoder that yields a
//! TLV of another type than the one it was registered for is not trusted, the
//! raw octets are kept instead.

use crate::{
    iana::LinkStateTlvType,
    link_state::LinkStateTlv,
    wire::deserializer::{
        link_state::{register_link_state_decoders, LinkStateDecodeResult},
        Tlv,
    },
};
use attrgauze_parse_utils::{primitives::hex_string, Span};
use std::{collections::HashMap, fmt, sync::OnceLock};

/// Decodes the value octets of a TLV found at nesting level `depth`. The
/// registry is passed along so decoders of container TLVs can decode their
/// sub-TLVs one level deeper.
pub type TlvDecoder =
    for<'a, 'r> fn(Span<'a>, &'r TlvRegistry, usize) -> LinkStateDecodeResult<'a>;

#[derive(Copy, Clone)]
pub struct RegisteredTlv {
    code: u16,
    name: &'static str,
    decoder: TlvDecoder,
}

impl RegisteredTlv {
    pub const fn code(&self) -> u16 {
        self.code
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn decoder(&self) -> TlvDecoder {
        self.decoder
    }
}

impl fmt::Debug for RegisteredTlv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTlv")
            .field("code", &self.code)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TlvRegistry {
    entries: HashMap<u16, RegisteredTlv>,
}

impl TlvRegistry {
    /// Empty registry, every TLV decodes to [`LinkStateTlv::Unknown`]
    pub fn new() -> Self {
        Self::default()
    }

    /// New registry holding the decoders of all known Link-State TLVs
    pub fn with_link_state_tlvs() -> Self {
        let mut registry = Self::new();
        register_link_state_decoders(&mut registry);
        registry
    }

    /// The shared registry of Link-State TLV decoders
    pub fn link_state() -> &'static TlvRegistry {
        static REGISTRY: OnceLock<TlvRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::with_link_state_tlvs)
    }

    /// Register a decoder for `tlv_type`. The first registration of a code
    /// wins, later ones are ignored and `false` is returned.
    pub fn register(&mut self, tlv_type: LinkStateTlvType, decoder: TlvDecoder) -> bool {
        let code = u16::from(tlv_type);
        let name = tlv_type.display_name();
        if let Some(existing) = self.entries.get(&code) {
            log::warn!(
                "Ignoring duplicate registration of TLV code {code} as `{name}`, already registered as `{}`",
                existing.name
            );
            return false;
        }
        self.entries.insert(
            code,
            RegisteredTlv {
                code,
                name,
                decoder,
            },
        );
        true
    }

    pub fn lookup(&self, code: u16) -> Option<&RegisteredTlv> {
        self.entries.get(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode the value of `tlv`, found at nesting level `depth`, with its
    /// registered decoder, or keep the raw octets when the code is unknown.
    pub fn decode<'a>(&self, tlv: &Tlv<'a>, depth: usize) -> LinkStateDecodeResult<'a> {
        let registered = match self.lookup(tlv.code()) {
            Some(registered) => registered,
            None => {
                if log::log_enabled!(log::Level::Debug) {
                    log::debug!(
                        "No decoder registered for Link-State TLV code {}, keeping raw value {}",
                        tlv.code(),
                        hex_string(tlv.value().fragment())
                    );
                }
                return Ok(raw_tlv(tlv));
            }
        };
        let value = (registered.decoder)(tlv.value(), self, depth)?;
        if value.code() != registered.code {
            log::warn!(
                "Decoder `{}` of TLV code {} produced a TLV of code {}, keeping raw value",
                registered.name,
                registered.code,
                value.code()
            );
            return Ok(raw_tlv(tlv));
        }
        Ok(value)
    }
}

#[inline]
fn raw_tlv(tlv: &Tlv<'_>) -> LinkStateTlv {
    LinkStateTlv::Unknown {
        code: tlv.code(),
        value: tlv.value().fragment().to_vec(),
    }
}
