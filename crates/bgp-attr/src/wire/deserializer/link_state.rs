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

//! Deserializer for the BGP Link-State attribute and its TLVs

use crate::{
    iana::{LinkStateTlvType, UpdateMessageErrorSubCode},
    link_state::{BgpLsAttribute, LinkStateTlv},
    registry::TlvRegistry,
    wire::deserializer::{LocatedTlvParsingError, Tlv, TlvIter, TlvParsingError},
};
use attrgauze_parse_utils::{
    located_error, parse_into_located, parse_till_empty_with_one_input,
    primitives::{be_u16_list, be_u32_list},
    ErrorKindSerdeDeref, ReadablePduWithOneInput, Span,
};
use nom::{
    error::ErrorKind,
    number::complete::{be_u16, be_u32, be_u8},
    IResult, InputTake,
};
use serde::{Deserialize, Serialize};

/// Fixed part of the Flexible Algorithm Definition TLV
const FLEX_ALGO_DEFINITION_FIXED_LEN: usize = 4;
/// Mask lengths and the reserved octets of the ASLA TLV
const ASLA_FIXED_LEN: usize = 4;
const FLEX_ALGO_DEFINITION_FLAGS_MIN_LEN: usize = 2;
const TE_DEFAULT_METRIC_LEN: usize = 4;
const M_FLAG_SHIFT: u16 = 15;

/// Deepest level of sub-TLVs a container TLV may carry. Top-level TLVs of the
/// attribute are at depth zero.
pub const MAX_TLV_NESTING_DEPTH: usize = 8;

pub type LinkStateDecodeResult<'a> =
    Result<LinkStateTlv, nom::Err<LocatedLinkStateTlvParsingError<'a>>>;

/// BGP Link-State Attribute Parsing Errors
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum LinkStateTlvParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(ErrorKind),
    TlvError(TlvParsingError),
    /// The fixed part of a TLV is shorter than required
    InvalidLength {
        code: u16,
        expecting: usize,
        found: usize,
    },
    /// A list valued TLV that can't be split in `chunk` sized values
    UnalignedLength {
        code: u16,
        chunk: usize,
        found: usize,
    },
    /// ASLA bit mask length that runs past the end of the TLV
    BitMaskOverflow { declared: usize, found: usize },
    /// Sub-TLVs nested deeper than [`MAX_TLV_NESTING_DEPTH`]
    NestingTooDeep { max: usize },
}

impl LinkStateTlvParsingError {
    pub const fn sub_code(&self) -> UpdateMessageErrorSubCode {
        match self {
            Self::TlvError(err) => err.sub_code(),
            Self::BitMaskOverflow { .. } => UpdateMessageErrorSubCode::AttributeLengthError,
            Self::NomError(_)
            | Self::InvalidLength { .. }
            | Self::UnalignedLength { .. }
            | Self::NestingTooDeep { .. } => UpdateMessageErrorSubCode::OptionalAttributeError,
        }
    }
}

located_error! {
    LocatedLinkStateTlvParsingError(LinkStateTlvParsingError) {
        nom => NomError,
        located => [TlvError(LocatedTlvParsingError)],
    }
}

#[inline]
fn link_state_error(
    buf: Span<'_>,
    error: LinkStateTlvParsingError,
) -> nom::Err<LocatedLinkStateTlvParsingError<'_>> {
    nom::Err::Error(LocatedLinkStateTlvParsingError::new(buf, error))
}

#[inline]
fn check_min_length(
    code: LinkStateTlvType,
    buf: Span<'_>,
    expecting: usize,
) -> Result<(), nom::Err<LocatedLinkStateTlvParsingError<'_>>> {
    if buf.len() < expecting {
        return Err(link_state_error(
            buf,
            LinkStateTlvParsingError::InvalidLength {
                code: code.into(),
                expecting,
                found: buf.len(),
            },
        ));
    }
    Ok(())
}

#[inline]
fn check_alignment(
    code: LinkStateTlvType,
    buf: Span<'_>,
    chunk: usize,
) -> Result<(), nom::Err<LocatedLinkStateTlvParsingError<'_>>> {
    if buf.len() % chunk != 0 {
        return Err(link_state_error(
            buf,
            LinkStateTlvParsingError::UnalignedLength {
                code: code.into(),
                chunk,
                found: buf.len(),
            },
        ));
    }
    Ok(())
}

/// Decode every TLV in `buf` through `registry`, the TLVs being at nesting
/// level `depth`. Any failure fails the whole container.
pub fn decode_tlvs<'a>(
    buf: Span<'a>,
    registry: &TlvRegistry,
    depth: usize,
) -> Result<Vec<LinkStateTlv>, nom::Err<LocatedLinkStateTlvParsingError<'a>>> {
    if depth > MAX_TLV_NESTING_DEPTH && !buf.is_empty() {
        return Err(link_state_error(
            buf,
            LinkStateTlvParsingError::NestingTooDeep {
                max: MAX_TLV_NESTING_DEPTH,
            },
        ));
    }
    TlvIter::new(buf)
        .map(|tlv| match tlv {
            Ok(tlv) => registry.decode(&tlv, depth),
            Err(err) => Err(nom::Err::Error(err.into())),
        })
        .collect()
}

impl<'a> ReadablePduWithOneInput<'a, &TlvRegistry, LocatedLinkStateTlvParsingError<'a>>
    for BgpLsAttribute
{
    fn from_wire(
        buf: Span<'a>,
        registry: &TlvRegistry,
    ) -> IResult<Span<'a>, Self, LocatedLinkStateTlvParsingError<'a>> {
        let (span, tlvs) = parse_till_empty_with_one_input(buf, registry)?;
        Ok((span, BgpLsAttribute::new(tlvs)))
    }
}

impl<'a> ReadablePduWithOneInput<'a, &TlvRegistry, LocatedLinkStateTlvParsingError<'a>>
    for LinkStateTlv
{
    fn from_wire(
        buf: Span<'a>,
        registry: &TlvRegistry,
    ) -> IResult<Span<'a>, Self, LocatedLinkStateTlvParsingError<'a>> {
        let (span, tlv) = parse_into_located::<
            LocatedTlvParsingError<'a>,
            LocatedLinkStateTlvParsingError<'a>,
            Tlv<'a>,
        >(buf)?;
        let value = registry.decode(&tlv, 0)?;
        Ok((span, value))
    }
}

/// Register the decoders of all the Link-State TLVs known to this crate
pub fn register_link_state_decoders(registry: &mut TlvRegistry) {
    let decoders: [(LinkStateTlvType, crate::registry::TlvDecoder); 9] = [
        (
            LinkStateTlvType::MultiTopologyIdentifier,
            decode_multi_topology_identifier,
        ),
        (
            LinkStateTlvType::FlexAlgoDefinition,
            decode_flex_algo_definition,
        ),
        (
            LinkStateTlvType::FlexAlgoExcludeAdminGroup,
            decode_flex_algo_exclude_admin_group,
        ),
        (
            LinkStateTlvType::FlexAlgoIncludeAnyAdminGroup,
            decode_flex_algo_include_any_admin_group,
        ),
        (
            LinkStateTlvType::FlexAlgoIncludeAllAdminGroup,
            decode_flex_algo_include_all_admin_group,
        ),
        (
            LinkStateTlvType::FlexAlgoDefinitionFlags,
            decode_flex_algo_definition_flags,
        ),
        (
            LinkStateTlvType::FlexAlgoExcludeSrlg,
            decode_flex_algo_exclude_srlg,
        ),
        (LinkStateTlvType::TeDefaultMetric, decode_te_default_metric),
        (
            LinkStateTlvType::ApplicationSpecificLinkAttributes,
            decode_application_specific_link_attributes,
        ),
    ];
    for (tlv_type, decoder) in decoders {
        registry.register(tlv_type, decoder);
    }
}

pub fn decode_multi_topology_identifier<'a>(
    buf: Span<'a>,
    _registry: &TlvRegistry,
    _depth: usize,
) -> LinkStateDecodeResult<'a> {
    check_alignment(LinkStateTlvType::MultiTopologyIdentifier, buf, 2)?;
    let (_, ids) = be_u16_list(buf)?;
    Ok(LinkStateTlv::MultiTopologyIdentifier(ids))
}

#[inline]
fn decode_u32_list(
    code: LinkStateTlvType,
    buf: Span<'_>,
) -> Result<Vec<u32>, nom::Err<LocatedLinkStateTlvParsingError<'_>>> {
    check_alignment(code, buf, 4)?;
    let (_, values) = be_u32_list(buf)?;
    Ok(values)
}

pub fn decode_flex_algo_exclude_admin_group<'a>(
    buf: Span<'a>,
    _registry: &TlvRegistry,
    _depth: usize,
) -> LinkStateDecodeResult<'a> {
    let groups = decode_u32_list(LinkStateTlvType::FlexAlgoExcludeAdminGroup, buf)?;
    Ok(LinkStateTlv::FlexAlgoExcludeAdminGroup(groups))
}

pub fn decode_flex_algo_include_any_admin_group<'a>(
    buf: Span<'a>,
    _registry: &TlvRegistry,
    _depth: usize,
) -> LinkStateDecodeResult<'a> {
    let groups = decode_u32_list(LinkStateTlvType::FlexAlgoIncludeAnyAdminGroup, buf)?;
    Ok(LinkStateTlv::FlexAlgoIncludeAnyAdminGroup(groups))
}

pub fn decode_flex_algo_include_all_admin_group<'a>(
    buf: Span<'a>,
    _registry: &TlvRegistry,
    _depth: usize,
) -> LinkStateDecodeResult<'a> {
    let groups = decode_u32_list(LinkStateTlvType::FlexAlgoIncludeAllAdminGroup, buf)?;
    Ok(LinkStateTlv::FlexAlgoIncludeAllAdminGroup(groups))
}

pub fn decode_flex_algo_exclude_srlg<'a>(
    buf: Span<'a>,
    _registry: &TlvRegistry,
    _depth: usize,
) -> LinkStateDecodeResult<'a> {
    let srlgs = decode_u32_list(LinkStateTlvType::FlexAlgoExcludeSrlg, buf)?;
    Ok(LinkStateTlv::FlexAlgoExcludeSrlg(srlgs))
}

/// Only the first two octets are examined, anything after them is reserved
pub fn decode_flex_algo_definition_flags<'a>(
    buf: Span<'a>,
    _registry: &TlvRegistry,
    _depth: usize,
) -> LinkStateDecodeResult<'a> {
    check_min_length(
        LinkStateTlvType::FlexAlgoDefinitionFlags,
        buf,
        FLEX_ALGO_DEFINITION_FLAGS_MIN_LEN,
    )?;
    let (_, flags) = be_u16(buf)?;
    Ok(LinkStateTlv::FlexAlgoDefinitionFlags {
        m_flag: flags >> M_FLAG_SHIFT == 1,
    })
}

pub fn decode_te_default_metric<'a>(
    buf: Span<'a>,
    _registry: &TlvRegistry,
    _depth: usize,
) -> LinkStateDecodeResult<'a> {
    if buf.len() != TE_DEFAULT_METRIC_LEN {
        return Err(link_state_error(
            buf,
            LinkStateTlvParsingError::InvalidLength {
                code: LinkStateTlvType::TeDefaultMetric.into(),
                expecting: TE_DEFAULT_METRIC_LEN,
                found: buf.len(),
            },
        ));
    }
    let (_, metric) = be_u32(buf)?;
    Ok(LinkStateTlv::TeDefaultMetric(metric))
}

pub fn decode_flex_algo_definition<'a>(
    buf: Span<'a>,
    registry: &TlvRegistry,
    depth: usize,
) -> LinkStateDecodeResult<'a> {
    check_min_length(
        LinkStateTlvType::FlexAlgoDefinition,
        buf,
        FLEX_ALGO_DEFINITION_FIXED_LEN,
    )?;
    let (buf, flex_algo) = be_u8(buf)?;
    let (buf, metric_type) = be_u8(buf)?;
    let (buf, calc_type) = be_u8(buf)?;
    let (buf, priority) = be_u8(buf)?;
    let sub_tlvs = decode_tlvs(buf, registry, depth + 1)?;
    Ok(LinkStateTlv::FlexAlgoDefinition {
        flex_algo,
        metric_type,
        calc_type,
        priority,
        sub_tlvs,
    })
}

#[inline]
fn take_bit_mask(
    buf: Span<'_>,
    declared: usize,
) -> Result<(Span<'_>, Vec<u8>), nom::Err<LocatedLinkStateTlvParsingError<'_>>> {
    if buf.len() < declared {
        return Err(link_state_error(
            buf,
            LinkStateTlvParsingError::BitMaskOverflow {
                declared,
                found: buf.len(),
            },
        ));
    }
    let (buf, mask) = buf.take_split(declared);
    Ok((buf, mask.fragment().to_vec()))
}

/// The reserved octets are skipped without checking they're zero
pub fn decode_application_specific_link_attributes<'a>(
    buf: Span<'a>,
    registry: &TlvRegistry,
    depth: usize,
) -> LinkStateDecodeResult<'a> {
    check_min_length(
        LinkStateTlvType::ApplicationSpecificLinkAttributes,
        buf,
        ASLA_FIXED_LEN,
    )?;
    let (buf, sabm_len) = be_u8(buf)?;
    let (buf, udabm_len) = be_u8(buf)?;
    let (buf, _reserved) = be_u16(buf)?;
    let (buf, sabm) = take_bit_mask(buf, sabm_len as usize)?;
    let (buf, udabm) = take_bit_mask(buf, udabm_len as usize)?;
    let sub_tlvs = decode_tlvs(buf, registry, depth + 1)?;
    Ok(LinkStateTlv::ApplicationSpecificLinkAttributes {
        sabm,
        udabm,
        sub_tlvs,
    })
}
