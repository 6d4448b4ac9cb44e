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

//! Serializer for the BGP Link-State attribute and its TLVs

use crate::{
    link_state::{BgpLsAttribute, LinkStateTlv},
    wire::serializer::{tlv_len, write_tlv_header},
};
use attrgauze_parse_utils::{
    primitives::{write_be_u16_list, write_be_u32_list},
    WritablePdu,
};
use byteorder::{NetworkEndian, WriteBytesExt};
use std::io::Write;

const M_FLAG: u16 = 0x8000;

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum LinkStateTlvWritingError {
    StdIoError(String),
    /// Value doesn't fit in the two octets Length field
    ValueTooLong { code: u16, length: usize },
    /// ASLA bit mask longer than its one octet length field allows
    BitMaskTooLong(usize),
}

impl From<std::io::Error> for LinkStateTlvWritingError {
    fn from(err: std::io::Error) -> Self {
        LinkStateTlvWritingError::StdIoError(err.to_string())
    }
}

#[inline]
fn sub_tlvs_len(sub_tlvs: &[LinkStateTlv]) -> usize {
    sub_tlvs.iter().map(|tlv| tlv.len()).sum::<usize>()
}

#[inline]
fn check_tlvs(tlvs: &[LinkStateTlv]) -> Result<(), LinkStateTlvWritingError> {
    tlvs.iter().try_for_each(LinkStateTlv::check_writable)
}

/// Writes TLVs already accepted by [`check_tlvs`]
#[inline]
fn write_checked_tlvs<T: Write>(
    writer: &mut T,
    tlvs: &[LinkStateTlv],
) -> Result<(), LinkStateTlvWritingError> {
    for tlv in tlvs {
        tlv.write_checked(writer)?;
    }
    Ok(())
}

#[inline]
fn bit_mask_len(mask: &[u8]) -> Result<u8, LinkStateTlvWritingError> {
    u8::try_from(mask.len()).map_err(|_| LinkStateTlvWritingError::BitMaskTooLong(mask.len()))
}

impl LinkStateTlv {
    /// Length of the value without the TLV header
    pub fn value_len(&self) -> usize {
        match self {
            Self::MultiTopologyIdentifier(ids) => ids.len() * 2,
            Self::FlexAlgoDefinition { sub_tlvs, .. } => 4 + sub_tlvs_len(sub_tlvs),
            Self::FlexAlgoExcludeAdminGroup(groups)
            | Self::FlexAlgoIncludeAnyAdminGroup(groups)
            | Self::FlexAlgoIncludeAllAdminGroup(groups) => groups.len() * 4,
            Self::FlexAlgoDefinitionFlags { .. } => 2,
            Self::FlexAlgoExcludeSrlg(srlgs) => srlgs.len() * 4,
            Self::TeDefaultMetric(_) => 4,
            Self::ApplicationSpecificLinkAttributes {
                sabm,
                udabm,
                sub_tlvs,
            } => 4 + sabm.len() + udabm.len() + sub_tlvs_len(sub_tlvs),
            Self::Unknown { value, .. } => value.len(),
        }
    }

    #[inline]
    fn length_field(&self) -> Result<u16, LinkStateTlvWritingError> {
        let value_len = self.value_len();
        u16::try_from(value_len).map_err(|_| LinkStateTlvWritingError::ValueTooLong {
            code: self.code(),
            length: value_len,
        })
    }

    /// Check every length field of the TLV and of its sub-TLVs fits on the
    /// wire, so a failed write leaves nothing behind.
    pub fn check_writable(&self) -> Result<(), LinkStateTlvWritingError> {
        self.length_field()?;
        match self {
            Self::FlexAlgoDefinition { sub_tlvs, .. } => check_tlvs(sub_tlvs),
            Self::ApplicationSpecificLinkAttributes {
                sabm,
                udabm,
                sub_tlvs,
            } => {
                bit_mask_len(sabm)?;
                bit_mask_len(udabm)?;
                check_tlvs(sub_tlvs)
            }
            _ => Ok(()),
        }
    }

    fn write_checked<T: Write>(&self, writer: &mut T) -> Result<(), LinkStateTlvWritingError> {
        write_tlv_header(writer, self.code(), self.length_field()?)?;
        match self {
            Self::MultiTopologyIdentifier(ids) => write_be_u16_list(writer, ids)?,
            Self::FlexAlgoDefinition {
                flex_algo,
                metric_type,
                calc_type,
                priority,
                sub_tlvs,
            } => {
                writer.write_u8(*flex_algo)?;
                writer.write_u8(*metric_type)?;
                writer.write_u8(*calc_type)?;
                writer.write_u8(*priority)?;
                write_checked_tlvs(writer, sub_tlvs)?;
            }
            Self::FlexAlgoExcludeAdminGroup(groups)
            | Self::FlexAlgoIncludeAnyAdminGroup(groups)
            | Self::FlexAlgoIncludeAllAdminGroup(groups) => write_be_u32_list(writer, groups)?,
            Self::FlexAlgoDefinitionFlags { m_flag } => {
                let flags = if *m_flag { M_FLAG } else { 0 };
                writer.write_u16::<NetworkEndian>(flags)?;
            }
            Self::FlexAlgoExcludeSrlg(srlgs) => write_be_u32_list(writer, srlgs)?,
            Self::TeDefaultMetric(metric) => writer.write_u32::<NetworkEndian>(*metric)?,
            Self::ApplicationSpecificLinkAttributes {
                sabm,
                udabm,
                sub_tlvs,
            } => {
                writer.write_u8(bit_mask_len(sabm)?)?;
                writer.write_u8(bit_mask_len(udabm)?)?;
                // reserved
                writer.write_u16::<NetworkEndian>(0)?;
                writer.write_all(sabm)?;
                writer.write_all(udabm)?;
                write_checked_tlvs(writer, sub_tlvs)?;
            }
            Self::Unknown { value, .. } => writer.write_all(value)?,
        }
        Ok(())
    }
}

impl WritablePdu<LinkStateTlvWritingError> for LinkStateTlv {
    /// 2-octet type + 2-octet length
    const BASE_LENGTH: usize = 4;

    fn len(&self) -> usize {
        tlv_len(self.value_len())
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), LinkStateTlvWritingError> {
        self.check_writable()?;
        self.write_checked(writer)
    }
}

impl WritablePdu<LinkStateTlvWritingError> for BgpLsAttribute {
    const BASE_LENGTH: usize = 0;

    fn len(&self) -> usize {
        Self::BASE_LENGTH + sub_tlvs_len(self.tlvs())
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), LinkStateTlvWritingError> {
        check_tlvs(self.tlvs())?;
        write_checked_tlvs(writer, self.tlvs())
    }
}
