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

//! Projection of the decoded values into a generic key-value form, used for
//! logging and for exporting routes to consumers that don't know the typed
//! model.
//!
//! Every TLV is projected as `{"type": <name>, "value": <value>}`. TLVs
//! without a decoder keep their numeric code as type and their raw octets as
//! a lower-case hex string.

use crate::{
    link_state::{BgpLsAttribute, LinkStateTlv},
    path_attribute::{As4Path, AsPath, AsPathSegment, PathAttributeValue},
};
use attrgauze_parse_utils::primitives::hex_string;
use serde_json::{json, Value};

#[inline]
fn bit_mask_json(mask: &[u8]) -> Value {
    let value = if mask.is_empty() {
        Value::Null
    } else {
        Value::String(format!("0x{}", hex_string(mask)))
    };
    json!({"len": mask.len(), "value": value})
}

#[inline]
fn tlvs_json(tlvs: &[LinkStateTlv]) -> Value {
    Value::Array(tlvs.iter().map(LinkStateTlv::to_json).collect())
}

#[inline]
fn segments_json(segments: &[AsPathSegment]) -> Value {
    Value::Array(
        segments
            .iter()
            .map(|segment| json!([u8::from(segment.segment_type()), segment.as_numbers()]))
            .collect(),
    )
}

impl LinkStateTlv {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Unknown { code, value } => json!({"type": code, "value": hex_string(value)}),
            _ => json!({"type": self.display_name(), "value": self.value_json()}),
        }
    }

    /// Projection of the value alone, without the type tag
    pub fn value_json(&self) -> Value {
        match self {
            Self::MultiTopologyIdentifier(ids) => json!(ids),
            Self::FlexAlgoDefinition {
                flex_algo,
                metric_type,
                calc_type,
                priority,
                sub_tlvs,
            } => json!({
                "flex_algo": flex_algo,
                "metric_type": metric_type,
                "calc_type": calc_type,
                "priority": priority,
                "sub_tlvs": tlvs_json(sub_tlvs),
            }),
            Self::FlexAlgoExcludeAdminGroup(groups)
            | Self::FlexAlgoIncludeAnyAdminGroup(groups)
            | Self::FlexAlgoIncludeAllAdminGroup(groups) => json!(groups),
            Self::FlexAlgoDefinitionFlags { m_flag } => json!({"M": u8::from(*m_flag)}),
            Self::FlexAlgoExcludeSrlg(srlgs) => json!(srlgs),
            Self::TeDefaultMetric(metric) => json!(metric),
            Self::ApplicationSpecificLinkAttributes {
                sabm,
                udabm,
                sub_tlvs,
            } => json!({
                "sabm": bit_mask_json(sabm),
                "udabm": bit_mask_json(udabm),
                "sub_tlvs": tlvs_json(sub_tlvs),
            }),
            Self::Unknown { value, .. } => json!(hex_string(value)),
        }
    }
}

impl BgpLsAttribute {
    pub fn to_json(&self) -> Value {
        tlvs_json(self.tlvs())
    }
}

impl AsPath {
    /// `[[segment_type, [asn, ...]], ...]`
    pub fn to_json(&self) -> Value {
        segments_json(self.segments())
    }
}

impl As4Path {
    pub fn to_json(&self) -> Value {
        segments_json(self.segments())
    }
}

impl PathAttributeValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::AsPath(value) => json!({"type": self.display_name(), "value": value.to_json()}),
            Self::As4Path(value) => json!({"type": self.display_name(), "value": value.to_json()}),
            Self::LinkState(value) => {
                json!({"type": self.display_name(), "value": value.to_json()})
            }
            Self::Unknown { code, value } => json!({"type": code, "value": hex_string(value)}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_attribute::AsPathSegmentType;

    #[test]
    fn test_asla_header_only() {
        let tlv = LinkStateTlv::ApplicationSpecificLinkAttributes {
            sabm: vec![],
            udabm: vec![],
            sub_tlvs: vec![],
        };
        let expected = json!({
            "type": "ASLA",
            "value": {
                "sabm": {"len": 0, "value": null},
                "udabm": {"len": 0, "value": null},
                "sub_tlvs": [],
            }
        });
        assert_eq!(tlv.to_json(), expected);
    }

    #[test]
    fn test_bit_mask_width() {
        assert_eq!(
            bit_mask_json(&[0x10, 0x00, 0x00, 0x00]),
            json!({"len": 4, "value": "0x10000000"})
        );
        assert_eq!(
            bit_mask_json(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
            json!({"len": 8, "value": "0x0000000000000001"})
        );
        assert_eq!(
            bit_mask_json(&[0x0a, 0xb0]),
            json!({"len": 2, "value": "0x0ab0"})
        );
    }

    #[test]
    fn test_flex_algo_definition() {
        let tlv = LinkStateTlv::FlexAlgoDefinition {
            flex_algo: 128,
            metric_type: 1,
            calc_type: 0,
            priority: 128,
            sub_tlvs: vec![
                LinkStateTlv::FlexAlgoDefinitionFlags { m_flag: true },
                LinkStateTlv::Unknown {
                    code: 0xffff,
                    value: vec![0xde, 0xad],
                },
            ],
        };
        let expected = json!({
            "type": "flex_algo_defn",
            "value": {
                "flex_algo": 128,
                "metric_type": 1,
                "calc_type": 0,
                "priority": 128,
                "sub_tlvs": [
                    {"type": "flex_algo_defn_flags", "value": {"M": 1}},
                    {"type": 65535, "value": "dead"},
                ],
            }
        });
        assert_eq!(tlv.to_json(), expected);
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            LinkStateTlv::FlexAlgoExcludeSrlg(vec![100, 300, 500]).to_json(),
            json!({"type": "flex_algo_excl_srlg", "value": [100, 300, 500]})
        );
        assert_eq!(
            LinkStateTlv::MultiTopologyIdentifier(vec![]).to_json(),
            json!({"type": "mt_id", "value": []})
        );
        assert_eq!(
            LinkStateTlv::FlexAlgoIncludeAllAdminGroup(vec![1]).to_json(),
            json!({"type": "flex_algo_incl_all_admin_group", "value": [1]})
        );
    }

    #[test]
    fn test_path_attribute_value() {
        let value = PathAttributeValue::AsPath(AsPath::new(vec![
            AsPathSegment::new(AsPathSegmentType::AsSequence, vec![1001, 1002]),
            AsPathSegment::new(AsPathSegmentType::AsSet, vec![1003]),
        ]));
        assert_eq!(
            value.to_json(),
            json!({"type": "as_path", "value": [[2, [1001, 1002]], [1, [1003]]]})
        );

        let value = PathAttributeValue::LinkState(BgpLsAttribute::new(vec![
            LinkStateTlv::TeDefaultMetric(10),
        ]));
        assert_eq!(
            value.to_json(),
            json!({"type": "link_state", "value": [{"type": "te_metric", "value": 10}]})
        );

        let value = PathAttributeValue::Unknown {
            code: 250,
            value: vec![0x01, 0xff],
        };
        assert_eq!(value.to_json(), json!({"type": 250, "value": "01ff"}));
    }
}
