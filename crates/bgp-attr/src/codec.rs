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

//! Entry points used by the BGP session layer: raw attribute octets in,
//! typed values or a classified UPDATE message error out, and back.

use crate::{
    config::CodecFlags,
    iana::UpdateMessageErrorSubCode,
    path_attribute::{PathAttribute, PathAttributeValue},
    wire::{
        deserializer::path_attribute::{
            LocatedPathAttributeParsingError, PathAttributeParsingError,
        },
        serializer::path_attribute::PathAttributeWritingError,
    },
};
use attrgauze_parse_utils::{
    LocatedParsingError, ReadablePduWithOneInput, ReadablePduWithTwoInputs, Span,
    WritablePduWithOneInput,
};
use nom::error::ErrorKind;

/// Decoding failure ready to be turned into an UPDATE Message Error
/// NOTIFICATION by the session layer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{sub_code} at offset {offset}: {error:?}")]
pub struct AttributeDecodeError {
    sub_code: UpdateMessageErrorSubCode,
    offset: usize,
    error: PathAttributeParsingError,
}

impl AttributeDecodeError {
    pub fn new(offset: usize, error: PathAttributeParsingError) -> Self {
        Self {
            sub_code: error.sub_code(),
            offset,
            error,
        }
    }

    pub const fn sub_code(&self) -> UpdateMessageErrorSubCode {
        self.sub_code
    }

    /// Offset of the first offending octet, relative to the start of the
    /// decoded buffer
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn error(&self) -> &PathAttributeParsingError {
        &self.error
    }

    fn from_nom(buf: &[u8], err: nom::Err<LocatedPathAttributeParsingError<'_>>) -> Self {
        let ret = match err {
            nom::Err::Error(err) | nom::Err::Failure(err) => {
                Self::new(err.span().location_offset(), err.error().clone())
            }
            nom::Err::Incomplete(_) => Self::new(
                buf.len(),
                PathAttributeParsingError::NomError(ErrorKind::Complete),
            ),
        };
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Failed to decode path attribute: {ret}");
        }
        ret
    }
}

/// Decode the value of an attribute of type `code`, the attribute header is
/// already stripped by the caller. Unknown attribute types are kept as raw
/// octets.
pub fn decode_attribute(
    code: u8,
    raw_value: &[u8],
    flags: &CodecFlags,
) -> Result<PathAttributeValue, AttributeDecodeError> {
    match PathAttributeValue::from_wire(Span::new(raw_value), code, flags) {
        Ok((_, value)) => Ok(value),
        Err(err) => Err(AttributeDecodeError::from_nom(raw_value, err)),
    }
}

/// Decode a single attribute including its flags, type and length header.
/// Returns the attribute and the number of octets consumed.
pub fn decode_path_attribute(
    buf: &[u8],
    flags: &CodecFlags,
) -> Result<(PathAttribute, usize), AttributeDecodeError> {
    match PathAttribute::from_wire(Span::new(buf), flags) {
        Ok((remainder, attribute)) => Ok((attribute, remainder.location_offset())),
        Err(err) => Err(AttributeDecodeError::from_nom(buf, err)),
    }
}

/// Encode a value with the attribute header its type mandates
pub fn encode_attribute(
    value: PathAttributeValue,
    flags: &CodecFlags,
) -> Result<Vec<u8>, PathAttributeWritingError> {
    encode_path_attribute(&PathAttribute::with_default_flags(value), flags)
}

pub fn encode_path_attribute(
    attribute: &PathAttribute,
    flags: &CodecFlags,
) -> Result<Vec<u8>, PathAttributeWritingError> {
    let mut buf = Vec::with_capacity(attribute.len(flags));
    attribute.write(&mut buf, flags)?;
    Ok(buf)
}

/// Encode only the value octets, for callers that frame the attribute
/// themselves
pub fn encode_attribute_value(
    value: &PathAttributeValue,
    flags: &CodecFlags,
) -> Result<Vec<u8>, PathAttributeWritingError> {
    let mut buf = Vec::with_capacity(value.len(flags));
    value.write(&mut buf, flags)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        link_state::{BgpLsAttribute, LinkStateTlv},
        path_attribute::{AsPath, AsPathSegment, AsPathSegmentType, UndefinedAsPathSegmentType},
        wire::deserializer::{
            link_state::LinkStateTlvParsingError, path_attribute::AsPathParsingError,
            TlvParsingError,
        },
    };

    const AS_PATH: u8 = 2;
    const AS4_PATH: u8 = 17;
    const BGP_LS: u8 = 29;

    fn sequence_path() -> PathAttributeValue {
        PathAttributeValue::AsPath(AsPath::new(vec![AsPathSegment::new(
            AsPathSegmentType::AsSequence,
            vec![3257, 31027, 34848, 21465],
        )]))
    }

    #[test]
    fn test_decode_as_path() {
        let as2 = [0x02, 0x04, 0x0c, 0xb9, 0x79, 0x33, 0x88, 0x20, 0x53, 0xd9];
        let as4 = [
            0x02, 0x04, 0x00, 0x00, 0x0c, 0xb9, 0x00, 0x00, 0x79, 0x33, 0x00, 0x00, 0x88, 0x20,
            0x00, 0x00, 0x53, 0xd9,
        ];
        let value = decode_attribute(AS_PATH, &as2, &CodecFlags::new(false)).unwrap();
        assert_eq!(value, sequence_path());
        assert_eq!(value.display_name(), "as_path");
        assert_eq!(
            decode_attribute(AS_PATH, &as4, &CodecFlags::new(true)),
            Ok(sequence_path())
        );
        assert_eq!(
            decode_attribute(AS_PATH, &[], &CodecFlags::default()),
            Ok(PathAttributeValue::AsPath(AsPath::default()))
        );
    }

    #[test]
    fn test_decode_as_path_errors() {
        let as2 = CodecFlags::new(false);
        let as4_data = [
            0x02, 0x04, 0x00, 0x00, 0x0c, 0xb9, 0x00, 0x00, 0x79, 0x33, 0x00, 0x00, 0x88, 0x20,
            0x00, 0x00, 0x53, 0xd9,
        ];

        let err = decode_attribute(AS_PATH, &[0x05, 0x01, 0x00, 0x01], &as2).unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::MalformedAsPath);
        assert_eq!(err.offset(), 0);
        assert_eq!(
            err.error(),
            &PathAttributeParsingError::AsPathError(
                AsPathParsingError::UndefinedAsPathSegmentType(UndefinedAsPathSegmentType(5))
            )
        );
        assert!(err.to_string().starts_with("MalformedAsPath at offset 0"));

        let err = decode_attribute(AS_PATH, &[0x02], &as2).unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::AttributeLengthError);
        assert_eq!(err.offset(), 0);
        assert_eq!(
            err.error(),
            &PathAttributeParsingError::AsPathError(AsPathParsingError::TruncatedSegmentHeader {
                found: 1
            })
        );

        let err = decode_attribute(AS_PATH, &[0x01, 0x02, 0x00, 0x01], &as2).unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::AttributeLengthError);
        assert_eq!(err.offset(), 2);

        let err = decode_attribute(AS_PATH, &as4_data, &as2).unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::MalformedAsPath);
        assert_eq!(err.offset(), 10);
    }

    #[test]
    fn test_decode_as4_path() {
        let wire = [0x02, 0x01, 0x00, 0x01, 0x00, 0x00];
        let expected = PathAttributeValue::As4Path(crate::path_attribute::As4Path::new(vec![
            AsPathSegment::new(AsPathSegmentType::AsSequence, vec![65536]),
        ]));
        assert_eq!(
            decode_attribute(AS4_PATH, &wire, &CodecFlags::new(false)),
            Ok(expected.clone())
        );
        assert_eq!(
            decode_attribute(AS4_PATH, &wire, &CodecFlags::new(true)),
            Ok(expected)
        );
    }

    #[test]
    fn test_decode_link_state() {
        let wire = [
            0x04, 0x62, 0x00, 0x0a, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00, 0x02, 0xab, 0xcd,
        ];
        let expected = PathAttributeValue::LinkState(BgpLsAttribute::new(vec![
            LinkStateTlv::ApplicationSpecificLinkAttributes {
                sabm: vec![],
                udabm: vec![],
                sub_tlvs: vec![LinkStateTlv::Unknown {
                    code: 0xffff,
                    value: vec![0xab, 0xcd],
                }],
            },
        ]));
        let value = decode_attribute(BGP_LS, &wire, &CodecFlags::default()).unwrap();
        assert_eq!(value, expected);
        assert_eq!(value.display_name(), "link_state");
    }

    #[test]
    fn test_decode_link_state_errors() {
        let flags = CodecFlags::default();
        let bad_mask = [0x04, 0x62, 0x00, 0x04, 0x01, 0x00, 0x00, 0x00];
        let bad_tlv = [0x04, 0x44, 0x00, 0x04, 0x00];

        let err = decode_attribute(BGP_LS, &bad_mask, &flags).unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::AttributeLengthError);
        assert_eq!(err.offset(), 8);
        assert_eq!(
            err.error(),
            &PathAttributeParsingError::LinkStateError(LinkStateTlvParsingError::BitMaskOverflow {
                declared: 1,
                found: 0
            })
        );

        let err = decode_attribute(BGP_LS, &bad_tlv, &flags).unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::AttributeLengthError);
        assert_eq!(err.offset(), 4);
        assert_eq!(
            err.error(),
            &PathAttributeParsingError::LinkStateError(LinkStateTlvParsingError::TlvError(
                TlvParsingError::TruncatedValue {
                    declared: 4,
                    found: 1
                }
            ))
        );
    }

    #[test]
    fn test_decode_unknown_attribute() {
        let value = decode_attribute(99, &[0x01, 0x02], &CodecFlags::default()).unwrap();
        assert_eq!(
            value,
            PathAttributeValue::Unknown {
                code: 99,
                value: vec![0x01, 0x02]
            }
        );
        assert_eq!(value.display_name(), "99");
    }

    #[test]
    fn test_decode_path_attribute() {
        let wire = [0x40, 0x02, 0x00, 0xff];
        let (attribute, consumed) = decode_path_attribute(&wire, &CodecFlags::default()).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(
            attribute.value(),
            &PathAttributeValue::AsPath(AsPath::default())
        );

        let err = decode_path_attribute(&[0x40, 0x02, 0x0a, 0x02], &CodecFlags::default())
            .unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::AttributeLengthError);
        assert_eq!(err.offset(), 3);

        let err = decode_path_attribute(&[0xc0, 0x02, 0x00], &CodecFlags::default()).unwrap_err();
        assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::AttributeFlagsError);
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_encode_attribute() {
        let as2 = CodecFlags::new(false);
        assert_eq!(
            encode_attribute(sequence_path(), &as2),
            Ok(vec![
                0x40, 0x02, 0x0a, 0x02, 0x04, 0x0c, 0xb9, 0x79, 0x33, 0x88, 0x20, 0x53, 0xd9
            ])
        );
        assert_eq!(
            encode_attribute_value(&sequence_path(), &as2),
            Ok(vec![0x02, 0x04, 0x0c, 0xb9, 0x79, 0x33, 0x88, 0x20, 0x53, 0xd9])
        );
        assert_eq!(
            encode_attribute(
                PathAttributeValue::LinkState(BgpLsAttribute::new(vec![
                    LinkStateTlv::TeDefaultMetric(10)
                ])),
                &as2
            ),
            Ok(vec![
                0x80, 0x1d, 0x08, 0x04, 0x44, 0x00, 0x04, 0x00, 0x00, 0x00, 0x0a
            ])
        );
    }

    #[test]
    fn test_round_trip_through_codec() {
        for asn4 in [false, true] {
            let flags = CodecFlags::new(asn4);
            let encoded = encode_attribute_value(&sequence_path(), &flags).unwrap();
            assert_eq!(
                decode_attribute(AS_PATH, &encoded, &flags),
                Ok(sequence_path())
            );
        }
    }
}
