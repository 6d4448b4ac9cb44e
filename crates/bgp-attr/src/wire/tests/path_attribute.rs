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

use crate::{
    config::CodecFlags,
    link_state::{BgpLsAttribute, LinkStateTlv},
    path_attribute::{
        As4Path, AsPath, AsPathSegment, AsPathSegmentType, InvalidPathAttribute, PathAttribute,
        PathAttributeValue, UndefinedAsPathSegmentType,
    },
    wire::{
        deserializer::{
            link_state::LinkStateTlvParsingError,
            path_attribute::{
                AsPathParsingError, LocatedPathAttributeParsingError, PathAttributeParsingError,
            },
            TlvParsingError,
        },
        serializer::{
            link_state::LinkStateTlvWritingError,
            path_attribute::{AsPathWritingError, PathAttributeWritingError},
        },
    },
};
use attrgauze_parse_utils::{
    test_helpers::{
        combine, span_at, test_parse_error_with_one_input, test_parse_error_with_two_inputs,
        test_parsed_completely_with_one_input, test_parsed_completely_with_two_inputs,
        test_write_with_one_input,
    },
    WritablePduWithOneInput,
};
use nom::error::ErrorKind;

const AS2: CodecFlags = CodecFlags::new(false);
const AS4: CodecFlags = CodecFlags::new(true);

fn sequence_path() -> PathAttributeValue {
    PathAttributeValue::AsPath(AsPath::new(vec![AsPathSegment::new(
        AsPathSegmentType::AsSequence,
        vec![3257, 31027, 34848, 21465],
    )]))
}

#[test]
fn test_as_path_attribute() -> Result<(), PathAttributeWritingError> {
    let good_as2_wire = [
        0x40, 0x02, 0x0a, 0x02, 0x04, 0x0c, 0xb9, 0x79, 0x33, 0x88, 0x20, 0x53, 0xd9,
    ];
    let good_as4_wire = [
        0x40, 0x02, 0x12, 0x02, 0x04, 0x00, 0x00, 0x0c, 0xb9, 0x00, 0x00, 0x79, 0x33, 0x00, 0x00,
        0x88, 0x20, 0x00, 0x00, 0x53, 0xd9,
    ];
    let good_extended_wire = [
        0x50, 0x02, 0x00, 0x0a, 0x02, 0x04, 0x0c, 0xb9, 0x79, 0x33, 0x88, 0x20, 0x53, 0xd9,
    ];

    let good = PathAttribute::from(false, true, false, false, sequence_path()).unwrap();
    let good_extended = PathAttribute::from(false, true, false, true, sequence_path()).unwrap();

    test_parsed_completely_with_one_input(&good_as2_wire, &AS2, &good);
    test_parsed_completely_with_one_input(&good_as4_wire, &AS4, &good);
    test_parsed_completely_with_one_input(&good_extended_wire, &AS2, &good_extended);
    test_write_with_one_input(&good, &AS2, &good_as2_wire)?;
    test_write_with_one_input(&good, &AS4, &good_as4_wire)?;
    test_write_with_one_input(&good_extended, &AS2, &good_extended_wire)?;
    Ok(())
}

#[test]
fn test_as_path_attribute_multiple_segments() -> Result<(), PathAttributeWritingError> {
    let good_wire = [
        0x40, 0x02, 0x0c, 0x02, 0x02, 0x03, 0xe9, 0x03, 0xea, 0x01, 0x02, 0x03, 0xeb, 0x03, 0xec,
    ];
    let good = PathAttribute::with_default_flags(PathAttributeValue::AsPath(AsPath::new(vec![
        AsPathSegment::new(AsPathSegmentType::AsSequence, vec![1001, 1002]),
        AsPathSegment::new(AsPathSegmentType::AsSet, vec![1003, 1004]),
    ])));
    test_parsed_completely_with_one_input(&good_wire, &AS2, &good);
    test_write_with_one_input(&good, &AS2, &good_wire)?;
    Ok(())
}

#[test]
fn test_as_path_attribute_auto_extended_length() -> Result<(), PathAttributeWritingError> {
    let as_numbers: Vec<u32> = (1..=200).collect();
    let mut value_wire = vec![0x02, 200];
    for as_num in &as_numbers {
        value_wire.extend_from_slice(&(*as_num as u16).to_be_bytes());
    }
    let good_wire = combine(vec![&[0x50, 0x02, 0x01, 0x92], &value_wire]);
    let value = PathAttributeValue::AsPath(AsPath::new(vec![AsPathSegment::new(
        AsPathSegmentType::AsSequence,
        as_numbers,
    )]));

    let good = PathAttribute::with_default_flags(value.clone());
    assert!(!good.extended_length());
    test_write_with_one_input(&good, &AS2, &good_wire)?;

    let decoded = PathAttribute::from(false, true, false, true, value).unwrap();
    test_parsed_completely_with_one_input(&good_wire, &AS2, &decoded);
    Ok(())
}

#[test]
fn test_as4_path_attribute() -> Result<(), PathAttributeWritingError> {
    let good_wire = [0xc0, 0x11, 0x06, 0x02, 0x01, 0x00, 0x00, 0x00, 0x01];
    let good = PathAttribute::from(
        true,
        true,
        false,
        false,
        PathAttributeValue::As4Path(As4Path::new(vec![AsPathSegment::new(
            AsPathSegmentType::AsSequence,
            vec![1],
        )])),
    )
    .unwrap();
    // AS4_PATH ignores the session ASN width
    test_parsed_completely_with_one_input(&good_wire, &AS2, &good);
    test_write_with_one_input(&good, &AS2, &good_wire)?;
    test_write_with_one_input(&good, &AS4, &good_wire)?;
    Ok(())
}

#[test]
fn test_link_state_attribute() -> Result<(), PathAttributeWritingError> {
    let good_wire = [
        0x80, 0x1d, 0x08, 0x04, 0x44, 0x00, 0x04, 0x00, 0x00, 0x00, 0x0a,
    ];
    let good = PathAttribute::from(
        true,
        false,
        false,
        false,
        PathAttributeValue::LinkState(BgpLsAttribute::new(vec![LinkStateTlv::TeDefaultMetric(
            10,
        )])),
    )
    .unwrap();
    test_parsed_completely_with_one_input(&good_wire, &AS4, &good);
    test_write_with_one_input(&good, &AS4, &good_wire)?;
    assert_eq!(PathAttribute::with_default_flags(good.value().clone()), good);
    Ok(())
}

#[test]
fn test_unknown_attribute() -> Result<(), PathAttributeWritingError> {
    let good_wire = [0xe0, 0xfa, 0x02, 0x01, 0xff];
    let good = PathAttribute::from(
        true,
        true,
        true,
        false,
        PathAttributeValue::Unknown {
            code: 250,
            value: vec![0x01, 0xff],
        },
    )
    .unwrap();
    test_parsed_completely_with_one_input(&good_wire, &AS4, &good);
    test_write_with_one_input(&good, &AS4, &good_wire)?;
    Ok(())
}

#[test]
fn test_path_attribute_errors() {
    let bad_length_wire = [0x40, 0x02, 0x0a, 0x02, 0x04, 0x0c, 0xb9];
    let bad_header_wire = [0x40, 0x02];
    let bad_as_path_wire = [0x40, 0x02, 0x04, 0x05, 0x01, 0x00, 0x01];
    let bad_flags_wire = [0xc0, 0x02, 0x00];
    let bad_link_state_wire = [0x80, 0x1d, 0x05, 0x04, 0x44, 0x00, 0x04, 0x00];

    let bad_length = LocatedPathAttributeParsingError::new(
        span_at(&bad_length_wire, 3),
        PathAttributeParsingError::InvalidAttributeLength {
            declared: 10,
            found: 4,
        },
    );
    let bad_header = LocatedPathAttributeParsingError::new(
        span_at(&bad_header_wire, 2),
        PathAttributeParsingError::NomError(ErrorKind::Eof),
    );
    let bad_as_path = LocatedPathAttributeParsingError::new(
        span_at(&bad_as_path_wire, 3),
        PathAttributeParsingError::AsPathError(AsPathParsingError::UndefinedAsPathSegmentType(
            UndefinedAsPathSegmentType(5),
        )),
    );
    let bad_flags = LocatedPathAttributeParsingError::new(
        span_at(&bad_flags_wire, 0),
        PathAttributeParsingError::InvalidPathAttribute(
            InvalidPathAttribute::InvalidOptionalFlagValue(true),
            PathAttributeValue::AsPath(AsPath::default()),
        ),
    );
    let bad_link_state = LocatedPathAttributeParsingError::new(
        span_at(&bad_link_state_wire, 7),
        PathAttributeParsingError::LinkStateError(LinkStateTlvParsingError::TlvError(
            TlvParsingError::TruncatedValue {
                declared: 4,
                found: 1,
            },
        )),
    );

    test_parse_error_with_one_input::<
        PathAttribute,
        &CodecFlags,
        LocatedPathAttributeParsingError<'_>,
    >(&bad_length_wire, &AS2, &bad_length);
    test_parse_error_with_one_input::<
        PathAttribute,
        &CodecFlags,
        LocatedPathAttributeParsingError<'_>,
    >(&bad_header_wire, &AS2, &bad_header);
    test_parse_error_with_one_input::<
        PathAttribute,
        &CodecFlags,
        LocatedPathAttributeParsingError<'_>,
    >(&bad_as_path_wire, &AS2, &bad_as_path);
    test_parse_error_with_one_input::<
        PathAttribute,
        &CodecFlags,
        LocatedPathAttributeParsingError<'_>,
    >(&bad_flags_wire, &AS2, &bad_flags);
    test_parse_error_with_one_input::<
        PathAttribute,
        &CodecFlags,
        LocatedPathAttributeParsingError<'_>,
    >(&bad_link_state_wire, &AS2, &bad_link_state);
}

#[test]
fn test_path_attribute_value() -> Result<(), PathAttributeWritingError> {
    let good_as_path_wire = [0x02, 0x04, 0x0c, 0xb9, 0x79, 0x33, 0x88, 0x20, 0x53, 0xd9];
    let good_unknown_wire = [0x01, 0x02];
    let bad_as_path_wire = [0x02];

    let good_unknown = PathAttributeValue::Unknown {
        code: 99,
        value: vec![0x01, 0x02],
    };
    let bad_as_path = LocatedPathAttributeParsingError::new(
        span_at(&bad_as_path_wire, 0),
        PathAttributeParsingError::AsPathError(AsPathParsingError::TruncatedSegmentHeader {
            found: 1,
        }),
    );

    test_parsed_completely_with_two_inputs(&good_as_path_wire, 2, &AS2, &sequence_path());
    test_parsed_completely_with_two_inputs(&good_unknown_wire, 99, &AS2, &good_unknown);
    test_parse_error_with_two_inputs::<
        PathAttributeValue,
        u8,
        &CodecFlags,
        LocatedPathAttributeParsingError<'_>,
    >(&bad_as_path_wire, 2, &AS2, &bad_as_path);
    test_write_with_one_input(&sequence_path(), &AS2, &good_as_path_wire)?;
    test_write_with_one_input(&good_unknown, &AS2, &good_unknown_wire)?;
    Ok(())
}

#[test]
fn test_path_attribute_writing_errors() {
    let as2_overflow = PathAttribute::with_default_flags(PathAttributeValue::AsPath(AsPath::new(
        vec![AsPathSegment::new(AsPathSegmentType::AsSet, vec![65536])],
    )));
    let long_mask = PathAttribute::with_default_flags(PathAttributeValue::LinkState(
        BgpLsAttribute::new(vec![LinkStateTlv::ApplicationSpecificLinkAttributes {
            sabm: vec![],
            udabm: vec![0x00; 300],
            sub_tlvs: vec![],
        }]),
    ));
    let too_long = PathAttribute::with_default_flags(PathAttributeValue::Unknown {
        code: 250,
        value: vec![0x00; 65536],
    });

    let mut buf = vec![];
    assert_eq!(
        as2_overflow.write(&mut buf, &AS2),
        Err(PathAttributeWritingError::AsPathError(
            AsPathWritingError::As2NumberOverflow(65536)
        ))
    );
    assert_eq!(
        long_mask.write(&mut buf, &AS2),
        Err(PathAttributeWritingError::LinkStateError(
            LinkStateTlvWritingError::BitMaskTooLong(300)
        ))
    );
    assert_eq!(
        too_long.write(&mut buf, &AS2),
        Err(PathAttributeWritingError::ValueTooLong(65536))
    );
    assert!(buf.is_empty());
}
