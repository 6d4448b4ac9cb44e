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

use crate::wire::deserializer::{LocatedTlvParsingError, Tlv, TlvIter, TlvParsingError};
use attrgauze_parse_utils::{
    test_helpers::{span_at, test_parse_error},
    ReadablePdu, Span,
};

#[test]
fn test_tlv() {
    let good_wire = [0x04, 0x44, 0x00, 0x04, 0xff, 0xff, 0xff, 0xff, 0x01];
    let (remainder, tlv) = Tlv::from_wire(Span::new(&good_wire)).unwrap();
    assert_eq!(tlv.code(), 1092);
    assert_eq!(tlv.length(), 4);
    assert_eq!(tlv.value().fragment(), &&[0xff, 0xff, 0xff, 0xff][..]);
    assert_eq!(tlv.value().location_offset(), 4);
    assert_eq!(remainder.location_offset(), 8);
    assert_eq!(remainder.fragment(), &&[0x01][..]);
}

#[test]
fn test_tlv_empty_value() {
    let good_wire = [0xff, 0xff, 0x00, 0x00];
    let (remainder, tlv) = Tlv::from_wire(Span::new(&good_wire)).unwrap();
    assert_eq!(tlv.code(), 0xffff);
    assert_eq!(tlv.length(), 0);
    assert!(tlv.value().is_empty());
    assert!(remainder.is_empty());
}

#[test]
fn test_tlv_truncated() {
    let bad_header_wire = [0x04, 0x44, 0x00];
    let bad_value_wire = [0x04, 0x44, 0x00, 0x04, 0xff, 0xff];

    let bad_header = LocatedTlvParsingError::new(
        span_at(&bad_header_wire, 0),
        TlvParsingError::TruncatedHeader { found: 3 },
    );
    let bad_value = LocatedTlvParsingError::new(
        span_at(&bad_value_wire, 4),
        TlvParsingError::TruncatedValue {
            declared: 4,
            found: 2,
        },
    );

    test_parse_error::<Tlv<'_>, LocatedTlvParsingError<'_>>(&bad_header_wire, &bad_header);
    test_parse_error::<Tlv<'_>, LocatedTlvParsingError<'_>>(&bad_value_wire, &bad_value);
}

#[test]
fn test_tlv_iter() {
    let good_wire = [
        0x01, 0x07, 0x00, 0x02, 0x00, 0x01, 0xff, 0xff, 0x00, 0x00, 0x04, 0x44, 0x00, 0x01, 0x0a,
    ];
    let tlvs = TlvIter::new(Span::new(&good_wire))
        .map(|tlv| tlv.map(|tlv| (tlv.code(), tlv.value().fragment().to_vec())))
        .collect::<Result<Vec<_>, _>>();
    assert_eq!(
        tlvs,
        Ok(vec![
            (263, vec![0x00, 0x01]),
            (0xffff, vec![]),
            (1092, vec![0x0a]),
        ])
    );
}

#[test]
fn test_tlv_iter_empty() {
    let empty: [u8; 0] = [];
    let mut iter = TlvIter::new(Span::new(&empty));
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_tlv_iter_stops_after_error() {
    let bad_wire = [0x01, 0x07, 0x00, 0x00, 0x01, 0x07, 0x00];
    let mut iter = TlvIter::new(Span::new(&bad_wire));

    let first = iter.next();
    assert!(matches!(first, Some(Ok(tlv)) if tlv.code() == 263 && tlv.length() == 0));
    assert_eq!(
        iter.next(),
        Some(Err(LocatedTlvParsingError::new(
            span_at(&bad_wire, 4),
            TlvParsingError::TruncatedHeader { found: 3 },
        )))
    );
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_tlv_iter_restart() {
    let good_wire = [0x01, 0x07, 0x00, 0x00, 0x04, 0x44, 0x00, 0x00];
    let mut iter = TlvIter::new(Span::new(&good_wire));
    assert!(iter.next().is_some());

    let restarted = iter.clone();
    assert_eq!(restarted.remaining().location_offset(), 4);
    let codes = restarted
        .map(|tlv| tlv.map(|tlv| tlv.code()))
        .collect::<Result<Vec<_>, _>>();
    assert_eq!(codes, Ok(vec![1092]));

    let codes = iter
        .map(|tlv| tlv.map(|tlv| tlv.code()))
        .collect::<Result<Vec<_>, _>>();
    assert_eq!(codes, Ok(vec![1092]));
}

#[test]
fn test_tlv_parsing_error_sub_code() {
    use crate::iana::UpdateMessageErrorSubCode;
    assert_eq!(
        TlvParsingError::TruncatedHeader { found: 0 }.sub_code(),
        UpdateMessageErrorSubCode::AttributeLengthError
    );
    assert_eq!(
        TlvParsingError::TruncatedValue {
            declared: 4,
            found: 0
        }
        .sub_code(),
        UpdateMessageErrorSubCode::AttributeLengthError
    );
}
