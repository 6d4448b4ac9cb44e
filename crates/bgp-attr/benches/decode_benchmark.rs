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

use attrgauze_bgp_attr::{
    codec::{decode_attribute, encode_attribute_value},
    config::CodecFlags,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const AS_PATH: u8 = 2;
const BGP_LS: u8 = 29;

/// One AS_SEQUENCE segment carrying `count` four octets AS numbers
fn as4_path_wire(count: u8) -> Vec<u8> {
    let mut wire = vec![0x02, count];
    for as_num in 0..u32::from(count) {
        wire.extend_from_slice(&(4_200_000_000 + as_num).to_be_bytes());
    }
    wire
}

/// ASLA TLV with both masks and a TE metric sub-TLV, followed by a Flexible
/// Algorithm Definition with a flags sub-TLV
fn link_state_wire() -> Vec<u8> {
    vec![
        0x04, 0x62, 0x00, 0x14, 0x04, 0x04, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x04, 0x44, 0x00, 0x04, 0xff, 0xff, 0xff, 0xff, 0x04, 0x0f, 0x00, 0x0a, 0x80, 0x01,
        0x00, 0x80, 0x04, 0x13, 0x00, 0x02, 0x80, 0x00,
    ]
}

fn decode_benchmark(c: &mut Criterion) {
    let flags = CodecFlags::new(true);
    let mut group = c.benchmark_group("decode_as_path");
    for count in [1u8, 16, 255] {
        let wire = as4_path_wire(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &wire, |b, wire| {
            b.iter(|| decode_attribute(AS_PATH, black_box(wire), &flags))
        });
    }
    group.finish();

    let wire = link_state_wire();
    c.bench_function("decode_link_state", |b| {
        b.iter(|| decode_attribute(BGP_LS, black_box(&wire), &flags))
    });
}

fn encode_benchmark(c: &mut Criterion) {
    let flags = CodecFlags::new(true);
    let wire = link_state_wire();
    let Ok(value) = decode_attribute(BGP_LS, &wire, &flags) else {
        panic!("benchmark fixture must decode");
    };
    c.bench_function("encode_link_state", |b| {
        b.iter(|| encode_attribute_value(black_box(&value), &flags))
    });
}

criterion_group!(benches, decode_benchmark, encode_benchmark);
criterion_main!(benches);
