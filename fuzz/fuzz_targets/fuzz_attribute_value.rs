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

#![no_main]
extern crate libfuzzer_sys;
use attrgauze_bgp_attr::{
    codec::{decode_attribute, encode_attribute_value},
    config::CodecFlags,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, &[u8], bool)| {
    let (code, buf, asn4) = data;
    let flags = CodecFlags::new(asn4);
    if let Ok(value) = decode_attribute(code, buf, &flags) {
        let encoded = encode_attribute_value(&value, &flags);
        assert!(encoded.is_ok(), "decoded value failed to encode: {value:?}");
    }
});
