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

use attrgauze_bgp_attr::{config::CodecFlags, path_attribute::PathAttribute};
use attrgauze_parse_utils::WritablePduWithOneInput;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: (PathAttribute, bool)| {
    let (attribute, asn4) = data;
    let flags = CodecFlags::new(asn4);
    let mut buf: Vec<u8> = vec![];
    let mut cursor = Cursor::new(&mut buf);
    let _ = attribute.write(&mut cursor, &flags);
});
