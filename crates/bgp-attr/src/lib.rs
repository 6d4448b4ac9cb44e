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

//! BGP path attribute codecs for `AS_PATH`, `AS4_PATH` and the BGP Link-State
//! attribute.
//!
//! Raw attribute octets are decoded into typed values, and typed values are
//! written back to the wire. Every decoding failure is classified with the
//! UPDATE Message Error sub-code that the session layer sends to the peer in
//! a NOTIFICATION message.
//!
//! ```rust
//! use attrgauze_bgp_attr::{
//!     codec::{decode_attribute, encode_attribute},
//!     config::CodecFlags,
//!     iana::UpdateMessageErrorSubCode,
//! };
//!
//! let flags = CodecFlags::new(false);
//! let raw = [0x02, 0x04, 0x0c, 0xb9, 0x79, 0x33, 0x88, 0x20, 0x53, 0xd9];
//! let value = decode_attribute(2, &raw, &flags).unwrap();
//! assert_eq!(value.display_name(), "as_path");
//!
//! let wire = encode_attribute(value, &flags).unwrap();
//! assert_eq!(&wire[..3], &[0x40, 0x02, 0x0a]);
//! assert_eq!(&wire[3..], &raw);
//!
//! let err = decode_attribute(2, &[0x05, 0x01, 0x00, 0x01], &flags).unwrap_err();
//! assert_eq!(err.sub_code(), UpdateMessageErrorSubCode::MalformedAsPath);
//! ```

#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![deny(unreachable_pub)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod export;
pub mod iana;
pub mod link_state;
pub mod path_attribute;
pub mod registry;
pub mod wire;
