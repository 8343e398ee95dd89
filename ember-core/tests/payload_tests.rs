/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use bytes::Bytes;
use ember_core::prelude::*;
use ember_core::{BincodeSerializer, JsonSerializer, PayloadError, SerializeError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Login {
    uid: i64,
    token: String,
}

fn login() -> Login {
    Login {
        uid: 7,
        token: "abc".to_string(),
    }
}

#[test]
fn local_payload_is_downcast_without_serialization() {
    let payload = Payload::local(login());
    assert!(!payload.is_bytes());
    assert_eq!(payload.type_name(), std::any::type_name::<Login>());

    let decoded: Login = payload.decode(&JsonSerializer).expect("same type");
    assert_eq!(decoded, login());
}

#[test]
fn local_payload_of_another_type_is_a_mismatch() {
    let payload = Payload::local(42u32);
    match payload.decode::<Login, _>(&JsonSerializer) {
        Err(PayloadError::TypeMismatch { expected, found }) => {
            assert_eq!(expected, std::any::type_name::<Login>());
            assert_eq!(found, std::any::type_name::<u32>());
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }
}

#[test]
fn byte_payloads_are_unmarshalled_with_the_codec() {
    for codec in [Codec::Json, Codec::Bincode] {
        let data = codec.marshal(&login()).expect("marshal");
        let decoded: Login = Payload::bytes(data).decode(&codec).expect("unmarshal");
        assert_eq!(decoded, login());
    }
}

#[test]
fn byte_payloads_pass_through_as_bytes() {
    let raw = Bytes::from_static(b"\x00not json");
    let decoded: Bytes = Payload::bytes(raw.clone())
        .decode(&JsonSerializer)
        .expect("raw bytes need no codec");
    assert_eq!(decoded, raw);
}

#[test]
fn undecodable_bytes_report_the_codec() {
    let result = Payload::bytes(&b"{not json"[..]).decode::<Login, _>(&JsonSerializer);
    match result {
        Err(PayloadError::Decode(SerializeError::Unmarshal { codec, .. })) => {
            assert_eq!(codec, "json");
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn codec_matches_its_backing_serializer() {
    assert_eq!(Codec::default(), Codec::Json);
    assert_eq!(Codec::Json.name(), JsonSerializer.name());
    assert_eq!(
        Codec::Bincode.marshal(&login()).unwrap(),
        BincodeSerializer.marshal(&login()).unwrap()
    );
}

#[test]
fn envelope_builders_fill_the_header() {
    let envelope = Envelope::local("OnLogin", login())
        .with_source("node.gate")
        .with_session("s-1", 7);
    assert!(envelope.is_valid());
    assert_eq!(envelope.source(), Some("node.gate"));
    assert_eq!(envelope.session_id(), Some("s-1"));
    assert_eq!(envelope.user_id(), Some(7));

    let (header, payload) = envelope.into_parts();
    assert_eq!(header.func_name, "OnLogin");
    assert!(header.enqueue_time_millis().is_none());
    assert_eq!(payload.decode::<Login, _>(&JsonSerializer).unwrap(), login());
}
