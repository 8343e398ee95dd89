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

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SerializeError;

/// The pluggable codec contract.
///
/// Only `marshal` matters to the protocol layer; `unmarshal` is used by actors that
/// receive pre-serialized payloads from other nodes.
pub trait Serializer: Send + Sync + Debug {
    /// Short codec name for diagnostics.
    fn name(&self) -> &'static str;

    /// Encodes `value`.
    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializeError>;

    /// Decodes `data` into a `T`.
    fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, SerializeError>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializeError> {
        serde_json::to_vec(value).map_err(|e| SerializeError::Marshal {
            codec: self.name(),
            reason: e.to_string(),
        })
    }

    fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, SerializeError> {
        serde_json::from_slice(data).map_err(|e| SerializeError::Unmarshal {
            codec: self.name(),
            reason: e.to_string(),
        })
    }
}

/// Compact binary codec backed by `bincode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BincodeSerializer;

impl Serializer for BincodeSerializer {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializeError> {
        bincode::serialize(value).map_err(|e| SerializeError::Marshal {
            codec: self.name(),
            reason: e.to_string(),
        })
    }

    fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, SerializeError> {
        bincode::deserialize(data).map_err(|e| SerializeError::Unmarshal {
            codec: self.name(),
            reason: e.to_string(),
        })
    }
}

/// Configuration-selectable codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// [`JsonSerializer`].
    #[default]
    Json,
    /// [`BincodeSerializer`].
    Bincode,
}

impl Serializer for Codec {
    fn name(&self) -> &'static str {
        match self {
            Codec::Json => JsonSerializer.name(),
            Codec::Bincode => BincodeSerializer.name(),
        }
    }

    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SerializeError> {
        match self {
            Codec::Json => JsonSerializer.marshal(value),
            Codec::Bincode => BincodeSerializer.marshal(value),
        }
    }

    fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, SerializeError> {
        match self {
            Codec::Json => JsonSerializer.unmarshal(data),
            Codec::Bincode => BincodeSerializer.unmarshal(data),
        }
    }
}
