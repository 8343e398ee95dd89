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

use thiserror::Error;

/// Failure to convert a value to or from bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The value could not be encoded.
    #[error("{codec} marshal failed: {reason}")]
    Marshal {
        /// Name of the codec that failed.
        codec: &'static str,
        /// Codec-specific description.
        reason: String,
    },
    /// The bytes could not be decoded into the requested type.
    #[error("{codec} unmarshal failed: {reason}")]
    Unmarshal {
        /// Name of the codec that failed.
        codec: &'static str,
        /// Codec-specific description.
        reason: String,
    },
}

/// Failure to turn a [`Payload`](crate::Payload) into a handler's argument type.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// A local payload holds a different type than the handler expects.
    #[error("payload type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The handler's argument type.
        expected: &'static str,
        /// The type carried by the payload.
        found: &'static str,
    },
    /// A byte payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] SerializeError),
}

/// Failure to parse an [`ActorPath`](crate::ActorPath).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string is empty.
    #[error("actor path is empty")]
    Empty,
    /// One of the dot-separated segments is empty.
    #[error("actor path `{0}` has an empty segment")]
    EmptySegment(String),
    /// More than `node.actor.child` segments.
    #[error("actor path `{0}` has too many segments")]
    TooManySegments(String),
}

/// Rejected handler registration. Rejections are logged and never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The function name is empty after normalization.
    #[error("handler name is empty")]
    EmptyName,
    /// A handler is already registered under the normalized name.
    #[error("handler `{0}` is already registered")]
    Duplicate(String),
}
