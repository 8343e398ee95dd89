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

use std::any::{Any, TypeId};
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use static_assertions::assert_impl_all;

use crate::error::PayloadError;
use crate::message::EmberMessage;
use crate::serializer::Serializer;

/// Milliseconds since the Unix epoch, as used for envelope timestamps.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// The data carried by an [`Envelope`].
#[derive(Debug, Clone)]
pub enum Payload {
    /// A typed value delivered within the process, never serialized.
    Local(Box<dyn EmberMessage>),
    /// Pre-serialized data, typically received from another node.
    Bytes(Bytes),
}

impl Payload {
    /// Wraps a typed value for local delivery.
    pub fn local<M: EmberMessage>(message: M) -> Self {
        Payload::Local(Box::new(message))
    }

    /// Wraps already serialized data.
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        Payload::Bytes(data.into())
    }

    /// Name of the carried type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Payload::Local(message) => (**message).type_name(),
            Payload::Bytes(_) => std::any::type_name::<Bytes>(),
        }
    }

    /// Returns `true` if the payload is pre-serialized data.
    pub fn is_bytes(&self) -> bool {
        matches!(self, Payload::Bytes(_))
    }

    /// Converts the payload into an owned `M`.
    ///
    /// Local payloads are downcast. Byte payloads are handed over untouched when `M`
    /// is [`Bytes`] and unmarshalled through `serializer` otherwise.
    pub fn decode<M, S>(self, serializer: &S) -> Result<M, PayloadError>
    where
        M: DeserializeOwned + 'static,
        S: Serializer,
    {
        match self {
            Payload::Local(message) => {
                let found = (*message).type_name();
                message
                    .into_any()
                    .downcast::<M>()
                    .map(|concrete| *concrete)
                    .map_err(|_| PayloadError::TypeMismatch {
                        expected: std::any::type_name::<M>(),
                        found,
                    })
            }
            Payload::Bytes(data) => {
                if TypeId::of::<M>() == TypeId::of::<Bytes>() {
                    let raw: Box<dyn Any> = Box::new(data);
                    return raw
                        .downcast::<M>()
                        .map(|concrete| *concrete)
                        .map_err(|_| PayloadError::TypeMismatch {
                            expected: std::any::type_name::<M>(),
                            found: std::any::type_name::<Bytes>(),
                        });
                }
                Ok(serializer.unmarshal::<M>(&data)?)
            }
        }
    }
}

/// Routing and audit metadata of an [`Envelope`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeHeader {
    /// Handler name to invoke on the receiving actor.
    pub func_name: String,
    /// Path of the sending actor, if the message came from one.
    pub source: Option<String>,
    /// Session the message belongs to.
    pub session_id: Option<String>,
    /// User the message belongs to.
    pub user_id: Option<i64>,
    enqueue_time_millis: Option<i64>,
}

impl EnvelopeHeader {
    /// When the envelope was accepted by a queue, if it has been.
    pub fn enqueue_time_millis(&self) -> Option<i64> {
        self.enqueue_time_millis
    }
}

/// The unit moved through a mailbox.
///
/// The enqueue timestamp is stamped by [`MessageQueue::push`](crate::MessageQueue::push)
/// at the moment the envelope is accepted, and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Envelope {
    header: EnvelopeHeader,
    payload: Payload,
}

impl Envelope {
    /// Creates an envelope for `func_name` carrying `payload`.
    pub fn new(func_name: impl Into<String>, payload: Payload) -> Self {
        Envelope {
            header: EnvelopeHeader {
                func_name: func_name.into(),
                ..EnvelopeHeader::default()
            },
            payload,
        }
    }

    /// Creates an envelope carrying a typed value for local delivery.
    pub fn local<M: EmberMessage>(func_name: impl Into<String>, message: M) -> Self {
        Self::new(func_name, Payload::local(message))
    }

    /// Sets the sending actor's path.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.header.source = Some(source.into());
        self
    }

    /// Sets session and user metadata.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>, user_id: i64) -> Self {
        self.header.session_id = Some(session_id.into());
        self.header.user_id = Some(user_id);
        self
    }

    /// An envelope without a function name cannot be dispatched and is never enqueued.
    pub fn is_valid(&self) -> bool {
        !self.header.func_name.is_empty()
    }

    /// The handler name this envelope targets.
    pub fn func_name(&self) -> &str {
        &self.header.func_name
    }

    /// The carried data.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The routing metadata.
    pub fn header(&self) -> &EnvelopeHeader {
        &self.header
    }

    /// Path of the sending actor.
    pub fn source(&self) -> Option<&str> {
        self.header.source.as_deref()
    }

    /// Session id, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.header.session_id.as_deref()
    }

    /// User id, if any.
    pub fn user_id(&self) -> Option<i64> {
        self.header.user_id
    }

    /// When the envelope was accepted by a queue.
    pub fn enqueue_time_millis(&self) -> Option<i64> {
        self.header.enqueue_time_millis
    }

    /// Splits the envelope into metadata and payload.
    pub fn into_parts(self) -> (EnvelopeHeader, Payload) {
        (self.header, self.payload)
    }

    pub(crate) fn stamp(&mut self, millis: i64) {
        if self.header.enqueue_time_millis.is_none() {
            self.header.enqueue_time_millis = Some(millis);
        }
    }
}

assert_impl_all!(Envelope: Send, Sync);
assert_impl_all!(Payload: Send, Sync, Clone);
