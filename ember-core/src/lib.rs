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

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Ember Core
//!
//! The mailbox primitive underneath the Ember actor runtime. Every actor owns one
//! [`Mailbox`]: an ordered [`MessageQueue`] fed by any number of producers and
//! drained by the actor's single run-loop, plus a [`HandlerRegistry`] that maps
//! function names to handlers so that messages are dispatched by name rather than
//! by static method binding.
//!
//! ## Key Concepts
//!
//! - **Envelopes (`Envelope`)**: the unit moved through a mailbox. Carries the target
//!   function name, a [`Payload`] and routing metadata.
//! - **Queues (`MessageQueue`)**: strict FIFO, unbounded, with `open`, `closing` and
//!   `closed` states. Pushing to a queue that is no longer open drops the envelope.
//! - **Registries (`HandlerRegistry`)**: write-once name tables. Dotted names are
//!   normalized to their last segment, the first registration of a name wins.
//! - **Serializers (`Serializer`)**: the pluggable codec contract used to turn
//!   application values into bytes and back.

pub use envelope::{now_millis, Envelope, EnvelopeHeader, Payload};
pub use error::{PathError, PayloadError, RegistrationError, SerializeError};
pub use mailbox::Mailbox;
pub use message::EmberMessage;
pub use path::{ActorPath, PATH_SEPARATOR};
pub use queue::{MessageQueue, QueueState};
pub use registry::{normalize_func_name, HandlerDescriptor, HandlerRegistry};
pub use serializer::{BincodeSerializer, Codec, JsonSerializer, Serializer};

mod envelope;
mod error;
mod mailbox;
mod message;
mod path;
mod queue;
mod registry;
mod serializer;

/// Commonly used items, re-exported for glob import.
pub mod prelude {
    pub use crate::{
        ActorPath, Codec, EmberMessage, Envelope, HandlerRegistry, Mailbox, MessageQueue,
        Payload, QueueState, Serializer,
    };
}
