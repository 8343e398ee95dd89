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

//! # Ember Actor
//!
//! The actor runtime of the Ember game-server framework. Every player session, room or
//! service is an actor: an independently scheduled task that drains its own FIFO
//! mailbox one message at a time. Messages name the handler they target, so any actor
//! that registered a matching name can receive them, on this node or, through a
//! [`RemoteTransport`](crate::prelude::RemoteTransport), on another.
//!
//! ## Key Concepts
//!
//! - **Runtime (`ActorRuntime`)**: owns the node id, codec, configuration and the
//!   directory of running actors; routes `call`s to local mailboxes or the remote seam.
//! - **Actors (`ManagedActor`)**: type-state wrappers around user state. Handlers are
//!   registered by name while `Idle`; `start` hands the actor to its run-loop.
//! - **Handles (`ActorHandle`)**: push envelopes, stop or drain a running actor.
//! - **Facade (`ActorFacade`)**: the `call(path, func, message)` contract shared by the
//!   runtime and running actors.
//! - **Pomelo protocol (`PomeloActor`)**: `response`, `response_code`, `push`, `kick`
//!   and `broadcast` notifications sent to a connection-owning agent actor.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ember_actor::prelude::*;
//!
//! #[ember_message]
//! struct Login { uid: i64 }
//!
//! #[ember_actor]
//! struct Room { online: usize }
//!
//! let runtime = EmberApp::launch();
//! let mut room = runtime.new_actor::<Room>("room")?;
//! room.register::<Login>("room.Room.OnLogin", |actor, _ctx| {
//!     actor.model.online += 1;
//!     Reply::ready()
//! });
//! let handle = room.start().await?;
//! runtime.call("node.room", "OnLogin", Login { uid: 7 })?;
//! ```

/// Runtime, handles, configuration and logging.
pub(crate) mod common;

/// Type-state managed actors and their run-loop.
pub(crate) mod actor;

/// Handler context, remote envelopes and call errors.
pub(crate) mod message;

/// The facade and transport seams.
pub(crate) mod traits;

/// Runtime configuration types.
pub use common::config;

/// Pomelo client protocol notifications.
pub mod pomelo;

/// Re-exports used by code generated from `ember-macro`. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use serde;
}

/// The most commonly used items.
///
/// # Re-exports
///
/// ## Macros (from `ember-macro`)
/// *   [`ember_macro::ember_message`]: derive what a message type needs.
/// *   [`ember_macro::ember_actor`]: derive what an actor state type needs.
///
/// ## Core (from `ember-core`)
/// *   [`ember_core::ActorPath`], [`ember_core::Envelope`], [`ember_core::Payload`],
///     [`ember_core::Codec`], [`ember_core::Serializer`] and friends.
///
/// ## Runtime
/// *   [`crate::common::EmberApp`], [`crate::common::ActorRuntime`],
///     [`crate::common::ActorHandle`], [`crate::common::Reply`],
///     [`crate::common::EmberConfig`], [`crate::common::init_tracing`].
/// *   [`crate::actor::ManagedActor`], [`crate::actor::Idle`], [`crate::actor::Started`].
/// *   [`crate::message::MessageContext`], [`crate::message::RemoteEnvelope`],
///     [`crate::message::CallError`].
/// *   [`crate::traits::ActorFacade`], [`crate::traits::RemoteTransport`].
/// *   [`crate::pomelo::PomeloActor`], [`crate::pomelo::Session`].
pub mod prelude {
    pub use ember_macro::*;

    pub use ember_core::{
        ActorPath, BincodeSerializer, Codec, EmberMessage, Envelope, JsonSerializer,
        Payload, QueueState, SerializeError, Serializer,
    };

    pub use crate::actor::{Idle, ManagedActor, Started};
    pub use crate::common::{
        init_tracing, ActorHandle, ActorRuntime, EmberApp, EmberConfig, FutureBox, Reply,
        RuntimeError,
    };
    pub use crate::message::{CallError, MessageContext, RemoteEnvelope};
    pub use crate::pomelo::{PomeloActor, Session};
    pub use crate::traits::{ActorFacade, RemoteTransport};
}
