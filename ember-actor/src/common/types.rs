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

use std::future::Future;
use std::pin::Pin;

use ember_core::{Envelope, Mailbox};

use crate::actor::{ManagedActor, Started};

/// Pinned, boxed future returned by handlers and lifecycle hooks.
pub type FutureBox = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Call adapter stored in an actor's registry: decodes the envelope and runs the
/// user handler against the started actor.
pub(crate) type HandlerFn<Model> = dyn for<'a> Fn(&'a mut ManagedActor<Started, Model>, Envelope) -> FutureBox
    + Send
    + Sync
    + 'static;

/// The mailbox type owned by a managed actor.
pub(crate) type ActorMailbox<Model> = Mailbox<HandlerFn<Model>>;

/// Boxed lifecycle hook (`after_start`, `after_stop`).
pub(crate) type AsyncLifecycleHandler<Model> =
    Box<dyn Fn(&ManagedActor<Started, Model>) -> FutureBox + Send + Sync + 'static>;

