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

use std::any::type_name;
use std::fmt::Debug;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use ember_core::{ActorPath, Codec, EmberMessage, Envelope, Mailbox};
use serde::de::DeserializeOwned;
use tokio_util::task::TaskTracker;
use tracing::{debug, instrument, trace, warn};

use crate::actor::{ManagedActor, Started};
use crate::common::{ActorHandle, ActorRuntime, FutureBox, HandlerFn, Reply, RuntimeError};
use crate::message::MessageContext;

/// Type-state marker for a [`ManagedActor`] that is being configured.
///
/// Handlers and lifecycle hooks can only be added in this state; [`ManagedActor::start`]
/// consumes the idle actor and hands it to its run-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idle;

impl<Model: Default + Send + Debug + 'static> ManagedActor<Idle, Model> {
    pub(crate) fn new(path: ActorPath, runtime: ActorRuntime) -> Self {
        ManagedActor {
            mailbox: Mailbox::new(path.to_string()),
            path,
            runtime,
            model: Model::default(),
            tracker: TaskTracker::new(),
            after_start: Box::new(|_: &ManagedActor<Started, Model>| Reply::ready()),
            after_stop: Box::new(|_: &ManagedActor<Started, Model>| Reply::ready()),
            _actor_state: PhantomData,
        }
    }

    /// Registers `handler` for envelopes sent to `func_name`.
    ///
    /// The name is normalized to its last dot-separated segment, so
    /// `"room.Room.OnLogin"` is reached by calls to `"OnLogin"`. The first registration
    /// of a name wins; empty or duplicate names are logged and ignored.
    ///
    /// Local payloads are downcast to `M` and serialized payloads from other nodes are
    /// decoded with the runtime codec. A payload that fits neither is logged and dropped
    /// without reaching the handler.
    #[instrument(skip(self, handler), fields(actor = %self.path), level = "debug")]
    pub fn register<M>(
        &mut self,
        func_name: &str,
        handler: impl for<'a> Fn(&'a mut ManagedActor<Started, Model>, &'a mut MessageContext<M>) -> FutureBox
            + Send
            + Sync
            + 'static,
    ) -> &mut Self
    where
        M: EmberMessage + DeserializeOwned,
    {
        trace!(message_type = type_name::<M>(), "Adding message handler");
        let adapter: Arc<HandlerFn<Model>> = Arc::new(
            move |actor: &mut ManagedActor<Started, Model>, envelope: Envelope| -> FutureBox {
                let (header, payload) = envelope.into_parts();
                let found = payload.type_name();
                match payload.decode::<M, Codec>(actor.runtime.codec()) {
                    Ok(message) => {
                        let mut context = MessageContext::new(message, header);
                        handler(actor, &mut context)
                    }
                    Err(e) => {
                        warn!(
                            actor = %actor.path,
                            func_name = header.func_name.as_str(),
                            expected = type_name::<M>(),
                            found,
                            error = %e,
                            "Malformed message dropped"
                        );
                        Reply::ready()
                    }
                }
            },
        );
        // Rejections are logged by the registry.
        let _ = self.mailbox.register::<M>(func_name, adapter);
        self
    }

    /// Sets the hook run by the run-loop before the first message is handled.
    pub fn after_start<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, Model>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.after_start = Box::new(move |actor: &ManagedActor<Started, Model>| Box::pin(f(actor)) as FutureBox);
        self
    }

    /// Sets the hook run once the mailbox is shut down and the actor left the directory.
    pub fn after_stop<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: for<'b> Fn(&'b ManagedActor<Started, Model>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.after_stop = Box::new(move |actor: &ManagedActor<Started, Model>| Box::pin(f(actor)) as FutureBox);
        self
    }

    /// Normalized names of the registered handlers, in no particular order.
    pub fn handler_names(&self) -> Vec<String> {
        self.mailbox.registry().names().map(str::to_owned).collect()
    }

    /// Adds the actor to the runtime directory and spawns its run-loop.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::DuplicateActor`] if another actor with the same path started
    /// first; the idle actor is dropped.
    #[instrument(skip(self), fields(actor = %self.path))]
    pub async fn start(self) -> Result<ActorHandle, RuntimeError> {
        let handle = ActorHandle::new(
            self.path.clone(),
            self.mailbox.queue().clone(),
            self.tracker.clone(),
            self.runtime.config().actor_shutdown_timeout(),
        );
        self.runtime.register_actor(handle.clone())?;

        let tracker = self.tracker.clone();
        let mut actor: ManagedActor<Started, Model> = self.into();
        tracker.spawn(async move { actor.wake().await });
        tracker.close();
        debug!("Actor started");

        Ok(handle)
    }
}

impl<Model: Default + Send + Debug + 'static> From<ManagedActor<Idle, Model>>
    for ManagedActor<Started, Model>
{
    fn from(value: ManagedActor<Idle, Model>) -> Self {
        ManagedActor::<Started, Model> {
            path: value.path,
            runtime: value.runtime,
            model: value.model,
            mailbox: value.mailbox,
            tracker: value.tracker,
            after_start: value.after_start,
            after_stop: value.after_stop,
            _actor_state: PhantomData,
        }
    }
}
