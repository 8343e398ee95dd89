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

use std::any::Any;
use std::fmt::Debug;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ember_core::{now_millis, ActorPath, Codec, EmberMessage, Envelope};
use futures::FutureExt;
use serde::Serialize;
use tracing::{error, instrument, trace, warn};

use crate::actor::ManagedActor;
use crate::common::ActorHandle;
use crate::message::CallError;
use crate::traits::ActorFacade;

/// Type-state marker for a [`ManagedActor`] whose run-loop is draining its mailbox.
///
/// Handlers receive the actor in this state and may mutate [`ManagedActor::model`]
/// freely: no two messages for the same actor ever run concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Started;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

impl<Model: Default + Send + Debug + 'static> ManagedActor<Started, Model> {
    /// This actor's handle, while it is in the runtime directory.
    pub fn handle(&self) -> Option<ActorHandle> {
        self.runtime.find(&self.path.to_string())
    }

    /// Stops accepting new messages; what is already queued still runs, then the
    /// run-loop ends.
    pub fn close_mailbox(&self) {
        trace!(actor = %self.path, "Closing own mailbox");
        self.mailbox.queue().close();
    }

    #[instrument(skip(self), fields(actor = %self.path))]
    pub(crate) async fn wake(&mut self) {
        let on_start = (self.after_start)(&*self);
        on_start.await;

        loop {
            let Some(envelope) = self.mailbox.dequeue().await else {
                break;
            };
            self.dispatch(envelope).await;
        }

        trace!("Mailbox closed, leaving run-loop");
        self.mailbox.shutdown();
        self.runtime.deregister_actor(&self.path);
        let on_stop = (self.after_stop)(&*self);
        on_stop.await;
        trace!("Actor stopped");
    }

    async fn dispatch(&mut self, envelope: Envelope) {
        let arrival_warn = self.runtime.config().arrival_warn();
        let handler_warn = self.runtime.config().handler_warn();

        if let (Some(threshold), Some(enqueued)) = (arrival_warn, envelope.enqueue_time_millis()) {
            let waited = Duration::from_millis(now_millis().saturating_sub(enqueued).max(0) as u64);
            if waited > threshold {
                warn!(
                    func_name = envelope.func_name(),
                    waited_ms = waited.as_millis() as u64,
                    "Message waited too long in mailbox"
                );
            }
        }

        let Some(descriptor) = self.mailbox.resolve(&envelope) else {
            return;
        };
        let handler = Arc::clone(descriptor.handler());
        let started = Instant::now();

        let future = match catch_unwind(AssertUnwindSafe(|| handler(self, envelope))) {
            Ok(future) => future,
            Err(panic) => {
                error!(
                    func_name = descriptor.name(),
                    panic = panic_message(panic.as_ref()),
                    "Handler panicked, message dropped"
                );
                return;
            }
        };
        if let Err(panic) = AssertUnwindSafe(future).catch_unwind().await {
            error!(
                func_name = descriptor.name(),
                panic = panic_message(panic.as_ref()),
                "Handler panicked, message dropped"
            );
        }

        let elapsed = started.elapsed();
        if let Some(threshold) = handler_warn {
            if elapsed > threshold {
                warn!(
                    func_name = descriptor.name(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Handler ran too long"
                );
            }
        }
    }
}

impl<Model: Default + Send + Debug + 'static> ActorFacade for ManagedActor<Started, Model> {
    type Codec = Codec;

    fn serializer(&self) -> &Self::Codec {
        self.runtime.codec()
    }

    fn self_path(&self) -> Option<&ActorPath> {
        Some(&self.path)
    }

    fn call<M>(&self, target_path: &str, func_name: &str, message: M) -> Result<(), CallError>
    where
        M: EmberMessage + Serialize,
    {
        self.runtime
            .route(Some(&self.path), target_path, func_name, message)
    }
}
