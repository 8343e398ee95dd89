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

use std::hash::{Hash, Hasher};
use std::time::Duration;

use anyhow::anyhow;
use ember_core::{ActorPath, EmberMessage, Envelope, MessageQueue};
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

/// A cloneable reference to a running actor.
///
/// Handles push envelopes straight into the actor's mailbox and control its shutdown.
/// Two handles are equal when they address the same path.
#[derive(Debug, Clone)]
pub struct ActorHandle {
    path: ActorPath,
    queue: MessageQueue,
    /// Tracks the actor's run-loop task.
    tracker: TaskTracker,
    shutdown_timeout: Duration,
}

impl PartialEq for ActorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ActorHandle {}

impl Hash for ActorHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl ActorHandle {
    pub(crate) fn new(
        path: ActorPath,
        queue: MessageQueue,
        tracker: TaskTracker,
        shutdown_timeout: Duration,
    ) -> Self {
        ActorHandle {
            path,
            queue,
            tracker,
            shutdown_timeout,
        }
    }

    /// The actor's full path.
    pub fn path(&self) -> &ActorPath {
        &self.path
    }

    /// The actor's name: the last path segment.
    pub fn name(&self) -> &str {
        self.path.child_id().unwrap_or(self.path.actor_id())
    }

    /// Pushes an envelope into the actor's mailbox.
    ///
    /// Returns `false` when the envelope has no function name or the mailbox no longer
    /// accepts messages; the envelope is dropped in both cases.
    pub fn enqueue(&self, envelope: Envelope) -> bool {
        self.queue.push(envelope)
    }

    /// Wraps `message` in a local envelope for `func_name` and enqueues it.
    pub fn send<M: EmberMessage>(&self, func_name: &str, message: M) -> bool {
        self.enqueue(Envelope::local(func_name, message))
    }

    /// Number of envelopes waiting in the mailbox.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` while the actor's run-loop has not finished.
    pub fn is_alive(&self) -> bool {
        !self.tracker.is_empty()
    }

    /// Destroys the mailbox and waits for the run-loop to finish.
    ///
    /// Pending envelopes are discarded. A handler already running is not interrupted;
    /// it is awaited, bounded by the configured actor shutdown timeout.
    #[instrument(skip(self), fields(actor = %self.path))]
    pub async fn stop(&self) -> anyhow::Result<()> {
        trace!("Destroying mailbox");
        self.queue.destroy();
        self.wait().await
    }

    /// Closes the mailbox, lets pending envelopes run and waits for the run-loop to finish.
    #[instrument(skip(self), fields(actor = %self.path))]
    pub async fn drain_and_stop(&self) -> anyhow::Result<()> {
        trace!(pending = self.queue.len(), "Closing mailbox for drain");
        self.queue.close();
        self.wait().await
    }

    async fn wait(&self) -> anyhow::Result<()> {
        tokio::time::timeout(self.shutdown_timeout, self.tracker.wait())
            .await
            .map_err(|_| {
                anyhow!(
                    "actor {} did not stop within {} ms",
                    self.path,
                    self.shutdown_timeout.as_millis()
                )
            })?;
        trace!("The actor has been terminated.");
        Ok(())
    }
}
