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

use std::fmt;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::envelope::Envelope;
use crate::error::RegistrationError;
use crate::queue::{MessageQueue, QueueState};
use crate::registry::{HandlerDescriptor, HandlerRegistry};

/// The per-actor composite of an ordered queue and a handler registry.
///
/// Producers reach the mailbox through clones of [`queue`](Self::queue); the mailbox
/// itself, with its registry, is owned by the actor's run-loop.
pub struct Mailbox<H: ?Sized> {
    name: String,
    queue: MessageQueue,
    registry: HandlerRegistry<H>,
}

impl<H: ?Sized> fmt::Debug for Mailbox<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailbox")
            .field("name", &self.name)
            .field("queue", &self.queue)
            .field("handlers", &self.registry)
            .finish()
    }
}

impl<H: ?Sized> Mailbox<H> {
    /// Creates a mailbox with an open queue and an empty registry.
    pub fn new(name: impl Into<String>) -> Self {
        Mailbox {
            name: name.into(),
            queue: MessageQueue::new(),
            registry: HandlerRegistry::new(),
        }
    }

    /// The mailbox's stable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The queue producers push into.
    pub fn queue(&self) -> &MessageQueue {
        &self.queue
    }

    /// The handler table.
    pub fn registry(&self) -> &HandlerRegistry<H> {
        &self.registry
    }

    /// Registers a handler, see [`HandlerRegistry::register`].
    pub fn register<A: 'static>(
        &mut self,
        func_name: &str,
        handler: Arc<H>,
    ) -> Result<(), RegistrationError> {
        self.registry.register::<A>(func_name, handler).inspect_err(|_| {
            trace!(mailbox = %self.name, func_name, "Registration rejected");
        })
    }

    /// Looks up a handler by its normalized name.
    pub fn lookup(&self, func_name: &str) -> Option<&HandlerDescriptor<H>> {
        self.registry.lookup(func_name)
    }

    /// Finds the handler for a popped envelope.
    ///
    /// Unknown function names are logged and yield `None`; the caller drops the
    /// envelope and moves on to the next one.
    pub fn resolve(&self, envelope: &Envelope) -> Option<HandlerDescriptor<H>> {
        let found = self.registry.lookup(envelope.func_name()).cloned();
        if found.is_none() {
            warn!(
                mailbox = %self.name,
                func_name = envelope.func_name(),
                source = envelope.source().unwrap_or_default(),
                "Function not registered, dropping message"
            );
        }
        found
    }

    /// Pushes `envelope` into the queue, which stamps its enqueue time on acceptance.
    ///
    /// Envelopes without a function name and pushes after shutdown are dropped.
    pub fn enqueue(&self, envelope: Envelope) -> bool {
        self.queue.push(envelope)
    }

    /// Waits for the next envelope; `None` once the mailbox is shut down.
    pub async fn dequeue(&self) -> Option<Envelope> {
        self.queue.pop().await
    }

    /// Returns the next envelope without waiting.
    pub fn try_dequeue(&self) -> Option<Envelope> {
        self.queue.try_pop()
    }

    /// Clears the registry and destroys the queue. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.registry.is_empty() {
            trace!(mailbox = %self.name, handlers = self.registry.len(), "Clearing handlers");
        }
        self.registry.clear();
        self.queue.destroy();
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has run or the queue was destroyed.
    pub fn is_shut_down(&self) -> bool {
        self.queue.state() == QueueState::Closed
    }
}
