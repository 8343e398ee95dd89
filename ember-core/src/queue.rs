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

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use tokio::sync::Notify;
use tracing::trace;

use crate::envelope::{now_millis, Envelope};

/// Lifecycle of a [`MessageQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueState {
    /// Accepting pushes and pops.
    Open,
    /// No new pushes; pending envelopes are still poppable.
    Closing,
    /// Drained or destroyed. Pops return `None`, pushes are dropped.
    Closed,
}

struct QueueInner {
    items: VecDeque<Envelope>,
    state: QueueState,
}

impl QueueInner {
    fn pop_front(&mut self) -> Option<Envelope> {
        let item = self.items.pop_front();
        if self.items.is_empty() && self.state == QueueState::Closing {
            self.state = QueueState::Closed;
        }
        item
    }
}

struct QueueShared {
    inner: Mutex<QueueInner>,
    notify: Notify,
}

/// An unbounded FIFO of envelopes for one actor.
///
/// Any number of producers may push concurrently through clones of the queue; exactly
/// one consumer (the owning actor's run-loop) pops. Push and pop are O(1) amortized and
/// hold the lock only for the list operation itself.
#[derive(Clone)]
pub struct MessageQueue {
    shared: Arc<QueueShared>,
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("MessageQueue")
            .field("len", &inner.items.len())
            .field("state", &inner.state)
            .finish()
    }
}

impl MessageQueue {
    /// Creates an empty, open queue.
    pub fn new() -> Self {
        MessageQueue {
            shared: Arc::new(QueueShared {
                inner: Mutex::new(QueueInner {
                    items: VecDeque::new(),
                    state: QueueState::Open,
                }),
                notify: Notify::new(),
            }),
        }
    }

    /// Appends `envelope` to the tail and wakes a waiting consumer.
    ///
    /// Returns `false` without enqueuing when the envelope has no function name or the
    /// queue is no longer open. Dropping is deliberate: a closed queue's actor is gone.
    pub fn push(&self, mut envelope: Envelope) -> bool {
        if !envelope.is_valid() {
            trace!("Ignoring envelope without a function name");
            return false;
        }
        {
            let mut inner = self.shared.inner.lock();
            if inner.state != QueueState::Open {
                trace!(
                    func_name = envelope.func_name(),
                    state = ?inner.state,
                    "Queue not open, dropping envelope"
                );
                return false;
            }
            envelope.stamp(now_millis());
            inner.items.push_back(envelope);
        }
        self.shared.notify.notify_one();
        true
    }

    /// Returns the head envelope without waiting.
    pub fn try_pop(&self) -> Option<Envelope> {
        self.shared.inner.lock().pop_front()
    }

    /// Returns the head envelope, waiting while the queue is open and empty.
    ///
    /// Resolves to `None` once the queue is closed, or closing and drained. A waiting
    /// consumer is always woken by either a push or a close/destroy.
    pub async fn pop(&self) -> Option<Envelope> {
        loop {
            let notified = self.shared.notify.notified();
            tokio::pin!(notified);
            // Register interest before checking, so a close between the check and the
            // await still wakes us.
            notified.as_mut().enable();
            {
                let mut inner = self.shared.inner.lock();
                if let Some(envelope) = inner.pop_front() {
                    return Some(envelope);
                }
                match inner.state {
                    QueueState::Open => {}
                    QueueState::Closing => {
                        inner.state = QueueState::Closed;
                        return None;
                    }
                    QueueState::Closed => return None,
                }
            }
            notified.await;
        }
    }

    /// Stops accepting pushes while keeping pending envelopes poppable.
    pub fn close(&self) {
        {
            let mut inner = self.shared.inner.lock();
            if inner.state != QueueState::Open {
                return;
            }
            inner.state = if inner.items.is_empty() {
                QueueState::Closed
            } else {
                QueueState::Closing
            };
            trace!(pending = inner.items.len(), state = ?inner.state, "Queue closed for pushes");
        }
        self.shared.notify.notify_waiters();
    }

    /// Closes the queue for good, discarding pending envelopes and waking the consumer.
    ///
    /// Idempotent. Afterwards `pop` returns `None` immediately and `push` is a no-op.
    pub fn destroy(&self) {
        let discarded = {
            let mut inner = self.shared.inner.lock();
            inner.state = QueueState::Closed;
            std::mem::take(&mut inner.items)
        };
        if !discarded.is_empty() {
            trace!(discarded = discarded.len(), "Queue destroyed with pending envelopes");
        }
        self.shared.notify.notify_waiters();
    }

    /// Number of pending envelopes.
    pub fn len(&self) -> usize {
        self.shared.inner.lock().items.len()
    }

    /// Returns `true` if no envelope is pending.
    pub fn is_empty(&self) -> bool {
        self.shared.inner.lock().items.is_empty()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> QueueState {
        self.shared.inner.lock().state
    }

    /// Returns `true` while pushes are accepted.
    pub fn is_open(&self) -> bool {
        self.state() == QueueState::Open
    }
}

assert_impl_all!(MessageQueue: Send, Sync, Clone);
