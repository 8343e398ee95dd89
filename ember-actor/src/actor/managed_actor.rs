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
use std::fmt::Debug;
use std::fmt::Formatter;
use std::marker::PhantomData;

use ember_core::ActorPath;
use tokio_util::task::TaskTracker;

pub use idle::Idle;

use crate::common::{ActorMailbox, ActorRuntime, AsyncLifecycleHandler};

mod idle;
pub mod started;

/// An actor: user state plus the machinery that feeds it messages one at a time.
///
/// `ActorState` is the type-state marker ([`Idle`] or [`started::Started`]); `Model` is
/// the user state, reachable as [`model`](Self::model) from handlers and hooks.
pub struct ManagedActor<ActorState, Model: Default + Send + Debug + 'static> {
    pub(crate) path: ActorPath,

    pub(crate) runtime: ActorRuntime,

    /// The user state. Only the actor's own run-loop touches it once started.
    pub model: Model,

    pub(crate) mailbox: ActorMailbox<Model>,

    pub(crate) tracker: TaskTracker,

    /// Hook run by the run-loop before the first message.
    pub(crate) after_start: AsyncLifecycleHandler<Model>,
    /// Hook run after the mailbox shut down and the actor left the directory.
    pub(crate) after_stop: AsyncLifecycleHandler<Model>,
    _actor_state: PhantomData<ActorState>,
}

impl<ActorState, Model: Default + Send + Debug + 'static> ManagedActor<ActorState, Model> {
    /// The actor's full path.
    pub fn path(&self) -> &ActorPath {
        &self.path
    }

    /// The actor's name.
    pub fn name(&self) -> &str {
        self.path.child_id().unwrap_or(self.path.actor_id())
    }

    /// The runtime the actor belongs to.
    pub fn runtime(&self) -> &ActorRuntime {
        &self.runtime
    }

    /// Envelopes waiting in the mailbox.
    pub fn pending(&self) -> usize {
        self.mailbox.queue().len()
    }
}

impl<ActorState, Model: Default + Send + Debug + 'static> Debug for ManagedActor<ActorState, Model> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedActor")
            .field("path", &self.path)
            .field("model", &self.model)
            .field("mailbox", &self.mailbox)
            .finish()
    }
}
