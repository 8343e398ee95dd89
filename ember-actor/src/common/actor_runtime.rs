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
use std::sync::Arc;

use anyhow::anyhow;
use dashmap::mapref::entry::Entry;
use ember_core::{ActorPath, Codec, EmberMessage, Envelope, Payload, Serializer, PATH_SEPARATOR};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error, instrument, trace, warn};

use crate::actor::{Idle, ManagedActor};
use crate::common::{ActorHandle, EmberConfig, RuntimeError, RuntimeInner};
use crate::message::{CallError, RemoteEnvelope};
use crate::traits::{ActorFacade, RemoteTransport};

/// The running Ember node.
///
/// Cloning is cheap; every clone shares the same actor directory. The runtime creates
/// actors, finds them by path and routes [`call`](ActorFacade::call)s either to a local
/// mailbox or, for other nodes, to the installed [`RemoteTransport`].
#[derive(Clone)]
pub struct ActorRuntime(pub(crate) Arc<RuntimeInner>);

impl Debug for ActorRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRuntime")
            .field("node_id", &self.0.node_id)
            .field("codec", &self.0.codec)
            .field("actors", &self.0.actors.len())
            .finish()
    }
}

fn validate_name(name: &str) -> Result<(), RuntimeError> {
    if name.is_empty() || name.contains(PATH_SEPARATOR) {
        error!(name, "Actor names must be non-empty and contain no path separator");
        return Err(RuntimeError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl ActorRuntime {
    pub(crate) fn new(config: EmberConfig) -> Self {
        let runtime = ActorRuntime(Arc::new(RuntimeInner::new(config)));
        debug!(node_id = %runtime.0.node_id, codec = runtime.0.codec.name(), "Runtime launched");
        runtime
    }

    /// Creates an idle actor addressed `node_id.name`.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::InvalidName`] when `name` is empty or contains `.`, and
    /// [`RuntimeError::DuplicateActor`] when an actor with that path is running.
    pub fn new_actor<State>(&self, name: &str) -> Result<ManagedActor<Idle, State>, RuntimeError>
    where
        State: Default + Send + Debug + 'static,
    {
        validate_name(name)?;
        self.new_actor_at(ActorPath::new(self.0.node_id.as_str(), name))
    }

    /// Creates an idle child actor addressed `node_id.parent.name`.
    ///
    /// The parent only contributes its name; it does not supervise the child.
    pub fn new_child_actor<State>(
        &self,
        parent: &ActorPath,
        name: &str,
    ) -> Result<ManagedActor<Idle, State>, RuntimeError>
    where
        State: Default + Send + Debug + 'static,
    {
        validate_name(name)?;
        if parent.is_child() || !parent.is_local_to(&self.0.node_id) {
            error!(%parent, "Child actors need a local top-level parent");
            return Err(RuntimeError::InvalidName(parent.to_string()));
        }
        self.new_actor_at(ActorPath::with_child(
            self.0.node_id.as_str(),
            parent.actor_id(),
            name,
        ))
    }

    fn new_actor_at<State>(&self, path: ActorPath) -> Result<ManagedActor<Idle, State>, RuntimeError>
    where
        State: Default + Send + Debug + 'static,
    {
        if self.0.actors.contains_key(&path.to_string()) {
            error!(%path, "Actor already exists");
            return Err(RuntimeError::DuplicateActor(path.to_string()));
        }
        trace!(%path, "Created new actor");
        Ok(ManagedActor::new(path, self.clone()))
    }

    /// Number of actors currently running.
    pub fn actor_count(&self) -> usize {
        self.0.actors.len()
    }

    /// Finds a running local actor by its full path.
    pub fn find(&self, path: &str) -> Option<ActorHandle> {
        self.0.actors.get(path).map(|item| item.value().clone())
    }

    /// This node's id.
    pub fn node_id(&self) -> &str {
        &self.0.node_id
    }

    /// The configuration the runtime was launched with.
    pub fn config(&self) -> &EmberConfig {
        &self.0.config
    }

    /// The codec used for protocol payloads and remote calls.
    pub fn codec(&self) -> &Codec {
        &self.0.codec
    }

    /// Installs the transport that carries calls to other nodes, replacing any previous one.
    pub fn set_remote_transport(&self, transport: Arc<dyn RemoteTransport>) {
        debug!(?transport, "Remote transport installed");
        *self.0.remote.write() = Some(transport);
    }

    /// Delivers an envelope that arrived from another node to a local actor.
    ///
    /// The payload stays serialized; the receiving handler decodes it with the runtime
    /// codec.
    #[instrument(skip(self, remote), fields(target = %remote.target, func = %remote.func_name))]
    pub fn deliver_remote(&self, remote: RemoteEnvelope) -> Result<(), CallError> {
        if remote.func_name.is_empty() {
            warn!("Remote envelope without function name dropped");
            return Err(CallError::InvalidArgument("func_name"));
        }
        let target = ActorPath::parse(&remote.target)?;
        if !target.is_local_to(&self.0.node_id) {
            warn!(node = target.node_id(), "Remote envelope addressed to another node");
            return Err(CallError::ActorNotFound(remote.target));
        }
        let Some(handle) = self.find(&remote.target) else {
            warn!("Actor not found for remote envelope");
            return Err(CallError::ActorNotFound(remote.target));
        };
        let mut envelope = Envelope::new(remote.func_name, Payload::Bytes(remote.data));
        if let Some(source) = remote.source {
            envelope = envelope.with_source(source);
        }
        if !handle.enqueue(envelope) {
            trace!("Mailbox closed, remote envelope dropped");
        }
        Ok(())
    }

    /// Stops every running actor, bounded by the system shutdown timeout.
    #[instrument(skip(self), fields(node = %self.0.node_id))]
    pub async fn shutdown_all(&self) -> anyhow::Result<()> {
        // Actors deregister themselves on the way out, so the directory must not be
        // borrowed while they stop.
        let handles: Vec<ActorHandle> =
            self.0.actors.iter().map(|item| item.value().clone()).collect();
        debug!(count = handles.len(), "Stopping all actors");

        let stop_futures = handles.iter().map(|handle| handle.stop());
        let timeout = self.0.config.system_shutdown_timeout();
        let results = tokio::time::timeout(timeout, join_all(stop_futures))
            .await
            .map_err(|_| anyhow!("system shutdown exceeded {} ms", timeout.as_millis()))?;

        for result in results {
            result?;
        }
        Ok(())
    }

    pub(crate) fn register_actor(&self, handle: ActorHandle) -> Result<(), RuntimeError> {
        match self.0.actors.entry(handle.path().to_string()) {
            Entry::Occupied(entry) => {
                error!(path = entry.key().as_str(), "Actor already exists");
                Err(RuntimeError::DuplicateActor(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(handle);
                Ok(())
            }
        }
    }

    pub(crate) fn deregister_actor(&self, path: &ActorPath) {
        if self.0.actors.remove(&path.to_string()).is_some() {
            trace!(%path, "Actor removed from directory");
        }
    }

    /// Resolves `target_path` and hands `message` to the target's mailbox, directly for
    /// local actors and through the remote transport otherwise.
    pub(crate) fn route<M>(
        &self,
        source: Option<&ActorPath>,
        target_path: &str,
        func_name: &str,
        message: M,
    ) -> Result<(), CallError>
    where
        M: EmberMessage + Serialize,
    {
        if target_path.is_empty() {
            warn!(func_name, "Call without target path");
            return Err(CallError::InvalidArgument("target_path"));
        }
        if func_name.is_empty() {
            warn!(target_path, "Call without function name");
            return Err(CallError::InvalidArgument("func_name"));
        }
        let target = ActorPath::parse(target_path).inspect_err(|e| {
            warn!(target_path, error = %e, "Call with malformed target path");
        })?;

        if target.is_local_to(&self.0.node_id) {
            let Some(handle) = self.find(target_path) else {
                warn!(target_path, func_name, "Actor not found");
                return Err(CallError::ActorNotFound(target_path.to_string()));
            };
            let mut envelope = Envelope::local(func_name, message);
            if let Some(source) = source {
                envelope = envelope.with_source(source.to_string());
            }
            if !handle.enqueue(envelope) {
                trace!(target_path, func_name, "Mailbox closed, message dropped");
            }
            return Ok(());
        }

        let Some(transport) = self.0.remote.read().clone() else {
            warn!(target_path, func_name, "No remote transport installed");
            return Err(CallError::NoRemoteRoute(target.node_id().to_string()));
        };
        let data = self.0.codec.marshal(&message).inspect_err(|e| {
            warn!(target_path, func_name, error = %e, "Failed to serialize remote call");
        })?;
        let remote = RemoteEnvelope {
            source: source.map(ToString::to_string),
            target: target_path.to_string(),
            func_name: func_name.to_string(),
            data: data.into(),
        };
        transport.forward(remote)
    }
}

impl ActorFacade for ActorRuntime {
    type Codec = Codec;

    fn serializer(&self) -> &Self::Codec {
        &self.0.codec
    }

    fn self_path(&self) -> Option<&ActorPath> {
        None
    }

    fn call<M>(&self, target_path: &str, func_name: &str, message: M) -> Result<(), CallError>
    where
        M: EmberMessage + Serialize,
    {
        self.route(None, target_path, func_name, message)
    }
}
