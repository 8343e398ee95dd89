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

use std::sync::Arc;

use dashmap::DashMap;
use ember_core::{Codec, PATH_SEPARATOR};
use parking_lot::RwLock;
use tracing::error;

use crate::common::config::DefaultsConfig;
use crate::common::{ActorHandle, EmberConfig};
use crate::traits::RemoteTransport;

/// Shared state behind every clone of an [`ActorRuntime`](crate::common::ActorRuntime).
#[derive(Debug)]
pub(crate) struct RuntimeInner {
    pub(crate) node_id: String,
    pub(crate) config: EmberConfig,
    pub(crate) codec: Codec,
    /// Running actors keyed by their full path.
    pub(crate) actors: DashMap<String, ActorHandle>,
    pub(crate) remote: RwLock<Option<Arc<dyn RemoteTransport>>>,
}

impl RuntimeInner {
    pub(crate) fn new(mut config: EmberConfig) -> Self {
        // The node id is the first path segment of every local actor.
        let node_id = &config.defaults.node_id;
        if node_id.is_empty() || node_id.contains(PATH_SEPARATOR) {
            let fallback = DefaultsConfig::default().node_id;
            error!(
                node_id = %node_id,
                fallback = %fallback,
                "Node id must be non-empty and contain no path separator, using default"
            );
            config.defaults.node_id = fallback;
        }
        RuntimeInner {
            node_id: config.defaults.node_id.clone(),
            codec: config.defaults.serializer,
            config,
            actors: DashMap::new(),
            remote: RwLock::new(None),
        }
    }
}
