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

use crate::common::{ActorRuntime, EmberConfig, CONFIG};

/// Bootstraps the Ember runtime.
///
/// `EmberApp` is the entry point of every Ember process: it turns a configuration into
/// an [`ActorRuntime`] that owns the node id, the codec and the actor directory.
#[derive(Default, Debug, Clone)]
pub struct EmberApp;

impl EmberApp {
    /// Launches a runtime configured from XDG-compliant locations.
    ///
    /// The process-wide [`CONFIG`] is loaded on first use; see
    /// [`EmberConfig::load`] for where it is looked up.
    pub fn launch() -> ActorRuntime {
        Self::launch_with_config(CONFIG.clone())
    }

    /// Launches a runtime with an explicit configuration.
    ///
    /// A `defaults.node_id` that is empty or contains `.` is logged and replaced by the
    /// default node id.
    pub fn launch_with_config(config: EmberConfig) -> ActorRuntime {
        ActorRuntime::new(config)
    }
}
