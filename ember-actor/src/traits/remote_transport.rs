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

use std::fmt::Debug;

use crate::message::{CallError, RemoteEnvelope};

/// Carries calls to actors on other nodes.
///
/// Framing and connection management belong to the implementation. The receiving node
/// passes each envelope to [`ActorRuntime::deliver_remote`](crate::common::ActorRuntime::deliver_remote).
pub trait RemoteTransport: Send + Sync + Debug {
    /// Sends one envelope towards the node named by its target path.
    fn forward(&self, envelope: RemoteEnvelope) -> Result<(), CallError>;
}
