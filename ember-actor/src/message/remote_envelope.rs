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

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A call crossing node boundaries: already serialized with the runtime codec.
///
/// Produced by [`ActorRuntime`](crate::common::ActorRuntime) for non-local targets and
/// handed to the installed [`RemoteTransport`](crate::traits::RemoteTransport). The
/// receiving node feeds it to [`ActorRuntime::deliver_remote`](crate::common::ActorRuntime::deliver_remote).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEnvelope {
    /// Path of the calling actor, if any.
    pub source: Option<String>,
    /// Full path of the target actor.
    pub target: String,
    /// Handler name on the target.
    pub func_name: String,
    /// Serialized message.
    pub data: Bytes,
}
