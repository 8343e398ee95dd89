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

use ember_core::{ActorPath, EmberMessage, Serializer};
use serde::Serialize;

use crate::message::CallError;

/// The call contract shared by the runtime and running actors.
///
/// A call resolves `target_path` to a local or remote actor and pushes `message` into its
/// mailbox for the handler registered under `func_name`. It returns once the envelope is
/// enqueued (or handed to the remote transport), never after the target processed it.
pub trait ActorFacade {
    /// The codec used to serialize payloads.
    type Codec: Serializer;

    /// Codec for payloads built on top of `call`, such as protocol notifications.
    fn serializer(&self) -> &Self::Codec;

    /// Path recorded as the source of outgoing calls, if any.
    fn self_path(&self) -> Option<&ActorPath>;

    /// Sends `message` to the handler `func_name` of the actor at `target_path`.
    ///
    /// Messages for a mailbox that has already shut down are dropped and reported as
    /// success.
    ///
    /// # Errors
    ///
    /// [`CallError`] when an argument is empty, the path is malformed, no local actor
    /// lives at the path, or the remote side cannot be reached.
    fn call<M>(&self, target_path: &str, func_name: &str, message: M) -> Result<(), CallError>
    where
        M: EmberMessage + Serialize;
}
