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

use ember_core::{PathError, SerializeError};
use thiserror::Error;

/// Why a `call` did not reach a mailbox.
///
/// Pushing into a mailbox that has already shut down is not an error: the message is
/// dropped and the call reports success.
#[derive(Debug, Error)]
pub enum CallError {
    /// A required argument was empty.
    #[error("invalid call argument: {0}")]
    InvalidArgument(&'static str),
    /// The target path could not be parsed.
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    /// The target is local but no such actor is running.
    #[error("actor `{0}` not found")]
    ActorNotFound(String),
    /// The target is on another node and no transport is installed.
    #[error("no remote route to node `{0}`")]
    NoRemoteRoute(String),
    /// The message could not be serialized for a remote node.
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    /// The remote transport refused the envelope.
    #[error("remote transport failed: {0}")]
    Transport(String),
}
