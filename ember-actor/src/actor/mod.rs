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

//! Type-state managed actors.
//!
//! *   [`ManagedActor`]: wraps user state with its path, mailbox and lifecycle hooks.
//! *   [`Idle`]: handlers and hooks are registered, nothing runs yet.
//! *   [`Started`]: the run-loop owns the actor and drains its mailbox.

pub use managed_actor::started::Started;
pub use managed_actor::Idle;
pub use managed_actor::ManagedActor;

/// Contains the `ManagedActor` struct and its state-specific implementations.
mod managed_actor;
