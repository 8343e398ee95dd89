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

//! The pomelo client protocol.
//!
//! Game logic answers and notifies clients by calling well-known handlers on the
//! connection-owning agent actor named in a [`Session`]:
//!
//! | Operation | Handler | Message |
//! |---|---|---|
//! | [`response`] / [`response_code`] | [`RESPONSE_FUNC_NAME`] | [`PomeloResponse`] |
//! | [`push`] | [`PUSH_FUNC_NAME`] | [`PomeloPush`] |
//! | [`kick`] | [`KICK_FUNC_NAME`] | [`PomeloKick`] |
//! | [`broadcast`] | [`BROADCAST_FUNC_NAME`] | [`PomeloBroadcastPush`] |
//!
//! These are best-effort notifications. Invalid arguments and serialization failures are
//! logged at `warn` and the call is skipped; nothing is returned to the caller.

pub use proto::{PomeloBroadcastPush, PomeloKick, PomeloPush, PomeloResponse};
pub use protocol::{
    broadcast, kick, push, response, response_code, PomeloActor, BROADCAST_FUNC_NAME,
    KICK_FUNC_NAME, PUSH_FUNC_NAME, RESPONSE_FUNC_NAME,
};
pub use session::Session;

mod proto;
mod protocol;
mod session;
