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

/// Answer to a client request, delivered to the agent's `response` handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomeloResponse {
    /// Session id.
    pub sid: String,
    /// Id of the request being answered.
    pub mid: u32,
    /// Serialized reply body, empty for status-only responses.
    pub data: Bytes,
    /// Status code, zero on success.
    pub code: i32,
}

/// Server-initiated message to one client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomeloPush {
    /// Session id.
    pub sid: String,
    /// Client route the message is pushed to.
    pub route: String,
    /// Serialized body.
    pub data: Bytes,
}

/// Disconnect notice for one client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomeloKick {
    /// Session id.
    pub sid: String,
    /// Serialized reason shown to the client.
    pub reason: Bytes,
    /// Close the connection after sending.
    pub close: bool,
}

/// Push to many clients of one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomeloBroadcastPush {
    /// Target users, ignored when `all_uid` is set.
    pub uid_list: Vec<i64>,
    /// Send to every connected user.
    pub all_uid: bool,
    /// Client route the message is pushed to.
    pub route: String,
    /// Serialized body.
    pub data: Bytes,
}
