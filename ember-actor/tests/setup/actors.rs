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
use ember_actor::prelude::*;

/// Records every tick it sees, in arrival order.
#[ember_actor]
pub struct Counter {
    pub seen: Vec<u32>,
}

/// Remembers the metadata of the last message it handled.
#[ember_actor]
pub struct Witness {
    pub sources: Vec<Option<String>>,
    pub enqueued: Vec<Option<i64>>,
}

/// A connection-owning agent: collects what the protocol layer sends it.
#[ember_actor]
pub struct Agent {
    pub responses: Vec<ember_actor::pomelo::PomeloResponse>,
    pub pushes: Vec<ember_actor::pomelo::PomeloPush>,
    pub kicks: Vec<ember_actor::pomelo::PomeloKick>,
}

/// Game logic answering through the protocol layer.
#[ember_actor]
pub struct Room {
    pub online: Vec<i64>,
}
