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

#[ember_message]
pub struct Tick(pub u32);

#[ember_message]
pub struct Login {
    pub session: Session,
    pub token: String,
}

#[ember_message]
pub struct LoginReply {
    pub welcome: String,
}

#[ember_message]
pub struct Relay {
    pub target: String,
    pub value: u32,
}

#[ember_message]
pub struct Stop;
