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

use ember_core::EnvelopeHeader;
use static_assertions::assert_impl_all;

/// What a handler receives: the decoded message plus its routing metadata.
#[derive(Clone, Debug)]
pub struct MessageContext<M> {
    pub(crate) message: M,
    pub(crate) header: EnvelopeHeader,
}

impl<M> MessageContext<M> {
    pub(crate) fn new(message: M, header: EnvelopeHeader) -> Self {
        MessageContext { message, header }
    }

    /// The decoded message.
    pub fn message(&self) -> &M {
        &self.message
    }

    /// Takes the message out, leaving the context with only metadata.
    pub fn into_message(self) -> M {
        self.message
    }

    /// The normalized handler name the message was sent to.
    pub fn func_name(&self) -> &str {
        &self.header.func_name
    }

    /// Path of the sending actor, when sent by one.
    pub fn source(&self) -> Option<&str> {
        self.header.source.as_deref()
    }

    /// Session id, when set by the sender.
    pub fn session_id(&self) -> Option<&str> {
        self.header.session_id.as_deref()
    }

    /// User id, when set by the sender.
    pub fn user_id(&self) -> Option<i64> {
        self.header.user_id
    }

    /// When the envelope entered the mailbox, in milliseconds since the epoch.
    pub fn enqueue_time_millis(&self) -> Option<i64> {
        self.header.enqueue_time_millis()
    }
}

assert_impl_all!(MessageContext<u32>: Send);
