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

//! Helpers for handler and lifecycle hook return values.
//!
//! ```ignore
//! // Synchronous handler - mutate state and finish.
//! actor.register::<Login>("OnLogin", |actor, ctx| {
//!     actor.model.online.insert(ctx.message().uid);
//!     Reply::ready()
//! });
//!
//! // Asynchronous work - move what the future needs out of the actor first.
//! actor.register::<Save>("OnSave", |actor, ctx| {
//!     let snapshot = actor.model.snapshot();
//!     Reply::pending(async move {
//!         store(snapshot).await;
//!     })
//! });
//! ```

use std::future::Future;

use crate::common::FutureBox;

/// Namespace for building handler return values.
///
/// The run-loop awaits the returned future before popping the next envelope, so
/// asynchronous work done here still happens strictly one message at a time.
pub struct Reply;

impl Reply {
    /// An immediately resolving future, for handlers that only do synchronous work.
    #[inline]
    #[must_use]
    pub fn ready() -> FutureBox {
        Box::pin(async move {})
    }

    /// Boxes `future` into the handler return type.
    #[inline]
    pub fn pending<F>(future: F) -> FutureBox
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Box::pin(future)
    }
}
