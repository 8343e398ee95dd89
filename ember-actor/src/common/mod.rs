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

//! Runtime entry point, actor directory, handles, configuration and logging.
//!
//! # Key Re-exported Components:
//!
//! *   [`EmberApp`]: bootstraps an [`ActorRuntime`].
//! *   [`ActorRuntime`]: node-wide directory and router for `call`.
//! *   [`ActorHandle`]: pushes into, stops or drains a running actor.
//! *   [`Reply`]: builds handler return values.
//! *   [`EmberConfig`]: TOML configuration loaded from XDG locations.

pub use actor_handle::ActorHandle;
pub use actor_runtime::ActorRuntime;
pub use app::EmberApp;
pub use config::{EmberConfig, CONFIG};
pub use logging::init_tracing;
pub use reply::Reply;
pub use runtime_error::RuntimeError;
pub use types::FutureBox;

pub(crate) use runtime_inner::RuntimeInner;
pub(crate) use types::*;

/// Internal type aliases.
mod types;

/// Defines [`EmberApp`].
mod app;
/// Defines [`ActorHandle`].
mod actor_handle;
/// Defines [`ActorRuntime`].
mod actor_runtime;
/// Shared state behind [`ActorRuntime`].
mod runtime_inner;
/// Defines [`Reply`].
mod reply;
/// Defines [`RuntimeError`].
mod runtime_error;
/// Tracing subscriber bootstrap.
mod logging;
/// Configuration system.
pub mod config;
