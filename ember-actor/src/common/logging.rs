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

use std::path::PathBuf;

use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::common::EmberConfig;

fn expand_home(directory: &str) -> PathBuf {
    match (directory.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(directory),
    }
}

/// Installs the global tracing subscriber described by `config`.
///
/// `RUST_LOG` overrides the configured level. With `behavior.log_to_file` the output goes
/// to a daily rolling file in `paths.log_directory`; keep the returned guard alive for as
/// long as logs should be flushed. If a subscriber is already installed this is a no-op.
pub fn init_tracing(config: &EmberConfig) -> Option<WorkerGuard> {
    if !config.behavior.enable_tracing {
        return None;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing.level.as_str()));

    if config.behavior.log_to_file {
        let directory = expand_home(&config.paths.log_directory);
        let appender = tracing_appender::rolling::daily(directory, &config.tracing.file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        match tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(()) => Some(guard),
            Err(e) => {
                debug!("Tracing subscriber already installed: {}", e);
                None
            }
        }
    } else {
        if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
            debug!("Tracing subscriber already installed: {}", e);
        }
        None
    }
}
