// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Tracing setup for the `profiling` feature
//!
//! With the feature on, collection traversals, pool flushes and frame runs
//! open `info_span!`s. Install a subscriber to see them:
//!
//! ```ignore
//! frame_events::profiling::init_tracing("frame_events=debug")?;
//! ```
//!
//! `RUST_LOG` overrides the default directive when set.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{EventError, Result};

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install a global fmt subscriber writing to stderr
pub fn init_tracing(default_directive: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| EventError::Config(e.to_string()))
}

/// Install a global JSON subscriber writing to `directory/file_name`
///
/// Keep the returned guard alive; dropping it flushes and stops the writer.
pub fn init_tracing_to_file(directory: impl AsRef<Path>, file_name: &str, default_directive: &str) -> Result<WorkerGuard> {
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default_directive))
        .with_writer(writer)
        .try_init()
        .map_err(|e| EventError::Config(e.to_string()))?;
    Ok(guard)
}
