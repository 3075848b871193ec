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

//! Error types

use std::fmt;

/// Event scheduling error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// A traversal is already running on the collection
    TraversalActive,

    /// Component is already mutably borrowed (reentrant callback)
    ComponentBorrowed(&'static str),

    /// User callback failed
    Callback(String),

    /// Configuration could not be loaded
    Config(String),
}

impl EventError {
    /// Build a callback error from any displayable message
    pub fn callback(msg: impl fmt::Display) -> Self {
        EventError::Callback(msg.to_string())
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::TraversalActive => {
                write!(f, "Collection is already being traversed")
            }
            EventError::ComponentBorrowed(method) => {
                write!(f, "Component already borrowed while calling {method}")
            }
            EventError::Callback(msg) => write!(f, "Callback error: {msg}"),
            EventError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for EventError {}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Config(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EventError>;
