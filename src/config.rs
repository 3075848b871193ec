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


//! Scheduler configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tuning knobs for the physics pools and component registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Trigger record slots reserved up front
    pub trigger_pool_capacity: usize,
    /// Collision record slots reserved up front
    pub collision_pool_capacity: usize,
    /// Collision details allocated up front
    pub detail_pool_capacity: usize,
    /// Report pairs that stay in contact across steps
    pub emit_stay_events: bool,
    /// Execution order for components created without an explicit one
    pub default_execution_order: i32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            trigger_pool_capacity: 64,
            collision_pool_capacity: 64,
            detail_pool_capacity: 64,
            emit_stay_events: true,
            default_execution_order: 0,
        }
    }
}

impl SchedulerConfig {
    /// Parse from JSON; missing fields take their default
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
