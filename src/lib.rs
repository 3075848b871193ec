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


//! Frame Events - priority-ordered, mutation-safe event scheduling
//!
//! Sequences component lifecycle callbacks (awake, on_enable, start, update,
//! on_disable, on_destroy) deterministically across frames, and turns
//! synchronous 2D solver contact notifications into pooled collision and
//! trigger events replayed after the step. Callbacks may register or remove
//! events on the very collection that is dispatching them.

pub mod collection;
pub mod component;
pub mod component_events;
pub mod config;
pub mod error;
pub mod event;
pub mod event_state;
pub mod frame;
pub mod game_object;
pub mod id;
pub mod physics;
pub mod prelude;
#[cfg(feature = "profiling")]
pub mod profiling;
pub mod runtime;

#[cfg(test)]
mod tests;

pub use collection::*;
pub use component::*;
pub use component_events::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use event_state::*;
pub use frame::*;
pub use game_object::*;
pub use id::*;
pub use physics::*;
pub use runtime::*;
