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


//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use frame_events::prelude::*;
//! ```

pub use crate::component::{Capabilities, Component};
pub use crate::component_events::ComponentEventContainer;
pub use crate::config::SchedulerConfig;
pub use crate::error::{EventError, Result};
pub use crate::event::{ContactPhase, EventKey, EventKind, EventPriority, LifecycleEvent};
pub use crate::frame::{EventSink, FrameEventQueue};
pub use crate::game_object::GameObjectEventContainer;
pub use crate::physics::{
    Collider2D, ColliderId, Collision2D, ContactListener2D, ContactManifold, ContactPoint2D,
    PhysicsEventDispatcher,
};
pub use crate::runtime::EventRuntime;
