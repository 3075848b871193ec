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

//! Priority-tagged component events
//!
//! A [`ComponentEvent`] is a deferred call into a component. Events are
//! totally ordered by `(priority, execution_order, id)`, so any fixed sequence
//! of registrations dispatches deterministically.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::error::Result;
use crate::id::EventIdGenerator;
use crate::physics::{Collider2D, Collision2D};

/// Coarse ordering bucket; lower values dispatch first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EventPriority {
    Awake = 0,
    /// onEnable, onDisable and every physics callback
    Transition = 1,
    Start = 2,
    Update = 3,
    Destroy = 4,
}

/// Contact phase shared by collision and trigger callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

impl ContactPhase {
    pub const ALL: [ContactPhase; 3] = [ContactPhase::Enter, ContactPhase::Stay, ContactPhase::Exit];
}

/// Lifecycle kind an event was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Awake,
    OnEnable,
    OnDisable,
    Start,
    Update,
    OnDestroy,
    Collision(ContactPhase),
    Trigger(ContactPhase),
}

impl EventKind {
    /// Priority bucket fixed for this kind
    pub fn priority(self) -> EventPriority {
        match self {
            EventKind::Awake => EventPriority::Awake,
            EventKind::OnEnable
            | EventKind::OnDisable
            | EventKind::Collision(_)
            | EventKind::Trigger(_) => EventPriority::Transition,
            EventKind::Start => EventPriority::Start,
            EventKind::Update => EventPriority::Update,
            EventKind::OnDestroy => EventPriority::Destroy,
        }
    }

    /// Get kind name for debugging
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Awake => "awake",
            EventKind::OnEnable => "on_enable",
            EventKind::OnDisable => "on_disable",
            EventKind::Start => "start",
            EventKind::Update => "update",
            EventKind::OnDestroy => "on_destroy",
            EventKind::Collision(ContactPhase::Enter) => "on_collision_enter_2d",
            EventKind::Collision(ContactPhase::Stay) => "on_collision_stay_2d",
            EventKind::Collision(ContactPhase::Exit) => "on_collision_exit_2d",
            EventKind::Trigger(ContactPhase::Enter) => "on_trigger_enter_2d",
            EventKind::Trigger(ContactPhase::Stay) => "on_trigger_stay_2d",
            EventKind::Trigger(ContactPhase::Exit) => "on_trigger_exit_2d",
        }
    }
}

/// Sort key of an event: `(priority, execution_order, id)` ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey {
    pub priority: EventPriority,
    pub execution_order: i32,
    pub id: u64,
}

/// Shared callback bound into an event
pub type EventCallback<A> = Rc<dyn Fn(&A) -> Result<()>>;

/// Lifecycle event taking no argument
pub type LifecycleEvent = ComponentEvent<()>;

/// Collision event receiving the collision detail
pub type CollisionEvent = ComponentEvent<Collision2D>;

/// Trigger event receiving the other collider
pub type TriggerEvent = ComponentEvent<Collider2D>;

/// Deferred invocation of a component callback
///
/// Cloning is cheap and keeps the same key, so a clone is the same event as
/// far as any collection is concerned.
pub struct ComponentEvent<A> {
    key: EventKey,
    kind: EventKind,
    callback: EventCallback<A>,
}

impl<A> ComponentEvent<A> {
    fn with_callback(
        kind: EventKind,
        execution_order: i32,
        ids: &EventIdGenerator,
        callback: EventCallback<A>,
    ) -> Self {
        Self {
            key: EventKey {
                priority: kind.priority(),
                execution_order,
                id: ids.next_id(),
            },
            kind,
            callback,
        }
    }

    /// Same kind, order and callback under a freshly issued id
    pub fn reissue(&self, ids: &EventIdGenerator) -> Self {
        Self::with_callback(self.kind, self.key.execution_order, ids, self.callback.clone())
    }

    /// Run the bound callback
    pub fn invoke(&self, arg: &A) -> Result<()> {
        (self.callback)(arg)
    }

    pub fn key(&self) -> EventKey {
        self.key
    }

    pub fn id(&self) -> u64 {
        self.key.id
    }

    pub fn priority(&self) -> EventPriority {
        self.key.priority
    }

    pub fn execution_order(&self) -> i32 {
        self.key.execution_order
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl ComponentEvent<()> {
    /// Lifecycle event whose priority follows from `kind`
    pub(crate) fn lifecycle<F>(kind: EventKind, execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self::with_callback(kind, execution_order, ids, Rc::new(move |_: &()| f()))
    }

    pub fn awake<F>(execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self::lifecycle(EventKind::Awake, execution_order, ids, f)
    }

    pub fn on_enable<F>(execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self::lifecycle(EventKind::OnEnable, execution_order, ids, f)
    }

    pub fn on_disable<F>(execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self::lifecycle(EventKind::OnDisable, execution_order, ids, f)
    }

    pub fn start<F>(execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self::lifecycle(EventKind::Start, execution_order, ids, f)
    }

    pub fn update<F>(execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self::lifecycle(EventKind::Update, execution_order, ids, f)
    }

    pub fn on_destroy<F>(execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self::lifecycle(EventKind::OnDestroy, execution_order, ids, f)
    }

    /// Run a lifecycle callback
    pub fn call(&self) -> Result<()> {
        self.invoke(&())
    }
}

impl ComponentEvent<Collision2D> {
    pub fn collision<F>(phase: ContactPhase, execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn(&Collision2D) -> Result<()> + 'static,
    {
        Self::with_callback(EventKind::Collision(phase), execution_order, ids, Rc::new(f))
    }
}

impl ComponentEvent<Collider2D> {
    pub fn trigger<F>(phase: ContactPhase, execution_order: i32, ids: &EventIdGenerator, f: F) -> Self
    where
        F: Fn(&Collider2D) -> Result<()> + 'static,
    {
        Self::with_callback(EventKind::Trigger(phase), execution_order, ids, Rc::new(f))
    }
}

impl<A> Clone for ComponentEvent<A> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            kind: self.kind,
            callback: self.callback.clone(),
        }
    }
}

impl<A> PartialEq for ComponentEvent<A> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<A> Eq for ComponentEvent<A> {}

impl<A> PartialOrd for ComponentEvent<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for ComponentEvent<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<A> Borrow<EventKey> for ComponentEvent<A> {
    fn borrow(&self) -> &EventKey {
        &self.key
    }
}

impl<A> std::fmt::Debug for ComponentEvent<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentEvent")
            .field("kind", &self.kind.name())
            .field("key", &self.key)
            .finish()
    }
}
