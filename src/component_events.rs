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

//! Per-component lifecycle orchestration
//!
//! A [`ComponentEventContainer`] is built once per component. It creates one
//! event per declared capability and drives the lifecycle state machine:
//!
//! ```text
//! constructed -> awake (once)
//!             -> on_enable <-> on_disable   (edge triggered)
//!             -> start (once, on first enable, cancellable before it fires)
//!             -> update (registered while enabled)
//!             -> on_destroy (once, terminal)
//! ```
//!
//! Every `try_*` method is idempotent: redundant calls are silent no-ops.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::component::{Capabilities, Component};
use crate::error::{EventError, Result};
use crate::event::{
    CollisionEvent, ContactPhase, EventKey, EventKind, LifecycleEvent, TriggerEvent,
};
use crate::event_state::ComponentEventState;
use crate::frame::EventSink;
use crate::game_object::GameObjectEventContainer;
use crate::id::EventIdGenerator;
use crate::physics::{Collider2D, Collision2D};

/// Synchronous world-matrix callback
pub type WorldMatrixListener = Rc<dyn Fn() -> Result<()>>;

fn bind<C: Component>(
    component: &Rc<RefCell<C>>,
    method: &'static str,
    f: fn(&mut C) -> Result<()>,
) -> impl Fn() -> Result<()> + 'static {
    let component = Rc::downgrade(component);
    move || {
        let Some(component) = component.upgrade() else {
            return Ok(());
        };
        let mut component = component
            .try_borrow_mut()
            .map_err(|_| EventError::ComponentBorrowed(method))?;
        f(&mut *component)
    }
}

fn bind_arg<C: Component, A: 'static>(
    component: &Rc<RefCell<C>>,
    method: &'static str,
    f: fn(&mut C, &A) -> Result<()>,
) -> impl Fn(&A) -> Result<()> + 'static {
    let component = Rc::downgrade(component);
    move |arg| {
        let Some(component) = component.upgrade() else {
            return Ok(());
        };
        let mut component = component
            .try_borrow_mut()
            .map_err(|_| EventError::ComponentBorrowed(method))?;
        f(&mut *component, arg)
    }
}

/// Lifecycle events and state of one component
pub struct ComponentEventContainer {
    instance_id: u64,
    name: String,
    capabilities: Capabilities,
    execution_order: i32,
    state: Rc<Cell<ComponentEventState>>,
    ids: Rc<EventIdGenerator>,
    sink: Rc<dyn EventSink>,
    game_object: RefCell<Weak<GameObjectEventContainer>>,

    awake: Option<LifecycleEvent>,
    // Edge events are reissued with a fresh id on every transition
    on_enable: Option<LifecycleEvent>,
    on_disable: Option<LifecycleEvent>,
    on_destroy: Option<LifecycleEvent>,
    start: Option<LifecycleEvent>,
    update: Option<LifecycleEvent>,
    world_matrix_listener: Option<WorldMatrixListener>,
    collision: [Option<CollisionEvent>; 3],
    trigger: [Option<TriggerEvent>; 3],
}

impl ComponentEventContainer {
    /// Inspect `component` once and build its events
    ///
    /// Callbacks hold the component weakly; once it is dropped they do nothing.
    pub fn new<C: Component>(
        component: &Rc<RefCell<C>>,
        execution_order: i32,
        ids: Rc<EventIdGenerator>,
        sink: Rc<dyn EventSink>,
    ) -> Result<Self> {
        let (capabilities, name) = {
            let component = component
                .try_borrow()
                .map_err(|_| EventError::ComponentBorrowed("capabilities"))?;
            (component.capabilities(), component.name().to_string())
        };
        let state = Rc::new(Cell::new(ComponentEventState::default()));

        let lifecycle = |flag: Capabilities,
                         kind: EventKind,
                         method: &'static str,
                         f: fn(&mut C) -> Result<()>| {
            capabilities
                .contains(flag)
                .then(|| LifecycleEvent::lifecycle(kind, execution_order, &ids, bind(component, method, f)))
        };

        let awake = lifecycle(Capabilities::AWAKE, EventKind::Awake, "awake", C::awake);
        let on_enable = lifecycle(Capabilities::ON_ENABLE, EventKind::OnEnable, "on_enable", C::on_enable);
        let on_disable = lifecycle(Capabilities::ON_DISABLE, EventKind::OnDisable, "on_disable", C::on_disable);
        let on_destroy = lifecycle(Capabilities::ON_DESTROY, EventKind::OnDestroy, "on_destroy", C::on_destroy);
        let update = lifecycle(Capabilities::UPDATE, EventKind::Update, "update", C::update);
        let start = capabilities.contains(Capabilities::START).then(|| {
            Self::build_start(component, execution_order, &ids, &sink, &state)
        });

        let world_matrix_listener = capabilities
            .contains(Capabilities::ON_WORLD_MATRIX_UPDATED)
            .then(|| {
                Rc::new(bind(component, "on_world_matrix_updated", C::on_world_matrix_updated))
                    as WorldMatrixListener
            });

        let collision_methods: [(&'static str, fn(&mut C, &Collision2D) -> Result<()>); 3] = [
            ("on_collision_enter_2d", C::on_collision_enter_2d),
            ("on_collision_stay_2d", C::on_collision_stay_2d),
            ("on_collision_exit_2d", C::on_collision_exit_2d),
        ];
        let trigger_methods: [(&'static str, fn(&mut C, &Collider2D) -> Result<()>); 3] = [
            ("on_trigger_enter_2d", C::on_trigger_enter_2d),
            ("on_trigger_stay_2d", C::on_trigger_stay_2d),
            ("on_trigger_exit_2d", C::on_trigger_exit_2d),
        ];
        let collision = std::array::from_fn(|i| {
            let phase = ContactPhase::ALL[i];
            let (method, f) = collision_methods[i];
            capabilities.contains(Capabilities::collision(phase)).then(|| {
                CollisionEvent::collision(phase, execution_order, &ids, bind_arg(component, method, f))
            })
        });
        let trigger = std::array::from_fn(|i| {
            let phase = ContactPhase::ALL[i];
            let (method, f) = trigger_methods[i];
            capabilities.contains(Capabilities::trigger(phase)).then(|| {
                TriggerEvent::trigger(phase, execution_order, &ids, bind_arg(component, method, f))
            })
        });

        let instance_id = ids.next_id();
        trace!(component = %name, instance_id, ?capabilities, "component events built");

        Ok(Self {
            instance_id,
            name,
            capabilities,
            execution_order,
            state,
            ids,
            sink,
            game_object: RefCell::new(Weak::new()),
            awake,
            on_enable,
            on_disable,
            on_destroy,
            start,
            update,
            world_matrix_listener,
            collision,
            trigger,
        })
    }

    /// Start marks itself called and leaves the non-synced collection when it fires
    fn build_start<C: Component>(
        component: &Rc<RefCell<C>>,
        execution_order: i32,
        ids: &EventIdGenerator,
        sink: &Rc<dyn EventSink>,
        state: &Rc<Cell<ComponentEventState>>,
    ) -> LifecycleEvent {
        let call_start = bind(component, "start", C::start);
        let key_slot: Rc<Cell<Option<EventKey>>> = Rc::new(Cell::new(None));
        let sink: Weak<dyn EventSink> = Rc::downgrade(sink);
        let state = state.clone();
        let slot = key_slot.clone();

        let event = LifecycleEvent::start(execution_order, ids, move || {
            let mut current = state.get();
            if current.start_called {
                return Ok(());
            }
            let was_registered = current.start_registered;
            current.start_called = true;
            current.start_registered = false;
            state.set(current);

            if was_registered {
                if let (Some(sink), Some(key)) = (sink.upgrade(), slot.get()) {
                    sink.remove_event_from_non_synced_collection(key);
                }
            }
            call_start()
        });
        key_slot.set(Some(event.key()));
        event
    }

    fn update_state(&self, f: impl FnOnce(&mut ComponentEventState)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
    }

    /// Call awake synchronously, at most once
    pub fn try_call_awake(&self) -> Result<()> {
        if self.state.get().awake_called {
            return Ok(());
        }
        self.update_state(|s| s.awake_called = true);
        match &self.awake {
            Some(awake) => awake.call(),
            None => Ok(()),
        }
    }

    /// Transition to enabled and queue a fresh on_enable event
    ///
    /// The enabled flag flips even without the on_enable capability, since
    /// start, update and physics registration follow it.
    pub fn try_register_on_enable(&self) {
        let state = self.state.get();
        if state.destroyed || state.enabled {
            return;
        }
        self.update_state(|s| s.enabled = true);
        if let Some(game_object) = self.game_object() {
            game_object.register_component(self);
        }
        if let Some(template) = &self.on_enable {
            trace!(component = %self.name, "queue on_enable");
            self.sink.add_event_to_synced_collection(template.reissue(&self.ids));
        }
    }

    /// Transition to disabled and queue a fresh on_disable event
    ///
    /// Like [`try_register_on_enable`](Self::try_register_on_enable), the
    /// flag flips without the capability. Physics events leave the attached
    /// game object at once, so a dispatch in flight skips them.
    pub fn try_register_on_disable(&self) {
        let state = self.state.get();
        if state.destroyed || !state.enabled {
            return;
        }
        self.update_state(|s| s.enabled = false);
        if let Some(game_object) = self.game_object() {
            game_object.unregister_component(self);
        }
        if let Some(template) = &self.on_disable {
            trace!(component = %self.name, "queue on_disable");
            self.sink.add_event_to_synced_collection(template.reissue(&self.ids));
        }
    }

    /// Mark destroyed and queue on_destroy, at most once
    pub fn try_register_on_destroy(&self) {
        if self.state.get().destroyed {
            return;
        }
        self.update_state(|s| s.destroyed = true);
        if let Some(game_object) = self.game_object() {
            game_object.unregister_component(self);
        }
        if let Some(on_destroy) = &self.on_destroy {
            trace!(component = %self.name, "queue on_destroy");
            self.sink.add_event_to_synced_collection(on_destroy.clone());
        }
    }

    /// Register start unless it already fired or is pending
    pub fn try_register_start(&self) {
        let Some(start) = &self.start else {
            return;
        };
        let state = self.state.get();
        if state.start_called || state.start_registered || state.destroyed {
            return;
        }
        self.update_state(|s| s.start_registered = true);
        self.sink.add_event_to_non_synced_collection(start.clone());
    }

    /// Cancel a pending start; it will not fire
    pub fn try_unregister_start(&self) {
        let Some(start) = &self.start else {
            return;
        };
        let state = self.state.get();
        if !state.start_registered || state.start_called {
            return;
        }
        self.update_state(|s| s.start_registered = false);
        self.sink.remove_event_from_non_synced_collection(start.key());
    }

    pub fn try_register_update(&self) {
        let Some(update) = &self.update else {
            return;
        };
        let state = self.state.get();
        if state.update_registered || state.destroyed {
            return;
        }
        self.update_state(|s| s.update_registered = true);
        self.sink.add_event_to_non_synced_collection(update.clone());
    }

    pub fn try_unregister_update(&self) {
        let Some(update) = &self.update else {
            return;
        };
        if !self.state.get().update_registered {
            return;
        }
        self.update_state(|s| s.update_registered = false);
        self.sink.remove_event_from_non_synced_collection(update.key());
    }

    /// Awake if needed, then on_enable, start and update
    pub fn enable(&self) -> Result<()> {
        if self.state.get().destroyed {
            return Ok(());
        }
        self.try_call_awake()?;
        self.try_register_on_enable();
        self.try_register_start();
        self.try_register_update();
        Ok(())
    }

    /// on_disable, then withdraw start and update
    pub fn disable(&self) {
        self.try_register_on_disable();
        self.try_unregister_start();
        self.try_unregister_update();
    }

    /// Disable, then queue on_destroy
    pub fn destroy(&self) {
        self.disable();
        self.try_register_on_destroy();
    }

    /// Bind to the game object whose physics callbacks this component receives
    ///
    /// Physics events and the world-matrix listener are registered while the
    /// component is enabled and removed when it is disabled or destroyed.
    pub fn attach(&self, game_object: &Rc<GameObjectEventContainer>) {
        if let Some(previous) = self.game_object() {
            previous.unregister_component(self);
        }
        *self.game_object.borrow_mut() = Rc::downgrade(game_object);
        let state = self.state.get();
        if state.enabled && !state.destroyed {
            game_object.register_component(self);
        }
    }

    /// Game object set by [`attach`](Self::attach), if it is still alive
    pub fn game_object(&self) -> Option<Rc<GameObjectEventContainer>> {
        self.game_object.borrow().upgrade()
    }

    pub fn collision_event(&self, phase: ContactPhase) -> Option<&CollisionEvent> {
        self.collision[phase as usize].as_ref()
    }

    pub fn trigger_event(&self, phase: ContactPhase) -> Option<&TriggerEvent> {
        self.trigger[phase as usize].as_ref()
    }

    pub fn on_collision_enter_2d(&self) -> Option<&CollisionEvent> {
        self.collision_event(ContactPhase::Enter)
    }

    pub fn on_collision_stay_2d(&self) -> Option<&CollisionEvent> {
        self.collision_event(ContactPhase::Stay)
    }

    pub fn on_collision_exit_2d(&self) -> Option<&CollisionEvent> {
        self.collision_event(ContactPhase::Exit)
    }

    pub fn on_trigger_enter_2d(&self) -> Option<&TriggerEvent> {
        self.trigger_event(ContactPhase::Enter)
    }

    pub fn on_trigger_stay_2d(&self) -> Option<&TriggerEvent> {
        self.trigger_event(ContactPhase::Stay)
    }

    pub fn on_trigger_exit_2d(&self) -> Option<&TriggerEvent> {
        self.trigger_event(ContactPhase::Exit)
    }

    pub fn world_matrix_listener(&self) -> Option<&WorldMatrixListener> {
        self.world_matrix_listener.as_ref()
    }

    /// Unique id of this container, issued by the shared generator
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn execution_order(&self) -> i32 {
        self.execution_order
    }

    /// Snapshot of the lifecycle flags
    pub fn state(&self) -> ComponentEventState {
        self.state.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.get().enabled
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.get().destroyed
    }

    /// Key of the start event, if the component has one
    pub fn start_key(&self) -> Option<EventKey> {
        self.start.as_ref().map(LifecycleEvent::key)
    }

    /// Key of the update event, if the component has one
    pub fn update_key(&self) -> Option<EventKey> {
        self.update.as_ref().map(LifecycleEvent::key)
    }
}

impl std::fmt::Debug for ComponentEventContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentEventContainer")
            .field("name", &self.name)
            .field("instance_id", &self.instance_id)
            .field("capabilities", &self.capabilities)
            .field("state", &self.state.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameEventQueue;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        caps: Capabilities,
        log: Log,
        // Containers disabled or enabled from inside update
        disable_on_update: Option<Rc<ComponentEventContainer>>,
        enable_on_update: Option<Rc<ComponentEventContainer>>,
    }

    impl Recorder {
        fn record(&self, method: &str) -> Result<()> {
            self.log.borrow_mut().push(format!("{}.{method}", self.label));
            Ok(())
        }
    }

    impl Component for Recorder {
        fn capabilities(&self) -> Capabilities {
            self.caps
        }

        fn awake(&mut self) -> Result<()> {
            self.record("awake")
        }

        fn start(&mut self) -> Result<()> {
            self.record("start")
        }

        fn update(&mut self) -> Result<()> {
            if let Some(target) = &self.disable_on_update {
                target.disable();
            }
            if let Some(target) = self.enable_on_update.take() {
                target.enable()?;
            }
            self.record("update")
        }

        fn on_enable(&mut self) -> Result<()> {
            self.record("on_enable")
        }

        fn on_disable(&mut self) -> Result<()> {
            self.record("on_disable")
        }

        fn on_destroy(&mut self) -> Result<()> {
            self.record("on_destroy")
        }
    }

    struct Harness {
        ids: Rc<EventIdGenerator>,
        queue: Rc<FrameEventQueue>,
        log: Log,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                ids: Rc::new(EventIdGenerator::new()),
                queue: Rc::new(FrameEventQueue::new()),
                log: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn spawn(
            &self,
            label: &'static str,
            caps: Capabilities,
            order: i32,
        ) -> (Rc<RefCell<Recorder>>, Rc<ComponentEventContainer>) {
            let recorder = Rc::new(RefCell::new(Recorder {
                label,
                caps,
                log: self.log.clone(),
                disable_on_update: None,
                enable_on_update: None,
            }));
            let sink: Rc<dyn EventSink> = self.queue.clone();
            let events = ComponentEventContainer::new(&recorder, order, self.ids.clone(), sink).unwrap();
            (recorder, Rc::new(events))
        }

        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.borrow_mut())
        }
    }

    fn all_lifecycle() -> Capabilities {
        Capabilities::AWAKE
            | Capabilities::START
            | Capabilities::UPDATE
            | Capabilities::ON_ENABLE
            | Capabilities::ON_DISABLE
            | Capabilities::ON_DESTROY
    }

    #[test]
    fn test_awake_called_once() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", all_lifecycle(), 0);
        events.try_call_awake().unwrap();
        events.try_call_awake().unwrap();
        assert_eq!(harness.take_log(), vec!["a.awake"]);
        assert!(events.state().awake_called);
    }

    #[test]
    fn test_enable_runs_lifecycle_in_priority_order() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", all_lifecycle(), 0);

        events.enable().unwrap();
        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["a.awake", "a.on_enable", "a.start", "a.update"]);

        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["a.update"]);
    }

    #[test]
    fn test_start_self_unregisters_when_fired() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", Capabilities::START, 0);

        events.try_register_start();
        let key = events.start_key().unwrap();
        assert!(harness.queue.is_registered(&key));

        harness.queue.run_frame().unwrap();
        assert!(!harness.queue.is_registered(&key));
        assert!(events.state().start_called);
        assert!(!events.state().start_registered);

        // Already fired: both are no-ops
        events.try_unregister_start();
        events.try_register_start();
        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["a.start"]);
    }

    #[test]
    fn test_unregistered_start_never_fires() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", Capabilities::START, 0);

        events.try_register_start();
        events.try_register_start();
        assert_eq!(harness.queue.non_synced_len(), 1);

        events.try_unregister_start();
        harness.queue.run_frame().unwrap();
        assert!(harness.take_log().is_empty());
        assert!(!events.state().start_called);
    }

    #[test]
    fn test_start_deferred_until_reenabled() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", Capabilities::START | Capabilities::UPDATE, 0);

        events.enable().unwrap();
        events.disable();
        harness.queue.run_frame().unwrap();
        assert!(harness.take_log().is_empty());

        events.enable().unwrap();
        harness.queue.run_frame().unwrap();
        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["a.start", "a.update", "a.update"]);
    }

    #[test]
    fn test_enable_disable_are_edge_triggered() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", Capabilities::ON_ENABLE | Capabilities::ON_DISABLE, 0);

        events.try_register_on_disable();
        events.try_register_on_enable();
        events.try_register_on_enable();
        assert_eq!(harness.queue.synced_len(), 1);

        events.try_register_on_disable();
        events.try_register_on_enable();
        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["a.on_enable", "a.on_disable", "a.on_enable"]);
    }

    #[test]
    fn test_destroy_is_terminal() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", all_lifecycle(), 0);

        events.enable().unwrap();
        harness.queue.run_frame().unwrap();
        harness.take_log();

        events.destroy();
        events.destroy();
        events.enable().unwrap();
        harness.queue.run_frame().unwrap();

        assert_eq!(harness.take_log(), vec!["a.on_disable", "a.on_destroy"]);
        assert!(events.is_destroyed());
        assert_eq!(harness.queue.non_synced_len(), 0);
    }

    #[test]
    fn test_missing_capabilities_produce_no_events() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", Capabilities::empty(), 0);

        events.enable().unwrap();
        events.destroy();
        harness.queue.run_frame().unwrap();

        assert!(harness.take_log().is_empty());
        assert!(events.on_collision_enter_2d().is_none());
        assert!(events.on_trigger_exit_2d().is_none());
        assert!(events.world_matrix_listener().is_none());
        assert!(events.start_key().is_none());
    }

    #[test]
    fn test_disable_from_earlier_update_skips_later_update() {
        let harness = Harness::new();
        let (first, first_events) = harness.spawn("first", Capabilities::UPDATE, 0);
        let (_second, second_events) = harness.spawn("second", Capabilities::UPDATE, 1);
        first_events.enable().unwrap();
        second_events.enable().unwrap();

        first.borrow_mut().disable_on_update = Some(second_events.clone());
        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["first.update"]);
        assert!(!second_events.is_enabled());

        first.borrow_mut().disable_on_update = None;
        second_events.enable().unwrap();
        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["first.update", "second.update"]);
    }

    #[test]
    fn test_enabled_from_update_starts_next_frame_after_on_enable() {
        let harness = Harness::new();
        let (x, x_events) = harness.spawn("x", Capabilities::UPDATE, 0);
        let (_y, y_events) = harness.spawn("y", all_lifecycle(), 0);
        x_events.enable().unwrap();
        x.borrow_mut().enable_on_update = Some(y_events.clone());

        // awake is immediate; on_enable, start and update wait for the next frame
        harness.queue.run_frame().unwrap();
        assert_eq!(harness.take_log(), vec!["y.awake", "x.update"]);
        assert!(y_events.is_enabled());
        assert!(harness.queue.is_registered(&y_events.update_key().unwrap()));

        harness.queue.run_frame().unwrap();
        assert_eq!(
            harness.take_log(),
            vec!["y.on_enable", "y.start", "x.update", "y.update"]
        );
    }

    #[test]
    fn test_start_withdrawn_before_deferred_registration_lands() {
        let harness = Harness::new();
        let (x, x_events) = harness.spawn("x", Capabilities::UPDATE, 0);
        let (z, z_events) = harness.spawn("z", Capabilities::UPDATE, 1);
        let (_y, y_events) = harness.spawn("y", Capabilities::START, 0);
        x_events.enable().unwrap();
        z_events.enable().unwrap();
        x.borrow_mut().enable_on_update = Some(y_events.clone());
        z.borrow_mut().disable_on_update = Some(y_events.clone());

        harness.queue.run_frame().unwrap();
        assert!(!harness.queue.is_registered(&y_events.start_key().unwrap()));

        harness.queue.run_frame().unwrap();
        assert_eq!(
            harness.take_log(),
            vec!["x.update", "z.update", "x.update", "z.update"]
        );
        assert!(!y_events.state().start_called);
    }

    #[test]
    fn test_enabled_flag_tracks_transitions_without_capabilities() {
        let harness = Harness::new();
        let (_recorder, events) = harness.spawn("a", Capabilities::START, 0);

        events.try_register_on_enable();
        assert!(events.is_enabled());
        assert_eq!(harness.queue.synced_len(), 0);

        events.try_register_on_disable();
        assert!(!events.is_enabled());
        assert_eq!(harness.queue.synced_len(), 0);
    }

    #[test]
    fn test_dropped_component_callbacks_are_noops() {
        let harness = Harness::new();
        let (recorder, events) = harness.spawn("a", Capabilities::UPDATE, 0);
        events.enable().unwrap();
        drop(recorder);
        harness.queue.run_frame().unwrap();
        assert!(harness.take_log().is_empty());
    }
}
