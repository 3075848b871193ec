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


//! Scenarios spanning frames and physics steps

#[cfg(test)]
mod tests {
    #![allow(clippy::module_inception)]
    use crate::prelude::*;
    use glam::Vec2;
    use smallvec::smallvec;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Actor {
        label: &'static str,
        capabilities: Capabilities,
        log: Log,
        // Destroyed on the first collision
        victim: Option<Rc<ComponentEventContainer>>,
    }

    impl Actor {
        fn new(label: &'static str, capabilities: Capabilities, log: &Log) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                label,
                capabilities,
                log: log.clone(),
                victim: None,
            }))
        }

        fn push(&self, what: &str) -> Result<()> {
            self.log.borrow_mut().push(format!("{}.{what}", self.label));
            Ok(())
        }
    }

    impl Component for Actor {
        fn capabilities(&self) -> Capabilities {
            self.capabilities
        }

        fn awake(&mut self) -> Result<()> {
            self.push("awake")
        }

        fn on_enable(&mut self) -> Result<()> {
            self.push("on_enable")
        }

        fn start(&mut self) -> Result<()> {
            self.push("start")
        }

        fn update(&mut self) -> Result<()> {
            self.push("update")
        }

        fn on_disable(&mut self) -> Result<()> {
            self.push("on_disable")
        }

        fn on_destroy(&mut self) -> Result<()> {
            self.push("on_destroy")
        }

        fn on_collision_enter_2d(&mut self, _collision: &Collision2D) -> Result<()> {
            if let Some(events) = self.victim.take() {
                events.destroy();
            }
            self.push("collision_enter")
        }
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    fn lifecycle() -> Capabilities {
        Capabilities::AWAKE
            | Capabilities::ON_ENABLE
            | Capabilities::START
            | Capabilities::UPDATE
            | Capabilities::ON_DISABLE
            | Capabilities::ON_DESTROY
    }

    fn manifold() -> ContactManifold {
        ContactManifold {
            points: smallvec![ContactPoint2D {
                point: Vec2::ZERO,
                normal: Vec2::Y,
                separation: 0.0,
            }],
            relative_velocity: Vec2::new(0.0, -3.0),
        }
    }

    #[test]
    fn test_lifecycle_across_frames() -> Result<()> {
        let runtime = EventRuntime::new();
        let log: Log = Rc::default();
        let actor = Actor::new("actor", lifecycle(), &log);
        let events = runtime.create_component_events(&actor)?;

        events.enable()?;
        assert_eq!(take(&log), vec!["actor.awake"]);

        runtime.run_frame()?;
        assert_eq!(take(&log), vec!["actor.on_enable", "actor.start", "actor.update"]);

        runtime.run_frame()?;
        assert_eq!(take(&log), vec!["actor.update"]);

        events.disable();
        runtime.run_frame()?;
        assert_eq!(take(&log), vec!["actor.on_disable"]);

        events.enable()?;
        runtime.run_frame()?;
        assert_eq!(take(&log), vec!["actor.on_enable", "actor.update"]);

        events.destroy();
        runtime.run_frame()?;
        assert_eq!(take(&log), vec!["actor.on_disable", "actor.on_destroy"]);

        runtime.run_frame()?;
        assert!(take(&log).is_empty());
        assert_eq!(runtime.frames().non_synced_len(), 0);
        Ok(())
    }

    #[test]
    fn test_start_cancelled_before_first_frame() -> Result<()> {
        let runtime = EventRuntime::new();
        let log: Log = Rc::default();
        let actor = Actor::new("actor", lifecycle(), &log);
        let events = runtime.create_component_events(&actor)?;

        events.enable()?;
        events.disable();
        runtime.run_frame()?;
        runtime.run_frame()?;

        assert_eq!(take(&log), vec!["actor.awake", "actor.on_enable", "actor.on_disable"]);
        assert!(!events.state().start_called);
        Ok(())
    }

    #[test]
    fn test_components_update_in_execution_order() -> Result<()> {
        let runtime = EventRuntime::new();
        let log: Log = Rc::default();
        let late = Actor::new("late", Capabilities::UPDATE, &log);
        let early = Actor::new("early", Capabilities::UPDATE, &log);
        let late_events = runtime.create_component_events_with_order(&late, 100)?;
        let early_events = runtime.create_component_events_with_order(&early, -100)?;

        late_events.enable()?;
        early_events.enable()?;
        runtime.run_frame()?;

        assert_eq!(take(&log), vec!["early.update", "late.update"]);
        Ok(())
    }

    #[test]
    fn test_destroy_during_collision_dispatch() -> Result<()> {
        let mut runtime = EventRuntime::new();
        let log: Log = Rc::default();

        let body = runtime.spawn_game_object();
        let wall = runtime.spawn_game_object();

        let guard = Actor::new("guard", Capabilities::COLLISION_2D, &log);
        let victim = Actor::new(
            "victim",
            Capabilities::COLLISION_2D | Capabilities::ON_DISABLE | Capabilities::ON_DESTROY,
            &log,
        );
        let guard_events = Rc::new(runtime.create_component_events_with_order(&guard, 0)?);
        let victim_events = Rc::new(runtime.create_component_events_with_order(&victim, 1)?);
        guard_events.attach(&body);
        victim_events.attach(&body);
        guard_events.enable()?;
        victim_events.enable()?;
        guard.borrow_mut().victim = Some(victim_events.clone());

        let body_collider = runtime.add_collider(&body, false);
        let wall_collider = runtime.add_collider(&wall, false);

        runtime.step_physics(|listener| listener.begin_contact(body_collider, wall_collider, &manifold()))?;
        assert_eq!(take(&log), vec!["guard.collision_enter"]);
        assert_eq!(body.collision_listener_count(ContactPhase::Enter), 1);
        assert!(victim_events.is_destroyed());

        runtime.run_frame()?;
        assert_eq!(take(&log), vec!["victim.on_disable", "victim.on_destroy"]);

        runtime.step_physics(|listener| {
            listener.end_contact(body_collider, wall_collider);
            listener.begin_contact(body_collider, wall_collider, &manifold());
        })?;
        assert_eq!(take(&log), vec!["guard.collision_enter"]);
        Ok(())
    }

    #[test]
    fn test_collision_detail_seen_from_each_side() -> Result<()> {
        struct Recorder {
            seen: Vec<(Option<ColliderId>, Vec2)>,
        }

        impl Component for Recorder {
            fn capabilities(&self) -> Capabilities {
                Capabilities::ON_COLLISION_ENTER_2D
            }

            fn on_collision_enter_2d(&mut self, collision: &Collision2D) -> Result<()> {
                self.seen.push((
                    collision.other_collider().map(Collider2D::id),
                    collision.relative_velocity(),
                ));
                Ok(())
            }
        }

        let mut runtime = EventRuntime::new();
        let attach = |runtime: &mut EventRuntime| -> Result<_> {
            let recorder = Rc::new(RefCell::new(Recorder { seen: Vec::new() }));
            let game_object = runtime.spawn_game_object();
            let events = runtime.create_component_events(&recorder)?;
            events.attach(&game_object);
            events.enable()?;
            let id = runtime.add_collider(&game_object, false);
            Ok((recorder, id))
        };
        let (first, first_id) = attach(&mut runtime)?;
        let (second, second_id) = attach(&mut runtime)?;

        runtime.step_physics(|listener| listener.begin_contact(first_id, second_id, &manifold()))?;

        assert_eq!(first.borrow().seen, vec![(Some(second_id), Vec2::new(0.0, -3.0))]);
        assert_eq!(second.borrow().seen, vec![(Some(first_id), Vec2::new(0.0, 3.0))]);
        Ok(())
    }
}
