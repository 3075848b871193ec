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

//! Per-frame event collections
//!
//! Component containers push lifecycle events through the [`EventSink`]
//! trait and never iterate them. [`FrameEventQueue`] is the frame loop's
//! implementation: a synced collection of one-shot events drained every
//! frame, and a non-synced collection of repeating events (start, update)
//! that persists across frames.
//!
//! Repeating events registered while the non-synced collection is running
//! wait for the next frame, so a component enabled from another one's update
//! still sees on_enable before its start and update.

use std::cell::{Cell, RefCell};

#[cfg(feature = "profiling")]
use tracing::info_span;
use tracing::trace;

use crate::collection::MutIterableCollection;
use crate::error::{EventError, Result};
use crate::event::{EventKey, LifecycleEvent};

/// Receiver of lifecycle events produced by component containers
pub trait EventSink {
    /// Queue a one-shot event for the next synced dispatch
    fn add_event_to_synced_collection(&self, event: LifecycleEvent);

    /// Register a repeating event
    fn add_event_to_non_synced_collection(&self, event: LifecycleEvent);

    /// Unregister a repeating event by key
    fn remove_event_from_non_synced_collection(&self, key: EventKey);
}

/// Frame loop owner of the synced and non-synced collections
#[derive(Debug, Default)]
pub struct FrameEventQueue {
    synced: MutIterableCollection<LifecycleEvent>,
    non_synced: MutIterableCollection<LifecycleEvent>,
    // Registered during a non-synced run, inserted when it ends
    deferred: RefCell<Vec<LifecycleEvent>>,
    frame_count: Cell<u64>,
}

impl FrameEventQueue {
    /// Create empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch every pending one-shot event, removing each as it runs
    ///
    /// Events queued by the dispatched callbacks run in the same call. When a
    /// callback fails, the events it did not reach stay queued for the next
    /// call; the failed one does not run again.
    pub fn run_synced(&self) -> Result<()> {
        self.synced.for_each(|event| {
            self.synced.delete(event);
            event.call()
        })
    }

    /// Dispatch every registered repeating event
    pub fn run_non_synced(&self) -> Result<()> {
        let result = self.non_synced.for_each(|event| event.call());
        if !matches!(result, Err(EventError::TraversalActive)) {
            for event in self.deferred.take() {
                self.non_synced.insert(event);
            }
        }
        result
    }

    /// Run one frame: synced events first, then repeating ones
    pub fn run_frame(&self) -> Result<()> {
        #[cfg(feature = "profiling")]
        let _span = info_span!("run_frame", frame = self.frame_count.get()).entered();

        trace!(
            frame = self.frame_count.get(),
            synced = self.synced.len(),
            non_synced = self.non_synced.len(),
            "running frame"
        );
        self.run_synced()?;
        self.run_non_synced()?;
        self.frame_count.set(self.frame_count.get() + 1);
        Ok(())
    }

    /// Number of pending one-shot events
    pub fn synced_len(&self) -> usize {
        self.synced.len()
    }

    /// Number of registered repeating events, including deferred ones
    pub fn non_synced_len(&self) -> usize {
        self.non_synced.len() + self.deferred.borrow().len()
    }

    /// Check if a repeating event is registered
    pub fn is_registered(&self, key: &EventKey) -> bool {
        self.non_synced.contains(key) || self.deferred.borrow().iter().any(|event| event.key() == *key)
    }

    /// Completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count.get()
    }
}

impl EventSink for FrameEventQueue {
    fn add_event_to_synced_collection(&self, event: LifecycleEvent) {
        self.synced.insert(event);
    }

    fn add_event_to_non_synced_collection(&self, event: LifecycleEvent) {
        if self.non_synced.is_traversing() {
            trace!(event = ?event, "deferring repeating event to next frame");
            self.deferred.borrow_mut().push(event);
            return;
        }
        self.non_synced.insert(event);
    }

    fn remove_event_from_non_synced_collection(&self, key: EventKey) {
        self.deferred.borrow_mut().retain(|event| event.key() != key);
        self.non_synced.delete(&key);
    }
}
