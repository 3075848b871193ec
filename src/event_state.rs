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

/// Per-component lifecycle flags
///
/// Mutated only by the owning [`ComponentEventContainer`](crate::ComponentEventContainer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentEventState {
    pub awake_called: bool,
    pub start_registered: bool,
    pub start_called: bool,
    pub update_registered: bool,
    pub enabled: bool,
    pub destroyed: bool,
}
