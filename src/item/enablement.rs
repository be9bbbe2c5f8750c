//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zitem.
//! The Zitem project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use std::collections::HashSet;

use crate::item::loader::ZiLoaderHandle;

/// Loaders explicitly disabled. A loader not in the set is enabled.
#[derive(Debug, Default, Clone)]
pub struct ZiEnablementSet {
    disabled: HashSet<ZiLoaderHandle>,
}

impl ZiEnablementSet {
    pub fn new() -> Self {
        ZiEnablementSet::default()
    }

    pub fn set_enabled(&mut self, loader: &ZiLoaderHandle, enabled: bool) {
        if enabled {
            self.disabled.remove(loader);
        } else {
            self.disabled.insert(loader.clone());
        }
    }

    pub fn is_enabled(&self, loader: &ZiLoaderHandle) -> bool {
        !self.disabled.contains(loader)
    }

    pub fn disabled_count(&self) -> usize {
        self.disabled.len()
    }
}
