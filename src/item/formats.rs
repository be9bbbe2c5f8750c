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

//! Save format negotiation.

use crate::item::factory::ZiItemFactory;
use crate::item::model::{MIME_ITEMS, MIME_ITEM_NOTES, MIME_TEXT};

impl ZiItemFactory {
    /// Formats to persist: every enabled loader's formats in first-seen
    /// order, with plain text first and both internal markers present.
    pub fn formats_to_save(&self) -> Vec<String> {
        let mut formats: Vec<String> = Vec::new();
        for loader in self.enabled_loaders() {
            for format in loader.loader().formats_to_save() {
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
        }

        match formats.iter().position(|f| f == MIME_TEXT) {
            Some(0) => {}
            Some(pos) => formats[..=pos].rotate_right(1),
            None => formats.insert(0, MIME_TEXT.to_string()),
        }
        for marker in [MIME_ITEM_NOTES, MIME_ITEMS] {
            if !formats.iter().any(|f| f == marker) {
                formats.push(marker.to_string());
            }
        }
        formats
    }
}
