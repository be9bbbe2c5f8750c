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


//! # Persistence Dispatch
//!
//! Loading and saving a scope (a named collection of items) is delegated to
//! the first enabled loader that succeeds. After a successful load every
//! enabled loader is notified.

use std::io::SeekFrom;

use crate::item::factory::ZiItemFactory;
use crate::item::model::{ZiItemModel, ZiItemStream};
use crate::logging::ZiLogLevel;

impl ZiItemFactory {
    /// Load `scope` from `stream` with the first enabled loader that
    /// recognizes it.
    pub fn load_items(
        &self,
        scope: &str,
        model: &mut dyn ZiItemModel,
        stream: &mut dyn ZiItemStream,
    ) -> bool {
        for loader in self.enabled_loaders() {
            if loader.loader().load_items(scope, model, stream) {
                log::debug!(
                    "item.persist.load: scope loaded - scope={}, loader={}, rows={}",
                    scope,
                    loader.name(),
                    model.row_count()
                );
                return true;
            }
        }
        false
    }

    /// Save `scope` to `stream` with the first enabled loader that succeeds.
    ///
    /// The stream is rewound before every attempt. It is not truncated, so a
    /// failed attempt that wrote more bytes than the successful one leaves
    /// stale trailing bytes behind.
    pub fn save_items(
        &self,
        scope: &str,
        model: &dyn ZiItemModel,
        stream: &mut dyn ZiItemStream,
    ) -> bool {
        for loader in self.enabled_loaders() {
            if let Err(err) = stream.seek(SeekFrom::Start(0)) {
                self.sink.log(
                    &format!("Cannot rewind stream to save '{}': {}", scope, err),
                    ZiLogLevel::Error,
                );
                return false;
            }
            if loader.loader().save_items(scope, model, stream) {
                log::debug!(
                    "item.persist.save: scope saved - scope={}, loader={}",
                    scope,
                    loader.name()
                );
                return true;
            }
        }
        false
    }

    /// Notify every enabled loader that `scope` finished loading.
    pub fn items_loaded(
        &self,
        scope: &str,
        model: &mut dyn ZiItemModel,
        stream: &mut dyn ZiItemStream,
    ) {
        for loader in self.enabled_loaders() {
            loader.loader().items_loaded(scope, model, stream);
        }
    }
}
