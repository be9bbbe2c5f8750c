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

//! # Loader Cycling
//!
//! Re-render the same row with the next or previous loader after the one
//! that created the current item, wrapping around the collection.

use crate::errors::{Result, ZiError};
use crate::item::factory::{ZiItem, ZiItemFactory};
use crate::item::model::ZiDataIndex;
use crate::item::ownership::ZiItemOwner;
use crate::logging::ZiLogLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZiCycleDirection {
    Next,
    Previous,
}

impl ZiCycleDirection {
    pub fn step(self) -> isize {
        match self {
            ZiCycleDirection::Next => 1,
            ZiCycleDirection::Previous => -1,
        }
    }
}

/// Positions visited when cycling from `start` in a collection of `len`
/// loaders: every other position once, in walking order, never `start`.
pub fn cycle_positions(
    start: usize,
    len: usize,
    direction: ZiCycleDirection,
) -> impl Iterator<Item = usize> {
    let step = direction.step();
    (1..len).map(move |offset| {
        let len = len as isize;
        (start as isize + step * offset as isize).rem_euclid(len) as usize
    })
}

impl ZiItemFactory {
    pub fn next_item_loader(&self, index: &dyn ZiDataIndex, current: &ZiItem) -> Option<ZiItem> {
        self.cycle_item(index, current, ZiCycleDirection::Next)
    }

    pub fn previous_item_loader(
        &self,
        index: &dyn ZiDataIndex,
        current: &ZiItem,
    ) -> Option<ZiItem> {
        self.cycle_item(index, current, ZiCycleDirection::Previous)
    }

    pub fn cycle_item(
        &self,
        index: &dyn ZiDataIndex,
        current: &ZiItem,
        direction: ZiCycleDirection,
    ) -> Option<ZiItem> {
        self.try_cycle_item(index, current, direction).ok()
    }

    /// Replacement for `current` created by the first loader, walking in
    /// `direction` from the one that created it, that accepts the row.
    ///
    /// The caller drops `current` once it has swapped in the replacement.
    pub fn try_cycle_item(
        &self,
        index: &dyn ZiDataIndex,
        current: &ZiItem,
        direction: ZiCycleDirection,
    ) -> Result<ZiItem> {
        let widget = current.widget();
        let miss = || ZiError::OwnershipLookupMiss {
            widget: widget.widget_id().0,
        };
        let owner = match self.ownership.owner_of(widget.widget_id()) {
            Some(ZiItemOwner::Loader(loader)) => loader,
            Some(ZiItemOwner::Fallback) | None => return Err(miss()),
        };

        let Some(start) = self.registry.position_of(&owner) else {
            self.sink.log(
                &format!("Loader '{}' owns an item but is not registered", owner.name()),
                ZiLogLevel::Error,
            );
            return Err(miss());
        };

        let parent = widget.parent();
        let loaders = self.registry.loaders();
        for position in cycle_positions(start, loaders.len(), direction) {
            if let Ok(item) = self.try_create_item_with(Some(&loaders[position]), index, parent) {
                log::debug!(
                    "item.cycle: switched loader - from={}, to={}, direction={:?}",
                    owner.name(),
                    loaders[position].name(),
                    direction
                );
                return Ok(item);
            }
        }

        Err(ZiError::NoLoaderAvailable(format!(
            "no loader other than '{}' produced an item",
            owner.name()
        )))
    }
}
