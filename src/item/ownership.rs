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

//! # Created-Item Ownership
//!
//! Maps every live widget to the loader that created it. Entries are added
//! when an item is created and removed when the item is destroyed, either by
//! dropping its [`ZiOwnershipGuard`] or through an explicit
//! [`ZiOwnershipMap::remove`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::item::loader::ZiLoaderHandle;
use crate::item::widget::ZiWidgetId;

/// Who created a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZiItemOwner {
    /// The built-in plain text renderer.
    Fallback,
    Loader(ZiLoaderHandle),
}

impl ZiItemOwner {
    pub fn from_loader(loader: Option<&ZiLoaderHandle>) -> Self {
        match loader {
            Some(loader) => ZiItemOwner::Loader(loader.clone()),
            None => ZiItemOwner::Fallback,
        }
    }

    pub fn loader(&self) -> Option<&ZiLoaderHandle> {
        match self {
            ZiItemOwner::Fallback => None,
            ZiItemOwner::Loader(loader) => Some(loader),
        }
    }
}

#[derive(Debug)]
struct ZiOwnershipEntry {
    owner: ZiItemOwner,
    token: u64,
}

type ZiOwnershipTable = RefCell<HashMap<ZiWidgetId, ZiOwnershipEntry>>;

#[derive(Debug, Default)]
struct ZiOwnershipState {
    entries: ZiOwnershipTable,
    next_token: Cell<u64>,
}

/// Widget to creator mapping shared between the factory and the guards of
/// the items it handed out.
#[derive(Debug, Default, Clone)]
pub struct ZiOwnershipMap {
    state: Rc<ZiOwnershipState>,
}

impl ZiOwnershipMap {
    pub fn new() -> Self {
        ZiOwnershipMap::default()
    }

    /// Record `owner` for `widget`. The entry lives until the returned guard
    /// is dropped or [`remove`](Self::remove) is called.
    pub fn record(&self, widget: ZiWidgetId, owner: ZiItemOwner) -> ZiOwnershipGuard {
        let token = self.state.next_token.get() + 1;
        self.state.next_token.set(token);
        self.state
            .entries
            .borrow_mut()
            .insert(widget, ZiOwnershipEntry { owner, token });
        ZiOwnershipGuard {
            widget,
            token,
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn owner_of(&self, widget: ZiWidgetId) -> Option<ZiItemOwner> {
        self.state
            .entries
            .borrow()
            .get(&widget)
            .map(|entry| entry.owner.clone())
    }

    pub fn remove(&self, widget: ZiWidgetId) -> Option<ZiItemOwner> {
        self.state
            .entries
            .borrow_mut()
            .remove(&widget)
            .map(|entry| entry.owner)
    }

    pub fn len(&self) -> usize {
        self.state.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.entries.borrow().is_empty()
    }

    /// Widgets currently tracked, in ascending id order.
    pub fn live_widgets(&self) -> Vec<ZiWidgetId> {
        let mut widgets: Vec<_> = self.state.entries.borrow().keys().copied().collect();
        widgets.sort();
        widgets
    }
}

/// Removes a widget's ownership entry when dropped.
#[derive(Debug)]
pub struct ZiOwnershipGuard {
    widget: ZiWidgetId,
    token: u64,
    state: Weak<ZiOwnershipState>,
}

impl ZiOwnershipGuard {
    pub fn widget(&self) -> ZiWidgetId {
        self.widget
    }
}

impl Drop for ZiOwnershipGuard {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut entries = state.entries.borrow_mut();
        // Only remove the entry this guard created; the widget may have been
        // re-recorded since.
        if entries.get(&self.widget).map(|e| e.token) == Some(self.token) {
            entries.remove(&self.widget);
        }
    }
}
