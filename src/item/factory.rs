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

//! # Item Factory
//!
//! The factory owns the ordered loader collection, the enablement set and
//! the ownership map, and is the only place loaders are invoked from.
//!
//! ## Dispatch
//!
//! - **Creation**: a specific loader (or the fallback renderer) builds the
//!   widget, then every enabled loader may transform it
//! - **Cycling**: see [`ZiCycleDirection`](crate::item::ZiCycleDirection)
//! - **Formats / persistence**: see `formats.rs` and `persistence.rs`
//!
//! Disabled loaders are skipped by every dispatch path but keep their
//! position in the collection.
//!
//! The factory is single-threaded: loader handles and the ownership map are
//! reference counted with `Rc`, so neither the factory nor the items it
//! creates can leave the thread that owns the views.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::config::ZiItemFactoryConfig;
use crate::errors::{Result, ZiError};
use crate::item::enablement::ZiEnablementSet;
use crate::item::loader::ZiLoaderHandle;
use crate::item::model::ZiDataIndex;
use crate::item::native::ZiModuleInstantiator;
use crate::item::ownership::{ZiItemOwner, ZiOwnershipGuard, ZiOwnershipMap};
use crate::item::plugin_dir::ZiPluginDirStrategy;
use crate::item::registry::ZiPluginRegistry;
use crate::item::widget::{ZiFallbackItem, ZiItemWidget, ZiParentContext, ZiWidgetId};
use crate::logging::{ZiLogLevel, ZiLogSink};

/// A widget handed out by the factory. Dropping it destroys the widget and
/// removes its ownership entry.
pub struct ZiItem {
    // Widget first: it is destroyed before its ownership entry goes away.
    widget: Box<dyn ZiItemWidget>,
    guard: ZiOwnershipGuard,
}

impl ZiItem {
    pub fn id(&self) -> ZiWidgetId {
        self.guard.widget()
    }

    pub fn widget(&self) -> &dyn ZiItemWidget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn ZiItemWidget {
        self.widget.as_mut()
    }

    /// Downcast the widget to a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.widget.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for ZiItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiItem")
            .field("id", &self.id())
            .field("widget", &self.widget)
            .finish()
    }
}

/// Selects, orders and invokes item loaders.
pub struct ZiItemFactory {
    pub(crate) registry: ZiPluginRegistry,
    pub(crate) enablement: ZiEnablementSet,
    pub(crate) ownership: ZiOwnershipMap,
    pub(crate) sink: Rc<dyn ZiLogSink>,
}

impl fmt::Debug for ZiItemFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiItemFactory")
            .field("registry", &self.registry)
            .field("enablement", &self.enablement)
            .field("ownership", &self.ownership)
            .finish_non_exhaustive()
    }
}

impl ZiItemFactory {
    pub fn new(registry: ZiPluginRegistry, sink: Rc<dyn ZiLogSink>) -> Self {
        if registry.is_empty() {
            sink.log("No plugins loaded", ZiLogLevel::Note);
        }
        ZiItemFactory {
            registry,
            enablement: ZiEnablementSet::new(),
            ownership: ZiOwnershipMap::new(),
            sink,
        }
    }

    /// Factory over loaders linked into the host.
    pub fn with_loaders(loaders: Vec<ZiLoaderHandle>, sink: Rc<dyn ZiLogSink>) -> Self {
        Self::new(ZiPluginRegistry::from_loaders(loaders), sink)
    }

    /// Discover plugins for an application living in `app_dir`.
    pub fn discover(
        strategy: &ZiPluginDirStrategy,
        app_dir: &Path,
        instantiator: &dyn ZiModuleInstantiator,
        sink: Rc<dyn ZiLogSink>,
    ) -> Self {
        let registry = ZiPluginRegistry::discover_with(strategy, app_dir, instantiator, sink.as_ref());
        Self::new(registry, sink)
    }

    pub fn registry(&self) -> &ZiPluginRegistry {
        &self.registry
    }

    pub fn loaders(&self) -> &[ZiLoaderHandle] {
        self.registry.loaders()
    }

    pub fn has_loaders(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Re-sort loaders by a prioritized list of names.
    pub fn set_plugin_priority<S: AsRef<str>>(&mut self, names: &[S]) {
        self.registry.apply_name_order(names);
    }

    pub fn set_loader_enabled(&mut self, loader: &ZiLoaderHandle, enabled: bool) {
        self.enablement.set_enabled(loader, enabled);
    }

    pub fn is_loader_enabled(&self, loader: &ZiLoaderHandle) -> bool {
        self.enablement.is_enabled(loader)
    }

    /// Enabled loaders in current order.
    pub fn enabled_loaders(&self) -> impl Iterator<Item = &ZiLoaderHandle> + '_ {
        self.registry
            .loaders()
            .iter()
            .filter(move |loader| self.enablement.is_enabled(loader))
    }

    /// Apply name ordering and enablement from configuration.
    pub fn apply_config(&mut self, config: &ZiItemFactoryConfig) {
        if !config.plugin_priority.is_empty() {
            self.set_plugin_priority(&config.plugin_priority);
        }

        let loaders = self.registry.loaders().to_vec();
        for loader in &loaders {
            let enabled = !config.is_plugin_disabled(loader.name());
            self.enablement.set_enabled(loader, enabled);
        }

        for name in &config.disabled_plugins {
            if self.registry.find_by_name(name).is_none() {
                log::warn!("item.config.unknown_plugin: disabled plugin not loaded - plugin={}", name);
            }
        }
    }

    /// Who created `widget`. `None` when the widget is unknown or destroyed.
    pub fn owner_of(&self, widget: ZiWidgetId) -> Option<ZiItemOwner> {
        self.ownership.owner_of(widget)
    }

    /// Destruction hook for hosts that tear widgets down outside of
    /// [`ZiItem`]'s lifetime.
    pub fn item_destroyed(&self, widget: ZiWidgetId) {
        self.ownership.remove(widget);
    }

    pub fn live_items(&self) -> Vec<ZiWidgetId> {
        self.ownership.live_widgets()
    }

    /// Create an item with one specific loader, or with the fallback
    /// renderer when `loader` is `None`.
    pub fn create_item_with(
        &self,
        loader: Option<&ZiLoaderHandle>,
        index: &dyn ZiDataIndex,
        parent: ZiParentContext,
    ) -> Option<ZiItem> {
        self.try_create_item_with(loader, index, parent).ok()
    }

    pub fn try_create_item_with(
        &self,
        loader: Option<&ZiLoaderHandle>,
        index: &dyn ZiDataIndex,
        parent: ZiParentContext,
    ) -> Result<ZiItem> {
        let Some(loader) = loader else {
            return Ok(self.create_fallback_item(index, parent));
        };
        if !self.enablement.is_enabled(loader) {
            return Err(ZiError::LoaderDisabled {
                loader: loader.name().to_string(),
            });
        }

        let created = loader.loader().create(index, parent).ok_or_else(|| {
            ZiError::LoaderProducedNoItem {
                loader: loader.name().to_string(),
            }
        })?;
        Ok(self.finish_item(created, index, ZiItemOwner::Loader(loader.clone())))
    }

    /// Create an item with the first enabled loader that accepts the row,
    /// falling back to the built-in plain text renderer.
    pub fn create_item(&self, index: &dyn ZiDataIndex, parent: ZiParentContext) -> ZiItem {
        for loader in self.registry.loaders() {
            match self.try_create_item_with(Some(loader), index, parent) {
                Ok(item) => return item,
                Err(err) => log::trace!("item.create.skip: {}", err),
            }
        }
        self.create_fallback_item(index, parent)
    }

    fn create_fallback_item(&self, index: &dyn ZiDataIndex, parent: ZiParentContext) -> ZiItem {
        let widget = Box::new(ZiFallbackItem::new(index, parent));
        self.finish_item(widget, index, ZiItemOwner::Fallback)
    }

    /// Transform chain, notes tooltip and ownership entry for a new widget.
    fn finish_item(
        &self,
        created: Box<dyn ZiItemWidget>,
        index: &dyn ZiDataIndex,
        owner: ZiItemOwner,
    ) -> ZiItem {
        let mut widget = self.transform_item(created, index);
        if let Some(notes) = index.notes() {
            if !notes.is_empty() {
                widget.set_tooltip(&notes);
            }
        }
        let guard = self.ownership.record(widget.widget_id(), owner);
        ZiItem { widget, guard }
    }

    /// Offer `item` to every enabled loader in order. Each may replace it.
    pub fn transform_item(
        &self,
        item: Box<dyn ZiItemWidget>,
        index: &dyn ZiDataIndex,
    ) -> Box<dyn ZiItemWidget> {
        self.enabled_loaders()
            .fold(item, |item, loader| loader.loader().transform(item, index).into_inner())
    }
}
