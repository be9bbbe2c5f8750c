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


pub mod cycling;
pub mod enablement;
pub mod factory;
pub mod formats;
pub mod loader;
pub mod model;
pub mod native;
pub mod ordering;
pub mod ownership;
pub mod persistence;
pub mod plugin_dir;
pub mod registry;
pub mod widget;

pub use cycling::{cycle_positions, ZiCycleDirection};
pub use enablement::ZiEnablementSet;
pub use factory::{ZiItem, ZiItemFactory};
pub use loader::{ZiItemLoader, ZiLoaderBox, ZiLoaderHandle, ZITEM_PLUGIN_ABI_VERSION};
pub use model::{
    ZiDataIndex, ZiItemData, ZiItemList, ZiItemModel, ZiItemStream, MIME_ITEMS, MIME_ITEM_NOTES,
    MIME_TEXT,
};
pub use native::{is_library, ZiModuleInstance, ZiModuleInstantiator, ZiNativeInstantiator};
pub use ordering::{priority_order, ZiNameOrder};
pub use ownership::{ZiItemOwner, ZiOwnershipGuard, ZiOwnershipMap};
pub use plugin_dir::ZiPluginDirStrategy;
pub use registry::ZiPluginRegistry;
pub use widget::{
    ZiFallbackItem, ZiItemWidget, ZiParentContext, ZiTransformed, ZiWidgetId, FALLBACK_MAX_CHARS,
};
