//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zitem.
//! The Zitem project belongs to the Dunimd Team.
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

//! # Zitem Core Library
//!
//! Zitem discovers item loader plugins, orders and filters them, and
//! dispatches every request that needs a loader: rendering a row, cycling
//! a rendered row through alternative loaders, and loading or saving a
//! collection of rows.
//!
//! ## Module Overview
//!
//! - **item**: loader capability, plugin registry, ordering, enablement,
//!   item factory, cycling, save formats and persistence dispatch
//! - **config**: factory configuration (plugin order, disabled plugins,
//!   plugin directory strategy)
//! - **logging**: operator log sink
//! - **errors**: `ZiError` and the `Result` alias
//!
//! ## Feature Flags
//!
//! - `native` (default): load plugins from dynamic libraries with
//!   `libloading`
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::rc::Rc;
//! use zitem::{ZiFacadeLogSink, ZiItemData, ZiItemFactory, ZiNativeInstantiator,
//!             ZiParentContext, ZiPluginDirStrategy};
//!
//! let strategy = ZiPluginDirStrategy::for_platform("myapp");
//! let factory = ZiItemFactory::discover(
//!     &strategy,
//!     app_dir,
//!     &ZiNativeInstantiator,
//!     Rc::new(ZiFacadeLogSink),
//! );
//!
//! let row = ZiItemData::from_text("hello");
//! let item = factory.create_item(&row, ZiParentContext::root());
//! let next = factory.next_item_loader(&row, &item);
//! ```
//!
//! ## Threading
//!
//! The factory and the items it creates are bound to the thread that owns
//! the views. No operation blocks on anything but plugin code.

pub mod config;
pub mod errors;
pub mod item;
pub mod logging;

pub use config::{ZiItemFactoryConfig, ZiItemFactoryConfigBuilder};
pub use errors::{Result, ZiError};
pub use item::{
    ZiCycleDirection, ZiDataIndex, ZiFallbackItem, ZiItem, ZiItemData, ZiItemFactory,
    ZiItemList, ZiItemLoader, ZiItemModel, ZiItemOwner, ZiItemStream, ZiItemWidget,
    ZiLoaderHandle, ZiModuleInstance, ZiModuleInstantiator, ZiNativeInstantiator,
    ZiParentContext, ZiPluginDirStrategy, ZiPluginRegistry, ZiTransformed, ZiWidgetId,
};
pub use logging::{ZiFacadeLogSink, ZiLogLevel, ZiLogSink, ZiMemoryLogSink};
