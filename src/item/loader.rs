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

//! # Item Loader Capability
//!
//! Every plugin exposes one object implementing [`ZiItemLoader`]. The
//! registry wraps each such object in a [`ZiLoaderHandle`], a shared handle
//! compared by identity.
//!
//! # Writing a plugin
//!
//! ```ignore
//! use zitem::item::{ZiItemLoader, ZiDataIndex, ZiItemWidget, ZiParentContext};
//!
//! #[derive(Debug, Default)]
//! struct ImageLoader;
//!
//! impl ZiItemLoader for ImageLoader {
//!     fn name(&self) -> &str { "images" }
//!     fn priority(&self) -> i32 { 15 }
//!     fn create(&self, index: &dyn ZiDataIndex, parent: ZiParentContext)
//!         -> Option<Box<dyn ZiItemWidget>> { /* ... */ None }
//! }
//!
//! zitem::zitem_export_loader!(ImageLoader::default());
//! ```
//!
//! Plugins pass trait objects across the library boundary, so they must be
//! built with the same compiler and the same `Zitem` version as the host.
//! The ABI version check rejects modules built against another `Zitem`
//! release.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::item::model::{ZiDataIndex, ZiItemModel, ZiItemStream};
use crate::item::native::ZiModuleLibrary;
use crate::item::widget::{ZiItemWidget, ZiParentContext, ZiTransformed};

/// Version of the native plugin entry points. Bumped on every change to
/// [`ZiItemLoader`].
pub const ZITEM_PLUGIN_ABI_VERSION: u32 = 1;

/// Symbol a plugin exports to report its ABI version.
pub const ZITEM_ABI_SYMBOL: &[u8] = b"zitem_plugin_abi_version\0";

/// Symbol a plugin exports to instantiate its item loader.
pub const ZITEM_CREATE_SYMBOL: &[u8] = b"zitem_create_item_loader\0";

/// Boxed loader object as handed over by a plugin's create entry point.
pub type ZiLoaderBox = Box<dyn ZiItemLoader>;

/// Capability interface implemented by every item loader plugin.
///
/// Only `name`, `priority` and `create` are mandatory. The remaining
/// operations default to declining, so a loader that only renders items
/// never takes part in transform or persistence dispatch.
pub trait ZiItemLoader {
    /// Stable, unique name used for ordering and configuration.
    fn name(&self) -> &str;

    /// Higher values are preferred by the default ordering.
    fn priority(&self) -> i32;

    /// Create a widget for `index`, or `None` when this loader cannot
    /// render the row.
    fn create(
        &self,
        index: &dyn ZiDataIndex,
        parent: ZiParentContext,
    ) -> Option<Box<dyn ZiItemWidget>>;

    /// Wrap or replace an item created by any loader.
    fn transform(&self, item: Box<dyn ZiItemWidget>, _index: &dyn ZiDataIndex) -> ZiTransformed {
        ZiTransformed::Declined(item)
    }

    /// Formats this loader wants persisted.
    fn formats_to_save(&self) -> Vec<String> {
        Vec::new()
    }

    /// Fill `model` from `stream`. Returns `true` when the stream was
    /// recognized and loaded.
    fn load_items(
        &self,
        _scope: &str,
        _model: &mut dyn ZiItemModel,
        _stream: &mut dyn ZiItemStream,
    ) -> bool {
        false
    }

    /// Write `model` to `stream`. Returns `true` on success.
    fn save_items(
        &self,
        _scope: &str,
        _model: &dyn ZiItemModel,
        _stream: &mut dyn ZiItemStream,
    ) -> bool {
        false
    }

    /// Called for every enabled loader after a scope was loaded.
    fn items_loaded(
        &self,
        _scope: &str,
        _model: &mut dyn ZiItemModel,
        _stream: &mut dyn ZiItemStream,
    ) {
    }
}

struct ZiLoaderEntry {
    name: String,
    priority: i32,
    path: Option<PathBuf>,
    // Declared before `library`: the loader object must drop while its code
    // is still mapped.
    loader: ZiLoaderBox,
    library: Option<ZiModuleLibrary>,
}

/// Shared handle to one loader. Clones refer to the same loader; equality
/// and hashing use identity, never the name.
#[derive(Clone)]
pub struct ZiLoaderHandle(Rc<ZiLoaderEntry>);

impl ZiLoaderHandle {
    /// Wrap an in-process loader.
    pub fn new(loader: ZiLoaderBox) -> Self {
        Self::from_parts(loader, None, None)
    }

    pub(crate) fn from_parts(
        loader: ZiLoaderBox,
        path: Option<PathBuf>,
        library: Option<ZiModuleLibrary>,
    ) -> Self {
        // Name and priority are read once so ordering stays stable even if a
        // plugin reports different values later.
        let name = loader.name().to_string();
        let priority = loader.priority();
        ZiLoaderHandle(Rc::new(ZiLoaderEntry {
            name,
            priority,
            path,
            loader,
            library,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn priority(&self) -> i32 {
        self.0.priority
    }

    /// Module file this loader was discovered in; `None` for in-process
    /// loaders.
    pub fn path(&self) -> Option<&Path> {
        self.0.path.as_deref()
    }

    pub fn is_native(&self) -> bool {
        self.0.library.is_some()
    }

    pub fn loader(&self) -> &dyn ZiItemLoader {
        self.0.loader.as_ref()
    }

    pub fn ptr_eq(&self, other: &ZiLoaderHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ZiLoaderHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ZiLoaderHandle {}

impl Hash for ZiLoaderHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

impl fmt::Debug for ZiLoaderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiLoaderHandle")
            .field("name", &self.0.name)
            .field("priority", &self.0.priority)
            .field("path", &self.0.path)
            .finish_non_exhaustive()
    }
}

/// Export the native entry points for an item loader plugin.
///
/// The expression is evaluated once per instantiation and must produce a
/// value implementing [`ZiItemLoader`].
#[macro_export]
macro_rules! zitem_export_loader {
    ($ctor:expr) => {
        #[no_mangle]
        pub extern "C" fn zitem_plugin_abi_version() -> u32 {
            $crate::item::loader::ZITEM_PLUGIN_ABI_VERSION
        }

        #[no_mangle]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn zitem_create_item_loader() -> *mut $crate::item::loader::ZiLoaderBox {
            let loader: $crate::item::loader::ZiLoaderBox = ::std::boxed::Box::new($ctor);
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(loader))
        }
    };
}
