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

//! # Native Module Instantiation
//!
//! Discovery hands every candidate file to a [`ZiModuleInstantiator`]. The
//! native instantiator maps the file with `libloading`, checks the ABI
//! version and calls the plugin's create entry point.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{Result, ZiError};
use crate::item::loader::{ZiLoaderBox, ZiLoaderHandle};

/// A mapped plugin library. Dropping it unloads the module.
pub struct ZiModuleLibrary {
    #[cfg(feature = "native")]
    _library: libloading::Library,
}

impl fmt::Debug for ZiModuleLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiModuleLibrary").finish_non_exhaustive()
    }
}

/// Result of instantiating one module file. The module may or may not
/// expose an item loader.
pub struct ZiModuleInstance {
    path: PathBuf,
    loader: Option<ZiLoaderBox>,
    library: Option<ZiModuleLibrary>,
}

impl fmt::Debug for ZiModuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiModuleInstance")
            .field("path", &self.path)
            .field("loader", &self.loader.as_ref().map(|l| l.name()))
            .field("native", &self.library.is_some())
            .finish_non_exhaustive()
    }
}

impl ZiModuleInstance {
    /// Instance backed by code already linked into the process.
    pub fn in_process(path: impl Into<PathBuf>, loader: Option<ZiLoaderBox>) -> Self {
        ZiModuleInstance {
            path: path.into(),
            loader,
            library: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_capability(&self) -> bool {
        self.loader.is_some()
    }

    /// Wrap the instance in a loader handle. A module without an item loader
    /// is unloaded and reported as a capability mismatch.
    pub fn into_handle(self) -> Result<ZiLoaderHandle> {
        let ZiModuleInstance {
            path,
            loader,
            library,
        } = self;
        match loader {
            Some(loader) => Ok(ZiLoaderHandle::from_parts(loader, Some(path), library)),
            None => {
                drop(library);
                Err(ZiError::capability_mismatch(path))
            }
        }
    }
}

/// Turns a module file into a [`ZiModuleInstance`].
pub trait ZiModuleInstantiator {
    fn instantiate(&self, path: &Path) -> Result<ZiModuleInstance>;
}

/// Instantiates plugins from native dynamic libraries.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZiNativeInstantiator;

#[cfg(feature = "native")]
type ZiAbiVersionFn = unsafe extern "C" fn() -> u32;

#[cfg(feature = "native")]
#[allow(improper_ctypes_definitions)]
type ZiCreateLoaderFn = unsafe extern "C" fn() -> *mut ZiLoaderBox;

impl ZiModuleInstantiator for ZiNativeInstantiator {
    #[cfg(feature = "native")]
    fn instantiate(&self, path: &Path) -> Result<ZiModuleInstance> {
        use crate::item::loader::{
            ZITEM_ABI_SYMBOL, ZITEM_CREATE_SYMBOL, ZITEM_PLUGIN_ABI_VERSION,
        };

        // SAFETY: loading a plugin runs its initializers; only files from the
        // resolved plugin directory are passed here.
        let library = unsafe { libloading::Library::new(path) }
            .map_err(|e| ZiError::instantiation(path, e.to_string()))?;

        let version = {
            let abi = unsafe { library.get::<ZiAbiVersionFn>(ZITEM_ABI_SYMBOL) }
                .map_err(|e| ZiError::instantiation(path, format!("not an item plugin: {}", e)))?;
            unsafe { abi() }
        };
        if version != ZITEM_PLUGIN_ABI_VERSION {
            return Err(ZiError::instantiation(
                path,
                format!(
                    "plugin ABI version {} does not match host version {}",
                    version, ZITEM_PLUGIN_ABI_VERSION
                ),
            ));
        }

        let loader = match unsafe { library.get::<ZiCreateLoaderFn>(ZITEM_CREATE_SYMBOL) } {
            Ok(create) => {
                let raw = unsafe { create() };
                if raw.is_null() {
                    None
                } else {
                    // SAFETY: produced by `Box::into_raw` in `zitem_export_loader!`.
                    Some(*unsafe { Box::from_raw(raw) })
                }
            }
            Err(_) => None,
        };

        Ok(ZiModuleInstance {
            path: path.to_path_buf(),
            loader,
            library: Some(ZiModuleLibrary { _library: library }),
        })
    }

    #[cfg(not(feature = "native"))]
    fn instantiate(&self, path: &Path) -> Result<ZiModuleInstance> {
        Err(ZiError::instantiation(
            path,
            "native plugin support is disabled in this build",
        ))
    }
}

/// Whether `path` names a loadable dynamic library on this platform.
pub fn is_library(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(OsStr::to_str) else {
        return false;
    };
    is_library_name(name)
}

#[cfg(windows)]
fn is_library_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("dll"))
        .unwrap_or(false)
}

#[cfg(target_os = "macos")]
fn is_library_name(name: &str) -> bool {
    name.ends_with(".dylib")
        || name.ends_with(".so")
        || name.ends_with(".bundle")
        || is_versioned_so(name)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn is_library_name(name: &str) -> bool {
    name.ends_with(".so") || is_versioned_so(name)
}

#[cfg(not(any(unix, windows)))]
fn is_library_name(_name: &str) -> bool {
    false
}

/// `libfoo.so.1`, `libfoo.so.1.2.3`
#[cfg(unix)]
fn is_versioned_so(name: &str) -> bool {
    match name.find(".so.") {
        Some(pos) if pos > 0 => name[pos + 4..]
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())),
        _ => false,
    }
}
