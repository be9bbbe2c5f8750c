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

//! # Plugin Registry
//!
//! Discovery scans one directory, instantiates every dynamic library in it
//! and keeps the modules that expose an item loader. Discovery never fails
//! the host: unreadable directories yield an empty registry and broken
//! modules are logged and skipped.
//!
//! After discovery the collection only changes through a full re-sort.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{Result, ZiError};
use crate::item::loader::ZiLoaderHandle;
use crate::item::native::{is_library, ZiModuleInstantiator};
use crate::item::ordering::{priority_order, ZiNameOrder};
use crate::item::plugin_dir::ZiPluginDirStrategy;
use crate::logging::{ZiLogLevel, ZiLogSink};

/// Ordered collection of discovered loaders.
#[derive(Debug, Default, Clone)]
pub struct ZiPluginRegistry {
    loaders: Vec<ZiLoaderHandle>,
}

impl ZiPluginRegistry {
    pub fn new() -> Self {
        ZiPluginRegistry::default()
    }

    /// Registry over loaders linked into the host, in default order. A
    /// handle passed more than once is kept at its first occurrence.
    pub fn from_loaders(loaders: Vec<ZiLoaderHandle>) -> Self {
        let mut seen = HashSet::with_capacity(loaders.len());
        let mut unique = Vec::with_capacity(loaders.len());
        for loader in loaders {
            if seen.insert(loader.clone()) {
                unique.push(loader);
            } else {
                log::warn!(
                    "item.plugin.duplicate: loader registered twice - loader={}",
                    loader.name()
                );
            }
        }

        let mut registry = ZiPluginRegistry { loaders: unique };
        registry.apply_priority_order();
        registry
    }

    /// Resolve the plugin directory with `strategy` and discover loaders in
    /// it. An unresolved directory yields an empty registry.
    pub fn discover_with(
        strategy: &ZiPluginDirStrategy,
        app_dir: &Path,
        instantiator: &dyn ZiModuleInstantiator,
        sink: &dyn ZiLogSink,
    ) -> Self {
        match strategy.resolve(app_dir) {
            Ok(dir) => Self::discover(&dir, instantiator, sink),
            Err(err) => {
                log::warn!(
                    "item.plugin.dir_unresolved: no plugin directory - app_dir={}, error={}",
                    app_dir.display(),
                    err
                );
                ZiPluginRegistry::new()
            }
        }
    }

    /// Discover loaders in `dir`, sorted by descending priority.
    pub fn discover(
        dir: &Path,
        instantiator: &dyn ZiModuleInstantiator,
        sink: &dyn ZiLogSink,
    ) -> Self {
        let candidates = match module_candidates(dir) {
            Ok(candidates) => candidates,
            Err(err) => {
                log::warn!(
                    "item.plugin.dir_unreadable: skipping discovery - dir={}, error={}",
                    dir.display(),
                    err
                );
                return ZiPluginRegistry::new();
            }
        };

        let mut loaders = Vec::with_capacity(candidates.len());
        for path in candidates {
            sink.log(
                &format!("Loading plugin: {}", path.display()),
                ZiLogLevel::Note,
            );

            let instance = match instantiator.instantiate(&path) {
                Ok(instance) => instance,
                Err(err) => {
                    sink.log(&err.to_string(), ZiLogLevel::Error);
                    continue;
                }
            };

            match instance.into_handle() {
                Ok(handle) => {
                    log::debug!(
                        "item.plugin.loaded: loader registered - path={}, loader={}, priority={}",
                        path.display(),
                        handle.name(),
                        handle.priority()
                    );
                    loaders.push(handle);
                }
                Err(err) => sink.log(&err.to_string(), ZiLogLevel::Note),
            }
        }

        Self::from_loaders(loaders)
    }

    pub fn loaders(&self) -> &[ZiLoaderHandle] {
        &self.loaders
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&ZiLoaderHandle> {
        self.loaders.get(position)
    }

    pub fn position_of(&self, loader: &ZiLoaderHandle) -> Option<usize> {
        self.loaders.iter().position(|l| l == loader)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ZiLoaderHandle> {
        self.loaders.iter().find(|l| l.name() == name)
    }

    /// Stable sort by descending priority.
    pub fn apply_priority_order(&mut self) {
        self.loaders.sort_by(priority_order);
    }

    /// Stable sort by a prioritized list of loader names. Unlisted loaders
    /// follow the listed ones, by descending priority.
    pub fn apply_name_order<S: AsRef<str>>(&mut self, names: &[S]) {
        let order = ZiNameOrder::new(names);
        self.loaders.sort_by(|lhs, rhs| order.compare(lhs, rhs));
    }
}

/// Library files in `dir`, sorted by file name so discovery order is stable.
fn module_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ZiError::unresolved(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
    Ok(library_files(dir, entries))
}

/// Library files among `entries`. Entries that cannot be read are skipped.
fn library_files<I>(dir: &Path, entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut candidates = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                log::warn!(
                    "item.plugin.entry_unreadable: skipping entry - dir={}, error={}",
                    dir.display(),
                    err
                );
                continue;
            }
        };
        if path.is_file() && is_library(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();
    candidates
}
