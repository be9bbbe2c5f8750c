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

//! Plugin directory resolution strategies.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};

/// Where to look for plugin modules, relative to the application directory
/// (the directory holding the running executable).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZiPluginDirStrategy {
    /// Fixed path chosen at build or deployment time.
    Fixed { path: PathBuf },
    /// Unix install prefix: `<prefix>/bin/app` loads from `<prefix>/lib/<product>`.
    /// An application directory not named `bin` is used as is.
    InstallPrefix { product: String },
    /// Application bundle: `App.app/Contents/MacOS/app` loads from the
    /// directory containing `App.app`. Any other directory is used as is.
    AppBundle,
    /// `plugins` subdirectory next to the executable.
    BesideExecutable,
}

impl ZiPluginDirStrategy {
    /// Default strategy for the target platform.
    pub fn for_platform(product: &str) -> Self {
        if cfg!(target_os = "macos") {
            ZiPluginDirStrategy::AppBundle
        } else if cfg!(all(unix, not(target_os = "android"))) {
            match option_env!("ZITEM_PLUGIN_PREFIX") {
                Some(prefix) => ZiPluginDirStrategy::Fixed {
                    path: PathBuf::from(prefix),
                },
                None => ZiPluginDirStrategy::InstallPrefix {
                    product: product.to_string(),
                },
            }
        } else {
            ZiPluginDirStrategy::BesideExecutable
        }
    }

    /// Resolve the plugin directory for an application living in `app_dir`.
    /// Every step must name an existing directory.
    pub fn resolve(&self, app_dir: &Path) -> Result<PathBuf> {
        let dir = match self {
            ZiPluginDirStrategy::Fixed { path } => path.clone(),
            ZiPluginDirStrategy::InstallPrefix { product } => {
                if dir_name_is(app_dir, "bin") {
                    let prefix = parent_dir(app_dir)?;
                    descend(&descend(&prefix, "lib")?, product)?
                } else {
                    app_dir.to_path_buf()
                }
            }
            ZiPluginDirStrategy::AppBundle => {
                if dir_name_is(app_dir, "MacOS") {
                    let contents = parent_dir(app_dir)?;
                    let bundle = parent_dir(&contents)?;
                    parent_dir(&bundle)?
                } else {
                    app_dir.to_path_buf()
                }
            }
            ZiPluginDirStrategy::BesideExecutable => descend(app_dir, "plugins")?,
        };

        if !dir.is_dir() {
            return Err(ZiError::unresolved(format!(
                "not a directory: {}",
                dir.display()
            )));
        }
        Ok(dir)
    }

    /// Resolve relative to the directory of the running executable.
    pub fn resolve_for_current_exe(&self) -> Result<PathBuf> {
        let exe = std::env::current_exe()
            .map_err(|e| ZiError::unresolved(format!("cannot locate executable: {}", e)))?;
        let app_dir = exe
            .parent()
            .ok_or_else(|| ZiError::unresolved("executable has no parent directory"))?;
        self.resolve(app_dir)
    }
}

fn dir_name_is(dir: &Path, name: &str) -> bool {
    dir.file_name().map(|n| n == name).unwrap_or(false)
}

fn parent_dir(dir: &Path) -> Result<PathBuf> {
    dir.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| ZiError::unresolved(format!("no parent of {}", dir.display())))
}

fn descend(dir: &Path, name: &str) -> Result<PathBuf> {
    let child = dir.join(name);
    if child.is_dir() {
        Ok(child)
    } else {
        Err(ZiError::unresolved(format!(
            "missing directory {}",
            child.display()
        )))
    }
}
