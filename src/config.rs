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


//! # Factory Configuration
//!
//! Plugin order, disabled plugins and the plugin directory strategy, as
//! stored by the host's settings layer. Every field is optional in the
//! serialized form.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::item::plugin_dir::ZiPluginDirStrategy;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiItemFactoryConfig {
    /// Loader names, most preferred first. Empty keeps priority order.
    pub plugin_priority: Vec<String>,
    /// Names of loaders to disable.
    pub disabled_plugins: Vec<String>,
    /// Plugin directory strategy; `None` uses the platform default.
    pub plugin_dir: Option<ZiPluginDirStrategy>,
}

impl ZiItemFactoryConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: ZiItemFactoryConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        for name in self.plugin_priority.iter().chain(&self.disabled_plugins) {
            if name.trim().is_empty() {
                return Err(ZiError::validation("plugin names must not be empty"));
            }
        }
        Ok(())
    }

    /// Strategy to resolve the plugin directory with.
    pub fn plugin_dir_strategy(&self, product: &str) -> ZiPluginDirStrategy {
        self.plugin_dir
            .clone()
            .unwrap_or_else(|| ZiPluginDirStrategy::for_platform(product))
    }

    pub fn is_plugin_disabled(&self, name: &str) -> bool {
        self.disabled_plugins.iter().any(|n| n == name)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZiItemFactoryConfigBuilder {
    pub plugin_priority: Option<Vec<String>>,
    pub disabled_plugins: Option<Vec<String>>,
    pub plugin_dir: Option<ZiPluginDirStrategy>,
}

impl ZiItemFactoryConfigBuilder {
    pub fn plugin_priority<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugin_priority = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn disable<S: Into<String>>(mut self, name: S) -> Self {
        self.disabled_plugins
            .get_or_insert_with(Vec::new)
            .push(name.into());
        self
    }

    pub fn plugin_dir(mut self, strategy: ZiPluginDirStrategy) -> Self {
        self.plugin_dir = Some(strategy);
        self
    }

    pub fn build(self) -> ZiItemFactoryConfig {
        let base = ZiItemFactoryConfig::default();
        ZiItemFactoryConfig {
            plugin_priority: self.plugin_priority.unwrap_or(base.plugin_priority),
            disabled_plugins: self.disabled_plugins.unwrap_or(base.disabled_plugins),
            plugin_dir: self.plugin_dir.or(base.plugin_dir),
        }
    }

    /// Lenient parse: malformed input yields the default configuration.
    pub fn from_json(value: &Value) -> ZiItemFactoryConfig {
        let builder: ZiItemFactoryConfigBuilder = serde_json::from_value(value.clone())
            .unwrap_or_else(|err| {
                log::warn!("item.config.invalid: using defaults - error={}", err);
                ZiItemFactoryConfigBuilder::default()
            });
        builder.build()
    }
}
