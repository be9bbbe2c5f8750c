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

//! # Zitem Error Module
//!
//! This module defines the error types used throughout the Zitem registry.
//!
//! ## Error Handling Philosophy
//!
//! Nothing in the registry aborts the host. Every failure either degrades to
//! "no result" or is logged and skipped:
//!
//! - **Discovery**: unresolved directories, modules that fail to load and
//!   modules lacking the item loader capability are logged and skipped
//! - **Dispatch**: a loader producing no item means "try the next one"
//! - **Cycling**: an item without a recorded owner cannot be cycled
//!
//! The `try_*` entry points on the factory surface these kinds as `ZiError`
//! values; the plain entry points collapse them into `Option`.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Zitem.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zitem.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ZiError {
    /// The plugin directory could not be resolved or read.
    #[error("plugin directory unresolved: {reason}")]
    DiscoveryDirectoryUnresolved { reason: String },

    /// A native module could not be instantiated.
    #[error("failed to instantiate plugin '{}': {message}", path.display())]
    ModuleInstantiationFailed { path: PathBuf, message: String },

    /// A module was instantiated but does not expose an item loader.
    #[error("plugin '{}' does not provide an item loader", path.display())]
    ModuleCapabilityMismatch { path: PathBuf },

    /// The requested loader is disabled.
    #[error("loader '{loader}' is disabled")]
    LoaderDisabled { loader: String },

    /// A loader declined to create an item for the given row.
    #[error("loader '{loader}' produced no item")]
    LoaderProducedNoItem { loader: String },

    /// No loader produced an item for the request.
    #[error("no loader available: {0}")]
    NoLoaderAvailable(String),

    /// The item has no recorded owning loader.
    #[error("no owning loader recorded for widget {widget}")]
    OwnershipLookupMiss { widget: u64 },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Validation errors triggered by invalid configuration.
    #[error("validation error: {message}")]
    Validation { message: String },
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    pub fn unresolved<T: Into<String>>(reason: T) -> Self {
        ZiError::DiscoveryDirectoryUnresolved {
            reason: reason.into(),
        }
    }

    pub fn instantiation(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ZiError::ModuleInstantiationFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn capability_mismatch(path: impl Into<PathBuf>) -> Self {
        ZiError::ModuleCapabilityMismatch { path: path.into() }
    }
}
