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

//! # Operator Log Sink
//!
//! The registry reports discovery progress and plugin failures to the host
//! through a single `log(message, level)` call. Sinks are fire-and-forget:
//! they return nothing and must tolerate their own failures.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value};

/// Severity of a message sent to a [`ZiLogSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZiLogLevel {
    Note,
    Error,
}

impl ZiLogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiLogLevel::Note => "NOTE",
            ZiLogLevel::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ZiLogRecord {
    pub level: ZiLogLevel,
    pub message: String,
    pub timestamp: SystemTime,
}

impl ZiLogRecord {
    pub fn new(level: ZiLogLevel, message: impl Into<String>) -> Self {
        ZiLogRecord {
            level,
            message: message.into(),
            timestamp: SystemTime::now(),
        }
    }

    pub fn to_json(&self) -> Value {
        let ts = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        let mut data = Map::new();
        data.insert("level".into(), json!(self.level.as_str()));
        data.insert("message".into(), json!(self.message));
        data.insert("timestamp_ms".into(), json!(ts));
        Value::Object(data)
    }
}

/// Side channel through which the registry surfaces failures to an operator.
pub trait ZiLogSink {
    fn log(&self, message: &str, level: ZiLogLevel);
}

/// Default sink forwarding to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZiFacadeLogSink;

impl ZiLogSink for ZiFacadeLogSink {
    fn log(&self, message: &str, level: ZiLogLevel) {
        match level {
            ZiLogLevel::Note => log::info!("item.factory: {}", message),
            ZiLogLevel::Error => log::error!("item.factory: {}", message),
        }
    }
}
