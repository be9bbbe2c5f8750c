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

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::logging::sink::{ZiFacadeLogSink, ZiLogLevel, ZiLogRecord, ZiLogSink};

/// Sink that keeps the most recent records in memory, optionally forwarding
/// each one to the `log` facade as well.
#[derive(Debug)]
pub struct ZiMemoryLogSink {
    records: RefCell<VecDeque<ZiLogRecord>>,
    max_records: usize,
    forward: bool,
}

impl Default for ZiMemoryLogSink {
    fn default() -> Self {
        ZiMemoryLogSink::new(1000)
    }
}

impl ZiMemoryLogSink {
    pub fn new(max_records: usize) -> Self {
        ZiMemoryLogSink {
            records: RefCell::new(VecDeque::with_capacity(max_records.min(1024))),
            max_records: max_records.max(1),
            forward: false,
        }
    }

    pub fn forwarding(mut self, forward: bool) -> Self {
        self.forward = forward;
        self
    }

    pub fn records(&self) -> Vec<ZiLogRecord> {
        self.records.borrow().iter().cloned().collect()
    }

    pub fn messages(&self, level: ZiLogLevel) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl ZiLogSink for ZiMemoryLogSink {
    fn log(&self, message: &str, level: ZiLogLevel) {
        if self.forward {
            ZiFacadeLogSink.log(message, level);
        }
        // A sink that is already borrowed (re-entrant logging) drops the record.
        let Ok(mut records) = self.records.try_borrow_mut() else {
            return;
        };
        if records.len() == self.max_records {
            records.pop_front();
        }
        records.push_back(ZiLogRecord::new(level, message));
    }
}
