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

//! # Item Data Model
//!
//! Rows of application data as the registry sees them. A row is a bag of
//! named byte payloads keyed by format identifier; the plain text and notes
//! fields are payloads under well-known formats.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{Read, Seek, Write};

use serde::{Deserialize, Serialize};

/// Plain text format identifier. Always first in the save-format list.
pub const MIME_TEXT: &str = "text/plain";

/// Internal format carrying free-form item notes.
pub const MIME_ITEM_NOTES: &str = "application/x-zitem-item-notes";

/// Internal format carrying a serialized item collection.
pub const MIME_ITEMS: &str = "application/x-zitem-item";

/// Read-only view of one row of application data.
pub trait ZiDataIndex {
    /// Payload stored under `format`, if any.
    fn data(&self, format: &str) -> Option<&[u8]>;

    /// Format identifiers present on this row.
    fn formats(&self) -> Vec<&str>;

    fn text(&self) -> Option<Cow<'_, str>> {
        self.data(MIME_TEXT).map(String::from_utf8_lossy)
    }

    fn notes(&self) -> Option<Cow<'_, str>> {
        self.data(MIME_ITEM_NOTES).map(String::from_utf8_lossy)
    }
}

/// Owned row: format identifier to payload bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiItemData {
    #[serde(default)]
    pub formats: BTreeMap<String, Vec<u8>>,
}

impl ZiItemData {
    pub fn new() -> Self {
        ZiItemData::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        ZiItemData::new().with_data(MIME_TEXT, text.into().into_bytes())
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        self.with_data(MIME_ITEM_NOTES, notes.into().into_bytes())
    }

    pub fn with_data(mut self, format: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.formats.insert(format.into(), bytes.into());
        self
    }
}

impl ZiDataIndex for ZiItemData {
    fn data(&self, format: &str) -> Option<&[u8]> {
        self.formats.get(format).map(Vec::as_slice)
    }

    fn formats(&self) -> Vec<&str> {
        self.formats.keys().map(String::as_str).collect()
    }
}

/// Ordered store of rows that loaders fill on load and read on save.
pub trait ZiItemModel {
    fn row_count(&self) -> usize;
    fn row(&self, row: usize) -> Option<&ZiItemData>;
    fn push_row(&mut self, item: ZiItemData);
    fn clear(&mut self);
}

/// Vector-backed [`ZiItemModel`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiItemList {
    items: Vec<ZiItemData>,
}

impl ZiItemList {
    pub fn new() -> Self {
        ZiItemList::default()
    }

    pub fn items(&self) -> &[ZiItemData] {
        &self.items
    }
}

impl FromIterator<ZiItemData> for ZiItemList {
    fn from_iter<I: IntoIterator<Item = ZiItemData>>(iter: I) -> Self {
        ZiItemList {
            items: iter.into_iter().collect(),
        }
    }
}

impl ZiItemModel for ZiItemList {
    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn row(&self, row: usize) -> Option<&ZiItemData> {
        self.items.get(row)
    }

    fn push_row(&mut self, item: ZiItemData) {
        self.items.push(item);
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// Seekable byte stream handed to loaders for persistence.
pub trait ZiItemStream: Read + Write + Seek {}

impl<T: Read + Write + Seek + ?Sized> ZiItemStream for T {}
