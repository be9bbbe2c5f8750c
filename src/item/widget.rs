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

//! # Item Widgets
//!
//! The registry never paints anything. It only needs to know the identity
//! of the visual object a loader returned, its parent, and where to put the
//! hover annotation.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::item::model::ZiDataIndex;

/// Maximum number of characters the fallback renderer shows.
pub const FALLBACK_MAX_CHARS: usize = 4096;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a visual object. Unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZiWidgetId(pub u64);

impl ZiWidgetId {
    pub fn next() -> Self {
        // Every native plugin links its own copy of this counter. Offsetting
        // by the counter's address keeps the ranges of the copies apart.
        let base = (&NEXT_WIDGET_ID as *const AtomicU64 as usize as u64) << 16;
        let serial = NEXT_WIDGET_ID.fetch_add(1, Ordering::SeqCst) + 1;
        ZiWidgetId(base.wrapping_add(serial))
    }
}

/// Parent view an item is created into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZiParentContext {
    pub view: Option<ZiWidgetId>,
}

impl ZiParentContext {
    pub fn root() -> Self {
        ZiParentContext { view: None }
    }

    pub fn of(view: ZiWidgetId) -> Self {
        ZiParentContext { view: Some(view) }
    }
}

/// Visual representation of one item, produced by a loader.
pub trait ZiItemWidget: std::fmt::Debug {
    fn widget_id(&self) -> ZiWidgetId;
    fn parent(&self) -> ZiParentContext;
    fn set_tooltip(&mut self, tooltip: &str);
    fn tooltip(&self) -> Option<&str>;
    fn as_any(&self) -> &dyn Any;
}

/// Outcome of offering an item to a loader's transform step.
#[derive(Debug)]
pub enum ZiTransformed {
    /// The loader wrapped or replaced the item.
    Replaced(Box<dyn ZiItemWidget>),
    /// The loader declined; the item is handed back untouched.
    Declined(Box<dyn ZiItemWidget>),
}

impl ZiTransformed {
    pub fn into_inner(self) -> Box<dyn ZiItemWidget> {
        match self {
            ZiTransformed::Replaced(item) | ZiTransformed::Declined(item) => item,
        }
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, ZiTransformed::Replaced(_))
    }
}

/// Built-in plain text renderer used when no loader produces an item.
#[derive(Debug, Clone)]
pub struct ZiFallbackItem {
    id: ZiWidgetId,
    parent: ZiParentContext,
    text: String,
    tooltip: Option<String>,
    pub margin: u32,
    pub word_wrap: bool,
}

impl ZiFallbackItem {
    pub fn new(index: &dyn ZiDataIndex, parent: ZiParentContext) -> Self {
        let text = index
            .text()
            .map(|text| text.chars().take(FALLBACK_MAX_CHARS).collect())
            .unwrap_or_default();
        ZiFallbackItem {
            id: ZiWidgetId::next(),
            parent,
            text,
            tooltip: None,
            margin: 4,
            word_wrap: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Break the label text into lines no wider than `width` characters,
    /// splitting on whitespace. Words longer than `width` get a line of
    /// their own.
    pub fn wrapped_lines(&self, width: usize) -> Vec<String> {
        if !self.word_wrap || width == 0 {
            return self.text.lines().map(str::to_string).collect();
        }

        let mut lines = Vec::new();
        for paragraph in self.text.lines() {
            let mut line = String::new();
            let mut line_chars = 0;
            for word in paragraph.split_whitespace() {
                let word_chars = word.chars().count();
                if line_chars > 0 && line_chars + 1 + word_chars > width {
                    lines.push(std::mem::take(&mut line));
                    line_chars = 0;
                }
                if line_chars > 0 {
                    line.push(' ');
                    line_chars += 1;
                }
                line.push_str(word);
                line_chars += word_chars;
            }
            lines.push(line);
        }
        lines
    }
}

impl ZiItemWidget for ZiFallbackItem {
    fn widget_id(&self) -> ZiWidgetId {
        self.id
    }

    fn parent(&self) -> ZiParentContext {
        self.parent
    }

    fn set_tooltip(&mut self, tooltip: &str) {
        self.tooltip = Some(tooltip.to_string());
    }

    fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
