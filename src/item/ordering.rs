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

//! # Loader Ordering Policies
//!
//! Both policies are comparators meant for a stable sort, so loaders that
//! compare equal keep their previous relative order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::item::loader::ZiLoaderHandle;

/// Higher priority first.
pub fn priority_order(lhs: &ZiLoaderHandle, rhs: &ZiLoaderHandle) -> Ordering {
    rhs.priority().cmp(&lhs.priority())
}

/// Ordering driven by a prioritized list of loader names.
///
/// Listed loaders come first, in list order. Unlisted loaders follow,
/// higher priority first.
#[derive(Debug, Clone)]
pub struct ZiNameOrder<'a> {
    ranks: HashMap<&'a str, usize>,
}

impl<'a> ZiNameOrder<'a> {
    pub fn new<S: AsRef<str>>(names: &'a [S]) -> Self {
        let mut ranks = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            // First occurrence wins for duplicated names.
            ranks.entry(name.as_ref()).or_insert(index);
        }
        ZiNameOrder { ranks }
    }

    /// Position of the loader's name in the list.
    pub fn rank(&self, loader: &ZiLoaderHandle) -> Option<usize> {
        self.ranks.get(loader.name()).copied()
    }

    pub fn compare(&self, lhs: &ZiLoaderHandle, rhs: &ZiLoaderHandle) -> Ordering {
        match (self.rank(lhs), self.rank(rhs)) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => priority_order(lhs, rhs),
        }
    }
}
