// Copyright © holoclash 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::primitives::CheerColor;

/// A color requirement slot in an art cost.
#[derive(Debug, Hash, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostColor {
    White,
    Green,
    Red,
    Blue,
    Yellow,
    Purple,
    /// Satisfied by cheer of any color, filled after specific colors.
    Any,
}

impl CostColor {
    pub fn matches(&self, cheer: CheerColor) -> bool {
        match self {
            CostColor::White => cheer == CheerColor::White,
            CostColor::Green => cheer == CheerColor::Green,
            CostColor::Red => cheer == CheerColor::Red,
            CostColor::Blue => cheer == CheerColor::Blue,
            CostColor::Yellow => cheer == CheerColor::Yellow,
            CostColor::Purple => cheer == CheerColor::Purple,
            CostColor::Any => true,
        }
    }
}

/// The cost vector of an art: how many attached cheer of each color the
/// performer must carry.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtCost(pub BTreeMap<CostColor, u32>);

impl ArtCost {
    /// Checks whether a multiset of attached cheer colors satisfies this
    /// cost. Specific color slots consume matching cheer first; `any` slots
    /// are satisfied last from whatever remains.
    pub fn payable_with(&self, cheer: &[CheerColor]) -> bool {
        let mut remaining: Vec<CheerColor> = cheer.to_vec();
        for (cost_color, &count) in &self.0 {
            if *cost_color == CostColor::Any {
                continue;
            }
            for _ in 0..count {
                let Some(position) = remaining.iter().position(|&c| cost_color.matches(c)) else {
                    return false;
                };
                remaining.swap_remove(position);
            }
        }

        let any_slots = self.0.get(&CostColor::Any).copied().unwrap_or(0);
        remaining.len() as u32 >= any_slots
    }
}
