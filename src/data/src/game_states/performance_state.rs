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

use serde::{Deserialize, Serialize};

use crate::core::numerics::PowerValue;
use crate::core::primitives::CardId;

/// State of the art currently resolving during the performance step.
///
/// Present from art declaration until its damage and any resulting down
/// resolution have drained from the effect stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtInProgress {
    pub performer: CardId,
    pub art_id: String,
    pub target: CardId,
    pub base_power: PowerValue,

    /// Accumulated boosts from pre-damage modifiers.
    pub boost: PowerValue,
}

impl ArtInProgress {
    pub fn total_power(&self) -> PowerValue {
        self.base_power + self.boost
    }
}
