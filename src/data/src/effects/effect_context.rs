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

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::primitives::{CardId, PlayerName};
use crate::effects::effect::EffectDescriptor;

/// Ambient state threaded through the resolution of one effect chain.
///
/// Card state is referenced by [CardId] only; entries are resolved against the
/// match's card table at the point of use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectContext {
    /// Player controlling the effect.
    pub owner: PlayerName,

    /// Card the effect was read from.
    pub source: CardId,

    /// For attachment effects, the holomem holding the source card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<CardId>,

    /// Holomem chosen by an enclosing choose-holomem effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_holomem: Option<CardId>,

    /// Performer of the art whose resolution triggered this effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker: Option<CardId>,

    /// Result of the most recent die roll in this chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub die_result: Option<u8>,
}

impl EffectContext {
    pub fn new(owner: PlayerName, source: CardId) -> Self {
        Self {
            owner,
            source,
            holder: None,
            chosen_holomem: None,
            attacker: None,
            die_result: None,
        }
    }
}

/// One entry on the match's LIFO effect stack.
///
/// Resolution always drains from the top; triggered effects push above the
/// step that discovered them so they resolve first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EffectStackEntry {
    /// A list of effects awaiting interpretation, front first, sharing one
    /// context. Kept together so context written by one effect (a die
    /// result, a chosen holomem) is seen by the rest of the list.
    Effects { effects: VecDeque<EffectDescriptor>, context: EffectContext },

    /// Apply the damage of the art currently resolving. Pushed below
    /// pre-damage triggers so revenge damage lands first.
    ArtDamage,

    /// Archive the floating support card once its effect list has drained,
    /// unless it attached itself to a holomem along the way.
    CleanupSupport { card: CardId },
}

impl EffectStackEntry {
    /// Builds a stack entry from an effect list in printed order.
    pub fn effects(effects: &[EffectDescriptor], context: EffectContext) -> Self {
        Self::Effects { effects: effects.iter().cloned().collect(), context }
    }
}
