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

use crate::core::primitives::CardId;
use crate::decisions::decision::SendCheerTarget;

/// An action a player can submit against an ongoing match.
///
/// The tag names are the wire-level `action_type` values. Every field is
/// re-validated against the match state before execution; nothing here is
/// trusted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type", content = "action_data")]
pub enum GameAction {
    /// Keep or redraw the opening hand during setup.
    Mulligan { do_mulligan: bool },

    /// Place the starting center and backstage holomem during setup.
    InitialPlacement { center_id: CardId, backstage_ids: Vec<CardId> },

    /// Place a debut or spot holomem from hand into an open backstage slot.
    MainStepPlaceHolomem { card_id: CardId },

    /// Bloom `target_id` on stage with the bloom card `card_id` from hand.
    MainStepBloom { card_id: CardId, target_id: CardId },

    /// Move a backstage holomem into the empty collab slot.
    MainStepCollab { card_id: CardId },

    /// Swap the center with a backstage holomem, archiving cheer from the
    /// outgoing center to pay its baton pass cost.
    MainStepBatonPass { new_center_id: CardId, cheer_ids: Vec<CardId> },

    /// Play a support card from hand.
    MainStepPlaySupport { card_id: CardId },

    /// Activate an oshi skill by id, paying its holopower cost.
    MainStepOshiSkill { skill_id: String },

    MainStepBeginPerformance,

    MainStepEndTurn,

    /// Use an art during the performance step.
    PerformanceStepUseArt { performer_id: CardId, art_id: String, target_id: CardId },

    PerformanceStepEndTurn,

    /// Answer an outstanding branch choice.
    #[serde(rename = "EffectResolution_MakeChoice")]
    EffectResolutionMakeChoice { choice_index: usize },

    /// Answer an outstanding card selection.
    #[serde(rename = "EffectResolution_ChooseCardsForEffect")]
    EffectResolutionChooseCardsForEffect { card_ids: Vec<CardId> },

    /// Answer an outstanding send-cheer decision with a placement per cheer.
    #[serde(rename = "EffectResolution_MoveCheerBetweenHolomems")]
    EffectResolutionMoveCheerBetweenHolomems { placements: Vec<CheerPlacement> },
}

/// One cheer placement in a send-cheer answer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct CheerPlacement {
    pub cheer_id: CardId,
    pub to: SendCheerTarget,
}
