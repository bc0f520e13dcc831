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

/// A summary of one currently-legal action, advertised to the active player
/// inside main step and performance step decision events.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type")]
pub enum LegalAction {
    #[serde(rename = "MainStepPlaceHolomem")]
    PlaceHolomem { card_id: CardId },

    #[serde(rename = "MainStepBloom")]
    Bloom { card_id: CardId, target_id: CardId },

    #[serde(rename = "MainStepCollab")]
    Collab { card_id: CardId },

    #[serde(rename = "MainStepBatonPass")]
    BatonPass { center_id: CardId },

    #[serde(rename = "MainStepPlaySupport")]
    PlaySupport { card_id: CardId },

    #[serde(rename = "MainStepOshiSkill")]
    OshiSkill { skill_id: String },

    #[serde(rename = "MainStepBeginPerformance")]
    BeginPerformance,

    #[serde(rename = "MainStepEndTurn")]
    EndTurn,

    #[serde(rename = "PerformanceStepUseArt")]
    UseArt { performer_id: CardId, art_id: String, valid_targets: Vec<CardId> },

    #[serde(rename = "PerformanceStepEndTurn")]
    PerformanceEndTurn,
}
