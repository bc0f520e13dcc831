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

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::core::numerics::{HpValue, LifeValue, PowerValue};
use crate::core::primitives::{CardName, CardType, CheerColor};
use crate::effects::effect::{EffectDescriptor, TriggeredEffect};
use crate::printed_cards::art_cost::ArtCost;

/// The immutable printed definition of a card, as loaded from the card
/// manifest at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintedCard {
    pub card_id: CardName,
    pub card_type: CardType,

    /// Hit points. Present for holomem only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<HpValue>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Holomem names printed on the card, used to match bloom targets.
    #[serde(default)]
    pub card_names: Vec<String>,

    #[serde(default)]
    pub colors: EnumSet<CheerColor>,

    /// Arts, in printed order. Holomem only.
    #[serde(default)]
    pub arts: Vec<ArtDefinition>,

    /// Cheer archived from the outgoing center when baton passing to this
    /// holomem's owner's backstage. Holomem only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baton_pass_cost: Option<u32>,

    /// Bloom tier for holomem_bloom cards. A bloom may be placed on a holomem
    /// of the same name whose level is this value or one lower.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_level: Option<u32>,

    /// Overrides the default 4-copy deck limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_deck_limit: Option<u32>,

    /// Buzz holomem forfeit two life when downed.
    #[serde(default)]
    pub buzz: bool,

    /// For supports: once-per-turn restriction shared by all limited cards.
    #[serde(default)]
    pub limited: bool,

    /// Effect list resolved when a support card is played.
    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,

    /// Triggered effects carried by this card while in play or while attached
    /// to a holomem.
    #[serde(default)]
    pub triggered_effects: Vec<TriggeredEffect>,

    /// Starting life count. Oshi only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<LifeValue>,

    /// Oshi skills. Oshi only.
    #[serde(default)]
    pub oshi_skills: Vec<OshiSkillDefinition>,
}

impl PrintedCard {
    pub fn is_holomem(&self) -> bool {
        self.card_type.is_stage_holomem()
    }

    /// Looks up an art by id.
    pub fn art(&self, art_id: &str) -> Option<&ArtDefinition> {
        self.arts.iter().find(|art| art.art_id == art_id)
    }

    /// Looks up an oshi skill by id.
    pub fn oshi_skill(&self, skill_id: &str) -> Option<&OshiSkillDefinition> {
        self.oshi_skills.iter().find(|skill| skill.skill_id == skill_id)
    }
}

/// A named attack printed on a holomem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtDefinition {
    pub art_id: String,
    pub cost: ArtCost,
    pub power: PowerValue,
    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,
}

/// An activated skill printed on an oshi card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OshiSkillDefinition {
    pub skill_id: String,
    /// Holopower cards archived to activate the skill.
    pub cost: u32,
    pub limit: OshiSkillLimit,
    pub effects: Vec<EffectDescriptor>,
}

/// How often an oshi skill may be activated.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OshiSkillLimit {
    OncePerTurn,
    OncePerGame,
}
