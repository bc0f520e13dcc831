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

use crate::core::primitives::{CardName, Zone};

/// A single effect as authored in the card manifest.
///
/// Effects are the unit of the card behavior language: a closed set of verbs
/// with typed parameters, optionally gated behind a [Condition]. Unknown verbs
/// fail manifest deserialization, which is a fatal startup error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// When present, the effect only applies while this condition holds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    #[serde(flatten)]
    pub effect: Effect,
}

/// The closed verb set of the card effect language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Increase the target's damage by `amount`.
    ///
    /// `special` damage skips defender cheer cost modifiers and is excluded
    /// from "on art damage" trigger matching.
    DealDamage {
        amount: u32,
        #[serde(default)]
        special: bool,
        target: DamageTarget,
    },

    /// Raise a stat of the art currently resolving by a fixed amount.
    BoostStat { stat: StatKind, amount: u32 },

    /// Move `amount` cards from the top of one zone to another.
    MoveCard {
        from_zone: Zone,
        to_zone: Zone,
        #[serde(default = "default_amount")]
        amount: u32,
    },

    /// Attach the resolving support card to the holomem chosen by an
    /// enclosing [Effect::ChooseHolomemForEffect].
    AttachCard,

    /// Move cheer between zones, pausing on a send-cheer decision when the
    /// controlling player has a choice of placements.
    SendCheer {
        amount_min: u32,
        amount_max: u32,
        from_zone: CheerSource,
        to_zone: CheerDestination,
        /// Restricts which stage slots cheer may be taken from. Empty means
        /// all slots.
        #[serde(default)]
        source_slots: Vec<StageSlot>,
    },

    /// Present a filtered set of cards; the player picks a subset of size in
    /// `[amount_min, amount_max]`, which moves to `to_zone`.
    ChooseCards {
        from_zone: Zone,
        to_zone: Zone,
        #[serde(default)]
        filter: CardFilter,
        amount_min: u32,
        amount_max: u32,
        #[serde(default)]
        reveal_chosen: bool,
        #[serde(default)]
        remaining_cards_action: RemainingCardsAction,
    },

    /// Variant of [Effect::ChooseCards] restricted to holomem in the given
    /// stage slots; the chosen holomem becomes the subject of `chosen_effect`.
    ChooseHolomemForEffect {
        #[serde(default)]
        slots: Vec<StageSlot>,
        chosen_effect: Box<EffectDescriptor>,
    },

    /// The controlling player picks a backstage holomem to swap with the
    /// current center, at no cheer cost.
    SwapHolomemToCenter {
        /// When false, resting backstage holomem cannot be chosen.
        #[serde(default)]
        allow_resting: bool,
    },

    /// Ask the controlling player to pick among labeled branches.
    ///
    /// Branches whose condition does not hold are withheld. If exactly one
    /// branch remains it resolves without a decision; if none remain the
    /// effect is skipped.
    MakeChoice { choices: Vec<ChoiceBranch> },

    /// Roll a uniform 1-6 die, recording the result in the effect context
    /// for following [Condition::DieResultIn] gated effects.
    RollDie,

    /// Pay an oshi skill's holopower cost, mark it used, and resolve its
    /// effect list.
    OshiSkillUse { skill_id: String },
}

fn default_amount() -> u32 {
    1
}

/// One branch of an [Effect::MakeChoice].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceBranch {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub effects: Vec<EffectDescriptor>,
}

/// Conditions gating effect descriptors and choice branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// The holomem this card is attached to is the named card.
    HolderIsCard { card_id: CardName },

    /// The effect owner's oshi is the named card.
    OshiIsCard { card_id: CardName },

    /// The named oshi skill can be activated right now: its holopower cost is
    /// payable and its usage limit has not been reached.
    OshiSkillReady { skill_id: String },

    /// The effect owner's opponent has a holomem in the collab slot.
    OpponentHasCollab,

    /// The most recent die roll in this effect chain is one of `values`.
    DieResultIn { values: Vec<u8> },
}

/// Who a [Effect::DealDamage] hits.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageTarget {
    /// The holomem whose art caused this effect to trigger.
    Attacker,
    OpponentCenter,
    OpponentCollab,
}

/// Stats an art boost can apply to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Power,
}

/// Zones cheer can be taken from by [Effect::SendCheer].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheerSource {
    Life,
    CheerDeck,
    Archive,
    OwnHolomem,
    OpponentHolomem,
}

/// Zones cheer can be sent to by [Effect::SendCheer].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheerDestination {
    Holomem,
    Archive,
}

/// The three stage slot kinds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageSlot {
    Center,
    Collab,
    Backstage,
}

/// Filters for [Effect::ChooseCards] option sets.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFilter {
    #[default]
    Any,
    Cheer,
    Holomem,
}

/// What happens to unchosen cards after a [Effect::ChooseCards] resolves.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingCardsAction {
    #[default]
    Nothing,
    Archive,
    TopOfDeck,
    BottomOfDeck,
}

/// Moments at which a card's triggered effects are scanned.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTrigger {
    /// The holomem carrying this effect (or holding this attachment) performs
    /// an art.
    OnPerformArt,

    /// The holomem holding this attachment is hit by an opponent's art
    /// damage. Special damage does not trigger this.
    OnTakeArtDamage,

    /// The holomem carrying this effect moves into the collab slot.
    OnCollab,
}

/// An effect list fired by a trigger rather than played directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredEffect {
    pub trigger: EffectTrigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub effects: Vec<EffectDescriptor>,
}
