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

use crate::core::primitives::{CardId, PlayerName, Zone};
use crate::effects::effect::{
    CheerDestination, CheerSource, ChoiceBranch, EffectDescriptor, RemainingCardsAction,
};
use crate::effects::effect_context::EffectContext;

/// A choice a player must make before the engine can continue.
///
/// At most one decision is outstanding at any time; this is enforced by the
/// `Option<Decision>` field on match state. Every action other than the one
/// answering the decision is rejected while it is pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Player who must answer.
    pub player: PlayerName,

    pub kind: DecisionKind,

    /// Effect context to resume from once the answer arrives. Absent for
    /// step-level decisions and engine-generated ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<EffectContext>,
}

/// The shapes of outstanding decisions and the options advertised for each.
///
/// Validation of an answer checks it against the options recorded here; the
/// engine never trusts the client to stay within what was advertised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Keep or redraw the opening hand.
    Mulligan,

    /// Place the face-down starting center and backstage.
    InitialPlacement,

    /// The active player may take any legal main step action.
    MainStep,

    /// The active player may use an art or end the turn.
    PerformanceStep,

    /// Distribute cheer among the advertised targets.
    SendCheer {
        amount_min: u32,
        amount_max: u32,
        from_zone: CheerSource,
        to_zone: CheerDestination,
        from_options: Vec<CardId>,
        to_options: Vec<SendCheerTarget>,
    },

    /// Pick a subset of the advertised cards.
    ChooseCards {
        cards_can_choose: Vec<CardId>,
        amount_min: u32,
        amount_max: u32,
        from_zone: Zone,
        to_zone: Zone,
        reveal_chosen: bool,
        remaining_cards_action: RemainingCardsAction,
    },

    /// Pick one holomem to become the subject of `chosen_effect`.
    ChooseHolomemForEffect {
        cards_can_choose: Vec<CardId>,
        chosen_effect: Box<EffectDescriptor>,
    },

    /// Pick a backstage holomem to swap into the center slot.
    SwapHolomemToCenter { cards_can_choose: Vec<CardId> },

    /// Pick one of several labeled branches.
    Choice { choices: Vec<ChoiceBranch> },
}

/// A destination cheer can be sent to when answering a send-cheer decision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendCheerTarget {
    Archive,
    Holomem(CardId),
}
