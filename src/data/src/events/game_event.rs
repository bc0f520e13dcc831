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

use crate::actions::legal_action::LegalAction;
use crate::core::numerics::{LifeValue, PowerValue, TurnNumber};
use crate::core::primitives::{CardId, CardName, PlayerName, Zone, UNKNOWN_CARD_ID};
use crate::decisions::decision::SendCheerTarget;
use crate::effects::effect::{CheerDestination, CheerSource, RemainingCardsAction, StatKind};

/// A card reference inside an event payload: the stable in-match id plus the
/// printed identity, which is masked for recipients who cannot see it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CardRef {
    pub game_card_id: CardId,
    pub card_id: CardName,
}

impl CardRef {
    fn mask(&mut self) {
        self.card_id = CardName::new(UNKNOWN_CARD_ID);
    }
}

/// A location an attached card can move from or to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttachLocation {
    Holomem(CardId),
    Zone(Zone),
}

/// One typed event in a match's append-only log.
///
/// The tag names are the stable wire-level `event_type` values.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum GameEvent {
    GameStart { starting_player: PlayerName },

    ShuffleDeck { shuffling_player: PlayerName },

    Draw { drawing_player: PlayerName, drawn_cards: Vec<CardRef> },

    #[serde(rename = "Decision_Mulligan")]
    DecisionMulligan { effect_player: PlayerName },

    MulliganDecision { active_player: PlayerName, do_mulligan: bool },

    #[serde(rename = "Decision_InitialPlacement")]
    DecisionInitialPlacement { effect_player: PlayerName, cards_can_choose: Vec<CardId> },

    InitialPlacementPlaced { active_player: PlayerName },

    InitialPlacementReveal { placements: Vec<CardRef> },

    EndTurn { active_player: PlayerName, next_player: PlayerName },

    StartTurn { active_player: PlayerName, turn_number: TurnNumber },

    ResetStepActivate { active_player: PlayerName, activated_card_ids: Vec<CardId> },

    ResetStepCollab { active_player: PlayerName, rested_card_ids: Vec<CardId> },

    CheerStep { active_player: PlayerName, cheer_to_place: CardRef, options: Vec<CardId> },

    MoveCard { moving_player: PlayerName, from_zone: Zone, to_zone: Zone, card: CardRef },

    MoveAttachedCard {
        owning_player: PlayerName,
        from_holomem_id: AttachLocation,
        to_holomem_id: AttachLocation,
        attached_id: CardId,
    },

    PlaySupportCard { player: PlayerName, card: CardRef, limited: bool },

    Bloom { bloom_player: PlayerName, bloom_card: CardRef, target_id: CardId },

    Collab { collab_player: PlayerName, collab_card_id: CardId, holopower_generated: u32 },

    BatonPass { active_player: PlayerName, center_id: CardId, new_center_id: CardId },

    BoostStat { card_id: CardId, stat: StatKind, amount: u32 },

    PerformArt {
        performer_id: CardId,
        art_id: String,
        target_id: CardId,
        power: PowerValue,
    },

    DamageDealt {
        target_id: CardId,
        target_player: PlayerName,
        damage: u32,
        special: bool,
        died: bool,
        game_over: bool,
        life_lost: LifeValue,
        life_loss_prevented: bool,
    },

    #[serde(rename = "DownedHolomem_Before")]
    DownedHolomemBefore { target_id: CardId },

    DownedHolomem {
        target_id: CardId,
        target_player: PlayerName,
        life_lost: LifeValue,
        game_over: bool,
    },

    RollDie { effect_player: PlayerName, die_result: u8, rigged: bool },

    OshiSkillActivation { skill_player: PlayerName, skill_id: String },

    GameOver { winner: Option<PlayerName>, loser: Option<PlayerName>, reason: GameOverReason },

    /// An action was rejected; match state is unchanged.
    GameError { error_player: PlayerName, error_id: String, error_message: String },

    #[serde(rename = "Decision_MainStep")]
    DecisionMainStep { active_player: PlayerName, available_actions: Vec<LegalAction> },

    #[serde(rename = "Decision_PerformanceStep")]
    DecisionPerformanceStep { active_player: PlayerName, available_actions: Vec<LegalAction> },

    #[serde(rename = "Decision_SendCheer")]
    DecisionSendCheer {
        effect_player: PlayerName,
        amount_min: u32,
        amount_max: u32,
        from_zone: CheerSource,
        to_zone: CheerDestination,
        from_options: Vec<CardId>,
        to_options: Vec<SendCheerTarget>,
    },

    #[serde(rename = "Decision_ChooseCards")]
    DecisionChooseCards {
        effect_player: PlayerName,
        cards_can_choose: Vec<CardId>,
        amount_min: u32,
        amount_max: u32,
        from_zone: Zone,
        to_zone: Zone,
        reveal_chosen: bool,
        remaining_cards_action: RemainingCardsAction,
    },

    #[serde(rename = "Decision_ChooseHolomemForEffect")]
    DecisionChooseHolomemForEffect { effect_player: PlayerName, cards_can_choose: Vec<CardId> },

    #[serde(rename = "Decision_SwapHolomemToCenter")]
    DecisionSwapHolomemToCenter { effect_player: PlayerName, cards_can_choose: Vec<CardId> },

    #[serde(rename = "Decision_Choice")]
    DecisionChoice { effect_player: PlayerName, choices: Vec<String> },
}

/// Why a match ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    DeckOut,
    LifeZero,
    NoHolomem,
    Concede,
    Disconnect,
    InternalError,
}

impl GameEvent {
    /// Returns a copy of this event with printed identities masked, for a
    /// recipient who cannot see the cards involved.
    pub fn masked(&self) -> GameEvent {
        let mut event = self.clone();
        match &mut event {
            GameEvent::Draw { drawn_cards, .. } => {
                for card in drawn_cards {
                    card.mask();
                }
            }
            GameEvent::CheerStep { cheer_to_place, .. } => cheer_to_place.mask(),
            GameEvent::MoveCard { card, .. } => card.mask(),
            GameEvent::PlaySupportCard { card, .. } => card.mask(),
            GameEvent::Bloom { bloom_card, .. } => bloom_card.mask(),
            GameEvent::InitialPlacementReveal { placements } => {
                for card in placements {
                    card.mask();
                }
            }
            _ => {}
        }
        event
    }

    /// True if this event carries printed identities that may require
    /// masking.
    pub fn has_identities(&self) -> bool {
        matches!(
            self,
            GameEvent::Draw { .. }
                | GameEvent::CheerStep { .. }
                | GameEvent::MoveCard { .. }
                | GameEvent::PlaySupportCard { .. }
                | GameEvent::Bloom { .. }
                | GameEvent::InitialPlacementReveal { .. }
        )
    }
}
