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

use crate::core::numerics::Damage;
use crate::core::primitives::{CardId, CardName, HasCardId, HasPlayerName, PlayerName, Zone};

/// Represents the state of one card instance within a match.
///
/// Identity and rules text live on the printed definition; everything mutable
/// lives here. Attachments and bloomed-under cards are referenced by
/// [CardId] only and resolved through the match's card table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardState {
    /// Unique identifier for this card in the card table.
    pub id: CardId,

    /// Printed identity of this card.
    pub card_name: CardName,

    /// The player who started the match with this card. Never changes.
    pub owner: PlayerName,

    /// Current zone. Do not mutate directly, use the zone mutation functions
    /// so ordered zone lists stay consistent.
    pub zone: Zone,

    /// Damage marked on this holomem.
    pub damage: Damage,

    /// Rested cards flip face-up again at their owner's next reset step.
    pub resting: bool,

    /// Cheer attached to this holomem, in attachment order.
    pub attached_cheer: Vec<CardId>,

    /// Support cards attached to this holomem, in attachment order.
    pub attached_support: Vec<CardId>,

    /// Holomem this card bloomed on top of, bottom to top.
    pub bloomed_from: Vec<CardId>,

    /// Set when this card blooms; blocks re-bloom and art use until cleared
    /// at the owner's next reset step.
    pub bloomed_this_turn: bool,

    /// Set when the card enters the stage; blocks bloom the same turn.
    pub played_this_turn: bool,

    /// Arts already used this turn, each usable at most once per source.
    pub used_art_ids: Vec<String>,

    /// Players who have seen the identity of this card while it was in a
    /// hidden zone.
    pub revealed_to: EnumSet<PlayerName>,
}

impl HasCardId for CardState {
    fn card_id(&self) -> CardId {
        self.id
    }
}

impl HasPlayerName for CardState {
    fn player_name(&self) -> PlayerName {
        self.owner
    }
}

impl CardState {
    /// True if `player` can currently see the printed identity of this card.
    pub fn is_identity_visible_to(&self, player: PlayerName) -> bool {
        self.zone.is_public()
            || (self.zone.is_visible_to_owner() && self.owner == player)
            || self.revealed_to.contains(player)
    }
}
