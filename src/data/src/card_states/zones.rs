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
use slotmap::SlotMap;

use crate::card_states::card_state::CardState;
use crate::core::numerics::Damage;
use crate::core::primitives::{CardId, CardName, HasCardId, PlayerName, Zone};

/// Stores the state of all card instances in a match.
///
/// Ordered zone membership lives on each player's
/// [crate::player_states::player_state::PlayerState]; this table is the single
/// arena resolving a [CardId] to its mutable state.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Zones {
    /// All card instances in the current match.
    ///
    /// You should generally use the methods on
    /// [crate::game_states::game_state::GameState] instead of accessing this
    /// field directly.
    pub all_cards: SlotMap<CardId, CardState>,
}

impl Zones {
    /// Looks up the state for a card.
    ///
    /// Panics if this card id does not exist.
    pub fn card(&self, id: impl HasCardId) -> &CardState {
        &self.all_cards[id.card_id()]
    }

    /// Mutable equivalent of [Self::card].
    pub fn card_mut(&mut self, id: impl HasCardId) -> &mut CardState {
        &mut self.all_cards[id.card_id()]
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.all_cards.contains_key(id)
    }

    /// Creates a new card instance owned by `owner` in the provided `zone`.
    ///
    /// The card is created with no damage, no attachments, and no identity
    /// revealed to either player. It is assigned a fresh [CardId].
    pub fn create_card(&mut self, name: CardName, owner: PlayerName, zone: Zone) -> CardId {
        let id = self.all_cards.insert_with_key(|id| CardState {
            id,
            card_name: name,
            owner,
            zone,
            damage: Damage(0),
            resting: false,
            attached_cheer: vec![],
            attached_support: vec![],
            bloomed_from: vec![],
            bloomed_this_turn: false,
            played_this_turn: false,
            used_art_ids: vec![],
            revealed_to: EnumSet::empty(),
        });
        id
    }
}
