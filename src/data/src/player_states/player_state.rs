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

use crate::core::primitives::{CardId, HasPlayerName, PlayerName, UserId};

/// Represents the state of players within a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Players {
    player_1: PlayerState,
    player_2: PlayerState,
}

impl Players {
    pub fn new(p1: PlayerState, p2: PlayerState) -> Self {
        Self { player_1: p1, player_2: p2 }
    }

    /// Looks up a player by name
    pub fn get(&self, name: PlayerName) -> &PlayerState {
        match name {
            PlayerName::One => &self.player_1,
            PlayerName::Two => &self.player_2,
        }
    }

    /// Mutable reference to a player by name
    pub fn get_mut(&mut self, name: PlayerName) -> &mut PlayerState {
        match name {
            PlayerName::One => &mut self.player_1,
            PlayerName::Two => &mut self.player_2,
        }
    }
}

/// Represents the state of a single player within a match: every zone they
/// own plus per-turn and per-game flags.
///
/// All zone lists hold [CardId]s into the match card table, in zone order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Name of this player
    pub name: PlayerName,

    /// Optionally, the ID of a user who is this player
    pub user_id: Option<UserId>,

    /// The player's oshi. Set at match creation; never moves.
    pub oshi: CardId,

    /// Main deck, bottom to top. The draw position is the back.
    pub deck: Vec<CardId>,

    /// Hand, hidden from the opponent.
    pub hand: Vec<CardId>,

    /// Archive, public, newest first.
    pub archive: Vec<CardId>,

    /// Face-down life cheer. The front is the next life lost.
    pub life: Vec<CardId>,

    /// Cheer deck, bottom to top. The reveal position is the back.
    pub cheer_deck: Vec<CardId>,

    /// Face-down holopower stack fed from the deck top on collab.
    pub holopower: Vec<CardId>,

    /// Center stage slot.
    pub center: Option<CardId>,

    /// Collab stage slot.
    pub collab: Option<CardId>,

    /// Backstage slots, left to right, at most [Self::MAX_BACKSTAGE].
    pub backstage: Vec<CardId>,

    /// A limited support card has been played this turn.
    pub used_limited_this_turn: bool,

    /// The collab slot has been filled this turn.
    pub collabed_this_turn: bool,

    /// A baton pass has been performed this turn.
    pub baton_passed_this_turn: bool,

    /// Oshi skill ids activated this turn.
    pub oshi_skills_used_this_turn: Vec<String>,

    /// Oshi skill ids activated this match.
    pub oshi_skills_used_this_game: Vec<String>,

    /// Number of mulligans taken during setup.
    pub mulligan_count: u32,

    /// Mulligan phase finished for this player.
    pub mulligan_completed: bool,

    /// Initial face-down placement finished for this player.
    pub initial_placement_completed: bool,
}

impl PlayerState {
    pub const MAX_BACKSTAGE: usize = 5;

    pub fn new(name: PlayerName, user_id: Option<UserId>, oshi: CardId) -> Self {
        Self {
            name,
            user_id,
            oshi,
            deck: vec![],
            hand: vec![],
            archive: vec![],
            life: vec![],
            cheer_deck: vec![],
            holopower: vec![],
            center: None,
            collab: None,
            backstage: vec![],
            used_limited_this_turn: false,
            collabed_this_turn: false,
            baton_passed_this_turn: false,
            oshi_skills_used_this_turn: vec![],
            oshi_skills_used_this_game: vec![],
            mulligan_count: 0,
            mulligan_completed: false,
            initial_placement_completed: false,
        }
    }

    /// Iterator over all holomem on this player's stage, in the canonical
    /// trigger scan order: center, collab, then backstage left to right.
    pub fn stage(&self) -> impl Iterator<Item = CardId> + '_ {
        self.center
            .into_iter()
            .chain(self.collab)
            .chain(self.backstage.iter().copied())
    }

    /// True if `id` occupies any stage slot.
    pub fn is_on_stage(&self, id: CardId) -> bool {
        self.stage().any(|card| card == id)
    }

    /// Removes `id` from whichever stage slot holds it. Returns false if the
    /// card was not on stage.
    pub fn remove_from_stage(&mut self, id: CardId) -> bool {
        if self.center == Some(id) {
            self.center = None;
            true
        } else if self.collab == Some(id) {
            self.collab = None;
            true
        } else if let Some(position) = self.backstage.iter().position(|&card| card == id) {
            self.backstage.remove(position);
            true
        } else {
            false
        }
    }
}

impl HasPlayerName for PlayerState {
    fn player_name(&self) -> PlayerName {
        self.name
    }
}
