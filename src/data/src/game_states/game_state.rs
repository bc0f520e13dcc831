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

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use enumset::EnumSet;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

use crate::card_states::card_state::CardState;
use crate::card_states::zones::Zones;
use crate::core::numerics::TurnNumber;
use crate::core::primitives::{CardName, GameId, HasCardId, PlayerName};
use crate::decisions::decision::Decision;
use crate::effects::effect_context::EffectStackEntry;
use crate::events::event_log::EventLog;
use crate::events::game_event::{GameEvent, GameOverReason};
use crate::game_states::game_phase::GamePhase;
use crate::game_states::performance_state::ArtInProgress;
use crate::player_states::player_state::{PlayerState, Players};
use crate::printed_cards::printed_card::PrintedCard;

/// This is the state of a single ongoing match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Unique ID for this match
    pub id: GameId,

    /// Whether the match is in setup, ongoing, or finished.
    pub status: GameStatus,

    /// Current turn phase. Meaningful once [Self::status] is
    /// [GameStatus::Playing].
    pub phase: GamePhase,

    /// Identifies the player whose turn it currently is and the current turn
    /// number.
    pub current_turn: TurnData,

    /// Player randomly chosen at setup to take the first turn.
    pub starting_player: PlayerName,

    /// Options controlling overall gameplay
    pub configuration: GameConfiguration,

    /// State for the players within this match
    pub players: Players,

    /// Stores state for all card instances in this match.
    pub zones: Zones,

    /// The single outstanding decision, if any. While present, every action
    /// other than the answer is rejected.
    pub decision: Option<Decision>,

    /// LIFO stack of effects awaiting resolution.
    pub effect_stack: Vec<EffectStackEntry>,

    /// The art currently resolving, if any.
    pub performance: Option<ArtInProgress>,

    /// Append-only event log with per-observer batch cursors.
    pub events: EventLog,

    /// Random number generator to use for this match
    pub rng: Xoshiro256StarStar,

    /// Printed definitions for every card in this match, shared with the card
    /// database. Repopulated after deserialization.
    #[serde(skip)]
    pub card_definitions: Arc<HashMap<CardName, PrintedCard>>,
}

impl GameState {
    pub fn card(&self, id: impl HasCardId) -> &CardState {
        self.zones.card(id)
    }

    pub fn card_mut(&mut self, id: impl HasCardId) -> &mut CardState {
        self.zones.card_mut(id)
    }

    pub fn player(&self, name: PlayerName) -> &PlayerState {
        self.players.get(name)
    }

    pub fn player_mut(&mut self, name: PlayerName) -> &mut PlayerState {
        self.players.get_mut(name)
    }

    pub fn active_player(&self) -> PlayerName {
        self.current_turn.active_player
    }

    /// Returns the printed definition for a card instance.
    ///
    /// Panics if the card's name is not in the database; definitions are
    /// validated when the match is created, so this indicates a corrupted
    /// match rather than a recoverable error.
    pub fn printed(&self, id: impl HasCardId) -> &PrintedCard {
        let name = &self.zones.card(id).card_name;
        &self.card_definitions[name]
    }

    /// Appends an event visible in full to both players.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Appends an event whose printed identities only `visible_to` may see.
    pub fn emit_hidden(&mut self, event: GameEvent, visible_to: EnumSet<PlayerName>) {
        self.events.push_hidden(event, visible_to);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver { .. })
    }
}

/// Whether the match is being set up, is ongoing, or has ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Mulligans and initial placement are resolving.
    Setup,

    /// Match is currently ongoing
    Playing,

    /// Match has ended. `winner` is None when the match was aborted.
    GameOver { winner: Option<PlayerName>, reason: GameOverReason },
}

/// Identifies a turn within the match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct TurnData {
    /// Player whose turn it is or was.
    pub active_player: PlayerName,

    /// 1-based turn counter, incremented every time a turn starts.
    pub turn_number: TurnNumber,
}

/// Options controlling overall gameplay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfiguration {
    /// Scripted results consumed by the next die rolls instead of the PRNG.
    /// A test injection hook; empty in real matches.
    #[serde(default)]
    pub scripted_die_rolls: VecDeque<u8>,
}
