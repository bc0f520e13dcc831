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

//! A Room owns one match and serializes everything that happens to it.
//!
//! The room lock is the per-room scheduling point: one inbound action is
//! processed at a time, and the per-recipient event batches produced by that
//! action are handed back for delivery.

use data::actions::game_action::GameAction;
use data::core::primitives::{GameId, PlayerName, UserId};
use data::events::event_log::ClientEvent;
use data::events::game_event::GameOverReason;
use data::game_states::game_state::{GameConfiguration, GameState};
use rules::action_handlers::actions;
use rules::mutations::endgame;
use rules::setup::new_match;
use rules::setup::new_match::DeckSubmission;
use tracing::{error, info};
use utils::outcome::Value;
use uuid::Uuid;

/// One participant in a room.
#[derive(Debug, Clone)]
pub struct RoomPlayer {
    pub user_id: UserId,
    pub name: PlayerName,
    pub connected: bool,
}

/// Lifecycle state of a room.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoomState {
    Running,
    ReadyForCleanup,
}

/// A batch of events addressed to one participant.
pub type OutboundBatch = (UserId, Vec<ClientEvent>);

#[derive(Debug)]
pub struct Room {
    pub id: GameId,
    pub game: GameState,
    pub players: [RoomPlayer; 2],
    pub state: RoomState,
}

impl Room {
    /// Creates a room and the match inside it, running setup through the
    /// first mulligan decision.
    pub fn create(
        definitions: std::sync::Arc<
            std::collections::HashMap<
                data::core::primitives::CardName,
                data::printed_cards::printed_card::PrintedCard,
            >,
        >,
        seed: u64,
        configuration: GameConfiguration,
        player_one: (UserId, DeckSubmission),
        player_two: (UserId, DeckSubmission),
    ) -> Value<Self> {
        let id = GameId(Uuid::new_v4());
        let game = new_match::create(
            id,
            seed,
            configuration,
            definitions,
            (Some(player_one.0), player_one.1),
            (Some(player_two.0), player_two.1),
        )?;
        info!(game_id = ?id, "Room created");
        Ok(Self {
            id,
            game,
            players: [
                RoomPlayer { user_id: player_one.0, name: PlayerName::One, connected: true },
                RoomPlayer { user_id: player_two.0, name: PlayerName::Two, connected: true },
            ],
            state: RoomState::Running,
        })
    }

    pub fn is_ready_for_cleanup(&self) -> bool {
        self.state == RoomState::ReadyForCleanup
    }

    pub fn player_name(&self, user_id: UserId) -> Option<PlayerName> {
        self.players.iter().find(|player| player.user_id == user_id).map(|player| player.name)
    }

    /// Executes one action for the given participant and returns the event
    /// batches to deliver.
    pub fn handle_game_action(&mut self, user_id: UserId, action: GameAction) -> Vec<OutboundBatch> {
        let Some(player) = self.player_name(user_id) else {
            return vec![];
        };

        if let Err(stop) = actions::execute(&mut self.game, player, action) {
            // Engine invariant failure: abort the match for both players.
            error!(game_id = ?self.id, ?stop, "Engine error, aborting match");
            let _ = endgame::abort(&mut self.game);
        }

        self.after_engine_call()
    }

    /// The given participant concedes.
    pub fn handle_quit(&mut self, user_id: UserId) -> Vec<OutboundBatch> {
        let Some(player) = self.player_name(user_id) else {
            return vec![];
        };
        if !self.game.is_over() {
            let _ = endgame::game_over(
                &mut self.game,
                player.opponent(),
                player,
                GameOverReason::Concede,
            );
        }
        self.after_engine_call()
    }

    /// Marks a participant's connection closed. The caller is responsible
    /// for scheduling the grace-period timeout.
    pub fn handle_disconnect(&mut self, user_id: UserId) {
        if let Some(player) = self.players.iter_mut().find(|player| player.user_id == user_id) {
            player.connected = false;
        }
    }

    /// Called when the disconnect grace period expires without a reconnect:
    /// the disconnected player loses.
    pub fn handle_disconnect_timeout(&mut self, user_id: UserId) -> Vec<OutboundBatch> {
        let disconnected = self
            .players
            .iter()
            .find(|player| player.user_id == user_id && !player.connected)
            .map(|player| player.name);
        let Some(player) = disconnected else {
            return vec![];
        };
        if !self.game.is_over() {
            let _ = endgame::game_over(
                &mut self.game,
                player.opponent(),
                player,
                GameOverReason::Disconnect,
            );
        }
        self.after_engine_call()
    }

    /// Collects the newest event batch for each participant and updates the
    /// room lifecycle.
    fn after_engine_call(&mut self) -> Vec<OutboundBatch> {
        if self.game.is_over() {
            self.state = RoomState::ReadyForCleanup;
        }
        self.drain_batches()
    }

    /// Returns the newest per-recipient event batches, advancing each
    /// observer cursor. Also used to deliver the setup batch right after
    /// room creation.
    pub fn drain_batches(&mut self) -> Vec<OutboundBatch> {
        let players: Vec<(UserId, PlayerName)> =
            self.players.iter().map(|player| (player.user_id, player.name)).collect();
        players
            .into_iter()
            .map(|(user_id, name)| (user_id, self.game.events.grab_events(name)))
            .filter(|(_, events)| !events.is_empty())
            .collect()
    }
}
