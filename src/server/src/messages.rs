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

//! The JSON wire protocol spoken over the WebSocket.

use std::collections::BTreeMap;

use data::actions::game_action::GameAction;
use data::core::primitives::CardName;
use data::events::event_log::ClientEvent;
use serde::{Deserialize, Serialize};

/// Messages a client may send. Unknown `message_type` values fail parsing
/// and are answered with an `invalid_message` error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request the current server info summary.
    JoinServer,

    /// Join a matchmaking queue with a deck submission.
    JoinMatchmakingQueue {
        queue_name: String,
        #[serde(default)]
        custom_game: bool,
        game_type: String,
        oshi_id: CardName,
        deck: BTreeMap<CardName, u32>,
        cheer_deck: BTreeMap<CardName, u32>,
    },

    /// Leave all matchmaking queues.
    LeaveMatchmakingQueue,

    /// Concede and leave the current match.
    LeaveGame,

    /// An action against the current match.
    GameAction {
        #[serde(flatten)]
        action: GameAction,
    },
}

/// Messages the server sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Queue summaries, broadcast whenever the lobby changes.
    ServerInfo { queue_info: Vec<QueueInfo> },

    Error { error_id: String, error_message: String },

    /// One batch of match events for this recipient.
    GameEvents { events: Vec<ClientEvent> },
}

/// Summary of one matchmaking queue for the lobby display.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct QueueInfo {
    pub queue_name: String,
    pub game_type: String,
    pub custom_game: bool,
    pub players_count: usize,
}

/// Stable protocol error identifiers.
pub mod error_ids {
    pub const INVALID_MESSAGE: &str = "invalid_message";
    pub const ALREADY_IN_MATCH: &str = "joinmatch_invalid_alreadyinmatch";
    pub const INVALID_GAME_TYPE: &str = "joinmatch_invalid_gametype";
    pub const INVALID_DECK: &str = "joinmatch_invaliddeck";
    pub const NOT_IN_ROOM: &str = "not_in_room";
    pub const INVALID_GAME_MESSAGE: &str = "invalid_game_message";
}
