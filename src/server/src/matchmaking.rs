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

//! Named matchmaking queues with FIFO pairing.
//!
//! Custom queues match only within their queue name; public queues form a
//! shared pool per game type. All state lives behind one mutex held only for
//! brief enqueue/dequeue/pair sections.

use std::collections::{BTreeMap, VecDeque};

use data::core::primitives::UserId;
use rules::setup::new_match::DeckSubmission;
use tracing::info;

use crate::messages::QueueInfo;

/// Game types the server accepts.
pub const GAME_TYPES: &[&str] = &["versus"];

pub const PUBLIC_POOL_NAME: &str = "public";

/// A player waiting in a queue with their validated deck.
#[derive(Debug, Clone)]
pub struct PendingPlayer {
    pub user_id: UserId,
    pub submission: DeckSubmission,
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct QueueKey {
    queue_name: String,
    game_type: String,
    custom_game: bool,
}

/// All matchmaking queues.
#[derive(Debug, Default)]
pub struct Matchmaking {
    queues: BTreeMap<QueueKey, VecDeque<PendingPlayer>>,
}

impl Matchmaking {
    pub fn is_game_type_valid(&self, game_type: &str) -> bool {
        GAME_TYPES.contains(&game_type)
    }

    /// True if this user is waiting in any queue.
    pub fn contains(&self, user_id: UserId) -> bool {
        self.queues
            .values()
            .any(|queue| queue.iter().any(|player| player.user_id == user_id))
    }

    /// Enqueues a player; returns a FIFO pair when the queue can match.
    pub fn add_player(
        &mut self,
        player: PendingPlayer,
        queue_name: &str,
        custom_game: bool,
        game_type: &str,
    ) -> Option<(PendingPlayer, PendingPlayer)> {
        let key = QueueKey {
            // Public queues are one shared pool per game type.
            queue_name: if custom_game { queue_name.to_string() } else { PUBLIC_POOL_NAME.to_string() },
            game_type: game_type.to_string(),
            custom_game,
        };
        info!(user_id = ?player.user_id, ?key, "Player joined queue");
        let queue = self.queues.entry(key).or_default();
        queue.push_back(player);

        if queue.len() >= 2 {
            let first = queue.pop_front()?;
            let second = queue.pop_front()?;
            Some((first, second))
        } else {
            None
        }
    }

    /// Removes this user from every queue.
    pub fn remove_player(&mut self, user_id: UserId) {
        for queue in self.queues.values_mut() {
            queue.retain(|player| player.user_id != user_id);
        }
        self.queues.retain(|_, queue| !queue.is_empty());
    }

    /// Lobby summaries for the `server_info` message.
    pub fn queue_info(&self) -> Vec<QueueInfo> {
        self.queues
            .iter()
            .map(|(key, queue)| QueueInfo {
                queue_name: key.queue_name.clone(),
                game_type: key.game_type.clone(),
                custom_game: key.custom_game,
                players_count: queue.len(),
            })
            .collect()
    }
}
