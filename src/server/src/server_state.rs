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

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use catalog::card_database::CardDatabase;
use data::core::primitives::UserId;
use tokio::sync::{mpsc, Mutex};
use tracing::warn;

use crate::matchmaking::Matchmaking;
use crate::messages::ServerMessage;
use crate::room::Room;

/// Server configuration supplied at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// How long a disconnected player may reconnect before losing.
    pub disconnect_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { disconnect_grace: Duration::from_secs(30) }
    }
}

/// One connected client session.
#[derive(Debug, Clone)]
pub struct Session {
    pub sender: mpsc::UnboundedSender<ServerMessage>,
    pub room: Option<Arc<Mutex<Room>>>,
}

/// Shared state for the whole server process.
///
/// The card database is immutable after load and shared freely; matchmaking
/// and session state sit behind mutexes with brief critical sections. Each
/// room carries its own lock, which is what serializes match actions.
pub struct ServerState {
    pub card_database: CardDatabase,
    pub config: ServerConfig,
    pub matchmaking: Mutex<Matchmaking>,
    pub sessions: Mutex<HashMap<UserId, Session>>,
}

impl ServerState {
    pub fn new(card_database: CardDatabase, config: ServerConfig) -> Self {
        Self {
            card_database,
            config,
            matchmaking: Mutex::new(Matchmaking::default()),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Sends a message to one connected session, dropping it silently if the
    /// session is gone.
    pub async fn send_to(&self, user_id: UserId, message: ServerMessage) {
        let sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(&user_id) {
            if session.sender.send(message).is_err() {
                warn!(?user_id, "Dropped message for closed session");
            }
        }
    }

    /// Broadcasts a message to every connected session.
    pub async fn broadcast(&self, message: ServerMessage) {
        let sessions = self.sessions.lock().await;
        for session in sessions.values() {
            let _ = session.sender.send(message.clone());
        }
    }
}
