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

use enum_map::EnumMap;
use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::core::primitives::PlayerName;
use crate::events::game_event::GameEvent;

/// One logged event plus the set of players who may see the printed
/// identities it mentions, fixed at emission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: GameEvent,
    pub identity_visible_to: EnumSet<PlayerName>,
}

/// A recipient-specific copy of one event, identities masked as needed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClientEvent {
    #[serde(rename = "event_player_id")]
    pub event_player: PlayerName,
    #[serde(flatten)]
    pub event: GameEvent,
}

/// The append-only event log for a match.
///
/// Events accumulate as the engine runs; each observer holds a cursor and
/// [Self::grab_events] returns the batch of events appended since that
/// observer last looked. Batch boundaries are therefore exactly the engine's
/// suspension points, provided observers drain after every action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
    cursors: EnumMap<PlayerName, usize>,
}

impl EventLog {
    /// Appends an event visible in full to both players.
    pub fn push(&mut self, event: GameEvent) {
        self.records.push(EventRecord { event, identity_visible_to: EnumSet::all() });
    }

    /// Appends an event whose printed identities only `visible_to` may see.
    pub fn push_hidden(&mut self, event: GameEvent, visible_to: EnumSet<PlayerName>) {
        self.records.push(EventRecord { event, identity_visible_to: visible_to });
    }

    /// Returns all events appended since `observer` last called this, with
    /// per-recipient identity masking applied, and advances the observer's
    /// cursor.
    pub fn grab_events(&mut self, observer: PlayerName) -> Vec<ClientEvent> {
        let start = self.cursors[observer];
        let batch = self.records[start..]
            .iter()
            .map(|record| ClientEvent {
                event_player: observer,
                event: if record.identity_visible_to.contains(observer) {
                    record.event.clone()
                } else {
                    record.event.masked()
                },
            })
            .collect();
        self.cursors[observer] = self.records.len();
        batch
    }

    /// Total number of events logged so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of the full log, unredacted. Server-side only.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }
}
