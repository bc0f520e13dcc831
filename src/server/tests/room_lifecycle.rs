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

use std::collections::BTreeMap;

use catalog::card_database::CardDatabase;
use data::core::primitives::{CardName, UserId};
use data::events::game_event::{GameEvent, GameOverReason};
use rules::setup::new_match::DeckSubmission;
use server::room::Room;
use uuid::Uuid;

fn database() -> CardDatabase {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../decks/card_definitions.json");
    CardDatabase::load(path).expect("manifest loads")
}

fn submission() -> DeckSubmission {
    let mut main_deck = BTreeMap::new();
    main_deck.insert(CardName::new("hSD01-003"), 4);
    main_deck.insert(CardName::new("hSD01-004"), 4);
    main_deck.insert(CardName::new("hSD01-005"), 4);
    main_deck.insert(CardName::new("hSD01-006"), 4);
    main_deck.insert(CardName::new("hSD01-016"), 34);
    let mut cheer_deck = BTreeMap::new();
    cheer_deck.insert(CardName::new("hY01-001"), 10);
    cheer_deck.insert(CardName::new("hY02-001"), 10);
    DeckSubmission { oshi: CardName::new("hSD01-001"), main_deck, cheer_deck }
}

#[test]
fn room_delivers_setup_batches_to_both_players() {
    let alice = UserId(Uuid::new_v4());
    let bob = UserId(Uuid::new_v4());
    let mut room = Room::create(
        database().definitions(),
        7,
        Default::default(),
        (alice, submission()),
        (bob, submission()),
    )
    .expect("room creates");

    let batches = room.drain_batches();
    assert_eq!(batches.len(), 2, "both players receive the setup batch");
    for (_, events) in &batches {
        assert!(events
            .iter()
            .any(|event| matches!(event.event, GameEvent::GameStart { .. })));
    }
    assert!(!room.is_ready_for_cleanup());
}

#[test]
fn quitting_concedes_and_readies_cleanup() {
    let alice = UserId(Uuid::new_v4());
    let bob = UserId(Uuid::new_v4());
    let mut room = Room::create(
        database().definitions(),
        7,
        Default::default(),
        (alice, submission()),
        (bob, submission()),
    )
    .expect("room creates");
    room.drain_batches();

    let batches = room.handle_quit(alice);
    assert!(room.is_ready_for_cleanup());
    let (_, events) = batches.iter().find(|(user, _)| *user == bob).expect("bob notified");
    assert!(events.iter().any(|event| matches!(
        event.event,
        GameEvent::GameOver { reason: GameOverReason::Concede, .. }
    )));
}

#[test]
fn disconnect_timeout_forfeits_the_match() {
    let alice = UserId(Uuid::new_v4());
    let bob = UserId(Uuid::new_v4());
    let mut room = Room::create(
        database().definitions(),
        7,
        Default::default(),
        (alice, submission()),
        (bob, submission()),
    )
    .expect("room creates");
    room.drain_batches();

    room.handle_disconnect(alice);
    assert!(!room.is_ready_for_cleanup(), "grace period holds the room open");

    let batches = room.handle_disconnect_timeout(alice);
    assert!(room.is_ready_for_cleanup());
    let (_, events) = batches.iter().find(|(user, _)| *user == bob).expect("bob notified");
    assert!(events.iter().any(|event| matches!(
        event.event,
        GameEvent::GameOver { reason: GameOverReason::Disconnect, .. }
    )));
}
