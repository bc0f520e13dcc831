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

//! Shared match fixtures: build decks from the shipped manifest, run setup,
//! and drive the match to a known main step, mirroring how a real client
//! would answer each decision.

#![allow(dead_code)]

use std::collections::BTreeMap;

use catalog::card_database::CardDatabase;
use data::actions::game_action::{CheerPlacement, GameAction};
use data::core::primitives::{CardId, CardName, CardType, GameId, PlayerName, Zone};
use data::decisions::decision::DecisionKind;
use data::events::event_log::ClientEvent;
use data::events::game_event::GameEvent;
use data::game_states::game_state::{GameConfiguration, GameState, GameStatus};
use rules::action_handlers::actions;
use rules::setup::new_match;
use rules::setup::new_match::DeckSubmission;
use uuid::Uuid;

pub const DEFAULT_SEED: u64 = 0xA11CE;

pub fn card_database() -> CardDatabase {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../decks/card_definitions.json");
    CardDatabase::load(path).expect("manifest loads")
}

/// The starter deck: 50 main cards and 20 cheer, legal by construction.
pub fn default_deck() -> DeckSubmission {
    deck_with("hSD01-001", &[])
}

/// The starter deck with `extras` swapped in for filler staff copies.
pub fn deck_with(oshi: &str, extras: &[(&str, u32)]) -> DeckSubmission {
    let mut main_deck: BTreeMap<CardName, u32> = BTreeMap::new();
    main_deck.insert(CardName::new("hSD01-003"), 4);
    main_deck.insert(CardName::new("hSD01-004"), 4);
    main_deck.insert(CardName::new("hSD01-005"), 4);
    main_deck.insert(CardName::new("hSD01-006"), 4);

    let mut extra_total = 0;
    for (name, count) in extras {
        main_deck.insert(CardName::new(*name), *count);
        extra_total += count;
    }
    main_deck.insert(CardName::new("hSD01-016"), 34 - extra_total);

    let mut cheer_deck = BTreeMap::new();
    cheer_deck.insert(CardName::new("hY01-001"), 10);
    cheer_deck.insert(CardName::new("hY02-001"), 10);

    DeckSubmission { oshi: CardName::new(oshi), main_deck, cheer_deck }
}

/// A running match fixture. `p1` is always the starting player.
pub struct TestGame {
    pub game: GameState,
    pub p1: PlayerName,
    pub p2: PlayerName,
}

impl TestGame {
    /// Executes an action, panicking on engine errors (client-level
    /// rejections only surface as events).
    pub fn act(&mut self, player: PlayerName, action: GameAction) {
        actions::execute(&mut self.game, player, action).expect("engine error");
    }

    /// Newest event batch for an observer.
    pub fn grab_events(&mut self, observer: PlayerName) -> Vec<ClientEvent> {
        self.game.events.grab_events(observer)
    }

    /// Discards any pending events for both observers.
    pub fn clear_events(&mut self) {
        self.game.events.grab_events(PlayerName::One);
        self.game.events.grab_events(PlayerName::Two);
    }

    pub fn center(&self, player: PlayerName) -> CardId {
        self.game.player(player).center.expect("center occupied")
    }

    /// Creates an extra card instance directly in a stage slot. Test-only
    /// state surgery, mirroring the original suite's fixtures.
    pub fn put_in_center(&mut self, player: PlayerName, name: &str) -> CardId {
        if let Some(old) = self.game.player_mut(player).center.take() {
            self.game.card_mut(old).zone = Zone::Floating;
        }
        let id = self.game.zones.create_card(CardName::new(name), player, Zone::Center);
        self.game.card_mut(id).revealed_to = enumset::EnumSet::all();
        self.game.player_mut(player).center = Some(id);
        id
    }

    pub fn put_in_backstage(&mut self, player: PlayerName, name: &str) -> CardId {
        let id = self.game.zones.create_card(CardName::new(name), player, Zone::Backstage);
        self.game.card_mut(id).revealed_to = enumset::EnumSet::all();
        self.game.player_mut(player).backstage.push(id);
        id
    }

    pub fn put_in_collab(&mut self, player: PlayerName, name: &str) -> CardId {
        let id = self.game.zones.create_card(CardName::new(name), player, Zone::Collab);
        self.game.card_mut(id).revealed_to = enumset::EnumSet::all();
        self.game.player_mut(player).collab = Some(id);
        id
    }

    /// Moves the first backstage holomem into the collab slot directly.
    pub fn move_backstage_to_collab(&mut self, player: PlayerName) -> CardId {
        let id = self.game.player_mut(player).backstage.remove(0);
        self.game.card_mut(id).zone = Zone::Collab;
        self.game.player_mut(player).collab = Some(id);
        id
    }

    /// Attaches a fresh cheer card of the given color card to a holomem.
    pub fn spawn_cheer(&mut self, player: PlayerName, holomem: CardId, cheer_name: &str) -> CardId {
        let id = self.game.zones.create_card(CardName::new(cheer_name), player, Zone::Holomem);
        self.game.card_mut(id).revealed_to = enumset::EnumSet::all();
        self.game.card_mut(holomem).attached_cheer.push(id);
        id
    }

    /// Creates a card straight into a player's hand.
    pub fn add_to_hand(&mut self, player: PlayerName, name: &str) -> CardId {
        let id = self.game.zones.create_card(CardName::new(name), player, Zone::Hand);
        self.game.card_mut(id).revealed_to.insert(player);
        self.game.player_mut(player).hand.push(id);
        id
    }

    pub fn generate_holopower(&mut self, player: PlayerName, count: usize) {
        for _ in 0..count {
            let id =
                self.game.zones.create_card(CardName::new("hSD01-016"), player, Zone::Holopower);
            self.game.player_mut(player).holopower.push(id);
        }
    }

    pub fn queue_die_rolls(&mut self, rolls: &[u8]) {
        self.game.configuration.scripted_die_rolls = rolls.iter().copied().collect();
    }

    /// Answers the current main step decision again after state surgery, so
    /// tests can read a fresh legal action list.
    pub fn main_step_actions(&mut self) -> Vec<data::actions::legal_action::LegalAction> {
        rules::legality::legal_actions::main_actions(&self.game, self.game.active_player())
    }
}

/// Creates a match and drives it to the starting player's main step on turn
/// three, with both players keeping their opening hands.
pub fn start_game_at_third_turn(p1_deck: DeckSubmission, p2_deck: DeckSubmission) -> TestGame {
    start_game_at_third_turn_seeded(DEFAULT_SEED, p1_deck, p2_deck)
}

pub fn start_game_at_third_turn_seeded(
    seed: u64,
    p1_deck: DeckSubmission,
    p2_deck: DeckSubmission,
) -> TestGame {
    let mut tg = create_game(seed, p1_deck, p2_deck);
    run_setup(&mut tg);
    run_to_third_turn(&mut tg);
    tg.clear_events();
    tg
}

/// Creates the match without driving setup. The fixture's `p1` is the
/// starting player regardless of seat order.
pub fn create_game(seed: u64, p1_deck: DeckSubmission, p2_deck: DeckSubmission) -> TestGame {
    let database = card_database();
    let game = new_match::create(
        GameId(Uuid::nil()),
        seed,
        GameConfiguration::default(),
        database.definitions(),
        (None, p1_deck),
        (None, p2_deck),
    )
    .expect("match creation succeeds");
    let p1 = game.starting_player;
    TestGame { game, p1, p2: p1.opponent() }
}

/// Answers mulligans (keep) and initial placements until the match starts.
pub fn run_setup(tg: &mut TestGame) {
    for _ in 0..8 {
        if tg.game.status != GameStatus::Setup {
            return;
        }
        let decision = tg.game.decision.clone().expect("setup decision pending");
        match decision.kind {
            DecisionKind::Mulligan => {
                tg.act(decision.player, GameAction::Mulligan { do_mulligan: false });
            }
            DecisionKind::InitialPlacement => {
                let placement = placement_for(&tg.game, decision.player);
                tg.act(decision.player, placement);
            }
            other => panic!("Unexpected setup decision {other:?}"),
        }
    }
    panic!("Setup did not complete");
}

fn placement_for(game: &GameState, player: PlayerName) -> GameAction {
    let hand = &game.player(player).hand;
    let debuts: Vec<CardId> = hand
        .iter()
        .copied()
        .filter(|&id| game.printed(id).card_type == CardType::HolomemDebut)
        .collect();
    let center_id = debuts[0];
    let backstage_ids: Vec<CardId> = debuts.into_iter().skip(1).take(5).collect();
    GameAction::InitialPlacement { center_id, backstage_ids }
}

/// Plays out turns one and two by attaching cheer to the center and ending
/// the turn, leaving the starting player at their third-turn main step.
pub fn run_to_third_turn(tg: &mut TestGame) {
    for _ in 0..32 {
        let decision = tg.game.decision.clone().expect("decision pending");
        match decision.kind {
            DecisionKind::SendCheer { from_options, to_options, .. } => {
                let placement = CheerPlacement {
                    cheer_id: from_options[0],
                    to: *to_options.first().expect("cheer target"),
                };
                tg.act(
                    decision.player,
                    GameAction::EffectResolutionMoveCheerBetweenHolomems {
                        placements: vec![placement],
                    },
                );
            }
            DecisionKind::MainStep => {
                if tg.game.current_turn.turn_number >= 3 {
                    return;
                }
                tg.act(decision.player, GameAction::MainStepEndTurn);
            }
            other => panic!("Unexpected decision while advancing turns {other:?}"),
        }
    }
    panic!("Did not reach the third turn");
}

/// Begins the performance step from the main step.
pub fn begin_performance(tg: &mut TestGame) {
    let active = tg.game.active_player();
    tg.act(active, GameAction::MainStepBeginPerformance);
}

/// Asserts that `events` is exactly `expected`: same events, same order,
/// nothing in between.
pub fn assert_event_sequence(events: &[ClientEvent], expected: &[GameEvent]) {
    let actual: Vec<&GameEvent> = events.iter().map(|event| &event.event).collect();
    let expected: Vec<&GameEvent> = expected.iter().collect();
    assert_eq!(actual, expected, "event batch does not match the expected sequence");
}

/// Asserts that `events` contains this exact event subsequence in order.
pub fn assert_events_contain(events: &[ClientEvent], expected: &[&GameEvent]) {
    let mut position = 0;
    for event in events {
        if position < expected.len() && event.event == *expected[position] {
            position += 1;
        }
    }
    assert!(
        position == expected.len(),
        "Missing expected event {:?} in {:#?}",
        expected.get(position),
        events
    );
}

/// Finds the first event matching a predicate.
pub fn find_event<'a>(
    events: &'a [ClientEvent],
    predicate: impl Fn(&GameEvent) -> bool,
) -> Option<&'a GameEvent> {
    events.iter().map(|event| &event.event).find(|event| predicate(event))
}
