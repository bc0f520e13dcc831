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

mod common;

use std::collections::HashSet;

use data::actions::game_action::GameAction;
use data::core::primitives::{CardId, PlayerName, Zone};
use data::decisions::decision::DecisionKind;
use data::events::game_event::{GameEvent, GameOverReason};
use data::game_states::game_state::GameStatus;
use pretty_assertions::assert_eq;

use common::{
    create_game, default_deck, run_setup, run_to_third_turn, start_game_at_third_turn,
    DEFAULT_SEED,
};

/// Every card a player brought stays accounted for across all zones and
/// attachments: 50 main deck + 20 cheer + 1 oshi.
#[test]
fn card_conservation_across_setup() {
    let tg = start_game_at_third_turn(default_deck(), default_deck());
    for player in [PlayerName::One, PlayerName::Two] {
        let state = tg.game.player(player);
        let mut total = 1; // oshi
        total += state.deck.len()
            + state.hand.len()
            + state.archive.len()
            + state.life.len()
            + state.cheer_deck.len()
            + state.holopower.len();
        for holomem in state.stage() {
            let card = tg.game.card(holomem);
            total += 1 + card.attached_cheer.len() + card.attached_support.len()
                + card.bloomed_from.len();
        }
        assert_eq!(total, 71, "player {player:?} lost or duplicated cards");
    }
}

#[test]
fn game_card_ids_unique_and_stable() {
    let tg = start_game_at_third_turn(default_deck(), default_deck());
    let ids: Vec<CardId> = tg.game.zones.all_cards.keys().collect();
    let unique: HashSet<CardId> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids.len(), 2 * 71);
}

#[test]
fn no_holomem_in_two_slots() {
    let tg = start_game_at_third_turn(default_deck(), default_deck());
    for player in [PlayerName::One, PlayerName::Two] {
        let stage: Vec<CardId> = tg.game.player(player).stage().collect();
        let unique: HashSet<CardId> = stage.iter().copied().collect();
        assert_eq!(stage.len(), unique.len());
    }
}

/// The same seed and action sequence must produce a byte-equal event log.
#[test]
fn deterministic_event_log() {
    let first = start_game_at_third_turn(default_deck(), default_deck());
    let second = start_game_at_third_turn(default_deck(), default_deck());

    let left = serde_json::to_string(first.game.events.records()).expect("serializes");
    let right = serde_json::to_string(second.game.events.records()).expect("serializes");
    assert_eq!(left, right);
}

#[test]
fn grab_events_returns_strictly_new_events() {
    let mut tg = start_game_at_third_turn(default_deck(), default_deck());
    let active = tg.game.active_player();
    tg.act(active, GameAction::MainStepEndTurn);

    let batch = tg.grab_events(tg.p1);
    assert!(!batch.is_empty());
    assert!(tg.grab_events(tg.p1).is_empty(), "second grab must be empty");
}

/// A voluntary mulligan reshuffles and redraws; each redraw after the
/// player's first costs one card of hand size.
#[test]
fn voluntary_mulligan_penalty_after_first_redraw() {
    let mut tg = create_game(DEFAULT_SEED, default_deck(), default_deck());
    let decision = tg.game.decision.clone().expect("mulligan pending");
    assert!(matches!(decision.kind, DecisionKind::Mulligan));
    let before = tg.game.player(decision.player).mulligan_count;

    tg.act(decision.player, GameAction::Mulligan { do_mulligan: true });
    let after = tg.game.player(decision.player).mulligan_count;
    assert!(after > before, "a redraw happened");
    // The most recent redraw drew 7 minus one per prior mulligan.
    let expected_hand = 7usize.saturating_sub(after as usize - 1);
    assert_eq!(tg.game.player(decision.player).hand.len(), expected_hand);

    run_setup(&mut tg);
    run_to_third_turn(&mut tg);
    assert_eq!(tg.game.status, GameStatus::Playing);
}

/// Cheer attached to a holomem exists in no zone list.
#[test]
fn attached_cheer_exists_nowhere_else() {
    let tg = start_game_at_third_turn(default_deck(), default_deck());
    for player in [PlayerName::One, PlayerName::Two] {
        let state = tg.game.player(player);
        for holomem in state.stage() {
            for &cheer in &tg.game.card(holomem).attached_cheer {
                assert!(!state.cheer_deck.contains(&cheer));
                assert!(!state.life.contains(&cheer));
                assert!(!state.archive.contains(&cheer));
                assert_eq!(tg.game.card(cheer).zone, Zone::Holomem);
            }
        }
    }
}

/// The opponent sees a drawing player's cards with masked identities, while
/// the drawer sees the real ones.
#[test]
fn hidden_draws_are_masked_for_the_opponent() {
    let mut tg = start_game_at_third_turn(default_deck(), default_deck());
    let p1 = tg.p1;
    let p2 = tg.p2;
    tg.act(p1, GameAction::MainStepEndTurn);

    let own_view = tg.grab_events(p2);
    let own_draw = common::find_event(&own_view, |event| {
        matches!(event, GameEvent::Draw { drawing_player, .. } if *drawing_player == p2)
    })
    .expect("drawer sees the draw");
    let GameEvent::Draw { drawn_cards, .. } = own_draw else { unreachable!() };
    assert_ne!(drawn_cards[0].card_id.as_str(), data::core::primitives::UNKNOWN_CARD_ID);
    let own_id = drawn_cards[0].game_card_id;

    let opponent_view = tg.grab_events(p1);
    let masked_draw = common::find_event(&opponent_view, |event| {
        matches!(event, GameEvent::Draw { drawing_player, .. } if *drawing_player == p2)
    })
    .expect("opponent sees the draw event");
    let GameEvent::Draw { drawn_cards, .. } = masked_draw else { unreachable!() };
    assert_eq!(drawn_cards[0].card_id.as_str(), data::core::primitives::UNKNOWN_CARD_ID);
    assert_eq!(drawn_cards[0].game_card_id, own_id, "stable ids survive masking");
}

/// Drawing from an empty deck loses the game on the spot.
#[test]
fn deck_out_loses_the_game() {
    let mut tg = start_game_at_third_turn(default_deck(), default_deck());
    let p2 = tg.p2;

    // Empty the opponent's deck so their next draw step fails.
    let deck = std::mem::take(&mut tg.game.player_mut(p2).deck);
    for id in deck {
        tg.game.card_mut(id).zone = Zone::Archive;
        tg.game.player_mut(p2).archive.push(id);
    }

    let active = tg.game.active_player();
    tg.act(active, GameAction::MainStepEndTurn);

    let events = tg.grab_events(tg.p1);
    let game_over = common::find_event(&events, |event| {
        matches!(event, GameEvent::GameOver { reason: GameOverReason::DeckOut, .. })
    });
    assert!(game_over.is_some(), "expected deck-out game over in {events:#?}");
    assert!(tg.game.is_over());
}
