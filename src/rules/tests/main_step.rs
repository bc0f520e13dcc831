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

use data::actions::game_action::GameAction;
use data::actions::legal_action::LegalAction;
use data::events::game_event::GameEvent;
use pretty_assertions::assert_eq;

use common::{default_deck, deck_with, find_event, start_game_at_third_turn};

/// A center with no attached cheer cannot baton pass; attaching one cheer
/// makes the action available.
#[test]
fn baton_pass_gated_on_attached_cheer() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP02-020", 3)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let center_id = tg.put_in_center(p1, "hBP02-020");
    tg.put_in_backstage(p1, "hSD01-004");

    let actions = tg.main_step_actions();
    assert!(
        !actions.contains(&LegalAction::BatonPass { center_id }),
        "baton pass should be unavailable with no cheer"
    );

    let cheer = tg.spawn_cheer(p1, center_id, "hY01-001");
    let actions = tg.main_step_actions();
    assert!(actions.contains(&LegalAction::BatonPass { center_id }));

    // Perform the pass: the cheer is archived and the backstage holomem
    // takes the center slot.
    let new_center_id = *tg.game.player(p1).backstage.last().expect("backstage");
    tg.act(
        p1,
        GameAction::MainStepBatonPass { new_center_id, cheer_ids: vec![cheer] },
    );
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::BatonPass { new_center_id: n, .. } if *n == new_center_id
    ))
    .is_some());
    assert_eq!(tg.game.player(p1).center, Some(new_center_id));
    assert_eq!(tg.game.card(tg.game.player(p1).archive[0]).card_name.as_str(), "hY01-001");
    assert!(tg.game.player(p1).baton_passed_this_turn);
}

/// Collabing with Marine deals 20 special damage to the opponent's collab
/// holomem, but only when they have one.
#[test]
fn collab_effect_conditional_on_opponent_collab() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP02-029", 1)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let p2 = tg.p2;
    let collab_card_id = tg.put_in_backstage(p1, "hBP02-029");
    tg.put_in_backstage(p2, "hSD01-004");
    let p2_collab = tg.move_backstage_to_collab(p2);

    tg.act(p1, GameAction::MainStepCollab { card_id: collab_card_id });
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::Collab { collab_card_id: c, .. } if *c == collab_card_id
    ))
    .is_some());
    let damage = find_event(&events, |event| matches!(
        event,
        GameEvent::DamageDealt { target_id, damage: 20, special: true, .. }
            if *target_id == p2_collab
    ));
    assert!(damage.is_some(), "expected special collab damage in {events:#?}");
    assert!(find_event(&events, |event| matches!(event, GameEvent::DecisionMainStep { .. }))
        .is_some());
}

#[test]
fn collab_effect_skipped_without_opponent_collab() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP02-029", 1)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let collab_card_id = tg.put_in_backstage(p1, "hBP02-029");
    assert!(tg.game.player(tg.p2).collab.is_none());

    tg.act(p1, GameAction::MainStepCollab { card_id: collab_card_id });
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(event, GameEvent::Collab { .. })).is_some());
    assert!(
        find_event(&events, |event| matches!(event, GameEvent::DamageDealt { .. })).is_none(),
        "no damage without an opposing collab"
    );
    // One deck card moved to holopower to pay for the collab.
    assert_eq!(tg.game.player(p1).holopower.len(), 1);
}

/// Collabing twice in one turn is rejected and leaves state unchanged.
#[test]
fn collab_once_per_turn() {
    let mut tg = start_game_at_third_turn(default_deck(), default_deck());
    let p1 = tg.p1;
    let first = tg.put_in_backstage(p1, "hSD01-004");
    let second = tg.put_in_backstage(p1, "hSD01-003");

    tg.act(p1, GameAction::MainStepCollab { card_id: first });
    tg.clear_events();
    tg.act(p1, GameAction::MainStepCollab { card_id: second });

    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(event, GameEvent::GameError { .. })).is_some());
    assert_eq!(tg.game.player(p1).collab, Some(first));
    assert!(tg.game.player(p1).backstage.contains(&second));
}

/// Blooming carries damage, cheer, and the underlying card along.
#[test]
fn bloom_preserves_attachments_and_damage() {
    let mut tg = start_game_at_third_turn(default_deck(), default_deck());
    let p1 = tg.p1;
    let target_id = tg.put_in_center(p1, "hSD01-003");
    let cheer = tg.spawn_cheer(p1, target_id, "hY01-001");
    tg.game.card_mut(target_id).damage = data::core::numerics::Damage(20);
    let card_id = tg.add_to_hand(p1, "hSD01-005");

    tg.act(p1, GameAction::MainStepBloom { card_id, target_id });

    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::Bloom { target_id: t, .. } if *t == target_id
    ))
    .is_some());
    assert_eq!(tg.game.player(p1).center, Some(card_id));
    let bloomed = tg.game.card(card_id);
    assert_eq!(bloomed.damage.0, 20);
    assert_eq!(bloomed.attached_cheer, vec![cheer]);
    assert_eq!(bloomed.bloomed_from, vec![target_id]);
    assert!(bloomed.bloomed_this_turn);

    // A holomem that bloomed this turn cannot bloom again.
    let second_bloom = tg.add_to_hand(p1, "hSD01-005");
    assert!(!tg
        .main_step_actions()
        .contains(&LegalAction::Bloom { card_id: second_bloom, target_id: card_id }));
}
