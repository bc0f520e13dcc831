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

use data::actions::game_action::{CheerPlacement, GameAction};
use data::core::primitives::Zone;
use data::decisions::decision::{DecisionKind, SendCheerTarget};
use data::events::game_event::GameEvent;
use pretty_assertions::assert_eq;

use common::{begin_performance, deck_with, default_deck, find_event, start_game_at_third_turn};

/// Playing the archive recycler with an empty archive still asks, with an
/// empty option set and a zero minimum; submitting nothing archives the
/// support and returns to the main step.
#[test]
fn choose_cards_with_empty_archive() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP01-107", 2)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let support = tg.add_to_hand(p1, "hBP01-107");
    assert!(tg.game.player(p1).archive.is_empty());

    tg.act(p1, GameAction::MainStepPlaySupport { card_id: support });
    let events = tg.grab_events(p1);
    let decision_event = find_event(&events, |event| {
        matches!(
            event,
            GameEvent::DecisionChooseCards { amount_min: 0, amount_max: 3, cards_can_choose, .. }
                if cards_can_choose.is_empty()
        )
    });
    assert!(decision_event.is_some(), "expected an empty choose-cards decision in {events:#?}");

    tg.act(p1, GameAction::EffectResolutionChooseCardsForEffect { card_ids: vec![] });
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::MoveCard { from_zone: Zone::Floating, to_zone: Zone::Archive, card, .. }
            if card.game_card_id == support
    ))
    .is_some());
    assert!(find_event(&events, |event| matches!(event, GameEvent::DecisionMainStep { .. }))
        .is_some());
}

/// With archived cheer available, chosen cheer returns to the cheer deck.
#[test]
fn choose_cards_moves_cheer_back_to_cheer_deck() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP01-107", 2)]),
        default_deck(),
    );
    let p1 = tg.p1;

    // Archive five cheer from the cheer deck.
    for _ in 0..5 {
        let id = tg.game.player_mut(p1).cheer_deck.pop().expect("cheer");
        tg.game.card_mut(id).zone = Zone::Archive;
        tg.game.player_mut(p1).archive.insert(0, id);
    }
    let cheer_deck_before = tg.game.player(p1).cheer_deck.len();
    let support = tg.add_to_hand(p1, "hBP01-107");

    tg.act(p1, GameAction::MainStepPlaySupport { card_id: support });
    let decision = tg.game.decision.clone().expect("choose cards pending");
    let DecisionKind::ChooseCards { cards_can_choose, amount_min, .. } = decision.kind else {
        panic!("expected choose cards");
    };
    assert_eq!(amount_min, 1);
    assert_eq!(cards_can_choose.len(), 5);

    let chosen: Vec<_> = cards_can_choose[..3].to_vec();
    tg.act(p1, GameAction::EffectResolutionChooseCardsForEffect { card_ids: chosen.clone() });

    let events = tg.grab_events(p1);
    let moves = events
        .iter()
        .filter(|event| {
            matches!(
                &event.event,
                GameEvent::MoveCard { from_zone: Zone::Archive, to_zone: Zone::CheerDeck, .. }
            )
        })
        .count();
    assert_eq!(moves, 3);
    assert_eq!(tg.game.player(p1).cheer_deck.len(), cheer_deck_before + 3);
    assert_eq!(tg.game.player(p1).archive.len(), 2 + 1, "two cheer and the spent support");
}

/// With the wrong oshi the choice branch is unavailable: the die roll path
/// resolves alone, and with no opposing cheer nothing else happens.
#[test]
fn die_roll_support_with_wrong_oshi() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP01-110", 2)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let p2 = tg.p2;
    tg.queue_die_rolls(&[1, 1]);
    let center = tg.center(p2);
    tg.game.card_mut(center).attached_cheer.clear();

    let support = tg.add_to_hand(p1, "hBP01-110");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: support });

    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::RollDie { die_result: 1, rigged: false, .. }
    ))
    .is_some());
    assert!(
        find_event(&events, |event| matches!(event, GameEvent::DecisionChoice { .. })).is_none(),
        "no choice without the matching oshi"
    );
    assert!(
        find_event(&events, |event| matches!(event, GameEvent::DecisionSendCheer { .. }))
            .is_none(),
        "no cheer to move"
    );
    assert!(find_event(&events, |event| matches!(event, GameEvent::DecisionMainStep { .. }))
        .is_some());
}

/// With the matching oshi the player may choose the once-per-turn oshi
/// skill path, which archives two cheer from the opponent's center; a second
/// copy the same turn skips the choice because the skill is spent.
#[test]
fn die_roll_support_with_oshi_skill_path() {
    let mut tg = start_game_at_third_turn(
        deck_with("hBP01-002", &[("hBP01-110", 3)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let p2 = tg.p2;
    tg.queue_die_rolls(&[1, 1]);
    tg.generate_holopower(p1, 2);

    let p2_center = tg.center(p2);
    let extra = tg.spawn_cheer(p2, p2_center, "hY01-001");
    let p2_back = tg.put_in_backstage(p2, "hSD01-004");
    let back_cheer = tg.spawn_cheer(p2, p2_back, "hY01-001");
    let center_cheer_count = tg.game.card(p2_center).attached_cheer.len();
    assert!(center_cheer_count >= 2);

    let support = tg.add_to_hand(p1, "hBP01-110");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: support });
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(event, GameEvent::DecisionChoice { .. }))
        .is_some());

    // Branch 0: activate the Replacement skill.
    tg.act(p1, GameAction::EffectResolutionMakeChoice { choice_index: 0 });
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::OshiSkillActivation { skill_id, .. } if skill_id == "replacement"
    ))
    .is_some());

    let decision = tg.game.decision.clone().expect("send cheer pending");
    let DecisionKind::SendCheer { amount_min: 2, amount_max: 2, from_options, .. } = decision.kind
    else {
        panic!("expected a two-cheer decision");
    };
    // Center-only: the backstage cheer is not an option.
    assert_eq!(from_options.len(), center_cheer_count);
    assert!(!from_options.contains(&back_cheer));
    assert!(from_options.contains(&extra));

    tg.act(
        p1,
        GameAction::EffectResolutionMoveCheerBetweenHolomems {
            placements: from_options[..2]
                .iter()
                .map(|&cheer_id| CheerPlacement { cheer_id, to: SendCheerTarget::Archive })
                .collect(),
        },
    );
    assert_eq!(tg.game.player(p2).archive.len(), 2);
    assert_eq!(tg.game.player(p1).holopower.len(), 0, "skill cost was paid");

    // Second copy, limited flag cleared: the skill is spent, so the die
    // path resolves without a choice and finds the backstage cheer.
    tg.game.player_mut(p1).used_limited_this_turn = false;
    tg.clear_events();
    let second = tg.add_to_hand(p1, "hBP01-110");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: second });

    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(event, GameEvent::DecisionChoice { .. }))
        .is_none());
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::RollDie { die_result: 1, rigged: false, .. }
    ))
    .is_some());
    let decision = tg.game.decision.clone().expect("send cheer pending");
    let DecisionKind::SendCheer { amount_min: 1, amount_max: 1, from_options, .. } = decision.kind
    else {
        panic!("expected a one-cheer decision");
    };
    assert!(from_options.contains(&back_cheer));
}

/// A limited support cannot be played twice in one turn.
#[test]
fn limited_support_once_per_turn() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP01-110", 2)]),
        default_deck(),
    );
    let p1 = tg.p1;
    tg.queue_die_rolls(&[2, 2]);

    let first = tg.add_to_hand(p1, "hBP01-110");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: first });
    tg.clear_events();

    let second = tg.add_to_hand(p1, "hBP01-110");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: second });
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(event, GameEvent::GameError { .. })).is_some());
    assert!(tg.game.player(p1).hand.contains(&second));
}

/// The mascot attaches to a chosen holomem and boosts its arts by 10.
#[test]
fn mascot_attaches_and_boosts_power() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP01-116", 3)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let center = tg.center(p1);
    let base_power = tg.game.printed(center).arts[0].power;
    let art_id = tg.game.printed(center).arts[0].art_id.clone();

    let support = tg.add_to_hand(p1, "hBP01-116");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: support });
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::DecisionChooseHolomemForEffect { .. }
    ))
    .is_some());

    tg.act(p1, GameAction::EffectResolutionChooseCardsForEffect { card_ids: vec![center] });
    assert_eq!(tg.game.card(center).attached_support, vec![support]);
    assert_eq!(tg.game.card(support).zone, Zone::Holomem);

    let target = tg.center(tg.p2);
    begin_performance(&mut tg);
    tg.clear_events();
    tg.act(
        p1,
        GameAction::PerformanceStepUseArt {
            performer_id: center,
            art_id: art_id.clone(),
            target_id: target,
        },
    );

    let events = tg.grab_events(p1);
    common::assert_events_contain(&events, &[
        &GameEvent::BoostStat {
            card_id: center,
            stat: data::effects::effect::StatKind::Power,
            amount: 10,
        },
        &GameEvent::PerformArt {
            performer_id: center,
            art_id,
            target_id: target,
            power: base_power + 10,
        },
    ]);
}

/// The switch support swaps a non-resting backstage holomem into the
/// center, excluding resting ones from the options.
#[test]
fn switch_support_excludes_resting_backstage() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP01-106", 2)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let resting = tg.put_in_backstage(p1, "hSD01-004");
    tg.game.card_mut(resting).resting = true;
    let ready = tg.put_in_backstage(p1, "hSD01-003");

    let support = tg.add_to_hand(p1, "hBP01-106");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: support });

    let decision = tg.game.decision.clone().expect("swap decision pending");
    let DecisionKind::SwapHolomemToCenter { cards_can_choose } = decision.kind else {
        panic!("expected swap decision");
    };
    assert!(!cards_can_choose.contains(&resting));
    assert!(cards_can_choose.contains(&ready));

    tg.act(p1, GameAction::EffectResolutionChooseCardsForEffect { card_ids: vec![ready] });
    assert_eq!(tg.game.player(p1).center, Some(ready));
}
