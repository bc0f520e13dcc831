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
use data::core::numerics::Damage;
use data::decisions::decision::{DecisionKind, SendCheerTarget};
use data::effects::effect::{CheerDestination, CheerSource};
use data::events::game_event::GameEvent;
use pretty_assertions::assert_eq;

use common::{begin_performance, deck_with, default_deck, find_event, start_game_at_third_turn};

/// Using an art emits the art with its final power, the damage, then the
/// automatic end-of-turn chain when no further art is possible.
#[test]
fn art_deals_printed_power() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP02-020", 3)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let performer_id = tg.put_in_center(p1, "hBP02-020");
    tg.spawn_cheer(p1, performer_id, "hY02-001");
    tg.spawn_cheer(p1, performer_id, "hY03-001");
    let target_id = tg.center(tg.p2);

    begin_performance(&mut tg);
    tg.clear_events();
    tg.act(
        p1,
        GameAction::PerformanceStepUseArt {
            performer_id,
            art_id: "royalhalusleepover".to_string(),
            target_id,
        },
    );

    let events = tg.grab_events(p1);
    common::assert_events_contain(&events, &[
        &GameEvent::PerformArt {
            performer_id,
            art_id: "royalhalusleepover".to_string(),
            target_id,
            power: 50,
        },
    ]);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::DamageDealt { damage: 50, special: false, target_id: t, .. } if *t == target_id
    ))
    .is_some());
    // No other art remains, so the turn ends in the same batch.
    assert!(find_event(&events, |event| matches!(event, GameEvent::EndTurn { .. })).is_some());
    assert!(find_event(&events, |event| matches!(event, GameEvent::StartTurn { .. })).is_some());
    assert!(find_event(&events, |event| matches!(event, GameEvent::CheerStep { .. })).is_some());
    assert_eq!(tg.game.card(target_id).damage, Damage(50));
}

/// An art whose cost is not covered by attached cheer is rejected.
#[test]
fn art_requires_payable_cost() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP02-020", 3)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let performer_id = tg.put_in_center(p1, "hBP02-020");
    // Only an "any" cheer: the green requirement is unmet.
    tg.spawn_cheer(p1, performer_id, "hY01-001");
    let target_id = tg.center(tg.p2);

    begin_performance(&mut tg);
    tg.clear_events();
    tg.act(
        p1,
        GameAction::PerformanceStepUseArt {
            performer_id,
            art_id: "royalhalusleepover".to_string(),
            target_id,
        },
    );

    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(event, GameEvent::GameError { .. })).is_some());
    assert_eq!(tg.game.card(target_id).damage, Damage(0));
}

/// Downing a holomem consumes a life card, which the defender distributes.
/// The batch is exactly art, damage, the two down events, then the
/// life decision, with no other events in between.
#[test]
fn down_consumes_life_and_asks_for_distribution() {
    let mut tg = start_game_at_third_turn(default_deck(), default_deck());
    let p1 = tg.p1;
    let p2 = tg.p2;

    let performer_id = tg.center(p1);
    tg.spawn_cheer(p1, performer_id, "hY01-001");
    let target_id = tg.put_in_center(p2, "hSD01-003");
    tg.put_in_backstage(p2, "hSD01-004");
    tg.game.card_mut(target_id).damage = Damage(50);

    begin_performance(&mut tg);
    tg.clear_events();
    let art_id = first_art(&tg, performer_id);
    let art_power = tg.game.printed(performer_id).arts[0].power;
    let life_top = tg.game.player(p2).life[0];
    let survivors: Vec<SendCheerTarget> = tg
        .game
        .player(p2)
        .backstage
        .iter()
        .copied()
        .map(SendCheerTarget::Holomem)
        .collect();
    tg.act(
        p1,
        GameAction::PerformanceStepUseArt { performer_id, art_id: art_id.clone(), target_id },
    );

    let events = tg.grab_events(p1);
    common::assert_event_sequence(&events, &[
        GameEvent::PerformArt { performer_id, art_id, target_id, power: art_power },
        GameEvent::DamageDealt {
            target_id,
            target_player: p2,
            damage: art_power,
            special: false,
            died: true,
            game_over: false,
            life_lost: 1,
            life_loss_prevented: false,
        },
        GameEvent::DownedHolomemBefore { target_id },
        GameEvent::DownedHolomem { target_id, target_player: p2, life_lost: 1, game_over: false },
        GameEvent::DecisionSendCheer {
            effect_player: p2,
            amount_min: 1,
            amount_max: 1,
            from_zone: CheerSource::Life,
            to_zone: CheerDestination::Holomem,
            from_options: vec![life_top],
            to_options: survivors,
        },
    ]);

    // The downed card is in the archive in the same batch.
    assert!(tg.game.player(p2).archive.contains(&target_id));

    // Defender distributes the life cheer.
    let decision = tg.game.decision.clone().expect("life distribution pending");
    assert_eq!(decision.player, p2);
    let DecisionKind::SendCheer { from_options, to_options, .. } = decision.kind else {
        panic!("expected send cheer decision");
    };
    assert_eq!(from_options.len(), 1);
    let target = *to_options.first().expect("survivor");
    tg.act(
        p2,
        GameAction::EffectResolutionMoveCheerBetweenHolomems {
            placements: vec![CheerPlacement { cheer_id: from_options[0], to: target }],
        },
    );
    assert_eq!(tg.game.player(p2).life.len(), 4);
    let SendCheerTarget::Holomem(survivor) = target else {
        panic!("life goes to a holomem");
    };
    assert!(tg.game.card(survivor).attached_cheer.contains(&from_options[0]));
}

/// Revenge damage from an attached mascot resolves before the incoming art
/// damage; if it downs the attacker, that side's life decision resolves
/// first, and the performance step survives when a collab remains.
#[test]
fn revenge_damage_resolves_before_art_damage() {
    let mut tg = start_game_at_third_turn(
        deck_with("hSD01-001", &[("hBP01-010", 2), ("hBP01-116", 3)]),
        default_deck(),
    );
    let p1 = tg.p1;
    let p2 = tg.p2;

    // Kanata in p1's center with the mascot attached.
    let kanata = tg.put_in_center(p1, "hBP01-010");
    let upao = tg.add_to_hand(p1, "hBP01-116");
    tg.act(p1, GameAction::MainStepPlaySupport { card_id: upao });
    tg.act(p1, GameAction::EffectResolutionChooseCardsForEffect { card_ids: vec![kanata] });
    assert_eq!(tg.game.card(kanata).attached_support, vec![upao]);
    tg.act(p1, GameAction::MainStepEndTurn);

    // p2's cheer step: attach to the center.
    let decision = tg.game.decision.clone().expect("cheer step");
    let DecisionKind::SendCheer { from_options, to_options, .. } = decision.kind else {
        panic!("expected cheer step decision");
    };
    tg.act(
        p2,
        GameAction::EffectResolutionMoveCheerBetweenHolomems {
            placements: vec![CheerPlacement { cheer_id: from_options[0], to: to_options[0] }],
        },
    );

    // p2's attacker is 20 damage from downed; give p2 a collab so the
    // performance step can continue afterwards.
    let attacker = tg.center(p2);
    tg.game.card_mut(attacker).damage = Damage(tg.game.printed(attacker).hp.unwrap() - 20);
    tg.put_in_backstage(p2, "hSD01-004");
    let p2_collab = tg.move_backstage_to_collab(p2);
    tg.spawn_cheer(p2, p2_collab, "hY01-001");
    tg.put_in_backstage(p1, "hSD01-003");
    let p1_collab = tg.move_backstage_to_collab(p1);

    begin_performance(&mut tg);
    tg.clear_events();
    let art_id = first_art(&tg, attacker);
    let art_power = tg.game.printed(attacker).arts[0].power;
    tg.act(
        p2,
        GameAction::PerformanceStepUseArt { performer_id: attacker, art_id, target_id: kanata },
    );

    // Revenge special damage lands on the attacker before the incoming
    // damage is applied to kanata.
    let events = tg.grab_events(p1);
    let damage_events: Vec<&GameEvent> = events
        .iter()
        .map(|event| &event.event)
        .filter(|event| matches!(event, GameEvent::DamageDealt { .. }))
        .collect();
    assert!(matches!(
        damage_events[0],
        GameEvent::DamageDealt { target_id, damage: 20, special: true, died: true, .. }
            if *target_id == attacker
    ));
    assert_eq!(damage_events.len(), 1, "art damage waits on the life decision");

    // The attacker's side distributes life before the defender's damage.
    let decision = tg.game.decision.clone().expect("attacker life decision");
    assert_eq!(decision.player, p2);
    let DecisionKind::SendCheer { from_options, .. } = decision.kind else {
        panic!("expected life distribution");
    };
    tg.act(
        p2,
        GameAction::EffectResolutionMoveCheerBetweenHolomems {
            placements: vec![CheerPlacement {
                cheer_id: from_options[0],
                to: SendCheerTarget::Holomem(p2_collab),
            }],
        },
    );

    // Now the suspended art damage lands on kanata.
    let events = tg.grab_events(p1);
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::DamageDealt { target_id, damage, special: false, .. }
            if *target_id == kanata && *damage == art_power
    ))
    .is_some());
    // Both sides still have a collab, so the performance step continues.
    assert!(find_event(&events, |event| matches!(
        event,
        GameEvent::DecisionPerformanceStep { .. }
    ))
    .is_some());
    assert!(tg.game.player(p1).collab == Some(p1_collab));
    assert_eq!(tg.game.card(kanata).damage, Damage(art_power));
}

fn first_art(tg: &common::TestGame, performer: data::core::primitives::CardId) -> String {
    tg.game.printed(performer).arts[0].art_id.clone()
}
