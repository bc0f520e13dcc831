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

//! The effect interpreter.
//!
//! Effects live on a LIFO stack; [resolve_stack] drains it until it is empty,
//! a decision pauses resolution, or the game ends. Every pause records the
//! remaining work back on the stack first, so answering the decision resumes
//! from exactly where resolution stopped.

use std::collections::VecDeque;

use data::core::primitives::{CardId, CardType, Zone};
use data::decisions::decision::{Decision, DecisionKind, SendCheerTarget};
use data::effects::effect::{
    CardFilter, CheerDestination, CheerSource, Condition, DamageTarget, Effect, EffectDescriptor,
    StageSlot, StatKind,
};
use data::effects::effect_context::{EffectContext, EffectStackEntry};
use data::events::game_event::{CardRef, GameEvent};
use data::game_states::game_state::GameState;
use utils::outcome::Outcome;
use utils::{fail, outcome};

use crate::effects::dice;
use crate::mutations::cards::Placement;
use crate::mutations::{cards, cheer, damage, oshi};
use crate::queries::card_queries;

/// Drains the effect stack from the top.
pub fn resolve_stack(game: &mut GameState) -> Outcome {
    while let Some(entry) = game.effect_stack.pop() {
        match entry {
            EffectStackEntry::Effects { mut effects, context } => {
                let Some(descriptor) = effects.pop_front() else {
                    continue;
                };
                resolve_descriptor(game, descriptor, effects, context)?;
            }
            EffectStackEntry::ArtDamage => apply_art_damage(game)?,
            EffectStackEntry::CleanupSupport { card } => cleanup_support(game, card)?,
        }
    }
    outcome::OK
}

/// Evaluates a single condition against the current state and context.
pub fn condition_met(game: &GameState, condition: &Condition, context: &EffectContext) -> bool {
    match condition {
        Condition::HolderIsCard { card_id } => context
            .holder
            .map_or(false, |holder| game.card(holder).card_name == *card_id),
        Condition::OshiIsCard { card_id } => {
            game.card(game.player(context.owner).oshi).card_name == *card_id
        }
        Condition::OshiSkillReady { skill_id } => {
            card_queries::oshi_skill_ready(game, context.owner, skill_id)
        }
        Condition::OpponentHasCollab => game.player(context.owner.opponent()).collab.is_some(),
        Condition::DieResultIn { values } => {
            context.die_result.map_or(false, |result| values.contains(&result))
        }
    }
}

fn resolve_descriptor(
    game: &mut GameState,
    descriptor: EffectDescriptor,
    rest: VecDeque<EffectDescriptor>,
    mut context: EffectContext,
) -> Outcome {
    if let Some(condition) = &descriptor.condition {
        if !condition_met(game, condition, &context) {
            push_rest(game, rest, context);
            return outcome::OK;
        }
    }

    match descriptor.effect {
        Effect::RollDie => {
            let result = dice::roll_die(game, context.owner);
            context.die_result = Some(result);
            push_rest(game, rest, context);
            outcome::OK
        }

        Effect::DealDamage { amount, special, target } => {
            let target_id = damage_target(game, &context, target);
            push_rest(game, rest, context);
            match target_id {
                Some(id) => damage::deal_damage(game, id, amount, special),
                None => outcome::OK,
            }
        }

        Effect::BoostStat { stat: StatKind::Power, amount } => {
            push_rest(game, rest, context);
            if let Some(art) = &mut game.performance {
                art.boost += amount;
                let card_id = art.performer;
                game.emit(GameEvent::BoostStat { card_id, stat: StatKind::Power, amount });
            }
            outcome::OK
        }

        Effect::MoveCard { from_zone, to_zone, amount } => {
            let owner = context.owner;
            push_rest(game, rest, context);
            for _ in 0..amount {
                let top = match from_zone {
                    Zone::Deck => game.player(owner).deck.last().copied(),
                    Zone::CheerDeck => game.player(owner).cheer_deck.last().copied(),
                    Zone::Archive => game.player(owner).archive.first().copied(),
                    _ => fail!("Unsupported move_card source {from_zone:?}"),
                };
                let Some(id) = top else {
                    break;
                };
                cards::remove_card(game, id)?;
                cards::add_card(game, id, to_zone, Placement::Top)?;
                emit_move(game, id, from_zone, to_zone);
            }
            outcome::OK
        }

        Effect::AttachCard => {
            let Some(holomem) = context.chosen_holomem else {
                fail!("attach_card requires a chosen holomem");
            };
            let source = context.source;
            push_rest(game, rest, context);
            cheer::attach_support(game, source, holomem)
        }

        Effect::SendCheer { amount_min, amount_max, from_zone, to_zone, source_slots } => {
            let from_options = send_cheer_sources(game, &context, from_zone, &source_slots);
            let owner = context.owner;
            push_rest(game, rest, context);
            if from_options.is_empty() {
                return outcome::OK;
            }

            let to_options: Vec<SendCheerTarget> = match to_zone {
                CheerDestination::Holomem => {
                    game.player(owner).stage().map(SendCheerTarget::Holomem).collect()
                }
                CheerDestination::Archive => vec![SendCheerTarget::Archive],
            };
            let amount_min = amount_min.min(from_options.len() as u32);
            let amount_max = amount_max.min(from_options.len() as u32);

            game.decision = Some(Decision {
                player: owner,
                kind: DecisionKind::SendCheer {
                    amount_min,
                    amount_max,
                    from_zone,
                    to_zone,
                    from_options: from_options.clone(),
                    to_options: to_options.clone(),
                },
                context: None,
            });
            game.emit(GameEvent::DecisionSendCheer {
                effect_player: owner,
                amount_min,
                amount_max,
                from_zone,
                to_zone,
                from_options,
                to_options,
            });
            outcome::DECISION
        }

        Effect::ChooseCards {
            from_zone,
            to_zone,
            filter,
            amount_min,
            amount_max,
            reveal_chosen,
            remaining_cards_action,
        } => {
            let cards_can_choose = filtered_zone_cards(game, &context, from_zone, filter);
            let owner = context.owner;
            push_rest(game, rest, context);

            let amount_min = amount_min.min(cards_can_choose.len() as u32);
            game.decision = Some(Decision {
                player: owner,
                kind: DecisionKind::ChooseCards {
                    cards_can_choose: cards_can_choose.clone(),
                    amount_min,
                    amount_max,
                    from_zone,
                    to_zone,
                    reveal_chosen,
                    remaining_cards_action,
                },
                context: None,
            });
            game.emit(GameEvent::DecisionChooseCards {
                effect_player: owner,
                cards_can_choose,
                amount_min,
                amount_max,
                from_zone,
                to_zone,
                reveal_chosen,
                remaining_cards_action,
            });
            outcome::DECISION
        }

        Effect::ChooseHolomemForEffect { slots, chosen_effect } => {
            let cards_can_choose = stage_holomem_in_slots(game, &context, &slots);
            let owner = context.owner;
            push_rest(game, rest, context.clone());
            if cards_can_choose.is_empty() {
                return outcome::OK;
            }

            game.decision = Some(Decision {
                player: owner,
                kind: DecisionKind::ChooseHolomemForEffect {
                    cards_can_choose: cards_can_choose.clone(),
                    chosen_effect,
                },
                context: Some(context),
            });
            game.emit(GameEvent::DecisionChooseHolomemForEffect {
                effect_player: owner,
                cards_can_choose,
            });
            outcome::DECISION
        }

        Effect::SwapHolomemToCenter { allow_resting } => {
            let owner = context.owner;
            let cards_can_choose: Vec<CardId> = game
                .player(owner)
                .backstage
                .iter()
                .copied()
                .filter(|&id| allow_resting || !game.card(id).resting)
                .collect();
            push_rest(game, rest, context);
            if cards_can_choose.is_empty() {
                return outcome::OK;
            }

            game.decision = Some(Decision {
                player: owner,
                kind: DecisionKind::SwapHolomemToCenter {
                    cards_can_choose: cards_can_choose.clone(),
                },
                context: None,
            });
            game.emit(GameEvent::DecisionSwapHolomemToCenter {
                effect_player: owner,
                cards_can_choose,
            });
            outcome::DECISION
        }

        Effect::MakeChoice { choices } => {
            let available: Vec<_> = choices
                .into_iter()
                .filter(|choice| {
                    choice
                        .condition
                        .as_ref()
                        .map_or(true, |condition| condition_met(game, condition, &context))
                })
                .collect();
            let owner = context.owner;
            push_rest(game, rest, context.clone());

            match available.len() {
                0 => outcome::OK,
                // A single available branch resolves without asking.
                1 => {
                    if let Some(branch) = available.into_iter().next() {
                        game.effect_stack
                            .push(EffectStackEntry::effects(&branch.effects, context));
                    }
                    outcome::OK
                }
                _ => {
                    let descriptions =
                        available.iter().map(|choice| choice.description.clone()).collect();
                    game.decision = Some(Decision {
                        player: owner,
                        kind: DecisionKind::Choice { choices: available },
                        context: Some(context),
                    });
                    game.emit(GameEvent::DecisionChoice {
                        effect_player: owner,
                        choices: descriptions,
                    });
                    outcome::DECISION
                }
            }
        }

        Effect::OshiSkillUse { skill_id } => {
            let owner = context.owner;
            push_rest(game, rest, context);
            oshi::activate_skill(game, owner, &skill_id)
        }
    }
}

fn push_rest(game: &mut GameState, rest: VecDeque<EffectDescriptor>, context: EffectContext) {
    if !rest.is_empty() {
        game.effect_stack.push(EffectStackEntry::Effects { effects: rest, context });
    }
}

/// Applies the damage of the art currently resolving.
fn apply_art_damage(game: &mut GameState) -> Outcome {
    let Some(art) = game.performance.clone() else {
        return outcome::OK;
    };
    // The target can already be gone if a pre-damage trigger downed it.
    if !game.card(art.target).zone.is_stage() {
        return outcome::OK;
    }
    damage::deal_damage(game, art.target, art.total_power(), false)
}

/// Archives a support card left floating after its effects drained.
fn cleanup_support(game: &mut GameState, card: CardId) -> Outcome {
    if game.card(card).zone != Zone::Floating {
        return outcome::OK;
    }
    cards::remove_card(game, card)?;
    cards::add_card(game, card, Zone::Archive, Placement::Top)?;
    emit_move(game, card, Zone::Floating, Zone::Archive);
    outcome::OK
}

fn emit_move(game: &mut GameState, id: CardId, from_zone: Zone, to_zone: Zone) {
    let owner = game.card(id).owner;
    let card = CardRef { game_card_id: id, card_id: game.card(id).card_name.clone() };
    if to_zone.is_public() || from_zone.is_public() {
        game.emit(GameEvent::MoveCard { moving_player: owner, from_zone, to_zone, card });
    } else {
        game.emit_hidden(
            GameEvent::MoveCard { moving_player: owner, from_zone, to_zone, card },
            enumset::EnumSet::empty(),
        );
    }
}

fn damage_target(
    game: &GameState,
    context: &EffectContext,
    target: DamageTarget,
) -> Option<CardId> {
    match target {
        DamageTarget::Attacker => context.attacker,
        DamageTarget::OpponentCenter => game.player(context.owner.opponent()).center,
        DamageTarget::OpponentCollab => game.player(context.owner.opponent()).collab,
    }
}

fn send_cheer_sources(
    game: &GameState,
    context: &EffectContext,
    from_zone: CheerSource,
    source_slots: &[StageSlot],
) -> Vec<CardId> {
    let holomem_cheer = |player| {
        stage_in_slots(game, player, source_slots)
            .into_iter()
            .flat_map(|holomem| game.card(holomem).attached_cheer.clone())
            .collect::<Vec<_>>()
    };
    match from_zone {
        CheerSource::OpponentHolomem => holomem_cheer(context.owner.opponent()),
        CheerSource::OwnHolomem => holomem_cheer(context.owner),
        CheerSource::Life => game.player(context.owner).life.clone(),
        CheerSource::CheerDeck => cards::cheer_deck_top(game, context.owner).into_iter().collect(),
        CheerSource::Archive => game
            .player(context.owner)
            .archive
            .iter()
            .copied()
            .filter(|&id| game.printed(id).card_type == CardType::Cheer)
            .collect(),
    }
}

fn filtered_zone_cards(
    game: &GameState,
    context: &EffectContext,
    from_zone: Zone,
    filter: CardFilter,
) -> Vec<CardId> {
    let player = game.player(context.owner);
    let zone_cards: Vec<CardId> = match from_zone {
        Zone::Archive => player.archive.clone(),
        Zone::Hand => player.hand.clone(),
        Zone::Deck => player.deck.clone(),
        _ => vec![],
    };
    zone_cards
        .into_iter()
        .filter(|&id| match filter {
            CardFilter::Any => true,
            CardFilter::Cheer => game.printed(id).card_type == CardType::Cheer,
            CardFilter::Holomem => game.printed(id).is_holomem(),
        })
        .collect()
}

fn stage_holomem_in_slots(
    game: &GameState,
    context: &EffectContext,
    slots: &[StageSlot],
) -> Vec<CardId> {
    stage_in_slots(game, context.owner, slots)
}

fn stage_in_slots(
    game: &GameState,
    player: data::core::primitives::PlayerName,
    slots: &[StageSlot],
) -> Vec<CardId> {
    let state = game.player(player);
    let include = |slot: StageSlot| slots.is_empty() || slots.contains(&slot);
    let mut result = vec![];
    if include(StageSlot::Center) {
        result.extend(state.center);
    }
    if include(StageSlot::Collab) {
        result.extend(state.collab);
    }
    if include(StageSlot::Backstage) {
        result.extend(state.backstage.iter().copied());
    }
    result
}
