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

//! Handlers answering outstanding decisions.
//!
//! Answers are validated against the options the decision advertised before
//! anything mutates; a bad answer leaves the decision pending.

use data::actions::game_action::CheerPlacement;
use data::core::primitives::{CardId, CardType, PlayerName, Zone};
use data::decisions::decision::DecisionKind;
use data::effects::effect::RemainingCardsAction;
use data::effects::effect_context::{EffectContext, EffectStackEntry};
use data::events::game_event::{CardRef, GameEvent};
use data::game_states::game_state::GameState;
use utils::outcome;
use utils::outcome::Outcome;

use crate::action_handlers::actions::{after_action, reject};
use crate::effects::resolve;
use crate::mutations::cards::Placement;
use crate::mutations::{cards, cheer, stage};
use crate::setup::new_match;

/// Answers the mulligan decision.
pub fn mulligan(game: &mut GameState, player: PlayerName, do_mulligan: bool) -> Outcome {
    game.decision = None;
    game.emit(GameEvent::MulliganDecision { active_player: player, do_mulligan });
    if do_mulligan {
        new_match::perform_mulligan(game, player)?;
        // A redraw can itself come up with no debut holomem, which forces
        // further redraws before this player's mulligan completes.
        new_match::force_mulligans(game, player)?;
    }
    new_match::mulligan_completed(game, player)
}

/// Answers the initial placement decision.
pub fn initial_placement(
    game: &mut GameState,
    player: PlayerName,
    center_id: CardId,
    backstage_ids: Vec<CardId>,
) -> Outcome {
    let hand = &game.player(player).hand;
    let valid = hand.contains(&center_id)
        && game.printed(center_id).card_type == CardType::HolomemDebut
        && backstage_ids.len() <= data::player_states::player_state::PlayerState::MAX_BACKSTAGE
        && backstage_ids.iter().all(|id| {
            *id != center_id
                && hand.contains(id)
                && matches!(
                    game.printed(*id).card_type,
                    CardType::HolomemDebut | CardType::HolomemSpot
                )
        })
        && !has_duplicates(&backstage_ids);
    if !valid {
        reject(game, player, "invalid_placement", "Invalid initial placement");
        return outcome::OK;
    }

    game.decision = None;
    cards::remove_card(game, center_id)?;
    game.card_mut(center_id).zone = Zone::Center;
    game.player_mut(player).center = Some(center_id);
    for id in backstage_ids {
        cards::remove_card(game, id)?;
        game.card_mut(id).zone = Zone::Backstage;
        game.player_mut(player).backstage.push(id);
    }
    new_match::placement_completed(game, player)
}

/// Answers an outstanding branch choice.
pub fn make_choice(game: &mut GameState, player: PlayerName, choice_index: usize) -> Outcome {
    let Some(decision) = game.decision.clone() else {
        return outcome::OK;
    };
    let DecisionKind::Choice { choices } = decision.kind else {
        return outcome::OK;
    };
    if choice_index >= choices.len() {
        reject(game, player, "invalid_choice", "Choice index out of range");
        return outcome::OK;
    }
    let branch = choices[choice_index].clone();
    let context = decision.context.unwrap_or(EffectContext::new(player, CardId::default()));

    game.decision = None;
    game.effect_stack.push(EffectStackEntry::effects(&branch.effects, context));
    resolve::resolve_stack(game)?;
    after_action(game)
}

/// Answers card selection decisions: choose-cards, choose-holomem, and
/// swap-to-center.
pub fn choose_cards(game: &mut GameState, player: PlayerName, card_ids: Vec<CardId>) -> Outcome {
    let Some(decision) = game.decision.clone() else {
        return outcome::OK;
    };

    match decision.kind {
        DecisionKind::ChooseCards {
            cards_can_choose,
            amount_min,
            amount_max,
            from_zone,
            to_zone,
            reveal_chosen,
            remaining_cards_action,
        } => {
            let count = card_ids.len() as u32;
            if count < amount_min
                || count > amount_max
                || has_duplicates(&card_ids)
                || !card_ids.iter().all(|id| cards_can_choose.contains(id))
            {
                reject(game, player, "invalid_cards", "Invalid card selection");
                return outcome::OK;
            }

            game.decision = None;
            for &id in &card_ids {
                cards::remove_card(game, id)?;
                cards::add_card(game, id, to_zone, Placement::Top)?;
                if reveal_chosen {
                    game.card_mut(id).revealed_to = enumset::EnumSet::all();
                }
                emit_choice_move(game, id, from_zone, to_zone, reveal_chosen);
            }

            let remaining: Vec<CardId> = cards_can_choose
                .into_iter()
                .filter(|id| !card_ids.contains(id))
                .collect();
            apply_remaining(game, remaining, from_zone, remaining_cards_action)?;

            resolve::resolve_stack(game)?;
            after_action(game)
        }

        DecisionKind::ChooseHolomemForEffect { cards_can_choose, chosen_effect } => {
            if card_ids.len() != 1 || !cards_can_choose.contains(&card_ids[0]) {
                reject(game, player, "invalid_cards", "Exactly one holomem must be chosen");
                return outcome::OK;
            }
            let mut context = decision
                .context
                .unwrap_or(EffectContext::new(player, CardId::default()));
            context.chosen_holomem = Some(card_ids[0]);

            game.decision = None;
            game.effect_stack.push(EffectStackEntry::Effects {
                effects: std::iter::once(*chosen_effect).collect(),
                context,
            });
            resolve::resolve_stack(game)?;
            after_action(game)
        }

        DecisionKind::SwapHolomemToCenter { cards_can_choose } => {
            if card_ids.len() != 1 || !cards_can_choose.contains(&card_ids[0]) {
                reject(game, player, "invalid_cards", "Exactly one holomem must be chosen");
                return outcome::OK;
            }
            game.decision = None;
            stage::swap_with_center(game, player, card_ids[0])?;
            game.emit(GameEvent::MoveCard {
                moving_player: player,
                from_zone: Zone::Backstage,
                to_zone: Zone::Center,
                card: CardRef {
                    game_card_id: card_ids[0],
                    card_id: game.card(card_ids[0]).card_name.clone(),
                },
            });
            resolve::resolve_stack(game)?;
            after_action(game)
        }

        _ => outcome::OK,
    }
}

/// Answers a send-cheer decision with one placement per moved cheer.
pub fn move_cheer(
    game: &mut GameState,
    player: PlayerName,
    placements: Vec<CheerPlacement>,
) -> Outcome {
    let Some(decision) = game.decision.clone() else {
        return outcome::OK;
    };
    let DecisionKind::SendCheer { amount_min, amount_max, from_options, to_options, .. } =
        decision.kind
    else {
        return outcome::OK;
    };

    let count = placements.len() as u32;
    let cheer_ids: Vec<CardId> = placements.iter().map(|p| p.cheer_id).collect();
    if count < amount_min
        || count > amount_max
        || has_duplicates(&cheer_ids)
        || !placements
            .iter()
            .all(|p| from_options.contains(&p.cheer_id) && to_options.contains(&p.to))
    {
        reject(game, player, "invalid_placements", "Invalid cheer placements");
        return outcome::OK;
    }

    game.decision = None;
    for placement in placements {
        cheer::send_cheer_to(game, placement.cheer_id, placement.to)?;
    }
    resolve::resolve_stack(game)?;
    after_action(game)
}

fn apply_remaining(
    game: &mut GameState,
    remaining: Vec<CardId>,
    from_zone: Zone,
    action: RemainingCardsAction,
) -> Outcome {
    match action {
        RemainingCardsAction::Nothing => outcome::OK,
        RemainingCardsAction::Archive => {
            for id in remaining {
                cards::remove_card(game, id)?;
                cards::add_card(game, id, Zone::Archive, Placement::Top)?;
                emit_choice_move(game, id, from_zone, Zone::Archive, true);
            }
            outcome::OK
        }
        RemainingCardsAction::TopOfDeck | RemainingCardsAction::BottomOfDeck => {
            let placement = if action == RemainingCardsAction::TopOfDeck {
                Placement::Top
            } else {
                Placement::Bottom
            };
            for id in remaining {
                cards::remove_card(game, id)?;
                cards::add_card(game, id, Zone::Deck, placement)?;
                emit_choice_move(game, id, from_zone, Zone::Deck, false);
            }
            outcome::OK
        }
    }
}

fn emit_choice_move(game: &mut GameState, id: CardId, from_zone: Zone, to_zone: Zone, public: bool) {
    let owner = game.card(id).owner;
    let card = CardRef { game_card_id: id, card_id: game.card(id).card_name.clone() };
    let event = GameEvent::MoveCard { moving_player: owner, from_zone, to_zone, card };
    if public || to_zone.is_public() || from_zone.is_public() {
        game.emit(event);
    } else {
        game.emit_hidden(event, enumset::EnumSet::only(owner));
    }
}

fn has_duplicates(ids: &[CardId]) -> bool {
    ids.iter().enumerate().any(|(index, id)| ids[..index].contains(id))
}
