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

//! Top-level action execution.
//!
//! [execute] is the single entry point for player actions against a match.
//! Violations surface as a rejection event in the current batch and leave
//! state untouched; only genuine engine invariant failures propagate as
//! errors.

use data::actions::game_action::GameAction;
use data::actions::legal_action::LegalAction;
use data::core::primitives::{CardId, PlayerName, Zone};
use data::decisions::decision::DecisionKind;
use data::effects::effect::EffectTrigger;
use data::effects::effect_context::{EffectContext, EffectStackEntry};
use data::events::game_event::{CardRef, GameEvent};
use data::game_states::game_phase::GamePhase;
use data::game_states::game_state::GameState;
use data::game_states::performance_state::ArtInProgress;
use tracing::{debug, instrument};
use utils::outcome;
use utils::outcome::Outcome;
use utils::with_error::WithError;

use crate::action_handlers::decision_actions;
use crate::effects::{resolve, triggers};
use crate::legality::legal_actions;
use crate::mutations::{cards, oshi, stage};
use crate::steps::step;

/// Executes a player action against the match.
///
/// Decision and game-over suspensions are normal outcomes here; an `Err`
/// return is an engine invariant failure and the match should be aborted.
#[instrument(level = "debug", skip(game))]
pub fn execute(game: &mut GameState, player: PlayerName, action: GameAction) -> Outcome {
    if game.is_over() {
        reject(game, player, "game_over", "The game is over");
        return outcome::OK;
    }
    if let Err((error_id, message)) = validate(game, player, &action) {
        reject(game, player, error_id, &message);
        return outcome::OK;
    }

    debug!(?player, ?action, "Executing game action");
    match dispatch(game, player, action) {
        Ok(()) => outcome::OK,
        Err(stop) if stop.is_suspension() => outcome::OK,
        Err(error) => Err(error),
    }
}

/// Emits a rejection event without touching match state.
pub fn reject(game: &mut GameState, player: PlayerName, error_id: &str, message: &str) {
    debug!(?player, error_id, message, "Rejected game action");
    game.emit(GameEvent::GameError {
        error_player: player,
        error_id: error_id.to_string(),
        error_message: message.to_string(),
    });
}

/// Checks an action against the outstanding decision and the advertised
/// legal action set. Nothing client-supplied is trusted.
fn validate(
    game: &GameState,
    player: PlayerName,
    action: &GameAction,
) -> Result<(), (&'static str, String)> {
    let Some(decision) = &game.decision else {
        return Err(("no_decision", "No action is expected right now".to_string()));
    };
    if decision.player != player {
        return Err(("decision_pending", "Waiting on the other player".to_string()));
    }

    match (&decision.kind, action) {
        (DecisionKind::Mulligan, GameAction::Mulligan { .. }) => Ok(()),
        (DecisionKind::InitialPlacement, GameAction::InitialPlacement { .. }) => Ok(()),
        (DecisionKind::MainStep, _) => {
            let legal = legal_actions::main_actions(game, player);
            if main_action_is_legal(game, player, action, &legal) {
                Ok(())
            } else {
                Err(("invalid_action", format!("Illegal main step action {action:?}")))
            }
        }
        (DecisionKind::PerformanceStep, _) => {
            let legal = legal_actions::performance_menu(game, player);
            if performance_action_is_legal(action, &legal) {
                Ok(())
            } else {
                Err(("invalid_action", format!("Illegal performance step action {action:?}")))
            }
        }
        (DecisionKind::Choice { .. }, GameAction::EffectResolutionMakeChoice { .. }) => Ok(()),
        (
            DecisionKind::ChooseCards { .. } | DecisionKind::ChooseHolomemForEffect { .. }
            | DecisionKind::SwapHolomemToCenter { .. },
            GameAction::EffectResolutionChooseCardsForEffect { .. },
        ) => Ok(()),
        (
            DecisionKind::SendCheer { .. },
            GameAction::EffectResolutionMoveCheerBetweenHolomems { .. },
        ) => Ok(()),
        _ => Err(("invalid_action", "Action does not answer the outstanding decision".to_string())),
    }
}

fn main_action_is_legal(
    game: &GameState,
    player: PlayerName,
    action: &GameAction,
    legal: &[LegalAction],
) -> bool {
    match action {
        GameAction::MainStepPlaceHolomem { card_id } => {
            legal.contains(&LegalAction::PlaceHolomem { card_id: *card_id })
        }
        GameAction::MainStepBloom { card_id, target_id } => {
            legal.contains(&LegalAction::Bloom { card_id: *card_id, target_id: *target_id })
        }
        GameAction::MainStepCollab { card_id } => {
            legal.contains(&LegalAction::Collab { card_id: *card_id })
        }
        GameAction::MainStepBatonPass { new_center_id, cheer_ids } => {
            let Some(center_id) = game.player(player).center else {
                return false;
            };
            legal.contains(&LegalAction::BatonPass { center_id })
                && baton_pass_is_legal(game, player, center_id, *new_center_id, cheer_ids)
        }
        GameAction::MainStepPlaySupport { card_id } => {
            legal.contains(&LegalAction::PlaySupport { card_id: *card_id })
        }
        GameAction::MainStepOshiSkill { skill_id } => {
            legal.contains(&LegalAction::OshiSkill { skill_id: skill_id.clone() })
        }
        GameAction::MainStepBeginPerformance => legal.contains(&LegalAction::BeginPerformance),
        GameAction::MainStepEndTurn => legal.contains(&LegalAction::EndTurn),
        _ => false,
    }
}

fn baton_pass_is_legal(
    game: &GameState,
    player: PlayerName,
    center_id: CardId,
    new_center_id: CardId,
    cheer_ids: &[CardId],
) -> bool {
    let state = game.player(player);
    if !state.backstage.contains(&new_center_id) || game.card(new_center_id).resting {
        return false;
    }
    let cost = game.printed(center_id).baton_pass_cost.unwrap_or(0) as usize;
    let attached = &game.card(center_id).attached_cheer;
    cheer_ids.len() == cost
        && cheer_ids.iter().all(|id| attached.contains(id))
        && !has_duplicates(cheer_ids)
}

fn performance_action_is_legal(action: &GameAction, legal: &[LegalAction]) -> bool {
    match action {
        GameAction::PerformanceStepUseArt { performer_id, art_id, target_id } => {
            legal.iter().any(|entry| {
                matches!(entry, LegalAction::UseArt { performer_id: p, art_id: a, valid_targets }
                    if p == performer_id && a == art_id && valid_targets.contains(target_id))
            })
        }
        GameAction::PerformanceStepEndTurn => legal.contains(&LegalAction::PerformanceEndTurn),
        _ => false,
    }
}

fn has_duplicates(ids: &[CardId]) -> bool {
    ids.iter().enumerate().any(|(index, id)| ids[..index].contains(id))
}

fn dispatch(game: &mut GameState, player: PlayerName, action: GameAction) -> Outcome {
    match action {
        GameAction::Mulligan { do_mulligan } => {
            decision_actions::mulligan(game, player, do_mulligan)
        }
        GameAction::InitialPlacement { center_id, backstage_ids } => {
            decision_actions::initial_placement(game, player, center_id, backstage_ids)
        }
        GameAction::MainStepPlaceHolomem { card_id } => {
            game.decision = None;
            stage::place_holomem(game, player, card_id)?;
            after_action(game)
        }
        GameAction::MainStepBloom { card_id, target_id } => {
            game.decision = None;
            stage::bloom(game, player, card_id, target_id)?;
            after_action(game)
        }
        GameAction::MainStepCollab { card_id } => {
            game.decision = None;
            stage::collab(game, player, card_id)?;
            for discovered in
                triggers::discover(game, EffectTrigger::OnCollab, card_id, None).into_iter().rev()
            {
                game.effect_stack.push(EffectStackEntry::effects(
                    &discovered.effects,
                    discovered.context,
                ));
            }
            resolve::resolve_stack(game)?;
            after_action(game)
        }
        GameAction::MainStepBatonPass { new_center_id, cheer_ids } => {
            game.decision = None;
            stage::baton_pass(game, player, new_center_id, &cheer_ids)?;
            after_action(game)
        }
        GameAction::MainStepPlaySupport { card_id } => {
            game.decision = None;
            play_support(game, player, card_id)?;
            after_action(game)
        }
        GameAction::MainStepOshiSkill { skill_id } => {
            game.decision = None;
            oshi::activate_skill(game, player, &skill_id)?;
            resolve::resolve_stack(game)?;
            after_action(game)
        }
        GameAction::MainStepBeginPerformance => {
            game.decision = None;
            step::performance_step_decision(game)
        }
        GameAction::MainStepEndTurn | GameAction::PerformanceStepEndTurn => {
            game.decision = None;
            step::end_turn(game)
        }
        GameAction::PerformanceStepUseArt { performer_id, art_id, target_id } => {
            game.decision = None;
            use_art(game, player, performer_id, &art_id, target_id)?;
            after_action(game)
        }
        GameAction::EffectResolutionMakeChoice { choice_index } => {
            decision_actions::make_choice(game, player, choice_index)
        }
        GameAction::EffectResolutionChooseCardsForEffect { card_ids } => {
            decision_actions::choose_cards(game, player, card_ids)
        }
        GameAction::EffectResolutionMoveCheerBetweenHolomems { placements } => {
            decision_actions::move_cheer(game, player, placements)
        }
    }
}

/// Plays a support card: it floats while its effect list resolves, then is
/// archived unless it attached itself to a holomem.
fn play_support(game: &mut GameState, player: PlayerName, card_id: CardId) -> Outcome {
    let limited = game.printed(card_id).limited;
    cards::remove_card(game, card_id)?;
    game.card_mut(card_id).zone = Zone::Floating;
    game.card_mut(card_id).revealed_to = enumset::EnumSet::all();
    if limited {
        game.player_mut(player).used_limited_this_turn = true;
    }

    game.emit(GameEvent::PlaySupportCard {
        player,
        card: CardRef { game_card_id: card_id, card_id: game.card(card_id).card_name.clone() },
        limited,
    });

    let effects = game.printed(card_id).effects.clone();
    game.effect_stack.push(EffectStackEntry::CleanupSupport { card: card_id });
    game.effect_stack
        .push(EffectStackEntry::effects(&effects, EffectContext::new(player, card_id)));
    resolve::resolve_stack(game)
}

/// Declares and resolves an art: pre-damage boosts, the art event, then
/// damage with revenge triggers pushed above it.
fn use_art(
    game: &mut GameState,
    player: PlayerName,
    performer_id: CardId,
    art_id: &str,
    target_id: CardId,
) -> Outcome {
    let art = game
        .printed(performer_id)
        .art(art_id)
        .with_error(|| format!("Art {art_id} vanished between validation and execution"))?
        .clone();
    game.card_mut(performer_id).used_art_ids.push(art_id.to_string());
    game.performance = Some(ArtInProgress {
        performer: performer_id,
        art_id: art_id.to_string(),
        target: target_id,
        base_power: art.power,
        boost: 0,
    });

    // Pre-damage modifiers resolve before the art event so it carries final
    // power.
    for discovered in triggers::discover(game, EffectTrigger::OnPerformArt, performer_id, None)
        .into_iter()
        .rev()
    {
        game.effect_stack
            .push(EffectStackEntry::effects(&discovered.effects, discovered.context));
    }
    resolve::resolve_stack(game)?;

    let power = game.performance.as_ref().map(ArtInProgress::total_power).unwrap_or(art.power);
    game.emit(GameEvent::PerformArt {
        performer_id,
        art_id: art_id.to_string(),
        target_id,
        power,
    });

    game.effect_stack.push(EffectStackEntry::ArtDamage);
    if !art.effects.is_empty() {
        game.effect_stack.push(EffectStackEntry::effects(
            &art.effects,
            EffectContext::new(player, performer_id),
        ));
    }
    for discovered in triggers::discover(
        game,
        EffectTrigger::OnTakeArtDamage,
        target_id,
        Some(performer_id),
    )
    .into_iter()
    .rev()
    {
        game.effect_stack
            .push(EffectStackEntry::effects(&discovered.effects, discovered.context));
    }

    resolve::resolve_stack(game)
}

/// Emits the next step decision once an action has fully resolved.
///
/// No-op while a decision is outstanding or the game is over; the art in
/// progress is considered complete once the stack has drained.
pub fn after_action(game: &mut GameState) -> Outcome {
    if game.is_over() || game.decision.is_some() {
        return outcome::OK;
    }

    match game.phase {
        GamePhase::Cheer | GamePhase::Main => step::main_step_decision(game),
        GamePhase::Performance => {
            game.performance = None;
            if legal_actions::performance_actions(game, game.active_player()).is_empty() {
                step::end_turn(game)
            } else {
                step::performance_step_decision(game)
            }
        }
        _ => outcome::OK,
    }
}
