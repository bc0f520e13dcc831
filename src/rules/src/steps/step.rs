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

//! The turn phase state machine.
//!
//! A turn runs reset, draw, cheer, main, performance, end. Reset through
//! cheer execute back to back when a turn starts, so the batch that ends one
//! turn also carries the incoming player's reset, draw, and cheer events.

use data::core::primitives::CardId;
use data::decisions::decision::{Decision, DecisionKind, SendCheerTarget};
use data::effects::effect::{CheerDestination, CheerSource};
use data::events::game_event::{CardRef, GameEvent, GameOverReason};
use data::game_states::game_phase::GamePhase;
use data::game_states::game_state::{GameState, TurnData};
use utils::outcome;
use utils::outcome::Outcome;

use crate::legality::legal_actions;
use crate::mutations::{decks, endgame};

/// Ends the active player's turn and runs the opponent's turn up to their
/// main step decision.
pub fn end_turn(game: &mut GameState) -> Outcome {
    let active = game.active_player();
    let next = active.opponent();
    game.phase = GamePhase::End;
    game.performance = None;
    game.emit(GameEvent::EndTurn { active_player: active, next_player: next });

    game.current_turn =
        TurnData { active_player: next, turn_number: game.current_turn.turn_number + 1 };
    start_turn(game)
}

/// Runs the incoming active player's turn from its start through the main
/// step decision. [GameState::current_turn] must already be advanced.
pub fn start_turn(game: &mut GameState) -> Outcome {
    let active = game.active_player();
    game.emit(GameEvent::StartTurn {
        active_player: active,
        turn_number: game.current_turn.turn_number,
    });

    reset_step(game);
    draw_step(game)?;
    cheer_step(game)?;
    main_step_decision(game)
}

/// Flips resting cards face-up, returns the collab holomem to the backstage
/// resting, and clears per-turn flags.
fn reset_step(game: &mut GameState) {
    let active = game.active_player();
    game.phase = GamePhase::Reset;

    let stage: Vec<CardId> = game.player(active).stage().collect();
    let mut activated = vec![];
    for id in &stage {
        if game.card(*id).resting {
            game.card_mut(*id).resting = false;
            activated.push(*id);
        }
    }
    game.emit(GameEvent::ResetStepActivate { active_player: active, activated_card_ids: activated });

    let mut rested = vec![];
    if let Some(collab_id) = game.player_mut(active).collab.take() {
        game.card_mut(collab_id).zone = data::core::primitives::Zone::Backstage;
        game.card_mut(collab_id).resting = true;
        game.player_mut(active).backstage.push(collab_id);
        rested.push(collab_id);
    }
    game.emit(GameEvent::ResetStepCollab { active_player: active, rested_card_ids: rested });

    for id in game.player(active).stage().collect::<Vec<_>>() {
        let card = game.card_mut(id);
        card.bloomed_this_turn = false;
        card.played_this_turn = false;
        card.used_art_ids.clear();
    }
    let player = game.player_mut(active);
    player.collabed_this_turn = false;
    player.baton_passed_this_turn = false;
    player.used_limited_this_turn = false;
    player.oshi_skills_used_this_turn.clear();
}

/// Draws one card; an empty deck loses the game on the spot.
fn draw_step(game: &mut GameState) -> Outcome {
    let active = game.active_player();
    game.phase = GamePhase::Draw;
    if game.player(active).deck.is_empty() {
        return endgame::game_over(game, active.opponent(), active, GameOverReason::DeckOut);
    }
    decks::draw_cards(game, active, 1)?;
    outcome::OK
}

/// Reveals the top of the cheer deck and asks the active player to attach
/// it. Skipped when the cheer deck is empty.
fn cheer_step(game: &mut GameState) -> Outcome {
    let active = game.active_player();
    game.phase = GamePhase::Cheer;
    let Some(cheer) = game.player(active).cheer_deck.last().copied() else {
        return outcome::OK;
    };
    let options: Vec<CardId> = game.player(active).stage().collect();
    if options.is_empty() {
        return outcome::OK;
    }

    game.card_mut(cheer).revealed_to = enumset::EnumSet::all();
    game.emit(GameEvent::CheerStep {
        active_player: active,
        cheer_to_place: CardRef {
            game_card_id: cheer,
            card_id: game.card(cheer).card_name.clone(),
        },
        options: options.clone(),
    });

    game.decision = Some(Decision {
        player: active,
        kind: DecisionKind::SendCheer {
            amount_min: 1,
            amount_max: 1,
            from_zone: CheerSource::CheerDeck,
            to_zone: CheerDestination::Holomem,
            from_options: vec![cheer],
            to_options: options.into_iter().map(SendCheerTarget::Holomem).collect(),
        },
        context: None,
    });
    outcome::DECISION
}

/// Enters the main step and advertises the legal action menu.
pub fn main_step_decision(game: &mut GameState) -> Outcome {
    let active = game.active_player();
    game.phase = GamePhase::Main;
    let available_actions = legal_actions::main_actions(game, active);
    game.decision = Some(Decision { player: active, kind: DecisionKind::MainStep, context: None });
    game.emit(GameEvent::DecisionMainStep { active_player: active, available_actions });
    outcome::DECISION
}

/// Advertises the performance step menu.
pub fn performance_step_decision(game: &mut GameState) -> Outcome {
    let active = game.active_player();
    game.phase = GamePhase::Performance;
    let available_actions = legal_actions::performance_menu(game, active);
    game.decision =
        Some(Decision { player: active, kind: DecisionKind::PerformanceStep, context: None });
    game.emit(GameEvent::DecisionPerformanceStep { active_player: active, available_actions });
    outcome::DECISION
}
