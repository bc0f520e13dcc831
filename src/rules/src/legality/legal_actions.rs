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

use data::actions::legal_action::LegalAction;
use data::core::primitives::{CardId, CardType, PlayerName};
use data::game_states::game_state::GameState;
use itertools::Itertools;

use crate::queries::card_queries;

/// All legal main step actions for the active player, in a stable order.
///
/// This list is advertised inside the main step decision event and is the
/// single source of truth for main step action validation.
pub fn main_actions(game: &GameState, player: PlayerName) -> Vec<LegalAction> {
    let state = game.player(player);
    let mut actions = vec![];

    if state.backstage.len() < data::player_states::player_state::PlayerState::MAX_BACKSTAGE {
        for &card_id in &state.hand {
            if matches!(
                game.printed(card_id).card_type,
                CardType::HolomemDebut | CardType::HolomemSpot
            ) {
                actions.push(LegalAction::PlaceHolomem { card_id });
            }
        }
    }

    for &card_id in &state.hand {
        if game.printed(card_id).card_type != CardType::HolomemBloom {
            continue;
        }
        for target_id in state.stage().collect_vec() {
            if card_queries::can_bloom(game, card_id, target_id) {
                actions.push(LegalAction::Bloom { card_id, target_id });
            }
        }
    }

    if !state.collabed_this_turn && state.collab.is_none() && !state.deck.is_empty() {
        for &card_id in &state.backstage {
            if !game.card(card_id).resting {
                actions.push(LegalAction::Collab { card_id });
            }
        }
    }

    if let Some(center_id) = state.center {
        let cost = game.printed(center_id).baton_pass_cost.unwrap_or(0) as usize;
        let has_target = state.backstage.iter().any(|&id| !game.card(id).resting);
        if !state.baton_passed_this_turn
            && has_target
            && game.card(center_id).attached_cheer.len() >= cost
        {
            actions.push(LegalAction::BatonPass { center_id });
        }
    }

    for &card_id in &state.hand {
        if game.printed(card_id).card_type != CardType::Support {
            continue;
        }
        if game.printed(card_id).limited && state.used_limited_this_turn {
            continue;
        }
        actions.push(LegalAction::PlaySupport { card_id });
    }

    for skill in &game.printed(state.oshi).oshi_skills {
        if card_queries::oshi_skill_ready(game, player, &skill.skill_id) {
            actions.push(LegalAction::OshiSkill { skill_id: skill.skill_id.clone() });
        }
    }

    // No performance on the very first turn of the match.
    if game.current_turn.turn_number > 1 && !performance_actions(game, player).is_empty() {
        actions.push(LegalAction::BeginPerformance);
    }
    actions.push(LegalAction::EndTurn);
    actions
}

/// All legal art uses for the active player, excluding the end-turn action.
pub fn performance_actions(game: &GameState, player: PlayerName) -> Vec<LegalAction> {
    let state = game.player(player);
    let opponent = game.player(player.opponent());
    let valid_targets: Vec<CardId> =
        opponent.center.into_iter().chain(opponent.collab).collect();
    if valid_targets.is_empty() {
        return vec![];
    }

    let mut actions = vec![];
    for performer_id in state.center.into_iter().chain(state.collab) {
        for art in &game.printed(performer_id).arts {
            if card_queries::can_use_art(game, performer_id, &art.art_id) {
                actions.push(LegalAction::UseArt {
                    performer_id,
                    art_id: art.art_id.clone(),
                    valid_targets: valid_targets.clone(),
                });
            }
        }
    }
    actions
}

/// The full advertised performance step menu.
pub fn performance_menu(game: &GameState, player: PlayerName) -> Vec<LegalAction> {
    let mut actions = performance_actions(game, player);
    actions.push(LegalAction::PerformanceEndTurn);
    actions
}
