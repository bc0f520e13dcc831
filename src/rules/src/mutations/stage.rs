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

//! Stage slot mutations: placement, bloom, collab, baton pass, center swaps.

use data::core::primitives::{CardId, PlayerName, Zone};
use data::events::game_event::{CardRef, GameEvent};
use data::game_states::game_state::GameState;
use utils::outcome::Outcome;
use utils::{fail, outcome, verify};

use crate::mutations::{cards, cheer, decks};

/// Places a debut or spot holomem from hand into an open backstage slot.
pub fn place_holomem(game: &mut GameState, player: PlayerName, card_id: CardId) -> Outcome {
    cards::remove_card(game, card_id)?;
    game.card_mut(card_id).zone = Zone::Backstage;
    game.card_mut(card_id).played_this_turn = true;
    game.card_mut(card_id).revealed_to = enumset::EnumSet::all();
    game.player_mut(player).backstage.push(card_id);

    let name = game.card(card_id).card_name.clone();
    game.emit(GameEvent::MoveCard {
        moving_player: player,
        from_zone: Zone::Hand,
        to_zone: Zone::Backstage,
        card: CardRef { game_card_id: card_id, card_id: name },
    });
    outcome::OK
}

/// Blooms `target_id` with the bloom card `card_id` from hand.
///
/// The bloom card takes over the target's stage slot, damage, attachments,
/// and resting state; the target goes underneath.
pub fn bloom(
    game: &mut GameState,
    player: PlayerName,
    card_id: CardId,
    target_id: CardId,
) -> Outcome {
    let slot = game.card(target_id).zone;
    cards::remove_card(game, card_id)?;

    // Transfer mutable state from the target onto the bloom card.
    let damage = game.card(target_id).damage;
    let resting = game.card(target_id).resting;
    let attached_cheer = std::mem::take(&mut game.card_mut(target_id).attached_cheer);
    let attached_support = std::mem::take(&mut game.card_mut(target_id).attached_support);
    let mut bloomed_from = std::mem::take(&mut game.card_mut(target_id).bloomed_from);

    let position = stage_position(game, player, target_id)?;
    game.player_mut(player).remove_from_stage(target_id);
    game.card_mut(target_id).zone = Zone::Holomem;
    bloomed_from.push(target_id);

    {
        let card = game.card_mut(card_id);
        card.zone = slot;
        card.damage = damage;
        card.resting = resting;
        card.attached_cheer = attached_cheer;
        card.attached_support = attached_support;
        card.bloomed_from = bloomed_from;
        card.bloomed_this_turn = true;
        card.revealed_to = enumset::EnumSet::all();
    }
    restore_stage_position(game, player, card_id, position);

    let name = game.card(card_id).card_name.clone();
    game.emit(GameEvent::Bloom {
        bloom_player: player,
        bloom_card: CardRef { game_card_id: card_id, card_id: name },
        target_id,
    });
    outcome::OK
}

/// Moves a backstage holomem into the empty collab slot, feeding one card
/// from the deck top to holopower.
pub fn collab(game: &mut GameState, player: PlayerName, card_id: CardId) -> Outcome {
    verify!(game.player(player).collab.is_none(), "Collab slot is occupied");
    game.player_mut(player).remove_from_stage(card_id);
    game.card_mut(card_id).zone = Zone::Collab;
    game.player_mut(player).collab = Some(card_id);
    game.player_mut(player).collabed_this_turn = true;

    decks::generate_holopower(game, player, 1)?;
    game.emit(GameEvent::Collab {
        collab_player: player,
        collab_card_id: card_id,
        holopower_generated: 1,
    });
    outcome::OK
}

/// Swaps the center holomem with a backstage one, archiving `cheer_ids` from
/// the outgoing center to pay its baton pass cost.
pub fn baton_pass(
    game: &mut GameState,
    player: PlayerName,
    new_center_id: CardId,
    cheer_ids: &[CardId],
) -> Outcome {
    let Some(center_id) = game.player(player).center else {
        fail!("No center holomem to baton pass from");
    };

    for &cheer_id in cheer_ids {
        cheer::send_cheer_to(game, cheer_id, data::decisions::decision::SendCheerTarget::Archive)?;
    }

    swap_with_center(game, player, new_center_id)?;
    game.player_mut(player).baton_passed_this_turn = true;
    game.emit(GameEvent::BatonPass { active_player: player, center_id, new_center_id });
    outcome::OK
}

/// Moves a backstage holomem into the center slot, sending the current
/// center (if any) to the vacated backstage position.
pub fn swap_with_center(game: &mut GameState, player: PlayerName, card_id: CardId) -> Outcome {
    let position = stage_position(game, player, card_id)?;
    verify!(position >= 2, "Card {card_id:?} is not in the backstage");
    game.player_mut(player).remove_from_stage(card_id);

    if let Some(center_id) = game.player_mut(player).center.take() {
        game.card_mut(center_id).zone = Zone::Backstage;
        let backstage_index = (position - 2).min(game.player(player).backstage.len());
        game.player_mut(player).backstage.insert(backstage_index, center_id);
    }

    game.card_mut(card_id).zone = Zone::Center;
    game.player_mut(player).center = Some(card_id);
    outcome::OK
}

/// Stage position index in scan order: 0 center, 1 collab, 2.. backstage.
fn stage_position(game: &GameState, player: PlayerName, card_id: CardId) -> Result<usize, utils::outcome::StopCondition> {
    let state = game.player(player);
    if state.center == Some(card_id) {
        return Ok(0);
    }
    if state.collab == Some(card_id) {
        return Ok(1);
    }
    if let Some(index) = state.backstage.iter().position(|&card| card == card_id) {
        return Ok(2 + index);
    }
    fail!("Card {card_id:?} is not on the stage");
}

fn restore_stage_position(game: &mut GameState, player: PlayerName, card_id: CardId, position: usize) {
    let state = game.player_mut(player);
    match position {
        0 => state.center = Some(card_id),
        1 => state.collab = Some(card_id),
        index => {
            let backstage_index = (index - 2).min(state.backstage.len());
            state.backstage.insert(backstage_index, card_id);
        }
    }
}
