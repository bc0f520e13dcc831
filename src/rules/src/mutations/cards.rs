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

//! Low-level zone membership moves.
//!
//! Every zone change goes through [remove_card] and [add_card] so the ordered
//! per-player zone lists and the card's `zone` field never disagree.

use data::core::primitives::{CardId, PlayerName, Zone};
use data::game_states::game_state::GameState;
use utils::outcome::{Outcome, Value};
use utils::{fail, outcome, verify};

/// Where in an ordered zone a card is inserted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Placement {
    Top,
    Bottom,
}

/// Detaches `id` from its current zone list, leaving its `zone` field stale
/// until [add_card] runs.
///
/// Cards attached to a holomem are removed from the holder's attachment
/// lists.
pub fn remove_card(game: &mut GameState, id: CardId) -> Outcome {
    let owner = game.card(id).owner;
    let zone = game.card(id).zone;
    let removed = match zone {
        Zone::Deck => remove_from_list(&mut game.player_mut(owner).deck, id),
        Zone::Hand => remove_from_list(&mut game.player_mut(owner).hand, id),
        Zone::Archive => remove_from_list(&mut game.player_mut(owner).archive, id),
        Zone::Life => remove_from_list(&mut game.player_mut(owner).life, id),
        Zone::CheerDeck => remove_from_list(&mut game.player_mut(owner).cheer_deck, id),
        Zone::Holopower => remove_from_list(&mut game.player_mut(owner).holopower, id),
        Zone::Center | Zone::Collab | Zone::Backstage => {
            game.player_mut(owner).remove_from_stage(id)
        }
        Zone::Floating => true,
        Zone::Holomem => remove_attachment(game, id),
        Zone::Oshi => fail!("The oshi card never moves"),
    };

    verify!(removed, "Card {id:?} was not in its recorded zone {zone:?}");
    outcome::OK
}

/// Inserts `id` into `zone` at `placement` and updates its `zone` field.
///
/// Stage slots and attachments have their own mutation functions; this
/// handles the ordered list zones.
pub fn add_card(game: &mut GameState, id: CardId, zone: Zone, placement: Placement) -> Outcome {
    let owner = game.card(id).owner;
    let player = game.player_mut(owner);
    match zone {
        // The back of the deck lists is the draw/reveal position.
        Zone::Deck => insert(&mut player.deck, id, placement),
        Zone::Hand => player.hand.push(id),
        // The archive is ordered newest first.
        Zone::Archive => match placement {
            Placement::Top => player.archive.insert(0, id),
            Placement::Bottom => player.archive.push(id),
        },
        Zone::Life => player.life.push(id),
        Zone::CheerDeck => insert(&mut player.cheer_deck, id, placement),
        Zone::Holopower => player.holopower.push(id),
        Zone::Floating => {}
        Zone::Center | Zone::Collab | Zone::Backstage | Zone::Holomem | Zone::Oshi => {
            fail!("Zone {zone:?} requires a dedicated mutation")
        }
    }

    game.card_mut(id).zone = zone;
    outcome::OK
}

/// Moves `id` to the top of `zone` in one step.
pub fn move_card(game: &mut GameState, id: CardId, zone: Zone) -> Outcome {
    remove_card(game, id)?;
    add_card(game, id, zone, Placement::Top)
}

/// Takes the top card of a player's deck, if any.
pub fn deck_top(game: &GameState, player: PlayerName) -> Option<CardId> {
    game.player(player).deck.last().copied()
}

/// Takes the top card of a player's cheer deck, if any.
pub fn cheer_deck_top(game: &GameState, player: PlayerName) -> Option<CardId> {
    game.player(player).cheer_deck.last().copied()
}

/// Finds the holomem holding `attached`, scanning both players' stages.
pub fn find_holder(game: &GameState, attached: CardId) -> Value<CardId> {
    for player in [PlayerName::One, PlayerName::Two] {
        for holomem in game.player(player).stage().collect::<Vec<_>>() {
            let card = game.card(holomem);
            if card.attached_cheer.contains(&attached) || card.attached_support.contains(&attached)
            {
                return Ok(holomem);
            }
        }
    }
    fail!("Card {attached:?} is not attached to any holomem");
}

fn remove_from_list(list: &mut Vec<CardId>, id: CardId) -> bool {
    match list.iter().position(|&card| card == id) {
        Some(position) => {
            list.remove(position);
            true
        }
        None => false,
    }
}

fn insert(list: &mut Vec<CardId>, id: CardId, placement: Placement) {
    match placement {
        Placement::Top => list.push(id),
        Placement::Bottom => list.insert(0, id),
    }
}

fn remove_attachment(game: &mut GameState, id: CardId) -> bool {
    for player in [PlayerName::One, PlayerName::Two] {
        let stage: Vec<CardId> = game.player(player).stage().collect();
        for holomem in stage {
            let card = game.card_mut(holomem);
            if let Some(position) = card.attached_cheer.iter().position(|&c| c == id) {
                card.attached_cheer.remove(position);
                return true;
            }
            if let Some(position) = card.attached_support.iter().position(|&c| c == id) {
                card.attached_support.remove(position);
                return true;
            }
        }
    }
    false
}
