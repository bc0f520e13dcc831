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

use data::core::primitives::{CardId, PlayerName, Zone};
use data::events::game_event::{CardRef, GameEvent};
use data::game_states::game_state::GameState;
use rand::seq::SliceRandom;
use utils::outcome::{Outcome, Value};

use crate::mutations::cards;
use crate::mutations::cards::Placement;

/// Shuffles a player's main deck and emits [GameEvent::ShuffleDeck].
pub fn shuffle(game: &mut GameState, player: PlayerName) {
    let mut deck = std::mem::take(&mut game.player_mut(player).deck);
    deck.shuffle(&mut game.rng);
    game.player_mut(player).deck = deck;
    game.emit(GameEvent::ShuffleDeck { shuffling_player: player });
}

/// Shuffles a player's cheer deck. Not evented; the cheer deck is only
/// shuffled during setup.
pub fn shuffle_cheer(game: &mut GameState, player: PlayerName) {
    let mut deck = std::mem::take(&mut game.player_mut(player).cheer_deck);
    deck.shuffle(&mut game.rng);
    game.player_mut(player).cheer_deck = deck;
}

/// Draws `count` cards in sequence from the top of the player's deck into
/// their hand, revealing them to the drawer only.
///
/// Returns the cards actually drawn, which is fewer than `count` when the
/// deck runs out; deck-out loss is the draw step's concern, not this one's.
pub fn draw_cards(game: &mut GameState, player: PlayerName, count: usize) -> Value<Vec<CardId>> {
    let mut drawn = vec![];
    for _ in 0..count {
        let Some(id) = cards::deck_top(game, player) else {
            break;
        };
        cards::remove_card(game, id)?;
        cards::add_card(game, id, Zone::Hand, Placement::Top)?;
        game.card_mut(id).revealed_to.insert(player);
        drawn.push(id);
    }

    let refs = drawn
        .iter()
        .map(|&id| CardRef { game_card_id: id, card_id: game.card(id).card_name.clone() })
        .collect();
    game.emit_hidden(
        GameEvent::Draw { drawing_player: player, drawn_cards: refs },
        enumset::EnumSet::only(player),
    );
    Ok(drawn)
}

/// Moves `count` cards from the top of the deck onto the holopower stack,
/// face down.
pub fn generate_holopower(game: &mut GameState, player: PlayerName, count: usize) -> Outcome {
    for _ in 0..count {
        let Some(id) = cards::deck_top(game, player) else {
            break;
        };
        cards::remove_card(game, id)?;
        cards::add_card(game, id, Zone::Holopower, Placement::Top)?;
        game.emit_hidden(
            GameEvent::MoveCard {
                moving_player: player,
                from_zone: Zone::Deck,
                to_zone: Zone::Holopower,
                card: CardRef { game_card_id: id, card_id: game.card(id).card_name.clone() },
            },
            enumset::EnumSet::empty(),
        );
    }
    utils::outcome::OK
}

/// Returns a player's whole hand to their deck and reshuffles, as part of a
/// mulligan.
pub fn return_hand_to_deck(game: &mut GameState, player: PlayerName) -> Outcome {
    let hand = game.player(player).hand.clone();
    for id in hand {
        cards::remove_card(game, id)?;
        cards::add_card(game, id, Zone::Deck, Placement::Top)?;
    }
    shuffle(game, player);
    utils::outcome::OK
}
