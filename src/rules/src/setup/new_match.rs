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

//! Match creation and the setup flow: shuffles, opening hands, mulligans,
//! face-down initial placement, and life placement.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use data::card_states::zones::Zones;
use data::core::primitives::{CardId, CardName, CardType, GameId, PlayerName, UserId, Zone};
use data::decisions::decision::{Decision, DecisionKind};
use data::events::game_event::{CardRef, GameEvent, GameOverReason};
use data::game_states::game_phase::GamePhase;
use data::game_states::game_state::{GameConfiguration, GameState, GameStatus, TurnData};
use data::player_states::player_state::{PlayerState, Players};
use data::printed_cards::printed_card::PrintedCard;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;
use utils::outcome;
use utils::outcome::{Outcome, Value};
use utils::verify;

use crate::mutations::{decks, endgame};
use crate::steps::step;

pub const OPENING_HAND_SIZE: usize = 7;
pub const DEFAULT_LIFE: u32 = 5;

/// A validated deck list for one player. Counts are keyed by printed
/// identity in sorted order so instantiation is deterministic.
#[derive(Debug, Clone)]
pub struct DeckSubmission {
    pub oshi: CardName,
    pub main_deck: BTreeMap<CardName, u32>,
    pub cheer_deck: BTreeMap<CardName, u32>,
}

/// Creates a match from two validated deck submissions and runs setup until
/// the first mulligan decision.
pub fn create(
    id: GameId,
    seed: u64,
    configuration: GameConfiguration,
    definitions: Arc<HashMap<CardName, PrintedCard>>,
    player_one: (Option<UserId>, DeckSubmission),
    player_two: (Option<UserId>, DeckSubmission),
) -> Value<GameState> {
    let mut zones = Zones::default();
    let p1 = instantiate_player(&mut zones, PlayerName::One, player_one.0, &player_one.1)?;
    let p2 = instantiate_player(&mut zones, PlayerName::Two, player_two.0, &player_two.1)?;

    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let starting_player = if rng.gen_bool(0.5) { PlayerName::One } else { PlayerName::Two };

    let mut game = GameState {
        id,
        status: GameStatus::Setup,
        phase: GamePhase::Reset,
        current_turn: TurnData { active_player: starting_player, turn_number: 0 },
        starting_player,
        configuration,
        players: Players::new(p1, p2),
        zones,
        decision: None,
        effect_stack: vec![],
        performance: None,
        events: Default::default(),
        rng,
        card_definitions: definitions,
    };

    for name in [PlayerName::One, PlayerName::Two] {
        let player = game.player(name);
        let all: Vec<CardId> = player
            .deck
            .iter()
            .chain(player.cheer_deck.iter())
            .copied()
            .chain(std::iter::once(player.oshi))
            .collect();
        for card in all {
            verify!(
                game.card_definitions.contains_key(&game.zones.card(card).card_name),
                "Unknown card in validated deck"
            );
        }
    }

    info!(game_id = ?game.id, ?starting_player, "Created match");
    game.emit(GameEvent::GameStart { starting_player });

    for name in [PlayerName::One, PlayerName::Two] {
        decks::shuffle(&mut game, name);
        decks::shuffle_cheer(&mut game, name);
        decks::draw_cards(&mut game, name, OPENING_HAND_SIZE)?;
    }

    match offer_mulligan(&mut game, starting_player) {
        Ok(()) => Ok(game),
        Err(stop) if stop.is_suspension() => Ok(game),
        Err(stop) => Err(stop),
    }
}

fn instantiate_player(
    zones: &mut Zones,
    name: PlayerName,
    user_id: Option<UserId>,
    submission: &DeckSubmission,
) -> Value<PlayerState> {
    let oshi = zones.create_card(submission.oshi.clone(), name, Zone::Oshi);
    let mut player = PlayerState::new(name, user_id, oshi);

    for (card_name, &count) in &submission.main_deck {
        for _ in 0..count {
            player.deck.push(zones.create_card(card_name.clone(), name, Zone::Deck));
        }
    }
    for (card_name, &count) in &submission.cheer_deck {
        for _ in 0..count {
            player.cheer_deck.push(zones.create_card(card_name.clone(), name, Zone::CheerDeck));
        }
    }
    Ok(player)
}

/// Runs forced mulligans for a player, then offers them their voluntary
/// mulligan decision.
pub fn offer_mulligan(game: &mut GameState, player: PlayerName) -> Outcome {
    force_mulligans(game, player)?;
    game.decision = Some(Decision { player, kind: DecisionKind::Mulligan, context: None });
    game.emit(GameEvent::DecisionMulligan { effect_player: player });
    outcome::DECISION
}

/// A hand with no debut holomem must be redrawn, with the standard penalty.
pub fn force_mulligans(game: &mut GameState, player: PlayerName) -> Outcome {
    while !hand_has_debut(game, player) {
        if hand_size_after_mulligan(game, player) == 0 {
            return endgame::game_over(
                game,
                player.opponent(),
                player,
                GameOverReason::NoHolomem,
            );
        }
        perform_mulligan(game, player)?;
    }
    outcome::OK
}

/// Returns the hand to the deck, reshuffles, and draws the post-penalty hand.
pub fn perform_mulligan(game: &mut GameState, player: PlayerName) -> Outcome {
    let count = hand_size_after_mulligan(game, player);
    decks::return_hand_to_deck(game, player)?;
    decks::draw_cards(game, player, count)?;
    game.player_mut(player).mulligan_count += 1;
    outcome::OK
}

fn hand_size_after_mulligan(game: &GameState, player: PlayerName) -> usize {
    OPENING_HAND_SIZE.saturating_sub(game.player(player).mulligan_count as usize)
}

fn hand_has_debut(game: &GameState, player: PlayerName) -> bool {
    game.player(player)
        .hand
        .iter()
        .any(|&id| game.printed(id).card_type == CardType::HolomemDebut)
}

/// Marks a player's mulligan finished and moves setup forward: the other
/// player's mulligan, then initial placement.
pub fn mulligan_completed(game: &mut GameState, player: PlayerName) -> Outcome {
    game.player_mut(player).mulligan_completed = true;
    let other = player.opponent();
    if !game.player(other).mulligan_completed {
        return offer_mulligan(game, other);
    }
    offer_initial_placement(game, game.starting_player)
}

/// Asks a player to place their face-down starting stage.
pub fn offer_initial_placement(game: &mut GameState, player: PlayerName) -> Outcome {
    let cards_can_choose: Vec<CardId> = game
        .player(player)
        .hand
        .iter()
        .copied()
        .filter(|&id| {
            matches!(
                game.printed(id).card_type,
                CardType::HolomemDebut | CardType::HolomemSpot
            )
        })
        .collect();
    game.decision =
        Some(Decision { player, kind: DecisionKind::InitialPlacement, context: None });
    game.emit(GameEvent::DecisionInitialPlacement {
        effect_player: player,
        cards_can_choose,
    });
    outcome::DECISION
}

/// Marks a player's placement finished; when both are done, reveals the
/// stages, places life, and starts the first turn.
pub fn placement_completed(game: &mut GameState, player: PlayerName) -> Outcome {
    game.player_mut(player).initial_placement_completed = true;
    game.emit(GameEvent::InitialPlacementPlaced { active_player: player });

    let other = player.opponent();
    if !game.player(other).initial_placement_completed {
        return offer_initial_placement(game, other);
    }
    finish_setup(game)
}

fn finish_setup(game: &mut GameState) -> Outcome {
    let mut placements = vec![];
    for name in [PlayerName::One, PlayerName::Two] {
        for id in game.player(name).stage().collect::<Vec<_>>() {
            game.card_mut(id).revealed_to = enumset::EnumSet::all();
            placements.push(CardRef {
                game_card_id: id,
                card_id: game.card(id).card_name.clone(),
            });
        }
    }
    game.emit(GameEvent::InitialPlacementReveal { placements });

    for name in [PlayerName::One, PlayerName::Two] {
        let life_value =
            game.printed(game.player(name).oshi).life.unwrap_or(DEFAULT_LIFE) as usize;
        for _ in 0..life_value {
            let Some(cheer) = game.player(name).cheer_deck.last().copied() else {
                break;
            };
            crate::mutations::cards::remove_card(game, cheer)?;
            crate::mutations::cards::add_card(
                game,
                cheer,
                Zone::Life,
                crate::mutations::cards::Placement::Top,
            )?;
        }
    }

    game.status = GameStatus::Playing;
    game.current_turn = TurnData { active_player: game.starting_player, turn_number: 1 };
    step::start_turn(game)
}
