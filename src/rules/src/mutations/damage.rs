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

//! Damage application and down resolution.

use data::core::numerics::{Damage, LifeValue};
use data::core::primitives::{CardId, Zone};
use data::decisions::decision::{Decision, DecisionKind, SendCheerTarget};
use data::effects::effect::{CheerDestination, CheerSource};
use data::events::game_event::{GameEvent, GameOverReason};
use data::game_states::game_state::GameState;
use utils::outcome;
use utils::outcome::Outcome;

use crate::mutations::cards::Placement;
use crate::mutations::{cards, cheer, endgame};

/// Applies `amount` damage to `target`, resolving a down if its damage
/// reaches its printed HP.
///
/// Pauses on the defender's life distribution decision when a down consumes
/// life; ends the game when the defender runs out of life or holomem.
pub fn deal_damage(game: &mut GameState, target: CardId, amount: u32, special: bool) -> Outcome {
    let target_player = game.card(target).owner;
    game.card_mut(target).damage += Damage(amount);

    let hp = game.printed(target).hp.unwrap_or(0);
    let died = game.card(target).damage.0 >= hp;

    let life_lost: LifeValue = match died {
        false => 0,
        true if game.printed(target).buzz => 2,
        true => 1,
    };
    let life_remaining = game.player(target_player).life.len() as LifeValue;
    let holomem_remaining =
        game.player(target_player).stage().filter(|&card| card != target).count();
    let game_over = died && (life_remaining <= life_lost || holomem_remaining == 0);

    game.emit(GameEvent::DamageDealt {
        target_id: target,
        target_player,
        damage: amount,
        special,
        died,
        game_over,
        life_lost,
        life_loss_prevented: false,
    });

    if died {
        down_holomem(game, target, life_lost, game_over)?;
    }

    outcome::OK
}

/// Resolves a downed holomem: archives it with its attachments, consumes
/// life, and asks the defender to distribute the lost life cheer among the
/// survivors.
fn down_holomem(
    game: &mut GameState,
    target: CardId,
    life_lost: LifeValue,
    game_over: bool,
) -> Outcome {
    let target_player = game.card(target).owner;
    game.emit(GameEvent::DownedHolomemBefore { target_id: target });

    // The archive transition is carried by the DownedHolomem event itself;
    // no separate move event is emitted for it.
    cheer::archive_attachments(game, target)?;
    cards::remove_card(game, target)?;
    cards::add_card(game, target, Zone::Archive, Placement::Top)?;

    game.emit(GameEvent::DownedHolomem { target_id: target, target_player, life_lost, game_over });

    if game_over {
        let reason = if (game.player(target_player).life.len() as LifeValue) <= life_lost {
            GameOverReason::LifeZero
        } else {
            GameOverReason::NoHolomem
        };
        return endgame::game_over(game, target_player.opponent(), target_player, reason);
    }

    if life_lost > 0 {
        let from_options: Vec<CardId> =
            game.player(target_player).life.iter().take(life_lost as usize).copied().collect();
        let to_options: Vec<SendCheerTarget> =
            game.player(target_player).stage().map(SendCheerTarget::Holomem).collect();
        let amount = from_options.len() as u32;

        game.decision = Some(Decision {
            player: target_player,
            kind: DecisionKind::SendCheer {
                amount_min: amount,
                amount_max: amount,
                from_zone: CheerSource::Life,
                to_zone: CheerDestination::Holomem,
                from_options: from_options.clone(),
                to_options: to_options.clone(),
            },
            context: None,
        });
        game.emit(GameEvent::DecisionSendCheer {
            effect_player: target_player,
            amount_min: amount,
            amount_max: amount,
            from_zone: CheerSource::Life,
            to_zone: CheerDestination::Holomem,
            from_options,
            to_options,
        });
        return outcome::DECISION;
    }

    outcome::OK
}
