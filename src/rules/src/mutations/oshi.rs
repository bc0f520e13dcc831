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

use data::core::primitives::{PlayerName, Zone};
use data::effects::effect_context::{EffectContext, EffectStackEntry};
use data::events::game_event::GameEvent;
use data::game_states::game_state::GameState;
use data::printed_cards::printed_card::OshiSkillLimit;
use utils::outcome::Outcome;
use utils::with_error::WithError;
use utils::{outcome, verify};

use crate::mutations::cards;
use crate::mutations::cards::Placement;
use crate::queries::card_queries;

/// Activates an oshi skill: pays its holopower cost, records the usage
/// against its limit, and pushes its effect list for resolution.
pub fn activate_skill(game: &mut GameState, player: PlayerName, skill_id: &str) -> Outcome {
    verify!(
        card_queries::oshi_skill_ready(game, player, skill_id),
        "Oshi skill {skill_id} is not ready for {player:?}"
    );
    let oshi = game.player(player).oshi;
    let skill = game
        .printed(oshi)
        .oshi_skill(skill_id)
        .with_error(|| format!("Unknown oshi skill {skill_id}"))?
        .clone();

    for _ in 0..skill.cost {
        let Some(id) = game.player(player).holopower.last().copied() else {
            utils::fail!("Holopower cost became unpayable mid-activation");
        };
        cards::remove_card(game, id)?;
        cards::add_card(game, id, Zone::Archive, Placement::Top)?;
        game.emit(GameEvent::MoveCard {
            moving_player: player,
            from_zone: Zone::Holopower,
            to_zone: Zone::Archive,
            card: data::events::game_event::CardRef {
                game_card_id: id,
                card_id: game.card(id).card_name.clone(),
            },
        });
    }

    game.player_mut(player).oshi_skills_used_this_turn.push(skill.skill_id.clone());
    if skill.limit == OshiSkillLimit::OncePerGame {
        game.player_mut(player).oshi_skills_used_this_game.push(skill.skill_id.clone());
    }
    game.emit(GameEvent::OshiSkillActivation {
        skill_player: player,
        skill_id: skill.skill_id.clone(),
    });

    game.effect_stack
        .push(EffectStackEntry::effects(&skill.effects, EffectContext::new(player, oshi)));
    outcome::OK
}
