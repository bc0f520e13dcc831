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

use data::core::primitives::{CardId, CardType, CheerColor, PlayerName};
use data::game_states::game_state::GameState;
use data::printed_cards::printed_card::{OshiSkillDefinition, OshiSkillLimit};

/// Colors of the cheer attached to a holomem, one entry per cheer card.
///
/// Multi-color cheer contributes its first color; the card pool has no
/// multi-color cheer today.
pub fn attached_cheer_colors(game: &GameState, holomem: CardId) -> Vec<CheerColor> {
    game.card(holomem)
        .attached_cheer
        .iter()
        .filter_map(|&cheer| game.printed(cheer).colors.iter().next())
        .collect()
}

/// True if `performer` can use `art_id` right now: the art exists, has not
/// been used this turn, the performer is active, and its cost is payable.
pub fn can_use_art(game: &GameState, performer: CardId, art_id: &str) -> bool {
    let card = game.card(performer);
    if card.resting || card.bloomed_this_turn || card.used_art_ids.iter().any(|id| id == art_id) {
        return false;
    }
    let Some(art) = game.printed(performer).art(art_id) else {
        return false;
    };
    art.cost.payable_with(&attached_cheer_colors(game, performer))
}

/// True if the bloom card in hand may be placed on the stage target:
/// matching holomem names, a compatible bloom level, and a target that is
/// neither fresh on stage nor already bloomed this turn.
pub fn can_bloom(game: &GameState, bloom_card: CardId, target: CardId) -> bool {
    let bloom_printed = game.printed(bloom_card);
    let target_printed = game.printed(target);
    if bloom_printed.card_type != CardType::HolomemBloom {
        return false;
    }
    if !target_printed.card_type.is_stage_holomem()
        || target_printed.card_type == CardType::HolomemSpot
    {
        return false;
    }

    let target_state = game.card(target);
    if target_state.bloomed_this_turn || target_state.played_this_turn {
        return false;
    }

    let shares_name = bloom_printed
        .card_names
        .iter()
        .any(|name| target_printed.card_names.contains(name));
    if !shares_name {
        return false;
    }

    let bloom_level = bloom_printed.bloom_level.unwrap_or(1);
    let target_level = target_printed.bloom_level.unwrap_or(0);
    bloom_level == target_level || bloom_level == target_level + 1
}

/// True if the named oshi skill can be activated by `player` right now: it
/// exists, its usage limit is not exhausted, and its holopower cost is
/// payable.
pub fn oshi_skill_ready(game: &GameState, player: PlayerName, skill_id: &str) -> bool {
    let state = game.player(player);
    let Some(skill) = game.printed(state.oshi).oshi_skill(skill_id) else {
        return false;
    };
    if !skill_limit_available(skill, state.oshi_skills_used_this_turn.as_slice(), state.oshi_skills_used_this_game.as_slice()) {
        return false;
    }
    state.holopower.len() as u32 >= skill.cost
}

fn skill_limit_available(
    skill: &OshiSkillDefinition,
    used_this_turn: &[String],
    used_this_game: &[String],
) -> bool {
    match skill.limit {
        OshiSkillLimit::OncePerTurn => !used_this_turn.iter().any(|id| *id == skill.skill_id),
        OshiSkillLimit::OncePerGame => !used_this_game.iter().any(|id| *id == skill.skill_id),
    }
}
