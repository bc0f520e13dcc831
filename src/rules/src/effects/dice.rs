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

use data::core::primitives::PlayerName;
use data::events::game_event::GameEvent;
use data::game_states::game_state::GameState;
use rand::Rng;

/// Rolls a uniform 1-6 die for `player` and emits [GameEvent::RollDie].
///
/// Scripted results queued in the match configuration are consumed first;
/// those are a test injection mechanism, not an in-game rigging effect, so
/// the `rigged` flag stays false for them.
pub fn roll_die(game: &mut GameState, player: PlayerName) -> u8 {
    let result = match game.configuration.scripted_die_rolls.pop_front() {
        Some(scripted) => scripted,
        None => game.rng.gen_range(1..=6),
    };
    game.emit(GameEvent::RollDie { effect_player: player, die_result: result, rigged: false });
    result
}
