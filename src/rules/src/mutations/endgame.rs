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
use data::events::game_event::{GameEvent, GameOverReason};
use data::game_states::game_phase::GamePhase;
use data::game_states::game_state::{GameState, GameStatus};
use tracing::info;
use utils::outcome;
use utils::outcome::Outcome;

/// Ends the match with `winner` defeating `loser` for the given reason.
///
/// Clears any outstanding decision and pending effects; nothing resolves
/// after game over.
pub fn game_over(
    game: &mut GameState,
    winner: PlayerName,
    loser: PlayerName,
    reason: GameOverReason,
) -> Outcome {
    info!(?winner, ?loser, ?reason, "Game over");
    game.status = GameStatus::GameOver { winner: Some(winner), reason };
    game.phase = GamePhase::GameOver;
    game.decision = None;
    game.effect_stack.clear();
    game.performance = None;
    game.emit(GameEvent::GameOver { winner: Some(winner), loser: Some(loser), reason });
    outcome::GAME_OVER
}

/// Aborts the match with no winner after an internal error.
pub fn abort(game: &mut GameState) -> Outcome {
    game.status = GameStatus::GameOver { winner: None, reason: GameOverReason::InternalError };
    game.phase = GamePhase::GameOver;
    game.decision = None;
    game.effect_stack.clear();
    game.performance = None;
    game.emit(GameEvent::GameOver {
        winner: None,
        loser: None,
        reason: GameOverReason::InternalError,
    });
    outcome::GAME_OVER
}
