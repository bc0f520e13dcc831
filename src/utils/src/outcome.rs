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

//! The engine's control-flow currency.
//!
//! Everything that advances a match returns an [Outcome]. Between two player
//! actions the engine runs synchronously, draining its effect stack; an
//! `Err` is how a step says the drain cannot continue. Two of those stops
//! are part of normal play and two callers away they stop being errors at
//! all: an action entry point swallows them and hands control back to the
//! room, which flushes the event batch and waits for the next action.

use color_eyre::Report;

/// Why the engine stopped advancing the match.
#[derive(Debug)]
#[must_use]
pub enum StopCondition {
    /// A decision was recorded on the match and a player must answer it
    /// before the effect stack can keep draining. The remaining work is
    /// already back on the stack; answering the decision resumes it.
    Decision,

    /// The match ended. Nothing resolves past this point: the decision slot
    /// and effect stack were cleared when the game-over was recorded.
    GameOver,

    /// An engine invariant failed. Unlike the other stops this never happens
    /// in normal play; the room aborts the match with an internal error.
    Error(Report),
}

impl StopCondition {
    /// True for the stops that are ordinary suspension points of a match —
    /// a pending decision or the end of the game — as opposed to an error
    /// the caller must surface.
    pub fn is_suspension(&self) -> bool {
        matches!(self, StopCondition::Decision | StopCondition::GameOver)
    }
}

/// Result of one engine step: continue, or stop for the recorded reason.
pub type Outcome = Result<(), StopCondition>;

/// An [Outcome] that carries a value when execution can continue.
pub type Value<T> = Result<T, StopCondition>;

/// Execution can continue.
pub const OK: Outcome = Ok(());

/// Halt: a decision is now pending against a player.
pub const DECISION: Outcome = Err(StopCondition::Decision);

/// Halt: the match is over.
pub const GAME_OVER: Outcome = Err(StopCondition::GameOver);
