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

//! Discovery of triggered effects.
//!
//! Triggers are discovered in a fixed order so the emission sequence is a
//! pure function of state and action: the subject card's own printed effects
//! first, then its attached supports in attachment order.

use data::core::primitives::CardId;
use data::effects::effect::{EffectDescriptor, EffectTrigger};
use data::effects::effect_context::EffectContext;
use data::game_states::game_state::GameState;

use crate::effects::resolve;

/// One discovered triggered effect list with the context it will run in.
pub struct DiscoveredTrigger {
    pub effects: Vec<EffectDescriptor>,
    pub context: EffectContext,
}

/// Collects the effect lists fired by `trigger` on `subject`, in discovery
/// order.
///
/// `attacker` is threaded into each context so revenge-style effects can
/// target the performer of the art that fired the trigger.
pub fn discover(
    game: &GameState,
    trigger: EffectTrigger,
    subject: CardId,
    attacker: Option<CardId>,
) -> Vec<DiscoveredTrigger> {
    let owner = game.card(subject).owner;
    let mut carriers = vec![subject];
    carriers.extend(game.card(subject).attached_support.iter().copied());

    let mut discovered = vec![];
    for carrier in carriers {
        for triggered in &game.printed(carrier).triggered_effects {
            if triggered.trigger != trigger {
                continue;
            }
            let mut context = EffectContext::new(owner, carrier);
            context.holder = Some(subject);
            context.attacker = attacker;
            if let Some(condition) = &triggered.condition {
                if !resolve::condition_met(game, condition, &context) {
                    continue;
                }
            }
            discovered.push(DiscoveredTrigger { effects: triggered.effects.clone(), context });
        }
    }
    discovered
}
