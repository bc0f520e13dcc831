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

use data::core::primitives::{CardId, Zone};
use data::decisions::decision::SendCheerTarget;
use data::events::game_event::{AttachLocation, GameEvent};
use data::game_states::game_state::GameState;
use utils::outcome::Outcome;
use utils::{outcome, verify};

use crate::mutations::cards;
use crate::mutations::cards::Placement;

/// Attaches a cheer card to a holomem, emitting [GameEvent::MoveAttachedCard]
/// with the location it came from.
pub fn attach_cheer(game: &mut GameState, cheer: CardId, holomem: CardId) -> Outcome {
    let from = attach_location(game, cheer)?;
    cards::remove_card(game, cheer)?;
    game.card_mut(cheer).zone = Zone::Holomem;
    game.card_mut(cheer).revealed_to = enumset::EnumSet::all();
    game.card_mut(holomem).attached_cheer.push(cheer);

    let owner = game.card(cheer).owner;
    game.emit(GameEvent::MoveAttachedCard {
        owning_player: owner,
        from_holomem_id: from,
        to_holomem_id: AttachLocation::Holomem(holomem),
        attached_id: cheer,
    });
    outcome::OK
}

/// Moves an attached (or zoned) cheer card to the target chosen in a
/// send-cheer answer.
pub fn send_cheer_to(game: &mut GameState, cheer: CardId, target: SendCheerTarget) -> Outcome {
    match target {
        SendCheerTarget::Holomem(holomem) => attach_cheer(game, cheer, holomem),
        SendCheerTarget::Archive => {
            let from = attach_location(game, cheer)?;
            cards::remove_card(game, cheer)?;
            cards::add_card(game, cheer, Zone::Archive, Placement::Top)?;

            let owner = game.card(cheer).owner;
            game.emit(GameEvent::MoveAttachedCard {
                owning_player: owner,
                from_holomem_id: from,
                to_holomem_id: AttachLocation::Zone(Zone::Archive),
                attached_id: cheer,
            });
            outcome::OK
        }
    }
}

/// Attaches a support card from the floating zone onto a holomem.
pub fn attach_support(game: &mut GameState, support: CardId, holomem: CardId) -> Outcome {
    verify!(
        game.card(support).zone == Zone::Floating,
        "Support {support:?} is not in the floating zone"
    );
    game.card_mut(support).zone = Zone::Holomem;
    game.card_mut(holomem).attached_support.push(support);

    let owner = game.card(support).owner;
    let name = game.card(support).card_name.clone();
    game.emit(GameEvent::MoveCard {
        moving_player: owner,
        from_zone: Zone::Floating,
        to_zone: Zone::Holomem,
        card: data::events::game_event::CardRef { game_card_id: support, card_id: name },
    });
    outcome::OK
}

/// Archives every attachment and bloomed-under card of a holomem, in
/// attachment order. Used during down resolution and baton pass cost payment.
pub fn archive_attachments(game: &mut GameState, holomem: CardId) -> Outcome {
    let card = game.card(holomem);
    let attachments: Vec<CardId> =
        card.attached_cheer.iter().chain(card.attached_support.iter()).copied().collect();
    // Bloomed-under cards sit beneath the stage card and belong to no zone
    // list, so they move straight into the archive.
    let bloomed_under = std::mem::take(&mut game.card_mut(holomem).bloomed_from);

    for id in attachments {
        cards::remove_card(game, id)?;
        cards::add_card(game, id, Zone::Archive, Placement::Top)?;
    }
    for id in bloomed_under {
        cards::add_card(game, id, Zone::Archive, Placement::Top)?;
    }
    outcome::OK
}

/// Where an attached-card move is coming from, for event payloads.
fn attach_location(
    game: &GameState,
    cheer: CardId,
) -> Result<AttachLocation, utils::outcome::StopCondition> {
    Ok(match game.card(cheer).zone {
        Zone::Holomem => AttachLocation::Holomem(cards::find_holder(game, cheer)?),
        zone => AttachLocation::Zone(zone),
    })
}
