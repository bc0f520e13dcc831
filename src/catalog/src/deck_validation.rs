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

use std::collections::BTreeMap;

use data::core::primitives::{CardName, CardType};
use tracing::info;

use crate::card_database::CardDatabase;

pub const REQUIRED_DECK_COUNT: u32 = 50;
pub const REQUIRED_CHEER_COUNT: u32 = 20;
pub const MAX_ANY_CARD_COUNT: u32 = 4;

/// Checks a submitted (oshi, main deck, cheer deck) triple against size and
/// per-card limits.
///
/// There is no error taxonomy beyond pass/fail; failures are logged and the
/// client receives a single invalid-deck error.
pub fn validate_deck(
    database: &CardDatabase,
    oshi_id: &CardName,
    deck: &BTreeMap<CardName, u32>,
    cheer_deck: &BTreeMap<CardName, u32>,
) -> bool {
    match database.card(oshi_id) {
        Some(card) if card.card_type == CardType::Oshi => {}
        _ => {
            info!(%oshi_id, "Deck invalid: oshi");
            return false;
        }
    }

    let mut deck_count = 0;
    for (card_id, &count) in deck {
        let Some(card) = database.card(card_id) else {
            info!(%card_id, "Deck invalid: card not found");
            return false;
        };
        if !matches!(
            card.card_type,
            CardType::HolomemDebut
                | CardType::HolomemBloom
                | CardType::HolomemSpot
                | CardType::Support
        ) {
            info!(%card_id, card_type = ?card.card_type, "Deck invalid: card type not allowed");
            return false;
        }

        let deck_limit = card.special_deck_limit.unwrap_or(MAX_ANY_CARD_COUNT);
        if count > deck_limit {
            info!(%card_id, count, deck_limit, "Deck invalid: too many copies");
            return false;
        }

        deck_count += count;
    }

    if deck_count != REQUIRED_DECK_COUNT {
        info!(deck_count, "Deck invalid: wrong main deck size");
        return false;
    }

    let mut cheer_count = 0;
    for (card_id, &count) in cheer_deck {
        match database.card(card_id) {
            Some(card) if card.card_type == CardType::Cheer => cheer_count += count,
            _ => {
                info!(%card_id, "Deck invalid: cheer deck card wrong");
                return false;
            }
        }
    }

    if cheer_count != REQUIRED_CHEER_COUNT {
        info!(cheer_count, "Deck invalid: wrong cheer deck size");
        return false;
    }

    true
}
