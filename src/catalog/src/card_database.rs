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

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use data::core::primitives::CardName;
use data::printed_cards::printed_card::PrintedCard;
use tracing::info;

/// Default location of the card manifest relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "decks/card_definitions.json";

/// In-memory dictionary of every printed card definition, loaded from the
/// JSON manifest at startup and read-only afterwards.
///
/// The manifest is a JSON array of card objects. Unknown effect verbs or
/// malformed definitions fail the load, which is a fatal startup error: the
/// server never runs with a partial card pool.
#[derive(Debug, Clone)]
pub struct CardDatabase {
    cards: Arc<HashMap<CardName, PrintedCard>>,
}

impl CardDatabase {
    /// Loads the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read card manifest at {}", path.display()))?;
        let definitions: Vec<PrintedCard> =
            serde_json::from_str(&text).wrap_err("Failed to parse card manifest")?;

        let mut cards = HashMap::with_capacity(definitions.len());
        for card in definitions {
            let name = card.card_id.clone();
            if cards.insert(name.clone(), card).is_some() {
                bail!("Duplicate card definition: {name}");
            }
        }

        info!(count = cards.len(), path = %path.display(), "Loaded card definitions");
        Ok(Self { cards: Arc::new(cards) })
    }

    /// Builds a database directly from definitions, for tests and tools.
    pub fn from_definitions(definitions: Vec<PrintedCard>) -> Self {
        let cards =
            definitions.into_iter().map(|card| (card.card_id.clone(), card)).collect();
        Self { cards: Arc::new(cards) }
    }

    /// Looks up a card by printed identity.
    pub fn card(&self, name: &CardName) -> Option<&PrintedCard> {
        self.cards.get(name)
    }

    /// Shared handle to the full definition table, installed on each match.
    pub fn definitions(&self) -> Arc<HashMap<CardName, PrintedCard>> {
        Arc::clone(&self.cards)
    }
}
