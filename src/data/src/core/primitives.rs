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

use enum_iterator::Sequence;
use enum_map::Enum;
use enumset::EnumSetType;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use uuid::Uuid;

/// The six colors of cheer.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Enum, Sequence, Ord, PartialOrd)]
#[serde(rename_all = "lowercase")]
#[enumset(serialize_repr = "list")]
pub enum CheerColor {
    White,
    Green,
    Red,
    Blue,
    Yellow,
    Purple,
}

/// Types of printed cards.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Sequence)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Oshi,
    HolomemDebut,
    HolomemBloom,
    HolomemSpot,
    Support,
    Cheer,
}

impl CardType {
    /// Is this a holomem that can occupy a stage slot?
    pub fn is_stage_holomem(&self) -> bool {
        matches!(self, CardType::HolomemDebut | CardType::HolomemBloom | CardType::HolomemSpot)
    }
}

/// Identifies one of the players in a match.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Enum, Ord, PartialOrd, Sequence)]
pub enum PlayerName {
    /// The player who takes the first turn
    One,
    /// The player who takes the second turn
    Two,
}

impl PlayerName {
    pub fn opponent(&self) -> PlayerName {
        match self {
            PlayerName::One => PlayerName::Two,
            PlayerName::Two => PlayerName::One,
        }
    }
}

/// Identifies a struct that is 1:1 associated with a given [PlayerName].
pub trait HasPlayerName {
    fn player_name(&self) -> PlayerName;
}

impl HasPlayerName for PlayerName {
    fn player_name(&self) -> PlayerName {
        *self
    }
}

new_key_type! {
    /// Identifies a card instance within a match.
    ///
    /// Assigned when the card is instantiated from its printed definition at
    /// match setup and stable for the duration of the match, across all zone
    /// moves. This is the `game_card_id` exposed on the wire.
    pub struct CardId;
}

/// Identifies a struct that is 1:1 associated with a given [CardId].
pub trait HasCardId {
    fn card_id(&self) -> CardId;
}

impl HasCardId for CardId {
    fn card_id(&self) -> CardId {
        *self
    }
}

/// The printed identity of a card, e.g. "hBP02-020".
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(pub String);

impl CardName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sentinel card identity sent in place of a card the recipient cannot see.
pub const UNKNOWN_CARD_ID: &str = "UNKNOWN";

/// A zone is a place where cards can be during a match.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Sequence)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Oshi,
    Deck,
    Hand,
    Archive,
    Life,
    CheerDeck,
    Holopower,
    Center,
    Collab,
    Backstage,
    /// Transient zone for a support card while its effects resolve, before it
    /// is archived or attached.
    Floating,
    /// Attached to a holomem, as cheer or support. The holder's attachment
    /// lists are the authoritative location.
    Holomem,
}

impl Zone {
    /// Is the identity of cards in this zone public to both players?
    pub fn is_public(&self) -> bool {
        match self {
            Zone::Oshi => true,
            Zone::Deck => false,
            Zone::Hand => false,
            Zone::Archive => true,
            Zone::Life => false,
            Zone::CheerDeck => false,
            Zone::Holopower => false,
            Zone::Center => true,
            Zone::Collab => true,
            Zone::Backstage => true,
            Zone::Floating => true,
            Zone::Holomem => true,
        }
    }

    /// Is this zone visible to its owner while hidden from the opponent?
    pub fn is_visible_to_owner(&self) -> bool {
        matches!(self, Zone::Hand)
    }

    /// Is this one of the three stage slots a holomem can occupy?
    pub fn is_stage(&self) -> bool {
        matches!(self, Zone::Center | Zone::Collab | Zone::Backstage)
    }
}

/// Unique identifier for a match.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

/// Unique identifier for a connected user.
///
/// A 'user' is an operator of this software outside of the context of any
/// match. A 'player' is a participant within a match.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(pub Uuid);
