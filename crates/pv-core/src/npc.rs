//! Non-player characters and their repository.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::{ItemId, NpcId};
use crate::error::{CoreError, CoreResult};

/// A non-player character.
///
/// Allies and enemies are character types (the same vocabulary as
/// [`Player::character_type`](crate::Player::character_type)), not NPC ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    /// Identifier. Filled from the document key on load.
    #[serde(default = "unnamed_npc")]
    pub id: NpcId,
    /// Display name.
    pub name: String,
    /// Character types this NPC is friendly towards.
    #[serde(default)]
    pub allies: Vec<String>,
    /// Character types this NPC is hostile towards.
    #[serde(default)]
    pub enemies: Vec<String>,
    /// Current health.
    #[serde(default = "default_health")]
    pub health: i32,
    /// Maximum health.
    #[serde(default = "default_health")]
    pub health_max: i32,
    /// Damage dealt per blow.
    #[serde(default)]
    pub damage: i32,
    /// Experience level.
    #[serde(default = "default_level")]
    pub level: u32,
    /// Gold carried.
    #[serde(default)]
    pub gold: u32,
    /// Items carried (and offered when trading).
    #[serde(default)]
    pub items: Vec<ItemId>,
}

fn unnamed_npc() -> NpcId {
    NpcId::new("")
}

fn default_health() -> i32 {
    10
}

fn default_level() -> u32 {
    1
}

impl Npc {
    /// Create an NPC with default stats and no relationships.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NpcId::new(id),
            name: name.into(),
            allies: Vec::new(),
            enemies: Vec::new(),
            health: default_health(),
            health_max: default_health(),
            damage: 0,
            level: default_level(),
            gold: 0,
            items: Vec::new(),
        }
    }

    /// Add a character type to the ally list.
    pub fn with_ally(mut self, character_type: impl Into<String>) -> Self {
        self.allies.push(character_type.into());
        self
    }

    /// Add a character type to the enemy list.
    pub fn with_enemy(mut self, character_type: impl Into<String>) -> Self {
        self.enemies.push(character_type.into());
        self
    }

    /// Give the NPC an item.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(ItemId::new(item));
        self
    }

    /// True if the given character type is among this NPC's allies.
    pub fn is_ally_of(&self, character_type: &str) -> bool {
        self.allies.iter().any(|a| a == character_type)
    }

    /// True if the given character type is among this NPC's enemies.
    pub fn is_enemy_of(&self, character_type: &str) -> bool {
        self.enemies.iter().any(|e| e == character_type)
    }

    /// Check if the NPC is still standing.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

#[derive(Deserialize)]
struct NpcDocument {
    npcs: Option<BTreeMap<String, Npc>>,
}

/// All NPC records, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct NpcRepository {
    npcs: BTreeMap<NpcId, Npc>,
}

impl NpcRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse NPC records from an `{"npcs": {"<id>": {...}}}` document.
    ///
    /// Fields the record does not model (such as `conversations`) are ignored.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let doc: NpcDocument = serde_json::from_str(json)?;
        let entries = doc.npcs.ok_or(CoreError::MissingSection("npcs"))?;

        let mut repo = Self::new();
        for (id, mut npc) in entries {
            npc.id = NpcId::new(id);
            repo.insert(npc);
        }
        tracing::info!(npcs = repo.len(), "loaded npc records");
        Ok(repo)
    }

    /// Read and parse an NPC file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Add or replace an NPC.
    pub fn insert(&mut self, npc: Npc) {
        self.npcs.insert(npc.id.clone(), npc);
    }

    /// Look up an NPC by id.
    pub fn get(&self, id: &str) -> Option<&Npc> {
        self.npcs.get(id)
    }

    /// Find an NPC by display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Npc> {
        self.npcs
            .values()
            .find(|npc| npc.name.eq_ignore_ascii_case(name))
    }

    /// Iterate over all NPCs in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.values()
    }

    /// Number of NPCs.
    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    /// True if there are no NPCs.
    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}
