//! The player record.

use crate::entity::ItemId;

/// The player's record as the dialogue engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// The player's name.
    pub name: String,
    /// Current character type, e.g. `"Recruit"`. Matched against NPC ally
    /// and enemy lists and against `char type` conditions.
    pub character_type: String,
    /// Experience level.
    pub level: u32,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub health_max: i32,
    /// Damage dealt per blow.
    pub damage: i32,
    /// Gold carried.
    pub gold: u32,
    /// Items carried.
    pub inventory: Vec<ItemId>,
}

impl Player {
    /// Create a level 1 player of the given character type.
    pub fn new(name: impl Into<String>, character_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character_type: character_type.into(),
            level: 1,
            health: 100,
            health_max: 100,
            damage: 5,
            gold: 0,
            inventory: Vec::new(),
        }
    }

    /// Set the level.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set current and maximum health.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self.health_max = self.health_max.max(health);
        self
    }

    /// Set the gold carried.
    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    /// Put an item in the inventory.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.add_item(ItemId::new(item));
        self
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.inventory.contains(item)
    }

    /// Add an item to the inventory.
    pub fn add_item(&mut self, item: ItemId) {
        self.inventory.push(item);
    }

    /// Remove one copy of an item from the inventory.
    pub fn remove_item(&mut self, item: &ItemId) -> bool {
        if let Some(pos) = self.inventory.iter().position(|id| id == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if the player is still alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
