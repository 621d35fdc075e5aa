//! Condition evaluation for dialogue lines.

use std::fmt;
use std::str::FromStr;

use pv_core::{ItemId, ItemRepository, Npc, Player};

use crate::error::ConditionError;

/// The closed set of condition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// Always satisfied.
    None,
    /// The NPC counts the player's character type among its allies.
    Ally,
    /// The NPC counts the player's character type among its enemies.
    Enemy,
    /// The player has reached a level.
    Level,
    /// The player carries an item.
    Item,
    /// The player has a specific character type.
    CharType,
}

/// Authored kind tokens, as they appear before the `=`.
const CONDITION_TAGS: [(&str, ConditionKind); 6] = [
    ("none", ConditionKind::None),
    ("ally", ConditionKind::Ally),
    ("enemy", ConditionKind::Enemy),
    ("level", ConditionKind::Level),
    ("item", ConditionKind::Item),
    ("char type", ConditionKind::CharType),
];

impl ConditionKind {
    /// Look up a kind by its authored token.
    pub fn from_tag(tag: &str) -> Option<Self> {
        CONDITION_TAGS
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, kind)| *kind)
    }

    /// The authored token for this kind.
    pub fn tag(self) -> &'static str {
        CONDITION_TAGS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(t, _)| *t)
            .unwrap_or("none")
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A parsed gating condition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Condition {
    /// Always true.
    #[default]
    None,
    /// True if the NPC's allies include the player's character type.
    Ally,
    /// True if the NPC's enemies include the player's character type.
    Enemy,
    /// True if the player's level is at least this value.
    Level(i64),
    /// True if the player carries the item with this catalog id.
    Item(ItemId),
    /// True if the player's character type is exactly this string.
    CharType(String),
}

impl Condition {
    /// Parse an authored `"kind"` or `"kind=parameter"` token.
    ///
    /// The parameter is everything after the first `=`. `level` parameters
    /// are checked here so a bad number fails at load time.
    pub fn parse(token: &str) -> Result<Self, ConditionError> {
        let (tag, parameter) = token.split_once('=').unwrap_or((token, ""));
        let kind = ConditionKind::from_tag(tag)
            .ok_or_else(|| ConditionError::UnknownKind(tag.to_string()))?;

        Ok(match kind {
            ConditionKind::None => Condition::None,
            ConditionKind::Ally => Condition::Ally,
            ConditionKind::Enemy => Condition::Enemy,
            ConditionKind::Level => {
                let level = parameter
                    .parse()
                    .map_err(|_| ConditionError::InvalidLevel(parameter.to_string()))?;
                Condition::Level(level)
            }
            ConditionKind::Item => Condition::Item(ItemId::new(parameter)),
            ConditionKind::CharType => Condition::CharType(parameter.to_string()),
        })
    }

    /// The kind of this condition.
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::None => ConditionKind::None,
            Condition::Ally => ConditionKind::Ally,
            Condition::Enemy => ConditionKind::Enemy,
            Condition::Level(_) => ConditionKind::Level,
            Condition::Item(_) => ConditionKind::Item,
            Condition::CharType(_) => ConditionKind::CharType,
        }
    }

    /// Evaluate the condition against the current state.
    pub fn matches(&self, npc: &Npc, player: &Player, items: &ItemRepository) -> bool {
        match self {
            Condition::None => true,
            Condition::Ally => npc.is_ally_of(&player.character_type),
            Condition::Enemy => npc.is_enemy_of(&player.character_type),
            Condition::Level(required) => i64::from(player.level) >= *required,
            Condition::Item(id) => match items.get(id.as_str()) {
                Some(item) => player.has_item(&item.id),
                None => {
                    tracing::warn!(item = %id, npc = %npc.id, "condition names an unknown item");
                    false
                }
            },
            Condition::CharType(character_type) => *character_type == player.character_type,
        }
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::None | Condition::Ally | Condition::Enemy => f.write_str(self.kind().tag()),
            Condition::Level(level) => write!(f, "level={level}"),
            Condition::Item(id) => write!(f, "item={id}"),
            Condition::CharType(t) => write!(f, "char type={t}"),
        }
    }
}
