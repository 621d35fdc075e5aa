//! World records for Palaver: NPCs, the player, and the item catalog.
//!
//! The dialogue engine consumes these through plain accessors. Loading them
//! from JSON is provided for convenience; the conversation core never writes
//! to a repository.

/// Identifier newtypes for NPCs and items.
pub mod entity;
/// Error types, including the terminal player-death signal.
pub mod error;
/// Items and the item catalog.
pub mod item;
/// Non-player characters and their repository.
pub mod npc;
/// The player record.
pub mod player;

/// Re-export identifier types.
pub use entity::{ItemId, NpcId};
/// Re-export error types.
pub use error::{CoreError, CoreResult, PlayerDeath};
/// Re-export item types.
pub use item::{Item, ItemRepository};
/// Re-export NPC types.
pub use npc::{Npc, NpcRepository};
/// Re-export the player record.
pub use player::Player;
