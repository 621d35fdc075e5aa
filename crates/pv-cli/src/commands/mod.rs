pub mod check;
pub mod list;
pub mod talk;

use std::path::Path;

use pv_core::{ItemRepository, NpcRepository};
use pv_dialogue::{DialogueStore, LoadPolicy, StoreConfig};

/// Everything a command needs from the data files.
pub struct World {
    pub npcs: NpcRepository,
    pub items: ItemRepository,
    pub store: DialogueStore,
}

/// Load NPC records and conversations from `data` and the item catalog
/// from `items`.
///
/// A missing item catalog is tolerated; item conditions then never match.
fn load_world(data: &Path, items: &Path, policy: LoadPolicy) -> Result<World, String> {
    let json = std::fs::read_to_string(data)
        .map_err(|e| format!("cannot read {}: {e}", data.display()))?;

    let npcs = NpcRepository::from_json_str(&json)
        .map_err(|e| format!("{}: {e}", data.display()))?;
    let config = StoreConfig::default().with_policy(policy);
    let store = DialogueStore::from_json_str(&json, &config)
        .map_err(|e| format!("{}: {e}", data.display()))?;

    let items = if items.exists() {
        ItemRepository::from_path(items).map_err(|e| e.to_string())?
    } else {
        tracing::warn!(path = %items.display(), "no item catalog, item conditions will not match");
        ItemRepository::new()
    };

    Ok(World { npcs, items, store })
}
