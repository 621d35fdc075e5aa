use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use pv_dialogue::LoadPolicy;

pub fn run(data: &Path, items: &Path) -> Result<(), String> {
    let world = super::load_world(data, items, LoadPolicy::SkipInvalid)?;

    let talkers: Vec<_> = world
        .npcs
        .iter()
        .filter_map(|npc| world.store.graph(npc.id.as_str()).map(|g| (npc, g)))
        .collect();

    if talkers.is_empty() {
        println!("  No conversations found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["NPC", "Name", "Openings", "Replies"]);

    for (npc, graph) in &talkers {
        let openings = graph.entry_candidates().count();
        table.add_row(vec![
            npc.id.to_string(),
            npc.name.clone(),
            openings.to_string(),
            (graph.len() - openings).to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} NPCs to talk to", talkers.len());

    Ok(())
}
