use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use pv_core::NpcRepository;
use pv_dialogue::{ActionKind, DialogueGraph, LoadPolicy};

pub fn run(data: &Path, items: &Path, strict: bool) -> Result<(), String> {
    let policy = if strict {
        LoadPolicy::FailFast
    } else {
        LoadPolicy::SkipInvalid
    };
    let world = super::load_world(data, items, policy)?;

    if !world.store.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["NPC", "Name", "Lines", "Entry lines", "Actions"]);

        let mut silent = Vec::new();
        for id in world.store.npc_ids() {
            let Some(graph) = world.store.graph(id.as_str()) else {
                continue;
            };
            let name = npc_name(&world.npcs, id.as_str());
            let entries = graph.entry_candidates().count();
            if entries == 0 {
                silent.push(id);
            }

            table.add_row(vec![
                id.to_string(),
                name.to_string(),
                graph.len().to_string(),
                entries.to_string(),
                actions(graph),
            ]);
        }

        println!("{table}");
        println!();

        for id in silent {
            eprintln!("  {} {id}: no line can open this conversation", "warning".yellow().bold());
        }
    }

    let failures = world.store.failures();
    for failure in failures {
        eprintln!("  {} {}: {}", "rejected".red().bold(), failure.npc, failure.error);
    }
    if !failures.is_empty() {
        return Err(format!(
            "{} conversation{} rejected",
            failures.len(),
            if failures.len() == 1 { "" } else { "s" }
        ));
    }

    let lines: usize = world
        .store
        .npc_ids()
        .into_iter()
        .filter_map(|id| world.store.graph(id.as_str()))
        .map(DialogueGraph::len)
        .sum();
    println!("  All checks passed.");
    println!("  {} conversations, {lines} lines", world.store.len());

    Ok(())
}

/// Display name for a table row, `-` when the NPC has no record.
fn npc_name<'a>(npcs: &'a NpcRepository, id: &str) -> &'a str {
    npcs.get(id).map_or("-", |npc| npc.name.as_str())
}

/// The distinct actions with an effect, in first-use order.
fn actions(graph: &DialogueGraph) -> String {
    let mut seen: Vec<ActionKind> = Vec::new();
    for node in graph.nodes() {
        if node.action.has_effect() && !seen.contains(&node.action) {
            seen.push(node.action);
        }
    }
    if seen.is_empty() {
        "none".to_string()
    } else {
        seen.iter()
            .map(|a| a.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
