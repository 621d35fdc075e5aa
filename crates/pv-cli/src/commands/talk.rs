use std::io;
use std::path::Path;

use colored::Colorize;
use pv_core::{Npc, NpcRepository, Player};
use pv_dialogue::{ConversationContext, ConversationDriver, ConversationOutcome, LoadPolicy};
use strsim::jaro_winkler;

use crate::console::Console;
use crate::encounter::{Barter, Brawl};

/// Minimum similarity for a fuzzy NPC match (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// The player the conversation is held with.
pub struct PlayerArgs {
    pub name: String,
    pub char_type: String,
    pub level: u32,
    pub health: i32,
    pub gold: u32,
    pub items: Vec<String>,
}

impl PlayerArgs {
    fn into_player(self) -> Player {
        let mut player = Player::new(self.name, self.char_type)
            .with_level(self.level)
            .with_health(self.health)
            .with_gold(self.gold);
        for item in self.items {
            player = player.with_item(item);
        }
        player
    }
}

pub fn run(
    data: &Path,
    items: &Path,
    target: &str,
    player: PlayerArgs,
    seed: u64,
) -> Result<(), String> {
    let world = super::load_world(data, items, LoadPolicy::SkipInvalid)?;

    let Some(npc) = resolve_npc(&world.npcs, target) else {
        println!("Unable to talk to {target}");
        return Ok(());
    };

    let mut player = player.into_player();
    let driver = ConversationDriver::new(&world.store, &world.items);

    let mut sink = Console::new(io::stdin(), io::stdout());
    let mut chooser = Console::new(io::stdin(), io::stdout());
    let mut combat = Brawl::new(seed, io::stdout());
    let mut trading = Barter::new(&world.items, Console::new(io::stdin(), io::stdout()));
    let mut ctx = ConversationContext::new(&mut sink, &mut chooser, &mut combat, &mut trading);

    match driver.start_conversation(npc, &mut player, &mut ctx) {
        Ok(ConversationOutcome::NotStarted) => {
            tracing::info!(npc = %npc.id, "nothing to say");
            Ok(())
        }
        Ok(outcome) => {
            tracing::info!(npc = %npc.id, lines = outcome.lines(), "conversation ended");
            Ok(())
        }
        Err(death) => {
            println!("{}", "You have died.".red().bold());
            Err(death.to_string())
        }
    }
}

/// Find an NPC by id, by name (case-insensitive), or by the closest name.
pub fn resolve_npc<'a>(npcs: &'a NpcRepository, input: &str) -> Option<&'a Npc> {
    if let Some(npc) = npcs.get(input) {
        return Some(npc);
    }
    if let Some(npc) = npcs.find_by_name(input) {
        return Some(npc);
    }

    let input_lower = input.to_lowercase();
    let mut best: Option<(&Npc, f64)> = None;
    for npc in npcs.iter() {
        let score = jaro_winkler(&input_lower, &npc.name.to_lowercase())
            .max(jaro_winkler(&input_lower, &npc.id.as_str().to_lowercase()));
        if score >= FUZZY_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((npc, score));
        }
    }
    best.map(|(npc, _)| npc)
}
