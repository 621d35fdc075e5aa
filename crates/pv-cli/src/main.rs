//! CLI frontend for Palaver: talk to NPCs and check dialogue data.

mod commands;
mod console;
mod encounter;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "palaver",
    about = "Palaver: branching NPC conversations for text adventures",
    version,
    propagate_version = true
)]
struct Cli {
    /// NPC document with conversations
    #[arg(long, global = true, default_value = "json/npcs.json")]
    data: PathBuf,

    /// Item catalog used by item conditions and trading
    #[arg(long, global = true, default_value = "json/items.json")]
    items: PathBuf,

    /// Log conversation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to an NPC by id or name
    #[command(visible_aliases = ["t", "speakto"])]
    Talk {
        /// NPC id or name (case-insensitive, close spellings accepted)
        npc: String,

        /// Player name
        #[arg(long, default_value = "Adventurer")]
        name: String,

        /// Player character type, matched against NPC allies and enemies
        #[arg(long, default_value = "Recruit")]
        char_type: String,

        /// Player level
        #[arg(long, default_value = "1")]
        level: u32,

        /// Player health (also the maximum)
        #[arg(long, default_value = "100")]
        health: i32,

        /// Starting gold
        #[arg(long, default_value = "0")]
        gold: u32,

        /// Item id in the player's inventory (repeatable)
        #[arg(long = "item")]
        carry: Vec<String>,

        /// RNG seed for combat rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Load all conversations and report problems
    Check {
        /// Stop at the first invalid conversation
        #[arg(long)]
        strict: bool,
    },

    /// List NPCs that have something to say
    List,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "palaver=debug,pv_dialogue=debug,pv_core=debug"
    } else {
        "palaver=info,pv_dialogue=warn,pv_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Talk {
            npc,
            name,
            char_type,
            level,
            health,
            gold,
            carry,
            seed,
        } => {
            let player = commands::talk::PlayerArgs {
                name,
                char_type,
                level,
                health,
                gold,
                items: carry,
            };
            commands::talk::run(&cli.data, &cli.items, &npc, player, seed)
        }
        Commands::Check { strict } => commands::check::run(&cli.data, &cli.items, strict),
        Commands::List => commands::list::run(&cli.data, &cli.items),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
