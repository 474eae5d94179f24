//! KoTH loot file tool
//!
//! Usage:
//!   loot-tool list <file>                       - List loots in a loot file
//!   loot-tool show <file> <name>                - Print one loot
//!   loot-tool simulate <file> <name> -p Steve   - Print the commands a capture would run

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use koth_core::{CaptureEvent, CapperKind, ConsoleSender, Group, Player};
use koth_loot::{Loot, LootHandler, RewardDispatcher};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(name = "loot-tool", about = "Inspect KoTH loot files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List loots in a loot file
    List {
        file: PathBuf,
    },
    /// Print the contents and commands of a loot
    Show {
        file: PathBuf,
        name: String,
    },
    /// Print the console commands a capture would issue
    Simulate {
        file: PathBuf,
        name: String,
        /// Capturing player (repeat for a group)
        #[arg(short, long = "player", required = true)]
        players: Vec<String>,
        /// Capture as a group with this name
        #[arg(short, long)]
        group: Option<String>,
        /// Commands drawn when the loot uses random selection
        #[arg(short, long, default_value_t = 1)]
        amount: usize,
        /// Seed for random selection
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { file } => list(&file),
        Commands::Show { file, name } => show(&file, &name),
        Commands::Simulate {
            file,
            name,
            players,
            group,
            amount,
            seed,
        } => simulate(&file, &name, &players, group, amount, seed),
    }
}

fn open(file: &Path) -> Result<LootHandler> {
    if !file.exists() {
        bail!("Loot file not found: {}", file.display());
    }
    let handler = LootHandler::default();
    handler
        .load_from_path(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok(handler)
}

fn find(handler: &LootHandler, name: &str) -> Result<Loot> {
    handler
        .get(name)
        .with_context(|| format!("No loot named '{}'", name))
}

fn list(file: &Path) -> Result<()> {
    let handler = open(file)?;
    for name in handler.names() {
        let loot = find(&handler, &name)?;
        println!(
            "{:<24} {:>2} item(s) {:>2} command(s){}",
            loot.name(),
            loot.inventory().occupied_count(),
            loot.commands().len(),
            if loot.use_random() { " [random]" } else { "" }
        );
    }
    Ok(())
}

fn show(file: &Path, name: &str) -> Result<()> {
    let loot = find(&open(file)?, name)?;

    println!("Name:   {}", loot.name());
    println!("Title:  {}", loot.title());
    println!("Random: {}", loot.use_random());
    println!("Items:");
    for (slot, item) in loot.inventory().occupied() {
        println!("  [{:>2}] {}", slot, item);
    }
    println!("Commands:");
    for command in loot.commands() {
        println!("  /{}", command);
    }
    Ok(())
}

struct PrintingConsole;

impl ConsoleSender for PrintingConsole {
    fn dispatch_console(&self, command: &str) {
        println!("/{}", command);
    }
}

/// Everyone named on the command line stands in the area
struct SimulatedEvent {
    name: String,
    amount: usize,
}

impl CaptureEvent for SimulatedEvent {
    fn name(&self) -> &str {
        &self.name
    }

    fn loot_amount(&self) -> usize {
        self.amount
    }

    fn is_in_area(&self, _player: &Player) -> bool {
        true
    }
}

fn simulate(
    file: &Path,
    name: &str,
    players: &[String],
    group: Option<String>,
    amount: usize,
    seed: Option<u64>,
) -> Result<()> {
    let loot = find(&open(file)?, name)?;

    let mut players: Vec<Player> = players.iter().map(Player::random).collect();
    let capper = match group {
        Some(group) => CapperKind::group(Group::new(group.to_lowercase(), group, players)),
        None if players.len() == 1 => CapperKind::player(players.remove(0)),
        None => bail!("Several players need --group"),
    };

    let event = SimulatedEvent {
        name: loot.name().to_string(),
        amount,
    };
    let dispatcher = RewardDispatcher::new(Arc::new(PrintingConsole), true);
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("Simulating {} with seed {}", loot.name(), seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let report = dispatcher.dispatch_with_rng(&event, Some(&capper), &loot, &mut rng);
    eprintln!(
        "{} command(s) from {} template(s) for {} (seed {})",
        report.issued.len(),
        report.selected.len(),
        capper.name(),
        seed
    );
    Ok(())
}
