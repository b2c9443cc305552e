//! # Runeforge Command Line
//!
//! Runs combat encounters and crafting attempts against the standard catalog from the
//! terminal.

use clap::{Parser, Subcommand};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use runeforge::{
    analyze_grid, paced_enemy_turn, Catalog, Character, CombatEvent, CombatPhase,
    CombatSession, ControlValues, CraftingGrid, DiscoveryStore, InMemoryDiscoveries, Inventory,
    PlayerAction, RuneforgeError, RuneforgeResult, TurnCanceller, Workbench, EngineConfig,
    GRID_SIZE,
};
use std::path::PathBuf;

/// Command line arguments for Runeforge.
#[derive(Parser, Debug)]
#[command(name = "runeforge")]
#[command(about = "Combat and crafting simulation engine for a crafting RPG")]
#[command(version)]
struct Args {
    /// Random seed for reproducible rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fight an enemy from the standard catalog
    Fight {
        /// Enemy id
        #[arg(default_value = "forest_goblin")]
        enemy: String,

        /// Hero level
        #[arg(long, default_value_t = 5)]
        level: u32,

        /// Item ids to equip before the fight
        #[arg(long, value_delimiter = ',')]
        equip: Vec<String>,

        /// Skip the enemy turn delay
        #[arg(long)]
        fast: bool,
    },
    /// Craft a recipe by laying its inputs on the grid
    Craft {
        /// Recipe id
        recipe: String,

        /// Grid cells to fill, in input order
        #[arg(long, value_delimiter = ',')]
        cells: Vec<usize>,

        #[arg(long, default_value_t = 0)]
        magic: u32,

        #[arg(long, default_value_t = 50)]
        stability: u32,

        #[arg(long, default_value_t = 0)]
        curse: u32,

        /// Craft straight from the inventory instead of the grid
        #[arg(long)]
        quick: bool,

        /// JSON file of discovered secret recipes
        #[arg(long)]
        discoveries: Option<PathBuf>,
    },
    /// Show which patterns a set of filled cells forms
    Patterns {
        #[arg(value_delimiter = ',')]
        cells: Vec<usize>,
    },
    /// List catalog content
    List {
        #[arg(value_enum, default_value_t = ListKind::Recipes)]
        kind: ListKind,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ListKind {
    Items,
    Recipes,
    Enemies,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting Runeforge v{}", runeforge::VERSION);

    if let Err(e) = run(args).await {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> RuneforgeResult<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let catalog = Catalog::standard();
    catalog.validate()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match args.command {
        Command::Fight {
            enemy,
            level,
            equip,
            fast,
        } => {
            let mut config = config;
            if fast {
                config.combat.enemy_turn_delay_ms = 0;
            }
            fight(&catalog, &config, &enemy, level, &equip, &mut rng).await
        }
        Command::Craft {
            recipe,
            cells,
            magic,
            stability,
            curse,
            quick,
            discoveries,
        } => {
            let controls = ControlValues::new(magic, stability, curse);
            craft(
                &catalog,
                &config,
                &recipe,
                &cells,
                controls,
                quick,
                discoveries,
                &mut rng,
            )
        }
        Command::Patterns { cells } => {
            let grid = grid_from_cells(&cells)?;
            let analysis = analyze_grid(&grid);
            match analysis.pattern_tag() {
                Some(tag) => println!("Patterns: {}", tag),
                None => println!("No patterns"),
            }
            for (cell, patterns) in analysis.cell_patterns() {
                let names: Vec<&str> = patterns.iter().map(|p| p.name()).collect();
                println!("  cell {}: {}", cell, names.join(", "));
            }
            Ok(())
        }
        Command::List { kind } => {
            list(&catalog, kind);
            Ok(())
        }
    }
}

/// Initializes logging based on the specified log level.
fn initialize_logging(log_level: &str) -> RuneforgeResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| RuneforgeError::InvalidState(e.to_string()))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .try_init()
            .map_err(|e| RuneforgeError::InvalidState(e.to_string()))?;
    }

    Ok(())
}

async fn fight(
    catalog: &Catalog,
    config: &EngineConfig,
    enemy_id: &str,
    level: u32,
    equip: &[String],
    rng: &mut StdRng,
) -> RuneforgeResult<()> {
    let mut hero = Character::with_ring_slots("Hero", config.ring_slots);
    hero.level = level;
    hero.strength = 5 + level;
    hero.speed = 5 + level / 2;
    let mut inventory = Inventory::new();
    for item_id in equip {
        inventory.add(item_id, 1);
        runeforge::equip_item(&mut hero, &mut inventory, &catalog.items, item_id)?;
    }

    let mut session = CombatSession::new(config.combat.clone());
    print_events(&catalog.start_combat(&mut session, &hero, enemy_id)?);

    while session.is_active() {
        if session.phase() == CombatPhase::EnemyTurn {
            let (_canceller, cancel) = TurnCanceller::new();
            if let Some(events) = paced_enemy_turn(&mut session, rng, cancel).await {
                print_events(&events);
            }
            continue;
        }

        let action = choose_action(&session);
        print_events(&session.player_action(&action, rng));
    }

    match session.phase() {
        CombatPhase::Victory => {
            if let Some(receipt) = session.collect_rewards(&mut hero, &mut inventory) {
                println!(
                    "Collected {} gold and {} experience",
                    receipt.rewards.gold, receipt.rewards.experience
                );
                if let Some(level_up) = receipt.level_up {
                    println!("Level up! Now level {}", level_up.new_level);
                }
            }
        }
        CombatPhase::Defeat => {
            session.apply_defeat(&mut hero);
            println!(
                "Recovered with {} health and {} magic",
                hero.health, hero.magic_points
            );
        }
        _ => {}
    }
    println!(
        "{}: level {}, {}/{} HP, {}/{} MP, {} gold",
        hero.name,
        hero.level,
        hero.health,
        hero.max_health,
        hero.magic_points,
        hero.max_magic_points,
        hero.gold
    );
    Ok(())
}

/// Uses the first affordable special skill, otherwise attacks.
fn choose_action(session: &CombatSession) -> PlayerAction {
    session
        .available_actions()
        .iter()
        .map(|a| &a.action)
        .find(|a| matches!(a, PlayerAction::Special(_)))
        .cloned()
        .unwrap_or(PlayerAction::Attack)
}

fn print_events(events: &[CombatEvent]) {
    for event in events {
        match event {
            CombatEvent::Started { enemy, first } => {
                println!("A wild {} appears! ({:?} first)", enemy, first)
            }
            CombatEvent::ActionResolved { outcome, .. } => println!("  {}", outcome.message),
            CombatEvent::StatusTicked { entity, damage } if *damage > 0 => {
                println!("  {} suffers {} damage from status effects", entity, damage)
            }
            CombatEvent::StatusTicked { .. } => {}
            CombatEvent::ActionRejected { reason } => println!("  {}", reason),
            CombatEvent::FleeFailed => println!("  Failed to flee!"),
            CombatEvent::Ended(outcome) => println!("Combat over: {:?}", outcome),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn craft(
    catalog: &Catalog,
    config: &EngineConfig,
    recipe_id: &str,
    cells: &[usize],
    controls: ControlValues,
    quick: bool,
    discoveries_path: Option<PathBuf>,
    rng: &mut StdRng,
) -> RuneforgeResult<()> {
    let recipe = catalog.recipes.get(recipe_id)?;
    let mut crafter = Character::with_ring_slots("Crafter", config.ring_slots);
    let mut inventory = Inventory::new();
    for input in &recipe.inputs {
        inventory.add(input, 1);
    }
    let mut discoveries = match &discoveries_path {
        Some(path) if path.exists() => InMemoryDiscoveries::load(path)?,
        _ => InMemoryDiscoveries::new(),
    };

    let resolver = catalog.resolver(&config.crafting);
    let mut bench = Workbench {
        character: &mut crafter,
        inventory: &mut inventory,
        discoveries: &mut discoveries,
    };
    let outcome = if quick {
        resolver.quick_craft(&mut bench, recipe_id, controls, rng)?
    } else {
        let mut grid = CraftingGrid::new();
        for (position, input) in recipe.inputs.iter().enumerate() {
            let cell = cells.get(position).copied().unwrap_or(position);
            grid.place(cell, input, bench.inventory)?;
        }
        resolver.craft_from_grid(&mut bench, &mut grid, Some(recipe_id), controls, rng)?
    };

    println!("{}", outcome.message);
    println!(
        "Chance {:.0}%, magic spent {}",
        outcome.success_chance, outcome.magic_spent
    );
    if let Some(crafted) = &outcome.crafted {
        println!("{} [{:?}]", crafted.name, crafted.rarity);
        if let Some(pattern) = &crafted.pattern {
            println!("  patterns: {}", pattern);
        }
        for (stat, amount) in &crafted.stat_bonuses {
            println!("  {} {:+}", stat, amount);
        }
    }
    for skill in &outcome.skill_level_ups {
        println!("{} levelled up!", skill);
    }

    if let Some(path) = discoveries_path {
        discoveries.save(path)?;
        info!("{} recipes discovered", discoveries.discovered().len());
    }
    Ok(())
}

fn grid_from_cells(cells: &[usize]) -> RuneforgeResult<CraftingGrid> {
    let mut layout = [None; GRID_SIZE];
    for &cell in cells {
        let slot = layout.get_mut(cell).ok_or_else(|| {
            RuneforgeError::InvalidAction(format!("Grid cell {} is out of range", cell))
        })?;
        *slot = Some("item");
    }
    Ok(CraftingGrid::from_cells(layout))
}

fn list(catalog: &Catalog, kind: ListKind) {
    match kind {
        ListKind::Items => {
            let mut items: Vec<_> = catalog.items.iter().collect();
            items.sort_by(|a, b| a.id.cmp(&b.id));
            for item in items {
                println!("{:<18} {:<18} {:?} {:?}", item.id, item.name, item.item_type, item.rarity);
            }
        }
        ListKind::Recipes => {
            for recipe in catalog.recipes.iter() {
                let secret = if recipe.is_secret { " (secret)" } else { "" };
                println!(
                    "{:<16} {} <- {}{}",
                    recipe.id,
                    recipe.output,
                    recipe.inputs.join(" + "),
                    secret
                );
            }
        }
        ListKind::Enemies => {
            let mut enemies: Vec<_> = catalog.enemies.iter().collect();
            enemies.sort_by_key(|e| e.level);
            for enemy in enemies {
                println!(
                    "{:<16} {:<16} level {:>2}, {} HP, speed {}",
                    enemy.id, enemy.name, enemy.level, enemy.health, enemy.speed
                );
            }
        }
    }
}
