//! Life Grid CLI - Seed and pan grids from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::{Path, PathBuf};
use std::time::Instant;

use life_grid::{
    compute::{CellKind, GridEngine, GridStats},
    schema::{ConfigError, GridConfig, GridMode, PanScript, ScriptStep, Seed, load_json},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [pans]", args[0]);
        eprintln!();
        eprintln!("Seed a grid from JSON configuration and replay pans against it.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to grid configuration file");
        eprintln!("  pans         Diagonal pans when no script is present (default: 16)");
        eprintln!();
        eprintln!("Optional sibling files: <config>.seed.json, <config>.pans.json");
        eprintln!("Example files are printed with the --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let pans: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(16);

    if let Err(e) = run(&config_path, pans) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config_path: &Path, pans: usize) -> Result<(), ConfigError> {
    let config = GridConfig::load(config_path)?;

    let seed_path = config_path.with_extension("seed.json");
    let seed: Seed = if seed_path.exists() {
        load_json(&seed_path)?
    } else {
        Seed::default()
    };

    let script_path = config_path.with_extension("pans.json");
    let script: PanScript = if script_path.exists() {
        load_json(&script_path)?
    } else {
        PanScript::diagonal(pans)
    };

    println!("Life Grid");
    println!("=========");
    println!("Grid: {}x{} ({:?})", config.width, config.height, config.mode);
    println!("Threads: {}", config.threads);
    println!("Script steps: {}", script.steps.len());
    println!();

    match config.mode {
        GridMode::Binary => drive(config.binary_grid()?, &config, &seed, &script),
        GridMode::Teams { .. } => drive(config.team_grid()?, &config, &seed, &script),
    }
}

fn drive<K: CellKind>(
    mut grid: GridEngine<K>,
    config: &GridConfig,
    seed: &Seed,
    script: &PanScript,
) -> Result<(), ConfigError> {
    seed.apply(&mut grid)?;
    print_stats("Initial state", &grid.stats());

    // Replay once in place and once through the parallel path to cross-check
    let mut serial = grid.clone();
    let start = Instant::now();
    for step in &script.steps {
        match step {
            ScriptStep::PanParallel { dx, dy } => serial.pan(*dx, *dy),
            other => other.apply(&mut serial, config.threads)?,
        }
    }
    let serial_time = start.elapsed();

    let start = Instant::now();
    script.replay(&mut grid, config.threads)?;
    let mixed_time = start.elapsed();

    print_stats("Final state", &grid.stats());
    println!(
        "In-place replay: {:.3}ms, mixed replay: {:.3}ms",
        serial_time.as_secs_f64() * 1e3,
        mixed_time.as_secs_f64() * 1e3
    );

    if serial.cells() == grid.cells() {
        println!("Parallel and in-place pans agree.");
    } else {
        log::error!("parallel and in-place pans diverged");
        println!("MISMATCH between parallel and in-place pans!");
        std::process::exit(2);
    }
    Ok(())
}

fn print_stats(label: &str, stats: &GridStats) {
    println!("{}:", label);
    println!("  Size: {}x{}", stats.width, stats.height);
    println!("  Live cells: {}", stats.live_cells);
    println!("  Live fraction: {:.4}", stats.live_fraction);
    println!();
}

fn print_example_config() {
    let config = GridConfig {
        mode: GridMode::Teams { count: 4 },
        ..Default::default()
    };
    let seed = Seed::default();
    let script = PanScript::diagonal(4);

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
    println!();
    println!("Example seed (config.seed.json):");
    println!("{}", serde_json::to_string_pretty(&seed).unwrap());
    println!();
    println!("Example script (config.pans.json):");
    println!("{}", serde_json::to_string_pretty(&script).unwrap());
}
