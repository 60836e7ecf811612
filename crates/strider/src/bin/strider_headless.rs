//! # STRIDER Headless
//!
//! Runs the level without a window and prints what was generated.
//!
//! ```bash
//! # Reference config, clock seed, 60 seconds
//! ./strider_headless
//!
//! # Explicit config, seed and duration
//! ./strider_headless data/level.toml 12345 120
//! ```

use std::path::PathBuf;

use strider::procedural::{LevelConfig, LevelSeed};
use strider::{LevelRunner, PoolCapacities, RunnerConfig};

/// Ticks per simulated second.
const TICK_RATE: u32 = 60;

/// Default run length in seconds.
const DEFAULT_SECONDS: u32 = 60;

fn main() {
    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .map_or_else(|| PathBuf::from("data/level.toml"), PathBuf::from);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .map_or_else(LevelSeed::from_clock, LevelSeed::new);
    let seconds: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SECONDS);

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    STRIDER HEADLESS v0.1.0");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Config:   {}", config_path.display());
    println!("  Seed:     {}", seed.value());
    println!("  Duration: {seconds}s at {TICK_RATE} Hz");
    println!();

    let level = match LevelConfig::from_toml_file(&config_path) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    };

    let mut runner = match LevelRunner::from_level_config(
        level,
        &PoolCapacities::default(),
        seed,
        RunnerConfig::default(),
    ) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    };

    let dt = 1.0 / TICK_RATE as f32;
    for _ in 0..seconds * TICK_RATE {
        if let Err(e) = runner.tick(dt) {
            eprintln!("   ✗ FATAL: {e}");
            std::process::exit(1);
        }
    }
    runner.stop();

    let stats = runner.stats();
    println!("┌─ RUN ──────────────────────────────────────────────────────────┐");
    println!("│ Ticks:              {}", stats.ticks);
    println!("│ Distance:           {:.1}", stats.distance);
    println!("│ Planes generated:   {}", stats.planes_generated);
    println!("│ Planes recycled:    {}", stats.planes_recycled);
    println!("│ Content recycled:   {}", stats.content_recycled);
    println!("│ Spawn gaps:         {}", stats.gaps);
    println!("└────────────────────────────────────────────────────────────────┘");

    if let Some(report) = runner.last_report() {
        println!();
        println!("┌─ LAST PLANE ───────────────────────────────────────────────────┐");
        println!("│ Index:              {}", report.index);
        println!("│ Spawned at z:       {:.1}", report.plane.origin.z);
        println!("│ Repairs:            {}", report.repair.total_clears());
        println!("│ Obstacles:          {}", report.obstacles);
        println!("│ Coins:              {}", report.materialized.collectibles);
        println!("└────────────────────────────────────────────────────────────────┘");
        println!();
        print!("{}", runner.sequencer().grid());
    }
}
