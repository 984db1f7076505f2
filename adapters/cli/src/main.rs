#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Lane Defence session.

use std::{collections::VecDeque, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use lane_defence_core::{CellCoord, Command, DefenderKind, Kind, PlacementError, Rules, RunStatus};
use lane_defence_world::{self as world, query, World};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Runs the simulation at a fixed frame rate until the run concludes.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", version, about)]
struct Cli {
    /// TOML rule overlay applied on top of the built-in rules.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Overrides the random seed from the rules.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 100)]
    frame_ms: u64,
    /// Upper bound on simulated frames.
    #[arg(long, default_value_t = 9_000)]
    max_frames: u64,
    /// Queues a placement, retried each frame until it succeeds.
    #[arg(long = "place", value_name = "ROW,COL,KIND", value_parser = parse_placement)]
    placements: Vec<Placement>,
    /// Leaves dropped resources uncollected.
    #[arg(long)]
    no_collect: bool,
}

#[derive(Clone, Copy, Debug)]
struct Placement {
    cell: CellCoord,
    kind: DefenderKind,
}

fn parse_placement(value: &str) -> Result<Placement, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [row, column, kind] = parts.as_slice() else {
        return Err(format!("expected ROW,COL,KIND but found `{value}`"));
    };
    let row = row
        .parse::<u32>()
        .map_err(|error| format!("invalid row `{row}`: {error}"))?;
    let column = column
        .parse::<u32>()
        .map_err(|error| format!("invalid column `{column}`: {error}"))?;
    let kind = DefenderKind::from_name(kind).ok_or_else(|| {
        let known: Vec<&str> = DefenderKind::ALL.iter().map(|kind| kind.name()).collect();
        format!("unknown defender `{kind}`, expected one of {}", known.join(", "))
    })?;
    Ok(Placement {
        cell: CellCoord::new(row, column),
        kind,
    })
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lane_defence=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    ensure!(cli.frame_ms > 0, "--frame-ms must be greater than zero");

    let mut rules = match &cli.config {
        Some(path) => lane_defence_config::load(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => Rules::default(),
    };
    if let Some(seed) = cli.seed {
        rules.rng_seed = seed;
    }

    let mut world = World::new(rules);
    for placement in &cli.placements {
        ensure!(
            query::grid(&world).contains(placement.cell),
            "placement {} lies outside the {}x{} grid",
            placement.cell,
            query::grid(&world).rows(),
            query::grid(&world).columns()
        );
    }
    println!("{}", query::welcome_banner(&world));

    let frame = Duration::from_millis(cli.frame_ms);
    let mut pending: VecDeque<Placement> = cli.placements.into_iter().collect();
    let mut events = Vec::new();
    let mut frames = 0;

    while frames < cli.max_frames && !query::status(&world).is_over() {
        if let Some(placement) = pending.front().copied() {
            match world.place_defender(placement.kind, placement.cell, &mut events) {
                Ok(_) => {
                    let _ = pending.pop_front();
                }
                Err(PlacementError::Occupied) => {
                    warn!(cell = %placement.cell, "dropping placement into an occupied cell");
                    let _ = pending.pop_front();
                }
                Err(_) => {}
            }
        }

        if !cli.no_collect {
            let ready: Vec<_> = query::resource_view(&world)
                .iter()
                .map(|unit| unit.id)
                .collect();
            for resource in ready {
                world::apply(&mut world, Command::CollectResource { resource }, &mut events);
            }
        }

        world::apply(&mut world, Command::Tick { dt: frame }, &mut events);
        events.clear();
        frames += 1;
    }

    summarize(&world, frames, pending.len());
    Ok(())
}

fn summarize(world: &World, frames: u64, pending: usize) {
    let status = query::status(world);
    println!("status:     {status}");
    if status == RunStatus::Running {
        println!("            stopped after {frames} frames");
    }
    println!(
        "waves:      {:.0}% complete",
        query::wave_progress(world) * 100.0
    );
    println!("balance:    {}", query::balance(world));
    println!("defenders:  {}", query::defender_view(world).len());
    println!("attackers:  {}", query::attacker_view(world).len());
    if pending > 0 {
        println!("unplaced:   {pending}");
    }
}
