#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state and tick orchestration for Lane Defence.
//!
//! Every tick runs its sub-updates in a fixed order: defenders, attackers,
//! projectiles, pruning, resources, waves, lane guards, cooldowns and finally
//! the win check. Later stages observe the effects of earlier ones within the
//! same tick.

mod attackers;
mod combat;
mod defenders;
mod entity;
mod grid;
mod lane_guards;
mod projectiles;
mod resources;

use std::time::Duration;

use lane_defence_core::{
    AttackerKind, CellCoord, CollectionError, Command, DefenderId, DefenderKind, DefenderLoss,
    Event, Kind, PlacementError, Position, ResourceId, Rules, RunStatus, StatTable,
    WELCOME_BANNER,
};
use lane_defence_system_waves::{Config as WaveConfig, WaveScheduler};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

pub use grid::Grid;

use attackers::{Attacker, AttackerContext};
use defenders::{Defender, DefenderContext};
use entity::{Entity, Ids};
use lane_guards::LaneGuard;
use projectiles::{Projectile, ProjectileContext};
use resources::{Resource, ResourceContext, RESOURCE_EXTENT};

/// Moves a running world into a terminal status; later calls are ignored.
pub(crate) fn conclude(status: &mut RunStatus, outcome: RunStatus, out_events: &mut Vec<Event>) {
    if status.is_over() {
        return;
    }
    info!(status = %outcome, "run concluded");
    *status = outcome;
    out_events.push(Event::RunConcluded { status: outcome });
}

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    grid: Grid,
    defenders: Vec<Defender>,
    attackers: Vec<Attacker>,
    projectiles: Vec<Projectile>,
    resources: Vec<Resource>,
    guards: Vec<LaneGuard>,
    waves: WaveScheduler,
    cooldowns: StatTable<DefenderKind, Duration>,
    balance: u32,
    status: RunStatus,
    natural_timer: Duration,
    victory_declared: bool,
    rng: ChaCha8Rng,
    ids: Ids,
    tick_index: u64,
}

impl World {
    /// Creates a new world governed by the provided rules.
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        let dimensions = rules.grid;
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::new(dimensions.rows, dimensions.columns),
            defenders: Vec::new(),
            attackers: Vec::new(),
            projectiles: Vec::new(),
            resources: Vec::new(),
            guards: (0..dimensions.rows).map(LaneGuard::new).collect(),
            waves: WaveScheduler::new(WaveConfig::from_rules(&rules)),
            cooldowns: StatTable::from_fn(|_| Duration::ZERO),
            balance: rules.starting_balance,
            status: RunStatus::Running,
            natural_timer: Duration::ZERO,
            victory_declared: false,
            rng: ChaCha8Rng::seed_from_u64(rules.rng_seed),
            ids: Ids::new(),
            tick_index: 0,
            rules,
        }
    }

    /// Places a defender, debiting its cost and starting its type's cooldown.
    ///
    /// # Errors
    ///
    /// Returns the first failed check in the order `RunOver`, `Occupied`,
    /// `OnCooldown`, `InsufficientResource`; a rejected placement leaves the
    /// world untouched apart from the rejection event.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the grid.
    pub fn place_defender(
        &mut self,
        kind: DefenderKind,
        cell: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<DefenderId, PlacementError> {
        if let Err(reason) = self.check_placement(kind, cell) {
            debug!(?kind, %cell, %reason, "placement rejected");
            out_events.push(Event::DefenderPlacementRejected { kind, cell, reason });
            return Err(reason);
        }

        let stats = *self.rules.defenders.get(kind);
        let id = self.ids.defender();
        self.grid.place(cell, id)?;
        self.balance -= stats.cost;
        *self.cooldowns.get_mut(kind) = stats.cooldown;
        self.defenders.push(Defender::new(id, kind, cell, &self.rules));

        debug!(?kind, %cell, defender = id.get(), "defender placed");
        out_events.push(Event::DefenderPlaced {
            defender: id,
            kind,
            cell,
        });
        Ok(id)
    }

    fn check_placement(&self, kind: DefenderKind, cell: CellCoord) -> Result<(), PlacementError> {
        if self.status.is_over() {
            return Err(PlacementError::RunOver);
        }
        if self.grid.occupant(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        if !self.cooldowns.get(kind).is_zero() {
            return Err(PlacementError::OnCooldown);
        }
        if self.balance < self.rules.defenders.get(kind).cost {
            return Err(PlacementError::InsufficientResource);
        }
        Ok(())
    }

    /// Removes whichever defender occupies `cell`; a no-op on an empty cell.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the grid.
    pub fn remove_defender(
        &mut self,
        cell: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Option<DefenderId> {
        let id = self.grid.occupant(cell)?;
        let defender = self
            .defenders
            .iter_mut()
            .find(|defender| defender.id == id && !defender.is_marked())?;
        combat::destroy_defender(defender, DefenderLoss::Dismantled, &mut self.grid, out_events);
        entity::prune(&mut self.defenders);
        Some(id)
    }

    /// Collects a resource unit, crediting its value to the balance.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Missing`] when no live unit carries the
    /// identifier; the balance is left untouched.
    pub fn collect_resource(
        &mut self,
        resource: ResourceId,
        out_events: &mut Vec<Event>,
    ) -> Result<u32, CollectionError> {
        let Some(index) = self
            .resources
            .iter()
            .position(|unit| unit.id == resource && !unit.is_marked())
        else {
            warn!(resource = resource.get(), "collection of unknown resource rejected");
            out_events.push(Event::ResourceCollectionRejected {
                resource,
                reason: CollectionError::Missing,
            });
            return Err(CollectionError::Missing);
        };

        let unit = self.resources.remove(index);
        self.balance = self.balance.saturating_add(unit.value);
        out_events.push(Event::ResourceCollected {
            resource,
            value: unit.value,
        });
        Ok(unit.value)
    }

    fn spawn_attacker(&mut self, kind: AttackerKind, lane: u32, out_events: &mut Vec<Event>) {
        if lane >= self.rules.grid.rows {
            warn!(?kind, lane, "spawn outside the board ignored");
            return;
        }
        let dimensions = self.rules.grid;
        let id = self.ids.attacker();
        let position = Position::new(dimensions.board_width(), dimensions.lane_y(lane));
        self.attackers.push(Attacker::new(
            id,
            kind,
            lane,
            position,
            (dimensions.cell_width, dimensions.cell_height),
            self.rules.attackers.get(kind),
        ));
        debug!(?kind, lane, attacker = id.get(), "attacker spawned");
        out_events.push(Event::AttackerSpawned {
            attacker: id,
            kind,
            lane,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.status.is_over() {
            return;
        }
        let dt = dt.min(self.rules.max_tick);
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        let mut defender_context = DefenderContext {
            dt,
            rules: &self.rules,
            grid: &mut self.grid,
            attackers: &mut self.attackers,
            projectiles: &mut self.projectiles,
            resources: &mut self.resources,
            ids: &mut self.ids,
            events: out_events,
        };
        entity::update_all(&mut self.defenders, &mut defender_context);

        let mut attacker_context = AttackerContext {
            dt,
            rules: &self.rules,
            grid: &mut self.grid,
            defenders: &mut self.defenders,
            guards: &mut self.guards,
            status: &mut self.status,
            events: out_events,
        };
        entity::update_all(&mut self.attackers, &mut attacker_context);

        let mut projectile_context = ProjectileContext {
            dt,
            rules: &self.rules,
            attackers: &mut self.attackers,
            events: out_events,
        };
        entity::update_all(&mut self.projectiles, &mut projectile_context);

        entity::prune(&mut self.defenders);
        entity::prune(&mut self.attackers);
        entity::prune(&mut self.projectiles);

        self.advance_resources(dt, out_events);
        self.advance_waves(dt, out_events);

        for guard in &mut self.guards {
            guard.update(dt, &self.rules, &mut self.attackers, out_events);
        }
        entity::prune(&mut self.attackers);

        for kind in DefenderKind::ALL {
            let cooldown = self.cooldowns.get_mut(*kind);
            *cooldown = cooldown.saturating_sub(dt);
        }

        if self.victory_declared && self.attackers.is_empty() {
            conclude(&mut self.status, RunStatus::Won, out_events);
        }
    }

    fn advance_resources(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut context = ResourceContext {
            dt,
            lifetime: self.rules.resource_lifetime,
            events: out_events,
        };
        entity::update_all(&mut self.resources, &mut context);
        entity::prune(&mut self.resources);

        let natural = self.rules.natural_resource;
        if natural.interval.is_zero() {
            return;
        }
        self.natural_timer = self.natural_timer.saturating_add(dt);
        if self.natural_timer < natural.interval {
            return;
        }
        self.natural_timer = Duration::ZERO;

        let dimensions = self.rules.grid;
        let x = scatter(&mut self.rng, dimensions.board_width() - RESOURCE_EXTENT.0);
        let y = scatter(&mut self.rng, dimensions.board_height() - RESOURCE_EXTENT.1);
        let _ = resources::drop_unit(
            &mut self.resources,
            &mut self.ids,
            natural.value,
            Position::new(x, y),
            out_events,
        );
    }

    fn advance_waves(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut commands = Vec::new();
        self.waves.handle(
            dt,
            self.attackers.len(),
            self.rules.grid.rows,
            &mut self.rng,
            &mut commands,
            out_events,
        );
        for command in commands {
            apply(self, command, out_events);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

/// Uniform draw from `[0, span)`, collapsing to zero for an empty span.
fn scatter(rng: &mut ChaCha8Rng, span: f32) -> f32 {
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::PlaceDefender { kind, cell } => {
            let _ = world.place_defender(kind, cell, out_events);
        }
        Command::RemoveDefender { cell } => {
            let _ = world.remove_defender(cell, out_events);
        }
        Command::CollectResource { resource } => {
            let _ = world.collect_resource(resource, out_events);
        }
        Command::SpawnAttacker { kind, lane } => {
            if !world.status.is_over() {
                world.spawn_attacker(kind, lane, out_events);
            }
        }
        Command::DeclareVictory => {
            world.victory_declared = true;
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Grid, World};
    use lane_defence_core::{
        AttackerSnapshot, CellCoord, DefenderId, DefenderKind, DefenderSnapshot,
        LaneGuardSnapshot, ProjectileSnapshot, ResourceSnapshot, Rules, RunStatus, View, WaveId,
        WavePhase,
    };

    use crate::entity::Entity;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the rules governing the run.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Reports whether the run is still going, won or lost.
    #[must_use]
    pub fn status(world: &World) -> RunStatus {
        world.status
    }

    /// Current resource balance.
    #[must_use]
    pub fn balance(world: &World) -> u32 {
        world.balance
    }

    /// Ratio of cleared waves to total waves in `[0, 1]`.
    #[must_use]
    pub fn wave_progress(world: &World) -> f32 {
        world.waves.progress()
    }

    /// Phase of the wave scheduler.
    #[must_use]
    pub fn wave_phase(world: &World) -> WavePhase {
        world.waves.phase()
    }

    /// Wave being waited on or spawned.
    #[must_use]
    pub fn current_wave(world: &World) -> WaveId {
        world.waves.current_wave()
    }

    /// Remaining cooldown before the kind may be placed again.
    #[must_use]
    pub fn cooldown(world: &World, kind: DefenderKind) -> Duration {
        *world.cooldowns.get(kind)
    }

    /// Defender occupying the provided cell, if any.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the grid.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Option<DefenderId> {
        world.grid.occupant(cell)
    }

    /// Provides read-only access to the occupancy grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures the live defenders in placement order.
    #[must_use]
    pub fn defender_view(world: &World) -> View<DefenderSnapshot> {
        View::from_snapshots(
            world
                .defenders
                .iter()
                .filter(|defender| !defender.is_marked())
                .map(|defender| defender.snapshot())
                .collect(),
        )
    }

    /// Captures the live attackers in spawn order.
    #[must_use]
    pub fn attacker_view(world: &World) -> View<AttackerSnapshot> {
        View::from_snapshots(
            world
                .attackers
                .iter()
                .filter(|attacker| !attacker.is_marked())
                .map(|attacker| attacker.snapshot())
                .collect(),
        )
    }

    /// Captures the projectiles in flight in launch order.
    #[must_use]
    pub fn projectile_view(world: &World) -> View<ProjectileSnapshot> {
        View::from_snapshots(
            world
                .projectiles
                .iter()
                .filter(|projectile| !projectile.is_marked())
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Captures the uncollected resource units in drop order.
    #[must_use]
    pub fn resource_view(world: &World) -> View<ResourceSnapshot> {
        View::from_snapshots(
            world
                .resources
                .iter()
                .filter(|unit| !unit.is_marked())
                .map(|unit| unit.snapshot())
                .collect(),
        )
    }

    /// Captures every lane guard in lane order.
    #[must_use]
    pub fn lane_guards(world: &World) -> Vec<LaneGuardSnapshot> {
        world.guards.iter().map(|guard| guard.snapshot()).collect()
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
