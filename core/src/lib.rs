#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative world, and pure systems. Hosts submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! happened. Systems consume elapsed time and immutable snapshots and respond
//! exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

mod rules;

pub use rules::{
    AttackerStats, DefenderStats, GridDimensions, Kind, NaturalResource, ProjectileStats, Rules,
    StatTable, Wave, WaveGroup,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided elapsed time.
    Tick {
        /// Wall-clock time reported by the host since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a defender into the provided cell.
    PlaceDefender {
        /// Type of defender to construct.
        kind: DefenderKind,
        /// Cell the defender should occupy.
        cell: CellCoord,
    },
    /// Requests removal of whichever defender occupies the provided cell.
    RemoveDefender {
        /// Cell to clear.
        cell: CellCoord,
    },
    /// Requests that a resource unit be collected and credited to the balance.
    CollectResource {
        /// Identifier of the unit being collected.
        resource: ResourceId,
    },
    /// Requests that an attacker enter the board at the far edge of a lane.
    SpawnAttacker {
        /// Type of attacker to create.
        kind: AttackerKind,
        /// Lane the attacker advances along.
        lane: u32,
    },
    /// Announces that every wave was cleared and the run may be won.
    DeclareVictory,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Clamped duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a defender was placed into the grid.
    DefenderPlaced {
        /// Identifier assigned to the defender.
        defender: DefenderId,
        /// Type of defender that was placed.
        kind: DefenderKind,
        /// Cell the defender occupies.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    DefenderPlacementRejected {
        /// Type of defender requested.
        kind: DefenderKind,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a defender left the grid and its cell was cleared.
    DefenderDestroyed {
        /// Identifier of the destroyed defender.
        defender: DefenderId,
        /// Type of the destroyed defender.
        kind: DefenderKind,
        /// Cell that became free.
        cell: CellCoord,
        /// Why the defender was destroyed.
        cause: DefenderLoss,
    },
    /// Confirms that a defender launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Type of projectile launched.
        kind: ProjectileKind,
        /// Lane the projectile travels along.
        lane: u32,
    },
    /// Confirms that an attacker entered the board.
    AttackerSpawned {
        /// Identifier assigned to the attacker.
        attacker: AttackerId,
        /// Type of attacker created.
        kind: AttackerKind,
        /// Lane the attacker advances along.
        lane: u32,
    },
    /// Reports that a projectile struck an attacker.
    AttackerHit {
        /// Identifier of the struck attacker.
        attacker: AttackerId,
        /// Type of projectile that landed the hit.
        projectile: ProjectileKind,
        /// Health left after the hit, possibly zero or negative.
        remaining_health: f32,
    },
    /// Confirms that an attacker was removed from the board.
    AttackerDefeated {
        /// Identifier of the removed attacker.
        attacker: AttackerId,
        /// Why the attacker was removed.
        cause: AttackerLoss,
    },
    /// Confirms that a collectible resource unit appeared.
    ResourceSpawned {
        /// Identifier assigned to the unit.
        resource: ResourceId,
        /// Balance credited when the unit is collected.
        value: u32,
        /// Where the unit appeared.
        position: Position,
    },
    /// Confirms that a resource unit was collected.
    ResourceCollected {
        /// Identifier of the collected unit.
        resource: ResourceId,
        /// Amount credited to the balance.
        value: u32,
    },
    /// Reports that a collection request did not match a live unit.
    ResourceCollectionRejected {
        /// Identifier provided in the request.
        resource: ResourceId,
        /// Specific reason the collection failed.
        reason: CollectionError,
    },
    /// Reports that a resource unit timed out uncollected.
    ResourceExpired {
        /// Identifier of the expired unit.
        resource: ResourceId,
    },
    /// Reports that an attacker crossed the defended edge of a lane.
    LaneBreached {
        /// Lane that was breached.
        lane: u32,
        /// Attacker responsible for the breach.
        attacker: AttackerId,
    },
    /// Confirms that a lane guard began sweeping its lane.
    LaneGuardTriggered {
        /// Lane the guard protects.
        lane: u32,
    },
    /// Confirms that a lane guard finished its sweep and is spent.
    LaneGuardRetired {
        /// Lane the guard protected.
        lane: u32,
    },
    /// Announces that a wave began spawning attackers.
    WaveStarted {
        /// Wave that started.
        wave: WaveId,
        /// Number of attackers the wave will spawn.
        attackers: u32,
    },
    /// Announces that a wave was exhausted and all of its attackers were defeated.
    WaveCleared {
        /// Wave that was cleared.
        wave: WaveId,
    },
    /// Announces that the run reached a terminal status.
    RunConcluded {
        /// Terminal status of the run.
        status: RunStatus,
    },
}

/// Reasons a defender may leave the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderLoss {
    /// Attackers ate through the defender's health.
    Eaten,
    /// The defender expended itself in a detonation.
    Detonated,
    /// A removal command cleared the cell.
    Dismantled,
}

/// Reasons an attacker may leave the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackerLoss {
    /// Projectile damage reduced its health to zero.
    Combat,
    /// A bomb or mine destroyed it.
    Detonation,
    /// A sweeping lane guard removed it.
    LaneGuard,
    /// It crossed the defended edge.
    Breach,
}

/// Overall status of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    /// The simulation is still advancing.
    Running,
    /// Every wave was cleared.
    Won,
    /// A lane was breached after its guard had been used.
    Lost,
}

impl RunStatus {
    /// Reports whether the run reached a terminal status.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Running => "running",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// Reasons a defender placement request may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum PlacementError {
    /// The requested cell already holds a defender.
    #[error("cell is already occupied")]
    Occupied,
    /// The defender type is still cooling down from its previous placement.
    #[error("defender type is on cooldown")]
    OnCooldown,
    /// The resource balance does not cover the defender's cost.
    #[error("insufficient resource balance")]
    InsufficientResource,
    /// The run already concluded.
    #[error("the run is over")]
    RunOver,
}

/// Reasons a resource collection request may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum CollectionError {
    /// No live resource unit carries the identifier.
    #[error("no such resource unit")]
    Missing,
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }

            /// Returns the identifier that follows this one.
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0.wrapping_add(1))
            }
        }
    };
}

identifier!(
    /// Unique identifier assigned to a defender.
    DefenderId
);
identifier!(
    /// Unique identifier assigned to an attacker.
    AttackerId
);
identifier!(
    /// Unique identifier assigned to a projectile.
    ProjectileId
);
identifier!(
    /// Unique identifier assigned to a collectible resource unit.
    ResourceId
);
identifier!(
    /// Zero-based index of a wave within the wave table.
    WaveId
);

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row (lane) index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cell projected from continuous board coordinates.
///
/// Unlike [`CellCoord`] the column may fall outside the grid, which happens
/// while an attacker is still entering from the far edge or has crossed the
/// defended edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectedCell {
    /// Lane the position belongs to.
    pub row: i64,
    /// Column the position is nearest to.
    pub column: i64,
}

impl ProjectedCell {
    /// Chebyshev distance between two projected cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: ProjectedCell) -> u64 {
        self.row
            .abs_diff(other.row)
            .max(self.column.abs_diff(other.column))
    }

    /// Reports whether the projection lands on the provided grid cell.
    #[must_use]
    pub fn matches(self, cell: CellCoord) -> bool {
        self == ProjectedCell::from(cell)
    }
}

impl From<CellCoord> for ProjectedCell {
    fn from(cell: CellCoord) -> Self {
        Self {
            row: i64::from(cell.row()),
            column: i64::from(cell.column()),
        }
    }
}

/// Point on the board measured in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset from the defended edge.
    pub x: f32,
    /// Vertical offset from the top lane.
    pub y: f32,
}

impl Position {
    /// Creates a new board position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box anchored at its upper-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    origin: Position,
    width: f32,
    height: f32,
}

impl Bounds {
    /// Creates a box from its upper-left corner and extent.
    #[must_use]
    pub const fn new(origin: Position, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Reports whether two boxes overlap.
    ///
    /// Comparisons are strict on all four sides, so boxes that merely touch
    /// along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.origin.x < other.origin.x + other.width
            && self.origin.x + self.width > other.origin.x
            && self.origin.y < other.origin.y + other.height
            && self.origin.y + self.height > other.origin.y
    }
}

/// Types of defenders that can be placed into the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenderKind {
    /// Fires plain projectiles along its lane.
    Shooter,
    /// Produces resource units on a timer.
    Producer,
    /// Sturdy obstacle with no attack.
    Wall,
    /// Fires projectiles that halve attacker speed.
    FrostShooter,
    /// Fires projectiles that nearly immobilize attackers.
    Snare,
    /// Fires projectiles that pass through every attacker in the lane.
    Spiker,
    /// Fires projectiles that splash onto neighbouring attackers.
    Lobber,
    /// Fires into its own lane and both adjacent lanes at once.
    Scatter,
    /// Detonates immediately, damaging everything around its cell.
    Bomb,
    /// Arms after a delay and destroys the first attacker to step on it.
    Mine,
}

/// Behaviour archetype shared by one or more defender kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefenderBehavior {
    /// Fires a projectile each period while an attacker is ahead.
    Ranged {
        /// Projectile launched on each firing.
        projectile: ProjectileKind,
        /// Lanes covered by each firing.
        spread: LaneSpread,
    },
    /// Spawns a resource unit each period.
    Producer,
    /// Holds its cell without acting.
    Obstacle,
    /// Detonates on its first update.
    Immediate,
    /// Arms after its period and detonates on contact.
    DelayedArm,
}

impl DefenderKind {
    /// Static behaviour table keyed by kind.
    #[must_use]
    pub const fn behavior(self) -> DefenderBehavior {
        match self {
            Self::Shooter => ranged(ProjectileKind::Plain, LaneSpread::Own),
            Self::Producer => DefenderBehavior::Producer,
            Self::Wall => DefenderBehavior::Obstacle,
            Self::FrostShooter => ranged(ProjectileKind::Slowing, LaneSpread::Own),
            Self::Snare => ranged(ProjectileKind::Immobilizing, LaneSpread::Own),
            Self::Spiker => ranged(ProjectileKind::Piercing, LaneSpread::Own),
            Self::Lobber => ranged(ProjectileKind::Splash, LaneSpread::Own),
            Self::Scatter => ranged(ProjectileKind::Scattershot, LaneSpread::Adjacent),
            Self::Bomb => DefenderBehavior::Immediate,
            Self::Mine => DefenderBehavior::DelayedArm,
        }
    }
}

const fn ranged(projectile: ProjectileKind, spread: LaneSpread) -> DefenderBehavior {
    DefenderBehavior::Ranged { projectile, spread }
}

impl Kind for DefenderKind {
    const ALL: &'static [Self] = &[
        Self::Shooter,
        Self::Producer,
        Self::Wall,
        Self::FrostShooter,
        Self::Snare,
        Self::Spiker,
        Self::Lobber,
        Self::Scatter,
        Self::Bomb,
        Self::Mine,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Shooter => "shooter",
            Self::Producer => "producer",
            Self::Wall => "wall",
            Self::FrostShooter => "frost_shooter",
            Self::Snare => "snare",
            Self::Spiker => "spiker",
            Self::Lobber => "lobber",
            Self::Scatter => "scatter",
            Self::Bomb => "bomb",
            Self::Mine => "mine",
        }
    }
}

/// Lanes a ranged defender watches and fires into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneSpread {
    /// Only the defender's own lane.
    Own,
    /// The defender's lane plus the lanes directly above and below it.
    Adjacent,
}

impl LaneSpread {
    /// Lanes covered for a defender in `lane` on a board with `rows` lanes.
    #[must_use]
    pub fn lanes(self, lane: u32, rows: u32) -> std::ops::RangeInclusive<u32> {
        match self {
            Self::Own => lane..=lane,
            Self::Adjacent => {
                let last = rows.saturating_sub(1);
                lane.saturating_sub(1)..=lane.saturating_add(1).min(last)
            }
        }
    }
}

/// Types of attackers that advance along the lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackerKind {
    /// Baseline attacker.
    Walker,
    /// Walker wearing a cone, doubling its health.
    Coned,
    /// Walker wearing a bucket; slow and sturdy.
    Bucketed,
    /// Fast and fragile.
    Runner,
    /// Very slow, very tough.
    Brute,
}

impl Kind for AttackerKind {
    const ALL: &'static [Self] = &[
        Self::Walker,
        Self::Coned,
        Self::Bucketed,
        Self::Runner,
        Self::Brute,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Walker => "walker",
            Self::Coned => "coned",
            Self::Bucketed => "bucketed",
            Self::Runner => "runner",
            Self::Brute => "brute",
        }
    }
}

/// Types of projectiles launched by ranged defenders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    /// Damages the first attacker it touches.
    Plain,
    /// Damages and permanently halves the attacker's speed.
    Slowing,
    /// Lightly damages and nearly stops every attacker it passes.
    Immobilizing,
    /// Damages every attacker it passes.
    Piercing,
    /// Damages every attacker it passes and splashes onto their neighbours.
    Splash,
    /// Damages the first attacker it touches; launched in volleys.
    Scattershot,
}

impl ProjectileKind {
    /// Reports whether the projectile keeps travelling after a hit.
    #[must_use]
    pub const fn passes_through(self) -> bool {
        matches!(self, Self::Immobilizing | Self::Piercing | Self::Splash)
    }

    /// Speed modifier inflicted on struck attackers, if any.
    #[must_use]
    pub const fn speed_modifier(self) -> Option<SpeedModifier> {
        match self {
            Self::Slowing => Some(SpeedModifier::Slow),
            Self::Immobilizing => Some(SpeedModifier::Immobilize),
            _ => None,
        }
    }
}

impl Kind for ProjectileKind {
    const ALL: &'static [Self] = &[
        Self::Plain,
        Self::Slowing,
        Self::Immobilizing,
        Self::Piercing,
        Self::Splash,
        Self::Scattershot,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Slowing => "slowing",
            Self::Immobilizing => "immobilizing",
            Self::Piercing => "piercing",
            Self::Splash => "splash",
            Self::Scattershot => "scattershot",
        }
    }
}

/// Permanent speed reduction applied by projectile hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpeedModifier {
    /// Halves base speed.
    Slow,
    /// Reduces base speed to a crawl.
    Immobilize,
}

impl SpeedModifier {
    /// Multiplier applied to an attacker's base speed.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Slow => 0.5,
            Self::Immobilize => 0.05,
        }
    }
}

/// Observable wear state derived from a defender's health fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderCondition {
    /// At or above two thirds of maximum health.
    Healthy,
    /// Below two thirds of maximum health.
    Worn,
    /// Below one third of maximum health.
    Crumbling,
}

impl DefenderCondition {
    /// Classifies a health fraction in `[0, 1]`.
    #[must_use]
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction < 0.33 {
            Self::Crumbling
        } else if fraction < 0.66 {
            Self::Worn
        } else {
            Self::Healthy
        }
    }
}

/// Health fraction below which attackers report the low-health flag.
pub const ATTACKER_LOW_HEALTH_FRACTION: f32 = 0.3;

/// Progress of the wave scheduler through the current wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    /// Counting down before the current wave starts spawning.
    Waiting {
        /// Time left before spawning begins.
        remaining: Duration,
    },
    /// Spawning attackers, or waiting for the spawned ones to be defeated.
    Spawning {
        /// Attackers spawned so far for the current wave.
        spawned: u32,
        /// Time accumulated toward the next spawn.
        accumulator: Duration,
    },
    /// Every wave was cleared and victory was declared.
    Finished,
}

/// Immutable representation of a single defender used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender by the world.
    pub id: DefenderId,
    /// Kind of defender.
    pub kind: DefenderKind,
    /// Cell the defender occupies.
    pub cell: CellCoord,
    /// Upper-left corner of the defender on the board.
    pub position: Position,
    /// Current health divided by maximum health.
    pub health_fraction: f32,
    /// Wear state derived from the health fraction.
    pub condition: DefenderCondition,
    /// Whether a delayed-arm defender is ready to detonate.
    pub armed: bool,
}

/// Immutable representation of a single attacker used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerSnapshot {
    /// Identifier allocated to the attacker by the world.
    pub id: AttackerId,
    /// Kind of attacker.
    pub kind: AttackerKind,
    /// Lane the attacker advances along.
    pub lane: u32,
    /// Upper-left corner of the attacker on the board.
    pub position: Position,
    /// Remaining health.
    pub health: f32,
    /// Current health divided by maximum health.
    pub health_fraction: f32,
    /// Whether the attacker is eating a defender.
    pub eating: bool,
    /// Whether a slowing hit landed on the attacker.
    pub slowed: bool,
    /// Whether an immobilizing hit landed on the attacker.
    pub immobilized: bool,
    /// Whether the health fraction fell below the low-health threshold.
    pub low_health: bool,
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Kind of projectile.
    pub kind: ProjectileKind,
    /// Lane the projectile travels along.
    pub lane: u32,
    /// Upper-left corner of the projectile on the board.
    pub position: Position,
}

/// Immutable representation of a single collectible resource unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourceSnapshot {
    /// Identifier allocated to the unit by the world.
    pub id: ResourceId,
    /// Balance credited on collection.
    pub value: u32,
    /// Where the unit sits on the board.
    pub position: Position,
    /// How long the unit has been waiting for collection.
    pub age: Duration,
}

/// Lifecycle of a single lane guard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LaneGuardState {
    /// Waiting for the first breach of its lane.
    Ready,
    /// Sweeping across its lane.
    Sweeping {
        /// Left edge of the guard on the board.
        x: f32,
    },
    /// Used up; a further breach loses the run.
    Spent,
}

/// Immutable representation of a single lane guard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneGuardSnapshot {
    /// Lane the guard protects.
    pub lane: u32,
    /// Current lifecycle state.
    pub state: LaneGuardState,
}

/// Read-only listing of entity snapshots in collection order.
#[derive(Clone, Debug)]
pub struct View<T> {
    snapshots: Vec<T>,
}

impl<T> View<T> {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<T>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.snapshots
    }
}

impl<T> Default for View<T> {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }
}
