//! Static configuration tables consumed by the world and its systems.

use std::{marker::PhantomData, time::Duration};

use crate::{AttackerKind, CellCoord, DefenderKind, Position, ProjectedCell, ProjectileKind};

/// Enumerated entity type whose per-type data lives in a [`StatTable`].
pub trait Kind: Copy + Eq + 'static {
    /// Every variant in declaration order.
    const ALL: &'static [Self];

    /// Position of the variant within [`Kind::ALL`].
    fn index(self) -> usize;

    /// Stable lowercase name used by configuration files.
    fn name(self) -> &'static str;

    /// Resolves a configuration name back to its variant.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Dense table holding one entry per variant of a [`Kind`].
#[derive(Clone, Debug, PartialEq)]
pub struct StatTable<K, V> {
    entries: Vec<V>,
    kind: PhantomData<K>,
}

impl<K: Kind, V> StatTable<K, V> {
    /// Builds a table by evaluating `entry` for every variant.
    pub fn from_fn(entry: impl FnMut(K) -> V) -> Self {
        Self {
            entries: K::ALL.iter().copied().map(entry).collect(),
            kind: PhantomData,
        }
    }

    /// Entry stored for the provided kind.
    #[must_use]
    pub fn get(&self, kind: K) -> &V {
        &self.entries[kind.index()]
    }

    /// Mutable entry stored for the provided kind.
    pub fn get_mut(&mut self, kind: K) -> &mut V {
        &mut self.entries[kind.index()]
    }

    /// Iterator over every `(kind, entry)` pair in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        K::ALL.iter().copied().zip(self.entries.iter())
    }
}

/// Per-type data for defenders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderStats {
    /// Balance debited on placement.
    pub cost: u32,
    /// Time before the same type may be placed again.
    pub cooldown: Duration,
    /// Starting and maximum health.
    pub health: f32,
    /// Firing or production period; arm delay for delayed-arm types.
    pub period: Duration,
    /// Area damage dealt by immediate detonating types.
    pub damage: f32,
    /// Value of each resource unit spawned by producing types.
    pub yield_value: u32,
}

/// Per-type data for attackers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerStats {
    /// Starting and maximum health.
    pub health: f32,
    /// Base speed toward the defended edge, in pixels per second.
    pub speed: f32,
    /// Damage per second dealt to an occupied cell's defender while eating.
    pub contact_dps: f32,
}

/// Per-type data for projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileStats {
    /// Travel speed in pixels per second.
    pub speed: f32,
    /// Damage dealt to each struck attacker.
    pub damage: f32,
    /// Damage dealt to attackers neighbouring the struck one.
    pub splash_damage: f32,
}

/// Board geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDimensions {
    /// Number of lanes.
    pub rows: u32,
    /// Number of cells per lane.
    pub columns: u32,
    /// Width of a single cell in pixels.
    pub cell_width: f32,
    /// Height of a single cell in pixels.
    pub cell_height: f32,
}

impl GridDimensions {
    /// Total width of the board in pixels.
    #[must_use]
    pub fn board_width(&self) -> f32 {
        self.columns as f32 * self.cell_width
    }

    /// Total height of the board in pixels.
    #[must_use]
    pub fn board_height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    /// Vertical offset of a lane's upper edge.
    #[must_use]
    pub fn lane_y(&self, lane: u32) -> f32 {
        lane as f32 * self.cell_height
    }

    /// Upper-left corner of a cell.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Position {
        Position::new(cell.column() as f32 * self.cell_width, self.lane_y(cell.row()))
    }

    /// Cell nearest to a horizontal position within a lane.
    #[must_use]
    pub fn project(&self, lane: u32, x: f32) -> ProjectedCell {
        let column = ((x + self.cell_width / 2.0) / self.cell_width).floor();
        ProjectedCell {
            row: i64::from(lane),
            column: column as i64,
        }
    }
}

/// Natural resource generation independent of producers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NaturalResource {
    /// Time between natural drops.
    pub interval: Duration,
    /// Value of each naturally dropped unit.
    pub value: u32,
}

/// A group of identical attackers inside a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveGroup {
    /// Type of attacker spawned by the group.
    pub attacker: AttackerKind,
    /// Number of attackers in the group.
    pub count: u32,
}

/// A scheduled batch of attacker spawns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wave {
    /// Groups spawned in declaration order.
    pub groups: Vec<WaveGroup>,
    /// Time between consecutive spawns.
    pub spawn_interval: Duration,
}

impl Wave {
    /// Creates a wave from its groups and spawn cadence.
    #[must_use]
    pub fn new(groups: Vec<WaveGroup>, spawn_interval: Duration) -> Self {
        Self {
            groups,
            spawn_interval,
        }
    }

    /// Total number of attackers spawned by the wave.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.groups
            .iter()
            .fold(0u32, |total, group| total.saturating_add(group.count))
    }

    /// Flattened spawn order with groups expanded in declaration order.
    #[must_use]
    pub fn sequence(&self) -> Vec<AttackerKind> {
        self.groups
            .iter()
            .flat_map(|group| std::iter::repeat(group.attacker).take(group.count as usize))
            .collect()
    }
}

/// Aggregated configuration tables; loaded once before a run starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    /// Board geometry.
    pub grid: GridDimensions,
    /// Resource balance at the start of a run.
    pub starting_balance: u32,
    /// Upper bound applied to each tick's elapsed time.
    pub max_tick: Duration,
    /// Natural resource drops.
    pub natural_resource: NaturalResource,
    /// Time an uncollected resource unit stays on the board.
    pub resource_lifetime: Duration,
    /// Lane guard sweep speed in pixels per second.
    pub lane_guard_speed: f32,
    /// Delay before the first wave starts.
    pub first_wave_delay: Duration,
    /// Delay between a cleared wave and the next one, and before victory.
    pub inter_wave_delay: Duration,
    /// Seed for lane selection and resource placement.
    pub rng_seed: u64,
    /// Per-type defender data.
    pub defenders: StatTable<DefenderKind, DefenderStats>,
    /// Per-type attacker data.
    pub attackers: StatTable<AttackerKind, AttackerStats>,
    /// Per-type projectile data.
    pub projectiles: StatTable<ProjectileKind, ProjectileStats>,
    /// Waves in the order they are played.
    pub waves: Vec<Wave>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            grid: GridDimensions {
                rows: 5,
                columns: 9,
                cell_width: 80.0,
                cell_height: 100.0,
            },
            starting_balance: 50,
            max_tick: Duration::from_millis(100),
            natural_resource: NaturalResource {
                interval: Duration::from_secs(5),
                value: 25,
            },
            resource_lifetime: Duration::from_secs(10),
            lane_guard_speed: 480.0,
            first_wave_delay: Duration::from_secs(20),
            inter_wave_delay: Duration::from_secs(15),
            rng_seed: 0x5eed_1a7e_d3fe_11ce,
            defenders: StatTable::from_fn(default_defender_stats),
            attackers: StatTable::from_fn(default_attacker_stats),
            projectiles: StatTable::from_fn(default_projectile_stats),
            waves: default_waves(),
        }
    }
}

fn default_defender_stats(kind: DefenderKind) -> DefenderStats {
    let (cost, cooldown_ms, health, period_ms, damage, yield_value) = match kind {
        DefenderKind::Shooter => (100, 7_500, 100.0, 1_500, 0.0, 0),
        DefenderKind::Producer => (50, 7_500, 100.0, 10_000, 0.0, 25),
        DefenderKind::Wall => (50, 30_000, 4_000.0, 0, 0.0, 0),
        DefenderKind::FrostShooter => (175, 7_500, 100.0, 1_500, 0.0, 0),
        DefenderKind::Snare => (150, 7_500, 100.0, 3_000, 0.0, 0),
        DefenderKind::Spiker => (200, 7_500, 100.0, 2_000, 0.0, 0),
        DefenderKind::Lobber => (300, 7_500, 100.0, 3_000, 0.0, 0),
        DefenderKind::Scatter => (325, 7_500, 100.0, 1_500, 0.0, 0),
        DefenderKind::Bomb => (150, 50_000, 100.0, 0, 1_800.0, 0),
        DefenderKind::Mine => (25, 30_000, 100.0, 15_000, 0.0, 0),
    };
    DefenderStats {
        cost,
        cooldown: Duration::from_millis(cooldown_ms),
        health,
        period: Duration::from_millis(period_ms),
        damage,
        yield_value,
    }
}

fn default_attacker_stats(kind: AttackerKind) -> AttackerStats {
    let (health, speed) = match kind {
        AttackerKind::Walker => (100.0, 12.0),
        AttackerKind::Coned => (200.0, 12.0),
        AttackerKind::Bucketed => (400.0, 9.0),
        AttackerKind::Runner => (80.0, 24.0),
        AttackerKind::Brute => (1_000.0, 7.0),
    };
    AttackerStats {
        health,
        speed,
        contact_dps: 30.0,
    }
}

fn default_projectile_stats(kind: ProjectileKind) -> ProjectileStats {
    let (speed, damage, splash_damage) = match kind {
        ProjectileKind::Plain => (300.0, 25.0, 0.0),
        ProjectileKind::Slowing => (300.0, 25.0, 0.0),
        ProjectileKind::Immobilizing => (240.0, 10.0, 0.0),
        ProjectileKind::Piercing => (360.0, 20.0, 0.0),
        ProjectileKind::Splash => (240.0, 40.0, 15.0),
        ProjectileKind::Scattershot => (300.0, 25.0, 0.0),
    };
    ProjectileStats {
        speed,
        damage,
        splash_damage,
    }
}

fn default_waves() -> Vec<Wave> {
    let group = |attacker, count| WaveGroup { attacker, count };
    vec![
        Wave::new(
            vec![group(AttackerKind::Walker, 3)],
            Duration::from_secs(8),
        ),
        Wave::new(
            vec![group(AttackerKind::Walker, 4), group(AttackerKind::Coned, 2)],
            Duration::from_secs(6),
        ),
        Wave::new(
            vec![
                group(AttackerKind::Walker, 4),
                group(AttackerKind::Runner, 3),
                group(AttackerKind::Coned, 3),
            ],
            Duration::from_secs(5),
        ),
        Wave::new(
            vec![
                group(AttackerKind::Coned, 4),
                group(AttackerKind::Bucketed, 3),
                group(AttackerKind::Runner, 4),
            ],
            Duration::from_secs(4),
        ),
        Wave::new(
            vec![
                group(AttackerKind::Walker, 6),
                group(AttackerKind::Bucketed, 4),
                group(AttackerKind::Brute, 2),
            ],
            Duration::from_secs(3),
        ),
    ]
}
