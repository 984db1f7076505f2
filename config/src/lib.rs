#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loads Lane Defence rule tables from TOML documents.
//!
//! Every document is an overlay: fields it leaves out keep the values from
//! [`Rules::default`]. Type tables are keyed by the stable kind names, for
//! example `[defenders.frost_shooter]` or `[attackers.brute]`. Supplying any
//! `[[waves]]` entry replaces the built-in wave list as a whole.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use lane_defence_core::{AttackerKind, DefenderKind, Kind, ProjectileKind, Rules, Wave, WaveGroup};
use serde::Deserialize;
use tracing::debug;

/// Failures raised while turning a configuration document into [`Rules`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A table or wave group named a kind that does not exist.
    #[error("unknown {category} type `{name}`")]
    UnknownType {
        /// Which family of kinds was being resolved.
        category: &'static str,
        /// The offending name.
        name: String,
    },
    /// The grid has no cells or a cell has no area.
    #[error("grid must have at least one row, one column and a positive cell size")]
    EmptyGrid,
    /// The tick clamp would stop the simulation clock.
    #[error("max_tick_ms must be greater than zero")]
    ZeroMaxTick,
    /// A wave group spawns no attackers.
    #[error("group {group} of wave {wave} spawns no attackers")]
    EmptyWaveGroup {
        /// Zero-based wave index.
        wave: usize,
        /// Zero-based group index within the wave.
        group: usize,
    },
    /// The document is not valid TOML or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The document could not be read.
    #[error("failed to read configuration at {}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Reads and overlays the TOML document at `path` onto the default rules.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and any error
/// raised by [`from_toml_str`].
pub fn load(path: impl AsRef<Path>) -> Result<Rules, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = from_toml_str(&contents)?;
    debug!(path = %path.display(), waves = rules.waves.len(), "configuration loaded");
    Ok(rules)
}

/// Overlays a TOML document onto the default rules.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed documents, and the remaining
/// variants when names fail to resolve or the result cannot drive a run.
pub fn from_toml_str(contents: &str) -> Result<Rules, ConfigError> {
    let document: Document = toml::from_str(contents)?;
    let mut rules = Rules::default();
    document.apply(&mut rules)?;
    validate(&rules)?;
    Ok(rules)
}

fn validate(rules: &Rules) -> Result<(), ConfigError> {
    let grid = rules.grid;
    if grid.rows == 0 || grid.columns == 0 || grid.cell_width <= 0.0 || grid.cell_height <= 0.0 {
        return Err(ConfigError::EmptyGrid);
    }
    if rules.max_tick.is_zero() {
        return Err(ConfigError::ZeroMaxTick);
    }
    Ok(())
}

fn resolve<K: Kind>(category: &'static str, name: &str) -> Result<K, ConfigError> {
    K::from_name(name).ok_or_else(|| ConfigError::UnknownType {
        category,
        name: name.to_owned(),
    })
}

fn millis(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    seed: Option<u64>,
    starting_balance: Option<u32>,
    max_tick_ms: Option<u64>,
    lane_guard_speed: Option<f32>,
    first_wave_delay_ms: Option<u64>,
    inter_wave_delay_ms: Option<u64>,
    resource_lifetime_ms: Option<u64>,
    grid: Option<GridTable>,
    natural_resource: Option<NaturalResourceTable>,
    #[serde(default)]
    defenders: BTreeMap<String, DefenderTable>,
    #[serde(default)]
    attackers: BTreeMap<String, AttackerTable>,
    #[serde(default)]
    projectiles: BTreeMap<String, ProjectileTable>,
    waves: Option<Vec<WaveTable>>,
}

impl Document {
    fn apply(self, rules: &mut Rules) -> Result<(), ConfigError> {
        overlay(&mut rules.rng_seed, self.seed);
        overlay(&mut rules.starting_balance, self.starting_balance);
        overlay(&mut rules.max_tick, self.max_tick_ms.map(millis));
        overlay(&mut rules.lane_guard_speed, self.lane_guard_speed);
        overlay(&mut rules.first_wave_delay, self.first_wave_delay_ms.map(millis));
        overlay(&mut rules.inter_wave_delay, self.inter_wave_delay_ms.map(millis));
        overlay(&mut rules.resource_lifetime, self.resource_lifetime_ms.map(millis));

        if let Some(grid) = self.grid {
            overlay(&mut rules.grid.rows, grid.rows);
            overlay(&mut rules.grid.columns, grid.columns);
            overlay(&mut rules.grid.cell_width, grid.cell_width);
            overlay(&mut rules.grid.cell_height, grid.cell_height);
        }
        if let Some(natural) = self.natural_resource {
            overlay(&mut rules.natural_resource.interval, natural.interval_ms.map(millis));
            overlay(&mut rules.natural_resource.value, natural.value);
        }

        for (name, table) in self.defenders {
            let kind: DefenderKind = resolve("defender", &name)?;
            let stats = rules.defenders.get_mut(kind);
            overlay(&mut stats.cost, table.cost);
            overlay(&mut stats.cooldown, table.cooldown_ms.map(millis));
            overlay(&mut stats.health, table.health);
            overlay(&mut stats.period, table.period_ms.map(millis));
            overlay(&mut stats.damage, table.damage);
            overlay(&mut stats.yield_value, table.yield_value);
        }
        for (name, table) in self.attackers {
            let kind: AttackerKind = resolve("attacker", &name)?;
            let stats = rules.attackers.get_mut(kind);
            overlay(&mut stats.health, table.health);
            overlay(&mut stats.speed, table.speed);
            overlay(&mut stats.contact_dps, table.contact_dps);
        }
        for (name, table) in self.projectiles {
            let kind: ProjectileKind = resolve("projectile", &name)?;
            let stats = rules.projectiles.get_mut(kind);
            overlay(&mut stats.speed, table.speed);
            overlay(&mut stats.damage, table.damage);
            overlay(&mut stats.splash_damage, table.splash_damage);
        }

        if let Some(waves) = self.waves {
            rules.waves = waves
                .into_iter()
                .enumerate()
                .map(|(index, wave)| wave.resolve(index))
                .collect::<Result<_, _>>()?;
        }
        Ok(())
    }
}

fn overlay<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridTable {
    rows: Option<u32>,
    columns: Option<u32>,
    cell_width: Option<f32>,
    cell_height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NaturalResourceTable {
    interval_ms: Option<u64>,
    value: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefenderTable {
    cost: Option<u32>,
    cooldown_ms: Option<u64>,
    health: Option<f32>,
    period_ms: Option<u64>,
    damage: Option<f32>,
    yield_value: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AttackerTable {
    health: Option<f32>,
    speed: Option<f32>,
    contact_dps: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectileTable {
    speed: Option<f32>,
    damage: Option<f32>,
    splash_damage: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WaveTable {
    spawn_interval_ms: u64,
    groups: Vec<GroupTable>,
}

impl WaveTable {
    fn resolve(self, wave: usize) -> Result<Wave, ConfigError> {
        let groups = self
            .groups
            .into_iter()
            .enumerate()
            .map(|(group, table)| {
                if table.count == 0 {
                    return Err(ConfigError::EmptyWaveGroup { wave, group });
                }
                Ok(WaveGroup {
                    attacker: resolve("attacker", &table.attacker)?,
                    count: table.count,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Wave::new(groups, millis(self.spawn_interval_ms)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupTable {
    attacker: String,
    count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_the_defaults() {
        let rules = from_toml_str("").expect("empty document");
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn scalars_and_tables_overlay_individual_fields() {
        let rules = from_toml_str(
            r#"
            seed = 42
            starting_balance = 150
            max_tick_ms = 50

            [grid]
            columns = 12

            [defenders.shooter]
            cost = 75

            [attackers.runner]
            speed = 30.0
            "#,
        )
        .expect("valid document");

        let defaults = Rules::default();
        assert_eq!(rules.rng_seed, 42);
        assert_eq!(rules.starting_balance, 150);
        assert_eq!(rules.max_tick, Duration::from_millis(50));
        assert_eq!(rules.grid.columns, 12);
        assert_eq!(rules.grid.rows, defaults.grid.rows);

        let shooter = rules.defenders.get(DefenderKind::Shooter);
        assert_eq!(shooter.cost, 75);
        assert_eq!(
            shooter.cooldown,
            defaults.defenders.get(DefenderKind::Shooter).cooldown
        );
        assert_eq!(rules.attackers.get(AttackerKind::Runner).speed, 30.0);
        assert_eq!(rules.waves, defaults.waves);
    }

    #[test]
    fn waves_replace_the_built_in_list() {
        let rules = from_toml_str(
            r#"
            [[waves]]
            spawn_interval_ms = 2000
            groups = [{ attacker = "walker", count = 2 }, { attacker = "brute", count = 1 }]
            "#,
        )
        .expect("valid document");

        assert_eq!(rules.waves.len(), 1);
        assert_eq!(rules.waves[0].spawn_interval, Duration::from_secs(2));
        assert_eq!(
            rules.waves[0].sequence(),
            vec![AttackerKind::Walker, AttackerKind::Walker, AttackerKind::Brute]
        );
    }

    #[test]
    fn unknown_kind_names_are_rejected() {
        let error = from_toml_str("[defenders.catapult]\ncost = 10\n").unwrap_err();
        assert!(matches!(
            error,
            ConfigError::UnknownType { category: "defender", ref name } if name == "catapult"
        ));

        let error = from_toml_str(
            "[[waves]]\nspawn_interval_ms = 10\ngroups = [{ attacker = \"ghost\", count = 1 }]\n",
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::UnknownType { category: "attacker", .. }));
    }

    #[test]
    fn degenerate_values_are_rejected() {
        assert!(matches!(
            from_toml_str("[grid]\nrows = 0\n"),
            Err(ConfigError::EmptyGrid)
        ));
        assert!(matches!(
            from_toml_str("max_tick_ms = 0\n"),
            Err(ConfigError::ZeroMaxTick)
        ));
        assert!(matches!(
            from_toml_str(
                "[[waves]]\nspawn_interval_ms = 10\ngroups = [{ attacker = \"walker\", count = 0 }]\n"
            ),
            Err(ConfigError::EmptyWaveGroup { wave: 0, group: 0 })
        ));
    }

    #[test]
    fn misspelled_fields_fail_to_parse() {
        assert!(matches!(
            from_toml_str("starting_balence = 10\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
