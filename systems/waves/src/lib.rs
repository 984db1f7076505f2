#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduler responsible for pacing attacker spawn commands.
//!
//! Each wave walks through `Waiting -> Spawning -> Cleared`. A wave counts as
//! cleared only once its spawn quota is exhausted and no attacker remains
//! alive, so waves never overlap.

use std::time::Duration;

use lane_defence_core::{AttackerKind, Command, Event, Rules, Wave, WaveId, WavePhase};
use rand::Rng;
use tracing::{debug, info};

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Debug)]
pub struct Config {
    waves: Vec<Wave>,
    first_wave_delay: Duration,
    inter_wave_delay: Duration,
}

impl Config {
    /// Creates a new configuration from a wave table and its delays.
    #[must_use]
    pub fn new(waves: Vec<Wave>, first_wave_delay: Duration, inter_wave_delay: Duration) -> Self {
        Self {
            waves,
            first_wave_delay,
            inter_wave_delay,
        }
    }

    /// Extracts the wave table and delays from the run's rules.
    #[must_use]
    pub fn from_rules(rules: &Rules) -> Self {
        Self::new(
            rules.waves.clone(),
            rules.first_wave_delay,
            rules.inter_wave_delay,
        )
    }
}

/// Pure system that emits spawn commands from a declarative wave table.
#[derive(Debug)]
pub struct WaveScheduler {
    waves: Vec<Wave>,
    inter_wave_delay: Duration,
    current: usize,
    phase: WavePhase,
    sequence: Vec<AttackerKind>,
}

impl WaveScheduler {
    /// Creates a new scheduler waiting for the first wave.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            waves: config.waves,
            inter_wave_delay: config.inter_wave_delay,
            current: 0,
            phase: WavePhase::Waiting {
                remaining: config.first_wave_delay,
            },
            sequence: Vec::new(),
        }
    }

    /// Current phase of the scheduler.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Index of the wave being waited on or spawned.
    #[must_use]
    pub fn current_wave(&self) -> WaveId {
        WaveId::new(u32::try_from(self.current).unwrap_or(u32::MAX))
    }

    /// Ratio of cleared waves to total waves, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.waves.is_empty() {
            return 1.0;
        }
        (self.current as f32 / self.waves.len() as f32).clamp(0.0, 1.0)
    }

    /// Advances the scheduler by `dt`, emitting spawn and victory commands.
    ///
    /// `live_attackers` is the size of the attacker collection after this
    /// tick's pruning; attackers spawned during the call are added to it
    /// before deciding whether the current wave is cleared.
    pub fn handle<R>(
        &mut self,
        dt: Duration,
        live_attackers: usize,
        lanes: u32,
        rng: &mut R,
        out: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) where
        R: Rng + ?Sized,
    {
        if lanes == 0 {
            return;
        }

        let mut budget = dt;
        let mut spawned_now = 0usize;

        loop {
            match self.phase {
                WavePhase::Finished => return,
                WavePhase::Waiting { remaining } => {
                    if budget < remaining {
                        self.phase = WavePhase::Waiting {
                            remaining: remaining - budget,
                        };
                        return;
                    }
                    budget -= remaining;

                    let Some(wave) = self.waves.get(self.current) else {
                        info!("every wave cleared, declaring victory");
                        self.phase = WavePhase::Finished;
                        out.push(Command::DeclareVictory);
                        return;
                    };

                    self.sequence = wave.sequence();
                    let attackers = u32::try_from(self.sequence.len()).unwrap_or(u32::MAX);
                    info!(wave = self.current, attackers, "wave started");
                    out_events.push(Event::WaveStarted {
                        wave: self.current_wave(),
                        attackers,
                    });
                    self.phase = WavePhase::Spawning {
                        spawned: 0,
                        accumulator: budget,
                    };
                    budget = Duration::ZERO;
                }
                WavePhase::Spawning {
                    mut spawned,
                    mut accumulator,
                } => {
                    accumulator = accumulator.saturating_add(budget);
                    let interval = self
                        .waves
                        .get(self.current)
                        .map_or(Duration::ZERO, |wave| wave.spawn_interval);

                    while let Some(kind) = self.sequence.get(spawned as usize).copied() {
                        if !interval.is_zero() && accumulator < interval {
                            break;
                        }
                        accumulator -= interval;
                        let lane = rng.gen_range(0..lanes);
                        debug!(?kind, lane, "spawning attacker");
                        out.push(Command::SpawnAttacker { kind, lane });
                        spawned += 1;
                        spawned_now += 1;
                    }

                    if (spawned as usize) < self.sequence.len() {
                        self.phase = WavePhase::Spawning {
                            spawned,
                            accumulator,
                        };
                        return;
                    }

                    if live_attackers + spawned_now > 0 {
                        self.phase = WavePhase::Spawning {
                            spawned,
                            accumulator: Duration::ZERO,
                        };
                        return;
                    }

                    info!(wave = self.current, "wave cleared");
                    out_events.push(Event::WaveCleared {
                        wave: self.current_wave(),
                    });
                    self.current += 1;
                    self.sequence.clear();
                    self.phase = WavePhase::Waiting {
                        remaining: self.inter_wave_delay,
                    };
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::WaveGroup;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn empty_table_reports_full_progress() {
        let scheduler = WaveScheduler::new(Config::new(Vec::new(), Duration::ZERO, Duration::ZERO));
        assert_eq!(scheduler.progress(), 1.0);
    }

    #[test]
    fn zero_lanes_never_spawn() {
        let wave = Wave::new(
            vec![WaveGroup {
                attacker: AttackerKind::Walker,
                count: 2,
            }],
            Duration::ZERO,
        );
        let mut scheduler = WaveScheduler::new(Config::new(vec![wave], Duration::ZERO, Duration::ZERO));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut commands = Vec::new();
        let mut events = Vec::new();
        scheduler.handle(
            Duration::from_secs(1),
            0,
            0,
            &mut rng,
            &mut commands,
            &mut events,
        );
        assert!(commands.is_empty());
        assert!(events.is_empty());
    }
}
