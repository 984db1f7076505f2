//! Attackers advancing along their lanes toward the defended edge.

use std::time::Duration;

use lane_defence_core::{
    AttackerId, AttackerKind, AttackerLoss, AttackerSnapshot, AttackerStats, Event, Position,
    Rules, RunStatus, SpeedModifier, ATTACKER_LOW_HEALTH_FRACTION,
};
use tracing::info;

use crate::{
    combat, defenders::Defender, entity::Entity, grid::Grid, lane_guards::LaneGuard,
};

/// Live attacker owned by the world.
#[derive(Clone, Debug)]
pub(crate) struct Attacker {
    /// Identifier allocated by the world.
    pub(crate) id: AttackerId,
    /// Kind of attacker.
    pub(crate) kind: AttackerKind,
    /// Lane the attacker advances along.
    pub(crate) lane: u32,
    /// Upper-left corner of the attacker's box.
    pub(crate) position: Position,
    extent: (f32, f32),
    /// Remaining health; zero or below once defeated.
    pub(crate) health: f32,
    max_health: f32,
    base_speed: f32,
    slowed: bool,
    immobilized: bool,
    eating: bool,
    marked: bool,
}

impl Attacker {
    pub(crate) fn new(
        id: AttackerId,
        kind: AttackerKind,
        lane: u32,
        position: Position,
        extent: (f32, f32),
        stats: &AttackerStats,
    ) -> Self {
        Self {
            id,
            kind,
            lane,
            position,
            extent,
            health: stats.health,
            max_health: stats.health,
            base_speed: stats.speed,
            slowed: false,
            immobilized: false,
            eating: false,
            marked: false,
        }
    }

    /// Records a permanent speed modifier; repeated hits of one kind do not compound.
    pub(crate) fn apply_modifier(&mut self, modifier: SpeedModifier) {
        match modifier {
            SpeedModifier::Slow => self.slowed = true,
            SpeedModifier::Immobilize => self.immobilized = true,
        }
    }

    /// Effective speed in pixels per second.
    pub(crate) fn speed(&self) -> f32 {
        if self.eating {
            return 0.0;
        }
        let mut speed = self.base_speed;
        if self.slowed {
            speed *= SpeedModifier::Slow.factor();
        }
        if self.immobilized {
            speed *= SpeedModifier::Immobilize.factor();
        }
        speed
    }

    pub(crate) fn snapshot(&self) -> AttackerSnapshot {
        let health_fraction = if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        };
        AttackerSnapshot {
            id: self.id,
            kind: self.kind,
            lane: self.lane,
            position: self.position,
            health: self.health,
            health_fraction,
            eating: self.eating,
            slowed: self.slowed,
            immobilized: self.immobilized,
            low_health: health_fraction < ATTACKER_LOW_HEALTH_FRACTION,
        }
    }

    fn breach(&mut self, context: &mut AttackerContext<'_>) {
        info!(lane = self.lane, attacker = self.id.get(), "lane breached");
        context.events.push(Event::LaneBreached {
            lane: self.lane,
            attacker: self.id,
        });
        combat::defeat_attacker(self, AttackerLoss::Breach, context.events);

        let cell_width = context.rules.grid.cell_width;
        let guarded = context
            .guards
            .get_mut(self.lane as usize)
            .is_some_and(|guard| guard.trigger(cell_width, context.events));
        if !guarded {
            crate::conclude(context.status, RunStatus::Lost, context.events);
        }
    }
}

/// World state an attacker reads and mutates while advancing.
pub(crate) struct AttackerContext<'a> {
    pub(crate) dt: Duration,
    pub(crate) rules: &'a Rules,
    pub(crate) grid: &'a mut Grid,
    pub(crate) defenders: &'a mut [Defender],
    pub(crate) guards: &'a mut [LaneGuard],
    pub(crate) status: &'a mut RunStatus,
    pub(crate) events: &'a mut Vec<Event>,
}

impl Entity for Attacker {
    type Context<'a> = AttackerContext<'a>;

    fn update(&mut self, context: &mut AttackerContext<'_>) {
        if self.position.x < 0.0 {
            self.breach(context);
            return;
        }

        let dt = context.dt.as_secs_f32();
        let projected = context.rules.grid.project(self.lane, self.position.x);
        let occupant = context
            .grid
            .resolve(projected)
            .and_then(|cell| context.grid.occupant(cell));

        self.eating = false;
        if let Some(defender_id) = occupant {
            let target = context
                .defenders
                .iter_mut()
                .find(|defender| defender.id == defender_id && !defender.is_marked());
            if let Some(defender) = target {
                self.eating = true;
                let bite = context.rules.attackers.get(self.kind).contact_dps * dt;
                if combat::bite_defender(defender, bite, context.grid, context.events) {
                    self.eating = false;
                }
            }
        }

        self.position.x -= self.speed() * dt;
    }

    fn position(&self) -> Position {
        self.position
    }

    fn extent(&self) -> (f32, f32) {
        self.extent
    }

    fn is_marked(&self) -> bool {
        self.marked
    }

    fn mark_for_deletion(&mut self) {
        self.marked = true;
    }
}
