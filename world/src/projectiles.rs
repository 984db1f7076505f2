//! Projectiles travelling along their lanes toward the far edge.

use std::time::Duration;

use lane_defence_core::{
    AttackerId, Event, Position, ProjectileId, ProjectileKind, ProjectileSnapshot, Rules,
};

use crate::{attackers::Attacker, combat, entity::Entity};

const PROJECTILE_EXTENT: (f32, f32) = (20.0, 20.0);

/// Live projectile owned by the world.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    id: ProjectileId,
    kind: ProjectileKind,
    lane: u32,
    position: Position,
    struck: Vec<AttackerId>,
    marked: bool,
}

impl Projectile {
    pub(crate) fn new(id: ProjectileId, kind: ProjectileKind, lane: u32, position: Position) -> Self {
        Self {
            id,
            kind,
            lane,
            position,
            struck: Vec::new(),
            marked: false,
        }
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind,
            lane: self.lane,
            position: self.position,
        }
    }
}

/// World state a projectile reads and mutates while travelling.
pub(crate) struct ProjectileContext<'a> {
    pub(crate) dt: Duration,
    pub(crate) rules: &'a Rules,
    pub(crate) attackers: &'a mut [Attacker],
    pub(crate) events: &'a mut Vec<Event>,
}

impl ProjectileContext<'_> {
    /// Damages every live attacker within one cell of the one at `center`
    /// that the projectile has not struck yet, recording each in `struck`.
    fn splash(
        &mut self,
        center: usize,
        amount: f32,
        kind: ProjectileKind,
        struck: &mut Vec<AttackerId>,
    ) {
        let grid = self.rules.grid;
        let center = {
            let attacker = &self.attackers[center];
            grid.project(attacker.lane, attacker.position.x)
        };
        for attacker in self.attackers.iter_mut() {
            if attacker.is_marked() || struck.contains(&attacker.id) {
                continue;
            }
            let projected = grid.project(attacker.lane, attacker.position.x);
            if projected.chebyshev_distance(center) <= 1 {
                combat::hit_attacker(attacker, kind, amount, self.events);
                struck.push(attacker.id);
            }
        }
    }
}

impl Entity for Projectile {
    type Context<'a> = ProjectileContext<'a>;

    fn update(&mut self, context: &mut ProjectileContext<'_>) {
        let stats = *context.rules.projectiles.get(self.kind);
        self.position.x += stats.speed * context.dt.as_secs_f32();
        if self.position.x > context.rules.grid.board_width() {
            self.mark_for_deletion();
            return;
        }

        let bounds = self.bounds();
        for index in 0..context.attackers.len() {
            let attacker = &mut context.attackers[index];
            if attacker.is_marked()
                || self.struck.contains(&attacker.id)
                || !bounds.overlaps(&attacker.bounds())
            {
                continue;
            }

            self.struck.push(attacker.id);
            combat::hit_attacker(attacker, self.kind, stats.damage, context.events);
            if stats.splash_damage > 0.0 {
                context.splash(index, stats.splash_damage, self.kind, &mut self.struck);
            }

            if !self.kind.passes_through() {
                self.mark_for_deletion();
                return;
            }
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn extent(&self) -> (f32, f32) {
        PROJECTILE_EXTENT
    }

    fn is_marked(&self) -> bool {
        self.marked
    }

    fn mark_for_deletion(&mut self) {
        self.marked = true;
    }
}
