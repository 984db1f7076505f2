//! Grid-bound defenders and their per-kind behaviours.

use std::time::Duration;

use lane_defence_core::{
    AttackerLoss, CellCoord, DefenderBehavior, DefenderCondition, DefenderId, DefenderKind,
    DefenderLoss, DefenderSnapshot, Event, Position, ProjectedCell, ProjectileKind, Rules,
};
use tracing::debug;

use crate::{
    attackers::Attacker,
    combat,
    entity::{Entity, Ids},
    grid::Grid,
    projectiles::Projectile,
    resources::{self, Resource},
};

/// Live defender owned by the world.
#[derive(Clone, Debug)]
pub(crate) struct Defender {
    /// Identifier allocated by the world.
    pub(crate) id: DefenderId,
    /// Kind of defender.
    pub(crate) kind: DefenderKind,
    /// Cell the defender occupies for its whole lifetime.
    pub(crate) cell: CellCoord,
    position: Position,
    extent: (f32, f32),
    /// Remaining health.
    pub(crate) health: f32,
    max_health: f32,
    timer: Duration,
    armed: bool,
    marked: bool,
}

impl Defender {
    pub(crate) fn new(
        id: DefenderId,
        kind: DefenderKind,
        cell: CellCoord,
        rules: &Rules,
    ) -> Self {
        let health = rules.defenders.get(kind).health;
        Self {
            id,
            kind,
            cell,
            position: rules.grid.cell_origin(cell),
            extent: (rules.grid.cell_width, rules.grid.cell_height),
            health,
            max_health: health,
            timer: Duration::ZERO,
            armed: false,
            marked: false,
        }
    }

    pub(crate) fn snapshot(&self) -> DefenderSnapshot {
        let health_fraction = if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        };
        DefenderSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            position: self.position,
            health_fraction,
            condition: DefenderCondition::from_fraction(health_fraction),
            armed: self.armed,
        }
    }

    /// Takes the accumulated timer when it reached `period`, resetting it to zero.
    fn elapse(&mut self, period: Duration) -> bool {
        if self.timer < period {
            return false;
        }
        self.timer = Duration::ZERO;
        true
    }

    fn fire(
        &mut self,
        projectile: ProjectileKind,
        lanes: std::ops::RangeInclusive<u32>,
        context: &mut DefenderContext<'_>,
    ) {
        let period = context.rules.defenders.get(self.kind).period;
        if !self.elapse(period) {
            return;
        }
        let x = self.position.x;
        if !lanes.clone().any(|lane| context.target_ahead(lane, x)) {
            return;
        }
        for lane in lanes {
            context.launch(projectile, lane, x);
        }
    }

    fn detonate(&mut self, context: &mut DefenderContext<'_>) {
        let damage = context.rules.defenders.get(self.kind).damage;
        let grid = context.rules.grid;
        let center = ProjectedCell::from(self.cell);
        debug!(defender = self.id.get(), cell = %self.cell, "detonating");
        for attacker in context.attackers.iter_mut() {
            if attacker.is_marked() {
                continue;
            }
            let projected = grid.project(attacker.lane, attacker.position.x);
            if projected.chebyshev_distance(center) <= 1 {
                combat::blast_attacker(attacker, damage, context.events);
            }
        }
        combat::destroy_defender(self, DefenderLoss::Detonated, context.grid, context.events);
    }

    fn spring(&mut self, context: &mut DefenderContext<'_>) {
        if !self.armed {
            let period = context.rules.defenders.get(self.kind).period;
            if !self.elapse(period) {
                return;
            }
            self.armed = true;
            debug!(defender = self.id.get(), cell = %self.cell, "mine armed");
        }

        let grid = context.rules.grid;
        let cell = self.cell;
        let victim = context.attackers.iter_mut().find(|attacker| {
            !attacker.is_marked() && grid.project(attacker.lane, attacker.position.x).matches(cell)
        });
        let Some(victim) = victim else {
            return;
        };
        combat::defeat_attacker(victim, AttackerLoss::Detonation, context.events);
        combat::destroy_defender(self, DefenderLoss::Detonated, context.grid, context.events);
    }
}

/// World state a defender reads and mutates while acting.
pub(crate) struct DefenderContext<'a> {
    pub(crate) dt: Duration,
    pub(crate) rules: &'a Rules,
    pub(crate) grid: &'a mut Grid,
    pub(crate) attackers: &'a mut [Attacker],
    pub(crate) projectiles: &'a mut Vec<Projectile>,
    pub(crate) resources: &'a mut Vec<Resource>,
    pub(crate) ids: &'a mut Ids,
    pub(crate) events: &'a mut Vec<Event>,
}

impl DefenderContext<'_> {
    /// Reports whether a live attacker in `lane` stands strictly ahead of `x`.
    fn target_ahead(&self, lane: u32, x: f32) -> bool {
        self.attackers
            .iter()
            .any(|attacker| !attacker.is_marked() && attacker.lane == lane && attacker.position.x > x)
    }

    fn launch(&mut self, kind: ProjectileKind, lane: u32, x: f32) {
        let grid = self.rules.grid;
        let id = self.ids.projectile();
        let origin = Position::new(
            x + grid.cell_width / 2.0,
            grid.lane_y(lane) + grid.cell_height / 5.0,
        );
        self.projectiles.push(Projectile::new(id, kind, lane, origin));
        self.events.push(Event::ProjectileFired {
            projectile: id,
            kind,
            lane,
        });
    }
}

impl Entity for Defender {
    type Context<'a> = DefenderContext<'a>;

    fn update(&mut self, context: &mut DefenderContext<'_>) {
        self.timer = self.timer.saturating_add(context.dt);

        match self.kind.behavior() {
            DefenderBehavior::Ranged { projectile, spread } => {
                let lanes = spread.lanes(self.cell.row(), context.rules.grid.rows);
                self.fire(projectile, lanes, context);
            }
            DefenderBehavior::Producer => {
                let stats = context.rules.defenders.get(self.kind);
                if self.elapse(stats.period) {
                    let _ = resources::drop_unit(
                        context.resources,
                        context.ids,
                        stats.yield_value,
                        self.position,
                        context.events,
                    );
                }
            }
            DefenderBehavior::Obstacle => {}
            DefenderBehavior::Immediate => self.detonate(context),
            DefenderBehavior::DelayedArm => self.spring(context),
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_resets_fully_instead_of_banking_overshoot() {
        let rules = Rules::default();
        let mut defender = Defender::new(
            DefenderId::new(0),
            DefenderKind::Shooter,
            CellCoord::new(0, 0),
            &rules,
        );
        defender.timer = Duration::from_millis(1_580);

        assert!(defender.elapse(Duration::from_millis(1_500)));
        assert_eq!(defender.timer, Duration::ZERO);
        assert!(!defender.elapse(Duration::from_millis(1_500)));
    }

    #[test]
    fn wall_reports_wear_from_its_health_fraction() {
        let rules = Rules::default();
        let mut wall = Defender::new(
            DefenderId::new(3),
            DefenderKind::Wall,
            CellCoord::new(1, 2),
            &rules,
        );
        assert_eq!(wall.snapshot().condition, DefenderCondition::Healthy);
        assert_eq!(wall.snapshot().position, Position::new(160.0, 100.0));

        wall.health = 2_000.0;
        assert_eq!(wall.snapshot().condition, DefenderCondition::Worn);

        wall.health = 1_000.0;
        assert_eq!(wall.snapshot().condition, DefenderCondition::Crumbling);
    }
}
