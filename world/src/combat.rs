//! Damage application between projectiles, attackers and defenders.

use lane_defence_core::{AttackerLoss, DefenderLoss, Event, ProjectileKind};
use tracing::debug;

use crate::{attackers::Attacker, defenders::Defender, entity::Entity, grid::Grid};

/// Subtracts `amount` from `health`, reporting whether it dropped to zero or below.
pub(crate) fn strike(health: &mut f32, amount: f32) -> bool {
    *health -= amount;
    *health <= 0.0
}

/// Lands a projectile hit on an attacker, applying the projectile's speed modifier.
pub(crate) fn hit_attacker(
    attacker: &mut Attacker,
    projectile: ProjectileKind,
    amount: f32,
    events: &mut Vec<Event>,
) {
    let defeated = strike(&mut attacker.health, amount);
    events.push(Event::AttackerHit {
        attacker: attacker.id,
        projectile,
        remaining_health: attacker.health,
    });
    if defeated {
        defeat_attacker(attacker, AttackerLoss::Combat, events);
    } else if let Some(modifier) = projectile.speed_modifier() {
        attacker.apply_modifier(modifier);
    }
}

/// Applies detonation damage to an attacker.
pub(crate) fn blast_attacker(attacker: &mut Attacker, amount: f32, events: &mut Vec<Event>) {
    if strike(&mut attacker.health, amount) {
        defeat_attacker(attacker, AttackerLoss::Detonation, events);
    }
}

/// Removes an attacker from play.
pub(crate) fn defeat_attacker(attacker: &mut Attacker, cause: AttackerLoss, events: &mut Vec<Event>) {
    attacker.mark_for_deletion();
    debug!(attacker = attacker.id.get(), ?cause, "attacker defeated");
    events.push(Event::AttackerDefeated {
        attacker: attacker.id,
        cause,
    });
}

/// Applies contact damage from an eating attacker, returning whether the defender fell.
pub(crate) fn bite_defender(
    defender: &mut Defender,
    amount: f32,
    grid: &mut Grid,
    events: &mut Vec<Event>,
) -> bool {
    if !strike(&mut defender.health, amount) {
        return false;
    }
    destroy_defender(defender, DefenderLoss::Eaten, grid, events);
    true
}

/// Removes a defender from play and frees its cell in the same step.
pub(crate) fn destroy_defender(
    defender: &mut Defender,
    cause: DefenderLoss,
    grid: &mut Grid,
    events: &mut Vec<Event>,
) {
    defender.mark_for_deletion();
    if grid.occupant(defender.cell) == Some(defender.id) {
        let _ = grid.remove(defender.cell);
    }
    debug!(
        defender = defender.id.get(),
        cell = %defender.cell,
        ?cause,
        "defender destroyed"
    );
    events.push(Event::DefenderDestroyed {
        defender: defender.id,
        kind: defender.kind,
        cell: defender.cell,
        cause,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_reports_defeat_at_exactly_zero() {
        let mut health = 100.0;
        assert!(!strike(&mut health, 25.0));
        assert!(!strike(&mut health, 25.0));
        assert!(!strike(&mut health, 25.0));
        assert!(strike(&mut health, 25.0));
        assert_eq!(health, 0.0);
    }

    #[test]
    fn overkill_leaves_negative_health() {
        let mut health = 10.0;
        assert!(strike(&mut health, 1_800.0));
        assert!(health < 0.0);
    }
}
