//! Capabilities shared by every entity owned by the world.

use lane_defence_core::{AttackerId, Bounds, DefenderId, Position, ProjectileId, ResourceId};

/// Positioned, boxed entity with a per-tick update hook.
pub(crate) trait Entity {
    /// Borrowed world state the entity reads and mutates while updating.
    type Context<'a>;

    /// Advances the entity by one tick.
    fn update(&mut self, context: &mut Self::Context<'_>);

    /// Upper-left corner of the entity's box.
    fn position(&self) -> Position;

    /// Width and height of the entity's box.
    fn extent(&self) -> (f32, f32);

    /// Whether the entity is waiting to be pruned.
    fn is_marked(&self) -> bool;

    /// Flags the entity for removal at the end of the tick.
    fn mark_for_deletion(&mut self);

    /// Axis-aligned box covering the entity.
    fn bounds(&self) -> Bounds {
        let (width, height) = self.extent();
        Bounds::new(self.position(), width, height)
    }
}

/// Updates every live entity in collection order.
pub(crate) fn update_all<E: Entity>(entities: &mut [E], context: &mut E::Context<'_>) {
    for entity in entities.iter_mut() {
        if !entity.is_marked() {
            entity.update(context);
        }
    }
}

/// Drops every entity flagged during the tick, preserving collection order.
pub(crate) fn prune<E: Entity>(entities: &mut Vec<E>) {
    entities.retain(|entity| !entity.is_marked());
}

/// Monotonic identifier allocation for every entity collection.
#[derive(Debug)]
pub(crate) struct Ids {
    defender: DefenderId,
    attacker: AttackerId,
    projectile: ProjectileId,
    resource: ResourceId,
}

impl Ids {
    pub(crate) fn new() -> Self {
        Self {
            defender: DefenderId::new(0),
            attacker: AttackerId::new(0),
            projectile: ProjectileId::new(0),
            resource: ResourceId::new(0),
        }
    }

    pub(crate) fn defender(&mut self) -> DefenderId {
        let id = self.defender;
        self.defender = id.next();
        id
    }

    pub(crate) fn attacker(&mut self) -> AttackerId {
        let id = self.attacker;
        self.attacker = id.next();
        id
    }

    pub(crate) fn projectile(&mut self) -> ProjectileId {
        let id = self.projectile;
        self.projectile = id.next();
        id
    }

    pub(crate) fn resource(&mut self) -> ResourceId {
        let id = self.resource;
        self.resource = id.next();
        id
    }
}
