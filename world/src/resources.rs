//! Collectible resource units waiting on the board.

use std::time::Duration;

use lane_defence_core::{Event, Position, ResourceId, ResourceSnapshot};
use tracing::debug;

use crate::entity::{Entity, Ids};

/// Width and height of a resource unit's box.
pub(crate) const RESOURCE_EXTENT: (f32, f32) = (40.0, 40.0);

/// Uncollected resource unit.
#[derive(Clone, Debug)]
pub(crate) struct Resource {
    pub(crate) id: ResourceId,
    pub(crate) value: u32,
    position: Position,
    age: Duration,
    marked: bool,
}

impl Resource {
    pub(crate) fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            id: self.id,
            value: self.value,
            position: self.position,
            age: self.age,
        }
    }
}

pub(crate) struct ResourceContext<'a> {
    pub(crate) dt: Duration,
    pub(crate) lifetime: Duration,
    pub(crate) events: &'a mut Vec<Event>,
}

impl Entity for Resource {
    type Context<'a> = ResourceContext<'a>;

    fn update(&mut self, context: &mut ResourceContext<'_>) {
        self.age = self.age.saturating_add(context.dt);
        if self.age >= context.lifetime {
            self.mark_for_deletion();
            context.events.push(Event::ResourceExpired { resource: self.id });
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn extent(&self) -> (f32, f32) {
        RESOURCE_EXTENT
    }

    fn is_marked(&self) -> bool {
        self.marked
    }

    fn mark_for_deletion(&mut self) {
        self.marked = true;
    }
}

/// Places a new resource unit on the board.
pub(crate) fn drop_unit(
    resources: &mut Vec<Resource>,
    ids: &mut Ids,
    value: u32,
    position: Position,
    events: &mut Vec<Event>,
) -> ResourceId {
    let id = ids.resource();
    debug!(resource = id.get(), value, "resource dropped");
    resources.push(Resource {
        id,
        value,
        position,
        age: Duration::ZERO,
        marked: false,
    });
    events.push(Event::ResourceSpawned {
        resource: id,
        value,
        position,
    });
    id
}
