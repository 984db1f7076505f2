//! Single-use guards that sweep a breached lane clear.

use std::time::Duration;

use lane_defence_core::{AttackerLoss, Event, LaneGuardSnapshot, LaneGuardState, Rules};
use tracing::info;

use crate::{attackers::Attacker, combat, entity::Entity};

/// Last-resort defence for a single lane.
#[derive(Clone, Debug)]
pub(crate) struct LaneGuard {
    lane: u32,
    state: LaneGuardState,
}

impl LaneGuard {
    pub(crate) fn new(lane: u32) -> Self {
        Self {
            lane,
            state: LaneGuardState::Ready,
        }
    }

    /// Starts the sweep just behind the defended edge; fails unless the guard is ready.
    pub(crate) fn trigger(&mut self, cell_width: f32, events: &mut Vec<Event>) -> bool {
        if self.state != LaneGuardState::Ready {
            return false;
        }
        info!(lane = self.lane, "lane guard triggered");
        self.state = LaneGuardState::Sweeping { x: -cell_width };
        events.push(Event::LaneGuardTriggered { lane: self.lane });
        true
    }

    /// Advances an active sweep, removing every attacker it reaches.
    pub(crate) fn update(
        &mut self,
        dt: Duration,
        rules: &Rules,
        attackers: &mut [Attacker],
        events: &mut Vec<Event>,
    ) {
        let LaneGuardState::Sweeping { x } = self.state else {
            return;
        };
        let x = x + rules.lane_guard_speed * dt.as_secs_f32();
        let reach = x + rules.grid.cell_width;

        for attacker in attackers.iter_mut() {
            if attacker.lane == self.lane && !attacker.is_marked() && attacker.position.x < reach {
                combat::defeat_attacker(attacker, AttackerLoss::LaneGuard, events);
            }
        }

        if x >= rules.grid.board_width() {
            info!(lane = self.lane, "lane guard retired");
            self.state = LaneGuardState::Spent;
            events.push(Event::LaneGuardRetired { lane: self.lane });
        } else {
            self.state = LaneGuardState::Sweeping { x };
        }
    }

    pub(crate) fn snapshot(&self) -> LaneGuardSnapshot {
        LaneGuardSnapshot {
            lane: self.lane,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_triggers_only_once() {
        let mut guard = LaneGuard::new(3);
        let mut events = Vec::new();

        assert!(guard.trigger(80.0, &mut events));
        assert!(!guard.trigger(80.0, &mut events));
        assert_eq!(events, vec![Event::LaneGuardTriggered { lane: 3 }]);
        assert_eq!(
            guard.snapshot().state,
            LaneGuardState::Sweeping { x: -80.0 }
        );
    }

    #[test]
    fn sweep_retires_after_crossing_the_board() {
        let rules = Rules::default();
        let mut guard = LaneGuard::new(0);
        let mut events = Vec::new();
        assert!(guard.trigger(rules.grid.cell_width, &mut events));

        for _ in 0..16 {
            guard.update(Duration::from_millis(100), &rules, &mut [], &mut events);
        }
        assert!(matches!(
            guard.snapshot().state,
            LaneGuardState::Sweeping { .. }
        ));

        guard.update(Duration::from_millis(100), &rules, &mut [], &mut events);
        assert_eq!(guard.snapshot().state, LaneGuardState::Spent);
        assert_eq!(events.last(), Some(&Event::LaneGuardRetired { lane: 0 }));
        assert!(!guard.trigger(rules.grid.cell_width, &mut events));
    }
}
