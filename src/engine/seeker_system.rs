use super::*;

use crate::types::{ItemKind, Position, SeekerView};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct PowerMode {
    pub(super) active: bool,
    pub(super) remaining_ms: u64,
}

impl PowerMode {
    /// Re-arming replaces whatever time was left; it never stacks.
    pub(super) fn arm(&mut self, duration_ms: u64) {
        self.active = duration_ms > 0;
        self.remaining_ms = duration_ms;
    }

    /// Returns `true` on the tick the mode runs out.
    pub(super) fn tick(&mut self, elapsed_ms: u64) -> bool {
        if !self.active {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms > 0 {
            return false;
        }
        self.active = false;
        true
    }

    fn fraction(&self, duration_ms: u64) -> f32 {
        if !self.active || duration_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms as f32 / duration_ms as f32).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub(super) struct Seeker {
    pub(super) start: Position,
    pub(super) position: Position,
    pub(super) direction: Direction,
    /// Requested turn, kept until the cell in that direction opens up.
    pub(super) pending: Option<Direction>,
    pub(super) power: PowerMode,
    pub(super) clock: MoveClock,
}

impl Seeker {
    pub(super) fn new(start: Position) -> Self {
        Self {
            start,
            position: start,
            direction: Direction::Right,
            pending: None,
            power: PowerMode::default(),
            clock: MoveClock::new(),
        }
    }

    pub(super) fn reset(&mut self) {
        *self = Self::new(self.start);
    }

    pub(super) fn view(&self, config: &GameConfig) -> SeekerView {
        SeekerView {
            position: self.position,
            direction: self.direction,
            pending_direction: self.pending,
            power_active: self.power.active,
            power_remaining_ms: self.power.remaining_ms,
            power_fraction: self.power.fraction(config.power_duration_ms),
        }
    }
}

impl<M: MazeModel> GameEngine<M> {
    pub(super) fn update_seeker(&mut self, elapsed_ms: u64) {
        if !self
            .seeker
            .clock
            .advance(elapsed_ms, self.config.seeker_move_interval_ms)
        {
            return;
        }
        self.advance_seeker_one_cell();
    }

    /// Applies the pending turn when its target cell is open, then moves one
    /// cell along the heading. A wall ahead leaves the seeker in place.
    fn advance_seeker_one_cell(&mut self) -> bool {
        if let Some(turn) = self.seeker.pending {
            if self.maze.is_walkable(self.seeker.position.step(turn)) {
                self.seeker.direction = turn;
                self.seeker.pending = None;
            }
        }
        let next = self.seeker.position.step(self.seeker.direction);
        if !self.maze.is_walkable(next) {
            return false;
        }
        self.seeker.position = next;
        true
    }

    pub(super) fn update_power_mode(&mut self, elapsed_ms: u64) {
        if self.seeker.power.tick(elapsed_ms) {
            debug!(tick = self.tick_counter, "power mode expired");
        }
        self.apply_seeker_pickups();
    }

    fn apply_seeker_pickups(&mut self) {
        let at = self.seeker.position;
        let Some(pickup) = self.maze.collect_item_at(at, &self.config.scores) else {
            return;
        };
        self.score = self.score.saturating_add(pickup.points);
        match pickup.kind {
            ItemKind::Dot => self.stats.dots += 1,
            ItemKind::PowerItem => {
                self.stats.power_items += 1;
                self.seeker.power.arm(self.config.power_duration_ms);
                debug!(x = at.x, y = at.y, "power mode armed");
            }
        }
        self.events.push(GameEvent::ItemCollected {
            position: at,
            kind: pickup.kind,
            points: pickup.points,
        });
    }
}
