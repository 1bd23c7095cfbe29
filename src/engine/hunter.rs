use crate::config::GameConfig;
use crate::constants::home_corner_for;
use crate::rng::Rng;
use crate::types::{BehaviorVariant, Direction, HunterMode, HunterView, Position};

use super::scheduler::MoveClock;
use super::utils::{closest_direction, farthest_direction, forward_options};

/// What a hunter knows about the seeker when picking a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetContext {
    pub seeker_position: Position,
    pub seeker_direction: Direction,
}

impl BehaviorVariant {
    /// Chase-mode destination for this strategy.
    ///
    /// Patrol and Random both aim straight at the seeker.
    pub fn select_target(self, seeker: &TargetContext, ambush_lookahead: i32) -> Position {
        match self {
            Self::Aggressive | Self::Patrol | Self::Random => seeker.seeker_position,
            Self::Ambush => seeker
                .seeker_position
                .advance(seeker.seeker_direction, ambush_lookahead),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ModeChange {
    pub(super) from: HunterMode,
    pub(super) to: HunterMode,
}

#[derive(Clone, Debug)]
pub(super) struct Hunter {
    pub(super) id: usize,
    pub(super) start: Position,
    pub(super) position: Position,
    pub(super) direction: Direction,
    pub(super) variant: BehaviorVariant,
    pub(super) mode: HunterMode,
    pub(super) home_corner: Position,
    /// Time spent in the current Scatter/Chase phase; frozen while
    /// Frightened or Eaten.
    pub(super) phase_elapsed_ms: u64,
    pub(super) frightened_remaining_ms: u64,
    pub(super) eaten_remaining_ms: u64,
    pub(super) clock: MoveClock,
    pub(super) move_interval_ms: u64,
}

impl Hunter {
    pub(super) fn new(
        id: usize,
        start: Position,
        variant: BehaviorVariant,
        maze_dims: (i32, i32),
        heading: Direction,
        config: &GameConfig,
    ) -> Self {
        let mut hunter = Self {
            id,
            start,
            position: start,
            direction: heading,
            variant,
            mode: HunterMode::Scatter,
            home_corner: start,
            phase_elapsed_ms: 0,
            frightened_remaining_ms: 0,
            eaten_remaining_ms: 0,
            clock: MoveClock::new(),
            move_interval_ms: config.hunter_move_interval_ms,
        };
        hunter.reset(maze_dims, heading, config);
        hunter
    }

    pub(super) fn reset(&mut self, maze_dims: (i32, i32), heading: Direction, config: &GameConfig) {
        self.position = self.start;
        self.direction = heading;
        self.mode = HunterMode::Scatter;
        self.home_corner = resolve_home_corner(self.id, maze_dims);
        self.phase_elapsed_ms = 0;
        self.frightened_remaining_ms = 0;
        self.eaten_remaining_ms = 0;
        self.clock.reset();
        self.move_interval_ms = config.hunter_move_interval_ms;
    }

    /// Advances the mode automaton by one tick.
    pub(super) fn update_mode(
        &mut self,
        elapsed_ms: u64,
        power_active: bool,
        maze_dims: (i32, i32),
        config: &GameConfig,
    ) -> Option<ModeChange> {
        let from = self.mode;
        match self.mode {
            HunterMode::Eaten => {
                self.eaten_remaining_ms = self.eaten_remaining_ms.saturating_sub(elapsed_ms);
                if self.eaten_remaining_ms > 0 {
                    return None;
                }
                self.position = self.start;
                self.mode = HunterMode::Scatter;
                self.phase_elapsed_ms = 0;
                self.clock.reset();
                self.move_interval_ms = config.hunter_move_interval_ms;
            }
            HunterMode::Scatter | HunterMode::Chase if power_active => {
                self.mode = HunterMode::Frightened;
                self.frightened_remaining_ms = config.frightened_duration_ms;
                self.direction = self.direction.opposite();
            }
            HunterMode::Frightened => {
                self.frightened_remaining_ms =
                    self.frightened_remaining_ms.saturating_sub(elapsed_ms);
                if self.frightened_remaining_ms > 0 {
                    return None;
                }
                self.mode = HunterMode::Chase;
                self.phase_elapsed_ms = 0;
            }
            HunterMode::Scatter => {
                self.phase_elapsed_ms = self.phase_elapsed_ms.saturating_add(elapsed_ms);
                if self.phase_elapsed_ms < config.scatter_duration_ms {
                    return None;
                }
                self.mode = HunterMode::Chase;
                self.phase_elapsed_ms = 0;
            }
            HunterMode::Chase => {
                self.phase_elapsed_ms = self.phase_elapsed_ms.saturating_add(elapsed_ms);
                if self.phase_elapsed_ms < config.chase_duration_ms {
                    return None;
                }
                self.mode = HunterMode::Scatter;
                self.phase_elapsed_ms = 0;
                self.home_corner = resolve_home_corner(self.id, maze_dims);
            }
        }
        Some(ModeChange {
            from,
            to: self.mode,
        })
    }

    /// Only reachable from Frightened; any other mode is left untouched.
    pub(super) fn mark_eaten(&mut self, config: &GameConfig) -> bool {
        if self.mode != HunterMode::Frightened {
            return false;
        }
        self.mode = HunterMode::Eaten;
        self.frightened_remaining_ms = 0;
        self.eaten_remaining_ms = config.eaten_respawn_ms;
        self.clock.reset();
        true
    }

    /// Eaten hunters hold position until they respawn.
    pub(super) fn step_due(&mut self, elapsed_ms: u64) -> bool {
        if self.mode == HunterMode::Eaten {
            return false;
        }
        self.clock.advance(elapsed_ms, self.move_interval_ms)
    }

    /// Cadence for the next cycle, picked after each step so a mode change
    /// only lengthens or shortens the following interval.
    pub(super) fn refresh_interval(&mut self, config: &GameConfig) {
        self.move_interval_ms = if self.mode == HunterMode::Frightened {
            config.frightened_interval_ms(config.hunter_move_interval_ms)
        } else {
            config.hunter_move_interval_ms
        };
    }

    pub(super) fn choose_direction(
        &self,
        candidates: &[Direction],
        seeker: &TargetContext,
        rng: &mut Rng,
        config: &GameConfig,
    ) -> Option<Direction> {
        let options = forward_options(candidates, self.direction);
        if options.is_empty() {
            return None;
        }
        match self.mode {
            HunterMode::Chase => {
                let target = self.variant.select_target(seeker, config.ambush_lookahead);
                closest_direction(self.position, &options, target)
            }
            HunterMode::Scatter => closest_direction(self.position, &options, self.home_corner),
            HunterMode::Frightened => {
                let best = farthest_direction(self.position, &options, seeker.seeker_position);
                if rng.chance(config.frightened_random_turn_chance) {
                    return rng.pick(&options);
                }
                best
            }
            HunterMode::Eaten => None,
        }
    }

    pub(super) fn view(&self, config: &GameConfig) -> HunterView {
        let frightened_fraction = if self.mode == HunterMode::Frightened
            && config.frightened_duration_ms > 0
        {
            (self.frightened_remaining_ms as f32 / config.frightened_duration_ms as f32)
                .clamp(0.0, 1.0)
        } else {
            0.0
        };
        HunterView {
            id: self.id,
            position: self.position,
            direction: self.direction,
            variant: self.variant,
            mode: self.mode,
            home_corner: self.home_corner,
            frightened_remaining_ms: self.frightened_remaining_ms,
            frightened_fraction,
        }
    }
}

fn resolve_home_corner(id: usize, (cols, rows): (i32, i32)) -> Position {
    Position::from(home_corner_for(id, cols, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: (i32, i32) = (30, 20);

    fn hunter(variant: BehaviorVariant, at: Position, heading: Direction) -> Hunter {
        let config = GameConfig::default();
        let mut hunter = Hunter::new(0, at, variant, DIMS, heading, &config);
        hunter.position = at;
        hunter
    }

    fn seeker_at(x: i32, y: i32, dir: Direction) -> TargetContext {
        TargetContext {
            seeker_position: Position::new(x, y),
            seeker_direction: dir,
        }
    }

    #[test]
    fn ambush_aims_four_cells_ahead_of_the_seeker() {
        let seeker = seeker_at(10, 10, Direction::Left);
        assert_eq!(
            BehaviorVariant::Ambush.select_target(&seeker, 4),
            Position::new(6, 10)
        );
        assert_eq!(
            BehaviorVariant::Aggressive.select_target(&seeker, 4),
            Position::new(10, 10)
        );
        assert_eq!(
            BehaviorVariant::Patrol.select_target(&seeker, 4),
            Position::new(10, 10)
        );
    }

    #[test]
    fn aggressive_chaser_picks_the_closer_vertical_move() {
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Left);
        h.mode = HunterMode::Chase;
        let mut rng = Rng::new(1);
        let choice = h.choose_direction(
            &[Direction::Up, Direction::Down],
            &seeker_at(5, 1, Direction::Right),
            &mut rng,
            &GameConfig::default(),
        );
        assert_eq!(choice, Some(Direction::Up));
    }

    #[test]
    fn scatter_heads_for_home_corner() {
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Right);
        assert_eq!(h.home_corner, Position::new(1, 1));
        h.mode = HunterMode::Scatter;
        let mut rng = Rng::new(1);
        let choice = h.choose_direction(
            &Direction::ALL,
            &seeker_at(20, 5, Direction::Left),
            &mut rng,
            &GameConfig::default(),
        );
        // Left would reverse the heading, so Up wins over Down.
        assert_eq!(choice, Some(Direction::Up));
    }

    #[test]
    fn frightened_without_randomness_flees() {
        let config = GameConfig {
            frightened_random_turn_chance: 0.0,
            ..GameConfig::default()
        };
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.mode = HunterMode::Frightened;
        let mut rng = Rng::new(1);
        let choice = h.choose_direction(
            &[Direction::Up, Direction::Left, Direction::Right],
            &seeker_at(3, 4, Direction::Right),
            &mut rng,
            &config,
        );
        assert_eq!(choice, Some(Direction::Right));
    }

    #[test]
    fn frightened_always_random_stays_within_candidates() {
        let config = GameConfig {
            frightened_random_turn_chance: 1.0,
            ..GameConfig::default()
        };
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.mode = HunterMode::Frightened;
        let mut rng = Rng::new(42);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let choice = h
                .choose_direction(
                    &[Direction::Up, Direction::Left, Direction::Right],
                    &seeker_at(3, 5, Direction::Right),
                    &mut rng,
                    &config,
                )
                .expect("candidates available");
            assert_ne!(choice, Direction::Down);
            if !seen.contains(&choice) {
                seen.push(choice);
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn default_frightened_override_fires_about_three_times_in_ten() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.mode = HunterMode::Frightened;
        let options = [Direction::Up, Direction::Left, Direction::Right];
        let seeker = seeker_at(3, 4, Direction::Right);
        let mut rng = Rng::new(2024);

        let trials = 30_000;
        let mut off_course = 0;
        for _ in 0..trials {
            let choice = h
                .choose_direction(&options, &seeker, &mut rng, &config)
                .expect("candidates available");
            if choice != Direction::Right {
                off_course += 1;
            }
        }
        // A random pick still lands on the flee move one time in three.
        let override_rate = off_course as f64 / trials as f64 * 3.0 / 2.0;
        assert!(
            (override_rate - 0.3).abs() < 0.03,
            "override rate {override_rate}"
        );
    }

    #[test]
    fn eaten_hunters_do_not_choose_or_step() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.mode = HunterMode::Frightened;
        assert!(h.mark_eaten(&config));
        let mut rng = Rng::new(1);
        assert_eq!(
            h.choose_direction(&Direction::ALL, &seeker_at(1, 1, Direction::Up), &mut rng, &config),
            None
        );
        assert!(!h.step_due(10_000));
    }

    #[test]
    fn only_frightened_hunters_can_be_eaten() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Ambush, Position::new(5, 5), Direction::Up);
        for mode in [HunterMode::Scatter, HunterMode::Chase, HunterMode::Eaten] {
            h.mode = mode;
            assert!(!h.mark_eaten(&config));
            assert_eq!(h.mode, mode);
        }
    }

    #[test]
    fn scatter_and_chase_alternate_on_their_durations() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        assert_eq!(h.update_mode(6_999, false, DIMS, &config), None);
        let change = h.update_mode(1, false, DIMS, &config).expect("scatter ends");
        assert_eq!((change.from, change.to), (HunterMode::Scatter, HunterMode::Chase));
        assert_eq!(h.phase_elapsed_ms, 0);

        assert_eq!(h.update_mode(19_999, false, DIMS, &config), None);
        h.home_corner = Position::new(0, 0);
        let change = h.update_mode(1, false, DIMS, &config).expect("chase ends");
        assert_eq!(change.to, HunterMode::Scatter);
        assert_eq!(h.home_corner, Position::new(1, 1));
    }

    #[test]
    fn power_mode_frightens_and_reverses() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Left);
        h.mode = HunterMode::Chase;
        let change = h.update_mode(16, true, DIMS, &config).expect("frightened");
        assert_eq!(change.to, HunterMode::Frightened);
        assert_eq!(h.direction, Direction::Right);
        assert_eq!(h.frightened_remaining_ms, config.frightened_duration_ms);

        // Already frightened: countdown only, no second reversal.
        assert_eq!(h.update_mode(16, true, DIMS, &config), None);
        assert_eq!(h.direction, Direction::Right);
        assert_eq!(h.frightened_remaining_ms, config.frightened_duration_ms - 16);
    }

    #[test]
    fn phase_time_is_paused_while_frightened() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.update_mode(5_000, false, DIMS, &config);
        assert_eq!(h.phase_elapsed_ms, 5_000);
        h.update_mode(16, true, DIMS, &config);
        h.update_mode(4_000, true, DIMS, &config);
        assert_eq!(h.mode, HunterMode::Frightened);
        assert_eq!(h.phase_elapsed_ms, 5_000);
    }

    #[test]
    fn frightened_overrun_resumes_chase_with_clean_phase() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.phase_elapsed_ms = 3_000;
        h.mode = HunterMode::Frightened;
        h.frightened_remaining_ms = 10;
        let change = h.update_mode(500, false, DIMS, &config).expect("fright ends");
        assert_eq!(change.to, HunterMode::Chase);
        assert_eq!(h.frightened_remaining_ms, 0);
        assert_eq!(h.phase_elapsed_ms, 0);
    }

    #[test]
    fn eaten_hunter_respawns_in_scatter_at_start() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.start = Position::new(2, 2);
        h.mode = HunterMode::Frightened;
        h.mark_eaten(&config);
        assert_eq!(h.update_mode(2_999, true, DIMS, &config), None);
        let change = h.update_mode(1, true, DIMS, &config).expect("respawn");
        assert_eq!((change.from, change.to), (HunterMode::Eaten, HunterMode::Scatter));
        assert_eq!(h.position, Position::new(2, 2));
        assert_eq!(h.phase_elapsed_ms, 0);
    }

    #[test]
    fn frightened_cadence_is_slower_after_the_next_step() {
        let config = GameConfig::default();
        let mut h = hunter(BehaviorVariant::Aggressive, Position::new(5, 5), Direction::Up);
        h.update_mode(16, true, DIMS, &config);
        assert_eq!(h.move_interval_ms, 350);
        assert!(h.step_due(350));
        h.refresh_interval(&config);
        assert_eq!(h.move_interval_ms, 525);
        assert!(!h.step_due(350));
    }
}
