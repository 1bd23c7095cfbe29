use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::{EngineError, MazeError};
use crate::maze::{Maze, MazeModel};
use crate::rng::Rng;
use crate::types::{
    Direction, GameEvent, GamePhase, GameSummary, RunStats, Snapshot,
};

mod collision_system;
mod hunter;
mod scheduler;
mod seeker_system;
mod spawn_system;
mod utils;

pub use self::hunter::TargetContext;
use self::scheduler::MoveClock;

use self::hunter::Hunter;
use self::seeker_system::Seeker;

/// Single-owner simulation of one maze-chase game.
///
/// Nothing inside a tick blocks or waits: respawn and level-transition holds
/// are countdowns in [`GamePhase`], so the engine can be driven from a render
/// loop or stepped directly from a test.
#[derive(Clone, Debug)]
pub struct GameEngine<M: MazeModel = Maze> {
    config: GameConfig,
    maze: M,
    maze_dims: (i32, i32),
    rng: Rng,

    seeker: Seeker,
    hunters: Vec<Hunter>,
    events: Vec<GameEvent>,

    phase: GamePhase,
    score: u32,
    lives: u32,
    level: u32,
    stats: RunStats,
    tick_counter: u64,
    elapsed_ms: u64,
}

impl<M: MazeModel> GameEngine<M> {
    pub fn new(maze: M, config: GameConfig, seed: u32) -> Result<Self, EngineError> {
        config.validate()?;
        let (seeker_start, hunter_starts) = maze.start_positions();
        if hunter_starts.is_empty() {
            return Err(MazeError::MissingHunterStart.into());
        }
        for start in std::iter::once(seeker_start).chain(hunter_starts.iter().copied()) {
            if !maze.is_walkable(start) {
                return Err(MazeError::UnwalkableStart(start).into());
            }
        }

        let maze_dims = maze.dimensions();
        let mut engine = Self {
            lives: config.starting_lives,
            config,
            maze,
            maze_dims,
            rng: Rng::new(seed),
            seeker: Seeker::new(seeker_start),
            hunters: Vec::new(),
            events: Vec::new(),
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            stats: RunStats::default(),
            tick_counter: 0,
            elapsed_ms: 0,
        };
        engine.spawn_hunters(&hunter_starts);
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn maze(&self) -> &M {
        &self.maze
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Requests a turn; it is applied at the first step where it is walkable.
    pub fn queue_direction(&mut self, dir: Direction) {
        self.seeker.pending = Some(dir);
    }

    /// Advances the simulation by `elapsed_ms` of wall-clock time.
    pub fn tick(&mut self, elapsed_ms: u64) {
        match self.phase {
            GamePhase::GameOver | GamePhase::Paused => return,
            GamePhase::Respawning { remaining_ms } => {
                self.count_down_hold(elapsed_ms, remaining_ms, |left| GamePhase::Respawning {
                    remaining_ms: left,
                });
                return;
            }
            GamePhase::LevelTransition { remaining_ms } => {
                self.count_down_hold(elapsed_ms, remaining_ms, |left| {
                    GamePhase::LevelTransition { remaining_ms: left }
                });
                return;
            }
            GamePhase::Playing => {}
        }

        self.tick_counter += 1;
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);

        self.update_seeker(elapsed_ms);
        self.update_hunters(elapsed_ms);
        self.resolve_collisions();
        if self.phase != GamePhase::Playing {
            return;
        }
        self.update_power_mode(elapsed_ms);
        self.check_level_cleared();
    }

    /// Read-only view for renderers; calling it twice between ticks yields
    /// identical values.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_counter,
            elapsed_ms: self.elapsed_ms,
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            level: self.level,
            remaining_items: self.maze.remaining_item_count(),
            seeker: self.seeker.view(&self.config),
            hunters: self
                .hunters
                .iter()
                .map(|hunter| hunter.view(&self.config))
                .collect(),
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hands pending events to the presentation layer and clears them.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            level: self.level,
            lives: self.lives,
            game_over: self.is_over(),
            ticks: self.tick_counter,
            elapsed_ms: self.elapsed_ms,
            stats: self.stats.clone(),
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Starts over from level 1. Any pending hold is simply overwritten.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = 1;
        self.stats = RunStats::default();
        self.tick_counter = 0;
        self.elapsed_ms = 0;
        self.events.clear();
        self.maze.reset_items();
        self.reset_entities();
        self.phase = GamePhase::Playing;
        info!("game restarted");
    }

    fn count_down_hold(
        &mut self,
        elapsed_ms: u64,
        remaining_ms: u64,
        still_holding: impl FnOnce(u64) -> GamePhase,
    ) {
        let left = remaining_ms.saturating_sub(elapsed_ms);
        self.phase = if left == 0 {
            GamePhase::Playing
        } else {
            still_holding(left)
        };
    }

    fn update_hunters(&mut self, elapsed_ms: u64) {
        let power_active = self.seeker.power.active;
        let target = TargetContext {
            seeker_position: self.seeker.position,
            seeker_direction: self.seeker.direction,
        };

        for idx in 0..self.hunters.len() {
            if let Some(change) =
                self.hunters[idx].update_mode(elapsed_ms, power_active, self.maze_dims, &self.config)
            {
                debug!(
                    hunter = self.hunters[idx].id,
                    from = ?change.from,
                    to = ?change.to,
                    "hunter mode changed"
                );
            }

            if !self.hunters[idx].step_due(elapsed_ms) {
                continue;
            }
            let from = self.hunters[idx].position;
            let candidates = self.maze.valid_directions(from);
            let choice = self.hunters[idx].choose_direction(
                &candidates,
                &target,
                &mut self.rng,
                &self.config,
            );
            if let Some(dir) = choice {
                self.try_move_hunter(idx, dir);
            }
            self.hunters[idx].refresh_interval(&self.config);
        }
    }

    fn try_move_hunter(&mut self, idx: usize, dir: Direction) -> bool {
        self.hunters[idx].direction = dir;
        let next = self.hunters[idx].position.step(dir);
        if !self.maze.is_walkable(next) {
            return false;
        }
        self.hunters[idx].position = next;
        true
    }

    fn check_level_cleared(&mut self) {
        if self.maze.remaining_item_count() > 0 {
            return;
        }
        let bonus = self.config.scores.level_clear;
        let cleared = self.level;
        self.score = self.score.saturating_add(bonus);
        self.level += 1;
        self.stats.levels_cleared += 1;
        self.events.push(GameEvent::LevelCleared {
            level: cleared,
            bonus,
        });
        info!(level = cleared, score = self.score, "level cleared");

        self.maze.reset_items();
        self.reset_entities();
        self.phase = if self.config.level_clear_delay_ms > 0 {
            GamePhase::LevelTransition {
                remaining_ms: self.config.level_clear_delay_ms,
            }
        } else {
            GamePhase::Playing
        };
    }
}
