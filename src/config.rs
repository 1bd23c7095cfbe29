use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AMBUSH_LOOKAHEAD_CELLS, CHASE_DURATION_MS, DEFAULT_HUNTER_VARIANTS, DOT_POINTS,
    EATEN_RESPAWN_MS, FRIGHTENED_DURATION_MS, FRIGHTENED_RANDOM_TURN_CHANCE, FRIGHTENED_SLOWDOWN,
    HUNTER_CAPTURE_POINTS, HUNTER_MOVE_INTERVAL_MS, LEVEL_CLEAR_BONUS, LEVEL_CLEAR_DELAY_MS,
    MAX_AMBUSH_LOOKAHEAD_CELLS, MAX_MOVE_INTERVAL_MS,
    POWER_DURATION_MS, POWER_ITEM_POINTS, RESPAWN_GRACE_MS, SCATTER_DURATION_MS,
    SEEKER_MOVE_INTERVAL_MS, STARTING_LIVES,
};
use crate::error::ConfigError;
use crate::types::{BehaviorVariant, ItemKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreTable {
    pub dot: u32,
    pub power_item: u32,
    pub hunter_capture: u32,
    pub level_clear: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            dot: DOT_POINTS,
            power_item: POWER_ITEM_POINTS,
            hunter_capture: HUNTER_CAPTURE_POINTS,
            level_clear: LEVEL_CLEAR_BONUS,
        }
    }
}

impl ScoreTable {
    pub fn item_points(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Dot => self.dot,
            ItemKind::PowerItem => self.power_item,
        }
    }
}

/// Tuning for one game instance. Every engine owns its own copy, so tests can
/// run side by side with different timings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub seeker_move_interval_ms: u64,
    pub hunter_move_interval_ms: u64,
    /// Multiplier applied to the hunter interval while frightened.
    pub frightened_slowdown: f32,
    pub scatter_duration_ms: u64,
    pub chase_duration_ms: u64,
    pub frightened_duration_ms: u64,
    pub eaten_respawn_ms: u64,
    pub power_duration_ms: u64,
    pub respawn_grace_ms: u64,
    pub level_clear_delay_ms: u64,
    pub frightened_random_turn_chance: f32,
    pub ambush_lookahead: i32,
    pub starting_lives: u32,
    pub scores: ScoreTable,
    /// Assigned to hunters by index, cycling when there are more hunters.
    pub hunter_variants: Vec<BehaviorVariant>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seeker_move_interval_ms: SEEKER_MOVE_INTERVAL_MS,
            hunter_move_interval_ms: HUNTER_MOVE_INTERVAL_MS,
            frightened_slowdown: FRIGHTENED_SLOWDOWN,
            scatter_duration_ms: SCATTER_DURATION_MS,
            chase_duration_ms: CHASE_DURATION_MS,
            frightened_duration_ms: FRIGHTENED_DURATION_MS,
            eaten_respawn_ms: EATEN_RESPAWN_MS,
            power_duration_ms: POWER_DURATION_MS,
            respawn_grace_ms: RESPAWN_GRACE_MS,
            level_clear_delay_ms: LEVEL_CLEAR_DELAY_MS,
            frightened_random_turn_chance: FRIGHTENED_RANDOM_TURN_CHANCE,
            ambush_lookahead: AMBUSH_LOOKAHEAD_CELLS,
            starting_lives: STARTING_LIVES,
            scores: ScoreTable::default(),
            hunter_variants: DEFAULT_HUNTER_VARIANTS.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("seekerMoveIntervalMs", self.seeker_move_interval_ms),
            ("hunterMoveIntervalMs", self.hunter_move_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { field });
            }
            if value > MAX_MOVE_INTERVAL_MS {
                return Err(ConfigError::IntervalTooLong {
                    field,
                    value,
                    max: MAX_MOVE_INTERVAL_MS,
                });
            }
        }
        if !self.frightened_slowdown.is_finite() || self.frightened_slowdown <= 1.0 {
            return Err(ConfigError::SlowdownNotSlower(self.frightened_slowdown));
        }
        let slowed = self.frightened_interval_ms(self.hunter_move_interval_ms);
        if slowed > MAX_MOVE_INTERVAL_MS {
            return Err(ConfigError::IntervalTooLong {
                field: "frightenedSlowdown",
                value: slowed,
                max: MAX_MOVE_INTERVAL_MS,
            });
        }
        if !(1..=MAX_AMBUSH_LOOKAHEAD_CELLS).contains(&self.ambush_lookahead) {
            return Err(ConfigError::LookaheadOutOfRange {
                value: self.ambush_lookahead,
                max: MAX_AMBUSH_LOOKAHEAD_CELLS,
            });
        }
        if !(0.0..=1.0).contains(&self.frightened_random_turn_chance) {
            return Err(ConfigError::InvalidProbability {
                field: "frightenedRandomTurnChance",
                value: self.frightened_random_turn_chance,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.hunter_variants.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        Ok(())
    }

    /// Slowed cadence used by frightened hunters. Always strictly longer than
    /// `base_ms` for a validated config.
    pub fn frightened_interval_ms(&self, base_ms: u64) -> u64 {
        let slowed = (base_ms as f64 * self.frightened_slowdown as f64).round() as u64;
        slowed.max(base_ms.saturating_add(1))
    }

    pub fn variant_for(&self, hunter_index: usize) -> BehaviorVariant {
        self.hunter_variants[hunter_index % self.hunter_variants.len()]
    }
}
