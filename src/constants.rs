use crate::types::BehaviorVariant;

pub const TICK_RATE: u32 = 60;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

pub const SEEKER_MOVE_INTERVAL_MS: u64 = 300;
pub const HUNTER_MOVE_INTERVAL_MS: u64 = 350;
pub const FRIGHTENED_SLOWDOWN: f32 = 1.5;
/// Upper bound for any configured movement interval, slowed or not.
pub const MAX_MOVE_INTERVAL_MS: u64 = 60_000;

pub const SCATTER_DURATION_MS: u64 = 7_000;
pub const CHASE_DURATION_MS: u64 = 20_000;
pub const FRIGHTENED_DURATION_MS: u64 = 8_000;
pub const EATEN_RESPAWN_MS: u64 = 3_000;
pub const POWER_DURATION_MS: u64 = 10_000;
pub const RESPAWN_GRACE_MS: u64 = 2_000;
pub const LEVEL_CLEAR_DELAY_MS: u64 = 3_000;

pub const FRIGHTENED_RANDOM_TURN_CHANCE: f32 = 0.3;
pub const AMBUSH_LOOKAHEAD_CELLS: i32 = 4;
pub const MAX_AMBUSH_LOOKAHEAD_CELLS: i32 = 32;
pub const STARTING_LIVES: u32 = 3;

pub const DOT_POINTS: u32 = 10;
pub const POWER_ITEM_POINTS: u32 = 50;
pub const HUNTER_CAPTURE_POINTS: u32 = 200;
pub const LEVEL_CLEAR_BONUS: u32 = 1_000;

pub const DEFAULT_MAZE_COLS: i32 = 30;
pub const DEFAULT_MAZE_ROWS: i32 = 20;

pub const DEFAULT_HUNTER_VARIANTS: [BehaviorVariant; 4] = [
    BehaviorVariant::Aggressive,
    BehaviorVariant::Ambush,
    BehaviorVariant::Patrol,
    BehaviorVariant::Random,
];

/// Scatter destinations by hunter index: top-left, top-right, bottom-left,
/// bottom-right, one cell inside the border.
pub fn home_corner_for(index: usize, cols: i32, rows: i32) -> (i32, i32) {
    let corners = [
        (1, 1),
        (cols - 2, 1),
        (1, rows - 2),
        (cols - 2, rows - 2),
    ];
    corners[index % corners.len()]
}
