use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Position;

/// Reasons a maze layout cannot host a level.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze layout is empty")]
    Empty,
    #[error("maze of {cols}x{rows} cells is too small")]
    TooSmall { cols: i32, rows: i32 },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown glyph {glyph:?} at ({x},{y})")]
    UnknownGlyph { glyph: char, x: i32, y: i32 },
    #[error("maze has no seeker start")]
    MissingSeekerStart,
    #[error("maze has more than one seeker start")]
    DuplicateSeekerStart,
    #[error("maze has no hunter start")]
    MissingHunterStart,
    #[error("start position ({}, {}) is not walkable", .0.x, .0.y)]
    UnwalkableStart(Position),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },
    #[error("{field} of {value} ms exceeds the {max} ms limit")]
    IntervalTooLong {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("ambush lookahead {value} must be between 1 and {max} cells")]
    LookaheadOutOfRange { value: i32, max: i32 },
    #[error("frightened slowdown {0} must be greater than 1.0")]
    SlowdownNotSlower(f32),
    #[error("{field} probability {value} must be between 0.0 and 1.0")]
    InvalidProbability { field: &'static str, value: f32 },
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("hunter variant roster must not be empty")]
    EmptyRoster,
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
