use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        self.advance(dir, 1)
    }

    pub fn advance(self, dir: Direction, cells: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(cells)),
            y: self.y.saturating_add(dy.saturating_mul(cells)),
        }
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order; greedy choices break ties by the first match in it.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Wall,
    Open,
    Dot,
    PowerItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Dot,
    PowerItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pickup {
    pub kind: ItemKind,
    pub points: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HunterMode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorVariant {
    Aggressive,
    Ambush,
    Patrol,
    Random,
}

impl BehaviorVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "aggressive" => Some(Self::Aggressive),
            "ambush" => Some(Self::Ambush),
            "patrol" => Some(Self::Patrol),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    Paused,
    Respawning {
        #[serde(rename = "remainingMs")]
        remaining_ms: u64,
    },
    LevelTransition {
        #[serde(rename = "remainingMs")]
        remaining_ms: u64,
    },
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ItemCollected {
        position: Position,
        kind: ItemKind,
        points: u32,
    },
    HunterCaptured {
        #[serde(rename = "hunterId")]
        hunter_id: usize,
        position: Position,
        points: u32,
    },
    SeekerCaught {
        #[serde(rename = "hunterId")]
        hunter_id: usize,
        #[serde(rename = "livesLeft")]
        lives_left: u32,
    },
    LevelCleared {
        level: u32,
        bonus: u32,
    },
    LivesExhausted {
        score: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerView {
    pub position: Position,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub power_active: bool,
    pub power_remaining_ms: u64,
    pub power_fraction: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HunterView {
    pub id: usize,
    pub position: Position,
    pub direction: Direction,
    pub variant: BehaviorVariant,
    pub mode: HunterMode,
    pub home_corner: Position,
    pub frightened_remaining_ms: u64,
    pub frightened_fraction: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tick: u64,
    pub elapsed_ms: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub remaining_items: usize,
    pub seeker: SeekerView,
    pub hunters: Vec<HunterView>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub dots: u32,
    pub power_items: u32,
    pub hunters_captured: u32,
    pub catches: u32,
    pub levels_cleared: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub game_over: bool,
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub stats: RunStats,
}
