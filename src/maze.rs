use std::collections::BTreeSet;

use crate::config::ScoreTable;
use crate::error::MazeError;
use crate::types::{CellKind, Direction, ItemKind, Pickup, Position};

/// Query surface the engine needs from a level's map. Walls never change
/// within a level; only the item sets shrink as the seeker collects them.
pub trait MazeModel {
    fn dimensions(&self) -> (i32, i32);

    /// Out-of-bounds cells are never walkable.
    fn is_walkable(&self, pos: Position) -> bool;

    /// Walkable neighbours of `pos`, always in `Direction::ALL` order.
    fn valid_directions(&self, pos: Position) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|dir| self.is_walkable(pos.step(*dir)))
            .collect()
    }

    /// Removes the item at `pos` from the live set, if any.
    fn collect_item_at(&mut self, pos: Position, scores: &ScoreTable) -> Option<Pickup>;

    fn remaining_item_count(&self) -> usize;

    /// `(seeker_start, hunter_starts)`.
    fn start_positions(&self) -> (Position, Vec<Position>);

    /// Restores every item collected since the level began.
    fn reset_items(&mut self);
}

#[derive(Clone, Debug)]
pub struct Maze {
    cols: i32,
    rows: i32,
    walls: Vec<bool>,
    initial_dots: BTreeSet<Position>,
    initial_power_items: BTreeSet<Position>,
    dots: BTreeSet<Position>,
    power_items: BTreeSet<Position>,
    seeker_start: Position,
    hunter_starts: Vec<Position>,
}

impl Maze {
    /// Parses an ASCII layout: `#` wall, `.` dot, `o` power item, ` ` open
    /// floor, `P` seeker start, `G` hunter start. Trailing blank lines are
    /// ignored.
    pub fn parse(layout: &str) -> Result<Self, MazeError> {
        let mut lines: Vec<&str> = layout
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(MazeError::Empty);
        }

        let expected = lines[0].chars().count();
        let rows = lines.len() as i32;
        let cols = expected as i32;
        if cols < 3 || rows < 3 {
            return Err(MazeError::TooSmall { cols, rows });
        }

        let mut walls = Vec::with_capacity((cols * rows) as usize);
        let mut dots = BTreeSet::new();
        let mut power_items = BTreeSet::new();
        let mut seeker_start = None;
        let mut hunter_starts = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let actual = line.chars().count();
            if actual != expected {
                return Err(MazeError::RaggedRow {
                    row,
                    expected,
                    actual,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let pos = Position::new(col as i32, row as i32);
                walls.push(glyph == '#');
                match glyph {
                    '#' | ' ' => {}
                    '.' => {
                        dots.insert(pos);
                    }
                    'o' => {
                        power_items.insert(pos);
                    }
                    'P' => {
                        if seeker_start.replace(pos).is_some() {
                            return Err(MazeError::DuplicateSeekerStart);
                        }
                    }
                    'G' => hunter_starts.push(pos),
                    _ => {
                        return Err(MazeError::UnknownGlyph {
                            glyph,
                            x: pos.x,
                            y: pos.y,
                        })
                    }
                }
            }
        }

        let seeker_start = seeker_start.ok_or(MazeError::MissingSeekerStart)?;
        if hunter_starts.is_empty() {
            return Err(MazeError::MissingHunterStart);
        }

        Ok(Self {
            cols,
            rows,
            walls,
            initial_dots: dots.clone(),
            initial_power_items: power_items.clone(),
            dots,
            power_items,
            seeker_start,
            hunter_starts,
        })
    }

    /// Builds the lattice maze used by the arcade build: border walls, a grid
    /// of pillars plus offset wall stubs, dots everywhere else and a power
    /// item near each corner.
    pub fn generate(cols: i32, rows: i32) -> Result<Self, MazeError> {
        if cols < 5 || rows < 5 {
            return Err(MazeError::TooSmall { cols, rows });
        }

        let mut grid = vec![vec!['.'; cols as usize]; rows as usize];
        for y in 0..rows {
            for x in 0..cols {
                let border = x == 0 || y == 0 || x == cols - 1 || y == rows - 1;
                if border || is_lattice_wall(x, y, cols, rows) {
                    grid[y as usize][x as usize] = '#';
                }
            }
        }

        grid[1][1] = 'P';
        for (x, y) in [(cols - 2, 1), (cols - 2, rows - 2), (1, rows - 2)] {
            grid[y as usize][x as usize] = 'G';
        }

        for (x, y) in [(2, 2), (cols - 3, 2), (2, rows - 3), (cols - 3, rows - 3)] {
            if grid[y as usize][x as usize] == '.' {
                grid[y as usize][x as usize] = 'o';
            }
        }

        let layout = grid
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        Self::parse(&layout)
    }

    pub fn cell_kind(&self, pos: Position) -> CellKind {
        if !self.in_bounds(pos) || self.walls[self.index(pos)] {
            return CellKind::Wall;
        }
        if self.power_items.contains(&pos) {
            return CellKind::PowerItem;
        }
        if self.dots.contains(&pos) {
            return CellKind::Dot;
        }
        CellKind::Open
    }

    pub fn dots(&self) -> impl Iterator<Item = Position> + '_ {
        self.dots.iter().copied()
    }

    pub fn power_items(&self) -> impl Iterator<Item = Position> + '_ {
        self.power_items.iter().copied()
    }

    /// Text picture of the live maze; `overlays` are drawn over the cells in
    /// order, so later entries win.
    pub fn render_ascii(&self, overlays: &[(Position, char)]) -> String {
        let mut rows: Vec<Vec<char>> = (0..self.rows)
            .map(|y| {
                (0..self.cols)
                    .map(|x| match self.cell_kind(Position::new(x, y)) {
                        CellKind::Wall => '#',
                        CellKind::Open => ' ',
                        CellKind::Dot => '.',
                        CellKind::PowerItem => 'o',
                    })
                    .collect()
            })
            .collect();
        for (pos, glyph) in overlays {
            if self.in_bounds(*pos) {
                rows[pos.y as usize][pos.x as usize] = *glyph;
            }
        }
        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.cols && pos.y < self.rows
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y * self.cols + pos.x) as usize
    }
}

impl MazeModel for Maze {
    fn dimensions(&self) -> (i32, i32) {
        (self.cols, self.rows)
    }

    fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.walls[self.index(pos)]
    }

    fn collect_item_at(&mut self, pos: Position, scores: &ScoreTable) -> Option<Pickup> {
        let kind = if self.dots.remove(&pos) {
            ItemKind::Dot
        } else if self.power_items.remove(&pos) {
            ItemKind::PowerItem
        } else {
            return None;
        };
        Some(Pickup {
            kind,
            points: scores.item_points(kind),
        })
    }

    fn remaining_item_count(&self) -> usize {
        self.dots.len() + self.power_items.len()
    }

    fn start_positions(&self) -> (Position, Vec<Position>) {
        (self.seeker_start, self.hunter_starts.clone())
    }

    fn reset_items(&mut self) {
        self.dots = self.initial_dots.clone();
        self.power_items = self.initial_power_items.clone();
    }
}

fn is_lattice_wall(x: i32, y: i32, cols: i32, rows: i32) -> bool {
    if x % 4 == 0 && y % 4 == 0 && x < cols - 2 && y < rows - 2 {
        return true;
    }
    (x % 8 == 4 && y % 4 == 2) || (x % 4 == 2 && y % 8 == 4)
}
