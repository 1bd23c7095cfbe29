use crate::rng::Rng;
use crate::types::{Direction, Position};

pub(super) fn random_heading(rng: &mut Rng) -> Direction {
    rng.pick(&Direction::ALL).unwrap_or(Direction::Left)
}

/// Drops the reversing move unless it is the only way out.
pub(super) fn forward_options(candidates: &[Direction], heading: Direction) -> Vec<Direction> {
    let reverse = heading.opposite();
    let forward: Vec<Direction> = candidates
        .iter()
        .copied()
        .filter(|dir| *dir != reverse)
        .collect();
    if forward.is_empty() {
        candidates.to_vec()
    } else {
        forward
    }
}

/// First option (in slice order) whose next cell is nearest to `target`.
pub(super) fn closest_direction(
    from: Position,
    options: &[Direction],
    target: Position,
) -> Option<Direction> {
    let mut best = None;
    let mut best_dist = i32::MAX;
    for dir in options {
        let dist = from.step(*dir).manhattan(target);
        if dist < best_dist {
            best_dist = dist;
            best = Some(*dir);
        }
    }
    best
}

/// First option (in slice order) whose next cell is farthest from `threat`.
pub(super) fn farthest_direction(
    from: Position,
    options: &[Direction],
    threat: Position,
) -> Option<Direction> {
    let mut best = None;
    let mut best_dist = i32::MIN;
    for dir in options {
        let dist = from.step(*dir).manhattan(threat);
        if dist > best_dist {
            best_dist = dist;
            best = Some(*dir);
        }
    }
    best
}
