use super::*;

use crate::types::Position;

use super::utils::random_heading;

impl<M: MazeModel> GameEngine<M> {
    /// One hunter per start cell; behavior variants cycle through the roster.
    pub(super) fn spawn_hunters(&mut self, starts: &[Position]) {
        self.hunters.clear();
        for (id, start) in starts.iter().copied().enumerate() {
            let heading = random_heading(&mut self.rng);
            let variant = self.config.variant_for(id);
            self.hunters.push(Hunter::new(
                id,
                start,
                variant,
                self.maze_dims,
                heading,
                &self.config,
            ));
        }
        debug!(count = self.hunters.len(), "hunters spawned");
    }

    /// Puts every entity back on its start cell with fresh timers. Used after
    /// a catch, on level advance and on restart.
    pub(super) fn reset_entities(&mut self) {
        self.seeker.reset();
        for hunter in &mut self.hunters {
            let heading = random_heading(&mut self.rng);
            hunter.reset(self.maze_dims, heading, &self.config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BehaviorVariant, HunterMode};

    const FOUR_PENS: &str = "\
#########
#G.....G#
#...P...#
#G.....G#
#G.....G#
#########
";

    fn engine() -> GameEngine {
        let maze = Maze::parse(FOUR_PENS).expect("layout");
        GameEngine::new(maze, GameConfig::default(), 11).expect("engine")
    }

    #[test]
    fn variants_and_corners_follow_hunter_index() {
        let engine = engine();
        let variants: Vec<BehaviorVariant> =
            engine.hunters.iter().map(|hunter| hunter.variant).collect();
        assert_eq!(
            variants,
            vec![
                BehaviorVariant::Aggressive,
                BehaviorVariant::Ambush,
                BehaviorVariant::Patrol,
                BehaviorVariant::Random,
                BehaviorVariant::Aggressive,
                BehaviorVariant::Ambush,
            ]
        );
        assert_eq!(engine.hunters[0].home_corner, Position::new(1, 1));
        assert_eq!(engine.hunters[1].home_corner, Position::new(7, 1));
        assert_eq!(engine.hunters[2].home_corner, Position::new(1, 4));
        assert_eq!(engine.hunters[3].home_corner, Position::new(7, 4));
        assert_eq!(engine.hunters[4].home_corner, Position::new(1, 1));
    }

    #[test]
    fn reset_restores_start_cells_and_scatter() {
        let mut engine = engine();
        for hunter in &mut engine.hunters {
            hunter.position = Position::new(4, 3);
            hunter.mode = HunterMode::Chase;
            hunter.phase_elapsed_ms = 1_234;
        }
        engine.seeker.position = Position::new(2, 2);
        engine.reset_entities();

        assert_eq!(engine.seeker.position, Position::new(4, 2));
        for hunter in &engine.hunters {
            assert_eq!(hunter.position, hunter.start);
            assert_eq!(hunter.mode, HunterMode::Scatter);
            assert_eq!(hunter.phase_elapsed_ms, 0);
        }
    }
}
