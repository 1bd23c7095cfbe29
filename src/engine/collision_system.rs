use super::*;

use crate::types::HunterMode;

impl<M: MazeModel> GameEngine<M> {
    /// Runs after every entity has stepped. Only shared cells count; a seeker
    /// and hunter swapping cells in the same tick pass each other.
    pub(super) fn resolve_collisions(&mut self) {
        let at = self.seeker.position;
        for idx in 0..self.hunters.len() {
            if self.hunters[idx].position != at {
                continue;
            }
            match self.hunters[idx].mode {
                HunterMode::Eaten => {}
                HunterMode::Frightened => self.capture_hunter(idx),
                HunterMode::Scatter | HunterMode::Chase => {
                    self.seeker_caught(idx);
                    return;
                }
            }
        }
    }

    fn capture_hunter(&mut self, idx: usize) {
        if !self.hunters[idx].mark_eaten(&self.config) {
            return;
        }
        let points = self.config.scores.hunter_capture;
        let hunter = &self.hunters[idx];
        self.score = self.score.saturating_add(points);
        self.stats.hunters_captured += 1;
        self.events.push(GameEvent::HunterCaptured {
            hunter_id: hunter.id,
            position: hunter.position,
            points,
        });
        info!(hunter = hunter.id, score = self.score, "hunter captured");
    }

    fn seeker_caught(&mut self, idx: usize) {
        let hunter_id = self.hunters[idx].id;
        self.lives = self.lives.saturating_sub(1);
        self.stats.catches += 1;
        self.events.push(GameEvent::SeekerCaught {
            hunter_id,
            lives_left: self.lives,
        });
        info!(hunter = hunter_id, lives = self.lives, "seeker caught");

        if self.lives == 0 {
            self.events.push(GameEvent::LivesExhausted { score: self.score });
            self.phase = GamePhase::GameOver;
            info!(score = self.score, level = self.level, "lives exhausted");
            return;
        }

        self.reset_entities();
        self.phase = if self.config.respawn_grace_ms > 0 {
            GamePhase::Respawning {
                remaining_ms: self.config.respawn_grace_ms,
            }
        } else {
            GamePhase::Playing
        };
    }
}
