//! One tick of the simulation.

use crate::collision::{self, Collision};
use crate::episode::Episode;
use crate::error::{Error, Result};
use crate::layout::{self, RandomSource};
use crate::{Status, Turn};

use tracing::{debug, info, trace};

/// What a tick did.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Moved,
    Ate,
    Collided(Collision),
    /// Ran out of ticks for the current length.
    Stagnated,
}

/// What the controller gets back from a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    pub reward: i32,
    pub done: bool,
    pub outcome: Outcome,
}

impl Episode {
    /// Advances the episode by one tick.
    ///
    /// The snake turns, its new head is pushed on, and then exactly one of
    /// three things happens: it dies (wall, obstacle, itself, or the tick
    /// budget of `stagnation_factor` per segment is spent), it eats and keeps
    /// the extra segment, or it drops its tail.
    ///
    /// Stepping a terminated episode is an error. If food has nowhere left to
    /// go the episode terminates and the error is returned.
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        turn: Turn,
    ) -> Result<Step> {
        if let Status::Terminated = self.status {
            return Err(Error::Terminated);
        }

        let heading = self.snake.steer(turn);

        let hit = match self.snake.next_head(self.board.cell_size) {
            Some(new_head) => {
                self.snake.grow(new_head);
                collision::collision(new_head, &self.board, self.snake.body())
            }
            None => Some(Collision::Wall),
        };

        self.ticks += 1;

        trace!(?turn, ?heading, head = %self.snake.head(), tick = self.ticks, "tick");

        let budget = u64::from(self.config.rewards.stagnation_factor) * self.snake.len() as u64;

        if let Some(hit) = hit {
            return Ok(self.terminate(Outcome::Collided(hit)));
        }

        if u64::from(self.ticks) > budget {
            return Ok(self.terminate(Outcome::Stagnated));
        }

        if self.snake.head() == self.board.food {
            self.score += 1;

            match layout::place_food(&self.config, rng, &self.snake, &self.board.obstacles) {
                Ok(food) => self.board.food = food,
                Err(err) => {
                    self.status = Status::Terminated;
                    info!(score = self.score, ticks = self.ticks, "board full, episode over");
                    return Err(err);
                }
            }

            debug!(score = self.score, len = self.snake.len(), food = %self.board.food, "ate");

            Ok(Step {
                reward: self.config.rewards.food,
                done: false,
                outcome: Outcome::Ate,
            })
        } else {
            self.snake.shrink();

            Ok(Step {
                reward: 0,
                done: false,
                outcome: Outcome::Moved,
            })
        }
    }

    fn terminate(&mut self, outcome: Outcome) -> Step {
        self.status = Status::Terminated;

        info!(?outcome, score = self.score, ticks = self.ticks, "episode terminated");

        Step {
            reward: self.config.rewards.death,
            done: true,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::grid::Cell;
    use crate::snake::Snake;
    use crate::Direction;

    use rand::{rngs::StdRng, SeedableRng};

    use std::collections::HashSet;

    fn open_board(seed: u64) -> (Episode, StdRng) {
        let config = Config::new(640, 480, 0);
        let mut rng = StdRng::seed_from_u64(seed);
        let episode = Episode::new(&config, &mut rng).unwrap();

        (episode, rng)
    }

    #[test]
    fn straight_moves_one_cell() {
        let (mut episode, mut rng) = open_board(5);
        episode.board.food = Cell::new(0, 0);

        let step = episode.step(&mut rng, Turn::Straight).unwrap();

        assert_eq!(step, Step { reward: 0, done: false, outcome: Outcome::Moved });
        assert_eq!(episode.snake.head(), Cell::new(340, 240));
        assert_eq!(episode.snake.len(), 1);
        assert_eq!(episode.ticks, 1);
    }

    #[test]
    fn right_wall_kills() {
        let (mut episode, mut rng) = open_board(5);
        episode.snake = Snake::new(Cell::new(620, 240), Direction::Right);
        episode.board.food = Cell::new(0, 0);

        let step = episode.step(&mut rng, Turn::Straight).unwrap();

        assert_eq!(step.reward, -10);
        assert!(step.done);
        assert_eq!(step.outcome, Outcome::Collided(Collision::Wall));
        assert_eq!(episode.status, Status::Terminated);
    }

    #[test]
    fn terminated_episode_rejects_ticks() {
        let (mut episode, mut rng) = open_board(5);
        episode.status = Status::Terminated;
        let before = episode.clone();

        assert_eq!(episode.step(&mut rng, Turn::Straight), Err(Error::Terminated));
        assert_eq!(episode, before);
    }

    #[test]
    fn eating_grows_and_scores() {
        let (mut episode, mut rng) = open_board(5);
        episode.board.food = Cell::new(340, 240);

        let step = episode.step(&mut rng, Turn::Straight).unwrap();

        assert_eq!(step, Step { reward: 100, done: false, outcome: Outcome::Ate });
        assert_eq!(episode.score, 1);
        assert_eq!(episode.snake.len(), 2);
        assert_eq!(episode.snake.head(), Cell::new(340, 240));
        assert_eq!(episode.snake.tail(), Cell::new(320, 240));
        assert!(!episode.snake.contains(episode.board.food));
    }

    #[test]
    fn obstacle_kills() {
        let (mut episode, mut rng) = open_board(5);
        episode.board.obstacles.insert(Cell::new(320, 260));
        episode.board.food = Cell::new(0, 0);

        let step = episode.step(&mut rng, Turn::Clockwise).unwrap();

        assert_eq!(step.outcome, Outcome::Collided(Collision::Obstacle));
        assert!(step.done);
    }

    #[test]
    fn biting_own_body_kills() {
        let (mut episode, mut rng) = open_board(5);
        // Heading right; turning down runs into the body's lower row.
        episode.snake = Snake::from_cells(
            &[
                Cell::new(100, 100),
                Cell::new(80, 100),
                Cell::new(80, 120),
                Cell::new(100, 120),
                Cell::new(120, 120),
            ],
            Direction::Right,
        );
        episode.board.food = Cell::new(0, 0);

        let step = episode.step(&mut rng, Turn::Clockwise).unwrap();

        assert_eq!(step.outcome, Outcome::Collided(Collision::Body));
        assert_eq!(step.reward, -10);
    }

    #[test]
    fn chasing_the_tail_is_fatal() {
        // The tail hasn't moved yet when the new head is checked.
        let (mut episode, mut rng) = open_board(5);
        episode.snake = Snake::from_cells(
            &[
                Cell::new(100, 100),
                Cell::new(100, 120),
                Cell::new(120, 120),
                Cell::new(120, 100),
            ],
            Direction::Up,
        );
        episode.board.food = Cell::new(0, 0);

        let step = episode.step(&mut rng, Turn::Clockwise).unwrap();

        assert_eq!(step.outcome, Outcome::Collided(Collision::Body));
    }

    #[test]
    fn stagnation_cuts_off_idle_episodes() {
        let (mut episode, mut rng) = open_board(5);
        episode.board.food = Cell::new(0, 0);

        // A lone head circling a 2x2 square never hits anything. With the
        // head pushed on the body is 2 long, so the budget is 200 ticks.
        for tick in 1..=200 {
            let step = episode.step(&mut rng, Turn::Clockwise).unwrap();
            assert!(!step.done, "died early at tick {}", tick);
        }

        let step = episode.step(&mut rng, Turn::Clockwise).unwrap();

        assert_eq!(step, Step { reward: -10, done: true, outcome: Outcome::Stagnated });
        assert_eq!(episode.ticks, 201);
    }

    #[test]
    fn rewards_come_from_config() {
        let (mut episode, mut rng) = open_board(5);
        episode.config.rewards.food = 7;
        episode.config.rewards.death = -3;
        episode.board.food = Cell::new(340, 240);

        assert_eq!(episode.step(&mut rng, Turn::Straight).unwrap().reward, 7);

        episode.snake = Snake::new(Cell::new(0, 0), Direction::Up);
        assert_eq!(episode.step(&mut rng, Turn::Straight).unwrap().reward, -3);
    }

    #[test]
    fn full_board_terminates_with_error() {
        // 4 x 4 cells, snake fills all but the food cell.
        let config = Config::new(80, 80, 0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut episode = Episode::new(&config, &mut rng).unwrap();

        let mut cells = Vec::new();
        for row in 0..4 {
            let cols: Vec<i32> = if row % 2 == 0 { (0..4).collect() } else { (0..4).rev().collect() };
            for col in cols {
                cells.push(Cell::from_grid(col, row, 20));
            }
        }
        // Walk the zigzag backwards so the head sits right of the food.
        cells.reverse();
        let food = cells.remove(0);
        let head = cells[0];
        assert_eq!(head.stepped(Direction::Left, 20), Some(food));

        episode.snake = Snake::from_cells(&cells, Direction::Left);
        episode.board.food = food;

        assert_eq!(
            episode.step(&mut rng, Turn::Straight),
            Err(Error::NoFreeCell { width: 80, height: 80 })
        );
        assert_eq!(episode.status, Status::Terminated);
        assert_eq!(episode.step(&mut rng, Turn::Straight), Err(Error::Terminated));
    }

    #[test]
    fn relocated_food_stays_on_the_board() {
        // A board much smaller than the default, so food drawn from the
        // wrong geometry would land off it.
        let config = Config::new(80, 80, 0);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut episode = Episode::new(&config, &mut rng).unwrap();
            episode.board.food = Cell::new(60, 40);

            let step = episode.step(&mut rng, Turn::Straight).unwrap();

            assert_eq!(step.outcome, Outcome::Ate);
            assert!(episode.board.contains(episode.board.food));
            assert!(episode.board.food.is_aligned(config.cell_size));
            assert!(!episode.snake.contains(episode.board.food));
        }
    }

    #[test]
    fn random_play_keeps_invariants() {
        let config = Config::new(200, 200, 4);
        let turns = [Turn::Straight, Turn::Clockwise, Turn::CounterClockwise];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut episode = Episode::new(&config, &mut rng).unwrap();
            let mut i = seed as usize;

            while episode.is_running() {
                let len = episode.snake.len();
                let score = episode.score;
                i = (i * 7 + 3) % 11;

                let step = episode.step(&mut rng, turns[i % 3]).unwrap();
                if step.done {
                    break;
                }

                let unique: HashSet<_> = episode.snake.iter().collect();
                assert_eq!(unique.len(), episode.snake.len());

                match step.outcome {
                    Outcome::Ate => {
                        assert_eq!(episode.snake.len(), len + 1);
                        assert_eq!(episode.score, score + 1);
                        assert!(!episode.snake.contains(episode.board.food));
                        assert!(!episode.board.obstacles.contains(&episode.board.food));
                    }
                    _ => assert_eq!(episode.snake.len(), len),
                }
            }
        }
    }
}
