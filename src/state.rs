use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng};

use crate::config::GameConfig;
use crate::snake::{Direction, Position, Snake};

/// What changed on the grid during one step, for incremental redraws.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub new_head: Position,
    pub old_head: Position,
    /// The cell the snake left behind, or `None` if it grew this step.
    pub old_tail: Option<Position>,
    pub ate: bool,
}

/// One game of snake: the snake, the food and the grid it lives on.
pub struct GameState<R = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Position,
    rng: R,
}

impl<R: Rng> GameState<R> {
    /// Starts a game with a single segment in the middle of the grid, heading right.
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let snake = Snake::new(config.center(), Direction::Right);
        let food = random_cell(&config, &mut rng);
        info!("new {}x{} game (borderless: {}), food at {}", config.rows(), config.cols(), config.borderless(), food);
        GameState { config, snake, food, rng }
    }

    /// Requests a turn. Reversing onto the body is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    /// Advances the game by one tick. Collisions are not reported here, check
    /// `is_alive` afterwards.
    pub fn step(&mut self) -> MoveResult {
        let old_head = self.snake.head();
        let mut new_head = old_head.neighbour(self.snake.get_direction());
        if self.config.borderless() {
            new_head = self.config.wrap(new_head);
        }

        let tail = self.snake.advance(new_head);
        trace!("head {} -> {}", old_head, new_head);

        if new_head == self.food {
            self.snake.grow_back(tail);
            self.food = random_cell(&self.config, &mut self.rng);
            debug!("ate food at {}, length {}, next food at {}", new_head, self.snake.len(), self.food);
            return MoveResult { new_head, old_head, old_tail: None, ate: true };
        }

        MoveResult { new_head, old_head, old_tail: Some(tail), ate: false }
    }

    pub fn is_alive(&self) -> bool {
        self.config.contains(self.snake.head()) && !self.snake.bites_itself()
    }
}

impl<R> GameState<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// The score is the snake's length.
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    #[cfg(test)]
    pub fn with_snake(config: GameConfig, snake: Snake, food: Position, rng: R) -> Self {
        GameState { config, snake, food, rng }
    }

    #[cfg(test)]
    pub fn set_food(&mut self, food: Position) {
        self.food = food;
    }
}

/// Uniform over the whole grid, the snake's body included.
fn random_cell<R: Rng>(config: &GameConfig, rng: &mut R) -> Position {
    Position::new(rng.gen_range(0..config.rows()), rng.gen_range(0..config.cols()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::SeedableRng;

    fn config(rows: i32, cols: i32, borderless: bool) -> GameConfig {
        GameConfig::new(rows, cols, borderless).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn state_with(cfg: GameConfig, segments: &[Position], direction: Direction, food: Position) -> GameState {
        GameState::with_snake(cfg, Snake::from_segments(segments, direction), food, rng())
    }

    #[test]
    fn starts_centered_heading_right() {
        let state = GameState::new(config(5, 5, false), rng());
        assert_eq!(state.snake().head(), Position::new(2, 2));
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().get_direction(), Right);
        assert!(state.config().contains(state.food()));
        assert!(state.is_alive());
    }

    #[test]
    fn eating_food_grows_by_one() {
        let mut state = GameState::new(config(5, 5, false), rng());
        state.set_food(Position::new(2, 3));

        let res = state.step();

        assert_eq!(res, MoveResult {
            new_head: Position::new(2, 3),
            old_head: Position::new(2, 2),
            old_tail: None,
            ate: true,
        });
        assert_eq!(state.snake().head(), Position::new(2, 3));
        assert_eq!(state.score(), 2);
        assert!(state.config().contains(state.food()));
        assert!(state.is_alive());
    }

    #[test]
    fn length_grows_only_when_eating() {
        let mut state = GameState::new(config(6, 9, true), StdRng::seed_from_u64(1234));
        let turns = [Down, Right, Down, Left, Up, Right];

        for i in 0..300 {
            if i % 7 == 0 {
                state.set_direction(turns[(i / 7) % turns.len()]);
            }
            let len_before = state.score();
            let food_before = state.food();

            let res = state.step();
            let ate = res.new_head == food_before;

            assert_eq!(res.ate, ate);
            assert_eq!(state.score(), len_before + ate as usize);
            if !state.is_alive() {
                break;
            }
        }
    }

    #[test]
    fn moving_off_the_top_edge_kills_when_bordered() {
        let mut state = state_with(config(5, 5, false), &[Position::new(0, 2)], Up, Position::new(4, 4));

        let res = state.step();

        assert_eq!(res.new_head, Position::new(-1, 2));
        assert_eq!(state.snake().head(), Position::new(-1, 2));
        assert!(!state.is_alive());
    }

    #[test]
    fn every_edge_kills_when_bordered() {
        let cases = [
            (Position::new(0, 1), Up),
            (Position::new(3, 1), Down),
            (Position::new(1, 0), Left),
            (Position::new(1, 4), Right),
        ];
        for (head, direction) in cases {
            let mut state = state_with(config(4, 5, false), &[head], direction, Position::new(2, 2));
            state.step();
            assert!(!state.is_alive(), "{:?} from {}", direction, head);
        }
    }

    #[test]
    fn every_edge_wraps_when_borderless() {
        let cases = [
            (Position::new(0, 1), Up, Position::new(3, 1)),
            (Position::new(3, 1), Down, Position::new(0, 1)),
            (Position::new(1, 0), Left, Position::new(1, 4)),
            (Position::new(1, 4), Right, Position::new(1, 0)),
        ];
        for (head, direction, expected) in cases {
            let mut state = state_with(config(4, 5, true), &[head], direction, Position::new(2, 2));
            let res = state.step();
            assert_eq!(res.new_head, expected);
            assert!(state.is_alive(), "{:?} from {}", direction, head);
        }
    }

    #[test]
    fn steering_into_own_body_kills() {
        // Head at (2,2) with the body curling round below it
        let segments = [
            Position::new(2, 2),
            Position::new(2, 1),
            Position::new(3, 1),
            Position::new(3, 2),
            Position::new(3, 3),
        ];
        let mut state = state_with(config(6, 6, false), &segments, Right, Position::new(0, 0));

        state.set_direction(Down);
        state.step();

        assert_eq!(state.snake().head(), Position::new(3, 2));
        assert!(!state.is_alive());
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        // The tail moves out of the way on the same step
        let segments = [
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(2, 2),
            Position::new(2, 1),
        ];
        let mut state = state_with(config(4, 4, false), &segments, Left, Position::new(0, 3));

        state.set_direction(Down);
        let res = state.step();

        assert_eq!(res.new_head, Position::new(2, 1));
        assert_eq!(res.old_tail, Some(Position::new(2, 1)));
        assert!(state.is_alive());
    }

    #[test]
    fn reverse_request_is_ignored() {
        let mut state = GameState::new(config(5, 5, false), rng());
        state.set_direction(Left);
        assert_eq!(state.snake().get_direction(), Right);
        state.set_direction(Up);
        assert_eq!(state.snake().get_direction(), Up);
    }

    #[test]
    fn seeded_games_place_food_identically() {
        let a = GameState::new(config(20, 30, false), StdRng::seed_from_u64(99));
        let b = GameState::new(config(20, 30, false), StdRng::seed_from_u64(99));
        assert_eq!(a.food(), b.food());
    }
}
