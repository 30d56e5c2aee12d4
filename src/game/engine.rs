use super::{
    action::Direction,
    config::GameConfig,
    food::Food,
    state::{CollisionType, GameState, GameStatus, Snake},
    timer::TickTimer,
};
use crate::audio::SoundCue;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::time::Instant;
use tracing::{debug, info};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub reason: CollisionType,
    /// Score at the moment of the crash, before it was reset
    pub final_score: u32,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the tick interval was shortened
    pub sped_up: bool,
    /// Set when this tick ended the run
    pub game_over: Option<GameOver>,
}

impl StepInfo {
    /// Audio signals raised by this tick
    pub fn sound_cues(&self) -> impl Iterator<Item = SoundCue> {
        let eat = self.ate_food.then_some(SoundCue::Eat);
        let wall = self.game_over.map(|_| SoundCue::Wall);
        eat.into_iter().chain(wall)
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
    timer: TickTimer,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::new_with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn new_with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            timer: TickTimer::start_now(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn spawn_snake(&self) -> Snake {
        Snake::new(
            self.config.spawn_head,
            Direction::Right,
            self.config.initial_snake_length,
        )
    }

    /// Build the initial state and restart the tick countdown
    pub fn reset(&mut self) -> GameState {
        let snake = self.spawn_snake();
        let food = Food::spawn(&mut self.rng, self.config.cell_count, &snake);
        self.timer = TickTimer::start_now();

        GameState::new(snake, food, self.config.cell_count, self.config.base_interval)
    }

    /// Run [`update`](Self::update) if the tick interval has passed
    pub fn poll(&mut self, state: &mut GameState) -> Option<StepInfo> {
        self.timer
            .elapsed(state.update_interval)
            .then(|| self.update(state))
    }

    pub fn poll_at(&mut self, state: &mut GameState, now: Instant) -> Option<StepInfo> {
        if self.timer.elapsed_at(now, state.update_interval) {
            Some(self.update(state))
        } else {
            None
        }
    }

    /// Try to change the snake's heading.
    ///
    /// At most one change is accepted between two ticks, and never a
    /// reversal of the current heading. An accepted change also resumes a
    /// game that is over.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        if state.direction_locked || state.snake.direction.is_opposite(direction) {
            return false;
        }

        state.snake.direction = direction;
        state.direction_locked = true;
        if state.is_game_over() {
            info!(?direction, "restarting");
            state.status = GameStatus::Running;
        }
        true
    }

    /// Execute one tick of the game. Does nothing while the game is over.
    pub fn update(&mut self, state: &mut GameState) -> StepInfo {
        let mut info = StepInfo::default();
        if state.is_game_over() {
            return info;
        }

        let grow = std::mem::take(&mut state.pending_growth);
        state.snake.move_snake(grow);
        state.steps += 1;

        let head = state.snake.head();
        if head == state.food.position {
            self.eat_food(state, &mut info);
        }

        let collision = if !state.is_in_bounds(head) {
            Some(CollisionType::Wall)
        } else if state.snake.collides_with_body(head) {
            Some(CollisionType::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = collision {
            info.game_over = Some(self.game_over(state, reason));
        }

        state.direction_locked = false;
        info
    }

    fn eat_food(&mut self, state: &mut GameState, info: &mut StepInfo) {
        let next = state
            .food
            .reposition(&mut self.rng, state.cell_count, &state.snake);
        state.pending_growth = true;
        state.score += 1;
        info.ate_food = true;
        debug!(score = state.score, ?next, "food eaten");

        if state.score % self.config.speed_up_every == 0 {
            state.update_interval = f64::min(
                self.config.interval_cap,
                state.update_interval * self.config.speed_factor,
            );
            info.sped_up = true;
            debug!(interval = state.update_interval, "speed up");
        }
    }

    fn game_over(&mut self, state: &mut GameState, reason: CollisionType) -> GameOver {
        let over = GameOver {
            reason,
            final_score: state.score,
        };
        info!(?reason, score = state.score, steps = state.steps, "game over");

        state.snake.reset(
            self.config.spawn_head,
            Direction::Right,
            self.config.initial_snake_length,
        );
        state
            .food
            .reposition(&mut self.rng, state.cell_count, &state.snake);
        state.score = 0;
        state.steps = 0;
        state.update_interval = self.config.base_interval;
        state.pending_growth = false;
        state.status = GameStatus::GameOver;

        over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;
    use std::time::Duration;

    fn engine() -> GameEngine<StdRng> {
        GameEngine::new_with_rng(GameConfig::default(), StdRng::seed_from_u64(42))
    }

    fn canonical_body() -> VecDeque<Position> {
        VecDeque::from(vec![
            Position::new(6, 9),
            Position::new(5, 9),
            Position::new(4, 9),
        ])
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.update_interval, 0.2);
        assert_eq!(state.snake.body, canonical_body());
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(!state.snake.contains_position(state.food.position));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));

        let info = engine.update(&mut state);

        assert_eq!(info, StepInfo::default());
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), Position::new(7, 9));
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_growth_lands_on_next_move() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(7, 9));

        let info = engine.update(&mut state);
        assert!(info.ate_food);
        assert_eq!(state.score, 1);
        assert!(state.pending_growth);
        assert_eq!(state.snake.len(), 3);
        assert!(!state.snake.contains_position(state.food.position));

        state.food = Food::new(Position::new(0, 0));
        engine.update(&mut state);
        assert_eq!(state.snake.len(), 4);
        assert!(!state.pending_growth);
    }

    #[test]
    fn test_speed_up_every_five_points() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.score = 4;
        state.food = Food::new(Position::new(7, 9));

        let info = engine.update(&mut state);

        assert!(info.sped_up);
        assert_eq!(state.score, 5);
        assert!((state.update_interval - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_no_speed_up_between_thresholds() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.score = 5;
        state.food = Food::new(Position::new(7, 9));

        let info = engine.update(&mut state);

        assert!(!info.sped_up);
        assert_eq!(state.update_interval, 0.2);
    }

    #[test]
    fn test_wall_collision_resets() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.snake = Snake::new(Position::new(24, 9), Direction::Right, 3);
        state.score = 7;
        state.update_interval = 0.128;
        state.food = Food::new(Position::new(0, 0));

        let info = engine.update(&mut state);

        assert_eq!(
            info.game_over,
            Some(GameOver {
                reason: CollisionType::Wall,
                final_score: 7
            })
        );
        assert!(state.is_game_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.update_interval, 0.2);
        assert_eq!(state.snake.body, canonical_body());
        assert!(!state.snake.contains_position(state.food.position));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));
        state.snake.body = VecDeque::from(vec![
            Position::new(6, 9),
            Position::new(5, 9),
            Position::new(4, 9),
            Position::new(5, 9),
        ]);
        state.snake.direction = Direction::Left;

        let info = engine.update(&mut state);

        assert_eq!(
            info.game_over.map(|over| over.reason),
            Some(CollisionType::SelfCollision)
        );
        assert!(state.is_game_over());
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = engine.reset();

        assert!(!engine.steer(&mut state, Direction::Left));
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(!state.direction_locked);
    }

    #[test]
    fn test_one_direction_change_per_tick() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));

        assert!(engine.steer(&mut state, Direction::Up));
        assert!(!engine.steer(&mut state, Direction::Left));
        assert_eq!(state.snake.direction, Direction::Up);

        engine.update(&mut state);
        assert!(engine.steer(&mut state, Direction::Left));
    }

    #[test]
    fn test_steer_restarts_after_game_over() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.status = GameStatus::GameOver;

        // The reset snake faces right, so left is still a reversal
        assert!(!engine.steer(&mut state, Direction::Left));
        assert!(state.is_game_over());

        assert!(engine.steer(&mut state, Direction::Down));
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_game_over_blocks_updates() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.status = GameStatus::GameOver;
        let before = state.clone();

        let info = engine.update(&mut state);

        assert_eq!(info, StepInfo::default());
        assert_eq!(state, before);
    }

    #[test]
    fn test_poll_gates_on_interval() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));
        let later = Instant::now() + Duration::from_secs(1);

        assert!(engine.poll_at(&mut state, later).is_some());
        assert!(engine
            .poll_at(&mut state, later + Duration::from_millis(100))
            .is_none());
        assert!(engine
            .poll_at(&mut state, later + Duration::from_millis(250))
            .is_some());
        assert_eq!(state.steps, 2);
    }

    #[test]
    fn test_sound_cues() {
        let quiet = StepInfo::default();
        assert_eq!(quiet.sound_cues().count(), 0);

        let crash = StepInfo {
            ate_food: false,
            sped_up: false,
            game_over: Some(GameOver {
                reason: CollisionType::Wall,
                final_score: 3,
            }),
        };
        assert_eq!(crash.sound_cues().collect::<Vec<_>>(), vec![SoundCue::Wall]);

        let meal = StepInfo {
            ate_food: true,
            ..Default::default()
        };
        assert_eq!(meal.sound_cues().collect::<Vec<_>>(), vec![SoundCue::Eat]);
    }
}
