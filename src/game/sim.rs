use super::{
    config::GameConfig,
    state::{CollisionType, GameState, Position},
};
use rand::Rng;

/// Lowest allowed tick interval; the speed ramp stops here
pub const SPEED_FLOOR_MS: u64 = 25;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Terminal collision, if one occurred (the state has been reset)
    pub collision: Option<CollisionType>,
    /// Score after the tick; the pre-reset score when terminal
    pub score: u32,
}

/// Advances a [`GameState`] by one tick: movement, food, collisions,
/// speed ramp. All game logic lives here, free of any I/O.
pub struct Simulator {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl Simulator {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the start-of-session state with freshly placed food
    pub fn initial_state(&mut self) -> GameState {
        let food = self.spawn_food();
        GameState::new(self.config.grid_size, self.config.initial_delay_ms, food)
    }

    /// Execute one simulation step.
    ///
    /// The head advances one cell in the current direction. Landing on the
    /// food grows the snake, respawns the food, and steps the speed up;
    /// otherwise the tail is dropped. Leaving the grid or biting the body
    /// is terminal: the state is reset in place and the outcome reports the
    /// collision along with the score the run ended at.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        let new_head = state.head().moved_in_direction(state.direction);
        state.body.insert(0, new_head);

        let ate_food = new_head == state.food;
        if ate_food {
            state.food = self.spawn_food();
            state.speed_delay = next_delay(state.speed_delay);
        } else {
            state.body.pop();
        }

        if let Some(kind) = self.check_collision(state) {
            let final_score = state.score();
            let food = self.spawn_food();
            state.reset(self.config.initial_delay_ms, food);

            return TickOutcome {
                ate_food: false,
                collision: Some(kind),
                score: final_score,
            };
        }

        TickOutcome {
            ate_food,
            collision: None,
            score: state.score(),
        }
    }

    /// Check the head after a move. The playable band is 0..=grid on each
    /// axis while food spawns in 1..=grid; both ranges are part of the
    /// classic rules this game keeps.
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.head();
        let max = self.config.grid_size as i32;

        if head.x <= -1 || head.x >= max + 1 || head.y <= -1 || head.y >= max + 1 {
            return Some(CollisionType::Wall);
        }

        if state.body_segments().contains(&head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Place food uniformly at random, each coordinate in 1..=grid.
    /// Occupied cells are not excluded; food under the body is eaten the
    /// moment the head passes over it.
    pub fn spawn_food(&mut self) -> Position {
        let max = self.config.grid_size as i32;
        let x = self.rng.gen_range(1..=max);
        let y = self.rng.gen_range(1..=max);
        Position::new(x, y)
    }
}

/// Speed step table, keyed on the delay before the decrement
fn next_delay(current: u64) -> u64 {
    if current > 150 {
        current - 5
    } else if current > 100 {
        current - 3
    } else if current > 50 {
        current - 2
    } else if current > SPEED_FLOOR_MS {
        current - 1
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn state_with(body: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState {
            body,
            food,
            direction,
            speed_delay: 200,
            running: true,
            grid_size: 20,
        }
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut sim = Simulator::new(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(15, 15),
        );

        let outcome = sim.tick(&mut state);

        assert!(!outcome.ate_food);
        assert_eq!(outcome.collision, None);
        assert_eq!(state.body, vec![Position::new(6, 5), Position::new(5, 5)]);
        assert_eq!(outcome.score, 1);
    }

    #[test]
    fn test_eat_grows_by_one_and_steps_speed() {
        // Snake [(10,10)] heading down onto food at (10,11)
        let mut sim = Simulator::new(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(10, 10)],
            Direction::Down,
            Position::new(10, 11),
        );

        let outcome = sim.tick(&mut state);

        assert!(outcome.ate_food);
        assert_eq!(outcome.collision, None);
        assert_eq!(state.body.len(), 2);
        assert_eq!(state.head(), Position::new(10, 11));
        assert_eq!(state.speed_delay, 195);
        assert_eq!(outcome.score, 1);
        // Fresh food was placed within the spawn range
        assert!((1..=20).contains(&state.food.x));
        assert!((1..=20).contains(&state.food.y));
    }

    #[test]
    fn test_wall_collision_resets() {
        // Snake [(0,10),(1,10)] heading left walks off at x=-1
        let mut sim = Simulator::new(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(0, 10), Position::new(1, 10)],
            Direction::Left,
            Position::new(15, 15),
        );

        let outcome = sim.tick(&mut state);

        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(outcome.score, 1);
        assert_eq!(state.body, vec![Position::new(10, 10)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.speed_delay, 200);
        assert!(!state.running);
    }

    #[test]
    fn test_all_four_walls_are_terminal() {
        let mut sim = Simulator::new(GameConfig::default());
        let cases = [
            (Position::new(0, 10), Direction::Left),
            (Position::new(20, 10), Direction::Right),
            (Position::new(10, 0), Direction::Up),
            (Position::new(10, 20), Direction::Down),
        ];

        for (start, direction) in cases {
            let mut state = state_with(vec![start], direction, Position::new(15, 15));
            let outcome = sim.tick(&mut state);
            assert_eq!(outcome.collision, Some(CollisionType::Wall));
        }
    }

    #[test]
    fn test_grid_edge_is_still_in_bounds() {
        // x = grid is playable; only x = grid + 1 is out
        let mut sim = Simulator::new(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(19, 10)],
            Direction::Right,
            Position::new(15, 15),
        );

        let outcome = sim.tick(&mut state);

        assert_eq!(outcome.collision, None);
        assert_eq!(state.head(), Position::new(20, 10));
    }

    #[test]
    fn test_self_collision_resets() {
        // Head at (5,5) turning up into the body segment at (5,4)
        let mut sim = Simulator::new(GameConfig::default());
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(5, 4),
                Position::new(6, 4),
                Position::new(6, 5),
                Position::new(6, 6),
            ],
            Direction::Up,
            Position::new(15, 15),
        );

        let outcome = sim.tick(&mut state);

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert_eq!(outcome.score, 4);
        assert_eq!(state.body, vec![Position::new(10, 10)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.speed_delay, 200);
    }

    #[test]
    fn test_reversal_is_not_blocked() {
        // A length-2 snake reversing bites its own neck immediately
        let mut sim = Simulator::new(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Left,
            Position::new(15, 15),
        );

        let outcome = sim.tick(&mut state);

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_moving_into_vacated_tail_cell_is_safe() {
        // The tail pops before the collision check, so its old cell is free
        let mut sim = Simulator::new(GameConfig::default());
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
            ],
            Direction::Down,
            Position::new(15, 15),
        );

        let outcome = sim.tick(&mut state);

        assert_eq!(outcome.collision, None);
        assert_eq!(state.head(), Position::new(5, 6));
        assert_eq!(state.body.len(), 4);
    }

    #[test]
    fn test_speed_table_steps() {
        assert_eq!(next_delay(200), 195);
        assert_eq!(next_delay(155), 150);
        assert_eq!(next_delay(150), 147);
        assert_eq!(next_delay(103), 100);
        assert_eq!(next_delay(100), 98);
        assert_eq!(next_delay(52), 50);
        assert_eq!(next_delay(50), 49);
        assert_eq!(next_delay(26), 25);
        assert_eq!(next_delay(25), 25);
    }

    #[test]
    fn test_speed_never_drops_below_floor() {
        let mut delay = 200;
        for _ in 0..500 {
            delay = next_delay(delay);
            assert!(delay >= SPEED_FLOOR_MS);
        }
        assert_eq!(delay, SPEED_FLOOR_MS);
    }

    #[test]
    fn test_food_spawns_within_range() {
        let mut sim = Simulator::new(GameConfig::small());
        for _ in 0..1000 {
            let food = sim.spawn_food();
            assert!((1..=10).contains(&food.x));
            assert!((1..=10).contains(&food.y));
        }
    }

    #[test]
    fn test_initial_state() {
        let mut sim = Simulator::new(GameConfig::default());
        let state = sim.initial_state();

        assert_eq!(state.body, vec![Position::new(10, 10)]);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.speed_delay, 200);
        assert!(!state.running);
        assert!((1..=20).contains(&state.food.x));
        assert!((1..=20).contains(&state.food.y));
    }
}
