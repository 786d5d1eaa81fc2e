use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Type of terminal collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Complete mutable game state: snake body, food, direction, speed, running flag.
///
/// The snake body keeps its head at index 0. A new game starts with a
/// single-segment snake at the grid center, heading down; after a terminal
/// collision the state is restored to the same defaults except the
/// direction becomes right.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Body segments, head at index 0; length >= 1 always
    pub body: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    /// Tick interval in milliseconds; lower is faster
    pub speed_delay: u64,
    /// Whether the game is being ticked (false on the instruction screen)
    pub running: bool,
    pub grid_size: usize,
}

impl GameState {
    /// Create a fresh state at the start-of-session defaults
    pub fn new(grid_size: usize, initial_delay: u64, food: Position) -> Self {
        Self {
            body: vec![Self::spawn_position(grid_size)],
            food,
            direction: Direction::Down,
            speed_delay: initial_delay,
            running: false,
            grid_size,
        }
    }

    /// Where the snake starts: the grid center
    pub fn spawn_position(grid_size: usize) -> Position {
        let mid = (grid_size / 2) as i32;
        Position::new(mid, mid)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Current score: one point per eaten food
    pub fn score(&self) -> u32 {
        (self.body.len() - 1) as u32
    }

    /// Restore the post-collision defaults. The direction resets to right
    /// (not the initial down) and the game stops until restarted.
    pub fn reset(&mut self, initial_delay: u64, food: Position) {
        self.body = vec![Self::spawn_position(self.grid_size)];
        self.food = food;
        self.direction = Direction::Right;
        self.speed_delay = initial_delay;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(20, 200, Position::new(3, 7));
        assert_eq!(state.body, vec![Position::new(10, 10)]);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.speed_delay, 200);
        assert!(!state.running);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_reset_restores_defaults_with_right_direction() {
        let mut state = GameState::new(20, 200, Position::new(3, 7));
        state.body = vec![
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(3, 1),
        ];
        state.direction = Direction::Up;
        state.speed_delay = 120;
        state.running = true;

        state.reset(200, Position::new(8, 8));

        assert_eq!(state.body, vec![Position::new(10, 10)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.speed_delay, 200);
        assert!(!state.running);
        assert_eq!(state.food, Position::new(8, 8));
    }

    #[test]
    fn test_score_is_length_minus_one() {
        let mut state = GameState::new(20, 200, Position::new(3, 7));
        assert_eq!(state.score(), 0);
        state.body.push(Position::new(10, 9));
        state.body.push(Position::new(10, 8));
        assert_eq!(state.score(), 2);
    }
}
