use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    food::Food,
    grid::Board,
    snake::Snake,
    state::{CollisionType, GameStatus, TickOutcome},
};

/// The game: snake, food, score and the Playing/GameOver state machine
pub struct Game {
    config: GameConfig,
    board: Board,
    snake: Snake,
    food: Food,
    score: u32,
    steps: u32,
    status: GameStatus,
    last_collision: Option<CollisionType>,
    pending_direction: Option<Direction>,
    rng: StdRng,
}

impl Game {
    /// Create a game with the given configuration. Food placement is
    /// reproducible when the config carries a seed.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let board = config.board();
        let snake = Self::initial_snake(&config);
        let food = if config.food_avoids_snake {
            Food::avoiding(&board, &snake, &mut rng)
        } else {
            Food::new(&board, &mut rng)
        };

        Self {
            config,
            board,
            snake,
            food,
            score: 0,
            steps: 0,
            status: GameStatus::Playing,
            last_collision: None,
            pending_direction: None,
            rng,
        }
    }

    fn initial_snake(config: &GameConfig) -> Snake {
        Snake::new(
            config.start_cell(),
            config.initial_heading,
            config.initial_length,
        )
    }

    fn place_food(&mut self) {
        if self.config.food_avoids_snake {
            self.food
                .respawn_avoiding(&self.board, &self.snake, &mut self.rng);
        } else {
            self.food.respawn(&self.board, &mut self.rng);
        }
    }

    /// Reset snake, food and score and resume playing
    pub fn restart(&mut self) {
        self.snake = Self::initial_snake(&self.config);
        self.place_food();
        self.score = 0;
        self.steps = 0;
        self.status = GameStatus::Playing;
        self.last_collision = None;
        self.pending_direction = None;
        info!(food = ?self.food.position(), "round started");
    }

    /// Buffer a heading change for the next tick. The most recent request
    /// wins. Ignored once the game is over.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.status.is_playing() {
            return TickOutcome::default();
        }

        if let Some(direction) = self.pending_direction.take() {
            if !self.snake.set_direction(direction) {
                debug!(?direction, heading = ?self.snake.heading(), "reverse turn ignored");
            }
        }

        let vacated = self.snake.advance();
        self.steps += 1;

        // Collision is judged on the plain move, before any growth, so a head
        // following its own tail into food stays alive.
        let collision = self.snake.collision(&self.board);

        let ate_food = self.snake.head() == self.food.position();
        if ate_food {
            // The new segment appears in the tick the food is eaten
            match vacated {
                Some(tail) => self.snake.extend_tail(tail),
                None => self.snake.grow(),
            }
            self.score = self.score.saturating_add(self.config.points_per_food);
            self.place_food();
            debug!(
                score = self.score,
                length = self.snake.len(),
                food = ?self.food.position(),
                "food eaten"
            );
        }

        if let Some(kind) = collision {
            self.status = GameStatus::GameOver;
            self.last_collision = Some(kind);
            self.pending_direction = None;
            info!(?kind, score = self.score, steps = self.steps, "game over");
        }

        TickOutcome {
            ate_food,
            collision,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn last_collision(&self) -> Option<CollisionType> {
        self.last_collision
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Food) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}
