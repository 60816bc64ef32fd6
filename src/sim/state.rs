//! Game state and core simulation types
//!
//! Everything the frame loop owns lives here; there are no globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; `won` distinguishes a cleared wall from a lost last life
    GameOver { won: bool },
}

/// Something that happened during a tick. The sim never talks to audio or
/// logging directly; the frame loop drains these after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball rebounded off the paddle
    PaddleHit,
    /// A brick was destroyed
    BrickBroken,
    /// Ball bounced off a side or top wall
    WallBounce,
    /// Ball fell past the bottom edge
    BallLost,
    /// Run ended this tick
    GameOver { won: bool },
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal movement per tick
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                SCREEN_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                SCREEN_HEIGHT - PADDLE_BOTTOM_MARGIN,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    /// Shift sideways by one tick of movement. `dir` is -1.0 for left,
    /// +1.0 for right; the paddle never leaves the screen.
    pub fn slide(&mut self, dir: f32) {
        self.pos.x = (self.pos.x + dir * self.speed).clamp(0.0, SCREEN_WIDTH - self.width);
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A freshly served ball at the screen center
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            pos: screen_center(),
            vel: serve_velocity(rng),
            radius: BALL_RADIUS,
        }
    }

    /// Advance one tick and bounce off the side and top walls.
    /// Returns the number of wall bounces (a corner produces two).
    /// The bottom edge is not a wall; falling past it is the caller's
    /// out-of-bounds condition.
    pub fn advance(&mut self) -> u32 {
        self.pos += self.vel;

        let mut bounces = 0;
        if self.pos.x <= self.radius || self.pos.x >= SCREEN_WIDTH - self.radius {
            self.vel.x = -self.vel.x;
            bounces += 1;
        }
        if self.pos.y <= self.radius {
            self.vel.y = -self.vel.y;
            bounces += 1;
        }
        bounces
    }

    /// Re-center and serve again with a fresh horizontal speed
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.pos = screen_center();
        self.vel = serve_velocity(rng);
    }
}

fn screen_center() -> Vec2 {
    Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
}

/// Serve mechanic: uniform pick from the fixed horizontal speed set,
/// always rising
fn serve_velocity(rng: &mut Pcg32) -> Vec2 {
    let dx = SERVE_SPEEDS[rng.random_range(0..SERVE_SPEEDS.len())];
    Vec2::new(dx, SERVE_RISE)
}

/// Base colors of the brick wall, cycled across columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl BrickColor {
    /// Column-cycling order
    pub const CYCLE: [BrickColor; 5] = [
        BrickColor::Red,
        BrickColor::Blue,
        BrickColor::Green,
        BrickColor::Yellow,
        BrickColor::Purple,
    ];

    /// Base color in display range. The palette stays well under full
    /// brightness so the bevel highlights have headroom.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BrickColor::Red => [180, 30, 30],
            BrickColor::Blue => [30, 60, 180],
            BrickColor::Green => [30, 180, 30],
            BrickColor::Yellow => [180, 180, 30],
            BrickColor::Purple => [180, 30, 180],
        }
    }
}

/// A brick. Destroyed bricks stay in the collection with `visible` unset
/// and neither collide nor draw.
#[derive(Debug, Clone)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: BrickColor,
    pub visible: bool,
}

/// Build the fixed wall: BRICK_ROWS rows of BRICK_COLS columns spanning
/// the screen width, colors cycling by column.
pub fn standard_wall() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity((BRICK_ROWS * BRICK_COLS) as usize);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLS {
            bricks.push(Brick {
                pos: Vec2::new(
                    col as f32 * BRICK_WIDTH,
                    row as f32 * BRICK_HEIGHT + BRICK_TOP_OFFSET,
                ),
                width: BRICK_WIDTH,
                height: BRICK_HEIGHT,
                color: BrickColor::CYCLE[(col % 5) as usize],
                visible: true,
            });
        }
    }
    bricks
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    /// Events raised by the most recent tick, drained by the frame loop
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&mut rng);
        Self {
            seed,
            score: 0,
            lives: START_LIVES,
            phase: GamePhase::Playing,
            time_ticks: 0,
            paddle: Paddle::default(),
            ball,
            bricks: standard_wall(),
            events: Vec::new(),
            rng,
        }
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn all_bricks_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.visible)
    }

    /// Re-center the ball and serve again (life loss keeps the ball entity)
    pub fn reset_ball(&mut self) {
        self.ball.reset(&mut self.rng);
    }

    /// Move to the terminal phase. Whether the run counts as won is read
    /// off the wall itself, so a last brick and a last life falling in the
    /// same tick still ends as a win.
    pub fn end_run(&mut self) {
        let won = self.all_bricks_cleared();
        self.phase = GamePhase::GameOver { won };
        self.events.push(GameEvent::GameOver { won });
    }

    /// Fresh run: score, lives, wall, paddle, and ball all re-initialized.
    /// The RNG stream continues, so a session stays reproducible from the
    /// startup seed.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.phase = GamePhase::Playing;
        self.paddle = Paddle::default();
        self.ball.reset(&mut self.rng);
        for brick in &mut self.bricks {
            brick.visible = true;
        }
    }
}
