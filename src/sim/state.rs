//! Game state and core simulation types
//!
//! Everything that survives from one frame boundary to the next lives here.
//! All fields are fixed-size and integer-valued; a committed state is a
//! consistent snapshot for the whole following frame window.

use glam::UVec2;
use serde::{Deserialize, Serialize};

use super::collision::CollisionLatch;
use crate::settings::Config;

/// Direction along one axis. `Positive` increases the coordinate
/// (rightward on x, downward on y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDir {
    Positive,
    Negative,
}

impl AxisDir {
    pub fn flip(self) -> Self {
        match self {
            AxisDir::Positive => AxisDir::Negative,
            AxisDir::Negative => AxisDir::Positive,
        }
    }
}

/// Per-axis velocity as (direction, magnitude). The magnitude is re-derived
/// on a paddle bounce and otherwise constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisVel {
    pub dir: AxisDir,
    pub speed: u32,
}

impl AxisVel {
    pub fn new(dir: AxisDir, speed: u32) -> Self {
        Self { dir, speed }
    }
}

/// Screen side a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// The ball: a square of `config.ball_size` with per-axis velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: UVec2,
    pub vel_x: AxisVel,
    pub vel_y: AxisVel,
}

impl Ball {
    /// Bounding rectangle as (top-left, size)
    pub fn rect(&self, config: &Config) -> (UVec2, UVec2) {
        (self.pos, UVec2::splat(config.ball_size))
    }

    /// Vertical center, used for bounce-zone mapping and tracking
    pub fn center_y(&self, config: &Config) -> u32 {
        self.pos.y + config.ball_size / 2
    }
}

/// A paddle: fixed horizontal position, free to move vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top edge
    pub y: u32,
}

impl Paddle {
    /// Left edge of this paddle's fixed column
    pub fn x(side: Side, config: &Config) -> u32 {
        match side {
            Side::Left => config.left_paddle_x(),
            Side::Right => config.right_paddle_x(),
        }
    }

    /// Bounding rectangle as (top-left, size)
    pub fn rect(&self, side: Side, config: &Config) -> (UVec2, UVec2) {
        (
            UVec2::new(Self::x(side, config), self.y),
            UVec2::new(config.paddle_width, config.paddle_height),
        )
    }
}

/// Current phase of gameplay
///
/// The scored rally walks Init → Idle → Start → Play → PointEnd → Start.
/// The continuous demo only uses Idle ⇄ Play as a pause toggle. Invalid
/// phases are unrepresentable; a phase foreign to the configured mode
/// resolves to `Idle` in the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// One clean pass through reset logic before anything runs
    Init,
    /// Waiting to start; paddles centered, ball hidden
    #[default]
    Idle,
    /// Serve-setup window; the next control press begins play
    Start,
    /// Active simulation
    Play,
    /// Motion frozen after a scoring edge collision, awaiting acknowledgment
    PointEnd,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    pub phase: GamePhase,
    pub ball: Ball,
    /// Left then right
    pub paddles: [Paddle; 2],
    /// Collision flags written during the current frame window, consumed at
    /// the next boundary
    pub(crate) latch: CollisionLatch,
    /// Serve direction: toward whichever side did not win the last point
    pub(crate) serve_x: AxisDir,
    /// Stored vertical serve bit, toggled each serve for variety
    pub(crate) serve_y: AxisDir,
    /// Frame boundary counter
    pub frame: u64,
}

impl GameState {
    /// Power-on state for the given configuration
    pub fn new(config: Config) -> Self {
        let ball = Ball {
            pos: UVec2::new(
                config.centered_x(config.ball_size),
                config.centered_y(config.ball_size),
            ),
            vel_x: AxisVel::new(AxisDir::Positive, config.serve_x_speed),
            vel_y: AxisVel::new(AxisDir::Positive, config.serve_y_speed),
        };
        let paddle = Paddle {
            y: config.centered_y(config.paddle_height),
        };
        Self {
            config,
            phase: GamePhase::Init,
            ball,
            paddles: [paddle, paddle],
            latch: CollisionLatch::default(),
            serve_x: AxisDir::Positive,
            serve_y: AxisDir::Positive,
            frame: 0,
        }
    }

    /// Unconditionally reinitialize to power-on values. The level-sensitive
    /// reset input overrides any in-flight frame.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Serve setup on entering `Start`: recenter everything, send the ball
    /// toward the side that did not just score, and toggle the stored
    /// vertical direction bit.
    pub(crate) fn serve(&mut self) {
        self.serve_y = self.serve_y.flip();
        self.ball.pos = UVec2::new(
            self.config.centered_x(self.config.ball_size),
            self.config.centered_y(self.config.ball_size),
        );
        self.ball.vel_x = AxisVel::new(self.serve_x, self.config.serve_x_speed);
        self.ball.vel_y = AxisVel::new(self.serve_y, self.config.serve_y_speed);
        let centered = self.config.centered_y(self.config.paddle_height);
        for paddle in &mut self.paddles {
            paddle.y = centered;
        }
        self.latch = CollisionLatch::default();
    }

    /// Flags latched during the current frame window (inspection only; the
    /// tick consumes them)
    pub fn latched(&self) -> super::collision::CollisionFrame {
        self.latch.peek()
    }
}
