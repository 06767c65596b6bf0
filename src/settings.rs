//! Game modes and tuning parameters
//!
//! Two presets ship: the scored rally (point play with serve resets and
//! bounce-angle mapping) and the continuous demo (perpetual reflection at
//! both screen edges, no scoring). Everything the simulation tunes lives in
//! [`Config`] so the two modes share a single logic path.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which game variant the state machine runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Reaching a side boundary ends the point; play resumes on the control
    /// button through a serve-setup window
    #[default]
    ScoredRally,
    /// Both boundaries reflect; the control button only pauses and resumes
    ContinuousDemo,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::ScoredRally => "scored",
            GameMode::ContinuousDemo => "demo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scored" | "rally" => Some(GameMode::ScoredRally),
            "demo" | "continuous" => Some(GameMode::ContinuousDemo),
            _ => None,
        }
    }
}

/// How a paddle is driven each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleControl {
    /// Debounced up/down button levels
    #[default]
    Human,
    /// Deadband tracking of the ball's vertical center
    Autonomous,
}

/// Simulation tuning parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub mode: GameMode,
    /// Control source per paddle, left then right
    pub controls: [PaddleControl; 2],

    // === Coordinate space ===
    pub h_res: u32,
    pub v_res: u32,

    // === Object extents ===
    pub ball_size: u32,
    pub paddle_width: u32,
    pub paddle_height: u32,
    /// Horizontal distance from a screen edge to its paddle
    pub paddle_offset: u32,

    // === Speeds ===
    pub paddle_speed: u32,
    pub serve_x_speed: u32,
    pub serve_y_speed: u32,
    /// Horizontal speed after a paddle bounce sending the ball rightward
    pub bounce_x_right: u32,
    /// Horizontal speed after a paddle bounce sending the ball leftward
    pub bounce_x_left: u32,
    /// Vertical rebound speed per bounce zone, topmost zone first
    pub zone_speeds: [u32; BOUNCE_ZONES],
}

impl Default for Config {
    fn default() -> Self {
        Self::scored_rally()
    }
}

impl Config {
    /// Point play: human on the left, autonomous opponent on the right
    pub fn scored_rally() -> Self {
        Self {
            mode: GameMode::ScoredRally,
            controls: [PaddleControl::Human, PaddleControl::Autonomous],
            h_res: H_RES,
            v_res: V_RES,
            ball_size: BALL_SIZE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_offset: PADDLE_OFFSET,
            paddle_speed: PADDLE_SPEED,
            serve_x_speed: SERVE_X_SPEED,
            serve_y_speed: SERVE_Y_SPEED,
            bounce_x_right: BOUNCE_X_SPEED_RIGHT,
            bounce_x_left: BOUNCE_X_SPEED_LEFT,
            zone_speeds: ZONE_SPEEDS,
        }
    }

    /// Attract-mode demo: two autonomous paddles playing indefinitely
    pub fn continuous_demo() -> Self {
        Self {
            mode: GameMode::ContinuousDemo,
            controls: [PaddleControl::Autonomous, PaddleControl::Autonomous],
            ..Self::scored_rally()
        }
    }

    /// Left edge of the left paddle
    pub fn left_paddle_x(&self) -> u32 {
        self.paddle_offset
    }

    /// Left edge of the right paddle
    pub fn right_paddle_x(&self) -> u32 {
        self.h_res - self.paddle_offset - self.paddle_width
    }

    /// Vertical position centering an object of `size` on screen
    pub fn centered_y(&self, size: u32) -> u32 {
        (self.v_res - size) / 2
    }

    /// Horizontal position centering an object of `size` on screen
    pub fn centered_x(&self, size: u32) -> u32 {
        (self.h_res - size) / 2
    }
}
