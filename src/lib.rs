//! Raster Pong - a two-paddle ball game core driven by an external refresh tick
//!
//! Core modules:
//! - `sim`: Deterministic simulation (game phases, ball physics, collisions,
//!   paddle control, render membership flags)
//! - `settings`: Game mode presets and tuning parameters
//!
//! The crate implements only the game core. The periodic frame tick, button
//! debouncing, and the video compositor are external collaborators: the
//! embedder calls [`sim::tick`] once per display refresh with debounced
//! inputs, and samples [`sim::render`] flags to paint the frame.

pub mod settings;
pub mod sim;

pub use settings::{Config, GameMode, PaddleControl};
pub use sim::{GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Coordinate space width (pixels)
    pub const H_RES: u32 = 1920;
    /// Coordinate space height (pixels)
    pub const V_RES: u32 = 1080;

    /// Ball is a square of this size
    pub const BALL_SIZE: u32 = 16;

    /// Paddle dimensions
    pub const PADDLE_WIDTH: u32 = 20;
    pub const PADDLE_HEIGHT: u32 = 100;
    /// Horizontal distance from each screen edge to its paddle
    pub const PADDLE_OFFSET: u32 = 40;
    /// Paddle vertical step per frame
    pub const PADDLE_SPEED: u32 = 10;

    /// Ball speeds at serve
    pub const SERVE_X_SPEED: u32 = 10;
    pub const SERVE_Y_SPEED: u32 = 6;

    /// Horizontal speed after a paddle bounce, per rebound direction
    pub const BOUNCE_X_SPEED_RIGHT: u32 = 15;
    pub const BOUNCE_X_SPEED_LEFT: u32 = 16;

    /// Number of bounce zones a paddle is divided into
    pub const BOUNCE_ZONES: usize = 8;
    /// Vertical rebound speed per bounce zone, topmost zone first
    pub const ZONE_SPEEDS: [u32; BOUNCE_ZONES] = [15, 12, 6, 0, 0, 6, 12, 15];
}
