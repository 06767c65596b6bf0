//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per external frame boundary, no wall-clock time
//! - Integer positions and speeds only
//! - No allocation after construction
//! - No rendering or platform dependencies
//!
//! Between two boundaries the committed state is immutable; the collision
//! detector samples it into a latch that the next boundary consumes. Each
//! piece of state has a single writer: the transition function owns the
//! phase, the tick owns positions, the latch owns flags.

pub mod collision;
pub mod render;
pub mod state;
pub mod tick;

pub use collision::{CollisionFrame, CollisionLatch, bounce_zone, rects_overlap, zone_rebound};
pub use render::{ObjectKind, ball_present, ball_visible, object_at, paddle_present};
pub use state::{AxisDir, AxisVel, Ball, GamePhase, GameState, Paddle, Side};
pub use tick::{PaddleInput, TickInput, tick};
