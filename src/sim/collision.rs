//! Collision detection and bounce-angle mapping
//!
//! Detection is pure and combinational: axis-aligned rectangle overlap with
//! half-open intervals on both axes, evaluated against the committed
//! positions of the current frame window. Results are captured in a
//! write-once latch and consumed exactly once at the next frame boundary.
//!
//! A paddle hit takes precedence over a scoring edge: a ball reaching the
//! boundary exactly where a paddle sits must bounce, not score.

use glam::UVec2;
use serde::{Deserialize, Serialize};

use super::state::{AxisDir, AxisVel, Ball, Paddle, Side};
use crate::consts::BOUNCE_ZONES;
use crate::settings::Config;

/// Collision results for one frame window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionFrame {
    /// Ball overlaps the left paddle
    pub p1: bool,
    /// Ball overlaps the right paddle
    pub p2: bool,
    /// Ball is within one horizontal step of the left boundary
    pub left_edge: bool,
    /// Ball is within one horizontal step of the right boundary
    pub right_edge: bool,
}

impl CollisionFrame {
    pub fn any_paddle(&self) -> bool {
        self.p1 || self.p2
    }

    pub fn any_edge(&self) -> bool {
        self.left_edge || self.right_edge
    }
}

/// Write-once-per-window, read-once-at-boundary flag storage
///
/// The pending frame is double-buffered behind [`CollisionLatch::take`]:
/// sampling only ORs bits in, so repeated samples within one window cannot
/// un-assert a hit, and consuming clears the window atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionLatch {
    pending: CollisionFrame,
}

impl CollisionLatch {
    /// OR a sampled frame into the pending window
    pub fn sample(&mut self, frame: CollisionFrame) {
        self.pending.p1 |= frame.p1;
        self.pending.p2 |= frame.p2;
        self.pending.left_edge |= frame.left_edge;
        self.pending.right_edge |= frame.right_edge;
    }

    /// Consume the pending window, clearing it for the next one
    pub fn take(&mut self) -> CollisionFrame {
        std::mem::take(&mut self.pending)
    }

    /// Inspect without consuming
    pub fn peek(&self) -> CollisionFrame {
        self.pending
    }
}

/// Axis-aligned rectangle overlap, half-open on both axes
pub fn rects_overlap(a_pos: UVec2, a_size: UVec2, b_pos: UVec2, b_size: UVec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

/// Evaluate one combinational step against committed positions
pub fn evaluate(config: &Config, ball: &Ball, paddles: &[Paddle; 2]) -> CollisionFrame {
    let (ball_pos, ball_size) = ball.rect(config);
    let (p1_pos, p1_size) = paddles[Side::Left.index()].rect(Side::Left, config);
    let (p2_pos, p2_size) = paddles[Side::Right.index()].rect(Side::Right, config);

    let mut frame = CollisionFrame {
        p1: rects_overlap(ball_pos, ball_size, p1_pos, p1_size),
        p2: rects_overlap(ball_pos, ball_size, p2_pos, p2_size),
        ..CollisionFrame::default()
    };

    // Paddle precedence: edges only assert when no paddle hit this step
    if !frame.any_paddle() {
        let step = ball.vel_x.speed;
        frame.left_edge = ball.pos.x < step;
        frame.right_edge = ball.pos.x + config.ball_size + step > config.h_res;
    }

    frame
}

/// Map the ball's vertical center at collision time to one of 8 equal
/// zones over the paddle's height. Zone boundaries are strict `<`: a
/// center sitting exactly on a boundary belongs to the next zone down.
pub fn bounce_zone(ball_center_y: u32, paddle_y: u32, paddle_height: u32) -> usize {
    let zone_size = paddle_height / BOUNCE_ZONES as u32;
    let offset = ball_center_y.saturating_sub(paddle_y);
    for zone in 0..BOUNCE_ZONES - 1 {
        if offset < (zone as u32 + 1) * zone_size {
            return zone;
        }
    }
    BOUNCE_ZONES - 1
}

/// Vertical rebound for a bounce zone: the top half of the paddle returns
/// the ball upward, the bottom half downward, and speed grows from the
/// center zones (flat return) to the extremes (steepest)
pub fn zone_rebound(zone: usize, zone_speeds: &[u32; BOUNCE_ZONES]) -> AxisVel {
    let dir = if zone < BOUNCE_ZONES / 2 {
        AxisDir::Negative
    } else {
        AxisDir::Positive
    };
    AxisVel::new(dir, zone_speeds[zone])
}
