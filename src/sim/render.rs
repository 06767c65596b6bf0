//! Per-query-point membership flags for the external compositor
//!
//! Pure combinational functions of the committed state: for any queried
//! coordinate the compositor learns which object, if any, owns that pixel.
//! Color blending and serialization happen downstream; this module only
//! asserts ownership and hands back the object for the color lookup.

use glam::UVec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, Side};
use crate::settings::GameMode;

/// Object owning a pixel, in compositing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Ball,
    LeftPaddle,
    RightPaddle,
}

/// Half-open point-in-rectangle test
fn in_rect(query: UVec2, pos: UVec2, size: UVec2) -> bool {
    query.x >= pos.x && query.x < pos.x + size.x && query.y >= pos.y && query.y < pos.y + size.y
}

/// Whether the ball is drawn at all in the current phase. The scored rally
/// hides it while waiting to start; the demo keeps it on screen even while
/// paused.
pub fn ball_visible(state: &GameState) -> bool {
    match state.config.mode {
        GameMode::ScoredRally => !matches!(state.phase, GamePhase::Init | GamePhase::Idle),
        GameMode::ContinuousDemo => true,
    }
}

/// Does the ball own the queried coordinate?
pub fn ball_present(state: &GameState, query: UVec2) -> bool {
    if !ball_visible(state) {
        return false;
    }
    let (pos, size) = state.ball.rect(&state.config);
    in_rect(query, pos, size)
}

/// Does the given paddle own the queried coordinate?
pub fn paddle_present(state: &GameState, side: Side, query: UVec2) -> bool {
    let (pos, size) = state.paddles[side.index()].rect(side, &state.config);
    in_rect(query, pos, size)
}

/// Object owning the queried coordinate, ball over paddles
pub fn object_at(state: &GameState, query: UVec2) -> Option<ObjectKind> {
    if ball_present(state, query) {
        Some(ObjectKind::Ball)
    } else if paddle_present(state, Side::Left, query) {
        Some(ObjectKind::LeftPaddle)
    } else if paddle_present(state, Side::Right, query) {
        Some(ObjectKind::RightPaddle)
    } else {
        None
    }
}
