//! Fixed timestep simulation tick
//!
//! [`tick`] advances the whole game by exactly one frame boundary. All
//! reads within a tick observe the snapshot committed at the previous
//! boundary: the latched collision flags are consumed first, the phase
//! machine commits next, and paddle/ball updates are computed from copies
//! of the previous positions before anything moves. The new snapshot is
//! then sampled into the latch for the next boundary.

use super::collision::{self, CollisionFrame};
use super::state::{AxisDir, AxisVel, Ball, GamePhase, GameState, Paddle, Side};
use crate::settings::{Config, GameMode, PaddleControl};

/// Debounced button levels for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Inputs for a single frame boundary (already debounced by the embedder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    /// Up/down levels per paddle, left then right
    pub paddles: [PaddleInput; 2],
    /// Single-tick rising edge of the control button
    pub control_pressed: bool,
    /// Level-sensitive reset; forces power-on state immediately
    pub reset: bool,
}

/// Advance the game state by one frame boundary
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.reset {
        state.reset();
        return;
    }

    state.frame += 1;

    // Consume the flags latched during the window that just closed
    let latch = state.latch.take();

    let prev = state.phase;
    let next = next_phase(state.config.mode, prev, input.control_pressed, latch.any_edge());
    if prev == GamePhase::Play && next == GamePhase::PointEnd {
        // Remember which boundary the ball went out at: the next serve goes
        // toward the side that did not score
        if latch.right_edge {
            state.serve_x = AxisDir::Positive;
        } else if latch.left_edge {
            state.serve_x = AxisDir::Negative;
        }
    }
    if next == GamePhase::Start && prev != GamePhase::Start {
        state.serve();
    }
    state.phase = next;

    // Motion runs only while the machine is in Play; PointEnd freezes the
    // very tick the scoring edge is consumed, before any position changes
    if state.phase == GamePhase::Play {
        let prev_ball = state.ball;
        let prev_paddles = state.paddles;
        step_paddles(state, input, &prev_ball);
        step_ball(state, &latch, &prev_ball, &prev_paddles);
    }

    // Sample the freshly committed snapshot for the next boundary
    let frame = collision::evaluate(&state.config, &state.ball, &state.paddles);
    state.latch.sample(frame);
}

/// Pure phase transition function. No side effects; committed once per tick.
pub(crate) fn next_phase(
    mode: GameMode,
    phase: GamePhase,
    control: bool,
    scored: bool,
) -> GamePhase {
    match mode {
        GameMode::ScoredRally => match phase {
            GamePhase::Init => GamePhase::Idle,
            GamePhase::Idle if control => GamePhase::Start,
            GamePhase::Start if control => GamePhase::Play,
            GamePhase::Play if scored => GamePhase::PointEnd,
            GamePhase::PointEnd if control => GamePhase::Start,
            other => other,
        },
        GameMode::ContinuousDemo => match phase {
            // the demo starts running without a button press
            GamePhase::Init => GamePhase::Play,
            GamePhase::Idle if control => GamePhase::Play,
            GamePhase::Play if control => GamePhase::Idle,
            GamePhase::Idle | GamePhase::Play => phase,
            // phases foreign to this mode resolve to the safe initial state
            GamePhase::Start | GamePhase::PointEnd => GamePhase::Idle,
        },
    }
}

/// Step both paddles from the previous boundary's ball snapshot
fn step_paddles(state: &mut GameState, input: &TickInput, prev_ball: &Ball) {
    let ball_center = prev_ball.center_y(&state.config);
    for side in [Side::Left, Side::Right] {
        let i = side.index();
        let y = state.paddles[i].y;
        state.paddles[i].y = match state.config.controls[i] {
            PaddleControl::Human => human_step(y, &input.paddles[i], &state.config),
            PaddleControl::Autonomous => auto_step(y, ball_center, &state.config),
        };
    }
}

/// Human paddle: one speed step per asserted direction, gated by an
/// independent boundary guard on each side. Contradictory up+down input is
/// not cancelled; both steps apply unless a guard blocks one.
fn human_step(y: u32, input: &PaddleInput, config: &Config) -> u32 {
    let step = config.paddle_speed;
    // both guards read the boundary snapshot, not each other's result
    let up_ok = input.up && y >= step;
    let down_ok = input.down && y + config.paddle_height + step <= config.v_res;
    let mut next = y;
    if up_ok {
        next -= step;
    }
    if down_ok {
        next += step;
    }
    next
}

/// Autonomous paddle: track the ball's vertical center with a deadband of
/// half the ball size. Bounded-rate tracking keeps the opponent beatable.
fn auto_step(y: u32, ball_center: u32, config: &Config) -> u32 {
    let step = config.paddle_speed;
    let center = y + config.paddle_height / 2;
    let margin = config.ball_size / 2;
    if center + margin < ball_center {
        if y + config.paddle_height + step <= config.v_res {
            y + step
        } else {
            y
        }
    } else if center > ball_center + margin {
        if y >= step { y - step } else { y }
    } else {
        y
    }
}

/// Ball reaction for one boundary, from the previous boundary's snapshot
/// and the collision flags latched over the closed window
fn step_ball(
    state: &mut GameState,
    latch: &CollisionFrame,
    prev_ball: &Ball,
    prev_paddles: &[Paddle; 2],
) {
    let scored_mode = state.config.mode == GameMode::ScoredRally;
    let ball_center = prev_ball.center_y(&state.config);
    let cfg = &state.config;
    let ball = &mut state.ball;

    // Horizontal reaction, in latched-precedence order. The bounce nudge
    // doubles as edge-of-paddle escape. In ScoredRally a latched screen
    // edge never reaches here: the phase machine froze play this tick.
    if latch.p1 {
        ball.vel_x = AxisVel::new(AxisDir::Positive, cfg.bounce_x_right);
        ball.pos.x += cfg.bounce_x_right;
    } else if latch.p2 {
        ball.vel_x = AxisVel::new(AxisDir::Negative, cfg.bounce_x_left);
        ball.pos.x = ball.pos.x.saturating_sub(cfg.bounce_x_left);
    } else if latch.right_edge {
        ball.vel_x.dir = AxisDir::Negative;
        ball.pos.x = ball.pos.x.saturating_sub(ball.vel_x.speed);
    } else if latch.left_edge {
        ball.vel_x.dir = AxisDir::Positive;
        ball.pos.x += ball.vel_x.speed;
    } else {
        // advance; the detector latched beforehand whenever this step
        // could cross a boundary, so the add cannot leave the screen
        match ball.vel_x.dir {
            AxisDir::Positive => ball.pos.x += ball.vel_x.speed,
            AxisDir::Negative => ball.pos.x = ball.pos.x.saturating_sub(ball.vel_x.speed),
        }
    }
    debug_assert!(ball.pos.x + cfg.ball_size <= cfg.h_res);

    // Vertical reaction: reverse and nudge back into bounds at top and
    // bottom; vertical motion never scores. Uses the pre-bounce speed, the
    // zone rebound below takes effect from the next boundary.
    let vs = ball.vel_y.speed;
    match ball.vel_y.dir {
        AxisDir::Positive => {
            if ball.pos.y + cfg.ball_size + vs > cfg.v_res {
                ball.vel_y.dir = AxisDir::Negative;
                ball.pos.y = ball.pos.y.saturating_sub(vs);
            } else {
                ball.pos.y += vs;
            }
        }
        AxisDir::Negative => {
            if ball.pos.y < vs {
                ball.vel_y.dir = AxisDir::Positive;
                ball.pos.y += vs;
            } else {
                ball.pos.y -= vs;
            }
        }
    }
    debug_assert!(ball.pos.y + cfg.ball_size <= cfg.v_res);

    // Bounce-angle remapping: where the ball struck the paddle, relative
    // to the paddle's position at the moment of collision, feeds back into
    // the rebound angle
    if scored_mode && latch.any_paddle() {
        let paddle_y = if latch.p1 {
            prev_paddles[Side::Left.index()].y
        } else {
            prev_paddles[Side::Right.index()].y
        };
        let zone = collision::bounce_zone(ball_center, paddle_y, cfg.paddle_height);
        ball.vel_y = collision::zone_rebound(zone, &cfg.zone_speeds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;
    use proptest::prelude::*;

    fn press() -> TickInput {
        TickInput {
            control_pressed: true,
            ..TickInput::default()
        }
    }

    #[test]
    fn test_phase_table_scored_rally() {
        use GamePhase::*;
        let mode = GameMode::ScoredRally;
        assert_eq!(next_phase(mode, Init, false, false), Idle);
        assert_eq!(next_phase(mode, Idle, true, false), Start);
        assert_eq!(next_phase(mode, Idle, false, false), Idle);
        assert_eq!(next_phase(mode, Start, true, false), Play);
        assert_eq!(next_phase(mode, Play, false, true), PointEnd);
        assert_eq!(next_phase(mode, Play, true, false), Play);
        assert_eq!(next_phase(mode, PointEnd, true, false), Start);
        assert_eq!(next_phase(mode, PointEnd, false, true), PointEnd);
    }

    #[test]
    fn test_phase_table_continuous_demo() {
        use GamePhase::*;
        let mode = GameMode::ContinuousDemo;
        assert_eq!(next_phase(mode, Init, false, false), Play);
        assert_eq!(next_phase(mode, Idle, true, false), Play);
        assert_eq!(next_phase(mode, Play, true, false), Idle);
        // scoring trigger is meaningless in demo mode
        assert_eq!(next_phase(mode, Play, false, true), Play);
        // foreign phases fall back to the safe initial state
        assert_eq!(next_phase(mode, Start, false, false), Idle);
        assert_eq!(next_phase(mode, PointEnd, false, false), Idle);
    }

    #[test]
    fn test_scored_rally_point_flow() {
        let mut state = GameState::new(Config::scored_rally());
        let idle = TickInput::default();

        tick(&mut state, &idle);
        assert_eq!(state.phase, GamePhase::Idle);
        tick(&mut state, &press());
        assert_eq!(state.phase, GamePhase::Start);
        tick(&mut state, &press());
        assert_eq!(state.phase, GamePhase::Play);

        // flatten the serve and park the defender away from the rally line
        // so the ball reaches the right boundary with no paddle present
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);
        state.config.controls[1] = PaddleControl::Human;
        state.paddles[1].y = 0;

        let mut guard = 0;
        while state.phase == GamePhase::Play {
            tick(&mut state, &idle);
            guard += 1;
            assert!(guard < 10_000, "rally never ended");
        }
        assert_eq!(state.phase, GamePhase::PointEnd);
        assert!(state.latched().right_edge);

        // motion is frozen until acknowledged
        let frozen_ball = state.ball;
        let frozen_paddles = state.paddles;
        for _ in 0..10 {
            tick(&mut state, &idle);
            assert_eq!(state.phase, GamePhase::PointEnd);
            assert_eq!(state.ball, frozen_ball);
            assert_eq!(state.paddles, frozen_paddles);
        }

        // acknowledgment serves toward the side that missed
        tick(&mut state, &press());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.ball.vel_x.dir, AxisDir::Positive);
        assert_eq!(
            state.ball.pos.x,
            state.config.centered_x(state.config.ball_size)
        );
    }

    #[test]
    fn test_demo_toggle_pauses_motion() {
        let mut state = GameState::new(Config::continuous_demo());
        let idle = TickInput::default();

        tick(&mut state, &idle);
        assert_eq!(state.phase, GamePhase::Play);

        tick(&mut state, &press());
        assert_eq!(state.phase, GamePhase::Idle);
        let paused = state.ball;
        for _ in 0..5 {
            tick(&mut state, &idle);
        }
        assert_eq!(state.ball, paused);

        tick(&mut state, &press());
        assert_eq!(state.phase, GamePhase::Play);
    }

    #[test]
    fn test_demo_reflects_at_right_edge() {
        let cfg = Config::continuous_demo();
        let mut state = GameState::new(cfg);
        let idle = TickInput::default();
        state.phase = GamePhase::Play;
        // high above both paddles, a few steps short of the right boundary
        let cfg = state.config.clone();
        state.ball.pos = UVec2::new(cfg.h_res - cfg.ball_size - 25, 100);
        state.ball.vel_x = AxisVel::new(AxisDir::Positive, 10);
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);

        tick(&mut state, &idle); // advance
        tick(&mut state, &idle); // advance into the edge window, latch
        assert!(state.latched().right_edge);
        tick(&mut state, &idle); // consume: reflect and nudge back
        assert_eq!(state.ball.vel_x.dir, AxisDir::Negative);
        assert!(state.ball.pos.x + cfg.ball_size <= cfg.h_res);
    }

    #[test]
    fn test_demo_reflects_at_left_edge() {
        let mut state = GameState::new(Config::continuous_demo());
        let idle = TickInput::default();
        state.phase = GamePhase::Play;
        let cfg = state.config.clone();
        state.ball.pos = UVec2::new(15, 100);
        state.ball.vel_x = AxisVel::new(AxisDir::Negative, 10);
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);

        tick(&mut state, &idle); // advance to x=5, latch left edge
        assert!(state.latched().left_edge);
        tick(&mut state, &idle); // consume: reflect rightward
        assert_eq!(state.ball.vel_x.dir, AxisDir::Positive);
        assert_eq!(state.ball.pos.x, 15);
    }

    #[test]
    fn test_ball_commits_flush_at_right_boundary() {
        // containment is inclusive: a step landing exactly on the boundary
        // commits flush, latches, and reflects on the next tick
        let mut state = GameState::new(Config::continuous_demo());
        let idle = TickInput::default();
        state.phase = GamePhase::Play;
        let cfg = state.config.clone();
        state.ball.pos = UVec2::new(cfg.h_res - cfg.ball_size - 10, 100);
        state.ball.vel_x = AxisVel::new(AxisDir::Positive, 10);
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);

        tick(&mut state, &idle); // lands exactly on the boundary
        assert_eq!(state.ball.pos.x, cfg.h_res - cfg.ball_size);
        assert!(state.latched().right_edge);
        tick(&mut state, &idle); // reflects back inside
        assert_eq!(state.ball.vel_x.dir, AxisDir::Negative);
        assert_eq!(state.ball.pos.x, cfg.h_res - cfg.ball_size - 10);
    }

    #[test]
    fn test_autonomous_holds_inside_deadband() {
        let mut state = GameState::new(Config::continuous_demo());
        let idle = TickInput::default();
        state.phase = GamePhase::Play;
        // ball parked at screen center; both paddle centers match it
        state.ball.vel_x = AxisVel::new(AxisDir::Positive, 0);
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);
        let centered = state.config.centered_y(state.config.paddle_height);
        for _ in 0..100 {
            tick(&mut state, &idle);
            assert_eq!(state.paddles[0].y, centered);
            assert_eq!(state.paddles[1].y, centered);
        }
    }

    #[test]
    fn test_autonomous_tracks_outside_deadband() {
        let mut state = GameState::new(Config::continuous_demo());
        let idle = TickInput::default();
        state.phase = GamePhase::Play;
        state.ball.pos.y = 100;
        state.ball.vel_x = AxisVel::new(AxisDir::Positive, 0);
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);
        let before = state.paddles[0].y;
        tick(&mut state, &idle);
        assert_eq!(state.paddles[0].y, before - state.config.paddle_speed);
    }

    #[test]
    fn test_human_contradictory_input_both_apply() {
        let mut cfg = Config::scored_rally();
        cfg.controls = [PaddleControl::Human, PaddleControl::Human];
        let mut state = GameState::new(cfg);
        state.phase = GamePhase::Play;
        let both = TickInput {
            paddles: [PaddleInput { up: true, down: true }; 2],
            ..TickInput::default()
        };

        // mid-screen: both steps apply and cancel out
        let centered = state.config.centered_y(state.config.paddle_height);
        tick(&mut state, &both);
        assert_eq!(state.paddles[0].y, centered);

        // top boundary: up is guard-blocked, down still applies
        state.paddles[0].y = 0;
        tick(&mut state, &both);
        assert_eq!(state.paddles[0].y, state.config.paddle_speed);

        // bottom boundary: down is guard-blocked, up still applies
        let bottom = state.config.v_res - state.config.paddle_height;
        state.paddles[0].y = bottom;
        tick(&mut state, &both);
        assert_eq!(state.paddles[0].y, bottom - state.config.paddle_speed);
    }

    #[test]
    fn test_paddle_bounce_conserves_preset_speeds() {
        let mut state = GameState::new(Config::scored_rally());
        let idle = TickInput::default();
        state.phase = GamePhase::Play;
        let cfg = state.config.clone();
        // ball one step short of the right paddle column, dead center
        state.ball.pos = UVec2::new(
            cfg.right_paddle_x() - cfg.ball_size,
            cfg.centered_y(cfg.ball_size),
        );
        state.ball.vel_x = AxisVel::new(AxisDir::Positive, 10);
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);

        tick(&mut state, &idle); // advance onto the paddle, latch p2
        assert!(state.latched().p2);
        tick(&mut state, &idle); // consume: bounce leftward
        assert_eq!(state.ball.vel_x.dir, AxisDir::Negative);
        assert_eq!(state.ball.vel_x.speed, cfg.bounce_x_left);
        // dead-center hit lands in a flat-return zone
        assert_eq!(state.ball.vel_y.speed, 0);
        assert!(cfg.zone_speeds.contains(&state.ball.vel_y.speed));
    }

    #[test]
    fn test_left_paddle_bounce_sends_ball_rightward() {
        let mut state = GameState::new(Config::scored_rally());
        let idle = TickInput::default();
        state.phase = GamePhase::Play;
        let cfg = state.config.clone();
        // strike near the paddle top: steep upward return
        state.paddles[0].y = 490;
        state.ball.pos = UVec2::new(cfg.left_paddle_x() + 2, 495 - cfg.ball_size / 2);
        state.ball.vel_x = AxisVel::new(AxisDir::Negative, 10);
        state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);

        tick(&mut state, &idle); // latch p1 at the committed overlap
        assert!(state.latched().p1);
        tick(&mut state, &idle);
        assert_eq!(state.ball.vel_x.dir, AxisDir::Positive);
        assert_eq!(state.ball.vel_x.speed, cfg.bounce_x_right);
        assert_eq!(state.ball.vel_y.dir, AxisDir::Negative);
        assert_eq!(state.ball.vel_y.speed, 15);
    }

    proptest! {
        #[test]
        fn prop_positions_stay_in_bounds(mask in any::<u64>(), frames in 1usize..600) {
            let mut state = GameState::new(Config::continuous_demo());
            for i in 0..frames {
                let input = TickInput {
                    control_pressed: mask & (1 << (i % 64)) != 0,
                    ..TickInput::default()
                };
                tick(&mut state, &input);
                let cfg = &state.config;
                prop_assert!(state.ball.pos.x + cfg.ball_size <= cfg.h_res);
                prop_assert!(state.ball.pos.y + cfg.ball_size <= cfg.v_res);
                for paddle in state.paddles {
                    prop_assert!(paddle.y + cfg.paddle_height <= cfg.v_res);
                }
            }
        }

        #[test]
        fn prop_reset_restores_power_on_state(mask in any::<u64>(), frames in 0usize..400) {
            let mut state = GameState::new(Config::scored_rally());
            for i in 0..frames {
                let input = TickInput {
                    control_pressed: mask & (1 << (i % 64)) != 0,
                    paddles: [PaddleInput { up: i % 3 == 0, down: i % 5 == 0 }; 2],
                    reset: false,
                };
                tick(&mut state, &input);
            }
            let reset = TickInput { reset: true, ..TickInput::default() };
            tick(&mut state, &reset);
            prop_assert_eq!(state, GameState::new(Config::scored_rally()));
        }

        #[test]
        fn prop_bounce_speeds_come_from_preset(paddle_y in 0u32..980, ball_dy in 0u32..84) {
            let mut state = GameState::new(Config::scored_rally());
            let idle = TickInput::default();
            state.phase = GamePhase::Play;
            state.config.controls = [PaddleControl::Human, PaddleControl::Human];
            let cfg = state.config.clone();
            state.paddles[1].y = paddle_y;
            state.ball.pos = UVec2::new(cfg.right_paddle_x(), paddle_y + ball_dy);
            state.ball.vel_x = AxisVel::new(AxisDir::Positive, 10);
            state.ball.vel_y = AxisVel::new(AxisDir::Positive, 0);

            tick(&mut state, &idle); // latch the overlap
            prop_assert!(state.latched().p2);
            tick(&mut state, &idle); // consume the bounce
            prop_assert_eq!(state.ball.vel_x.dir, AxisDir::Negative);
            prop_assert_eq!(state.ball.vel_x.speed, cfg.bounce_x_left);
            prop_assert!(cfg.zone_speeds.contains(&state.ball.vel_y.speed));
        }
    }
}
