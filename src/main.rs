//! Headless driver for the game core
//!
//! Stands in for the external collaborators: generates one frame boundary
//! per refresh interval, feeds debounced-style inputs, and reports phase
//! transitions. In scored mode it also plays the acknowledgment role,
//! pressing the control button whenever the machine is waiting on one.
//!
//! Usage: raster-pong [scored|demo] [FRAMES] [--realtime] [--dump]

use std::time::{Duration, Instant};

use raster_pong::sim::GamePhase;
use raster_pong::{Config, GameMode, GameState, TickInput, tick};

/// 60 Hz refresh, matching the display the core was designed against
const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

fn main() {
    env_logger::init();

    let mut mode = GameMode::ContinuousDemo;
    let mut frames: u64 = 600;
    let mut realtime = false;
    let mut dump = false;
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            realtime = true;
        } else if arg == "--dump" {
            dump = true;
        } else if let Some(m) = GameMode::from_str(&arg) {
            mode = m;
        } else if let Ok(n) = arg.parse() {
            frames = n;
        } else {
            log::warn!("ignoring unrecognized argument {arg:?}");
        }
    }

    let config = match mode {
        GameMode::ScoredRally => Config::scored_rally(),
        GameMode::ContinuousDemo => Config::continuous_demo(),
    };
    log::info!("running {frames} frames in {} mode", mode.as_str());

    let mut state = GameState::new(config);
    let mut next_boundary = Instant::now();
    let mut points: u64 = 0;

    for frame in 0..frames {
        let mut input = TickInput::default();
        // acknowledge idle/start/point-end phases every half second
        if state.phase != GamePhase::Play && frame % 30 == 0 {
            input.control_pressed = true;
        }

        let before = state.phase;
        tick(&mut state, &input);
        if state.phase != before {
            log::info!("frame {frame}: {before:?} -> {:?}", state.phase);
            if state.phase == GamePhase::PointEnd {
                points += 1;
            }
        }
        if frame % 300 == 0 {
            log::debug!(
                "frame {frame}: ball at ({}, {})",
                state.ball.pos.x,
                state.ball.pos.y
            );
        }

        if realtime {
            next_boundary += FRAME_PERIOD;
            if let Some(wait) = next_boundary.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    log::info!("done: {points} points ended over {frames} frames");
    if dump {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("state dump failed: {err}"),
        }
    }
}
