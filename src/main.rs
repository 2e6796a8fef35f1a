//! Gloomcast entry point
//!
//! Headless demo driver: a scripted bot wanders the map and shoots at
//! whatever the raycaster says is in front of it, until it dies or the tick
//! budget runs out. Useful for smoke-testing the core without a display.

use gloomcast::consts::TICK_HZ;
use gloomcast::raycast::Frame;
use gloomcast::runner::{FrameScheduler, FrameSink, InputSource, run};
use gloomcast::sim::{Difficulty, GameState, GameSummary, TickInput};

const DEMO_COLUMNS: usize = 120;

/// Grants a fixed number of frames, immediately (no real-time pacing).
struct TickBudget(u64);

impl FrameScheduler for TickBudget {
    fn next_frame(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

/// Walks forward, sweeps its aim, and holds the trigger.
struct PatrolBot {
    t: u64,
}

impl InputSource for PatrolBot {
    fn sample(&mut self) -> TickInput {
        self.t += 1;
        TickInput {
            move_forward: true,
            // Swing right for a second, then straight, repeating
            turn_right: self.t % 120 < 60,
            fire_held: self.t % 3 == 0,
            ..Default::default()
        }
    }
}

/// Logs a one-line situation report once per simulated second.
struct LogSink {
    frames: u64,
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        if self.frames % TICK_HZ != 0 {
            return;
        }
        let nearest = frame
            .columns
            .iter()
            .map(|c| c.distance)
            .fold(f32::INFINITY, f32::min);
        log::info!(
            "t={}s pos=({:.1},{:.1}) nearest wall {:.1}u, {} enemies on minimap, {} {} ammo",
            self.frames / TICK_HZ,
            frame.minimap.player_pos.x,
            frame.minimap.player_pos.y,
            nearest,
            frame.minimap.enemy_positions.len(),
            frame.weapon.name,
            frame.weapon.ammo,
        );
    }

    fn game_over(&mut self, summary: &GameSummary) {
        log::info!(
            "died after {}s with {} kills",
            summary.elapsed_seconds,
            summary.kills
        );
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .map(|s| Difficulty::from_str(&s).unwrap_or_default())
        .unwrap_or_default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let budget_secs: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let mut state = GameState::new(seed);
    if let Err(err) = state.start(difficulty) {
        log::error!("failed to start game: {err}");
        std::process::exit(1);
    }

    run(
        &mut state,
        &mut TickBudget(budget_secs * TICK_HZ),
        &mut PatrolBot { t: 0 },
        &mut LogSink { frames: 0 },
        DEMO_COLUMNS,
    );

    let summary = state.summary();
    log::info!(
        "final: seed {} -> {} kills, {}s survived",
        state.seed,
        summary.kills,
        summary.elapsed_seconds
    );
}
