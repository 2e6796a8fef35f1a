//! Abstract frame loop seam
//!
//! The core never owns a display-refresh loop. An external scheduler is
//! asked for each frame (the host's "request next tick"), and the driver
//! decides after every tick whether to ask again. Stopping is simply not
//! asking: nothing in-flight needs unwinding.

use crate::raycast::{Frame, render_frame};
use crate::sim::state::{GamePhase, GameState, GameSummary};
use crate::sim::tick::{TickInput, tick};

/// Host-provided frame pacing. `next_frame` blocks or arranges the next
/// display refresh; returning false cancels the game from outside.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> bool;
}

/// Per-tick input snapshot provider
pub trait InputSource {
    fn sample(&mut self) -> TickInput;
}

/// Presentation consumer for frames and the end-of-game report
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>);
    fn game_over(&mut self, _summary: &GameSummary) {}
}

/// Drive a running game to completion: one tick and one frame per scheduler
/// grant, stopping on game over or scheduler cancellation.
pub fn run(
    state: &mut GameState,
    scheduler: &mut impl FrameScheduler,
    input: &mut impl InputSource,
    sink: &mut impl FrameSink,
    column_count: usize,
) {
    while state.phase == GamePhase::Running {
        if !scheduler.next_frame() {
            return;
        }
        let snapshot = input.sample();
        tick(state, &snapshot);
        if state.phase == GamePhase::GameOver {
            sink.game_over(&state.summary());
            return;
        }
        sink.present(&render_frame(state, column_count));
    }
}
