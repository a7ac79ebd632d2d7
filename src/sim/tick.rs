//! One iteration of the cooperative console loop
//!
//! Button edges drive the mode/phase state machine first, then the active
//! game's engine runs its per-tick update. Drawing is the renderer's job;
//! the driver calls `render` after `tick` each iteration.

use super::input::TickInput;
use super::state::{ConsoleState, GamePhase, Mode, RoundOutcome};
use crate::consts::*;

/// Advance the console by one tick. `now_ms` is the monotonic millisecond
/// counter used for timer-driven logic (obstacle spawn pacing).
pub fn tick(state: &mut ConsoleState, input: &TickInput, now_ms: u32) {
    handle_buttons(state, input, now_ms);

    if state.menu_cooldown > 0 {
        state.menu_cooldown -= 1;
    }

    match (state.mode, state.phase) {
        (Mode::MainMenu, _) => navigate_menu(state, input),
        (Mode::Race, GamePhase::Playing) => {
            state.race.steer(input.stick_x);
            let outcome = state.race.update(now_ms, &state.tuning);
            apply_outcome(state, outcome);
        }
        (Mode::Breaker, GamePhase::Playing) => {
            state.breaker.track_paddle(input.stick_x);
            let outcome = state.breaker.update(&state.tuning);
            apply_outcome(state, outcome);
        }
        // Welcome, start menus and end screens are draw-only
        _ => {}
    }
}

/// Confirm / exit / special button edges, in that order.
fn handle_buttons(state: &mut ConsoleState, input: &TickInput, now_ms: u32) {
    if input.confirm {
        match state.mode {
            Mode::Welcome => set_mode(state, Mode::MainMenu),
            Mode::MainMenu => {
                let mode = if state.menu_selection == 0 {
                    Mode::Race
                } else {
                    Mode::Breaker
                };
                set_mode(state, mode);
                state.phase = GamePhase::AwaitingStart;
            }
            Mode::Race | Mode::Breaker => {
                if matches!(
                    state.phase,
                    GamePhase::AwaitingStart | GamePhase::GameOver | GamePhase::Victory
                ) {
                    start_round(state, now_ms);
                }
            }
        }
    }

    if input.exit && state.mode != Mode::MainMenu {
        set_mode(state, Mode::MainMenu);
        state.menu_selection = 0;
        state.phase = GamePhase::AwaitingStart;
    }

    if input.special && state.phase == GamePhase::Playing {
        match state.mode {
            Mode::Race => {
                state.race.god_mode = !state.race.god_mode;
                log::debug!("race: god mode {}", state.race.god_mode);
            }
            Mode::Breaker => {
                // Cheat escape hatch: instant win with full score
                state.breaker.clear_all_bricks(&state.tuning);
                state.phase = GamePhase::Victory;
                log::debug!("breaker: cheat clear, score {}", state.breaker.score);
            }
            _ => {}
        }
    }
}

/// Reset the active game and enter play.
fn start_round(state: &mut ConsoleState, now_ms: u32) {
    match state.mode {
        Mode::Race => state.race.reset(now_ms, &state.tuning),
        Mode::Breaker => state.breaker.reset(&state.tuning),
        _ => return,
    }
    state.phase = GamePhase::Playing;
    log::info!("{:?}: round started", state.mode);
}

fn set_mode(state: &mut ConsoleState, mode: Mode) {
    log::info!("mode {:?} -> {:?}", state.mode, mode);
    state.mode = mode;
}

fn apply_outcome(state: &mut ConsoleState, outcome: RoundOutcome) {
    match outcome {
        RoundOutcome::Continue => {}
        RoundOutcome::Lost => state.phase = GamePhase::GameOver,
        RoundOutcome::Won => state.phase = GamePhase::Victory,
    }
}

/// Vertical stick moves the menu cursor, rate-limited by a tick cooldown.
fn navigate_menu(state: &mut ConsoleState, input: &TickInput) {
    if state.menu_cooldown > 0 {
        return;
    }
    let y = input.stick_y as i32;
    if y < STICK_LOW && state.menu_selection + 1 < MENU_ENTRIES {
        state.menu_selection += 1;
        state.menu_cooldown = MENU_REPEAT_TICKS;
    } else if y > STICK_HIGH && state.menu_selection > 0 {
        state.menu_selection -= 1;
        state.menu_cooldown = MENU_REPEAT_TICKS;
    }
}
