//! Pocket Arcade entry point
//!
//! Headless demo harness for the console core: a scripted autopilot walks
//! both games through the state machine at the fixed tick rate, rendering
//! into the in-memory framebuffer and dumping a few frames as ASCII.
//! Pass `--play` to run at real-time speed.

use pocket_arcade::consts::*;
use pocket_arcade::platform::{FixedStepClock, FrameBuffer, InputSource};
use pocket_arcade::render::render;
use pocket_arcade::sim::{ButtonPad, ConsoleState, tick};
use pocket_arcade::{Clock, Tuning};

/// Raw pad levels produced by the demo script for one tick.
#[derive(Debug, Clone, Copy, Default)]
struct ScriptedPad {
    stick_x: u16,
    stick_y: u16,
    confirm: bool,
    exit: bool,
    special: bool,
}

impl InputSource for ScriptedPad {
    fn stick_x(&mut self) -> u16 {
        self.stick_x
    }
    fn stick_y(&mut self) -> u16 {
        self.stick_y
    }
    fn confirm_down(&mut self) -> bool {
        self.confirm
    }
    fn exit_down(&mut self) -> bool {
        self.exit
    }
    fn special_down(&mut self) -> bool {
        self.special
    }
}

/// Demo instance holding console state and driver-side plumbing
struct Arcade {
    state: ConsoleState,
    buttons: ButtonPad,
    display: FrameBuffer,
    clock: FixedStepClock,
}

impl Arcade {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: ConsoleState::with_tuning(seed, tuning),
            buttons: ButtonPad::new(),
            display: FrameBuffer::new(),
            clock: FixedStepClock::new(TICK_MS),
        }
    }

    /// One cooperative loop iteration: sample input, advance, redraw.
    fn step(&mut self, tick_no: u32) {
        let mut pad = demo_input(tick_no, &self.state);
        let input = self.buttons.sample(&mut pad);
        self.clock.advance();
        tick(&mut self.state, &input, self.clock.now_ms());
        render(&self.state, &mut self.display);
    }
}

/// Scripted autopilot: welcome -> race (god mode sightseeing) -> menu ->
/// breaker (paddle tracks the ball) -> cheat victory -> menu.
fn demo_input(tick_no: u32, state: &ConsoleState) -> ScriptedPad {
    let mut pad = ScriptedPad {
        stick_x: 512,
        stick_y: 512,
        ..ScriptedPad::default()
    };

    match tick_no {
        // Welcome -> main menu -> race -> playing
        5 | 10 | 15 => pad.confirm = true,
        // God mode keeps the sightseeing run alive
        20 => pad.special = true,
        // Back to the menu, pick the second entry, start the breaker
        160 => pad.exit = true,
        165 => pad.stick_y = 100,
        172 | 176 => pad.confirm = true,
        // Cheat to the victory screen, then leave for the menu
        340 => pad.special = true,
        350 => pad.exit = true,
        _ => {}
    }

    // Sweep the road while racing; track the ball while breaking bricks
    use pocket_arcade::sim::{GamePhase, Mode};
    if state.phase == GamePhase::Playing {
        match state.mode {
            Mode::Race => {
                let phase = (tick_no % 80) as i32;
                let sweep = if phase < 40 { phase } else { 80 - phase };
                pad.stick_x = (sweep * STICK_MAX / 40) as u16;
            }
            Mode::Breaker => {
                let target = (state.breaker.ball.pos.x - PADDLE_W / 2)
                    .clamp(0, DISPLAY_WIDTH - PADDLE_W);
                pad.stick_x = (target * STICK_MAX / (DISPLAY_WIDTH - PADDLE_W)) as u16;
            }
            _ => {}
        }
    }

    pad
}

/// Balance overrides come from the file named by `POCKET_ARCADE_TUNING`.
fn load_tuning() -> Tuning {
    let Ok(path) = std::env::var("POCKET_ARCADE_TUNING") else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("bad tuning file {path}: {e}, using defaults");
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("cannot read tuning file {path}: {e}, using defaults");
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Pocket Arcade demo starting");

    let realtime = std::env::args().any(|arg| arg == "--play");
    let mut arcade = Arcade::new(0xA7CADE, load_tuning());

    // Frames worth showing: welcome, menu, both games mid-round, victory
    let snapshots = [4u32, 8, 100, 250, 345];

    for tick_no in 0..360 {
        arcade.step(tick_no);
        if snapshots.contains(&tick_no) {
            println!(
                "--- tick {tick_no} ({:?}/{:?}) ---",
                arcade.state.mode, arcade.state.phase
            );
            println!("{}", arcade.display.to_ascii());
        }
        if realtime {
            std::thread::sleep(std::time::Duration::from_millis(TICK_MS as u64));
        }
    }

    log::info!(
        "demo finished: race score {}, breaker score {}, {} frames presented",
        arcade.state.race.score,
        arcade.state.breaker.score,
        arcade.display.present_count()
    );
}
