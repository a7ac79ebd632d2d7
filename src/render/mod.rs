//! Immediate-mode frame drawing
//!
//! One call to [`render`] draws the whole frame for the current
//! (mode, phase): clear, primitives, then exactly one present. All
//! geometry comes from the sim state; nothing here mutates it.

pub mod sprites;

use crate::consts::*;
use crate::platform::DisplaySurface;
use crate::sim::{BrickGrid, ConsoleState, GamePhase, Mode};
use sprites::{PLAYER, vehicle_sprite};

/// Draw the frame for the current console state.
pub fn render(state: &ConsoleState, display: &mut impl DisplaySurface) {
    display.clear();
    match (state.mode, state.phase) {
        (Mode::Welcome, _) => draw_welcome(display),
        (Mode::MainMenu, _) => draw_main_menu(state, display),
        (Mode::Race, GamePhase::Playing) => draw_race(state, display),
        (Mode::Breaker, GamePhase::Playing) => draw_breaker(state, display),
        (Mode::Race, GamePhase::AwaitingStart) => draw_start_menu("RACE START", display),
        (Mode::Breaker, GamePhase::AwaitingStart) => draw_start_menu("BRICK START", display),
        (_, GamePhase::GameOver) => draw_game_over(state.active_score(), display),
        (_, GamePhase::Victory) => draw_victory(state.breaker.score, display),
    }
    display.present();
}

fn draw_centered(display: &mut impl DisplaySurface, y: i32, text: &str) {
    let w = display.text_width(text);
    display.draw_text((DISPLAY_WIDTH - w) / 2, y, text);
}

fn draw_welcome(display: &mut impl DisplaySurface) {
    draw_centered(display, 10, "ARCADE GAME");
    draw_centered(display, 25, "PRESS B");
}

fn draw_start_menu(title: &str, display: &mut impl DisplaySurface) {
    draw_centered(display, 10, title);
    draw_centered(display, 25, "PRESS B TO START");
}

fn draw_main_menu(state: &ConsoleState, display: &mut impl DisplaySurface) {
    display.draw_text(5, 10, "CHOOSE GAME:");
    display.draw_text(15, 20, "1. CAR RACE");
    display.draw_text(15, 30, "2. BRICK BREAKER");
    // Cursor: a small bar next to the selected entry
    display.draw_box(5, 19 + state.menu_selection as i32 * 10, 5, 2);
}

fn draw_game_over(score: u32, display: &mut impl DisplaySurface) {
    draw_centered(display, 10, "GAME OVER");
    let score_text = format!("SCORE: {score}");
    display.draw_text(5, 25, &score_text);
    let reset = "RESET (B)";
    display.draw_text(DISPLAY_WIDTH - display.text_width(reset) - 3, 25, reset);
}

fn draw_victory(score: u32, display: &mut impl DisplaySurface) {
    draw_centered(display, 8, "CONGRATS!");
    draw_centered(display, 18, "YOU WON!");
    let score_text = format!("SCORE: {score}");
    display.draw_text(5, 30, &score_text);
    let reset = "RESET (B)";
    display.draw_text(DISPLAY_WIDTH - display.text_width(reset) - 3, 30, reset);
}

fn draw_race(state: &ConsoleState, display: &mut impl DisplaySurface) {
    let race = &state.race;

    // Road edges and scrolling dashed lane markings
    display.draw_vline(ROAD_LEFT, 0, DISPLAY_HEIGHT);
    display.draw_vline(ROAD_RIGHT, 0, DISPLAY_HEIGHT);
    let period = LANE_MARK_LEN * 2;
    for i in 0..=DISPLAY_HEIGHT / period {
        let y = i * period + race.lane_offset - period;
        display.draw_box(ROAD_LEFT + LANE_WIDTH, y, LANE_MARK_WIDTH, LANE_MARK_LEN);
        display.draw_box(
            ROAD_LEFT + LANE_WIDTH * 2,
            y,
            LANE_MARK_WIDTH,
            LANE_MARK_LEN,
        );
    }

    PLAYER.blit(display, race.player_x, PLAYER_Y);
    if race.god_mode {
        display.draw_text(3, 10, "GOD");
    }

    for obstacle in race.obstacles.iter_active() {
        vehicle_sprite(obstacle.kind).blit(display, obstacle.pos.x, obstacle.pos.y);
    }

    draw_score(race.score, 10, display);
}

fn draw_breaker(state: &ConsoleState, display: &mut impl DisplaySurface) {
    let breaker = &state.breaker;

    display.draw_box(
        breaker.paddle_x,
        DISPLAY_HEIGHT - PADDLE_H,
        PADDLE_W,
        PADDLE_H,
    );
    display.draw_box(
        breaker.ball.pos.x,
        breaker.ball.pos.y,
        BALL_SIZE,
        BALL_SIZE,
    );

    for index in 0..breaker.bricks.len() {
        if breaker.bricks.is_present(index) {
            let brick = BrickGrid::rect_of(index);
            display.draw_box(brick.x, brick.y, brick.w, brick.h);
        }
    }

    draw_score(breaker.score, 30, display);
}

/// Right-aligned score readout.
fn draw_score(score: u32, y: i32, display: &mut impl DisplaySurface) {
    let text = format!("S:{score}");
    display.draw_text(DISPLAY_WIDTH - display.text_width(&text) - 3, y, &text);
}
