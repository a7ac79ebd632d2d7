//! Game A engine: lane dodger
//!
//! Per-tick flow while playing: scroll the road markings, spawn at most
//! one obstacle when the pacing timer elapses and a pool slot is free,
//! then advance every active obstacle, ending the round on the first
//! player overlap (unless god mode) and scoring obstacles that leave the
//! bottom of the screen.

use glam::IVec2;
use rand::Rng;

use super::collision::Rect;
use super::state::{Obstacle, RaceState, RoundOutcome, VehicleKind};
use crate::consts::*;
use crate::map_range;
use crate::tuning::Tuning;

impl RaceState {
    /// Map the stick onto the road span. The mapping's codomain is
    /// exactly `[ROAD_LEFT, ROAD_RIGHT - PLAYER_W]`, so no clamp needed.
    pub fn steer(&mut self, stick_x: u16) {
        self.player_x = map_range(
            stick_x as i32,
            0,
            STICK_MAX,
            ROAD_LEFT,
            ROAD_RIGHT - PLAYER_W,
        );
    }

    /// Player vehicle bounding box.
    pub fn player_rect(&self) -> Rect {
        Rect::new(self.player_x, PLAYER_Y, PLAYER_W, PLAYER_H)
    }

    /// Advance one tick. `now_ms` drives spawn pacing.
    pub fn update(&mut self, now_ms: u32, tuning: &Tuning) -> RoundOutcome {
        // Road-marking animation; no effect on game logic
        self.lane_offset += self.speed as i32;
        if self.lane_offset >= LANE_MARK_LEN * 2 {
            self.lane_offset = 0;
        }

        self.spawn_obstacle(now_ms, tuning);

        let step = self.speed as i32;
        let player = self.player_rect();
        for i in 0..self.obstacles.capacity() {
            let Some(obstacle) = self.obstacles.slot_mut(i) else {
                break;
            };
            if !obstacle.active {
                continue;
            }
            obstacle.pos.y += step;

            // First collision found ends the round; later slots stay
            // unprocessed this tick
            if obstacle.hit_rect().overlaps(&player) && !self.god_mode {
                log::info!("race: crashed at score {}", self.score);
                return RoundOutcome::Lost;
            }

            // Passed obstacle: free the slot and score it
            if obstacle.pos.y >= DISPLAY_HEIGHT {
                obstacle.active = false;
                self.score += 1;
                if self.score.is_multiple_of(tuning.points_per_speed_up) {
                    self.speed += tuning.speed_step;
                    log::debug!("race: speed up to {}", self.speed);
                }
            }
        }
        RoundOutcome::Continue
    }

    /// Activate one obstacle if the spawn interval elapsed and the pool
    /// has room. Wraparound-safe against millisecond counter rollover.
    fn spawn_obstacle(&mut self, now_ms: u32, tuning: &Tuning) {
        if now_ms.wrapping_sub(self.last_spawn_ms) <= tuning.spawn_interval_ms {
            return;
        }
        if self.obstacles.is_full() {
            // Refused; the elapsed timer keeps retrying next tick
            return;
        }

        let lane = self.rng.random_range(0..LANE_COUNT);
        let kind = VehicleKind::ALL[self.rng.random_range(0..VehicleKind::ALL.len())];
        let lane_start = ROAD_LEFT + lane * LANE_WIDTH;
        // Horizontal jitter keeps obstacles roughly inside their lane
        let x = self
            .rng
            .random_range(lane_start..lane_start + LANE_WIDTH - HIT_W + 4);

        self.obstacles.insert(Obstacle {
            pos: IVec2::new(x, OBSTACLE_SPAWN_Y),
            lane: lane as u8,
            kind,
            active: true,
        });
        self.last_spawn_ms = now_ms;
        log::debug!("race: spawned {kind:?} in lane {lane} at x={x}");
    }
}
