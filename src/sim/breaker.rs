//! Game B engine: paddle-and-blocks
//!
//! Integer ball physics: walls and ceiling reflect, paddle contact forces
//! the ball upward and re-derives the horizontal speed from the impact
//! offset (an angle effect without trigonometry), the floor loses the
//! round, and the brick scan resolves at most one brick per tick in fixed
//! grid order.

use glam::IVec2;

use super::collision::Rect;
use super::state::{BreakerState, BrickGrid, RoundOutcome};
use crate::consts::*;
use crate::map_range;
use crate::tuning::Tuning;

/// Brick rebound rule: a ball whose center x falls outside the brick's
/// horizontal span took a side hit and reflects x; anything else is a
/// face hit and reflects y. Span edges count as face hits.
fn reflect_off_brick(ball_center_x: i32, brick: &Rect, vel: &mut IVec2) {
    if ball_center_x < brick.x || ball_center_x > brick.x + brick.w {
        vel.x = -vel.x;
    } else {
        vel.y = -vel.y;
    }
}

impl BreakerState {
    /// Map the stick onto the paddle's travel range
    /// `[0, DISPLAY_WIDTH - PADDLE_W]`.
    pub fn track_paddle(&mut self, stick_x: u16) {
        self.paddle_x = map_range(stick_x as i32, 0, STICK_MAX, 0, DISPLAY_WIDTH - PADDLE_W);
    }

    /// Advance one tick of ball physics and brick resolution.
    pub fn update(&mut self, tuning: &Tuning) -> RoundOutcome {
        self.ball.pos += self.ball.vel;

        // Side walls
        if self.ball.pos.x <= 0 || self.ball.pos.x >= DISPLAY_WIDTH - BALL_SIZE {
            self.ball.vel.x = -self.ball.vel.x;
        }
        // Ceiling
        if self.ball.pos.y <= 0 {
            self.ball.vel.y = -self.ball.vel.y;
        }

        // Paddle: only catches a descending ball
        if self.ball.pos.y + BALL_SIZE >= DISPLAY_HEIGHT - PADDLE_H
            && self.ball.pos.x + BALL_SIZE > self.paddle_x
            && self.ball.pos.x < self.paddle_x + PADDLE_W
            && self.ball.vel.y > 0
        {
            self.ball.vel.y = -self.ball.vel.y.abs();
            // Impact offset from the paddle center steers the rebound
            let paddle_center = self.paddle_x + PADDLE_W / 2;
            let delta = self.ball.pos.x + BALL_SIZE / 2 - paddle_center;
            self.ball.vel.x =
                (delta / tuning.angle_divisor).clamp(-tuning.max_ball_vx, tuning.max_ball_vx);
        }

        // Floor: round lost
        if self.ball.pos.y >= DISPLAY_HEIGHT {
            log::info!("breaker: ball dropped at score {}", self.score);
            return RoundOutcome::Lost;
        }

        self.brick_collision(tuning)
    }

    /// Resolve the first overlapping brick, if any. Simultaneous overlaps
    /// wait for later ticks.
    fn brick_collision(&mut self, tuning: &Tuning) -> RoundOutcome {
        let ball_rect = self.ball.rect();
        for index in 0..self.bricks.len() {
            if !self.bricks.is_present(index) {
                continue;
            }
            let brick = BrickGrid::rect_of(index);
            if !ball_rect.overlaps(&brick) {
                continue;
            }

            self.bricks.clear_at(index);
            self.score += tuning.brick_points;

            let center_x = self.ball.pos.x + BALL_SIZE / 2;
            reflect_off_brick(center_x, &brick, &mut self.ball.vel);

            if self.bricks.is_empty() {
                log::info!("breaker: cleared the wall, score {}", self.score);
                return RoundOutcome::Won;
            }
            return RoundOutcome::Continue;
        }
        RoundOutcome::Continue
    }

    /// Cheat: clear every remaining brick and award its points.
    pub fn clear_all_bricks(&mut self, tuning: &Tuning) {
        for index in 0..self.bricks.len() {
            if self.bricks.clear_at(index) {
                self.score += tuning.brick_points;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use proptest::prelude::*;

    fn fresh() -> (BreakerState, Tuning) {
        let tuning = Tuning::default();
        let breaker = BreakerState::new(&tuning);
        (breaker, tuning)
    }

    /// Park the ball where nothing interacts for isolated checks.
    fn park(breaker: &mut BreakerState, pos: IVec2, vel: IVec2) {
        breaker.ball.pos = pos;
        breaker.ball.vel = vel;
    }

    #[test]
    fn test_paddle_mapping_covers_travel() {
        let (mut breaker, _) = fresh();
        breaker.track_paddle(0);
        assert_eq!(breaker.paddle_x, 0);
        breaker.track_paddle(1023);
        assert_eq!(breaker.paddle_x, DISPLAY_WIDTH - PADDLE_W);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_bounds(stick in 0u16..=1023) {
            let (mut breaker, _) = fresh();
            breaker.track_paddle(stick);
            prop_assert!(breaker.paddle_x >= 0);
            prop_assert!(breaker.paddle_x <= DISPLAY_WIDTH - PADDLE_W);
        }
    }

    #[test]
    fn test_wall_reflection() {
        let (mut breaker, tuning) = fresh();
        park(&mut breaker, IVec2::new(1, 20), IVec2::new(-1, 0));
        breaker.update(&tuning);
        assert_eq!(breaker.ball.vel.x, 1);

        park(
            &mut breaker,
            IVec2::new(DISPLAY_WIDTH - BALL_SIZE - 1, 20),
            IVec2::new(1, 0),
        );
        breaker.update(&tuning);
        assert_eq!(breaker.ball.vel.x, -1);
    }

    #[test]
    fn test_ceiling_reflection() {
        let (mut breaker, tuning) = fresh();
        park(&mut breaker, IVec2::new(58, 1), IVec2::new(0, -1));
        breaker.update(&tuning);
        assert_eq!(breaker.ball.vel.y, 1);
    }

    #[test]
    fn test_paddle_contact_reflects_and_steers() {
        let (mut breaker, tuning) = fresh();
        breaker.paddle_x = 50;
        // Hit well right of the paddle center (center 57): delta +6
        park(
            &mut breaker,
            IVec2::new(62, DISPLAY_HEIGHT - PADDLE_H - BALL_SIZE - 1),
            IVec2::new(0, 1),
        );
        breaker.update(&tuning);
        assert_eq!(breaker.ball.vel.y, -1);
        assert_eq!(breaker.ball.vel.x, 2, "delta 6 / divisor 3 = 2");

        // Dead-center hit keeps the rebound vertical
        breaker.paddle_x = 50;
        park(
            &mut breaker,
            IVec2::new(56, DISPLAY_HEIGHT - PADDLE_H - BALL_SIZE - 1),
            IVec2::new(0, 1),
        );
        breaker.update(&tuning);
        assert_eq!(breaker.ball.vel.y, -1);
        assert_eq!(breaker.ball.vel.x, 0);
    }

    #[test]
    fn test_steering_clamped_to_max() {
        let (mut breaker, mut tuning) = fresh();
        // A sharper divisor would launch the ball sideways without the clamp
        tuning.angle_divisor = 1;
        breaker.paddle_x = 50;
        // Edge hit: delta 8, clamped down to the symmetric max
        park(
            &mut breaker,
            IVec2::new(63, DISPLAY_HEIGHT - PADDLE_H - BALL_SIZE - 1),
            IVec2::new(1, 1),
        );
        breaker.update(&tuning);
        assert_eq!(breaker.ball.vel.x, tuning.max_ball_vx);
    }

    #[test]
    fn test_ball_drop_loses_round() {
        let (mut breaker, tuning) = fresh();
        breaker.paddle_x = 0;
        park(
            &mut breaker,
            IVec2::new(100, DISPLAY_HEIGHT - 1),
            IVec2::new(0, 1),
        );
        assert_eq!(breaker.update(&tuning), RoundOutcome::Lost);
    }

    #[test]
    fn test_face_hit_reflects_vy() {
        let (mut breaker, tuning) = fresh();
        let target = BrickGrid::rect_of(BRICK_COLS + 2); // second row
        // Ball center inside the brick's horizontal span, rising into it
        park(
            &mut breaker,
            IVec2::new(target.x + 4, target.y + target.h),
            IVec2::new(0, -1),
        );
        breaker.update(&tuning);
        assert_eq!(breaker.ball.vel.y, 1);
        assert_eq!(breaker.ball.vel.x, 0);
        assert_eq!(breaker.score, tuning.brick_points);
    }

    #[test]
    fn test_reflection_rule_side_vs_face() {
        let brick = Rect::new(20, 10, 10, 4);

        // Center inside the span: face hit, vy flips
        let mut vel = IVec2::new(1, -1);
        reflect_off_brick(25, &brick, &mut vel);
        assert_eq!(vel, IVec2::new(1, 1));

        // Center left of the span: side hit, vx flips
        let mut vel = IVec2::new(1, -1);
        reflect_off_brick(19, &brick, &mut vel);
        assert_eq!(vel, IVec2::new(-1, -1));

        // Center right of the span: side hit
        let mut vel = IVec2::new(-2, 1);
        reflect_off_brick(31, &brick, &mut vel);
        assert_eq!(vel, IVec2::new(2, 1));

        // Exactly on a span edge counts as a face hit
        let mut vel = IVec2::new(1, -1);
        reflect_off_brick(20, &brick, &mut vel);
        assert_eq!(vel, IVec2::new(1, 1));
    }

    #[test]
    fn test_one_brick_resolved_then_stays_cleared() {
        let (mut breaker, tuning) = fresh();
        let target = BrickGrid::rect_of(3);
        park(
            &mut breaker,
            IVec2::new(target.x + 4, target.y + 1),
            IVec2::new(0, 0),
        );
        breaker.update(&tuning);
        assert_eq!(breaker.score, tuning.brick_points);
        assert_eq!(breaker.bricks.live(), TOTAL_BRICKS - 1);

        // The parked ball still sits in the cleared cell: nothing more
        // to resolve, the brick stays gone
        breaker.update(&tuning);
        assert_eq!(breaker.score, tuning.brick_points);
        assert_eq!(breaker.bricks.live(), TOTAL_BRICKS - 1);
    }

    #[test]
    fn test_clearing_all_bricks_wins_with_full_score() {
        let (mut breaker, tuning) = fresh();
        let mut outcome = RoundOutcome::Continue;
        for index in 0..TOTAL_BRICKS {
            assert_eq!(outcome, RoundOutcome::Continue);
            let brick = BrickGrid::rect_of(index);
            // Drop the stationary ball onto each brick in turn
            park(
                &mut breaker,
                IVec2::new(brick.x + 4, brick.y + 1),
                IVec2::new(0, 0),
            );
            outcome = breaker.update(&tuning);
        }
        assert_eq!(outcome, RoundOutcome::Won);
        assert_eq!(breaker.bricks.live(), 0);
        assert_eq!(breaker.score, TOTAL_BRICKS as u32 * tuning.brick_points);
    }

    #[test]
    fn test_cheat_clears_everything() {
        let (mut breaker, tuning) = fresh();
        breaker.bricks.clear_at(0);
        breaker.score = 0;
        breaker.clear_all_bricks(&tuning);
        assert_eq!(breaker.bricks.live(), 0);
        assert_eq!(breaker.score, (TOTAL_BRICKS as u32 - 1) * tuning.brick_points);
    }
}
