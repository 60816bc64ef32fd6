//! Collision detection and response for the flat playfield
//!
//! Pure predicates over ball/paddle/brick geometry plus the paddle rebound
//! law. The tick decides what to do with a hit; nothing here mutates state.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};
use crate::consts::{PADDLE_REBOUND_SPEED, SCREEN_HEIGHT};

/// True when the descending ball has reached the paddle's top surface
/// within its horizontal span. The downward-velocity requirement keeps a
/// freshly rebounded ball from being caught again on the next tick.
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.vel.y > 0.0
        && ball.pos.y + ball.radius >= paddle.pos.y
        && ball.pos.x >= paddle.pos.x
        && ball.pos.x <= paddle.pos.x + paddle.width
}

/// Where across the paddle width the ball struck: 0 at the left edge,
/// 1 at the right edge
pub fn strike_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    ((ball.pos.x - paddle.pos.x) / paddle.width).clamp(0.0, 1.0)
}

/// Rebound velocity for a paddle strike. The strike offset maps to an
/// angle across a half circle: edge hits deflect sharply sideways, a
/// center hit goes straight up. Vertical speed keeps its magnitude and is
/// always upward afterwards.
pub fn paddle_rebound(offset: f32, vel: Vec2) -> Vec2 {
    let angle = offset * PI - FRAC_PI_2;
    Vec2::new(PADDLE_REBOUND_SPEED * angle.sin(), -vel.y.abs())
}

/// True when the ball's center column falls inside a visible brick and
/// the brick's vertical span overlaps the ball's collision band (center
/// plus/minus radius)
pub fn ball_hits_brick(ball: &Ball, brick: &Brick) -> bool {
    brick.visible
        && ball.pos.x >= brick.pos.x
        && ball.pos.x <= brick.pos.x + brick.width
        && ball.pos.y - ball.radius <= brick.pos.y + brick.height
        && ball.pos.y + ball.radius >= brick.pos.y
}

/// True once the ball has fallen past the bottom of the screen
pub fn out_of_bounds(ball: &Ball) -> bool {
    ball.pos.y > SCREEN_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;
    use crate::sim::state::BrickColor;

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            radius: BALL_RADIUS,
        }
    }

    fn brick_at(x: f32, y: f32) -> Brick {
        Brick {
            pos: Vec2::new(x, y),
            width: 50.0,
            height: 20.0,
            color: BrickColor::Red,
            visible: true,
        }
    }

    #[test]
    fn test_paddle_hit_requires_descent() {
        let paddle = Paddle::default();
        let x = paddle.pos.x + paddle.width / 2.0;
        let y = paddle.pos.y - 2.0;

        assert!(ball_hits_paddle(&ball_at(x, y, 3.0, 4.0), &paddle));
        // Same position but rising: no catch
        assert!(!ball_hits_paddle(&ball_at(x, y, 3.0, -4.0), &paddle));
        // Outside the horizontal span: no catch
        assert!(!ball_hits_paddle(
            &ball_at(paddle.pos.x - 1.0, y, 3.0, 4.0),
            &paddle
        ));
    }

    #[test]
    fn test_strike_offset_spans_paddle() {
        let paddle = Paddle::default();
        let y = paddle.pos.y;

        let left = strike_offset(&ball_at(paddle.pos.x, y, 0.0, 4.0), &paddle);
        let mid = strike_offset(&ball_at(paddle.pos.x + paddle.width / 2.0, y, 0.0, 4.0), &paddle);
        let right = strike_offset(&ball_at(paddle.pos.x + paddle.width, y, 0.0, 4.0), &paddle);

        assert_eq!(left, 0.0);
        assert!((mid - 0.5).abs() < 1e-6);
        assert_eq!(right, 1.0);
    }

    #[test]
    fn test_rebound_left_center_right() {
        let incoming = Vec2::new(2.0, 4.0);

        let left = paddle_rebound(0.0, incoming);
        let center = paddle_rebound(0.5, incoming);
        let right = paddle_rebound(1.0, incoming);

        // Left edge sends the ball sharply left, right edge sharply right
        assert!((left.x + PADDLE_REBOUND_SPEED).abs() < 1e-5);
        assert!((right.x - PADDLE_REBOUND_SPEED).abs() < 1e-5);
        // Center hit goes straight up
        assert!(center.x.abs() < 1e-5);
        // Rebound is always upward with the incoming vertical magnitude
        for v in [left, center, right] {
            assert_eq!(v.y, -4.0);
        }
    }

    #[test]
    fn test_rebound_upward_regardless_of_incoming_sign() {
        // Even a (nonsensical) upward incoming velocity stays upward
        assert!(paddle_rebound(0.3, Vec2::new(0.0, -4.0)).y < 0.0);
        assert!(paddle_rebound(0.3, Vec2::new(0.0, 4.0)).y < 0.0);
    }

    #[test]
    fn test_brick_band_overlap() {
        let brick = brick_at(300.0, 100.0);

        // Center below the brick, band still reaching it
        assert!(ball_hits_brick(&ball_at(310.0, 126.0, 0.0, -4.0), &brick));
        // Band entirely below the brick
        assert!(!ball_hits_brick(&ball_at(310.0, 129.0, 0.0, -4.0), &brick));
        // Center column outside the brick, even though the band overlaps
        assert!(!ball_hits_brick(&ball_at(351.0, 110.0, 0.0, -4.0), &brick));
    }

    #[test]
    fn test_hidden_brick_never_collides() {
        let mut brick = brick_at(300.0, 100.0);
        let ball = ball_at(310.0, 110.0, 0.0, 4.0);
        assert!(ball_hits_brick(&ball, &brick));

        brick.visible = false;
        assert!(!ball_hits_brick(&ball, &brick));
    }

    #[test]
    fn test_out_of_bounds_is_bottom_only() {
        assert!(out_of_bounds(&ball_at(300.0, SCREEN_HEIGHT + 1.0, 0.0, 4.0)));
        assert!(!out_of_bounds(&ball_at(300.0, SCREEN_HEIGHT, 0.0, 4.0)));
        assert!(!out_of_bounds(&ball_at(300.0, -50.0, 0.0, -4.0)));
    }
}
