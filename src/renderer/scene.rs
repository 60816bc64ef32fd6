//! Frame assembly
//!
//! Turns the game state into one vertex list per frame: background grid,
//! bricks and paddle with faceted edge bevels, ball with a highlight, and
//! the per-frame jitter lines that sell the low-poly look.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, from_rgb8, shaded};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::settings::Settings;
use crate::sim::{Ball, Brick, GameState, Paddle};

/// Brightness offset for the lit/shadowed bevels
const BEVEL_SHADE: i16 = 40;
/// Bevel inset on bricks
const BRICK_BEVEL: f32 = 3.0;
/// Bevel inset on the paddle
const PADDLE_BEVEL: f32 = 5.0;
/// Background grid cell size
const GRID_STEP: f32 = 20.0;
/// Jitter lines per frame
const JITTER_LINES: u32 = 10;
/// Segments for the ball circle - deliberately coarse
const BALL_SEGMENTS: u32 = 12;

/// Build the vertex list for one frame. `frame` only seeds the jitter so
/// the sim RNG is never consumed by rendering.
pub fn build_frame(state: &GameState, frame: u64, settings: &Settings) -> Vec<Vertex> {
    let mut verts = Vec::with_capacity(2048);

    if settings.grid {
        push_grid(&mut verts);
    }

    for brick in state.bricks.iter().filter(|b| b.visible) {
        push_brick(&mut verts, brick);
    }
    push_paddle(&mut verts, &state.paddle);
    push_ball(&mut verts, &state.ball);

    if settings.jitter {
        push_jitter(&mut verts, frame);
    }

    verts
}

fn push_grid(verts: &mut Vec<Vertex>) {
    let mut x = 0.0;
    while x <= SCREEN_WIDTH {
        verts.extend(shapes::line(
            Vec2::new(x, 0.0),
            Vec2::new(x, SCREEN_HEIGHT),
            1.0,
            colors::DARK_GRAY,
        ));
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y <= SCREEN_HEIGHT {
        verts.extend(shapes::line(
            Vec2::new(0.0, y),
            Vec2::new(SCREEN_WIDTH, y),
            1.0,
            colors::DARK_GRAY,
        ));
        y += GRID_STEP;
    }
}

/// Base rect plus two inset trapezoids: the top edge catches the light,
/// the bottom edge falls into shadow
fn push_brick(verts: &mut Vec<Vertex>, brick: &Brick) {
    let rgb = brick.color.rgb();
    let size = Vec2::new(brick.width, brick.height);
    verts.extend(shapes::rect(brick.pos, size, from_rgb8(rgb)));

    verts.extend(bevel_top(brick.pos, size, BRICK_BEVEL, shaded(rgb, BEVEL_SHADE)));
    verts.extend(bevel_bottom(brick.pos, size, BRICK_BEVEL, shaded(rgb, -BEVEL_SHADE)));
}

fn push_paddle(verts: &mut Vec<Vertex>, paddle: &Paddle) {
    let size = Vec2::new(paddle.width, paddle.height);
    verts.extend(shapes::rect(paddle.pos, size, colors::LIGHT_GRAY));

    verts.extend(bevel_top(paddle.pos, size, PADDLE_BEVEL, colors::WHITE));
    verts.extend(bevel_bottom(paddle.pos, size, PADDLE_BEVEL, colors::DARK_GRAY));
}

/// Coarse circle plus a small highlight offset toward the light
fn push_ball(verts: &mut Vec<Vertex>, ball: &Ball) {
    verts.extend(shapes::circle(ball.pos, ball.radius, colors::WHITE, BALL_SEGMENTS));

    let offset = ball.radius / 3.0;
    verts.extend(shapes::circle(
        ball.pos - Vec2::splat(offset),
        offset,
        colors::LIGHT_GRAY,
        8,
    ));
}

/// Short random-looking scratch lines, re-rolled every frame from an
/// integer hash of the frame counter
fn push_jitter(verts: &mut Vec<Vertex>, frame: u64) {
    for i in 0..JITTER_LINES {
        let h = hash(frame as u32 ^ (i.wrapping_mul(7919)));
        let from = Vec2::new(
            (h % SCREEN_WIDTH as u32) as f32,
            ((h >> 9) % SCREEN_HEIGHT as u32) as f32,
        );
        let to = from
            + Vec2::new(
                ((h >> 18) % 21) as f32 - 10.0,
                ((h >> 23) % 21) as f32 - 10.0,
            );
        verts.extend(shapes::line(from, to, 1.0, colors::DARK_GRAY));
    }
}

/// Golden-ratio integer hash
fn hash(n: u32) -> u32 {
    n.wrapping_mul(2654435761)
}

fn bevel_top(pos: Vec2, size: Vec2, inset: f32, color: [f32; 4]) -> Vec<Vertex> {
    shapes::quad(
        [
            pos,
            pos + Vec2::new(size.x, 0.0),
            pos + Vec2::new(size.x - inset, inset),
            pos + Vec2::new(inset, inset),
        ],
        color,
    )
}

fn bevel_bottom(pos: Vec2, size: Vec2, inset: f32, color: [f32; 4]) -> Vec<Vertex> {
    shapes::quad(
        [
            pos + Vec2::new(0.0, size.y),
            pos + Vec2::new(size.x, size.y),
            pos + Vec2::new(size.x - inset, size.y - inset),
            pos + Vec2::new(inset, size.y - inset),
        ],
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_hidden_bricks_are_not_drawn() {
        let mut state = GameState::new(1);
        let settings = Settings::default();

        let full = build_frame(&state, 0, &settings).len();
        for brick in &mut state.bricks {
            brick.visible = false;
        }
        let empty_wall = build_frame(&state, 0, &settings).len();

        // 18 vertices per brick: base rect plus two bevels
        assert_eq!(full - empty_wall, state.bricks.len() * 18);
    }

    #[test]
    fn test_jitter_changes_between_frames() {
        let state = GameState::new(1);
        let settings = Settings::default();

        let a = build_frame(&state, 1, &settings);
        let b = build_frame(&state, 2, &settings);
        assert_eq!(a.len(), b.len());
        assert!(
            a.iter()
                .zip(&b)
                .any(|(va, vb)| va.position != vb.position)
        );
    }

    #[test]
    fn test_effects_can_be_disabled() {
        let state = GameState::new(1);
        let mut settings = Settings::default();
        let full = build_frame(&state, 0, &settings).len();

        settings.grid = false;
        settings.jitter = false;
        let bare = build_frame(&state, 0, &settings).len();
        assert!(bare < full);
    }
}
