/*
 * Renderer Module
 *
 * This module draws the particle simulation: particles with their optional
 * glow, the optional spatial grid overlay, and the HUD with rate counters,
 * tunables and the interaction matrix.
 *
 * Simulation space has its origin in the top-left corner with y growing
 * downwards; nannou draws around the window center with y growing upwards.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::debug::{Diagnostics, Swatch};
use crate::particle::Particle;

const GLOW_SCALE: f32 = 15.0;
const GLOW_ALPHA: u8 = 15;
const SWATCH_SIZE: f32 = 21.0;
const HUD_WIDTH: f32 = 74.0;
const LINE_HEIGHT: f32 = 20.0;

// Convert a simulation position to screen space
#[inline]
fn to_screen(x: f64, y: f64, window_rect: Rect) -> Point2 {
    pt2(
        window_rect.left() + x as f32,
        window_rect.top() - y as f32,
    )
}

#[inline]
fn rgba_of(swatch: Swatch) -> Rgba8 {
    rgba8(swatch[0], swatch[1], swatch[2], swatch[3])
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();

    for particle in model.engine.particles() {
        draw_particle(&draw, particle, window_rect);
    }

    if model.show_grid {
        draw_grid(&draw, model, window_rect);
    }

    let diagnostics = Diagnostics::capture(&model.engine);
    draw_hud(&draw, model, &diagnostics, window_rect);

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn draw_particle(draw: &Draw, particle: &Particle, window_rect: Rect) {
    let [r, g, b] = particle.color();
    let center = to_screen(particle.position.x, particle.position.y, window_rect);
    let radius = particle.radius as f32;

    draw.ellipse().xy(center).radius(radius).color(rgb8(r, g, b));

    // Expensive with many particles
    if particle.glow {
        draw.ellipse()
            .xy(center)
            .radius(radius * GLOW_SCALE)
            .color(rgba8(r, g, b, GLOW_ALPHA));
    }
}

fn draw_grid(draw: &Draw, model: &Model, window_rect: Rect) {
    let layout = model.engine.grid().layout();
    let cell = layout.cell_size();
    let domain = layout.domain();

    for col in 0..=layout.cols() {
        let x = (col as f64 * cell).min(domain.x);
        draw.line()
            .start(to_screen(x, 0.0, window_rect))
            .end(to_screen(x, domain.y, window_rect))
            .weight(1.0)
            .color(WHITE);
    }
    for row in 0..=layout.rows() {
        let y = (row as f64 * cell).min(domain.y);
        draw.line()
            .start(to_screen(0.0, y, window_rect))
            .end(to_screen(domain.x, y, window_rect))
            .weight(1.0)
            .color(WHITE);
    }
}

fn draw_hud(draw: &Draw, model: &Model, diagnostics: &Diagnostics, window_rect: Rect) {
    let right = window_rect.right();
    let top = window_rect.top();

    // Background panel behind the text
    let lines = 6;
    let panel_height = LINE_HEIGHT * lines as f32 + 6.0;
    draw.rect()
        .x_y(right - HUD_WIDTH / 2.0, top - panel_height / 2.0)
        .w_h(HUD_WIDTH, panel_height)
        .color(rgba8(60, 60, 60, 80));

    let counters = [
        format!("FPS: {}", model.debug_info.fps),
        format!("UPS: {}", model.debug_info.ups),
    ];
    let text_x = right - HUD_WIDTH / 2.0;
    for (i, text) in counters.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, top - LINE_HEIGHT * (i as f32 + 1.0))
            .w(HUD_WIDTH)
            .left_justify()
            .color(GREEN)
            .font_size(12);
    }
    for (i, text) in diagnostics.hud_lines().iter().enumerate() {
        draw.text(text)
            .x_y(text_x, top - LINE_HEIGHT * (i as f32 + 3.0))
            .w(HUD_WIDTH)
            .left_justify()
            .color(WHITE)
            .font_size(12);
    }

    // Interaction matrix, row i = group feeling the force
    let start_x = right - 200.0 - HUD_WIDTH;
    let groups = diagnostics.group_count;
    for row in 0..groups {
        for col in 0..groups {
            draw.rect()
                .x_y(
                    start_x + (col as f32 + 0.5) * SWATCH_SIZE,
                    top - (row as f32 + 0.5) * SWATCH_SIZE,
                )
                .w_h(SWATCH_SIZE, SWATCH_SIZE)
                .color(rgba_of(diagnostics.swatch(row, col)));
        }
    }
}
