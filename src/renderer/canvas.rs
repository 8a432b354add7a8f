//! 2D canvas backend
//!
//! The canvas keeps a fixed 360×640 backing store; CSS scales it to the page.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::DrawCmd;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Paints draw lists onto a canvas element
pub struct CanvasRenderer {
    ctx: Option<CanvasRenderingContext2d>,
}

impl CanvasRenderer {
    /// Size the canvas and grab its 2D context. A missing context is not an
    /// error: every later draw is skipped.
    pub fn new(canvas: &HtmlCanvasElement) -> Self {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            log::warn!("2D context unavailable, rendering disabled");
        }
        Self { ctx }
    }

    /// Execute a draw list
    pub fn render(&self, cmds: &[DrawCmd]) {
        let Some(ctx) = &self.ctx else {
            return;
        };

        for cmd in cmds {
            match cmd {
                DrawCmd::Background { top, bottom } => {
                    let gradient =
                        ctx.create_linear_gradient(0.0, 0.0, 0.0, CANVAS_HEIGHT as f64);
                    let _ = gradient.add_color_stop(0.0, &top.css(1.0));
                    let _ = gradient.add_color_stop(1.0, &bottom.css(1.0));
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
                }
                DrawCmd::Rect {
                    pos,
                    size,
                    color,
                    alpha,
                } => {
                    ctx.set_fill_style_str(&color.css(*alpha));
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
            }
        }
    }
}
