//! Immediate-mode draw commands produced by the cycle tracer.
//!
//! Commands are plain data in board coordinates. Whatever surface is active
//! (the live canvas in the wasm crate, tests here) replays them in order.

use serde::Serialize;

use crate::geometry::cubic::CubicBezier;
use crate::model::Vec2;

/// Colours a stanchion stroke can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeColor {
    White,
    Red,
    Blue,
    Green,
    Black,
}

impl StrokeColor {
    pub fn css(self) -> &'static str {
        match self {
            StrokeColor::White => "white",
            StrokeColor::Red => "red",
            StrokeColor::Blue => "blue",
            StrokeColor::Green => "green",
            StrokeColor::Black => "black",
        }
    }
}

pub const CYCLE_COLORS: usize = 4;

/// Successive cycles take successive colours, wrapping around.
pub const PALETTE: [StrokeColor; CYCLE_COLORS] =
    [StrokeColor::White, StrokeColor::Red, StrokeColor::Blue, StrokeColor::Green];

/// Border strokes under an over-crossing are this many times wider.
pub const BORDER_WIDTH_FACTOR: f32 = 3.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawCommand {
    Line { from: Vec2, to: Vec2, color: StrokeColor, width: f32 },
    Bezier { curve: CubicBezier, color: StrokeColor, width: f32 },
}

impl DrawCommand {
    pub fn color(&self) -> StrokeColor {
        match self {
            DrawCommand::Line { color, .. } | DrawCommand::Bezier { color, .. } => *color,
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            DrawCommand::Line { width, .. } | DrawCommand::Bezier { width, .. } => *width,
        }
    }

    /// Same command expressed in canvas pixels.
    pub fn in_view(&self, view: &View) -> DrawCommand {
        match *self {
            DrawCommand::Line { from, to, color, width } => DrawCommand::Line {
                from: view.to_canvas(from),
                to: view.to_canvas(to),
                color,
                width: width * view.zoom,
            },
            DrawCommand::Bezier { curve, color, width } => DrawCommand::Bezier {
                curve: CubicBezier::new(
                    view.to_canvas(curve.p0),
                    view.to_canvas(curve.p1),
                    view.to_canvas(curve.p2),
                    view.to_canvas(curve.p3),
                ),
                color,
                width: width * view.zoom,
            },
        }
    }
}

/// Camera of the board: canvas = board * zoom + camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub camera: Vec2,
    pub zoom: f32,
}

impl Default for View {
    fn default() -> Self {
        View { camera: Vec2::ZERO, zoom: 1.0 }
    }
}

impl View {
    pub fn to_canvas(&self, p: Vec2) -> Vec2 {
        p * self.zoom + self.camera
    }
}
