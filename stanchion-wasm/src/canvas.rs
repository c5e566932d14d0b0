//! Replays stanchion draw commands on a 2D canvas context.
//!
//! This is the only place that touches [`web_sys::CanvasRenderingContext2d`].

use stanchion::{DrawCommand, View};
use web_sys::CanvasRenderingContext2d;

/// Draw every command in order, each as its own stroked path.
pub fn draw(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand], view: &View) {
    ctx.save();
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    for cmd in commands {
        draw_command(ctx, &cmd.in_view(view));
    }
    ctx.restore();
}

fn draw_command(ctx: &CanvasRenderingContext2d, cmd: &DrawCommand) {
    ctx.set_stroke_style_str(cmd.color().css());
    ctx.set_line_width(f64::from(cmd.width()));
    ctx.begin_path();
    match cmd {
        DrawCommand::Line { from, to, .. } => {
            ctx.move_to(f64::from(from.x), f64::from(from.y));
            ctx.line_to(f64::from(to.x), f64::from(to.y));
        }
        DrawCommand::Bezier { curve, .. } => {
            ctx.move_to(f64::from(curve.p0.x), f64::from(curve.p0.y));
            ctx.bezier_curve_to(
                f64::from(curve.p1.x),
                f64::from(curve.p1.y),
                f64::from(curve.p2.x),
                f64::from(curve.p2.y),
                f64::from(curve.p3.x),
                f64::from(curve.p3.y),
            );
        }
    }
    ctx.stroke();
}
