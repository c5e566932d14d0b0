use crate::algorithms::cycles::Trace;
use crate::geometry::cubic::CubicBezier;
use crate::model::Vec2;
use crate::params::{CrossMode, StanchionParams};
use crate::render::{BORDER_WIDTH_FACTOR, CYCLE_COLORS, PALETTE};
use crate::Graph;

pub const EXPORT_FILENAME: &str = "moebius_stanchions.svg";
pub const VIEWBOX_SIZE: f32 = 600.0;

// Stacking levels of a double-path export, bottom first.
pub const Z_UNDER: usize = 0;
pub const Z_BORDER: usize = 1;
pub const Z_OVER: usize = 2;
pub const Z_TOP: usize = 3;
pub const Z_LEVELS: usize = 4;

/// Path data accumulated while tracing, grouped for export.
#[derive(Clone, Debug, Default)]
pub struct SvgLayers {
    /// `by_color[color][z]`.
    by_color: [[String; Z_LEVELS]; CYCLE_COLORS],
    /// Black borders under every over-crossing.
    border: String,
    /// One complete path per walk, in walk order. Only filled in cut mode.
    pub walks: Vec<(usize, String)>,
}

impl SvgLayers {
    pub fn push(&mut self, color: usize, z: usize, d: &str) {
        append(&mut self.by_color[color % PALETTE.len()][z.min(Z_LEVELS - 1)], d);
    }

    pub fn push_border(&mut self, d: &str) {
        append(&mut self.border, d);
    }

    pub fn layer(&self, color: usize, z: usize) -> &str {
        &self.by_color[color % PALETTE.len()][z.min(Z_LEVELS - 1)]
    }

    pub fn border(&self) -> &str {
        &self.border
    }
}

fn append(target: &mut String, d: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(d);
}

pub fn line_d(a: Vec2, b: Vec2) -> String {
    format!("M {} {} L {} {}", a.x, a.y, b.x, b.y)
}

pub fn bezier_d(c: &CubicBezier) -> String {
    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        c.p0.x, c.p0.y, c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y
    )
}

fn stroked_path(d: &str, width: f32, color: &str) -> String {
    format!(
        "<path d=\"{}\" style=\"fill:none;stroke:{};stroke-width:{};stroke-linecap:round;stroke-linejoin:round\" />\n",
        d, color, width
    )
}

fn classed_path(d: &str, class: &str) -> String {
    if d.is_empty() {
        return String::new();
    }
    format!("<path d=\"{}\" class=\"{}\" />\n", d, class)
}

fn style_block(width: f32) -> String {
    let mut s = String::from("<style>\n");
    s.push_str(&format!(
        "  .crossBorder {{ fill: none; stroke-linejoin: round; stroke-linecap: butt; stroke-width: {}; stroke: black; }}\n",
        width * BORDER_WIDTH_FACTOR
    ));
    for (i, c) in PALETTE.iter().enumerate() {
        s.push_str(&format!(
            "  .cycle{} {{ fill: none; stroke-linejoin: round; stroke-linecap: round; stroke-width: {}; stroke: {}; }}\n",
            i,
            width,
            c.css()
        ));
    }
    s.push_str("</style>\n");
    s
}

/// Standalone SVG document: black background, the straight links in white,
/// then the traced stanchions.
pub fn export_document(g: &Graph, trace: &Trace, params: &StanchionParams) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {0} {0}\" preserveAspectRatio=\"xMidYMid meet\">\n",
        VIEWBOX_SIZE
    ));
    out.push_str(&style_block(params.width));
    out.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{0}\" height=\"{0}\" style=\"fill:black\" />\n",
        VIEWBOX_SIZE
    ));

    out.push_str("<g id=\"glinks\">\n");
    for (_, link) in g.links() {
        if let (Some(a), Some(b)) = (g.get_vertex(link.a), g.get_vertex(link.b)) {
            out.push_str(&stroked_path(&line_d(a, b), params.width, "white"));
        }
    }
    out.push_str("</g>\n");

    match params.cross_mode {
        CrossMode::Cut => {
            for (color, d) in &trace.layers.walks {
                out.push_str(&stroked_path(d, params.width, PALETTE[color % PALETTE.len()].css()));
            }
        }
        CrossMode::DoublePath => {
            for z in 0..Z_LEVELS {
                out.push_str(&format!("<!-- z-level {} -->\n", z));
                if z == Z_BORDER {
                    out.push_str(&classed_path(trace.layers.border(), "crossBorder"));
                }
                for color in 0..PALETTE.len() {
                    out.push_str(&classed_path(trace.layers.layer(color, z), &format!("cycle{}", color)));
                }
            }
        }
    }
    out.push_str("</svg>\n");
    out
}
