//! Cycle tracing over the combinatorial map.
//!
//! A step crosses a link from the current quarter point to the opposite side
//! at the far end (`edge`, then `interior`), then turns the corner there to
//! the next link (`jump`). Every step emits draw commands and feeds the SVG
//! layers. A walk closes when it turns back onto its starting quarter point.

use serde::Serialize;
use tracing::{debug, error};

use crate::algorithms::combinatorial_map::CombinatorialMap;
use crate::error::{Adjacency, Result, StanchionError};
use crate::geometry::cubic::CubicBezier;
use crate::model::Vec2;
use crate::params::{CrossMode, StanchionParams};
use crate::quarter::{QpId, QuarterPoint};
use crate::render::{DrawCommand, StrokeColor, BORDER_WIDTH_FACTOR, PALETTE};
use crate::svg::{bezier_d, line_d, SvgLayers, Z_OVER, Z_TOP, Z_UNDER};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cycle {
    /// Index into [`PALETTE`].
    pub color: usize,
    /// Quarter points of this walk in order: each crossing adds the point it
    /// leaves from, then the point it arrives at.
    pub quarter_points: Vec<QpId>,
}

impl Cycle {
    pub fn stroke(&self) -> StrokeColor {
        PALETTE[self.color % PALETTE.len()]
    }
}

#[derive(Clone, Debug, Default)]
pub struct Trace {
    pub cycles: Vec<Cycle>,
    pub commands: Vec<DrawCommand>,
    pub layers: SvgLayers,
}

struct Walk<'a> {
    trace: &'a mut Trace,
    color: usize,
    stroke: StrokeColor,
    width: f32,
    d: String,
}

impl Walk<'_> {
    fn line(&mut self, from: Vec2, to: Vec2) {
        self.trace.commands.push(DrawCommand::Line { from, to, color: self.stroke, width: self.width });
        self.trace.layers.push(self.color, Z_TOP, &line_d(from, to));
        self.d.push_str(&format!(" L {} {}", to.x, to.y));
    }

    fn curve(&mut self, curve: CubicBezier) {
        self.trace.commands.push(DrawCommand::Bezier { curve, color: self.stroke, width: self.width });
    }

    /// The crossing of the link from `cur` to `next`, which sits at the other
    /// end on the other side. Odd quarter points carry the under strand, even
    /// ones the over strand.
    fn crossing(&mut self, cur: &QuarterPoint, next: &QuarterPoint, mode: CrossMode) {
        let full = CubicBezier::new(
            cur.quarter_edge_point,
            cur.quarter_edge_cp,
            next.quarter_edge_cp,
            next.quarter_edge_point,
        );
        if !cur.is_even() {
            match mode {
                CrossMode::DoublePath => {
                    self.curve(full);
                    self.d.push_str(&cubic_tail(&full));
                }
                CrossMode::Cut => {
                    let before = CubicBezier::new(
                        cur.quarter_edge_point,
                        cur.quarter_edge_cp,
                        cur.middle_edge_cp,
                        cur.middle_edge_point,
                    );
                    let after = CubicBezier::new(
                        next.middle_edge_point,
                        next.middle_edge_cp,
                        next.quarter_edge_cp,
                        next.quarter_edge_point,
                    );
                    self.curve(before);
                    self.curve(after);
                    self.d.push_str(&cubic_tail(&before));
                    self.d.push_str(&format!(" M {} {}", after.p0.x, after.p0.y));
                    self.d.push_str(&cubic_tail(&after));
                }
            }
            self.trace.layers.push(self.color, Z_UNDER, &bezier_d(&full));
        } else {
            if mode == CrossMode::DoublePath {
                self.trace.commands.push(DrawCommand::Bezier {
                    curve: full,
                    color: StrokeColor::Black,
                    width: self.width * BORDER_WIDTH_FACTOR,
                });
            }
            self.curve(full);
            self.d.push_str(&cubic_tail(&full));
            self.trace.layers.push_border(&bezier_d(&full));
            self.trace.layers.push(self.color, Z_OVER, &bezier_d(&full));
        }
    }

    /// Arc hugging the vertex from `from` to its jump partner `to`.
    fn turn(&mut self, from: &QuarterPoint, to: &QuarterPoint) {
        let arc = CubicBezier::new(from.pos, from.cp, to.cp, to.pos);
        self.curve(arc);
        self.trace.layers.push(self.color, Z_TOP, &bezier_d(&arc));
        self.d.push_str(&cubic_tail(&arc));
    }
}

fn cubic_tail(c: &CubicBezier) -> String {
    format!(" C {} {}, {} {}, {} {}", c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y)
}

/// Marks `id` as reached by the current walk. Reaching a point twice means
/// the adjacencies do not pair up, so the walk would never close.
fn visit(visited: &mut [bool], members: &mut Vec<QpId>, id: QpId, via: Adjacency) -> Result<()> {
    if visited[id as usize] {
        error!(qp = id, %via, "quarter point reached twice while tracing");
        return Err(StanchionError::MalformedAdjacency { qp: id, adjacency: via });
    }
    visited[id as usize] = true;
    members.push(id);
    Ok(())
}

/// Walk every cycle of `map`, in id order of the first unvisited quarter
/// point. Fails on the first dangling adjacency or on a walk that runs into
/// another walk instead of closing.
pub fn trace_cycles(map: &CombinatorialMap, params: &StanchionParams) -> Result<Trace> {
    let mut trace = Trace::default();
    let mut visited = vec![false; map.len()];
    let mut color = 0usize;

    for start in map.iter() {
        if visited[start.id as usize] {
            continue;
        }
        let mut members = Vec::new();
        let mut walk = Walk {
            trace: &mut trace,
            color,
            stroke: PALETTE[color],
            width: params.width,
            d: format!("M {} {}", start.pos.x, start.pos.y),
        };

        let mut cur = start;
        loop {
            visit(&mut visited, &mut members, cur.id, Adjacency::Jump)?;
            let across = map.follow(cur.id, Adjacency::Edge)?;
            let arrive = map.follow(across.id, Adjacency::Interior)?;
            visit(&mut visited, &mut members, arrive.id, Adjacency::Edge)?;

            walk.line(cur.pos, cur.quarter_edge_point);
            walk.crossing(cur, arrive, params.cross_mode);
            walk.line(arrive.quarter_edge_point, arrive.pos);

            let turned = map.follow(arrive.id, Adjacency::Jump)?;
            walk.turn(arrive, turned);
            cur = turned;
            if cur.id == start.id {
                break;
            }
        }

        walk.d.push_str(&format!(" M {} {} Z", cur.pos.x, cur.pos.y));
        let d = std::mem::take(&mut walk.d);
        if params.cross_mode == CrossMode::Cut {
            trace.layers.walks.push((color, d));
        }
        debug!(cycle = trace.cycles.len(), color, quarter_points = members.len(), "traced stanchion cycle");
        trace.cycles.push(Cycle { color, quarter_points: members });
        color = (color + 1) % PALETTE.len();
    }

    debug!(cycles = trace.cycles.len(), commands = trace.commands.len(), "stanchion trace complete");
    Ok(trace)
}
