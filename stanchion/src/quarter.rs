//! Quarter points: the anchors of the stanchion weave.
//!
//! Two quarter points are created for every (vertex, incident link) pair: the
//! even one sits on the clockwise side of the link (seen from the vertex), the
//! odd one on the counter-clockwise side. They reference each other by id.

use serde::Serialize;

use crate::geometry::tolerance::EPS_LEN;
use crate::model::Vec2;
use crate::params::TwistMode;

/// Share of the stanchion height left open around the crossing of a cut strand.
pub const CUT_GAP_RATIO: f32 = 0.5;

pub type QpId = u32;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuarterPoint {
    pub id: QpId,
    pub pos: Vec2,
    /// Control point of the arc hugging the owning vertex.
    pub cp: Vec2,
    /// Neighbour in the rotation around the same vertex.
    pub jump_adj: QpId,
    /// Partner at the other end of the same link, same side. Unset until the
    /// other endpoint has been processed.
    pub edge_adj: Option<QpId>,
    /// The other quarter point created for the same link at the same vertex.
    pub interior_adj: QpId,
    pub vertex_adj: u32,
    /// Position of the owning vertex when the map was built.
    pub vertex_pos: Vec2,
    /// Vertex the link leads to.
    #[serde(skip)]
    pub(crate) toward: u32,

    pub edge_point: Vec2,
    pub quarter_edge_point: Vec2,
    pub quarter_edge_cp: Vec2,
    pub middle_edge_point: Vec2,
    pub middle_edge_cp: Vec2,
}

/// Inputs of the second synthesis pass that do not depend on the quarter point.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CrossingShape {
    pub height: f32,
    pub cross_ratio: f32,
    pub twist_value: f32,
    pub twist_mode: TwistMode,
}

impl QuarterPoint {
    pub(crate) fn new(
        id: QpId,
        pos: Vec2,
        cp: Vec2,
        jump_adj: QpId,
        interior_adj: QpId,
        vertex_adj: u32,
        vertex_pos: Vec2,
        toward: u32,
    ) -> Self {
        QuarterPoint {
            id,
            pos,
            cp,
            jump_adj,
            edge_adj: None,
            interior_adj,
            vertex_adj,
            vertex_pos,
            toward,
            edge_point: pos,
            quarter_edge_point: pos,
            quarter_edge_cp: pos,
            middle_edge_point: pos,
            middle_edge_cp: pos,
        }
    }

    pub fn is_even(&self) -> bool {
        self.id % 2 == 0
    }

    /// Pass 1: project the corner shared with the jump partner onto the link.
    pub(crate) fn compute_edge_point(&mut self, jump: &QuarterPoint, edge: &QuarterPoint) {
        let corner = self.pos.midpoint(jump.pos);
        self.edge_point = corner.project_on_line(self.vertex_pos, edge.vertex_pos);
    }

    /// Pass 2: geometry of the strand leaving this quarter point along its link.
    ///
    /// The strand runs parallel to the link at this quarter point's side offset
    /// until the crossing region (the central `cross_ratio` share of the link),
    /// then bends toward the middle of the link.
    pub(crate) fn compute_quarter_middle_points(&mut self, edge: &QuarterPoint, shape: CrossingShape) {
        let start = self.edge_point;
        let axis = edge.edge_point - start;
        let len = axis.len();
        let dir = axis.normalized();
        let side = self.pos - start;
        let c = shape.cross_ratio;

        self.quarter_edge_point = start + axis * ((1.0 - c) * 0.5) + side;
        self.quarter_edge_cp = self.quarter_edge_point + dir * (c * len / 3.0);

        let gap = (CUT_GAP_RATIO * shape.height).min(c * len * 0.25);
        let twist = match shape.twist_mode {
            TwistMode::None => Vec2::ZERO,
            TwistMode::Lateral => {
                if side.len() > EPS_LEN {
                    -side.with_len(shape.twist_value * shape.height)
                } else {
                    dir.perp() * (shape.twist_value * shape.height)
                }
            }
            TwistMode::Along => dir * (shape.twist_value * shape.height),
        };
        self.middle_edge_point = start + axis * 0.5 - dir * gap + twist;
        self.middle_edge_cp = self.middle_edge_point - dir * (c * len / 6.0) + side * 0.5;
    }
}
