//! Combinatorial map of quarter points and its curve geometry.
//!
//! Quarter points live in a dense arena indexed by id. Building runs three
//! passes that must stay separate: the structural pass (rotation system and
//! adjacencies), edge projection points (needs the jump and edge partners to
//! exist), then the quarter/middle points (needs every edge point).

use tracing::{debug, error};

use crate::algorithms::rotation::build_quarter_points;
use crate::error::{Adjacency, Result, StanchionError};
use crate::params::StanchionParams;
use crate::quarter::{CrossingShape, QpId, QuarterPoint};
use crate::Graph;

#[derive(Clone, Debug)]
pub struct CombinatorialMap {
    quarter_points: Vec<QuarterPoint>,
    cross_ratio: f32,
}

impl CombinatorialMap {
    pub fn build(g: &Graph, params: &StanchionParams) -> Result<CombinatorialMap> {
        let mut qps = build_quarter_points(g, params);
        let cross_ratio = params.effective_cross_ratio();

        for i in 0..qps.len() {
            let jump = partner(&qps, i, Adjacency::Jump)?.clone();
            let edge = partner(&qps, i, Adjacency::Edge)?.clone();
            qps[i].compute_edge_point(&jump, &edge);
        }

        for i in 0..qps.len() {
            let edge = partner(&qps, i, Adjacency::Edge)?.clone();
            let shape = CrossingShape {
                height: params.height_for(qps[i].vertex_pos.dist(edge.vertex_pos)),
                cross_ratio,
                twist_value: params.twist_value,
                twist_mode: params.twist_mode,
            };
            qps[i].compute_quarter_middle_points(&edge, shape);
        }

        debug!(quarter_points = qps.len(), cross_ratio, "synthesized stanchion geometry");
        Ok(CombinatorialMap { quarter_points: qps, cross_ratio })
    }

    /// Cross ratio the synthesizer actually used.
    pub fn cross_ratio(&self) -> f32 {
        self.cross_ratio
    }

    pub fn len(&self) -> usize {
        self.quarter_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quarter_points.is_empty()
    }

    pub fn get(&self, id: QpId) -> Option<&QuarterPoint> {
        self.quarter_points.get(id as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuarterPoint> {
        self.quarter_points.iter()
    }

    pub fn quarter_points(&self) -> &[QuarterPoint] {
        &self.quarter_points
    }

    #[cfg(test)]
    pub(crate) fn quarter_points_mut(&mut self) -> &mut [QuarterPoint] {
        &mut self.quarter_points
    }

    /// Partner of `id` through `adjacency`. A dangling link means the map is
    /// malformed and nothing drawn from it can be trusted.
    pub fn follow(&self, id: QpId, adjacency: Adjacency) -> Result<&QuarterPoint> {
        if id as usize >= self.quarter_points.len() {
            error!(qp = id, %adjacency, "walked off the combinatorial map");
            return Err(StanchionError::MalformedAdjacency { qp: id, adjacency });
        }
        partner(&self.quarter_points, id as usize, adjacency)
    }

    /// Verifies the structural invariants: jump partners share the vertex,
    /// edge partners are mutual and sit on the other endpoint, interior
    /// partners are `{2k, 2k+1}`.
    pub fn check_invariants(&self) -> Result<()> {
        for q in &self.quarter_points {
            let bad = |adjacency| StanchionError::MalformedAdjacency { qp: q.id, adjacency };
            let jump = self.follow(q.id, Adjacency::Jump)?;
            if jump.vertex_adj != q.vertex_adj || jump.id == q.id {
                return Err(bad(Adjacency::Jump));
            }
            let edge = self.follow(q.id, Adjacency::Edge)?;
            if edge.edge_adj != Some(q.id) || edge.vertex_adj != q.toward || edge.id % 2 == q.id % 2 {
                return Err(bad(Adjacency::Edge));
            }
            let interior = self.follow(q.id, Adjacency::Interior)?;
            if interior.id != q.id ^ 1 || interior.interior_adj != q.id {
                return Err(bad(Adjacency::Interior));
            }
        }
        Ok(())
    }
}

fn partner(qps: &[QuarterPoint], i: usize, adjacency: Adjacency) -> Result<&QuarterPoint> {
    let q = &qps[i];
    let target = match adjacency {
        Adjacency::Jump => Some(q.jump_adj),
        Adjacency::Edge => q.edge_adj,
        Adjacency::Interior => Some(q.interior_adj),
    };
    target.and_then(|id| qps.get(id as usize)).ok_or_else(|| {
        error!(qp = q.id, %adjacency, "dangling adjacency in combinatorial map");
        StanchionError::MalformedAdjacency { qp: q.id, adjacency }
    })
}
