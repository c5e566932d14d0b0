//! Rotation system and quarter point synthesis.
//!
//! Every vertex sorts its neighbours by angle; each incident link then gets
//! an even (clockwise side) and an odd (counter-clockwise side) quarter point.
//! Ids are dense and assigned vertex by vertex, so the quarter points of a
//! vertex of degree `d` occupy `[base, base + 2d)`.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::geometry::math::{angle_around, turn_angle};
use crate::geometry::tolerance::{clamp, safe_div, EPS_POS};
use crate::model::Vec2;
use crate::params::StanchionParams;
use crate::quarter::{QpId, QuarterPoint};
use crate::Graph;

/// Control points of a leaf reach this many heights behind the vertex.
pub const LEAF_CP_STRETCH: f32 = 1.4;
/// Along-link distance of a corner point is capped at this many heights.
pub const MAX_CORNER_STRETCH: f32 = 4.0;
/// Heights between the meeting point of two offset lines and the start of
/// the corner arc.
pub const CORNER_ROUND: f32 = 0.5;
/// `durete` value for which a corner arc is pulled fully into its corner.
pub const DURETE_SCALE: f32 = 10.0;

/// Total order of neighbours around `center`: angle, then distance, then id.
pub fn compare_by_angle(center: Vec2, a: (u32, Vec2), b: (u32, Vec2)) -> Ordering {
    angle_around(center, a.1)
        .total_cmp(&angle_around(center, b.1))
        .then_with(|| (a.1 - center).len_sq().total_cmp(&(b.1 - center).len_sq()))
        .then_with(|| a.0.cmp(&b.0))
}

/// Neighbours of `v` with their positions, in rotation order.
pub fn rotation_at(g: &Graph, v: u32) -> Vec<(u32, Vec2)> {
    let center = match g.get_vertex(v) {
        Some(c) => c,
        None => return Vec::new(),
    };
    let mut around: Vec<(u32, Vec2)> = g
        .neighbors(v)
        .into_iter()
        .filter_map(|n| g.get_vertex(n).map(|p| (n, p)))
        .collect();
    around.sort_by(|a, b| compare_by_angle(center, *a, *b));
    around
}

/// Vertex -> neighbours with their positions, from a single pass over the links.
pub fn neighbour_map(g: &Graph) -> HashMap<u32, Vec<(u32, Vec2)>> {
    let mut adj: HashMap<u32, Vec<(u32, Vec2)>> = HashMap::new();
    for (_, l) in g.links() {
        let (Some(pa), Some(pb)) = (g.get_vertex(l.a), g.get_vertex(l.b)) else { continue };
        adj.entry(l.a).or_default().push((l.b, pb));
        adj.entry(l.b).or_default().push((l.a, pa));
    }
    adj
}

/// Corner between consecutive links `a` then `b` (counter-clockwise) around
/// `v`: where the rounded arc leaves each link's offset line, and its control
/// point.
#[derive(Clone, Copy, Debug)]
pub struct Corner {
    pub near_a: Vec2,
    pub cp: Vec2,
    pub near_b: Vec2,
}

/// Corner construction. The offset lines at `ha` from link `a` and `hb` from
/// link `b` meet inside a convex corner; the arc starts `CORNER_ROUND`
/// heights past that meeting point on each line and `durete` pulls its
/// control point from the chord toward it. Flat and reflex corners have no
/// meeting point on the inside, so the arc wraps around the vertex from the
/// plain perpendicular offsets.
pub fn stanchion_corner(v: Vec2, a: Vec2, b: Vec2, ha: f32, hb: f32, durete: f32) -> Corner {
    let da = (a - v).normalized();
    let db = (b - v).normalized();
    let na = da.perp();
    let nb = -db.perp();
    let theta = turn_angle(da, db);
    let sin = da.cross(db);
    let cos = da.dot(db);
    let stiffness = durete / DURETE_SCALE;

    if sin > EPS_POS && theta < std::f32::consts::PI {
        let cap = MAX_CORNER_STRETCH * ha.max(hb);
        let xa = clamp(safe_div(hb + ha * cos, sin, 0.0), 0.0, cap);
        let xb = clamp(safe_div(ha + hb * cos, sin, 0.0), 0.0, cap);
        let meet_a = v + da * xa + na * ha;
        let meet_b = v + db * xb + nb * hb;
        let round = CORNER_ROUND * (ha + hb) * 0.5;
        let near_a = meet_a + da * round;
        let near_b = meet_b + db * round;
        let chord = near_a.midpoint(near_b);
        Corner { near_a, cp: chord.lerp(meet_a.midpoint(meet_b), stiffness), near_b }
    } else {
        let bisector = da.rotate(theta * 0.5);
        let reach = stiffness * (ha + hb) * 0.5;
        Corner { near_a: v + na * ha, cp: v + bisector * reach, near_b: v + nb * hb }
    }
}

/// Structural pass: quarter points with positions, control points and all
/// three adjacencies. Derived edge geometry is left for the synthesizer.
pub fn build_quarter_points(g: &Graph, params: &StanchionParams) -> Vec<QuarterPoint> {
    let mut adj = neighbour_map(g);
    let mut qps: Vec<QuarterPoint> = Vec::new();
    // (vertex, neighbour) -> even quarter point of that link at that vertex
    let mut firsts: HashMap<(u32, u32), QpId> = HashMap::new();
    let mut built = 0usize;

    for (vid, vertex) in g.vertices() {
        let Some(mut around) = adj.remove(&vid) else { continue };
        let center = vertex.pos();
        around.sort_by(|a, b| compare_by_angle(center, *a, *b));
        if around.iter().any(|(_, p)| p.dist(center) <= EPS_POS) {
            warn!(vertex = vid, "neighbour coincides with vertex; its quarter points collapse");
        }
        let base = qps.len() as QpId;

        if around.len() == 1 {
            push_leaf(&mut qps, base, vid, center, around[0], params);
        } else {
            push_rotation(&mut qps, base, vid, center, &around, params);
        }

        for (i, (nid, _)) in around.iter().enumerate() {
            let even = base + 2 * i as QpId;
            if let Some(&other) = firsts.get(&(*nid, vid)) {
                link_edge(&mut qps, even, other + 1);
                link_edge(&mut qps, even + 1, other);
            }
            firsts.insert((vid, *nid), even);
        }
        built += 1;
    }

    debug!(vertices = built, quarter_points = qps.len(), "built rotation system");
    qps
}

fn link_edge(qps: &mut [QuarterPoint], a: QpId, b: QpId) {
    qps[a as usize].edge_adj = Some(b);
    qps[b as usize].edge_adj = Some(a);
}

fn push_leaf(
    qps: &mut Vec<QuarterPoint>,
    base: QpId,
    vid: u32,
    center: Vec2,
    (nid, npos): (u32, Vec2),
    params: &StanchionParams,
) {
    let dir = (npos - center).normalized();
    let hh = params.height_for(center.dist(npos));
    let offset = dir.perp() * hh;
    let back = dir * (LEAF_CP_STRETCH * hh);
    let even = center - offset;
    let odd = center + offset;
    qps.push(QuarterPoint::new(base, even, even - back, base + 1, base + 1, vid, center, nid));
    qps.push(QuarterPoint::new(base + 1, odd, odd - back, base, base, vid, center, nid));
}

fn push_rotation(
    qps: &mut Vec<QuarterPoint>,
    base: QpId,
    vid: u32,
    center: Vec2,
    around: &[(u32, Vec2)],
    params: &StanchionParams,
) {
    let n = around.len();
    let span = 2 * n as QpId;
    let height = |p: Vec2| params.height_for(center.dist(p));
    for i in 0..n {
        let (nid, cur) = around[i];
        let prev = around[(i + n - 1) % n].1;
        let next = around[(i + 1) % n].1;
        let before = stanchion_corner(center, prev, cur, height(prev), height(cur), params.durete);
        let after = stanchion_corner(center, cur, next, height(cur), height(next), params.durete);

        let id = base + 2 * i as QpId;
        let jump_even = if id == base { base + span - 1 } else { id - 1 };
        let jump_odd = if id + 2 >= base + span { base } else { id + 2 };
        qps.push(QuarterPoint::new(id, before.near_b, before.cp, jump_even, id + 1, vid, center, nid));
        qps.push(QuarterPoint::new(id + 1, after.near_a, after.cp, jump_odd, id, vid, center, nid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool { (a - b).len() < 1e-3 }

    #[test]
    fn right_angle_corner_rounds_off_the_meeting_point() {
        let c = stanchion_corner(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            2.0,
            2.0,
            DURETE_SCALE,
        );
        // Offset lines meet at (2, 2); the arc starts one unit further out
        assert!(close(c.near_a, Vec2::new(3.0, 2.0)));
        assert!(close(c.near_b, Vec2::new(2.0, 3.0)));
        assert!(close(c.cp, Vec2::new(2.0, 2.0)));
        let soft = stanchion_corner(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            2.0,
            2.0,
            0.0,
        );
        assert!(close(soft.cp, Vec2::new(2.5, 2.5)));
    }

    #[test]
    fn reflex_corner_uses_perpendicular_offsets() {
        // From +y around to +x is a three-quarter turn
        let c = stanchion_corner(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
            2.0,
            2.0,
            0.0,
        );
        assert!(close(c.near_a, Vec2::new(-2.0, 0.0)));
        assert!(close(c.near_b, Vec2::new(0.0, -2.0)));
        assert!(close(c.cp, Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn ties_break_on_distance_then_id() {
        let o = Vec2::new(0.0, 0.0);
        let near = (7, Vec2::new(1.0, 0.0));
        let far = (2, Vec2::new(5.0, 0.0));
        assert_eq!(compare_by_angle(o, near, far), Ordering::Less);
        let twin = (1, Vec2::new(1.0, 0.0));
        assert_eq!(compare_by_angle(o, near, twin), Ordering::Greater);
    }

    #[test]
    fn star_pairs_every_link_end_once() {
        let mut g = Graph::new();
        let hub = g.add_vertex(0.0, 0.0).unwrap();
        let spokes: Vec<u32> = [(50.0, 0.0), (0.0, 50.0), (-50.0, 0.0), (0.0, -50.0)]
            .iter()
            .map(|&(x, y)| g.add_vertex(x, y).unwrap())
            .collect();
        for &s in &spokes {
            g.add_link(hub, s).unwrap();
        }
        let adj = neighbour_map(&g);
        assert_eq!(adj[&hub].len(), 4);
        assert!(spokes.iter().all(|s| adj[s] == vec![(hub, Vec2::new(0.0, 0.0))]));

        let qps = build_quarter_points(&g, &StanchionParams::default());
        assert_eq!(qps.len(), 16);
        for q in &qps {
            let e = q.edge_adj.expect("edge partner");
            let other = &qps[e as usize];
            assert_eq!(other.edge_adj, Some(q.id));
            assert_eq!(other.vertex_adj, q.toward);
            assert_ne!(other.id % 2, q.id % 2);
        }
    }
}
