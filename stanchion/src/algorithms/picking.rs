use crate::geometry::math::seg_distance_sq;
use crate::model::PointedElement;
use crate::Graph;

/// Element under (x, y) within `tol`. Vertices win over links; ties go to the
/// lower id.
pub fn pick_impl(g: &Graph, x: f32, y: f32, tol: f32) -> PointedElement {
    let tol2 = tol * tol;
    // Vertices first
    let mut best_vertex: Option<(u32, f32)> = None;
    for (id, v) in g.vertices() {
        let d2 = (v.x - x).powi(2) + (v.y - y).powi(2);
        if d2 <= tol2 && best_vertex.map_or(true, |(_, bd)| d2 < bd) {
            best_vertex = Some((id, d2));
        }
    }
    if let Some((id, d2)) = best_vertex {
        return PointedElement::Vertex { id, dist: d2.sqrt() };
    }
    // Links
    let mut best_link: Option<(u32, f32, f32)> = None;
    for (id, l) in g.links() {
        let (Some(a), Some(b)) = (g.get_vertex(l.a), g.get_vertex(l.b)) else { continue };
        let (d2, t) = seg_distance_sq(x, y, a.x, a.y, b.x, b.y);
        if d2 <= tol2 && best_link.map_or(true, |(_, bd, _)| d2 < bd) {
            best_link = Some((id, d2, t));
        }
    }
    if let Some((id, d2, t)) = best_link {
        return PointedElement::Link { id, t, dist: d2.sqrt() };
    }
    PointedElement::Empty
}
